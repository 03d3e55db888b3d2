use js_sys::Promise;
use todo_shared::{ApiError, HttpRequest, HttpResponse, SyncCommand, SyncOutcome, TodoClient};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, Request, RequestInit, Response};

/// Sends `command` to the server and reports what came back.
pub async fn run(client: &TodoClient, command: SyncCommand) -> SyncOutcome {
    match command {
        SyncCommand::Load => SyncOutcome::Loaded(
            async { client.parse_list(send(client.build_list()).await?) }.await,
        ),
        SyncCommand::Create(todo) => SyncOutcome::Created(
            async { client.parse_create(send(client.build_create(&todo)?).await?) }.await,
        ),
        SyncCommand::Update(id, patch) => SyncOutcome::Updated(
            async { client.parse_update(send(client.build_update(id, &patch)?).await?) }.await,
        ),
        SyncCommand::Delete(id) => SyncOutcome::Deleted(
            async { client.parse_delete(send(client.build_delete(id)).await?) }.await,
        ),
        SyncCommand::DeleteAll => SyncOutcome::Cleared(
            async { client.parse_delete_all(send(client.build_delete_all()).await?) }.await,
        ),
    }
}

/// Writes to the browser console. A no-op off wasm.
pub fn log(message: &str) {
    if cfg!(target_arch = "wasm32") {
        console::log_1(&message.into());
    }
}

async fn send(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let transport = |message: &str| ApiError::Transport(message.to_string());

    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    if let Some(body) = &request.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let fetch_request = Request::new_with_str_and_init(&request.url, &opts)
        .map_err(|_| transport("Failed to create request"))?;

    for (name, value) in &request.headers {
        fetch_request
            .headers()
            .set(name, value)
            .map_err(|_| transport("Failed to set header"))?;
    }

    let window = web_sys::window().ok_or_else(|| transport("No window"))?;

    let response: Response = JsFuture::from(window.fetch_with_request(&fetch_request))
        .await
        .map_err(|_| transport("Failed to send request"))?
        .into();

    let text_promise = response.text().map_err(|_| transport("Failed to read response"))?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|_| transport("Failed to get text"))?
        .as_string()
        .ok_or_else(|| transport("Failed to convert to string"))?;

    log(&format!(
        "[DEBUG] {} {} -> {}",
        request.method.as_str(),
        request.url,
        response.status()
    ));

    Ok(HttpResponse::new(response.status(), body))
}

/// Resolves after `millis` milliseconds.
pub async fn sleep(millis: i32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
        });
        if !matches!(scheduled, Some(Ok(_))) {
            // resolve right away so the toast still clears
            log("Failed to schedule timer");
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }
    });
    let _ = JsFuture::from(promise).await;
}
