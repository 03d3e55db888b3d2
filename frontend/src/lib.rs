use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use todo_shared::{
    Filter, Intent, Notice, NoticeLevel, SyncCommand, SyncOutcome, TodoClient, TodoId, TodoItem,
    TodoState,
};
mod fetch;

const DEFAULT_API_URL: &str = "http://localhost:3001";
const NOTICE_MILLIS: i32 = 1500;

/// What a key press inside a text box asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    Discard,
    Nothing,
}

impl KeyAction {
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => KeyAction::Submit,
            "Escape" => KeyAction::Discard,
            _ => KeyAction::Nothing,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    SetDraft(String),
    DraftKey(KeyAction),
    AddTodo,
    ToggleTodo(TodoId),
    EditTodo(TodoId),
    SetEditText(String),
    EditKey(KeyAction),
    SaveEdit,
    CancelEdit,
    DeleteTodo(TodoId),
    DeleteAll,
    Confirm,
    CancelConfirm,
    SetFilter(Filter),
    Synced(SyncOutcome),
    DismissNotice(u32),
}

#[derive(Debug, Clone)]
pub struct Model {
    state: TodoState,
    client: TodoClient,
    draft: String,
    editing: Option<(TodoId, String)>,
    notices: Vec<(u32, Notice)>,
    next_notice: u32,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            state: TodoState::new(),
            client: TodoClient::new(option_env!("TODO_API_URL").unwrap_or(DEFAULT_API_URL)),
            draft: String::new(),
            editing: None,
            notices: Vec::new(),
            next_notice: 0,
        }
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        self.sync(SyncCommand::Load)
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::SetDraft(draft) => {
                self.draft = draft;
                Cmd::none()
            }
            Msg::DraftKey(KeyAction::Submit) => self.update(Msg::AddTodo),
            Msg::DraftKey(_) => Cmd::none(),
            Msg::AddTodo => {
                // blank input is ignored
                match self.state.dispatch(Intent::Add(self.draft.clone())) {
                    Ok(Some(command)) => {
                        self.draft.clear();
                        self.sync(command)
                    }
                    _ => Cmd::none(),
                }
            }
            Msg::ToggleTodo(id) => self.dispatch(Intent::Toggle(id)),
            Msg::EditTodo(id) => {
                if let Some(todo) = self.state.cache().get(id) {
                    self.editing = Some((id, todo.text.clone()));
                }
                Cmd::none()
            }
            Msg::SetEditText(edit_text) => {
                if let Some((_, current)) = &mut self.editing {
                    *current = edit_text;
                }
                Cmd::none()
            }
            Msg::EditKey(KeyAction::Submit) => self.update(Msg::SaveEdit),
            Msg::EditKey(KeyAction::Discard) => self.update(Msg::CancelEdit),
            Msg::EditKey(KeyAction::Nothing) => Cmd::none(),
            Msg::SaveEdit => match self.editing.take() {
                Some((id, edit_text)) => self.dispatch(Intent::Edit {
                    id,
                    text: edit_text,
                }),
                None => Cmd::none(),
            },
            Msg::CancelEdit => {
                self.editing = None;
                Cmd::none()
            }
            Msg::DeleteTodo(id) => self.dispatch(Intent::Delete(id)),
            Msg::DeleteAll => self.dispatch(Intent::DeleteAll),
            Msg::Confirm => match self.state.confirm() {
                Some(command) => self.sync(command),
                None => Cmd::none(),
            },
            Msg::CancelConfirm => {
                self.state.cancel();
                Cmd::none()
            }
            Msg::SetFilter(filter) => {
                self.state.set_filter(filter);
                Cmd::none()
            }
            Msg::Synced(outcome) => match self.state.apply(outcome) {
                Some(notice) => self.notify(notice),
                None => Cmd::none(),
            },
            Msg::DismissNotice(notice_id) => {
                self.notices.retain(|(id, _)| *id != notice_id);
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        if !self.state.cache().is_ready() {
            return span([], []);
        }

        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [
                div(
                    [class("max-w-2xl mx-auto px-6 py-8")],
                    [
                        h1([class("text-3xl font-bold text-ctp-text mb-6")], [text("Todos")]),
                        self.view_create_form(),
                        self.view_filters(),
                        self.view_confirmation(),
                        self.view_todo_list(),
                        self.view_clear_all(),
                    ],
                ),
                self.view_notices(),
            ],
        )
    }
}

impl Model {
    fn sync(&self, command: SyncCommand) -> Cmd<Msg> {
        let client = self.client.clone();
        Cmd::new(async move { Msg::Synced(fetch::run(&client, command).await) })
    }

    fn dispatch(&mut self, intent: Intent) -> Cmd<Msg> {
        match self.state.dispatch(intent) {
            Ok(Some(command)) => self.sync(command),
            Ok(None) => Cmd::none(),
            Err(e) => self.notify(Notice::error(e.to_string())),
        }
    }

    fn notify(&mut self, notice: Notice) -> Cmd<Msg> {
        if notice.level == NoticeLevel::Error {
            fetch::log(&format!("Error: {}", notice.message));
        }

        let notice_id = self.next_notice;
        self.next_notice = self.next_notice.wrapping_add(1);
        self.notices.push((notice_id, notice));

        Cmd::new(async move {
            fetch::sleep(NOTICE_MILLIS).await;
            Msg::DismissNotice(notice_id)
        })
    }

    fn view_create_form(&self) -> Node<Msg> {
        div([class("flex gap-2 mb-6")], [
            input([
                r#type("text"),
                placeholder("What needs doing?"),
                value(&self.draft),
                on_input(|event| Msg::SetDraft(event.value())),
                on_keydown(|event| Msg::DraftKey(KeyAction::from_key(&event.key()))),
                class("flex-1 px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent"),
            ], []),
            button([
                on_click(|_| Msg::AddTodo),
                class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200"),
            ], [text("Add")]),
        ])
    }

    fn view_filters(&self) -> Node<Msg> {
        let active = self.state.filter();
        div(
            [class("flex space-x-2 mb-4")],
            Filter::ALL.into_iter().map(|filter| {
                button([
                    on_click(move |_| Msg::SetFilter(filter)),
                    class(&format!(
                        "px-3 py-1 rounded-md text-sm font-medium transition-colors duration-200 {}",
                        if filter == active {
                            "bg-ctp-blue text-ctp-base"
                        } else {
                            "text-ctp-subtext0 hover:text-ctp-text hover:bg-ctp-surface0"
                        }
                    )),
                ], [text(filter.label())])
            }).collect::<Vec<_>>(),
        )
    }

    fn view_confirmation(&self) -> Node<Msg> {
        match self.state.pending() {
            Some(confirmation) => div([class("flex items-center justify-between mb-4 p-4 rounded-lg bg-ctp-red/10 border border-ctp-red")], [
                span([class("text-ctp-text font-medium")], [text(confirmation.prompt())]),
                div([class("flex gap-2")], [
                    button([
                        on_click(|_| Msg::Confirm),
                        class("bg-ctp-red hover:bg-ctp-maroon text-ctp-base font-medium px-4 py-1 rounded-md transition-colors duration-200"),
                    ], [text("Delete")]),
                    button([
                        on_click(|_| Msg::CancelConfirm),
                        class("bg-ctp-overlay0 hover:bg-ctp-overlay1 text-ctp-text font-medium px-4 py-1 rounded-md transition-colors duration-200"),
                    ], [text("Cancel")]),
                ]),
            ]),
            None => span([], []),
        }
    }

    fn view_todo_list(&self) -> Node<Msg> {
        let visible = self.state.visible();
        if visible.is_empty() {
            return div([class("text-center py-10 text-ctp-subtext0 italic")], [text("Nothing here.")]);
        }

        ul(
            [class("space-y-3")],
            visible.into_iter().map(|todo| self.view_todo(todo)).collect::<Vec<_>>(),
        )
    }

    fn view_todo(&self, todo: &TodoItem) -> Node<Msg> {
        let todo_id = todo.id;
        let editing = match &self.editing {
            Some((id, edit_text)) if *id == todo_id => Some(edit_text),
            _ => None,
        };

        li(
            [key(todo_id.to_string()),
            class(&format!(
                "flex items-center gap-4 border rounded-xl p-4 bg-ctp-surface0 {}",
                if todo.completed { "border-ctp-green bg-ctp-green/10" } else { "border-ctp-surface1" }
            ))],
            match editing {
                Some(edit_text) => vec![
                    input([
                        r#type("text"),
                        value(edit_text),
                        on_input(|event| Msg::SetEditText(event.value())),
                        on_keydown(|event| Msg::EditKey(KeyAction::from_key(&event.key()))),
                        on_blur(|_| Msg::SaveEdit),
                        class("flex-1 px-3 py-2 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent"),
                    ], []),
                    button([
                        on_click(|_| Msg::SaveEdit),
                        class("bg-ctp-green hover:bg-ctp-teal text-ctp-base font-medium px-4 py-2 rounded-md transition-colors duration-200"),
                    ], [text("Save")]),
                    // mousedown keeps focus in the input, so no blur-save happens first
                    button([
                        on_mousedown(|event| {
                            event.prevent_default();
                            Msg::CancelEdit
                        }),
                        class("bg-ctp-overlay0 hover:bg-ctp-overlay1 text-ctp-text font-medium px-4 py-2 rounded-md transition-colors duration-200"),
                    ], [text("Cancel")]),
                ],
                None => vec![
                    input([
                        r#type("checkbox"),
                        checked(todo.completed),
                        // the box only changes when the server-confirmed record is rendered
                        on_click(move |event| {
                            event.prevent_default();
                            Msg::ToggleTodo(todo_id)
                        }),
                        class("w-5 h-5 cursor-pointer"),
                    ], []),
                    span([class(&format!(
                        "flex-1 break-words {}",
                        if todo.completed { "line-through text-ctp-overlay1" } else { "text-ctp-text" }
                    ))], [text(&todo.text)]),
                    button([
                        on_click(move |_| Msg::EditTodo(todo_id)),
                        class("bg-ctp-blue/20 text-ctp-blue hover:bg-ctp-blue/30 px-3 py-1 rounded-md text-sm transition-colors duration-200"),
                    ], [text("Edit")]),
                    button([
                        on_click(move |_| Msg::DeleteTodo(todo_id)),
                        class("bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30 px-3 py-1 rounded-md text-sm transition-colors duration-200"),
                    ], [text("Delete")]),
                ],
            },
        )
    }

    fn view_clear_all(&self) -> Node<Msg> {
        if self.state.cache().is_empty() {
            return span([], []);
        }

        div([class("mt-6 text-right")], [
            button([
                on_click(|_| Msg::DeleteAll),
                class("bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30 px-3 py-1 rounded-full text-sm font-medium transition-colors duration-200"),
            ], [text("Clear all")]),
        ])
    }

    fn view_notices(&self) -> Node<Msg> {
        div(
            [class("fixed bottom-4 right-4 space-y-2")],
            self.notices.iter().map(|(notice_id, notice)| {
                let notice_id = *notice_id;
                div([
                    key(notice_id.to_string()),
                    on_click(move |_| Msg::DismissNotice(notice_id)),
                    class(&format!(
                        "px-4 py-2 rounded-lg shadow-lg text-ctp-base cursor-pointer {}",
                        match notice.level {
                            NoticeLevel::Success => "bg-ctp-green",
                            NoticeLevel::Error => "bg-ctp-red",
                        }
                    )),
                ], [text(&notice.message)])
            }).collect::<Vec<_>>(),
        )
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    Program::mount_to_body(Model::default());
}
