//! # Redis
//!
//! Document store for todo records.
//!
//! ## Layout
//!
//! - `{prefix}todo:{id}` holds the record as a JSON document
//! - `{prefix}todos:index` is a list of ids in insertion order, used by `list`
//!
//! The prefix is empty in production. Creates run as a MULTI/EXEC pipeline;
//! deletes and bulk deletes run as Lua scripts, so reading the index and
//! removing documents is one atomic step and the document and the index
//! never disagree. Updates are written with `SET ... XX`, which refuses to
//! recreate a record deleted between the read and the write. Concurrent
//! updates to the same record are last-write-wins.

use ::redis::{aio::MultiplexedConnection, AsyncCommands, Client, Script};
use async_trait::async_trait;
use todo_shared::{NewTodo, TodoId, TodoItem, TodoPatch};
use tracing::debug;

use super::{StoreError, TodoStore};

/// KEYS[1] = document, KEYS[2] = index, ARGV[1] = id.
/// Returns the removed document, or nil.
const DELETE_SCRIPT: &str = r"
local document = redis.call('GET', KEYS[1])
if not document then
  return false
end
redis.call('DEL', KEYS[1])
redis.call('LREM', KEYS[2], 0, ARGV[1])
return document
";

/// KEYS[1] = index, ARGV[1] = document key prefix.
/// Returns how many documents were removed.
const CLEAR_SCRIPT: &str = r"
local ids = redis.call('LRANGE', KEYS[1], 0, -1)
local deleted = 0
for _, id in ipairs(ids) do
  deleted = deleted + redis.call('DEL', ARGV[1] .. id)
end
redis.call('DEL', KEYS[1])
return deleted
";

pub struct RedisStore {
    connection: MultiplexedConnection,
    prefix: String,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        Self::connect_with_prefix(redis_url, "").await
    }

    /// Connects with every key namespaced under `prefix`.
    pub async fn connect_with_prefix(redis_url: &str, prefix: &str) -> Result<Self, StoreError> {
        let unavailable = |e: ::redis::RedisError| {
            StoreError::Unavailable(format!("cannot connect to {redis_url}: {e}"))
        };
        let client = Client::open(redis_url).map_err(unavailable)?;
        let connection = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(unavailable)?;

        Ok(Self {
            connection,
            prefix: prefix.to_string(),
        })
    }

    fn document_prefix(&self) -> String {
        format!("{}todo:", self.prefix)
    }

    fn todo_key(&self, id: impl std::fmt::Display) -> String {
        format!("{}{id}", self.document_prefix())
    }

    fn index_key(&self) -> String {
        format!("{}todos:index", self.prefix)
    }
}

#[async_trait]
impl TodoStore for RedisStore {
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        let mut conn = self.connection.clone();

        let ids: Vec<String> = conn.lrange(self.index_key(), 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| self.todo_key(id)).collect();
        let documents: Vec<Option<String>> =
            ::redis::cmd("MGET").arg(&keys).query_async(&mut conn).await?;

        // an id can outlive its document only if a script was cut short
        documents
            .into_iter()
            .flatten()
            .map(|document| serde_json::from_str::<TodoItem>(&document).map_err(StoreError::from))
            .collect()
    }

    async fn create(&self, todo: NewTodo) -> Result<TodoItem, StoreError> {
        let item = TodoItem::new(todo);
        let document = serde_json::to_string(&item)?;
        let mut conn = self.connection.clone();

        let () = ::redis::pipe()
            .atomic()
            .set(self.todo_key(item.id), document)
            .ignore()
            .rpush(self.index_key(), item.id.to_string())
            .ignore()
            .query_async(&mut conn)
            .await?;

        debug!("Created todo {}", item.id);
        Ok(item)
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<TodoItem>, StoreError> {
        let key = self.todo_key(id);
        let mut conn = self.connection.clone();

        let document: Option<String> = conn.get(&key).await?;
        let Some(document) = document else {
            return Ok(None);
        };

        let mut item: TodoItem = serde_json::from_str(&document)?;
        if patch.is_empty() {
            return Ok(Some(item));
        }
        item.apply(&patch);

        let written: Option<String> = ::redis::cmd("SET")
            .arg(&key)
            .arg(serde_json::to_string(&item)?)
            .arg("XX")
            .query_async(&mut conn)
            .await?;

        Ok(written.map(|_| item))
    }

    async fn delete(&self, id: TodoId) -> Result<Option<TodoItem>, StoreError> {
        let mut conn = self.connection.clone();

        let document: Option<String> = Script::new(DELETE_SCRIPT)
            .key(self.todo_key(id))
            .key(self.index_key())
            .arg(id.to_string())
            .invoke_async(&mut conn)
            .await?;

        document
            .map(|document| serde_json::from_str::<TodoItem>(&document))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        let mut conn = self.connection.clone();

        let deleted: usize = Script::new(CLEAR_SCRIPT)
            .key(self.index_key())
            .arg(self.document_prefix())
            .invoke_async(&mut conn)
            .await?;

        debug!("Deleted {deleted} todos");
        Ok(deleted)
    }
}
