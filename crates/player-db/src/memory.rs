use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use player_core::{AppError, Record};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::table::HandleTable;

/// In-memory handle table. Contents live as long as the process.
#[derive(Clone)]
pub struct InMemoryTable<R> {
    name: String,
    rows: Arc<RwLock<HashMap<Uuid, R>>>,
}

impl<R: Record> InMemoryTable<R> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl<R: Record> HandleTable<R> for InMemoryTable<R> {
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(skip(self), fields(db.table = %self.name, db.record_id = %id))]
    async fn get(&self, id: Uuid) -> Result<Option<R>, AppError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    #[tracing::instrument(skip(self, record), fields(db.table = %self.name, db.record_id = %record.id()))]
    async fn put(&self, record: R) -> Result<(), AppError> {
        self.rows.write().await.insert(record.id(), record);
        Ok(())
    }
}
