//! Handle table abstraction trait

use async_trait::async_trait;
use player_core::{AppError, Record};
use uuid::Uuid;

/// A persistence table of records keyed by video id.
///
/// `put` replaces any existing record with the same id.
#[async_trait]
pub trait HandleTable<R: Record>: Send + Sync {
    /// Table name, used for logging.
    fn name(&self) -> &str;

    /// Fetch the record for `id`, if any.
    async fn get(&self, id: Uuid) -> Result<Option<R>, AppError>;

    /// Insert or replace a record.
    async fn put(&self, record: R) -> Result<(), AppError>;
}
