use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ReferenceError, ReferenceResult};
use crate::models::ReferenceEntry;

/// Persistence for one reference table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// Every row, ordered by id
    async fn get_all(&self) -> ReferenceResult<Vec<ReferenceEntry>>;

    async fn get_by_id(&self, id: i32) -> ReferenceResult<Option<ReferenceEntry>>;

    /// Exact-match lookup on the name column
    async fn find_by_name(&self, name: &str) -> ReferenceResult<Option<ReferenceEntry>>;

    /// Fails with [`ReferenceError::AlreadyExists`] when the name is taken
    async fn insert(&self, name: &str) -> ReferenceResult<ReferenceEntry>;

    /// Returns false when no row has `id`.
    ///
    /// Fails with [`ReferenceError::AlreadyTaken`] when another row owns the name.
    async fn update(&self, id: i32, name: &str) -> ReferenceResult<bool>;

    /// Returns false when no row has `id`
    async fn delete(&self, id: i32) -> ReferenceResult<bool>;
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, String>,
    next_id: i32,
}

impl Table {
    fn owner_of(&self, name: &str) -> Option<i32> {
        self.rows
            .iter()
            .find_map(|(id, existing)| (existing == name).then_some(*id))
    }
}

/// In-memory implementation of ReferenceRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryReferenceRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryReferenceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `names`, ids assigned from 1
    pub async fn seeded<I, S>(names: I) -> ReferenceResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let repo = Self::new();
        for name in names {
            repo.insert(name.as_ref()).await?;
        }
        Ok(repo)
    }
}

#[async_trait]
impl ReferenceRepository for InMemoryReferenceRepository {
    async fn get_all(&self) -> ReferenceResult<Vec<ReferenceEntry>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, name)| ReferenceEntry {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> ReferenceResult<Option<ReferenceEntry>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).map(|name| ReferenceEntry {
            id,
            name: name.clone(),
        }))
    }

    async fn find_by_name(&self, name: &str) -> ReferenceResult<Option<ReferenceEntry>> {
        let table = self.table.read().await;
        Ok(table.owner_of(name).map(|id| ReferenceEntry {
            id,
            name: name.to_string(),
        }))
    }

    async fn insert(&self, name: &str) -> ReferenceResult<ReferenceEntry> {
        let mut table = self.table.write().await;

        if table.owner_of(name).is_some() {
            return Err(ReferenceError::AlreadyExists(name.to_string()));
        }

        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(id, name.to_string());

        Ok(ReferenceEntry {
            id,
            name: name.to_string(),
        })
    }

    async fn update(&self, id: i32, name: &str) -> ReferenceResult<bool> {
        let mut table = self.table.write().await;

        if !table.rows.contains_key(&id) {
            return Ok(false);
        }
        if table.owner_of(name).is_some_and(|owner| owner != id) {
            return Err(ReferenceError::AlreadyTaken(name.to_string()));
        }

        table.rows.insert(id, name.to_string());
        Ok(true)
    }

    async fn delete(&self, id: i32) -> ReferenceResult<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }
}
