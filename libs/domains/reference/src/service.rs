use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{ReferenceError, ReferenceResult};
use crate::kind::ReferenceKind;
use crate::models::{ReferenceEntry, ReferenceView, name_from_body};
use crate::repository::ReferenceRepository;

/// Service layer for one reference table
pub struct ReferenceService<R: ReferenceRepository> {
    kind: ReferenceKind,
    repository: Arc<R>,
}

impl<R: ReferenceRepository> Clone for ReferenceService<R> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ReferenceRepository> ReferenceService<R> {
    pub fn new(kind: ReferenceKind, repository: R) -> Self {
        Self {
            kind,
            repository: Arc::new(repository),
        }
    }

    fn view(&self, entry: ReferenceEntry) -> ReferenceView {
        ReferenceView::new(self.kind, entry)
    }

    pub async fn list(&self) -> ReferenceResult<Vec<ReferenceView>> {
        let entries = self.repository.get_all().await?;
        Ok(entries.into_iter().map(|e| self.view(e)).collect())
    }

    pub async fn get(&self, id: i32) -> ReferenceResult<ReferenceView> {
        self.repository
            .get_by_id(id)
            .await?
            .map(|e| self.view(e))
            .ok_or(ReferenceError::NotFound(self.kind))
    }

    pub async fn create(&self, body: Map<String, Value>) -> ReferenceResult<ReferenceView> {
        let name = name_from_body(self.kind, &body)?;

        if self.repository.find_by_name(&name).await?.is_some() {
            return Err(ReferenceError::AlreadyExists(name));
        }

        let entry = self.repository.insert(&name).await?;
        Ok(self.view(entry))
    }

    /// Rename a row. Keeping its current name is not a conflict.
    pub async fn update(&self, id: i32, body: Map<String, Value>) -> ReferenceResult<()> {
        let name = name_from_body(self.kind, &body)?;

        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ReferenceError::NotFound(self.kind));
        }

        let taken = self
            .repository
            .find_by_name(&name)
            .await?
            .is_some_and(|owner| owner.id != id);
        if taken {
            return Err(ReferenceError::AlreadyTaken(name));
        }

        // The row can vanish between the lookup and the write.
        if !self.repository.update(id, &name).await? {
            return Err(ReferenceError::NotFound(self.kind));
        }

        tracing::info!(kind = %self.kind, id, "Updated reference entry");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> ReferenceResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ReferenceError::NotFound(self.kind));
        }

        tracing::info!(kind = %self.kind, id, "Deleted reference entry");
        Ok(())
    }
}
