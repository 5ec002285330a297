use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, SqlErr, Statement,
};

use crate::{
    error::{ReferenceError, ReferenceResult},
    kind::ReferenceKind,
    models::ReferenceEntry,
    repository::ReferenceRepository,
};

/// PostgreSQL implementation of ReferenceRepository.
///
/// Table and column names come from [`ReferenceKind`], never from input;
/// values are always bound.
#[derive(Clone)]
pub struct PgReferenceRepository {
    db: DatabaseConnection,
    kind: ReferenceKind,
}

impl PgReferenceRepository {
    pub fn new(db: DatabaseConnection, kind: ReferenceKind) -> Self {
        Self { db, kind }
    }

    fn select(&self) -> String {
        format!(
            "SELECT id, {} AS name FROM {}",
            self.kind.name_field(),
            self.kind.table()
        )
    }

    fn statement<I>(&self, sql: String, values: I) -> Statement
    where
        I: IntoIterator<Item = sea_orm::Value>,
    {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }
}

#[derive(Debug, FromQueryResult)]
struct ReferenceRow {
    id: i32,
    name: String,
}

impl From<ReferenceRow> for ReferenceEntry {
    fn from(row: ReferenceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

fn db_error(e: DbErr) -> ReferenceError {
    ReferenceError::Internal(format!("Database error: {}", e))
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait]
impl ReferenceRepository for PgReferenceRepository {
    async fn get_all(&self) -> ReferenceResult<Vec<ReferenceEntry>> {
        let stmt = self.statement(format!("{} ORDER BY id", self.select()), []);

        let rows = ReferenceRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i32) -> ReferenceResult<Option<ReferenceEntry>> {
        let stmt = self.statement(format!("{} WHERE id = $1", self.select()), [id.into()]);

        let row = ReferenceRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> ReferenceResult<Option<ReferenceEntry>> {
        let sql = format!("{} WHERE {} = $1", self.select(), self.kind.name_field());
        let stmt = self.statement(sql, [name.into()]);

        let row = ReferenceRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, name: &str) -> ReferenceResult<ReferenceEntry> {
        let field = self.kind.name_field();
        let sql = format!(
            "INSERT INTO {} ({field}) VALUES ($1) RETURNING id, {field} AS name",
            self.kind.table()
        );
        let stmt = self.statement(sql, [name.into()]);

        let row = ReferenceRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ReferenceError::AlreadyExists(name.to_string())
                } else {
                    db_error(e)
                }
            })?
            .ok_or_else(|| ReferenceError::Internal("INSERT returned no row".to_string()))?;

        tracing::info!(kind = %self.kind, id = row.id, "Created reference entry");
        Ok(row.into())
    }

    async fn update(&self, id: i32, name: &str) -> ReferenceResult<bool> {
        let sql = format!(
            "UPDATE {} SET {} = $1 WHERE id = $2",
            self.kind.table(),
            self.kind.name_field()
        );
        let stmt = self.statement(sql, [name.into(), id.into()]);

        let result = self.db.execute_raw(stmt).await.map_err(|e| {
            if is_unique_violation(&e) {
                ReferenceError::AlreadyTaken(name.to_string())
            } else {
                db_error(e)
            }
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> ReferenceResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.kind.table());
        let stmt = self.statement(sql, [id.into()]);

        let result = self.db.execute_raw(stmt).await.map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
