use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
};

use crate::{
    entity::{allowed_user, user},
    error::{UserError, UserResult},
    models::{AllowedEmail, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", e))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_allowed_by_email(&self, email: &str) -> UserResult<Option<AllowedEmail>> {
        let model = allowed_user::Entity::find()
            .filter(allowed_user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn insert_user(&self, email: &str, password_hash: &str) -> UserResult<User> {
        let active_model = user::ActiveModel {
            email: Set(email.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                UserError::ConstraintViolation(detail)
            }
            _ => db_error(e),
        })?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, RuntimeErr};

    #[tokio::test]
    async fn test_find_by_email_maps_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user::Model {
                id: 3,
                email: "allowed@email.com".into(),
                password_hash: "$argon2id$stub".into(),
            }]])
            .into_connection();

        let repo = PgUserRepository::new(db);
        let user = repo.find_by_email("allowed@email.com").await.unwrap().unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.password_hash, "$argon2id$stub");
    }

    #[tokio::test]
    async fn test_find_allowed_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<allowed_user::Model>::new()])
            .into_connection();

        let repo = PgUserRepository::new(db);
        assert!(repo.find_allowed_by_email("nobody@email.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_failure_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal("connection reset".into()))])
            .into_connection();

        let repo = PgUserRepository::new(db);
        let result = repo.find_by_email("allowed@email.com").await;

        assert!(matches!(result, Err(UserError::Internal(_))));
    }
}
