use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Closed set of roles. Authorization decisions match on this exhaustively,
/// never on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await
    }

    /// Whether an administrator account already exists.
    pub async fn admin_exists(db: &PgPool) -> sqlx::Result<bool> {
        let found: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE role = 'admin' LIMIT 1")
                .fetch_optional(db)
                .await?;
        Ok(found.is_some())
    }

    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn set_role(db: &PgPool, id: Uuid, role: Role) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET role = $2
            WHERE id = $1
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(id)
        .bind(role)
        .fetch_optional(db)
        .await
    }

    pub async fn set_password_and_role(
        db: &PgPool,
        id: Uuid,
        password_hash: &str,
        role: Role,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET password_hash = $2, role = $3
            WHERE id = $1
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .bind(role)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

/// The authenticated caller: who is acting, and with which role. Resolved
/// from the database on every request so role edits take effect immediately.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub async fn resolve(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Actor>> {
        sqlx::query_as::<_, Actor>("SELECT id, role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await
    }

    pub fn is_admin(&self) -> bool {
        match self.role {
            Role::Admin => true,
            Role::User => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn role_rejects_unknown_values() {
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }

    #[test]
    fn actor_admin_check_is_role_based() {
        let id = Uuid::new_v4();
        assert!(Actor { id, role: Role::Admin }.is_admin());
        assert!(!Actor { id, role: Role::User }.is_admin());
    }
}
