//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use devlink_core::entities::{Skill, User};
use devlink_core::traits::{Page, RepoResult, UserRepository};
use devlink_core::value_objects::Snowflake;
use devlink_core::DomainError;

use crate::models::{SkillModel, UserModel};

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str = "id, username, email, bio, avatar_url, role, location, website_url, github_url, twitter_url, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, bio, avatar_url, role,
                               location, website_url, github_url, twitter_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.bio)
        .bind(&user.avatar_url)
        .bind(&user.role)
        .bind(&user.location)
        .bind(&user.website_url)
        .bind(&user.github_url)
        .bind(&user.twitter_url)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET username = $2, bio = $3, avatar_url = $4, role = $5, location = $6,
                website_url = $7, github_url = $8, twitter_url = $9, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.bio)
        .bind(&user.avatar_url)
        .bind(&user.role)
        .bind(&user.location)
        .bind(&user.website_url)
        .bind(&user.github_url)
        .bind(&user.twitter_url)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameAlreadyExists))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let hash = sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(hash)
    }

    #[instrument(skip(self))]
    async fn skills(&self, user_id: Snowflake) -> RepoResult<Vec<Skill>> {
        let results = sqlx::query_as::<_, SkillModel>(
            r"
            SELECT id, user_id, name, level, created_at
            FROM skills
            WHERE user_id = $1
            ORDER BY level ASC, name ASC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Skill::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_skill_by_name(
        &self,
        user_id: Snowflake,
        name: &str,
    ) -> RepoResult<Option<Skill>> {
        let result = sqlx::query_as::<_, SkillModel>(
            r"
            SELECT id, user_id, name, level, created_at
            FROM skills
            WHERE user_id = $1 AND LOWER(name) = LOWER($2)
            ",
        )
        .bind(user_id.into_inner())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Skill::from))
    }

    #[instrument(skip(self))]
    async fn find_skill(&self, id: Snowflake) -> RepoResult<Option<Skill>> {
        let result = sqlx::query_as::<_, SkillModel>(
            "SELECT id, user_id, name, level, created_at FROM skills WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Skill::from))
    }

    #[instrument(skip(self))]
    async fn add_skill(&self, skill: &Skill) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO skills (id, user_id, name, level, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(skill.id.into_inner())
        .bind(skill.user_id.into_inner())
        .bind(&skill.name)
        .bind(skill.level.as_str())
        .bind(skill.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateSkill(skill.name.clone())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_skill(&self, skill: &Skill) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE skills
            SET name = $2, level = $3
            WHERE id = $1
            ",
        )
        .bind(skill.id.into_inner())
        .bind(&skill.name)
        .bind(skill.level.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateSkill(skill.name.clone())))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ValidationError("Skill not found".to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_skill(&self, id: Snowflake) -> RepoResult<()> {
        sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, page: Page) -> RepoResult<Vec<User>> {
        let pattern = format!("%{query}%");
        let results = sqlx::query_as::<_, UserModel>(&format!(
            r"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username ILIKE $1 OR bio ILIKE $1 OR role ILIKE $1
            ORDER BY username ASC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(&pattern)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
