//! PostgreSQL implementation of ProjectRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use devlink_core::entities::{MemberRole, Project, ProjectInvitation, ProjectMember};
use devlink_core::traits::{Page, ProjectRepository, RepoResult};
use devlink_core::value_objects::Snowflake;
use devlink_core::DomainError;

use crate::models::{ProjectInvitationModel, ProjectMemberModel, ProjectModel};

use super::error::{
    invitation_not_found, map_db_error, map_unique_violation, member_not_found, project_not_found,
};

const PROJECT_COLUMNS: &str =
    "id, owner_id, name, description, github_url, created_at, updated_at";

const INVITATION_COLUMNS: &str =
    "id, project_id, inviter_id, developer_id, role, status, message, created_at, updated_at";

/// PostgreSQL implementation of ProjectRepository
#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    /// Create a new PgProjectRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Project>> {
        let result = sqlx::query_as::<_, ProjectModel>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Project::from))
    }

    #[instrument(skip(self))]
    async fn find_for_user(&self, user_id: Snowflake, page: Page) -> RepoResult<Vec<Project>> {
        let results = sqlx::query_as::<_, ProjectModel>(
            r"
            SELECT DISTINCT p.id, p.owner_id, p.name, p.description, p.github_url,
                   p.created_at, p.updated_at
            FROM projects p
            LEFT JOIN project_members pm ON pm.project_id = p.id
            WHERE p.owner_id = $1 OR pm.user_id = $1
            ORDER BY p.updated_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Project::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_for_user(&self, user_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(DISTINCT p.id)
            FROM projects p
            LEFT JOIN project_members pm ON pm.project_id = p.id
            WHERE p.owner_id = $1 OR pm.user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn create(&self, project: &Project) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO projects (id, owner_id, name, description, github_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(project.id.into_inner())
        .bind(project.owner_id.into_inner())
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.github_url)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, project: &Project) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE projects
            SET name = $2, description = $3, github_url = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(project.id.into_inner())
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.github_url)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(project_not_found(project.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(project_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch(&self, id: Snowflake) -> RepoResult<()> {
        sqlx::query("UPDATE projects SET updated_at = NOW() WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_member(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ProjectMember>> {
        let result = sqlx::query_as::<_, ProjectMemberModel>(
            r"
            SELECT project_id, user_id, role, joined_at
            FROM project_members
            WHERE project_id = $1 AND user_id = $2
            ",
        )
        .bind(project_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ProjectMember::from))
    }

    #[instrument(skip(self))]
    async fn members_of(
        &self,
        project_id: Snowflake,
        limit: Option<i64>,
    ) -> RepoResult<Vec<ProjectMember>> {
        let results = sqlx::query_as::<_, ProjectMemberModel>(
            r"
            SELECT project_id, user_id, role, joined_at
            FROM project_members
            WHERE project_id = $1
            ORDER BY joined_at ASC
            LIMIT $2
            ",
        )
        .bind(project_id.into_inner())
        .bind(limit.unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ProjectMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn member_count(&self, project_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM project_members WHERE project_id = $1",
        )
        .bind(project_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn add_member(&self, member: &ProjectMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO project_members (project_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(member.project_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_member_role(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
        role: MemberRole,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE project_members
            SET role = $3
            WHERE project_id = $1 AND user_id = $2
            ",
        )
        .bind(project_id.into_inner())
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, project_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            "DELETE FROM project_members WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_invitation(&self, invitation: &ProjectInvitation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO project_invitations (id, project_id, inviter_id, developer_id, role,
                                             status, message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(invitation.id.into_inner())
        .bind(invitation.project_id.into_inner())
        .bind(invitation.inviter_id.into_inner())
        .bind(invitation.developer_id.into_inner())
        .bind(invitation.role.as_str())
        .bind(invitation.status.as_str())
        .bind(&invitation.message)
        .bind(invitation.created_at)
        .bind(invitation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateInvitation))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_invitation(&self, id: Snowflake) -> RepoResult<Option<ProjectInvitation>> {
        let result = sqlx::query_as::<_, ProjectInvitationModel>(&format!(
            "SELECT {INVITATION_COLUMNS} FROM project_invitations WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ProjectInvitation::from))
    }

    #[instrument(skip(self))]
    async fn invitations_for_user(
        &self,
        developer_id: Snowflake,
    ) -> RepoResult<Vec<ProjectInvitation>> {
        let results = sqlx::query_as::<_, ProjectInvitationModel>(&format!(
            r"
            SELECT {INVITATION_COLUMNS}
            FROM project_invitations
            WHERE developer_id = $1
            ORDER BY created_at DESC
            "
        ))
        .bind(developer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ProjectInvitation::from).collect())
    }

    #[instrument(skip(self))]
    async fn pending_invitation_exists(
        &self,
        project_id: Snowflake,
        developer_id: Snowflake,
    ) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM project_invitations
                WHERE project_id = $1 AND developer_id = $2 AND status = 'PENDING'
            )
            ",
        )
        .bind(project_id.into_inner())
        .bind(developer_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn update_invitation(&self, invitation: &ProjectInvitation) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE project_invitations
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(invitation.id.into_inner())
        .bind(invitation.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(invitation_not_found(invitation.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, page: Page) -> RepoResult<Vec<Project>> {
        let pattern = format!("%{query}%");
        let results = sqlx::query_as::<_, ProjectModel>(&format!(
            r"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY updated_at DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(&pattern)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Project::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgProjectRepository>();
    }
}
