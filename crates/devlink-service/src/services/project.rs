//! Project service
//!
//! Authorizes project-scoped reads and mutations, and manages membership and
//! invitations. Lookups by callers with no relationship to a project yield
//! the single "not found or access denied" condition so a probe cannot learn
//! whether the project exists.

use devlink_cache::keys;
use devlink_core::entities::{
    InvitationStatus, MemberRole, NotificationKind, Project, ProjectInvitation, ProjectMember,
};
use devlink_core::traits::Page;
use devlink_core::{DomainError, Snowflake};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::mappers::task_response;
use crate::dto::requests::{
    AddMemberRequest, CreateInvitationRequest, CreateProjectRequest, RespondInvitationRequest,
    UpdateMemberRoleRequest, UpdateProjectRequest,
};
use crate::dto::responses::{
    InvitationResponse, MemberResponse, PaginatedResponse, ProjectResponse, TaskResponse,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// How a user relates to a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Owner,
    Admin,
    Member,
}

impl Relationship {
    /// Owner or ADMIN member
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

/// Member previews embedded in project list items
const LIST_MEMBER_PREVIEW: i64 = 5;

/// Project service
pub struct ProjectService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProjectService<'a> {
    /// Create a new ProjectService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new project owned by the caller
    #[instrument(skip(self, request))]
    pub async fn create_project(
        &self,
        owner_id: Snowflake,
        request: CreateProjectRequest,
    ) -> ServiceResult<ProjectResponse> {
        let mut project = Project::new(self.ctx.generate_id(), owner_id, request.name);
        project.description = request.description;
        project.github_url = request.github_url;

        self.ctx.project_repo().create(&project).await?;

        info!(project_id = %project.id, owner_id = %owner_id, "Project created");

        self.ctx
            .invalidation()
            .project_changed(project.id, &[owner_id])
            .await;

        self.build_response(&project, None).await
    }

    /// List projects where the caller is owner or member, most recently
    /// updated first (read-through cached per page)
    #[instrument(skip(self))]
    pub async fn get_projects(
        &self,
        user_id: Snowflake,
        page: i64,
        limit: i64,
    ) -> ServiceResult<PaginatedResponse<ProjectResponse>> {
        let window = Page::new(page, limit);

        let ctx = self.ctx;
        let service = ProjectService::new(ctx);
        let (responses, total) = ctx
            .cache()
            .get_or_set(
                &keys::project_list(user_id, page.max(1), window.limit),
                keys::PROJECT_LIST_TTL,
                || async move {
                    let projects = ctx.project_repo().find_for_user(user_id, window).await?;
                    let total = ctx.project_repo().count_for_user(user_id).await?;

                    let mut responses = Vec::with_capacity(projects.len());
                    for project in &projects {
                        responses.push(
                            service
                                .build_response(project, Some(LIST_MEMBER_PREVIEW))
                                .await?,
                        );
                    }
                    Ok::<_, ServiceError>((responses, total))
                },
            )
            .await?;

        Ok(PaginatedResponse::new(
            responses,
            page.max(1),
            window.limit,
            Some(total),
        ))
    }

    /// Get one project with all members and tasks; relationship-gated
    #[instrument(skip(self))]
    pub async fn get_project(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ProjectResponse> {
        let (project, _) = self.require_related(project_id, user_id).await?;
        self.build_response(&project, None).await
    }

    /// Update project fields; owner or ADMIN member
    #[instrument(skip(self, request))]
    pub async fn update_project(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
        request: UpdateProjectRequest,
    ) -> ServiceResult<ProjectResponse> {
        let (mut project, relationship) = self.require_related(project_id, user_id).await?;

        if !relationship.can_manage() {
            return Err(ServiceError::permission_denied(
                "Only the owner or an admin can update a project",
            ));
        }

        if let Some(name) = request.name {
            project.name = name;
        }
        if let Some(description) = request.description {
            project.description = Some(description);
        }
        if let Some(github_url) = request.github_url {
            project.github_url = Some(github_url);
        }

        self.ctx.project_repo().update(&project).await?;

        info!(project_id = %project_id, "Project updated");

        self.invalidate(&project).await;

        self.build_response(&project, None).await
    }

    /// Delete a project; owner only
    #[instrument(skip(self))]
    pub async fn delete_project(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let (project, relationship) = self.require_related(project_id, user_id).await?;

        if relationship != Relationship::Owner {
            return Err(ServiceError::permission_denied(
                "Only the owner can delete a project",
            ));
        }

        // Capture the member list before the cascade removes it
        let related = self.related_user_ids(&project).await?;

        self.ctx.project_repo().delete(project_id).await?;

        info!(project_id = %project_id, "Project deleted");

        self.ctx
            .invalidation()
            .project_changed(project_id, &related)
            .await;

        Ok(())
    }

    // ========================================================================
    // Members
    // ========================================================================

    /// Add a member directly; owner/admin may add MEMBERs, only the owner
    /// may add an ADMIN
    #[instrument(skip(self, request))]
    pub async fn add_member(
        &self,
        project_id: Snowflake,
        caller_id: Snowflake,
        request: AddMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let (project, relationship) = self.require_related(project_id, caller_id).await?;

        if !relationship.can_manage() {
            return Err(ServiceError::permission_denied(
                "Only the owner or an admin can add members",
            ));
        }

        let role = request.role.unwrap_or(MemberRole::Member);
        if role == MemberRole::Admin && relationship != Relationship::Owner {
            return Err(ServiceError::from(DomainError::NotProjectOwner));
        }

        // The owner is tracked on the project row, never as a member
        if project.is_owner(request.user_id) {
            return Err(ServiceError::from(DomainError::OwnerImmutable));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", request.user_id.to_string()))?;

        let member = ProjectMember::new(project_id, request.user_id, role);
        self.ctx.project_repo().add_member(&member).await?;
        self.ctx.project_repo().touch(project_id).await?;

        info!(project_id = %project_id, user_id = %request.user_id, role = %role.as_str(), "Member added");

        self.invalidate(&project).await;

        Ok(MemberResponse {
            user: UserResponse::from(&user),
            role,
            joined_at: member.joined_at,
        })
    }

    /// Change a member's role; only the owner may promote or demote ADMINs
    #[instrument(skip(self, request))]
    pub async fn update_member_role(
        &self,
        project_id: Snowflake,
        caller_id: Snowflake,
        member_id: Snowflake,
        request: UpdateMemberRoleRequest,
    ) -> ServiceResult<MemberResponse> {
        let (project, relationship) = self.require_related(project_id, caller_id).await?;

        // Touching the owner is always a hard error, whoever asks
        if project.is_owner(member_id) {
            return Err(ServiceError::from(DomainError::OwnerImmutable));
        }

        let member = self
            .ctx
            .project_repo()
            .find_member(project_id, member_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::MemberNotFound))?;

        // Promotions to ADMIN and demotions from ADMIN are owner-only
        if (request.role == MemberRole::Admin || member.is_admin())
            && relationship != Relationship::Owner
        {
            return Err(ServiceError::from(DomainError::NotProjectOwner));
        }
        if !relationship.can_manage() {
            return Err(ServiceError::permission_denied(
                "Only the owner or an admin can change member roles",
            ));
        }

        self.ctx
            .project_repo()
            .update_member_role(project_id, member_id, request.role)
            .await?;

        info!(project_id = %project_id, user_id = %member_id, role = %request.role.as_str(), "Member role updated");

        self.invalidate(&project).await;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", member_id.to_string()))?;

        Ok(MemberResponse {
            user: UserResponse::from(&user),
            role: request.role,
            joined_at: member.joined_at,
        })
    }

    /// Remove a member; owner/admin may remove MEMBERs, only the owner may
    /// remove an ADMIN. Removing the owner is a hard error.
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        project_id: Snowflake,
        caller_id: Snowflake,
        member_id: Snowflake,
    ) -> ServiceResult<()> {
        let (project, relationship) = self.require_related(project_id, caller_id).await?;

        if project.is_owner(member_id) {
            return Err(ServiceError::from(DomainError::OwnerImmutable));
        }

        let member = self
            .ctx
            .project_repo()
            .find_member(project_id, member_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::MemberNotFound))?;

        // Members may leave on their own; otherwise the caller needs a
        // management role, and removing an ADMIN needs the owner
        let leaving_self = caller_id == member_id;
        if !leaving_self {
            if member.is_admin() && relationship != Relationship::Owner {
                return Err(ServiceError::from(DomainError::NotProjectOwner));
            }
            if !relationship.can_manage() {
                return Err(ServiceError::permission_denied(
                    "Only the owner or an admin can remove members",
                ));
            }
        }

        self.ctx
            .project_repo()
            .remove_member(project_id, member_id)
            .await?;
        self.ctx.project_repo().touch(project_id).await?;

        info!(project_id = %project_id, user_id = %member_id, "Member removed");

        // The removed member's project list is stale too
        let mut related = self.related_user_ids(&project).await?;
        related.push(member_id);
        self.ctx
            .invalidation()
            .project_changed(project_id, &related)
            .await;

        Ok(())
    }

    // ========================================================================
    // Invitations
    // ========================================================================

    /// Invite a developer; owner or ADMIN member
    #[instrument(skip(self, request))]
    pub async fn invite(
        &self,
        project_id: Snowflake,
        caller_id: Snowflake,
        request: CreateInvitationRequest,
    ) -> ServiceResult<InvitationResponse> {
        let (project, relationship) = self.require_related(project_id, caller_id).await?;

        if !relationship.can_manage() {
            return Err(ServiceError::permission_denied(
                "Only the owner or an admin can invite developers",
            ));
        }

        if project.is_owner(request.developer_id) {
            return Err(ServiceError::validation("The owner is already on the project"));
        }

        if self
            .ctx
            .project_repo()
            .find_member(project_id, request.developer_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::from(DomainError::AlreadyMember));
        }

        if self
            .ctx
            .project_repo()
            .pending_invitation_exists(project_id, request.developer_id)
            .await?
        {
            return Err(ServiceError::from(DomainError::DuplicateInvitation));
        }

        let developer = self
            .ctx
            .user_repo()
            .find_by_id(request.developer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", request.developer_id.to_string()))?;

        let mut invitation = ProjectInvitation::new(
            self.ctx.generate_id(),
            project_id,
            caller_id,
            request.developer_id,
            request.role,
        );
        if let Some(message) = request.message {
            invitation = invitation.with_message(message);
        }

        self.ctx.project_repo().create_invitation(&invitation).await?;

        info!(
            project_id = %project_id,
            developer_id = %developer.id,
            invitation_id = %invitation.id,
            "Invitation sent"
        );

        // Side effect: notify the invited developer
        let notifications = NotificationService::new(self.ctx);
        notifications
            .notify(
                request.developer_id,
                NotificationKind::ProjectInvitation,
                "Project invitation",
                &format!("You have been invited to join {}", project.name),
                json!({
                    "invitation_id": invitation.id.to_string(),
                    "project_id": project_id.to_string(),
                }),
            )
            .await?;

        self.invitation_response(&invitation, &project).await
    }

    /// List the caller's invitations, newest first
    #[instrument(skip(self))]
    pub async fn list_invitations(
        &self,
        developer_id: Snowflake,
    ) -> ServiceResult<Vec<InvitationResponse>> {
        let invitations = self
            .ctx
            .project_repo()
            .invitations_for_user(developer_id)
            .await?;

        let mut responses = Vec::with_capacity(invitations.len());
        for invitation in &invitations {
            let project = self
                .ctx
                .project_repo()
                .find_by_id(invitation.project_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::not_found("Project", invitation.project_id.to_string())
                })?;
            responses.push(self.invitation_response(invitation, &project).await?);
        }

        Ok(responses)
    }

    /// Accept or decline an invitation; addressee only.
    ///
    /// Accepting creates a MEMBER-role row as a side effect and notifies the
    /// inviter.
    #[instrument(skip(self, request))]
    pub async fn respond_invitation(
        &self,
        invitation_id: Snowflake,
        developer_id: Snowflake,
        request: RespondInvitationRequest,
    ) -> ServiceResult<InvitationResponse> {
        let mut invitation = self
            .ctx
            .project_repo()
            .find_invitation(invitation_id)
            .await?
            // Someone else's invitation looks exactly like a missing one
            .filter(|i| i.developer_id == developer_id)
            .ok_or_else(|| ServiceError::not_found("Invitation", invitation_id.to_string()))?;

        if !invitation.is_pending() {
            return Err(ServiceError::conflict("Invitation already resolved"));
        }

        let accepted = match request.status {
            InvitationStatus::Accepted => true,
            InvitationStatus::Declined => false,
            InvitationStatus::Pending => {
                return Err(ServiceError::validation(
                    "Response must be ACCEPTED or DECLINED",
                ));
            }
        };

        let project = self
            .ctx
            .project_repo()
            .find_by_id(invitation.project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Project", invitation.project_id.to_string()))?;

        invitation.status = request.status;
        self.ctx.project_repo().update_invitation(&invitation).await?;

        if accepted {
            // Joining twice (e.g. added directly while the invitation sat
            // open) must not fail the acceptance
            let member = ProjectMember::new(project.id, developer_id, MemberRole::Member);
            match self.ctx.project_repo().add_member(&member).await {
                Ok(()) | Err(DomainError::AlreadyMember) => {}
                Err(e) => return Err(e.into()),
            }
            self.ctx.project_repo().touch(project.id).await?;

            let developer = self
                .ctx
                .user_repo()
                .find_by_id(developer_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", developer_id.to_string()))?;

            let notifications = NotificationService::new(self.ctx);
            notifications
                .notify(
                    invitation.inviter_id,
                    NotificationKind::InvitationAccepted,
                    "Invitation accepted",
                    &format!("{} joined {}", developer.username, project.name),
                    json!({
                        "invitation_id": invitation.id.to_string(),
                        "project_id": project.id.to_string(),
                        "developer_id": developer_id.to_string(),
                    }),
                )
                .await?;

            info!(invitation_id = %invitation_id, project_id = %project.id, "Invitation accepted");
        } else {
            info!(invitation_id = %invitation_id, project_id = %project.id, "Invitation declined");
        }

        self.invalidate(&project).await;

        self.invitation_response(&invitation, &project).await
    }

    // ========================================================================
    // Shared helpers (used by TaskService as well)
    // ========================================================================

    /// Load a project and the caller's relationship to it.
    ///
    /// A caller with no relationship gets the not-found condition, never a
    /// hint that the project exists.
    pub(crate) async fn require_related(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<(Project, Relationship)> {
        let project = self
            .ctx
            .project_repo()
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Project", project_id.to_string()))?;

        if project.is_owner(user_id) {
            return Ok((project, Relationship::Owner));
        }

        match self
            .ctx
            .project_repo()
            .find_member(project_id, user_id)
            .await?
        {
            Some(member) if member.is_admin() => Ok((project, Relationship::Admin)),
            Some(_) => Ok((project, Relationship::Member)),
            None => Err(ServiceError::not_found("Project", project_id.to_string())),
        }
    }

    /// Owner plus every member: the users whose project lists mirror this
    /// project
    pub(crate) async fn related_user_ids(&self, project: &Project) -> ServiceResult<Vec<Snowflake>> {
        let members = self.ctx.project_repo().members_of(project.id, None).await?;
        let mut ids = Vec::with_capacity(members.len() + 1);
        ids.push(project.owner_id);
        ids.extend(members.iter().map(|m| m.user_id));
        Ok(ids)
    }

    /// Run the project invalidation list for this project
    pub(crate) async fn invalidate(&self, project: &Project) {
        match self.related_user_ids(project).await {
            Ok(related) => {
                self.ctx
                    .invalidation()
                    .project_changed(project.id, &related)
                    .await;
            }
            Err(e) => {
                // TTLs bound the staleness if the member list is unavailable
                tracing::warn!(project_id = %project.id, error = %e, "Skipping project invalidation");
            }
        }
    }

    /// Assemble a project response; `member_limit` trims the embedded member
    /// previews for list views. Tasks are always the full flat list.
    async fn build_response(
        &self,
        project: &Project,
        member_limit: Option<i64>,
    ) -> ServiceResult<ProjectResponse> {
        let owner = self
            .ctx
            .user_repo()
            .find_by_id(project.owner_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", project.owner_id.to_string()))?;

        let members = self
            .ctx
            .project_repo()
            .members_of(project.id, member_limit)
            .await?;
        let member_count = self.ctx.project_repo().member_count(project.id).await?;

        let mut member_responses = Vec::with_capacity(members.len());
        for member in &members {
            let user = self
                .ctx
                .user_repo()
                .find_by_id(member.user_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", member.user_id.to_string()))?;
            member_responses.push(MemberResponse {
                user: UserResponse::from(&user),
                role: member.role,
                joined_at: member.joined_at,
            });
        }

        let tasks = self.ctx.task_repo().find_by_project(project.id).await?;
        let mut task_responses: Vec<TaskResponse> = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let assignee = match task.assignee_id {
                Some(assignee_id) => self.ctx.user_repo().find_by_id(assignee_id).await?,
                None => None,
            };
            task_responses.push(task_response(task, assignee.as_ref()));
        }

        Ok(ProjectResponse {
            id: project.id.to_string(),
            name: project.name.clone(),
            description: project.description.clone(),
            github_url: project.github_url.clone(),
            owner: UserResponse::from(&owner),
            members: member_responses,
            member_count,
            tasks: task_responses,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }

    async fn invitation_response(
        &self,
        invitation: &ProjectInvitation,
        project: &Project,
    ) -> ServiceResult<InvitationResponse> {
        let inviter = self
            .ctx
            .user_repo()
            .find_by_id(invitation.inviter_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", invitation.inviter_id.to_string()))?;

        Ok(InvitationResponse {
            id: invitation.id.to_string(),
            project_id: project.id.to_string(),
            project_name: project.name.clone(),
            inviter: UserResponse::from(&inviter),
            role: invitation.role,
            status: invitation.status,
            message: invitation.message.clone(),
            created_at: invitation.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_management_rights() {
        assert!(Relationship::Owner.can_manage());
        assert!(Relationship::Admin.can_manage());
        assert!(!Relationship::Member.can_manage());
    }
}
