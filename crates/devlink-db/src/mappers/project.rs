//! Project, member, and invitation model mappers

use devlink_core::entities::{
    DeveloperRole, InvitationStatus, MemberRole, Project, ProjectInvitation, ProjectMember,
};
use devlink_core::Snowflake;

use crate::models::{ProjectInvitationModel, ProjectMemberModel, ProjectModel};

impl From<ProjectModel> for Project {
    fn from(model: ProjectModel) -> Self {
        Project {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            name: model.name,
            description: model.description,
            github_url: model.github_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ProjectMemberModel> for ProjectMember {
    fn from(model: ProjectMemberModel) -> Self {
        ProjectMember {
            project_id: Snowflake::new(model.project_id),
            user_id: Snowflake::new(model.user_id),
            role: MemberRole::parse(&model.role).unwrap_or(MemberRole::Member),
            joined_at: model.joined_at,
        }
    }
}

impl From<ProjectInvitationModel> for ProjectInvitation {
    fn from(model: ProjectInvitationModel) -> Self {
        ProjectInvitation {
            id: Snowflake::new(model.id),
            project_id: Snowflake::new(model.project_id),
            inviter_id: Snowflake::new(model.inviter_id),
            developer_id: Snowflake::new(model.developer_id),
            role: DeveloperRole::parse(&model.role).unwrap_or(DeveloperRole::Fullstack),
            status: InvitationStatus::parse(&model.status).unwrap_or(InvitationStatus::Pending),
            message: model.message,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
