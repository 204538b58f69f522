//! User service
//!
//! Profile reads (cached read-through) and profile/skill mutations.

use devlink_cache::keys;
use devlink_core::entities::Skill;
use devlink_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::mappers::profile_response;
use crate::dto::requests::{AddSkillRequest, UpdateProfileRequest, UpdateSkillRequest};
use crate::dto::responses::{CurrentUserResponse, ProfileResponse, SkillResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a public profile with skills (read-through cached)
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let ctx = self.ctx;
        ctx.cache()
            .get_or_set(
                &keys::user_profile(user_id),
                keys::USER_PROFILE_TTL,
                || async move {
                    let user = ctx
                        .user_repo()
                        .find_by_id(user_id)
                        .await?
                        .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;
                    let skills = ctx.user_repo().skills(user_id).await?;
                    Ok(profile_response(&user, &skills))
                },
            )
            .await
    }

    /// Get the authenticated user's own record (never cached; includes email)
    #[instrument(skip(self))]
    pub async fn get_current(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Update the authenticated user's profile
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if let Some(username) = request.username {
            if !username.eq_ignore_ascii_case(&user.username)
                && self.ctx.user_repo().username_exists(&username).await?
            {
                return Err(ServiceError::conflict("Username already taken"));
            }
            user.username = username;
        }
        if let Some(bio) = request.bio {
            user.bio = Some(bio);
        }
        if let Some(avatar_url) = request.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
        if let Some(role) = request.role {
            user.role = Some(role);
        }
        if let Some(location) = request.location {
            user.location = Some(location);
        }
        if let Some(website_url) = request.website_url {
            user.website_url = Some(website_url);
        }
        if let Some(github_url) = request.github_url {
            user.github_url = Some(github_url);
        }
        if let Some(twitter_url) = request.twitter_url {
            user.twitter_url = Some(twitter_url);
        }

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "Profile updated");

        // Enumerated invalidation list for a user write
        self.ctx.invalidation().user_changed(user_id).await;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Add a skill; names are unique per user, case-insensitively
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn add_skill(
        &self,
        user_id: Snowflake,
        request: AddSkillRequest,
    ) -> ServiceResult<SkillResponse> {
        // "React" and "react" are the same skill
        if self
            .ctx
            .user_repo()
            .find_skill_by_name(user_id, &request.name)
            .await?
            .is_some()
        {
            return Err(ServiceError::from(DomainError::DuplicateSkill(request.name)));
        }

        let skill = Skill::new(self.ctx.generate_id(), user_id, request.name, request.level);
        self.ctx.user_repo().add_skill(&skill).await?;

        info!(user_id = %user_id, skill = %skill.name, "Skill added");

        self.ctx.invalidation().user_changed(user_id).await;

        Ok(SkillResponse::from(&skill))
    }

    /// Update a skill's name or level
    #[instrument(skip(self, request))]
    pub async fn update_skill(
        &self,
        user_id: Snowflake,
        skill_id: Snowflake,
        request: UpdateSkillRequest,
    ) -> ServiceResult<SkillResponse> {
        let mut skill = self.find_owned_skill(user_id, skill_id).await?;

        if let Some(name) = request.name {
            // Renaming into an existing skill is the same collision
            if !skill.name_matches(&name) {
                if let Some(existing) = self
                    .ctx
                    .user_repo()
                    .find_skill_by_name(user_id, &name)
                    .await?
                {
                    if existing.id != skill.id {
                        return Err(ServiceError::from(DomainError::DuplicateSkill(name)));
                    }
                }
            }
            skill.name = name;
        }
        if let Some(level) = request.level {
            skill.level = level;
        }

        self.ctx.user_repo().update_skill(&skill).await?;

        self.ctx.invalidation().user_changed(user_id).await;

        Ok(SkillResponse::from(&skill))
    }

    /// Remove a skill
    #[instrument(skip(self))]
    pub async fn remove_skill(&self, user_id: Snowflake, skill_id: Snowflake) -> ServiceResult<()> {
        let skill = self.find_owned_skill(user_id, skill_id).await?;

        self.ctx.user_repo().delete_skill(skill.id).await?;

        info!(user_id = %user_id, skill = %skill.name, "Skill removed");

        self.ctx.invalidation().user_changed(user_id).await;

        Ok(())
    }

    /// Look up a skill and verify the caller owns it
    async fn find_owned_skill(
        &self,
        user_id: Snowflake,
        skill_id: Snowflake,
    ) -> ServiceResult<Skill> {
        let skill = self
            .ctx
            .user_repo()
            .find_skill(skill_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Skill", skill_id.to_string()))?;

        // Another user's skill looks exactly like a missing one
        if skill.user_id != user_id {
            return Err(ServiceError::not_found("Skill", skill_id.to_string()));
        }

        Ok(skill)
    }
}

#[cfg(test)]
mod tests {
    // Profile and skill flows are covered end-to-end by the integration
    // tests, which need live PostgreSQL and Redis instances.
}
