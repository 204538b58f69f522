//! User and skill model mappers

use devlink_core::entities::{Skill, SkillLevel, User};
use devlink_core::Snowflake;

use crate::models::{SkillModel, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            bio: model.bio,
            avatar_url: model.avatar_url,
            role: model.role,
            location: model.location,
            website_url: model.website_url,
            github_url: model.github_url,
            twitter_url: model.twitter_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<SkillModel> for Skill {
    fn from(model: SkillModel) -> Self {
        Skill {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            level: SkillLevel::parse(&model.level).unwrap_or(SkillLevel::Secondary),
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_unknown_skill_level_falls_back() {
        let model = SkillModel {
            id: 1,
            user_id: 2,
            name: "Rust".to_string(),
            level: "EXPERT".to_string(),
            created_at: Utc::now(),
        };
        let skill = Skill::from(model);
        assert_eq!(skill.level, SkillLevel::Secondary);
    }
}
