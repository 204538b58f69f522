//! User entity - represents a developer account and profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// User entity holding identity and profile attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// Professional headline, e.g. "Backend Engineer"
    pub role: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
    pub github_url: Option<String>,
    pub twitter_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            bio: None,
            avatar_url: None,
            role: None,
            location: None,
            website_url: None,
            github_url: None,
            twitter_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Proficiency tier of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Primary,
    Secondary,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Secondary => "SECONDARY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PRIMARY" => Some(Self::Primary),
            "SECONDARY" => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Skill owned by exactly one user
///
/// Skill names are unique per user, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub level: SkillLevel,
    pub created_at: DateTime<Utc>,
}

impl Skill {
    pub fn new(id: Snowflake, user_id: Snowflake, name: String, level: SkillLevel) -> Self {
        Self {
            id,
            user_id,
            name,
            level,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive name comparison used for the per-user uniqueness rule
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(
            Snowflake::new(1),
            "alice".to_string(),
            "alice@example.com".to_string(),
        );
        assert_eq!(user.username, "alice");
        assert!(user.bio.is_none());
    }

    #[test]
    fn test_skill_level_roundtrip() {
        assert_eq!(SkillLevel::parse("PRIMARY"), Some(SkillLevel::Primary));
        assert_eq!(SkillLevel::parse("SECONDARY"), Some(SkillLevel::Secondary));
        assert_eq!(SkillLevel::parse("primary"), None);
        assert_eq!(SkillLevel::Primary.as_str(), "PRIMARY");
    }

    #[test]
    fn test_skill_name_matches_is_case_insensitive() {
        let skill = Skill::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "React".to_string(),
            SkillLevel::Primary,
        );
        assert!(skill.name_matches("react"));
        assert!(skill.name_matches("REACT"));
        assert!(!skill.name_matches("vue"));
    }
}
