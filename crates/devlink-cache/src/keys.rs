//! Cache key namespaces and TTLs
//!
//! All keys are colon-delimited namespaced strings. Every namespace has a
//! fixed TTL between 2 and 30 minutes; staleness is bounded by the TTL even
//! if an invalidation list misses a key.

use devlink_core::Snowflake;

/// TTL for `user:profile:<id>` (15 minutes)
pub const USER_PROFILE_TTL: u64 = 15 * 60;

/// TTL for `user:posts:<id>` (5 minutes)
pub const USER_POSTS_TTL: u64 = 5 * 60;

/// TTL for `user:connections:<id>` (10 minutes)
pub const USER_CONNECTIONS_TTL: u64 = 10 * 60;

/// TTL for `project:list:<user>:<page>:<limit>` (5 minutes)
pub const PROJECT_LIST_TTL: u64 = 5 * 60;

/// TTL for `project:tasks:<id>` (2 minutes)
pub const PROJECT_TASKS_TTL: u64 = 2 * 60;

/// TTL for `search:<kind>:<query>:<page>` (2 minutes)
pub const SEARCH_TTL: u64 = 2 * 60;

/// TTL for `analytics:summary:<user>:<days>` (30 minutes)
pub const ANALYTICS_SUMMARY_TTL: u64 = 30 * 60;

/// Profile read-mirror for one user
pub fn user_profile(user_id: Snowflake) -> String {
    format!("user:profile:{user_id}")
}

/// Posts-by-author read-mirror
pub fn user_posts(user_id: Snowflake, page: i64, limit: i64) -> String {
    format!("user:posts:{user_id}:{page}:{limit}")
}

/// Pattern covering every page of a user's posts list
pub fn user_posts_pattern(user_id: Snowflake) -> String {
    format!("user:posts:{user_id}:*")
}

/// Accepted-connections read-mirror for one user
pub fn user_connections(user_id: Snowflake) -> String {
    format!("user:connections:{user_id}")
}

/// Project list read-mirror for one user and page window
pub fn project_list(user_id: Snowflake, page: i64, limit: i64) -> String {
    format!("project:list:{user_id}:{page}:{limit}")
}

/// Pattern covering every page of a user's project list
pub fn project_list_pattern(user_id: Snowflake) -> String {
    format!("project:list:{user_id}:*")
}

/// Task board read-mirror for one project
pub fn project_tasks(project_id: Snowflake) -> String {
    format!("project:tasks:{project_id}")
}

/// Search-result read-mirror
///
/// The query is normalized (trimmed, lowercased) so equivalent queries share
/// an entry.
pub fn search(kind: &str, query: &str, page: i64, limit: i64) -> String {
    let normalized = query.trim().to_lowercase().replace(char::is_whitespace, "+");
    format!("search:{kind}:{normalized}:{page}:{limit}")
}

/// Pattern covering all cached search results for one kind
pub fn search_pattern(kind: &str) -> String {
    format!("search:{kind}:*")
}

/// Analytics summary read-mirror
pub fn analytics_summary(user_id: Snowflake, days: i64) -> String {
    format!("analytics:summary:{user_id}:{days}")
}

/// Pattern covering all analytics summaries for one user
pub fn analytics_summary_pattern(user_id: Snowflake) -> String {
    format!("analytics:summary:{user_id}:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_colon_namespaced() {
        let id = Snowflake::new(42);
        assert_eq!(user_profile(id), "user:profile:42");
        assert_eq!(user_connections(id), "user:connections:42");
        assert_eq!(project_tasks(id), "project:tasks:42");
        assert_eq!(project_list(id, 2, 10), "project:list:42:2:10");
    }

    #[test]
    fn test_search_key_is_normalized() {
        assert_eq!(search("users", "  Rust Dev ", 1, 20), "search:users:rust+dev:1:20");
        assert_eq!(
            search("users", "rust dev", 1, 20),
            search("users", " RUST DEV ", 1, 20)
        );
    }

    #[test]
    fn test_ttls_within_documented_range() {
        for ttl in [
            USER_PROFILE_TTL,
            USER_POSTS_TTL,
            USER_CONNECTIONS_TTL,
            PROJECT_LIST_TTL,
            PROJECT_TASKS_TTL,
            SEARCH_TTL,
            ANALYTICS_SUMMARY_TTL,
        ] {
            assert!((2 * 60..=30 * 60).contains(&ttl));
        }
    }
}
