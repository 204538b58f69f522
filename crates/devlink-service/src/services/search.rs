//! Search service
//!
//! ILIKE-filtered SQL per kind, cached per normalized query and page.

use devlink_cache::keys;
use devlink_core::traits::Page;
use tracing::instrument;

use crate::dto::mappers::project_summary;
use crate::dto::responses::{
    PostResponse, ProjectSummaryResponse, SearchResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// What to search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Users,
    Posts,
    Projects,
    All,
}

impl SearchKind {
    /// Parse the `kind` query parameter; defaults to All
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("users") => Self::Users,
            Some("posts") => Self::Posts,
            Some("projects") => Self::Projects,
            _ => Self::All,
        }
    }

    fn cache_tag(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
            Self::Projects => "projects",
            Self::All => "all",
        }
    }
}

/// Search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    /// Create a new SearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run a search over the requested kinds (read-through cached)
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        page: i64,
        limit: i64,
    ) -> ServiceResult<SearchResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::validation("Search query must not be empty"));
        }

        let window = Page::new(page, limit);

        let ctx = self.ctx;
        let service = SearchService::new(ctx);
        let owned_query = query.to_string();
        ctx.cache()
            .get_or_set(
                &keys::search(kind.cache_tag(), query, page.max(1), window.limit),
                keys::SEARCH_TTL,
                || async move {
                    let mut response = SearchResponse::default();

                    if matches!(kind, SearchKind::Users | SearchKind::All) {
                        response.users = Some(service.search_users(&owned_query, window).await?);
                    }
                    if matches!(kind, SearchKind::Posts | SearchKind::All) {
                        response.posts = Some(service.search_posts(&owned_query, window).await?);
                    }
                    if matches!(kind, SearchKind::Projects | SearchKind::All) {
                        response.projects =
                            Some(service.search_projects(&owned_query, window).await?);
                    }

                    Ok::<_, ServiceError>(response)
                },
            )
            .await
    }

    async fn search_users(&self, query: &str, window: Page) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().search(query, window).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    async fn search_posts(&self, query: &str, window: Page) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().search(query, window).await?;

        let mut responses = Vec::with_capacity(posts.len());
        for post in &posts {
            let author = self
                .ctx
                .user_repo()
                .find_by_id(post.author_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", post.author_id.to_string()))?;
            let like_count = self.ctx.post_repo().like_count(post.id).await?;
            let comment_count = self.ctx.post_repo().comment_count(post.id).await?;

            responses.push(PostResponse {
                id: post.id.to_string(),
                author: UserResponse::from(&author),
                kind: post.kind,
                content: post.content.clone(),
                code_snippet: post.code_snippet.clone(),
                language: post.language.clone(),
                media_urls: post.media_urls.clone(),
                is_edited: post.is_edited,
                like_count,
                comment_count,
                // Search results are cached across viewers; liked state is
                // not personalized here
                liked_by_me: false,
                created_at: post.created_at,
                updated_at: post.updated_at,
            });
        }

        Ok(responses)
    }

    async fn search_projects(
        &self,
        query: &str,
        window: Page,
    ) -> ServiceResult<Vec<ProjectSummaryResponse>> {
        let projects = self.ctx.project_repo().search(query, window).await?;

        let mut responses = Vec::with_capacity(projects.len());
        for project in &projects {
            let owner = self
                .ctx
                .user_repo()
                .find_by_id(project.owner_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", project.owner_id.to_string()))?;
            responses.push(project_summary(project, &owner));
        }

        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_kind_parse() {
        assert_eq!(SearchKind::parse(Some("users")), SearchKind::Users);
        assert_eq!(SearchKind::parse(Some("posts")), SearchKind::Posts);
        assert_eq!(SearchKind::parse(Some("projects")), SearchKind::Projects);
        assert_eq!(SearchKind::parse(Some("everything")), SearchKind::All);
        assert_eq!(SearchKind::parse(None), SearchKind::All);
    }
}
