//! Post service
//!
//! Feed posts, comments, and the idempotent like toggle.

use devlink_cache::keys;
use devlink_core::entities::{Comment, Like, Post, PostKind, User};
use devlink_core::traits::Page;
use devlink_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::mappers::comment_response;
use crate::dto::requests::{CreateCommentRequest, CreatePostRequest, UpdatePostRequest};
use crate::dto::responses::{
    CommentResponse, LikeStateResponse, PaginatedResponse, PostResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new post
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        // Kind-specific payload requirements
        match request.kind {
            PostKind::Media if request.media_urls.is_empty() => {
                return Err(ServiceError::validation(
                    "Media posts require at least one media URL",
                ));
            }
            PostKind::Code if request.code_snippet.as_deref().unwrap_or("").is_empty() => {
                return Err(ServiceError::validation("Code posts require a code snippet"));
            }
            _ => {}
        }

        let mut post = Post::new(
            self.ctx.generate_id(),
            author_id,
            request.kind,
            request.content,
        );
        post.code_snippet = request.code_snippet;
        post.language = request.language;
        post.media_urls = request.media_urls;

        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, author_id = %author_id, "Post created");

        self.ctx.invalidation().post_changed(author_id).await;

        self.to_response(&post, author_id).await
    }

    /// Get one post
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake, viewer_id: Snowflake) -> ServiceResult<PostResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        self.to_response(&post, viewer_id).await
    }

    /// Recent posts across all authors, newest first
    #[instrument(skip(self))]
    pub async fn feed(
        &self,
        viewer_id: Snowflake,
        page: i64,
        limit: i64,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let window = Page::new(page, limit);
        let posts = self.ctx.post_repo().feed(window).await?;

        let mut responses = Vec::with_capacity(posts.len());
        for post in &posts {
            responses.push(self.to_response(post, viewer_id).await?);
        }

        Ok(PaginatedResponse::new(responses, page.max(1), window.limit, None))
    }

    /// One author's posts, newest first (read-through cached per page)
    #[instrument(skip(self))]
    pub async fn posts_by_author(
        &self,
        author_id: Snowflake,
        viewer_id: Snowflake,
        page: i64,
        limit: i64,
    ) -> ServiceResult<PaginatedResponse<PostResponse>> {
        let window = Page::new(page, limit);

        // The cached mirror is viewer-independent; the viewer's liked flag is
        // layered on afterwards so one user's view never leaks into another's.
        let ctx = self.ctx;
        let mut responses: Vec<PostResponse> = ctx
            .cache()
            .get_or_set(
                &keys::user_posts(author_id, page.max(1), window.limit),
                keys::USER_POSTS_TTL,
                || async move {
                    let posts = ctx.post_repo().find_by_author(author_id, window).await?;
                    let mut out = Vec::with_capacity(posts.len());
                    for post in &posts {
                        out.push(build_response(ctx, post, None).await?);
                    }
                    Ok::<_, ServiceError>(out)
                },
            )
            .await?;

        for response in &mut responses {
            let post_id = Snowflake::parse(&response.id)
                .map_err(|_| ServiceError::internal("Corrupt cached post id"))?;
            response.liked_by_me = ctx
                .post_repo()
                .find_like(post_id, viewer_id)
                .await?
                .is_some();
        }

        Ok(PaginatedResponse::new(responses, page.max(1), window.limit, None))
    }

    /// Edit a post; sets the is_edited flag. Author-only.
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        if !post.is_author(user_id) {
            return Err(ServiceError::from(DomainError::NotAuthor));
        }

        if let Some(content) = request.content {
            post.content = content;
        }
        if let Some(code_snippet) = request.code_snippet {
            post.code_snippet = Some(code_snippet);
        }
        if let Some(language) = request.language {
            post.language = Some(language);
        }
        if let Some(media_urls) = request.media_urls {
            post.media_urls = media_urls;
        }
        post.is_edited = true;

        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post_id, "Post updated");

        self.ctx.invalidation().post_changed(post.author_id).await;

        self.to_response(&post, user_id).await
    }

    /// Delete a post. Author-only.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        if !post.is_author(user_id) {
            return Err(ServiceError::from(DomainError::NotAuthor));
        }

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, "Post deleted");

        self.ctx.invalidation().post_changed(post.author_id).await;

        Ok(())
    }

    /// Toggle a like: first call likes, second call unlikes.
    ///
    /// Two toggles in succession are a net no-op.
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<LikeStateResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let liked = if self
            .ctx
            .post_repo()
            .find_like(post_id, user_id)
            .await?
            .is_some()
        {
            self.ctx.post_repo().delete_like(post_id, user_id).await?;
            false
        } else {
            let like = Like::new(post_id, user_id);
            self.ctx.post_repo().create_like(&like).await?;
            true
        };

        let like_count = self.ctx.post_repo().like_count(post_id).await?;

        info!(post_id = %post_id, user_id = %user_id, liked, "Like toggled");

        self.ctx.invalidation().post_changed(post.author_id).await;

        Ok(LikeStateResponse {
            post_id: post_id.to_string(),
            liked,
            like_count,
        })
    }

    /// List comments on a post, oldest first
    #[instrument(skip(self))]
    pub async fn comments(&self, post_id: Snowflake) -> ServiceResult<Vec<CommentResponse>> {
        // Post must exist first
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let comments = self.ctx.post_repo().comments_for_post(post_id).await?;

        let mut responses = Vec::with_capacity(comments.len());
        for comment in &comments {
            let author = self.load_user(comment.author_id).await?;
            responses.push(comment_response(comment, &author));
        }

        Ok(responses)
    }

    /// Add a comment, optionally as a nested reply
    ///
    /// Storage supports arbitrary reply depth; any display clamp is a client
    /// concern.
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        post_id: Snowflake,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        // A reply's parent must be a comment on the same post
        if let Some(parent_id) = request.parent_id {
            let parent = self
                .ctx
                .post_repo()
                .find_comment(parent_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Comment", parent_id.to_string()))?;

            if parent.post_id != post_id {
                return Err(ServiceError::validation(
                    "Parent comment belongs to a different post",
                ));
            }
        }

        let mut comment = Comment::new(self.ctx.generate_id(), post_id, author_id, request.content);
        if let Some(parent_id) = request.parent_id {
            comment = comment.with_parent(parent_id);
        }

        self.ctx.post_repo().create_comment(&comment).await?;

        info!(post_id = %post_id, comment_id = %comment.id, "Comment added");

        self.ctx.invalidation().post_changed(post.author_id).await;

        let author = self.load_user(author_id).await?;
        Ok(comment_response(&comment, &author))
    }

    /// Delete a comment. Author-only.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        post_id: Snowflake,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self
            .ctx
            .post_repo()
            .find_comment(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        if !comment.is_author(user_id) {
            return Err(ServiceError::from(DomainError::NotAuthor));
        }

        self.ctx.post_repo().delete_comment(comment_id).await?;

        info!(comment_id = %comment_id, "Comment deleted");

        Ok(())
    }

    async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    async fn to_response(&self, post: &Post, viewer_id: Snowflake) -> ServiceResult<PostResponse> {
        build_response(self.ctx, post, Some(viewer_id)).await
    }
}

/// Assemble a post response with author summary and engagement counts
async fn build_response(
    ctx: &ServiceContext,
    post: &Post,
    viewer_id: Option<Snowflake>,
) -> ServiceResult<PostResponse> {
    let author = ctx
        .user_repo()
        .find_by_id(post.author_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", post.author_id.to_string()))?;

    let like_count = ctx.post_repo().like_count(post.id).await?;
    let comment_count = ctx.post_repo().comment_count(post.id).await?;

    let liked_by_me = match viewer_id {
        Some(viewer_id) => ctx
            .post_repo()
            .find_like(post.id, viewer_id)
            .await?
            .is_some(),
        None => false,
    };

    Ok(PostResponse {
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
        liked_by_me,
        created_at: post.created_at,
        updated_at: post.updated_at,
    })
}

#[cfg(test)]
mod tests {
    // Post, comment, and like flows are covered end-to-end by the
    // integration tests, which need live PostgreSQL and Redis instances.
}
