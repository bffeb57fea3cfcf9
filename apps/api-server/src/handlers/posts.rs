//! Blog post handlers.
//!
//! The validation here is the trust boundary: titles and contents must be
//! non-empty after trimming before the store is invoked. The store persists
//! whatever it receives.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use scribe_core::domain::{NewPost, Post, PostPatch};
use scribe_core::slug::generate_slug;
use scribe_shared::ApiResponse;
use scribe_shared::dto::{CreatePostRequest, PostResponse, SlugPreviewResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        slug: post.slug,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("no post under slug '{}'", slug))
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list()?;
    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{slug}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    match state.posts.find_by_slug(&slug)? {
        Some(post) => Ok(HttpResponse::Ok().json(post_response(post))),
        None => Err(not_found(&slug)),
    }
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = Vec::new();
    if req.title.trim().is_empty() {
        errors.push("title must not be empty".to_string());
    }
    if req.content.trim().is_empty() {
        errors.push("content must not be empty".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Title is stored trimmed; content is editor markup, passed verbatim.
    let post = state.posts.create(NewPost {
        title: req.title.trim().to_string(),
        content: req.content,
    })?;

    tracing::info!(slug = %post.slug, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        post_response(post),
        "Post created",
    )))
}

/// PUT /api/posts/{slug}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let req = body.into_inner();

    let mut errors = Vec::new();
    if req.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        errors.push("title must not be empty".to_string());
    }
    if req.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
        errors.push("content must not be empty".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let patch = PostPatch {
        title: req.title.map(|t| t.trim().to_string()),
        content: req.content,
    };

    match state.posts.update(&slug, patch)? {
        Some(post) => {
            tracing::info!(old_slug = %slug, slug = %post.slug, "Post updated");
            Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
                post_response(post),
                "Post updated",
            )))
        }
        None => Err(not_found(&slug)),
    }
}

/// DELETE /api/posts/{slug}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    if state.posts.delete(&slug)? {
        tracing::info!(slug = %slug, "Post deleted");
        Ok(HttpResponse::Ok().json(ApiResponse::message_only("Post deleted")))
    } else {
        Err(not_found(&slug))
    }
}

#[derive(Debug, Deserialize)]
pub struct SlugPreviewQuery {
    pub title: String,
}

/// GET /api/posts/slug/preview?title=...
///
/// Live preview of the slug a title would produce. Pure derivation only; the
/// uniqueness suffix is resolved at create/update time.
pub async fn preview_slug(query: web::Query<SlugPreviewQuery>) -> AppResult<HttpResponse> {
    let slug = generate_slug(&query.title);
    Ok(HttpResponse::Ok().json(SlugPreviewResponse { slug }))
}
