//! Peer-mentorship forum, backed by the document store.
//!
//! Posts live in one collection; replies are appended to the post document
//! with the store's array-append operation, so any authenticated user can
//! reply to any post. When no remote store is configured the forum runs in
//! the original degraded mode: empty listings, placeholder post ids,
//! replies dropped with a warning.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::forum::{ForumPost, COMMON_TAGS};
use crate::state::AppState;
use crate::store::DocumentStore;

const POSTS_COLLECTION: &str = "forum_posts";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostRequest {
    pub user_id: String,
    pub user_name: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReplyRequest {
    pub user_id: String,
    pub user_name: String,
    pub content: String,
}

pub struct ForumService {
    docs: Option<Arc<dyn DocumentStore>>,
}

impl ForumService {
    pub fn new(docs: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { docs }
    }

    pub async fn create_post(&self, request: NewPostRequest) -> Result<String, AppError> {
        if request.title.trim().is_empty() || request.content.trim().is_empty() {
            return Err(AppError::Validation(
                "Post title and content are required".to_string(),
            ));
        }
        if let Some(tag) = request.tags.iter().find(|t| !COMMON_TAGS.contains(&t.as_str())) {
            return Err(AppError::Validation(format!("Unknown tag '{tag}'")));
        }

        let Some(docs) = &self.docs else {
            warn!("Document store unavailable, forum post not persisted");
            return Ok("temp-post-id".to_string());
        };

        let payload = json!({
            "userId": request.user_id,
            "userName": request.user_name,
            "title": request.title,
            "content": request.content,
            "tags": request.tags,
            "replies": [],
            "createdAt": Utc::now(),
        });
        Ok(docs.add(POSTS_COLLECTION, &payload).await?)
    }

    /// All posts, newest first, optionally filtered by tag. Documents that
    /// fail to deserialize are skipped rather than failing the listing.
    pub async fn list_posts(&self, tag: Option<&str>) -> Result<Vec<ForumPost>, AppError> {
        let Some(docs) = &self.docs else {
            warn!("Document store unavailable, returning empty forum");
            return Ok(vec![]);
        };

        let posts = docs
            .list_desc(POSTS_COLLECTION)
            .await?
            .into_iter()
            .filter_map(|(id, value)| match serde_json::from_value::<ForumPost>(value) {
                Ok(mut post) => {
                    post.id = id;
                    Some(post)
                }
                Err(e) => {
                    warn!("Skipping malformed forum post {id}: {e}");
                    None
                }
            })
            .filter(|post| tag.map_or(true, |t| post.tags.iter().any(|pt| pt == t)))
            .collect();
        Ok(posts)
    }

    pub async fn add_reply(&self, post_id: &str, request: NewReplyRequest) -> Result<(), AppError> {
        if request.content.trim().is_empty() {
            return Err(AppError::Validation("Reply content is required".to_string()));
        }

        let Some(docs) = &self.docs else {
            warn!("Document store unavailable, reply not added");
            return Ok(());
        };

        if docs.get(POSTS_COLLECTION, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Post {post_id} not found")));
        }

        let reply = json!({
            "id": Uuid::new_v4().to_string(),
            "userId": request.user_id,
            "userName": request.user_name,
            "content": request.content,
            "createdAt": Utc::now(),
        });
        docs.append(POSTS_COLLECTION, post_id, "replies", &reply)
            .await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPost {
    pub id: String,
}

/// GET /api/v1/forum/posts
pub async fn handle_list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostsQuery>,
) -> Result<Json<Vec<ForumPost>>, AppError> {
    let posts = state.forum.list_posts(params.tag.as_deref()).await?;
    Ok(Json(posts))
}

/// POST /api/v1/forum/posts
pub async fn handle_create_post(
    State(state): State<AppState>,
    Json(request): Json<NewPostRequest>,
) -> Result<(StatusCode, Json<CreatedPost>), AppError> {
    let id = state.forum.create_post(request).await?;
    Ok((StatusCode::CREATED, Json(CreatedPost { id })))
}

/// POST /api/v1/forum/posts/:id/replies
pub async fn handle_add_reply(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(request): Json<NewReplyRequest>,
) -> Result<StatusCode, AppError> {
    state.forum.add_reply(&post_id, request).await?;
    Ok(StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::MemoryDocumentStore;

    fn service() -> (Arc<MemoryDocumentStore>, ForumService) {
        let docs = Arc::new(MemoryDocumentStore::new());
        let forum = ForumService::new(Some(docs.clone()));
        (docs, forum)
    }

    fn post(title: &str, tags: &[&str]) -> NewPostRequest {
        NewPostRequest {
            user_id: "u1".to_string(),
            user_name: "Jess".to_string(),
            title: title.to_string(),
            content: "Some content".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let (_docs, forum) = service();
        let id = forum.create_post(post("First", &["College"])).await.unwrap();

        let posts = forum.list_posts(None).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, id);
        assert_eq!(posts[0].title, "First");
        assert!(posts[0].replies.is_empty());
    }

    #[tokio::test]
    async fn test_posts_listed_newest_first() {
        let (_docs, forum) = service();
        forum.create_post(post("Older", &[])).await.unwrap();
        forum.create_post(post("Newer", &[])).await.unwrap();

        let posts = forum.list_posts(None).await.unwrap();
        assert_eq!(posts[0].title, "Newer");
        assert_eq!(posts[1].title, "Older");
    }

    #[tokio::test]
    async fn test_tag_filter() {
        let (_docs, forum) = service();
        forum
            .create_post(post("About college", &["College"]))
            .await
            .unwrap();
        forum
            .create_post(post("About resumes", &["Resume Help"]))
            .await
            .unwrap();

        let filtered = forum.list_posts(Some("College")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "About college");
    }

    #[tokio::test]
    async fn test_unknown_tag_is_rejected() {
        let (_docs, forum) = service();
        let result = forum.create_post(post("Bad", &["Gossip"])).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_title_is_rejected() {
        let (_docs, forum) = service();
        let result = forum.create_post(post("  ", &[])).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_reply_appends_to_post() {
        let (_docs, forum) = service();
        let id = forum.create_post(post("Thread", &[])).await.unwrap();

        forum
            .add_reply(
                &id,
                NewReplyRequest {
                    user_id: "u2".to_string(),
                    user_name: "Sam".to_string(),
                    content: "Great question!".to_string(),
                },
            )
            .await
            .unwrap();

        let posts = forum.list_posts(None).await.unwrap();
        assert_eq!(posts[0].replies.len(), 1);
        assert_eq!(posts[0].replies[0].user_name, "Sam");
    }

    #[tokio::test]
    async fn test_reply_to_missing_post_is_not_found() {
        let (_docs, forum) = service();
        let result = forum
            .add_reply(
                "nope",
                NewReplyRequest {
                    user_id: "u2".to_string(),
                    user_name: "Sam".to_string(),
                    content: "Hello?".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_degraded_mode_without_store() {
        let forum = ForumService::new(None);

        assert!(forum.list_posts(None).await.unwrap().is_empty());
        let id = forum.create_post(post("Lost", &[])).await.unwrap();
        assert_eq!(id, "temp-post-id");
        assert!(forum
            .add_reply(
                "any",
                NewReplyRequest {
                    user_id: "u".to_string(),
                    user_name: "n".to_string(),
                    content: "c".to_string(),
                }
            )
            .await
            .is_ok());
    }
}
