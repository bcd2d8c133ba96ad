//! Peer-mentorship forum types. Posts and replies are append-only — no
//! edit or delete is modeled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed tag vocabulary posts may draw from.
pub const COMMON_TAGS: [&str; 8] = [
    "Career Advice",
    "College",
    "Internships",
    "Resume Help",
    "Interview Tips",
    "Networking",
    "Skills Development",
    "Industry Insights",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    /// Document id assigned by the store; absent in the stored payload.
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub replies: Vec<Reply>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserializes_without_id_or_replies() {
        // Stored payloads carry neither the document id nor, for fresh
        // posts, a replies array.
        let json = serde_json::json!({
            "userId": "u1",
            "userName": "Jess",
            "title": "How do I break into UX?",
            "content": "Looking for portfolio advice.",
            "tags": ["Career Advice"],
            "createdAt": "2025-03-01T12:00:00Z"
        });
        let post: ForumPost = serde_json::from_value(json).unwrap();
        assert!(post.id.is_empty());
        assert!(post.replies.is_empty());
        assert_eq!(post.user_name, "Jess");
    }

    #[test]
    fn test_tag_vocabulary_is_fixed_size() {
        assert_eq!(COMMON_TAGS.len(), 8);
        assert!(COMMON_TAGS.contains(&"Interview Tips"));
    }
}
