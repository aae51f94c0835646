use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// The `img` field of a post: a single URL or an ordered list of URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSet {
    One(String),
    Many(Vec<String>),
}

impl ImageSet {
    pub fn urls(&self) -> &[String] {
        match self {
            ImageSet::One(url) => std::slice::from_ref(url),
            ImageSet::Many(urls) => urls.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.urls().len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub posted_by: Uuid,
    pub text: String,
    #[serde(default)]
    pub img: Option<ImageSet>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
    /// Ids of users who liked the post. Engagement data only, the client
    /// never edits it.
    #[serde(default)]
    pub likes: Vec<Uuid>,
}

impl Post {
    /// Ordered image URLs, empty when the post carries no image.
    pub fn image_urls(&self) -> &[String] {
        self.img.as_ref().map(ImageSet::urls).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    #[serde(default)]
    pub user_profile_pic: String,
    #[serde(default)]
    pub username: String,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

// Request/Response types for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub text: String,
}

/// Failure body of the post endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Soft-failure body of the profile endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_set_accepts_single_url() {
        let set: ImageSet = serde_json::from_str("\"https://cdn.example/a.png\"").unwrap();
        assert_eq!(set.urls(), ["https://cdn.example/a.png"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn image_set_accepts_url_list() {
        let set: ImageSet = serde_json::from_str(r#"["a.png", "b.png", "c.png"]"#).unwrap();
        assert_eq!(set.urls(), ["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn post_decodes_wire_field_names() {
        let json = r#"{
            "_id": "8f2b6a6e-0a8e-4f0a-9a4c-111111111111",
            "postedBy": "8f2b6a6e-0a8e-4f0a-9a4c-222222222222",
            "text": "hello",
            "img": ["a.png", "b.png"],
            "location": {"name": "Hanoi"},
            "createdAt": "2024-04-01T12:00:00Z",
            "replies": [],
            "likes": []
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.text, "hello");
        assert_eq!(post.image_urls().len(), 2);
        assert_eq!(post.location.as_ref().unwrap().name, "Hanoi");
        assert!(post.video.is_none());
    }

    #[test]
    fn post_without_media_decodes() {
        let json = r#"{
            "_id": "8f2b6a6e-0a8e-4f0a-9a4c-111111111111",
            "postedBy": "8f2b6a6e-0a8e-4f0a-9a4c-222222222222",
            "text": "plain",
            "createdAt": "2024-04-01T12:00:00Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.image_urls().is_empty());
        assert!(post.replies.is_empty());
        assert!(post.likes.is_empty());
    }
}
