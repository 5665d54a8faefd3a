use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag row, unique on (user_id, name)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
}

/// Wire representation of a tag
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    pub name: String,
}
