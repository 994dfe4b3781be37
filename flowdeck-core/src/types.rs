//! Wire and domain types shared between the snapshot store and the gateway.
//!
//! All payloads are JSON with camelCase field names, matching the backend
//! REST API. Cards carry a local-only `comments` sequence that is attached
//! after the initial load and never serialized back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Membership entry on a board: a user reference plus their role
/// (e.g. "OWNER", "MEMBER").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub user_id: i64,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: i64,
    pub name: String,
    pub owner: User,
    #[serde(default)]
    pub members: Vec<BoardMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub card_id: i64,
    pub user: User,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub description: String,
    pub list_id: i64,
    #[serde(default)]
    pub members: Vec<User>,
    /// Attached lazily after the card fetch; not part of the card wire
    /// payload.
    #[serde(default, skip_serializing)]
    pub comments: Vec<Comment>,
}

impl Card {
    /// Merge the canonical card returned by the backend into this card.
    ///
    /// Guards against server-side normalization changing title/tag/etc.
    /// after an update. Locally attached comments are kept as-is since the
    /// card wire payload never carries them.
    pub fn merge_canonical(&mut self, canonical: Card) {
        self.title = canonical.title;
        self.tag = canonical.tag;
        self.description = canonical.description;
        self.list_id = canonical.list_id;
        self.members = canonical.members;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub board_id: i64,
    /// Display order == array order. The list endpoints do not embed
    /// cards; sequences start empty and are attached per list.
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// Creation payload for `POST /cards/createCard`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub title: String,
    pub tag: String,
    pub description: String,
    pub list_id: i64,
    pub members: Vec<User>,
}

/// Full card payload for `PUT /cards/updateCard/{id}`. The relocation path
/// sends the whole card so the backend re-homes it under the new list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    pub id: i64,
    pub title: String,
    pub tag: String,
    pub description: String,
    pub list_id: i64,
    pub members: Vec<User>,
}

impl CardPatch {
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: card.id,
            title: card.title.clone(),
            tag: card.tag.clone(),
            description: card.description.clone(),
            list_id: card.list_id,
            members: card.members.clone(),
        }
    }
}

/// Creation payload for `POST /lists/createList`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewList {
    pub name: String,
    pub color: String,
    pub board_id: i64,
}

/// Rename/recolor payload for `PUT /lists/updateList`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPatch {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// Creation payload for `POST /comments/createComment`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub card_id: i64,
    pub user: User,
}
