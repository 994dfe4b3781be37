//! Consumed backend interface.
//!
//! The session talks to the backend only through [`BoardGateway`], so tests
//! (and future transports) plug in without touching the relocation logic.
//! Calls are single-shot: nothing here retries, and backend error payloads
//! are surfaced opaquely.

pub mod rest;

use async_trait::async_trait;
use flowdeck_core::types::{
    Board, Card, CardPatch, Comment, List, NewCard, NewComment, NewList, ListPatch,
};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[async_trait]
pub trait BoardGateway: Send + Sync {
    async fn fetch_board(&self, board_id: i64) -> Result<Board, GatewayError>;
    async fn fetch_lists(&self, board_id: i64) -> Result<Vec<List>, GatewayError>;
    async fn fetch_cards(&self, list_id: i64) -> Result<Vec<Card>, GatewayError>;
    async fn fetch_comments(&self, card_id: i64) -> Result<Vec<Comment>, GatewayError>;

    async fn create_card(&self, draft: &NewCard) -> Result<Card, GatewayError>;
    async fn update_card(&self, card_id: i64, patch: &CardPatch) -> Result<Card, GatewayError>;
    async fn delete_card(&self, card_id: i64) -> Result<(), GatewayError>;

    async fn create_list(&self, draft: &NewList) -> Result<List, GatewayError>;
    async fn update_list(&self, patch: &ListPatch) -> Result<List, GatewayError>;
    async fn delete_list(&self, list_id: i64) -> Result<(), GatewayError>;

    async fn create_comment(&self, draft: &NewComment) -> Result<Comment, GatewayError>;
    async fn delete_comment(&self, comment_id: i64) -> Result<(), GatewayError>;
}
