//! reqwest implementation of [`BoardGateway`].

use async_trait::async_trait;
use flowdeck_core::types::{
    Board, Card, CardPatch, Comment, List, NewCard, NewComment, NewList, ListPatch,
};
use reqwest::RequestBuilder;

use super::{BoardGateway, GatewayError};

/// JSON-over-HTTP gateway. The bearer token, when set, is attached to every
/// request; token lifecycle (refresh, storage) is the caller's concern.
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl RestGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, GatewayError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl BoardGateway for RestGateway {
    async fn fetch_board(&self, board_id: i64) -> Result<Board, GatewayError> {
        let request = self
            .client
            .get(self.url(&format!("/boards/getBoard/{}", board_id)));
        Ok(self.send(request).await?.json().await?)
    }

    async fn fetch_lists(&self, board_id: i64) -> Result<Vec<List>, GatewayError> {
        let request = self
            .client
            .get(self.url(&format!("/lists/getListsByBoard/{}", board_id)));
        Ok(self.send(request).await?.json().await?)
    }

    async fn fetch_cards(&self, list_id: i64) -> Result<Vec<Card>, GatewayError> {
        let request = self
            .client
            .get(self.url(&format!("/cards/getCardsByList/{}", list_id)));
        Ok(self.send(request).await?.json().await?)
    }

    async fn fetch_comments(&self, card_id: i64) -> Result<Vec<Comment>, GatewayError> {
        let request = self
            .client
            .get(self.url(&format!("/comments/getCommentsByCard/{}", card_id)));
        Ok(self.send(request).await?.json().await?)
    }

    async fn create_card(&self, draft: &NewCard) -> Result<Card, GatewayError> {
        let request = self.client.post(self.url("/cards/createCard")).json(draft);
        Ok(self.send(request).await?.json().await?)
    }

    async fn update_card(&self, card_id: i64, patch: &CardPatch) -> Result<Card, GatewayError> {
        let request = self
            .client
            .put(self.url(&format!("/cards/updateCard/{}", card_id)))
            .json(patch);
        Ok(self.send(request).await?.json().await?)
    }

    async fn delete_card(&self, card_id: i64) -> Result<(), GatewayError> {
        let request = self
            .client
            .delete(self.url(&format!("/cards/deleteCard/{}", card_id)));
        self.send(request).await?;
        Ok(())
    }

    async fn create_list(&self, draft: &NewList) -> Result<List, GatewayError> {
        let request = self.client.post(self.url("/lists/createList")).json(draft);
        Ok(self.send(request).await?.json().await?)
    }

    async fn update_list(&self, patch: &ListPatch) -> Result<List, GatewayError> {
        let request = self.client.put(self.url("/lists/updateList")).json(patch);
        Ok(self.send(request).await?.json().await?)
    }

    async fn delete_list(&self, list_id: i64) -> Result<(), GatewayError> {
        let request = self
            .client
            .delete(self.url(&format!("/lists/deleteList/{}", list_id)));
        self.send(request).await?;
        Ok(())
    }

    async fn create_comment(&self, draft: &NewComment) -> Result<Comment, GatewayError> {
        let request = self
            .client
            .post(self.url("/comments/createComment"))
            .json(draft);
        Ok(self.send(request).await?.json().await?)
    }

    async fn delete_comment(&self, comment_id: i64) -> Result<(), GatewayError> {
        let request = self
            .client
            .delete(self.url(&format!("/comments/deleteComment/{}", comment_id)));
        self.send(request).await?;
        Ok(())
    }
}
