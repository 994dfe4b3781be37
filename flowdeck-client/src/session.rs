//! One board's live session: snapshot + gateway.
//!
//! Created on detail-view entry, discarded on navigation away. All methods
//! take `&mut self`: mutations are interleaved on one task, never parallel,
//! so the snapshot needs no locking. Only one relocation is in flight per
//! drag gesture; responses for *different* cards may interleave freely
//! since each response only touches the ids it was issued for. Rapid
//! successive moves of the *same* card before the first response lands are
//! last-response-wins.

use flowdeck_core::relocate::RelocationIntent;
use flowdeck_core::snapshot::{BoardSnapshot, SnapshotError, SnapshotEvent};
use flowdeck_core::types::{CardPatch, ListPatch, NewCard, NewComment, NewList};
use futures_util::future::join_all;
use tokio::sync::broadcast;

use crate::gateway::{BoardGateway, GatewayError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The dragged card's source list is missing from the snapshot. The
    /// operation was aborted before any mutation.
    #[error("Card {card_id} not found in the board snapshot")]
    StaleSnapshot { card_id: i64 },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

pub struct BoardSession<G: BoardGateway> {
    gateway: G,
    snapshot: BoardSnapshot,
}

impl<G: BoardGateway> BoardSession<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            snapshot: BoardSnapshot::new(),
        }
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SnapshotEvent> {
        self.snapshot.subscribe()
    }

    /// Populate the snapshot: board, then lists, then cards per list
    /// (concurrently), then comments per card (concurrently).
    ///
    /// Partial-failure policy: a failed card fetch leaves that list's
    /// sequence empty and is logged; sibling lists proceed independently.
    /// Same for comment fetches. There is no all-or-nothing rollback of
    /// the initial load.
    pub async fn load(&mut self, board_id: i64) -> Result<(), SessionError> {
        let board = self.gateway.fetch_board(board_id).await?;
        self.snapshot.set_board(board);

        let mut lists = self.gateway.fetch_lists(board_id).await?;
        for list in &mut lists {
            list.cards.clear();
        }
        self.snapshot.set_lists(lists);

        let list_ids: Vec<i64> = self.snapshot.lists().iter().map(|l| l.id).collect();
        let gateway = &self.gateway;
        let results = join_all(list_ids.iter().map(|&id| gateway.fetch_cards(id))).await;
        for (&list_id, result) in list_ids.iter().zip(results) {
            match result {
                Ok(cards) => self.snapshot.attach_cards(list_id, cards)?,
                Err(err) => log::error!(
                    "[flowdeck.session.load] Failed to load cards for list {}: {}",
                    list_id,
                    err
                ),
            }
        }

        let card_ids: Vec<i64> = self
            .snapshot
            .lists()
            .iter()
            .flat_map(|l| l.cards.iter().map(|c| c.id))
            .collect();
        let gateway = &self.gateway;
        let results = join_all(card_ids.iter().map(|&id| gateway.fetch_comments(id))).await;
        for (&card_id, result) in card_ids.iter().zip(results) {
            match result {
                Ok(comments) => self.snapshot.attach_comments(card_id, comments)?,
                Err(err) => log::error!(
                    "[flowdeck.session.load] Failed to load comments for card {}: {}",
                    card_id,
                    err
                ),
            }
        }

        Ok(())
    }

    /// Execute one drag gesture.
    ///
    /// Same-list moves are pure local reorders with no network call and no
    /// failure mode. Cross-list moves apply the transfer optimistically,
    /// then persist via the card update endpoint: on success the canonical
    /// card is merged back, on failure the transfer is reversed to the
    /// original source index. Nothing is retried; the user re-drags.
    pub async fn move_card(&mut self, intent: RelocationIntent) -> Result<(), SessionError> {
        if intent.is_same_list() {
            self.snapshot
                .move_card_within(intent.to_list, intent.from_index, intent.to_index)?;
            return Ok(());
        }

        // The source list is looked up by scanning for the card rather
        // than trusting the intent, guarding against a stale snapshot.
        let origin = match self.snapshot.locate_card(intent.card_id) {
            Some(location) => location,
            None => {
                log::error!(
                    "[flowdeck.session] Source list for card {} not in snapshot, aborting move",
                    intent.card_id
                );
                return Err(SessionError::StaleSnapshot {
                    card_id: intent.card_id,
                });
            }
        };

        self.snapshot
            .transfer_card(origin.list_id, intent.to_list, origin.index, intent.to_index)?;

        let patch = match self.snapshot.card(intent.card_id) {
            Some(card) => CardPatch::from_card(card),
            None => {
                return Err(SessionError::Snapshot(SnapshotError::CardNotFound(
                    intent.card_id,
                )))
            }
        };

        match self.gateway.update_card(intent.card_id, &patch).await {
            Ok(canonical) => {
                self.snapshot.merge_card(intent.card_id, canonical)?;
                Ok(())
            }
            Err(err) => {
                log::error!(
                    "[flowdeck.session] Backend rejected move of card {}, reverting: {}",
                    intent.card_id,
                    err
                );
                if let Some(current) = self.snapshot.locate_card(intent.card_id) {
                    self.snapshot.transfer_card(
                        current.list_id,
                        origin.list_id,
                        current.index,
                        origin.index,
                    )?;
                }
                Err(err.into())
            }
        }
    }

    /// Reorder lists on the board. Local only: list order is per-session
    /// and not persisted.
    pub fn move_list(&mut self, from: usize, to: usize) -> Result<(), SessionError> {
        self.snapshot.move_list(from, to)?;
        Ok(())
    }

    /// Create a card. Non-optimistic: the snapshot is only mutated in the
    /// success branch. Returns the new card's id.
    pub async fn add_card(&mut self, draft: NewCard) -> Result<i64, SessionError> {
        match self.gateway.create_card(&draft).await {
            Ok(card) => {
                let card_id = card.id;
                self.snapshot.push_card(card)?;
                Ok(card_id)
            }
            Err(err) => {
                log::error!(
                    "[flowdeck.session] Failed to create card in list {}: {}",
                    draft.list_id,
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Delete a card: exactly one request, exactly one local removal on
    /// success. Confirmation prompts are the caller's concern.
    pub async fn delete_card(&mut self, card_id: i64) -> Result<(), SessionError> {
        match self.gateway.delete_card(card_id).await {
            Ok(()) => {
                self.snapshot.remove_card(card_id)?;
                Ok(())
            }
            Err(err) => {
                log::error!("[flowdeck.session] Failed to delete card {}: {}", card_id, err);
                Err(err.into())
            }
        }
    }

    /// Create a list on the current board. Returns the new list's id.
    pub async fn add_list(&mut self, draft: NewList) -> Result<i64, SessionError> {
        match self.gateway.create_list(&draft).await {
            Ok(mut list) => {
                list.cards.clear();
                let list_id = list.id;
                self.snapshot.push_list(list);
                Ok(list_id)
            }
            Err(err) => {
                log::error!("[flowdeck.session] Failed to create list: {}", err);
                Err(err.into())
            }
        }
    }

    /// Rename/recolor a list, merging the server's canonical fields back.
    pub async fn update_list(&mut self, patch: ListPatch) -> Result<(), SessionError> {
        match self.gateway.update_list(&patch).await {
            Ok(canonical) => {
                self.snapshot
                    .update_list_fields(patch.id, canonical.name, canonical.color)?;
                Ok(())
            }
            Err(err) => {
                log::error!("[flowdeck.session] Failed to update list {}: {}", patch.id, err);
                Err(err.into())
            }
        }
    }

    /// Delete a list and, locally, all cards it contains.
    pub async fn delete_list(&mut self, list_id: i64) -> Result<(), SessionError> {
        match self.gateway.delete_list(list_id).await {
            Ok(()) => {
                self.snapshot.remove_list(list_id)?;
                Ok(())
            }
            Err(err) => {
                log::error!("[flowdeck.session] Failed to delete list {}: {}", list_id, err);
                Err(err.into())
            }
        }
    }

    /// Add a comment to a card. Returns the new comment's id.
    pub async fn add_comment(&mut self, draft: NewComment) -> Result<i64, SessionError> {
        match self.gateway.create_comment(&draft).await {
            Ok(comment) => {
                let comment_id = comment.id;
                self.snapshot.push_comment(comment)?;
                Ok(comment_id)
            }
            Err(err) => {
                log::error!(
                    "[flowdeck.session] Failed to add comment to card {}: {}",
                    draft.card_id,
                    err
                );
                Err(err.into())
            }
        }
    }

    pub async fn delete_comment(
        &mut self,
        card_id: i64,
        comment_id: i64,
    ) -> Result<(), SessionError> {
        match self.gateway.delete_comment(comment_id).await {
            Ok(()) => {
                self.snapshot.remove_comment(card_id, comment_id)?;
                Ok(())
            }
            Err(err) => {
                log::error!(
                    "[flowdeck.session] Failed to delete comment {}: {}",
                    comment_id,
                    err
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use flowdeck_core::types::{Board, BoardMember, Card, Comment, List, User};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn user() -> User {
        User {
            id: 7,
            username: "ada".to_string(),
            email: Some("ada@example.com".to_string()),
        }
    }

    fn make_card(id: i64, list_id: i64, title: &str) -> Card {
        Card {
            id,
            title: title.to_string(),
            tag: "work".to_string(),
            description: String::new(),
            list_id,
            members: Vec::new(),
            comments: Vec::new(),
        }
    }

    fn make_list(id: i64, name: &str) -> List {
        List {
            id,
            name: name.to_string(),
            color: "#4F46E5".to_string(),
            board_id: 1,
            cards: Vec::new(),
        }
    }

    fn make_comment(id: i64, card_id: i64, content: &str) -> Comment {
        Comment {
            id,
            content: content.to_string(),
            card_id,
            user: user(),
            created_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct FakeState {
        calls: Vec<String>,
        next_id: i64,
        fail_update_card: bool,
        fail_delete_card: bool,
        fail_create_card: bool,
        fail_cards_for: Vec<i64>,
        canonical_card: Option<Card>,
    }

    /// In-memory gateway: serves seeded data, records every call, and
    /// fails on demand.
    #[derive(Clone)]
    struct FakeGateway {
        board: Board,
        lists: Vec<List>,
        cards: HashMap<i64, Vec<Card>>,
        comments: HashMap<i64, Vec<Comment>>,
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeGateway {
        fn new(lists: Vec<List>, cards: HashMap<i64, Vec<Card>>) -> Self {
            Self {
                board: Board {
                    id: 1,
                    name: "Roadmap".to_string(),
                    owner: user(),
                    members: vec![BoardMember {
                        user_id: 7,
                        role: "OWNER".to_string(),
                    }],
                },
                lists,
                cards,
                comments: HashMap::new(),
                state: Arc::new(Mutex::new(FakeState {
                    next_id: 1000,
                    ..FakeState::default()
                })),
            }
        }

        fn record(&self, call: String) {
            self.state.lock().unwrap().calls.push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.state.lock().unwrap().calls.clone()
        }

        fn clear_calls(&self) {
            self.state.lock().unwrap().calls.clear();
        }

        fn injected_failure() -> GatewayError {
            GatewayError::Status {
                status: 500,
                body: "injected failure".to_string(),
            }
        }
    }

    #[async_trait]
    impl BoardGateway for FakeGateway {
        async fn fetch_board(&self, board_id: i64) -> Result<Board, GatewayError> {
            self.record(format!("getBoard:{}", board_id));
            Ok(self.board.clone())
        }

        async fn fetch_lists(&self, board_id: i64) -> Result<Vec<List>, GatewayError> {
            self.record(format!("getListsByBoard:{}", board_id));
            Ok(self.lists.clone())
        }

        async fn fetch_cards(&self, list_id: i64) -> Result<Vec<Card>, GatewayError> {
            self.record(format!("getCardsByList:{}", list_id));
            if self.state.lock().unwrap().fail_cards_for.contains(&list_id) {
                return Err(Self::injected_failure());
            }
            Ok(self.cards.get(&list_id).cloned().unwrap_or_default())
        }

        async fn fetch_comments(&self, card_id: i64) -> Result<Vec<Comment>, GatewayError> {
            self.record(format!("getCommentsByCard:{}", card_id));
            Ok(self.comments.get(&card_id).cloned().unwrap_or_default())
        }

        async fn create_card(&self, draft: &NewCard) -> Result<Card, GatewayError> {
            self.record(format!("createCard:{}", draft.list_id));
            let mut state = self.state.lock().unwrap();
            if state.fail_create_card {
                return Err(Self::injected_failure());
            }
            state.next_id += 1;
            Ok(Card {
                id: state.next_id,
                title: draft.title.clone(),
                tag: draft.tag.clone(),
                description: draft.description.clone(),
                list_id: draft.list_id,
                members: draft.members.clone(),
                comments: Vec::new(),
            })
        }

        async fn update_card(
            &self,
            card_id: i64,
            patch: &CardPatch,
        ) -> Result<Card, GatewayError> {
            self.record(format!("updateCard:{}", card_id));
            let state = self.state.lock().unwrap();
            if state.fail_update_card {
                return Err(Self::injected_failure());
            }
            if let Some(canonical) = &state.canonical_card {
                return Ok(canonical.clone());
            }
            Ok(Card {
                id: patch.id,
                title: patch.title.clone(),
                tag: patch.tag.clone(),
                description: patch.description.clone(),
                list_id: patch.list_id,
                members: patch.members.clone(),
                comments: Vec::new(),
            })
        }

        async fn delete_card(&self, card_id: i64) -> Result<(), GatewayError> {
            self.record(format!("deleteCard:{}", card_id));
            if self.state.lock().unwrap().fail_delete_card {
                return Err(Self::injected_failure());
            }
            Ok(())
        }

        async fn create_list(&self, draft: &NewList) -> Result<List, GatewayError> {
            self.record(format!("createList:{}", draft.board_id));
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            Ok(List {
                id: state.next_id,
                name: draft.name.clone(),
                color: draft.color.clone(),
                board_id: draft.board_id,
                cards: Vec::new(),
            })
        }

        async fn update_list(&self, patch: &ListPatch) -> Result<List, GatewayError> {
            self.record(format!("updateList:{}", patch.id));
            Ok(List {
                id: patch.id,
                name: patch.name.clone(),
                color: patch.color.clone(),
                board_id: self.board.id,
                cards: Vec::new(),
            })
        }

        async fn delete_list(&self, list_id: i64) -> Result<(), GatewayError> {
            self.record(format!("deleteList:{}", list_id));
            Ok(())
        }

        async fn create_comment(&self, draft: &NewComment) -> Result<Comment, GatewayError> {
            self.record(format!("createComment:{}", draft.card_id));
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            Ok(Comment {
                id: state.next_id,
                content: draft.content.clone(),
                card_id: draft.card_id,
                user: draft.user.clone(),
                created_at: Utc::now(),
            })
        }

        async fn delete_comment(&self, comment_id: i64) -> Result<(), GatewayError> {
            self.record(format!("deleteComment:{}", comment_id));
            Ok(())
        }
    }

    /// Board 1 with Todo(1)=[11,12,13] and Done(2)=[21].
    fn seeded_gateway() -> FakeGateway {
        let mut cards = HashMap::new();
        cards.insert(
            1,
            vec![
                make_card(11, 1, "Card 1"),
                make_card(12, 1, "Card 2"),
                make_card(13, 1, "Card 3"),
            ],
        );
        cards.insert(2, vec![make_card(21, 2, "Card 4")]);
        FakeGateway::new(vec![make_list(1, "Todo"), make_list(2, "Done")], cards)
    }

    async fn loaded_session(gateway: FakeGateway) -> BoardSession<FakeGateway> {
        let mut session = BoardSession::new(gateway.clone());
        session.load(1).await.unwrap();
        gateway.clear_calls();
        session
    }

    fn card_ids(session: &BoardSession<FakeGateway>, list_id: i64) -> Vec<i64> {
        session
            .snapshot()
            .list(list_id)
            .unwrap()
            .cards
            .iter()
            .map(|c| c.id)
            .collect()
    }

    #[tokio::test]
    async fn test_load_populates_snapshot() {
        let mut gateway = seeded_gateway();
        gateway
            .comments
            .insert(11, vec![make_comment(51, 11, "first")]);
        let session = loaded_session(gateway).await;

        assert_eq!(session.snapshot().board().unwrap().name, "Roadmap");
        assert_eq!(card_ids(&session, 1), vec![11, 12, 13]);
        assert_eq!(card_ids(&session, 2), vec![21]);
        assert_eq!(session.snapshot().card(11).unwrap().comments.len(), 1);
    }

    #[tokio::test]
    async fn test_load_partial_card_failure_keeps_siblings() {
        let gateway = seeded_gateway();
        gateway.state.lock().unwrap().fail_cards_for = vec![2];
        let mut session = BoardSession::new(gateway.clone());
        session.load(1).await.unwrap();

        assert_eq!(card_ids(&session, 1), vec![11, 12, 13]);
        assert!(session.snapshot().list(2).unwrap().cards.is_empty());
    }

    #[tokio::test]
    async fn test_same_list_move_is_local_and_silent() {
        let gateway = seeded_gateway();
        let mut session = loaded_session(gateway.clone()).await;

        session
            .move_card(RelocationIntent {
                card_id: 13,
                from_list: 1,
                from_index: 2,
                to_list: 1,
                to_index: 0,
            })
            .await
            .unwrap();

        assert_eq!(card_ids(&session, 1), vec![13, 11, 12]);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cross_list_move_success() {
        let gateway = seeded_gateway();
        let mut session = loaded_session(gateway.clone()).await;

        session
            .move_card(RelocationIntent {
                card_id: 11,
                from_list: 1,
                from_index: 0,
                to_list: 2,
                to_index: 0,
            })
            .await
            .unwrap();

        assert_eq!(card_ids(&session, 1), vec![12, 13]);
        assert_eq!(card_ids(&session, 2), vec![11, 21]);
        assert_eq!(session.snapshot().card(11).unwrap().list_id, 2);
        assert_eq!(gateway.calls(), vec!["updateCard:11".to_string()]);
    }

    #[tokio::test]
    async fn test_cross_list_move_merges_canonical_card() {
        let gateway = seeded_gateway();
        gateway.state.lock().unwrap().canonical_card = Some({
            let mut card = make_card(11, 2, "Card 1 (normalized)");
            card.tag = "urgent".to_string();
            card
        });
        let mut session = loaded_session(gateway.clone()).await;
        session
            .snapshot
            .attach_comments(11, vec![make_comment(51, 11, "keep me")])
            .unwrap();

        session
            .move_card(RelocationIntent {
                card_id: 11,
                from_list: 1,
                from_index: 0,
                to_list: 2,
                to_index: 1,
            })
            .await
            .unwrap();

        let card = session.snapshot().card(11).unwrap();
        assert_eq!(card.title, "Card 1 (normalized)");
        assert_eq!(card.tag, "urgent");
        // server normalization never clobbers locally attached comments
        assert_eq!(card.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_cross_list_move_failure_reverts_exactly() {
        let gateway = seeded_gateway();
        gateway.state.lock().unwrap().fail_update_card = true;
        let mut session = loaded_session(gateway.clone()).await;
        let before: Vec<List> = session.snapshot().lists().to_vec();

        let result = session
            .move_card(RelocationIntent {
                card_id: 12,
                from_list: 1,
                from_index: 1,
                to_list: 2,
                to_index: 0,
            })
            .await;

        assert!(matches!(result, Err(SessionError::Gateway(_))));
        assert_eq!(session.snapshot().lists(), before.as_slice());
        assert_eq!(session.snapshot().card(12).unwrap().list_id, 1);
    }

    #[tokio::test]
    async fn test_move_of_unknown_card_mutates_nothing() {
        let gateway = seeded_gateway();
        let mut session = loaded_session(gateway.clone()).await;
        let before: Vec<List> = session.snapshot().lists().to_vec();

        let result = session
            .move_card(RelocationIntent {
                card_id: 999,
                from_list: 1,
                from_index: 0,
                to_list: 2,
                to_index: 0,
            })
            .await;

        assert!(matches!(
            result,
            Err(SessionError::StaleSnapshot { card_id: 999 })
        ));
        assert_eq!(session.snapshot().lists(), before.as_slice());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_optimistic_move_scenario_with_rollback() {
        // A=[Card1,Card2], B=[]: moving Card1 A(0) -> B(0) applies
        // immediately, then reverts when the backend rejects it.
        let mut cards = HashMap::new();
        cards.insert(1, vec![make_card(11, 1, "Card 1"), make_card(12, 1, "Card 2")]);
        cards.insert(2, Vec::new());
        let gateway = FakeGateway::new(vec![make_list(1, "A"), make_list(2, "B")], cards);
        gateway.state.lock().unwrap().fail_update_card = true;
        let mut session = loaded_session(gateway.clone()).await;

        let result = session
            .move_card(RelocationIntent {
                card_id: 11,
                from_list: 1,
                from_index: 0,
                to_list: 2,
                to_index: 0,
            })
            .await;

        assert!(result.is_err());
        assert_eq!(card_ids(&session, 1), vec![11, 12]);
        assert!(session.snapshot().list(2).unwrap().cards.is_empty());
        assert_eq!(session.snapshot().card(11).unwrap().list_id, 1);
    }

    #[tokio::test]
    async fn test_move_list_is_local_only() {
        let gateway = seeded_gateway();
        let mut session = loaded_session(gateway.clone()).await;

        session.move_list(1, 0).unwrap();

        let ids: Vec<i64> = session.snapshot().lists().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_card_issues_one_request_and_removes_one_entry() {
        let gateway = seeded_gateway();
        let mut session = loaded_session(gateway.clone()).await;

        session.delete_card(12).await.unwrap();

        assert_eq!(card_ids(&session, 1), vec![11, 13]);
        assert_eq!(card_ids(&session, 2), vec![21]);
        assert_eq!(gateway.calls(), vec!["deleteCard:12".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_card_failure_leaves_state_unchanged() {
        let gateway = seeded_gateway();
        gateway.state.lock().unwrap().fail_delete_card = true;
        let mut session = loaded_session(gateway.clone()).await;

        let result = session.delete_card(12).await;

        assert!(result.is_err());
        assert_eq!(card_ids(&session, 1), vec![11, 12, 13]);
    }

    #[tokio::test]
    async fn test_add_card_appends_on_success_only() {
        let gateway = seeded_gateway();
        let mut session = loaded_session(gateway.clone()).await;

        let card_id = session
            .add_card(NewCard {
                title: "New task".to_string(),
                tag: String::new(),
                description: String::new(),
                list_id: 2,
                members: Vec::new(),
            })
            .await
            .unwrap();

        assert_eq!(card_ids(&session, 2), vec![21, card_id]);

        gateway.state.lock().unwrap().fail_create_card = true;
        let result = session
            .add_card(NewCard {
                title: "Doomed".to_string(),
                tag: String::new(),
                description: String::new(),
                list_id: 2,
                members: Vec::new(),
            })
            .await;
        assert!(result.is_err());
        assert_eq!(card_ids(&session, 2), vec![21, card_id]);
    }

    #[tokio::test]
    async fn test_add_update_and_delete_list() {
        let gateway = seeded_gateway();
        let mut session = loaded_session(gateway.clone()).await;

        let list_id = session
            .add_list(NewList {
                name: "Blocked".to_string(),
                color: "#DC2626".to_string(),
                board_id: 1,
            })
            .await
            .unwrap();
        assert_eq!(session.snapshot().lists().len(), 3);

        session
            .update_list(ListPatch {
                id: list_id,
                name: "On hold".to_string(),
                color: "#F59E0B".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(session.snapshot().list(list_id).unwrap().name, "On hold");

        session.delete_list(list_id).await.unwrap();
        assert_eq!(session.snapshot().lists().len(), 2);
    }

    #[tokio::test]
    async fn test_add_and_delete_comment() {
        let gateway = seeded_gateway();
        let mut session = loaded_session(gateway.clone()).await;

        let comment_id = session
            .add_comment(NewComment {
                content: "ship it".to_string(),
                card_id: 21,
                user: user(),
            })
            .await
            .unwrap();
        assert_eq!(session.snapshot().card(21).unwrap().comments.len(), 1);

        session.delete_comment(21, comment_id).await.unwrap();
        assert!(session.snapshot().card(21).unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn test_cross_move_emits_card_moved_event() {
        let gateway = seeded_gateway();
        let mut session = loaded_session(gateway.clone()).await;
        let mut rx = session.subscribe();

        session
            .move_card(RelocationIntent {
                card_id: 11,
                from_list: 1,
                from_index: 0,
                to_list: 2,
                to_index: 0,
            })
            .await
            .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            SnapshotEvent::CardMoved {
                card_id: 11,
                from_list_id: 1,
                to_list_id: 2
            }
        );
    }
}
