//! In-memory board snapshot store.
//!
//! Holds the denormalized tree for one board (board -> lists -> cards ->
//! comments), populated on detail-view entry and discarded on navigation
//! away. Every mutation goes through this store and emits a
//! [`SnapshotEvent`] on a broadcast channel so views can re-render without
//! the store knowing about any UI framework.
//!
//! Invariant: each card's `list_id` agrees with the list whose card
//! sequence contains it. The transfer path is the only code that rewrites
//! card containment and it re-establishes the invariant itself.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::relocate;
use crate::types::{Board, Card, Comment, List};

/// Where a card currently sits in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLocation {
    pub list_id: i64,
    pub index: usize,
}

/// Events emitted after each successful snapshot mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SnapshotEvent {
    BoardLoaded { board_id: i64 },
    ListsReplaced { count: usize },
    CardsAttached { list_id: i64, count: usize },
    CommentsAttached { card_id: i64, count: usize },
    CardReordered { card_id: i64, list_id: i64 },
    CardMoved { card_id: i64, from_list_id: i64, to_list_id: i64 },
    CardUpdated { card_id: i64 },
    CardAdded { card_id: i64, list_id: i64 },
    CardRemoved { card_id: i64, list_id: i64 },
    ListReordered { from_index: usize, to_index: usize },
    ListAdded { list_id: i64 },
    ListUpdated { list_id: i64 },
    ListRemoved { list_id: i64 },
    CommentAdded { comment_id: i64, card_id: i64 },
    CommentRemoved { comment_id: i64, card_id: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("List not found: {0}")]
    ListNotFound(i64),

    #[error("Card not found: {0}")]
    CardNotFound(i64),

    #[error("Index {index} out of range (0-{max})")]
    IndexOutOfRange { index: usize, max: usize },
}

/// The UI-ready tree for one board.
pub struct BoardSnapshot {
    board: Option<Board>,
    lists: Vec<List>,
    event_tx: broadcast::Sender<SnapshotEvent>,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardSnapshot {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            board: None,
            lists: Vec::new(),
            event_tx,
        }
    }

    /// Subscribe to mutation events. Slow receivers may observe `Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<SnapshotEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: SnapshotEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn list(&self, list_id: i64) -> Option<&List> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    fn list_position(&self, list_id: i64) -> Option<usize> {
        self.lists.iter().position(|l| l.id == list_id)
    }

    fn list_mut(&mut self, list_id: i64) -> Option<&mut List> {
        self.lists.iter_mut().find(|l| l.id == list_id)
    }

    /// Scan all lists for the card. Returns `None` when the snapshot no
    /// longer contains it (stale state).
    pub fn locate_card(&self, card_id: i64) -> Option<CardLocation> {
        for list in &self.lists {
            if let Some(index) = list.cards.iter().position(|c| c.id == card_id) {
                return Some(CardLocation {
                    list_id: list.id,
                    index,
                });
            }
        }
        None
    }

    pub fn card(&self, card_id: i64) -> Option<&Card> {
        let location = self.locate_card(card_id)?;
        self.list(location.list_id)
            .and_then(|l| l.cards.get(location.index))
    }

    pub fn total_cards(&self) -> usize {
        self.lists.iter().map(|l| l.cards.len()).sum()
    }

    pub fn set_board(&mut self, board: Board) {
        let board_id = board.id;
        self.board = Some(board);
        self.emit(SnapshotEvent::BoardLoaded { board_id });
    }

    /// Replace the whole list tree (initial load).
    pub fn set_lists(&mut self, lists: Vec<List>) {
        let count = lists.len();
        self.lists = lists;
        self.emit(SnapshotEvent::ListsReplaced { count });
    }

    /// Attach a freshly fetched card sequence to its list.
    pub fn attach_cards(&mut self, list_id: i64, cards: Vec<Card>) -> Result<(), SnapshotError> {
        let count = cards.len();
        let list = self
            .list_mut(list_id)
            .ok_or(SnapshotError::ListNotFound(list_id))?;
        list.cards = cards;
        self.emit(SnapshotEvent::CardsAttached { list_id, count });
        Ok(())
    }

    /// Attach a freshly fetched comment sequence to its card.
    pub fn attach_comments(
        &mut self,
        card_id: i64,
        comments: Vec<Comment>,
    ) -> Result<(), SnapshotError> {
        let count = comments.len();
        let location = self
            .locate_card(card_id)
            .ok_or(SnapshotError::CardNotFound(card_id))?;
        let list = self
            .list_mut(location.list_id)
            .ok_or(SnapshotError::ListNotFound(location.list_id))?;
        list.cards[location.index].comments = comments;
        self.emit(SnapshotEvent::CommentsAttached { card_id, count });
        Ok(())
    }

    /// Same-container reorder: remove at `from`, reinsert at `to`.
    pub fn move_card_within(
        &mut self,
        list_id: i64,
        from: usize,
        to: usize,
    ) -> Result<(), SnapshotError> {
        let list = self
            .list_mut(list_id)
            .ok_or(SnapshotError::ListNotFound(list_id))?;
        let len = list.cards.len();
        if from >= len {
            return Err(SnapshotError::IndexOutOfRange {
                index: from,
                max: len.saturating_sub(1),
            });
        }
        if to > len {
            return Err(SnapshotError::IndexOutOfRange { index: to, max: len });
        }
        let card_id = list.cards[from].id;
        relocate::move_item(&mut list.cards, from, to);
        self.emit(SnapshotEvent::CardReordered { card_id, list_id });
        Ok(())
    }

    /// Cross-container transfer: remove from the source sequence, insert
    /// into the destination at `to_index` (inclusive upper bound appends),
    /// and rewrite the card's `list_id` to the destination list.
    pub fn transfer_card(
        &mut self,
        from_list: i64,
        to_list: i64,
        from_index: usize,
        to_index: usize,
    ) -> Result<(), SnapshotError> {
        if from_list == to_list {
            return self.move_card_within(from_list, from_index, to_index);
        }
        let from_pos = self
            .list_position(from_list)
            .ok_or(SnapshotError::ListNotFound(from_list))?;
        let to_pos = self
            .list_position(to_list)
            .ok_or(SnapshotError::ListNotFound(to_list))?;

        let source_len = self.lists[from_pos].cards.len();
        if from_index >= source_len {
            return Err(SnapshotError::IndexOutOfRange {
                index: from_index,
                max: source_len.saturating_sub(1),
            });
        }
        let target_len = self.lists[to_pos].cards.len();
        if to_index > target_len {
            return Err(SnapshotError::IndexOutOfRange {
                index: to_index,
                max: target_len,
            });
        }

        let card_id = self.lists[from_pos].cards[from_index].id;
        let (source, target) = if from_pos < to_pos {
            let (head, tail) = self.lists.split_at_mut(to_pos);
            (&mut head[from_pos], &mut tail[0])
        } else {
            let (head, tail) = self.lists.split_at_mut(from_pos);
            (&mut tail[0], &mut head[to_pos])
        };
        relocate::transfer_item(&mut source.cards, &mut target.cards, from_index, to_index);
        target.cards[to_index].list_id = to_list;

        self.emit(SnapshotEvent::CardMoved {
            card_id,
            from_list_id: from_list,
            to_list_id: to_list,
        });
        Ok(())
    }

    /// Board-level list reorder. Local only; list order is not persisted.
    pub fn move_list(&mut self, from: usize, to: usize) -> Result<(), SnapshotError> {
        let len = self.lists.len();
        if from >= len {
            return Err(SnapshotError::IndexOutOfRange {
                index: from,
                max: len.saturating_sub(1),
            });
        }
        if to > len {
            return Err(SnapshotError::IndexOutOfRange { index: to, max: len });
        }
        relocate::move_item(&mut self.lists, from, to);
        self.emit(SnapshotEvent::ListReordered {
            from_index: from,
            to_index: to,
        });
        Ok(())
    }

    /// Merge the backend's canonical card fields into the local card.
    pub fn merge_card(&mut self, card_id: i64, canonical: Card) -> Result<(), SnapshotError> {
        let location = self
            .locate_card(card_id)
            .ok_or(SnapshotError::CardNotFound(card_id))?;
        let list = self
            .list_mut(location.list_id)
            .ok_or(SnapshotError::ListNotFound(location.list_id))?;
        list.cards[location.index].merge_canonical(canonical);
        self.emit(SnapshotEvent::CardUpdated { card_id });
        Ok(())
    }

    /// Append a card to the list named by its `list_id`.
    pub fn push_card(&mut self, card: Card) -> Result<(), SnapshotError> {
        let card_id = card.id;
        let list_id = card.list_id;
        let list = self
            .list_mut(list_id)
            .ok_or(SnapshotError::ListNotFound(list_id))?;
        list.cards.push(card);
        self.emit(SnapshotEvent::CardAdded { card_id, list_id });
        Ok(())
    }

    /// Remove exactly one card (matching id) from exactly one list.
    pub fn remove_card(&mut self, card_id: i64) -> Result<Card, SnapshotError> {
        let location = self
            .locate_card(card_id)
            .ok_or(SnapshotError::CardNotFound(card_id))?;
        let list = self
            .list_mut(location.list_id)
            .ok_or(SnapshotError::ListNotFound(location.list_id))?;
        let card = list.cards.remove(location.index);
        self.emit(SnapshotEvent::CardRemoved {
            card_id,
            list_id: location.list_id,
        });
        Ok(card)
    }

    pub fn push_list(&mut self, list: List) {
        let list_id = list.id;
        self.lists.push(list);
        self.emit(SnapshotEvent::ListAdded { list_id });
    }

    pub fn update_list_fields(
        &mut self,
        list_id: i64,
        name: String,
        color: String,
    ) -> Result<(), SnapshotError> {
        let list = self
            .list_mut(list_id)
            .ok_or(SnapshotError::ListNotFound(list_id))?;
        list.name = name;
        list.color = color;
        self.emit(SnapshotEvent::ListUpdated { list_id });
        Ok(())
    }

    /// Remove a list and all its cards.
    pub fn remove_list(&mut self, list_id: i64) -> Result<List, SnapshotError> {
        let position = self
            .list_position(list_id)
            .ok_or(SnapshotError::ListNotFound(list_id))?;
        let list = self.lists.remove(position);
        self.emit(SnapshotEvent::ListRemoved { list_id });
        Ok(list)
    }

    /// Append a comment to the card named by its `card_id`.
    pub fn push_comment(&mut self, comment: Comment) -> Result<(), SnapshotError> {
        let comment_id = comment.id;
        let card_id = comment.card_id;
        let location = self
            .locate_card(card_id)
            .ok_or(SnapshotError::CardNotFound(card_id))?;
        let list = self
            .list_mut(location.list_id)
            .ok_or(SnapshotError::ListNotFound(location.list_id))?;
        list.cards[location.index].comments.push(comment);
        self.emit(SnapshotEvent::CommentAdded {
            comment_id,
            card_id,
        });
        Ok(())
    }

    /// Drop a comment from a card. Removing an already-absent comment is a
    /// no-op, matching the filter semantics of the delete success handler.
    pub fn remove_comment(&mut self, card_id: i64, comment_id: i64) -> Result<(), SnapshotError> {
        let location = self
            .locate_card(card_id)
            .ok_or(SnapshotError::CardNotFound(card_id))?;
        let list = self
            .list_mut(location.list_id)
            .ok_or(SnapshotError::ListNotFound(location.list_id))?;
        let comments = &mut list.cards[location.index].comments;
        let before = comments.len();
        comments.retain(|c| c.id != comment_id);
        if comments.len() < before {
            self.emit(SnapshotEvent::CommentRemoved {
                comment_id,
                card_id,
            });
        }
        Ok(())
    }
}
