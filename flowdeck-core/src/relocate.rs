//! Array mechanics for drag-and-drop relocation.
//!
//! Same-sequence moves and cross-sequence transfers, with destination
//! indices clamped so a drop past the end appends. These are pure local
//! mutations; the snapshot store layers id lookup and validation on top.

/// Transient description of one drag gesture. Lives only for the duration
/// of the drop handler and its network round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocationIntent {
    pub card_id: i64,
    pub from_list: i64,
    pub from_index: usize,
    pub to_list: i64,
    pub to_index: usize,
}

impl RelocationIntent {
    pub fn is_same_list(&self) -> bool {
        self.from_list == self.to_list
    }
}

/// Reorder a sequence in place: remove the element at `from` and reinsert
/// it at `to`. `to` is clamped to the last valid position. Out-of-range
/// `from` leaves the sequence untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let to = to.min(items.len() - 1);
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Move the element at `from` in `source` into `target` at `to`. `to` is
/// clamped to `target.len()` (inclusive, allowing append). Out-of-range
/// `from` leaves both sequences untouched.
pub fn transfer_item<T>(source: &mut Vec<T>, target: &mut Vec<T>, from: usize, to: usize) {
    if from >= source.len() {
        return;
    }
    let to = to.min(target.len());
    let item = source.remove(from);
    target.insert(to, item);
}
