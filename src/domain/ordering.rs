use crate::domain::{comment::Comment, goal::Goal};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Items that carry a dense, zero-based position inside their lane
pub trait Positioned {
    fn position(&self) -> u32;
    fn set_position(&mut self, position: u32);
}

/// Renumbers `items` as `0..n` in their current slice order.
///
/// Returns the indexes of items whose position actually changed.
pub fn renumber<T: Positioned>(items: &mut [T]) -> Vec<usize> {
    let mut changed = Vec::new();
    for (index, item) in items.iter_mut().enumerate() {
        let position = index as u32;
        if item.position() != position {
            item.set_position(position);
            changed.push(index);
        }
    }
    changed
}

/// Renumbers the other members of a lane so that `target` is left free.
///
/// `others` must already be in ascending position order and must not
/// contain the item being placed. Positions are handed out from 0,
/// skipping the target slot once, so after placing the item at the returned
/// slot the lane is exactly `0..=others.len()`. Targets past the end are
/// clamped to the end of the lane.
///
/// # Examples
/// ```
/// use goalboard::domain::ordering::{reserve_slot, Positioned};
///
/// struct Card(u32);
/// impl Positioned for Card {
///     fn position(&self) -> u32 { self.0 }
///     fn set_position(&mut self, position: u32) { self.0 = position; }
/// }
///
/// let mut others = vec![Card(0), Card(1)];
/// let slot = reserve_slot(&mut others, 0);
/// assert_eq!(slot, 0);
/// assert_eq!(others[0].0, 1);
/// assert_eq!(others[1].0, 2);
/// ```
pub fn reserve_slot<T: Positioned>(others: &mut [T], target: u32) -> u32 {
    let target = target.min(others.len() as u32);
    let mut next = 0;
    for item in others.iter_mut() {
        if next == target {
            next += 1;
        }
        item.set_position(next);
        next += 1;
    }
    target
}

/// Sorts goals for display inside a column: ascending position.
///
/// Goals that share a position keep a stable order by creation time and
/// then id, so the first created keeps the lower slot on renumbering.
pub fn sort_by_position(goals: &mut [Goal]) {
    goals.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}

/// Sorts wins most recently completed first
pub fn sort_wins(goals: &mut [Goal]) {
    goals.sort_by(|a, b| {
        compare_option_dates(b.completed_at, a.completed_at)
            .then(a.position.cmp(&b.position))
            .then(a.id.cmp(&b.id))
    });
}

/// Sorts comments oldest first
pub fn sort_comments(comments: &mut [Comment]) {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

/// Compare Option<DateTime>, treating a missing date as the oldest possible
fn compare_option_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
