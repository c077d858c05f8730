//! Print queue
//!
//! Ordered list of generated tags. Entries are appended in generation order
//! and never modified; ids are time-derived and strictly increasing.

use shared::models::QueueEntry;
use shared::util::{next_time_id, now_millis};

#[derive(Debug, Clone, Default)]
pub struct PrintQueue {
    entries: Vec<QueueEntry>,
    last_id: Option<u64>,
}

impl PrintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a generated tag and return the stored entry
    pub fn push(
        &mut self,
        rendered_graphic: String,
        payload: String,
        label: String,
    ) -> &QueueEntry {
        let id = next_time_id(self.last_id);
        self.last_id = Some(id);

        let idx = self.entries.len();
        self.entries.push(QueueEntry {
            id,
            rendered_graphic,
            payload,
            label,
            created_at: now_millis(),
        });
        &self.entries[idx]
    }

    /// Remove by id; returns whether an entry was removed
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(queue: &mut PrintQueue, payload: &str) -> u64 {
        queue
            .push(format!("<svg>{payload}</svg>"), payload.into(), payload.into())
            .id
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut queue = PrintQueue::new();
        let ids: Vec<u64> = (0..50).map(|_| push(&mut queue, "CB|RM|Kingston")).collect();
        assert!(ids.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(queue.len(), 50);
    }

    #[test]
    fn test_remove_by_id() {
        let mut queue = PrintQueue::new();
        let a = push(&mut queue, "a");
        let b = push(&mut queue, "b");
        let c = push(&mut queue, "c");

        assert!(queue.remove(b));
        assert!(!queue.remove(b));
        let ids: Vec<u64> = queue.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_ids_stay_increasing_after_removal() {
        let mut queue = PrintQueue::new();
        let a = push(&mut queue, "a");
        queue.remove(a);
        let b = push(&mut queue, "b");
        assert!(b > a);
    }

    #[test]
    fn test_clear() {
        let mut queue = PrintQueue::new();
        push(&mut queue, "a");
        queue.clear();
        assert!(queue.is_empty());
    }
}
