//! List Identifier Allocation

use crate::models::ListId;

/// Hands out list ids. Owned by the app; ids are never reused while the
/// app is alive.
#[derive(Debug, Clone, Default)]
pub struct ListIdAllocator {
    /// Wider than `ListId` so reserving `u32::MAX` cannot wrap
    next: u64,
}

impl ListIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next fresh id; `None` once every `u32` id has been used
    pub fn allocate(&mut self) -> Option<ListId> {
        let id = self.peek()?;
        self.next += 1;
        Some(id)
    }

    /// Mark an existing id as taken, so later allocations land past it
    pub fn reserve(&mut self, id: ListId) {
        self.next = self.next.max(u64::from(id.0) + 1);
    }

    /// The id the next `allocate` call will return
    pub fn peek(&self) -> Option<ListId> {
        u32::try_from(self.next).ok().map(ListId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_from_zero() {
        let mut ids = ListIdAllocator::new();
        assert_eq!(ids.allocate(), Some(ListId(0)));
        assert_eq!(ids.allocate(), Some(ListId(1)));
        assert_eq!(ids.peek(), Some(ListId(2)));
    }

    #[test]
    fn test_reserve_is_order_independent() {
        let mut ids = ListIdAllocator::new();
        ids.reserve(ListId(3));
        ids.reserve(ListId(0));
        assert_eq!(ids.allocate(), Some(ListId(4)));
    }

    #[test]
    fn test_reserve_below_next_is_noop() {
        let mut ids = ListIdAllocator::new();
        ids.allocate();
        ids.allocate();
        ids.reserve(ListId(0));
        assert_eq!(ids.peek(), Some(ListId(2)));
    }

    #[test]
    fn test_reserve_max_id_exhausts_without_wrapping() {
        let mut ids = ListIdAllocator::new();
        ids.reserve(ListId(u32::MAX));
        ids.reserve(ListId(5));

        assert_eq!(ids.peek(), None);
        assert_eq!(ids.allocate(), None);
        assert_eq!(ids.allocate(), None);
    }

    #[test]
    fn test_last_id_still_allocated() {
        let mut ids = ListIdAllocator::new();
        ids.reserve(ListId(u32::MAX - 1));

        assert_eq!(ids.allocate(), Some(ListId(u32::MAX)));
        assert_eq!(ids.allocate(), None);
    }
}
