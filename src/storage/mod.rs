//! Backing stores for [EventQueue](crate::EventQueue).
//!
//! Both keep events in arrival order and hand them out through a single ordered
//! scan, so they are interchangeable from the outside. They differ in how
//! removal from the middle is paid for:
//!
//! * [DenseStorage] - parallel arrays, stable compaction on removal.
//! * [ArenaStorage] - linked list through a [FixedAllocator](crate::fixed_allocator::FixedAllocator)
//!   arena, O(1) unlink on removal.
//!
//! Storage is never touched outside the queue lock.

pub mod dense;
pub mod arena;


pub use dense::DenseStorage;
pub use arena::ArenaStorage;

use crate::error::CreateError;
use crate::EventType;

pub trait Storage: Send + Sized{
    /// Used in log records.
    const NAME: &'static str;

    /// Reserve everything up front. Never grows afterwards.
    ///
    /// Slots are indexed with `u32`: `capacity` above `u32::MAX` is
    /// [CapacityOverflow](CreateError::CapacityOverflow).
    fn with_capacity(capacity: usize, item_size: usize) -> Result<Self, CreateError>;

    fn capacity(&self) -> usize;
    fn item_size(&self) -> usize;
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Store after the most recent event.
    ///
    /// Caller guarantees `!is_full()` and `payload.len() == item_size()`.
    fn push(&mut self, payload: &[u8], event_type: EventType);

    /// Single pass in arrival order. Moves out each event whose type is in `filters`,
    /// until `out_types` is filled. Everything else keeps its relative order.
    ///
    /// `out_payloads` holds `out_types.len()` items. Returns number of events moved.
    fn take_matching(
        &mut self,
        filters: &[EventType],
        out_payloads: &mut [u8],
        out_types: &mut [EventType]
    ) -> usize;

    /// Visit stored events in arrival order.
    fn for_each<F>(&self, f: F)
        where F: FnMut(EventType, &[u8]);
}
