//! Bounded event queue. Multi producers, multi consumers.
//!
//! Holds at most `capacity` events of exactly `item_size` bytes each, every one
//! tagged with an [EventType]. Consumers select by type: [get](EventQueue::get)
//! takes the oldest events whose type is in the caller's filter set and leaves
//! all others where they are. Within one type, events come out in the order they
//! went in.
//!
//! One lock guards all state. One condvar serves both "not full" (producers wait
//! on it) and "not empty" (consumers wait on it), so every waiter re-checks its
//! own predicate after each wake up.
//!
//! Running out of time is not an error - calls report how many events they
//! moved, which may be fewer than requested.

use crate::deadline::{Deadline, Timeout};
use crate::error::CreateError;
use crate::storage::{Storage, DenseStorage};
use crate::sync::{Mutex, MutexGuard, Condvar};
use tracing::{debug, trace};

/// Caller-chosen event classification.
pub type EventType = i32;

/// Storage strategy is picked with `S`: [DenseStorage] (default) or
/// [ArenaStorage](crate::storage::ArenaStorage). Observable behaviour is the same.
///
/// Share between threads with [Arc](std::sync::Arc) or scoped threads. Dropping
/// the queue destroys it, and the borrow checker guarantees no `put`/`get` is
/// still running at that point.
pub struct EventQueue<S: Storage = DenseStorage>{
    storage: Mutex<S>,
    not_empty_or_not_full: Condvar,

    // copies of storage's, readable without lock
    capacity : usize,
    item_size: usize,
}

impl<S: Storage> EventQueue<S>{
    /// All storage is reserved here, none later.
    ///
    /// `capacity` above `u32::MAX` is [CapacityOverflow](CreateError::CapacityOverflow)
    /// for every storage strategy.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero.
    pub fn new(capacity: usize, item_size: usize) -> Result<Self, CreateError> {
        assert!(capacity > 0, "event queue capacity must be positive");

        let storage = S::with_capacity(capacity, item_size)?;
        debug!(capacity, item_size, storage = S::NAME, "event queue created");

        Ok(Self{
            storage: Mutex::new(storage),
            not_empty_or_not_full: Condvar::new(),
            capacity,
            item_size,
        })
    }

    /// Insert `types.len()` events. Event `i` is `types[i]` with payload
    /// `payloads[i*item_size..(i+1)*item_size]`.
    ///
    /// Events are stored in order. If the queue fills up midway, waits for room
    /// and continues, until everything is written or `timeout` runs out.
    /// With [Timeout::Forever] always writes everything.
    ///
    /// Returns number of events inserted - a prefix of the input.
    ///
    /// # Panics
    ///
    /// If `payloads` does not hold exactly one `item_size` payload per type.
    pub fn put(&self, payloads: &[u8], types: &[EventType], timeout: Timeout) -> usize {
        self.assert_payloads_len(payloads.len(), types.len());

        let deadline = Deadline::new(timeout);
        let requested = types.len();
        let item_size = self.item_size;

        let mut written = 0;
        while written < requested {
            let Some(mut storage) = deadline.lock(&self.storage) else { break; };
            if !self.wait_while(&deadline, &mut storage, |storage| storage.is_full()) {
                break;
            }

            let pass_start = written;
            while written < requested && !storage.is_full() {
                storage.push(&payloads[written * item_size..][..item_size], types[written]);
                written += 1;
            }
            drop(storage);

            if written > pass_start {
                self.not_empty_or_not_full.notify_all();
            }
            if deadline.is_expired() {
                break;
            }
        }

        trace!(requested, written, timed_out = written < requested, storage = S::NAME, "put");
        written
    }

    /// Take up to `types.len()` events whose type is in `filters`, oldest first.
    /// Event `i` is written to `types[i]` and `payloads[i*item_size..(i+1)*item_size]`.
    ///
    /// Waits (within `timeout`) only while the queue is empty. Once there is
    /// anything stored, does a single scan and returns what matched - possibly
    /// fewer than requested. A queue holding only non-matching events gives 0
    /// right away, same as an empty queue that timed out.
    ///
    /// # Panics
    ///
    /// If `filters` is empty, or `payloads` does not hold exactly one
    /// `item_size` payload per slot in `types`.
    pub fn get(
        &self,
        payloads: &mut [u8],
        types: &mut [EventType],
        filters: &[EventType],
        timeout: Timeout
    ) -> usize {
        assert!(!filters.is_empty(), "get requires at least one filter");
        self.assert_payloads_len(payloads.len(), types.len());

        let requested = types.len();
        if requested == 0 {
            return 0;
        }

        let deadline = Deadline::new(timeout);
        let mut timed_out = true;
        let mut taken = 0;
        if let Some(mut storage) = deadline.lock(&self.storage) {
            if self.wait_while(&deadline, &mut storage, |storage| storage.is_empty()) {
                timed_out = false;
                taken = storage.take_matching(filters, payloads, types);
            }
        }

        if taken > 0 {
            self.not_empty_or_not_full.notify_all();
        }

        trace!(requested, taken, timed_out, storage = S::NAME, "get");
        taken
    }

    /// [put](Self::put) for a single event. `true` if it was stored.
    #[inline]
    pub fn put_one(&self, payload: &[u8], event_type: EventType, timeout: Timeout) -> bool {
        self.put(payload, std::slice::from_ref(&event_type), timeout) == 1
    }

    /// [get](Self::get) for a single event. Returns its type.
    #[inline]
    pub fn get_one(&self, payload: &mut [u8], filters: &[EventType], timeout: Timeout) -> Option<EventType> {
        let mut event_type = 0;
        let taken = self.get(payload, std::slice::from_mut(&mut event_type), filters, timeout);
        (taken == 1).then_some(event_type)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Events stored right now. Stale as soon as the lock is released.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.lock().is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.storage.lock().is_full()
    }

    /// Wait until `blocked` no longer holds. `false` if the deadline came first.
    #[inline]
    fn wait_while<F>(&self, deadline: &Deadline, storage: &mut MutexGuard<'_, S>, blocked: F) -> bool
        where F: Fn(&S) -> bool
    {
        while blocked(&**storage) {
            if !deadline.wait(&self.not_empty_or_not_full, storage) {
                // may have been signaled right at the deadline
                return !blocked(&**storage);
            }
        }
        true
    }

    #[inline]
    fn assert_payloads_len(&self, payloads_len: usize, items: usize) {
        assert!(
            items.checked_mul(self.item_size) == Some(payloads_len),
            "expected {} payload bytes for {} events of {} bytes, got {}",
            items.saturating_mul(self.item_size), items, self.item_size, payloads_len
        );
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> MutexGuard<'_, S> {
        self.storage.lock()
    }
}

impl<S: Storage> Drop for EventQueue<S>{
    fn drop(&mut self) {
        let remaining = self.storage.get_mut().len();
        debug!(remaining, storage = S::NAME, "event queue dropped");
    }
}

impl<S: Storage> std::fmt::Debug for EventQueue<S>{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("storage", &S::NAME)
            .field("capacity", &self.capacity)
            .field("item_size", &self.item_size)
            .finish_non_exhaustive()
    }
}
