//! Events as a singly-linked list threaded through a [FixedAllocator] arena.
//!
//! The arena does not keep arrival order physically - freed slots are reused
//! LIFO - so order lives in the `head`/`tail`/`next` links. Removing an event
//! from the middle is an O(1) unlink plus a slot release.

use crate::error::CreateError;
use crate::fixed_allocator::{FixedAllocator, SlotId};
use crate::storage::Storage;
use crate::EventType;

#[derive(Clone, Copy, Debug, Default)]
struct Link{
    event_type: EventType,
    next: Option<SlotId>,
}

#[derive(Debug)]
pub struct ArenaStorage{
    payloads: FixedAllocator,
    /// Indexed by payload slot. Valid only for live slots.
    links: Box<[Link]>,
    /// Oldest event.
    head: Option<SlotId>,
    /// Newest event.
    tail: Option<SlotId>,
}

impl ArenaStorage{
    #[inline]
    fn link_mut(&mut self, id: SlotId) -> &mut Link {
        &mut self.links[id.index()]
    }
}

impl Storage for ArenaStorage{
    const NAME: &'static str = "arena";

    fn with_capacity(capacity: usize, item_size: usize) -> Result<Self, CreateError> {
        let payloads = FixedAllocator::new(item_size, capacity)?;

        let mut links = Vec::new();
        links.try_reserve_exact(capacity)
            .map_err(|_| CreateError::OutOfMemory{ capacity, item_size })?;
        links.resize(capacity, Link::default());

        Ok(Self{
            payloads,
            links: links.into_boxed_slice(),
            head: None,
            tail: None,
        })
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.payloads.capacity()
    }

    #[inline]
    fn item_size(&self) -> usize {
        self.payloads.item_size()
    }

    #[inline]
    fn len(&self) -> usize {
        self.payloads.len()
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.payloads.is_exhausted()
    }

    fn push(&mut self, payload: &[u8], event_type: EventType) {
        debug_assert_eq!(payload.len(), self.item_size());
        let Some(id) = self.payloads.allocate() else {
            panic!("push into full {} storage", Self::NAME);
        };

        self.payloads.slot_mut(id).copy_from_slice(payload);
        *self.link_mut(id) = Link{ event_type, next: None };

        match self.tail {
            None => self.head = Some(id),
            Some(tail) => self.link_mut(tail).next = Some(id),
        }
        self.tail = Some(id);
    }

    fn take_matching(
        &mut self,
        filters: &[EventType],
        out_payloads: &mut [u8],
        out_types: &mut [EventType]
    ) -> usize {
        let item_size = self.item_size();
        let want = out_types.len();

        let mut taken = 0;
        let mut prev: Option<SlotId> = None;
        let mut cursor = self.head;

        while let Some(id) = cursor {
            if taken == want {
                break;
            }

            let Link{ event_type, next } = self.links[id.index()];
            cursor = next;

            if !filters.contains(&event_type) {
                prev = Some(id);
                continue;
            }

            out_types[taken] = event_type;
            out_payloads[taken * item_size..][..item_size]
                .copy_from_slice(self.payloads.slot(id));
            taken += 1;

            // splice neighbours
            match prev {
                None => self.head = next,
                Some(prev) => self.link_mut(prev).next = next,
            }
            if self.tail == Some(id) {
                self.tail = prev;
            }
            self.payloads.release(id);
        }

        taken
    }

    fn for_each<F>(&self, mut f: F)
        where F: FnMut(EventType, &[u8])
    {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let link = self.links[id.index()];
            f(link.event_type, self.payloads.slot(id));
            cursor = link.next;
        }
    }
}
