//! Fixed-size slot allocator.
//!
//! Fixed in both senses: every slot is `item_size` bytes, and the arena holds
//! exactly `max_items` slots, reserved once at construction.
//!
//! Free slots form a singly-linked list of indices (`next_free`), so both
//! [allocate](FixedAllocator::allocate) and [release](FixedAllocator::release) are O(1).
//!
//! Not thread safe. Owner must serialize access.


use crate::error::CreateError;

/// Index of a slot inside its [FixedAllocator].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

impl SlotId{
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub struct FixedAllocator{
    item_size : usize,
    max_items : u32,
    heap : Box<[u8]>,

    /// `next_free[i]` is meaningful only while slot `i` is free.
    /// `max_items` terminates the list.
    next_free : Box<[u32]>,
    first_free: u32,
    live: usize,
}

impl FixedAllocator{
    pub fn new(item_size: usize, max_items: usize) -> Result<Self, CreateError> {
        let overflow = CreateError::CapacityOverflow{ capacity: max_items, item_size };
        let oom      = CreateError::OutOfMemory{ capacity: max_items, item_size };

        let max_items_u32 = u32::try_from(max_items).map_err(|_| overflow)?;
        let heap_size = item_size.checked_mul(max_items).ok_or(overflow)?;

        let mut heap = Vec::new();
        heap.try_reserve_exact(heap_size).map_err(|_| oom)?;
        heap.resize(heap_size, 0);

        let mut next_free = Vec::new();
        next_free.try_reserve_exact(max_items).map_err(|_| oom)?;
        next_free.extend(1..=max_items_u32);

        Ok(Self{
            item_size,
            max_items: max_items_u32,
            heap: heap.into_boxed_slice(),
            next_free: next_free.into_boxed_slice(),
            first_free: 0,
            live: 0,
        })
    }

    /// Zeroed slot, or `None` if all slots are taken.
    #[inline]
    pub fn allocate(&mut self) -> Option<SlotId> {
        if self.first_free == self.max_items {
            return None;
        }

        let id = SlotId(self.first_free);
        self.first_free = self.next_free[id.index()];
        self.live += 1;

        self.slot_mut(id).fill(0);
        Some(id)
    }

    /// # Panics
    ///
    /// If `id` is out of range. With the `paranoid` feature, also if `id` is already free.
    #[inline]
    pub fn release(&mut self, id: SlotId) {
        assert!(id.0 < self.max_items, "slot {} released to allocator of {} slots", id.0, self.max_items);
        debug_assert!(self.live > 0);

        #[cfg(feature = "paranoid")]
        self.assert_not_free(id);

        self.slot_mut(id).fill(0);
        self.next_free[id.index()] = self.first_free;
        self.first_free = id.0;
        self.live -= 1;
    }

    #[cfg(feature = "paranoid")]
    fn assert_not_free(&self, id: SlotId) {
        let mut free = self.first_free;
        while free != self.max_items {
            assert!(free != id.0, "slot {} released twice", id.0);
            free = self.next_free[free as usize];
            assert!(free <= self.max_items);
        }
    }

    #[inline]
    pub fn slot(&self, id: SlotId) -> &[u8] {
        let start = id.index() * self.item_size;
        &self.heap[start..start + self.item_size]
    }

    #[inline]
    pub fn slot_mut(&mut self, id: SlotId) -> &mut [u8] {
        let start = id.index() * self.item_size;
        &mut self.heap[start..start + self.item_size]
    }

    /// Slots currently handed out.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.first_free == self.max_items
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_items as usize
    }

    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }
}

impl std::fmt::Debug for FixedAllocator{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedAllocator")
            .field("item_size", &self.item_size)
            .field("max_items", &self.max_items)
            .field("live", &self.live)
            .finish()
    }
}
