//! Events in two parallel arrays, oldest first.
//!
//! Removal compacts the survivors down in one stable pass, so a `take_matching`
//! call is O(len) no matter how many events it removes.

use crate::error::CreateError;
use crate::storage::Storage;
use crate::EventType;

#[derive(Debug)]
pub struct DenseStorage{
    item_size: usize,
    capacity : usize,

    /// Both reserved for `capacity` items at construction; never reallocate.
    pub(super) types   : Vec<EventType>,
    pub(super) payloads: Vec<u8>,
}

impl Storage for DenseStorage{
    const NAME: &'static str = "dense";

    fn with_capacity(capacity: usize, item_size: usize) -> Result<Self, CreateError> {
        let overflow = CreateError::CapacityOverflow{ capacity, item_size };
        // same limit as the arena's u32 slot ids
        u32::try_from(capacity).map_err(|_| overflow)?;
        let payloads_size = capacity.checked_mul(item_size).ok_or(overflow)?;
        let oom = CreateError::OutOfMemory{ capacity, item_size };

        let mut types = Vec::new();
        types.try_reserve_exact(capacity).map_err(|_| oom)?;
        let mut payloads = Vec::new();
        payloads.try_reserve_exact(payloads_size).map_err(|_| oom)?;

        Ok(Self{ item_size, capacity, types, payloads })
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn item_size(&self) -> usize {
        self.item_size
    }

    #[inline]
    fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    fn push(&mut self, payload: &[u8], event_type: EventType) {
        debug_assert!(!self.is_full());
        debug_assert_eq!(payload.len(), self.item_size);

        self.types.push(event_type);
        self.payloads.extend_from_slice(payload);
    }

    fn take_matching(
        &mut self,
        filters: &[EventType],
        out_payloads: &mut [u8],
        out_types: &mut [EventType]
    ) -> usize {
        let item_size = self.item_size;
        let want = out_types.len();

        let mut taken = 0;
        let mut kept  = 0;
        for index in 0..self.types.len() {
            let event_type = self.types[index];
            let from = index * item_size;

            if taken < want && filters.contains(&event_type) {
                out_types[taken] = event_type;
                out_payloads[taken * item_size..][..item_size]
                    .copy_from_slice(&self.payloads[from..][..item_size]);
                taken += 1;
                continue;
            }

            if kept != index {
                self.types[kept] = event_type;
                self.payloads.copy_within(from..from + item_size, kept * item_size);
            }
            kept += 1;
        }

        self.types.truncate(kept);
        self.payloads.truncate(kept * item_size);
        taken
    }

    fn for_each<F>(&self, mut f: F)
        where F: FnMut(EventType, &[u8])
    {
        for (index, &event_type) in self.types.iter().enumerate() {
            f(event_type, &self.payloads[index * self.item_size..][..self.item_size]);
        }
    }
}
