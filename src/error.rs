use thiserror::Error;

/// Storage for an [EventQueue](crate::EventQueue) or a
/// [FixedAllocator](crate::fixed_allocator::FixedAllocator) could not be set up.
///
/// Nothing is left allocated when this is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateError{
    #[error("out of memory reserving {capacity} slots of {item_size} bytes")]
    OutOfMemory{ capacity: usize, item_size: usize },

    #[error("{capacity} slots of {item_size} bytes exceed the addressable size")]
    CapacityOverflow{ capacity: usize, item_size: usize },
}
