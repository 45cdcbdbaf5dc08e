//! Bounded, type-filtered event queue.
//!
//! Producers [put](EventQueue::put) fixed-size events tagged with an [EventType];
//! consumers [get](EventQueue::get) the oldest events matching a set of types.
//! Both sides can block forever, not at all, or up to a [Timeout].
//!
//! ```
//! use filter_event_queue::prelude::*;
//!
//! let queue = EventQueue::<DenseStorage>::new(16, 4).unwrap();
//! queue.put(&[1,0,0,0, 2,0,0,0], &[10, 20], Timeout::Immediate);
//!
//! let mut payload = [0; 4];
//! assert_eq!(queue.get_one(&mut payload, &[20], Timeout::Immediate), Some(20));
//! assert_eq!(payload, [2,0,0,0]);
//! ```

mod sync;
mod deadline;
mod error;

pub mod fixed_allocator;
pub mod storage;
pub mod event_queue;

pub use deadline::Timeout;
pub use error::CreateError;
pub use event_queue::{EventQueue, EventType};

pub mod prelude{
    pub use crate::{EventQueue, EventType, Timeout, CreateError};
    pub use crate::storage::{Storage, DenseStorage, ArenaStorage};
}

#[cfg(test)]
mod tests;
