//! Per-call timeout policy.
//!
//! A [Deadline] is computed once at call entry and then bounds every blocking step
//! of that call: lock acquisition, and each wait on the queue condition.
//! Expiry is always judged against that single absolute point, so waking up
//! and waiting again never extends the caller's budget.

use std::time::{Duration, Instant};
use crate::sync::{Mutex, MutexGuard, Condvar};

/// How long a [put](crate::EventQueue::put) / [get](crate::EventQueue::get) call may block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Timeout{
    /// Block until the operation can make progress.
    Forever,
    /// Try once. Never waits, neither for the lock nor for room/events.
    Immediate,
    /// Give up once this much time has passed since the call started.
    After(Duration),
}

impl Timeout{
    /// Millisecond convention: negative - [Forever](Timeout::Forever),
    /// zero - [Immediate](Timeout::Immediate), positive - [After](Timeout::After).
    #[inline]
    pub fn from_millis(ms: i32) -> Self {
        match ms {
            ms if ms < 0 => Timeout::Forever,
            0 => Timeout::Immediate,
            ms => Timeout::After(Duration::from_millis(u64::from(ms.unsigned_abs()))),
        }
    }
}

impl From<Duration> for Timeout{
    #[inline]
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            Timeout::Immediate
        } else {
            Timeout::After(duration)
        }
    }
}

/// `None` - wait forever.
impl From<Option<Duration>> for Timeout{
    #[inline]
    fn from(duration: Option<Duration>) -> Self {
        match duration {
            None => Timeout::Forever,
            Some(duration) => duration.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Deadline{
    Never,
    Now,
    At(Instant),
}

impl Deadline{
    #[inline]
    pub(crate) fn new(timeout: Timeout) -> Self {
        match timeout {
            Timeout::Forever   => Deadline::Never,
            Timeout::Immediate => Deadline::Now,
            Timeout::After(duration) => match Instant::now().checked_add(duration) {
                Some(at) => Deadline::At(at),
                // not representable - nobody will live long enough to notice
                None => Deadline::Never,
            },
        }
    }

    #[inline]
    pub(crate) fn is_expired(&self) -> bool {
        match *self {
            Deadline::Never  => false,
            Deadline::Now    => true,
            Deadline::At(at) => Instant::now() >= at,
        }
    }

    /// `None` if the lock could not be taken in time.
    #[inline]
    pub(crate) fn lock<'a, T>(&self, mutex: &'a Mutex<T>) -> Option<MutexGuard<'a, T>> {
        match *self {
            Deadline::Never  => Some(mutex.lock()),
            Deadline::Now    => mutex.try_lock(),
            Deadline::At(at) => mutex.try_lock_until(at),
        }
    }

    /// Single wait on `condvar`. Returns `false` if the deadline passed.
    /// The lock is held again on return either way. A `true` result says nothing
    /// about the predicate - re-check it.
    #[inline]
    pub(crate) fn wait<T>(&self, condvar: &Condvar, guard: &mut MutexGuard<'_, T>) -> bool {
        match *self {
            Deadline::Never  => { condvar.wait(guard); true }
            Deadline::Now    => false,
            Deadline::At(at) => !condvar.wait_until(guard, at).timed_out(),
        }
    }
}
