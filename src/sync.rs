#[cfg(loom)]
pub(crate) use loom::thread;
#[cfg(loom)]
pub(crate) use loom::sync::Arc;

/// loom does not model time, so timed acquisition degrades to a blocking one.
/// loom tests only exercise [Timeout::Forever](crate::Timeout::Forever) and
/// [Timeout::Immediate](crate::Timeout::Immediate).
#[cfg(loom)]
pub(crate) struct Mutex<T>(loom::sync::Mutex<T>);
#[cfg(loom)]
impl<T> Mutex<T>{
    pub(crate) fn new(data: T) -> Self {
        Self(loom::sync::Mutex::new(data))
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
        MutexGuard(Some(self.0.lock().unwrap()))
    }

    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        self.0.try_lock().ok().map(|guard| MutexGuard(Some(guard)))
    }

    pub(crate) fn try_lock_until(&self, _deadline: std::time::Instant) -> Option<MutexGuard<'_, T>> {
        Some(self.lock())
    }

    pub(crate) fn get_mut(&mut self) -> &mut T {
        // There is no way to get without lock in loom
        unsafe{
            use std::ops::DerefMut;
            &mut *(self.0.lock().unwrap().deref_mut() as *mut T)
        }
    }
}

/// `Option` only so [Condvar::wait] can move the inner guard through loom's by-value API.
#[cfg(loom)]
pub(crate) struct MutexGuard<'a, T>(Option<loom::sync::MutexGuard<'a, T>>);
#[cfg(loom)]
impl<'a, T> std::ops::Deref for MutexGuard<'a, T>{
    type Target = T;
    fn deref(&self) -> &T {
        self.0.as_deref().unwrap()
    }
}
#[cfg(loom)]
impl<'a, T> std::ops::DerefMut for MutexGuard<'a, T>{
    fn deref_mut(&mut self) -> &mut T {
        self.0.as_deref_mut().unwrap()
    }
}

#[cfg(loom)]
pub(crate) struct WaitTimeoutResult(bool);
#[cfg(loom)]
impl WaitTimeoutResult{
    pub(crate) fn timed_out(&self) -> bool {
        self.0
    }
}

#[cfg(loom)]
pub(crate) struct Condvar(loom::sync::Condvar);
#[cfg(loom)]
impl Condvar{
    pub(crate) fn new() -> Self {
        Self(loom::sync::Condvar::new())
    }

    pub(crate) fn wait<T>(&self, guard: &mut MutexGuard<'_, T>) {
        let inner = guard.0.take().unwrap();
        guard.0 = Some(self.0.wait(inner).unwrap());
    }

    pub(crate) fn wait_until<T>(&self, guard: &mut MutexGuard<'_, T>, _deadline: std::time::Instant) -> WaitTimeoutResult {
        self.wait(guard);
        WaitTimeoutResult(false)
    }

    pub(crate) fn notify_all(&self) {
        self.0.notify_all();
    }
}

// ==========================================================================================

#[cfg(not(loom))]
#[allow(unused_imports)]
pub(crate) use std::thread;
#[cfg(not(loom))]
#[allow(unused_imports)]
pub(crate) use std::sync::Arc;
#[cfg(not(loom))]
pub(crate) use parking_lot::{Mutex, MutexGuard, Condvar};
