use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks fake-service state, recovering the data if a previous holder panicked.
pub(crate) fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
