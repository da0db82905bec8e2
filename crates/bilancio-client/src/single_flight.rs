//! Opt-in at-most-one-in-flight guard for analysis submissions.
//!
//! The client itself never serializes calls. A caller that wants to refuse
//! duplicate uploads holds a [`SingleFlight`] and acquires a permit around
//! each submission.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ClientError;

#[derive(Debug, Clone, Default)]
pub struct SingleFlight {
    busy: Arc<AtomicBool>,
}

/// Held while a submission is in flight; released on drop.
#[derive(Debug)]
pub struct FlightPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for FlightPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl SingleFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Busy`] while another permit is alive.
    pub fn try_acquire(&self) -> Result<FlightPermit, ClientError> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| ClientError::Busy)?;
        Ok(FlightPermit {
            busy: Arc::clone(&self.busy),
        })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused_until_release() {
        let guard = SingleFlight::new();
        let permit = guard.try_acquire().expect("first acquire");
        assert!(guard.is_busy());
        assert!(matches!(guard.try_acquire(), Err(ClientError::Busy)));

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_ok());
    }

    #[test]
    fn clones_share_state() {
        let guard = SingleFlight::new();
        let clone = guard.clone();
        let _permit = guard.try_acquire().expect("first acquire");
        assert!(clone.is_busy());
        assert!(clone.try_acquire().is_err());
    }
}
