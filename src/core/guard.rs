use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use log::debug;
use crate::error::types::{ConvertError, Result};

/// Single slot allowing one conversion in flight at a time.
///
/// Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct ConversionGuard {
    active: Arc<AtomicBool>,
}

impl ConversionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the slot, or fails immediately with [`ConvertError::Busy`].
    pub fn try_acquire(&self) -> Result<ConversionToken> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ConvertError::Busy)?;
        debug!("Conversion slot acquired");
        Ok(ConversionToken {
            active: Arc::clone(&self.active),
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Held while a conversion runs; releases the slot on drop.
#[derive(Debug)]
pub struct ConversionToken {
    active: Arc<AtomicBool>,
}

impl Drop for ConversionToken {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        debug!("Conversion slot released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_rejected() {
        let guard = ConversionGuard::new();
        let token = guard.try_acquire().unwrap();
        assert!(guard.is_active());
        assert!(matches!(guard.clone().try_acquire(), Err(ConvertError::Busy)));
        drop(token);
        assert!(!guard.is_active());
        assert!(guard.try_acquire().is_ok());
    }
}
