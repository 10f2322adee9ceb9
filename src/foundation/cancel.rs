use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::foundation::error::{PanError, PanResult};

/// Shared cooperative cancellation flag.
///
/// Placement checks it before every attempt and the render loop between frames.
/// Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> PanResult<()> {
        if self.is_cancelled() {
            Err(PanError::Cancelled)
        } else {
            Ok(())
        }
    }
}
