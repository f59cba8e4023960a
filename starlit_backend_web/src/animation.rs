// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving [`Surface::animate`] from `requestAnimationFrame`.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::ops::ControlFlow;

use starlit_core::Error;
use starlit_core::canvas::DrawingSurface;
use starlit_core::surface::{FrameOutcome, Surface};

use crate::raf::{FrameTick, RafLoop};

/// Renders one surface frame per display refresh.
///
/// The next frame is requested only after the current one returned
/// [`FrameOutcome::Continue`]. The loop ends when the surface's
/// [`StopToken`](starlit_core::surface::StopToken) is signalled or a frame
/// fails; the failure is kept in [`last_error`](Self::last_error).
pub struct AnimationLoop {
    raf: RafLoop,
    last_error: Rc<RefCell<Option<Error>>>,
}

impl core::fmt::Debug for AnimationLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationLoop")
            .field("raf", &self.raf)
            .field("last_error", &self.last_error.borrow())
            .finish()
    }
}

impl AnimationLoop {
    /// Creates a loop over `surface`. Call [`start`](Self::start) to run it.
    pub fn new<C: DrawingSurface + 'static>(surface: Rc<RefCell<Surface<C>>>) -> Self {
        let last_error = Rc::new(RefCell::new(None));
        let errors = Rc::clone(&last_error);
        let raf = RafLoop::new(move |tick: FrameTick| {
            let Ok(mut surface) = surface.try_borrow_mut() else {
                // Borrowed elsewhere (e.g. inside a listener); retry next refresh.
                return ControlFlow::Continue(());
            };
            settle(tick, surface.animate(), &errors)
        });
        Self { raf, last_error }
    }

    /// Requests the first frame. No-op while running.
    pub fn start(&self) {
        self.raf.start();
    }

    /// Cancels the pending frame.
    pub fn stop(&self) {
        self.raf.stop();
    }

    /// Returns `true` while frames are being requested.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.raf.is_running()
    }

    /// The error that ended the loop, if one did.
    #[must_use]
    pub fn last_error(&self) -> Option<Error> {
        self.last_error.borrow().clone()
    }
}

/// Decides whether another frame is requested after `result`.
fn settle(
    tick: FrameTick,
    result: Result<FrameOutcome, Error>,
    last_error: &RefCell<Option<Error>>,
) -> ControlFlow<()> {
    match result {
        Ok(FrameOutcome::Continue) => ControlFlow::Continue(()),
        Ok(FrameOutcome::Stopped) => {
            log::debug!("animation stopped after {} ticks", tick.frame_index);
            ControlFlow::Break(())
        }
        Err(e) => {
            log::error!("frame {} failed: {e}", tick.frame_index);
            *last_error.borrow_mut() = Some(e);
            ControlFlow::Break(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlit_core::error::{Missing, SurfaceError};

    const TICK: FrameTick = FrameTick {
        frame_index: 3,
        timestamp_ms: 50.0,
    };

    #[test]
    fn continue_rearms() {
        let slot = RefCell::new(None);
        assert_eq!(
            settle(TICK, Ok(FrameOutcome::Continue), &slot),
            ControlFlow::Continue(())
        );
        assert!(slot.borrow().is_none());
    }

    #[test]
    fn stop_ends_without_error() {
        let slot = RefCell::new(None);
        assert_eq!(
            settle(TICK, Ok(FrameOutcome::Stopped), &slot),
            ControlFlow::Break(())
        );
        assert!(slot.borrow().is_none());
    }

    #[test]
    fn error_ends_and_is_kept() {
        let slot = RefCell::new(None);
        let err = Error::Surface(SurfaceError::NotInitialized(Missing::Context));
        assert_eq!(settle(TICK, Err(err.clone()), &slot), ControlFlow::Break(()));
        assert_eq!(*slot.borrow(), Some(err));
    }
}
