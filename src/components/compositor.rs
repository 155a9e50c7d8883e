//! Multi-part composition.
//!
//! A texture can carry several independently timed animations ("parts"),
//! each drawn into its own sub-rectangle of the shared output. The
//! [`PartCompositor`] ticks them in list order, so for overlapping pixels the
//! later part wins. Ordering the list (larger regions first) is the job of
//! whoever builds it, see
//! [`TextureDescriptor::ordered_parts`](crate::resources::animconfig::TextureDescriptor::ordered_parts).

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use smallvec::SmallVec;

use crate::components::driver::AnimationDriver;
use crate::components::texturebuffer::OutputSink;
use crate::error::{AnimError, Result};
use crate::resources::frames::{FrameGroup, FrameSource};
use crate::resources::worldtime::DayClock;

/// Callback run once when the compositor is torn down.
pub type ReleaseCallback = Box<dyn FnOnce() + Send + Sync>;

/// One driver plus the frames it reads, if they differ from the base frames.
#[derive(Debug, Clone)]
pub struct Part {
    pub driver: AnimationDriver,
    pub frames: Option<Arc<FrameGroup>>,
}

impl Part {
    pub fn new(driver: AnimationDriver, frames: Option<Arc<FrameGroup>>) -> Self {
        Self { driver, frames }
    }
}

#[derive(Default)]
pub struct PartCompositor {
    parts: SmallVec<[Part; 4]>,
    releases: Vec<ReleaseCallback>,
    /// Base frames captured on the first tick.
    base: Option<Arc<FrameGroup>>,
    closed: bool,
}

impl fmt::Debug for PartCompositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartCompositor")
            .field("parts", &self.parts)
            .field("releases", &self.releases.len())
            .field("base", &self.base.as_ref().map(|b| b.frame_count()))
            .field("closed", &self.closed)
            .finish()
    }
}

impl PartCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part. It draws over every part added before it.
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Register a callback run when the compositor is closed.
    pub fn with_release(mut self, release: impl FnOnce() + Send + Sync + 'static) -> Self {
        self.releases.push(Box::new(release));
        self
    }

    pub fn push_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn push_release(&mut self, release: impl FnOnce() + Send + Sync + 'static) {
        self.releases.push(Box::new(release));
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Tick every part in order against `base` or the part's own frames.
    ///
    /// A failing part does not stop the others; the first error is returned
    /// once every part has had its turn.
    pub fn tick(
        &mut self,
        base: &Arc<FrameGroup>,
        clock: &dyn DayClock,
        sink: &mut dyn OutputSink,
    ) -> Result<()> {
        if self.closed {
            return Err(AnimError::UnsupportedState(
                "compositor ticked after being closed".to_string(),
            ));
        }

        let base: &FrameGroup = self.base.get_or_insert_with(|| Arc::clone(base));
        let mut first_error = None;
        for (index, part) in self.parts.iter_mut().enumerate() {
            let frames: &FrameGroup = part.frames.as_deref().unwrap_or(base);
            if let Err(e) = part.driver.tick(frames, clock, sink) {
                warn!("Part {} failed to animate: {}", index, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Run every release callback once. Later calls do nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let releases = std::mem::take(&mut self.releases);
        debug!(
            "Closing compositor: {} part(s), {} release callback(s)",
            self.parts.len(),
            releases.len()
        );
        for release in releases {
            release();
        }
        self.base = None;
    }
}

impl Drop for PartCompositor {
    fn drop(&mut self) {
        self.close();
    }
}
