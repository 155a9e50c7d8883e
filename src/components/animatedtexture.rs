//! Animated texture component.
//!
//! Binds an entity to its base frames in the
//! [`FrameStore`](crate::resources::framestore::FrameStore) and to the
//! [`PartCompositor`] that animates them. Built from a [`TextureDescriptor`].

use bevy_ecs::prelude::Component;

use crate::components::compositor::{Part, PartCompositor};
use crate::components::driver::AnimationDriver;
use crate::components::texturebuffer::TextureBuffer;
use crate::error::{AnimError, Result};
use crate::resources::animconfig::TextureDescriptor;
use crate::resources::framestore::FrameStore;
use crate::resources::frames::FrameSource;
use crate::systems::changedregion::Point;

/// Animated texture attached to an entity.
///
/// `frames_key` names the base frames in the [`FrameStore`]. The entity also
/// needs a [`TextureBuffer`] that receives the animated pixels.
#[derive(Component, Debug)]
pub struct AnimatedTexture {
    pub frames_key: String,
    pub compositor: PartCompositor,
}

impl AnimatedTexture {
    pub fn new(frames_key: impl Into<String>, compositor: PartCompositor) -> Self {
        Self {
            frames_key: frames_key.into(),
            compositor,
        }
    }

    /// Build the drivers described by `descriptor`, in drawing order.
    pub fn from_descriptor(descriptor: &TextureDescriptor, store: &FrameStore) -> Result<Self> {
        let base = store.get(&descriptor.frames_key).ok_or_else(|| {
            AnimError::InvalidConfig(format!(
                "base frames '{}' are not loaded",
                descriptor.frames_key
            ))
        })?;

        let mut compositor = PartCompositor::new();
        for part in descriptor.ordered_parts() {
            let frames = part
                .frames_key
                .as_deref()
                .map(|key| {
                    store.get(key).cloned().ok_or_else(|| {
                        AnimError::InvalidConfig(format!("part frames '{key}' are not loaded"))
                    })
                })
                .transpose()?;
            let source_frames = frames.as_ref().unwrap_or(base).frame_count();
            let driver =
                AnimationDriver::new(&part.animation, source_frames, Point::new(part.x, part.y))?;
            compositor.push_part(Part::new(driver, frames));
        }

        Ok(Self::new(descriptor.frames_key.clone(), compositor))
    }

    /// Components for a new animated texture entity.
    pub fn bundle(descriptor: &TextureDescriptor, store: &FrameStore) -> Result<(Self, TextureBuffer)> {
        let texture = Self::from_descriptor(descriptor, store)?;
        Ok((texture, TextureBuffer::new(descriptor.width, descriptor.height)))
    }

    /// Register a callback run when the texture is unloaded.
    pub fn with_release(mut self, release: impl FnOnce() + Send + Sync + 'static) -> Self {
        self.compositor.push_release(release);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::color::Color;
    use crate::resources::animconfig::{AnimationConfig, PartConfig};
    use crate::resources::frames::{FrameGroup, RgbaFrame};

    fn store() -> FrameStore {
        let mut store = FrameStore::default();
        store.insert(
            "base",
            FrameGroup::new(vec![
                RgbaFrame::filled(4, 4, Color(1)),
                RgbaFrame::filled(4, 4, Color(2)),
            ])
            .unwrap(),
        );
        store.insert(
            "eye",
            FrameGroup::new(vec![RgbaFrame::filled(2, 2, Color(3))]).unwrap(),
        );
        store
    }

    fn descriptor(parts: Vec<PartConfig>) -> TextureDescriptor {
        TextureDescriptor {
            width: 4,
            height: 4,
            frames_key: "base".to_string(),
            animation: Some(AnimationConfig::default()),
            parts,
            sheets: Vec::new(),
        }
    }

    fn eye() -> PartConfig {
        PartConfig {
            x: 1,
            y: 1,
            width: 2,
            height: 2,
            frames_key: Some("eye".to_string()),
            animation: AnimationConfig::default(),
        }
    }

    #[test]
    fn test_from_descriptor_orders_parts() {
        let texture = AnimatedTexture::from_descriptor(&descriptor(vec![eye()]), &store()).unwrap();
        let parts = texture.compositor.parts();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].frames.is_none());
        assert_eq!(parts[1].driver.origin(), Point::new(1, 1));
    }

    #[test]
    fn test_missing_frames_rejected() {
        let mut desc = descriptor(Vec::new());
        desc.frames_key = "missing".to_string();
        assert!(matches!(
            AnimatedTexture::from_descriptor(&desc, &store()),
            Err(AnimError::InvalidConfig(_))
        ));

        let mut part = eye();
        part.frames_key = Some("nope".to_string());
        assert!(AnimatedTexture::from_descriptor(&descriptor(vec![part]), &store()).is_err());
    }

    #[test]
    fn test_part_frame_count_from_private_frames() {
        let mut part = eye();
        part.animation.frames = vec![crate::components::framestate::FrameTimingEntry::new(1, None)];
        // "eye" only has one frame, so index 1 is out of range.
        assert!(AnimatedTexture::from_descriptor(&descriptor(vec![part]), &store()).is_err());
    }

    #[test]
    fn test_bundle_sizes_buffer() {
        let (_, buffer) = AnimatedTexture::bundle(&descriptor(Vec::new()), &store()).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (4, 4));
    }
}
