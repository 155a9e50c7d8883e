//! Animated texture system.
//!
//! - [`animate_textures`] ticks every [`AnimatedTexture`] once and writes the
//!   result into the entity's [`TextureBuffer`].
//!
//! # Animation Flow
//!
//! 1. Frames are decoded into the [`FrameStore`](crate::resources::framestore::FrameStore)
//! 2. Entities carry an [`AnimatedTexture`] pointing to their base frames, and a [`TextureBuffer`]
//! 3. [`update_world_time`](crate::systems::time::update_world_time) counts the host tick
//! 4. `animate_textures` advances each part and blends or copies the visible frame
//!
//! # Related
//!
//! - [`crate::components::driver::AnimationDriver`] – per-part timing and blending
//! - [`crate::events::textureunload`] – teardown when a texture goes away

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::animatedtexture::AnimatedTexture;
use crate::components::texturebuffer::TextureBuffer;
use crate::resources::framestore::FrameStore;
use crate::resources::worldtime::WorldTime;

/// Advance every animated texture by one tick.
///
/// Contract
/// - Reads [`WorldTime`] for the day clock.
/// - Looks up base frames in [`FrameStore`]; textures whose frames are
///   missing are skipped.
/// - A failing texture or part is logged and does not affect the others.
pub fn animate_textures(
    mut query: Query<(Entity, &mut AnimatedTexture, &mut TextureBuffer)>,
    store: Res<FrameStore>,
    time: Res<WorldTime>,
) {
    for (entity, mut texture, mut buffer) in query.iter_mut() {
        let Some(base) = store.get(&texture.frames_key) else {
            warn!(
                "Frames '{}' for {:?} not found in FrameStore, skipping",
                texture.frames_key, entity
            );
            continue;
        };

        if let Err(e) = texture.compositor.tick(base, &*time, &mut *buffer) {
            warn!("Animated texture {:?} failed this tick: {}", entity, e);
        }
    }
}
