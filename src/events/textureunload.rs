//! Texture unload event.
//!
//! Triggering a [`TextureUnloadedEvent`] tears down the animation of one
//! entity: its release callbacks run once and the [`AnimatedTexture`]
//! component is removed, so the animation system stops ticking it. The
//! [`TextureBuffer`](crate::components::texturebuffer::TextureBuffer) keeps
//! its last pixels.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(texture_unloaded_observer);
//! world.trigger(TextureUnloadedEvent { entity });
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::animatedtexture::AnimatedTexture;

/// Event emitted when the host unloads an animated texture.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureUnloadedEvent {
    /// The entity carrying the texture.
    pub entity: Entity,
}

/// Observer closing the compositor of the unloaded texture.
pub fn texture_unloaded_observer(
    trigger: On<TextureUnloadedEvent>,
    mut query: Query<&mut AnimatedTexture>,
    mut commands: Commands,
) {
    let entity = trigger.event().entity;
    let Ok(mut texture) = query.get_mut(entity) else {
        debug!("TextureUnloadedEvent for {:?} without an animated texture", entity);
        return;
    };

    texture.compositor.close();
    commands.entity(entity).remove::<AnimatedTexture>();
    info!("Unloaded animated texture '{}' on {:?}", texture.frames_key, entity);
}
