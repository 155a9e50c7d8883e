//! Frame group registry.
//!
//! Decoded frames are shared between the textures and parts that use them.
//! Systems look them up by the same string keys used in texture descriptors.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::resources::animconfig::SheetConfig;
use crate::resources::frames::FrameGroup;

/// Central registry of decoded frame groups keyed by string IDs.
#[derive(Resource, Debug, Default)]
pub struct FrameStore {
    pub groups: FxHashMap<String, Arc<FrameGroup>>,
}

impl FrameStore {
    pub fn insert(&mut self, key: impl Into<String>, frames: FrameGroup) -> Arc<FrameGroup> {
        let frames = Arc::new(frames);
        self.groups.insert(key.into(), Arc::clone(&frames));
        frames
    }

    pub fn get(&self, key: &str) -> Option<&Arc<FrameGroup>> {
        self.groups.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Arc<FrameGroup>> {
        self.groups.remove(key)
    }

    /// Decode and register inline sheets, replacing any previous group with
    /// the same key.
    pub fn load_sheets(&mut self, sheets: &[SheetConfig]) -> Result<()> {
        for sheet in sheets {
            let frames = sheet.to_frames()?;
            self.insert(sheet.key.clone(), frames);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::color::Color;
    use crate::resources::frames::RgbaFrame;

    #[test]
    fn test_insert_get_remove() {
        let mut store = FrameStore::default();
        let frames = store.insert(
            "water",
            FrameGroup::new(vec![RgbaFrame::filled(1, 1, Color(1))]).unwrap(),
        );
        assert!(Arc::ptr_eq(&frames, store.get("water").unwrap()));
        assert!(store.remove("water").is_some());
        assert!(store.get("water").is_none());
    }

    #[test]
    fn test_load_sheets_splits_frames() {
        let mut store = FrameStore::default();
        let sheet = SheetConfig {
            key: "lava".to_string(),
            width: 1,
            frame_height: 1,
            pixels: vec![Color(1), Color(2), Color(3)],
        };
        store.load_sheets(&[sheet]).unwrap();
        assert_eq!(store.get("lava").unwrap().len(), 3);
    }
}
