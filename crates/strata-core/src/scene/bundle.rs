// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{SceneError, SceneHandle};
use serde::{Deserialize, Serialize};

/// An ordered, immutable-at-use-time group of scenes.
///
/// The order of the list is significant: it defines the stage order of every
/// load or unload sequence driven over the bundle. One entry may be marked
/// as the "primary" scene, the one made active once a load sequence finishes
/// loading it.
///
/// Descriptors are authored by content tooling and read-only to the
/// sequencers, which index into the shared list and never copy it. Sharing a
/// descriptor between several concurrently running sequences is fine; each
/// sequence keeps its own cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawBundle")]
pub struct BundleDescriptor {
    scenes: Vec<SceneHandle>,
    primary: Option<usize>,
}

/// Unvalidated mirror of [`BundleDescriptor`] used during deserialization.
#[derive(Debug, Deserialize)]
struct RawBundle {
    scenes: Vec<SceneHandle>,
    #[serde(default)]
    primary: Option<usize>,
}

impl TryFrom<RawBundle> for BundleDescriptor {
    type Error = SceneError;

    fn try_from(raw: RawBundle) -> Result<Self, Self::Error> {
        match raw.primary {
            Some(index) => Self::with_primary(raw.scenes, index),
            None => Ok(Self::new(raw.scenes)),
        }
    }
}

impl BundleDescriptor {
    /// Creates a descriptor with no designated primary scene.
    pub fn new(scenes: Vec<SceneHandle>) -> Self {
        Self {
            scenes,
            primary: None,
        }
    }

    /// Creates a descriptor whose `primary`-th scene becomes active after a load.
    ///
    /// # Errors
    /// Returns [`SceneError::PrimaryOutOfBounds`] when `primary` does not
    /// point inside the scene list.
    pub fn with_primary(scenes: Vec<SceneHandle>, primary: usize) -> Result<Self, SceneError> {
        if primary >= scenes.len() {
            return Err(SceneError::PrimaryOutOfBounds {
                index: primary,
                len: scenes.len(),
            });
        }
        Ok(Self {
            scenes,
            primary: Some(primary),
        })
    }

    /// The number of scenes in the bundle.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns `true` for the zero-scene bundle.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Returns the scene at stage position `index`.
    pub fn get(&self, index: usize) -> Option<&SceneHandle> {
        self.scenes.get(index)
    }

    /// Iterates the scenes in stage order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneHandle> {
        self.scenes.iter()
    }

    /// The stage position of the designated primary scene, if any.
    pub fn primary_index(&self) -> Option<usize> {
        self.primary
    }

    /// The designated primary scene, if any.
    pub fn primary(&self) -> Option<&SceneHandle> {
        self.primary.and_then(|index| self.scenes.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenes(keys: &[&str]) -> Vec<SceneHandle> {
        keys.iter().map(|key| SceneHandle::new(*key)).collect()
    }

    /// Round-trips through bincode's serde integration, the same machinery
    /// the io crate uses for the packed index.
    fn roundtrip(bundle: &BundleDescriptor) -> BundleDescriptor {
        let config = bincode::config::standard();
        let bytes = bincode::serde::encode_to_vec(bundle, config).unwrap();
        let (decoded, _) = bincode::serde::decode_from_slice(&bytes, config).unwrap();
        decoded
    }

    #[test]
    fn preserves_stage_order() {
        let bundle = BundleDescriptor::new(scenes(&["a", "b", "c"]));
        let order: Vec<_> = bundle.iter().map(|s| s.key().as_str().to_owned()).collect();
        assert_eq!(order, ["a", "b", "c"]);
        assert_eq!(bundle.primary_index(), None);
    }

    #[test]
    fn rejects_out_of_bounds_primary() {
        let err = BundleDescriptor::with_primary(scenes(&["a", "b"]), 2).unwrap_err();
        assert_eq!(err, SceneError::PrimaryOutOfBounds { index: 2, len: 2 });

        // An empty bundle can never have a primary.
        assert!(BundleDescriptor::with_primary(Vec::new(), 0).is_err());
    }

    #[test]
    fn exposes_the_primary_scene() {
        let bundle = BundleDescriptor::with_primary(scenes(&["a", "b"]), 1).unwrap();
        assert_eq!(bundle.primary().unwrap().key().as_str(), "b");
    }

    #[test]
    fn deserialization_validates_the_primary_index() {
        let bundle = BundleDescriptor::with_primary(scenes(&["a", "b"]), 0).unwrap();
        assert_eq!(roundtrip(&bundle).primary_index(), Some(0));
    }
}
