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

//! The build manifest: fast, in-memory resolution of scene identities.
//!
//! This module provides the [`BuildManifest`] struct, which loads and manages
//! the index of scenes included in the deployed content set. It is designed
//! to support scene streaming by offering O(1) lookups from a persistent
//! [`SceneKey`] to its live [`BuildIndex`]. The manifest is typically
//! initialized once per process from a packed binary index file produced by
//! the packaging step, and is read-only from then on.

use super::{BuildIndex, SceneKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the packed scene index.
///
/// Scenes excluded from the deployed set carry `index: None`; their row
/// exists only so the manifest can still report a human-readable name when
/// diagnosing an attempt to stream them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// The persistent identity of the scene.
    pub key: SceneKey,
    /// The scene's position in the deployed set, or `None` if excluded.
    pub index: Option<BuildIndex>,
    /// A human-readable name for diagnostics.
    pub display_name: Option<String>,
}

/// The serializable payload of a packed manifest index file.
///
/// This is the exact shape written by the packaging step (see the io crate's
/// index encoder) and decoded by [`BuildManifest::from_index_bytes`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestImage {
    /// All known scenes, deployed or excluded.
    pub entries: Vec<ManifestEntry>,
    /// The build index of the designated core scene.
    pub core: BuildIndex,
}

/// The runtime representation of the packed scene index.
///
/// The build manifest is the single source of truth for which scenes exist
/// in the deployed content set and where. It is populated exactly once,
/// passed around by shared reference (`Arc`), and never mutated afterwards;
/// concurrent resolution calls are pure lookups and require no locking.
#[derive(Debug)]
pub struct BuildManifest {
    /// Maps deployed scene identities to their build index.
    index: HashMap<SceneKey, BuildIndex>,
    /// Human-readable names, kept for every known scene including the ones
    /// excluded from the deployed set.
    names: HashMap<SceneKey, String>,
    /// The designated core scene of this build.
    core: BuildIndex,
}

impl BuildManifest {
    /// Builds a manifest from a decoded [`ManifestImage`].
    pub fn from_image(image: ManifestImage) -> Self {
        let mut index = HashMap::new();
        let mut names = HashMap::new();
        for entry in image.entries {
            if let Some(build_index) = entry.index {
                index.insert(entry.key.clone(), build_index);
            }
            if let Some(name) = entry.display_name {
                names.insert(entry.key, name);
            }
        }
        Self {
            index,
            names,
            core: image.core,
        }
    }

    /// Creates a `BuildManifest` by decoding a packed index file from its raw bytes.
    ///
    /// This function is the entry point for the runtime streaming system. It
    /// takes the binary data produced by the packaging step and builds the
    /// in-memory lookup tables.
    ///
    /// # Errors
    /// Returns a `DecodeError` if the byte slice is not a valid,
    /// bincode-encoded [`ManifestImage`].
    pub fn from_index_bytes(index_bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let config = bincode::config::standard();
        let (image, _): (ManifestImage, _) = bincode::serde::decode_from_slice(index_bytes, config)?;
        Ok(Self::from_image(image))
    }

    /// Resolves a scene identity to its position in the deployed set.
    ///
    /// Returns `None` when the scene is not part of the deployed set. This is
    /// a recoverable condition: bundle sequences skip such stages, and
    /// single-scene operations surface it as an error to their caller.
    pub fn resolve(&self, key: &SceneKey) -> Option<BuildIndex> {
        self.index.get(key).copied()
    }

    /// Returns the build index of the designated core scene.
    pub fn core_index(&self) -> BuildIndex {
        self.core
    }

    /// Returns the human-readable name recorded for a scene, if any.
    ///
    /// Names are available for excluded scenes too, which is what makes
    /// "tried to stream a scene that is not in the build" diagnostics
    /// readable.
    pub fn display_name(&self, key: &SceneKey) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Returns the number of deployed scenes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no scenes are deployed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
