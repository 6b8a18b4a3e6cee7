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

use serde::{Deserialize, Serialize};
use std::fmt;

/// A persistent, stable identifier for a logical scene.
///
/// This key represents the "idea" of a scene, completely decoupled from its
/// position in any particular deployed build. It is the primary key used by
/// the [`BuildManifest`](super::BuildManifest) to resolve a scene to its
/// live build index.
///
/// By using a stable key, scenes can be reordered, added to, or removed from
/// the deployed set without breaking references to them in bundle
/// descriptors or other authored content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneKey(String);

impl SceneKey {
    /// Creates a key from any string-like identity.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the underlying identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for SceneKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// The resolved position of a scene within the currently deployed content set.
///
/// A `BuildIndex` is only meaningful for the lifetime of one
/// [`BuildManifest`](super::BuildManifest) generation; scenes excluded from
/// the deployed set have no index at all (`Option<BuildIndex>` is `None`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BuildIndex(
    /// The raw position value.
    pub u32,
);

impl fmt::Display for BuildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
