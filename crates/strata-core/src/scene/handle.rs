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

use super::{BuildIndex, BuildManifest, SceneError, SceneKey};
use crate::driver::{LoadMode, LoadTicket, SceneDriver, SceneRef, UnloadOptions, UnloadTicket};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One addressable scene, identified persistently and resolved lazily.
///
/// A `SceneHandle` carries a [`SceneKey`] and memoizes the result of
/// resolving it against a [`BuildManifest`]. The cache distinguishes
/// "never resolved" (the once-cell is unset) from "resolved to
/// not-in-build" (`Some(None)`), so a miss is looked up only once too.
///
/// The identity is immutable after construction. Resolution is idempotent
/// for the lifetime of one manifest generation, and the once-cell makes the
/// memoization safe to race from multiple observers of a shared descriptor.
///
/// A handle performs no external work until [`begin_load`](Self::begin_load)
/// or [`begin_unload`](Self::begin_unload) is invoked.
#[derive(Debug, Serialize, Deserialize)]
pub struct SceneHandle {
    key: SceneKey,
    #[serde(skip)]
    resolved: OnceLock<Option<BuildIndex>>,
}

impl SceneHandle {
    /// Creates a handle for the given persistent identity.
    pub fn new(key: impl Into<SceneKey>) -> Self {
        Self {
            key: key.into(),
            resolved: OnceLock::new(),
        }
    }

    /// Returns the persistent identity of this handle.
    pub fn key(&self) -> &SceneKey {
        &self.key
    }

    /// Resolves the handle to its position in the deployed content set.
    ///
    /// The first call performs the manifest lookup and memoizes the answer;
    /// later calls return the cached value without consulting the manifest.
    /// `None` means the scene is not part of the deployed set, which is a
    /// recoverable condition, not a fatal one.
    pub fn resolve(&self, manifest: &BuildManifest) -> Option<BuildIndex> {
        *self.resolved.get_or_init(|| manifest.resolve(&self.key))
    }

    /// Builds the concrete [`SceneRef`] for this handle, if it resolves.
    pub fn scene_ref(&self, manifest: &BuildManifest) -> Option<SceneRef> {
        self.resolve(manifest).map(|index| SceneRef {
            key: self.key.clone(),
            index,
        })
    }

    /// Starts an asynchronous load of this single scene.
    ///
    /// # Errors
    /// Returns [`SceneError::Unresolved`] when the identity is not in the
    /// deployed set; the error carries the manifest's human-readable name
    /// for the scene when one is recorded.
    pub fn begin_load(
        &self,
        manifest: &BuildManifest,
        driver: &dyn SceneDriver,
        mode: LoadMode,
    ) -> Result<Box<dyn LoadTicket>, SceneError> {
        let scene = self
            .scene_ref(manifest)
            .ok_or_else(|| self.unresolved(manifest))?;
        Ok(driver.begin_load(&scene, mode))
    }

    /// Starts an asynchronous unload of this single scene.
    ///
    /// # Errors
    /// Returns [`SceneError::Unresolved`], same as [`begin_load`](Self::begin_load).
    pub fn begin_unload(
        &self,
        manifest: &BuildManifest,
        driver: &dyn SceneDriver,
        options: UnloadOptions,
    ) -> Result<Box<dyn UnloadTicket>, SceneError> {
        let scene = self
            .scene_ref(manifest)
            .ok_or_else(|| self.unresolved(manifest))?;
        Ok(driver.begin_unload(&scene, options))
    }

    fn unresolved(&self, manifest: &BuildManifest) -> SceneError {
        SceneError::Unresolved {
            key: self.key.clone(),
            display_name: manifest.display_name(&self.key).map(str::to_owned),
        }
    }
}

impl Clone for SceneHandle {
    fn clone(&self) -> Self {
        let resolved = OnceLock::new();
        if let Some(cached) = self.resolved.get() {
            let _ = resolved.set(*cached);
        }
        Self {
            key: self.key.clone(),
            resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ManifestEntry, ManifestImage};

    fn manifest_with(entries: Vec<ManifestEntry>) -> BuildManifest {
        BuildManifest::from_image(ManifestImage {
            entries,
            core: BuildIndex(0),
        })
    }

    fn deployed(key: &str, index: u32) -> ManifestEntry {
        ManifestEntry {
            key: SceneKey::new(key),
            index: Some(BuildIndex(index)),
            display_name: None,
        }
    }

    #[test]
    fn resolution_is_memoized() {
        let first = manifest_with(vec![deployed("hub", 4)]);
        let second = manifest_with(vec![deployed("hub", 9)]);

        let handle = SceneHandle::new("hub");
        assert_eq!(handle.resolve(&first), Some(BuildIndex(4)));
        // The cached answer wins even against a different manifest.
        assert_eq!(handle.resolve(&second), Some(BuildIndex(4)));
    }

    #[test]
    fn a_miss_is_memoized_too() {
        let empty = manifest_with(Vec::new());
        let populated = manifest_with(vec![deployed("hub", 2)]);

        let handle = SceneHandle::new("hub");
        assert_eq!(handle.resolve(&empty), None);
        assert_eq!(handle.resolve(&populated), None);
    }

    #[test]
    fn cloning_carries_the_cache_but_not_the_identity_twice() {
        let manifest = manifest_with(vec![deployed("hub", 1)]);
        let handle = SceneHandle::new("hub");
        handle.resolve(&manifest);

        let clone = handle.clone();
        assert_eq!(clone.key(), &SceneKey::new("hub"));
        assert_eq!(clone.resolved.get(), Some(&Some(BuildIndex(1))));

        let fresh = SceneHandle::new("hub").clone();
        assert_eq!(fresh.resolved.get(), None);
    }
}
