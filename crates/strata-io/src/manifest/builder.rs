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

use super::ManifestError;
use std::collections::HashSet;
use strata_core::scene::{BuildIndex, BuildManifest, ManifestEntry, ManifestImage, SceneKey};

/// Programmatic construction of a validated manifest.
///
/// Scenes receive build indices in the order they are pushed, counting only
/// the enabled ones; the builder is the single place where build order is
/// decided. `build_image` performs the validation that the packaging step
/// relies on: unique keys, a designated core scene that is actually
/// deployed, and at least one deployed scene.
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    entries: Vec<(SceneKey, String, bool)>,
    core: Option<SceneKey>,
}

impl ManifestBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a deployed scene; its build index is the number of enabled
    /// scenes pushed before it.
    pub fn scene(mut self, key: impl Into<SceneKey>, display_name: impl Into<String>) -> Self {
        self.entries.push((key.into(), display_name.into(), true));
        self
    }

    /// Appends a scene that is authored but excluded from the deployed set.
    pub fn disabled_scene(
        mut self,
        key: impl Into<SceneKey>,
        display_name: impl Into<String>,
    ) -> Self {
        self.entries.push((key.into(), display_name.into(), false));
        self
    }

    /// Designates the core scene.
    pub fn core(mut self, key: impl Into<SceneKey>) -> Self {
        self.core = Some(key.into());
        self
    }

    /// Validates the authored set and produces the serializable image.
    ///
    /// # Errors
    /// [`ManifestError::DuplicateKey`], [`ManifestError::MissingCore`],
    /// [`ManifestError::UnknownCoreKey`], [`ManifestError::CoreSceneDisabled`],
    /// or [`ManifestError::Empty`].
    pub fn build_image(&self) -> Result<ManifestImage, ManifestError> {
        let mut seen = HashSet::new();
        for (key, _, _) in &self.entries {
            if !seen.insert(key.clone()) {
                return Err(ManifestError::DuplicateKey(key.clone()));
            }
        }

        let mut entries = Vec::with_capacity(self.entries.len());
        let mut next_index = 0u32;
        for (key, display_name, enabled) in &self.entries {
            let index = if *enabled {
                let index = BuildIndex(next_index);
                next_index += 1;
                Some(index)
            } else {
                None
            };
            entries.push(ManifestEntry {
                key: key.clone(),
                index,
                display_name: Some(display_name.clone()),
            });
        }

        if next_index == 0 {
            return Err(ManifestError::Empty);
        }

        let core_key = self.core.clone().ok_or(ManifestError::MissingCore)?;
        let core_entry = entries
            .iter()
            .find(|entry| entry.key == core_key)
            .ok_or_else(|| ManifestError::UnknownCoreKey(core_key.clone()))?;
        let core = core_entry
            .index
            .ok_or(ManifestError::CoreSceneDisabled(core_key))?;

        log::debug!(
            "Built manifest image: {} scenes deployed, {} authored, core {}.",
            next_index,
            entries.len(),
            core
        );
        Ok(ManifestImage { entries, core })
    }

    /// Validates the authored set and produces the runtime manifest.
    pub fn build(&self) -> Result<BuildManifest, ManifestError> {
        Ok(BuildManifest::from_image(self.build_image()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_indices_in_push_order_skipping_disabled_scenes() {
        let image = ManifestBuilder::new()
            .scene("boot", "Boot")
            .disabled_scene("workshop", "Workshop")
            .scene("hub", "Hub World")
            .core("boot")
            .build_image()
            .unwrap();

        assert_eq!(image.entries[0].index, Some(BuildIndex(0)));
        assert_eq!(image.entries[1].index, None);
        assert_eq!(image.entries[2].index, Some(BuildIndex(1)));
        assert_eq!(image.core, BuildIndex(0));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = ManifestBuilder::new()
            .scene("boot", "Boot")
            .scene("boot", "Boot again")
            .core("boot")
            .build_image()
            .unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateKey(key) if key == SceneKey::new("boot")));
    }

    #[test]
    fn rejects_a_missing_or_unknown_core() {
        let err = ManifestBuilder::new()
            .scene("boot", "Boot")
            .build_image()
            .unwrap_err();
        assert!(matches!(err, ManifestError::MissingCore));

        let err = ManifestBuilder::new()
            .scene("boot", "Boot")
            .core("nowhere")
            .build_image()
            .unwrap_err();
        assert!(matches!(err, ManifestError::UnknownCoreKey(_)));
    }

    #[test]
    fn rejects_a_disabled_core() {
        let err = ManifestBuilder::new()
            .scene("boot", "Boot")
            .disabled_scene("workshop", "Workshop")
            .core("workshop")
            .build_image()
            .unwrap_err();
        assert!(matches!(err, ManifestError::CoreSceneDisabled(_)));
    }

    #[test]
    fn rejects_an_all_disabled_manifest() {
        let err = ManifestBuilder::new()
            .disabled_scene("workshop", "Workshop")
            .core("workshop")
            .build_image()
            .unwrap_err();
        assert!(matches!(err, ManifestError::Empty));
    }
}
