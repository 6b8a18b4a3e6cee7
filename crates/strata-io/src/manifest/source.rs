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

use super::{ManifestBuilder, ManifestError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strata_core::scene::{BuildManifest, ManifestImage, SceneKey};

/// One authored row of a manifest source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntry {
    /// The persistent identity of the scene.
    pub key: SceneKey,
    /// The scene's human-readable name.
    pub display_name: String,
    /// Whether the scene ships in the deployed set. Disabled scenes get no
    /// build index but keep their name for diagnostics.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// The RON-authored manifest document produced by content tooling.
///
/// The position of each enabled scene in `scenes` is its build index, so the
/// document's order is the deployment order.
///
/// ```ron
/// (
///     scenes: [
///         (key: "boot", display_name: "Boot"),
///         (key: "hub", display_name: "Hub World"),
///         (key: "workshop", display_name: "Workshop", enabled: false),
///     ],
///     core: "boot",
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestSource {
    /// All authored scenes, in deployment order.
    pub scenes: Vec<SceneEntry>,
    /// The key of the designated core scene.
    pub core: SceneKey,
}

impl ManifestSource {
    /// Parses a RON manifest document.
    pub fn from_ron_str(text: &str) -> Result<Self, ManifestError> {
        Ok(ron::de::from_str(text)?)
    }

    /// Reads and parses a RON manifest file.
    pub fn from_ron_file(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Validates the source and produces the serializable manifest image.
    pub fn to_image(&self) -> Result<ManifestImage, ManifestError> {
        self.to_builder().build_image()
    }

    /// Validates the source and produces the runtime manifest directly.
    pub fn compile(&self) -> Result<BuildManifest, ManifestError> {
        Ok(BuildManifest::from_image(self.to_image()?))
    }

    fn to_builder(&self) -> ManifestBuilder {
        let mut builder = ManifestBuilder::new();
        for entry in &self.scenes {
            builder = if entry.enabled {
                builder.scene(entry.key.clone(), entry.display_name.clone())
            } else {
                builder.disabled_scene(entry.key.clone(), entry.display_name.clone())
            };
        }
        builder.core(self.core.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::scene::BuildIndex;

    const SAMPLE: &str = r#"(
        scenes: [
            (key: "boot", display_name: "Boot"),
            (key: "hub", display_name: "Hub World"),
            (key: "workshop", display_name: "Workshop", enabled: false),
        ],
        core: "boot",
    )"#;

    #[test]
    fn parses_an_authored_document() {
        let source = ManifestSource::from_ron_str(SAMPLE).unwrap();
        assert_eq!(source.scenes.len(), 3);
        assert!(source.scenes[0].enabled);
        assert!(!source.scenes[2].enabled);
        assert_eq!(source.core, SceneKey::new("boot"));
    }

    #[test]
    fn compiles_to_a_runtime_manifest() {
        let manifest = ManifestSource::from_ron_str(SAMPLE).unwrap().compile().unwrap();
        assert_eq!(manifest.resolve(&SceneKey::new("boot")), Some(BuildIndex(0)));
        assert_eq!(manifest.resolve(&SceneKey::new("hub")), Some(BuildIndex(1)));
        // Disabled scenes keep their diagnostic name but get no index.
        assert_eq!(manifest.resolve(&SceneKey::new("workshop")), None);
        assert_eq!(
            manifest.display_name(&SceneKey::new("workshop")),
            Some("Workshop")
        );
        assert_eq!(manifest.core_index(), BuildIndex(0));
    }

    #[test]
    fn rejects_malformed_ron() {
        let err = ManifestSource::from_ron_str("(scenes: oops").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }
}
