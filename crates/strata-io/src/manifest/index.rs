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

use super::{ManifestError, ManifestSource};
use anyhow::Context;
use std::path::Path;
use strata_core::scene::{BuildManifest, ManifestImage};

/// Encodes a manifest image into the packed binary index format.
pub fn encode_index(image: &ManifestImage) -> Result<Vec<u8>, ManifestError> {
    let config = bincode::config::standard();
    Ok(bincode::serde::encode_to_vec(image, config)?)
}

/// Writes a manifest image to disk as a packed index file.
pub fn write_index_file(path: &Path, image: &ManifestImage) -> Result<(), ManifestError> {
    let bytes = encode_index(image)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Reads a packed index file into a runtime manifest.
pub fn load_index_file(path: &Path) -> Result<BuildManifest, ManifestError> {
    let bytes = std::fs::read(path)?;
    Ok(BuildManifest::from_index_bytes(&bytes)?)
}

/// Compiles an authored RON manifest into a packed index file.
///
/// This is the packaging-step entry point wired into build tooling, hence
/// the tool-facing `anyhow` result.
pub fn compile_index_file(source_path: &Path, index_path: &Path) -> anyhow::Result<()> {
    let source = ManifestSource::from_ron_file(source_path)
        .with_context(|| format!("Failed to read manifest source '{}'", source_path.display()))?;
    let image = source
        .to_image()
        .context("Manifest source failed validation")?;
    write_index_file(index_path, &image)
        .with_context(|| format!("Failed to write packed index '{}'", index_path.display()))?;
    log::info!(
        "Compiled manifest '{}' -> '{}' ({} scenes).",
        source_path.display(),
        index_path.display(),
        image.entries.len()
    );
    Ok(())
}
