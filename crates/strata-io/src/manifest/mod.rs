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

//! Manifest authoring and persistence.
//!
//! The build manifest travels through three shapes:
//!
//! 1. A [`ManifestSource`]: the RON document content tooling authors, listing
//!    scenes in build order with human-readable names.
//! 2. A [`ManifestImage`](strata_core::scene::ManifestImage): the validated,
//!    serializable payload, produced by the [`ManifestBuilder`].
//! 3. The packed binary index: the `bincode` encoding of the image that
//!    ships with a build and that
//!    [`BuildManifest::from_index_bytes`](strata_core::scene::BuildManifest::from_index_bytes)
//!    consumes at process start.
//!
//! Scenes can be authored but excluded from the deployed set
//! (`enabled: false`); they receive no build index, but their display names
//! are kept in the image so runtime diagnostics stay readable.

mod builder;
mod index;
mod source;

pub use builder::*;
pub use index::*;
pub use source::*;

use strata_core::scene::SceneKey;
use thiserror::Error;

/// An error raised while authoring, validating, or persisting a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Reading or writing a manifest file failed.
    #[error("manifest I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The RON source document is malformed.
    #[error("malformed manifest source: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// Encoding the packed index failed.
    #[error("failed to encode packed index: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    /// Decoding the packed index failed.
    #[error("failed to decode packed index: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    /// Two authored scenes share the same key.
    #[error("duplicate scene key '{0}' in manifest source")]
    DuplicateKey(SceneKey),
    /// No scene was designated as the core scene.
    #[error("no core scene designated")]
    MissingCore,
    /// The designated core scene is not among the authored scenes.
    #[error("core scene '{0}' is not present in the manifest source")]
    UnknownCoreKey(SceneKey),
    /// The designated core scene is excluded from the deployed set.
    #[error("core scene '{0}' is excluded from the build")]
    CoreSceneDisabled(SceneKey),
    /// The manifest deploys no scenes at all.
    #[error("manifest source contains no enabled scenes")]
    Empty,
}
