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

//! Defines the error types for scene identity resolution and bundle grouping.

use super::SceneKey;
use std::fmt;

/// An error produced by the scene data entities.
///
/// Note the deliberately small surface: inside a bundle sequence, per-stage
/// problems are recovered by skipping the stage and never reach the caller
/// as an error. Only the single-scene operations and descriptor construction
/// propagate `SceneError` directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The scene identity is not part of the deployed content set.
    Unresolved {
        /// The identity that failed to resolve.
        key: SceneKey,
        /// The scene's human-readable name, when the manifest knows one.
        display_name: Option<String>,
    },
    /// A bundle's primary index does not point inside its scene list.
    PrimaryOutOfBounds {
        /// The offending primary index.
        index: usize,
        /// The number of scenes in the bundle.
        len: usize,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Unresolved {
                key,
                display_name: Some(name),
            } => {
                write!(f, "Scene '{key}' (\"{name}\") is not in the build manifest")
            }
            SceneError::Unresolved {
                key,
                display_name: None,
            } => {
                write!(f, "Scene '{key}' is not in the build manifest")
            }
            SceneError::PrimaryOutOfBounds { index, len } => {
                write!(
                    f,
                    "Primary index {index} is out of bounds for a bundle of {len} scenes"
                )
            }
        }
    }
}

impl std::error::Error for SceneError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_display_includes_the_name_when_known() {
        let err = SceneError::Unresolved {
            key: SceneKey::new("workshop"),
            display_name: Some("Workshop (dev only)".to_string()),
        };
        assert_eq!(
            format!("{err}"),
            "Scene 'workshop' (\"Workshop (dev only)\") is not in the build manifest"
        );

        let bare = SceneError::Unresolved {
            key: SceneKey::new("workshop"),
            display_name: None,
        };
        assert_eq!(
            format!("{bare}"),
            "Scene 'workshop' is not in the build manifest"
        );
    }

    #[test]
    fn primary_out_of_bounds_display() {
        let err = SceneError::PrimaryOutOfBounds { index: 3, len: 2 };
        assert_eq!(
            format!("{err}"),
            "Primary index 3 is out of bounds for a bundle of 2 scenes"
        );
    }
}
