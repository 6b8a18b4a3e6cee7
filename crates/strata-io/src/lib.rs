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

//! # Strata IO
//!
//! The authoring and packaging side of the scene streaming system: parsing
//! RON-authored manifest sources, validating them, and producing the packed
//! binary index that `strata-core` consumes at runtime.

#![warn(missing_docs)]

pub mod manifest;

pub use manifest::{
    compile_index_file, encode_index, load_index_file, write_index_file, ManifestBuilder,
    ManifestError, ManifestSource, SceneEntry,
};
