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

//! # Strata Core
//!
//! Foundational crate containing the scene identity model, the build manifest
//! read path, bundle descriptors, and the interface contracts consumed by the
//! streaming lanes.

#![warn(missing_docs)]

pub mod driver;
pub mod event;
pub mod scene;

pub use driver::{
    LoadMode, LoadTicket, SceneDriver, SceneRef, SceneTicket, UnloadOptions, UnloadTicket,
};
pub use event::{SceneEventBus, SceneStreamEvent, SequenceKind, SkipReason};
pub use scene::{
    BuildIndex, BuildManifest, BundleDescriptor, ManifestEntry, ManifestImage, SceneError,
    SceneHandle, SceneKey,
};
