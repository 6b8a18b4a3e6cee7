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

//! Groups the data entities of the scene streaming system.
//!
//! This module defines the "common language" for everything that addresses a
//! scene: the persistent [`SceneKey`] identity, the [`BuildManifest`] that
//! resolves identities to positions in the deployed content set, the
//! [`SceneHandle`] that performs that resolution lazily, and the
//! [`BundleDescriptor`] that groups handles into an ordered load/unload unit.
//!
//! None of these types perform any I/O on their own; the actual asynchronous
//! work happens behind the [`crate::driver`] contracts, driven by the
//! sequencer in the lanes crate.

mod bundle;
mod error;
mod handle;
mod key;
mod manifest;

pub use bundle::*;
pub use error::*;
pub use handle::*;
pub use key::*;
pub use manifest::*;
