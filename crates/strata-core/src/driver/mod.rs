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

//! Defines the abstract contract for the external scene subsystem.
//!
//! The core of this module is the [`SceneDriver`] trait, which provides a
//! unified interface over whatever engine facility actually loads and unloads
//! scene content. The streaming lanes never talk to the engine directly: they
//! start per-scene operations through a driver and observe them through the
//! [`SceneTicket`] handles it returns.
//!
//! The model is single-threaded and cooperative. A ticket is never waited on;
//! the owning sequencer polls [`SceneTicket::is_complete`] from its own
//! `advance()` call and the driver completes work on the same execution
//! context. Tickets are owned by the driver side regardless of observer
//! attention, so abandoning a ticket leaks nothing.

use crate::scene::{BuildIndex, SceneKey};

/// How a load inserts its scene into the running content set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Tear down the current content set and make this scene the new root.
    Replace,
    /// Add the scene on top of whatever is currently loaded.
    #[default]
    Additive,
}

/// Options for a single-scene unload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnloadOptions {
    /// Also release assets that became unreferenced by the unload.
    pub release_unused_assets: bool,
}

/// A concrete reference to a scene as known to the driver.
///
/// This is the value handed to per-stage callbacks and to
/// [`SceneDriver::set_active`]: the identity plus the build index it resolved
/// to for the current manifest generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRef {
    /// The persistent identity of the scene.
    pub key: SceneKey,
    /// The scene's resolved position in the deployed set.
    pub index: BuildIndex,
}

/// Common surface of one in-flight per-scene asynchronous operation.
pub trait SceneTicket {
    /// Fractional progress of the operation in `[0, 1]`.
    fn progress(&self) -> f32;

    /// `true` once the operation has fully finished.
    fn is_complete(&self) -> bool;

    /// The current scheduling priority of the operation.
    fn priority(&self) -> i32;

    /// Re-prioritizes the in-flight operation.
    fn set_priority(&mut self, priority: i32);

    /// The scene this operation is acting on.
    fn scene(&self) -> SceneRef;
}

/// An in-flight single-scene load with a controllable activation gate.
///
/// While the gate is closed the driver may pre-buffer the scene up to a
/// "ready but not yet activated" threshold without completing; opening the
/// gate lets the load finish. This is how callers synchronize scene
/// activation with, for example, a fade transition.
pub trait LoadTicket: SceneTicket {
    /// Whether the loaded scene may activate as soon as it is ready.
    fn allow_activation(&self) -> bool;

    /// Opens or closes the activation gate.
    fn set_allow_activation(&mut self, allow: bool);
}

/// An in-flight single-scene unload.
pub trait UnloadTicket: SceneTicket {}

/// The contract implemented by the engine facility that owns scene content.
///
/// Drivers are engine services: shared via `Arc`, callable from wherever the
/// streaming code runs, hence the `Send + Sync` bound. Starting an operation
/// must not block; the returned ticket is the only observation surface.
pub trait SceneDriver: Send + Sync {
    /// Starts an asynchronous load of one scene.
    fn begin_load(&self, scene: &SceneRef, mode: LoadMode) -> Box<dyn LoadTicket>;

    /// Starts an asynchronous unload of one scene.
    fn begin_unload(&self, scene: &SceneRef, options: UnloadOptions) -> Box<dyn UnloadTicket>;

    /// Makes the given scene the active/focused one.
    fn set_active(&self, scene: &SceneRef);

    /// The number of scenes currently loaded, as the engine reports it.
    ///
    /// Re-queried before every unload stage: other actors may load or unload
    /// scenes concurrently with a running sequence.
    fn loaded_count(&self) -> usize;
}
