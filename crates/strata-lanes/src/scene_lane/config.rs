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

use strata_core::driver::{LoadMode, UnloadOptions};

/// Configuration for starting a load sequence over a bundle.
#[derive(Debug, Clone, Copy)]
pub struct LoadConfig {
    /// How the first stage inserts its scene into the running content set.
    /// Later stages always load additively; a bundle is one composed set.
    pub mode: LoadMode,
    /// Initial scheduling priority applied to every stage's operation.
    pub priority: i32,
    /// Initial state of the first-scene activation gate.
    pub allow_first_scene_activation: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            mode: LoadMode::Replace,
            priority: 0,
            allow_first_scene_activation: true,
        }
    }
}

/// Configuration for starting an unload sequence over a bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnloadConfig {
    /// Options forwarded to every stage's unload operation.
    pub options: UnloadOptions,
    /// Initial scheduling priority applied to every stage's operation.
    pub priority: i32,
}
