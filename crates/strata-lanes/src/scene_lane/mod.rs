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

//! The scene streaming lane: sequencing bundles of scenes in and out.
//!
//! A [`BundleSequencer`] consumes a read-only
//! [`BundleDescriptor`](strata_core::scene::BundleDescriptor) and drives its
//! scenes through per-scene asynchronous operations, strictly one at a time,
//! behind a single handle that aggregates progress and fires completion
//! callbacks exactly once.
//!
//! The lane is cooperative: nothing happens between calls to
//! [`BundleSequencer::advance`], which the host invokes from its own update
//! loop. Chained completion callbacks are deliberately replaced by this
//! single poll/advance state machine, which makes the "never two operations
//! in flight" invariant structural instead of conventional.

mod config;
mod sequencer;

pub use config::*;
pub use sequencer::*;
