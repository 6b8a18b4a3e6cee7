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

//! Diagnostic event stream for scene streaming operations.
//!
//! Sequences report what they did (stages finished, stages skipped, the
//! whole sequence completed) over a channel that observers may or may not
//! drain. The stream is strictly a side channel: publishing is best-effort
//! and never affects sequencing control flow.

use crate::driver::SceneRef;
use crate::scene::SceneKey;

/// Which direction a sequence moves its bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// The sequence loads its bundle's scenes.
    Load,
    /// The sequence unloads its bundle's scenes.
    Unload,
}

impl std::fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceKind::Load => write!(f, "Load"),
            SequenceKind::Unload => write!(f, "Unload"),
        }
    }
}

/// Why a stage was skipped rather than executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The scene identity is not present in the build manifest.
    UnresolvedIdentity,
    /// Refused to unload the sole remaining loaded scene.
    LastLoadedScene,
}

/// A diagnostic event emitted by a streaming sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneStreamEvent {
    /// A load stage finished and its scene is live.
    StageLoaded(SceneRef),
    /// An unload stage finished and its scene is gone.
    StageUnloaded(SceneRef),
    /// A stage was skipped without touching the scene subsystem.
    StageSkipped {
        /// The identity of the skipped stage's scene.
        key: SceneKey,
        /// Why the stage did not run.
        reason: SkipReason,
    },
    /// The whole sequence reached its completed state.
    SequenceCompleted {
        /// The direction of the finished sequence.
        kind: SequenceKind,
        /// How many stages the sequence had in total.
        stages_total: usize,
        /// How many of them were skipped.
        stages_skipped: usize,
    },
}

/// A thread-safe channel for [`SceneStreamEvent`] values.
///
/// The bus owns both ends of the channel, so publishing while nobody is
/// listening simply buffers the events; attaching a receiver later still
/// observes everything a sequence reported since construction.
#[derive(Debug)]
pub struct SceneEventBus {
    sender: flume::Sender<SceneStreamEvent>,
    receiver: flume::Receiver<SceneStreamEvent>,
}

impl SceneEventBus {
    /// Creates a new bus with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Publishes an event, best-effort.
    ///
    /// Failure to deliver is logged at trace level only: this stream is a
    /// diagnostic side channel and must never affect control flow.
    pub fn publish(&self, event: SceneStreamEvent) {
        if let Err(e) = self.sender.send(event) {
            log::trace!("Dropped scene stream event: {e}.");
        }
    }

    /// Returns a clone of the sender end of the channel.
    pub fn sender(&self) -> flume::Sender<SceneStreamEvent> {
        self.sender.clone()
    }

    /// Returns a receiver for the stream.
    ///
    /// Receivers compete for events; attach a single diagnostic consumer.
    pub fn receiver(&self) -> flume::Receiver<SceneStreamEvent> {
        self.receiver.clone()
    }
}

impl Default for SceneEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::BuildIndex;

    #[test]
    fn buffered_events_survive_until_a_receiver_attaches() {
        let bus = SceneEventBus::new();
        bus.publish(SceneStreamEvent::StageSkipped {
            key: SceneKey::new("workshop"),
            reason: SkipReason::UnresolvedIdentity,
        });
        bus.publish(SceneStreamEvent::SequenceCompleted {
            kind: SequenceKind::Load,
            stages_total: 1,
            stages_skipped: 1,
        });

        let receiver = bus.receiver();
        assert_eq!(
            receiver.try_recv().unwrap(),
            SceneStreamEvent::StageSkipped {
                key: SceneKey::new("workshop"),
                reason: SkipReason::UnresolvedIdentity,
            }
        );
        assert!(matches!(
            receiver.try_recv().unwrap(),
            SceneStreamEvent::SequenceCompleted { stages_total: 1, .. }
        ));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn stage_events_carry_the_concrete_scene() {
        let bus = SceneEventBus::new();
        let scene = SceneRef {
            key: SceneKey::new("hub"),
            index: BuildIndex(3),
        };
        bus.publish(SceneStreamEvent::StageLoaded(scene.clone()));
        assert_eq!(
            bus.receiver().try_recv().unwrap(),
            SceneStreamEvent::StageLoaded(scene)
        );
    }
}
