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

use super::{LoadConfig, UnloadConfig};
use std::mem;
use std::sync::Arc;
use strata_core::driver::{LoadMode, LoadTicket, SceneDriver, SceneRef, UnloadOptions, UnloadTicket};
use strata_core::event::{SceneEventBus, SceneStreamEvent, SequenceKind, SkipReason};
use strata_core::scene::{BuildManifest, BundleDescriptor, SceneKey};

/// Fractional progress at which a held-back first scene counts as ready.
const FIRST_SCENE_READY_THRESHOLD: f32 = 0.9;

type StageCallback = Box<dyn FnMut(&SceneRef)>;
type CompletionCallback = Box<dyn FnOnce(&BundleSequencer)>;

/// The in-flight per-scene operation, tagged by direction.
enum Ticket {
    Load(Box<dyn LoadTicket>),
    Unload(Box<dyn UnloadTicket>),
}

impl Ticket {
    fn progress(&self) -> f32 {
        match self {
            Ticket::Load(ticket) => ticket.progress(),
            Ticket::Unload(ticket) => ticket.progress(),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Ticket::Load(ticket) => ticket.is_complete(),
            Ticket::Unload(ticket) => ticket.is_complete(),
        }
    }

    fn set_priority(&mut self, priority: i32) {
        match self {
            Ticket::Load(ticket) => ticket.set_priority(priority),
            Ticket::Unload(ticket) => ticket.set_priority(priority),
        }
    }

    fn scene(&self) -> SceneRef {
        match self {
            Ticket::Load(ticket) => ticket.scene(),
            Ticket::Unload(ticket) => ticket.scene(),
        }
    }
}

/// Per-direction state. The two directions share the cursor, progress,
/// priority, and completion machinery; only these few fields differ, so a
/// tagged union carries them instead of a polymorphic base.
#[derive(Clone, Copy)]
enum Variant {
    Load {
        mode: LoadMode,
        allow_first_activation: bool,
        first_scene_ready: bool,
    },
    Unload {
        options: UnloadOptions,
    },
}

/// The shared read-only collaborators of a running sequence.
struct StreamContext {
    manifest: Arc<BuildManifest>,
    driver: Arc<dyn SceneDriver>,
}

/// Drives one bundle through per-scene asynchronous operations, one stage at
/// a time, in descriptor order.
///
/// The sequencer is the single unified handle over the whole multi-stage
/// operation: it aggregates progress across stages, forwards priority to
/// whatever operation is currently in flight, and fires its completion
/// callbacks exactly once.
///
/// # Lifecycle
///
/// ```text
/// load()/unload()  →  [ advance() ]*  →  is_done() == true
/// ```
///
/// The host calls [`advance`](Self::advance) from its update loop. Between
/// calls the sequencer is idle; it performs no blocking waits and owns no
/// resources beyond the currently in-flight ticket, which the driver side
/// cleans up regardless of observer attention. There is deliberately no
/// cancellation surface: a caller abandons a sequence by ceasing to advance
/// it.
///
/// # Failure policy
///
/// Per-stage problems never abort a sequence. A stage whose scene is not in
/// the build manifest, or whose unload the last-scene guard refuses, is
/// skipped: the cursor advances immediately, no per-scene callback fires for
/// it, and the stage still contributes its full share of aggregate progress.
/// Even a sequence that skips every stage reaches the completed state, so
/// observing `is_done()` says nothing about whether content actually moved;
/// subscribe to the per-stage callbacks when that distinction matters.
pub struct BundleSequencer {
    descriptor: Arc<BundleDescriptor>,
    /// `None` only for [`BundleSequencer::completed`], which never starts a stage.
    ctx: Option<StreamContext>,
    variant: Variant,
    /// The stage currently being executed (or next to start), `0..=total`.
    cursor: usize,
    /// Stage count snapshotted at start.
    total: usize,
    /// Stages fully finished, completed and skipped alike.
    finished: usize,
    skipped: usize,
    in_flight: Option<Ticket>,
    done: bool,
    priority: i32,
    stage_callbacks: Vec<StageCallback>,
    completion_callbacks: Vec<CompletionCallback>,
    events: SceneEventBus,
}

impl BundleSequencer {
    /// Starts a load sequence over `descriptor`.
    ///
    /// The first stage's operation is started (or skipped) before this
    /// returns, with `config.priority` already applied. A zero-scene bundle
    /// completes immediately without touching the driver.
    pub fn load(
        descriptor: Arc<BundleDescriptor>,
        manifest: Arc<BuildManifest>,
        driver: Arc<dyn SceneDriver>,
        config: LoadConfig,
    ) -> Self {
        let mut sequence = Self::with_context(
            descriptor,
            Some(StreamContext { manifest, driver }),
            Variant::Load {
                mode: config.mode,
                allow_first_activation: config.allow_first_scene_activation,
                first_scene_ready: false,
            },
            config.priority,
        );
        sequence.advance();
        sequence
    }

    /// Starts an unload sequence over `descriptor`.
    ///
    /// Same shape as [`load`](Self::load), minus the activation gate. Every
    /// stage re-checks the last-scene guard against the driver's live count
    /// before starting its unload.
    pub fn unload(
        descriptor: Arc<BundleDescriptor>,
        manifest: Arc<BuildManifest>,
        driver: Arc<dyn SceneDriver>,
        config: UnloadConfig,
    ) -> Self {
        let mut sequence = Self::with_context(
            descriptor,
            Some(StreamContext { manifest, driver }),
            Variant::Unload {
                options: config.options,
            },
            config.priority,
        );
        sequence.advance();
        sequence
    }

    /// Creates a sequence that is already complete.
    ///
    /// For callers that always expect a handle back, even for trivial or
    /// empty bundles. The instance reports `is_done()`, full progress, and
    /// invokes completion callbacks on registration; it never touches any
    /// scene subsystem.
    pub fn completed(kind: SequenceKind) -> Self {
        let variant = match kind {
            SequenceKind::Load => Variant::Load {
                mode: LoadMode::default(),
                allow_first_activation: true,
                first_scene_ready: false,
            },
            SequenceKind::Unload => Variant::Unload {
                options: UnloadOptions::default(),
            },
        };
        let mut sequence = Self::with_context(
            Arc::new(BundleDescriptor::new(Vec::new())),
            None,
            variant,
            0,
        );
        sequence.advance();
        sequence
    }

    fn with_context(
        descriptor: Arc<BundleDescriptor>,
        ctx: Option<StreamContext>,
        variant: Variant,
        priority: i32,
    ) -> Self {
        let total = descriptor.len();
        Self {
            descriptor,
            ctx,
            variant,
            cursor: 0,
            total,
            finished: 0,
            skipped: 0,
            in_flight: None,
            done: false,
            priority,
            stage_callbacks: Vec::new(),
            completion_callbacks: Vec::new(),
            events: SceneEventBus::new(),
        }
    }

    /// Moves the sequence forward as far as it can go without waiting.
    ///
    /// Finishes the in-flight stage if its operation has completed, then
    /// starts (or skips) following stages until one is genuinely in flight
    /// or the sequence completes. Calling this on a completed sequence is a
    /// no-op.
    pub fn advance(&mut self) {
        loop {
            if self.done {
                break;
            }
            self.latch_first_scene_ready();
            match self.in_flight.take() {
                Some(ticket) => {
                    if ticket.is_complete() {
                        self.finish_stage(ticket);
                    } else {
                        self.in_flight = Some(ticket);
                        break;
                    }
                }
                None => {
                    if self.cursor >= self.total {
                        self.complete();
                        break;
                    }
                    self.start_or_skip_stage();
                }
            }
        }
    }

    /// Which direction this sequence moves its bundle.
    pub fn kind(&self) -> SequenceKind {
        match self.variant {
            Variant::Load { .. } => SequenceKind::Load,
            Variant::Unload { .. } => SequenceKind::Unload,
        }
    }

    /// The descriptor this sequence was started over.
    pub fn descriptor(&self) -> &BundleDescriptor {
        &self.descriptor
    }

    /// `true` once every stage has finished or been skipped.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Aggregate progress in `[0, 1]`, monotonically non-decreasing.
    ///
    /// Exactly `1.0` if and only if the sequence is done. While running,
    /// each stage contributes `1/N`, with the in-flight operation's own
    /// fraction counted pro rata.
    pub fn progress(&self) -> f32 {
        if self.done {
            return 1.0;
        }
        let fraction = self
            .in_flight
            .as_ref()
            .map_or(0.0, |ticket| ticket.progress().clamp(0.0, 1.0));
        (self.finished as f32 + fraction) / self.total as f32
    }

    /// The number of stages in the sequence.
    pub fn stage_count(&self) -> usize {
        self.total
    }

    /// How many stages were skipped rather than executed.
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// The current scheduling priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Re-prioritizes the sequence.
    ///
    /// Stored unconditionally, forwarded immediately to the in-flight
    /// operation if there is one, and applied to every stage started later.
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
        if let Some(ticket) = &mut self.in_flight {
            ticket.set_priority(priority);
        }
    }

    /// Whether the first loaded scene may activate as soon as it is ready.
    ///
    /// Always `true` for unload sequences, which have no activation gate.
    pub fn allow_first_scene_activation(&self) -> bool {
        match self.variant {
            Variant::Load {
                allow_first_activation,
                ..
            } => allow_first_activation,
            Variant::Unload { .. } => true,
        }
    }

    /// Opens or closes the first scene's activation gate.
    ///
    /// Forwarded to the in-flight operation while the cursor is still on the
    /// first stage. Lets a caller pre-buffer the first scene and flip
    /// activation at a controlled moment, e.g. in sync with a fade
    /// transition. Ignored for unload sequences.
    pub fn set_allow_first_scene_activation(&mut self, allow: bool) {
        let Variant::Load {
            allow_first_activation,
            ..
        } = &mut self.variant
        else {
            log::warn!("Activation gate is load-only; ignored for an unload sequence.");
            return;
        };
        *allow_first_activation = allow;
        if self.cursor == 0 {
            if let Some(Ticket::Load(ticket)) = &mut self.in_flight {
                ticket.set_allow_activation(allow);
            }
        }
    }

    /// `true` once the first stage has reached the "ready but not yet
    /// activated" threshold. Latches; stays `true` for the rest of the
    /// sequence's life. Always `false` for unload sequences.
    pub fn is_first_scene_ready(&self) -> bool {
        match self.variant {
            Variant::Load {
                first_scene_ready, ..
            } => {
                first_scene_ready
                    || (self.cursor == 0
                        && self.in_flight.as_ref().map_or(false, |ticket| {
                            ticket.progress() >= FIRST_SCENE_READY_THRESHOLD
                        }))
            }
            Variant::Unload { .. } => false,
        }
    }

    /// Registers a callback fired after each load stage finishes, with the
    /// concrete loaded scene. May be registered multiple times; every
    /// subscriber sees every non-skipped stage. Ignored on unload sequences.
    pub fn on_scene_loaded(&mut self, callback: impl FnMut(&SceneRef) + 'static) {
        match self.variant {
            Variant::Load { .. } => self.stage_callbacks.push(Box::new(callback)),
            Variant::Unload { .. } => {
                log::warn!("on_scene_loaded ignored for an unload sequence.");
            }
        }
    }

    /// Registers a callback fired after each unload stage finishes, with the
    /// concrete unloaded scene. Ignored on load sequences.
    pub fn on_scene_unloaded(&mut self, callback: impl FnMut(&SceneRef) + 'static) {
        match self.variant {
            Variant::Unload { .. } => self.stage_callbacks.push(Box::new(callback)),
            Variant::Load { .. } => {
                log::warn!("on_scene_unloaded ignored for a load sequence.");
            }
        }
    }

    /// Registers a callback fired exactly once when the sequence completes.
    ///
    /// By the time it runs, `is_done()` and full progress are already
    /// observable on the passed sequencer. Registering on an
    /// already-completed sequence invokes the callback immediately.
    pub fn on_completed(&mut self, callback: impl FnOnce(&BundleSequencer) + 'static) {
        if self.done {
            callback(&*self);
        } else {
            self.completion_callbacks.push(Box::new(callback));
        }
    }

    /// Returns a receiver for the sequence's diagnostic event stream.
    ///
    /// Events published before attachment are buffered, so skips that
    /// happened during construction are still observable.
    pub fn events(&self) -> flume::Receiver<SceneStreamEvent> {
        self.events.receiver()
    }

    fn latch_first_scene_ready(&mut self) {
        let Variant::Load {
            first_scene_ready: false,
            ..
        } = self.variant
        else {
            return;
        };
        let ready = self.cursor == 0
            && self.in_flight.as_ref().map_or(false, |ticket| {
                ticket.progress() >= FIRST_SCENE_READY_THRESHOLD
            });
        if ready {
            if let Variant::Load {
                first_scene_ready, ..
            } = &mut self.variant
            {
                *first_scene_ready = true;
            }
        }
    }

    /// Starts the cursor's stage, or skips it when it cannot start.
    ///
    /// Only called while `cursor < total`, which implies a context is
    /// present; the defensive arm below keeps the advance loop terminating
    /// even if that invariant were ever broken.
    fn start_or_skip_stage(&mut self) {
        let (manifest, driver) = match &self.ctx {
            Some(ctx) => (Arc::clone(&ctx.manifest), Arc::clone(&ctx.driver)),
            None => {
                self.complete();
                return;
            }
        };
        let descriptor = Arc::clone(&self.descriptor);
        let Some(handle) = descriptor.get(self.cursor) else {
            self.complete();
            return;
        };
        let key = handle.key().clone();

        match self.variant {
            Variant::Load {
                mode,
                allow_first_activation,
                ..
            } => {
                // The configured mode only applies to the stage that opens
                // the bundle; everything after stacks additively.
                let stage_mode = if self.cursor == 0 {
                    mode
                } else {
                    LoadMode::Additive
                };
                match handle.begin_load(&manifest, driver.as_ref(), stage_mode) {
                    Ok(mut ticket) => {
                        ticket.set_priority(self.priority);
                        if self.cursor == 0 {
                            ticket.set_allow_activation(allow_first_activation);
                        }
                        self.in_flight = Some(Ticket::Load(ticket));
                    }
                    Err(err) => {
                        log::warn!(
                            "Skipping load stage {}/{}: {err}",
                            self.cursor + 1,
                            self.total
                        );
                        self.skip_stage(key, SkipReason::UnresolvedIdentity);
                    }
                }
            }
            Variant::Unload { options } => {
                if driver.loaded_count() <= 1 {
                    log::debug!(
                        "Skipping unload stage {}/{} for scene '{key}': \
                         refusing to unload the last loaded scene.",
                        self.cursor + 1,
                        self.total
                    );
                    self.skip_stage(key, SkipReason::LastLoadedScene);
                    return;
                }
                match handle.begin_unload(&manifest, driver.as_ref(), options) {
                    Ok(mut ticket) => {
                        ticket.set_priority(self.priority);
                        self.in_flight = Some(Ticket::Unload(ticket));
                    }
                    Err(err) => {
                        log::warn!(
                            "Skipping unload stage {}/{}: {err}",
                            self.cursor + 1,
                            self.total
                        );
                        self.skip_stage(key, SkipReason::UnresolvedIdentity);
                    }
                }
            }
        }
    }

    /// Retires a completed ticket: activates the primary scene when due,
    /// fires the per-stage callbacks, then moves the cursor. Runs strictly
    /// before the next stage's operation is started.
    fn finish_stage(&mut self, ticket: Ticket) {
        let scene = ticket.scene();

        if matches!(self.variant, Variant::Load { .. })
            && self.descriptor.primary_index() == Some(self.cursor)
        {
            if let Some(ctx) = &self.ctx {
                ctx.driver.set_active(&scene);
                log::debug!("Scene '{}' set active.", scene.key);
            }
        }

        for callback in self.stage_callbacks.iter_mut() {
            callback(&scene);
        }

        let event = match self.variant {
            Variant::Load { .. } => SceneStreamEvent::StageLoaded(scene.clone()),
            Variant::Unload { .. } => SceneStreamEvent::StageUnloaded(scene.clone()),
        };
        self.events.publish(event);
        log::debug!(
            "Stage {}/{} finished for scene '{}'.",
            self.cursor + 1,
            self.total,
            scene.key
        );

        self.cursor += 1;
        self.finished += 1;
    }

    /// Retires a stage that never started. The skip still counts as a full
    /// stage towards aggregate progress; no per-stage callback fires.
    fn skip_stage(&mut self, key: SceneKey, reason: SkipReason) {
        self.events
            .publish(SceneStreamEvent::StageSkipped { key, reason });
        self.cursor += 1;
        self.finished += 1;
        self.skipped += 1;
    }

    fn complete(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        self.events.publish(SceneStreamEvent::SequenceCompleted {
            kind: self.kind(),
            stages_total: self.total,
            stages_skipped: self.skipped,
        });
        log::debug!(
            "{} sequence completed: {} stages, {} skipped.",
            self.kind(),
            self.total,
            self.skipped
        );
        for callback in mem::take(&mut self.completion_callbacks) {
            callback(&*self);
        }
    }
}
