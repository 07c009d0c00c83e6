//! The open/close state machine.
//!
//! A toggle never touches the style in the frame it happens in. It launches
//! a two-frame sequence on the runtime instead:
//!
//! * opening: reveal (`display: block`, clipped, `will-change`), then
//!   measure and commit the measured size with a transition declaration;
//! * closing: measure and pin the current size, then commit the collapsed
//!   size.
//!
//! Every commit goes through the flush hook before the next frame is
//! awaited, so the host renders each intermediate style on its own. The
//! sequence is over when the surface reports the size transition ended, or
//! right after the last commit when that commit animates nothing.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use unfold_core::{FrameClock, RuntimeHandle, TaskHandle};
use unfold_ui_layout::{measure, Axis, SurfaceRef};
use unfold_ui_style::{Style, StyleProperty, StyleValue};

use crate::config::CollapseConfig;
use crate::event::TransitionEvent;
use crate::timing::TimingConfig;

/// Axis size of a collapsed surface.
pub const COLLAPSED_SIZE: u32 = 0;

/// Receives every committed style snapshot, synchronously.
pub type FlushHook = Rc<dyn Fn(&Style)>;

/// Fired once per settled open or close.
pub type CompletionCallback = Rc<dyn Fn()>;

/// Handler a surface invokes for each transition-end event.
pub type TransitionEndHandler = Rc<dyn Fn(&TransitionEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapsePhase {
    Closed,
    Opening,
    Open,
    Closing,
}

impl CollapsePhase {
    pub fn is_settled(self) -> bool {
        matches!(self, CollapsePhase::Closed | CollapsePhase::Open)
    }
}

/// Style of a fully collapsed surface: hidden, clipped, zero-sized.
pub fn collapsed_style(axis: Axis) -> Style {
    Style::new()
        .with(StyleProperty::Display, StyleValue::keyword("none"))
        .with(axis.style_property(), COLLAPSED_SIZE)
        .with(StyleProperty::Overflow, StyleValue::keyword("hidden"))
}

enum Commit {
    Merge(Style),
    Replace(Style),
}

struct Settle {
    commit: Commit,
    phase: CollapsePhase,
    complete: bool,
}

struct CollapseInner {
    runtime: RuntimeHandle,
    config: CollapseConfig,
    axis: Axis,
    opened: bool,
    phase: CollapsePhase,
    style: Style,
    surface: SurfaceRef,
    // Bumped on every toggle; frame steps of older sequences see a mismatch.
    sequence: u64,
    // Both frame steps of the current sequence have been committed.
    awaiting_end: bool,
    task: Option<TaskHandle>,
    flush: Option<FlushHook>,
    on_transition_end: Option<CompletionCallback>,
}

impl CollapseInner {
    fn reveal_patch(&self) -> Style {
        Style::new()
            .with(
                StyleProperty::WillChange,
                StyleValue::keyword(self.axis.property_name()),
            )
            .with(StyleProperty::Display, StyleValue::keyword("block"))
            .with(StyleProperty::Overflow, StyleValue::keyword("hidden"))
    }

    fn expand_patch(&self) -> Style {
        let extent = measure(self.axis, &self.surface);
        let timing = TimingConfig::resolve(&self.config, extent);
        log::debug!(
            "expanding to {extent} over {}ms",
            timing.duration_millis
        );
        Style::new()
            .with(StyleProperty::Transition, timing.declaration(self.axis))
            .with(self.axis.style_property(), extent.to_style_value())
    }

    fn freeze_patch(&self) -> Style {
        let extent = measure(self.axis, &self.surface);
        let timing = TimingConfig::resolve(&self.config, extent);
        log::debug!(
            "collapsing from {extent} over {}ms",
            timing.duration_millis
        );
        Style::new()
            .with(StyleProperty::Transition, timing.declaration(self.axis))
            .with(
                StyleProperty::WillChange,
                StyleValue::keyword(self.axis.property_name()),
            )
            .with(self.axis.style_property(), extent.to_style_value())
    }

    fn shrink_patch(&self) -> Style {
        Style::new()
            .with(self.axis.style_property(), COLLAPSED_SIZE)
            .with(StyleProperty::Overflow, StyleValue::keyword("hidden"))
    }

    /// Whether merging `patch` starts a visible size transition.
    fn animates(&self, patch: &Style) -> bool {
        let property = self.axis.style_property();
        // Hosts only animate between two pixel values on a visible box.
        if self.style.is_hidden() {
            return false;
        }
        let Some(current @ StyleValue::Px(_)) = self.style.get(&property) else {
            return false;
        };
        let Some(target) = patch.get(&property) else {
            return false;
        };
        if current == target {
            return false;
        }
        patch
            .get(&StyleProperty::Transition)
            .or_else(|| self.style.get(&StyleProperty::Transition))
            .and_then(StyleValue::as_transition)
            .is_some_and(|decl| !decl.is_instant())
    }

    fn settle(&self) -> Option<Settle> {
        if !self.awaiting_end {
            return None;
        }
        let property = self.axis.style_property();
        match (self.opened, self.phase) {
            (true, CollapsePhase::Opening) => {
                let extent = measure(self.axis, &self.surface);
                if extent.matches(self.style.get(&property)) {
                    // Drop the pinned size so the surface follows its content again.
                    Some(Settle {
                        commit: Commit::Replace(Style::new()),
                        phase: CollapsePhase::Open,
                        complete: true,
                    })
                } else {
                    log::debug!("content reflowed mid-expansion; retargeting to {extent}");
                    Some(Settle {
                        commit: Commit::Merge(
                            Style::new().with(property, extent.to_style_value()),
                        ),
                        phase: CollapsePhase::Opening,
                        complete: false,
                    })
                }
            }
            (false, CollapsePhase::Closing)
                if self.style.get(&property) == Some(&StyleValue::Px(COLLAPSED_SIZE)) =>
            {
                Some(Settle {
                    commit: Commit::Replace(collapsed_style(self.axis)),
                    phase: CollapsePhase::Closed,
                    complete: true,
                })
            }
            _ => None,
        }
    }
}

impl Drop for CollapseInner {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }
}

/// Drives expand/collapse transitions for one surface along one axis.
///
/// Cloning yields another handle to the same state machine.
#[derive(Clone)]
pub struct CollapseTransition {
    inner: Rc<RefCell<CollapseInner>>,
}

impl CollapseTransition {
    /// Creates the state machine settled in its initial state. Nothing is
    /// scheduled until the flag changes.
    pub fn new(opened: bool, config: CollapseConfig, runtime: RuntimeHandle) -> Self {
        let axis = config.axis();
        let (phase, style) = if opened {
            (CollapsePhase::Open, Style::new())
        } else {
            (CollapsePhase::Closed, collapsed_style(axis))
        };
        let inner = CollapseInner {
            runtime,
            config,
            axis,
            opened,
            phase,
            style,
            surface: SurfaceRef::new(),
            sequence: 0,
            awaiting_end: false,
            task: None,
            flush: None,
            on_transition_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Installs the hook that makes each commit visible to the host before
    /// the sequence moves on.
    pub fn with_flush_hook(self, hook: impl Fn(&Style) + 'static) -> Self {
        self.inner.borrow_mut().flush = Some(Rc::new(hook));
        self
    }

    pub fn on_transition_end(self, callback: impl Fn() + 'static) -> Self {
        self.inner.borrow_mut().on_transition_end = Some(Rc::new(callback));
        self
    }

    pub fn opened(&self) -> bool {
        self.inner.borrow().opened
    }

    pub fn phase(&self) -> CollapsePhase {
        self.inner.borrow().phase
    }

    pub fn axis(&self) -> Axis {
        self.inner.borrow().axis
    }

    pub fn config(&self) -> CollapseConfig {
        self.inner.borrow().config
    }

    /// The currently committed style snapshot.
    pub fn style(&self) -> Style {
        self.inner.borrow().style.clone()
    }

    /// Slot the measured surface is bound to.
    pub fn surface_ref(&self) -> SurfaceRef {
        self.inner.borrow().surface.clone()
    }

    /// Feeds the `opened` flag. Only a change starts a sequence; a change
    /// while a sequence is in flight abandons it and starts over from the
    /// committed style.
    pub fn set_opened(&self, opened: bool) {
        let (runtime, sequence, previous) = {
            let mut inner = self.inner.borrow_mut();
            if inner.opened == opened {
                return;
            }
            inner.opened = opened;
            inner.phase = if opened {
                CollapsePhase::Opening
            } else {
                CollapsePhase::Closing
            };
            inner.sequence += 1;
            inner.awaiting_end = false;
            (inner.runtime.clone(), inner.sequence, inner.task.take())
        };
        if let Some(task) = previous {
            task.cancel();
        }
        log::debug!(
            "collapse sequence {sequence}: {}",
            if opened { "opening" } else { "closing" }
        );

        let weak = Rc::downgrade(&self.inner);
        let clock = runtime.frame_clock();
        let task = if opened {
            runtime.spawn_ui(Self::open_sequence(weak, clock, sequence))
        } else {
            runtime.spawn_ui(Self::close_sequence(weak, clock, sequence))
        };
        if task.is_none() {
            log::warn!("runtime is gone; collapse sequence {sequence} not scheduled");
        }
        self.inner.borrow_mut().task = task;
    }

    /// Advances the state machine on a transition-end event. Events from
    /// other surfaces or other properties are ignored, as are duplicates.
    pub fn handle_transition_end(&self, event: &TransitionEvent) {
        Self::on_transition_end_event(&self.inner, event);
    }

    /// Handler bound into surface props; holds the state machine weakly.
    pub(crate) fn transition_end_handler(&self) -> TransitionEndHandler {
        let weak = Rc::downgrade(&self.inner);
        Rc::new(move |event: &TransitionEvent| {
            if let Some(inner) = weak.upgrade() {
                Self::on_transition_end_event(&inner, event);
            }
        })
    }

    async fn open_sequence(this: Weak<RefCell<CollapseInner>>, clock: FrameClock, sequence: u64) {
        clock.next_frame().await;
        if !Self::step(&this, sequence, CollapseInner::reveal_patch, false) {
            return;
        }
        clock.next_frame().await;
        Self::step(&this, sequence, CollapseInner::expand_patch, true);
    }

    async fn close_sequence(this: Weak<RefCell<CollapseInner>>, clock: FrameClock, sequence: u64) {
        clock.next_frame().await;
        if !Self::step(&this, sequence, CollapseInner::freeze_patch, false) {
            return;
        }
        clock.next_frame().await;
        Self::step(&this, sequence, CollapseInner::shrink_patch, true);
    }

    /// Commits one frame step if `sequence` is still the live one.
    fn step(
        this: &Weak<RefCell<CollapseInner>>,
        sequence: u64,
        patch: fn(&CollapseInner) -> Style,
        last: bool,
    ) -> bool {
        let Some(this) = this.upgrade() else {
            return false;
        };
        let (patch, animates) = {
            let inner = this.borrow();
            if inner.sequence != sequence {
                log::trace!(
                    "dropping frame step of stale sequence {sequence} (live: {})",
                    inner.sequence
                );
                return false;
            }
            let patch = patch(&inner);
            let animates = inner.animates(&patch);
            (patch, animates)
        };
        Self::commit(&this, Commit::Merge(patch));
        {
            let mut inner = this.borrow_mut();
            // The flush hook may have toggled again.
            if inner.sequence != sequence {
                return false;
            }
            if !last {
                return true;
            }
            inner.awaiting_end = true;
            inner.task = None;
        }
        if !animates {
            // No transition runs, so no end event will arrive.
            log::debug!("sequence {sequence} has nothing to animate; settling now");
            Self::apply_settle(&this);
        }
        true
    }

    fn commit(this: &Rc<RefCell<CollapseInner>>, commit: Commit) {
        let (snapshot, flush) = {
            let mut inner = this.borrow_mut();
            match commit {
                Commit::Merge(patch) => inner.style.merge(&patch),
                Commit::Replace(style) => inner.style = style,
            }
            log::debug!("commit ({:?}): {}", inner.phase, inner.style);
            (inner.style.clone(), inner.flush.clone())
        };
        if let Some(flush) = flush {
            flush(&snapshot);
        }
    }

    fn on_transition_end_event(this: &Rc<RefCell<CollapseInner>>, event: &TransitionEvent) {
        {
            let inner = this.borrow();
            if inner.surface.id() != Some(event.target) {
                log::trace!("ignoring transition end from foreign target {}", event.target);
                return;
            }
            if event.property_name != inner.axis.property_name() {
                log::trace!("ignoring transition end for `{}`", event.property_name);
                return;
            }
        }
        Self::apply_settle(this);
    }

    fn apply_settle(this: &Rc<RefCell<CollapseInner>>) {
        let settle = this.borrow().settle();
        let Some(settle) = settle else {
            log::trace!("transition end with nothing to settle");
            return;
        };

        let callback = {
            let mut inner = this.borrow_mut();
            inner.phase = settle.phase;
            if settle.complete {
                inner.awaiting_end = false;
                inner.on_transition_end.clone()
            } else {
                None
            }
        };
        Self::commit(this, settle.commit);
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl fmt::Debug for CollapseTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("CollapseTransition")
            .field("axis", &inner.axis)
            .field("opened", &inner.opened)
            .field("phase", &inner.phase)
            .field("style", &inner.style)
            .field("surface", &inner.surface)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/collapse_tests.rs"]
mod tests;
