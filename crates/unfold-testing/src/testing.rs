use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use unfold_animation::{
    CollapseConfig, CollapsePhase, CollapseTransition, Props, PropsInput, TransitionEvent,
};
use unfold_core::{DefaultScheduler, Runtime, RuntimeHandle, FRAME_NANOS_60FPS};
use unfold_ui_layout::Surface;
use unfold_ui_style::Style;

use crate::surface::TestSurface;

pub const DEFAULT_CONTENT_HEIGHT: u32 = 200;
pub const DEFAULT_CONTENT_WIDTH: u32 = 320;

/// Upper bound for [`CollapseTestRule::run_until_settled`].
pub const MAX_SETTLE_FRAMES: usize = 600;

/// Headless harness for exercising a [`CollapseTransition`] in tests.
///
/// `CollapseTestRule` owns a runtime whose frames it steps by hand, a
/// [`TestSurface`] mounted through the transition's props, and counters for
/// completions and flushed commits. Each flushed snapshot is applied to the
/// surface right away, the way a host re-renders on commit.
pub struct CollapseTestRule {
    runtime: Runtime,
    surface: Rc<TestSurface>,
    transition: CollapseTransition,
    props: Props,
    frame: u64,
    completions: Rc<Cell<usize>>,
    commits: Rc<RefCell<Vec<Style>>>,
}

impl CollapseTestRule {
    /// Creates a rule with a mounted surface of the default content size.
    pub fn new(opened: bool, config: CollapseConfig) -> Self {
        Self::with_content(opened, config, DEFAULT_CONTENT_HEIGHT, DEFAULT_CONTENT_WIDTH)
    }

    pub fn with_content(
        opened: bool,
        config: CollapseConfig,
        content_height: u32,
        content_width: u32,
    ) -> Self {
        Self::with_props(opened, config, content_height, content_width, PropsInput::new())
    }

    /// Like [`CollapseTestRule::with_content`], binding the surface through
    /// props built from `input`.
    pub fn with_props(
        opened: bool,
        config: CollapseConfig,
        content_height: u32,
        content_width: u32,
        input: PropsInput,
    ) -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let surface = Rc::new(TestSurface::new(content_height, content_width));
        let completions = Rc::new(Cell::new(0));
        let commits = Rc::new(RefCell::new(Vec::new()));
        let transition = {
            let surface = Rc::clone(&surface);
            let commits = Rc::clone(&commits);
            let completions = Rc::clone(&completions);
            CollapseTransition::new(opened, config, runtime.handle())
                .with_flush_hook(move |style| {
                    commits.borrow_mut().push(style.clone());
                    surface.apply_style(style);
                })
                .on_transition_end(move || completions.set(completions.get() + 1))
        };
        surface.apply_style(&transition.style());
        let props = transition.props(input);

        let rule = Self {
            runtime,
            surface,
            transition,
            props,
            frame: 0,
            completions,
            commits,
        };
        rule.mount();
        rule
    }

    /// Binds the surface through the composed ref.
    pub fn mount(&self) {
        let surface: Rc<dyn Surface> = self.surface.clone();
        self.props.bind_surface(Some(&surface));
    }

    pub fn unmount(&self) {
        self.props.bind_surface(None);
    }

    pub fn set_opened(&mut self, opened: bool) {
        self.transition.set_opened(opened);
    }

    pub fn toggle(&mut self) {
        let opened = self.transition.opened();
        self.set_opened(!opened);
    }

    /// Runs one 60 FPS frame, then delivers every transition that finished
    /// by the new frame time. Returns the number of events delivered.
    pub fn advance_frame(&mut self) -> usize {
        self.frame += 1;
        let frame_time_nanos = self.frame * FRAME_NANOS_60FPS;
        let now_millis = frame_time_nanos / 1_000_000;
        self.surface.set_now_millis(now_millis);
        self.runtime.handle().run_frame(frame_time_nanos);

        let events = self.surface.advance(now_millis);
        for event in &events {
            self.dispatch(event);
        }
        events.len()
    }

    pub fn advance_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Steps frames until the transition rests in `Open` or `Closed` with
    /// nothing scheduled. Returns the number of frames it took.
    pub fn run_until_settled(&mut self) -> usize {
        for frames in 0..MAX_SETTLE_FRAMES {
            if self.is_settled() {
                return frames;
            }
            self.advance_frame();
        }
        panic!(
            "transition did not settle within {MAX_SETTLE_FRAMES} frames: {:?}",
            self.transition
        );
    }

    pub fn is_settled(&self) -> bool {
        self.transition.phase().is_settled()
            && !self.runtime.needs_frame()
            && !self.surface.is_transitioning()
    }

    /// Delivers `event` through the bound props, as the host would.
    pub fn dispatch(&self, event: &TransitionEvent) {
        self.props.dispatch_transition_end(event);
    }

    /// Finishes running surface transitions immediately and delivers their
    /// events. Without a running transition, delivers a synthetic end event
    /// for the axis property.
    pub fn finish_transition(&mut self) {
        let events = self.surface.finish_transitions();
        if events.is_empty() {
            let property = self.transition.axis().property_name();
            self.dispatch(&TransitionEvent::new(self.surface.id(), property));
        }
        for event in &events {
            self.dispatch(event);
        }
    }

    pub fn transition(&self) -> &CollapseTransition {
        &self.transition
    }

    pub fn surface(&self) -> &TestSurface {
        &self.surface
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn style(&self) -> Style {
        self.transition.style()
    }

    pub fn phase(&self) -> CollapsePhase {
        self.transition.phase()
    }

    pub fn completions(&self) -> usize {
        self.completions.get()
    }

    /// Every snapshot flushed so far, oldest first.
    pub fn commits(&self) -> Vec<Style> {
        self.commits.borrow().clone()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Convenience helper for tests that only need temporary access to a
/// `CollapseTestRule`.
pub fn run_collapse_test<R>(
    opened: bool,
    config: CollapseConfig,
    f: impl FnOnce(&mut CollapseTestRule) -> R,
) -> R {
    let mut rule = CollapseTestRule::new(opened, config);
    f(&mut rule)
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
