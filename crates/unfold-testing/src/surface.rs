//! A headless stand-in for a rendered box.
//!
//! [`TestSurface`] applies committed styles the way a browser-like host
//! would: a change of the size property between two pixel values runs a
//! transition when a matching non-zero `transition` declaration is present,
//! anything else snaps. Finished transitions surface as
//! [`TransitionEvent`]s from [`TestSurface::advance`].

use std::cell::{Cell, RefCell};

use unfold_animation::TransitionEvent;
use unfold_ui_layout::{Axis, Surface, SurfaceId};
use unfold_ui_style::{Style, StyleProperty, StyleValue, TimingFunction, TransitionDecl};

/// A size transition running on a [`TestSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTransition {
    pub axis: Axis,
    pub from: f32,
    pub to: u32,
    pub start_millis: u64,
    pub duration_millis: u64,
    pub timing_function: TimingFunction,
}

impl ActiveTransition {
    pub fn end_millis(&self) -> u64 {
        self.start_millis + self.duration_millis
    }

    pub fn value_at(&self, now_millis: u64) -> f32 {
        let elapsed = now_millis.saturating_sub(self.start_millis) as f32;
        let fraction = (elapsed / self.duration_millis as f32).clamp(0.0, 1.0);
        let eased = self.timing_function.transform(fraction);
        self.from + (self.to as f32 - self.from) * eased
    }
}

pub struct TestSurface {
    id: SurfaceId,
    content_height: Cell<u32>,
    content_width: Cell<u32>,
    style: RefCell<Style>,
    now_millis: Cell<u64>,
    transitions: RefCell<Vec<ActiveTransition>>,
}

impl TestSurface {
    pub fn new(content_height: u32, content_width: u32) -> Self {
        Self {
            id: SurfaceId::next(),
            content_height: Cell::new(content_height),
            content_width: Cell::new(content_width),
            style: RefCell::new(Style::new()),
            now_millis: Cell::new(0),
            transitions: RefCell::new(Vec::new()),
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Natural size of the content along `axis`.
    pub fn content_extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Vertical => self.content_height.get(),
            Axis::Horizontal => self.content_width.get(),
        }
    }

    /// Simulates a reflow of the content. Running transitions keep their
    /// target.
    pub fn set_content_extent(&self, axis: Axis, px: u32) {
        match axis {
            Axis::Vertical => self.content_height.set(px),
            Axis::Horizontal => self.content_width.set(px),
        }
    }

    /// The last applied style.
    pub fn style(&self) -> Style {
        self.style.borrow().clone()
    }

    pub fn is_hidden(&self) -> bool {
        self.style.borrow().is_hidden()
    }

    pub fn now_millis(&self) -> u64 {
        self.now_millis.get()
    }

    /// Moves the surface clock without finishing anything.
    pub fn set_now_millis(&self, now_millis: u64) {
        self.now_millis.set(now_millis);
    }

    /// Renders `style`, starting or cancelling size transitions.
    pub fn apply_style(&self, style: &Style) {
        let previous = self.style.replace(style.clone());
        if style.is_hidden() {
            let cancelled = std::mem::take(&mut *self.transitions.borrow_mut());
            if !cancelled.is_empty() {
                log::trace!("{}: hidden, cancelling {} transition(s)", self.id, cancelled.len());
            }
            return;
        }

        let now = self.now_millis.get();
        for axis in [Axis::Vertical, Axis::Horizontal] {
            let property = axis.style_property();
            let before = previous.get(&property);
            let after = style.get(&property);
            if before == after {
                continue;
            }
            let from = self.rendered_value(&previous, axis);
            self.transitions
                .borrow_mut()
                .retain(|transition| transition.axis != axis);

            let decl = transition_for(style, &property);
            let animatable = !previous.is_hidden() && matches!(before, Some(StyleValue::Px(_)));
            match (after, decl) {
                (Some(StyleValue::Px(to)), Some(decl)) if animatable && from != *to as f32 => {
                    log::trace!(
                        "{}: {} {from} -> {to} over {}ms",
                        self.id,
                        property,
                        decl.duration_millis
                    );
                    self.transitions.borrow_mut().push(ActiveTransition {
                        axis,
                        from,
                        to: *to,
                        start_millis: now,
                        duration_millis: decl.duration_millis,
                        timing_function: decl.timing_function,
                    });
                }
                _ => log::trace!("{}: {} snaps to {:?}", self.id, property, after),
            }
        }
    }

    /// Currently rendered size along `axis`, mid-transition values included.
    pub fn rendered_extent(&self, axis: Axis) -> u32 {
        let style = self.style.borrow();
        self.rendered_value(&style, axis).round() as u32
    }

    pub fn active_transition(&self, axis: Axis) -> Option<ActiveTransition> {
        self.transitions
            .borrow()
            .iter()
            .find(|transition| transition.axis == axis)
            .cloned()
    }

    pub fn is_transitioning(&self) -> bool {
        !self.transitions.borrow().is_empty()
    }

    /// Moves the clock to `now_millis` and reports every transition that
    /// has finished by then.
    pub fn advance(&self, now_millis: u64) -> Vec<TransitionEvent> {
        self.now_millis.set(now_millis);
        let finished: Vec<ActiveTransition> = {
            let mut transitions = self.transitions.borrow_mut();
            let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut *transitions)
                .into_iter()
                .partition(|transition| transition.end_millis() <= now_millis);
            *transitions = running;
            finished
        };
        finished
            .into_iter()
            .map(|transition| TransitionEvent::new(self.id, transition.axis.property_name()))
            .collect()
    }

    /// Jumps every running transition to its end.
    pub fn finish_transitions(&self) -> Vec<TransitionEvent> {
        let end = self
            .transitions
            .borrow()
            .iter()
            .map(ActiveTransition::end_millis)
            .max()
            .unwrap_or(self.now_millis.get());
        self.advance(end.max(self.now_millis.get()))
    }

    fn rendered_value(&self, style: &Style, axis: Axis) -> f32 {
        if style.is_hidden() {
            return 0.0;
        }
        if let Some(transition) = self
            .transitions
            .borrow()
            .iter()
            .find(|transition| transition.axis == axis)
        {
            return transition.value_at(self.now_millis.get());
        }
        match style.get(&axis.style_property()) {
            Some(StyleValue::Px(px)) => *px as f32,
            _ => self.content_extent(axis) as f32,
        }
    }
}

impl Surface for TestSurface {
    fn surface_id(&self) -> SurfaceId {
        self.id
    }

    fn scroll_extent(&self, axis: Axis) -> u32 {
        // Nothing is laid out while hidden.
        if self.is_hidden() {
            0
        } else {
            self.content_extent(axis)
        }
    }
}

fn transition_for<'a>(style: &'a Style, property: &StyleProperty) -> Option<&'a TransitionDecl> {
    style
        .get(&StyleProperty::Transition)
        .and_then(StyleValue::as_transition)
        .filter(|decl| &decl.property == property && !decl.is_instant())
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod tests;
