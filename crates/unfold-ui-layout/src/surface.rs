//! The rendered box a transition drives, and the weak references to it.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::axis::Axis;

/// Identity of a rendered surface, used to tell a surface's own transition
/// events apart from ones bubbling up from its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Allocates a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A measurable rendered box owned by the host.
pub trait Surface {
    fn surface_id(&self) -> SurfaceId;

    /// Full content extent along `axis` in pixels, including content clipped
    /// by overflow, not just the visible box.
    fn scroll_extent(&self, axis: Axis) -> u32;
}

/// Weak, rebindable slot pointing at the attached surface.
///
/// Clones share the slot. The slot never keeps the surface alive: once the
/// host drops it, [`SurfaceRef::get`] returns `None` as if it were detached.
#[derive(Clone, Default)]
pub struct SurfaceRef {
    slot: Rc<RefCell<Option<Weak<dyn Surface>>>>,
}

impl SurfaceRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, surface: &Rc<dyn Surface>) {
        *self.slot.borrow_mut() = Some(Rc::downgrade(surface));
    }

    pub fn detach(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn set(&self, surface: Option<&Rc<dyn Surface>>) {
        match surface {
            Some(surface) => self.attach(surface),
            None => self.detach(),
        }
    }

    pub fn get(&self) -> Option<Rc<dyn Surface>> {
        self.slot.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub fn id(&self) -> Option<SurfaceId> {
        self.get().map(|surface| surface.surface_id())
    }

    pub fn is_attached(&self) -> bool {
        self.get().is_some()
    }

    /// True when both refs share one slot.
    pub fn ptr_eq(&self, other: &SurfaceRef) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl fmt::Debug for SurfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceRef").field("surface", &self.id()).finish()
    }
}

pub type RefCallback = Rc<dyn Fn(Option<&Rc<dyn Surface>>)>;

/// Anything a host can bind a surface to: a slot or a callback.
#[derive(Clone)]
pub enum RefHandle {
    Slot(SurfaceRef),
    Callback(RefCallback),
}

impl RefHandle {
    pub fn callback(callback: impl Fn(Option<&Rc<dyn Surface>>) + 'static) -> Self {
        RefHandle::Callback(Rc::new(callback))
    }

    /// Binds (`Some`) or unbinds (`None`) the surface.
    pub fn set(&self, surface: Option<&Rc<dyn Surface>>) {
        match self {
            RefHandle::Slot(slot) => slot.set(surface),
            RefHandle::Callback(callback) => callback(surface),
        }
    }
}

impl From<SurfaceRef> for RefHandle {
    fn from(slot: SurfaceRef) -> Self {
        RefHandle::Slot(slot)
    }
}

impl fmt::Debug for RefHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefHandle::Slot(slot) => f.debug_tuple("Slot").field(slot).finish(),
            RefHandle::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Combines refs so that one binding updates all of them, in order.
pub fn merge_refs(refs: impl IntoIterator<Item = RefHandle>) -> RefHandle {
    let mut refs: SmallVec<[RefHandle; 2]> = refs.into_iter().collect();
    if refs.len() == 1 {
        if let Some(single) = refs.pop() {
            return single;
        }
    }
    RefHandle::callback(move |surface| {
        for handle in &refs {
            handle.set(surface);
        }
    })
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod tests;
