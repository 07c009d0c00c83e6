use super::*;
use std::cell::Cell;

struct FixedSurface {
    id: SurfaceId,
}

impl Surface for FixedSurface {
    fn surface_id(&self) -> SurfaceId {
        self.id
    }

    fn scroll_extent(&self, _axis: Axis) -> u32 {
        10
    }
}

fn surface() -> Rc<dyn Surface> {
    Rc::new(FixedSurface {
        id: SurfaceId::next(),
    })
}

#[test]
fn surface_ids_are_unique() {
    assert_ne!(SurfaceId::next(), SurfaceId::next());
}

#[test]
fn slot_does_not_own_the_surface() {
    let slot = SurfaceRef::new();
    let surface = surface();
    let id = surface.surface_id();

    slot.attach(&surface);
    assert_eq!(slot.id(), Some(id));

    drop(surface);
    assert!(!slot.is_attached());
    assert_eq!(slot.id(), None);
}

#[test]
fn clones_share_one_slot() {
    let slot = SurfaceRef::new();
    let alias = slot.clone();
    let surface = surface();

    alias.set(Some(&surface));
    assert!(slot.ptr_eq(&alias));
    assert_eq!(slot.id(), Some(surface.surface_id()));

    slot.set(None);
    assert!(!alias.is_attached());
}

#[test]
fn merged_refs_bind_every_target() {
    let ours = SurfaceRef::new();
    let theirs = SurfaceRef::new();
    let callback_hits = Rc::new(Cell::new(0));
    let callback = {
        let callback_hits = callback_hits.clone();
        RefHandle::callback(move |surface| {
            if surface.is_some() {
                callback_hits.set(callback_hits.get() + 1);
            }
        })
    };

    let merged = merge_refs([ours.clone().into(), theirs.clone().into(), callback]);
    let surface = surface();
    merged.set(Some(&surface));

    assert_eq!(ours.id(), Some(surface.surface_id()));
    assert_eq!(theirs.id(), Some(surface.surface_id()));
    assert_eq!(callback_hits.get(), 1);

    merged.set(None);
    assert!(!ours.is_attached());
    assert!(!theirs.is_attached());
}

#[test]
fn merging_a_single_ref_returns_it_unchanged() {
    let slot = SurfaceRef::new();
    match merge_refs([RefHandle::Slot(slot.clone())]) {
        RefHandle::Slot(merged) => assert!(merged.ptr_eq(&slot)),
        other => panic!("expected slot, got {other:?}"),
    }
}
