use std::borrow::Cow;

use unfold_ui_layout::SurfaceId;

/// A "transition finished" notification delivered by the host.
///
/// Hosts emit these for every finished property transition on a surface and
/// on its descendants; `target` identifies which one it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEvent {
    pub target: SurfaceId,
    pub property_name: Cow<'static, str>,
}

impl TransitionEvent {
    pub fn new(target: SurfaceId, property_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            target,
            property_name: property_name.into(),
        }
    }
}
