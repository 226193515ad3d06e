//! View-lifecycle binding for orientation constraints.
//!
//! A [`ViewConstraint`] stands in for the per-view modifier of a UI toolkit:
//! the view layer owns one per view that declares supported orientations and
//! forwards its appear / disappear / change events.
//!
//! ```
//! use std::sync::Arc;
//! use interface_orientation::{Coordinator, OrientationMask, Policy, ViewConstraint};
//!
//! let coordinator = Arc::new(Coordinator::headless(Policy::default()));
//!
//! let mut video = ViewConstraint::new(Arc::clone(&coordinator), Some(OrientationMask::LANDSCAPE));
//! video.on_appear();
//! assert_eq!(coordinator.supported_orientations(), OrientationMask::LANDSCAPE);
//!
//! drop(video);
//! assert_eq!(coordinator.supported_orientations(), OrientationMask::ALL);
//! ```

use std::sync::Arc;

use crate::coordinator::{Coordinator, NoopHost, OrientationHost};
use crate::orientation::OrientationMask;
use crate::registry::RegistrantId;

/// One view's orientation constraint, bound to a coordinator.
///
/// `None` means the view declares no constraint and is not registered.
/// The constraint is unregistered when the handle is dropped.
pub struct ViewConstraint<H: OrientationHost = NoopHost> {
    coordinator: Arc<Coordinator<H>>,
    id: RegistrantId,
    mask: Option<OrientationMask>,
    visible: bool,
}

impl<H: OrientationHost> ViewConstraint<H> {
    /// Creates the binding. Nothing is registered until [`on_appear`](Self::on_appear).
    pub fn new(coordinator: Arc<Coordinator<H>>, mask: Option<OrientationMask>) -> Self {
        Self {
            coordinator,
            id: RegistrantId::new(),
            mask,
            visible: false,
        }
    }

    pub fn id(&self) -> RegistrantId {
        self.id
    }

    pub fn mask(&self) -> Option<OrientationMask> {
        self.mask
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The view entered the visible hierarchy.
    pub fn on_appear(&mut self) {
        self.visible = true;
        if let Some(mask) = self.mask {
            self.coordinator.register(self.id, mask);
        }
    }

    /// The view left the visible hierarchy.
    pub fn on_disappear(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        if self.mask.is_some() {
            self.coordinator.unregister(self.id);
        }
    }

    /// The view's declared constraint changed.
    ///
    /// While visible, a new mask re-registers and `None` unregisters. While
    /// hidden the new value is only remembered for the next appearance.
    pub fn on_change(&mut self, mask: Option<OrientationMask>) {
        let previous = core::mem::replace(&mut self.mask, mask);
        if !self.visible {
            return;
        }
        match (previous, mask) {
            (_, Some(mask)) => self.coordinator.register(self.id, mask),
            (Some(_), None) => self.coordinator.unregister(self.id),
            (None, None) => {}
        }
    }
}

impl<H: OrientationHost> Drop for ViewConstraint<H> {
    fn drop(&mut self) {
        self.on_disappear();
    }
}

impl<H: OrientationHost> core::fmt::Debug for ViewConstraint<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewConstraint")
            .field("id", &self.id)
            .field("mask", &self.mask)
            .field("visible", &self.visible)
            .finish()
    }
}
