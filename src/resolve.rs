//! Default policy and mask resolution.
//!
//! Resolution intersects every registered mask with a base mask. The base is
//! the application default when overriding is disallowed (the default acts as
//! a ceiling), or [`OrientationMask::ALL`] when it is allowed.
//!
//! ```
//! use interface_orientation::{OrientationMask, Policy, RegistrantId, Registry, resolve_mask};
//!
//! let policy = Policy::new(OrientationMask::PORTRAIT, false);
//! let mut registry = Registry::new();
//! registry.register(RegistrantId::new(), OrientationMask::ALL);
//!
//! // No registrant can widen past the default when overriding is off.
//! assert_eq!(resolve_mask(&registry, &policy), OrientationMask::PORTRAIT);
//! ```

use tracing::warn;

use crate::orientation::OrientationMask;
use crate::registry::Registry;

/// Application-wide orientation policy.
///
/// `default_mask` is never empty: an empty mask is replaced by
/// [`OrientationMask::ALL`] on construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Policy {
    default_mask: OrientationMask,
    allow_override: bool,
}

impl Policy {
    pub fn new(default_mask: OrientationMask, allow_override: bool) -> Self {
        Self {
            default_mask: non_empty_default(default_mask),
            allow_override,
        }
    }

    /// Orientations used when no view constrains them.
    pub fn default_mask(&self) -> OrientationMask {
        self.default_mask
    }

    /// Whether views may allow orientations outside [`default_mask`](Self::default_mask).
    pub fn allow_override(&self) -> bool {
        self.allow_override
    }

    pub fn set_default_mask(&mut self, mask: OrientationMask) {
        self.default_mask = non_empty_default(mask);
    }

    pub fn set_allow_override(&mut self, allow: bool) {
        self.allow_override = allow;
    }

    /// Mask that registered constraints are intersected into.
    fn base(&self) -> OrientationMask {
        if self.allow_override {
            OrientationMask::ALL
        } else {
            self.default_mask
        }
    }
}

/// All orientations, overriding allowed.
impl Default for Policy {
    fn default() -> Self {
        Self::new(OrientationMask::ALL, true)
    }
}

fn non_empty_default(mask: OrientationMask) -> OrientationMask {
    if mask.is_empty() {
        warn!("empty default orientation mask, using all orientations");
        OrientationMask::ALL
    } else {
        mask
    }
}

/// Compute the supported orientations for the current registry.
///
/// Never returns an empty mask. When the registered constraints have no
/// orientation in common, a warning is logged and the policy default is
/// returned instead.
pub fn resolve_mask(registry: &Registry, policy: &Policy) -> OrientationMask {
    if registry.is_empty() {
        return policy.default_mask;
    }

    let resolved = registry.intersect_all(policy.base());
    if resolved.is_empty() {
        warn!(
            registrants = registry.len(),
            default_mask = %policy.default_mask,
            "cannot resolve supported interface orientations, using default orientations"
        );
        policy.default_mask
    } else {
        resolved
    }
}
