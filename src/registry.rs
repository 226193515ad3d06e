//! Per-view orientation constraints.
//!
//! The registry is a plain map. It does not resolve anything by itself; the
//! [`Coordinator`](crate::Coordinator) wraps it and recomputes after every
//! mutation.

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use crate::orientation::OrientationMask;

/// Identifier for one mounted view that declares an orientation constraint.
///
/// Random UUID v4, so two views never collide even if they declare the same
/// mask.
///
/// ```
/// use interface_orientation::RegistrantId;
///
/// assert_ne!(RegistrantId::new(), RegistrantId::new());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegistrantId(Uuid);

impl RegistrantId {
    /// Creates a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID, e.g. one the UI layer already keeps per view.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RegistrantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mapping from registrant to its declared mask.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: HashMap<RegistrantId, OrientationMask>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the mask for `id`, returning the previous mask.
    ///
    /// An empty mask is a caller bug. Debug builds panic; release builds
    /// treat it as [`unregister`](Self::unregister).
    pub fn register(&mut self, id: RegistrantId, mask: OrientationMask) -> Option<OrientationMask> {
        debug_assert!(!mask.is_empty(), "empty orientation mask registered for {id}");
        if mask.is_empty() {
            return self.unregister(id);
        }
        self.entries.insert(id, mask)
    }

    /// Remove `id`, returning its mask if it was registered.
    pub fn unregister(&mut self, id: RegistrantId) -> Option<OrientationMask> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: RegistrantId) -> Option<OrientationMask> {
        self.entries.get(&id).copied()
    }

    pub fn contains(&self, id: RegistrantId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Intersect `base` with every registered mask.
    ///
    /// Intersection is associative and commutative, so the map's iteration
    /// order has no effect on the result.
    pub fn intersect_all(&self, base: OrientationMask) -> OrientationMask {
        self.entries.values().fold(base, |acc, &mask| acc & mask)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegistrantId, OrientationMask)> + '_ {
        self.entries.iter().map(|(&id, &mask)| (id, mask))
    }
}
