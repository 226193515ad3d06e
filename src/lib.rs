//! Resolve which interface orientations an application should allow.
//!
//! Views declare the orientations they support; the coordinator intersects
//! every visible view's constraint with the application default and exposes
//! a single, never-empty mask for the platform to query.
//!
//! # Modules
//!
//! - [`orientation`] — Orientation values and the orientation bitmask
//! - [`registry`] — Per-view constraint registry
//! - [`resolve`] — Default policy and the resolution rule
//! - [`coordinator`] — Shared handle: cached resolution, host calls, subscriptions
//! - [`constraint`] — View-lifecycle binding (appear / disappear / change)
//! - [`manifest`] — Default orientations from manifest entries
//! - `config` — TOML configuration (feature `config`)

#![forbid(unsafe_code)]

pub mod constraint;
pub mod coordinator;
pub mod manifest;
pub mod orientation;
pub mod registry;
pub mod resolve;

#[cfg(feature = "config")]
pub mod config;

pub use constraint::ViewConstraint;
pub use coordinator::{Coordinator, NoopHost, OrientationHost, OrientationUpdate, SubscriptionId};
pub use manifest::{ManifestResult, ManifestWarning};
pub use orientation::{InterfaceOrientation, OrientationMask};
pub use registry::{RegistrantId, Registry};
pub use resolve::{Policy, resolve_mask};
