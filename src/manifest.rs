//! Default orientations from an application manifest.
//!
//! The manifest lists supported orientations by name, e.g. the values of
//! `UISupportedInterfaceOrientations`. Both the platform keys and short names
//! are understood:
//!
//! ```
//! use interface_orientation::{OrientationMask, manifest};
//!
//! let result = manifest::parse([
//!     "UIInterfaceOrientationPortrait",
//!     "landscapeLeft",
//!     "sideways",
//! ]);
//!
//! assert_eq!(result.mask, OrientationMask::PORTRAIT | OrientationMask::LANDSCAPE_LEFT);
//! assert_eq!(result.warnings.len(), 1);
//! ```
//!
//! Nothing here fails hard. Unknown names are dropped, and a manifest that
//! yields no orientation at all resolves to [`OrientationMask::ALL`]. Each
//! problem is both returned as a [`ManifestWarning`] and logged.

use thiserror::Error;
use tracing::warn;

use crate::orientation::{InterfaceOrientation, OrientationMask};

/// Result of reading a manifest's orientation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestResult {
    /// Default mask. Never empty.
    pub mask: OrientationMask,
    /// Non-fatal problems found while reading.
    pub warnings: Vec<ManifestWarning>,
}

/// Non-fatal warning from manifest reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestWarning {
    /// An entry is not a known orientation name. It was ignored.
    #[error("unknown orientation '{0}' in supported interface orientations")]
    UnknownOrientation(String),
    /// No usable entry was found. All orientations are allowed.
    #[error("no supported interface orientations in manifest, defaulting to all")]
    NoOrientations,
    /// The manifest could not be read at all. All orientations are allowed.
    #[error("manifest unreadable ({reason}), defaulting to all orientations")]
    Unreadable { reason: String },
}

/// Parse a list of orientation names into a default mask.
pub fn parse<I, S>(names: I) -> ManifestResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut mask = OrientationMask::empty();
    let mut warnings = Vec::new();

    for name in names {
        let name = name.as_ref();
        match parse_name(name) {
            Some(orientation) => mask |= orientation.mask(),
            None => push_warning(
                &mut warnings,
                ManifestWarning::UnknownOrientation(name.to_owned()),
            ),
        }
    }

    if mask.is_empty() {
        push_warning(&mut warnings, ManifestWarning::NoOrientations);
        mask = OrientationMask::ALL;
    }

    ManifestResult { mask, warnings }
}

/// Result for a manifest that could not be read.
pub fn unreadable(reason: impl Into<String>) -> ManifestResult {
    let mut warnings = Vec::new();
    push_warning(
        &mut warnings,
        ManifestWarning::Unreadable {
            reason: reason.into(),
        },
    );
    ManifestResult {
        mask: OrientationMask::ALL,
        warnings,
    }
}

/// Map one manifest entry to an orientation.
///
/// Platform keys are matched exactly. Short names ignore case and accept
/// both `landscapeLeft` and `landscape_left` spellings.
pub fn parse_name(name: &str) -> Option<InterfaceOrientation> {
    let platform = match name {
        "UIInterfaceOrientationPortrait" => Some(InterfaceOrientation::Portrait),
        "UIInterfaceOrientationPortraitUpsideDown" => {
            Some(InterfaceOrientation::PortraitUpsideDown)
        }
        "UIInterfaceOrientationLandscapeLeft" => Some(InterfaceOrientation::LandscapeLeft),
        "UIInterfaceOrientationLandscapeRight" => Some(InterfaceOrientation::LandscapeRight),
        _ => None,
    };
    if platform.is_some() {
        return platform;
    }

    let short: String = name
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match short.as_str() {
        "portrait" => Some(InterfaceOrientation::Portrait),
        "portraitupsidedown" => Some(InterfaceOrientation::PortraitUpsideDown),
        "landscapeleft" => Some(InterfaceOrientation::LandscapeLeft),
        "landscaperight" => Some(InterfaceOrientation::LandscapeRight),
        _ => None,
    }
}

fn push_warning(warnings: &mut Vec<ManifestWarning>, warning: ManifestWarning) {
    warn!("{warning}");
    warnings.push(warning);
}
