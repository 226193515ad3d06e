//! Interface orientations and orientation masks.
//!
//! Raw values follow the platform convention: each [`InterfaceOrientation`]
//! has a small integer value, and its bit in an [`OrientationMask`] is
//! `1 << value`. Hosts can therefore exchange raw values with the platform
//! without a lookup table.
//!
//! ```text
//!     value  orientation            mask bit
//!     ─────  ─────────────────────  ────────
//!       0    Unknown                (none)
//!       1    Portrait               0b0_0010
//!       2    PortraitUpsideDown     0b0_0100
//!       3    LandscapeRight         0b0_1000
//!       4    LandscapeLeft          0b1_0000
//! ```

use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// A set of interface orientations.
    ///
    /// Resolution only ever intersects masks, so the order in which masks
    /// are combined never matters.
    ///
    /// ```
    /// use interface_orientation::OrientationMask;
    ///
    /// let a = OrientationMask::PORTRAIT | OrientationMask::LANDSCAPE;
    /// let b = OrientationMask::PORTRAIT | OrientationMask::PORTRAIT_UPSIDE_DOWN;
    /// assert_eq!(a & b, OrientationMask::PORTRAIT);
    /// assert!((OrientationMask::LANDSCAPE_LEFT & OrientationMask::PORTRAIT).is_empty());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "config", serde(transparent))]
    pub struct OrientationMask: u8 {
        /// Home indicator (or button) at the bottom.
        const PORTRAIT = 1 << 1;
        /// Home indicator at the top.
        const PORTRAIT_UPSIDE_DOWN = 1 << 2;
        /// Device rotated so the home indicator is on the right.
        const LANDSCAPE_RIGHT = 1 << 3;
        /// Device rotated so the home indicator is on the left.
        const LANDSCAPE_LEFT = 1 << 4;

        /// Both landscape orientations.
        const LANDSCAPE = Self::LANDSCAPE_LEFT.bits() | Self::LANDSCAPE_RIGHT.bits();
        /// Everything except upside-down portrait.
        const ALL_BUT_UPSIDE_DOWN = Self::PORTRAIT.bits() | Self::LANDSCAPE.bits();
        /// All four orientations.
        const ALL = Self::PORTRAIT.bits()
            | Self::PORTRAIT_UPSIDE_DOWN.bits()
            | Self::LANDSCAPE.bits();
    }
}

impl OrientationMask {
    /// Whether `orientation` is allowed by this mask. `Unknown` is never allowed.
    pub fn contains_orientation(self, orientation: InterfaceOrientation) -> bool {
        let bit = orientation.mask();
        !bit.is_empty() && self.contains(bit)
    }

    /// The orientations in this mask, in raw-value order.
    pub fn orientations(self) -> impl Iterator<Item = InterfaceOrientation> {
        InterfaceOrientation::KNOWN
            .into_iter()
            .filter(move |&o| self.contains(o.mask()))
    }
}

impl Default for OrientationMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for OrientationMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("[]");
        }
        f.write_str("[")?;
        for (i, o) in self.orientations().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{o}")?;
        }
        f.write_str("]")
    }
}

/// The orientation the interface is currently presented in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InterfaceOrientation {
    /// Not observed yet, or the platform could not tell.
    #[default]
    Unknown = 0,
    Portrait = 1,
    PortraitUpsideDown = 2,
    LandscapeRight = 3,
    LandscapeLeft = 4,
}

impl InterfaceOrientation {
    /// The four real orientations, indexed by raw value - 1.
    const KNOWN: [Self; 4] = [
        Self::Portrait,
        Self::PortraitUpsideDown,
        Self::LandscapeRight,
        Self::LandscapeLeft,
    ];

    /// Create from a platform raw value (0-4). Returns `None` for anything else.
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1..=4 => Some(Self::KNOWN[(value - 1) as usize]),
            _ => None,
        }
    }

    /// Platform raw value (0-4).
    pub fn to_raw(self) -> u8 {
        self as u8
    }

    /// The single-orientation mask for this orientation. Empty for `Unknown`.
    pub fn mask(self) -> OrientationMask {
        match self {
            Self::Unknown => OrientationMask::empty(),
            o => OrientationMask::from_bits_truncate(1 << o.to_raw()),
        }
    }

    pub fn is_portrait(self) -> bool {
        matches!(self, Self::Portrait | Self::PortraitUpsideDown)
    }

    pub fn is_landscape(self) -> bool {
        matches!(self, Self::LandscapeLeft | Self::LandscapeRight)
    }
}

impl fmt::Display for InterfaceOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Portrait => "portrait",
            Self::PortraitUpsideDown => "portraitUpsideDown",
            Self::LandscapeRight => "landscapeRight",
            Self::LandscapeLeft => "landscapeLeft",
        })
    }
}
