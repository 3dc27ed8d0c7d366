use serde::{Deserialize, Serialize};

/// One of the 32 permanent tooth positions in FDI two-digit notation.
///
/// First digit is the quadrant (1 upper right, 2 upper left, 3 lower left,
/// 4 lower right), second digit the position within the quadrant (1..8).
/// Declaration order is the canonical enumeration order used everywhere:
/// 11..18, 21..28, 31..38, 41..48.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[rustfmt::skip]
pub enum ToothPosition {
    T11, T12, T13, T14, T15, T16, T17, T18,
    T21, T22, T23, T24, T25, T26, T27, T28,
    T31, T32, T33, T34, T35, T36, T37, T38,
    T41, T42, T43, T44, T45, T46, T47, T48,
}

impl ToothPosition {
    /// All 32 positions in canonical order.
    #[rustfmt::skip]
    pub const ALL: [ToothPosition; 32] = [
        Self::T11, Self::T12, Self::T13, Self::T14, Self::T15, Self::T16, Self::T17, Self::T18,
        Self::T21, Self::T22, Self::T23, Self::T24, Self::T25, Self::T26, Self::T27, Self::T28,
        Self::T31, Self::T32, Self::T33, Self::T34, Self::T35, Self::T36, Self::T37, Self::T38,
        Self::T41, Self::T42, Self::T43, Self::T44, Self::T45, Self::T46, Self::T47, Self::T48,
    ];

    /// The two-digit FDI code, e.g. "11" or "47".
    pub fn code(self) -> &'static str {
        #[rustfmt::skip]
        const CODES: [&str; 32] = [
            "11", "12", "13", "14", "15", "16", "17", "18",
            "21", "22", "23", "24", "25", "26", "27", "28",
            "31", "32", "33", "34", "35", "36", "37", "38",
            "41", "42", "43", "44", "45", "46", "47", "48",
        ];
        CODES[self as usize]
    }

    /// Quadrant digit, 1..4.
    pub fn quadrant(self) -> u8 {
        (self as u8 / 8) + 1
    }

    pub fn from_code(code: &str) -> Option<ToothPosition> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// A subset of the 32 fixed tooth positions, stored as a bitmask in
/// canonical enumeration order (bit 0 = tooth 11, bit 31 = tooth 48).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToothSet(u32);

impl ToothSet {
    pub const EMPTY: ToothSet = ToothSet(0);
    /// Both arches.
    pub const ALL: ToothSet = ToothSet(0xFFFF_FFFF);
    /// Quadrants 1 and 2 (teeth 11..18 and 21..28).
    pub const UPPER: ToothSet = ToothSet(0x0000_FFFF);
    /// Quadrants 3 and 4 (teeth 31..38 and 41..48).
    pub const LOWER: ToothSet = ToothSet(0xFFFF_0000);

    pub fn from_mask(mask: u32) -> ToothSet {
        ToothSet(mask)
    }

    pub fn mask(self) -> u32 {
        self.0
    }

    pub fn contains(self, tooth: ToothPosition) -> bool {
        self.0 & tooth.bit() != 0
    }

    pub fn insert(&mut self, tooth: ToothPosition) {
        self.0 |= tooth.bit();
    }

    pub fn remove(&mut self, tooth: ToothPosition) {
        self.0 &= !tooth.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of selected teeth, 0..=32.
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Selected positions in canonical order.
    pub fn iter(self) -> impl Iterator<Item = ToothPosition> {
        ToothPosition::ALL.iter().copied().filter(move |t| self.contains(*t))
    }

    /// Human-readable summary of the selection.
    ///
    /// Full mouth, a single full arch and the empty set collapse to a named
    /// category; anything else is the comma-joined list of FDI codes in
    /// canonical ascending order. The categories are mutually exclusive, so
    /// the check order only matters for efficiency.
    pub fn describe(self) -> String {
        if self == Self::ALL {
            "Arches".into()
        } else if self == Self::UPPER {
            "Upper Arch".into()
        } else if self == Self::LOWER {
            "Lower Arch".into()
        } else if self.is_empty() {
            "None".into()
        } else {
            self.iter().map(|t| t.code()).collect::<Vec<_>>().join(",")
        }
    }
}

impl FromIterator<ToothPosition> for ToothSet {
    fn from_iter<I: IntoIterator<Item = ToothPosition>>(iter: I) -> Self {
        let mut set = ToothSet::EMPTY;
        for tooth in iter {
            set.insert(tooth);
        }
        set
    }
}
