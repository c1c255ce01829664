//! Static configuration of the six stat tabs.
//!
//! Each tab carries its expected column headers in on-screen order and the
//! shape its cells are extracted with. The shape only affects how one cell's
//! text is located; every shape produces the same value-row contract.

/// How a single cell's text is located within a value row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShape {
    /// Read every `span` directly under the row (General).
    Spans,
    /// Read each cell container's `span`, falling back to the container text.
    Columns,
    /// Irregular layout: take the last five cell containers and read the
    /// relative positions listed in [`FIXED_TAIL_PICKS`] (Additional).
    FixedTail,
}

/// Relative positions picked from the trailing five cells of the
/// [`CellShape::FixedTail`] layout.
pub const FIXED_TAIL_PICKS: [usize; 4] = [0, 2, 3, 4];

/// One stat tab: its clickable label, expected headers, extraction shape.
#[derive(Debug, Clone, Copy)]
pub struct TabSpec {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub shape: CellShape,
}

/// The six tabs in fixed activation order. The first tab is activated once
/// during league setup, so the walker does not re-click it.
pub const STAT_TABS: [TabSpec; 6] = [
    TabSpec {
        name: "General",
        headers: &["MP", "DK", "GLS", "AST", "ASR"],
        shape: CellShape::Spans,
    },
    TabSpec {
        name: "Shooting",
        headers: &["TOS", "SOT", "BCM"],
        shape: CellShape::Columns,
    },
    TabSpec {
        name: "Team play",
        headers: &["KEYP", "BCC", "SDR"],
        shape: CellShape::Columns,
    },
    TabSpec {
        name: "Passing",
        headers: &["APS", "APS%", "ALB", "LBA%", "ACR", "CA%"],
        shape: CellShape::Columns,
    },
    TabSpec {
        name: "Defense",
        headers: &["CLS", "YC", "RC", "ELTG", "DRP", "TACK", "INT", "BLS", "ADW"],
        shape: CellShape::Columns,
    },
    TabSpec {
        name: "Additional",
        headers: &["xG", "xA", "GI", "XGI"],
        shape: CellShape::FixedTail,
    },
];

/// Union of all tab headers in tab order; the stat portion of the output
/// column set.
pub fn all_stat_headers() -> Vec<&'static str> {
    STAT_TABS.iter().flat_map(|tab| tab.headers.iter().copied()).collect()
}
