use crate::panel::PANEL_COUNT;

/// Which pair of panels is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleSet {
    /// Panels 1 and 2.
    First,
    /// Panels 3 and 4.
    Second,
}

impl VisibleSet {
    /// Visibility flag per panel, in panel order.
    pub fn flags(self) -> [bool; PANEL_COUNT] {
        match self {
            VisibleSet::First => [true, true, false, false],
            VisibleSet::Second => [false, false, true, true],
        }
    }
}

/// Cumulative click counts of the two "show set" buttons.
///
/// Counts only grow. The visible pair depends on the totals, not on which
/// button was pressed last; equal totals show panels 3 and 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowCounters {
    pub set1: u32,
    pub set2: u32,
}

impl Default for ShowCounters {
    fn default() -> Self {
        // Panels 1 and 2 start visible.
        Self { set1: 1, set2: 0 }
    }
}

impl ShowCounters {
    pub fn new(set1: u32, set2: u32) -> Self {
        Self { set1, set2 }
    }

    pub fn click(self, set: VisibleSet) -> Self {
        match set {
            VisibleSet::First => Self {
                set1: self.set1.saturating_add(1),
                ..self
            },
            VisibleSet::Second => Self {
                set2: self.set2.saturating_add(1),
                ..self
            },
        }
    }

    pub fn visible(&self) -> VisibleSet {
        if self.set1 > self.set2 {
            VisibleSet::First
        } else {
            VisibleSet::Second
        }
    }
}
