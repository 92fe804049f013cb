// Range selection over the chart's time axis.
//
// The chart supports a perpetual two-click selection cycle: the first click
// records a pending start, the second finalizes a normalized range, and a
// click while a finalized range is held clears it and starts over. Hover is
// independent transient feedback and never touches the selection.

/// Inclusive, 1-based game-number bounds with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    /// Build a range from two boundary clicks in either order.
    pub fn new(a: usize, b: usize) -> Self {
        SelectionRange {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Whether a 1-based game number falls inside the range.
    pub fn contains(&self, game_number: usize) -> bool {
        (self.start..=self.end).contains(&game_number)
    }
}

/// Where the two-click cycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickState {
    /// No boundary click pending.
    Idle,
    /// First boundary recorded, waiting for the second.
    PendingStart(usize),
}

/// What a click did, for consumers that react to selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// First click of a cycle: a pending start was recorded, nothing emitted.
    RangeStarted(usize),
    /// Second click: the finalized, normalized range.
    RangeCompleted(SelectionRange),
    /// Click while a finalized range was held: the range was cleared and a
    /// new pending start recorded.
    RangeCleared,
}

impl Default for ClickState {
    fn default() -> Self {
        ClickState::Idle
    }
}

/// Tracks the two-click selection cycle plus transient hover state.
#[derive(Debug, Clone, Default)]
pub struct RangeSelector {
    state: ClickState,
    finalized: Option<SelectionRange>,
    hover: Option<usize>,
}

impl RangeSelector {
    pub fn new() -> Self {
        RangeSelector::default()
    }

    /// The finalized range, if the last cycle completed.
    pub fn range(&self) -> Option<SelectionRange> {
        self.finalized
    }

    /// The pending first boundary, if mid-cycle.
    pub fn pending_start(&self) -> Option<usize> {
        match self.state {
            ClickState::PendingStart(game) => Some(game),
            ClickState::Idle => None,
        }
    }

    /// The game number currently under the pointer, if any.
    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Process a click at the given game number.
    pub fn click(&mut self, game_number: usize) -> SelectionEvent {
        if self.finalized.is_some() {
            // Third click of the cycle: clear the held range first, then
            // treat this click as the start of a fresh selection.
            self.finalized = None;
            self.state = ClickState::PendingStart(game_number);
            return SelectionEvent::RangeCleared;
        }
        match self.state {
            ClickState::Idle => {
                self.state = ClickState::PendingStart(game_number);
                SelectionEvent::RangeStarted(game_number)
            }
            ClickState::PendingStart(pending) => {
                let range = SelectionRange::new(pending, game_number);
                self.state = ClickState::Idle;
                self.finalized = Some(range);
                SelectionEvent::RangeCompleted(range)
            }
        }
    }

    /// Update hover feedback; `None` when the pointer leaves the plot area.
    pub fn set_hover(&mut self, game_number: Option<usize>) {
        self.hover = game_number;
    }

    /// External reset (deselecting all players). Clears everything.
    pub fn reset(&mut self) {
        self.state = ClickState::Idle;
        self.finalized = None;
        self.hover = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
