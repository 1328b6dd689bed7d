//! UI mode and panel visibility.

/// Named UI regions toggled by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Loading,
    Stats,
    Results,
    RawResults,
    Error,
}

/// Mutually-exclusive presentation mode.
///
/// Panel visibility is a total function of the mode, so the mutual-exclusion
/// invariant holds by construction instead of by caller discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Visual state of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitControl {
    /// Enabled, ready for input.
    Idle,
    /// Disabled while a request is in flight.
    Busy,
}

impl UiMode {
    /// Panels visible in this mode.
    pub fn visible_panels(self) -> &'static [Panel] {
        match self {
            UiMode::Idle => &[],
            UiMode::Loading => &[Panel::Loading],
            UiMode::Success => &[Panel::Stats, Panel::Results, Panel::RawResults],
            UiMode::Error => &[Panel::Error],
        }
    }

    /// True when the given panel is visible.
    pub fn shows(self, panel: Panel) -> bool {
        self.visible_panels().contains(&panel)
    }

    /// Submit control state derived from the mode.
    pub fn submit_control(self) -> SubmitControl {
        match self {
            UiMode::Loading => SubmitControl::Busy,
            _ => SubmitControl::Idle,
        }
    }
}
