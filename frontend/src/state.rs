//! UI state of one upload form.
//!
//! [`UploadUiState`] is the single source of truth the `UploadForm`
//! component renders from. Every transition goes through a method here so
//! the invariants hold regardless of which browser callback fires:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──200/302──▶ Succeeded (page navigates away)
//!  ▲                   │                          │
//!  └──────failure──────┘◀──navigation refused──────┘
//! ```

use crate::types::UploadResult;

/// Lifecycle phase of a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Submitting,
    /// Navigation to the result page is under way. Only a refused
    /// navigation leaves this phase.
    Succeeded,
}

/// Everything the form renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadUiState {
    pub phase: UploadPhase,
    /// Submit button disabled
    pub disabled: bool,
    pub spinner_visible: bool,
    pub button_label: String,
    pub progress_visible: bool,
    /// 0..=100, never decreases within an attempt
    pub progress_percent: u8,
    idle_label: String,
    busy_label: String,
}

impl UploadUiState {
    /// Idle state with the given button labels.
    pub fn new(idle_label: impl Into<String>, busy_label: impl Into<String>) -> Self {
        let idle_label = idle_label.into();
        Self {
            phase: UploadPhase::Idle,
            disabled: false,
            spinner_visible: false,
            button_label: idle_label.clone(),
            progress_visible: false,
            progress_percent: 0,
            idle_label,
            busy_label: busy_label.into(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == UploadPhase::Submitting
    }

    /// Enter `Submitting`. Returns `false` (and changes nothing) unless idle.
    pub fn begin_submit(&mut self) -> bool {
        if self.phase != UploadPhase::Idle {
            return false;
        }
        self.phase = UploadPhase::Submitting;
        self.disabled = true;
        self.spinner_visible = true;
        self.button_label = self.busy_label.clone();
        self.progress_visible = true;
        self.progress_percent = 0;
        true
    }

    /// Apply an upload progress notification.
    ///
    /// Ignored outside `Submitting` and when the total is unknown.
    pub fn record_progress(&mut self, sent: f64, total: f64) {
        if !self.is_submitting() {
            return;
        }
        if let Some(percent) = progress_percent(sent, total) {
            self.progress_percent = self.progress_percent.max(percent);
        }
    }

    /// The server accepted the upload. The button stays disabled: the page
    /// is about to navigate away.
    pub fn succeed(&mut self) {
        if self.is_submitting() {
            self.phase = UploadPhase::Succeeded;
            self.progress_percent = 100;
        }
    }

    /// Apply the outcome of an upload and hand it back.
    ///
    /// `Ok` carries the location to navigate to and leaves the form
    /// `Succeeded`; `Err` returns it to idle.
    pub fn finish(&mut self, result: UploadResult<String>) -> UploadResult<String> {
        match &result {
            Ok(_) => self.succeed(),
            Err(_) => self.fail(),
        }
        result
    }

    /// The upload (or the navigation after it) failed: back to the exact
    /// idle rendering.
    pub fn fail(&mut self) {
        if self.phase == UploadPhase::Idle {
            return;
        }
        self.phase = UploadPhase::Idle;
        self.disabled = false;
        self.spinner_visible = false;
        self.button_label = self.idle_label.clone();
        self.progress_visible = false;
        self.progress_percent = 0;
    }
}

/// Percentage of `sent` over `total`, rounded and clamped to 0..=100.
///
/// `None` when the total is unknown (zero, negative or not finite).
pub fn progress_percent(sent: f64, total: f64) -> Option<u8> {
    if !total.is_finite() || total <= 0.0 || !sent.is_finite() {
        return None;
    }
    let percent = (sent / total * 100.0).round().clamp(0.0, 100.0);
    Some(percent as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::resolve_location;
    use crate::types::UploadError;

    fn idle() -> UploadUiState {
        UploadUiState::new("Upload", " Processing...")
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = idle();
        assert_eq!(state.phase, UploadPhase::Idle);
        assert!(!state.disabled);
        assert!(!state.spinner_visible);
        assert!(!state.progress_visible);
        assert_eq!(state.button_label, "Upload");
        assert_eq!(state.progress_percent, 0);
    }

    #[test]
    fn test_begin_submit_only_once() {
        let mut state = idle();
        assert!(state.begin_submit());
        assert!(state.disabled);
        assert!(state.spinner_visible);
        assert!(state.progress_visible);
        assert_eq!(state.button_label, " Processing...");

        // a second submit while in flight is ignored
        let snapshot = state.clone();
        assert!(!state.begin_submit());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_progress_percent_values() {
        assert_eq!(progress_percent(0.0, 200.0), Some(0));
        assert_eq!(progress_percent(50.0, 200.0), Some(25));
        assert_eq!(progress_percent(1.0, 3.0), Some(33));
        assert_eq!(progress_percent(2.0, 3.0), Some(67));
        assert_eq!(progress_percent(200.0, 200.0), Some(100));
        assert_eq!(progress_percent(300.0, 200.0), Some(100));
        assert_eq!(progress_percent(-5.0, 200.0), Some(0));
        assert_eq!(progress_percent(10.0, 0.0), None);
        assert_eq!(progress_percent(10.0, f64::NAN), None);
    }

    #[test]
    fn test_progress_is_monotonic_within_attempt() {
        let mut state = idle();
        state.begin_submit();
        state.record_progress(40.0, 100.0);
        assert_eq!(state.progress_percent, 40);
        state.record_progress(30.0, 100.0);
        assert_eq!(state.progress_percent, 40);
        state.record_progress(10.0, 0.0);
        assert_eq!(state.progress_percent, 40);
        state.record_progress(90.0, 100.0);
        assert_eq!(state.progress_percent, 90);
    }

    #[test]
    fn test_progress_ignored_when_idle() {
        let mut state = idle();
        state.record_progress(50.0, 100.0);
        assert_eq!(state, idle());
    }

    #[test]
    fn test_failure_restores_identical_idle_state() {
        let mut state = idle();
        for _ in 0..3 {
            assert!(state.begin_submit());
            state.record_progress(70.0, 100.0);
            state.fail();
            assert_eq!(state, idle());
        }
    }

    #[test]
    fn test_new_attempt_resets_progress() {
        let mut state = idle();
        state.begin_submit();
        state.record_progress(80.0, 100.0);
        state.fail();
        state.begin_submit();
        assert_eq!(state.progress_percent, 0);
    }

    #[test]
    fn test_success_keeps_control_disabled() {
        let mut state = idle();
        state.begin_submit();
        state.record_progress(100.0, 100.0);
        state.succeed();
        assert_eq!(state.phase, UploadPhase::Succeeded);
        assert!(state.disabled);

        // a new submit cannot start while the page navigates
        assert!(!state.begin_submit());
        assert!(state.disabled);
        state.record_progress(10.0, 100.0);
        assert_eq!(state.progress_percent, 100);
    }

    #[test]
    fn test_refused_navigation_returns_to_idle() {
        let mut state = idle();
        state.begin_submit();
        state.succeed();
        state.fail();
        assert_eq!(state, idle());
        assert!(state.begin_submit());
    }

    #[test]
    fn test_finish_with_200_navigates() {
        let mut state = idle();
        state.begin_submit();
        state.record_progress(100.0, 100.0);

        let result = resolve_location(200, "https://app.example/preview/3", "");
        assert_eq!(state.finish(result), Ok("https://app.example/preview/3".to_string()));
        assert_eq!(state.phase, UploadPhase::Succeeded);
        assert!(state.disabled);
        assert!(state.spinner_visible);
    }

    #[test]
    fn test_finish_with_500_restores_idle() {
        let mut state = idle();
        state.begin_submit();
        state.record_progress(60.0, 100.0);

        let result = resolve_location(500, "https://app.example/upload", "Internal Server Error");
        assert_eq!(state.finish(result), Err(UploadError::Rejected { status: 500 }));
        assert_eq!(state, idle());
        assert!(!state.disabled);
        assert!(!state.progress_visible);
        assert_eq!(state.button_label, "Upload");
    }

    #[test]
    fn test_finish_with_transport_failure_restores_idle() {
        let mut state = idle();
        state.begin_submit();

        let result = resolve_location(0, "", "");
        assert_eq!(state.finish(result), Err(UploadError::Transport));
        assert_eq!(state, idle());
    }
}
