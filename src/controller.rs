//! Paraphrase Controller
//!
//! Owns the request/response cycle: shows the floating control for an
//! active selection, hands out at most one outbound call at a time and
//! substitutes the reply into the originally captured range.

use tracing::{debug, info, warn};

use crate::document::{Edit, TextRange};
use crate::error::{RephraseError, RephraseResult};
use crate::paraphrase::Paraphraser;
use crate::surface::{Point, SelectionEvent, SelectionHost, SelectionSnapshot};

/// Half the floating control's width; its left edge sits this far left of
/// the anchor so the control is centred over the selection
pub const CONTROL_HALF_WIDTH: f32 = 75.0;

pub const LABEL_IDLE: &str = "Paraphrase";
pub const LABEL_BUSY: &str = "Paraphrasing...";

const EMPTY_SELECTION_MESSAGE: &str = "Please select some text to paraphrase.";
const FAILURE_MESSAGE: &str = "Failed to paraphrase text. Please try again.";

/// Controller state machine
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    /// A non-whitespace selection is showing the floating control
    SelectionActive(SelectionSnapshot),
    /// A request is in flight for `captured`; `live` is whatever the user
    /// has selected since, shown with a disabled control
    Paraphrasing {
        captured: SelectionSnapshot,
        live: Option<SelectionSnapshot>,
    },
}

/// What the floating control should look like
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingControl {
    /// Top-left corner in editor-local coordinates
    pub position: Point,
    pub label: &'static str,
    pub enabled: bool,
}

impl FloatingControl {
    fn at(anchor: Point, busy: bool) -> Self {
        Self {
            position: Point {
                x: anchor.x - CONTROL_HALF_WIDTH,
                y: anchor.y,
            },
            label: if busy { LABEL_BUSY } else { LABEL_IDLE },
            enabled: !busy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    EmptySelection,
    ParaphraseFailed,
}

/// Blocking message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn empty_selection() -> Self {
        Self {
            kind: NoticeKind::EmptySelection,
            message: EMPTY_SELECTION_MESSAGE.to_string(),
        }
    }

    fn failed() -> Self {
        Self {
            kind: NoticeKind::ParaphraseFailed,
            message: FAILURE_MESSAGE.to_string(),
        }
    }
}

/// The single outbound call an activation produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingParaphrase {
    pub text: String,
}

/// How a request ended
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Replacement inserted; the range it now covers
    Replaced(TextRange),
    /// Nothing changed; the notice is showing
    Failed(Notice),
    /// Activation was refused before any call went out
    Rejected,
    /// A response arrived with no request outstanding
    Ignored,
}

/// Drives the paraphrase feature on top of an editable surface
#[derive(Debug, Default)]
pub struct ParaphraseController {
    state: ControllerState,
    notice: Option<Notice>,
    requests_issued: u64,
}

impl ParaphraseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Request lifecycle flag
    pub fn is_busy(&self) -> bool {
        matches!(self.state, ControllerState::Paraphrasing { .. })
    }

    /// Blocking notice currently shown, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Number of outbound calls handed out so far
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// Snapshot the next activation would paraphrase
    pub fn active_selection(&self) -> Option<&SelectionSnapshot> {
        match &self.state {
            ControllerState::SelectionActive(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// React to a selection change reported by the editable surface
    pub fn on_selection(&mut self, event: SelectionEvent) {
        let snapshot = match event {
            SelectionEvent::Changed(snapshot) if snapshot.is_active() => Some(snapshot),
            _ => None,
        };

        match &mut self.state {
            ControllerState::Paraphrasing { live, .. } => {
                // The captured range stays authoritative until the reply lands
                *live = snapshot;
            }
            state => {
                *state = match snapshot {
                    Some(snapshot) => {
                        debug!("🖱️ Selection active: {:?}", snapshot.range);
                        ControllerState::SelectionActive(snapshot)
                    }
                    None => ControllerState::Idle,
                };
            }
        }
    }

    /// Keep captured ranges pointing at the same text across user edits
    pub fn on_document_edit(&mut self, edit: &Edit) {
        match &mut self.state {
            ControllerState::Idle => {}
            ControllerState::SelectionActive(snapshot) => {
                snapshot.range = snapshot.range.rebase(edit);
            }
            ControllerState::Paraphrasing { captured, live } => {
                captured.range = captured.range.rebase(edit);
                if let Some(live) = live {
                    live.range = live.range.rebase(edit);
                }
            }
        }
    }

    /// The floating control to render, or `None` when it is hidden
    pub fn floating_control(&self) -> Option<FloatingControl> {
        match &self.state {
            ControllerState::Idle => None,
            ControllerState::SelectionActive(snapshot) => {
                Some(FloatingControl::at(snapshot.anchor, false))
            }
            ControllerState::Paraphrasing { live, .. } => live
                .as_ref()
                .map(|snapshot| FloatingControl::at(snapshot.anchor, true)),
        }
    }

    /// Start paraphrasing the active selection.
    ///
    /// On success the controller is busy and the caller must issue exactly
    /// one call with the returned text, then report back via [`complete`].
    ///
    /// [`complete`]: ParaphraseController::complete
    pub fn activate(&mut self) -> RephraseResult<PendingParaphrase> {
        match std::mem::take(&mut self.state) {
            ControllerState::SelectionActive(snapshot) if snapshot.is_active() => {
                let pending = PendingParaphrase {
                    text: snapshot.text.clone(),
                };
                info!("🪄 Paraphrasing {} characters", snapshot.text.chars().count());
                self.state = ControllerState::Paraphrasing {
                    captured: snapshot,
                    live: None,
                };
                self.requests_issued += 1;
                Ok(pending)
            }
            busy @ ControllerState::Paraphrasing { .. } => {
                debug!("Activation ignored, request already in flight");
                self.state = busy;
                Err(RephraseError::Busy)
            }
            _ => {
                warn!("⚠️ Paraphrase activated without a selection");
                self.notice = Some(Notice::empty_selection());
                Err(RephraseError::EmptySelection)
            }
        }
    }

    /// Finish the in-flight request with the service outcome
    pub fn complete<H: SelectionHost + ?Sized>(
        &mut self,
        host: &mut H,
        outcome: RephraseResult<String>,
    ) -> Completion {
        let captured = match std::mem::take(&mut self.state) {
            ControllerState::Paraphrasing { captured, .. } => captured,
            other => {
                warn!("⚠️ Paraphrase response arrived with nothing in flight");
                self.state = other;
                return Completion::Ignored;
            }
        };

        let replacement = match outcome {
            Ok(replacement) => replacement,
            Err(e) => {
                warn!("❌ Paraphrase failed: {}", e);
                return self.fail();
            }
        };

        match host.replace_range(captured.range, &replacement) {
            Ok(inserted) => {
                info!("✅ Replaced selection with paraphrase");
                debug!("Paraphrase: '{}' -> '{}'", captured.text, replacement);
                Completion::Replaced(inserted)
            }
            Err(e) => {
                warn!("❌ Could not substitute paraphrase: {}", e);
                self.fail()
            }
        }
    }

    fn fail(&mut self) -> Completion {
        let notice = Notice::failed();
        self.notice = Some(notice.clone());
        Completion::Failed(notice)
    }

    /// Activate, make the one call, and apply the result
    pub async fn run<H, P>(&mut self, host: &mut H, service: &P) -> Completion
    where
        H: SelectionHost + ?Sized,
        P: Paraphraser + ?Sized,
    {
        let pending = match self.activate() {
            Ok(pending) => pending,
            Err(_) => return Completion::Rejected,
        };
        let outcome = service.paraphrase(&pending.text).await;
        self.complete(host, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{EditableSurface, LayoutMetrics, TextSurface};

    fn selected(text: &str, needle: &str) -> (TextSurface, ParaphraseController) {
        let mut host = TextSurface::new(text, LayoutMetrics::default());
        host.select_text(needle);
        let editable = EditableSurface::new(host.text());
        let mut controller = ParaphraseController::new();
        controller.on_selection(editable.on_selection_change(&host));
        (host, controller)
    }

    #[test]
    fn test_state_flow() {
        let (mut host, mut controller) = selected("The cat sat.", "cat");
        assert!(matches!(
            controller.state(),
            ControllerState::SelectionActive(_)
        ));
        assert!(controller.floating_control().unwrap().enabled);

        let pending = controller.activate().unwrap();
        assert_eq!(pending.text, "cat");
        assert!(controller.is_busy());
        assert_eq!(controller.floating_control(), None);

        let done = controller.complete(&mut host, Ok("feline".to_string()));
        assert_eq!(done, Completion::Replaced(TextRange::new(4, 10)));
        assert_eq!(host.text(), "The feline sat.");
        assert_eq!(controller.state(), &ControllerState::Idle);
    }

    #[test]
    fn test_control_centred_over_anchor() {
        let (_, controller) = selected("The cat sat.", "cat");
        let anchor = controller.active_selection().unwrap().anchor;
        let control = controller.floating_control().unwrap();
        assert_eq!(control.position.x, anchor.x - CONTROL_HALF_WIDTH);
        assert_eq!(control.position.y, anchor.y);
        assert_eq!(control.label, LABEL_IDLE);
    }

    #[test]
    fn test_activate_without_selection_shows_notice() {
        let mut controller = ParaphraseController::new();
        let err = controller.activate().unwrap_err();
        assert!(matches!(err, RephraseError::EmptySelection));
        assert_eq!(
            controller.notice().map(|n| n.kind),
            Some(NoticeKind::EmptySelection)
        );
        assert_eq!(controller.requests_issued(), 0);

        controller.dismiss_notice();
        assert!(controller.notice().is_none());
    }

    #[test]
    fn test_second_activation_while_busy_is_rejected() {
        let (_, mut controller) = selected("The cat sat.", "cat");
        controller.activate().unwrap();
        assert!(matches!(controller.activate(), Err(RephraseError::Busy)));
        assert_eq!(controller.requests_issued(), 1);
        assert!(controller.notice().is_none());
    }

    #[test]
    fn test_selection_while_busy_shows_disabled_control() {
        let (host, mut controller) = selected("The cat sat.", "cat");
        controller.activate().unwrap();

        let mut other = host.clone();
        other.select_text("sat");
        controller.on_selection(EditableSurface::new(other.text()).on_selection_change(&other));

        let control = controller.floating_control().unwrap();
        assert!(!control.enabled);
        assert_eq!(control.label, LABEL_BUSY);
        match controller.state() {
            ControllerState::Paraphrasing { captured, .. } => assert_eq!(captured.text, "cat"),
            other => panic!("Expected Paraphrasing, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_leaves_document_alone() {
        let (mut host, mut controller) = selected("Hello world", "world");
        controller.activate().unwrap();

        let done = controller.complete(&mut host, Err(RephraseError::Status(500)));
        assert!(matches!(done, Completion::Failed(_)));
        assert_eq!(host.text(), "Hello world");
        assert!(!controller.is_busy());
        assert_eq!(
            controller.notice().map(|n| n.message.as_str()),
            Some(FAILURE_MESSAGE)
        );
    }

    #[test]
    fn test_edit_during_request_rebases_capture() {
        let (mut host, mut controller) = selected("The cat sat.", "cat");
        controller.activate().unwrap();

        controller.on_document_edit(&Edit {
            offset: 0,
            removed: 0,
            inserted: 4,
        });
        host.collapse_to(0);
        host.type_text("Yes ").unwrap();

        controller.complete(&mut host, Ok("dog".to_string()));
        assert_eq!(host.text(), "Yes The dog sat.");
    }

    #[test]
    fn test_response_without_request_is_ignored() {
        let mut host = TextSurface::new("abc", LayoutMetrics::default());
        let mut controller = ParaphraseController::new();
        let done = controller.complete(&mut host, Ok("x".to_string()));
        assert_eq!(done, Completion::Ignored);
        assert_eq!(host.text(), "abc");
    }

    #[test]
    fn test_whitespace_selection_keeps_idle() {
        let (_, controller) = selected("a   b", "   ");
        assert_eq!(controller.state(), &ControllerState::Idle);
        assert_eq!(controller.floating_control(), None);
    }
}
