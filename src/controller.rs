use super::*;
use crate::session::SessionWidget;

pub(crate) const MODAL_VISIBLE_CLASS: &str = "show";
pub(crate) const SPINNER_ACTIVE_CLASS: &str = "active";
pub(crate) const STATUS_LOADING_CLASS: &str = "loading";
pub(crate) const STATUS_COMPLETE_CLASS: &str = "complete";

pub(crate) const LOADING_MESSAGE: &str = "Loading... Please wait";
pub(crate) const STOPPED_MESSAGE: &str = "Loading stopped by user";
pub(crate) const COMPLETE_MESSAGE: &str = "✅ Loading Complete!";
pub(crate) const IDLE_MESSAGE: &str = "Ready to load again...";

/// A step a session asked to run later on the surface's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTask {
    pub session: SessionId,
    pub step: SessionStep,
}

/// DOM and timer capabilities the controller drives.
///
/// Lookups return `None` for elements that are not on the page; the
/// controller turns that into a no-op.
pub trait Surface {
    type Element: Copy;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn class_contains(&self, element: Self::Element, class_name: &str) -> bool;
    fn class_add(&mut self, element: Self::Element, class_name: &str);
    fn class_remove(&mut self, element: Self::Element, class_name: &str);
    fn set_text_content(&mut self, element: Self::Element, text: &str);
    /// Locks (or restores) scrolling of the page behind a modal.
    fn set_scroll_locked(&mut self, locked: bool);
    fn schedule(&mut self, delay_ms: i64, task: SessionTask) -> TimerId;
    /// Idempotent: unknown or already fired ids return false.
    fn cancel_timer(&mut self, id: TimerId) -> bool;

    fn trace(&mut self, _line: String) {}
}

/// Sequences class changes and timers for animation sessions.
///
/// Every operation first cancels the session's outstanding timer (if any)
/// before it schedules a new one, so a session never has more than one
/// pending step.
#[derive(Debug, Clone, Default)]
pub struct AnimationController {
    timings: ControllerTimings,
}

impl AnimationController {
    pub fn new(timings: ControllerTimings) -> Self {
        Self { timings }
    }

    pub fn timings(&self) -> ControllerTimings {
        self.timings
    }

    pub fn trigger_box_animation<S: Surface>(
        &self,
        surface: &mut S,
        session: &mut AnimationSession,
        animation_name: &str,
    ) {
        let Some(element) = box_element(surface, session) else {
            skip(surface, session, "trigger_box_animation");
            return;
        };

        cancel_pending(surface, session);
        for animation in BoxAnimation::ALL {
            surface.class_remove(element, animation.class_name());
        }
        session.active_class = None;

        let Some(animation) = BoxAnimation::parse(animation_name) else {
            surface.trace(format!(
                "[session] id={} trigger_box_animation unknown={animation_name}",
                session.id()
            ));
            return;
        };
        self.schedule(
            surface,
            session,
            self.timings.box_apply_delay_ms,
            SessionStep::ApplyBoxAnimation(animation),
        );
    }

    pub fn open_modal<S: Surface>(
        &self,
        surface: &mut S,
        session: &mut AnimationSession,
        animation_name: &str,
    ) {
        let SessionWidget::Modal {
            modal, title, text, ..
        } = &session.widget
        else {
            skip(surface, session, "open_modal");
            return;
        };
        let Some(element) = surface.element_by_id(modal) else {
            skip(surface, session, "open_modal");
            return;
        };
        let title = title.as_deref().and_then(|id| surface.element_by_id(id));
        let text = text.as_deref().and_then(|id| surface.element_by_id(id));

        cancel_pending(surface, session);
        if let Some(title) = title {
            surface.set_text_content(title, &format!("{animation_name} Animation Modal"));
        }
        if let Some(text) = text {
            surface.set_text_content(
                text,
                &format!(
                    "This modal appeared using the \"{animation_name}\" animation effect! The animation is triggered by JavaScript adding CSS classes."
                ),
            );
        }
        for animation in ModalAnimation::ALL {
            surface.class_remove(element, animation.class_name());
        }

        session.set_open(true);
        surface.class_add(element, MODAL_VISIBLE_CLASS);
        session.active_class = ModalAnimation::parse(animation_name).map(|animation| {
            surface.class_add(element, animation.class_name());
            animation.class_name().to_string()
        });
        surface.set_scroll_locked(true);
        surface.trace(format!(
            "[session] id={} open_modal animation={animation_name}",
            session.id()
        ));
    }

    pub fn close_modal<S: Surface>(&self, surface: &mut S, session: &mut AnimationSession) {
        if !session.is_open() {
            return;
        }
        let Some(element) = modal_element(surface, session) else {
            skip(surface, session, "close_modal");
            return;
        };

        cancel_pending(surface, session);
        surface.class_remove(element, MODAL_VISIBLE_CLASS);
        session.set_open(false);
        surface.set_scroll_locked(false);
        self.schedule(
            surface,
            session,
            self.timings.modal_exit_ms,
            SessionStep::ClearModalAnimations,
        );
    }

    pub fn start_loading<S: Surface>(&self, surface: &mut S, session: &mut AnimationSession) {
        let Some((spinner, status)) = loading_elements(surface, session) else {
            skip(surface, session, "start_loading");
            return;
        };

        cancel_pending(surface, session);
        surface.class_add(spinner, SPINNER_ACTIVE_CLASS);
        surface.class_remove(status, STATUS_COMPLETE_CLASS);
        surface.class_add(status, STATUS_LOADING_CLASS);
        surface.set_text_content(status, LOADING_MESSAGE);
        session.set_phase(LoadingPhase::Loading);
        session.active_class = Some(STATUS_LOADING_CLASS.to_string());
        self.schedule(
            surface,
            session,
            self.timings.loading_timeout_ms,
            SessionStep::AutoCompleteLoading,
        );
    }

    pub fn stop_loading<S: Surface>(&self, surface: &mut S, session: &mut AnimationSession) {
        if session.loading_phase() != Some(LoadingPhase::Loading) {
            return;
        }
        let Some((spinner, status)) = loading_elements(surface, session) else {
            skip(surface, session, "stop_loading");
            return;
        };

        cancel_pending(surface, session);
        surface.class_remove(spinner, SPINNER_ACTIVE_CLASS);
        surface.class_remove(status, STATUS_LOADING_CLASS);
        surface.set_text_content(status, STOPPED_MESSAGE);
        session.set_phase(LoadingPhase::StoppedByUser);
        session.active_class = None;
    }

    pub fn complete_loading<S: Surface>(&self, surface: &mut S, session: &mut AnimationSession) {
        let Some((spinner, status)) = loading_elements(surface, session) else {
            skip(surface, session, "complete_loading");
            return;
        };

        cancel_pending(surface, session);
        surface.class_remove(spinner, SPINNER_ACTIVE_CLASS);
        surface.class_remove(status, STATUS_LOADING_CLASS);
        surface.class_add(status, STATUS_COMPLETE_CLASS);
        surface.set_text_content(status, COMPLETE_MESSAGE);
        session.set_phase(LoadingPhase::Completed);
        session.active_class = Some(STATUS_COMPLETE_CLASS.to_string());
        self.schedule(
            surface,
            session,
            self.timings.loading_revert_ms,
            SessionStep::RevertLoadingStatus,
        );
    }

    /// Runs a fired step. `timer` must be the session's current handle;
    /// anything else is stale and ignored.
    pub fn run_step<S: Surface>(
        &self,
        surface: &mut S,
        session: &mut AnimationSession,
        timer: TimerId,
        step: SessionStep,
    ) {
        if session.pending_timer != Some(timer) {
            surface.trace(format!(
                "[session] id={} stale timer={timer} step={}",
                session.id(),
                step.name()
            ));
            return;
        }
        session.pending_timer = None;

        match step {
            SessionStep::ApplyBoxAnimation(animation) => {
                let Some(element) = box_element(surface, session) else {
                    return;
                };
                surface.class_add(element, animation.class_name());
                session.active_class = Some(animation.class_name().to_string());
                let remaining =
                    self.timings.box_animation_ms - self.timings.box_apply_delay_ms;
                self.schedule(
                    surface,
                    session,
                    remaining.max(0),
                    SessionStep::ClearBoxAnimation(animation),
                );
            }
            SessionStep::ClearBoxAnimation(animation) => {
                if let Some(element) = box_element(surface, session) {
                    surface.class_remove(element, animation.class_name());
                }
                session.active_class = None;
            }
            SessionStep::ClearModalAnimations => {
                if let Some(element) = modal_element(surface, session) {
                    for animation in ModalAnimation::ALL {
                        surface.class_remove(element, animation.class_name());
                    }
                }
                session.active_class = None;
            }
            SessionStep::AutoCompleteLoading => self.complete_loading(surface, session),
            SessionStep::RevertLoadingStatus => {
                if let Some((_, status)) = loading_elements(surface, session) {
                    surface.class_remove(status, STATUS_COMPLETE_CLASS);
                    surface.set_text_content(status, IDLE_MESSAGE);
                }
                session.set_phase(LoadingPhase::Idle);
                session.active_class = None;
            }
        }
    }

    fn schedule<S: Surface>(
        &self,
        surface: &mut S,
        session: &mut AnimationSession,
        delay_ms: i64,
        step: SessionStep,
    ) {
        cancel_pending(surface, session);
        let id = surface.schedule(
            delay_ms,
            SessionTask {
                session: session.id(),
                step,
            },
        );
        session.pending_timer = Some(id);
    }
}

fn cancel_pending<S: Surface>(surface: &mut S, session: &mut AnimationSession) {
    if let Some(id) = session.pending_timer.take() {
        surface.cancel_timer(id);
    }
}

fn skip<S: Surface>(surface: &mut S, session: &AnimationSession, operation: &str) {
    surface.trace(format!(
        "[session] id={} {operation} skipped kind={:?}",
        session.id(),
        session.kind()
    ));
}

fn box_element<S: Surface>(surface: &S, session: &AnimationSession) -> Option<S::Element> {
    match &session.widget {
        SessionWidget::BoxAnimation { target } => surface.element_by_id(target),
        _ => None,
    }
}

fn modal_element<S: Surface>(surface: &S, session: &AnimationSession) -> Option<S::Element> {
    match &session.widget {
        SessionWidget::Modal { modal, .. } => surface.element_by_id(modal),
        _ => None,
    }
}

fn loading_elements<S: Surface>(
    surface: &S,
    session: &AnimationSession,
) -> Option<(S::Element, S::Element)> {
    match &session.widget {
        SessionWidget::Loading {
            spinner, status, ..
        } => Some((surface.element_by_id(spinner)?, surface.element_by_id(status)?)),
        _ => None,
    }
}
