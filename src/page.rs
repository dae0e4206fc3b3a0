use super::*;

mod actions;
mod assertions;
mod bootstrap;
mod class_helpers;
mod surface;
mod timers;

pub use class_helpers::DEFAULT_CLASS_STAGGER_MS;

/// Element ids of the widgets driven by animation sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetIds {
    pub animated_box: String,
    pub modal: String,
    pub modal_title: String,
    pub modal_text: String,
    pub loading_spinner: String,
    pub loading_text: String,
}

impl Default for WidgetIds {
    fn default() -> Self {
        Self {
            animated_box: "animated-box".into(),
            modal: "animated-modal".into(),
            modal_title: "modal-title".into(),
            modal_text: "modal-text".into(),
            loading_spinner: "loading-spinner".into(),
            loading_text: "loading-text".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub timings: ControllerTimings,
    pub widget_ids: WidgetIds,
    /// Upper bound on timers run by one `flush`/`advance_time` call.
    pub timer_step_limit: usize,
    pub random_seed: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            timings: ControllerTimings::default(),
            widget_ids: WidgetIds::default(),
            timer_step_limit: 10_000,
            random_seed: 0,
        }
    }
}

/// DOM, clock and trace of a page: everything the controller touches.
#[derive(Debug)]
pub(crate) struct PageDocument {
    pub(crate) dom: Dom,
    pub(crate) scheduler: SchedulerState,
    pub(crate) trace: TraceState,
}

#[derive(Debug, Default)]
pub(crate) struct WidgetState {
    pub(crate) click_count: u64,
    pub(crate) counter: i64,
    pub(crate) theme: Theme,
    pub(crate) press_restore_timer: Option<TimerId>,
    pub(crate) hover_hide_timer: Option<TimerId>,
    pub(crate) global_counter: i64,
}

#[derive(Debug, Default)]
pub(crate) struct DialogMocks {
    pub(crate) alert_messages: Vec<String>,
    pub(crate) prompt_responses: VecDeque<Option<String>>,
    pub(crate) default_prompt_response: Option<String>,
}

#[derive(Debug)]
pub struct Page {
    pub(crate) document: PageDocument,
    pub(crate) sessions: SessionStore,
    pub(crate) controller: AnimationController,
    pub(crate) listeners: ListenerStore,
    pub(crate) storage: LocalStorage,
    pub(crate) widget_ids: WidgetIds,
    pub(crate) rng: Rng,
    pub(crate) widgets: WidgetState,
    pub(crate) dialogs: DialogMocks,
}

impl Page {
    pub fn enable_trace(&mut self, enabled: bool) {
        self.document.trace.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.document.trace.take_logs()
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.document.trace.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.document.trace.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.document.trace.timers = enabled;
    }

    pub fn set_trace_sessions(&mut self, enabled: bool) {
        self.document.trace.sessions = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.document.trace.set_log_limit(max_entries)
    }

    pub fn set_random_seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Timer(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.document.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.widgets.theme
    }

    pub fn local_storage_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).map(ToOwned::to_owned)
    }

    pub fn enqueue_prompt_response(&mut self, response: Option<&str>) {
        self.dialogs
            .prompt_responses
            .push_back(response.map(ToOwned::to_owned));
    }

    pub fn set_default_prompt_response(&mut self, response: Option<&str>) {
        self.dialogs.default_prompt_response = response.map(ToOwned::to_owned);
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.dialogs.alert_messages)
    }

    /// Page-wide counter read and bumped by the scope walkthrough.
    pub fn global_counter(&self) -> i64 {
        self.widgets.global_counter
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.count()
    }

    pub fn trigger_box_animation(&mut self, animation_name: &str) {
        let id = self.box_session_id();
        self.with_session(id, |controller, document, session| {
            controller.trigger_box_animation(document, session, animation_name);
        });
    }

    pub fn open_modal(&mut self, animation_name: &str) {
        let id = self.modal_session_id();
        self.with_session(id, |controller, document, session| {
            controller.open_modal(document, session, animation_name);
        });
    }

    pub fn close_modal(&mut self) {
        let id = self.modal_session_id();
        self.with_session(id, |controller, document, session| {
            controller.close_modal(document, session);
        });
    }

    pub fn start_loading(&mut self) {
        let id = self.loading_session_id();
        self.with_session(id, |controller, document, session| {
            controller.start_loading(document, session);
        });
    }

    pub fn stop_loading(&mut self) {
        let id = self.loading_session_id();
        self.with_session(id, |controller, document, session| {
            controller.stop_loading(document, session);
        });
    }

    pub fn complete_loading(&mut self) {
        let id = self.loading_session_id();
        self.with_session(id, |controller, document, session| {
            controller.complete_loading(document, session);
        });
    }

    pub fn box_session(&self) -> Option<&AnimationSession> {
        self.session(&self.widget_ids.animated_box)
    }

    pub fn modal_session(&self) -> Option<&AnimationSession> {
        self.session(&self.widget_ids.modal)
    }

    pub fn loading_session(&self) -> Option<&AnimationSession> {
        self.session(&self.widget_ids.loading_spinner)
    }

    /// Session keyed by the id of the element it drives. Sessions appear on
    /// first interaction with their widget.
    pub fn session(&self, element_id: &str) -> Option<&AnimationSession> {
        self.sessions
            .id_for(element_id)
            .and_then(|id| self.sessions.get(id))
    }

    pub fn sessions(&self) -> impl Iterator<Item = &AnimationSession> {
        self.sessions.iter()
    }

    /// Number of queued timers owned by `session`.
    pub fn session_pending_timer_count(&self, session: SessionId) -> usize {
        self.document
            .scheduler
            .task_queue
            .iter()
            .filter(|task| matches!(&task.task, TimerTask::Session(owned) if owned.session == session))
            .count()
    }

    pub(crate) fn with_session(
        &mut self,
        id: SessionId,
        f: impl FnOnce(&AnimationController, &mut PageDocument, &mut AnimationSession),
    ) {
        let Some(session) = self.sessions.get_mut(id) else {
            return;
        };
        f(&self.controller, &mut self.document, session);
    }

    fn box_session_id(&mut self) -> SessionId {
        let target = self.widget_ids.animated_box.clone();
        self.sessions.get_or_insert_with(&target, |id| {
            AnimationSession::box_animation(id, &target)
        })
    }

    fn modal_session_id(&mut self) -> SessionId {
        let ids = &self.widget_ids;
        self.sessions.get_or_insert_with(&ids.modal, |id| {
            AnimationSession::modal(id, &ids.modal).with_modal_copy(&ids.modal_title, &ids.modal_text)
        })
    }

    fn loading_session_id(&mut self) -> SessionId {
        let ids = &self.widget_ids;
        self.sessions.get_or_insert_with(&ids.loading_spinner, |id| {
            AnimationSession::loading(id, &ids.loading_spinner, &ids.loading_text)
        })
    }
}
