use super::*;

/// Minimal surface: elements are indexes into `ids`, timers are only recorded.
#[derive(Debug, Default)]
struct RecordingSurface {
    ids: Vec<String>,
    classes: Vec<Vec<String>>,
    texts: Vec<String>,
    scroll_locked: bool,
    next_timer: i64,
    scheduled: Vec<(TimerId, i64, SessionTask)>,
    cancelled: Vec<TimerId>,
    traces: Vec<String>,
}

impl RecordingSurface {
    fn with_elements(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| (*id).to_string()).collect(),
            classes: vec![Vec::new(); ids.len()],
            texts: vec![String::new(); ids.len()],
            ..Self::default()
        }
    }

    fn classes_of(&self, id: &str) -> Vec<String> {
        self.element_by_id(id)
            .map(|idx| self.classes[idx].clone())
            .unwrap_or_default()
    }

    fn live_timers(&self) -> Vec<(TimerId, i64, SessionTask)> {
        self.scheduled
            .iter()
            .filter(|(id, _, _)| !self.cancelled.contains(id))
            .copied()
            .collect()
    }
}

impl Surface for RecordingSurface {
    type Element = usize;

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    fn class_contains(&self, element: usize, class_name: &str) -> bool {
        self.classes[element].iter().any(|name| name == class_name)
    }

    fn class_add(&mut self, element: usize, class_name: &str) {
        if !self.class_contains(element, class_name) {
            self.classes[element].push(class_name.to_string());
        }
    }

    fn class_remove(&mut self, element: usize, class_name: &str) {
        self.classes[element].retain(|name| name != class_name);
    }

    fn set_text_content(&mut self, element: usize, text: &str) {
        self.texts[element] = text.to_string();
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn schedule(&mut self, delay_ms: i64, task: SessionTask) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.scheduled.push((id, delay_ms, task));
        id
    }

    fn cancel_timer(&mut self, id: TimerId) -> bool {
        let live = self.scheduled.iter().any(|(scheduled, _, _)| *scheduled == id)
            && !self.cancelled.contains(&id);
        if live {
            self.cancelled.push(id);
        }
        live
    }

    fn trace(&mut self, line: String) {
        self.traces.push(line);
    }
}

#[test]
fn controller_runs_against_any_surface() {
    let controller = AnimationController::default();
    let mut surface = RecordingSurface::with_elements(&["box"]);
    let mut session = AnimationSession::box_animation(SessionId(0), "box");

    controller.trigger_box_animation(&mut surface, &mut session, "flip");
    let [(apply_id, apply_delay, apply)] = surface.live_timers()[..] else {
        panic!("expected one live timer, got {:?}", surface.live_timers());
    };
    assert_eq!(apply_delay, 50);
    assert_eq!(apply.step, SessionStep::ApplyBoxAnimation(BoxAnimation::Flip));

    controller.run_step(&mut surface, &mut session, apply_id, apply.step);
    assert_eq!(surface.classes_of("box"), vec!["flip".to_string()]);
    let [(clear_id, clear_delay, clear)] = surface.live_timers()[..] else {
        panic!("expected the clear step, got {:?}", surface.live_timers());
    };
    assert_eq!(clear_delay, 950);

    controller.run_step(&mut surface, &mut session, clear_id, clear.step);
    assert!(surface.classes_of("box").is_empty());
    assert_eq!(session.pending_timer(), None);
}

#[test]
fn stale_timer_is_ignored() {
    let controller = AnimationController::default();
    let mut surface = RecordingSurface::with_elements(&["box"]);
    let mut session = AnimationSession::box_animation(SessionId(3), "box");

    controller.trigger_box_animation(&mut surface, &mut session, "bounce");
    let (stale_id, _, stale) = surface.scheduled[0];
    controller.trigger_box_animation(&mut surface, &mut session, "shake");
    assert_eq!(surface.cancelled, vec![stale_id]);

    controller.run_step(&mut surface, &mut session, stale_id, stale.step);
    assert!(surface.classes_of("box").is_empty());
    assert!(session.pending_timer().is_some());
    assert!(surface.traces.iter().any(|line| line.contains("stale timer")));
}

#[test]
fn operations_on_the_wrong_session_kind_are_no_ops() {
    let controller = AnimationController::default();
    let mut surface = RecordingSurface::with_elements(&["box", "modal", "spinner", "status"]);
    let mut box_session = AnimationSession::box_animation(SessionId(0), "box");
    let mut modal_session = AnimationSession::modal(SessionId(1), "modal");

    controller.open_modal(&mut surface, &mut box_session, "fadeIn");
    controller.start_loading(&mut surface, &mut box_session);
    controller.trigger_box_animation(&mut surface, &mut modal_session, "bounce");

    assert!(surface.scheduled.is_empty());
    assert!(!surface.scroll_locked);
    assert!(surface.classes.iter().all(Vec::is_empty));
    assert_eq!(box_session.kind(), SessionKind::BoxAnimation);
    assert!(!box_session.is_open());
    assert_eq!(box_session.loading_phase(), None);
}

#[test]
fn modal_session_tracks_scroll_lock_and_open_state() {
    let controller = AnimationController::default();
    let mut surface = RecordingSurface::with_elements(&["modal", "title", "text"]);
    let mut session =
        AnimationSession::modal(SessionId(0), "modal").with_modal_copy("title", "text");

    controller.open_modal(&mut surface, &mut session, "slideIn");
    assert!(surface.scroll_locked);
    assert!(session.is_open());
    assert_eq!(session.active_class(), Some("slideIn"));
    assert_eq!(surface.texts[1], "slideIn Animation Modal");

    controller.close_modal(&mut surface, &mut session);
    controller.close_modal(&mut surface, &mut session);
    assert!(!surface.scroll_locked);
    assert_eq!(surface.live_timers().len(), 1);
    assert_eq!(surface.live_timers()[0].1, 300);
}

#[test]
fn timings_are_taken_from_the_controller() {
    let controller = AnimationController::new(ControllerTimings {
        loading_timeout_ms: 1_234,
        ..ControllerTimings::default()
    });
    let mut surface = RecordingSurface::with_elements(&["spinner", "status"]);
    let mut session = AnimationSession::loading(SessionId(0), "spinner", "status");

    controller.start_loading(&mut surface, &mut session);
    assert_eq!(controller.timings().loading_timeout_ms, 1_234);
    assert_eq!(surface.live_timers()[0].1, 1_234);
    assert_eq!(surface.texts[1], "Loading... Please wait");
}
