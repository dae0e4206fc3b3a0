use super::*;

impl PageDocument {
    pub(crate) fn new(dom: Dom) -> Self {
        Self {
            dom,
            scheduler: SchedulerState::default(),
            trace: TraceState::default(),
        }
    }

    pub(crate) fn schedule_task(&mut self, delay_ms: i64, task: TimerTask) -> TimerId {
        let label = task.label();
        let scheduled = self.scheduler.schedule(delay_ms, task);
        self.trace.timer_line(format!(
            "[timer] schedule id={} due_at={} task={label}",
            scheduled.id, scheduled.due_at
        ));
        scheduled.id
    }

    pub(crate) fn cancel_task(&mut self, id: TimerId) -> bool {
        let existed = self.scheduler.cancel(id);
        self.trace
            .timer_line(format!("[timer] clear id={id} existed={existed}"));
        existed
    }
}

impl Surface for PageDocument {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.by_id(id)
    }

    fn class_contains(&self, element: NodeId, class_name: &str) -> bool {
        self.dom.class_contains(element, class_name)
    }

    fn class_add(&mut self, element: NodeId, class_name: &str) {
        self.dom.class_add(element, class_name);
    }

    fn class_remove(&mut self, element: NodeId, class_name: &str) {
        self.dom.class_remove(element, class_name);
    }

    fn set_text_content(&mut self, element: NodeId, text: &str) {
        self.dom.set_text_content(element, text);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = self.dom.body() else {
            return;
        };
        let overflow = if locked { "hidden" } else { "auto" };
        self.dom.style_set(body, "overflow", overflow);
    }

    fn schedule(&mut self, delay_ms: i64, task: SessionTask) -> TimerId {
        self.schedule_task(delay_ms, TimerTask::Session(task))
    }

    fn cancel_timer(&mut self, id: TimerId) -> bool {
        self.cancel_task(id)
    }

    fn trace(&mut self, line: String) {
        self.trace.session_line(line);
    }
}
