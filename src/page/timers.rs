use super::*;

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.document.scheduler.now_ms
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.document.scheduler.pending()
    }

    /// Cancels a queued timer. Unknown or already fired ids return false.
    /// A session that owned the timer forgets its handle.
    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        let owner = self.document.scheduler.session_of(id);
        let cleared = self.document.cancel_task(id);
        if cleared {
            self.release_timer_handle(owner, id);
        }
        cleared
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let pending = self.document.scheduler.pending();
        self.document.scheduler.task_queue.clear();
        for timer in &pending {
            self.release_timer_handle(timer.session, timer.id);
        }
        self.document
            .trace
            .timer_line(format!("[timer] clear_all cleared={}", pending.len()));
        pending.len()
    }

    fn release_timer_handle(&mut self, owner: Option<SessionId>, id: TimerId) {
        if self.widgets.press_restore_timer == Some(id) {
            self.widgets.press_restore_timer = None;
        }
        if self.widgets.hover_hide_timer == Some(id) {
            self.widgets.hover_hide_timer = None;
        }
        let Some(session) = owner.and_then(|owner| self.sessions.get_mut(owner)) else {
            return;
        };
        if session.pending_timer == Some(id) {
            session.pending_timer = None;
            self.document.trace.session_line(format!(
                "[session] id={} released cancelled timer={id}",
                session.id()
            ));
        }
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Timer(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let target = self.document.scheduler.now_ms.saturating_add(delta_ms);
        let from = self.document.scheduler.now_ms;
        let ran = self.run_until(target)?;
        self.document.trace.timer_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={} ran_due={ran}",
            self.document.scheduler.now_ms
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.document.scheduler.now_ms {
            return Err(Error::Timer(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.document.scheduler.now_ms
            )));
        }
        let from = self.document.scheduler.now_ms;
        let ran = self.run_until(target_ms)?;
        self.document.trace.timer_line(format!(
            "[timer] advance_to from={from} to={} ran_due={ran}",
            self.document.scheduler.now_ms
        ));
        Ok(())
    }

    /// Runs every queued timer, including ones scheduled while flushing,
    /// moving the clock forward to each due time.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.document.scheduler.now_ms;
        let ran = self.run_timer_queue(None)?;
        self.document.trace.timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.document.scheduler.now_ms
        ));
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.document.scheduler.next_task_index(None) else {
            self.document
                .trace
                .timer_line("[timer] run_next none".into());
            return Ok(false);
        };
        let task = self.document.scheduler.take_task(next_idx);
        if task.due_at > self.document.scheduler.now_ms {
            self.document.scheduler.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    /// Runs timers already due at the current time without moving the clock.
    pub fn run_due_timers(&mut self) -> Result<usize> {
        let now = self.document.scheduler.now_ms;
        let ran = self.run_timer_queue(Some(now))?;
        self.document.trace.timer_line(format!(
            "[timer] run_due now_ms={now} ran={ran}"
        ));
        Ok(ran)
    }

    // Timers fire in (due_at, order) order and the clock visits each due
    // time on the way, so a step scheduled by a fired timer inside the
    // window runs in the same call.
    fn run_until(&mut self, target_ms: i64) -> Result<usize> {
        let ran = self.run_timer_queue(Some(target_ms))?;
        self.document.scheduler.now_ms = target_ms;
        Ok(ran)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.document.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.document.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(steps, due_limit));
            }
            let task = self.document.scheduler.take_task(next_idx);
            if task.due_at > self.document.scheduler.now_ms {
                self.document.scheduler.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn timer_step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let scheduler = &self.document.scheduler;
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        let next_task_desc = scheduler
            .next_task_index(due_limit)
            .and_then(|idx| scheduler.task_queue.get(idx))
            .map(|task| {
                format!(
                    "id={},due_at={},order={},task={}",
                    task.id,
                    task.due_at,
                    task.order,
                    task.task.label()
                )
            })
            .unwrap_or_else(|| "none".into());
        Error::Timer(format!(
            "timer queue exceeded max steps: limit={}, steps={steps}, now_ms={}, due_limit={due_limit_desc}, pending_tasks={}, next_task={next_task_desc}",
            scheduler.timer_step_limit,
            scheduler.now_ms,
            scheduler.task_queue.len(),
        ))
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.document.trace.timer_line(format!(
            "[timer] run id={} due_at={} task={} now_ms={}",
            task.id,
            task.due_at,
            task.task.label(),
            self.document.scheduler.now_ms
        ));

        match task.task {
            TimerTask::Session(SessionTask { session, step }) => {
                self.with_session(session, |controller, document, session| {
                    controller.run_step(document, session, task.id, step);
                });
            }
            TimerTask::RemoveNode(node) => {
                if self.document.dom.is_connected(node) {
                    self.document.dom.remove_node(node);
                }
            }
            TimerTask::SetStyle {
                node,
                property,
                value,
            } => {
                if self.widgets.press_restore_timer == Some(task.id) {
                    self.widgets.press_restore_timer = None;
                }
                self.document.dom.style_set(node, &property, &value);
            }
            TimerTask::AddClass { node, class_name } => {
                if self.widgets.hover_hide_timer == Some(task.id) {
                    self.widgets.hover_hide_timer = None;
                }
                self.document.dom.class_add(node, &class_name);
            }
        }
        Ok(())
    }
}
