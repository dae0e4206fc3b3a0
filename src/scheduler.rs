use super::*;

/// Handle of a scheduled callback on the page's simulated clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) i64);

impl TimerId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimerTask {
    Session(SessionTask),
    RemoveNode(NodeId),
    SetStyle {
        node: NodeId,
        property: String,
        value: String,
    },
    AddClass {
        node: NodeId,
        class_name: String,
    },
}

impl TimerTask {
    pub(crate) fn label(&self) -> String {
        match self {
            Self::Session(task) => format!("session:{}:{}", task.session, task.step.name()),
            Self::RemoveNode(node) => format!("remove-node:{}", node.0),
            Self::SetStyle { node, property, .. } => format!("set-style:{}:{property}", node.0),
            Self::AddClass { node, class_name } => format!("add-class:{}:{class_name}", node.0),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: TimerId,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) task: TimerTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: i64,
    pub order: i64,
    /// Session that owns the timer, if any.
    pub session: Option<SessionId>,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    next_timer_id: i64,
    next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    fn allocate_timer_id(&mut self) -> TimerId {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        TimerId(id)
    }

    fn allocate_task_order(&mut self) -> i64 {
        let order = self.next_task_order;
        self.next_task_order += 1;
        order
    }

    pub(crate) fn schedule(&mut self, delay_ms: i64, task: TimerTask) -> ScheduledTask {
        let delay_ms = delay_ms.max(0);
        let scheduled = ScheduledTask {
            id: self.allocate_timer_id(),
            due_at: self.now_ms.saturating_add(delay_ms),
            order: self.allocate_task_order(),
            task,
        };
        self.task_queue.push(scheduled.clone());
        scheduled
    }

    /// Removes a queued task. Cancelling an unknown, fired or already
    /// cancelled id is a no-op that returns false.
    pub(crate) fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != id);
        before != self.task_queue.len()
    }

    /// Session that owns the queued timer `id`, if any.
    pub(crate) fn session_of(&self, id: TimerId) -> Option<SessionId> {
        self.task_queue
            .iter()
            .find(|task| task.id == id)
            .and_then(|task| match &task.task {
                TimerTask::Session(session_task) => Some(session_task.session),
                _ => None,
            })
    }

    pub(crate) fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    pub(crate) fn take_task(&mut self, idx: usize) -> ScheduledTask {
        self.task_queue.remove(idx)
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                session: match &task.task {
                    TimerTask::Session(session_task) => Some(session_task.session),
                    _ => None,
                },
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }
}
