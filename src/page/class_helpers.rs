use super::*;

/// Gap between consecutive classes added by [`Page::add_classes_with_delay`]
/// when callers have no preference.
pub const DEFAULT_CLASS_STAGGER_MS: i64 = 100;

impl Page {
    /// False when no element has `element_id`.
    pub fn has_animation_class(&self, element_id: &str, class_name: &str) -> bool {
        self.document
            .dom
            .by_id(element_id)
            .is_some_and(|node| self.document.dom.class_contains(node, class_name))
    }

    /// Adds `classes` one by one, the class at index `i` after `i * delay_ms`.
    /// Every addition is a timer, the first one included, so nothing changes
    /// until the clock runs. A missing element schedules nothing.
    pub fn add_classes_with_delay(
        &mut self,
        element_id: &str,
        classes: &[&str],
        delay_ms: i64,
    ) -> Vec<TimerId> {
        let Some(node) = self.document.dom.by_id(element_id) else {
            return Vec::new();
        };
        let mut delay = 0i64;
        let mut timers = Vec::with_capacity(classes.len());
        for class_name in classes {
            timers.push(self.document.schedule_task(
                delay,
                TimerTask::AddClass {
                    node,
                    class_name: (*class_name).to_string(),
                },
            ));
            delay = delay.saturating_add(delay_ms);
        }
        timers
    }

    pub fn remove_multiple_classes(&mut self, element_id: &str, classes: &[&str]) {
        let Some(node) = self.document.dom.by_id(element_id) else {
            return;
        };
        for class_name in classes {
            self.document.dom.class_remove(node, class_name);
        }
    }
}
