use super::*;
use crate::widgets::calculator::{describe_calculation, format_number, parse_integer};
use crate::widgets::color::{color_palette, contrast_color, random_color};
use crate::widgets::feedback::{click_message, counter_feedback, greet_user};
use crate::widgets::scope::SAMPLE_PARAMETER;
use crate::widgets::{
    ColorFormat, Operator, TextTransform, analyze_text, calculate_average,
    demonstrate_local_scope, parameter_scope_demo, perform_calculations, transform_text,
};

pub(crate) const FLIP_CARD_ID: &str = "flip-card";
pub(crate) const COLOR_PALETTE_ID: &str = "color-palette";
pub(crate) const PARTICLE_CONTAINER_ID: &str = "particle-container";
pub(crate) const USER_TEXT_ID: &str = "user-text";
pub(crate) const TEXT_RESULTS_ID: &str = "text-results";
pub(crate) const NUM1_ID: &str = "num1";
pub(crate) const NUM2_ID: &str = "num2";
pub(crate) const CALCULATION_RESULTS_ID: &str = "calculation-results";
pub(crate) const CALC_NUM1_ID: &str = "calc-num1";
pub(crate) const CALC_NUM2_ID: &str = "calc-num2";
pub(crate) const CALC_OP_ID: &str = "calc-op";
pub(crate) const CALC_RESULT_ID: &str = "calc-result";
pub(crate) const NUMBER_LIST_ID: &str = "numberList";
pub(crate) const GREETING_ID: &str = "greeting";
pub(crate) const CLICK_BTN_ID: &str = "click-btn";
pub(crate) const CLICK_MESSAGE_ID: &str = "click-message";
pub(crate) const HOVER_BOX_ID: &str = "hover-box";
pub(crate) const HOVER_MESSAGE_ID: &str = "hover-message";
pub(crate) const KEY_INPUT_ID: &str = "key-input";
pub(crate) const KEY_MESSAGE_ID: &str = "key-message";
pub(crate) const TYPED_TEXT_ID: &str = "typed-text";
pub(crate) const THEME_TOGGLE_ID: &str = "theme-toggle-btn";
pub(crate) const COUNTER_DISPLAY_ID: &str = "counter-display";
pub(crate) const COUNTER_MESSAGE_ID: &str = "counter-message";
pub(crate) const TOGGLE_MESSAGE_ID: &str = "toggleMessage";
pub(crate) const SCOPE_RESULTS_ID: &str = "scope-results";

pub(crate) const HIDDEN_CLASS: &str = "hidden";
pub(crate) const DARK_THEME_CLASS: &str = "dark-theme";
const FLIPPED_CLASS: &str = "flipped";
const PARTICLE_CLASS: &str = "particle";
const SWATCH_CLASS: &str = "color-swatch";
const SWATCH_HOVER_TRANSFORM: &str = "scale(1.1) rotate(5deg)";
const SWATCH_REST_TRANSFORM: &str = "scale(1) rotate(0deg)";

const PALETTE_SIZE: usize = 6;
const PARTICLE_COUNT: usize = 15;
const PARTICLE_SPREAD_PX: f64 = 100.0;
const PARTICLE_LIFETIME_MS: i64 = 2_000;
const PRESS_FEEDBACK_MS: i64 = 150;
const HOVER_HIDE_MS: i64 = 2_000;
const LONG_INPUT_CHARS: usize = 20;
const DEFAULT_ANALYZED_TEXT: &str = "Hello World";
const NUMBER_LIST_LEN: usize = 5;

impl Page {
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventState::new(EventKind::Click, target))
    }

    /// Click with viewport coordinates, used by position-aware widgets such
    /// as the particle burst.
    pub fn click_at(&mut self, selector: &str, x: f64, y: f64) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventState::new(EventKind::Click, target).at(x, y))
    }

    pub fn hover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventState::new(EventKind::MouseEnter, target))
    }

    pub fn unhover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventState::new(EventKind::MouseLeave, target))
    }

    /// Key press delivered to the document, where the keyboard shortcuts live.
    pub fn press_key(&mut self, key: &str) -> Result<()> {
        let root = self.document.dom.root;
        self.dispatch_event(EventState::new(EventKind::KeyDown, root).with_key(key))
    }

    /// Key press on a focused element; bubbles up to the document.
    pub fn press_key_on(&mut self, selector: &str, key: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventState::new(EventKind::KeyDown, target).with_key(key))
    }

    /// Replaces the value of a form control and fires `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self.document.dom.tag_name(target).unwrap_or_default();
        if !matches!(tag, "input" | "textarea" | "select") {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input, textarea or select".into(),
                actual: tag.to_string(),
            });
        }
        self.document.dom.set_value(target, text);
        self.dispatch_event(EventState::new(EventKind::Input, target))
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let kind = EventKind::parse(event)
            .ok_or_else(|| Error::InvalidInput(format!("unsupported event type: {event}")))?;
        let target = self.select_one(selector)?;
        self.dispatch_event(EventState::new(kind, target))
    }

    pub(crate) fn dispatch_event(&mut self, mut event: EventState) -> Result<()> {
        let mut path = vec![event.target];
        if event.kind.bubbles() {
            let mut cursor = self.document.dom.parent(event.target);
            while let Some(node) = cursor {
                path.push(node);
                cursor = self.document.dom.parent(node);
            }
        }

        for node in path {
            let actions = self.listeners.get(node, event.kind);
            if actions.is_empty() {
                continue;
            }
            event.current_target = node;
            let line = format!(
                "[event] {} target={} current={} actions={}",
                event.kind.as_str(),
                self.event_node_label(event.target),
                self.event_node_label(node),
                actions.len()
            );
            self.document.trace.event_line(line);
            for action in actions {
                self.run_action(&action, &event)?;
            }
        }
        Ok(())
    }

    fn event_node_label(&self, node: NodeId) -> String {
        let dom = &self.document.dom;
        match (dom.tag_name(node), dom.attr(node, "id")) {
            (Some(tag), Some(id)) => format!("{tag}#{id}"),
            (Some(tag), None) => tag.to_string(),
            _ => "document".into(),
        }
    }

    fn run_action(&mut self, action: &Action, event: &EventState) -> Result<()> {
        match action {
            Action::TriggerBoxAnimation(name) => self.trigger_box_animation(name),
            Action::OpenModal(name) => self.open_modal(name),
            Action::CloseModal => self.close_modal(),
            Action::CloseModalOnBackdrop => {
                if event.target == event.current_target {
                    self.close_modal();
                }
            }
            Action::StartLoading => self.start_loading(),
            Action::StopLoading => self.stop_loading(),
            Action::CompleteLoading => self.complete_loading(),
            Action::DocumentShortcuts => self.document_shortcut(event),
            Action::FlipCard => {
                if let Some(card) = self.document.dom.by_id(FLIP_CARD_ID) {
                    self.document.dom.class_toggle(card, FLIPPED_CLASS);
                }
            }
            Action::GenerateColors => self.generate_colors(),
            Action::SwatchEnter => {
                self.document
                    .dom
                    .style_set(event.current_target, "transform", SWATCH_HOVER_TRANSFORM);
            }
            Action::SwatchLeave => {
                self.document
                    .dom
                    .style_set(event.current_target, "transform", SWATCH_REST_TRANSFORM);
            }
            Action::ClearParticles => self.clear_particles(),
            Action::ParticleBurst => self.particle_burst(event.current_target, event),
            Action::AnalyzeText => self.analyze_user_text()?,
            Action::Calculate => self.calculate_numbers()?,
            Action::BigCalculate => self.big_calculate(),
            Action::ListNumbers => self.list_numbers(),
            Action::Greet => self.greet(),
            Action::CountClick => self.count_click(),
            Action::HoverEnter => self.hover_enter(),
            Action::HoverLeave => self.hover_leave(),
            Action::EchoKeyInput => self.echo_key_input(),
            Action::AlertOnEnter => {
                if event.key.as_deref() == Some("Enter") {
                    let value = self.value_of(KEY_INPUT_ID);
                    self.alert(format!("You pressed Enter! Your text: \"{value}\""));
                }
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::CounterStep(delta) => {
                self.widgets.counter = self.widgets.counter.saturating_add(*delta);
                self.render_counter();
            }
            Action::CounterReset => {
                self.widgets.counter = 0;
                self.render_counter();
            }
            Action::ToggleMessage => {
                if let Some(message) = self.document.dom.by_id(TOGGLE_MESSAGE_ID) {
                    let next = if self.document.dom.style_get(message, "display") == "none" {
                        "block"
                    } else {
                        "none"
                    };
                    self.document.dom.style_set(message, "display", next);
                }
            }
            Action::DemonstrateScope => self.demonstrate_scope(),
        }
        Ok(())
    }

    fn document_shortcut(&mut self, event: &EventState) {
        let Some(key) = event.key.as_deref() else {
            return;
        };
        if key == "Escape" {
            if self.modal_session().is_some_and(AnimationSession::is_open) {
                self.close_modal();
            }
            return;
        }
        if let Some(animation) = BoxAnimation::from_key(key) {
            self.trigger_box_animation(animation.class_name());
        }
    }

    fn generate_colors(&mut self) {
        let Some(palette) = self.document.dom.by_id(COLOR_PALETTE_ID) else {
            return;
        };
        self.clear_children(palette);
        for color in color_palette(&mut self.rng, PALETTE_SIZE, ColorFormat::Hex) {
            let style = format!(
                "background-color: {color}; color: {};",
                contrast_color(&color)
            );
            let swatch = self.document.dom.append_element(
                palette,
                "div",
                &[("class", SWATCH_CLASS), ("style", style.as_str())],
            );
            self.document.dom.create_text(swatch, color);
            self.listeners
                .add(swatch, EventKind::MouseEnter, Action::SwatchEnter);
            self.listeners
                .add(swatch, EventKind::MouseLeave, Action::SwatchLeave);
        }
    }

    fn clear_particles(&mut self) {
        let Some(container) = self.document.dom.by_id(PARTICLE_CONTAINER_ID) else {
            return;
        };
        let mut nodes = Vec::new();
        self.document
            .dom
            .collect_elements_descendants_dfs(container, &mut nodes);
        for node in nodes {
            if self.document.dom.class_contains(node, PARTICLE_CLASS) {
                self.document.dom.remove_node(node);
            }
        }
    }

    // No layout engine: click coordinates are taken as container-relative.
    fn particle_burst(&mut self, container: NodeId, event: &EventState) {
        for _ in 0..PARTICLE_COUNT {
            let offset_x = (self.rng.next_f64() - 0.5) * PARTICLE_SPREAD_PX;
            let offset_y = (self.rng.next_f64() - 0.5) * PARTICLE_SPREAD_PX;
            let color = random_color(&mut self.rng, ColorFormat::Hex);
            let style = format!(
                "left: {}px; top: {}px; background: {color};",
                format_number(event.client_x + offset_x),
                format_number(event.client_y + offset_y)
            );
            let particle = self.document.dom.append_element(
                container,
                "div",
                &[("class", PARTICLE_CLASS), ("style", style.as_str())],
            );
            self.document
                .schedule_task(PARTICLE_LIFETIME_MS, TimerTask::RemoveNode(particle));
        }
    }

    fn analyze_user_text(&mut self) -> Result<()> {
        let Some(results) = self.document.dom.by_id(TEXT_RESULTS_ID) else {
            return Ok(());
        };
        let raw = self.value_of(USER_TEXT_ID);
        let text = if raw.is_empty() {
            DEFAULT_ANALYZED_TEXT
        } else {
            raw.as_str()
        };
        let mut report = analyze_text(text).to_string();
        for transform in TextTransform::ALL {
            report.push('\n');
            report.push_str(transform.name());
            report.push_str(": ");
            report.push_str(&transform_text(text, transform)?);
        }
        self.document.dom.set_text_content(results, &report);
        Ok(())
    }

    fn calculate_numbers(&mut self) -> Result<()> {
        let Some(results) = self.document.dom.by_id(CALCULATION_RESULTS_ID) else {
            return Ok(());
        };
        let a = parse_number_or_zero(&self.value_of(NUM1_ID));
        let b = parse_number_or_zero(&self.value_of(NUM2_ID));
        let report = perform_calculations(a, b);
        let average = calculate_average(&[a, b, (a + b) / 2.0])?;
        let text = format!("{report}\n{average}");
        self.document.dom.set_text_content(results, &text);
        Ok(())
    }

    fn big_calculate(&mut self) {
        let Some(result) = self.document.dom.by_id(CALC_RESULT_ID) else {
            return;
        };
        let outcome = parse_integer(&self.value_of(CALC_NUM1_ID)).and_then(|a| {
            let b = parse_integer(&self.value_of(CALC_NUM2_ID))?;
            let operator = self.value_of(CALC_OP_ID).parse::<Operator>()?;
            describe_calculation(&a, &b, operator)
        });
        let text = outcome.unwrap_or_else(|err| format!("Error: {err}"));
        self.document.dom.set_text_content(result, &text);
    }

    fn list_numbers(&mut self) {
        let Some(list) = self.document.dom.by_id(NUMBER_LIST_ID) else {
            return;
        };
        self.clear_children(list);
        for n in 1..=NUMBER_LIST_LEN {
            let item = self.document.dom.append_element(list, "li", &[]);
            self.document.dom.create_text(item, format!("Number {n}"));
        }
    }

    fn greet(&mut self) {
        let response = self.prompt("Enter your name:");
        let Some(name) = response else {
            return;
        };
        if let Some(greeting) = self.document.dom.by_id(GREETING_ID) {
            self.document
                .dom
                .set_text_content(greeting, &greet_user(&name));
        }
    }

    fn count_click(&mut self) {
        self.widgets.click_count += 1;
        if let Some(message) = self.document.dom.by_id(CLICK_MESSAGE_ID) {
            self.document.dom.class_remove(message, HIDDEN_CLASS);
            self.document
                .dom
                .set_text_content(message, &click_message(self.widgets.click_count));
        }
        let Some(button) = self.document.dom.by_id(CLICK_BTN_ID) else {
            return;
        };
        if let Some(previous) = self.widgets.press_restore_timer.take() {
            self.document.cancel_task(previous);
        }
        self.document.dom.style_set(button, "transform", "scale(0.95)");
        let restore = self.document.schedule_task(
            PRESS_FEEDBACK_MS,
            TimerTask::SetStyle {
                node: button,
                property: "transform".into(),
                value: "scale(1)".into(),
            },
        );
        self.widgets.press_restore_timer = Some(restore);
    }

    fn hover_enter(&mut self) {
        if let Some(pending) = self.widgets.hover_hide_timer.take() {
            self.document.cancel_task(pending);
        }
        if let Some(message) = self.document.dom.by_id(HOVER_MESSAGE_ID) {
            self.document.dom.class_remove(message, HIDDEN_CLASS);
            self.document
                .dom
                .set_text_content(message, "👋 Mouse entered! Welcome!");
        }
        if let Some(hover_box) = self.document.dom.by_id(HOVER_BOX_ID) {
            self.document
                .dom
                .set_text_content(hover_box, "Thanks for hovering! 😊");
        }
    }

    fn hover_leave(&mut self) {
        if let Some(hover_box) = self.document.dom.by_id(HOVER_BOX_ID) {
            self.document.dom.set_text_content(hover_box, "Hover over me!");
        }
        let Some(message) = self.document.dom.by_id(HOVER_MESSAGE_ID) else {
            return;
        };
        self.document
            .dom
            .set_text_content(message, "👋 Mouse left! Come back soon!");
        if let Some(pending) = self.widgets.hover_hide_timer.take() {
            self.document.cancel_task(pending);
        }
        let hide = self.document.schedule_task(
            HOVER_HIDE_MS,
            TimerTask::AddClass {
                node: message,
                class_name: HIDDEN_CLASS.into(),
            },
        );
        self.widgets.hover_hide_timer = Some(hide);
    }

    fn echo_key_input(&mut self) {
        let Some(message) = self.document.dom.by_id(KEY_MESSAGE_ID) else {
            return;
        };
        let value = self.value_of(KEY_INPUT_ID);
        if value.is_empty() {
            self.document.dom.class_add(message, HIDDEN_CLASS);
            return;
        }
        self.document.dom.class_remove(message, HIDDEN_CLASS);

        let typed_chars = value.chars().count();
        if typed_chars > LONG_INPUT_CHARS {
            self.document.dom.set_text_content(
                message,
                &format!("⌨️ Wow! You've typed {typed_chars} characters: "),
            );
            let span = self
                .document
                .dom
                .append_element(message, "span", &[("id", TYPED_TEXT_ID)]);
            self.document.dom.create_text(span, value);
        } else if let Some(typed) = self.document.dom.by_id(TYPED_TEXT_ID) {
            self.document.dom.set_text_content(typed, &value);
        }
    }

    fn demonstrate_scope(&mut self) {
        let Some(results) = self.document.dom.by_id(SCOPE_RESULTS_ID) else {
            return;
        };
        let local = demonstrate_local_scope(&mut self.widgets.global_counter);
        let parameter = parameter_scope_demo(SAMPLE_PARAMETER, self.widgets.global_counter);

        self.clear_children(results);
        let sections = [
            ("🔍 Scope Demonstration:", None),
            ("Local Scope Result:", Some(local.to_string())),
            ("Parameter Scope Result:", Some(parameter.to_string())),
        ];
        for (heading, body) in sections {
            self.append_strong(results, heading);
            self.document.dom.append_element(results, "br", &[]);
            if let Some(body) = body {
                self.document.dom.create_text(results, body);
                self.document.dom.append_element(results, "br", &[]);
            }
        }
        self.append_strong(results, "Global Counter After Function Calls:");
        self.document
            .dom
            .create_text(results, format!(" {}", self.widgets.global_counter));
    }

    fn append_strong(&mut self, parent: NodeId, text: &str) {
        let strong = self.document.dom.append_element(parent, "strong", &[]);
        self.document.dom.create_text(strong, text.to_string());
    }

    // Detached children take their listeners with them.
    fn clear_children(&mut self, parent: NodeId) {
        let mut detached = Vec::new();
        self.document
            .dom
            .collect_elements_descendants_dfs(parent, &mut detached);
        self.document.dom.clear_children(parent);
        self.listeners.remove_nodes(&detached);
    }

    pub(crate) fn toggle_theme(&mut self) {
        let next = self.widgets.theme.toggled();
        self.apply_theme(next);
        next.store(&mut self.storage);
        self.document
            .trace
            .event_line(format!("[event] theme {}", next.as_str()));
    }

    pub(crate) fn apply_theme(&mut self, theme: Theme) {
        self.widgets.theme = theme;
        if let Some(body) = self.document.dom.body() {
            if theme == Theme::Dark {
                self.document.dom.class_add(body, DARK_THEME_CLASS);
            } else {
                self.document.dom.class_remove(body, DARK_THEME_CLASS);
            }
        }
        let Some(button) = self.document.dom.by_id(THEME_TOGGLE_ID) else {
            return;
        };
        let (icon_text, label_text) = theme.toggle_face();
        let icon = Selector::parse(".toggle-icon")
            .ok()
            .and_then(|selector| selector.query_first(&self.document.dom, button));
        let label = Selector::parse(".toggle-text")
            .ok()
            .and_then(|selector| selector.query_first(&self.document.dom, button));
        if let Some(icon) = icon {
            self.document.dom.set_text_content(icon, icon_text);
        }
        if let Some(label) = label {
            self.document.dom.set_text_content(label, label_text);
        }
    }

    pub(crate) fn render_counter(&mut self) {
        let count = self.widgets.counter;
        let (message, color) = counter_feedback(count);
        if let Some(display) = self.document.dom.by_id(COUNTER_DISPLAY_ID) {
            self.document
                .dom
                .set_text_content(display, &count.to_string());
            self.document.dom.style_set(display, "color", color);
        }
        if let Some(counter_message) = self.document.dom.by_id(COUNTER_MESSAGE_ID) {
            self.document
                .dom
                .set_text_content(counter_message, message);
        }
    }

    fn alert(&mut self, message: String) {
        self.document
            .trace
            .event_line(format!("[event] alert {message}"));
        self.dialogs.alert_messages.push(message);
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        let response = self
            .dialogs
            .prompt_responses
            .pop_front()
            .unwrap_or_else(|| self.dialogs.default_prompt_response.clone());
        self.document.trace.event_line(format!(
            "[event] prompt {message} answered={}",
            response.is_some()
        ));
        response
    }

    fn value_of(&self, element_id: &str) -> String {
        self.document
            .dom
            .by_id(element_id)
            .map(|node| self.document.dom.value(node))
            .unwrap_or_default()
    }
}

fn parse_number_or_zero(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}
