use super::*;
use super::actions::{
    CLICK_BTN_ID, COUNTER_DISPLAY_ID, HOVER_BOX_ID, KEY_INPUT_ID, PARTICLE_CONTAINER_ID,
    THEME_TOGGLE_ID,
};
use crate::widgets::age_message;
use crate::widgets::scope::INITIAL_GLOBAL_COUNTER;

const INCREASE_BTN_ID: &str = "increase-btn";
const DECREASE_BTN_ID: &str = "decrease-btn";
const RESET_BTN_ID: &str = "reset-btn";
const TOGGLE_BTN_ID: &str = "toggleBtn";
const AGE_RESULT_ID: &str = "ageResult";
const DEFAULT_MODAL_ANIMATION: &str = "fadeIn";

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config_and_local_storage(html, PageConfig::default(), &[])
    }

    pub fn from_html_with_config(html: &str, config: PageConfig) -> Result<Self> {
        Self::from_html_with_config_and_local_storage(html, config, &[])
    }

    /// Seeds the key-value store before load so the stored theme applies.
    pub fn from_html_with_local_storage(
        html: &str,
        initial_local_storage: &[(&str, &str)],
    ) -> Result<Self> {
        Self::from_html_with_config_and_local_storage(
            html,
            PageConfig::default(),
            initial_local_storage,
        )
    }

    pub fn from_html_with_config_and_local_storage(
        html: &str,
        config: PageConfig,
        initial_local_storage: &[(&str, &str)],
    ) -> Result<Self> {
        if config.timer_step_limit == 0 {
            return Err(Error::Timer(
                "timer_step_limit requires at least 1 step".into(),
            ));
        }
        let dom = parse_html(html)?;
        let mut document = PageDocument::new(dom);
        document.scheduler.timer_step_limit = config.timer_step_limit;

        let mut page = Self {
            document,
            sessions: SessionStore::default(),
            controller: AnimationController::new(config.timings),
            listeners: ListenerStore::default(),
            storage: LocalStorage::seeded(initial_local_storage),
            widget_ids: config.widget_ids,
            rng: Rng::new(config.random_seed),
            widgets: WidgetState::default(),
            dialogs: DialogMocks::default(),
        };
        page.install_listeners();
        page.initialize_widgets();
        Ok(page)
    }

    fn install_listeners(&mut self) {
        let root = self.document.dom.root;
        self.listeners
            .add(root, EventKind::KeyDown, Action::DocumentShortcuts);

        let mut elements = Vec::new();
        self.document.dom.collect_elements_dfs(root, &mut elements);
        for node in elements {
            let Some(name) = self.document.dom.attr(node, "data-action") else {
                continue;
            };
            let animation = self.document.dom.attr(node, "data-animation");
            match action_for(&name, animation) {
                Some(action) => self.listeners.add(node, EventKind::Click, action),
                None => self
                    .document
                    .trace
                    .event_line(format!("[event] unknown data-action={name}")),
            }
        }

        let modal_id = self.widget_ids.modal.clone();
        let fixed = [
            (modal_id.as_str(), EventKind::Click, Action::CloseModalOnBackdrop),
            (PARTICLE_CONTAINER_ID, EventKind::Click, Action::ParticleBurst),
            (CLICK_BTN_ID, EventKind::Click, Action::CountClick),
            (HOVER_BOX_ID, EventKind::MouseEnter, Action::HoverEnter),
            (HOVER_BOX_ID, EventKind::MouseLeave, Action::HoverLeave),
            (KEY_INPUT_ID, EventKind::Input, Action::EchoKeyInput),
            (KEY_INPUT_ID, EventKind::KeyDown, Action::AlertOnEnter),
            (THEME_TOGGLE_ID, EventKind::Click, Action::ToggleTheme),
            (INCREASE_BTN_ID, EventKind::Click, Action::CounterStep(1)),
            (DECREASE_BTN_ID, EventKind::Click, Action::CounterStep(-1)),
            (RESET_BTN_ID, EventKind::Click, Action::CounterReset),
            (TOGGLE_BTN_ID, EventKind::Click, Action::ToggleMessage),
        ];
        for (id, kind, action) in fixed {
            if let Some(node) = self.document.dom.by_id(id) {
                self.listeners.add(node, kind, action);
            }
        }
    }

    fn initialize_widgets(&mut self) {
        self.widgets.global_counter = INITIAL_GLOBAL_COUNTER;
        let theme = Theme::load(&self.storage);
        self.apply_theme(theme);

        if self.document.dom.by_id(COUNTER_DISPLAY_ID).is_some() {
            self.render_counter();
        }

        if let Some(node) = self.document.dom.by_id(AGE_RESULT_ID) {
            let age = self
                .document
                .dom
                .attr(node, "data-age")
                .and_then(|raw| raw.trim().parse::<u32>().ok());
            if let Some(age) = age {
                self.document.dom.set_text_content(node, age_message(age));
            }
        }
    }
}

fn action_for(name: &str, animation: Option<String>) -> Option<Action> {
    let action = match name {
        "animate" => Action::TriggerBoxAnimation(animation.unwrap_or_default()),
        "open-modal" => {
            Action::OpenModal(animation.unwrap_or_else(|| DEFAULT_MODAL_ANIMATION.into()))
        }
        "close-modal" => Action::CloseModal,
        "start-loading" => Action::StartLoading,
        "stop-loading" => Action::StopLoading,
        "complete-loading" => Action::CompleteLoading,
        "flip-card" => Action::FlipCard,
        "generate-colors" => Action::GenerateColors,
        "clear-particles" => Action::ClearParticles,
        "analyze-text" => Action::AnalyzeText,
        "calculate" => Action::Calculate,
        "big-calculate" => Action::BigCalculate,
        "list-numbers" => Action::ListNumbers,
        "greet" => Action::Greet,
        "demonstrate-scope" => Action::DemonstrateScope,
        _ => return None,
    };
    Some(action)
}
