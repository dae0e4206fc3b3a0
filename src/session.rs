use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) usize);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxAnimation {
    Bounce,
    Shake,
    Flip,
    Glow,
}

impl BoxAnimation {
    pub const ALL: [Self; 4] = [Self::Bounce, Self::Shake, Self::Flip, Self::Glow];

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Shake => "shake",
            Self::Flip => "flip",
            Self::Glow => "glow",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|animation| animation.class_name() == name)
    }

    /// Number keys `1` to `4` map onto the animations in declaration order.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Self::Bounce),
            "2" => Some(Self::Shake),
            "3" => Some(Self::Flip),
            "4" => Some(Self::Glow),
            _ => None,
        }
    }
}

/// Modal entrance animations. Class names use the camelCase scheme
/// (`slideIn`, `fadeIn`, `zoomIn`) and are applied to the modal element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalAnimation {
    SlideIn,
    FadeIn,
    ZoomIn,
}

impl ModalAnimation {
    pub const ALL: [Self; 3] = [Self::SlideIn, Self::FadeIn, Self::ZoomIn];

    pub fn class_name(self) -> &'static str {
        match self {
            Self::SlideIn => "slideIn",
            Self::FadeIn => "fadeIn",
            Self::ZoomIn => "zoomIn",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|animation| animation.class_name() == name)
    }
}

/// CSS animation length in milliseconds for a known animation class,
/// 500 for anything else.
pub fn animation_duration(name: &str) -> i64 {
    match name {
        "bounce" => 600,
        "shake" => 500,
        "flip" => 800,
        "glow" => 1000,
        "slideIn" => 500,
        "fadeIn" => 500,
        "zoomIn" => 600,
        _ => 500,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingPhase {
    #[default]
    Idle,
    Loading,
    Completed,
    StoppedByUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Loading,
    Modal,
    BoxAnimation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionWidget {
    Loading {
        spinner: String,
        status: String,
        phase: LoadingPhase,
    },
    Modal {
        modal: String,
        title: Option<String>,
        text: Option<String>,
        is_open: bool,
    },
    BoxAnimation {
        target: String,
    },
}

/// Deferred work a session can have outstanding. Each variant is one edge of
/// the session's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    ApplyBoxAnimation(BoxAnimation),
    ClearBoxAnimation(BoxAnimation),
    ClearModalAnimations,
    AutoCompleteLoading,
    RevertLoadingStatus,
}

impl SessionStep {
    pub fn name(self) -> &'static str {
        match self {
            Self::ApplyBoxAnimation(_) => "apply-box-animation",
            Self::ClearBoxAnimation(_) => "clear-box-animation",
            Self::ClearModalAnimations => "clear-modal-animations",
            Self::AutoCompleteLoading => "auto-complete-loading",
            Self::RevertLoadingStatus => "revert-loading-status",
        }
    }
}

/// Visual and timer state of one interactive widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSession {
    id: SessionId,
    pub(crate) widget: SessionWidget,
    pub(crate) active_class: Option<String>,
    pub(crate) pending_timer: Option<TimerId>,
}

impl AnimationSession {
    pub fn box_animation(id: SessionId, target: &str) -> Self {
        Self::new(
            id,
            SessionWidget::BoxAnimation {
                target: target.to_string(),
            },
        )
    }

    pub fn modal(id: SessionId, modal: &str) -> Self {
        Self::new(
            id,
            SessionWidget::Modal {
                modal: modal.to_string(),
                title: None,
                text: None,
                is_open: false,
            },
        )
    }

    pub fn loading(id: SessionId, spinner: &str, status: &str) -> Self {
        Self::new(
            id,
            SessionWidget::Loading {
                spinner: spinner.to_string(),
                status: status.to_string(),
                phase: LoadingPhase::Idle,
            },
        )
    }

    /// Elements that receive the modal heading and body copy on open.
    pub fn with_modal_copy(mut self, title: &str, text: &str) -> Self {
        if let SessionWidget::Modal {
            title: title_slot,
            text: text_slot,
            ..
        } = &mut self.widget
        {
            *title_slot = Some(title.to_string());
            *text_slot = Some(text.to_string());
        }
        self
    }

    fn new(id: SessionId, widget: SessionWidget) -> Self {
        Self {
            id,
            widget,
            active_class: None,
            pending_timer: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn kind(&self) -> SessionKind {
        match self.widget {
            SessionWidget::Loading { .. } => SessionKind::Loading,
            SessionWidget::Modal { .. } => SessionKind::Modal,
            SessionWidget::BoxAnimation { .. } => SessionKind::BoxAnimation,
        }
    }

    pub fn active_class(&self) -> Option<&str> {
        self.active_class.as_deref()
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending_timer
    }

    /// Always false for sessions that are not modals.
    pub fn is_open(&self) -> bool {
        matches!(self.widget, SessionWidget::Modal { is_open: true, .. })
    }

    pub fn loading_phase(&self) -> Option<LoadingPhase> {
        match self.widget {
            SessionWidget::Loading { phase, .. } => Some(phase),
            _ => None,
        }
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        if let SessionWidget::Modal { is_open, .. } = &mut self.widget {
            *is_open = open;
        }
    }

    pub(crate) fn set_phase(&mut self, next: LoadingPhase) {
        if let SessionWidget::Loading { phase, .. } = &mut self.widget {
            *phase = next;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerTimings {
    /// Gap between clearing box classes and adding the new one, so the
    /// removal is observed before the class comes back.
    pub box_apply_delay_ms: i64,
    /// Time from trigger until the box animation class is removed again.
    pub box_animation_ms: i64,
    /// Modal exit transition length.
    pub modal_exit_ms: i64,
    pub loading_timeout_ms: i64,
    pub loading_revert_ms: i64,
}

impl Default for ControllerTimings {
    fn default() -> Self {
        Self {
            box_apply_delay_ms: 50,
            box_animation_ms: 1_000,
            modal_exit_ms: 300,
            loading_timeout_ms: 5_000,
            loading_revert_ms: 3_000,
        }
    }
}

/// Sessions of one page, keyed by the element id of the widget they drive.
#[derive(Debug, Default)]
pub(crate) struct SessionStore {
    sessions: Vec<AnimationSession>,
    by_key: HashMap<String, SessionId>,
}

impl SessionStore {
    pub(crate) fn get(&self, id: SessionId) -> Option<&AnimationSession> {
        self.sessions.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: SessionId) -> Option<&mut AnimationSession> {
        self.sessions.get_mut(id.0)
    }

    pub(crate) fn id_for(&self, key: &str) -> Option<SessionId> {
        self.by_key.get(key).copied()
    }

    pub(crate) fn get_or_insert_with(
        &mut self,
        key: &str,
        create: impl FnOnce(SessionId) -> AnimationSession,
    ) -> SessionId {
        if let Some(id) = self.id_for(key) {
            return id;
        }
        let id = SessionId(self.sessions.len());
        self.sessions.push(create(id));
        self.by_key.insert(key.to_string(), id);
        id
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &AnimationSession> {
        self.sessions.iter()
    }
}
