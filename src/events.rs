use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
    KeyDown,
    Input,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::KeyDown => "keydown",
            Self::Input => "input",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "click" => Some(Self::Click),
            "mouseenter" => Some(Self::MouseEnter),
            "mouseleave" => Some(Self::MouseLeave),
            "keydown" => Some(Self::KeyDown),
            "input" => Some(Self::Input),
            _ => None,
        }
    }

    /// Mouse enter/leave are delivered to the target only.
    pub(crate) fn bubbles(self) -> bool {
        !matches!(self, Self::MouseEnter | Self::MouseLeave)
    }
}

/// Native handler bound to an element and event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    TriggerBoxAnimation(String),
    OpenModal(String),
    CloseModal,
    CloseModalOnBackdrop,
    StartLoading,
    StopLoading,
    CompleteLoading,
    DocumentShortcuts,
    FlipCard,
    GenerateColors,
    SwatchEnter,
    SwatchLeave,
    ClearParticles,
    ParticleBurst,
    AnalyzeText,
    Calculate,
    BigCalculate,
    ListNumbers,
    Greet,
    CountClick,
    HoverEnter,
    HoverLeave,
    EchoKeyInput,
    AlertOnEnter,
    ToggleTheme,
    CounterStep(i64),
    CounterReset,
    ToggleMessage,
    DemonstrateScope,
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) kind: EventKind,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) key: Option<String>,
    pub(crate) client_x: f64,
    pub(crate) client_y: f64,
}

impl EventState {
    pub(crate) fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            key: None,
            client_x: 0.0,
            client_y: 0.0,
        }
    }

    pub(crate) fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub(crate) fn at(mut self, x: f64, y: f64) -> Self {
        self.client_x = x;
        self.client_y = y;
        self
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<EventKind, Vec<Action>>>,
}

impl ListenerStore {
    /// Registering the same action twice for one node and event is a no-op.
    pub(crate) fn add(&mut self, node_id: NodeId, event: EventKind, action: Action) {
        let actions = self
            .map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default();
        if !actions.contains(&action) {
            actions.push(action);
        }
    }

    pub(crate) fn get(&self, node_id: NodeId, event: EventKind) -> Vec<Action> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(&event))
            .cloned()
            .unwrap_or_default()
    }

    /// Drops every listener bound to `nodes`.
    pub(crate) fn remove_nodes(&mut self, nodes: &[NodeId]) {
        for node in nodes {
            self.map.remove(node);
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.map
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }
}
