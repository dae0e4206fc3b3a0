use super::*;

pub(crate) const THEME_KEY: &str = "theme";

/// In-memory stand-in for `window.localStorage`.
#[derive(Debug, Default, Clone)]
pub(crate) struct LocalStorage {
    entries: HashMap<String, String>,
}

impl LocalStorage {
    pub(crate) fn seeded(initial: &[(&str, &str)]) -> Self {
        let mut storage = Self::default();
        for (key, value) in initial {
            storage.set_item(key, value);
        }
        storage
    }

    pub(crate) fn get_item(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub(crate) fn set_item(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Only the exact value `dark` selects the dark theme.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub(crate) fn load(storage: &LocalStorage) -> Self {
        Self::parse(storage.get_item(THEME_KEY))
    }

    pub(crate) fn store(self, storage: &mut LocalStorage) {
        storage.set_item(THEME_KEY, self.as_str());
    }

    /// Icon and label shown on the toggle button while this theme is active.
    pub(crate) fn toggle_face(self) -> (&'static str, &'static str) {
        match self {
            Self::Light => ("🌙", "Dark Mode"),
            Self::Dark => ("☀️", "Light Mode"),
        }
    }
}
