// Theme preference: an independent persisted string, separate from the tasks

use crate::error::Result;
use crate::storage::BlobStorage;
use std::fmt;

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read the stored preference. Only the exact value "dark" means dark;
/// anything else, including an absent key or a read failure, means light.
pub fn load_theme<S: BlobStorage>(storage: &S) -> Theme {
    match storage.get(THEME_KEY) {
        Ok(Some(value)) if value == "dark" => Theme::Dark,
        _ => Theme::Light,
    }
}

pub fn save_theme<S: BlobStorage>(storage: &mut S, theme: Theme) -> Result<()> {
    storage.set(THEME_KEY, theme.as_str())
}

/// Flip the stored preference and return the new value.
pub fn toggle_theme<S: BlobStorage>(storage: &mut S) -> Result<Theme> {
    let next = load_theme(storage).toggled();
    save_theme(storage, next)?;
    Ok(next)
}
