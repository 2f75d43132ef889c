//! Light/dark theme, persisted in localStorage and applied through Pico's `data-theme`.

use dioxus::prelude::*;

const THEME_KEY: &str = "edu-admin-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// Unknown stored values fall back to light.
    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .unwrap_or_default()
    }
}

#[cfg(target_arch = "wasm32")]
fn stored_theme() -> Option<Theme> {
    let storage = web_sys::window()?.local_storage().ok().flatten()?;
    storage.get_item(THEME_KEY).ok().flatten().map(|t| Theme::parse(&t))
}

#[cfg(not(target_arch = "wasm32"))]
fn stored_theme() -> Option<Theme> {
    None
}

#[cfg(target_arch = "wasm32")]
fn apply_theme(theme: Theme) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
            tracing::warn!(error = ?e, "Could not apply theme");
        }
    }
    if let Ok(Some(storage)) = window.local_storage() {
        if let Err(e) = storage.set_item(THEME_KEY, theme.as_str()) {
            tracing::warn!(error = ?e, "Could not remember theme");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_theme(_theme: Theme) {}

#[component]
pub fn ThemeSwitcher() -> Element {
    let mut theme = use_signal(Theme::default);

    use_hook(move || {
        if let Some(stored) = stored_theme() {
            theme.set(stored);
        }
    });

    let current = theme();
    let options = Theme::ALL.map(|t| (t, t.as_str(), t.label()));

    rsx! {
        div { class: "theme-switcher", role: "group", aria_label: "Theme",
            for (option, key, label) in options {
                button {
                    key: "{key}",
                    class: if option == current { "active" } else { "" },
                    onclick: move |_| {
                        theme.set(option);
                        apply_theme(option);
                    },
                    "{label}"
                }
            }
        }
    }
}

/// Runs in the document head so the stored theme is set before first paint.
pub const THEME_SCRIPT: &str = r#"
(function(){
    var t = localStorage.getItem('edu-admin-theme');
    document.documentElement.setAttribute('data-theme', t === 'dark' ? 'dark' : 'light');
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("black"), Theme::Light, "unknown themes fall back to light");
        assert_eq!(Theme::Dark.as_str(), "dark");
    }
}
