use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// What applying a theme writes to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeDisplay {
    /// Value of the body `data-theme` attribute; dark leaves it unset.
    pub data_theme: Option<&'static str>,
    pub icon: &'static str,
    pub label: &'static str,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn display(self) -> ThemeDisplay {
        match self {
            Theme::Light => ThemeDisplay {
                data_theme: Some("light"),
                icon: "☀️",
                label: "Light",
            },
            Theme::Dark => ThemeDisplay {
                data_theme: None,
                icon: "🌙",
                label: "Dark",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeController {
    theme: Theme,
}

impl ThemeController {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn display(&self) -> ThemeDisplay {
        self.theme.display()
    }

    /// The only mutator. Callers persist the returned value.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}
