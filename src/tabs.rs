use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Schedule,
    Attendees,
    Lineup,
    Info,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Schedule, Tab::Attendees, Tab::Lineup, Tab::Info];

    /// Region id and `data-tab` value.
    pub fn id(self) -> &'static str {
        match self {
            Tab::Schedule => "schedule",
            Tab::Attendees => "attendees",
            Tab::Lineup => "lineup",
            Tab::Info => "info",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Schedule => "📅 Schedule",
            Tab::Attendees => "👥 Friends",
            Tab::Lineup => "🎵 Lineup",
            Tab::Info => "ℹ️ Info",
        }
    }
}

impl FromStr for Tab {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == value)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TabSelector {
    active: Tab,
}

impl TabSelector {
    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// Activates the named tab. Unknown names leave the selection untouched.
    pub fn select(&mut self, name: &str) -> bool {
        match name.parse::<Tab>() {
            Ok(tab) => {
                self.active = tab;
                true
            }
            Err(()) => false,
        }
    }
}
