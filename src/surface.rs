use crate::render::escape_text;
use std::collections::BTreeMap;

/// Named output regions the renderer writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    Header,
    Schedule,
    Attendees,
    Lineup,
    Info,
}

/// In-memory display target. Every write replaces a region wholesale.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    regions: BTreeMap<Region, String>,
    error: Option<String>,
}

impl Surface {
    pub fn replace(&mut self, region: Region, html: String) {
        self.regions.insert(region, html);
    }

    pub fn region(&self, region: Region) -> Option<&str> {
        self.regions.get(&region).map(String::as_str)
    }

    /// Discards every rendered region and leaves a single error block.
    pub fn show_error(&mut self, message: &str) {
        self.regions.clear();
        self.error = Some(format!(
            r#"<div class="error"><h2>Error</h2><p>{}</p><p>Please try reloading the page.</p></div>"#,
            escape_text(message)
        ));
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
