use crate::theme::Theme;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub trip_info: TripInfo,
    #[serde(default)]
    pub schedule: Vec<ScheduleDay>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub lineup: Lineup,
    #[serde(default)]
    pub weather: Vec<WeatherDay>,
    #[serde(default)]
    pub info: Info,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInfo {
    pub title: String,
    #[serde(default)]
    pub weather_title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDay {
    pub title: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attendee {
    pub name: String,
    pub arrival: String,
    pub departure: String,
    pub hotel: String,
    #[serde(default)]
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lineup {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub friday: Option<LineupDay>,
    #[serde(default)]
    pub saturday: Option<LineupDay>,
    #[serde(default)]
    pub sunday: Option<LineupDay>,
}

impl Lineup {
    /// Present days in festival order.
    pub fn days(&self) -> impl Iterator<Item = &LineupDay> {
        [&self.friday, &self.saturday, &self.sunday]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineupDay {
    pub title: String,
    #[serde(default)]
    pub headliners: Vec<Artist>,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherDay {
    pub date: String,
    pub high: Temperature,
    pub low: Temperature,
    pub condition: String,
}

/// A forecast temperature, shown exactly as the document gives it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Temperature::Number(value) => write!(f, "{value}"),
            Temperature::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    #[serde(default)]
    pub festival: Option<DetailSection>,
    #[serde(default)]
    pub ga_plus: Option<DetailSection>,
    #[serde(default)]
    pub accommodations: Option<HotelSection>,
    #[serde(default)]
    pub map: Option<MapSection>,
    #[serde(default)]
    pub locations: Option<Vec<Place>>,
    #[serde(default)]
    pub walking_times: Option<WalkingTimes>,
    #[serde(default)]
    pub transportation: Option<DetailSection>,
    #[serde(default)]
    pub emergency: Option<ContactSection>,
}

/// One present information section, in the order the info tab shows them.
#[derive(Debug, Clone, Copy)]
pub enum InfoBlock<'a> {
    Details {
        section: &'a DetailSection,
        highlighted: bool,
    },
    Hotels(&'a HotelSection),
    Map(&'a MapSection),
    Locations(&'a [Place]),
    WalkingTimes(&'a TimesSection),
    Contacts(&'a ContactSection),
}

impl Info {
    pub fn blocks(&self) -> Vec<InfoBlock<'_>> {
        let mut blocks = Vec::new();
        if let Some(section) = &self.festival {
            blocks.push(InfoBlock::Details {
                section,
                highlighted: true,
            });
        }
        if let Some(section) = &self.ga_plus {
            blocks.push(InfoBlock::Details {
                section,
                highlighted: false,
            });
        }
        if let Some(section) = &self.accommodations {
            blocks.push(InfoBlock::Hotels(section));
        }
        if let Some(section) = &self.map {
            blocks.push(InfoBlock::Map(section));
        }
        if let Some(locations) = &self.locations {
            blocks.push(InfoBlock::Locations(locations));
        }
        if let Some(walking) = &self.walking_times {
            blocks.extend(
                [&walking.from_line, &walking.from_fairfield]
                    .into_iter()
                    .flatten()
                    .map(InfoBlock::WalkingTimes),
            );
        }
        if let Some(section) = &self.transportation {
            blocks.push(InfoBlock::Details {
                section,
                highlighted: false,
            });
        }
        if let Some(section) = &self.emergency {
            blocks.push(InfoBlock::Contacts(section));
        }
        blocks
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailSection {
    pub title: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotelSection {
    pub title: String,
    #[serde(default)]
    pub hotels: Vec<Place>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub link: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSection {
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub legend: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkingTimes {
    #[serde(default)]
    pub from_line: Option<TimesSection>,
    #[serde(default)]
    pub from_fairfield: Option<TimesSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimesSection {
    pub title: String,
    #[serde(default)]
    pub times: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactSection {
    pub title: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub icon: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub text: String,
    pub author: String,
    pub genre: String,
    pub auto: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BackgroundResponse {
    pub background: String,
    pub image: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub tab: Option<String>,
}
