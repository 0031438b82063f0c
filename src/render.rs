//! Pure data-to-markup mappings for every itinerary region.
//!
//! Fields the page shows as plain text are escaped; `title`, `details` and
//! the info strings carry trusted markup and pass through.

use crate::models::{
    Artist, Attendee, ContactSection, DetailSection, Event, HotelSection, Info, InfoBlock,
    Itinerary, Lineup, LineupDay, MapSection, Place, ScheduleDay, TimesSection, WeatherDay,
};
use crate::surface::{Region, Surface};
use std::borrow::Cow;
use std::fmt::Write;

const SMALL_OPEN: &str = "<small";
const SMALL_CLOSE: &str = "</small>";
const DEFAULT_WEATHER_TITLE: &str = "🌤️ Weather";
const DEFAULT_LINEUP_TITLE: &str = "Lineup";
const LOCATIONS_TITLE: &str = "📍 Key Locations";
const LINEUP_NOTE: &str = r#"<div class="lineup-note"><p><strong>Note:</strong> This lineup is based on available information and may be updated as official details are announced. Check the festival's official site for the most current lineup.</p></div>"#;

pub fn escape_text(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Writes every region of the page from one loaded itinerary.
pub fn render_app(itinerary: &Itinerary, surface: &mut Surface) {
    surface.replace(Region::Header, render_header(itinerary));
    surface.replace(Region::Schedule, render_schedule(&itinerary.schedule));
    surface.replace(Region::Attendees, render_attendees(&itinerary.attendees));
    surface.replace(Region::Lineup, render_lineup(&itinerary.lineup));
    surface.replace(Region::Info, render_info(itinerary));
}

pub fn render_header(itinerary: &Itinerary) -> String {
    escape_text(&itinerary.trip_info.title).into_owned()
}

pub fn render_schedule(days: &[ScheduleDay]) -> String {
    let mut html = String::new();
    for day in days {
        let _ = write!(
            html,
            r#"<div class="day-title fade-in">{}</div>"#,
            escape_text(&day.title)
        );
        for event in &day.events {
            html.push_str(&render_event(event));
        }
    }
    html
}

pub fn render_event(event: &Event) -> String {
    format!(
        r#"<div class="event {kind} fade-in"><div class="event-time">{time}</div><div class="event-title">{title}</div><div class="event-details">{details}</div></div>"#,
        kind = escape_text(&event.kind),
        time = escape_text(&event.time),
        title = event.title,
        details = wrap_small_print(&event.details),
    )
}

/// Rewrites each `<small ...>inner</small>` span as a `card-names` block.
/// Details without the marker are returned as-is.
pub fn wrap_small_print(details: &str) -> Cow<'_, str> {
    if !details.contains(SMALL_OPEN) {
        return Cow::Borrowed(details);
    }

    let mut out = String::with_capacity(details.len());
    let mut rest = details;
    while let Some(start) = rest.find(SMALL_OPEN) {
        let tag = &rest[start..];
        let Some(tag_end) = tag.find('>') else {
            break;
        };
        let body = &tag[tag_end + 1..];
        let Some(close) = body.find(SMALL_CLOSE) else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(r#"<div class="card-names">"#);
        out.push_str(&body[..close]);
        out.push_str("</div>");
        rest = &body[close + SMALL_CLOSE.len()..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

pub fn render_attendees(attendees: &[Attendee]) -> String {
    let cards: String = attendees.iter().map(render_attendee).collect();
    format!(r#"<h2>Friends</h2><div class="attendee-grid">{cards}</div>"#)
}

pub fn render_attendee(attendee: &Attendee) -> String {
    let badge = attendee
        .badge
        .as_deref()
        .map(|badge| format!(r#"<div class="attendee-badge">{badge}</div>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="attendee-card fade-in"><div class="attendee-name">{name}</div><div class="attendee-info">✈️ Arrives: {arrival}</div><div class="attendee-info">🛫 Departs: {departure}</div><div class="attendee-info">🏨 Hotel: {hotel}</div>{badge}</div>"#,
        name = attendee.name,
        arrival = attendee.arrival,
        departure = attendee.departure,
        hotel = attendee.hotel,
    )
}

pub fn render_lineup(lineup: &Lineup) -> String {
    let title = lineup.title.as_deref().unwrap_or(DEFAULT_LINEUP_TITLE);
    let days: String = lineup.days().map(render_lineup_day).collect();
    format!("<h2>{title}</h2>{days}{LINEUP_NOTE}")
}

pub fn render_lineup_day(day: &LineupDay) -> String {
    let headliners = day.headliners.iter().map(|artist| render_artist(artist, true));
    let artists = day.artists.iter().map(|artist| render_artist(artist, false));
    let items: String = headliners.chain(artists).collect();
    format!(
        r#"<div class="lineup-day fade-in"><div class="lineup-day-title">{title}</div><div class="lineup-list">{items}</div></div>"#,
        title = day.title,
    )
}

fn render_artist(artist: &Artist, headliner: bool) -> String {
    let (item_class, name_class) = if headliner {
        ("lineup-item headliner-item", "artist-name headliner-name")
    } else {
        ("lineup-item", "artist-name")
    };
    format!(
        r#"<div class="{item_class}"><span class="{name_class}">{name}</span><span class="artist-time">{time}</span></div>"#,
        name = artist.name,
        time = artist.time,
    )
}

pub fn render_info(itinerary: &Itinerary) -> String {
    let weather_title = itinerary
        .trip_info
        .weather_title
        .as_deref()
        .unwrap_or(DEFAULT_WEATHER_TITLE);
    format!(
        "<h2>Important Info</h2>{}{}",
        render_weather_widget(weather_title, &itinerary.weather),
        render_info_sections(&itinerary.info),
    )
}

pub fn render_weather_widget(title: &str, days: &[WeatherDay]) -> String {
    let mut html = format!(
        r#"<div class="weather-widget"><h3>{title}</h3><div class="weather-forecast">"#
    );
    for day in days {
        let _ = write!(
            html,
            r#"<div class="weather-day"><div class="weather-day-name">{name}</div><div class="weather-icon">{icon}</div><div class="weather-temps"><span class="temp-high">{high}°</span><span class="temp-low">{low}°</span></div></div>"#,
            name = escape_text(day_abbreviation(&day.date)),
            icon = weather_icon(&day.condition),
            high = escape_text(&day.high.to_string()),
            low = escape_text(&day.low.to_string()),
        );
    }
    html.push_str("</div></div>");
    html
}

/// Leading token of a date such as `"Thu Oct 2"`.
pub fn day_abbreviation(date: &str) -> &str {
    date.split(' ').next().unwrap_or(date)
}

/// First keyword found in the lower-cased condition wins.
pub fn weather_icon(condition: &str) -> &'static str {
    const ICONS: [(&str, &str); 6] = [
        ("sunny", "☀️"),
        ("partly cloudy", "⛅"),
        ("cloudy", "☁️"),
        ("rain", "🌧️"),
        ("storm", "⛈️"),
        ("clear", "🌤️"),
    ];
    let condition = condition.to_lowercase();
    ICONS
        .iter()
        .find(|(keyword, _)| condition.contains(*keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or("🌤️")
}

pub fn render_info_sections(info: &Info) -> String {
    info.blocks().into_iter().map(render_info_block).collect()
}

fn render_info_block(block: InfoBlock<'_>) -> String {
    match block {
        InfoBlock::Details {
            section,
            highlighted,
        } => render_details(section, highlighted),
        InfoBlock::Hotels(section) => render_hotels(section),
        InfoBlock::Map(section) => render_map(section),
        InfoBlock::Locations(places) => render_locations(places),
        InfoBlock::WalkingTimes(section) => render_times(section),
        InfoBlock::Contacts(section) => render_contacts(section),
    }
}

fn info_section(title: &str, body: &str, highlighted: bool) -> String {
    let class = if highlighted {
        "info-section info-section-highlight"
    } else {
        "info-section"
    };
    format!(
        r#"<div class="{class}"><div class="info-title">{title}</div><div class="info-details">{body}</div></div>"#
    )
}

fn render_details(section: &DetailSection, highlighted: bool) -> String {
    info_section(&section.title, &section.details.join("<br>"), highlighted)
}

fn render_times(section: &TimesSection) -> String {
    info_section(&section.title, &section.times.join("<br>"), false)
}

fn render_hotels(section: &HotelSection) -> String {
    let body: String = section
        .hotels
        .iter()
        .map(|hotel| {
            format!(
                r#"<strong>{}</strong><br><a href="{}" target="_blank">{}</a><br><br>"#,
                hotel.name, hotel.link, hotel.address
            )
        })
        .collect();
    info_section(&section.title, &body, false)
}

fn render_locations(places: &[Place]) -> String {
    let body: String = places
        .iter()
        .map(|place| {
            format!(
                r#"📌 <strong>{}</strong> - <a href="{}" target="_blank">{}</a><br>"#,
                place.name, place.link, place.address
            )
        })
        .collect();
    info_section(LOCATIONS_TITLE, &body, false)
}

fn render_map(section: &MapSection) -> String {
    let legend = section
        .legend
        .as_deref()
        .map(|legend| format!(r#"<div class="map-legend"><small>{legend}</small></div>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="info-section"><div class="info-title">{title}</div><div class="map-container"><img src="{src}" alt="{alt}" class="static-map" />{legend}</div></div>"#,
        title = section.title,
        src = section.image_url,
        alt = escape_text(&section.title),
    )
}

fn render_contacts(section: &ContactSection) -> String {
    let body: String = section
        .contacts
        .iter()
        .map(|contact| {
            format!(
                r#"📞 <strong>{}</strong> - <a href="tel:{}">{}</a><br>"#,
                contact.name,
                escape_text(&contact.phone),
                contact.phone
            )
        })
        .collect();
    info_section(&section.title, &body, false)
}
