use crate::models::{Quote, QuoteResponse};
use crate::render::escape_text;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const PREFERRED_GENRES: [&str; 16] = [
    "festival",
    "house",
    "EDM",
    "alternative rock",
    "rap/hip-hop",
    "industrial",
    "drum-and-bass",
    "classical",
    "jazz",
    "punk",
    "classic rock",
    "pop",
    "techno",
    "electronic",
    "general",
    "literature",
];

pub const DEFAULT_TEXT: &str = "Music is life.";
pub const UNKNOWN_AUTHOR: &str = "— Unknown";

/// Opacity transition length when the overlay is dismissed.
pub const HIDE_FADE: Duration = Duration::from_millis(200);
/// Delay after which a dismissed overlay leaves the layout.
pub const HIDE_REMOVE_AFTER: Duration = Duration::from_millis(220);

pub fn fallback_quotes() -> Vec<Quote> {
    let quote = |text: &str, author: &str, genres: &[&str]| Quote {
        text: Some(text.to_string()),
        author: Some(author.to_string()),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    };
    vec![
        quote("Music has healing power.", "Elton John", &["pop", "rock"]),
        quote(
            "Punk is musical freedom.",
            "Kurt Cobain",
            &["punk", "alternative rock"],
        ),
        quote(
            "It’s not the notes you play; it’s the notes you don’t play.",
            "Miles Davis",
            &["jazz"],
        ),
    ]
}

/// Source of uniform indices for the random draws.
pub trait Picker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    pub fn new(seed: u64) -> Self {
        // Zero is a fixed point of xorshift.
        Self {
            state: seed.wrapping_add(1).max(1),
        }
    }

    /// Seeds from the clock, mixed with a process-wide counter so two
    /// requests in the same tick still diverge.
    pub fn from_clock() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        let bump = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::new(nanos ^ bump.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl Picker for Xorshift64 {
    fn pick_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

fn pick<'a, T>(picker: &mut impl Picker, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(picker.pick_index(items.len()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub genre: &'static str,
    pub quote: Option<Quote>,
}

/// Genre-first draw: pick a genre, then a quote carrying it, falling back to
/// the whole list when no quote does.
pub fn select_quote(quotes: &[Quote], picker: &mut impl Picker) -> Selection {
    let genre = pick(picker, &PREFERRED_GENRES).copied().unwrap_or("general");
    let pool: Vec<&Quote> = quotes
        .iter()
        .filter(|quote| quote.genres.iter().any(|g| g == genre))
        .collect();

    let quote = if pool.is_empty() {
        pick(picker, quotes).cloned()
    } else {
        pick(picker, &pool).map(|quote| (*quote).clone())
    };

    Selection { genre, quote }
}

/// Splash overlay content. The page script dismisses it in two steps: a
/// `HIDE_FADE` opacity transition, then removal after `HIDE_REMOVE_AFTER`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplashOverlay {
    pub text: String,
    pub author: String,
    pub genre: String,
    /// Auto mode replays the entry animation; manual mode (shuffle) suppresses it.
    pub auto: bool,
}

impl SplashOverlay {
    pub fn new(selection: &Selection, auto: bool) -> Self {
        let quote = selection.quote.as_ref();
        let text = quote
            .and_then(|q| q.text.clone())
            .unwrap_or_else(|| DEFAULT_TEXT.to_string());
        let author = quote
            .and_then(|q| q.author.as_deref())
            .map(|author| format!("— {author}"))
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        Self {
            text,
            author,
            genre: selection.genre.to_string(),
            auto,
        }
    }

    pub fn to_response(&self) -> QuoteResponse {
        QuoteResponse {
            text: self.text.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            auto: self.auto,
        }
    }

    pub fn render(&self) -> String {
        let class = if self.auto {
            "sq-overlay"
        } else {
            "sq-overlay sq-no-auto"
        };
        let style = "display:grid;opacity:1;visibility:visible";
        format!(
            r#"<div id="splash-quote-overlay" class="{class}" style="{style}" data-genre="{genre}"><figure class="sq-card"><blockquote id="splash-quote-text">{text}</blockquote><figcaption id="splash-quote-author">{author}</figcaption></figure></div>"#,
            genre = escape_text(&self.genre),
            text = escape_text(&self.text),
            author = escape_text(&self.author),
        )
    }
}
