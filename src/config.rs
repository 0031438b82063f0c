use std::{env, path::PathBuf};

/// Where a JSON document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Source::Url(value.to_string())
        } else {
            Source::File(PathBuf::from(value))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub itinerary: Source,
    pub quotes: Source,
    pub prefs_path: PathBuf,
    /// Directory behind `/images/{name}`.
    pub images_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        Self {
            port,
            itinerary: Source::parse(&var_or("ITINERARY_SOURCE", "data/events.json")),
            quotes: Source::parse(&var_or("QUOTES_SOURCE", "data/quotes.json")),
            prefs_path: PathBuf::from(var_or("PREFS_PATH", "data/prefs.json")),
            images_dir: PathBuf::from(var_or("IMAGES_DIR", "images")),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
