use crate::background::Background;
use crate::config::Config;
use crate::models::Preferences;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
    pub prefs: Arc<Mutex<Preferences>>,
    pub background: Arc<Mutex<Background>>,
}

impl AppState {
    pub fn new(config: Config, prefs: Preferences) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            prefs: Arc::new(Mutex::new(prefs)),
            background: Arc::new(Mutex::new(Background::now())),
        }
    }
}
