use crate::state::AppState;
use chrono::{Local, Timelike};
use std::time::Duration;
use tracing::info;

pub const ROTATION_PERIOD: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    Morning,
    Sunset,
    #[default]
    Night,
}

impl Background {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            6..17 => Background::Morning,
            17..20 => Background::Sunset,
            _ => Background::Night,
        }
    }

    pub fn now() -> Self {
        Self::for_hour(Local::now().hour())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Background::Morning => "morning",
            Background::Sunset => "sunset",
            Background::Night => "night",
        }
    }

    pub fn image(self) -> &'static str {
        match self {
            Background::Morning => "/images/austin-morning.jpg",
            Background::Sunset => "/images/austin-sunset.jpg",
            Background::Night => "/images/austin-night.jpg",
        }
    }
}

/// Re-evaluates the header background now and then every hour.
pub fn spawn_rotation(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ROTATION_PERIOD);
        loop {
            ticker.tick().await;
            let next = Background::now();
            let mut current = state.background.lock().await;
            if *current != next {
                info!("background updated to {}", next.as_str());
                *current = next;
            }
        }
    })
}
