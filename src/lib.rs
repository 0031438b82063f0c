pub mod app;
pub mod background;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod quotes;
pub mod render;
pub mod state;
pub mod storage;
pub mod surface;
pub mod tabs;
pub mod theme;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_prefs;
