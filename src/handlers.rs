use crate::errors::AppError;
use crate::models::{BackgroundResponse, PageQuery, Preferences, QuoteResponse, ThemeResponse};
use crate::quotes::{SplashOverlay, Xorshift64, select_quote};
use crate::render::render_app;
use crate::state::AppState;
use crate::storage::{load_itinerary, load_quotes, persist_prefs, read_image};
use crate::surface::Surface;
use crate::tabs::TabSelector;
use crate::theme::{Theme, ThemeController};
use crate::ui::{PageView, render_page};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect},
};
use tracing::{error, info};

const LOAD_FAILED: &str = "Failed to load app data";

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> (StatusCode, Html<String>) {
    let config = &state.config;
    let (itinerary, quotes) = tokio::join!(
        load_itinerary(&state.http, &config.itinerary),
        load_quotes(&state.http, &config.quotes),
    );

    let mut surface = Surface::default();
    let status = match itinerary {
        Ok(itinerary) => {
            render_app(&itinerary, &mut surface);
            StatusCode::OK
        }
        Err(err) => {
            error!("failed to load itinerary from {}: {err}", config.itinerary);
            surface.show_error(LOAD_FAILED);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let mut tabs = TabSelector::default();
    if let Some(tab) = query.tab.as_deref() {
        tabs.select(tab);
    }

    let selection = select_quote(&quotes, &mut Xorshift64::from_clock());
    let overlay = SplashOverlay::new(&selection, true);

    let theme = state.prefs.lock().await.theme;
    let background = *state.background.lock().await;

    let html = render_page(&PageView {
        surface: &surface,
        tabs,
        theme: theme.display(),
        background,
        overlay: &overlay,
    });
    (status, Html(html))
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let theme = state.prefs.lock().await.theme;
    Json(theme_response(theme))
}

pub async fn toggle_theme(State(state): State<AppState>) -> Result<Json<ThemeResponse>, AppError> {
    let theme = apply_toggle(&state).await?;
    Ok(Json(theme_response(theme)))
}

pub async fn toggle_theme_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_toggle(&state).await?;
    Ok(Redirect::to("/"))
}

async fn apply_toggle(state: &AppState) -> Result<Theme, AppError> {
    let mut prefs = state.prefs.lock().await;
    let mut controller = ThemeController::new(prefs.theme);
    let theme = controller.toggle();

    persist_prefs(&state.config.prefs_path, &Preferences { theme }).await?;
    prefs.theme = theme;

    info!("theme set to {}", theme.as_str());
    Ok(theme)
}

pub async fn get_quote(State(state): State<AppState>) -> Json<QuoteResponse> {
    let quotes = load_quotes(&state.http, &state.config.quotes).await;
    let selection = select_quote(&quotes, &mut Xorshift64::from_clock());
    Json(SplashOverlay::new(&selection, false).to_response())
}

pub async fn get_background(State(state): State<AppState>) -> Json<BackgroundResponse> {
    let background = *state.background.lock().await;
    Json(BackgroundResponse {
        background: background.as_str().to_string(),
        image: background.image().to_string(),
    })
}

pub async fn get_image(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (content_type, bytes) = read_image(&state.config.images_dir, &name).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

fn theme_response(theme: Theme) -> ThemeResponse {
    let display = theme.display();
    ThemeResponse {
        theme,
        icon: display.icon.to_string(),
        label: display.label.to_string(),
    }
}
