use axum::http::{HeaderMap, StatusCode};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct ThemeResponse {
    theme: String,
    icon: String,
    label: String,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    text: String,
    author: String,
    genre: String,
    auto: bool,
}

#[derive(Debug, Deserialize)]
struct BackgroundResponse {
    background: String,
    image: String,
}

struct TestServer {
    base_url: String,
    prefs_path: PathBuf,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_file(&self.prefs_path);
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[cfg(unix)]
mod cleanup {
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    /// Kills servers left behind when a test aborts before dropping them.
    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter().copied().filter(|pid| *pid > 0) {
                unsafe {
                    libc::kill(pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_path(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "festival_itinerary_http_{}_{}_{}",
        std::process::id(),
        nanos,
        name
    ));
    path
}

fn write_itinerary(value: serde_json::Value) -> PathBuf {
    let path = unique_path("events.json");
    std::fs::write(&path, serde_json::to_vec(&value).unwrap()).expect("write itinerary");
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/theme")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(itinerary_source: &str) -> TestServer {
    spawn_server_with(itinerary_source, &[]).await
}

/// `overrides` are applied after the defaults, so they win.
async fn spawn_server_with(itinerary_source: &str, overrides: &[(&str, &str)]) -> TestServer {
    let port = pick_free_port();
    let prefs_path = unique_path("prefs.json");
    let quotes_path = unique_path("quotes-missing.json");
    let child = Command::new(env!("CARGO_BIN_EXE_festival_itinerary"))
        .env("PORT", port.to_string())
        .env("ITINERARY_SOURCE", itinerary_source)
        .env("QUOTES_SOURCE", &quotes_path)
        .env("PREFS_PATH", &prefs_path)
        .env("RUST_LOG", "info")
        .envs(overrides.iter().copied())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        prefs_path,
        child,
    }
}

/// Serves `status` for every request to `/events.json`.
async fn spawn_upstream(status: StatusCode) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().unwrap();
    let app = axum::Router::new().route(
        "/events.json",
        axum::routing::get(move || async move { (status, "upstream unavailable") }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/events.json")
}

type SeenRequests = Arc<std::sync::Mutex<Vec<(&'static str, HeaderMap)>>>;

fn recorded_json(
    path: &'static str,
    body: serde_json::Value,
    seen: SeenRequests,
) -> axum::routing::MethodRouter {
    axum::routing::get(move |headers: HeaderMap| async move {
        seen.lock().unwrap().push((path, headers));
        axum::Json(body)
    })
}

/// Serves both documents and records the headers of every request.
async fn spawn_document_upstream(
    itinerary: serde_json::Value,
    quotes: serde_json::Value,
) -> (String, SeenRequests) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().unwrap();
    let seen = SeenRequests::default();
    let app = axum::Router::new()
        .route(
            "/events.json",
            recorded_json("/events.json", itinerary, seen.clone()),
        )
        .route(
            "/quotes.json",
            recorded_json("/quotes.json", quotes, seen.clone()),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), seen)
}

fn minimal_itinerary() -> serde_json::Value {
    serde_json::json!({
        "tripInfo": { "title": "ACL 2025 Crew Trip" },
        "schedule": [
            {
                "title": "Thursday, Oct 2",
                "events": [
                    { "time": "3:00 PM", "title": "Check in", "details": "Hotel lobby", "type": "travel" },
                    { "time": "7:00 PM", "title": "Dinner", "details": "<small>Ash, Sam</small>", "type": "food" }
                ]
            }
        ]
    })
}

async fn get_page(server: &TestServer, query: &str) -> (reqwest::StatusCode, String) {
    let response = Client::new()
        .get(format!("{}/{query}", server.base_url))
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn http_renders_schedule_events_in_order() {
    let _guard = TEST_LOCK.lock().await;
    let itinerary = write_itinerary(minimal_itinerary());
    let server = spawn_server(itinerary.to_str().unwrap()).await;

    let (status, body) = get_page(&server, "").await;
    assert!(status.is_success());
    assert!(body.contains("<h1>ACL 2025 Crew Trip</h1>"));
    assert_eq!(body.matches(r#"<div class="event "#).count(), 2);
    let check_in = body.find("Check in").unwrap();
    let dinner = body.find("Dinner").unwrap();
    assert!(check_in < dinner);
    assert!(body.contains(r#"<div class="card-names">Ash, Sam</div>"#));
    assert!(body.contains(r#"<section id="schedule" class="tab-content active">"#));
    assert!(!body.contains(r#"class="error""#));

    let _ = std::fs::remove_file(itinerary);
}

#[tokio::test]
async fn http_failed_itinerary_fetch_shows_single_error() {
    let _guard = TEST_LOCK.lock().await;
    let upstream = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE).await;
    let server = spawn_server(&upstream).await;

    let (status, body) = get_page(&server, "").await;
    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.matches(r#"class="error""#).count(), 1);
    assert!(body.contains("Failed to load app data"));
    assert!(!body.contains("503"));
    assert!(!body.contains(r#"class="tab-content"#));
    assert!(!body.contains(r#"class="event "#));
    assert!(!body.contains("<h1>"));
}

#[tokio::test]
async fn http_unknown_tab_keeps_schedule_active() {
    let _guard = TEST_LOCK.lock().await;
    let itinerary = write_itinerary(minimal_itinerary());
    let server = spawn_server(itinerary.to_str().unwrap()).await;

    let (_, body) = get_page(&server, "?tab=lineup").await;
    assert!(body.contains(r#"<section id="lineup" class="tab-content active">"#));
    assert_eq!(body.matches(r#"class="tab-content active""#).count(), 1);

    let (_, body) = get_page(&server, "?tab=tickets").await;
    assert!(body.contains(r#"<section id="schedule" class="tab-content active">"#));
    assert_eq!(body.matches(r#"class="tab-content active""#).count(), 1);

    let _ = std::fs::remove_file(itinerary);
}

#[tokio::test]
async fn http_theme_toggle_is_persisted_and_involutive() {
    let _guard = TEST_LOCK.lock().await;
    let itinerary = write_itinerary(minimal_itinerary());
    let server = spawn_server(itinerary.to_str().unwrap()).await;
    let client = Client::new();

    let initial: ThemeResponse = client
        .get(format!("{}/api/theme", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(initial.theme, "dark");
    assert_eq!(initial.icon, "🌙");

    let toggled: ThemeResponse = client
        .post(format!("{}/api/theme/toggle", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggled.theme, "light");
    assert_eq!(toggled.label, "Light");
    let stored = std::fs::read_to_string(&server.prefs_path).unwrap();
    assert!(stored.contains("light"));

    let (_, body) = get_page(&server, "").await;
    assert!(body.contains(r#"<body data-theme="light">"#));

    let restored: ThemeResponse = client
        .post(format!("{}/api/theme/toggle", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(restored.theme, initial.theme);
    assert_eq!(restored.icon, initial.icon);
    assert_eq!(restored.label, initial.label);
    let stored = std::fs::read_to_string(&server.prefs_path).unwrap();
    assert!(stored.contains("dark"));

    let _ = std::fs::remove_file(itinerary);
}

#[tokio::test]
async fn http_quote_uses_fallback_when_source_missing() {
    let _guard = TEST_LOCK.lock().await;
    let itinerary = write_itinerary(minimal_itinerary());
    let server = spawn_server(itinerary.to_str().unwrap()).await;

    let quote: QuoteResponse = Client::new()
        .get(format!("{}/api/quote", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let authors = ["— Elton John", "— Kurt Cobain", "— Miles Davis"];
    assert!(authors.contains(&quote.author.as_str()));
    assert!(!quote.text.is_empty());
    assert!(!quote.genre.is_empty());

    let (_, body) = get_page(&server, "").await;
    assert!(body.contains(r#"id="splash-quote-overlay""#));

    let _ = std::fs::remove_file(itinerary);
}

#[tokio::test]
async fn http_background_reports_current_slot() {
    let _guard = TEST_LOCK.lock().await;
    let itinerary = write_itinerary(minimal_itinerary());
    let server = spawn_server(itinerary.to_str().unwrap()).await;

    let background: BackgroundResponse = Client::new()
        .get(format!("{}/api/background", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(["morning", "sunset", "night"].contains(&background.background.as_str()));
    assert!(background.image.contains(&background.background));

    let _ = std::fs::remove_file(itinerary);
}

#[tokio::test]
async fn http_url_sources_render_and_quotes_bypass_caches() {
    let _guard = TEST_LOCK.lock().await;
    let quotes = serde_json::json!([
        { "text": "Music is the space between the notes.", "author": "Claude Debussy", "genres": ["classical"] }
    ]);
    let (upstream, seen) = spawn_document_upstream(minimal_itinerary(), quotes).await;
    let itinerary_url = format!("{upstream}/events.json");
    let quotes_url = format!("{upstream}/quotes.json");
    let server = spawn_server_with(&itinerary_url, &[("QUOTES_SOURCE", quotes_url.as_str())]).await;

    let (status, body) = get_page(&server, "").await;
    assert!(status.is_success());
    assert!(body.contains("<h1>ACL 2025 Crew Trip</h1>"));
    assert_eq!(body.matches(r#"<div class="event "#).count(), 2);
    assert!(body.contains("Music is the space between the notes."));
    assert!(!body.contains(r#"class="error""#));

    let quote: QuoteResponse = Client::new()
        .get(format!("{}/api/quote", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(quote.text, "Music is the space between the notes.");
    assert_eq!(quote.author, "— Claude Debussy");
    assert!(!quote.auto);

    let seen = seen.lock().unwrap();
    let quote_requests: Vec<&HeaderMap> = seen
        .iter()
        .filter(|(path, _)| *path == "/quotes.json")
        .map(|(_, headers)| headers)
        .collect();
    assert_eq!(quote_requests.len(), 2);
    for headers in quote_requests {
        let cache_control = headers.get("cache-control").unwrap().to_str().unwrap();
        assert!(cache_control.contains("no-cache"));
        assert!(cache_control.contains("no-store"));
        assert_eq!(headers.get("pragma").unwrap(), "no-cache");
    }
    assert!(seen.iter().any(|(path, _)| *path == "/events.json"));
}

#[tokio::test]
async fn http_serves_background_images() {
    let _guard = TEST_LOCK.lock().await;
    let itinerary = write_itinerary(minimal_itinerary());
    let images = unique_path("images");
    std::fs::create_dir_all(&images).unwrap();
    std::fs::write(images.join("austin-sunset.jpg"), b"sunset bytes").unwrap();
    let server = spawn_server_with(
        itinerary.to_str().unwrap(),
        &[("IMAGES_DIR", images.to_str().unwrap())],
    )
    .await;
    let client = Client::new();

    let response = client
        .get(format!("{}/images/austin-sunset.jpg", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()["content-type"], "image/jpeg");
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"sunset bytes");

    let missing = client
        .get(format!("{}/images/austin-morning.jpg", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    let escaping = client
        .get(format!("{}/images/..%2Fevents.json", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(escaping.status(), reqwest::StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(images);
    let _ = std::fs::remove_file(itinerary);
}
