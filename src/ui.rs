use crate::background::{Background, ROTATION_PERIOD};
use crate::quotes::{HIDE_FADE, HIDE_REMOVE_AFTER, SplashOverlay};
use crate::surface::{Region, Surface};
use crate::tabs::{Tab, TabSelector};
use crate::theme::ThemeDisplay;
use std::fmt::Write;

pub struct PageView<'a> {
    pub surface: &'a Surface,
    pub tabs: TabSelector,
    pub theme: ThemeDisplay,
    pub background: Background,
    pub overlay: &'a SplashOverlay,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let container = match view.surface.error() {
        Some(error) => error.to_string(),
        None => render_container(view),
    };
    let theme_attr = view
        .theme
        .data_theme
        .map(|value| format!(r#" data-theme="{value}""#))
        .unwrap_or_default();

    let hide_fade = HIDE_FADE.as_millis().to_string();
    let hide_remove = HIDE_REMOVE_AFTER.as_millis().to_string();
    let rotation = ROTATION_PERIOD.as_millis().to_string();
    let overlay = view.overlay.render();

    fill_template(
        PAGE_HTML,
        &[
            ("THEME_ATTR", theme_attr.as_str()),
            ("OVERLAY", overlay.as_str()),
            ("CONTAINER", container.as_str()),
            ("HIDE_FADE_MS", hide_fade.as_str()),
            ("HIDE_REMOVE_MS", hide_remove.as_str()),
            ("ROTATION_MS", rotation.as_str()),
        ],
    )
}

/// Replaces `{{KEY}}` markers in one pass over `template`. Substituted values
/// are never scanned again, so data containing marker text stays literal.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let marker = &rest[start + 2..];
        let value = marker.find("}}").and_then(|end| {
            let key = &marker[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &marker[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = marker;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_container(view: &PageView<'_>) -> String {
    let surface = view.surface;
    let mut html = format!(
        r#"<header class="header" id="site-header" data-background="{name}" style="background-image:url('{image}')"><h1>{title}</h1><form method="post" action="/theme/toggle" id="theme-toggle-form"><button id="theme-toggle-btn" type="submit"><span id="theme-icon">{icon}</span> <span id="theme-text">{label}</span></button></form></header>"#,
        name = view.background.as_str(),
        image = view.background.image(),
        title = surface.region(Region::Header).unwrap_or_default(),
        icon = view.theme.icon,
        label = view.theme.label,
    );

    html.push_str(r#"<nav class="nav-tabs">"#);
    for tab in Tab::ALL {
        let _ = write!(
            html,
            r#"<a class="{class}" data-tab="{id}" href="/?tab={id}">{label}</a>"#,
            class = active_class("nav-tab", view.tabs.is_active(tab)),
            id = tab.id(),
            label = tab.label(),
        );
    }
    html.push_str("</nav><main>");

    for tab in Tab::ALL {
        let _ = write!(
            html,
            r#"<section id="{id}" class="{class}">{content}</section>"#,
            id = tab.id(),
            class = active_class("tab-content", view.tabs.is_active(tab)),
            content = surface.region(region_for(tab)).unwrap_or_default(),
        );
    }
    html.push_str(
        r#"</main><button id="splash-quote-shuffle" class="shuffle-btn" type="button">🎲 New quote</button>"#,
    );
    html
}

fn region_for(tab: Tab) -> Region {
    match tab {
        Tab::Schedule => Region::Schedule,
        Tab::Attendees => Region::Attendees,
        Tab::Lineup => Region::Lineup,
        Tab::Info => Region::Info,
    }
}

fn active_class(base: &str, active: bool) -> String {
    if active {
        format!("{base} active")
    } else {
        base.to_string()
    }
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Festival Trip Itinerary</title>
  <style>
    :root {
      --bg: #0f1220;
      --card: #1a1f33;
      --ink: #eef0f7;
      --muted: #a3a9c2;
      --accent-blue: #4fa3ff;
      --accent: #ff6b4a;
      --shadow: 0 18px 40px rgba(0, 0, 0, 0.35);
    }

    body[data-theme="light"] {
      --bg: #f8f3e6;
      --card: #ffffff;
      --ink: #2b2a28;
      --muted: #6b645d;
      --shadow: 0 18px 40px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .container {
      width: min(960px, 100%);
      margin: 0 auto;
      padding: 0 16px 48px;
    }

    .header {
      position: relative;
      min-height: 220px;
      border-radius: 0 0 24px 24px;
      background-color: #2b3a55;
      background-size: cover;
      background-position: center;
      display: flex;
      align-items: flex-end;
      justify-content: space-between;
      padding: 24px;
      box-shadow: var(--shadow);
    }

    .header h1 {
      margin: 0;
      color: white;
      text-shadow: 0 2px 12px rgba(0, 0, 0, 0.6);
    }

    #theme-toggle-btn,
    .shuffle-btn {
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
      background: var(--card);
      color: var(--ink);
    }

    .nav-tabs {
      display: flex;
      gap: 6px;
      margin: 20px 0;
      flex-wrap: wrap;
    }

    .nav-tab {
      padding: 8px 14px;
      border-radius: 999px;
      text-decoration: none;
      color: var(--muted);
      font-weight: 600;
    }

    .nav-tab.active {
      background: var(--card);
      color: var(--ink);
    }

    .tab-content {
      display: none;
    }

    .tab-content.active {
      display: block;
    }

    .day-title,
    .lineup-day-title {
      font-size: 1.3rem;
      font-weight: 600;
      margin: 24px 0 10px;
    }

    .event,
    .attendee-card,
    .lineup-day,
    .info-section,
    .weather-widget {
      background: var(--card);
      border-radius: 16px;
      padding: 14px 18px;
      margin-bottom: 12px;
      box-shadow: var(--shadow);
    }

    .event-time,
    .artist-time,
    .attendee-info {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .event-title,
    .attendee-name,
    .info-title {
      font-weight: 600;
      margin: 4px 0;
    }

    .card-names {
      margin-top: 6px;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .attendee-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 12px;
    }

    .attendee-badge {
      display: inline-block;
      margin-top: 8px;
      padding: 2px 10px;
      border-radius: 999px;
      background: var(--accent);
      color: white;
      font-size: 0.8rem;
    }

    .lineup-item {
      display: flex;
      justify-content: space-between;
      padding: 4px 0;
    }

    .headliner-name {
      font-weight: 700;
      color: var(--accent);
    }

    .info-section-highlight {
      border-left: 3px solid var(--accent-blue);
    }

    .weather-forecast {
      display: flex;
      gap: 12px;
      overflow-x: auto;
    }

    .weather-day {
      text-align: center;
      min-width: 64px;
    }

    .static-map {
      width: 100%;
      border-radius: 12px;
    }

    .error {
      margin: 64px auto;
      padding: 24px;
      border-radius: 16px;
      background: var(--card);
      text-align: center;
    }

    .sq-overlay {
      position: fixed;
      inset: 0;
      place-items: center;
      background: rgba(0, 0, 0, 0.75);
      z-index: 10;
      cursor: pointer;
      animation: sq-in 600ms ease;
    }

    .sq-overlay.sq-no-auto {
      animation: none;
    }

    .sq-card {
      max-width: 560px;
      padding: 32px;
      color: white;
      text-align: center;
    }

    .sq-card blockquote {
      font-size: 1.5rem;
      margin: 0 0 12px;
    }

    @keyframes sq-in {
      from {
        opacity: 0;
        transform: scale(0.98);
      }
      to {
        opacity: 1;
        transform: scale(1);
      }
    }
  </style>
</head>
<body{{THEME_ATTR}}>
  {{OVERLAY}}
  <div class="container">
    {{CONTAINER}}
  </div>

  <script>
    const controller = (() => {
      const overlay = document.getElementById('splash-quote-overlay');
      const quoteText = document.getElementById('splash-quote-text');
      const quoteAuthor = document.getElementById('splash-quote-author');
      const header = document.getElementById('site-header');
      const themeIcon = document.getElementById('theme-icon');
      const themeText = document.getElementById('theme-text');

      const showTab = (name) => {
        const target = document.getElementById(name);
        if (!target || !target.classList.contains('tab-content')) {
          return;
        }
        document.querySelectorAll('.tab-content').forEach((content) => {
          content.classList.toggle('active', content === target);
        });
        document.querySelectorAll('.nav-tab').forEach((tab) => {
          tab.classList.toggle('active', tab.dataset.tab === name);
        });
      };

      const applyTheme = (data) => {
        if (data.theme === 'light') {
          document.body.setAttribute('data-theme', 'light');
        } else {
          document.body.removeAttribute('data-theme');
        }
        if (themeIcon) themeIcon.textContent = data.icon;
        if (themeText) themeText.textContent = data.label;
      };

      const toggleTheme = async () => {
        const res = await fetch('/api/theme/toggle', { method: 'POST' });
        if (!res.ok) {
          throw new Error('Unable to toggle theme');
        }
        applyTheme(await res.json());
      };

      const showQuote = ({ auto = true } = {}) => {
        if (!overlay) return;
        overlay.style.transition = '';
        overlay.style.display = 'grid';
        overlay.style.opacity = '1';
        overlay.style.visibility = 'visible';
        overlay.classList.toggle('sq-no-auto', !auto);
        if (auto) {
          overlay.style.animation = 'none';
          void overlay.offsetHeight;
          overlay.style.animation = '';
        }
      };

      const hideQuote = () => {
        if (!overlay) return;
        overlay.style.transition = 'opacity {{HIDE_FADE_MS}}ms ease';
        overlay.style.opacity = '0';
        setTimeout(() => (overlay.style.display = 'none'), {{HIDE_REMOVE_MS}});
      };

      const shuffleQuote = async () => {
        const res = await fetch('/api/quote', { cache: 'no-store' });
        if (!res.ok) {
          throw new Error('Unable to load quote');
        }
        const data = await res.json();
        quoteText.textContent = data.text;
        quoteAuthor.textContent = data.author;
        overlay.setAttribute('data-genre', data.genre);
        showQuote({ auto: data.auto });
      };

      const refreshBackground = async () => {
        if (!header) return;
        const res = await fetch('/api/background');
        if (!res.ok) return;
        const data = await res.json();
        header.dataset.background = data.background;
        header.style.backgroundImage = `url('${data.image}')`;
      };

      return { showTab, toggleTheme, showQuote, hideQuote, shuffleQuote, refreshBackground };
    })();

    document.querySelectorAll('.nav-tab').forEach((tab) => {
      tab.addEventListener('click', (event) => {
        event.preventDefault();
        controller.showTab(tab.dataset.tab);
        history.replaceState(null, '', `/?tab=${tab.dataset.tab}`);
      });
    });

    const themeForm = document.getElementById('theme-toggle-form');
    if (themeForm) {
      themeForm.addEventListener('submit', (event) => {
        event.preventDefault();
        controller.toggleTheme().catch((err) => console.error(err));
      });
    }

    const overlayEl = document.getElementById('splash-quote-overlay');
    if (overlayEl) {
      overlayEl.addEventListener('click', controller.hideQuote);
    }

    const shuffleBtn = document.getElementById('splash-quote-shuffle');
    if (shuffleBtn) {
      shuffleBtn.addEventListener('click', () => {
        controller.shuffleQuote().catch((err) => console.error(err));
      });
    }

    setInterval(() => {
      controller.refreshBackground().catch((err) => console.error(err));
    }, {{ROTATION_MS}});
  </script>
</body>
</html>
"#;
