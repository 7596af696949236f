//! Server-side HTML for the dashboard page.

use crate::flash::{Flash, FlashLevel};

use std::fmt::Write;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

pub const RUNNING_BANNER: &str = "✅ Web server is running";
pub const STOPPED_BANNER: &str = "⚠️ Web server is not running";
pub const START_HINT: &str = "Click 'Start Server' to view the dashboard";

const FRAME_HEIGHT_PX: u32 = 800;
const FRAME_CONTAINER_HEIGHT_PX: u32 = 820;

/// Everything one render needs. Built fresh per request.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub target_url: &'a str,
    pub server_up: bool,
    pub next_refresh: NaiveDateTime,
    pub flash: Option<Flash>,
}

/// The nearest future top or half hour.
///
/// Minutes 0..30 map to :30 of the same hour, 30..60 to :00 of the next
/// hour, rolling over midnight into the next day.
pub fn next_refresh(now: NaiveDateTime) -> NaiveDateTime {
    let hour_start = now.date().and_time(NaiveTime::MIN) + Duration::hours(i64::from(now.hour()));

    if now.minute() < 30 {
        hour_start + Duration::minutes(30)
    } else {
        hour_start + Duration::hours(1)
    }
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);
    let title = escape_html(view.title);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<main>
<h1>{title}</h1>
"#
    );

    let (level, banner) = if view.server_up {
        (FlashLevel::Success, RUNNING_BANNER)
    } else {
        (FlashLevel::Warning, STOPPED_BANNER)
    };
    push_message(&mut html, level, banner);

    html.push_str("<div class=\"controls\">\n");
    let _ = writeln!(
        html,
        "<div class=\"col wide\">Next auto-refresh: {}</div>",
        view.next_refresh.format("%H:%M")
    );
    html.push_str("<div class=\"col\">");
    if !view.server_up {
        html.push_str(
            r#"<form method="post" action="/start"><button type="submit">Start Server</button></form>"#,
        );
    }
    html.push_str("</div>\n<div class=\"col\">");
    if view.server_up {
        html.push_str(
            r#"<form method="post" action="/restart"><button type="submit">Restart Server</button></form>"#,
        );
    }
    html.push_str("</div>\n</div>\n");

    if let Some(ref flash) = view.flash {
        push_message(&mut html, flash.level, &flash.message);
    }

    if view.server_up {
        let _ = writeln!(
            html,
            r#"<div class="frame" style="height: {FRAME_CONTAINER_HEIGHT_PX}px;"><iframe src="{src}" width="100%" height="{FRAME_HEIGHT_PX}" style="border: none;"></iframe></div>"#,
            src = escape_html(view.target_url),
        );
    } else {
        push_message(&mut html, FlashLevel::Info, START_HINT);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn push_message(html: &mut String, level: FlashLevel, text: &str) {
    let _ = writeln!(
        html,
        r#"<div class="{}">{}</div>"#,
        level.css_class(),
        escape_html(text)
    );
}

/// Escape text for element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 0; background: #fff; color: #262730; }
main { padding: 1.5rem 2.5rem; }
h1 { margin-top: 0; }
.msg { padding: 0.75rem 1rem; border-radius: 0.5rem; margin: 0.75rem 0; }
.success { background: #dff5e3; color: #1b5e20; }
.info { background: #e3eefc; color: #0d47a1; }
.warning { background: #fff6d6; color: #7a5a00; }
.error { background: #fde4e4; color: #b71c1c; }
.controls { display: flex; gap: 1rem; align-items: center; margin: 0.75rem 0; }
.col { flex: 1; }
.col.wide { flex: 2; }
button { padding: 0.4rem 0.9rem; border: 1px solid #ccc; border-radius: 0.5rem; background: #fff; cursor: pointer; }
.frame { width: 100%; }
";
