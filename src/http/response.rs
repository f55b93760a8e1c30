//! Navigation responses.
//!
//! # Responsibilities
//! - Render the HTML shell for a matched route
//! - Map `NotFound` and unsupported methods to status codes
//!
//! # Design Decisions
//! - The shell only names the view; rendering belongs to the client bundle
//! - Route names come from config, so attribute values are escaped

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::routing::RouteEntry;

/// Client entry module loaded by the shell.
pub const CLIENT_ENTRY: &str = "/src/main.js";

/// HTML document that mounts the entry's view.
pub fn render_shell(entry: &RouteEntry) -> String {
    let view = entry.view;
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}</title>
  </head>
  <body>
    <div id="{mount}" data-route="{route}" data-view="{component}"></div>
    <script type="module" src="{entry}"></script>
  </body>
</html>
"#,
        title = view.title(),
        mount = view.mount_id(),
        route = escape_attr(&entry.name),
        component = view.component(),
        entry = CLIENT_ENTRY,
    )
}

pub fn view_response(entry: &RouteEntry) -> Response {
    (StatusCode::OK, Html(render_shell(entry))).into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "No route matches this path").into_response()
}

pub fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Only GET and HEAD navigate").into_response()
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
