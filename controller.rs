use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BadgeError;

const DEFAULT_LABEL: &str = "build";
const CHAR_WIDTH: usize = 7;
const PADDING: usize = 10;
const HEIGHT: usize = 20;

pub trait CreateStatusBadge: Send + Sync {
    fn create_status_badge(&self, event: Value) -> BoxFuture<'_, Result<Value, BadgeError>>;
}

#[derive(Deserialize, PartialEq, Debug)]
pub struct BadgeRequest {
    pub repo: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
pub struct BadgeResponse {
    pub status: String,
    pub svg: String,
}

// Renders flat SVG status badges
#[derive(Clone, Copy, Debug, Default)]
pub struct BadgeController;

impl BadgeController {
    pub fn new() -> Self {
        BadgeController
    }

    fn create(&self, event: Value) -> Result<Value, BadgeError> {
        // derived struct deserializers also accept sequences by position
        if !event.is_object() {
            return Err(BadgeError::InvalidEvent("expected a JSON object".to_string()));
        }
        let request: BadgeRequest = serde_json::from_value(event)?;
        let status = request
            .status
            .ok_or_else(|| BadgeError::NotFound(request.repo.clone()))?;
        let label = request.label.as_deref().unwrap_or(DEFAULT_LABEL);
        let response = BadgeResponse {
            status: "ok".to_string(),
            svg: render_badge(label, &status),
        };
        Ok(serde_json::to_value(response)?)
    }
}

impl CreateStatusBadge for BadgeController {
    fn create_status_badge(&self, event: Value) -> BoxFuture<'_, Result<Value, BadgeError>> {
        Box::pin(async move { self.create(event) })
    }
}

pub fn status_color(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "passing" | "success" | "ok" => "#4c1",
        "failing" | "failure" | "error" => "#e05d44",
        "pending" | "running" => "#dfb317",
        _ => "#9f9f9f",
    }
}

// Label on the left, status on the right
pub fn render_badge(label: &str, status: &str) -> String {
    let label_width = text_width(label);
    let status_width = text_width(status);
    let width = label_width + status_width;
    let label_x = label_width / 2;
    let status_x = label_width + status_width / 2;
    let label = escape_xml(label);
    let status_text = escape_xml(status);
    let color = status_color(status);
    format!(
        concat!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" role="img" aria-label="{label}: {status}">"##,
            r##"<title>{label}: {status}</title>"##,
            r##"<rect width="{label_width}" height="{height}" fill="#555"/>"##,
            r##"<rect x="{label_width}" width="{status_width}" height="{height}" fill="{color}"/>"##,
            r##"<g fill="#fff" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" font-size="11">"##,
            r##"<text x="{label_x}" y="14">{label}</text>"##,
            r##"<text x="{status_x}" y="14">{status}</text>"##,
            r##"</g></svg>"##,
        ),
        width = width,
        height = HEIGHT,
        label = label,
        status = status_text,
        label_width = label_width,
        status_width = status_width,
        color = color,
        label_x = label_x,
        status_x = status_x,
    )
}

fn text_width(text: &str) -> usize {
    text.chars().count() * CHAR_WIDTH + PADDING
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn colors_follow_status() {
        assert_eq!(status_color("passing"), "#4c1");
        assert_eq!(status_color("FAILING"), "#e05d44");
        assert_eq!(status_color("running"), "#dfb317");
        assert_eq!(status_color("unknown"), "#9f9f9f");
    }

    #[test]
    fn badge_width_tracks_text_length() {
        // "build" -> 45, "passing" -> 59
        let svg = render_badge("build", "passing");
        assert!(svg.starts_with(r##"<svg xmlns="http://www.w3.org/2000/svg" width="104""##));
        assert!(svg.contains(r##"<rect x="45" width="59" height="20" fill="#4c1"/>"##));
        assert!(svg.contains(r##"<text x="22" y="14">build</text>"##));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn badge_text_is_escaped() {
        let svg = render_badge("a&b", "<ok>");
        assert!(svg.contains("a&amp;b"));
        assert!(svg.contains("&lt;ok&gt;"));
        assert!(!svg.contains("<ok>"));
    }

    #[tokio::test]
    async fn missing_status_is_not_found() {
        let result = BadgeController::new()
            .create_status_badge(json!({ "repo": "missing" }))
            .await;
        match result {
            Err(BadgeError::NotFound(repo)) => assert_eq!(repo, "missing"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_event_is_invalid() {
        let result = BadgeController::new()
            .create_status_badge(json!({ "label": "build" }))
            .await;
        assert!(matches!(result, Err(BadgeError::InvalidEvent(_))));
    }

    #[tokio::test]
    async fn array_event_is_invalid() {
        let result = BadgeController::new()
            .create_status_badge(json!(["not", "an", "object"]))
            .await;
        match result {
            Err(BadgeError::InvalidEvent(detail)) => assert_eq!(detail, "expected a JSON object"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
