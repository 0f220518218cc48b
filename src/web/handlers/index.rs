//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the landing page.
///
/// Renders `templates/index.html` with links to the JSON endpoints.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: &'static str,
    pub status_path: &'static str,
    pub list_path: &'static str,
    pub version: &'static str,
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self {
            title: "Central IT Hub",
            status_path: "/api/status",
            list_path: "/api/subsidiaries",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Renders the landing page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> impl IntoResponse {
    IndexTemplate::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_links_to_status_api() {
        let html = IndexTemplate::default().render().unwrap();

        assert!(html.contains("<h1>Central IT Hub</h1>"));
        assert!(html.contains("System is Online."));
        assert!(html.contains(r#"href="/api/status""#));
    }
}
