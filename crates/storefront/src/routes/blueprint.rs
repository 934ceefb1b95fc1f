//! Blueprint tab handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Path;
use tracing::instrument;

use crate::blueprint::{BlueprintSheet, BlueprintTab};
use crate::error::{AppError, Result};

/// Blueprint tab content template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/blueprint.html")]
pub struct BlueprintTemplate {
    pub tab: BlueprintTab,
    pub sheet: BlueprintSheet,
}

impl From<BlueprintTab> for BlueprintTemplate {
    fn from(tab: BlueprintTab) -> Self {
        Self {
            tab,
            sheet: tab.sheet(),
        }
    }
}

/// Content for one blueprint tab.
#[instrument]
pub async fn sheet(Path(tab): Path<String>) -> Result<BlueprintTemplate> {
    let tab = tab
        .parse::<BlueprintTab>()
        .map_err(|e| AppError::NotFound(e.to_string()))?;
    Ok(tab.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::routes::tests::body_text;

    #[tokio::test]
    async fn test_each_tab_renders() {
        let response = sheet(Path("chemistry".to_owned()))
            .await
            .ok()
            .unwrap()
            .into_response();
        let body = body_text(response).await;
        assert!(body.contains(r#"data-tab="chemistry""#));
        assert!(body.contains("according to EN 10210"));
        assert!(body.contains("<li>Heat Number Tracking</li>"));

        let body = body_text(
            sheet(Path("mechanics".to_owned()))
                .await
                .ok()
                .unwrap()
                .into_response(),
        )
        .await;
        assert!(body.contains("SGS Inspection Ready"));
    }

    #[tokio::test]
    async fn test_unknown_tab_is_not_found() {
        let err = sheet(Path("drawings".to_owned())).await.err().unwrap();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
