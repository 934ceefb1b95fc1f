//! Language switch handler.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::with_toasts;
use crate::error::Result;
use crate::state::AppState;

/// Language switch form data.
#[derive(Debug, Deserialize)]
pub struct LangForm {
    pub lang: String,
}

/// Switch the display language.
///
/// A recognized tag is persisted for this visitor and the page is asked to
/// reload so every string is re-rendered. Unrecognized tags are ignored.
#[instrument(skip(state, session))]
pub async fn set_lang(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LangForm>,
) -> Result<Response> {
    let mut engine = state.visitor_engine(&session).await?;
    if !engine.set_locale(&form.lang) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(with_toasts(&mut engine, AppendHeaders([("HX-Refresh", "true")])))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use imex_core::Locale;

    use super::*;
    use crate::routes::tests::{session_for, test_state};

    fn lang(tag: &str) -> Form<LangForm> {
        Form(LangForm {
            lang: tag.to_owned(),
        })
    }

    #[tokio::test]
    async fn test_switch_refreshes_page() {
        let state = test_state();
        let session = session_for(&state);
        let response = set_lang(State(state.clone()), session.clone(), lang("uz"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("HX-Refresh").unwrap(), "true");
        assert!(
            response
                .headers()
                .get("HX-Trigger")
                .unwrap()
                .to_str()
                .unwrap()
                .contains("Language changed to UZ")
        );
        assert_eq!(
            state.visitor_engine(&session).await.unwrap().locale(),
            Locale::Uz
        );
    }

    #[tokio::test]
    async fn test_unknown_tag_is_ignored() {
        let state = test_state();
        let session = session_for(&state);
        let response = set_lang(State(state.clone()), session.clone(), lang("fr"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get("HX-Refresh").is_none());
        assert_eq!(
            state.visitor_engine(&session).await.unwrap().locale(),
            Locale::En
        );
    }

    #[tokio::test]
    async fn test_switch_is_per_visitor() {
        let state = test_state();
        let first = session_for(&state);
        let second = session_for(&state);
        set_lang(State(state.clone()), first.clone(), lang("ru"))
            .await
            .unwrap();

        assert_eq!(
            state.visitor_engine(&first).await.unwrap().locale(),
            Locale::Ru
        );
        assert_eq!(
            state.visitor_engine(&second).await.unwrap().locale(),
            Locale::En
        );
    }
}
