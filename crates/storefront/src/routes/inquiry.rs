//! Technical inquiry route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use super::with_toasts;
use crate::error::Result;
use crate::i18n::Strings;
use crate::inquiry::{
    InquiryError, InquiryForm, InquiryPayload, SUCCESS_MESSAGE, SpecTextState, spec_text_state,
};
use crate::notify::NotificationKind;
use crate::state::AppState;

/// Response for inquiry submission.
#[derive(Debug, Serialize)]
pub struct InquiryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(InquiryResponse {
            success: false,
            reference: None,
            message: Some(message.to_string()),
        }),
    )
        .into_response()
}

/// Description hint form data.
#[derive(Debug, Deserialize)]
pub struct HintForm {
    #[serde(default)]
    pub message: String,
}

/// Description hint fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/spec_hint.html")]
pub struct SpecHintTemplate {
    pub state: &'static str,
    pub message: &'static str,
}

/// Submit a technical inquiry.
///
/// POST /inquiry
///
/// The cart is snapshotted under the engine lock, which is released for the
/// processing delay and re-acquired to emit the success notification.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<InquiryForm>,
) -> Result<Response> {
    let contact = match form.validate() {
        Ok(contact) => contact,
        Err(e) => return Ok(failure(StatusCode::BAD_REQUEST, &e.to_string())),
    };

    let pending = {
        let engine = state.visitor_engine(&session).await?;
        state
            .inquiries()
            .dispatch(InquiryPayload::new(contact, engine.cart()))
    };

    let response = match pending.wait().await {
        Ok(receipt) => {
            let mut engine = state.visitor_engine(&session).await?;
            engine.notify(SUCCESS_MESSAGE, NotificationKind::Success);
            with_toasts(
                &mut engine,
                Json(InquiryResponse {
                    success: true,
                    reference: Some(receipt.reference),
                    message: None,
                }),
            )
        }
        Err(InquiryError::Cancelled) => {
            tracing::warn!("Inquiry cancelled before completion");
            failure(StatusCode::SERVICE_UNAVAILABLE, "Inquiry was cancelled.")
        }
        Err(e) => {
            tracing::error!(error = %e, "Inquiry processing failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong. Please try again.",
            )
        }
    };
    Ok(response)
}

/// Live hint for the technical description field.
///
/// POST /inquiry/hint
#[instrument(skip(state, session, form))]
pub async fn hint(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<HintForm>,
) -> Result<SpecHintTemplate> {
    let hint_state = spec_text_state(&form.message);
    let t = Strings::for_locale(state.visitor_engine(&session).await?.locale());
    Ok(SpecHintTemplate {
        state: hint_state.slug(),
        message: match hint_state {
            SpecTextState::TooShort => t.hint_too_short,
            SpecTextState::Empty | SpecTextState::Ok => "",
        },
    })
}
