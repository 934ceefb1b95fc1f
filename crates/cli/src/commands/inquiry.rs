//! Inquiry commands.

use imex_storefront::config::StorefrontConfig;
use imex_storefront::inquiry::{
    InquiryForm, InquiryPayload, InquiryProcessor, SUCCESS_MESSAGE, SpecTextState, spec_text_state,
};
use imex_storefront::notify::NotificationKind;

use super::{CliEngine, CommandError};

/// Submit an inquiry for the current inquiry list.
///
/// Waits for processing; the list itself is left unchanged.
///
/// # Errors
///
/// Returns `CommandError::Inquiry` if the form is invalid or processing
/// does not complete.
pub async fn submit(
    engine: &mut CliEngine,
    config: &StorefrontConfig,
    form: InquiryForm,
) -> Result<(), CommandError> {
    if spec_text_state(&form.message) == SpecTextState::TooShort {
        tracing::warn!("Technical description is very short");
    }

    let contact = form.validate()?;
    if engine.cart().is_empty() {
        tracing::warn!("Submitting an inquiry with an empty list");
    }

    let processor = InquiryProcessor::new(config.inquiry_delay);
    tracing::info!("Processing inquiry...");
    let receipt = processor
        .dispatch(InquiryPayload::new(contact, engine.cart()))
        .wait()
        .await?;

    engine.notify(SUCCESS_MESSAGE, NotificationKind::Success);
    tracing::info!(
        "Reference {} (received {})",
        receipt.reference,
        receipt.received_at.to_rfc3339()
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use imex_core::ProductId;
    use imex_storefront::inquiry::InquiryError;
    use tempfile::TempDir;

    use super::*;
    use crate::commands::boot;

    fn form(email: &str) -> InquiryForm {
        InquiryForm {
            name: "Aziz".to_owned(),
            company: None,
            email: email.to_owned(),
            phone: None,
            message: "Valves for a 40 bar line".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_submit() {
        let dir = TempDir::new().unwrap();
        let config = StorefrontConfig {
            store_path: dir.path().join("store.json"),
            inquiry_delay: Duration::ZERO,
            ..StorefrontConfig::default()
        };
        let mut engine = boot(&config);
        engine.add(&ProductId::from("VL-099")).unwrap();

        submit(&mut engine, &config, form("buyer@plant.uz"))
            .await
            .unwrap();
        assert_eq!(engine.cart().item_count(), 1);

        let err = submit(&mut engine, &config, form("buyer"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Inquiry(InquiryError::InvalidEmail(_))
        ));
    }
}
