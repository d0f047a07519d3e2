//! The first version of the site posted its unified form to
//! `/demo-request` and `/audit-request` and expected Russian-language
//! acknowledgements back. The endpoints stay up so cached copies of the
//! old page keep working.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;

use crate::mail::message::OutboundEmail;
use crate::mail::Mailer;
use crate::utils::error_helpers::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum LegacyFormError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for LegacyFormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for LegacyFormError {
    fn status_code(&self) -> StatusCode {
        match self {
            LegacyFormError::Validation(_) => StatusCode::BAD_REQUEST,
            LegacyFormError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            LegacyFormError::Validation(message) => message.clone(),
            LegacyFormError::Unexpected(_) => "Ошибка отправки. Попробуйте еще раз.".to_string(),
        };
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "success": false, "message": message }))
    }
}

#[tracing::instrument(name = "Relaying a legacy demo request", skip(form, mailer))]
pub async fn legacy_demo(
    form: web::Json<serde_json::Value>,
    mailer: web::Data<Mailer>,
) -> Result<HttpResponse, LegacyFormError> {
    relay_legacy_form("demo request", &form, &mailer).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Заявка на демо отправлена!",
    })))
}

#[tracing::instrument(name = "Relaying a legacy audit request", skip(form, mailer))]
pub async fn legacy_audit(
    form: web::Json<serde_json::Value>,
    mailer: web::Data<Mailer>,
) -> Result<HttpResponse, LegacyFormError> {
    relay_legacy_form("audit request", &form, &mailer).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Заявка на аудит отправлена!",
    })))
}

/// The old form serialized whatever inputs it had into a flat JSON
/// object. We only insist on some way to reach the visitor back.
async fn relay_legacy_form(
    form_label: &str,
    payload: &serde_json::Value,
    mailer: &Mailer,
) -> Result<(), LegacyFormError> {
    let fields = payload
        .as_object()
        .ok_or_else(|| LegacyFormError::Validation("Некорректный формат заявки.".to_string()))?;

    let has_contact = ["email", "phone"].iter().any(|key| {
        fields
            .get(*key)
            .and_then(|value| value.as_str())
            .map_or(false, |s| !s.trim().is_empty())
    });
    if !has_contact {
        return Err(LegacyFormError::Validation(
            "Укажите email или телефон.".to_string(),
        ));
    }

    let email = OutboundEmail::legacy_form(form_label, fields);
    mailer
        .dispatch(&email)
        .await
        .context("Failed to relay the legacy form to the staff mailbox")?;

    Ok(())
}
