use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use anyhow::Context;
use futures_util::TryStreamExt;

use crate::domain::audio_upload::{AudioUpload, MAX_AUDIO_BYTES};
use crate::domain::audit_request::AuditRequest;
use crate::domain::comment::Comment;
use crate::domain::contact_email::ContactEmail;
use crate::mail::message::OutboundEmail;
use crate::mail::Mailer;
use crate::routes::RelayError;

/// Text parts of the form are tiny; anything beyond this is not a
/// legitimate email or comment.
const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

struct RawUpload {
    filename: String,
    content_type: Option<mime::Mime>,
    bytes: Vec<u8>,
}

/// Multipart fields as received, before domain validation.
struct AuditForm {
    email: Option<String>,
    comment: Option<String>,
    audio: Option<RawUpload>,
}

impl TryFrom<AuditForm> for AuditRequest {
    type Error = RelayError;

    fn try_from(form: AuditForm) -> Result<Self, Self::Error> {
        let email = form
            .email
            .ok_or_else(|| RelayError::validation("missing_field", "the email field is required"))?;
        let email =
            ContactEmail::parse(email).map_err(|e| RelayError::validation("invalid_email", e))?;

        // an empty comment input is submitted as an empty string; treat it
        // as absent rather than invalid
        let comment = match form.comment {
            Some(text) if !text.trim().is_empty() => Some(
                Comment::parse(text).map_err(|e| RelayError::validation("invalid_comment", e))?,
            ),
            _ => None,
        };

        let upload = form.audio.ok_or_else(|| {
            RelayError::validation("missing_field", "the audio recording is required")
        })?;
        let audio = AudioUpload::new(upload.filename, upload.content_type, upload.bytes)
            .map_err(|e| RelayError::validation("invalid_audio", e))?;

        Ok(Self {
            email,
            comment,
            audio,
        })
    }
}

#[tracing::instrument(name = "Relaying a call audit request", skip(payload, mailer))]
pub async fn send_audit(
    payload: Multipart,
    mailer: web::Data<Mailer>,
) -> Result<HttpResponse, RelayError> {
    let form = collect_form(payload).await?;
    let request: AuditRequest = form.try_into()?;

    tracing::info!(
        contact_email = %request.email,
        recording = %request.audio.filename(),
        recording_bytes = request.audio.size_bytes(),
        "audit form accepted",
    );

    let email = OutboundEmail::audit_request(request);
    mailer
        .dispatch(&email)
        .await
        .context("Failed to relay the audit request to the staff mailbox")?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}

async fn collect_form(mut payload: Multipart) -> Result<AuditForm, RelayError> {
    let mut form = AuditForm {
        email: None,
        comment: None,
        audio: None,
    };

    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        let name = field.name().to_string();
        match name.as_str() {
            "email" => form.email = Some(read_text(&mut field).await?),
            "comment" => form.comment = Some(read_text(&mut field).await?),
            "audio" => {
                let filename = field
                    .content_disposition()
                    .get_filename()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                let content_type = field.content_type().cloned();
                let bytes = read_audio(&mut field).await?;
                form.audio = Some(RawUpload {
                    filename,
                    content_type,
                    bytes,
                });
            }
            // the page posts bookkeeping fields (formType and friends);
            // drain them so the stream can advance
            _ => while field.try_next().await.map_err(bad_multipart)?.is_some() {},
        }
    }

    Ok(form)
}

/// Reads the audio part, bailing out as soon as the stream goes past the
/// attachment cap instead of buffering the rest of an oversized upload.
async fn read_audio(field: &mut Field) -> Result<Vec<u8>, RelayError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
        if bytes.len() + chunk.len() > MAX_AUDIO_BYTES {
            return Err(RelayError::validation(
                "audio_too_large",
                format!(
                    "the recording exceeds the {}MB limit",
                    MAX_AUDIO_BYTES / (1024 * 1024),
                ),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_text(field: &mut Field) -> Result<String, RelayError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
        if bytes.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(RelayError::validation(
                "payload",
                format!("the {} field is unreasonably large", field.name()),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes)
        .map_err(|_| RelayError::validation("payload", "text fields must be valid UTF-8"))
}

fn bad_multipart(e: actix_multipart::MultipartError) -> RelayError {
    RelayError::validation("payload", format!("malformed multipart body: {}", e))
}
