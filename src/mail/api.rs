//! src/mail/api.rs

use reqwest::Client;
use secrecy::ExposeSecret;

use crate::config::ApiTransportSettings;
use crate::domain::contact_email::ContactEmail;
use crate::mail::message::OutboundEmail;

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<Vec<AttachmentPayload<'a>>>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttachmentPayload<'a> {
    name: &'a str,
    /// base64 of the raw file, per the provider's attachment schema.
    content: String,
    content_type: &'a str,
}

/// HTTP client for the provider's send-email endpoint.
pub struct ApiMailer {
    http_client: Client,
    sender: ContactEmail,
    recipient: ContactEmail,
    settings: ApiTransportSettings,
}

impl ApiMailer {
    pub fn new(
        settings: ApiTransportSettings,
        sender: ContactEmail,
        recipient: ContactEmail,
        send_timeout_ms: u64,
    ) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(std::time::Duration::from_millis(send_timeout_ms))
                .build()
                .unwrap(),
            sender,
            recipient,
            settings,
        }
    }

    pub async fn send(&self, email: &OutboundEmail) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.settings.base_url);

        let attachments = email.attachment.as_ref().map(|attachment| {
            vec![AttachmentPayload {
                name: &attachment.filename,
                content: base64::encode(&attachment.content),
                content_type: &attachment.content_type,
            }]
        });

        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: self.recipient.as_ref(),
            subject: &email.subject,
            html_body: &email.html_body,
            text_body: &email.text_body,
            attachments,
        };

        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.settings.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
