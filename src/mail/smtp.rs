//! src/mail/smtp.rs

use anyhow::Context;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::config::SmtpTransportSettings;
use crate::domain::contact_email::ContactEmail;
use crate::mail::message::OutboundEmail;

/// SMTP relay transport built on `lettre`.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: ContactEmail,
    recipient: ContactEmail,
}

impl SmtpMailer {
    pub fn new(
        settings: &SmtpTransportSettings,
        sender: ContactEmail,
        recipient: ContactEmail,
    ) -> Result<Self, anyhow::Error> {
        let transport = build_transport(settings)?;
        Ok(Self {
            transport,
            sender,
            recipient,
        })
    }

    pub async fn send(&self, email: &OutboundEmail) -> Result<(), anyhow::Error> {
        let message = build_message(self.sender.as_ref(), self.recipient.as_ref(), email)?;

        self.transport
            .send(message)
            .await
            .context("SMTP transport refused the message")?;

        Ok(())
    }
}

fn build_transport(
    settings: &SmtpTransportSettings,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, anyhow::Error> {
    // a local catcher (mailhog and friends) speaks plain SMTP
    let builder = if settings.host == "localhost" || settings.host == "127.0.0.1" {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .context("failed to set up the STARTTLS relay")?
    };

    let mut builder = builder.port(settings.port);
    if !settings.username.is_empty() {
        builder = builder.credentials(Credentials::new(
            settings.username.clone(),
            settings.password.expose_secret().clone(),
        ));
    }

    Ok(builder.build())
}

fn build_message(
    sender: &str,
    recipient: &str,
    email: &OutboundEmail,
) -> Result<Message, anyhow::Error> {
    let from: Mailbox = sender.parse().context("invalid sender address")?;
    let to: Mailbox = recipient.parse().context("invalid staff mailbox address")?;

    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone());

    let alternative =
        MultiPart::alternative_plain_html(email.text_body.clone(), email.html_body.clone());

    let message = match &email.attachment {
        Some(attachment) => {
            let content_type = ContentType::parse(&attachment.content_type)
                .context("attachment carries an invalid content type")?;
            let part =
                Attachment::new(attachment.filename.clone()).body(attachment.content.clone(), content_type);
            builder.multipart(MultiPart::mixed().multipart(alternative).singlepart(part))
        }
        None => builder.multipart(alternative),
    }
    .context("failed to assemble the mime message")?;

    Ok(message)
}
