pub mod api;
pub mod message;
pub mod smtp;

use anyhow::Context;

use crate::config::{MailProvider, MailerSettings};
use crate::mail::api::ApiMailer;
use crate::mail::message::OutboundEmail;
use crate::mail::smtp::SmtpMailer;

/// The configured outbound transport. Selected once at startup; handlers
/// only ever see [`Mailer::dispatch`].
pub enum Mailer {
    Api(ApiMailer),
    Smtp(SmtpMailer),
}

impl Mailer {
    pub fn from_settings(settings: &MailerSettings) -> Result<Self, anyhow::Error> {
        let sender = settings
            .sender()
            .map_err(anyhow::Error::msg)
            .context("invalid sender email address")?;
        let staff = settings
            .staff()
            .map_err(anyhow::Error::msg)
            .context("invalid staff email address")?;

        match settings.provider {
            MailProvider::Api => Ok(Self::Api(ApiMailer::new(
                settings.api.clone(),
                sender,
                staff,
                settings.send_timeout_ms,
            ))),
            MailProvider::Smtp => Ok(Self::Smtp(SmtpMailer::new(&settings.smtp, sender, staff)?)),
        }
    }

    #[tracing::instrument(
        name = "Relaying message to the staff mailbox",
        skip(self, email),
        fields(subject = %email.subject)
    )]
    pub async fn dispatch(&self, email: &OutboundEmail) -> Result<(), anyhow::Error> {
        match self {
            Mailer::Api(mailer) => mailer.send(email).await.context("mail API call failed"),
            Mailer::Smtp(mailer) => mailer.send(email).await,
        }
    }
}
