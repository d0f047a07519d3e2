use secrecy::Secret;
use serde_aux::prelude::deserialize_number_from_string;

use crate::domain::contact_email::ContactEmail;

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other,
            )),
        }
    }
}

/// Which outbound transport the relay uses. `Api` posts to the provider's
/// HTTP endpoint; `Smtp` hands the message to an SMTP relay.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    Api,
    Smtp,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApiTransportSettings {
    pub base_url: String,
    pub authorization_token: Secret<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct SmtpTransportSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct MailerSettings {
    pub provider: MailProvider,
    pub sender_email: String,
    pub staff_email: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub send_timeout_ms: u64,
    pub api: ApiTransportSettings,
    pub smtp: SmtpTransportSettings,
}

impl MailerSettings {
    pub fn sender(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.sender_email.clone())
    }

    /// The staff mailbox every submission is relayed to.
    pub fn staff(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.staff_email.clone())
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Directory the landing page assets are served from.
    pub static_dir: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct Configuration {
    pub app: AppConfig,
    pub mailer: MailerSettings,
}

pub fn get_configuration() -> Result<Configuration, config::ConfigError> {
    // initialize our configuration reader
    let mut settings = config::Config::default();

    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Read in default configuration. `config` accepts any top-level file
    // named `base` with an extension it knows how to parse: yaml, json, etc.
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");

    // Layer the environment specific file on top.
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    // Finally `APP__`-prefixed environment variables, e.g.
    // `APP__MAILER__SMTP__PASSWORD` overrides `mailer.smtp.password`.
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    // try converting settings into a `Configuration` object.
    return settings.try_into();
}
