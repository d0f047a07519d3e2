use once_cell::sync::Lazy;
use wiremock::MockServer;

use callsense_site::config::{get_configuration, Configuration, MailProvider};
use callsense_site::startup::AppServer;
use callsense_site::telemetry::{get_subscriber, init_subscriber};

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(
            "test".into(),
            "debug".into(),
            std::io::stdout,
        ));
    } else {
        init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::sink));
    }
});

pub struct TestApp {
    pub config: Configuration,
    pub email_server: MockServer,
    pub addr: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_demo(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/send-demo", self.addr))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// For payloads that are not even valid JSON.
    pub async fn post_demo_raw(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/send-demo", self.addr))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_audit(&self, form: reqwest::multipart::Form) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/send-audit", self.addr))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_legacy(&self, route: &str, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", self.addr, route))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// The bodies the mail provider mock received, parsed as JSON.
    pub async fn relayed_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

pub fn audio_part(filename: &str, content_type: &str, bytes: Vec<u8>) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str(content_type)
        .unwrap()
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let mut configuration = get_configuration().expect("should load configuration");
    // random OS-assigned port, and the wiremock server instead of the
    // real provider
    configuration.app.port = 0;
    configuration.mailer.provider = MailProvider::Api;
    configuration.mailer.api.base_url = email_server.uri();

    let server = AppServer::build(configuration.clone())
        .await
        .expect("Failed to build the application");
    let port = server.port();
    let addr = format!("http://{}:{}", server.address(), port);
    let _ = tokio::spawn(server.run_until_stopped());

    TestApp {
        config: configuration,
        email_server,
        addr,
        port,
        api_client: reqwest::Client::new(),
    }
}
