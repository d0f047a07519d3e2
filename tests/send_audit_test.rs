use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{audio_part, spawn_app};

pub mod helpers;

fn valid_audit_form(audio_bytes: Vec<u8>) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("email", "ops@example.com")
        .text("comment", "the second call is the interesting one")
        .part("audio", audio_part("call.mp3", "audio/mpeg", audio_bytes))
}

#[tokio::test]
async fn audit_submission_returns_200_and_attaches_the_recording() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let audio_bytes = vec![7u8; 2048];
    let response = app.post_audit(valid_audit_form(audio_bytes.clone())).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "ok": true }));

    let emails = app.relayed_emails().await;
    assert_eq!(1, emails.len());

    let email = &emails[0];
    let text_body = email["TextBody"].as_str().unwrap();
    assert!(text_body.contains("ops@example.com"));
    assert!(text_body.contains("the second call is the interesting one"));

    let attachment = &email["Attachments"][0];
    assert_eq!(attachment["Name"], "call.mp3");
    assert_eq!(attachment["ContentType"], "audio/mpeg");
    assert_eq!(attachment["Content"], base64::encode(&audio_bytes));
}

#[tokio::test]
async fn a_wav_recording_is_accepted() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let form = reqwest::multipart::Form::new()
        .text("email", "ops@example.com")
        .part("audio", audio_part("call.wav", "audio/wav", vec![1u8; 64]));
    let response = app.post_audit(form).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn the_comment_is_optional() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let form = reqwest::multipart::Form::new()
        .text("email", "ops@example.com")
        .text("comment", "")
        .part("audio", audio_part("call.mp3", "audio/mpeg", vec![1u8; 64]));
    let response = app.post_audit(form).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn audit_submission_without_an_email_is_rejected() {
    let app = spawn_app().await;

    let form = reqwest::multipart::Form::new()
        .part("audio", audio_part("call.mp3", "audio/mpeg", vec![1u8; 64]));
    let response = app.post_audit(form).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "missing_field");
}

#[tokio::test]
async fn audit_submission_without_a_recording_is_rejected() {
    let app = spawn_app().await;

    let form = reqwest::multipart::Form::new().text("email", "ops@example.com");
    let response = app.post_audit(form).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "missing_field");
}

#[tokio::test]
async fn a_malformed_email_is_rejected() {
    let app = spawn_app().await;

    let form = reqwest::multipart::Form::new()
        .text("email", "not-an-address")
        .part("audio", audio_part("call.mp3", "audio/mpeg", vec![1u8; 64]));
    let response = app.post_audit(form).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "invalid_email");
}

#[tokio::test]
async fn a_text_file_is_rejected() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let form = reqwest::multipart::Form::new()
        .text("email", "ops@example.com")
        .part("audio", audio_part("notes.txt", "text/plain", vec![1u8; 64]));
    let response = app.post_audit(form).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "invalid_audio");
}

#[tokio::test]
async fn an_empty_recording_is_rejected() {
    let app = spawn_app().await;

    let form = reqwest::multipart::Form::new()
        .text("email", "ops@example.com")
        .part("audio", audio_part("call.mp3", "audio/mpeg", vec![]));
    let response = app.post_audit(form).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "invalid_audio");
}
