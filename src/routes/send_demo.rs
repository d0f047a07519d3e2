use actix_web::{web, HttpResponse};
use anyhow::Context;

use crate::domain::company_name::CompanyName;
use crate::domain::contact_email::ContactEmail;
use crate::domain::contact_name::ContactName;
use crate::domain::demo_request::DemoRequest;
use crate::domain::phone_number::PhoneNumber;
use crate::mail::message::OutboundEmail;
use crate::mail::Mailer;
use crate::routes::RelayError;

#[derive(serde::Deserialize)]
pub struct DemoForm {
    name: String,
    company: String,
    email: String,
    phone: String,
}

impl TryFrom<DemoForm> for DemoRequest {
    type Error = RelayError;

    fn try_from(form: DemoForm) -> Result<Self, Self::Error> {
        let name = ContactName::parse(form.name)
            .map_err(|e| RelayError::validation("invalid_name", e))?;
        let company = CompanyName::parse(form.company)
            .map_err(|e| RelayError::validation("invalid_company", e))?;
        let email = ContactEmail::parse(form.email)
            .map_err(|e| RelayError::validation("invalid_email", e))?;
        let phone = PhoneNumber::parse(form.phone)
            .map_err(|e| RelayError::validation("invalid_phone", e))?;

        Ok(Self {
            name,
            company,
            email,
            phone,
        })
    }
}

#[tracing::instrument(
    name = "Relaying a demo request",
    skip(form, mailer),
    fields(
        contact_email = %form.email,
        contact_name = %form.name,
    )
)]
pub async fn send_demo(
    form: web::Json<DemoForm>,
    mailer: web::Data<Mailer>,
) -> Result<HttpResponse, RelayError> {
    let request: DemoRequest = form.into_inner().try_into()?;

    let email = OutboundEmail::demo_request(&request);
    mailer
        .dispatch(&email)
        .await
        .context("Failed to relay the demo request to the staff mailbox")?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}
