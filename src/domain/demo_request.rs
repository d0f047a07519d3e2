//! src/domain/demo_request.rs

use crate::domain::company_name::CompanyName;
use crate::domain::contact_email::ContactEmail;
use crate::domain::contact_name::ContactName;
use crate::domain::phone_number::PhoneNumber;

#[derive(Debug)]
pub struct DemoRequest {
    pub name: ContactName,
    pub company: CompanyName,
    pub email: ContactEmail,
    pub phone: PhoneNumber,
}
