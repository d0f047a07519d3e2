//! src/domain/audit_request.rs

use crate::domain::audio_upload::AudioUpload;
use crate::domain::comment::Comment;
use crate::domain::contact_email::ContactEmail;

#[derive(Debug)]
pub struct AuditRequest {
    pub email: ContactEmail,
    pub comment: Option<Comment>,
    pub audio: AudioUpload,
}
