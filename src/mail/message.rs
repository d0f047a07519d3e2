//! src/mail/message.rs

use chrono::Utc;

use crate::domain::audit_request::AuditRequest;
use crate::domain::demo_request::DemoRequest;

/// A file carried along with an outbound message.
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Transport-agnostic outbound message. Both the API and the SMTP
/// transports consume this.
pub struct OutboundEmail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    pub attachment: Option<EmailAttachment>,
}

impl OutboundEmail {
    pub fn demo_request(request: &DemoRequest) -> OutboundEmail {
        let received_at = timestamp();

        let text_body = format!(
            "New demo request received {}.\n\n\
            Name: {}\n\
            Company: {}\n\
            Email: {}\n\
            Phone: {}\n",
            received_at,
            request.name.as_ref(),
            request.company.as_ref(),
            request.email.as_ref(),
            request.phone.as_ref(),
        );

        let html_body = format!(
            "<p>New demo request received {}.</p>\
            <ul>\
            <li><b>Name:</b> {}</li>\
            <li><b>Company:</b> {}</li>\
            <li><b>Email:</b> {}</li>\
            <li><b>Phone:</b> {}</li>\
            </ul>",
            received_at,
            escape(request.name.as_ref()),
            escape(request.company.as_ref()),
            escape(request.email.as_ref()),
            escape(request.phone.as_ref()),
        );

        OutboundEmail {
            subject: format!("Demo request from {}", request.name.as_ref()),
            text_body,
            html_body,
            attachment: None,
        }
    }

    /// Consumes the request so the recording bytes move into the
    /// attachment instead of being copied.
    pub fn audit_request(request: AuditRequest) -> OutboundEmail {
        let received_at = timestamp();
        let comment = request
            .comment
            .as_ref()
            .map(|c| c.as_ref().to_string())
            .unwrap_or_else(|| "(none)".to_string());
        let size_mb = request.audio.size_bytes() as f64 / (1024.0 * 1024.0);

        let text_body = format!(
            "New call audit request received {}.\n\n\
            Email: {}\n\
            Comment: {}\n\
            Recording: {} ({:.2} MB, attached)\n",
            received_at,
            request.email.as_ref(),
            comment,
            request.audio.filename(),
            size_mb,
        );

        let html_body = format!(
            "<p>New call audit request received {}.</p>\
            <ul>\
            <li><b>Email:</b> {}</li>\
            <li><b>Comment:</b> {}</li>\
            <li><b>Recording:</b> {} ({:.2} MB, attached)</li>\
            </ul>",
            received_at,
            escape(request.email.as_ref()),
            escape(&comment),
            escape(request.audio.filename()),
            size_mb,
        );

        let subject = format!("Call audit request from {}", request.email.as_ref());
        let content_type = request.audio.content_type().to_string();
        let filename = request.audio.filename().to_string();

        OutboundEmail {
            subject,
            text_body,
            html_body,
            attachment: Some(EmailAttachment {
                filename,
                content_type,
                content: request.audio.into_bytes(),
            }),
        }
    }

    /// Plain-text dump used by the legacy form endpoints, which accepted
    /// whatever fields the old page posted.
    pub fn legacy_form(
        form_label: &str,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> OutboundEmail {
        let mut lines = String::new();
        for (key, value) in fields {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            lines.push_str(&format!("{}: {}\n", key, rendered));
        }

        let text_body = format!(
            "New {} submission received {}.\n\n{}",
            form_label,
            timestamp(),
            lines,
        );
        let html_body = format!("<pre>{}</pre>", escape(&text_body));

        OutboundEmail {
            subject: format!("Website form: {}", form_label),
            text_body,
            html_body,
            attachment: None,
        }
    }
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// User-supplied values go through here before being interpolated into
/// the HTML body.
fn escape(s: &str) -> String {
    htmlescape::encode_minimal(s)
}

#[cfg(test)]
mod tests {
    use crate::domain::audio_upload::AudioUpload;
    use crate::domain::audit_request::AuditRequest;
    use crate::domain::comment::Comment;
    use crate::domain::company_name::CompanyName;
    use crate::domain::contact_email::ContactEmail;
    use crate::domain::contact_name::ContactName;
    use crate::domain::demo_request::DemoRequest;
    use crate::domain::phone_number::PhoneNumber;

    use super::OutboundEmail;

    fn demo_request() -> DemoRequest {
        DemoRequest {
            name: ContactName::parse("Ursula Le Guin".to_string()).unwrap(),
            company: CompanyName::parse("Left Hand Publishing".to_string()).unwrap(),
            email: ContactEmail::parse("ursula@example.com".to_string()).unwrap(),
            phone: PhoneNumber::parse("+1 555 867 5309".to_string()).unwrap(),
        }
    }

    fn audit_request(comment: Option<&str>) -> AuditRequest {
        AuditRequest {
            email: ContactEmail::parse("ops@example.com".to_string()).unwrap(),
            comment: comment.map(|c| Comment::parse(c.to_string()).unwrap()),
            audio: AudioUpload::new(
                "call.mp3".to_string(),
                Some("audio/mpeg".parse().unwrap()),
                vec![1u8, 2, 3, 4],
            )
            .unwrap(),
        }
    }

    #[test]
    fn demo_body_carries_every_submitted_field() {
        let email = OutboundEmail::demo_request(&demo_request());

        for expected in [
            "Ursula Le Guin",
            "Left Hand Publishing",
            "ursula@example.com",
            "+1 555 867 5309",
        ] {
            assert!(email.text_body.contains(expected));
            assert!(email.html_body.contains(expected));
        }
        assert!(email.attachment.is_none());
        assert_eq!(email.subject, "Demo request from Ursula Le Guin");
    }

    #[test]
    fn demo_html_body_escapes_markup_in_field_values() {
        let mut request = demo_request();
        request.name = ContactName::parse("Bobby & Tables".to_string()).unwrap();

        let email = OutboundEmail::demo_request(&request);

        assert!(email.html_body.contains("Bobby &amp; Tables"));
        assert!(email.text_body.contains("Bobby & Tables"));
    }

    #[test]
    fn audit_message_attaches_the_recording() {
        let email = OutboundEmail::audit_request(audit_request(Some("second call matters")));

        let attachment = email.attachment.expect("expected an attachment");
        assert_eq!(attachment.filename, "call.mp3");
        assert_eq!(attachment.content_type, "audio/mpeg");
        assert_eq!(attachment.content, vec![1u8, 2, 3, 4]);
        assert!(email.text_body.contains("second call matters"));
        assert_eq!(email.subject, "Call audit request from ops@example.com");
    }

    #[test]
    fn missing_audit_comment_is_rendered_as_none() {
        let email = OutboundEmail::audit_request(audit_request(None));
        assert!(email.text_body.contains("Comment: (none)"));
    }

    #[test]
    fn legacy_dump_lists_every_field() {
        let mut fields = serde_json::Map::new();
        fields.insert(
            "name".to_string(),
            serde_json::Value::String("Ursula".to_string()),
        );
        fields.insert(
            "phone".to_string(),
            serde_json::Value::String("+79123456789".to_string()),
        );

        let email = OutboundEmail::legacy_form("demo request", &fields);

        assert!(email.text_body.contains("name: Ursula"));
        assert!(email.text_body.contains("phone: +79123456789"));
        assert_eq!(email.subject, "Website form: demo request");
    }
}
