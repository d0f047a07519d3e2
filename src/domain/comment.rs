use unicode_segmentation::UnicodeSegmentation;

/// Free-text note the visitor can attach to a call-audit request.
#[derive(Debug)]
pub struct Comment(String);

impl Comment {
    pub fn parse(s: String) -> Result<Comment, String> {
        if s.trim().is_empty() {
            return Err("comment must not be empty".to_string());
        }

        if s.graphemes(true).count() > 2000 {
            return Err("comment is longer than 2000 characters".to_string());
        }

        // newlines and tabs are fine in a free-text field, other control
        // characters are not.
        let has_forbidden_control = s
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'));
        if has_forbidden_control {
            return Err("comment contains control characters".to_string());
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for Comment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
