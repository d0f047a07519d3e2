//! src/domain/contact_name.rs

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug)]
pub struct ContactName(String);

impl ContactName {
    pub fn parse(s: String) -> Result<ContactName, String> {
        // check if string is actually empty
        let is_empty_or_whitespace = s.trim().is_empty();

        // does string surpass our expected count size?
        let is_too_long = s.graphemes(true).count() > 256;

        // does this contain forbidden characters?
        let forbidden_characters = ['/', '(', ')', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = s.chars().any(|g| forbidden_characters.contains(&g));

        if is_empty_or_whitespace || is_too_long || contains_forbidden_characters {
            return Err(format!("{} is not a valid contact name.", s));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
