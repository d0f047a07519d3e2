use unicode_segmentation::UnicodeSegmentation;

/// Company field of the demo form. Same shape of constraints as
/// `ContactName`; kept as its own type so the two cannot be swapped.
#[derive(Debug)]
pub struct CompanyName(String);

impl CompanyName {
    pub fn parse(s: String) -> Result<CompanyName, String> {
        let is_empty_or_whitespace = s.trim().is_empty();
        let is_too_long = s.graphemes(true).count() > 256;

        let forbidden_characters = ['/', '(', ')', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = s.chars().any(|g| forbidden_characters.contains(&g));

        if is_empty_or_whitespace || is_too_long || contains_forbidden_characters {
            return Err(format!("{} is not a valid company name.", s));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for CompanyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
