//! src/domain/phone_number.rs

#[derive(Debug)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Accepts the number as the visitor typed it. Separators (spaces,
    /// parentheses, dashes, dots) are ignored for validation; what remains
    /// must be an optional `+` followed by 7 to 15 digits.
    pub fn parse(s: String) -> Result<PhoneNumber, String> {
        let compact: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '(' | ')' | '-' | '.'))
            .collect();
        let digits = compact.strip_prefix('+').unwrap_or(&compact);

        let all_digits = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
        let length_ok = (7..=15).contains(&digits.len());

        if !all_digits || !length_ok {
            return Err(format!("{} is not a valid phone number.", s));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
