//! Field validation for agent drafts and passwords.
//!
//! Errors accumulate per field so a caller can surface all of them inline
//! at once instead of stopping at the first.

use crate::directory::model::AgentDraft;
use crate::error::ApiError;

/// Minimum accepted password length for site and admin passwords.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Accumulated validation outcome for one record.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<(String, String)>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push((field.to_string(), message.into()));
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collapse into a single error suitable for the command surface.
    pub fn into_api_result(self) -> Result<(), ApiError> {
        if self.is_valid() {
            return Ok(());
        }
        let joined = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ApiError::Validation(joined))
    }
}

/// Validate a creation/edit draft. Only set fields are checked; absent
/// optionals are always acceptable.
pub fn validate_draft(draft: &AgentDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    if draft.name.trim().is_empty() {
        result.add_error("name", "must not be empty");
    }
    if let Some(email) = &draft.email {
        if let Err(msg) = check_email(email) {
            result.add_error("email", msg);
        }
    }
    if let Some(phone) = &draft.phone_number {
        if let Err(msg) = check_phone(phone) {
            result.add_error("phoneNumber", msg);
        }
    }
    if let Some(url) = &draft.website_url {
        if let Err(msg) = check_website_url(url) {
            result.add_error("websiteUrl", msg);
        }
    }
    if let Some(rating) = draft.rating {
        if !(0.0..=5.0).contains(&rating) {
            result.add_error("rating", "must be between 0 and 5");
        }
    }

    result
}

/// Validate a candidate password for either secret.
pub fn validate_password(candidate: &str) -> Result<(), ApiError> {
    if candidate.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password: must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), &'static str> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next();
    match domain {
        Some(domain) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') => {
            Ok(())
        }
        _ => Err("is not a valid email address"),
    }
}

fn check_phone(phone: &str) -> Result<(), &'static str> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || "+-()".contains(c));
    if !allowed {
        return Err("contains invalid characters");
    }
    if digits < 7 {
        return Err("must contain at least 7 digits");
    }
    Ok(())
}

fn check_website_url(url: &str) -> Result<(), &'static str> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err("must start with http:// or https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_draft() -> AgentDraft {
        AgentDraft {
            name: "Agent".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn name_only_draft_is_valid() {
        assert!(validate_draft(&named_draft()).is_valid());
    }

    #[test]
    fn empty_name_is_rejected() {
        let draft = AgentDraft {
            name: "   ".to_string(),
            ..Default::default()
        };
        let result = validate_draft(&draft);
        assert!(!result.is_valid());
        assert_eq!(result.errors[0].0, "name");
    }

    #[test]
    fn malformed_email_is_rejected() {
        for bad in ["plainaddress", "@example.com", "user@", "user@nodot"] {
            let mut draft = named_draft();
            draft.email = Some(bad.to_string());
            assert!(!validate_draft(&draft).is_valid(), "accepted {}", bad);
        }
    }

    #[test]
    fn valid_email_passes() {
        let mut draft = named_draft();
        draft.email = Some("user@example.com".to_string());
        assert!(validate_draft(&draft).is_valid());
    }

    #[test]
    fn phone_requires_seven_digits() {
        let mut draft = named_draft();
        draft.phone_number = Some("+1 (555) 123".to_string());
        assert!(!validate_draft(&draft).is_valid());
        draft.phone_number = Some("+1 (555) 123-4567".to_string());
        assert!(validate_draft(&draft).is_valid());
    }

    #[test]
    fn phone_rejects_letters() {
        let mut draft = named_draft();
        draft.phone_number = Some("555-CALL-NOW".to_string());
        assert!(!validate_draft(&draft).is_valid());
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        let mut draft = named_draft();
        draft.rating = Some(5.5);
        assert!(!validate_draft(&draft).is_valid());
        draft.rating = Some(4.5);
        assert!(validate_draft(&draft).is_valid());
    }

    #[test]
    fn website_must_be_http() {
        let mut draft = named_draft();
        draft.website_url = Some("ftp://example.com".to_string());
        assert!(!validate_draft(&draft).is_valid());
        draft.website_url = Some("https://example.com".to_string());
        assert!(validate_draft(&draft).is_valid());
    }

    #[test]
    fn errors_accumulate_across_fields() {
        let draft = AgentDraft {
            name: String::new(),
            email: Some("bad".to_string()),
            rating: Some(9.0),
            ..Default::default()
        };
        let result = validate_draft(&draft);
        assert_eq!(result.errors.len(), 3);
        assert!(result.into_api_result().is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(validate_password("abc").is_err());
        assert!(validate_password("oxo2024").is_ok());
    }
}
