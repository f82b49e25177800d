use std::collections::BTreeMap;

use crate::model::submission::ContactSubmission;

/// Per-field validation failure. The `Display` impl carries the message
/// shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

/// Field names used as keys in a [`FieldErrorMap`].
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const MESSAGE: &str = "message";
}

/// Map from field name to error message. Recomputed wholesale on each
/// validation pass; an absent key means the field is currently valid.
pub type FieldErrorMap = BTreeMap<&'static str, String>;

/// Phone validation rules for one form variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneRules {
    pub required: bool,
    /// When set, the value must contain exactly this many digits after
    /// stripping formatting. When unset, a loose international shape
    /// applies instead.
    pub digit_count: Option<usize>,
}

/// Which fields a form variant requires. The divergence between variants
/// (phone required for booking inquiries, optional for general contact)
/// is intentional per-form configuration, not an inconsistency to unify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRules {
    pub require_name: bool,
    pub require_message: bool,
    pub phone: PhoneRules,
}

impl FormRules {
    /// Booking inquiry form: phone is required and must be a 10-digit
    /// US-style number.
    pub fn booking() -> Self {
        FormRules {
            require_name: true,
            require_message: true,
            phone: PhoneRules { required: true, digit_count: Some(10) },
        }
    }

    /// General contact form: phone is optional and only loosely shaped.
    pub fn general() -> Self {
        FormRules {
            require_name: true,
            require_message: true,
            phone: PhoneRules { required: false, digit_count: None },
        }
    }

    /// Newsletter signup: email only.
    pub fn newsletter() -> Self {
        FormRules {
            require_name: false,
            require_message: false,
            phone: PhoneRules { required: false, digit_count: None },
        }
    }
}

pub fn validate_required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

/// Simple `local@domain.tld` shape check. Deliberately not RFC 5322.
pub fn validate_email(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(FieldError::InvalidEmail);
    }
    let (local, domain) = value.split_once('@').ok_or(FieldError::InvalidEmail)?;
    let (host, tld) = domain.rsplit_once('.').ok_or(FieldError::InvalidEmail)?;
    if local.is_empty() || host.is_empty() || tld.is_empty() {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_phone(value: &str, rules: &PhoneRules) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return if rules.required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }

    match rules.digit_count {
        Some(count) => {
            let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
            if digits == count {
                Ok(())
            } else {
                Err(FieldError::InvalidPhone)
            }
        }
        None => {
            if loose_phone_shape(value) {
                Ok(())
            } else {
                Err(FieldError::InvalidPhone)
            }
        }
    }
}

/// Loose international shape: digits plus common formatting characters,
/// 7 to 15 digits overall.
fn loose_phone_shape(value: &str) -> bool {
    let formatting_ok = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | '-' | '.' | ' '));
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    formatting_ok && (7..=15).contains(&digits)
}

/// Keystroke-level sanitizer for digit-counted phone fields: keeps digits
/// only and truncates, so the validator never sees punctuation.
pub fn sanitize_phone_input(raw: &str, max_digits: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(max_digits)
        .collect()
}

/// Run every applicable validator over the submission. The returned map is
/// rebuilt from scratch each call, so corrected fields never leave stale
/// entries behind. An empty map means the form is submittable.
pub fn validate_form(submission: &ContactSubmission, rules: &FormRules) -> FieldErrorMap {
    let mut errors = FieldErrorMap::new();

    if rules.require_name {
        if let Err(e) = validate_required(&submission.name) {
            errors.insert(fields::NAME, e.to_string());
        }
    }

    if let Err(e) = validate_required(&submission.email).and_then(|_| validate_email(&submission.email)) {
        errors.insert(fields::EMAIL, e.to_string());
    }

    if let Err(e) = validate_phone(&submission.phone, &rules.phone) {
        errors.insert(fields::PHONE, e.to_string());
    }

    if rules.require_message {
        if let Err(e) = validate_required(&submission.message) {
            errors.insert(fields::MESSAGE, e.to_string());
        }
    }

    // `dates` is derived from the date-range control and always optional.

    errors
}
