use once_cell::sync::Lazy;
use regex::Regex;

/// Practical subset of RFC 5322: dot-atom local part, dotted hostname with a TLD.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("valid email regex")
});

const MAX_EMAIL_LEN: usize = 254;

/// Collects field errors so one response can report all of them.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl AsRef<str>) {
        self.0.push(format!("{field}: {}", message.as_ref()));
    }

    /// `Err` with every message joined when anything was recorded.
    pub fn into_result(self) -> Result<(), String> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0.join("; "))
        }
    }
}

/// Checks `value` holds 1..=max characters and is not only whitespace.
/// The value is kept as sent.
pub fn bounded_text(errors: &mut FieldErrors, field: &str, value: &str, max: usize) -> String {
    if value.trim().is_empty() {
        errors.push(field, "must not be empty");
    } else if value.chars().count() > max {
        errors.push(field, format!("must be at most {max} characters"));
    }
    value.to_string()
}

/// Checks address syntax and lowercases the domain part.
pub fn email(errors: &mut FieldErrors, field: &str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(trimmed) {
        errors.push(field, "is not a valid email address");
        return trimmed.to_string();
    }

    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_ascii_lowercase()),
        None => trimmed.to_string(),
    }
}
