//! Field normalisation shared by the use-case services.

use std::sync::OnceLock;

use regex::Regex;

use super::Error;

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 255;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Trim a title and check it is non-empty and within [`TITLE_MAX`].
pub fn normalise_title(raw: &str) -> Result<String, Error> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(Error::invalid_input("title must not be empty"));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(Error::invalid_input(format!(
            "title must be at most {TITLE_MAX} characters"
        )));
    }
    Ok(title.to_owned())
}

/// Trim a required free-text field.
pub fn require_text(field: &str, raw: &str) -> Result<String, Error> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(Error::invalid_input(format!("{field} must not be empty")));
    }
    Ok(value.to_owned())
}

/// Trim an optional field, folding blank values to `None`.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Trim and validate an email address.
pub fn normalise_email(raw: &str) -> Result<String, Error> {
    let email = require_text("email", raw)?;
    if !email_regex().is_match(&email) {
        return Err(Error::invalid_input("email must look like local@domain.tld"));
    }
    Ok(email)
}

/// Key under which sibling titles are compared.
///
/// Comparison ignores surrounding whitespace and letter case for every
/// entity type; storage indexes use the same `lower(title)` rule.
pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("  Intro  ", "Intro")]
    #[case("About me", "About me")]
    fn titles_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalise_title(raw).expect("valid"), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_titles_are_invalid(#[case] raw: &str) {
        let err = normalise_title(raw).expect_err("blank");
        assert_eq!(err.code(), ErrorCode::InvalidInput);
    }

    #[rstest]
    fn overlong_titles_are_invalid() {
        let raw = "é".repeat(TITLE_MAX + 1);
        assert!(normalise_title(&raw).is_err());
        assert!(normalise_title(&"é".repeat(TITLE_MAX)).is_ok());
    }

    #[rstest]
    #[case("ada@example.com", true)]
    #[case(" ada@example.com ", true)]
    #[case("ada@example", false)]
    #[case("ada example.com", false)]
    #[case("", false)]
    fn email_shapes(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(normalise_email(raw).is_ok(), valid);
    }

    #[rstest]
    fn title_keys_fold_case_and_whitespace() {
        assert_eq!(title_key(" Intro "), title_key("INTRO"));
    }

    #[rstest]
    fn optional_text_folds_blank_to_none() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" acme ")), Some("acme".to_owned()));
        assert_eq!(optional_text(None), None);
    }
}
