use std::sync::LazyLock;

use regex::Regex;

/// `local@domain.tld`, where each part is one or more characters that are
/// neither whitespace nor `@`.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// ASCII digits, `' '`, `-`, `+`, `(` and `)`. Tabs, newlines and other
/// Unicode whitespace are not allowed.
static PHONE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9 \-+()]+$").expect("phone pattern is a valid regex"));

const MIN_PHONE_DIGITS: usize = 10;

/// Minimal `local@domain.tld` shape check. This is not RFC 5322 validation.
///
/// ```
/// use quote_core::validation::is_valid_email;
///
/// assert!(is_valid_email("a@b.co"));
/// assert!(!is_valid_email("a@b"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Accepts a phone number made only of digits, spaces, `-`, `+`, `(` and
/// `)`, containing at least ten digits.
///
/// ```
/// use quote_core::validation::is_valid_phone;
///
/// assert!(is_valid_phone("0821234567"));
/// assert!(is_valid_phone("+27 82 123 4567"));
/// assert!(!is_valid_phone("12345"));
/// ```
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    digits >= MIN_PHONE_DIGITS && PHONE_CHARS.is_match(phone)
}
