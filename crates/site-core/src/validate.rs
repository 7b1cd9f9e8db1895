//! Reservation form field checks.

/// Whitespace as the browser's `\s` sees it: `char::is_whitespace` plus the
/// byte order mark, minus NEL.
pub fn is_js_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn validate_email(email: &str) -> bool {
    let plain = |c: char| !is_js_space(c) && c != '@';
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(plain) || !domain.chars().all(plain) {
        return false;
    }
    // Some dot must have text on both sides.
    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

/// Eight or more characters drawn from digits, spaces and `-+()`.
pub fn validate_phone(phone: &str) -> bool {
    phone.chars().count() >= 8
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || is_js_space(c) || "-+()".contains(c))
}
