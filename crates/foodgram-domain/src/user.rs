//! Account field rules.

/// Maximum length of username, first name and last name.
pub const MAX_NAME_LEN: usize = 150;

/// Maximum length of an email address.
pub const MAX_EMAIL_LEN: usize = 254;

/// Username reserved for the `/users/me/` route.
pub const RESERVED_USERNAME: &str = "me";

/// Validate a username: word characters plus `.@+-`, 1-150 chars, not "me".
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.chars().count() > MAX_NAME_LEN {
        return false;
    }
    if username == RESERVED_USERNAME {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'))
}

/// Lower-case and trim an email address. Returns `None` if it is not plausibly an address.
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return None;
    }
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(email)
}
