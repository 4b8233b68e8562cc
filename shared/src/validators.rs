use once_cell::sync::Lazy;
use regex::Regex;

const EMAIL_MIN_LEN: usize = 3;
const EMAIL_MAX_LEN: usize = 254;

/// Check that `email` looks like a lowercase address (`local@domain.tld`).
pub fn is_email_valid(email: &str) -> bool {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("valid email regex")
    });

    (EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&email.len()) && RE.is_match(email)
}
