use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("Invalid email regex")
});

pub const MIN_PASSWORD_LEN: usize = 5;
pub const BCRYPT_COST: u32 = 10;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN && !password.trim().is_empty()
}

pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).context("Failed to hash password")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("testEmail@gmail.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("NotARealEmailgmail.com"));
        assert!(!is_valid_email("no@tld"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn password_policy() {
        assert!(is_valid_password("WhatIsMyPassword"));
        assert!(is_valid_password("12345"));
        assert!(!is_valid_password("fake"));
        assert!(!is_valid_password("     "));
    }

    #[test]
    fn hash_round_trip() {
        let hash = hash_password("WhatIsMyPassword", 4).unwrap();
        assert_ne!(hash, "WhatIsMyPassword");
        assert!(bcrypt::verify("WhatIsMyPassword", &hash).unwrap());
        assert!(!bcrypt::verify("wrong", &hash).unwrap());
    }
}
