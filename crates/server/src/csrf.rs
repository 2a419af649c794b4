use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

pub const COOKIE_NAME: &str = "pokedex_csrf";
pub const FIELD_NAME: &str = "csrf_token";

/// Double-submit anti-forgery token shared by the cookie and hidden form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    value: String,
    fresh: bool,
}

impl CsrfToken {
    /// Reuses the browser's token when it has a well-formed one.
    pub fn issue(headers: &HeaderMap) -> Self {
        match cookie_token(headers) {
            Some(value) => Self {
                value,
                fresh: false,
            },
            None => Self {
                value: Uuid::new_v4().simple().to_string(),
                fresh: true,
            },
        }
    }

    /// The cookie token, when it matches what the form posted.
    pub fn verify(headers: &HeaderMap, submitted: &str) -> Option<Self> {
        let value = cookie_token(headers)?;
        constant_time_eq(value.as_bytes(), submitted.trim().as_bytes()).then_some(Self {
            value,
            fresh: false,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the browser still needs the `Set-Cookie` for this token.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn set_cookie(&self) -> HeaderValue {
        let cookie = format!(
            "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Strict",
            self.value
        );
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| is_well_formed(value))
}

fn is_well_formed(value: &str) -> bool {
    value.len() == 32 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
#[path = "tests/csrf_tests.rs"]
mod tests;
