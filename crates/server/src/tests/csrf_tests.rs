use super::*;

const TOKEN: &str = "0123456789abcdef0123456789abcdef";

fn with_cookie(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(cookie).expect("cookie"));
    headers
}

#[test]
fn issues_fresh_token_without_cookie() {
    let token = CsrfToken::issue(&HeaderMap::new());
    assert!(token.is_fresh());
    assert!(is_well_formed(token.value()));

    let cookie = token.set_cookie();
    let cookie = cookie.to_str().expect("ascii");
    assert!(cookie.starts_with(&format!("{COOKIE_NAME}={}", token.value())));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
}

#[test]
fn reuses_existing_cookie_among_others() {
    let headers = with_cookie(&format!("theme=dark; {COOKIE_NAME}={TOKEN}; lang=es"));
    let token = CsrfToken::issue(&headers);
    assert!(!token.is_fresh());
    assert_eq!(token.value(), TOKEN);
}

#[test]
fn malformed_cookie_is_replaced() {
    let headers = with_cookie(&format!("{COOKIE_NAME}=<script>"));
    let token = CsrfToken::issue(&headers);
    assert!(token.is_fresh());
    assert_ne!(token.value(), "<script>");
}

#[test]
fn verify_accepts_matching_field() {
    let headers = with_cookie(&format!("{COOKIE_NAME}={TOKEN}"));
    let token = CsrfToken::verify(&headers, TOKEN).expect("valid");
    assert_eq!(token.value(), TOKEN);
    assert!(!token.is_fresh());
}

#[test]
fn verify_rejects_mismatch_or_missing_cookie() {
    let headers = with_cookie(&format!("{COOKIE_NAME}={TOKEN}"));
    assert!(CsrfToken::verify(&headers, "ffffffffffffffffffffffffffffffff").is_none());
    assert!(CsrfToken::verify(&headers, "").is_none());
    assert!(CsrfToken::verify(&HeaderMap::new(), TOKEN).is_none());
}

#[test]
fn constant_time_eq_compares_lengths() {
    assert!(constant_time_eq(b"abc", b"abc"));
    assert!(!constant_time_eq(b"abc", b"abd"));
    assert!(!constant_time_eq(b"abc", b"abcd"));
}
