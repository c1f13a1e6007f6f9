//! Session cookie handling. A session is just a random token; the selected
//! client behind it lives in the record store.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

/// Token carried by the request, if any.
pub fn existing_session(jar: &CookieJar, cookie_name: &str) -> Option<String> {
    jar.get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Token carried by the request, or a fresh one added to the jar.
pub fn ensure_session(jar: CookieJar, cookie_name: &str) -> (CookieJar, String) {
    if let Some(token) = existing_session(&jar, cookie_name) {
        return (jar, token);
    }

    let token = Uuid::new_v4().to_string();
    tracing::debug!(session = %token, "New session");
    let cookie = Cookie::build((cookie_name.to_string(), token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_token_is_kept() {
        let jar = CookieJar::new().add(Cookie::new("sid", "abc"));
        let (jar, token) = ensure_session(jar, "sid");
        assert_eq!(token, "abc");
        assert_eq!(jar.iter().count(), 1);
    }

    #[test]
    fn test_missing_token_is_minted() {
        let (jar, token) = ensure_session(CookieJar::new(), "sid");
        assert!(Uuid::parse_str(&token).is_ok());
        assert_eq!(jar.get("sid").map(|c| c.value().to_string()), Some(token));
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let jar = CookieJar::new().add(Cookie::new("sid", ""));
        assert_eq!(existing_session(&jar, "sid"), None);
    }
}
