//! Session cookie construction
//!
//! Both tokens travel as hardened cookies: unreadable from scripts,
//! HTTPS-only, and never sent cross-site.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use volta_service::IssuedSession;

/// Cookie carrying the signed access token
pub const ACCESS_COOKIE: &str = "token";

/// Cookie carrying the opaque refresh secret
pub const REFRESH_COOKIE: &str = "refresh_token";

fn hardened(name: &str, value: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((name.to_string(), value.to_string()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Build the access token cookie
#[must_use]
pub fn access_cookie(token: &str, max_age_secs: i64) -> Cookie<'static> {
    hardened(ACCESS_COOKIE, token, max_age_secs)
}

/// Build the refresh secret cookie
#[must_use]
pub fn refresh_cookie(secret: &str, max_age_secs: i64) -> Cookie<'static> {
    hardened(REFRESH_COOKIE, secret, max_age_secs)
}

/// Build a cookie that clears the access token
#[must_use]
pub fn clear_access_cookie() -> Cookie<'static> {
    hardened(ACCESS_COOKIE, "", 0)
}

/// Build a cookie that clears the refresh secret
#[must_use]
pub fn clear_refresh_cookie() -> Cookie<'static> {
    hardened(REFRESH_COOKIE, "", 0)
}

/// Add both session cookies to the jar
#[must_use]
pub fn session_cookies(jar: CookieJar, session: &IssuedSession) -> CookieJar {
    jar.add(access_cookie(
        &session.access_token,
        session.access_token_ttl,
    ))
    .add(refresh_cookie(
        &session.refresh_secret,
        session.refresh_token_ttl,
    ))
}
