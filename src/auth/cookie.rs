//! `admin_token` cookie construction

use super::middleware::SESSION_COOKIE;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

/// Http-only, same-site-lax session cookie living as long as the token
pub fn session_cookie(token: String, ttl_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(ttl_secs as i64))
        .build()
}

/// Expired cookie that makes the browser drop `admin_token`.
///
/// Only the client copy goes away; the token itself stays valid until it expires.
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}
