// src/api/cookies.rs
// Session and flash cookies

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const SESSION_COOKIE: &str = "session_id";
pub const FLASH_COOKIE: &str = "flash";

/// The session token presented by the client, if any
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|token| !token.is_empty())
}

pub fn with_session(jar: CookieJar, token: String, secure: bool) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure),
    )
}

pub fn without_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Queue a one-shot message for the next rendered page
pub fn with_flash(jar: CookieJar, message: &str) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, urlencoding::encode(message).into_owned()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Read and clear the pending flash message
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<String>) {
    let message = jar
        .get(FLASH_COOKIE)
        .and_then(|c| urlencoding::decode(c.value()).ok().map(|m| m.into_owned()))
        .filter(|m| !m.is_empty());

    match message {
        Some(message) => (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), Some(message)),
        None => (jar, None),
    }
}
