//! Session cookies.
//!
//! `vagas_token` carries the access JWT on every path. `vagas_refresh` is
//! only sent to `/api/v1/auth`, where refresh and logout live. Both are
//! `HttpOnly` and `SameSite=Lax`; `Secure` follows `COOKIE_SECURE`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const ACCESS_COOKIE: &str = "vagas_token";
pub const REFRESH_COOKIE: &str = "vagas_refresh";
pub const REFRESH_COOKIE_PATH: &str = "/api/v1/auth";

fn session_cookie(name: &'static str, value: String, path: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path(path)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Add both session cookies to `jar`.
pub fn set_session_cookies(
    jar: CookieJar,
    access_token: &str,
    refresh_token: &str,
    secure: bool,
) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, access_token.to_string(), "/", secure))
        .add(session_cookie(
            REFRESH_COOKIE,
            refresh_token.to_string(),
            REFRESH_COOKIE_PATH,
            secure,
        ))
}

fn removal_cookie(name: &'static str, path: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, ""))
        .path(path)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}

/// Expire both session cookies, whether or not the request carried them.
/// Paths must match the ones they were set with.
pub fn clear_session_cookies(jar: CookieJar) -> CookieJar {
    jar.add(removal_cookie(ACCESS_COOKIE, "/"))
        .add(removal_cookie(REFRESH_COOKIE, REFRESH_COOKIE_PATH))
}

pub fn access_token(jar: &CookieJar) -> Option<String> {
    jar.get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

pub fn refresh_token(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::header::{COOKIE, SET_COOKIE};
    use axum::http::{HeaderMap, HeaderValue};
    use axum::response::IntoResponse;

    use super::*;

    fn set_cookie_headers(jar: CookieJar) -> Vec<String> {
        let response = (jar, ()).into_response();
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn session_cookies_are_http_only_and_scoped() {
        let jar = set_session_cookies(CookieJar::new(), "jwt", "refresh", true);
        let headers = set_cookie_headers(jar);
        assert_eq!(headers.len(), 2);

        let access = headers.iter().find(|h| h.starts_with("vagas_token=jwt")).unwrap();
        assert!(access.contains("HttpOnly"));
        assert!(access.contains("SameSite=Lax"));
        assert!(access.contains("Path=/"));
        assert!(access.contains("Secure"));

        let refresh = headers.iter().find(|h| h.starts_with("vagas_refresh=refresh")).unwrap();
        assert!(refresh.contains("Path=/api/v1/auth"));
    }

    #[test]
    fn insecure_cookies_omit_secure_flag() {
        let headers = set_cookie_headers(set_session_cookies(CookieJar::new(), "a", "b", false));
        assert!(headers.iter().all(|h| !h.contains("Secure")));
    }

    #[test]
    fn reads_tokens_from_request_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("vagas_token=abc; vagas_refresh=def; other=1"),
        );
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(access_token(&jar).as_deref(), Some("abc"));
        assert_eq!(refresh_token(&jar).as_deref(), Some("def"));
    }

    #[test]
    fn clearing_expires_both_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("vagas_token=abc; vagas_refresh=def"));
        let jar = clear_session_cookies(CookieJar::from_headers(&headers));
        let set = set_cookie_headers(jar);
        assert_eq!(set.len(), 2);
        assert!(set.iter().any(|h| h.starts_with("vagas_token=;") && h.contains("Max-Age=0")));
        assert!(set
            .iter()
            .any(|h| h.starts_with("vagas_refresh=;") && h.contains("Path=/api/v1/auth")));
    }

    #[test]
    fn clearing_works_without_request_cookies() {
        let set = set_cookie_headers(clear_session_cookies(CookieJar::new()));
        assert_eq!(set.len(), 2);
    }
}
