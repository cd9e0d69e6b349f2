//! HttpOnly cookie construction and parsing for browser clients.
//!
//! Three cookies travel alongside the JSON token response: the access
//! token (sent on every request), the refresh token (scoped to the
//! refresh path so it is not replayed elsewhere), and the opaque session
//! id. All are HttpOnly and SameSite=Lax.

use axum::http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};

use adboard_core::config::auth::AuthConfig;
use adboard_core::error::AppError;
use adboard_core::result::AppResult;
use adboard_entity::TokenPair;

/// Build a Set-Cookie value.
pub fn build_cookie(name: &str, value: &str, path: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; Path={path}; Max-Age={max_age}; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build a Set-Cookie value that expires the cookie immediately.
pub fn expire_cookie(name: &str, path: &str, secure: bool) -> String {
    build_cookie(name, "", path, 0, secure)
}

/// Set-Cookie values carrying a token pair. Used alone on refresh,
/// where the session cookie from login keeps its original lifetime.
pub fn rotate_cookies(config: &AuthConfig, tokens: &TokenPair) -> Vec<String> {
    let cookies = &config.cookies;
    vec![
        build_cookie(
            &cookies.access_name,
            &tokens.access.token,
            "/",
            config.access_ttl_seconds,
            cookies.secure,
        ),
        build_cookie(
            &cookies.refresh_name,
            &tokens.refresh.token,
            &cookies.refresh_path,
            config.refresh_ttl_seconds,
            cookies.secure,
        ),
    ]
}

/// Set-Cookie values for a freshly issued token pair plus its session id.
pub fn issue_cookies(config: &AuthConfig, tokens: &TokenPair, session_id: &str) -> Vec<String> {
    let mut values = rotate_cookies(config, tokens);
    values.push(build_cookie(
        &config.cookies.session_name,
        session_id,
        "/",
        config.session_ttl_seconds,
        config.cookies.secure,
    ));
    values
}

/// Set-Cookie values clearing every auth cookie.
pub fn clear_cookies(config: &AuthConfig) -> Vec<String> {
    let cookies = &config.cookies;
    vec![
        expire_cookie(&cookies.access_name, "/", cookies.secure),
        expire_cookie(&cookies.refresh_name, &cookies.refresh_path, cookies.secure),
        expire_cookie(&cookies.session_name, "/", cookies.secure),
    ]
}

/// Collect Set-Cookie values into response headers.
pub fn set_cookie_headers(values: &[String]) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for value in values {
        let header = HeaderValue::from_str(value)
            .map_err(|e| AppError::internal(format!("Invalid cookie header: {e}")))?;
        headers.append(SET_COOKIE, header);
    }
    Ok(headers)
}

/// Read a cookie value from the request `Cookie` header(s).
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let raw = header.to_str().ok()?;
        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == name && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}
