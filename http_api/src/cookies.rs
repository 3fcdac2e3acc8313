//! Cookie helpers
//!
//! Reads request cookies from the `Cookie` header and builds `Set-Cookie`
//! values for the login token and the visited-records lists.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use url::form_urlencoded;

use crate::error::HttpError;

pub const LOGIN_COOKIE: &str = "loginToken";

/// Prefix marking a JSON-encoded cookie value
const JSON_PREFIX: &str = "j:";

/// Raw value of the cookie `name`, if the request carries it
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
}

/// Ids stored in a visited-records cookie; an unreadable cookie counts as empty
pub fn visited_ids(headers: &HeaderMap, name: &str) -> Vec<String> {
    let Some(raw) = read_cookie(headers, name) else {
        return Vec::new();
    };

    let decoded: String = form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default();
    let json = decoded.strip_prefix(JSON_PREFIX).unwrap_or(&decoded);

    serde_json::from_str(json).unwrap_or_else(|e| {
        tracing::debug!("Ignoring unreadable {} cookie: {}", name, e);
        Vec::new()
    })
}

/// `Set-Cookie` value holding `ids` as a JSON array
pub fn visited_cookie(name: &str, ids: &[String], max_age_seconds: u64) -> Result<HeaderValue, HttpError> {
    let json = serde_json::to_string(ids).map_err(|e| HttpError::Internal(e.to_string()))?;
    let encoded: String =
        form_urlencoded::byte_serialize(format!("{JSON_PREFIX}{json}").as_bytes()).collect();
    header_value(format!("{name}={encoded}; Max-Age={max_age_seconds}; Path=/"))
}

/// `Set-Cookie` value carrying a login token
pub fn login_cookie(token: &str) -> Result<HeaderValue, HttpError> {
    header_value(format!("{LOGIN_COOKIE}={token}; Path=/; HttpOnly"))
}

/// `Set-Cookie` value removing the login token
pub fn clear_login_cookie() -> HeaderValue {
    HeaderValue::from_static("loginToken=; Max-Age=0; Path=/")
}

fn header_value(value: String) -> Result<HeaderValue, HttpError> {
    HeaderValue::from_str(&value).map_err(|e| HttpError::Internal(e.to_string()))
}
