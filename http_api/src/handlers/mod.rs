//! Request handlers, grouped by resource.

pub mod auth;
pub mod catalog;
pub mod users;

use axum::http::HeaderMap;
use toyhaus::models::MiniUser;

use crate::cookies::{read_cookie, LOGIN_COOKIE};
use crate::state::AppState;

/// The user identified by the request's login token, if any
pub(crate) fn logged_in_user(state: &AppState, headers: &HeaderMap) -> Option<MiniUser> {
    state.logged_in_user(read_cookie(headers, LOGIN_COOKIE).as_deref())
}
