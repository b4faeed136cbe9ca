use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::session::SessionId;

pub const SESSION_COOKIE: &str = "mapping_session";

/// The caller's session, taken from the cookie or freshly issued.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub id: SessionId,
    fresh: bool,
}

impl SessionCookie {
    #[cfg(test)]
    fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Adds `Set-Cookie` to the response when the session was just issued.
    pub fn attach(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.fresh {
            let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = find_session(parts) {
            return Ok(Self { id, fresh: false });
        }

        let id = SessionId::generate();
        debug!("issuing session {}", id);
        Ok(Self { id, fresh: true })
    }
}

fn find_session(parts: &Parts) -> Option<SessionId> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value.trim()))
}
