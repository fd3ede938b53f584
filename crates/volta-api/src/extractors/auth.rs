//! Authentication extractors
//!
//! Credential extraction and verification for protected endpoints.
//! [`Session`] accepts a signed access token from the Authorization
//! header or the session cookie. [`DeviceIdentity`] additionally
//! accepts an API key, for device clients that hold no session.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::{header, request::Parts},
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::convert::Infallible;
use tracing::warn;
use uuid::Uuid;
use volta_common::AppError;
use volta_core::ClientFingerprint;
use volta_service::{ApiKeyService, DeviceService};

use crate::{cookies::ACCESS_COOKIE, response::ApiError, state::AppState};

/// Header carrying a raw API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the client IP, set by the edge proxy
pub const CLIENT_IP_HEADER: &str = "cf-connecting-ip";

/// Fallback client IP header for deployments without the edge proxy
const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Authenticated session extracted from a verified access token
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        session_identity(parts, &app_state)
            .await?
            .ok_or(ApiError::MissingAuth)
    }
}

/// Client fingerprint material taken from request headers
///
/// Extraction never fails; absent headers become empty strings and
/// produce a fingerprint that simply matches other header-less clients.
#[derive(Debug, Clone)]
pub struct ClientInfo(pub ClientFingerprint);

#[async_trait]
impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = client_ip(parts);
        let user_agent = header_value(parts, header::USER_AGENT.as_str());

        Ok(Self(ClientFingerprint::new(ip, user_agent)))
    }
}

/// Resolved caller identity for device-scoped endpoints
///
/// Credentials are tried in order: session first, then API key. A
/// failed credential is remembered but does not stop the chain, so a
/// client holding an expired session cookie can still act through its
/// key. Only when every presented credential fails does the request
/// get rejected with the last failure.
#[derive(Debug, Clone, Copy)]
pub struct DeviceIdentity {
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for DeviceIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let mut last_failure = None;

        match session_identity(parts, &app_state).await {
            Ok(Some(session)) => {
                return Ok(Self {
                    user_id: session.user_id,
                })
            }
            Ok(None) => {}
            Err(e) => last_failure = Some(e),
        }

        match api_key_identity(parts, &app_state).await {
            Ok(Some(identity)) => return Ok(identity),
            Ok(None) => {}
            Err(e) => last_failure = Some(e),
        }

        Err(last_failure.unwrap_or(ApiError::MissingAuth))
    }
}

/// Resolve a session from the Authorization header or session cookie
///
/// Returns `Ok(None)` when no token was presented at all. A presented
/// but invalid token is an error, never silently ignored.
async fn session_identity(
    parts: &mut Parts,
    state: &AppState,
) -> Result<Option<Session>, ApiError> {
    let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, &())
        .await
        .ok()
        .map(|TypedHeader(auth)| auth.token().to_string());

    let token = match bearer {
        Some(token) => Some(token),
        None => CookieJar::from_headers(&parts.headers)
            .get(ACCESS_COOKIE)
            .map(|cookie| cookie.value().to_string()),
    };

    let Some(token) = token else {
        return Ok(None);
    };

    match state.jwt().verify(&token) {
        Ok(claims) => Ok(Some(Session {
            user_id: claims.user_id,
        })),
        Err(e) => {
            warn!(error = %e, "Rejected session token");
            Err(ApiError::App(e))
        }
    }
}

/// Resolve an identity from the API key header
///
/// Returns `Ok(None)` when the header is absent. A presented key must
/// both resolve to a user and own the device named in the URL; the two
/// records must agree before the request proceeds.
async fn api_key_identity(
    parts: &mut Parts,
    state: &AppState,
) -> Result<Option<DeviceIdentity>, ApiError> {
    let Some(raw_key) = parts
        .headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        return Ok(None);
    };

    let key = ApiKeyService::new(state.service_context())
        .authenticate(raw_key)
        .await?;

    let Path(uuid) = Path::<String>::from_request_parts(parts, &())
        .await
        .map_err(|_| ApiError::App(AppError::Forbidden))?;

    DeviceService::new(state.service_context())
        .verify_ownership(key.user_id, &uuid)
        .await?;

    Ok(Some(DeviceIdentity {
        user_id: key.user_id,
    }))
}

fn header_value(parts: &Parts, name: &str) -> String {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// The proxy sets `cf-connecting-ip`; `x-forwarded-for` covers deployments
/// behind other load balancers, taking the first hop in the list.
fn client_ip(parts: &Parts) -> String {
    let direct = header_value(parts, CLIENT_IP_HEADER);
    if !direct.is_empty() {
        return direct;
    }

    parts
        .headers
        .get(FORWARDED_FOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|hops| hops.split(',').next())
        .map(|hop| hop.trim().to_string())
        .unwrap_or_default()
}
