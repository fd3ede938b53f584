//! Authentication handlers
//!
//! Signup, login, refresh, logout and session introspection. The
//! handlers own the cookie exchange; token issuance itself lives in
//! the service layer.

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use volta_service::{
    dto::{
        CurrentUserResponse, LoginRequest, LogoutResponse, SignupRequest, SignupResponse,
        SuccessResponse,
    },
    AuthService,
};

use crate::{
    cookies,
    extractors::{ClientInfo, Session, ValidatedJson},
    response::{ApiError, ApiResult, Created},
    state::AppState,
};

/// Create a new account
///
/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ClientInfo(fingerprint): ClientInfo,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<(CookieJar, Json<SignupResponse>)>> {
    let service = AuthService::new(state.service_context());
    let session = service.signup(request, fingerprint).await?;

    // The body carries the access token once; afterwards the client
    // relies on the cookies alone
    let token = session.access_token.clone();
    let jar = cookies::session_cookies(jar, &session);

    Ok(Created((jar, Json(SignupResponse { token }))))
}

/// Authenticate with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientInfo(fingerprint): ClientInfo,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<SuccessResponse>)> {
    let service = AuthService::new(state.service_context());
    let session = service.login(request, fingerprint).await?;

    let jar = cookies::session_cookies(jar, &session);

    Ok((jar, Json(SuccessResponse::new())))
}

/// Exchange the refresh cookie for a fresh session
///
/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ClientInfo(fingerprint): ClientInfo,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<SuccessResponse>)> {
    let secret = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ApiError::MissingAuth)?;

    let service = AuthService::new(state.service_context());
    let session = service.refresh(&secret, &fingerprint).await?;

    let jar = cookies::session_cookies(jar, &session);

    Ok((jar, Json(SuccessResponse::new())))
}

/// End the session and revoke its refresh token
///
/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<LogoutResponse>)> {
    // No authentication required; logging out twice is fine
    let secret = jar
        .get(cookies::REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string());

    let service = AuthService::new(state.service_context());
    service.logout(secret.as_deref()).await?;

    let jar = jar
        .add(cookies::clear_access_cookie())
        .add(cookies::clear_refresh_cookie());

    Ok((jar, Json(LogoutResponse::new())))
}

/// Get the authenticated user's profile
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = AuthService::new(state.service_context());
    let user = service.current_user(session.user_id).await?;

    Ok(Json(CurrentUserResponse::from(user)))
}
