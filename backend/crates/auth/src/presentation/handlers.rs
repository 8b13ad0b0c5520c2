//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use chrono::Utc;
use kernel::extract::ValidJson;
use platform::cookie::{extract_bearer, extract_cookie};
use platform::password::CredentialHasher;
use platform::policy::PolicyOracle;

use crate::application::config::AuthConfig;
use crate::application::token::{IssuedToken, TokenService};
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterInput, RegisterUseCase,
    WhoAmIUseCase,
};
use crate::domain::repository::AuthStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, RegisterRequest, UserResponse};
use crate::presentation::middleware::AccessGate;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
    pub hasher: Arc<dyn CredentialHasher>,
}

impl<R> Clone for AuthAppState<R>
where
    R: AuthStore,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

impl<R> AuthAppState<R>
where
    R: AuthStore,
{
    pub fn new(repo: R, config: AuthConfig, hasher: Arc<dyn CredentialHasher>) -> Self {
        let tokens = Arc::new(TokenService::new(&config));
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens,
            hasher,
        }
    }

    /// Authorization gate sharing this state's store and token service
    pub fn access_gate(&self, policy: Arc<dyn PolicyOracle>) -> AccessGate<R> {
        AccessGate::new(
            self.repo.clone(),
            self.tokens.clone(),
            policy,
            self.config.clone(),
        )
    }
}

/// Access token from the `access_token` cookie, else `Authorization: Bearer`
pub fn access_token_from(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    extract_cookie(headers, &config.access_cookie_name).or_else(|| extract_bearer(headers))
}

fn credential_cookies(
    config: &AuthConfig,
    access: &IssuedToken,
    refresh: &IssuedToken,
) -> AppendHeaders<[(header::HeaderName, String); 2]> {
    let now = Utc::now();
    AppendHeaders([
        (
            header::SET_COOKIE,
            config
                .access_cookie()
                .build_set_cookie(&access.token, Some(access.max_age_secs(now))),
        ),
        (
            header::SET_COOKIE,
            config
                .refresh_cookie()
                .build_set_cookie(&refresh.token, Some(refresh.max_age_secs(now))),
        ),
    ])
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.hasher.clone(),
        state.config.clone(),
    );

    let user = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        credential_cookies(&state.config, &output.access, &output.refresh),
        Json(UserResponse::from(output.user)),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let presented = extract_cookie(&headers, &state.config.refresh_cookie_name)
        .ok_or(AuthError::InvalidToken)?;

    let use_case = RefreshUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
    );
    let pair = use_case.execute(&presented).await?;

    Ok((
        StatusCode::NO_CONTENT,
        credential_cookies(&state.config, &pair.access, &pair.refresh),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /auth/logout
///
/// Always 204 and always clears both cookies.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> impl IntoResponse
where
    R: AuthStore,
{
    let token = access_token_from(&headers, &state.config);

    let use_case = LogoutUseCase::new(state.repo.clone(), state.tokens.clone());
    use_case.execute(token.as_deref()).await;

    (
        StatusCode::NO_CONTENT,
        AppendHeaders([
            (
                header::SET_COOKIE,
                state.config.access_cookie().build_delete_cookie(),
            ),
            (
                header::SET_COOKIE,
                state.config.refresh_cookie().build_delete_cookie(),
            ),
        ]),
    )
}

// ============================================================================
// Who am I
// ============================================================================

/// GET /auth/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserResponse>>
where
    R: AuthStore,
{
    let token = access_token_from(&headers, &state.config);

    let use_case = WhoAmIUseCase::new(state.repo.clone(), state.repo.clone(), state.tokens.clone());
    let user = use_case.execute(token.as_deref()).await?;

    Ok(Json(UserResponse::from(user)))
}
