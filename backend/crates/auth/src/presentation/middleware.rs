//! Access Middleware
//!
//! Authenticates the access token, resolves the caller's role and asks the
//! policy oracle whether `(role, resource, action)` is allowed. On success
//! the request carries an explicit [`Principal`] extension.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::principal::Principal;
use platform::policy::PolicyOracle;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::RoleRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::access_token_from;

/// Resource/action pair checked against the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission {
    pub resource: &'static str,
    pub action: &'static str,
}

/// Middleware state
///
/// Build one per protected route with [`AccessGate::require`] and mount it
/// with `axum::middleware::from_fn_with_state(gate, require_permission::<R>)`.
pub struct AccessGate<R>
where
    R: RoleRepository + Send + Sync + 'static,
{
    roles: Arc<R>,
    tokens: Arc<TokenService>,
    policy: Arc<dyn PolicyOracle>,
    config: Arc<AuthConfig>,
    permission: Option<Permission>,
}

impl<R> Clone for AccessGate<R>
where
    R: RoleRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            roles: self.roles.clone(),
            tokens: self.tokens.clone(),
            policy: self.policy.clone(),
            config: self.config.clone(),
            permission: self.permission,
        }
    }
}

impl<R> AccessGate<R>
where
    R: RoleRepository + Send + Sync + 'static,
{
    pub fn new(
        roles: Arc<R>,
        tokens: Arc<TokenService>,
        policy: Arc<dyn PolicyOracle>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            roles,
            tokens,
            policy,
            config,
            permission: None,
        }
    }

    /// Copy of this gate that enforces `allow(role, resource, action)`
    pub fn require(&self, resource: &'static str, action: &'static str) -> Self {
        Self {
            permission: Some(Permission { resource, action }),
            ..self.clone()
        }
    }

    /// Verify the token and resolve the caller
    async fn authenticate(&self, token: Option<String>) -> AuthResult<Principal> {
        let token = token.ok_or(AuthError::Unauthorized)?;
        let claims = self
            .tokens
            .verify_access_token(&token)
            .map_err(|_| AuthError::Unauthorized)?;
        let role = self
            .roles
            .find_role(&claims.role_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        Ok(Principal::new(claims.user_id, claims.role_id, role.name))
    }
}

/// Middleware that requires a valid access token and, when the gate carries a
/// [`Permission`], a policy grant
pub async fn require_permission<R>(
    State(gate): State<AccessGate<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: RoleRepository + Send + Sync + 'static,
{
    // The request body is not Sync; take what is needed before awaiting
    let token = access_token_from(req.headers(), &gate.config);
    let principal = gate.authenticate(token).await?;

    if let Some(Permission { resource, action }) = gate.permission {
        if !gate.policy.allow(&principal.role, resource, action) {
            tracing::warn!(
                user_id = %principal.user_id,
                role = %principal.role,
                resource,
                action,
                "Permission denied"
            );
            return Err(AuthError::Forbidden);
        }
    }

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
