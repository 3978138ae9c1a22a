use std::sync::Arc;

use auth::Authenticator;
use auth::TokenError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::AuthenticatedPrincipal;
use crate::domain::user::models::Authority;
use crate::domain::user::ports::AuthenticationServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const BEARER_PREFIX: &str = "Bearer ";

/// Result of inspecting one request's credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Authenticated(AuthenticatedPrincipal),
    Anonymous(AnonymousReason),
}

/// Why a request stays unauthenticated. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnonymousReason {
    MissingHeader,
    NotBearer,
    InvalidToken(TokenError),
    UnknownSubject,
    LookupFailed,
}

/// Binds an [`AuthenticatedPrincipal`] to requests carrying a valid bearer token.
///
/// The gate never rejects a request. Requests without usable credentials pass
/// through anonymous and authorization is left to the route.
pub struct AuthenticationGate {
    authenticator: Arc<Authenticator>,
    auth_service: Arc<dyn AuthenticationServicePort>,
}

impl AuthenticationGate {
    pub fn new(
        authenticator: Arc<Authenticator>,
        auth_service: Arc<dyn AuthenticationServicePort>,
    ) -> Self {
        Self {
            authenticator,
            auth_service,
        }
    }

    /// Inspect an `Authorization` header value.
    ///
    /// # Arguments
    /// * `header` - Raw header value, if present
    /// * `now` - Instant the token's expiry is checked against
    pub async fn evaluate(&self, header: Option<&HeaderValue>, now: DateTime<Utc>) -> GateOutcome {
        let Some(header) = header else {
            return GateOutcome::Anonymous(AnonymousReason::MissingHeader);
        };

        let Some(token) = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        else {
            return GateOutcome::Anonymous(AnonymousReason::NotBearer);
        };

        let claims = match self.authenticator.validate_token(token, now) {
            Ok(claims) => claims,
            Err(e) => return GateOutcome::Anonymous(AnonymousReason::InvalidToken(e)),
        };

        match self.auth_service.load_principal(claims.subject()).await {
            Ok(principal) => GateOutcome::Authenticated(principal),
            Err(UserError::NotFoundByUsername(_)) => {
                GateOutcome::Anonymous(AnonymousReason::UnknownSubject)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Principal lookup failed");
                GateOutcome::Anonymous(AnonymousReason::LookupFailed)
            }
        }
    }

    /// Run the gate on a request, binding a principal only if none is bound yet.
    ///
    /// # Returns
    /// `true` when this call bound a principal
    pub async fn apply<B>(&self, request: &mut axum::http::Request<B>, now: DateTime<Utc>) -> bool {
        if request
            .extensions()
            .get::<AuthenticatedPrincipal>()
            .is_some()
        {
            return false;
        }

        let header = request.headers().get(AUTHORIZATION).cloned();

        match self.evaluate(header.as_ref(), now).await {
            GateOutcome::Authenticated(principal) => {
                tracing::debug!(username = %principal.username, "Request authenticated");
                request.extensions_mut().insert(principal);
                true
            }
            GateOutcome::Anonymous(reason) => {
                tracing::debug!(reason = ?reason, "Request continues unauthenticated");
                false
            }
        }
    }
}

/// Middleware running the [`AuthenticationGate`] on every request.
///
/// Always hands the request on to `next`.
pub async fn authenticate_request(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    state.gate.apply(&mut req, Utc::now()).await;
    next.run(req).await
}

/// Extractor for routes open to any authenticated principal.
#[derive(Debug, Clone)]
pub struct RequireAuthenticated(pub AuthenticatedPrincipal);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuthenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .map(RequireAuthenticated)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Extractor for routes that need `ROLE_ADMIN`.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedPrincipal);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuthenticated(principal) =
            RequireAuthenticated::from_request_parts(parts, state).await?;

        if !principal.has_authority(Authority::RoleAdmin) {
            tracing::warn!(username = %principal.username, "Admin route denied");
            return Err(ApiError::Forbidden("Access denied".to_string()));
        }

        Ok(RequireAdmin(principal))
    }
}
