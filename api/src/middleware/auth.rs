//! Authentication gate middleware for protecting API endpoints.
//!
//! The gate extracts a bearer token from the Authorization header, verifies
//! it, requires the access kind, loads the user it names, and injects the
//! resolved context into the request. Two modes share that procedure and
//! differ only in failure behavior: the required gate answers 401, the
//! optional gate lets the request continue anonymously.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use clavis_core::domain::entities::token::{Claims, TokenKind};
use clavis_core::domain::entities::user::User;
use clavis_core::errors::DomainError;
use clavis_core::repositories::UserRepository;
use clavis_core::services::token::TokenService;

/// Authentication context injected into requests.
///
/// Carries the resolved user, the raw bearer token, and the verified claims.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The authenticated user, freshly loaded from the store
    pub user: User,
    /// The raw bearer token as presented by the client
    pub token: String,
    /// The verified token claims
    pub claims: Claims,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Required,
    Optional,
}

/// Authentication gate middleware factory.
///
/// Both the token service and the user repository are injected; the gate
/// holds no process-wide state of its own.
pub struct AuthGate<U> {
    token_service: Arc<TokenService>,
    user_repository: Arc<U>,
    mode: AuthMode,
}

impl<U> AuthGate<U> {
    /// Gate that rejects unauthenticated requests with 401
    pub fn required(token_service: Arc<TokenService>, user_repository: Arc<U>) -> Self {
        Self {
            token_service,
            user_repository,
            mode: AuthMode::Required,
        }
    }

    /// Gate that lets unauthenticated requests continue without a context
    pub fn optional(token_service: Arc<TokenService>, user_repository: Arc<U>) -> Self {
        Self {
            token_service,
            user_repository,
            mode: AuthMode::Optional,
        }
    }
}

impl<S, B, U> Transform<S, ServiceRequest> for AuthGate<U>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    U: UserRepository + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S, U>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
            user_repository: Arc::clone(&self.user_repository),
            mode: self.mode,
        }))
    }
}

/// Authentication gate middleware service
pub struct AuthGateMiddleware<S, U> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
    user_repository: Arc<U>,
    mode: AuthMode,
}

impl<S, B, U> Service<ServiceRequest> for AuthGateMiddleware<S, U>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    U: UserRepository + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);
        let user_repository = Arc::clone(&self.user_repository);
        let mode = self.mode;

        Box::pin(async move {
            match authenticate(&req, &token_service, user_repository.as_ref()).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                }
                Err(failure) => {
                    if let GateFailure::Storage(ref error) = failure {
                        log::error!("authentication gate storage failure: {:?}", error);
                    }
                    if mode == AuthMode::Required {
                        return Err(ErrorUnauthorized(failure.message()));
                    }
                    // Optional mode: the request continues anonymously
                }
            }

            service.call(req).await
        })
    }
}

enum GateFailure {
    MissingToken,
    InvalidToken,
    WrongKind,
    UnknownUser,
    Storage(DomainError),
}

impl GateFailure {
    fn message(&self) -> &'static str {
        match self {
            GateFailure::MissingToken => "Missing or invalid Authorization header",
            GateFailure::InvalidToken => "Token verification failed",
            GateFailure::WrongKind => "Token verification failed",
            GateFailure::UnknownUser => "Token verification failed",
            GateFailure::Storage(_) => "Authentication unavailable",
        }
    }
}

/// The core gate procedure shared by both modes
async fn authenticate<U: UserRepository>(
    req: &ServiceRequest,
    token_service: &TokenService,
    user_repository: &U,
) -> Result<AuthContext, GateFailure> {
    let token = extract_bearer_token(req).ok_or(GateFailure::MissingToken)?;

    let claims = token_service
        .verify(&token)
        .map_err(|_| GateFailure::InvalidToken)?;

    // A refresh token never grants request authorization
    if claims.token_type != TokenKind::Access {
        return Err(GateFailure::WrongKind);
    }

    let user_id = claims.user_id().map_err(|_| GateFailure::InvalidToken)?;
    let user = user_repository
        .find_by_id(user_id)
        .await
        .map_err(GateFailure::Storage)?
        .ok_or(GateFailure::UnknownUser)?;

    Ok(AuthContext {
        user,
        token,
        claims,
    })
}

/// Extracts the bearer token from the Authorization header.
///
/// Requires the exact `Bearer <token>` shape with a single token segment.
/// Surplus whitespace between scheme and token is collapsed; a header that
/// is only `Bearer` counts as absent.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = header.split_whitespace();

    if parts.next()? != "Bearer" {
        return None;
    }
    let token = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    Some(token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
