//! Identity stage for authenticated routes.
//!
//! [`RequireIdentity`] wraps a resource and runs bearer parsing, token
//! verification and local-user reconciliation before the handler is
//! dispatched. The reconciled [`LocalUser`] is stored in the request
//! extensions and handed to handlers through the [`AuthenticatedUser`]
//! extractor, so handlers receive the caller as an explicit argument.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{BearerToken, Error, LocalUser};
use crate::inbound::http::state::HttpState;

/// Caller identity resolved by [`RequireIdentity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub LocalUser);

impl AuthenticatedUser {
    pub fn into_inner(self) -> LocalUser {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| Error::unauthorized("Missing Authorization Bearer token")),
        )
    }
}

/// Verify `token` and reconcile the asserted identity with local storage.
pub async fn authenticate(state: &HttpState, token: &BearerToken) -> Result<LocalUser, Error> {
    let claim = state
        .identity_verifier
        .verify(token)
        .await
        .map_err(Error::from)?;
    debug!(subject_id = %claim.subject_id, "bearer token verified");
    state.identity.reconcile(claim).await
}

async fn identify(req: &ServiceRequest) -> Result<LocalUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = BearerToken::from_authorization_header(header)
        .map_err(|err| Error::unauthorized(err.to_string()))?;
    authenticate(&state, &token).await
}

/// Middleware factory rejecting requests without a valid bearer token.
///
/// Requires `web::Data<HttpState>` to be registered on the app.
///
/// # Examples
/// ```
/// use actix_web::{web, HttpResponse};
/// use marquee::inbound::http::auth::RequireIdentity;
///
/// let _resource = web::resource("/api/profile")
///     .route(web::get().to(HttpResponse::Ok))
///     .wrap(RequireIdentity);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireIdentity;

impl<S, B> Transform<S, ServiceRequest> for RequireIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireIdentityMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`RequireIdentity`].
pub struct RequireIdentityMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            match identify(&req).await {
                Ok(user) => {
                    req.extensions_mut().insert(AuthenticatedUser(user));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => Ok(req
                    .into_response(error.error_response())
                    .map_into_right_body()),
            }
        })
    }
}
