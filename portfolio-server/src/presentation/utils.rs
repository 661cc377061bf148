use actix_web::dev::Payload;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::admin::AdminIdentity;
use crate::domain::error::DomainError;
use crate::presentation::middleware::RequestId;

/// Handlers take an `AdminIdentity` argument to require the auth gate. The
/// value is put in place by `JwtAuthMiddleware`; without it the request is
/// rejected before the handler body runs.
impl FromRequest for AdminIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AdminIdentity>() {
            Some(admin) => ready(Ok(admin.clone())),
            None => ready(Err(DomainError::Unauthorized.into())),
        }
    }
}

pub fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
