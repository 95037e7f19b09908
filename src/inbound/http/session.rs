//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or retrieving the operator
//! profile.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, OperatorProfile};

pub(crate) const OPERATOR_KEY: &str = "operator";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated operator in the session cookie.
    pub fn persist_operator(&self, profile: &OperatorProfile) -> Result<(), Error> {
        self.0
            .insert(OPERATOR_KEY, profile)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current operator from the session, if present.
    pub fn operator(&self) -> Result<Option<OperatorProfile>, Error> {
        self.0
            .get::<OperatorProfile>(OPERATOR_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Require an authenticated operator or return `401 Unauthorized`.
    pub fn require_operator(&self) -> Result<OperatorProfile, Error> {
        self.operator()?
            .ok_or_else(|| Error::unauthorized("Not authenticated"))
    }

    /// Destroy the session, invalidating the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
