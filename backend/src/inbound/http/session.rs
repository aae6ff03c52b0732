//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The session cookie carries only the caller's organization id; every
//! record endpoint reads it to scope its query.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, OrganizationId};

pub(crate) const ORGANIZATION_ID_KEY: &str = "organization_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the request's session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Scope the session to an organization.
    pub fn persist_organization(&self, organization_id: &OrganizationId) -> Result<(), Error> {
        self.0
            .insert(ORGANIZATION_ID_KEY, organization_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The organization the session is scoped to, if any.
    pub fn organization_id(&self) -> Result<Option<OrganizationId>, Error> {
        let id = self
            .0
            .get::<String>(ORGANIZATION_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match OrganizationId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid organization id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an organization-scoped session or return `401 Unauthorized`.
    pub fn require_organization_id(&self) -> Result<OrganizationId, Error> {
        self.organization_id()?
            .ok_or_else(|| Error::unauthorized("register or select an organization first"))
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
