//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test, web};

use crate::domain::{Error, OrganizationId};
use crate::inbound::http::session::SessionContext;

/// Route that scopes the caller's session; mount it with
/// `.route(SELECT_ORGANIZATION_PATH, web::get().to(select_organization))`.
pub const SELECT_ORGANIZATION_PATH: &str = "/test/select-organization/{id}";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Test-only handler that persists the organization id from the path.
pub async fn select_organization(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id = OrganizationId::new(path.into_inner())?;
    session.persist_organization(&id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Obtain a session cookie scoped to `organization_id` from an app that
/// mounts [`select_organization`].
pub async fn session_cookie<S, B>(app: &S, organization_id: OrganizationId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let uri = SELECT_ORGANIZATION_PATH.replace("{id}", &organization_id.to_string());
    let res = test::call_service(app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert!(res.status().is_success(), "selecting organization failed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
