//! Organization HTTP handlers.
//!
//! ```text
//! POST /api/v1/organizations
//! GET  /api/v1/organizations/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RegisterOrganizationRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, OrganizationSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, required};

/// Request payload for registering an organization.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganizationBody {
    /// Display name of the organization.
    #[schema(example = "Clean Water Trust")]
    pub name: Option<String>,
}

/// Register an organization and scope the session to it.
#[utoipa::path(
    post,
    path = "/api/v1/organizations",
    request_body = RegisterOrganizationBody,
    responses(
        (status = 201, description = "Organization registered", body = OrganizationSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["organizations"],
    operation_id = "registerOrganization",
    security([])
)]
#[post("/organizations")]
pub async fn register_organization(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterOrganizationBody>,
) -> ApiResult<HttpResponse> {
    let name = required(payload.into_inner().name, FieldName::new("name"))?;
    let organization = state
        .organizations
        .register(RegisterOrganizationRequest { name })
        .await?;
    session.persist_organization(&organization.id())?;
    Ok(HttpResponse::Created().json(organization))
}

/// Fetch the organization the session is scoped to.
#[utoipa::path(
    get,
    path = "/api/v1/organizations/me",
    responses(
        (status = 200, description = "Current organization", body = OrganizationSchema),
        (status = 401, description = "No organization selected", body = ErrorSchema),
        (status = 404, description = "Organization no longer exists", body = ErrorSchema)
    ),
    tags = ["organizations"],
    operation_id = "currentOrganization"
)]
#[get("/organizations/me")]
pub async fn current_organization(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let organization = state.organizations_query.current(organization_id).await?;
    Ok(HttpResponse::Ok().json(organization))
}
