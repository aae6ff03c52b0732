//! Reduction goal HTTP handlers.
//!
//! ```text
//! POST   /api/v1/goals
//! GET    /api/v1/goals
//! DELETE /api/v1/goals/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateGoalRequest, DeleteGoalRequest};
use crate::domain::{Error, GoalDraft, GoalId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, GoalProgressSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_uuid, required};

/// Request payload for creating a goal.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    /// Short name of the goal.
    #[schema(example = "Halve travel emissions")]
    pub title: Option<String>,
    /// Optional free text.
    pub description: Option<String>,
    /// Greater than 0 and at most 100.
    #[schema(example = 20.0)]
    pub target_reduction_percent: Option<f64>,
    /// Day the goal should be met by, as `YYYY-MM-DD`.
    #[schema(example = "2024-12-31")]
    pub target_date: Option<String>,
    /// When omitted, the emissions of the trailing goal window are used.
    pub baseline_emissions_kg: Option<f64>,
}

fn parse_goal_request(body: GoalRequest) -> Result<GoalDraft, Error> {
    let target_date = FieldName::new("targetDate");
    Ok(GoalDraft {
        title: required(body.title, FieldName::new("title"))?,
        description: body.description.unwrap_or_default(),
        target_reduction_percent: required(
            body.target_reduction_percent,
            FieldName::new("targetReductionPercent"),
        )?,
        target_date: parse_date(&required(body.target_date, target_date)?, target_date)?,
        baseline_emissions_kg: body.baseline_emissions_kg,
    })
}

/// Create an active goal with a fixed baseline.
#[utoipa::path(
    post,
    path = "/api/v1/goals",
    request_body = GoalRequest,
    responses(
        (status = 201, description = "Goal created", body = GoalProgressSchema),
        (status = 400, description = "Invalid request or no baseline available", body = ErrorSchema),
        (status = 401, description = "No organization selected", body = ErrorSchema)
    ),
    tags = ["goals"],
    operation_id = "createGoal"
)]
#[post("/goals")]
pub async fn create_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GoalRequest>,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let draft = parse_goal_request(payload.into_inner())?;
    let goal = state
        .goals
        .create(CreateGoalRequest {
            organization_id,
            draft,
        })
        .await?;
    Ok(HttpResponse::Created().json(goal))
}

/// List goals with progress recomputed from current emissions.
#[utoipa::path(
    get,
    path = "/api/v1/goals",
    responses(
        (status = 200, description = "Goals", body = [GoalProgressSchema]),
        (status = 401, description = "No organization selected", body = ErrorSchema)
    ),
    tags = ["goals"],
    operation_id = "listGoals"
)]
#[get("/goals")]
pub async fn list_goals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let goals = state.goals_query.list(organization_id).await?;
    Ok(HttpResponse::Ok().json(goals))
}

/// Delete a goal in any state.
#[utoipa::path(
    delete,
    path = "/api/v1/goals/{id}",
    params(("id" = String, Path, description = "Goal identifier")),
    responses(
        (status = 204, description = "Goal deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "No organization selected", body = ErrorSchema),
        (status = 404, description = "Goal not found", body = ErrorSchema)
    ),
    tags = ["goals"],
    operation_id = "deleteGoal"
)]
#[delete("/goals/{id}")]
pub async fn delete_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let goal_id = GoalId::from_uuid(parse_uuid(&path.into_inner(), FieldName::new("id"))?);
    state
        .goals
        .delete(DeleteGoalRequest {
            organization_id,
            goal_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
