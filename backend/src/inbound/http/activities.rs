//! Activity HTTP handlers.
//!
//! ```text
//! POST   /api/v1/activities
//! GET    /api/v1/activities?category=travel&limit=50
//! DELETE /api/v1/activities/{id}
//! ```
//!
//! The submission body is flat: `category` selects which of the optional
//! measurement fields are read, and fields of other categories are ignored.

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    DEFAULT_ACTIVITY_LIMIT, DeleteActivityRequest, ListActivitiesRequest, SubmitActivityRequest,
};
use crate::domain::{
    ActivityDetails, ActivityId, ActivitySubmission, EmissionCategory, Error, WelfareGroup,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ActivityRecordSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_category, parse_count, parse_date, parse_uuid, parse_whole_count, required,
};

const PASSENGERS_DEFAULT: u32 = 1;
const DURATION_DAYS_DEFAULT: u32 = 1;

/// Request payload for submitting an activity.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    /// Activity category, e.g. `travel`.
    #[schema(example = "travel")]
    pub category: Option<String>,
    /// Day of the activity as `YYYY-MM-DD`.
    #[schema(example = "2024-03-14")]
    pub date: Option<String>,
    /// Optional non-negative spend.
    pub cost: Option<f64>,
    /// Optional free text.
    pub description: Option<String>,
    /// Travel.
    #[schema(example = "petrol_car")]
    pub vehicle_type: Option<String>,
    /// Kilometres travelled.
    pub distance_km: Option<f64>,
    /// Defaults to 1.
    pub passengers: Option<i64>,
    /// Events.
    pub event_type: Option<String>,
    /// Number of attendees.
    pub attendees: Option<i64>,
    /// Event length in hours.
    pub duration_hours: Option<f64>,
    /// Whether food was served. Defaults to false.
    pub has_catering: Option<bool>,
    /// Whether attendees travelled. Defaults to false.
    pub has_travel: Option<bool>,
    /// Infrastructure.
    pub equipment_type: Option<String>,
    /// Hours of operation.
    pub usage_hours: Option<f64>,
    /// Power draw of one unit in kW.
    pub power_rating_kw: Option<f64>,
    /// Infrastructure unit count, marketing or office amount.
    pub quantity: Option<f64>,
    /// Marketing.
    pub marketing_type: Option<String>,
    /// Defaults to 1.
    pub duration_days: Option<i64>,
    /// Office.
    pub activity_type: Option<String>,
    /// Staff welfare.
    pub welfare_type: Option<String>,
    /// Welfare group the type belongs to.
    #[schema(example = "recreation")]
    pub welfare_category: Option<String>,
    /// Staff members receiving the benefit.
    pub beneficiaries: Option<i64>,
}

/// Query parameters for listing activities.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListActivitiesQuery {
    /// Restrict to one activity category.
    pub category: Option<String>,
    /// Page size; defaults to 100 and is capped at 1000.
    pub limit: Option<usize>,
}

fn field(name: &'static str) -> FieldName {
    FieldName::new(name)
}

fn parse_welfare_group(value: &str) -> Result<WelfareGroup, Error> {
    WelfareGroup::from_str(value.trim()).map_err(|err| {
        Error::validation(
            "welfareCategory",
            "unknown_category",
            format!("{err}; expected one of: health_wellness, recreation, uniforms_safety"),
        )
    })
}

fn parse_details(
    category: EmissionCategory,
    body: &mut ActivityRequest,
) -> Result<ActivityDetails, Error> {
    let details = match category {
        EmissionCategory::Travel => ActivityDetails::Travel {
            vehicle_type: required(body.vehicle_type.take(), field("vehicleType"))?,
            distance_km: required(body.distance_km, field("distanceKm"))?,
            passengers: body
                .passengers
                .map(|value| parse_count(value, field("passengers")))
                .transpose()?
                .unwrap_or(PASSENGERS_DEFAULT),
        },
        EmissionCategory::Events => ActivityDetails::Events {
            event_type: required(body.event_type.take(), field("eventType"))?,
            attendees: parse_count(
                required(body.attendees, field("attendees"))?,
                field("attendees"),
            )?,
            duration_hours: required(body.duration_hours, field("durationHours"))?,
            has_catering: body.has_catering.unwrap_or(false),
            has_travel: body.has_travel.unwrap_or(false),
        },
        EmissionCategory::Infrastructure => ActivityDetails::Infrastructure {
            equipment_type: required(body.equipment_type.take(), field("equipmentType"))?,
            usage_hours: required(body.usage_hours, field("usageHours"))?,
            power_rating_kw: required(body.power_rating_kw, field("powerRatingKw"))?,
            quantity: parse_whole_count(
                required(body.quantity, field("quantity"))?,
                field("quantity"),
            )?,
        },
        EmissionCategory::Marketing => ActivityDetails::Marketing {
            marketing_type: required(body.marketing_type.take(), field("marketingType"))?,
            quantity: required(body.quantity, field("quantity"))?,
            duration_days: body
                .duration_days
                .map(|value| parse_count(value, field("durationDays")))
                .transpose()?
                .unwrap_or(DURATION_DAYS_DEFAULT),
        },
        EmissionCategory::Office => ActivityDetails::Office {
            activity_type: required(body.activity_type.take(), field("activityType"))?,
            quantity: required(body.quantity, field("quantity"))?,
        },
        EmissionCategory::StaffWelfare => {
            let welfare_category = required(body.welfare_category.take(), field("welfareCategory"))?;
            ActivityDetails::StaffWelfare {
                welfare_type: required(body.welfare_type.take(), field("welfareType"))?,
                welfare_category: parse_welfare_group(&welfare_category)?,
                beneficiaries: parse_count(
                    required(body.beneficiaries, field("beneficiaries"))?,
                    field("beneficiaries"),
                )?,
            }
        }
        // `parse_category` only yields activity categories.
        EmissionCategory::Energy => {
            return Err(Error::validation(
                "category",
                "unknown_category",
                "energy readings are submitted to /energy",
            ));
        }
    };
    Ok(details)
}

fn parse_activity_request(mut body: ActivityRequest) -> Result<ActivitySubmission, Error> {
    let raw_category = required(body.category.take(), field("category"))?;
    let category = parse_category(&raw_category, field("category"))?;
    let raw_date = required(body.date.take(), field("date"))?;
    let date = parse_date(&raw_date, field("date"))?;
    let details = parse_details(category, &mut body)?;
    Ok(ActivitySubmission {
        details,
        date,
        cost: body.cost,
        description: body.description.filter(|text| !text.trim().is_empty()),
    })
}

/// Submit an activity; its emission is computed and frozen on the record.
#[utoipa::path(
    post,
    path = "/api/v1/activities",
    request_body = ActivityRequest,
    responses(
        (status = 201, description = "Activity recorded", body = ActivityRecordSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "No organization selected", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "submitActivity"
)]
#[post("/activities")]
pub async fn submit_activity(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ActivityRequest>,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let submission = parse_activity_request(payload.into_inner())?;
    let record = state
        .activities
        .submit(SubmitActivityRequest {
            organization_id,
            submission,
        })
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// List the organization's activities, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/activities",
    params(ListActivitiesQuery),
    responses(
        (status = 200, description = "Activities", body = [ActivityRecordSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "No organization selected", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "listActivities"
)]
#[get("/activities")]
pub async fn list_activities(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListActivitiesQuery>,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let ListActivitiesQuery { category, limit } = query.into_inner();
    let category = category
        .as_deref()
        .map(|raw| parse_category(raw, field("category")))
        .transpose()?;
    let records = state
        .activities_query
        .list(ListActivitiesRequest {
            organization_id,
            category,
            limit: limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT),
        })
        .await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Permanently delete one activity.
#[utoipa::path(
    delete,
    path = "/api/v1/activities/{id}",
    params(("id" = String, Path, description = "Activity identifier")),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "No organization selected", body = ErrorSchema),
        (status = 404, description = "Activity not found", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "deleteActivity"
)]
#[delete("/activities/{id}")]
pub async fn delete_activity(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let activity_id = ActivityId::from_uuid(parse_uuid(&path.into_inner(), field("id"))?);
    state
        .activities
        .delete(DeleteActivityRequest {
            organization_id,
            activity_id,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "activities_tests.rs"]
mod tests;
