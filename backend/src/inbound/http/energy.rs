//! Energy HTTP handlers.
//!
//! ```text
//! POST /api/v1/energy
//! GET  /api/v1/energy?limit=30
//! GET  /api/v1/energy/forecast
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    DEFAULT_ENERGY_LIMIT, ListEnergyRecordsRequest, SubmitEnergyRecordRequest,
};
use crate::domain::{
    EnergyForecast, EnergyReading, Error, ForecastConfidence, ForecastFactors, ForecastResult,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EnergyRecordSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_count, parse_date, required};

/// Request payload for one daily energy reading.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRecordRequest {
    /// Day of the reading as `YYYY-MM-DD`.
    #[schema(example = "2024-06-01")]
    pub date: Option<String>,
    /// Electricity consumed in kWh.
    #[schema(example = 40.0)]
    pub electricity_kwh: Option<f64>,
    /// People on site.
    pub num_people: Option<i64>,
    /// Systems in use.
    pub num_systems: Option<i64>,
    /// Hours of air conditioning, 0 to 24. Defaults to 0.
    pub ac_hours: Option<f64>,
    /// Mean outdoor temperature in degrees Celsius.
    pub outdoor_temp_celsius: Option<f64>,
    /// Optional free text.
    pub notes: Option<String>,
}

/// Query parameters for listing energy readings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEnergyQuery {
    /// Page size; defaults to 365.
    pub limit: Option<usize>,
}

/// Forecast payload. `forecast` and `factors` are present only when
/// `sufficientData` is true; otherwise `message` explains what is missing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    /// Whether enough readings exist to forecast.
    pub sufficient_data: bool,
    /// Explanation when data is insufficient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Readings considered.
    pub data_points: usize,
    /// Projection for the next month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastBody>,
    /// Sample means behind the projection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<FactorsBody>,
}

/// Monthly projection.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastBody {
    /// Projected consumption for the next month.
    #[schema(example = 1200.0)]
    pub monthly_forecast_kwh: f64,
    /// `low`, `medium` or `high`.
    #[schema(example = "medium")]
    pub confidence: String,
    /// Suggestions drawn from the readings.
    pub recommendations: Vec<String>,
}

/// Sample means behind a forecast.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FactorsBody {
    /// Mean people on site.
    pub avg_people: f64,
    /// Mean systems in use.
    pub avg_systems: f64,
    /// Mean daily air conditioning hours.
    pub avg_ac_hours: f64,
    /// Mean outdoor temperature.
    pub avg_temp_celsius: f64,
}

fn confidence_label(confidence: ForecastConfidence) -> &'static str {
    match confidence {
        ForecastConfidence::Low => "low",
        ForecastConfidence::Medium => "medium",
        ForecastConfidence::High => "high",
    }
}

impl From<EnergyForecast> for ForecastBody {
    fn from(value: EnergyForecast) -> Self {
        Self {
            monthly_forecast_kwh: value.monthly_forecast_kwh,
            confidence: confidence_label(value.confidence).to_owned(),
            recommendations: value.recommendations,
        }
    }
}

impl From<ForecastFactors> for FactorsBody {
    fn from(value: ForecastFactors) -> Self {
        Self {
            avg_people: value.avg_people,
            avg_systems: value.avg_systems,
            avg_ac_hours: value.avg_ac_hours,
            avg_temp_celsius: value.avg_temp_celsius,
        }
    }
}

impl From<ForecastResult> for ForecastResponse {
    fn from(value: ForecastResult) -> Self {
        match value {
            ForecastResult::Insufficient {
                message,
                data_points,
            } => Self {
                sufficient_data: false,
                message: Some(message),
                data_points,
                forecast: None,
                factors: None,
            },
            ForecastResult::Sufficient {
                forecast,
                factors,
                data_points,
            } => Self {
                sufficient_data: true,
                message: None,
                data_points,
                forecast: Some(forecast.into()),
                factors: Some(factors.into()),
            },
        }
    }
}

fn parse_energy_request(body: EnergyRecordRequest) -> Result<EnergyReading, Error> {
    let date = parse_date(
        &required(body.date, FieldName::new("date"))?,
        FieldName::new("date"),
    )?;
    let num_people = FieldName::new("numPeople");
    let num_systems = FieldName::new("numSystems");
    Ok(EnergyReading {
        date,
        electricity_kwh: required(body.electricity_kwh, FieldName::new("electricityKwh"))?,
        num_people: parse_count(required(body.num_people, num_people)?, num_people)?,
        num_systems: parse_count(required(body.num_systems, num_systems)?, num_systems)?,
        ac_hours: body.ac_hours.unwrap_or(0.0),
        outdoor_temp_celsius: required(
            body.outdoor_temp_celsius,
            FieldName::new("outdoorTempCelsius"),
        )?,
        notes: body.notes.filter(|notes| !notes.trim().is_empty()),
    })
}

/// Record one day of electricity consumption.
#[utoipa::path(
    post,
    path = "/api/v1/energy",
    request_body = EnergyRecordRequest,
    responses(
        (status = 201, description = "Energy record stored", body = EnergyRecordSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "No organization selected", body = ErrorSchema)
    ),
    tags = ["energy"],
    operation_id = "submitEnergyRecord"
)]
#[post("/energy")]
pub async fn submit_energy_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<EnergyRecordRequest>,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let reading = parse_energy_request(payload.into_inner())?;
    let record = state
        .energy
        .submit(SubmitEnergyRecordRequest {
            organization_id,
            reading,
        })
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// List energy records, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/energy",
    params(ListEnergyQuery),
    responses(
        (status = 200, description = "Energy records", body = [EnergyRecordSchema]),
        (status = 401, description = "No organization selected", body = ErrorSchema)
    ),
    tags = ["energy"],
    operation_id = "listEnergyRecords"
)]
#[get("/energy")]
pub async fn list_energy_records(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ListEnergyQuery>,
) -> ApiResult<HttpResponse> {
    let organization_id = session.require_organization_id()?;
    let records = state
        .energy_query
        .list(ListEnergyRecordsRequest {
            organization_id,
            limit: query.limit.unwrap_or(DEFAULT_ENERGY_LIMIT),
        })
        .await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Forecast next month's consumption from the recorded history.
#[utoipa::path(
    get,
    path = "/api/v1/energy/forecast",
    responses(
        (status = 200, description = "Forecast or the reason none is available", body = ForecastResponse),
        (status = 401, description = "No organization selected", body = ErrorSchema)
    ),
    tags = ["energy"],
    operation_id = "getEnergyForecast"
)]
#[get("/energy/forecast")]
pub async fn energy_forecast(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ForecastResponse>> {
    let organization_id = session.require_organization_id()?;
    let result = state.energy_query.forecast(organization_id).await?;
    Ok(web::Json(result.into()))
}
