//! Emission factor registry HTTP handler.
//!
//! ```text
//! GET /api/v1/emission-factors
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, http::header, web};

use crate::domain::{EmissionFactorEntry, EmissionFactorRegistry};
use crate::inbound::http::schemas::EmissionFactorEntrySchema;
use crate::inbound::http::state::HttpState;

/// Registry entries keyed by category name, then by type.
fn grouped(
    registry: &EmissionFactorRegistry,
) -> BTreeMap<&'static str, &BTreeMap<&'static str, EmissionFactorEntry>> {
    registry
        .grouped()
        .iter()
        .map(|(category, entries)| (category.as_str(), entries))
        .collect()
}

/// Read-only dump of the emission factor table.
#[utoipa::path(
    get,
    path = "/api/v1/emission-factors",
    responses(
        (
            status = 200,
            description = "Factors grouped by category, then type",
            body = BTreeMap<String, BTreeMap<String, EmissionFactorEntrySchema>>
        )
    ),
    tags = ["emission-factors"],
    operation_id = "getEmissionFactors",
    security([])
)]
#[get("/emission-factors")]
pub async fn emission_factors(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
        .json(grouped(state.emission_factors))
}
