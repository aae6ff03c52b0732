//! Record builders shared by domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use super::{
    ActivityDetails, ActivityId, ActivityRecord, ActivityRecordParts, EnergyReading,
    EnergyRecord, EnergyRecordId, OrganizationId, WelfareGroup,
};

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(crate) fn noon(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0).expect("valid time"))
}

/// Day the fixture clock reports as today.
pub(crate) fn today() -> NaiveDate {
    date(2024, 3, 31)
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn clock_at(day: NaiveDate) -> Arc<dyn Clock> {
    Arc::new(FixtureClock { utc_now: noon(day) })
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    clock_at(today())
}

pub(crate) fn travel_details(distance_km: f64) -> ActivityDetails {
    ActivityDetails::Travel {
        vehicle_type: "petrol_car".into(),
        distance_km,
        passengers: 1,
    }
}

pub(crate) fn office_details() -> ActivityDetails {
    ActivityDetails::Office {
        activity_type: "paper_usage".into(),
        quantity: 100.0,
    }
}

pub(crate) fn welfare_details() -> ActivityDetails {
    ActivityDetails::StaffWelfare {
        welfare_type: "staff_party".into(),
        welfare_category: WelfareGroup::Recreation,
        beneficiaries: 10,
    }
}

pub(crate) fn activity(
    organization_id: OrganizationId,
    details: ActivityDetails,
    on: NaiveDate,
    emission_kg: f64,
) -> ActivityRecord {
    ActivityRecord::from_parts(ActivityRecordParts {
        id: ActivityId::random(),
        organization_id,
        details,
        date: on,
        emission_kg,
        cost: None,
        description: None,
        created_at: noon(on),
    })
}

pub(crate) fn reading(on: NaiveDate, electricity_kwh: f64) -> EnergyReading {
    EnergyReading {
        date: on,
        electricity_kwh,
        num_people: 10,
        num_systems: 10,
        ac_hours: 2.0,
        outdoor_temp_celsius: 24.0,
        notes: None,
    }
}

pub(crate) fn energy(
    organization_id: OrganizationId,
    on: NaiveDate,
    electricity_kwh: f64,
    emission_kg: f64,
) -> EnergyRecord {
    EnergyRecord::new(
        EnergyRecordId::random(),
        organization_id,
        reading(on, electricity_kwh),
        emission_kg,
        noon(on),
    )
}
