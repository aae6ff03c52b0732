//! Tests for the emission calculator.

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::WelfareGroup;

#[fixture]
fn calculator() -> EmissionCalculator {
    EmissionCalculator::new(EmissionFactorRegistry::standard(), EmissionPolicy::standard())
        .expect("standard registry has a grid factor")
}

fn travel(vehicle_type: &str, distance_km: f64) -> ActivityDetails {
    ActivityDetails::Travel {
        vehicle_type: vehicle_type.into(),
        distance_km,
        passengers: 1,
    }
}

fn conference(has_catering: bool, has_travel: bool) -> ActivityDetails {
    ActivityDetails::Events {
        event_type: "indoor_conference".into(),
        attendees: 10,
        duration_hours: 2.0,
        has_catering,
        has_travel,
    }
}

#[rstest]
fn petrol_car_trip_matches_published_factor(calculator: EmissionCalculator) {
    assert_eq!(calculator.activity_emission(&travel("petrol_car", 100.0)), Ok(21.0));
}

#[rstest]
#[case("bicycle", 1.0)]
#[case("bicycle", 100.0)]
#[case("walking", 12_000.0)]
fn active_travel_is_emission_free(
    calculator: EmissionCalculator,
    #[case] vehicle_type: &str,
    #[case] distance_km: f64,
) {
    assert_eq!(calculator.activity_emission(&travel(vehicle_type, distance_km)), Ok(0.0));
}

#[rstest]
fn passengers_do_not_discount_the_trip(calculator: EmissionCalculator) {
    let carpool = ActivityDetails::Travel {
        vehicle_type: "diesel_car".into(),
        distance_km: 50.0,
        passengers: 4,
    };
    assert_eq!(calculator.activity_emission(&carpool), Ok(13.5));
}

#[rstest]
fn air_conditioning_load_matches_published_factor(calculator: EmissionCalculator) {
    let details = ActivityDetails::Infrastructure {
        equipment_type: "air_conditioning".into(),
        usage_hours: 8.0,
        power_rating_kw: 2.0,
        quantity: 1,
    };
    assert_eq!(calculator.activity_emission(&details), Ok(12.8));
}

#[rstest]
#[case(false, false, 50.0)]
#[case(true, false, 62.5)]
#[case(false, true, 75.0)]
#[case(true, true, 87.5)]
fn event_surcharges_apply(
    calculator: EmissionCalculator,
    #[case] has_catering: bool,
    #[case] has_travel: bool,
    #[case] expected: f64,
) {
    assert_eq!(
        calculator.activity_emission(&conference(has_catering, has_travel)),
        Ok(expected)
    );
}

#[rstest]
fn catering_strictly_increases_event_emissions(calculator: EmissionCalculator) {
    for has_travel in [false, true] {
        let without = calculator
            .activity_emission(&conference(false, has_travel))
            .expect("valid event");
        let with = calculator
            .activity_emission(&conference(true, has_travel))
            .expect("valid event");
        assert!(with > without, "catering must add emissions");
    }
}

#[rstest]
#[case("website_hosting", 2.0, 30, 18.0)]
#[case("printed_brochure", 1000.0, 10, 50.0)]
#[case("video_production", 3.0, 1, 150.0)]
fn marketing_applies_days_only_to_daily_types(
    calculator: EmissionCalculator,
    #[case] marketing_type: &str,
    #[case] quantity: f64,
    #[case] duration_days: u32,
    #[case] expected: f64,
) {
    let details = ActivityDetails::Marketing {
        marketing_type: marketing_type.into(),
        quantity,
        duration_days,
    };
    assert_eq!(calculator.activity_emission(&details), Ok(expected));
}

#[rstest]
#[case("printed_banner", 2.0, 5.0)]
#[case("email_marketing", 1000.0, 4.0)]
fn per_unit_marketing_ignores_zero_duration(
    calculator: EmissionCalculator,
    #[case] marketing_type: &str,
    #[case] quantity: f64,
    #[case] expected: f64,
) {
    let details = ActivityDetails::Marketing {
        marketing_type: marketing_type.into(),
        quantity,
        duration_days: 0,
    };
    assert_eq!(calculator.activity_emission(&details), Ok(expected));
}

#[rstest]
fn office_multiplies_quantity(calculator: EmissionCalculator) {
    let details = ActivityDetails::Office {
        activity_type: "courier_national".into(),
        quantity: 3.0,
    };
    assert_eq!(calculator.activity_emission(&details), Ok(15.0));
}

#[rstest]
fn staff_welfare_uses_grouped_factor(calculator: EmissionCalculator) {
    let details = ActivityDetails::StaffWelfare {
        welfare_type: "staff_party".into(),
        welfare_category: WelfareGroup::Recreation,
        beneficiaries: 20,
    };
    assert_eq!(calculator.activity_emission(&details), Ok(160.0));
}

#[rstest]
fn staff_welfare_rejects_mismatched_group(calculator: EmissionCalculator) {
    let details = ActivityDetails::StaffWelfare {
        welfare_type: "staff_party".into(),
        welfare_category: WelfareGroup::HealthWellness,
        beneficiaries: 20,
    };
    let err = calculator.activity_emission(&details).expect_err("mismatch");
    assert_eq!(err.field(), "welfareCategory");
}

#[rstest]
fn unknown_type_names_the_type_field(calculator: EmissionCalculator) {
    let err = calculator
        .activity_emission(&travel("rocket", 10.0))
        .expect_err("unknown vehicle");
    assert_eq!(err.field(), "vehicleType");
    assert_eq!(err.code(), "unknown_type");
    assert!(err.to_string().contains("petrol_car"));
}

#[rstest]
#[case(travel("bus", 0.0), "distanceKm")]
#[case(travel("bus", -5.0), "distanceKm")]
#[case(
    ActivityDetails::Events {
        event_type: "workshop".into(),
        attendees: 0,
        duration_hours: 1.0,
        has_catering: false,
        has_travel: false,
    },
    "attendees"
)]
#[case(
    ActivityDetails::Infrastructure {
        equipment_type: "servers".into(),
        usage_hours: 24.0,
        power_rating_kw: 0.0,
        quantity: 2,
    },
    "powerRatingKw"
)]
#[case(
    ActivityDetails::Marketing {
        marketing_type: "website_hosting".into(),
        quantity: 1.0,
        duration_days: 0,
    },
    "durationDays"
)]
#[case(
    ActivityDetails::StaffWelfare {
        welfare_type: "gym_membership".into(),
        welfare_category: WelfareGroup::HealthWellness,
        beneficiaries: 0,
    },
    "beneficiaries"
)]
fn non_positive_quantities_name_their_field(
    calculator: EmissionCalculator,
    #[case] details: ActivityDetails,
    #[case] field: &str,
) {
    let err = calculator.activity_emission(&details).expect_err("invalid quantity");
    assert_eq!(err.field(), field);
}

#[rstest]
fn non_finite_quantities_are_rejected(calculator: EmissionCalculator) {
    let err = calculator
        .activity_emission(&travel("train", f64::NAN))
        .expect_err("nan distance");
    assert_eq!(err, ActivityValidationError::NotFinite { field: "distanceKm" });
}

#[rstest]
fn results_are_rounded_to_two_decimals(calculator: EmissionCalculator) {
    // 0.089 × 12.345 = 1.098705
    assert_eq!(calculator.activity_emission(&travel("bus", 12.345)), Ok(1.1));
}

fn reading(kwh: f64, ac_hours: f64, outdoor_temp_celsius: f64) -> EnergyReading {
    EnergyReading {
        date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
        electricity_kwh: kwh,
        num_people: 5,
        num_systems: 5,
        ac_hours,
        outdoor_temp_celsius,
        notes: None,
    }
}

#[rstest]
#[case(reading(0.0, 0.0, 22.0), 0.0)]
#[case(reading(100.0, 0.0, 22.0), 50.0)]
#[case(reading(100.0, 10.0, 22.0), 51.5)]
#[case(reading(100.0, 0.0, 12.0), 50.5)]
#[case(reading(100.0, 0.0, 32.0), 50.5)]
fn energy_combines_grid_cooling_and_temperature_terms(
    calculator: EmissionCalculator,
    #[case] reading: EnergyReading,
    #[case] expected: f64,
) {
    assert_eq!(calculator.energy_emission(&reading), Ok(expected));
}

#[rstest]
fn energy_rejects_invalid_readings(calculator: EmissionCalculator) {
    let err = calculator
        .energy_emission(&reading(-1.0, 0.0, 22.0))
        .expect_err("negative kwh");
    assert_eq!(err.field(), "electricityKwh");
}

#[rstest]
fn new_requires_a_grid_factor() {
    let registry: &'static EmissionFactorRegistry = Box::leak(Box::new(
        EmissionFactorRegistry::from_entries([]).expect("empty registry"),
    ));
    let result = EmissionCalculator::new(registry, EmissionPolicy::standard());
    assert!(matches!(result, Err(RegistryError::MissingEntry { .. })));
}
