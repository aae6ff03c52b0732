//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered organizations.
    organizations (id) {
        id -> Uuid,
        /// Trimmed display name (max 120 characters).
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Activity records with their frozen emission value.
    ///
    /// `category` and `activity_type` duplicate the tag and type held in
    /// `details` so listings can filter without decoding JSON.
    activities (id) {
        id -> Uuid,
        organization_id -> Uuid,
        category -> Varchar,
        activity_type -> Varchar,
        /// Category-tagged measurement fields.
        details -> Jsonb,
        date -> Date,
        emission_kg -> Float8,
        cost -> Nullable<Float8>,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Daily energy readings.
    energy_records (id) {
        id -> Uuid,
        organization_id -> Uuid,
        date -> Date,
        electricity_kwh -> Float8,
        num_people -> Int4,
        num_systems -> Int4,
        ac_hours -> Float8,
        outdoor_temp_celsius -> Float8,
        notes -> Nullable<Text>,
        emission_kg -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reduction goals. `status` is `active` or `completed`.
    goals (id) {
        id -> Uuid,
        organization_id -> Uuid,
        title -> Varchar,
        description -> Text,
        target_reduction_percent -> Float8,
        target_date -> Date,
        baseline_emissions_kg -> Float8,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(activities -> organizations (organization_id));
diesel::joinable!(energy_records -> organizations (organization_id));
diesel::joinable!(goals -> organizations (organization_id));

diesel::allow_tables_to_appear_in_same_query!(organizations, activities, energy_records, goals);
