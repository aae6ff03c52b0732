//! Reduction goals and their progress.
//!
//! A goal fixes its baseline at creation. Progress is derived on every read
//! from the organization's live emissions and is never stored; only the
//! one-way `active -> completed` transition is persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::record_id::define_record_id;
use super::{Error, OrganizationId, round_to};

/// Longest accepted goal title, in characters.
pub const GOAL_TITLE_MAX: usize = 200;
/// Longest accepted goal description, in characters.
pub const GOAL_DESCRIPTION_MAX: usize = 1000;

define_record_id!(
    /// Identifier of a reduction goal.
    GoalId,
    "goal id"
);

/// Lifecycle of a goal. Completion is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Still working towards the target.
    Active,
    /// Reached the target at least once.
    Completed,
}

impl GoalStatus {
    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown goal status: {0}")]
pub struct UnknownGoalStatus(pub String);

impl FromStr for GoalStatus {
    type Err = UnknownGoalStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownGoalStatus(other.to_owned())),
        }
    }
}

/// Reasons a goal cannot be created.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GoalValidationError {
    /// Title is blank after trimming.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Title exceeds [`GOAL_TITLE_MAX`].
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// Longest accepted title, in characters.
        max: usize,
    },
    /// Description exceeds [`GOAL_DESCRIPTION_MAX`].
    #[error("description must be at most {max} characters")]
    DescriptionTooLong {
        /// Longest accepted description, in characters.
        max: usize,
    },
    /// Target is not in `(0, 100]`.
    #[error("targetReductionPercent must be greater than 0 and at most 100")]
    TargetOutOfRange,
    /// Baseline is zero, negative or not finite.
    #[error("baselineEmissionsKg must be greater than zero")]
    BaselineNotPositive,
}

impl GoalValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
            Self::TargetOutOfRange => "targetReductionPercent",
            Self::BaselineNotPositive => "baselineEmissionsKg",
        }
    }

    /// Stable machine-readable code for the error payload.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty",
            Self::TitleTooLong { .. } | Self::DescriptionTooLong { .. } => "too_long",
            Self::TargetOutOfRange => "out_of_range",
            Self::BaselineNotPositive => "must_be_positive",
        }
    }
}

impl From<GoalValidationError> for Error {
    fn from(value: GoalValidationError) -> Self {
        Error::validation(value.field(), value.code(), value.to_string())
    }
}

/// Caller-supplied goal fields. A missing baseline is computed by the
/// goal service from the trailing window.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    /// Short name of the goal.
    pub title: String,
    /// Free text, possibly empty.
    pub description: String,
    /// Reduction to achieve, in percent of the baseline.
    pub target_reduction_percent: f64,
    /// Day the goal should be met by.
    pub target_date: NaiveDate,
    /// Explicit baseline; `None` derives it from history.
    pub baseline_emissions_kg: Option<f64>,
}

/// Raw fields used to build or rehydrate a goal.
#[derive(Debug, Clone)]
pub struct GoalParts {
    /// Goal identifier.
    pub id: GoalId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Short name of the goal.
    pub title: String,
    /// Free text, possibly empty.
    pub description: String,
    /// Reduction to achieve, in percent of the baseline.
    pub target_reduction_percent: f64,
    /// Day the goal should be met by.
    pub target_date: NaiveDate,
    /// Emissions the reduction is measured against.
    pub baseline_emissions_kg: f64,
    /// Current lifecycle state.
    pub status: GoalStatus,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A validated reduction goal owned by one organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    id: GoalId,
    organization_id: OrganizationId,
    title: String,
    description: String,
    target_reduction_percent: f64,
    target_date: NaiveDate,
    baseline_emissions_kg: f64,
    status: GoalStatus,
    created_at: DateTime<Utc>,
}

impl Goal {
    /// Validate and build a goal.
    pub fn new(parts: GoalParts) -> Result<Self, GoalValidationError> {
        let title = parts.title.trim().to_owned();
        if title.is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if title.chars().count() > GOAL_TITLE_MAX {
            return Err(GoalValidationError::TitleTooLong { max: GOAL_TITLE_MAX });
        }
        if parts.description.chars().count() > GOAL_DESCRIPTION_MAX {
            return Err(GoalValidationError::DescriptionTooLong {
                max: GOAL_DESCRIPTION_MAX,
            });
        }
        let target = parts.target_reduction_percent;
        if !target.is_finite() || target <= 0.0 || target > 100.0 {
            return Err(GoalValidationError::TargetOutOfRange);
        }
        let baseline = parts.baseline_emissions_kg;
        if !baseline.is_finite() || baseline <= 0.0 {
            return Err(GoalValidationError::BaselineNotPositive);
        }
        Ok(Self {
            id: parts.id,
            organization_id: parts.organization_id,
            title,
            description: parts.description,
            target_reduction_percent: target,
            target_date: parts.target_date,
            baseline_emissions_kg: baseline,
            status: parts.status,
            created_at: parts.created_at,
        })
    }

    /// Goal identifier.
    pub fn id(&self) -> GoalId {
        self.id
    }

    /// Owning organization.
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Trimmed title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Description, empty when none was given.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Reduction target in percent.
    pub fn target_reduction_percent(&self) -> f64 {
        self.target_reduction_percent
    }

    /// Day the goal should be met by.
    pub fn target_date(&self) -> NaiveDate {
        self.target_date
    }

    /// Baseline in kg CO2e.
    pub fn baseline_emissions_kg(&self) -> f64 {
        self.baseline_emissions_kg
    }

    /// Current lifecycle state.
    pub fn status(&self) -> GoalStatus {
        self.status
    }

    /// Creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Progress against the target for the given live emissions.
    pub fn progress_percent(&self, current_emissions_kg: f64) -> f64 {
        progress_percent(
            self.baseline_emissions_kg,
            current_emissions_kg,
            self.target_reduction_percent,
        )
    }

    /// Whether the saving against the baseline covers the full target.
    ///
    /// Compares unrounded kilograms so a displayed 100.0 % never completes a
    /// goal that is still short of its target.
    pub fn target_met(&self, current_emissions_kg: f64) -> bool {
        let target_saving = self.baseline_emissions_kg * self.target_reduction_percent / 100.0;
        self.baseline_emissions_kg - current_emissions_kg >= target_saving
    }

    /// Mark the goal completed. Returns `true` when the status changed.
    pub fn complete(&mut self) -> bool {
        let changed = self.status == GoalStatus::Active;
        self.status = GoalStatus::Completed;
        changed
    }
}

/// `clamp(0, 100, (baseline − current) / (baseline × target% / 100) × 100)`,
/// rounded to one decimal.
///
/// # Examples
/// ```
/// use ecopulse::domain::progress_percent;
///
/// // Baseline 1000 kg, target 20 %: 100 kg saved is half way.
/// assert_eq!(progress_percent(1000.0, 900.0, 20.0), 50.0);
/// assert_eq!(progress_percent(1000.0, 1200.0, 20.0), 0.0);
/// assert_eq!(progress_percent(1000.0, 500.0, 20.0), 100.0);
/// ```
pub fn progress_percent(baseline_kg: f64, current_kg: f64, target_reduction_percent: f64) -> f64 {
    let target_saving = baseline_kg * target_reduction_percent / 100.0;
    if !target_saving.is_finite() || target_saving <= 0.0 {
        return 0.0;
    }
    let progress = (baseline_kg - current_kg) / target_saving * 100.0;
    if !progress.is_finite() {
        return 0.0;
    }
    round_to(progress.clamp(0.0, 100.0), 1)
}

/// A goal together with its live progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// The goal itself, serialised inline.
    #[serde(flatten)]
    pub goal: Goal,
    /// Emissions over the current window in kg CO2e.
    pub current_emissions_kg: f64,
    /// Progress towards the target, rounded for display.
    pub progress_percent: f64,
    #[serde(skip)]
    target_met: bool,
}

impl GoalProgress {
    /// Pair a goal with its progress for the given live emissions.
    pub fn evaluate(goal: Goal, current_emissions_kg: f64) -> Self {
        let progress_percent = goal.progress_percent(current_emissions_kg);
        let target_met = goal.target_met(current_emissions_kg);
        Self {
            goal,
            current_emissions_kg: round_to(current_emissions_kg, 2),
            progress_percent,
            target_met,
        }
    }

    /// Whether this read should persist the completion transition.
    pub fn reached_target(&self) -> bool {
        self.goal.status() == GoalStatus::Active && self.target_met
    }
}
