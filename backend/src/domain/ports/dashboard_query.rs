//! Driving port for aggregated views: dashboard, leaderboard, insights.
//!
//! Every call recomputes from the current record set.

use async_trait::async_trait;

use crate::domain::{DashboardStats, Error, InsightReport, OrganizationId, RankedEntry};

/// Aggregated views over an organization's records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Totals, trend, score and goal counts for one organization.
    async fn stats(&self, organization_id: OrganizationId) -> Result<DashboardStats, Error>;

    /// Rank every registered organization over the current period.
    async fn leaderboard(&self) -> Result<Vec<RankedEntry>, Error>;

    /// Risk, cost efficiency and recommendations for one organization.
    async fn insights(&self, organization_id: OrganizationId) -> Result<InsightReport, Error>;
}

/// Fixture reporting an empty footprint.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDashboardQuery;

#[async_trait]
impl DashboardQuery for FixtureDashboardQuery {
    async fn stats(&self, _organization_id: OrganizationId) -> Result<DashboardStats, Error> {
        Ok(crate::domain::dashboard_stats(
            &[],
            &[],
            crate::domain::GoalCounts::default(),
            &crate::domain::EmissionPolicy::standard(),
        ))
    }

    async fn leaderboard(&self) -> Result<Vec<RankedEntry>, Error> {
        Ok(Vec::new())
    }

    async fn insights(&self, _organization_id: OrganizationId) -> Result<InsightReport, Error> {
        Ok(crate::domain::insights(
            &[],
            &[],
            crate::domain::GoalCounts::default(),
            &crate::domain::EmissionPolicy::standard(),
        ))
    }
}
