//! Cross-organization leaderboard.

use serde::Serialize;

use super::{OrganizationId, round_to};

/// Per-organization period totals fed to the ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationTotals {
    /// Organization being ranked.
    pub organization_id: OrganizationId,
    /// Display name.
    pub organization_name: String,
    /// Emissions in the current period.
    pub current_total_kg: f64,
    /// `None` when the organization has no records in the previous period.
    pub previous_total_kg: Option<f64>,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    /// 1-based position; lower emissions rank first.
    pub rank: usize,
    /// Ranked organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub organization_name: String,
    /// Emissions in the current period.
    pub total_emissions_kg: f64,
    /// Positive when emissions fell, negative when they rose.
    pub reduction_percent: f64,
}

/// Percentage decrease from `previous` to `current`, one decimal.
///
/// Missing or zero previous totals report no change.
///
/// # Examples
/// ```
/// use ecopulse::domain::reduction_percent;
///
/// assert_eq!(reduction_percent(Some(200.0), 150.0), 25.0);
/// assert_eq!(reduction_percent(Some(100.0), 120.0), -20.0);
/// assert_eq!(reduction_percent(None, 80.0), 0.0);
/// ```
pub fn reduction_percent(previous: Option<f64>, current: f64) -> f64 {
    match previous {
        Some(previous) if previous > 0.0 => round_to((previous - current) / previous * 100.0, 1),
        _ => 0.0,
    }
}

/// Order organizations ascending by current total, ties by id.
pub fn rank(mut totals: Vec<OrganizationTotals>) -> Vec<RankedEntry> {
    totals.sort_by(|left, right| {
        left.current_total_kg
            .total_cmp(&right.current_total_kg)
            .then_with(|| left.organization_id.cmp(&right.organization_id))
    });
    totals
        .into_iter()
        .enumerate()
        .map(|(index, totals)| RankedEntry {
            rank: index + 1,
            organization_id: totals.organization_id,
            reduction_percent: reduction_percent(totals.previous_total_kg, totals.current_total_kg),
            total_emissions_kg: round_to(totals.current_total_kg, 2),
            organization_name: totals.organization_name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    fn org(n: u128) -> OrganizationId {
        OrganizationId::from_uuid(Uuid::from_u128(n))
    }

    fn totals(n: u128, current: f64, previous: Option<f64>) -> OrganizationTotals {
        OrganizationTotals {
            organization_id: org(n),
            organization_name: format!("Org {n}"),
            current_total_kg: current,
            previous_total_kg: previous,
        }
    }

    #[rstest]
    fn ranks_ascending_with_id_tie_break() {
        let ranked = rank(vec![
            totals(3, 50.0, None),
            totals(2, 10.0, None),
            totals(1, 50.0, None),
            totals(4, 0.0, None),
        ]);
        let order: Vec<(usize, OrganizationId)> = ranked
            .iter()
            .map(|entry| (entry.rank, entry.organization_id))
            .collect();
        assert_eq!(
            order,
            vec![(1, org(4)), (2, org(2)), (3, org(1)), (4, org(3))]
        );
    }

    #[rstest]
    #[case(Some(200.0), 150.0, 25.0)]
    #[case(Some(100.0), 130.0, -30.0)]
    #[case(Some(0.0), 10.0, 0.0)]
    #[case(None, 10.0, 0.0)]
    #[case(Some(3.0), 2.0, 33.3)]
    fn reduction_may_be_negative(
        #[case] previous: Option<f64>,
        #[case] current: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(reduction_percent(previous, current), expected);
    }

    #[rstest]
    fn entries_carry_reduction_and_names() {
        let ranked = rank(vec![totals(1, 80.0, Some(100.0))]);
        assert_eq!(
            ranked,
            vec![RankedEntry {
                rank: 1,
                organization_id: org(1),
                organization_name: "Org 1".into(),
                total_emissions_kg: 80.0,
                reduction_percent: 20.0,
            }]
        );
    }

    #[rstest]
    fn empty_input_yields_empty_ranking() {
        assert!(rank(Vec::new()).is_empty());
    }
}
