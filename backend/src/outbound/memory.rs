//! Process-local record store.
//!
//! [`InMemoryRecordStore`] implements every repository port over a single
//! lock-protected map set. It backs the server when no database URL is
//! configured and the behaviour suites that run without PostgreSQL. Records
//! vanish when the process exits.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ActivityListFilter, ActivityRepository, ActivityRepositoryError, EnergyListFilter,
    EnergyRepository, EnergyRepositoryError, GoalRepository, GoalRepositoryError,
    OrganizationRepository, OrganizationRepositoryError,
};
use crate::domain::{
    ActivityId, ActivityRecord, EnergyRecord, EnergyRecordId, Goal, GoalId, Organization,
    OrganizationId,
};

const POISONED: &str = "record store lock poisoned";

#[derive(Debug, Default)]
struct Tables {
    organizations: HashMap<OrganizationId, Organization>,
    activities: HashMap<ActivityId, ActivityRecord>,
    energy: HashMap<EnergyRecordId, EnergyRecord>,
    goals: HashMap<GoalId, Goal>,
}

/// Thread-safe in-memory implementation of the repository ports.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use ecopulse::outbound::memory::InMemoryRecordStore;
///
/// let store = Arc::new(InMemoryRecordStore::default());
/// assert_eq!(store.organization_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<Tables>,
}

impl InMemoryRecordStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered organizations; zero if the lock is poisoned.
    pub fn organization_count(&self) -> usize {
        self.tables
            .read()
            .map(|tables| tables.organizations.len())
            .unwrap_or_default()
    }

    fn read<E>(&self, error: impl FnOnce(&'static str) -> E) -> Result<RwLockReadGuard<'_, Tables>, E> {
        self.tables.read().map_err(|_| error(POISONED))
    }

    fn write<E>(
        &self,
        error: impl FnOnce(&'static str) -> E,
    ) -> Result<RwLockWriteGuard<'_, Tables>, E> {
        self.tables.write().map_err(|_| error(POISONED))
    }
}

fn truncate<T>(mut rows: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

#[async_trait]
impl OrganizationRepository for InMemoryRecordStore {
    async fn save(&self, organization: &Organization) -> Result<(), OrganizationRepositoryError> {
        let mut tables = self.write(OrganizationRepositoryError::query)?;
        tables
            .organizations
            .insert(organization.id(), organization.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let tables = self.read(OrganizationRepositoryError::query)?;
        Ok(tables.organizations.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        let tables = self.read(OrganizationRepositoryError::query)?;
        let mut organizations: Vec<_> = tables.organizations.values().cloned().collect();
        organizations.sort_by_key(Organization::id);
        Ok(organizations)
    }
}

#[async_trait]
impl ActivityRepository for InMemoryRecordStore {
    async fn save(&self, record: &ActivityRecord) -> Result<(), ActivityRepositoryError> {
        let mut tables = self.write(ActivityRepositoryError::query)?;
        tables.activities.insert(record.id(), record.clone());
        Ok(())
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &ActivityId,
    ) -> Result<bool, ActivityRepositoryError> {
        let mut tables = self.write(ActivityRepositoryError::query)?;
        let owned = tables
            .activities
            .get(id)
            .is_some_and(|record| record.organization_id() == *organization_id);
        if owned {
            tables.activities.remove(id);
        }
        Ok(owned)
    }

    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
        filter: ActivityListFilter,
    ) -> Result<Vec<ActivityRecord>, ActivityRepositoryError> {
        let tables = self.read(ActivityRepositoryError::query)?;
        let mut rows: Vec<_> = tables
            .activities
            .values()
            .filter(|record| record.organization_id() == *organization_id)
            .filter(|record| filter.category.is_none_or(|category| record.category() == category))
            .filter(|record| filter.dated_after.is_none_or(|after| record.date() > after))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.date()
                .cmp(&a.date())
                .then_with(|| b.created_at().cmp(&a.created_at()))
        });
        Ok(truncate(rows, filter.limit))
    }
}

#[async_trait]
impl EnergyRepository for InMemoryRecordStore {
    async fn save(&self, record: &EnergyRecord) -> Result<(), EnergyRepositoryError> {
        let mut tables = self.write(EnergyRepositoryError::query)?;
        tables.energy.insert(record.id(), record.clone());
        Ok(())
    }

    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
        filter: EnergyListFilter,
    ) -> Result<Vec<EnergyRecord>, EnergyRepositoryError> {
        let tables = self.read(EnergyRepositoryError::query)?;
        let mut rows: Vec<_> = tables
            .energy
            .values()
            .filter(|record| record.organization_id() == *organization_id)
            .filter(|record| filter.dated_after.is_none_or(|after| record.date() > after))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.date()
                .cmp(&a.date())
                .then_with(|| b.created_at().cmp(&a.created_at()))
        });
        Ok(truncate(rows, filter.limit))
    }
}

#[async_trait]
impl GoalRepository for InMemoryRecordStore {
    async fn save(&self, goal: &Goal) -> Result<(), GoalRepositoryError> {
        let mut tables = self.write(GoalRepositoryError::query)?;
        tables.goals.insert(goal.id(), goal.clone());
        Ok(())
    }

    async fn list_for_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Goal>, GoalRepositoryError> {
        let tables = self.read(GoalRepositoryError::query)?;
        let mut goals: Vec<_> = tables
            .goals
            .values()
            .filter(|goal| goal.organization_id() == *organization_id)
            .cloned()
            .collect();
        goals.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(goals)
    }

    async fn mark_completed(
        &self,
        organization_id: &OrganizationId,
        id: &GoalId,
    ) -> Result<bool, GoalRepositoryError> {
        let mut tables = self.write(GoalRepositoryError::query)?;
        match tables.goals.get_mut(id) {
            Some(goal) if goal.organization_id() == *organization_id => {
                goal.complete();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(
        &self,
        organization_id: &OrganizationId,
        id: &GoalId,
    ) -> Result<bool, GoalRepositoryError> {
        let mut tables = self.write(GoalRepositoryError::query)?;
        let owned = tables
            .goals
            .get(id)
            .is_some_and(|goal| goal.organization_id() == *organization_id);
        if owned {
            tables.goals.remove(id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::fixtures::{activity, date, energy, noon, office_details, travel_details};
    use crate::domain::{EmissionCategory, GoalParts, GoalStatus};

    #[fixture]
    fn store() -> InMemoryRecordStore {
        InMemoryRecordStore::new()
    }

    fn goal(organization_id: OrganizationId, created_day: u32) -> Goal {
        Goal::new(GoalParts {
            id: GoalId::random(),
            organization_id,
            title: format!("goal {created_day}"),
            description: String::new(),
            target_reduction_percent: 20.0,
            target_date: date(2024, 12, 31),
            baseline_emissions_kg: 500.0,
            status: GoalStatus::Active,
            created_at: noon(date(2024, 3, created_day)),
        })
        .expect("valid goal")
    }

    #[rstest]
    #[tokio::test]
    async fn organizations_round_trip_and_list_in_id_order(store: InMemoryRecordStore) {
        let first = Organization::new(OrganizationId::random(), "Alpha", noon(date(2024, 1, 1)))
            .expect("valid organization");
        let second = Organization::new(OrganizationId::random(), "Beta", noon(date(2024, 1, 2)))
            .expect("valid organization");
        OrganizationRepository::save(&store, &first).await.expect("save");
        OrganizationRepository::save(&store, &second).await.expect("save");

        let found = store.find_by_id(&first.id()).await.expect("lookup");
        assert_eq!(found.as_ref().map(Organization::name), Some("Alpha"));

        let listed = store.list_all().await.expect("list");
        let mut expected = vec![first.id(), second.id()];
        expected.sort();
        assert_eq!(listed.iter().map(Organization::id).collect::<Vec<_>>(), expected);
        assert_eq!(store.organization_count(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn activities_list_most_recent_first(store: InMemoryRecordStore) {
        let org = OrganizationId::random();
        let older = activity(org, travel_details(10.0), date(2024, 3, 1), 1.0);
        let newer = activity(org, travel_details(20.0), date(2024, 3, 10), 2.0);
        let same_day_later = ActivityRecord::from_parts(crate::domain::ActivityRecordParts {
            id: ActivityId::random(),
            organization_id: org,
            details: office_details(),
            date: date(2024, 3, 10),
            emission_kg: 3.0,
            cost: None,
            description: None,
            created_at: noon(date(2024, 3, 10)) + Duration::minutes(5),
        });
        for record in [&older, &newer, &same_day_later] {
            ActivityRepository::save(&store, record).await.expect("save");
        }

        let listed = ActivityRepository::list_for_organization(
            &store,
            &org,
            ActivityListFilter::default(),
        )
        .await
        .expect("list");
        let ids: Vec<_> = listed.iter().map(ActivityRecord::id).collect();
        assert_eq!(ids, vec![same_day_later.id(), newer.id(), older.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn activity_filters_compose(store: InMemoryRecordStore) {
        let org = OrganizationId::random();
        let other = OrganizationId::random();
        for record in [
            activity(org, travel_details(10.0), date(2024, 1, 5), 1.0),
            activity(org, travel_details(10.0), date(2024, 3, 5), 1.0),
            activity(org, travel_details(10.0), date(2024, 3, 6), 1.0),
            activity(org, office_details(), date(2024, 3, 7), 1.0),
            activity(other, travel_details(10.0), date(2024, 3, 8), 1.0),
        ] {
            ActivityRepository::save(&store, &record).await.expect("save");
        }

        let filter = ActivityListFilter {
            category: Some(EmissionCategory::Travel),
            dated_after: Some(date(2024, 3, 1)),
            limit: Some(1),
        };
        let listed = ActivityRepository::list_for_organization(&store, &org, filter)
            .await
            .expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].date(), date(2024, 3, 6));
        assert_eq!(listed[0].category(), EmissionCategory::Travel);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_another_organizations_activity_is_refused(store: InMemoryRecordStore) {
        let owner = OrganizationId::random();
        let record = activity(owner, travel_details(10.0), date(2024, 3, 1), 1.0);
        ActivityRepository::save(&store, &record).await.expect("save");

        let foreign = ActivityRepository::delete(&store, &OrganizationId::random(), &record.id())
            .await
            .expect("delete");
        assert!(!foreign);

        let removed = ActivityRepository::delete(&store, &owner, &record.id())
            .await
            .expect("delete");
        assert!(removed);
        let again = ActivityRepository::delete(&store, &owner, &record.id())
            .await
            .expect("delete");
        assert!(!again);
    }

    #[rstest]
    #[tokio::test]
    async fn energy_respects_window_and_limit(store: InMemoryRecordStore) {
        let org = OrganizationId::random();
        for day in 1..=5 {
            EnergyRepository::save(&store, &energy(org, date(2024, 3, day), 100.0, 80.0))
                .await
                .expect("save");
        }
        let listed = EnergyRepository::list_for_organization(
            &store,
            &org,
            EnergyListFilter {
                dated_after: Some(date(2024, 3, 2)),
                limit: Some(2),
            },
        )
        .await
        .expect("list");
        let dates: Vec<_> = listed.iter().map(EnergyRecord::date).collect();
        assert_eq!(dates, vec![date(2024, 3, 5), date(2024, 3, 4)]);
    }

    #[rstest]
    #[tokio::test]
    async fn goals_list_oldest_first_and_complete_once(store: InMemoryRecordStore) {
        let org = OrganizationId::random();
        let late = goal(org, 20);
        let early = goal(org, 2);
        GoalRepository::save(&store, &late).await.expect("save");
        GoalRepository::save(&store, &early).await.expect("save");

        let listed = GoalRepository::list_for_organization(&store, &org)
            .await
            .expect("list");
        assert_eq!(
            listed.iter().map(Goal::id).collect::<Vec<_>>(),
            vec![early.id(), late.id()]
        );

        assert!(store.mark_completed(&org, &early.id()).await.expect("complete"));
        assert!(store.mark_completed(&org, &early.id()).await.expect("complete"));
        assert!(!store.mark_completed(&org, &GoalId::random()).await.expect("complete"));

        let listed = GoalRepository::list_for_organization(&store, &org)
            .await
            .expect("list");
        assert_eq!(listed[0].status(), GoalStatus::Completed);
        assert_eq!(listed[1].status(), GoalStatus::Active);
    }

    #[rstest]
    #[tokio::test]
    async fn goal_delete_is_scoped_to_owner(store: InMemoryRecordStore) {
        let org = OrganizationId::random();
        let target = goal(org, 5);
        GoalRepository::save(&store, &target).await.expect("save");
        assert!(!GoalRepository::delete(&store, &OrganizationId::random(), &target.id())
            .await
            .expect("delete"));
        assert!(GoalRepository::delete(&store, &org, &target.id())
            .await
            .expect("delete"));
        assert!(GoalRepository::list_for_organization(&store, &org)
            .await
            .expect("list")
            .is_empty());
    }
}
