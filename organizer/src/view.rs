//! Filtered, ordered projections over a record collection.

use chrono::NaiveDateTime;

use crate::ordering::DisplayOrder;
use crate::predicate::Filterable;
use crate::predicate::category_matches;
use crate::predicate::search_matches;
use crate::store::RecordStore;

/// The single filter mode active on a view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewSelector<S, C> {
    None,
    Search(String),
    Status(S),
    Category(C),
}

impl<S, C> Default for ViewSelector<S, C> {
    fn default() -> Self {
        ViewSelector::None
    }
}

/// Selector type for a record kind.
pub type SelectorFor<R> = ViewSelector<<R as Filterable>::Status, <R as Filterable>::Category>;

pub fn selects<R: Filterable>(
    record: &R,
    selector: &SelectorFor<R>,
    now: NaiveDateTime,
) -> bool {
    match selector {
        ViewSelector::None => true,
        ViewSelector::Search(query) => search_matches(record, query),
        ViewSelector::Status(status) => record.matches_status(*status, now),
        ViewSelector::Category(category) => category_matches(record, category),
    }
}

/// Filter `records` by `selector`, then order them for display.
///
/// The sort is stable, so records the comparator considers equal keep their
/// stored order.
pub fn project<R>(records: &[R], selector: &SelectorFor<R>, now: NaiveDateTime) -> Vec<R>
where
    R: Filterable + DisplayOrder,
{
    let mut out: Vec<R> = records
        .iter()
        .filter(|r| selects(*r, selector, now))
        .cloned()
        .collect();
    out.sort_by(|a, b| a.display_cmp(b, now));
    out
}

pub fn count_by_status<R: Filterable>(
    records: &[R],
    status: R::Status,
    now: NaiveDateTime,
) -> usize {
    records
        .iter()
        .filter(|r| r.matches_status(status, now))
        .count()
}

/// Categories present in `records`, deduplicated and sorted by label.
pub fn distinct_categories<R>(records: &[R]) -> Vec<R::Category>
where
    R: Filterable,
    R::Category: std::fmt::Display,
{
    let mut out: Vec<R::Category> = Vec::new();
    for category in records.iter().filter_map(|r| r.category()) {
        if !out.contains(category) {
            out.push(category.clone());
        }
    }
    out.sort_by_key(|c| c.to_string());
    out
}

/// A record store paired with the currently active selector.
///
/// Every read reloads the store and re-projects, so the result always
/// reflects the latest writes and selector.
pub struct CollectionView<R: Filterable> {
    store: RecordStore<R>,
    selector: SelectorFor<R>,
}

impl<R> CollectionView<R>
where
    R: Filterable + DisplayOrder,
{
    pub fn new(store: RecordStore<R>) -> Self {
        Self {
            store,
            selector: ViewSelector::None,
        }
    }

    pub fn selector(&self) -> &SelectorFor<R> {
        &self.selector
    }

    /// Start a text search; clears any status or category filter.
    pub fn search(&mut self, query: impl Into<String>) {
        self.selector = ViewSelector::Search(query.into());
    }

    /// Filter by status; clears any search or category filter.
    pub fn filter_status(&mut self, status: R::Status) {
        self.selector = ViewSelector::Status(status);
    }

    /// Filter by category; clears any search or status filter.
    pub fn filter_category(&mut self, category: R::Category) {
        self.selector = ViewSelector::Category(category);
    }

    pub fn clear(&mut self) {
        self.selector = ViewSelector::None;
    }

    /// The full, unfiltered collection in stored order.
    pub fn all(&self) -> anyhow::Result<Vec<R>> {
        self.store.load()
    }

    pub fn items(&self, now: NaiveDateTime) -> anyhow::Result<Vec<R>> {
        let records = self.store.load()?;
        Ok(project(&records, &self.selector, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::TaskStatus;
    use crate::predicate::TimeFilter;
    use crate::types::Appointment;
    use crate::types::AppointmentCategory;
    use crate::types::Priority;
    use crate::types::Task;
    use chrono::Duration;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn appt(id: &str, starts: NaiveDateTime, category: AppointmentCategory) -> Appointment {
        Appointment {
            id: id.to_string(),
            title: format!("{id} title"),
            description: String::new(),
            date: starts.date(),
            time: starts.time(),
            location: String::new(),
            category,
            reminder_sent: false,
            created_at: None,
        }
    }

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            due_date: None,
            priority: Priority::Medium,
            completed,
            created_at: None,
        }
    }

    fn ids<R: crate::types::Record>(items: &[R]) -> Vec<&str> {
        items.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn none_selector_sorts_everything() {
        let now = now();
        let items = vec![
            appt("past", now - Duration::days(1), AppointmentCategory::Work),
            appt("soon", now + Duration::hours(3), AppointmentCategory::Medical),
        ];
        let out = project(&items, &ViewSelector::None, now);
        assert_eq!(ids(&out), vec!["soon", "past"]);
    }

    #[test]
    fn status_and_category_filters() {
        let now = now();
        let items = vec![
            appt("past", now - Duration::days(1), AppointmentCategory::Work),
            appt("soon", now + Duration::hours(3), AppointmentCategory::Medical),
            appt("later", now + Duration::days(3), AppointmentCategory::Work),
        ];
        let upcoming = project(&items, &ViewSelector::Status(TimeFilter::Upcoming), now);
        assert_eq!(ids(&upcoming), vec!["soon", "later"]);
        let past = project(&items, &ViewSelector::Status(TimeFilter::Past), now);
        assert_eq!(ids(&past), vec!["past"]);
        let work = project(
            &items,
            &ViewSelector::Category(AppointmentCategory::Work),
            now,
        );
        assert_eq!(ids(&work), vec!["later", "past"]);
        assert_eq!(count_by_status(&items, TimeFilter::Upcoming, now), 2);
    }

    #[test]
    fn search_filters_tasks_then_orders_them() {
        let now = now();
        let items = vec![task("done-report", true), task("report", false), task("misc", false)];
        let out = project(&items, &ViewSelector::Search("REPORT".to_string()), now);
        assert_eq!(ids(&out), vec!["report", "done-report"]);
        let pending = project(&items, &ViewSelector::Status(TaskStatus::Pending), now);
        assert_eq!(ids(&pending), vec!["report", "misc"]);
    }

    #[test]
    fn distinct_categories_are_sorted_by_label() {
        let now = now();
        let items = vec![
            appt("a", now, AppointmentCategory::Work),
            appt("b", now, AppointmentCategory::Medical),
            appt("c", now, AppointmentCategory::Work),
            appt("d", now, AppointmentCategory::Business),
        ];
        assert_eq!(
            distinct_categories(&items),
            vec![
                AppointmentCategory::Business,
                AppointmentCategory::Medical,
                AppointmentCategory::Work,
            ]
        );
    }
}
