use super::*;

/// Labels of the series a user has switched off in a legend.
pub type ExcludedSet = BTreeSet<String>;

/// Holds every dataset of a report together with the report-wide filter.
/// Datasets never change after load; panels derive prepared copies.
pub struct SeriesStore {
    report: Report,
    filter: SeriesFilter,
}

impl SeriesStore {
    pub fn new(report: Report, filter: SeriesFilter) -> Self {
        Self { report, filter }
    }

    pub fn filter(&self) -> &SeriesFilter {
        &self.filter
    }

    /// Returns the filtered, sorted and marked copy of a dataset, or `None`
    /// if the report has no dataset with this id.
    pub fn prepare(&self, id: &str, preparation: &Preparation) -> Option<GraphDataset> {
        self.report
            .get(id)
            .map(|dataset| self.filter.prepare(dataset, preparation))
    }
}

/// Every series whose label is not excluded, in their original order.
pub fn visible<'a>(series: &'a [Series], excluded: &ExcludedSet) -> Vec<&'a Series> {
    series
        .iter()
        .filter(|s| !excluded.contains(&s.label))
        .collect()
}
