//! The tabular state store: the loaded dataset, its metrics, and the
//! filter/sort parameters applied when views query it.

use std::cmp::Ordering;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::dataset::{Dataset, Row};
use crate::metrics::{calculate_metrics, parse_finite, Metrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// The single active sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

/// Sort state of one column, as shown in a table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    None,
}

impl SortIndicator {
    pub fn as_str(self) -> &'static str {
        match self {
            SortIndicator::Ascending => "ascending",
            SortIndicator::Descending => "descending",
            SortIndicator::None => "none",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
            SortIndicator::None => "▲▼",
        }
    }
}

/// Column name to case-insensitive substring query. Entries are never blank.
pub type FilterSpec = IndexMap<String, String>;

struct Loaded {
    dataset: Dataset,
    metrics: Metrics,
}

/// Owns the current dataset and the view parameters applied to it.
#[derive(Default)]
pub struct TableStore {
    loaded: Option<Loaded>,
    filters: FilterSpec,
    sort: Option<SortSpec>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dataset, recompute metrics, and reset filters and sort.
    pub fn ingest(&mut self, dataset: Dataset) {
        let metrics = calculate_metrics(dataset.rows());
        info!(
            file = %dataset.source().file_name,
            rows = metrics.row_count,
            columns = metrics.column_count,
            numeric_columns = metrics.numeric_columns.len(),
            "dataset ingested"
        );
        self.loaded = Some(Loaded { dataset, metrics });
        self.filters.clear();
        self.sort = None;
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.loaded.as_ref().map(|l| &l.metrics)
    }

    /// True when a dataset with at least one row is loaded.
    pub fn has_data(&self) -> bool {
        self.dataset().is_some_and(|d| !d.is_empty())
    }

    /// Row of the unfiltered dataset.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.dataset().and_then(|d| d.row(index))
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Set the filter for `column`. A blank query removes it.
    pub fn set_filter(&mut self, column: &str, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.filters.shift_remove(column);
        } else {
            self.filters.insert(column.to_string(), query.to_string());
        }
        debug!(column, query, active = self.filters.len(), "filter set");
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Sort by `column`; the same column flips direction, a new column starts ascending.
    pub fn toggle_sort(&mut self, column: &str) {
        let direction = match &self.sort {
            Some(sorting) if sorting.column == column => sorting.direction.reversed(),
            _ => SortDirection::Ascending,
        };
        debug!(column, direction = direction.as_str(), "sort toggled");
        self.sort = Some(SortSpec {
            column: column.to_string(),
            direction,
        });
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn sort_direction(&self, column: &str) -> SortIndicator {
        match &self.sort {
            Some(sorting) if sorting.column == column => match sorting.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::None,
        }
    }

    /// The filtered and sorted rows. Stored state is not modified.
    pub fn query(&self) -> Vec<Row> {
        let Some(dataset) = self.dataset() else {
            return Vec::new();
        };
        self.query_indices()
            .into_iter()
            .filter_map(|i| dataset.row(i).cloned())
            .collect()
    }

    /// Like [`TableStore::query`], but yields positions in the unfiltered dataset.
    pub fn query_indices(&self) -> Vec<usize> {
        let Some(dataset) = self.dataset() else {
            return Vec::new();
        };
        let rows = dataset.rows();

        let needles: Vec<(&str, String)> = self
            .filters
            .iter()
            .map(|(column, query)| (column.as_str(), query.to_lowercase()))
            .collect();

        let indices: Vec<usize> = (0..rows.len())
            .filter(|&i| {
                needles.iter().all(|(column, needle)| {
                    rows[i]
                        .get(*column)
                        .is_some_and(|cell| cell.to_lowercase().contains(needle.as_str()))
                })
            })
            .collect();

        let Some(sorting) = &self.sort else {
            return indices;
        };
        let column = sorting.column.as_str();
        let value = |i: usize| rows[i].get(column).map(String::as_str).unwrap_or("");
        merge_sort_by(indices, &|a: &usize, b: &usize| {
            let ordering = compare_cells(value(*a), value(*b));
            match sorting.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        })
    }
}

/// Numeric comparison when both cells are numbers, string comparison otherwise.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_finite(a), parse_finite(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.cmp(b),
    }
}

/// Stable top-down merge sort. Never panics when `cmp` is not a total order.
fn merge_sort_by<T: Clone>(v: Vec<T>, cmp: &impl Fn(&T, &T) -> Ordering) -> Vec<T> {
    if v.len() <= 1 {
        return v;
    }
    let mut left = v;
    let right = left.split_off(left.len() / 2);
    let left = merge_sort_by(left, cmp);
    let right = merge_sort_by(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Ties take from the left run
        let next = if cmp(r, l) == Ordering::Less {
            right.next()
        } else {
            left.next()
        };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
