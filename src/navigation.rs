//! Data-presence preconditions on routes.

use tracing::debug;

use crate::notify::NotificationSink;
use crate::route::Route;
use crate::store::TableStore;

pub const NO_DATA_MESSAGE: &str = "Please upload a file first";
pub const NOT_FOUND_MESSAGE: &str = "Page not found";
pub const ROW_NOT_FOUND_MESSAGE: &str = "Row not found";

/// Why the gate sent the user somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    NoData,
    NotFound,
    RowOutOfRange,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Proceed(Route),
    Redirect { to: Route, reason: RedirectReason },
}

impl Resolution {
    /// The route that ends up displayed.
    pub fn target(&self) -> Route {
        match self {
            Resolution::Proceed(route) => *route,
            Resolution::Redirect { to, .. } => *to,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Resolution::Redirect { .. })
    }
}

/// Decides whether a requested route may be shown given the store's state.
///
/// Stateless: every call looks at the store afresh. Each redirect emits
/// exactly one notification to the sink; a proceed emits none.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationGate;

impl NavigationGate {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(
        &self,
        route: Route,
        store: &TableStore,
        sink: &mut dyn NotificationSink,
    ) -> Resolution {
        if !route.requires_data() {
            return Resolution::Proceed(route);
        }

        if !store.has_data() {
            debug!(route = %route, "redirecting: no data loaded");
            sink.error(NO_DATA_MESSAGE);
            return Resolution::Redirect {
                to: Route::Upload,
                reason: RedirectReason::NoData,
            };
        }

        if let Route::DataDetail(index) = route {
            if store.row(index).is_none() {
                debug!(index, "redirecting: row out of range");
                sink.warning(ROW_NOT_FOUND_MESSAGE);
                return Resolution::Redirect {
                    to: Route::Data,
                    reason: RedirectReason::RowOutOfRange,
                };
            }
        }

        Resolution::Proceed(route)
    }

    /// Resolve a raw path. Unrecognized paths redirect to the upload route.
    pub fn resolve_path(
        &self,
        path: &str,
        store: &TableStore,
        sink: &mut dyn NotificationSink,
    ) -> Resolution {
        match Route::parse(path) {
            Some(route) => self.resolve(route, store, sink),
            None => {
                debug!(path, "redirecting: unknown route");
                sink.error(NOT_FOUND_MESSAGE);
                Resolution::Redirect {
                    to: Route::Upload,
                    reason: RedirectReason::NotFound,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{row_from_pairs, Dataset, SourceInfo};
    use crate::notify::{Notification, NotificationKind};

    fn loaded_store() -> TableStore {
        let mut store = TableStore::new();
        store.ingest(Dataset::new(
            vec![
                row_from_pairs([("Name", "Ann"), ("Qty", "3")]),
                row_from_pairs([("Name", "Bo"), ("Qty", "4")]),
            ],
            SourceInfo::new("orders.xlsx"),
        ));
        store
    }

    #[test]
    fn test_no_data_redirects_with_one_error() {
        let store = TableStore::new();
        let mut sink: Vec<Notification> = Vec::new();
        let gate = NavigationGate::new();

        let resolution = gate.resolve(Route::Dashboard, &store, &mut sink);
        assert_eq!(
            resolution,
            Resolution::Redirect {
                to: Route::Upload,
                reason: RedirectReason::NoData
            }
        );
        assert_eq!(
            sink,
            [Notification {
                kind: NotificationKind::Error,
                message: NO_DATA_MESSAGE.to_string()
            }]
        );
    }

    #[test]
    fn test_data_independent_routes_always_proceed() {
        let store = TableStore::new();
        let mut sink: Vec<Notification> = Vec::new();
        let gate = NavigationGate::new();
        for route in [Route::Home, Route::Upload, Route::Icons, Route::About] {
            assert_eq!(gate.resolve(route, &store, &mut sink), Resolution::Proceed(route));
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_loaded_data_proceeds_without_notification() {
        let store = loaded_store();
        let mut sink: Vec<Notification> = Vec::new();
        let gate = NavigationGate::new();
        for route in [Route::Dashboard, Route::Tiles, Route::Data, Route::DataDetail(1)] {
            assert_eq!(gate.resolve(route, &store, &mut sink), Resolution::Proceed(route));
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_empty_dataset_counts_as_no_data() {
        let mut store = TableStore::new();
        store.ingest(Dataset::new(Vec::new(), SourceInfo::new("empty.xlsx")));
        let mut sink: Vec<Notification> = Vec::new();
        let resolution = NavigationGate::new().resolve(Route::ChartTypes, &store, &mut sink);
        assert_eq!(resolution.target(), Route::Upload);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_row_out_of_range_redirects_to_data() {
        let store = loaded_store();
        let mut sink: Vec<Notification> = Vec::new();
        let resolution = NavigationGate::new().resolve(Route::DataDetail(2), &store, &mut sink);
        assert_eq!(resolution.target(), Route::Data);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].kind, NotificationKind::Warning);
    }

    #[test]
    fn test_unknown_path_redirects_to_upload() {
        let store = loaded_store();
        let mut sink: Vec<Notification> = Vec::new();
        let resolution = NavigationGate::new().resolve_path("#/nope", &store, &mut sink);
        assert_eq!(
            resolution,
            Resolution::Redirect {
                to: Route::Upload,
                reason: RedirectReason::NotFound
            }
        );
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].message, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_resolution_is_reevaluated() {
        let mut store = TableStore::new();
        let mut sink: Vec<Notification> = Vec::new();
        let gate = NavigationGate::new();
        assert!(gate.resolve_path("/data", &store, &mut sink).is_redirect());

        store.ingest(loaded_store().dataset().cloned().unwrap());
        assert!(!gate.resolve_path("/data", &store, &mut sink).is_redirect());
        assert_eq!(sink.len(), 1);
    }
}
