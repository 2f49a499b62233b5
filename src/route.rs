use std::fmt;

/// Every screen the application can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Home,
    Upload,
    Dashboard,
    ChartTypes,
    Tiles,
    Components,
    Icons,
    Colors,
    Data,
    /// Detail of one row of the unfiltered dataset, by index
    DataDetail(usize),
    About,
}

impl Route {
    /// Routes reachable from the navigation bar, in display order.
    pub const NAV: [Route; 10] = [
        Route::Home,
        Route::Upload,
        Route::Dashboard,
        Route::ChartTypes,
        Route::Tiles,
        Route::Components,
        Route::Icons,
        Route::Colors,
        Route::Data,
        Route::About,
    ];

    /// Parse a hash-style path such as `#/dashboard`, `/data/3` or `tiles`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim();
        let path = path.strip_prefix('#').unwrap_or(path);
        let path = path.trim_matches('/');

        let mut segments = path.split('/');
        let head = segments.next().unwrap_or("");
        let tail = segments.next();
        if segments.next().is_some() {
            return None;
        }

        match (head, tail) {
            ("", None) => Some(Route::Home),
            ("upload", None) => Some(Route::Upload),
            ("dashboard", None) => Some(Route::Dashboard),
            ("chart-types", None) => Some(Route::ChartTypes),
            ("tiles", None) => Some(Route::Tiles),
            ("components", None) => Some(Route::Components),
            ("icons", None) => Some(Route::Icons),
            ("colors", None) => Some(Route::Colors),
            ("data", None) => Some(Route::Data),
            ("data", Some(index)) => index.parse().ok().map(Route::DataDetail),
            ("about", None) => Some(Route::About),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::ChartTypes => "/chart-types".to_string(),
            Route::Tiles => "/tiles".to_string(),
            Route::Components => "/components".to_string(),
            Route::Icons => "/icons".to_string(),
            Route::Colors => "/colors".to_string(),
            Route::Data => "/data".to_string(),
            Route::DataDetail(index) => format!("/data/{index}"),
            Route::About => "/about".to_string(),
        }
    }

    /// Whether the route can only be shown with a non-empty dataset loaded.
    pub fn requires_data(&self) -> bool {
        match self {
            Route::Dashboard
            | Route::ChartTypes
            | Route::Tiles
            | Route::Data
            | Route::DataDetail(_) => true,
            Route::Home
            | Route::Upload
            | Route::Components
            | Route::Icons
            | Route::Colors
            | Route::About => false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Upload => "Upload",
            Route::Dashboard => "Dashboard",
            Route::ChartTypes => "Charts",
            Route::Tiles => "Tiles",
            Route::Components => "Components",
            Route::Icons => "Icons",
            Route::Colors => "Colors",
            Route::Data => "Data",
            Route::DataDetail(_) => "Row Detail",
            Route::About => "About",
        }
    }

    /// Navigation bar entry selected by digit key `1`..`9`, `0` for the tenth.
    pub fn from_digit(c: char) -> Option<Route> {
        let index = match c {
            '1'..='9' => c as usize - '1' as usize,
            '0' => 9,
            _ => return None,
        };
        Self::NAV.get(index).copied()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_hash_and_bare_forms() {
        assert_eq!(Route::parse("#/dashboard"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/chart-types"), Some(Route::ChartTypes));
        assert_eq!(Route::parse("tiles"), Some(Route::Tiles));
        assert_eq!(Route::parse("data/3"), Some(Route::DataDetail(3)));
        assert_eq!(Route::parse("#/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/about/"), Some(Route::About));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Route::parse("/nowhere"), None);
        assert_eq!(Route::parse("/data/abc"), None);
        assert_eq!(Route::parse("/data/1/2"), None);
        assert_eq!(Route::parse("/upload/x"), None);
    }

    #[test]
    fn test_path_round_trip() {
        let mut routes = Route::NAV.to_vec();
        routes.push(Route::DataDetail(42));
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_data_dependence() {
        assert!(Route::Dashboard.requires_data());
        assert!(Route::DataDetail(0).requires_data());
        assert!(!Route::Upload.requires_data());
        assert!(!Route::Colors.requires_data());
    }

    #[test]
    fn test_from_digit() {
        assert_eq!(Route::from_digit('1'), Some(Route::Home));
        assert_eq!(Route::from_digit('3'), Some(Route::Dashboard));
        assert_eq!(Route::from_digit('0'), Some(Route::About));
        assert_eq!(Route::from_digit('x'), None);
    }
}
