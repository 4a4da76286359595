use std::str::FromStr;

/// Pages reachable by path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Anpr,
}

/// Every path with a page behind it
pub const ROUTE_PATHS: [&str; 2] = ["/", "/anpr"];

impl Route {
    /// `/` and `/anpr` both lead to the ANPR page; anything else has no page
    pub fn resolve(path: &str) -> Option<Route> {
        match path {
            "/" | "/anpr" => Some(Route::Anpr),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Anpr => "/anpr",
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::resolve(s).ok_or_else(|| {
            format!("no page at {:?} (expected one of {})", s, ROUTE_PATHS.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_paths_resolve_to_anpr() {
        assert_eq!(Route::resolve("/"), Some(Route::Anpr));
        assert_eq!(Route::resolve("/anpr"), Some(Route::Anpr));
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(Route::resolve("/about"), None);
        assert_eq!(Route::resolve(""), None);
        assert!("/settings".parse::<Route>().is_err());
    }
}
