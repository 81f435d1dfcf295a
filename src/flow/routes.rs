//! Routes

use std::fmt;

/// Page the shopper can be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Product page
    Catalog,
    /// Checkout form
    Checkout,
    /// Payment succeeded
    Success,
    /// Payment failed
    Failure,
    /// Any unknown path
    NotFound,
}

impl Route {
    /// Every routable page, in navigation order.
    pub const PAGES: [Self; 4] = [Self::Catalog, Self::Checkout, Self::Success, Self::Failure];

    /// URL path. [`Route::NotFound`] has no canonical path.
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::Catalog => Some("/"),
            Self::Checkout => Some("/checkout"),
            Self::Success => Some("/success"),
            Self::Failure => Some("/failure"),
            Self::NotFound => None,
        }
    }

    /// Resolve a URL path. Trailing slashes are ignored.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Self::PAGES
            .into_iter()
            .find(|route| route.path() == Some(normalized))
            .unwrap_or(Self::NotFound)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().unwrap_or("(not found)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve() {
        assert_eq!(Route::from_path("/"), Route::Catalog);
        assert_eq!(Route::from_path(""), Route::Catalog);
        assert_eq!(Route::from_path("/checkout"), Route::Checkout);
        assert_eq!(Route::from_path("/success/"), Route::Success);
        assert_eq!(Route::from_path("/failure"), Route::Failure);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::from_path("/cart"), Route::NotFound);
        assert_eq!(Route::from_path("/checkout/extra"), Route::NotFound);
        assert_eq!(Route::NotFound.path(), None);
    }

    #[test]
    fn every_page_round_trips_through_its_path() {
        for route in Route::PAGES {
            let path = route.path().unwrap_or_default();

            assert_eq!(Route::from_path(path), route, "{path}");
        }
    }
}
