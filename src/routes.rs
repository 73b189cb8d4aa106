//! Route paths shown in the address bar.
//!
//! `/{page}?time=N&domain=D` is a listing, `/item/{id}` is a story's detail page.

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const MIN_WINDOW_DAYS: u32 = 1;
pub const MAX_WINDOW_DAYS: u32 = 30;

/// Filters applied to a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub window_days: u32,
    pub domain: Option<String>,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            domain: None,
        }
    }
}

impl ListingQuery {
    pub fn new(window_days: u32, domain: Option<String>) -> Self {
        Self {
            window_days: window_days.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS),
            domain: domain.filter(|d| !d.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `page` is kept signed so a `/0` or `/-3` can be reported in place.
    Listing { page: i64, query: ListingQuery },
    Item { id: String },
    NotFound { path: String },
}

impl Route {
    pub fn first_page(query: ListingQuery) -> Self {
        Route::Listing { page: 1, query }
    }

    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (path, query_string) = match input.split_once('?') {
            Some((path, qs)) => (path, qs),
            None => (input, ""),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::first_page(parse_listing_query(query_string)),
            ["item", id] => Route::Item {
                id: urlencoding::decode(id)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| id.to_string()),
            },
            [token] if *token != "item" => match token.parse::<i64>() {
                Ok(page) => Route::Listing {
                    page,
                    query: parse_listing_query(query_string),
                },
                Err(_) => Route::NotFound {
                    path: input.to_string(),
                },
            },
            _ => Route::NotFound {
                path: input.to_string(),
            },
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Listing { page, query } => {
                let mut path = format!("/{}?time={}", page, query.window_days);
                if let Some(domain) = &query.domain {
                    path.push_str("&domain=");
                    path.push_str(&urlencoding::encode(domain));
                }
                path
            }
            Route::Item { id } => format!("/item/{}", urlencoding::encode(id)),
            Route::NotFound { path } => path.clone(),
        }
    }
}

fn parse_listing_query(query_string: &str) -> ListingQuery {
    let mut window_days = DEFAULT_WINDOW_DAYS;
    let mut domain = None;

    for pair in query_string.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(&value.replace('+', " "))
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| value.to_string());
        match key {
            "time" => {
                window_days = match value.trim().parse::<i64>() {
                    Ok(0) | Err(_) => DEFAULT_WINDOW_DAYS,
                    Ok(days) => days.clamp(MIN_WINDOW_DAYS as i64, MAX_WINDOW_DAYS as i64) as u32,
                };
            }
            "domain" => domain = Some(value),
            _ => {}
        }
    }

    ListingQuery::new(window_days, domain)
}

/// Something the user did in the listing's filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEvent {
    /// Apply button, Enter, or a picked suggestion.
    Applied,
    InputEdited,
    WindowChanged,
}

/// Where the filter bar navigates after `event`, given the text in the domain box,
/// the query currently shown and the slider position. Always lands on page 1.
pub fn filter_route(
    event: FilterEvent,
    input: &str,
    active: &ListingQuery,
    window_days: u32,
) -> Option<Route> {
    let input = input.trim();
    match event {
        FilterEvent::Applied if input.is_empty() => None,
        FilterEvent::Applied => Some(Route::first_page(ListingQuery::new(
            window_days,
            Some(input.to_string()),
        ))),
        FilterEvent::InputEdited if input.is_empty() && active.domain.is_some() => {
            Some(Route::first_page(ListingQuery::new(window_days, None)))
        }
        FilterEvent::InputEdited => None,
        FilterEvent::WindowChanged => Some(Route::first_page(ListingQuery::new(
            window_days,
            active.domain.clone(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_first_page() {
        assert_eq!(Route::parse("/"), Route::first_page(ListingQuery::default()));
        assert_eq!(Route::parse(""), Route::first_page(ListingQuery::default()));
    }

    #[test]
    fn listing_with_filters() {
        assert_eq!(
            Route::parse("/3?time=7&domain=github.com"),
            Route::Listing {
                page: 3,
                query: ListingQuery::new(7, Some("github.com".into())),
            }
        );
    }

    #[test]
    fn time_is_clamped_and_defaulted() {
        let window = |path: &str| match Route::parse(path) {
            Route::Listing { query, .. } => query.window_days,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(window("/1?time=90"), 30);
        assert_eq!(window("/1?time=-4"), 1);
        assert_eq!(window("/1?time=0"), 30);
        assert_eq!(window("/1?time=soon"), 30);
        assert_eq!(window("/1"), 30);
    }

    #[test]
    fn domain_is_decoded_and_blank_dropped() {
        match Route::parse("/1?domain=my%20site.org") {
            Route::Listing { query, .. } => assert_eq!(query.domain.as_deref(), Some("my site.org")),
            other => panic!("unexpected {other:?}"),
        }
        match Route::parse("/1?domain=") {
            Route::Listing { query, .. } => assert_eq!(query.domain, None),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_page_tokens_are_not_found() {
        assert!(matches!(Route::parse("/abc"), Route::NotFound { .. }));
        assert!(matches!(Route::parse("/item"), Route::NotFound { .. }));
        assert!(matches!(Route::parse("/1/2"), Route::NotFound { .. }));
    }

    #[test]
    fn out_of_range_pages_still_parse() {
        assert!(matches!(Route::parse("/0"), Route::Listing { page: 0, .. }));
        assert!(matches!(Route::parse("/-2"), Route::Listing { page: -2, .. }));
    }

    #[test]
    fn item_route() {
        assert_eq!(Route::parse("/item/12345"), Route::Item { id: "12345".into() });
    }

    #[test]
    fn paths_parse_back() {
        let routes = [
            Route::Listing {
                page: 2,
                query: ListingQuery::new(5, Some("a b.com".into())),
            },
            Route::Item { id: "77".into() },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.to_path()), route);
        }
    }

    #[test]
    fn blank_apply_does_nothing() {
        let active = ListingQuery::new(7, Some("github.com".into()));
        assert_eq!(filter_route(FilterEvent::Applied, "", &active, 7), None);
        assert_eq!(filter_route(FilterEvent::Applied, "   ", &ListingQuery::default(), 30), None);
    }

    #[test]
    fn apply_goes_to_first_page_with_trimmed_domain() {
        let route = filter_route(FilterEvent::Applied, "  medium.com ", &ListingQuery::default(), 12);
        assert_eq!(
            route,
            Some(Route::Listing {
                page: 1,
                query: ListingQuery::new(12, Some("medium.com".into())),
            })
        );
    }

    #[test]
    fn clearing_an_active_filter_drops_the_domain() {
        let active = ListingQuery::new(7, Some("github.com".into()));
        let route = filter_route(FilterEvent::InputEdited, "", &active, 7).unwrap();
        assert_eq!(route.to_path(), "/1?time=7");
    }

    #[test]
    fn editing_without_an_active_filter_stays_put() {
        let active = ListingQuery::default();
        assert_eq!(filter_route(FilterEvent::InputEdited, "", &active, 30), None);
        assert_eq!(filter_route(FilterEvent::InputEdited, "git", &active, 30), None);
        let filtered = ListingQuery::new(30, Some("github.com".into()));
        assert_eq!(filter_route(FilterEvent::InputEdited, "githu", &filtered, 30), None);
    }

    #[test]
    fn slider_keeps_the_active_domain() {
        let active = ListingQuery::new(30, Some("github.com".into()));
        // typed but not applied text does not leak into the route
        let route = filter_route(FilterEvent::WindowChanged, "other.org", &active, 3).unwrap();
        assert_eq!(route.to_path(), "/1?time=3&domain=github.com");
    }
}
