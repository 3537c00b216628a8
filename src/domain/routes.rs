//! Route descriptors and endpoint-label resolution.
//!
//! Metrics label every request by the route *template* that handled it
//! (`/items/{item_id}`), not the literal path, so a million distinct item
//! ids collapse into one time series. The table is built once at startup
//! from the same list the router is registered with and never mutated.

use axum::http::Method;

/// One registered route: a path template plus the methods it accepts.
///
/// Templates use axum's brace syntax for path parameters
/// (`/items/{item_id}`). A parameter segment matches exactly one non-empty
/// path segment.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    template: String,
    allowed_methods: Vec<Method>,
}

impl RouteDescriptor {
    // ---
    pub fn new(template: impl Into<String>, allowed_methods: &[Method]) -> Self {
        Self {
            template: template.into(),
            allowed_methods: allowed_methods.to_vec(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    fn allows(&self, method: &Method) -> bool {
        self.allowed_methods.contains(method)
    }

    /// Full-match test: every template segment must match the corresponding
    /// path segment, and the segment counts must agree. Prefix matches do
    /// not count.
    fn matches(&self, path: &str) -> bool {
        let mut template_segments = self.template.split('/');
        let mut path_segments = path.split('/');

        loop {
            match (template_segments.next(), path_segments.next()) {
                (None, None) => return true,
                (Some(template_segment), Some(path_segment)) => {
                    if !segment_matches(template_segment, path_segment) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

fn segment_matches(template_segment: &str, path_segment: &str) -> bool {
    if template_segment.starts_with('{') && template_segment.ends_with('}') {
        !path_segment.is_empty()
    } else {
        template_segment == path_segment
    }
}

/// Immutable list of route descriptors, captured at startup.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    // ---
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Resolve a request to its endpoint label.
    ///
    /// Routes are checked in registration order and the first descriptor
    /// whose method set and template both match wins; overlapping templates
    /// are tie-broken by registration order. Requests that match no route
    /// keep their raw path as the label, so 404 traffic stays visible.
    pub fn resolve(&self, method: &Method, path: &str) -> String {
        self.routes
            .iter()
            .find(|route| route.allows(method) && route.matches(path))
            .map(|route| route.template.clone())
            .unwrap_or_else(|| path.to_string())
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn table() -> RouteTable {
        // ---
        RouteTable::new(vec![
            RouteDescriptor::new("/health", &[Method::GET]),
            RouteDescriptor::new("/items", &[Method::GET, Method::POST]),
            RouteDescriptor::new("/items/{item_id}", &[Method::GET, Method::DELETE]),
        ])
    }

    #[test]
    fn literal_route_resolves_to_itself() {
        // ---
        assert_eq!(table().resolve(&Method::GET, "/health"), "/health");
    }

    #[test]
    fn parameterized_route_resolves_to_template() {
        // ---
        let table = table();
        assert_eq!(table.resolve(&Method::GET, "/items/42"), "/items/{item_id}");
        assert_eq!(table.resolve(&Method::GET, "/items/7"), "/items/{item_id}");
        assert_eq!(
            table.resolve(&Method::DELETE, "/items/9001"),
            "/items/{item_id}"
        );
    }

    #[test]
    fn method_must_match_for_template_label() {
        // ---
        // PUT is not registered for /items/{item_id}, so the raw path wins.
        assert_eq!(table().resolve(&Method::PUT, "/items/42"), "/items/42");
    }

    #[test]
    fn unmatched_path_falls_back_to_raw_path() {
        // ---
        let table = table();
        assert_eq!(table.resolve(&Method::GET, "/nope"), "/nope");
        assert_eq!(
            table.resolve(&Method::GET, "/items/42/extra"),
            "/items/42/extra"
        );
    }

    #[test]
    fn prefix_match_is_not_a_full_match() {
        // ---
        // "/items" must not claim "/items/42" and vice versa.
        let table = table();
        assert_eq!(table.resolve(&Method::GET, "/items"), "/items");
        // Trailing slash leaves an empty segment, which a parameter
        // placeholder does not accept.
        assert_eq!(table.resolve(&Method::GET, "/items/"), "/items/");
    }

    #[test]
    fn first_registration_wins_on_overlap() {
        // ---
        let table = RouteTable::new(vec![
            RouteDescriptor::new("/items/special", &[Method::GET]),
            RouteDescriptor::new("/items/{item_id}", &[Method::GET]),
        ]);
        assert_eq!(table.resolve(&Method::GET, "/items/special"), "/items/special");
        assert_eq!(table.resolve(&Method::GET, "/items/42"), "/items/{item_id}");

        // Reversed registration order flips the tie-break.
        let table = RouteTable::new(vec![
            RouteDescriptor::new("/items/{item_id}", &[Method::GET]),
            RouteDescriptor::new("/items/special", &[Method::GET]),
        ]);
        assert_eq!(
            table.resolve(&Method::GET, "/items/special"),
            "/items/{item_id}"
        );
    }
}
