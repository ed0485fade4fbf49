//! Route labels for request spans and metrics.

/// Routes served by the site. Anything else is labelled `unmatched` so
/// scanners cannot inflate metric cardinality.
const KNOWN_ROUTES: &[&str] = &[
    "/",
    "/home",
    "/services",
    "/contact",
    "/faq",
    "/terms",
    "/booking",
    "/track",
    "/reviews",
    "/loyalty",
    "/calculator",
    "/promotions",
    "/healthcheck",
    "/admin",
    "/admin/login",
    "/admin/logout",
    "/admin/promotions",
];

pub(super) fn route_label(path: &str) -> String {
    if KNOWN_ROUTES.contains(&path) {
        return path.to_owned();
    }

    if path.starts_with("/admin/export/") {
        return "/admin/export/{kind}".to_owned();
    }

    "unmatched".to_owned()
}

#[cfg(test)]
mod tests {
    use super::route_label;

    #[test]
    fn known_routes_keep_their_path() {
        assert_eq!(route_label("/booking"), "/booking");
        assert_eq!(route_label("/"), "/");
    }

    #[test]
    fn export_kinds_share_one_label() {
        assert_eq!(route_label("/admin/export/bookings"), "/admin/export/{kind}");
        assert_eq!(route_label("/admin/export/nope"), "/admin/export/{kind}");
    }

    #[test]
    fn unknown_paths_are_unmatched() {
        assert_eq!(route_label("/wp-login.php"), "unmatched");
    }
}
