//! Administrator dashboard

pub(crate) mod dashboard;
pub(crate) mod exports;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod middleware;
pub(crate) mod promotions;

use salvo::Router;

/// Session key holding the logged-in admin username.
pub(crate) const ADMIN_SESSION_KEY: &str = "admin_username";

pub(crate) fn router() -> Router {
    Router::with_path("admin")
        .push(
            Router::with_path("login")
                .get(login::get)
                .post(login::post),
        )
        .push(Router::with_path("logout").get(logout::handler))
        .push(
            Router::new()
                .hoop(middleware::require_admin)
                .get(dashboard::get)
                .post(dashboard::update_status)
                .push(Router::with_path("promotions").post(promotions::issue))
                .push(Router::with_path("export/{kind}").get(exports::handler)),
        )
}
