//! App Router

use std::{sync::Arc, time::Duration};

use salvo::{
    affix_state::inject,
    flash::CookieStore as FlashCookieStore,
    prelude::*,
    session::{CookieStore, SessionHandler},
    trailing_slash::remove_slash,
};
use thiserror::Error;

use crate::{
    admin, healthcheck,
    observability::{metrics_handler, request_logging},
    pages::{booking, calculator, home, info, loyalty, promotions, reviews, track},
    state::State,
};

/// Name of the signed admin session cookie.
pub(crate) const SESSION_COOKIE: &str = "washbay.session";

/// How long an admin stays logged in.
const SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

#[derive(Debug, Error)]
pub(crate) enum RouterError {
    #[error("failed to build session handler: {0}")]
    Session(String),
}

pub(crate) fn app_router(state: Arc<State>, session_secret: &[u8]) -> Result<Router, RouterError> {
    let session = SessionHandler::builder(CookieStore::new(), session_secret)
        .cookie_name(SESSION_COOKIE)
        .session_ttl(Some(SESSION_TTL))
        .build()
        .map_err(|error| RouterError::Session(error.to_string()))?;

    Ok(Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(session)
        .hoop(FlashCookieStore::new().into_handler())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(site_router())
        .push(admin::router()))
}

fn site_router() -> Router {
    Router::new()
        .get(home::handler)
        .push(Router::with_path("home").get(home::handler))
        .push(Router::with_path("services").get(info::services))
        .push(Router::with_path("contact").get(info::contact))
        .push(Router::with_path("faq").get(info::faq))
        .push(Router::with_path("terms").get(info::terms))
        .push(
            Router::with_path("booking")
                .get(booking::get)
                .post(booking::post),
        )
        .push(Router::with_path("track").get(track::get).post(track::post))
        .push(
            Router::with_path("reviews")
                .get(reviews::get)
                .post(reviews::post),
        )
        .push(
            Router::with_path("loyalty")
                .get(loyalty::get)
                .post(loyalty::post),
        )
        .push(
            Router::with_path("calculator")
                .get(calculator::get)
                .post(calculator::post),
        )
        .push(
            Router::with_path("promotions")
                .get(promotions::get)
                .post(promotions::post),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{TestState, site_service};

    #[tokio::test]
    async fn static_pages_render() -> TestResult {
        let service = site_service(TestState::default())?;

        for path in ["/", "/home", "/services", "/contact", "/faq", "/terms", "/booking"] {
            let mut res = TestClient::get(format!("http://example.com{path}"))
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::OK), "GET {path}");

            let body = res.take_string().await?;

            assert!(body.contains("<nav>"), "expected page shell for {path}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn services_page_lists_prices() -> TestResult {
        let body = TestClient::get("http://example.com/services")
            .send(&site_service(TestState::default())?)
            .await
            .take_string()
            .await?;

        assert!(body.contains("₹800"), "expected price table in {body}");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> TestResult {
        let res = TestClient::get("http://example.com/wp-login.php")
            .send(&site_service(TestState::default())?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
