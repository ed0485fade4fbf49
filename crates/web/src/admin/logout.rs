//! Admin logout

use salvo::{flash::FlashDepotExt, prelude::*, session::SessionDepotExt};

use crate::admin::ADMIN_SESSION_KEY;

#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) {
    if let Some(session) = depot.session_mut() {
        session.remove(ADMIN_SESSION_KEY);
    }

    depot.outgoing_flash_mut().success("Logged out successfully.");

    res.render(Redirect::other("/admin/login"));
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{TestState, flashed, location, site_service};

    #[tokio::test]
    async fn logout_returns_to_login() -> TestResult {
        let service = site_service(TestState::default())?;

        let res = TestClient::get("http://example.com/admin/logout")
            .send(&service)
            .await;

        assert_eq!(location(&res), "/admin/login");

        let body = flashed(&res, &service).await?;

        assert!(body.contains("Logged out successfully."), "expected flash in {body}");

        Ok(())
    }
}
