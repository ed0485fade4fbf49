//! Admin session middleware

use salvo::{flash::FlashDepotExt, prelude::*, session::SessionDepotExt};
use tracing::debug;

use crate::{admin::ADMIN_SESSION_KEY, extensions::DepotExt};

/// Resolve the session's admin username into an `AdminPrincipal`, or send
/// the visitor to the login page.
#[handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) -> Result<(), StatusError> {
    let state = depot.state()?;

    let principal = depot
        .session()
        .and_then(|session| session.get::<String>(ADMIN_SESSION_KEY))
        .and_then(|username| state.admin.restore(&username));

    if let Some(principal) = principal {
        depot.inject(principal);
        ctrl.call_next(req, depot, res).await;

        return Ok(());
    }

    debug!(path = %req.uri().path(), "admin route without session");

    depot
        .outgoing_flash_mut()
        .warning("Please log in to access the dashboard.");

    res.render(Redirect::other("/admin/login"));
    ctrl.skip_rest();

    Ok(())
}
