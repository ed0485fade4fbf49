//! Admin login

use salvo::{prelude::*, session::{Session, SessionDepotExt}};
use serde::Deserialize;
use tracing::{info, warn};
use washbay::html::escape;
use washbay_app::auth::AdminAuthError;

use crate::{
    admin::ADMIN_SESSION_KEY,
    extensions::{DepotExt, ResultExt as _},
    pages::layout::{Level, Page},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginForm {
    username: String,
    password: String,
}

fn page(username: &str) -> Page {
    Page::new(
        "Admin login",
        format!(
            "<h1>Admin login</h1>\n\
             <form method=\"post\" action=\"/admin/login\">\
             <label>Username <input name=\"username\" value=\"{}\" required></label> \
             <label>Password <input type=\"password\" name=\"password\" required></label> \
             <button type=\"submit\">Log in</button></form>",
            escape(username)
        ),
    )
}

#[handler]
pub(crate) async fn get(depot: &mut Depot, res: &mut Response) {
    page("").render(depot, res);
}

#[handler]
pub(crate) async fn post(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let form = req.parse_form::<LoginForm>().await.unwrap_or_default();

    match state.admin.authenticate(form.username.trim(), &form.password) {
        Ok(principal) => {
            let mut session = Session::new();

            session
                .insert(ADMIN_SESSION_KEY, principal.username())
                .or_500("failed to store admin session")?;

            depot.set_session(session);

            info!(admin = principal.username(), "admin logged in");

            res.render(Redirect::other("/admin"));
        }
        Err(AdminAuthError::NotConfigured) => {
            warn!("admin login attempted without configured credentials");

            page(&form.username)
                .notice(Level::Error, "Admin login is not configured.")
                .render(depot, res);
        }
        Err(AdminAuthError::InvalidCredentials) => {
            warn!(username = %form.username, "admin login rejected");

            res.status_code(StatusCode::UNAUTHORIZED);

            page(&form.username)
                .notice(Level::Error, "Invalid credentials")
                .render(depot, res);
        }
    }

    Ok(())
}
