//! Promo codes issued from the dashboard

use salvo::{flash::FlashDepotExt, prelude::*};
use serde::Deserialize;
use tracing::{error, info};

use crate::extensions::DepotExt;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IssueForm {
    /// Issue a code valid at every location.
    unscoped: bool,
}

#[handler]
pub(crate) async fn issue(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let admin = depot.admin()?.clone();
    let today = depot.today();
    let form = req.parse_form::<IssueForm>().await.unwrap_or_default();

    let location = (!form.unscoped).then(|| state.app.settings.service_location.clone());

    let result = state.app.promotions.issue_code(location, today).await;

    match result {
        Ok(record) => {
            let promo = record.promo;

            info!(admin = admin.username(), code = %promo.code, "promo code issued");

            depot.outgoing_flash_mut().success(format!(
                "Promo code {} generated! ₹{} off valid until {}.",
                promo.code, promo.discount, promo.expiry_date
            ));
        }
        Err(source) => {
            error!("failed to issue promo code: {source}");

            depot.outgoing_flash_mut().error("Error creating promo code.");
        }
    }

    res.render(Redirect::other("/admin"));

    Ok(())
}
