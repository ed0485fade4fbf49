//! Loyalty points lookup

use salvo::prelude::*;
use serde::Deserialize;
use tracing::error;
use washbay::html::escape;
use washbay_app::domain::loyalty::LoyaltyServiceError;

use crate::{
    extensions::DepotExt,
    pages::layout::{Level, Page},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoyaltyForm {
    phone: String,
}

fn page(phone: &str, points: Option<u32>) -> Page {
    let result = points
        .map(|points| {
            format!(
                "<p class=\"points\">{} has <strong>{points}</strong> loyalty points.</p>",
                escape(phone)
            )
        })
        .unwrap_or_default();

    Page::new(
        "Loyalty",
        format!(
            "<h1>Loyalty points</h1>\n<p>Every booking earns one point.</p>\n\
             <form method=\"post\" action=\"/loyalty\">\
             <label>Phone <input type=\"tel\" name=\"phone\" value=\"{}\" required></label> \
             <button type=\"submit\">Check</button></form>\n{result}",
            escape(phone)
        ),
    )
}

#[handler]
pub(crate) async fn get(depot: &mut Depot, res: &mut Response) {
    page("", None).render(depot, res);
}

#[handler]
pub(crate) async fn post(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let form = req.parse_form::<LoyaltyForm>().await.unwrap_or_default();
    let phone = form.phone.trim().to_string();

    let rendered = match state.app.loyalty.points(phone.clone()).await {
        Ok(Some(points)) => page(&phone, Some(points)),
        Ok(None) => page(&phone, None).notice(
            Level::Warning,
            "No loyalty points found for this phone number.",
        ),
        Err(LoyaltyServiceError::MissingPhone) => {
            page("", None).notice(Level::Warning, "Please enter your phone number.")
        }
        Err(source) => {
            error!("failed to fetch loyalty points: {source}");

            page(&phone, None).notice(Level::Error, "Error fetching loyalty points.")
        }
    };

    rendered.render(depot, res);

    Ok(())
}
