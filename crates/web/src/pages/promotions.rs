//! Public promo code offers

use salvo::prelude::*;
use serde::Deserialize;
use tracing::error;
use washbay::{html::escape, promotions::PromoValidation};

use crate::{
    extensions::DepotExt,
    pages::layout::{Level, Page},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PromotionForm {
    action: String,
    promo_code: String,
}

fn page(issued: Option<String>) -> Page {
    Page::new(
        "Offers",
        format!(
            "<h1>Offers</h1>\n\
             <form method=\"post\" action=\"/promotions\">\
             <input type=\"hidden\" name=\"action\" value=\"generate\">\
             <button type=\"submit\">Get a promo code</button></form>\n\
             <form method=\"post\" action=\"/promotions\">\
             <input type=\"hidden\" name=\"action\" value=\"validate\">\
             <label>Promo code <input name=\"promo_code\" required></label> \
             <button type=\"submit\">Check code</button></form>\n{}",
            issued.unwrap_or_default()
        ),
    )
}

#[handler]
pub(crate) async fn get(depot: &mut Depot, res: &mut Response) {
    page(None).render(depot, res);
}

#[handler]
pub(crate) async fn post(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let today = depot.today();
    let form = req.parse_form::<PromotionForm>().await.unwrap_or_default();
    let location = state.app.settings.service_location.clone();

    let rendered = match form.action.as_str() {
        "generate" => match state.app.promotions.issue_code(Some(location), today).await {
            Ok(record) => {
                let promo = record.promo;

                page(Some(format!(
                    "<p class=\"promo\"><strong>{}</strong>: ₹{} off until {}</p>",
                    escape(&promo.code),
                    promo.discount,
                    promo.expiry_date
                )))
                .notice(
                    Level::Success,
                    format!(
                        "Promo code {} generated! ₹{} off valid until {}.",
                        promo.code, promo.discount, promo.expiry_date
                    ),
                )
            }
            Err(source) => {
                error!("failed to issue promo code: {source}");

                page(None).notice(Level::Error, "Error creating promo code.")
            }
        },
        "validate" if form.promo_code.trim().is_empty() => {
            page(None).notice(Level::Warning, "Please enter a promo code.")
        }
        "validate" => match state
            .app
            .promotions
            .validate_code(Some(form.promo_code), Some(location), today)
            .await
        {
            Ok(PromoValidation::Valid { discount }) => page(None).notice(
                Level::Success,
                format!("Promo code valid! ₹{discount} off your next booking."),
            ),
            Ok(PromoValidation::Rejected(_)) => {
                page(None).notice(Level::Error, "Invalid or expired promo code.")
            }
            Err(source) => {
                error!("failed to validate promo code: {source}");

                page(None).notice(Level::Error, "Error validating promo code.")
            }
        },
        _ => {
            res.status_code(StatusCode::BAD_REQUEST);

            page(None).notice(Level::Warning, "Unknown action.")
        }
    };

    rendered.render(depot, res);

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use washbay::promotions::{PromoCode, PromoValidation, Rejection};
    use washbay_app::domain::promotions::records::PromotionRecord;

    use crate::test_helpers::{TODAY, TestState, site_service};

    const LOCATION: &str = "Hyderabad Kukatpally Nexus Mall";

    #[tokio::test]
    async fn generate_issues_code_for_service_location() -> TestResult {
        let mut state = TestState::default();

        state
            .promotions
            .expect_issue_code()
            .withf(|location, today| location.as_deref() == Some(LOCATION) && *today == TODAY)
            .times(1)
            .return_once(|location, _| {
                Ok(PromotionRecord {
                    id: 1,
                    promo: PromoCode {
                        code: "AB12CD34".to_string(),
                        discount: 25,
                        expiry_date: date(2026, 10, 17),
                        location,
                    },
                })
            });

        let body = TestClient::post("http://example.com/promotions")
            .form(&[("action", "generate")])
            .send(&site_service(state)?)
            .await
            .take_string()
            .await?;

        assert!(
            body.contains("Promo code AB12CD34 generated! ₹25 off valid until 2026-10-17."),
            "expected issue notice in {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn validate_reports_rejection() -> TestResult {
        let mut state = TestState::default();

        state
            .promotions
            .expect_validate_code()
            .withf(|code, location, _| {
                code.as_deref() == Some("OLDCODE1") && location.as_deref() == Some(LOCATION)
            })
            .times(1)
            .return_once(|_, _, _| Ok(PromoValidation::Rejected(Rejection::Expired)));

        let body = TestClient::post("http://example.com/promotions")
            .form(&[("action", "validate"), ("promo_code", "OLDCODE1")])
            .send(&site_service(state)?)
            .await
            .take_string()
            .await?;

        assert!(body.contains("Invalid or expired promo code."), "expected rejection in {body}");

        Ok(())
    }

    #[tokio::test]
    async fn validate_reports_discount() -> TestResult {
        let mut state = TestState::default();

        state
            .promotions
            .expect_validate_code()
            .times(1)
            .return_once(|_, _, _| Ok(PromoValidation::Valid { discount: 30 }));

        let body = TestClient::post("http://example.com/promotions")
            .form(&[("action", "validate"), ("promo_code", "AB12CD34")])
            .send(&site_service(state)?)
            .await
            .take_string()
            .await?;

        assert!(
            body.contains("Promo code valid! ₹30 off your next booking."),
            "expected discount in {body}"
        );

        Ok(())
    }
}
