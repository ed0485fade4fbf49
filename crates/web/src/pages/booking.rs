//! Booking form and submission

use salvo::{flash::FlashDepotExt, prelude::*};
use tracing::{error, info, warn};
use washbay::{
    bookings::{BookingForm, BookingFormError},
    html::escape,
    pricing::{Quote, car_sizes, service_types},
    promotions::Rejection,
};
use washbay_app::{
    domain::promotions::PromotionsServiceError,
    workflow::{BookingConfirmation, FailureKind, SubmitBookingError},
};

use crate::{
    extensions::DepotExt,
    observability::{BookingOutcome, record_booking},
    pages::layout::{Page, options},
};

#[handler]
pub(crate) async fn get(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state()?;
    let location = escape(&state.app.settings.service_location);

    let body = format!(
        "<h1>Book a wash</h1>\n\
         <form method=\"post\" action=\"/booking\">\n\
         <label>Name* <input name=\"name\" required></label>\n\
         <label>Email <input type=\"email\" name=\"email\"></label>\n\
         <label>Phone* <input type=\"tel\" name=\"phone\" required></label>\n\
         <label>Car model <input name=\"car_model\"></label>\n\
         <label>Service* <select name=\"service_type\">{}</select></label>\n\
         <label>Car size <select name=\"car_size\">{}</select></label>\n\
         <label>Date* <input type=\"date\" name=\"date\" required></label>\n\
         <label>Time* <input type=\"time\" name=\"time\" required></label>\n\
         <label>Location <select name=\"location\"><option value=\"{location}\">{location}</option></select></label>\n\
         <label>Promo code <input name=\"promo_code\"></label>\n\
         <button type=\"submit\">Book now</button>\n</form>",
        options(&service_types(), ""),
        options(&car_sizes(), ""),
    );

    Page::new("Book a wash", body).render(depot, res);

    Ok(())
}

#[handler]
pub(crate) async fn post(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let today = depot.today();

    let form = match req.parse_form::<BookingForm>().await {
        Ok(form) => form,
        Err(source) => {
            warn!("unreadable booking form: {source}");

            BookingForm::default()
        }
    };

    match state.app.workflow.submit_booking(form, today).await {
        Ok(confirmation) => {
            record_booking(BookingOutcome::Accepted);

            let flash = depot.outgoing_flash_mut();

            flash.success(success_message(&confirmation));

            for warning in &confirmation.warnings {
                flash.warning(warning.clone());
            }

            res.render(Redirect::other(format!(
                "/track?booking_id={}",
                confirmation.booking_id()
            )));
        }
        Err(failure) => {
            let kind = failure.kind();

            record_booking(BookingOutcome::Failed(kind));

            if kind == FailureKind::Persistence {
                error!("booking submission failed: {failure}");
            } else {
                info!(kind = ?kind, "booking submission rejected: {failure}");
            }

            depot.outgoing_flash_mut().error(failure_message(&failure));

            res.render(Redirect::other("/booking"));
        }
    }

    Ok(())
}

fn success_message(confirmation: &BookingConfirmation) -> String {
    let total = match confirmation.booking.total() {
        Quote::Fixed(rupees) if confirmation.discount() > 0 => format!(
            "Total: ₹{rupees} after a ₹{} discount.",
            confirmation.discount()
        ),
        Quote::Fixed(rupees) => format!("Total: ₹{rupees}."),
        Quote::ContactForPricing => "Price: Contact for pricing.".to_string(),
    };

    format!(
        "Booking successful! Your Booking ID is {}. {total} You now have {} loyalty points.",
        confirmation.booking_id(),
        confirmation.loyalty_points
    )
}

fn failure_message(failure: &SubmitBookingError) -> String {
    match failure {
        SubmitBookingError::Invalid(BookingFormError::MissingFields(_)) => {
            "Please fill required fields (name, phone, service, date, time).".to_string()
        }
        SubmitBookingError::Invalid(BookingFormError::InvalidDate(_)) => {
            "Please choose a valid booking date.".to_string()
        }
        SubmitBookingError::Invalid(BookingFormError::UnsupportedLocation { expected }) => {
            format!("Bookings are only accepted near {expected}.")
        }
        SubmitBookingError::PromoRejected {
            rejection: Rejection::Expired,
            ..
        } => "Promo code expired.".to_string(),
        SubmitBookingError::PromoRejected {
            rejection: Rejection::UnknownCode,
            ..
        } => "Invalid promo code.".to_string(),
        SubmitBookingError::Promotions(PromotionsServiceError::MalformedExpiry(_)) => {
            "Promo code date format invalid on server.".to_string()
        }
        SubmitBookingError::Promotions(_) => "Error validating promo code.".to_string(),
        SubmitBookingError::SlotFull { .. } => {
            "That time slot is fully booked. Please choose another time.".to_string()
        }
        SubmitBookingError::BookingIdExhausted { .. } | SubmitBookingError::Storage(_) => {
            "Failed to save booking. Try again later.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::{http::StatusCode, test::TestClient};
    use testresult::TestResult;
    use washbay::{pricing::Quote, promotions::Rejection};
    use washbay_app::workflow::{
        BookingConfirmation, CONFIRMATION_EMAIL_FAILED, SubmitBookingError,
    };

    use crate::test_helpers::{TODAY, TestState, booking_record, flashed, location, site_service};

    fn booking_form() -> [(&'static str, &'static str); 9] {
        [
            ("name", "Asha"),
            ("phone", "9000000001"),
            ("car_model", "Swift"),
            ("service_type", "Normal Wash"),
            ("car_size", "Big"),
            ("date", "2026-10-20"),
            ("time", "10:00"),
            ("location", "Hyderabad Kukatpally Nexus Mall"),
            ("promo_code", "PROMO1"),
        ]
    }

    #[tokio::test]
    async fn accepted_booking_redirects_to_tracking() -> TestResult {
        let mut state = TestState::default();

        state
            .workflow
            .expect_submit_booking()
            .withf(|form, today| {
                form.name == "Asha" && form.promo_code == "PROMO1" && *today == TODAY
            })
            .times(1)
            .return_once(|_, _| {
                let mut booking = booking_record("ab12cd34");

                booking.discount = 20;

                Ok(BookingConfirmation {
                    booking,
                    loyalty_points: 2,
                    warnings: vec![CONFIRMATION_EMAIL_FAILED.to_string()],
                })
            });

        let service = site_service(state)?;

        let res = TestClient::post("http://example.com/booking")
            .form(&booking_form())
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location(&res), "/track?booking_id=ab12cd34");

        let body = flashed(&res, &service).await?;

        assert!(
            body.contains("Booking successful! Your Booking ID is ab12cd34."),
            "expected success flash in {body}"
        );
        assert!(body.contains("Total: ₹780 after a ₹20 discount."), "expected total in {body}");
        assert!(body.contains("2 loyalty points"), "expected points in {body}");
        assert!(
            body.contains("we could not email your confirmation"),
            "expected warning flash in {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_promo_returns_to_form() -> TestResult {
        let mut state = TestState::default();

        state
            .workflow
            .expect_submit_booking()
            .times(1)
            .return_once(|_, _| {
                Err(SubmitBookingError::PromoRejected {
                    code: "PROMO1".to_string(),
                    rejection: Rejection::Expired,
                })
            });

        let service = site_service(state)?;

        let res = TestClient::post("http://example.com/booking")
            .form(&booking_form())
            .send(&service)
            .await;

        assert_eq!(location(&res), "/booking");

        let body = flashed(&res, &service).await?;

        assert!(body.contains("Promo code expired."), "expected rejection in {body}");

        Ok(())
    }

    #[tokio::test]
    async fn full_slot_is_reported() -> TestResult {
        let mut state = TestState::default();

        state
            .workflow
            .expect_submit_booking()
            .times(1)
            .return_once(|_, _| Err(SubmitBookingError::SlotFull { capacity: 3 }));

        let service = site_service(state)?;

        let res = TestClient::post("http://example.com/booking")
            .form(&booking_form())
            .send(&service)
            .await;

        let body = flashed(&res, &service).await?;

        assert!(body.contains("fully booked"), "expected slot message in {body}");

        Ok(())
    }

    #[test]
    fn contact_for_pricing_confirmation_has_no_total() {
        let mut booking = booking_record("ab12cd34");

        booking.price = Quote::ContactForPricing;

        let message = super::success_message(&BookingConfirmation {
            booking,
            loyalty_points: 1,
            warnings: Vec::new(),
        });

        assert!(
            message.contains("Price: Contact for pricing."),
            "unexpected message {message}"
        );
    }
}
