//! Issuing, validating and applying promo codes end to end, without storage.

use jiff::civil::date;
use rand::{SeedableRng, rngs::StdRng};
use testresult::TestResult;

use washbay::{
    bookings::BookingForm,
    pricing::{Quote, quote},
    promotions::{PromoCode, PromoValidation, PromotionRules, Rejection},
};

const LOCATION: &str = "Hyderabad Kukatpally Nexus Mall";

#[test]
fn issued_code_is_valid_until_its_last_day() -> TestResult {
    let rules = PromotionRules::default();
    let mut rng = StdRng::seed_from_u64(2026);
    let issued_on = date(2026, 10, 14);

    let promo = rules.draw(&mut rng, Some(LOCATION), issued_on)?;

    for today in [issued_on, date(2026, 10, 15), date(2026, 10, 17)] {
        assert_eq!(
            PromoValidation::evaluate(Some(&promo), today),
            PromoValidation::Valid {
                discount: promo.discount
            },
            "code should be valid on {today}"
        );
    }

    assert_eq!(
        PromoValidation::evaluate(Some(&promo), date(2026, 10, 18)),
        PromoValidation::Rejected(Rejection::Expired)
    );

    Ok(())
}

#[test]
fn discount_applies_to_listed_price() -> TestResult {
    let promo = PromoCode {
        code: "PROMO1".to_string(),
        discount: 20,
        expiry_date: date(2026, 10, 15),
        location: Some(LOCATION.to_string()),
    };

    let request = BookingForm {
        name: "Asha".to_string(),
        phone: "9000000001".to_string(),
        service_type: "Normal Wash".to_string(),
        car_size: "Big".to_string(),
        date: "2026-10-20".to_string(),
        time: "09:00".to_string(),
        location: LOCATION.to_string(),
        promo_code: "PROMO1".to_string(),
        ..BookingForm::default()
    }
    .validate(LOCATION)?;

    let price = quote(&request.service_type, &request.car_size);
    let discount = PromoValidation::evaluate(Some(&promo), date(2026, 10, 14))
        .discount()
        .unwrap_or_default();

    assert_eq!(price, Quote::Fixed(800));
    assert_eq!(price.after_discount(discount), Quote::Fixed(780));

    Ok(())
}
