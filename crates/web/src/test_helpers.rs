//! Test helpers.

use std::sync::Arc;

use jiff::civil::{Date, date};
use salvo::{
    affix_state::inject,
    http::header::LOCATION,
    prelude::*,
    test::{ResponseExt, TestClient},
};
use washbay::pricing::Quote;
use washbay_app::{
    auth::AdminCredentials,
    context::AppContext,
    domain::{
        bookings::{MockBookingsService, records::BookingRecord},
        loyalty::MockLoyaltyService,
        promotions::MockPromotionsService,
        reviews::MockReviewsService,
    },
    notifications::MockNotifier,
    settings::AppSettings,
    workflow::MockBookingWorkflow,
};

use crate::{
    extensions::Today,
    router::{self, RouterError},
    state::State,
};

pub(crate) const TODAY: Date = date(2026, 10, 14);

pub(crate) const ADMIN_PASSWORD: &str = "admin123";

const SESSION_SECRET: &[u8; 64] = b"washbay-test-session-secret-0123456789abcdef0123456789abcdef0123";

/// Mocked services behind the router. A mock without expectations fails
/// the test if a handler calls it.
#[derive(Default)]
pub(crate) struct TestState {
    pub(crate) promotions: MockPromotionsService,
    pub(crate) bookings: MockBookingsService,
    pub(crate) loyalty: MockLoyaltyService,
    pub(crate) reviews: MockReviewsService,
    pub(crate) workflow: MockBookingWorkflow,
    pub(crate) settings: AppSettings,
}

impl TestState {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            settings: Arc::new(self.settings),
            promotions: Arc::new(self.promotions),
            bookings: Arc::new(self.bookings),
            loyalty: Arc::new(self.loyalty),
            reviews: Arc::new(self.reviews),
            workflow: Arc::new(self.workflow),
            notifier: Arc::new(MockNotifier::new()),
        };

        State::shared(app, AdminCredentials::from_plaintext("admin", ADMIN_PASSWORD))
    }
}

pub(crate) fn site_service(state: TestState) -> Result<Service, RouterError> {
    let router = router::app_router(state.into_state(), SESSION_SECRET)?;

    Ok(Service::new(
        Router::new().hoop(inject(Today(TODAY))).push(router),
    ))
}

pub(crate) fn booking_record(booking_id: &str) -> BookingRecord {
    BookingRecord {
        id: 1,
        booking_id: booking_id.to_string(),
        name: "Asha".to_string(),
        email: None,
        phone: "9000000001".to_string(),
        car_model: "Swift".to_string(),
        service_type: "Normal Wash".to_string(),
        date: "2026-10-20".to_string(),
        time: "10:00".to_string(),
        car_size: "Big".to_string(),
        location: "Hyderabad Kukatpally Nexus Mall".to_string(),
        promo_code: None,
        discount: 0,
        price: Quote::Fixed(800),
        status: "Booked".to_string(),
    }
}

/// The redirect target of a response.
pub(crate) fn location(res: &Response) -> String {
    res.headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Cookies set by a response, as a `cookie` request header value.
///
/// Read from the response cookie jar: `TestClient::send` copies the jar
/// into a single `set-cookie` header, keeping only one cookie.
pub(crate) fn cookies(res: &Response) -> String {
    res.cookies()
        .delta()
        .map(|cookie| cookie.encoded().stripped().to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render a page with the flash a response left behind.
pub(crate) async fn flashed(res: &Response, service: &Service) -> Result<String, salvo::Error> {
    TestClient::get("http://example.com/faq")
        .add_header("cookie", cookies(res), true)
        .send(service)
        .await
        .take_string()
        .await
}

/// A client holding a logged-in admin session.
pub(crate) struct AdminClient {
    service: Service,
    session: String,
}

impl AdminClient {
    pub(crate) fn service(&self) -> &Service {
        &self.service
    }

    pub(crate) async fn get(&self, url: &str) -> Response {
        TestClient::get(url)
            .add_header("cookie", &self.session, true)
            .send(&self.service)
            .await
    }

    pub(crate) async fn post(&self, url: &str, form: &[(&str, &str)]) -> Response {
        TestClient::post(url)
            .add_header("cookie", &self.session, true)
            .form(&form)
            .send(&self.service)
            .await
    }
}

/// Log in through the login form and keep the session cookie.
pub(crate) async fn admin_service(state: TestState) -> Result<AdminClient, RouterError> {
    let service = site_service(state)?;

    let res = TestClient::post("http://example.com/admin/login")
        .form(&[("username", "admin"), ("password", ADMIN_PASSWORD)])
        .send(&service)
        .await;

    Ok(AdminClient {
        service,
        session: cookies(&res),
    })
}
