//! Static information pages

use std::fmt::Write as _;

use salvo::prelude::*;
use washbay::{
    html::escape,
    pricing::{Quote, car_sizes, quote, service_types},
};

use crate::{extensions::DepotExt, pages::layout::Page};

#[handler]
pub(crate) async fn services(depot: &mut Depot, res: &mut Response) {
    let mut rows = String::new();

    for service in service_types() {
        for size in car_sizes() {
            let price = quote(service, size);

            if let Quote::Fixed(_) = price {
                _ = write!(rows, "<tr><td>{service}</td><td>{size}</td><td>{price}</td></tr>");
            }
        }
    }

    let body = format!(
        "<h1>Our services</h1>\n\
         <p>Normal Wash covers the exterior and interior. Body Wash is exterior only.</p>\n\
         <table><thead><tr><th>Service</th><th>Car size</th><th>Price</th></tr></thead>\
         <tbody>{rows}</tbody></table>"
    );

    Page::new("Services", body).render(depot, res);
}

#[handler]
pub(crate) async fn contact(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let location = escape(&depot.state()?.app.settings.service_location);

    let body = format!(
        "<h1>Contact us</h1>\n<p>Find us at {location}.</p>\n\
         <p>Use your booking ID on the <a href=\"/track\">tracking page</a> for booking questions.</p>"
    );

    Page::new("Contact", body).render(depot, res);

    Ok(())
}

#[handler]
pub(crate) async fn faq(depot: &mut Depot, res: &mut Response) {
    let body = "<h1>Frequently asked questions</h1>\n\
         <h2>Do I need an email address to book?</h2><p>No. Without one you will not get a confirmation email, so keep your booking ID.</p>\n\
         <h2>How do promo codes work?</h2><p>Each code takes a flat rupee amount off the listed price and can be used until the end of its expiry date.</p>\n\
         <h2>How do loyalty points work?</h2><p>Every booking earns one point on the phone number it was made with.</p>";

    Page::new("FAQ", body).render(depot, res);
}

#[handler]
pub(crate) async fn terms(depot: &mut Depot, res: &mut Response) {
    let body = "<h1>Terms</h1>\n\
         <p>Prices are listed in rupees and are settled at the wash bay. \
         Combinations without a listed price are quoted by our staff on arrival.</p>\n\
         <p>Promo code discounts never take a price below zero.</p>";

    Page::new("Terms", body).render(depot, res);
}
