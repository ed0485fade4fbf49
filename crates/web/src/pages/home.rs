//! Landing page

use salvo::prelude::*;
use washbay::html::escape;

use crate::{extensions::DepotExt, pages::layout::Page};

#[handler]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state()?;
    let location = escape(&state.app.settings.service_location);

    let body = format!(
        "<h1>Washbay Car Care</h1>\n\
         <p>Hand car washes at {location}. Book a slot, bring your car, and we will do the rest.</p>\n\
         <p><a href=\"/booking\">Book a wash</a> or <a href=\"/calculator\">check our prices</a>.</p>"
    );

    Page::new("Home", body).render(depot, res);

    Ok(())
}
