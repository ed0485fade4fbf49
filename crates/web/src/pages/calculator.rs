//! Price calculator

use salvo::prelude::*;
use serde::Deserialize;
use washbay::{
    html::escape,
    pricing::{car_sizes, quote, service_types},
};

use crate::pages::layout::{Page, options};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CalculatorForm {
    service_type: String,
    car_type: String,
}

fn page(form: &CalculatorForm, fee: Option<String>) -> Page {
    let result = fee
        .map(|fee| format!("<p class=\"fee\">Estimated fee: <strong>{}</strong></p>", escape(&fee)))
        .unwrap_or_default();

    Page::new(
        "Price calculator",
        format!(
            "<h1>Price calculator</h1>\n\
             <form method=\"post\" action=\"/calculator\">\
             <label>Service <select name=\"service_type\">{}</select></label> \
             <label>Car size <select name=\"car_type\">{}</select></label> \
             <button type=\"submit\">Calculate</button></form>\n{result}",
            options(&service_types(), &form.service_type),
            options(&car_sizes(), &form.car_type),
        ),
    )
}

#[handler]
pub(crate) async fn get(depot: &mut Depot, res: &mut Response) {
    page(&CalculatorForm::default(), None).render(depot, res);
}

#[handler]
pub(crate) async fn post(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let form = req
        .parse_form::<CalculatorForm>()
        .await
        .unwrap_or_default();

    let fee = quote(form.service_type.trim(), form.car_type.trim()).to_string();

    page(&form, Some(fee)).render(depot, res);
}
