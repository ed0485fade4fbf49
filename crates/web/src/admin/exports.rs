//! CSV export downloads

use salvo::{
    flash::FlashDepotExt,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderValue},
    prelude::*,
};
use tracing::{error, info};
use washbay_app::exports::{ExportKind, export};

use crate::extensions::{DepotExt, ResultExt as _};

fn parse_kind(raw: &str) -> Option<ExportKind> {
    match raw {
        "bookings" => Some(ExportKind::Bookings),
        "reviews" => Some(ExportKind::Reviews),
        "loyalty" => Some(ExportKind::Loyalty),
        "promotions" => Some(ExportKind::Promotions),
        _ => None,
    }
}

#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let kind = req
        .param::<String>("kind")
        .as_deref()
        .and_then(parse_kind)
        .ok_or_else(StatusError::not_found)?;

    let state = depot.state()?;
    let admin = depot.admin()?.clone();

    match export(&state.app, &admin, kind).await {
        Ok(csv) => {
            info!(admin = admin.username(), file = kind.file_name(), "export downloaded");

            let disposition =
                HeaderValue::from_str(&format!("attachment; filename=\"{}\"", kind.file_name()))
                    .or_500("failed to encode content disposition")?;

            res.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            );
            res.headers_mut().insert(CONTENT_DISPOSITION, disposition);
            res.body(csv);
        }
        Err(source) => {
            error!("failed to export {}: {source}", kind.file_name());

            depot
                .outgoing_flash_mut()
                .error(format!("Failed to export {}.", kind.file_name()));

            res.render(Redirect::other("/admin"));
        }
    }

    Ok(())
}
