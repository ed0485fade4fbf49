//! Page shell and notices.

use std::fmt::Write as _;

use salvo::{
    flash::{FlashDepotExt, FlashLevel},
    prelude::*,
};
use washbay::html::escape;

const NAV: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/services", "Services"),
    ("/booking", "Book"),
    ("/track", "Track"),
    ("/calculator", "Prices"),
    ("/promotions", "Offers"),
    ("/loyalty", "Loyalty"),
    ("/reviews", "Reviews"),
    ("/contact", "Contact"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    const fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl From<FlashLevel> for Level {
    fn from(level: FlashLevel) -> Self {
        match level {
            FlashLevel::Success => Self::Success,
            FlashLevel::Warning => Self::Warning,
            FlashLevel::Error => Self::Error,
            FlashLevel::Debug | FlashLevel::Info => Self::Info,
        }
    }
}

/// A one-off message shown above the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub(crate) level: Level,
    pub(crate) message: String,
}

impl Notice {
    pub(crate) fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// An HTML page under construction.
#[derive(Debug)]
pub(crate) struct Page {
    title: String,
    notices: Vec<Notice>,
    body: String,
}

impl Page {
    pub(crate) fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notices: Vec::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub(crate) fn notice(mut self, level: Level, message: impl Into<String>) -> Self {
        self.notices.push(Notice::new(level, message));
        self
    }

    /// Render with any flash carried over from the previous request first.
    pub(crate) fn render(self, depot: &mut Depot, res: &mut Response) {
        let mut notices: Vec<Notice> = depot
            .incoming_flash()
            .map(|flash| {
                flash
                    .iter()
                    .map(|message| Notice::new(message.level.into(), message.value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        notices.extend(self.notices);

        res.render(Text::Html(shell(&self.title, &notices, &self.body)));
    }
}

fn shell(title: &str, notices: &[Notice], body: &str) -> String {
    let mut html = String::new();

    _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} | Washbay</title>\n</head>\n<body>\n<nav>",
        escape(title)
    );

    for (href, label) in NAV {
        _ = write!(html, "<a href=\"{href}\">{label}</a> ");
    }

    html.push_str("</nav>\n<main>\n");

    for notice in notices {
        _ = writeln!(
            html,
            "<p class=\"flash flash-{}\">{}</p>",
            notice.level.class(),
            escape(&notice.message)
        );
    }

    html.push_str(body);
    html.push_str("\n</main>\n<footer><a href=\"/faq\">FAQ</a> <a href=\"/terms\">Terms</a></footer>\n</body>\n</html>\n");

    html
}

/// `<option>` list with `selected` on the current value.
pub(crate) fn options(values: &[&str], selected: &str) -> String {
    values
        .iter()
        .map(|value| {
            let marker = if *value == selected { " selected" } else { "" };
            let value = escape(value);

            format!("<option value=\"{value}\"{marker}>{value}</option>")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use salvo::{
        flash::CookieStore,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::cookies;

    use super::*;

    #[handler]
    async fn leave_notice(depot: &mut Depot, res: &mut Response) {
        depot.outgoing_flash_mut().warning("<b>Saved</b>");
        res.render(Redirect::other("/shown"));
    }

    #[handler]
    async fn shown(depot: &mut Depot, res: &mut Response) {
        Page::new("Shown", "<p>body</p>")
            .notice(Level::Info, "Page notice")
            .render(depot, res);
    }

    fn flash_service() -> Service {
        Service::new(
            Router::new()
                .hoop(CookieStore::new().into_handler())
                .push(Router::with_path("leave").post(leave_notice))
                .push(Router::with_path("shown").get(shown)),
        )
    }

    #[tokio::test]
    async fn carried_flash_renders_before_page_notices() -> TestResult {
        let service = flash_service();

        let res = TestClient::post("http://example.com/leave").send(&service).await;

        let body = TestClient::get("http://example.com/shown")
            .add_header("cookie", cookies(&res), true)
            .send(&service)
            .await
            .take_string()
            .await?;

        let flashed = body
            .find("flash-warning\">&lt;b&gt;Saved&lt;/b&gt;")
            .ok_or("flash notice missing")?;
        let notice = body.find("flash-info\">Page notice").ok_or("page notice missing")?;

        assert!(flashed < notice, "flash should come first in {body}");

        Ok(())
    }

    #[tokio::test]
    async fn page_without_flash_renders_its_own_notices() -> TestResult {
        let body = TestClient::get("http://example.com/shown")
            .send(&flash_service())
            .await
            .take_string()
            .await?;

        assert!(body.contains("Page notice"), "missing notice in {body}");
        assert!(!body.contains("flash-warning"), "unexpected flash in {body}");

        Ok(())
    }

    #[test]
    fn notices_and_title_are_escaped() {
        let html = shell(
            "<Track>",
            &[Notice::new(Level::Error, "<script>alert(1)</script>")],
            "",
        );

        assert!(html.contains("&lt;Track&gt; | Washbay"));
        assert!(html.contains("flash-error"));
        assert!(!html.contains("<script>"), "notice must be escaped");
    }

    #[test]
    fn selected_option_is_marked() {
        let html = options(&["Big", "Small"], "Small");

        assert_eq!(
            html,
            "<option value=\"Big\">Big</option><option value=\"Small\" selected>Small</option>"
        );
    }
}
