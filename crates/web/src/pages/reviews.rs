//! Customer reviews

use salvo::{flash::FlashDepotExt, prelude::*};
use tracing::{error, warn};
use washbay::{html::escape, reviews::ReviewForm};
use washbay_app::domain::reviews::records::ReviewRecord;

use crate::{
    extensions::{DepotExt, ResultExt as _},
    pages::layout::{Level, Page},
};

const FORM: &str = "<form method=\"post\" action=\"/reviews\">\
     <label>Name <input name=\"name\"></label> \
     <label>Rating <select name=\"rating\">\
     <option>5</option><option>4</option><option>3</option><option>2</option><option>1</option>\
     </select></label> \
     <label>Review <textarea name=\"message\"></textarea></label> \
     <button type=\"submit\">Submit</button></form>";

fn review_list(reviews: &[ReviewRecord]) -> String {
    if reviews.is_empty() {
        return "<p>No reviews yet.</p>".to_string();
    }

    let items: String = reviews
        .iter()
        .map(|review| {
            format!(
                "<li><strong>{}</strong> rated {}/5<p>{}</p></li>",
                escape(&review.name),
                review.rating,
                escape(&review.message)
            )
        })
        .collect();

    format!("<ul class=\"reviews\">{items}</ul>")
}

#[handler]
pub(crate) async fn get(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.state()?;

    let page = match state
        .app
        .reviews
        .list_reviews()
        .await
        .log_err("failed to load reviews")
    {
        Some(reviews) => Page::new(
            "Reviews",
            format!("<h1>Reviews</h1>\n{FORM}\n{}", review_list(&reviews)),
        ),
        None => Page::new("Reviews", format!("<h1>Reviews</h1>\n{FORM}"))
            .notice(Level::Error, "Error loading reviews."),
    };

    page.render(depot, res);

    Ok(())
}

#[handler]
pub(crate) async fn post(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.state()?;
    let form = req.parse_form::<ReviewForm>().await.unwrap_or_default();

    match form.validate() {
        Ok(review) => match state.app.reviews.submit_review(review).await {
            Ok(_) => {
                depot
                    .outgoing_flash_mut()
                    .success("Review submitted successfully!");
            }
            Err(source) => {
                error!("failed to save review: {source}");

                depot.outgoing_flash_mut().error("Error saving review.");
            }
        },
        Err(invalid) => {
            warn!("rejected review: {invalid}");

            depot
                .outgoing_flash_mut()
                .error("Rating must be a whole number from 1 to 5.");
        }
    }

    res.render(Redirect::other("/reviews"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use washbay_app::domain::reviews::records::ReviewRecord;

    use crate::test_helpers::{TestState, flashed, location, site_service};

    #[tokio::test]
    async fn reviews_are_listed_escaped() -> TestResult {
        let mut state = TestState::default();

        state.reviews.expect_list_reviews().times(1).return_once(|| {
            Ok(vec![ReviewRecord {
                id: 1,
                name: "Ravi".to_string(),
                rating: 4,
                message: "<b>spotless</b>".to_string(),
            }])
        });

        let body = TestClient::get("http://example.com/reviews")
            .send(&site_service(state)?)
            .await
            .take_string()
            .await?;

        assert!(body.contains("rated 4/5"), "expected rating in {body}");
        assert!(body.contains("&lt;b&gt;spotless&lt;/b&gt;"), "expected escaped message in {body}");

        Ok(())
    }

    #[tokio::test]
    async fn blank_review_is_saved_anonymously() -> TestResult {
        let mut state = TestState::default();

        state
            .reviews
            .expect_submit_review()
            .withf(|review| review.name == "Anonymous" && review.rating == 5)
            .times(1)
            .return_once(|review| {
                Ok(ReviewRecord {
                    id: 1,
                    name: review.name,
                    rating: review.rating,
                    message: review.message,
                })
            });

        let service = site_service(state)?;

        let res = TestClient::post("http://example.com/reviews")
            .form(&[("message", "Great")])
            .send(&service)
            .await;

        assert_eq!(location(&res), "/reviews");

        let body = flashed(&res, &service).await?;

        assert!(body.contains("Review submitted successfully!"), "expected flash in {body}");

        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_rating_is_not_saved() -> TestResult {
        let service = site_service(TestState::default())?;

        let res = TestClient::post("http://example.com/reviews")
            .form(&[("rating", "9"), ("message", "Great")])
            .send(&service)
            .await;

        let body = flashed(&res, &service).await?;

        assert!(body.contains("Rating must be a whole number"), "expected error in {body}");

        Ok(())
    }
}
