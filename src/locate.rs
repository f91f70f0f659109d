use scraper::{ElementRef, Selector};
use tracing::error;

use crate::error::ScrapeError;

/// Return the first element under `scope` matching the CSS selector.
///
/// Every "this markup shape is assumed" lookup goes through here so a
/// missing element surfaces as one typed, logged failure instead of a
/// null-check at each traversal step.
pub fn find_tag<'a>(scope: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let selector = Selector::parse(css).expect("selector literals must parse");
    match scope.select(&selector).next() {
        Some(element) => Ok(element),
        None => {
            error!(selector = css, "expected element not found");
            Err(ScrapeError::TagNotFound {
                selector: css.to_string(),
            })
        }
    }
}
