use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest_middleware::ClientWithMiddleware;
use scraper::{Html, Selector};
use url::Url;

use crate::error::ScrapeError;
use crate::extract::Report;
use crate::fetch;
use crate::locate::find_tag;

/// Sidebar list marker the extractor depends on. If the main page stops
/// carrying it, the assumed layout is gone and the run must abort.
const ALL_VERSIONS_MARKER: &str = "All versions";

static VERSION_STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)").expect("pattern must compile")
});

/// Version/status pairs from the main documentation page's sidebar.
pub async fn scrape(client: &ClientWithMiddleware, base: &Url) -> Result<Option<Report>> {
    let Some(body) = fetch::page(client, base).await else {
        return Ok(None);
    };
    let doc = Html::parse_document(&body);
    let sidebar = find_tag(doc.root_element(), "div.sphinxsidebarwrapper")?;

    let list_selector = Selector::parse("ul").expect("selector literals must parse");
    let anchor_selector = Selector::parse("a").expect("selector literals must parse");

    let version_list = sidebar
        .select(&list_selector)
        .find(|list| list.text().collect::<String>().contains(ALL_VERSIONS_MARKER))
        .ok_or(ScrapeError::MarkerNotFound {
            marker: ALL_VERSIONS_MARKER,
        })?;

    let mut report = Report::new(["link", "version", "status"]);
    for anchor in version_list.select(&anchor_selector) {
        let href = anchor.value().attr("href").unwrap_or_default();
        let text = anchor.text().collect::<String>();
        match VERSION_STATUS.captures(&text) {
            Some(caps) => report.push([href, &caps["version"], &caps["status"]]),
            // Links that don't look like "Python X.Y (status)" keep their
            // full text as the version and an empty status.
            None => report.push([href, text.as_str(), ""]),
        }
    }

    Ok(Some(report))
}
