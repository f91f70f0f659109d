use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest_middleware::ClientWithMiddleware;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::info;
use url::Url;

use crate::extract::Report;
use crate::fetch;
use crate::locate::find_tag;
use crate::progress::Progress;

/// Detail-page statuses legitimately associated with each index
/// abbreviation (the displayed code minus its decorative type prefix).
static EXPECTED_STATUS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("A", &["Active", "Accepted"][..]),
        ("D", &["Deferred"][..]),
        ("F", &["Final"][..]),
        ("P", &["Provisional"][..]),
        ("R", &["Rejected"][..]),
        ("S", &["Superseded"][..]),
        ("W", &["Withdrawn"][..]),
        ("", &["Draft", "Active"][..]),
    ])
});

static STATUS_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("pattern must compile"));

fn expected_statuses(code: &str) -> &'static [&'static str] {
    EXPECTED_STATUS.get(code).copied().unwrap_or(&[])
}

/// Running count of detail-page statuses, in discovery order.
#[derive(Debug, Default)]
pub struct StatusTally {
    counts: Vec<(String, u64)>,
}

impl StatusTally {
    pub fn increment(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(label, _)| label == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// (Status, Count) rows in discovery order, closed by a Total row.
    pub fn into_report(self) -> Report {
        let total = self.total();
        let mut report = Report::new(["Status", "Count"]);
        for (label, count) in self.counts {
            report.push([label, count.to_string()]);
        }
        report.push(["Total".to_string(), total.to_string()]);
        report
    }
}

/// One proposal row from the index: status abbreviation plus the
/// absolute URL of its detail page.
struct IndexRow {
    code: String,
    url: Url,
}

/// Rows of the numerical index. A `tr` without a status abbreviation or
/// a numeric proposal link is not a proposal and is passed over.
fn collect_rows(doc: &Html, base: &Url) -> Result<Vec<IndexRow>> {
    let section = find_tag(doc.root_element(), "section#numerical-index")?;
    let body = find_tag(section, "tbody")?;

    let row_selector = Selector::parse("tr").expect("selector literals must parse");
    let abbr_selector = Selector::parse("abbr").expect("selector literals must parse");
    let link_selector =
        Selector::parse("a.pep.reference.internal").expect("selector literals must parse");

    let mut rows = Vec::new();
    for tr in body.select(&row_selector) {
        let Some(abbr) = tr.select(&abbr_selector).next() else {
            continue;
        };
        let Some(link) = tr.select(&link_selector).find(|anchor| {
            let text = anchor.text().collect::<String>();
            !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
        }) else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Ok(url) = base.join(href) else {
            continue;
        };

        // First character of the displayed code is the proposal type, a
        // decorative prefix; what remains is the status abbreviation.
        let code = abbr.text().collect::<String>().chars().skip(1).collect();
        rows.push(IndexRow { code, url });
    }

    Ok(rows)
}

/// The authoritative status shown on a detail page: a dedicated `abbr`
/// status marker when present, otherwise the definition adjacent to the
/// "Status" field label. `None` when the page carries neither.
fn page_status(doc: &Html) -> Option<String> {
    let abbr_selector = Selector::parse("abbr").expect("selector literals must parse");
    if let Some(abbr) = doc.root_element().select(&abbr_selector).find(|el| {
        el.value()
            .attr("title")
            .is_some_and(|title| STATUS_WORD.is_match(title))
    }) {
        return Some(abbr.text().collect::<String>().trim().to_string());
    }

    let label_selector = Selector::parse("dt").expect("selector literals must parse");
    for label in doc.root_element().select(&label_selector) {
        if label.text().collect::<String>().trim() != "Status" {
            continue;
        }
        let value = label
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "dd");
        if let Some(value) = value {
            let text = value.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Compare one found status against what the index code allows: record a
/// mismatch when inconsistent, count the found status either way.
fn reconcile(
    code: &str,
    found: &str,
    url: &Url,
    tally: &mut StatusTally,
    mismatches: &mut Vec<String>,
) {
    let expected = expected_statuses(code);
    if !expected.contains(&found) {
        mismatches.push(format!(
            "mismatched statuses: {url} status in page: {found} expected statuses: {expected:?}"
        ));
    }
    tally.increment(found);
}

/// Cross-check every proposal's index status against its detail page and
/// tally what the detail pages actually say.
///
/// Inconsistencies are data, not errors: they are logged in one batch at
/// the end and the detail-page status still counts. A row whose detail
/// page cannot be fetched, or shows no status at all, contributes
/// nothing and does not halt the pass.
pub async fn scrape(client: &ClientWithMiddleware, base: &Url) -> Result<Option<Report>> {
    let Some(body) = fetch::page(client, base).await else {
        return Ok(None);
    };
    let rows = {
        let doc = Html::parse_document(&body);
        collect_rows(&doc, base)?
    };

    let mut tally = StatusTally::default();
    let mut mismatches = Vec::new();
    let mut progress = Progress::new("pep", rows.len());

    for row in &rows {
        if let Some(detail) = fetch::page(client, &row.url).await {
            let found = {
                let doc = Html::parse_document(&detail);
                page_status(&doc)
            };
            if let Some(found) = found {
                reconcile(&row.code, &found, &row.url, &mut tally, &mut mismatches);
            }
        }
        progress.tick();
    }
    progress.finish();

    if !mismatches.is_empty() {
        info!("{}", mismatches.join("\n"));
    }

    Ok(Some(tally.into_report()))
}
