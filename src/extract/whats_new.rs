use anyhow::Result;
use reqwest_middleware::ClientWithMiddleware;
use scraper::{Html, Selector};
use url::Url;

use crate::extract::Report;
use crate::fetch;
use crate::locate::find_tag;
use crate::progress::Progress;

/// Per-release change-note summaries from the "what's new" index.
///
/// Each release entry links to its own page; a release whose page cannot
/// be fetched is skipped, the rest of the run continues.
pub async fn scrape(client: &ClientWithMiddleware, base: &Url) -> Result<Option<Report>> {
    let whats_new_url = base.join("whatsnew/")?;
    let Some(body) = fetch::page(client, &whats_new_url).await else {
        return Ok(None);
    };

    // Collect the release links up front so the document is gone before
    // the per-release fetch loop starts.
    let release_links = {
        let doc = Html::parse_document(&body);
        let main_section = find_tag(doc.root_element(), "section#what-s-new-in-python")?;
        let toc = find_tag(main_section, "div.toctree-wrapper")?;
        let entry_selector =
            Selector::parse("li.toctree-l1").expect("selector literals must parse");

        let mut links = Vec::new();
        for entry in toc.select(&entry_selector) {
            let anchor = find_tag(entry, "a")?;
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            links.push(whats_new_url.join(href)?);
        }
        links
    };

    let mut report = Report::new(["link", "title", "editors/authors"]);
    let mut progress = Progress::new("whats-new", release_links.len());

    for link in &release_links {
        if let Some(page) = fetch::page(client, link).await {
            let doc = Html::parse_document(&page);
            let heading = find_tag(doc.root_element(), "h1")?;
            let credits = find_tag(doc.root_element(), "dl")?;
            let title = heading.text().collect::<String>();
            let editors = credits.text().collect::<String>().replace('\n', " ");
            report.push([link.to_string(), title, editors]);
        }
        progress.tick();
    }
    progress.finish();

    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest_middleware::ClientBuilder;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn plain_client() -> ClientWithMiddleware {
        ClientBuilder::new(reqwest::Client::new()).build()
    }

    const INDEX: &str = r##"<html><body>
        <section id="what-s-new-in-python">
          <div class="toctree-wrapper">
            <ul>
              <li class="toctree-l1"><a href="3.12.html">What's New In Python 3.12</a></li>
              <li class="toctree-l1"><a href="http://127.0.0.1:1/3.11.html">What's New In Python 3.11</a></li>
            </ul>
          </div>
        </section>
        </body></html>"##;

    const RELEASE: &str = r#"<html><body>
        <h1>What's New In Python 3.12</h1>
        <dl><dt>Editor</dt><dd>Jane
Doe</dd></dl>
        </body></html>"#;

    #[tokio::test]
    async fn collects_one_row_per_reachable_release() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/whatsnew/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/whatsnew/3.12.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RELEASE))
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).unwrap();
        let report = scrape(&plain_client(), &base).await.unwrap().unwrap();

        // The 3.11 entry points at a dead port: skipped, not fatal.
        assert_eq!(report.rows().len(), 1);
        let row = &report.rows()[0];
        assert_eq!(row[0], format!("{}/whatsnew/3.12.html", server.uri()));
        assert_eq!(row[1], "What's New In Python 3.12");
        assert_eq!(row[2], "EditorJane Doe");
        assert_eq!(
            report.header(),
            ["link", "title", "editors/authors"]
                .map(String::from)
                .as_slice()
        );
    }

    #[tokio::test]
    async fn unreachable_index_yields_nothing() {
        let base = Url::parse("http://127.0.0.1:1/").unwrap();
        assert!(scrape(&plain_client(), &base).await.unwrap().is_none());
    }
}
