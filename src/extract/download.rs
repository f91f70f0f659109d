use anyhow::Result;
use reqwest_middleware::ClientWithMiddleware;
use scraper::Html;
use std::path::Path;
use tracing::{error, info};
use url::Url;

use crate::extract::Report;
use crate::fetch;
use crate::locate::find_tag;

/// Save the PDF (A4) documentation archive under `dest_dir`.
///
/// Side effect only: never produces a report. Any failed fetch in the
/// chain abandons the mode's work before a partial file can appear.
pub async fn scrape(
    client: &ClientWithMiddleware,
    base: &Url,
    dest_dir: &Path,
) -> Result<Option<Report>> {
    let downloads_url = base.join("download.html")?;
    let Some(body) = fetch::page(client, &downloads_url).await else {
        return Ok(None);
    };

    let archive_url = {
        let doc = Html::parse_document(&body);
        let main_region = find_tag(doc.root_element(), r#"div[role="main"]"#)?;
        let formats_table = find_tag(main_region, "table.docutils")?;
        let archive_link = find_tag(formats_table, r#"a[href$="pdf-a4.zip"]"#)?;
        let href = archive_link.value().attr("href").unwrap_or_default();
        downloads_url.join(href)?
    };

    match fetch::download(&reqwest::Client::new(), &archive_url, dest_dir).await {
        Ok(path) => info!(path = %path.display(), "archive saved"),
        Err(err) => error!(url = %archive_url, error = %err, "archive download failed"),
    }

    Ok(None)
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

    const DOWNLOADS_PAGE: &str = r#"<html><body><div role="main">
        <table class="docutils">
          <tr>
            <td><a href="archives/python-docs-pdf-letter.zip">PDF (US-Letter)</a></td>
            <td><a href="archives/python-docs-pdf-a4.zip">PDF (A4)</a></td>
          </tr>
        </table>
        </div></body></html>"#;

    #[tokio::test]
    async fn saves_the_a4_archive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/download.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DOWNLOADS_PAGE))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/archives/python-docs-pdf-a4.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"archive-bytes".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let base = Url::parse(&server.uri()).unwrap();
        let report = scrape(&plain_client(), &base, dir.path()).await.unwrap();

        assert!(report.is_none());
        let saved = dir.path().join("python-docs-pdf-a4.zip");
        assert_eq!(std::fs::read(&saved).unwrap(), b"archive-bytes");
    }

    #[tokio::test]
    async fn failed_archive_fetch_leaves_no_file() {
        let server = MockServer::start().await;
        // Only the downloads page is routed; the archive itself 404s.
        Mock::given(method("GET"))
            .and(path("/download.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DOWNLOADS_PAGE))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let base = Url::parse(&server.uri()).unwrap();
        let report = scrape(&plain_client(), &base, dir.path()).await.unwrap();

        assert!(report.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn unreachable_downloads_page_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let base = Url::parse("http://127.0.0.1:1/").unwrap();
        let report = scrape(&plain_client(), &base, dir.path()).await.unwrap();
        assert!(report.is_none());
    }
}
