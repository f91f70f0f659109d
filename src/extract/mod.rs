// src/extract/mod.rs
//
// One module per operating mode. Every extractor takes the shared cached
// client plus the site root it scrapes, and produces either a `Report`
// for the renderer or nothing (index page unreachable, or side-effect-only
// mode).

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

/// Root of the versioned Python documentation site.
pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";

/// Root of the PEP index site.
pub const PEP_DOC_URL: &str = "https://peps.python.org/";

/// Tabular scrape result: one header row plus uniform-arity data rows.
///
/// Built fresh by an extractor, consumed once by the renderer.
#[derive(Debug)]
pub struct Report {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Report {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a data row. Panics if the row's arity differs from the
    /// header's; extractors always emit fixed-shape rows, so a mismatch
    /// is a programming error, not a data condition.
    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        assert_eq!(
            row.len(),
            self.header.len(),
            "report row arity must match header arity"
        );
        self.rows.push(row);
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Header first, then data rows, for renderers that draw no
    /// distinction between the two.
    pub fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }
}
