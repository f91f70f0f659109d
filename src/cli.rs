use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "pydocscraper", about = "Python documentation scraper", version)]
pub struct Cli {
    /// Scraper operating mode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the HTTP cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Additional output method
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    /// The mode's command-line spelling, reused for result file names.
    pub fn name(self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_and_flags() {
        let cli = Cli::try_parse_from(["pydocscraper", "pep", "--clear-cache", "-o", "file"])
            .unwrap();
        assert_eq!(cli.mode, Mode::Pep);
        assert!(cli.clear_cache);
        assert_eq!(cli.output, Some(OutputFormat::File));
    }

    #[test]
    fn output_defaults_to_plain_console() {
        let cli = Cli::try_parse_from(["pydocscraper", "whats-new"]).unwrap();
        assert_eq!(cli.mode, Mode::WhatsNew);
        assert_eq!(cli.output, None);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["pydocscraper", "nonsense"]).is_err());
    }

    #[test]
    fn mode_names_match_cli_spelling() {
        assert_eq!(Mode::LatestVersions.name(), "latest-versions");
        assert_eq!(Mode::Pep.name(), "pep");
    }
}
