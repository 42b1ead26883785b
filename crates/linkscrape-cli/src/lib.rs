use clap::ValueEnum;
use linkscrape_browser::ScrapeMode;

pub mod commands;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// `--mode` values
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    /// Fixed minimal delays
    #[default]
    Fast,
    /// Randomised delays and automation-hiding browser flags
    Stealth,
}

impl From<ModeArg> for ScrapeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fast => ScrapeMode::Fast,
            ModeArg::Stealth => ScrapeMode::Stealth,
        }
    }
}
