use std::path::PathBuf;

use clap::Parser;
use scoop_config::ScoopConfig;

/// Top-level CLI parser for the `storyscoop` binary.
#[derive(Debug, Parser)]
#[command(
    name = "storyscoop",
    version,
    about = "Generate Ladle stories from a TypeScript component's props"
)]
pub struct Cli {
    /// Component source file (.ts or .tsx)
    pub file: PathBuf,

    /// Overwrite existing story file(s)
    #[arg(short, long)]
    pub overwrite: bool,

    /// Don't write any file(s)
    #[arg(long)]
    pub dryrun: bool,

    /// Print stories to stdout rather than files
    #[arg(long)]
    pub stdout: bool,

    /// Props naming format, such as '{Component}PropType'
    #[arg(long = "propsformat", value_name = "FORMAT")]
    pub props_format: Option<String>,

    /// Markup wrapping: 'MockProvider(mocks=[]),div(className="foo"|id="bar")'
    #[arg(long, value_name = "SPEC")]
    pub wrap: Option<String>,

    /// Print the extracted component schemas as JSON instead of stories
    #[arg(long)]
    pub json: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where generated output goes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Write,
    DryRun,
    Stdout,
    Json,
}

/// Effective run settings: loaded config with command-line flags on top.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    pub props_format: String,
    pub wrap: String,
    pub overwrite: bool,
    pub mode: OutputMode,
}

impl Cli {
    #[must_use]
    pub fn settings(&self, config: ScoopConfig) -> Settings {
        let mode = if self.json {
            OutputMode::Json
        } else if self.stdout {
            OutputMode::Stdout
        } else if self.dryrun {
            OutputMode::DryRun
        } else {
            OutputMode::Write
        };
        Settings {
            props_format: self
                .props_format
                .clone()
                .unwrap_or(config.extract.props_format),
            wrap: self.wrap.clone().unwrap_or(config.story.wrap),
            overwrite: self.overwrite || config.story.overwrite,
            mode,
        }
    }
}
