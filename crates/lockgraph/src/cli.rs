use crate::commands::{Command, OutputFormat};
use crate::tracing::{LogLevel, TracingFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lockgraph")]
#[command(about = "Read yarn.lock files into package entries and dependency graphs")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        env = "LOCKGRAPH_LOG_LEVEL",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        env = "LOCKGRAPH_LOG_FORMAT",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(
        long,
        global = true,
        help = "Also append log events to this file",
        env = "LOCKGRAPH_LOG_FILE"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Tracing filter directives, overriding --level and RUST_LOG",
        env = "LOCKGRAPH_LOG_FILTER"
    )]
    pub log_filter: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Spaces per nesting level in the lockfile",
        default_value_t = 2,
        env = "LOCKGRAPH_INDENT_WIDTH",
        value_parser = clap::value_parser!(u16).range(1..=16)
    )]
    pub indent_width: u16,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Show version information")]
    Version,
    #[command(about = "Parse a yarn.lock and print its entries")]
    Parse {
        #[arg(help = "Path to the yarn.lock file", default_value = "yarn.lock")]
        path: PathBuf,
        #[arg(
            long,
            short = 'o',
            help = "Output format",
            default_value = "json",
            value_enum
        )]
        output: OutputFormat,
    },
    #[command(about = "Print the dependency edges between entries of a yarn.lock")]
    Graph {
        #[arg(help = "Path to the yarn.lock file", default_value = "yarn.lock")]
        path: PathBuf,
    },
    #[command(about = "List the outermost yarn.lock files below a directory")]
    Discover {
        #[arg(help = "Directory to search", default_value = ".")]
        root: PathBuf,
    },
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Version => Self::Version,
            Commands::Parse { path, output } => Self::Parse { path, output },
            Commands::Graph { path } => Self::Graph { path },
            Commands::Discover { root } => Self::Discover { root },
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
