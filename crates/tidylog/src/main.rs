//! The tidylog binary: reads structured logs from stdin, makes them pretty
//! on stdout.

use std::io::{self, BufWriter};

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tidylog::options::{DEFAULT_TIME_FORMAT, DEFAULT_TRUNCATE_LENGTH};
use tidylog::{stream, Dispatcher, RenderOptions};

#[derive(Parser, Debug, Clone)]
#[command(name = "tidylog")]
#[command(about = "Reads structured logs from stdin, makes them pretty on stdout")]
struct Args {
    #[arg(long, help = "Keys to skip when parsing a log entry")]
    skip: Vec<String>,

    #[arg(
        long,
        conflicts_with = "skip",
        help = "Keys to keep when parsing a log entry"
    )]
    keep: Vec<String>,

    #[arg(
        long = "no-sort-longest",
        help = "Do not sort fields by length after the lexicographic sort"
    )]
    no_sort_longest: bool,

    #[arg(
        long = "no-skip-unchanged",
        help = "Show fields even when their value matches the previous entry"
    )]
    no_skip_unchanged: bool,

    #[arg(long, help = "Truncate values longer than --truncate-length")]
    truncate: bool,

    #[arg(
        long = "truncate-length",
        default_value_t = DEFAULT_TRUNCATE_LENGTH,
        help = "Truncate values longer than this length"
    )]
    truncate_length: usize,

    #[arg(
        long = "light-bg",
        env = "TIDYLOG_LIGHT_BACKGROUND",
        help = "Use a palette for terminals with light backgrounds"
    )]
    light_bg: bool,

    #[arg(
        long = "time-format",
        default_value = DEFAULT_TIME_FORMAT,
        help = "Output time format (chrono strftime pattern)"
    )]
    time_format: String,
}

impl Args {
    fn into_options(self) -> RenderOptions {
        RenderOptions {
            skip: self.skip.into_iter().collect(),
            keep: self.keep.into_iter().collect(),
            sort_longest: !self.no_sort_longest,
            skip_unchanged: !self.no_skip_unchanged,
            truncates: self.truncate,
            truncate_length: self.truncate_length,
            light_bg: self.light_bg,
            time_format: self.time_format,
        }
    }
}

/// Initialise the tracing / logging subsystem on stderr, so diagnostics
/// never mix with rendered log output.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tidylog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    debug!("parsed arguments: {:?}", args);

    let mut dispatcher = Dispatcher::new(args.into_options())?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    stream::run(
        stdin.lock(),
        BufWriter::new(stdout.lock()),
        &mut dispatcher,
    )?;

    Ok(())
}
