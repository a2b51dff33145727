use clap::Parser;
use ytcaps_core::logging::{self, LogSink};

mod cli;

use crate::cli::Cli;

fn main() {
    // Argument errors exit through clap before any logging is set up.
    let cli = Cli::parse();

    let sink = LogSink::for_output(&cli.output_path);
    if logging::init_logging(sink).is_err() && sink != LogSink::Stderr {
        let _ = logging::init_logging(LogSink::Stderr);
    }

    if let Err(err) = cli.run() {
        tracing::error!("{:#}", err);
        eprintln!("ytcaps error: {:#}", err);
        std::process::exit(1);
    }
}
