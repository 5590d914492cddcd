use anyhow::{Context, Result};
use clap::Parser;
use fuga::cli::{Cli, OutputFormat};
use fuga::{harness, report};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = args.to_config();
    let result = harness::run(&config)?;

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&result)),
        OutputFormat::Json => {
            let json = report::render_json(&result).context("serializing result to JSON")?;
            println!("{json}");
        }
    }

    if args.summary {
        eprint!("{}", report::render_summary(&result));
    }

    // The verdict is informational by default; only --fail-on-leak turns a
    // detection into a failing exit status for CI gates.
    if args.fail_on_leak && result.verdict.is_leak() {
        std::process::exit(2);
    }

    Ok(())
}
