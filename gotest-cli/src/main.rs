use gotest_cli::Cli;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    tracing::debug!(?cli, "parsed arguments");

    match gotest_cli::run(&cli) {
        Ok(outcome) if outcome.success() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
