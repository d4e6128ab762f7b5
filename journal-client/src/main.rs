use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version go to stdout and succeed; bad arguments exit 1.
            let code = i32::from(e.use_stderr());
            if let Err(io) = e.print() {
                eprintln!("{io}");
            }
            std::process::exit(code);
        }
    };

    init_tracing(cli.verbose);

    if let Err(err) = cli::run(cli).await {
        std::process::exit(cli::report(&err));
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "journal_client=info,journal=info",
        _ => "journal_client=debug,journal=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
