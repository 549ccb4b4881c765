use clap::Parser;
use folio::cli::commands::Cli;
use folio::cli::handlers;
use folio::io::logging;

fn main() {
    let cli = Cli::parse();

    // The TUI logs to a file once it has found the site
    if cli.command.is_some() {
        logging::init_stderr();
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
