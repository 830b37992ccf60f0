use std::io::{self, IsTerminal};
use std::process;
use std::time::Duration;

use clap::Parser;
use purl::{TerminalPresenter, UreqTransport};
use purl_core::{HttpMethod, Invocation, PurlError};

/// purl - build, show, and send HTTP requests with less typing
#[derive(Parser)]
#[command(name = "purl", version)]
struct Cli {
    /// Absolute URL, or a localhost shorthand such as `:3000/todos`
    url: String,
    /// Headers as `Name:value`, data fields as `name=value`
    items: Vec<String>,
    /// GET, POST, PUT or DELETE
    #[arg(short, long, default_value = "GET")]
    method: HttpMethod,
    /// Print the outgoing request before the response
    #[arg(short, long)]
    verbose: bool,
    /// Print the request without sending it
    #[arg(long)]
    offline: bool,
    /// Send data fields form-url-encoded
    #[arg(short, long)]
    form: bool,
    /// Give up on the exchange after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::new().filter_or("PURL_LOG", "warn")).init();
    if cli.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli) {
        eprintln!("purl: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PurlError> {
    let invocation = Invocation {
        url: cli.url,
        method: cli.method,
        items: (!cli.items.is_empty()).then_some(cli.items),
        verbose: cli.verbose,
        offline: cli.offline,
        form: cli.form,
    };
    let transport = UreqTransport::new(cli.timeout.map(Duration::from_secs));
    let mut presenter = TerminalPresenter::new(io::stdout().lock());

    invocation.run(&transport, &mut presenter)?;
    Ok(())
}
