use clap::Parser;
use colored::*;
use daylog_cli::{execute, CliOptions};
use daylog_config::constants::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

const USAGE_GUIDANCE: &str = "\
Example: daylog --token YOUR_ACCESS_TOKEN --date 2023-01-01
Get your personal access token here: https://github.com/settings/tokens
The token can also be supplied through the GITHUB_TOKEN environment variable.
Date should be in the format YYYY-MM-DD.
Note: GitHub API requests are subject to rate limits.
For more information, refer to: https://docs.github.com/en/rest/overview/resources-in-the-rest-api#rate-limiting";

#[derive(Parser)]
#[command(name = "daylog")]
#[command(about = "Render one day of your GitHub activity as markdown")]
#[command(version)]
#[command(after_help = USAGE_GUIDANCE)]
struct Cli {
    /// GitHub personal access token (falls back to GITHUB_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Date in YYYY-MM-DD format to report activity for
    #[arg(long)]
    date: Option<String>,

    /// GitHub REST API base URL (falls back to DAYLOG_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Host used for links in the report (falls back to DAYLOG_WEB_HOST)
    #[arg(long)]
    web_host: Option<String>,

    #[arg(short, long, help = "Verbose output on stderr")]
    verbose: bool,
}

impl From<Cli> for CliOptions {
    fn from(cli: Cli) -> Self {
        CliOptions {
            token: cli.token,
            date: cli.date,
            api_url: cli.api_url,
            web_host: cli.web_host,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };

    // Diagnostics go to stderr so stdout stays clean markdown
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = execute(cli.into(), &mut out).await {
        let _ = out.flush();
        eprintln!("{} {}", "Error:".red().bold(), e);
        if e.is_missing_arguments() {
            eprintln!();
            eprintln!("{}", USAGE_GUIDANCE);
        }
        process::exit(e.exit_code());
    }
}
