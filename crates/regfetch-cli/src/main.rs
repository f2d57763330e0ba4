//! regfetch — entry point.

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use regfetch_cli::{commands, Overrides};

#[derive(Parser)]
#[command(
    name = "regfetch",
    about = "Download the FIPSAS regulation PDFs, skipping the ones already on disk",
    version
)]
struct Cli {
    /// Output results as JSON (machine-readable).
    #[arg(long, global = true)]
    json: bool,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output directory. Also reads REGFETCH_OUTPUT_DIR.
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Regulation host base URL. Also reads REGFETCH_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// JSON catalog file replacing the builtin one. Also reads REGFETCH_CATALOG.
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download missing documents (default).
    Fetch(FetchArgs),

    /// Show the catalog without downloading anything.
    List,

    /// Show which documents are already present on disk.
    Status,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   regfetch completions bash > ~/.local/share/bash-completion/completions/regfetch
    ///   regfetch completions zsh > ~/.zfunc/_regfetch
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[derive(Args, Default)]
struct FetchArgs {
    /// Only fetch these catalog ids. Can be repeated.
    #[arg(long = "only")]
    only: Vec<String>,

    /// Pause between network attempts, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Per-request timeout, in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut overrides = Overrides {
        output: cli.output.clone(),
        base_url: cli.base_url.clone(),
        catalog: cli.catalog.clone(),
        ..Overrides::default()
    };

    let result = match cli.command.unwrap_or(Commands::Fetch(FetchArgs::default())) {
        Commands::Fetch(args) => {
            overrides.delay_ms = args.delay_ms;
            overrides.timeout_secs = args.timeout_secs;
            // Partial failures are reported, not turned into an exit code.
            commands::fetch(&overrides, &args.only, cli.json)
                .await
                .map(|_| ())
        }
        Commands::List => commands::list(&overrides, cli.json),
        Commands::Status => commands::status(&overrides, cli.json),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "regfetch", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        if cli.json {
            regfetch_cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }
}
