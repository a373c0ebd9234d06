use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod context;
mod format;
mod logging;

/// Dockup - Container Image Provisioner
///
/// Makes sure the images a workload needs are present in the local container
/// engine and shows the metadata they carry.
#[derive(Parser, Debug)]
#[command(name = "dockup")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    color: String,

    /// Path to the configuration file
    #[arg(long, global = true, env = "DOCKUP_CONFIG")]
    config: Option<PathBuf>,

    /// Container engine address (unix:///var/run/docker.sock, tcp://host:2375)
    #[arg(long, global = true, env = "DOCKUP_HOST")]
    host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Display version information
    Version,
    /// Pull the given images unless the engine already has them
    Ensure {
        /// Image references (defaults to the `images` list of the config file)
        images: Vec<String>,
        /// Seconds to wait for each pull (defaults to `pull.timeout`)
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Show the id, labels and environment of an image
    Inspect {
        /// Image reference
        image: String,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a configuration file with default values
    Init,
    /// Display the resolved configuration
    Get {
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let verbosity = context::VerbosityLevel::from_count(cli.verbose);
    logging::init(verbosity);

    // Build context with precedence: defaults > config file > env vars > CLI flags
    let ctx = match context::AppContext::build(
        format::ColorChoice::from(cli.color.as_str()),
        verbosity,
        cli.config,
        cli.host,
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            format::create_formatter(format::ColorChoice::from(cli.color.as_str()))
                .error(&e.to_string());
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Version => {
            commands::version::print_version();
        }
        Commands::Ensure { images, timeout } => {
            commands::ensure::handle_ensure(&ctx, &images, timeout).await;
        }
        Commands::Inspect { image, format } => {
            let fmt = format::OutputFormat::from(format.as_str());
            commands::inspect::handle_inspect(&ctx, &image, fmt).await;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Init => commands::config::handle_init(&ctx),
            ConfigCommands::Get { format } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::config::handle_get(&ctx, fmt);
            }
            ConfigCommands::Path => commands::config::handle_path(&ctx),
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }
}
