mod cmd;
mod output;
mod project;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use stackwise_core::types::{Device, ProjectType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "stackwise",
    about = "Tech stack advisor: recommend, validate and learn from your stack choices",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding .stackwise/ (default: your home directory)
    #[arg(long, global = true, env = "STACKWISE_HOME")]
    home: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a stack for a project description
    Recommend {
        /// Free-text project description; technologies it names are honoured
        #[arg(long, short = 'd')]
        description: String,

        /// Project type: webapp, api, mobile, desktop, ai or custom
        #[arg(long = "type", value_name = "TYPE", default_value = "webapp")]
        project_type: ProjectType,

        /// Target device (repeatable): web, mobile or desktop
        #[arg(long = "device", value_name = "DEVICE")]
        devices: Vec<Device>,

        /// Project to scan for languages and package managers
        /// (default: nearest project root above cwd)
        #[arg(long)]
        project: Option<PathBuf>,

        /// Do not record this recommendation in learned patterns
        #[arg(long)]
        no_learn: bool,
    },

    /// Analyze an existing project and recommend a stack for it
    Analyze {
        /// Project directory (default: nearest project root above cwd)
        #[arg(long)]
        project: Option<PathBuf>,

        /// Do not record this recommendation in learned patterns
        #[arg(long)]
        no_learn: bool,
    },

    /// Check a stack for compatibility issues and missing pieces
    Validate {
        #[arg(long)]
        frontend: Option<String>,
        #[arg(long)]
        backend: Option<String>,
        #[arg(long)]
        database: Option<String>,
        #[arg(long)]
        hosting: Option<String>,
    },

    /// Show preferences and most used combinations
    Preferences,

    /// Delete learned patterns, preferences and compatibility rules
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show which external validation integrations are available
    Integrations,

    /// Print an XML-structured analysis prompt for an external LLM
    Prompt {
        #[arg(long, short = 'd')]
        description: String,

        #[arg(long = "type", value_name = "TYPE", default_value = "webapp")]
        project_type: ProjectType,

        #[arg(long)]
        project: Option<PathBuf>,

        /// Write the prompt to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Inspect and validate the advisor configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let home = cli.home.as_deref();

    let result = match cli.command {
        Commands::Recommend {
            description,
            project_type,
            devices,
            project,
            no_learn,
        } => cmd::recommend::run(
            home,
            cmd::recommend::RecommendArgs {
                description,
                project_type,
                devices,
                project,
                learn: !no_learn,
            },
            cli.json,
        ),
        Commands::Analyze { project, no_learn } => {
            cmd::analyze::run(home, project.as_deref(), !no_learn, cli.json)
        }
        Commands::Validate {
            frontend,
            backend,
            database,
            hosting,
        } => cmd::validate::run(
            home,
            cmd::validate::StackArgs {
                frontend,
                backend,
                database,
                hosting,
            },
            cli.json,
        ),
        Commands::Preferences => cmd::preferences::run(home, cli.json),
        Commands::Reset { yes } => cmd::reset::run(home, yes, cli.json),
        Commands::Integrations => cmd::integrations::run(home, cli.json),
        Commands::Prompt {
            description,
            project_type,
            project,
            output,
        } => cmd::prompt::run(
            &description,
            project_type,
            project.as_deref(),
            output.as_deref(),
            cli.json,
        ),
        Commands::Config { subcommand } => cmd::config::run(home, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
