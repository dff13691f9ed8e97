pub mod args;
pub mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use colored::*;
use std::process::ExitCode;

use crate::error::GwsError;
use commands::scores::ScoreCommand;

/// GlobalWineScore CLI
#[derive(Parser, Debug)]
#[command(
    name = "gws",
    about = "GlobalWineScore CLI - Query wine scores from the terminal",
    version,
    author,
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide the progress spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// API token, overrides the configured api.key
    #[arg(long, global = true, env = "GWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Markdown format
    Markdown,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Query current scores
    #[command(alias = "l")]
    Latest(args::FilterArgs),

    /// Query the full score history (Business plan)
    #[command(alias = "h")]
    Historical(args::FilterArgs),

    /// Best scores for a vintage
    #[command(alias = "v")]
    Vintage(args::VintageArgs),

    /// Best scores for a color
    #[command(alias = "c")]
    Color(args::ColorArgs),

    /// Scores for a wine identifier
    #[command(alias = "w")]
    Wine(args::WineArgs),

    /// Scores for an L-WIN identifier
    Lwin(args::LwinArgs),

    /// Highest rated wines
    #[command(alias = "t")]
    Top(args::FilterArgs),

    /// Manage configuration
    Config(args::ConfigArgs),

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// The shell to generate completions for (detected from $SHELL if not specified)
        #[arg(value_enum)]
        shell: Option<Shell>,
    },
}

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub verbose: bool,
    pub quiet: bool,
    pub format: OutputFormat,
    pub api_key: Option<String>,
}

impl Cli {
    /// Generate shell completion scripts
    fn generate_completions(shell: Shell) {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
    }

    /// Run the CLI application
    pub async fn run() -> ExitCode {
        let cli = Self::parse();

        // Set up logging
        let default_filter = if cli.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .init();

        let options = GlobalOptions {
            verbose: cli.verbose,
            quiet: cli.quiet,
            format: cli.format,
            api_key: cli.api_key,
        };

        let result = match cli.command {
            Commands::Latest(args) => commands::scores::execute(ScoreCommand::Latest(args), &options).await,
            Commands::Historical(args) => {
                commands::scores::execute(ScoreCommand::Historical(args), &options).await
            }
            Commands::Vintage(args) => commands::scores::execute(ScoreCommand::Vintage(args), &options).await,
            Commands::Color(args) => commands::scores::execute(ScoreCommand::Color(args), &options).await,
            Commands::Wine(args) => commands::scores::execute(ScoreCommand::Wine(args), &options).await,
            Commands::Lwin(args) => commands::scores::execute(ScoreCommand::Lwin(args), &options).await,
            Commands::Top(args) => commands::scores::execute(ScoreCommand::Top(args), &options).await,
            Commands::Config(args) => commands::config::execute(args),
            Commands::Version => {
                commands::version::execute();
                Ok(())
            }
            Commands::Completions { shell } => match shell.or_else(Shell::from_env) {
                Some(shell) => {
                    Self::generate_completions(shell);
                    Ok(())
                }
                None => Err(GwsError::InvalidInput(
                    "Unable to detect current shell. Specify one, e.g. 'gws completions bash'".to_string(),
                )),
            },
        };

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report_error(&e, options.verbose);
                ExitCode::from(e.exit_code())
            }
        }
    }
}

/// Print an error and its hint to stderr
fn report_error(error: &GwsError, verbose: bool) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    if let Some(hint) = error.hint() {
        eprintln!("\n{} {}", "Hint:".yellow(), hint);
    }
    if verbose {
        if !error.is_query_failure() {
            eprintln!("\nDetails: {:?}", error);
        }
        eprintln!("Exit code: {}", error.exit_code());
    } else if matches!(error, GwsError::TransportFailure(_)) {
        eprintln!("\nRun with --verbose for more details.");
    }
}
