use log::warn;

use crate::api::client::{ClientConfig, ScoreClient};
use crate::api::transport::Transport;
use crate::api::types::ScorePage;
use crate::api::Endpoint;
use crate::cli::args::{ColorArgs, FilterArgs, LwinArgs, VintageArgs, WineArgs};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::credentials::{CredentialProvider, LayeredCredentials, API_KEY};
use crate::error::Result;
use crate::output;
use crate::progress::{messages, ApiProgress, ProgressManager};

/// A score lookup requested on the command line
#[derive(Debug)]
pub enum ScoreCommand {
    Latest(FilterArgs),
    Historical(FilterArgs),
    Vintage(VintageArgs),
    Color(ColorArgs),
    Wine(WineArgs),
    Lwin(LwinArgs),
    Top(FilterArgs),
}

impl ScoreCommand {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Historical(_) => Endpoint::Historical,
            _ => Endpoint::Latest,
        }
    }

    pub fn filters(&self) -> &FilterArgs {
        match self {
            Self::Latest(filters) | Self::Historical(filters) | Self::Top(filters) => filters,
            Self::Vintage(args) => &args.filters,
            Self::Color(args) => &args.filters,
            Self::Wine(args) => &args.filters,
            Self::Lwin(args) => &args.filters,
        }
    }
}

/// Execute a score command
pub async fn execute(command: ScoreCommand, options: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let client_config = ClientConfig {
        base_url: config.base_url(),
        ..Default::default()
    };
    let credentials = LayeredCredentials::new(config).with_override(API_KEY, options.api_key.clone());
    let client = ScoreClient::new(client_config, credentials)?;

    let progress_manager = ProgressManager::new(options.quiet, options.verbose);
    let progress = ApiProgress::new(&progress_manager, &messages::querying(command.endpoint()));

    let offset = command.filters().offset.unwrap_or(0);
    let page = run_query(&client, command).await?;

    progress.finish_and_clear();
    progress_manager.show_message(&messages::query_complete(page.results.len(), page.count));

    if page.results.is_empty() && options.format == OutputFormat::Table {
        println!("No scores found matching your filters.");
        return Ok(());
    }

    let output = output::format_score_page(&page, offset, options.format)?;
    println!("{}", output);

    Ok(())
}

/// Dispatch a score command to the matching client operation
pub async fn run_query<C, T>(client: &ScoreClient<C, T>, command: ScoreCommand) -> Result<ScorePage>
where
    C: CredentialProvider,
    T: Transport,
{
    match command {
        ScoreCommand::Latest(filters) => client.query(Endpoint::Latest, &filters.to_filter()).await,
        ScoreCommand::Historical(filters) => {
            client
                .query(Endpoint::Historical, &filters.to_filter())
                .await
        }
        ScoreCommand::Vintage(args) => client.by_vintage(&args.year, args.filters.to_filter()).await,
        ScoreCommand::Color(args) => client.by_color(&args.name, args.filters.to_filter()).await,
        ScoreCommand::Wine(args) => client.by_wine_id(&args.id, args.filters.to_filter()).await,
        ScoreCommand::Lwin(args) => client.by_lwin(&args.id, args.filters.to_filter()).await,
        ScoreCommand::Top(filters) => {
            if filters.ordering.is_some() {
                warn!("--ordering is ignored by 'top', results are always sorted by score");
            }
            client.top_rated(filters.to_filter()).await
        }
    }
}
