//! Scientific Library Client - Entry Point
//!
//! Drives the search and detail view models from the command line.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scilib_client::config::{Config, api};
use scilib_client::detail::{DetailUiEvent, DetailUiState};
use scilib_client::formatters::{json, markdown};
use scilib_client::models::{ActiveFilter, Facet, PublicationDetail, ScoringField};
use scilib_client::search::{UiEvent, UiState};
use scilib_client::{
    ApiClient, DetailService, DetailViewModel, RemotePublicationDetailRepository,
    RemotePublicationRepository, ResultService, SearchViewModel,
};

#[derive(Parser, Debug)]
#[command(name = "scilib")]
#[command(about = "Search and browse scientific publications")]
#[command(version)]
struct Cli {
    /// Search backend base URL
    #[arg(long, default_value = api::BASE_URL, env = api::BASE_URL_ENV)]
    base_url: String,

    /// Results per page
    #[arg(long, default_value_t = api::PAGE_SIZE)]
    page_size: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print results as JSON instead of Markdown
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a search and print one or more pages
    Search(SearchArgs),
    /// Show a single publication
    Detail {
        /// Paper id
        paper_id: String,
        /// Hand the open-access PDF link to the system
        #[arg(long)]
        open_pdf: bool,
    },
    /// Autocomplete a facet value
    Suggest {
        /// author, journal, venue or pubType
        facet: Facet,
        /// Partial text
        query: String,
    },
    /// Show or replace the ranking weights
    Params(ParamsArgs),
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Free-text query
    query: String,

    /// Author filter (repeatable)
    #[arg(long = "author")]
    authors: Vec<String>,

    /// Journal filter (repeatable)
    #[arg(long = "journal")]
    journals: Vec<String>,

    /// Venue filter (repeatable)
    #[arg(long = "venue")]
    venues: Vec<String>,

    /// Publication type filter (repeatable)
    #[arg(long = "pub-type")]
    pub_types: Vec<String>,

    #[arg(long)]
    year: Option<String>,

    #[arg(long)]
    hindex_from: Option<String>,

    #[arg(long)]
    hindex_to: Option<String>,

    #[arg(long)]
    citations_from: Option<String>,

    #[arg(long)]
    citations_to: Option<String>,

    /// Earliest publication date (yyyy-MM-dd)
    #[arg(long)]
    date_from: Option<NaiveDate>,

    /// Latest publication date (yyyy-MM-dd)
    #[arg(long)]
    date_to: Option<NaiveDate>,

    /// Only open-access publications
    #[arg(long)]
    open_access: bool,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[derive(clap::Args, Debug)]
struct ParamsArgs {
    #[arg(long)]
    bm25: Option<String>,

    #[arg(long)]
    lambda: Option<String>,

    #[arg(long)]
    alpha: Option<String>,

    #[arg(long)]
    beta: Option<String>,

    #[arg(long)]
    gamma: Option<String>,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), base_url = %cli.base_url, "starting scilib");

    let config = Config::new(cli.base_url.clone()).with_page_size(cli.page_size);
    // Leave room for the server's own timeout before giving up on a state change.
    let wait_limit = config.request_timeout + Duration::from_secs(5);
    let client = ApiClient::new(config)?;

    match cli.command {
        Command::Search(args) => run_search(client, args, cli.page_size, cli.json, wait_limit).await,
        Command::Detail { paper_id, open_pdf } => {
            run_detail(client, paper_id, open_pdf, cli.json, wait_limit).await
        }
        Command::Suggest { facet, query } => {
            let service = ResultService::new(client);
            let values = service
                .get_suggestions(facet, &query)
                .await?
                .unwrap_or_default();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                values.iter().for_each(|v| println!("{v}"));
            }
            Ok(())
        }
        Command::Params(args) => run_params(client, args, wait_limit).await,
    }
}

async fn run_search(
    client: ApiClient,
    args: SearchArgs,
    page_size: u32,
    as_json: bool,
    wait_limit: Duration,
) -> anyhow::Result<()> {
    let repository = RemotePublicationRepository::new(ResultService::new(client));
    let vm = SearchViewModel::with_page_size(Arc::new(repository), page_size);
    let mut state = vm.subscribe();

    vm.on_event(UiEvent::QueryChanged(args.query));
    let chips = [
        (Facet::Author, args.authors),
        (Facet::Journal, args.journals),
        (Facet::Venue, args.venues),
        (Facet::PubType, args.pub_types),
    ];
    for (facet, values) in chips {
        for value in values {
            vm.on_event(UiEvent::AddFilter(ActiveFilter::new(facet, value)));
        }
    }
    let text_fields: [(fn(String) -> UiEvent, Option<String>); 5] = [
        (UiEvent::YearChanged, args.year),
        (UiEvent::HIndexFromChanged, args.hindex_from),
        (UiEvent::HIndexToChanged, args.hindex_to),
        (UiEvent::CitationsFromChanged, args.citations_from),
        (UiEvent::CitationsToChanged, args.citations_to),
    ];
    for (event, value) in text_fields {
        if let Some(value) = value {
            vm.on_event(event(value));
        }
    }
    vm.on_event(UiEvent::DateFromChanged(args.date_from));
    vm.on_event(UiEvent::DateToChanged(args.date_to));
    if args.open_access {
        vm.on_event(UiEvent::OpenAccessToggled);
    }

    vm.on_event(UiEvent::SearchClicked);
    wait_until_idle(&mut state, wait_limit).await?;

    for _ in 1..args.pages {
        if state.borrow().is_last_page {
            break;
        }
        vm.on_event(UiEvent::LoadMore);
        wait_until_idle(&mut state, wait_limit).await?;
    }

    let current = vm.state();
    if as_json {
        let items: Vec<_> = current.publications.iter().map(json::compact_publication).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        if !current.active_filters.is_empty() {
            println!("{}\n", markdown::format_active_filters(&current.active_filters));
        }
        println!("{}", markdown::format_publications_markdown(&current.publications));
        if current.is_last_page {
            println!("(end of results)");
        }
    }
    Ok(())
}

/// Wait for the running page fetch and fail with its error message, if any.
///
/// The message is read from the settled state, which is written in the same
/// update that clears `is_loading`.
async fn wait_until_idle(state: &mut watch::Receiver<UiState>, limit: Duration) -> anyhow::Result<()> {
    let idle = tokio::time::timeout(limit, state.wait_for(|s| !s.is_loading))
        .await
        .context("timed out waiting for search results")??;
    if let Some(message) = &idle.error_message {
        anyhow::bail!(message.clone());
    }
    Ok(())
}

/// Wait for the running detail load and return the publication or its error.
async fn wait_for_publication(
    state: &mut watch::Receiver<DetailUiState>,
    limit: Duration,
) -> anyhow::Result<PublicationDetail> {
    let loaded = tokio::time::timeout(limit, state.wait_for(|s| !s.is_loading))
        .await
        .context("timed out waiting for publication")??;
    if let Some(message) = &loaded.error_message {
        anyhow::bail!(message.clone());
    }
    loaded.publication.clone().context("server returned no publication")
}

async fn run_detail(
    client: ApiClient,
    paper_id: String,
    open_pdf: bool,
    as_json: bool,
    wait_limit: Duration,
) -> anyhow::Result<()> {
    let repository = RemotePublicationDetailRepository::new(DetailService::new(client));
    let vm = DetailViewModel::new(Arc::new(repository));
    let mut state = vm.subscribe();

    vm.on_event(DetailUiEvent::LoadPublication(paper_id));
    let detail = wait_for_publication(&mut state, wait_limit).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&json::compact_detail(&detail))?);
    } else {
        println!("{}", markdown::format_detail_markdown(&detail));
    }

    if open_pdf && !vm.open_pdf(&|url: &str| println!("PDF: {url}")) {
        eprintln!("No open-access PDF available.");
    }
    Ok(())
}

async fn run_params(client: ApiClient, args: ParamsArgs, wait_limit: Duration) -> anyhow::Result<()> {
    let repository = RemotePublicationRepository::new(ResultService::new(client));
    let vm = SearchViewModel::new(Arc::new(repository));
    let mut state = vm.subscribe();

    vm.on_event(UiEvent::AdjustParamsClicked);
    let loaded = tokio::time::timeout(
        wait_limit,
        state.wait_for(|s| s.scoring_params.is_some() || s.scoring_error.is_some()),
    )
    .await
    .context("timed out waiting for scoring parameters")??
    .clone();
    if let Some(err) = loaded.scoring_error {
        anyhow::bail!(err);
    }

    let edits = [
        (ScoringField::Bm25Parameter, args.bm25),
        (ScoringField::Lambda, args.lambda),
        (ScoringField::Alpha, args.alpha),
        (ScoringField::Beta, args.beta),
        (ScoringField::Gamma, args.gamma),
    ];
    if edits.iter().all(|(_, value)| value.is_none()) {
        if let Some(params) = loaded.scoring_params {
            println!("{}", markdown::format_scoring_params_markdown(&params));
        }
        return Ok(());
    }

    for (field, value) in edits {
        if let Some(value) = value {
            vm.on_event(UiEvent::ScoringFieldChanged(field, value));
        }
    }
    vm.on_event(UiEvent::UpdateAllParams);
    // The dialog closes synchronously; the next change is the reload or the failure.
    state.borrow_and_update();
    tokio::time::timeout(wait_limit, state.changed())
        .await
        .context("timed out waiting for the server to confirm")??;
    let done = vm.state();

    if let Some(err) = done.scoring_error {
        anyhow::bail!(err);
    }
    if let Some(params) = done.scoring_params {
        println!("{}", markdown::format_scoring_params_markdown(&params));
    }
    Ok(())
}
