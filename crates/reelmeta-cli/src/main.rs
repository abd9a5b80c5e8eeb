//! reelmeta - TMDB movie/TV metadata CLI.

/// Application configuration (TOML).
mod config;
/// Field paths and value rendering for `get`.
mod render;

use std::path::PathBuf;
use std::pin::pin;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use futures::{Stream, StreamExt};
use reelmeta_api::tmdb::{
    Episode, LocalTmdbApi, Movie, PageOptions, Person, RequestOptions, SearchMovieParams,
    SearchParams, SearchTvParams, Season, TmdbClient, Tv, search_movies, search_multi,
    search_people, search_shows,
};
use reelmeta_api::value::Object;
use reelmeta_api::view::SearchResultView;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TmdbConfig, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "reelmeta", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Get movie details.
    Movie(MovieArgs),
    /// Get TV show details.
    Show(ShowArgs),
    /// Get TV season details.
    Season(SeasonArgs),
    /// Get TV episode details.
    Episode(EpisodeArgs),
    /// Get person details.
    Person(PersonArgs),
    /// Search for movies.
    SearchMovie(SearchMovieArgs),
    /// Search for TV shows.
    SearchTv(SearchTvArgs),
    /// Search for people.
    SearchPerson(SearchArgs),
    /// Search movies, TV shows and people at once.
    SearchMulti(SearchArgs),
    /// Read or create the config file.
    Config(ConfigCommand),
    /// Fetch any endpoint and read one field lazily.
    Get(GetArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Options shared by the detail subcommands.
#[derive(clap::Args)]
struct DetailOptions {
    /// Response language (default: config or server default).
    #[arg(long)]
    language: Option<String>,
    /// Comma-separated `append_to_response` endpoints (e.g. "credits,external_ids").
    #[arg(long, value_delimiter = ',')]
    append: Vec<String>,
}

impl DetailOptions {
    /// Converts to per-call request options.
    fn to_request_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new();
        if let Some(language) = &self.language {
            options = options.language(language);
        }
        options.append.extend(self.append.iter().cloned());
        options
    }
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
    #[command(flatten)]
    options: DetailOptions,
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
    #[command(flatten)]
    options: DetailOptions,
}

/// Arguments for the `season` subcommand.
#[derive(clap::Args)]
struct SeasonArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Season number.
    #[arg(long, required = true)]
    season: u32,
    #[command(flatten)]
    options: DetailOptions,
}

/// Arguments for the `episode` subcommand.
#[derive(clap::Args)]
struct EpisodeArgs {
    /// TMDB series ID.
    #[arg(long, required = true)]
    id: u64,
    /// Season number.
    #[arg(long, required = true)]
    season: u32,
    /// Episode number.
    #[arg(long, required = true)]
    episode: u32,
    #[command(flatten)]
    options: DetailOptions,
}

/// Arguments for the `person` subcommand.
#[derive(clap::Args)]
struct PersonArgs {
    /// TMDB person ID.
    #[arg(long, required = true)]
    id: u64,
    #[command(flatten)]
    options: DetailOptions,
}

/// Paging options shared by the search subcommands.
#[derive(clap::Args)]
struct PagingArgs {
    /// First page to fetch.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Maximum number of pages to fetch.
    #[arg(long)]
    max_pages: Option<u32>,
    /// Stop after this many results.
    #[arg(long)]
    limit: Option<usize>,
}

impl PagingArgs {
    /// Converts to stream page options.
    fn to_page_options(&self) -> PageOptions {
        let options = PageOptions::default().start_page(self.page);
        match self.max_pages {
            Some(pages) => options.max_pages(pages),
            None => options,
        }
    }
}

/// Arguments for the `search-movie` subcommand.
#[derive(clap::Args)]
struct SearchMovieArgs {
    /// Search query (e.g. "Fight Club").
    #[arg(long, required = true)]
    query: String,
    /// Response language.
    #[arg(long)]
    language: Option<String>,
    /// Filter by year.
    #[arg(long)]
    year: Option<u32>,
    /// Filter by primary release year.
    #[arg(long)]
    primary_release_year: Option<u32>,
    /// ISO 3166-1 region filter.
    #[arg(long)]
    region: Option<String>,
    /// Include adult results.
    #[arg(long)]
    include_adult: bool,
    #[command(flatten)]
    paging: PagingArgs,
}

impl SearchMovieArgs {
    /// Converts to search parameters.
    fn to_params(&self) -> SearchMovieParams {
        let mut params = SearchMovieParams::new(&self.query).include_adult(self.include_adult);
        if let Some(language) = &self.language {
            params = params.language(language);
        }
        if let Some(year) = self.year {
            params = params.year(year);
        }
        if let Some(year) = self.primary_release_year {
            params = params.primary_release_year(year);
        }
        if let Some(region) = &self.region {
            params = params.region(region);
        }
        params
    }
}

/// Arguments for the `search-tv` subcommand.
#[derive(clap::Args)]
struct SearchTvArgs {
    /// Search query (e.g. "Game of Thrones").
    #[arg(long, required = true)]
    query: String,
    /// Response language.
    #[arg(long)]
    language: Option<String>,
    /// Filter by year.
    #[arg(long)]
    year: Option<u32>,
    /// Filter by first air date year.
    #[arg(long)]
    first_air_date_year: Option<u32>,
    /// Include adult results.
    #[arg(long)]
    include_adult: bool,
    #[command(flatten)]
    paging: PagingArgs,
}

impl SearchTvArgs {
    /// Converts to search parameters.
    fn to_params(&self) -> SearchTvParams {
        let mut params = SearchTvParams::new(&self.query).include_adult(self.include_adult);
        if let Some(language) = &self.language {
            params = params.language(language);
        }
        if let Some(year) = self.year {
            params = params.year(year);
        }
        if let Some(year) = self.first_air_date_year {
            params = params.first_air_date_year(year);
        }
        params
    }
}

/// Arguments for the `search-person` and `search-multi` subcommands.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query.
    #[arg(long, required = true)]
    query: String,
    /// Response language.
    #[arg(long)]
    language: Option<String>,
    /// Include adult results.
    #[arg(long)]
    include_adult: bool,
    #[command(flatten)]
    paging: PagingArgs,
}

impl SearchArgs {
    /// Converts to search parameters.
    fn to_params(&self) -> SearchParams {
        let mut params = SearchParams::new(&self.query).include_adult(self.include_adult);
        if let Some(language) = &self.language {
            params = params.language(language);
        }
        params
    }
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show the resolved config (credentials redacted).
    Show,
    /// Write a new config file.
    Init(ConfigInitArgs),
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct ConfigInitArgs {
    /// v3 API key to store.
    #[arg(long)]
    api_key: Option<String>,
    /// v4 bearer token to store.
    #[arg(long)]
    bearer_token: Option<String>,
    /// Default response language.
    #[arg(long)]
    language: Option<String>,
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

/// Arguments for the `get` subcommand.
#[derive(clap::Args)]
struct GetArgs {
    /// Endpoint path relative to the API base (e.g. "movie/550").
    #[arg(long, required = true)]
    path: String,
    /// Dotted field path (e.g. "credits.cast.0.name"). Prints the whole
    /// response when omitted.
    #[arg(long)]
    field: Option<String>,
    #[command(flatten)]
    options: DetailOptions,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: Shell,
}

/// Formats an optional value, `-` when absent.
fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-"), |v| v.to_string())
}

/// Loads the config for `dir`, with environment overrides applied.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir.map(PathBuf::as_path))?;
    AppConfig::load_with_env(&path)
}

/// Builds a `TmdbClient` from config.
///
/// # Errors
///
/// Returns an error if no credential is configured, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &TmdbConfig) -> Result<TmdbClient> {
    if !config.has_credentials() {
        bail!(
            "TMDB credentials are not configured: set {} or {} (or [tmdb].api_key in config.toml)",
            config::ENV_API_KEY,
            config::ENV_BEARER_TOKEN
        );
    }

    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(key) = &config.api_key {
        builder = builder.api_key(key);
    }
    if let Some(token) = &config.bearer_token {
        builder = builder.bearer_token(token);
    }
    if let Some(language) = &config.language {
        builder = builder.language(language);
    }
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(base_url) = &config.base_url {
        let url = Url::parse(base_url).with_context(|| format!("invalid base_url {base_url}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build TMDB client")
}

// --- Output ---

/// Logs movie details.
fn log_movie(movie: &Movie) {
    tracing::info!("ID: {}", or_dash(movie.id));
    tracing::info!("Title: {}", movie.title.as_deref().unwrap_or("-"));
    tracing::info!(
        "Original Title: {}",
        movie.original_title.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "Release Date: {}",
        movie.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!("Runtime: {}min", or_dash(movie.runtime));
    tracing::info!("Status: {}", movie.status.as_deref().unwrap_or("-"));
    if let Some(genres) = &movie.genres {
        let names: Vec<&str> = genres.iter().filter_map(|g| g.name.as_deref()).collect();
        tracing::info!("Genres: {}", names.join(", "));
    }
    if let Some(cast) = movie.credits.as_ref().and_then(|c| c.cast.as_ref()) {
        tracing::info!("Cast:");
        for member in cast {
            tracing::info!(
                "  {} as {}",
                member.name.as_deref().unwrap_or("-"),
                member.character.as_deref().unwrap_or("-"),
            );
        }
    }
}

/// Logs TV show details.
fn log_show(show: &Tv) {
    tracing::info!("ID: {}", or_dash(show.id));
    tracing::info!("Name: {}", show.name.as_deref().unwrap_or("-"));
    tracing::info!(
        "Original Name: {}",
        show.original_name.as_deref().unwrap_or("-")
    );
    tracing::info!(
        "First Air Date: {}",
        show.first_air_date.as_deref().unwrap_or("-")
    );
    tracing::info!("Status: {}", show.status.as_deref().unwrap_or("-"));
    tracing::info!("Seasons: {}", or_dash(show.number_of_seasons));
    tracing::info!("Episodes: {}", or_dash(show.number_of_episodes));
    tracing::info!("---");
    for season in show.seasons.iter().flatten() {
        tracing::info!(
            "  Season {}: {} episodes (air_date: {})",
            or_dash(season.season_number),
            or_dash(season.episode_count),
            season.air_date.as_deref().unwrap_or("-"),
        );
    }
}

/// Logs season details with its episode list.
fn log_season(season: &Season) {
    tracing::info!(
        "Season {}: {}",
        or_dash(season.season_number),
        season.name.as_deref().unwrap_or("-")
    );
    tracing::info!("Episodes:");
    for ep in season.episodes.iter().flatten() {
        tracing::info!(
            "  E{:02}: {} (air_date: {}, runtime: {}min)",
            ep.episode_number.unwrap_or_default(),
            ep.name.as_deref().unwrap_or("-"),
            ep.air_date.as_deref().unwrap_or("-"),
            or_dash(ep.runtime),
        );
    }
}

/// Logs episode details.
fn log_episode(episode: &Episode) {
    tracing::info!(
        "S{:02}E{:02}: {}",
        episode.season_number.unwrap_or_default(),
        episode.episode_number.unwrap_or_default(),
        episode.name.as_deref().unwrap_or("-")
    );
    tracing::info!("Air Date: {}", episode.air_date.as_deref().unwrap_or("-"));
    tracing::info!("Runtime: {}min", or_dash(episode.runtime));
    for crew in episode.crew.iter().flatten() {
        tracing::info!(
            "  {}: {}",
            crew.job.as_deref().unwrap_or("-"),
            crew.name.as_deref().unwrap_or("-")
        );
    }
    for guest in episode.guest_stars.iter().flatten() {
        tracing::info!(
            "  Guest: {} as {}",
            guest.name.as_deref().unwrap_or("-"),
            guest.character.as_deref().unwrap_or("-")
        );
    }
}

/// Logs person details.
fn log_person(person: &Person) {
    tracing::info!("ID: {}", or_dash(person.id));
    tracing::info!("Name: {}", person.name.as_deref().unwrap_or("-"));
    tracing::info!(
        "Known For: {}",
        person.known_for_department.as_deref().unwrap_or("-")
    );
    tracing::info!("Birthday: {}", person.birthday.as_deref().unwrap_or("-"));
    tracing::info!("Deathday: {}", person.deathday.as_deref().unwrap_or("-"));
    tracing::info!(
        "Place of Birth: {}",
        person.place_of_birth.as_deref().unwrap_or("-")
    );
    if let Some(cast) = person.movie_credits.as_ref().and_then(|c| c.cast.as_ref()) {
        tracing::info!("Movie Credits: {}", cast.len());
    }
}

/// Logs one multi-search result.
fn log_multi_result(object: &Object) {
    match SearchResultView::from_object(object) {
        Ok(result) => tracing::info!(
            "{}\t{}\t{}",
            result.media_type(),
            or_dash(result.id().ok()),
            result.display_name().unwrap_or("-"),
        ),
        Err(e) => tracing::warn!("skipping result: {e}"),
    }
}

/// Drains a search stream, calling `each` per item.
///
/// # Errors
///
/// Returns the first error the stream yields.
async fn drain<T>(
    stream: impl Stream<Item = reelmeta_api::Result<T>>,
    limit: Option<usize>,
    mut each: impl FnMut(&T),
) -> Result<usize> {
    let mut stream = pin!(stream.take(limit.unwrap_or(usize::MAX)));
    let mut count = 0_usize;
    while let Some(item) = stream.next().await {
        let item = item.context("TMDB search request failed")?;
        each(&item);
        count = count.saturating_add(1);
    }
    Ok(count)
}

// --- Subcommands ---

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_movie(client: &TmdbClient, args: &MovieArgs) -> Result<()> {
    let movie = client
        .movie(args.id, &args.options.to_request_options())
        .await
        .context("TMDB movie request failed")?;
    log_movie(&movie);
    Ok(())
}

/// Runs the `show` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_show(client: &TmdbClient, args: &ShowArgs) -> Result<()> {
    let show = client
        .show(args.id, &args.options.to_request_options())
        .await
        .context("TMDB tv request failed")?;
    log_show(&show);
    Ok(())
}

/// Runs the `season` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_season(client: &TmdbClient, args: &SeasonArgs) -> Result<()> {
    let season = client
        .season(args.id, args.season, &args.options.to_request_options())
        .await
        .context("TMDB season request failed")?;
    log_season(&season);
    Ok(())
}

/// Runs the `episode` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_episode(client: &TmdbClient, args: &EpisodeArgs) -> Result<()> {
    let episode = client
        .episode(
            args.id,
            args.season,
            args.episode,
            &args.options.to_request_options(),
        )
        .await
        .context("TMDB episode request failed")?;
    log_episode(&episode);
    Ok(())
}

/// Runs the `person` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_person(client: &TmdbClient, args: &PersonArgs) -> Result<()> {
    let person = client
        .person(args.id, &args.options.to_request_options())
        .await
        .context("TMDB person request failed")?;
    log_person(&person);
    Ok(())
}

/// Runs the `search-movie` subcommand.
///
/// # Errors
///
/// Returns an error if a page request fails.
#[instrument(skip_all)]
async fn run_search_movie(client: &TmdbClient, args: &SearchMovieArgs) -> Result<()> {
    tracing::info!("ID\tTitle\t\t\tOrigLang\tReleaseDate");
    let stream = search_movies(client, args.to_params(), args.paging.to_page_options());
    let total = drain(stream, args.paging.limit, |movie| {
        tracing::info!(
            "{}\t{}\t{}\t\t{}",
            or_dash(movie.id),
            movie.title.as_deref().unwrap_or("-"),
            movie.original_language.as_deref().unwrap_or("-"),
            movie.release_date.as_deref().unwrap_or("-"),
        );
    })
    .await?;
    tracing::info!("Total: {total} movies");
    Ok(())
}

/// Runs the `search-tv` subcommand.
///
/// # Errors
///
/// Returns an error if a page request fails.
#[instrument(skip_all)]
async fn run_search_tv(client: &TmdbClient, args: &SearchTvArgs) -> Result<()> {
    tracing::info!("ID\tName\t\t\tOrigLang\tCountry\t\tFirstAirDate");
    let stream = search_shows(client, args.to_params(), args.paging.to_page_options());
    let total = drain(stream, args.paging.limit, |show| {
        tracing::info!(
            "{}\t\t{}\t{}\t\t{}\t\t{}",
            or_dash(show.id),
            show.name.as_deref().unwrap_or("-"),
            show.original_language.as_deref().unwrap_or("-"),
            show.origin_country.as_deref().map_or_else(String::new, |c| c.join(",")),
            show.first_air_date.as_deref().unwrap_or("-"),
        );
    })
    .await?;
    tracing::info!("Total: {total} shows");
    Ok(())
}

/// Runs the `search-person` subcommand.
///
/// # Errors
///
/// Returns an error if a page request fails.
#[instrument(skip_all)]
async fn run_search_person(client: &TmdbClient, args: &SearchArgs) -> Result<()> {
    tracing::info!("ID\tName\t\t\tKnownFor");
    let stream = search_people(client, args.to_params(), args.paging.to_page_options());
    let total = drain(stream, args.paging.limit, |person| {
        tracing::info!(
            "{}\t{}\t{}",
            or_dash(person.id),
            person.name.as_deref().unwrap_or("-"),
            person.known_for_department.as_deref().unwrap_or("-"),
        );
    })
    .await?;
    tracing::info!("Total: {total} people");
    Ok(())
}

/// Runs the `search-multi` subcommand.
///
/// # Errors
///
/// Returns an error if a page request fails.
#[instrument(skip_all)]
async fn run_search_multi(client: &TmdbClient, args: &SearchArgs) -> Result<()> {
    tracing::info!("Type\tID\tName");
    let stream = search_multi(client, args.to_params(), args.paging.to_page_options());
    let total = drain(stream, args.paging.limit, log_multi_result).await?;
    tracing::info!("Total: {total} results");
    Ok(())
}

/// Runs the `get` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails or the field cannot be read.
#[instrument(skip_all)]
async fn run_get(client: &TmdbClient, args: &GetArgs) -> Result<()> {
    let document = client
        .document(&args.path, &args.options.to_request_options())
        .await
        .with_context(|| format!("TMDB request for {} failed", args.path))?;

    let Some(field) = &args.field else {
        tracing::info!("{}", render::render_object(document.object())?);
        return Ok(());
    };
    let value = render::select(document.object(), field)?
        .force()
        .with_context(|| format!("cannot read {field}"))?;
    tracing::info!("{}", render::render(value)?);
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir.map(PathBuf::as_path))?;
    let config = AppConfig::load_with_env(&path)?;
    let tmdb = &config.tmdb;

    tracing::info!("Config: {}", path.display());
    tracing::info!("api_key: {}", config::redact(tmdb.api_key.as_deref()));
    tracing::info!(
        "bearer_token: {}",
        config::redact(tmdb.bearer_token.as_deref())
    );
    tracing::info!("language: {}", tmdb.language.as_deref().unwrap_or("-"));
    tracing::info!("base_url: {}", tmdb.base_url.as_deref().unwrap_or("-"));
    tracing::info!("timeout_secs: {}", or_dash(tmdb.timeout_secs));
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists without `--force` or cannot be written.
fn run_config_init(args: &ConfigInitArgs, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir.map(PathBuf::as_path))?;
    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = AppConfig {
        tmdb: TmdbConfig {
            api_key: args.api_key.clone(),
            bearer_token: args.bearer_token.clone(),
            language: args.language.clone(),
            ..TmdbConfig::default()
        },
    };
    config.save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Writes shell completions to stdout.
fn run_completions(args: &CompletionsArgs) {
    let mut command = Cli::command();
    let name = command.get_name().to_owned();
    clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
}

/// Runs a subcommand that talks to TMDB.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the subcommand fails.
async fn run_api_command(command: Commands, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;
    match command {
        Commands::Movie(args) => run_movie(&client, &args).await,
        Commands::Show(args) => run_show(&client, &args).await,
        Commands::Season(args) => run_season(&client, &args).await,
        Commands::Episode(args) => run_episode(&client, &args).await,
        Commands::Person(args) => run_person(&client, &args).await,
        Commands::SearchMovie(args) => run_search_movie(&client, &args).await,
        Commands::SearchTv(args) => run_search_tv(&client, &args).await,
        Commands::SearchPerson(args) => run_search_person(&client, &args).await,
        Commands::SearchMulti(args) => run_search_multi(&client, &args).await,
        Commands::Get(args) => run_get(&client, &args).await,
        Commands::Config(_) | Commands::Completions(_) => Ok(()),
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(dir),
            ConfigSubcommands::Init(args) => run_config_init(&args, dir),
        },
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
        command => run_api_command(command, dir).await,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        // Arrange & Act & Assert
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_movie_prints_summary() {
        // Arrange
        let json = include_str!("../../../fixtures/tmdb/movie_550.json");
        let movie: Movie = serde_json::from_str(json).unwrap();
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("ID: 550")))
            .event(expect::event().with_fields(expect::msg("Title: Fight Club")))
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_movie(&movie);
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_log_season_formats_episode_numbers() {
        // Arrange
        let json = include_str!("../../../fixtures/tmdb/tv_1399_season_1.json");
        let season: Season = serde_json::from_str(json).unwrap();
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("Season 1: Season 1")))
            .event(expect::event().with_fields(expect::msg("Episodes:")))
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_season(&season);
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_log_multi_result_dispatches_on_media_type() {
        // Arrange
        let json = br#"{"media_type": "tv", "id": 1399, "name": "Game of Thrones"}"#;
        let doc = reelmeta_api::view::Document::from_slice(json).unwrap();
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().with_fields(expect::msg("tv\t1399\tGame of Thrones")))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_multi_result(doc.object());
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_log_multi_result_warns_on_unknown_type() {
        // Arrange
        let json = br#"{"media_type": "collection", "id": 10}"#;
        let doc = reelmeta_api::view::Document::from_slice(json).unwrap();
        let (subscriber, handle) = subscriber::mock()
            .event(expect::event().at_level(tracing::Level::WARN))
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            log_multi_result(doc.object());
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_build_client_requires_credentials() {
        // Arrange
        let config = TmdbConfig::default();

        // Act
        let err = build_tmdb_client(&config).unwrap_err();

        // Assert
        assert!(err.to_string().contains("TMDB_API_KEY"));
    }

    #[test]
    fn test_build_client_uses_configured_base_url() {
        // Arrange
        let config = TmdbConfig {
            api_key: Some(String::from("k")),
            base_url: Some(String::from("http://localhost:9000/3")),
            ..TmdbConfig::default()
        };

        // Act
        let client = build_tmdb_client(&config).unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), "http://localhost:9000/3/");
    }

    #[test]
    fn test_detail_options_to_request_options() {
        // Arrange
        let options = DetailOptions {
            language: Some(String::from("ja-JP")),
            append: vec![String::from("credits"), String::from("images")],
        };

        // Act
        let request = options.to_request_options();

        // Assert
        assert_eq!(request.language.as_deref(), Some("ja-JP"));
        assert_eq!(request.append, vec!["credits", "images"]);
    }

    #[test]
    fn test_paging_args_to_page_options() {
        // Arrange
        let paging = PagingArgs {
            page: 2,
            max_pages: Some(3),
            limit: None,
        };

        // Act
        let options = paging.to_page_options();

        // Assert
        assert_eq!(options, PageOptions::default().start_page(2).max_pages(3));
    }

    #[test]
    fn test_search_args_include_adult_flag() {
        // Arrange
        let movie = Cli::try_parse_from([
            "reelmeta", "search-movie", "--query", "x", "--include-adult", "--region", "JP",
        ])
        .unwrap();
        let tv = Cli::try_parse_from(["reelmeta", "search-tv", "--query", "y"]).unwrap();

        // Act
        let Commands::SearchMovie(movie_args) = movie.command else {
            panic!("expected search-movie");
        };
        let Commands::SearchTv(tv_args) = tv.command else {
            panic!("expected search-tv");
        };
        let movie_params = movie_args.to_params();
        let tv_params = tv_args.to_params();

        // Assert
        assert!(movie_params.include_adult);
        assert_eq!(movie_params.region.as_deref(), Some("JP"));
        assert!(!tv_params.include_adult);
        assert_eq!(tv_params.query, "y");
    }
}
