//! Request options, append-to-response parts and search parameters.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::transport::{HttpRequest, HttpResponse};

/// Hook that may rewrite an outgoing request.
pub type RequestHook = Arc<dyn Fn(&mut HttpRequest) + Send + Sync>;

/// Hook that observes a raw response before it is checked.
pub type ResponseHook = Arc<dyn Fn(&HttpResponse) + Send + Sync>;

/// Per-call options shared by every endpoint.
#[derive(Clone, Default)]
pub struct RequestOptions {
    /// Response language (e.g. `ja-JP`). Falls back to the client default.
    pub language: Option<String>,
    /// `append_to_response` endpoint names.
    pub append: Vec<String>,
    /// Extra query parameters.
    pub query: Vec<(String, String)>,
    /// Request interceptor.
    on_request: Option<RequestHook>,
    /// Response interceptor.
    on_response: Option<ResponseHook>,
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("language", &self.language)
            .field("append", &self.append)
            .field("query", &self.query)
            .field("on_request", &self.on_request.is_some())
            .field("on_response", &self.on_response.is_some())
            .finish()
    }
}

impl RequestOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Appends a sub-resource to the response.
    #[must_use]
    pub fn append(mut self, part: impl AppendPart) -> Self {
        self.append.push(String::from(part.endpoint()));
        self
    }

    /// Appends several sub-resources.
    #[must_use]
    pub fn append_all<P: AppendPart>(mut self, parts: impl IntoIterator<Item = P>) -> Self {
        self.append
            .extend(parts.into_iter().map(|p| String::from(p.endpoint())));
        self
    }

    /// Adds a custom query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Installs a request interceptor.
    #[must_use]
    pub fn on_request(mut self, hook: impl Fn(&mut HttpRequest) + Send + Sync + 'static) -> Self {
        self.on_request = Some(Arc::new(hook));
        self
    }

    /// Installs a response interceptor.
    #[must_use]
    pub fn on_response(mut self, hook: impl Fn(&HttpResponse) + Send + Sync + 'static) -> Self {
        self.on_response = Some(Arc::new(hook));
        self
    }

    /// Runs the request interceptor, if any.
    pub(crate) fn intercept_request(&self, request: &mut HttpRequest) {
        if let Some(hook) = &self.on_request {
            hook(request);
        }
    }

    /// Runs the response interceptor, if any.
    pub(crate) fn intercept_response(&self, response: &HttpResponse) {
        if let Some(hook) = &self.on_response {
            hook(response);
        }
    }
}

/// Sorts, deduplicates and comma-joins `append_to_response` names.
///
/// ```
/// use reelmeta_api::tmdb::append_to_response;
///
/// assert_eq!(
///     append_to_response(["external_ids", "credits", "credits"]),
///     "credits,external_ids"
/// );
/// ```
#[must_use]
pub fn append_to_response<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> String {
    let set: BTreeSet<String> = names
        .into_iter()
        .map(|n| String::from(n.as_ref()))
        .filter(|n| !n.is_empty())
        .collect();
    set.into_iter().collect::<Vec<_>>().join(",")
}

/// A sub-resource that can be requested through `append_to_response`.
pub trait AppendPart {
    /// Endpoint name as sent on the wire.
    fn endpoint(&self) -> &'static str;
}

/// Declares an append-part enum with its wire names.
macro_rules! append_parts {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $(
                #[doc = concat!("`", $wire, "`")]
                $variant,
            )*
        }

        impl AppendPart for $name {
            fn endpoint(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)*
                }
            }
        }
    };
}

append_parts! {
    /// Sub-resources of `movie/{id}`.
    MovieAppend {
        AlternativeTitles => "alternative_titles",
        Changes => "changes",
        Credits => "credits",
        ExternalIds => "external_ids",
        Images => "images",
        Keywords => "keywords",
        Lists => "lists",
        Recommendations => "recommendations",
        ReleaseDates => "release_dates",
        Reviews => "reviews",
        Similar => "similar",
        Translations => "translations",
        Videos => "videos",
        WatchProviders => "watch/providers",
    }
}

append_parts! {
    /// Sub-resources of `tv/{id}`.
    TvAppend {
        AggregateCredits => "aggregate_credits",
        AlternativeTitles => "alternative_titles",
        ContentRatings => "content_ratings",
        Credits => "credits",
        EpisodeGroups => "episode_groups",
        ExternalIds => "external_ids",
        Images => "images",
        Keywords => "keywords",
        Recommendations => "recommendations",
        Reviews => "reviews",
        Similar => "similar",
        Translations => "translations",
        Videos => "videos",
        WatchProviders => "watch/providers",
    }
}

append_parts! {
    /// Sub-resources of `tv/{id}/season/{n}`.
    SeasonAppend {
        AggregateCredits => "aggregate_credits",
        Credits => "credits",
        ExternalIds => "external_ids",
        Images => "images",
        Translations => "translations",
        Videos => "videos",
    }
}

append_parts! {
    /// Sub-resources of `tv/{id}/season/{n}/episode/{m}`.
    EpisodeAppend {
        Credits => "credits",
        ExternalIds => "external_ids",
        Images => "images",
        Translations => "translations",
        Videos => "videos",
    }
}

append_parts! {
    /// Sub-resources of `person/{id}`.
    PersonAppend {
        CombinedCredits => "combined_credits",
        ExternalIds => "external_ids",
        Images => "images",
        MovieCredits => "movie_credits",
        TaggedImages => "tagged_images",
        Translations => "translations",
        TvCredits => "tv_credits",
    }
}

/// Parameters for `search/movie`.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language. Falls back to the client default.
    pub language: Option<String>,
    /// Filter by primary release year.
    pub primary_release_year: Option<u32>,
    /// Filter by year.
    pub year: Option<u32>,
    /// Region filter (ISO 3166-1).
    pub region: Option<String>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            primary_release_year: None,
            year: None,
            region: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the primary release year filter.
    #[must_use]
    pub const fn primary_release_year(mut self, year: u32) -> Self {
        self.primary_release_year = Some(year);
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the region filter.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Includes adult content.
    #[must_use]
    pub const fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = include;
        self
    }

    /// Query pairs for `page`.
    pub(crate) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("query", self.query.clone()),
            ("page", page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ];
        if let Some(year) = self.primary_release_year {
            query.push(("primary_release_year", year.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(ref region) = self.region {
            query.push(("region", region.clone()));
        }
        query
    }
}

/// Parameters for `search/tv`.
#[derive(Debug, Clone)]
pub struct SearchTvParams {
    /// Search query (required).
    pub query: String,
    /// Response language. Falls back to the client default.
    pub language: Option<String>,
    /// Filter by first air date year.
    pub first_air_date_year: Option<u32>,
    /// Filter by year (searches first air date and episode air dates).
    pub year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchTvParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            first_air_date_year: None,
            year: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the first air date year filter.
    #[must_use]
    pub const fn first_air_date_year(mut self, year: u32) -> Self {
        self.first_air_date_year = Some(year);
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Includes adult content.
    #[must_use]
    pub const fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = include;
        self
    }

    /// Query pairs for `page`.
    pub(crate) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("query", self.query.clone()),
            ("page", page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ];
        if let Some(year) = self.first_air_date_year {
            query.push(("first_air_date_year", year.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        query
    }
}

/// Parameters for `search/person` and `search/multi`.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Search query (required).
    pub query: String,
    /// Response language. Falls back to the client default.
    pub language: Option<String>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Includes adult content.
    #[must_use]
    pub const fn include_adult(mut self, include: bool) -> Self {
        self.include_adult = include;
        self
    }

    /// Query pairs for `page`.
    pub(crate) fn to_query(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("page", page.to_string()),
            ("include_adult", self.include_adult.to_string()),
        ]
    }
}

/// Where a paginated stream starts and how many pages it may fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    /// First page to fetch (1-indexed, values below 1 are raised to 1).
    pub start_page: u32,
    /// Upper bound on fetched pages. `None` follows `total_pages`.
    pub max_pages: Option<u32>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            start_page: 1,
            max_pages: None,
        }
    }
}

impl PageOptions {
    /// Starts at `page`.
    #[must_use]
    pub const fn start_page(mut self, page: u32) -> Self {
        self.start_page = page;
        self
    }

    /// Stops after `pages` fetched pages.
    #[must_use]
    pub const fn max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }
}
