//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints and decodes movies,
//! shows, seasons, episodes, people and search results.

mod api;
mod client;
mod graph;
mod keys;
mod pagination;
mod params;
mod search;
mod single_flight;
mod transport;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use graph::Graph;
pub use keys::{
    CompanyKey, CountryKey, CreditKey, EpisodeKey, GenreKey, Keyed, LanguageKey, MovieKey,
    NetworkKey, PersonKey, SeasonKey, ShowKey,
};
pub use pagination::{LocalPageSource, PageSource, paginate};
pub use params::{
    AppendPart, EpisodeAppend, MovieAppend, PageOptions, PersonAppend, RequestHook,
    RequestOptions, ResponseHook, SearchMovieParams, SearchParams, SearchTvParams, SeasonAppend,
    TvAppend, append_to_response,
};
pub use search::{search_movies, search_multi, search_people, search_shows};
pub use single_flight::SingleFlight;
pub use transport::{HttpRequest, HttpResponse, LocalTransport, ReqwestTransport, Transport};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    Company, Configuration, Country, Credit, Credits, Episode, ExternalIds, Genre,
    ImagesConfiguration, Language, Movie, Network, Page, Person, Season, TmdbErrorResponse, Tv,
};
