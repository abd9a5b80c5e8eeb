//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::params::{RequestOptions, SearchMovieParams, SearchParams, SearchTvParams};
use super::types::{Company, Configuration, Episode, Genre, Movie, Network, Page, Person, Season, Tv};
use crate::error::Result;
use crate::value::Object;
use crate::view::Document;

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every operation fails with [`crate::Error::UnexpectedStatus`] on a
/// non-200 response, [`crate::Error::UnexpectedContentType`] on a non-JSON
/// response, [`crate::Error::Decode`] on a malformed body and
/// [`crate::Error::Transport`] when the request cannot be sent.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches `movie/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie(&self, id: u64, options: &RequestOptions) -> Result<Movie>;

    /// Fetches `tv/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn show(&self, id: u64, options: &RequestOptions) -> Result<Tv>;

    /// Fetches `tv/{show_id}/season/{season_number}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn season(
        &self,
        show_id: u64,
        season_number: u32,
        options: &RequestOptions,
    ) -> Result<Season>;

    /// Fetches `tv/{show_id}/season/{season_number}/episode/{episode_number}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn episode(
        &self,
        show_id: u64,
        season_number: u32,
        episode_number: u32,
        options: &RequestOptions,
    ) -> Result<Episode>;

    /// Fetches `person/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn person(&self, id: u64, options: &RequestOptions) -> Result<Person>;

    /// Fetches `company/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn company(&self, id: u64) -> Result<Company>;

    /// Fetches `network/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn network(&self, id: u64) -> Result<Network>;

    /// Fetches `genre/movie/list`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_genres(&self, options: &RequestOptions) -> Result<Vec<Genre>>;

    /// Fetches `genre/tv/list`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_genres(&self, options: &RequestOptions) -> Result<Vec<Genre>>;

    /// Fetches `configuration` without memoization.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn fetch_configuration(&self) -> Result<Configuration>;

    /// Fetches one page of `search/movie`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie_page(&self, params: &SearchMovieParams, page: u32) -> Result<Page<Movie>>;

    /// Fetches one page of `search/tv`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_tv_page(&self, params: &SearchTvParams, page: u32) -> Result<Page<Tv>>;

    /// Fetches one page of `search/person`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_person_page(&self, params: &SearchParams, page: u32) -> Result<Page<Person>>;

    /// Fetches one page of `search/multi`. Items are raw objects, to be
    /// read through [`crate::view::SearchResultView`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails, or if a
    /// result is not an object.
    async fn search_multi_page(&self, params: &SearchParams, page: u32) -> Result<Page<Object>>;

    /// Fetches any endpoint as a lazily navigable document.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the body is not a JSON
    /// object.
    async fn document(&self, path: &str, options: &RequestOptions) -> Result<Document>;
}
