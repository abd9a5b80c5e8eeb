//! Search endpoints as item streams.
#![allow(clippy::future_not_send)]

use futures::Stream;

use super::api::LocalTmdbApi;
use super::pagination::{LocalPageSource, paginate};
use super::params::{PageOptions, SearchMovieParams, SearchParams, SearchTvParams};
use super::types::{Movie, Page, Person, Tv};
use crate::error::Result;
use crate::value::Object;

/// Declares a page source that forwards to one `*_page` API call.
macro_rules! search_source {
    ($name:ident, $params:ty, $item:ty, $call:ident) => {
        /// Page source over one search endpoint.
        struct $name<'a, A> {
            api: &'a A,
            params: $params,
        }

        impl<A: LocalTmdbApi> LocalPageSource for $name<'_, A> {
            type Item = $item;

            async fn fetch_page(&self, page: u32) -> Result<Page<$item>> {
                self.api.$call(&self.params, page).await
            }
        }
    };
}

search_source!(MovieSearch, SearchMovieParams, Movie, search_movie_page);
search_source!(TvSearch, SearchTvParams, Tv, search_tv_page);
search_source!(PersonSearch, SearchParams, Person, search_person_page);
search_source!(MultiSearch, SearchParams, Object, search_multi_page);

/// Streams every `search/movie` result.
pub fn search_movies<A: LocalTmdbApi>(
    api: &A,
    params: SearchMovieParams,
    options: PageOptions,
) -> impl Stream<Item = Result<Movie>> {
    paginate(MovieSearch { api, params }, options)
}

/// Streams every `search/tv` result.
pub fn search_shows<A: LocalTmdbApi>(
    api: &A,
    params: SearchTvParams,
    options: PageOptions,
) -> impl Stream<Item = Result<Tv>> {
    paginate(TvSearch { api, params }, options)
}

/// Streams every `search/person` result.
pub fn search_people<A: LocalTmdbApi>(
    api: &A,
    params: SearchParams,
    options: PageOptions,
) -> impl Stream<Item = Result<Person>> {
    paginate(PersonSearch { api, params }, options)
}

/// Streams every `search/multi` result as a raw object; wrap items with
/// [`crate::view::SearchResultView::from_object`].
pub fn search_multi<A: LocalTmdbApi>(
    api: &A,
    params: SearchParams,
    options: PageOptions,
) -> impl Stream<Item = Result<Object>> {
    paginate(MultiSearch { api, params }, options)
}
