//! `TmdbClient` - TMDB API client implementation.
#![allow(clippy::future_not_send)]

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::params::{
    RequestOptions, SearchMovieParams, SearchParams, SearchTvParams, append_to_response,
};
use super::single_flight::SingleFlight;
use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use super::types::{
    Company, Configuration, Episode, Genre, GenreList, Movie, Network, Page, Person, Season,
    TmdbErrorResponse, Tv,
};
use crate::error::{Error, Result};
use crate::value::{DecodeError, Object, Value};
use crate::view::Document;

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// User-Agent sent when none is configured.
const DEFAULT_USER_AGENT: &str = concat!("reelmeta/", env!("CARGO_PKG_VERSION"));

/// API credentials. Both are optional; TMDB accepts either.
#[derive(Clone)]
struct Credentials {
    /// v3 API key, sent as the `api_key` query parameter.
    api_key: Option<String>,
    /// v4 read access token, sent as `Authorization: Bearer`.
    bearer_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("bearer_token", &redact(&self.bearer_token))
            .finish()
    }
}

/// TMDB API client.
///
/// Cheap to clone: clones share the transport and the configuration memo.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient<T = ReqwestTransport> {
    /// HTTP transport.
    transport: Arc<T>,
    /// Base URL for API requests (always ends with `/`).
    base_url: Url,
    /// API credentials.
    credentials: Credentials,
    /// Default response language.
    language: Option<String>,
    /// Memoized `configuration` response.
    configuration: Arc<SingleFlight<Arc<Configuration>>>,
}

impl<T> Clone for TmdbClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
            credentials: self.credentials.clone(),
            language: self.language.clone(),
            configuration: Arc::clone(&self.configuration),
        }
    }
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    credentials: Credentials,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    language: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            credentials: Credentials {
                api_key: None,
                bearer_token: None,
            },
            user_agent: None,
            timeout: None,
            language: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.credentials.api_key = Some(key.into());
        self
    }

    /// Sets the v4 bearer token.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.bearer_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (default: `reelmeta/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the default response language (e.g. `en-US`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds the client with the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the base URL cannot be used or
    /// the HTTP client cannot be built.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = ReqwestTransport::new(user_agent, self.timeout)?;
        self.build_with_transport(transport)
    }

    /// Builds the client around a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the base URL cannot be used.
    pub fn build_with_transport<T>(self, transport: T) -> Result<TmdbClient<T>> {
        let mut base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| Error::InvalidRequest(format!("invalid default base URL: {e}")))?,
        };
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidRequest(format!(
                "base URL cannot be a base: {base_url}"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(TmdbClient {
            transport: Arc::new(transport),
            base_url,
            credentials: self.credentials,
            language: self.language,
            configuration: Arc::new(SingleFlight::new()),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }
}

impl<T> TmdbClient<T> {
    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the GET request for `path`: auth, language,
    /// `append_to_response`, endpoint parameters, then custom parameters.
    fn build_request(
        &self,
        path: &str,
        options: &RequestOptions,
        params: &[(&str, String)],
    ) -> Result<HttpRequest> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidRequest(format!("failed to join URL path {path}: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            if let Some(key) = &self.credentials.api_key {
                pairs.append_pair("api_key", key);
            }
            if let Some(language) = options.language.as_deref().or(self.language.as_deref()) {
                pairs.append_pair("language", language);
            }
            if !options.append.is_empty() {
                pairs.append_pair("append_to_response", &append_to_response(&options.append));
            }
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            for (key, value) in &options.query {
                pairs.append_pair(key, value);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        let mut request = HttpRequest::get(url).header("Accept", "application/json");
        if let Some(token) = &self.credentials.bearer_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        Ok(request)
    }
}

/// Whether `content_type` names JSON, ignoring parameters such as `charset`.
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}

/// Enforces the response contract: status 200 and a JSON content type.
fn check_response(response: HttpResponse) -> Result<Vec<u8>> {
    if response.status != 200 {
        let message = serde_json::from_slice::<TmdbErrorResponse>(&response.body)
            .ok()
            .map(|e| e.status_message);
        tracing::debug!(status = response.status, ?message, "TMDB API error");
        return Err(Error::UnexpectedStatus {
            code: response.status,
            message,
        });
    }

    let content_type = response.content_type.unwrap_or_default();
    if !is_json(&content_type) {
        return Err(Error::UnexpectedContentType { got: content_type });
    }
    Ok(response.body)
}

/// Options carrying only a language override.
fn language_options(language: Option<&str>) -> RequestOptions {
    match language {
        Some(language) => RequestOptions::new().language(language),
        None => RequestOptions::new(),
    }
}

impl<T> TmdbClient<T>
where
    T: Transport + Send + Sync + 'static,
{
    /// Sends a GET request and returns the checked body.
    #[instrument(skip_all)]
    async fn execute(
        &self,
        path: &str,
        options: &RequestOptions,
        params: &[(&str, String)],
    ) -> Result<Vec<u8>> {
        let mut request = self.build_request(path, options, params)?;
        options.intercept_request(&mut request);

        // The URL carries the API key; log the path only.
        tracing::debug!(path, "TMDB API request");

        let response = self.transport.execute(request).await?;
        options.intercept_response(&response);
        check_response(response)
    }

    /// Sends a GET request and decodes the body into `D`.
    async fn get_json<D: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
        params: &[(&str, String)],
    ) -> Result<D> {
        let body = self.execute(path, options, params).await?;
        serde_json::from_slice(&body).map_err(|e| Error::Decode(DecodeError::from(e)))
    }

    /// Fetches `path` as a [`Document`].
    async fn fetch_document(&self, path: &str, options: &RequestOptions) -> Result<Document> {
        let body = self.execute(path, options, &[]).await?;
        Ok(Document::from_slice(&body)?)
    }

    /// Returns the API configuration, fetching it at most once.
    ///
    /// Concurrent first callers share one request. A failed fetch is not
    /// memoized: the next call fetches again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationUnavailable`] wrapping the error of
    /// the shared fetch.
    #[instrument(skip_all)]
    pub async fn configuration(&self) -> Result<Arc<Configuration>> {
        let client = self.clone();
        self.configuration
            .get_or_try_init(move || async move {
                tracing::debug!("fetching configuration");
                client
                    .get_json::<Configuration>("configuration", &RequestOptions::new(), &[])
                    .await
                    .map(Arc::new)
            })
            .await
            .map_err(Error::ConfigurationUnavailable)
    }

    /// Fetches `movie/{id}` as a lazily navigable document.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the body is not a JSON
    /// object.
    pub async fn movie_document(&self, id: u64, options: &RequestOptions) -> Result<Document> {
        self.fetch_document(&format!("movie/{id}"), options).await
    }

    /// Fetches `tv/{id}` as a lazily navigable document.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the body is not a JSON
    /// object.
    pub async fn show_document(&self, id: u64, options: &RequestOptions) -> Result<Document> {
        self.fetch_document(&format!("tv/{id}"), options).await
    }

    /// Fetches `person/{id}` as a lazily navigable document.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the body is not a JSON
    /// object.
    pub async fn person_document(&self, id: u64, options: &RequestOptions) -> Result<Document> {
        self.fetch_document(&format!("person/{id}"), options).await
    }
}

impl<T> LocalTmdbApi for TmdbClient<T>
where
    T: Transport + Send + Sync + 'static,
{
    #[instrument(skip_all)]
    async fn movie(&self, id: u64, options: &RequestOptions) -> Result<Movie> {
        self.get_json(&format!("movie/{id}"), options, &[]).await
    }

    #[instrument(skip_all)]
    async fn show(&self, id: u64, options: &RequestOptions) -> Result<Tv> {
        self.get_json(&format!("tv/{id}"), options, &[]).await
    }

    #[instrument(skip_all)]
    async fn season(
        &self,
        show_id: u64,
        season_number: u32,
        options: &RequestOptions,
    ) -> Result<Season> {
        let path = format!("tv/{show_id}/season/{season_number}");
        self.get_json(&path, options, &[]).await
    }

    #[instrument(skip_all)]
    async fn episode(
        &self,
        show_id: u64,
        season_number: u32,
        episode_number: u32,
        options: &RequestOptions,
    ) -> Result<Episode> {
        let path = format!("tv/{show_id}/season/{season_number}/episode/{episode_number}");
        self.get_json(&path, options, &[]).await
    }

    #[instrument(skip_all)]
    async fn person(&self, id: u64, options: &RequestOptions) -> Result<Person> {
        self.get_json(&format!("person/{id}"), options, &[]).await
    }

    #[instrument(skip_all)]
    async fn company(&self, id: u64) -> Result<Company> {
        self.get_json(&format!("company/{id}"), &RequestOptions::new(), &[])
            .await
    }

    #[instrument(skip_all)]
    async fn network(&self, id: u64) -> Result<Network> {
        self.get_json(&format!("network/{id}"), &RequestOptions::new(), &[])
            .await
    }

    #[instrument(skip_all)]
    async fn movie_genres(&self, options: &RequestOptions) -> Result<Vec<Genre>> {
        let list: GenreList = self.get_json("genre/movie/list", options, &[]).await?;
        Ok(list.genres)
    }

    #[instrument(skip_all)]
    async fn tv_genres(&self, options: &RequestOptions) -> Result<Vec<Genre>> {
        let list: GenreList = self.get_json("genre/tv/list", options, &[]).await?;
        Ok(list.genres)
    }

    #[instrument(skip_all)]
    async fn fetch_configuration(&self) -> Result<Configuration> {
        self.get_json("configuration", &RequestOptions::new(), &[])
            .await
    }

    #[instrument(skip_all)]
    async fn search_movie_page(&self, params: &SearchMovieParams, page: u32) -> Result<Page<Movie>> {
        let options = language_options(params.language.as_deref());
        self.get_json("search/movie", &options, &params.to_query(page))
            .await
    }

    #[instrument(skip_all)]
    async fn search_tv_page(&self, params: &SearchTvParams, page: u32) -> Result<Page<Tv>> {
        let options = language_options(params.language.as_deref());
        self.get_json("search/tv", &options, &params.to_query(page))
            .await
    }

    #[instrument(skip_all)]
    async fn search_person_page(&self, params: &SearchParams, page: u32) -> Result<Page<Person>> {
        let options = language_options(params.language.as_deref());
        self.get_json("search/person", &options, &params.to_query(page))
            .await
    }

    #[instrument(skip_all)]
    async fn search_multi_page(&self, params: &SearchParams, page: u32) -> Result<Page<Object>> {
        let options = language_options(params.language.as_deref());
        let raw: Page<Value> = self
            .get_json("search/multi", &options, &params.to_query(page))
            .await?;
        let objects = raw.try_map(|item| match item {
            Value::Object(object) => Ok(object),
            other => Err(DecodeError::NotAnObject {
                actual: other.kind(),
            }),
        })?;
        Ok(objects)
    }

    #[instrument(skip_all)]
    async fn document(&self, path: &str, options: &RequestOptions) -> Result<Document> {
        self.fetch_document(path, options).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use std::sync::Mutex;

    use futures::StreamExt;
    use futures::future::join_all;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::tmdb::{MovieAppend, PageOptions, search_movies, search_multi, search_people, search_shows};
    use crate::view::{MediaType, MovieView, SearchResultView, View};

    fn json_response(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/json")
    }

    fn client_for(server: &MockServer) -> TmdbClient {
        TmdbClient::builder()
            .base_url(format!("{}/3/", server.uri()).parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let client = TmdbClient::builder().build().unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_adds_trailing_slash() {
        // Arrange
        let custom_url = Url::parse("http://localhost:8080/3").unwrap();

        // Act
        let client = TmdbClient::builder().base_url(custom_url).build().unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/3/");
    }

    #[test]
    fn test_debug_redacts_credentials() {
        // Arrange
        let client = TmdbClient::builder()
            .api_key("super-secret-key")
            .bearer_token("super-secret-token")
            .build()
            .unwrap();

        // Act
        let debug = format!("{client:?}");

        // Assert
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_build_request_query_and_headers() {
        // Arrange
        let client = TmdbClient::builder()
            .api_key("k")
            .bearer_token("t")
            .language("en-US")
            .build()
            .unwrap();
        let options = RequestOptions::new()
            .language("ja-JP")
            .append(MovieAppend::ExternalIds)
            .append(MovieAppend::Credits)
            .query("region", "JP");

        // Act
        let request = client.build_request("movie/550", &options, &[]).unwrap();

        // Assert
        let pairs: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
        assert_eq!(request.url.path(), "/3/movie/550");
        assert!(pairs.contains(&(String::from("api_key"), String::from("k"))));
        assert!(pairs.contains(&(String::from("language"), String::from("ja-JP"))));
        assert!(pairs.contains(&(
            String::from("append_to_response"),
            String::from("credits,external_ids")
        )));
        assert!(pairs.contains(&(String::from("region"), String::from("JP"))));
        assert_eq!(request.header_value("Accept"), Some("application/json"));
        assert_eq!(request.header_value("Authorization"), Some("Bearer t"));
    }

    #[test]
    fn test_build_request_without_query_has_no_question_mark() {
        // Arrange
        let client = TmdbClient::builder().build().unwrap();

        // Act
        let request = client
            .build_request("configuration", &RequestOptions::new(), &[])
            .unwrap();

        // Assert
        assert_eq!(request.url.query(), None);
        assert_eq!(request.header_value("Authorization"), None);
    }

    #[test]
    fn test_is_json() {
        // Arrange & Act & Assert
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("Application/JSON"));
        assert!(!is_json("text/html"));
        assert!(!is_json("application/jsonp"));
        assert!(!is_json(""));
    }

    #[tokio::test]
    async fn test_movie_via_http_with_append() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_550.json");

        Mock::given(method("GET"))
            .and(path("/3/movie/550"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("append_to_response", "credits,external_ids"))
            .and(header("Accept", "application/json"))
            .respond_with(json_response(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let options = RequestOptions::new().append_all([MovieAppend::ExternalIds, MovieAppend::Credits]);

        // Act
        let movie = client.movie(550, &options).await.unwrap();

        // Assert
        assert_eq!(movie.title.as_deref(), Some("Fight Club"));
        assert_eq!(movie.credits.unwrap().cast.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/configuration.json");

        Mock::given(method("GET"))
            .and(header("Authorization", "Bearer my-secret-token"))
            .and(query_param_is_missing("api_key"))
            .respond_with(json_response(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TmdbClient::builder()
            .base_url(format!("{}/3/", mock_server.uri()).parse().unwrap())
            .bearer_token("my-secret-token")
            .build()
            .unwrap();

        // Act & Assert (mock expect(1) verifies Authorization header)
        client.fetch_configuration().await.unwrap();
    }

    #[tokio::test]
    async fn test_http_404_returns_unexpected_status() {
        // Arrange
        let mock_server = MockServer::start().await;
        let error_body = r#"{"success":false,"status_code":34,"status_message":"The resource you requested could not be found."}"#;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_raw(error_body.as_bytes().to_vec(), "application/json"),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        // Act
        let result = client.movie(0, &RequestOptions::new()).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(err.status(), Some(404));
        let Error::UnexpectedStatus { message, .. } = err else {
            panic!("expected UnexpectedStatus");
        };
        assert_eq!(
            message.as_deref(),
            Some("The resource you requested could not be found.")
        );
    }

    #[tokio::test]
    async fn test_http_error_without_envelope() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_raw(b"Bad Gateway".to_vec(), "text/plain"))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client.network(49).await.unwrap_err();

        // Assert
        assert!(matches!(
            err,
            Error::UnexpectedStatus {
                code: 502,
                message: None
            }
        ));
    }

    #[tokio::test]
    async fn test_non_json_content_type_is_rejected() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"<html></html>".to_vec(), "text/html"))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client.person(287, &RequestOptions::new()).await.unwrap_err();

        // Assert
        let Error::UnexpectedContentType { got } = err else {
            panic!("expected UnexpectedContentType, got {err:?}");
        };
        assert_eq!(got, "text/html");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(json_response("{\"id\": 550,"))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let err = client.movie(550, &RequestOptions::new()).await.unwrap_err();

        // Assert
        assert!(matches!(err, Error::Decode(DecodeError::Json { .. })));
    }

    #[tokio::test]
    async fn test_default_language_and_override() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/genres_movie.json");
        Mock::given(method("GET"))
            .and(path("/3/genre/movie/list"))
            .and(query_param("language", "en-US"))
            .respond_with(json_response(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/3/genre/movie/list"))
            .and(query_param("language", "ja-JP"))
            .respond_with(json_response(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = TmdbClient::builder()
            .base_url(format!("{}/3/", mock_server.uri()).parse().unwrap())
            .language("en-US")
            .build()
            .unwrap();

        // Act
        let default = client.movie_genres(&RequestOptions::new()).await.unwrap();
        let overridden = client
            .movie_genres(&RequestOptions::new().language("ja-JP"))
            .await
            .unwrap();

        // Assert
        assert_eq!(default.len(), 4);
        assert_eq!(default, overridden);
    }

    #[tokio::test]
    async fn test_interceptors_see_request_and_response() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/tv_1399_season_1.json");
        Mock::given(method("GET"))
            .and(path("/3/tv/1399/season/1"))
            .and(header("X-Trace", "abc"))
            .respond_with(json_response(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let options = RequestOptions::new()
            .on_request(|req| req.headers.push((String::from("X-Trace"), String::from("abc"))))
            .on_response(move |resp| *sink.lock().unwrap() = Some(resp.status));

        // Act
        let season = client.season(1399, 1, &options).await.unwrap();

        // Assert
        assert_eq!(season.episodes.unwrap().len(), 2);
        assert_eq!(*seen.lock().unwrap(), Some(200));
    }

    #[tokio::test]
    async fn test_search_three_pages_yields_every_item() {
        // Arrange
        let mock_server = MockServer::start().await;
        let sizes = [20_u64, 20, 5];
        let mut next_id = 1_u64;
        for (page, size) in (1_u32..).zip(sizes) {
            let results: Vec<_> = (next_id..next_id + size)
                .map(|id| json!({"id": id, "title": format!("Movie {id}")}))
                .collect();
            next_id += size;
            let body = json!({
                "page": page,
                "results": results,
                "total_pages": 3,
                "total_results": 45
            });
            Mock::given(method("GET"))
                .and(path("/3/search/movie"))
                .and(query_param("query", "movie"))
                .and(query_param("page", page.to_string()))
                .respond_with(json_response(&body.to_string()))
                .expect(1)
                .mount(&mock_server)
                .await;
        }
        let client = client_for(&mock_server);

        // Act
        let items: Vec<_> = search_movies(&client, SearchMovieParams::new("movie"), PageOptions::default())
            .collect()
            .await;

        // Assert
        let ids: Vec<u64> = items.into_iter().map(|m| m.unwrap().id.unwrap()).collect();
        assert_eq!(ids, (1..=45).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_search_multi_page_dispatches_views() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/search_multi_pitt.json");
        Mock::given(method("GET"))
            .and(path("/3/search/multi"))
            .respond_with(json_response(json_body))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let page = client
            .search_multi_page(&SearchParams::new("pitt"), 1)
            .await
            .unwrap();

        // Assert
        let kinds: Vec<_> = page
            .results
            .iter()
            .map(|o| SearchResultView::from_object(o).unwrap().media_type())
            .collect();
        assert_eq!(kinds, vec![MediaType::Person, MediaType::Movie, MediaType::Tv]);
    }

    #[tokio::test]
    async fn test_search_multi_stream_spans_pages_and_skips_nulls() {
        // Arrange
        let mock_server = MockServer::start().await;
        let pages = [
            json!({
                "page": 1,
                "results": [
                    {"id": 287, "media_type": "person", "name": "Brad Pitt"},
                    {"id": 550, "media_type": "movie", "title": "Fight Club"}
                ],
                "total_pages": 2,
                "total_results": 4
            }),
            json!({
                "page": 2,
                "results": [null, {"id": 1399, "media_type": "tv", "name": "Game of Thrones"}],
                "total_pages": 2,
                "total_results": 4
            }),
        ];
        for (page, body) in (1_u32..).zip(pages) {
            Mock::given(method("GET"))
                .and(path("/3/search/multi"))
                .and(query_param("query", "pitt"))
                .and(query_param("page", page.to_string()))
                .respond_with(json_response(&body.to_string()))
                .expect(1)
                .mount(&mock_server)
                .await;
        }
        let client = client_for(&mock_server);

        // Act
        let items: Vec<_> = search_multi(&client, SearchParams::new("pitt"), PageOptions::default())
            .collect()
            .await;

        // Assert
        let kinds: Vec<_> = items
            .iter()
            .map(|item| {
                let object = item.as_ref().unwrap();
                SearchResultView::from_object(object).unwrap().media_type()
            })
            .collect();
        assert_eq!(kinds, vec![MediaType::Person, MediaType::Movie, MediaType::Tv]);
    }

    #[tokio::test]
    async fn test_search_shows_and_people_streams() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/search/tv"))
            .and(query_param("include_adult", "true"))
            .respond_with(json_response(
                &json!({
                    "page": 1,
                    "results": [{"id": 1399, "name": "Game of Thrones"}],
                    "total_pages": 1,
                    "total_results": 1
                })
                .to_string(),
            ))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/3/search/person"))
            .respond_with(json_response(
                &json!({
                    "page": 1,
                    "results": [{"id": 287, "name": "Brad Pitt"}, {"id": 1, "name": "George Lucas"}],
                    "total_pages": 1,
                    "total_results": 2
                })
                .to_string(),
            ))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let shows: Vec<_> = search_shows(
            &client,
            SearchTvParams::new("thrones").include_adult(true),
            PageOptions::default(),
        )
        .collect()
        .await;
        let people: Vec<_> = search_people(&client, SearchParams::new("pitt"), PageOptions::default())
            .collect()
            .await;

        // Assert
        let show_names: Vec<_> = shows.into_iter().map(|s| s.unwrap().name.unwrap()).collect();
        assert_eq!(show_names, vec!["Game of Thrones"]);
        let person_ids: Vec<_> = people.into_iter().map(|p| p.unwrap().id.unwrap()).collect();
        assert_eq!(person_ids, vec![287, 1]);
    }

    #[tokio::test]
    async fn test_movie_document_lazy_access() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_550.json");
        Mock::given(method("GET"))
            .and(path("/3/movie/550"))
            .respond_with(json_response(json_body))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let doc = client
            .movie_document(550, &RequestOptions::new().append(MovieAppend::Credits))
            .await
            .unwrap();

        // Assert
        let name = doc
            .root()
            .field("credits")
            .object()
            .field("cast")
            .array()
            .index(2)
            .object()
            .field("name")
            .str()
            .force()
            .unwrap();
        assert_eq!(name, "Helena Bonham Carter");
        let movie: MovieView<'_> = doc.view();
        assert_eq!(movie.object().len(), doc.object().len());
    }

    #[tokio::test]
    async fn test_configuration_is_fetched_once() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/configuration.json");
        Mock::given(method("GET"))
            .and(path("/3/configuration"))
            .respond_with(json_response(json_body).set_delay(Duration::from_millis(100)))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let results = join_all((0..5).map(|_| client.configuration())).await;
        let later = client.clone().configuration().await.unwrap();

        // Assert
        let configs: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        assert!(configs.iter().all(|c| **c == *configs[0]));
        assert_eq!(*later, *configs[0]);
        assert_eq!(
            later.image_url("w92", "/x.jpg").as_deref(),
            Some("https://image.tmdb.org/t/p/w92/x.jpg")
        );
    }

    #[tokio::test]
    async fn test_configuration_failure_is_shared_and_retried() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/configuration"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_raw(b"{}".to_vec(), "application/json")
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(2)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server);

        // Act
        let results = join_all((0..3).map(|_| client.configuration())).await;
        let retried = client.configuration().await;

        // Assert
        let inner: Vec<Arc<Error>> = results
            .into_iter()
            .map(|r| match r {
                Err(Error::ConfigurationUnavailable(inner)) => inner,
                other => panic!("expected ConfigurationUnavailable, got {other:?}"),
            })
            .collect();
        assert!(inner.iter().all(|e| Arc::ptr_eq(e, &inner[0])));
        assert_eq!(inner[0].status(), Some(500));
        assert!(matches!(retried, Err(Error::ConfigurationUnavailable(_))));
    }
}
