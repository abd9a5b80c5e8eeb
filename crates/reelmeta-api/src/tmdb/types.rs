//! TMDB entity records decoded eagerly with serde.
//!
//! Every field is optional: an absent or `null` member decodes to `None`.

use serde::{Deserialize, Deserializer};

use crate::value::DecodeError;

// --- Pagination ---

/// One page of a paginated endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    /// Current page number (1-indexed).
    pub page: u32,
    /// Items on this page. `null` entries are dropped.
    #[serde(
        deserialize_with = "non_null_items",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub results: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

impl<T> Page<T> {
    /// Converts every item, keeping the page metadata.
    ///
    /// # Errors
    ///
    /// Returns the first conversion error.
    pub fn try_map<U>(self, f: impl FnMut(T) -> Result<U, DecodeError>) -> Result<Page<U>, DecodeError> {
        Ok(Page {
            page: self.page,
            results: self.results.into_iter().map(f).collect::<Result<_, _>>()?,
            total_pages: self.total_pages,
            total_results: self.total_results,
        })
    }
}

fn non_null_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Vec::<Option<T>>::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().collect())
}

// --- Movie ---

/// A movie from `movie/{id}` or `search/movie`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: Option<u64>,
    /// Localized title.
    pub title: Option<String>,
    /// Original title.
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    pub original_language: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Budget in USD.
    pub budget: Option<u64>,
    /// Revenue in USD.
    pub revenue: Option<u64>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Vote count.
    pub vote_count: Option<u32>,
    /// Adult flag.
    pub adult: Option<bool>,
    /// Video flag.
    pub video: Option<bool>,
    /// Release status.
    pub status: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// IMDb ID.
    pub imdb_id: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Genre IDs (search results).
    pub genre_ids: Option<Vec<u32>>,
    /// Genres (details).
    pub genres: Option<Vec<Genre>>,
    /// Production companies.
    pub production_companies: Option<Vec<Company>>,
    /// Production countries.
    pub production_countries: Option<Vec<Country>>,
    /// Spoken languages.
    pub spoken_languages: Option<Vec<Language>>,
    /// Appended `credits`.
    pub credits: Option<Credits>,
    /// Appended `external_ids`.
    pub external_ids: Option<ExternalIds>,
}

// --- TV ---

/// A TV show from `tv/{id}` or `search/tv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tv {
    /// TMDB series ID.
    pub id: Option<u64>,
    /// Localized name.
    pub name: Option<String>,
    /// Original name.
    pub original_name: Option<String>,
    /// Original language (ISO 639-1).
    pub original_language: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Status (e.g., "Returning Series", "Ended").
    pub status: Option<String>,
    /// Show type (e.g., "Scripted").
    #[serde(rename = "type")]
    pub show_type: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// First air date.
    pub first_air_date: Option<String>,
    /// Last air date.
    pub last_air_date: Option<String>,
    /// Total number of seasons.
    pub number_of_seasons: Option<u32>,
    /// Total number of episodes.
    pub number_of_episodes: Option<u32>,
    /// Whether the show is still in production.
    pub in_production: Option<bool>,
    /// Origin countries (ISO 3166-1).
    pub origin_country: Option<Vec<String>>,
    /// Typical episode runtimes in minutes.
    pub episode_run_time: Option<Vec<u32>>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Vote count.
    pub vote_count: Option<u32>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Genre IDs (search results).
    pub genre_ids: Option<Vec<u32>>,
    /// Genres (details).
    pub genres: Option<Vec<Genre>>,
    /// Broadcasting networks.
    pub networks: Option<Vec<Network>>,
    /// Production companies.
    pub production_companies: Option<Vec<Company>>,
    /// Season summaries.
    pub seasons: Option<Vec<Season>>,
    /// Appended `credits`.
    pub credits: Option<Credits>,
    /// Appended `external_ids`.
    pub external_ids: Option<ExternalIds>,
}

// --- Season / Episode ---

/// A season from `tv/{id}/season/{n}` or a season summary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Season {
    /// TMDB season ID.
    pub id: Option<u64>,
    /// Season name.
    pub name: Option<String>,
    /// Season overview.
    pub overview: Option<String>,
    /// Air date.
    pub air_date: Option<String>,
    /// Season number (0 = specials).
    pub season_number: Option<u32>,
    /// Number of episodes (summaries only).
    pub episode_count: Option<u32>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Episodes (details only).
    pub episodes: Option<Vec<Episode>>,
    /// Appended `credits`.
    pub credits: Option<Credits>,
}

/// A single episode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Episode {
    /// TMDB episode ID.
    pub id: Option<u64>,
    /// Episode name.
    pub name: Option<String>,
    /// Episode overview.
    pub overview: Option<String>,
    /// Air date.
    pub air_date: Option<String>,
    /// Episode number within the season.
    pub episode_number: Option<u32>,
    /// Season number.
    pub season_number: Option<u32>,
    /// Parent show ID.
    pub show_id: Option<u64>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Vote count.
    pub vote_count: Option<u32>,
    /// Still image path.
    pub still_path: Option<String>,
    /// Production code.
    pub production_code: Option<String>,
    /// Episode type (e.g., "standard", "finale").
    pub episode_type: Option<String>,
    /// Episode crew.
    pub crew: Option<Vec<Credit>>,
    /// Guest stars.
    pub guest_stars: Option<Vec<Credit>>,
}

// --- People / Credits ---

/// A person from `person/{id}` or `search/person`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    /// TMDB person ID.
    pub id: Option<u64>,
    /// Name.
    pub name: Option<String>,
    /// Biography.
    pub biography: Option<String>,
    /// Date of birth.
    pub birthday: Option<String>,
    /// Date of death.
    pub deathday: Option<String>,
    /// Place of birth.
    pub place_of_birth: Option<String>,
    /// Gender code (0 unknown, 1 female, 2 male, 3 non-binary).
    pub gender: Option<i32>,
    /// Department the person is best known for.
    pub known_for_department: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// IMDb ID.
    pub imdb_id: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Adult flag.
    pub adult: Option<bool>,
    /// Alternative names.
    pub also_known_as: Option<Vec<String>>,
    /// Appended `movie_credits`.
    pub movie_credits: Option<Credits>,
    /// Appended `tv_credits`.
    pub tv_credits: Option<Credits>,
    /// Appended `external_ids`.
    pub external_ids: Option<ExternalIds>,
}

impl Person {
    /// The person fields carried by a cast or crew entry.
    #[must_use]
    pub fn from_credit(credit: &Credit) -> Self {
        Self {
            id: credit.id,
            name: credit.name.clone(),
            biography: None,
            birthday: None,
            deathday: None,
            place_of_birth: None,
            gender: credit.gender,
            known_for_department: credit.known_for_department.clone(),
            popularity: credit.popularity,
            profile_path: credit.profile_path.clone(),
            imdb_id: None,
            homepage: None,
            adult: None,
            also_known_as: None,
            movie_credits: None,
            tv_credits: None,
            external_ids: None,
        }
    }
}

/// A cast or crew entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Credit {
    /// Person ID (or the credited work's ID inside person credits).
    pub id: Option<u64>,
    /// Credit ID.
    pub credit_id: Option<String>,
    /// Name.
    pub name: Option<String>,
    /// Original name.
    pub original_name: Option<String>,
    /// Character played (cast).
    pub character: Option<String>,
    /// Job (crew).
    pub job: Option<String>,
    /// Department (crew).
    pub department: Option<String>,
    /// Billing order (cast).
    pub order: Option<u32>,
    /// Gender code.
    pub gender: Option<i32>,
    /// Department the person is best known for.
    pub known_for_department: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
}

/// Cast and crew of a movie, show, season or person.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Credits {
    /// ID of the credited entity.
    pub id: Option<u64>,
    /// Cast entries.
    pub cast: Option<Vec<Credit>>,
    /// Crew entries.
    pub crew: Option<Vec<Credit>>,
}

// --- Small records ---

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: Option<u32>,
    /// Genre name.
    pub name: Option<String>,
}

/// Response from `genre/movie/list` and `genre/tv/list`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenreList {
    /// Genres.
    pub genres: Vec<Genre>,
}

/// Production company.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Company {
    /// Company ID.
    pub id: Option<u64>,
    /// Company name.
    pub name: Option<String>,
    /// Logo image path.
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1).
    pub origin_country: Option<String>,
    /// Headquarters.
    pub headquarters: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Broadcasting network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Network {
    /// Network ID.
    pub id: Option<u64>,
    /// Network name.
    pub name: Option<String>,
    /// Logo image path.
    pub logo_path: Option<String>,
    /// Origin country (ISO 3166-1).
    pub origin_country: Option<String>,
    /// Headquarters.
    pub headquarters: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
}

/// Production country.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    /// ISO 3166-1 code.
    pub iso_3166_1: Option<String>,
    /// Country name.
    pub name: Option<String>,
}

/// Spoken language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    /// ISO 639-1 code.
    pub iso_639_1: Option<String>,
    /// Native name.
    pub name: Option<String>,
    /// English name.
    pub english_name: Option<String>,
}

/// External identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalIds {
    /// IMDb ID.
    pub imdb_id: Option<String>,
    /// TheTVDB ID.
    pub tvdb_id: Option<u64>,
    /// Wikidata ID.
    pub wikidata_id: Option<String>,
    /// Facebook handle.
    pub facebook_id: Option<String>,
    /// Instagram handle.
    pub instagram_id: Option<String>,
    /// Twitter handle.
    pub twitter_id: Option<String>,
}

// --- Configuration ---

/// Response from `configuration`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    /// Image base URLs and sizes.
    pub images: Option<ImagesConfiguration>,
    /// Keys reported by the change endpoints.
    pub change_keys: Option<Vec<String>>,
}

/// Image section of [`Configuration`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImagesConfiguration {
    /// Plain HTTP base URL.
    pub base_url: Option<String>,
    /// HTTPS base URL.
    pub secure_base_url: Option<String>,
    /// Backdrop sizes.
    pub backdrop_sizes: Option<Vec<String>>,
    /// Logo sizes.
    pub logo_sizes: Option<Vec<String>>,
    /// Poster sizes.
    pub poster_sizes: Option<Vec<String>>,
    /// Profile sizes.
    pub profile_sizes: Option<Vec<String>>,
    /// Still sizes.
    pub still_sizes: Option<Vec<String>>,
}

impl Configuration {
    /// Full image URL for `path` (e.g. `/pB8B...jpg`) at `size` (e.g. `w500`).
    ///
    /// Returns `None` when the secure base URL is unknown.
    #[must_use]
    pub fn image_url(&self, size: &str, path: &str) -> Option<String> {
        let base = self.images.as_ref()?.secure_base_url.as_deref()?;
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Some(format!("{base}/{size}/{path}"))
    }
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::value::{Kind, Value};

    #[test]
    fn test_parse_movie_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_550.json");

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, Some(550));
        assert_eq!(movie.title.as_deref(), Some("Fight Club"));
        assert_eq!(movie.genres.as_ref().unwrap().len(), 2);
        let credits = movie.credits.unwrap();
        assert_eq!(credits.cast.unwrap()[1].character.as_deref(), Some("Tyler Durden"));
        assert_eq!(credits.crew.unwrap()[0].job.as_deref(), Some("Director"));
        let companies = movie.production_companies.unwrap();
        assert_eq!(companies[2].logo_path, None);
        assert_eq!(movie.external_ids.unwrap().instagram_id, None);
    }

    #[test]
    fn test_parse_tv_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_1399.json");

        // Act
        let tv: Tv = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(tv.id, Some(1399));
        assert_eq!(tv.show_type.as_deref(), Some("Scripted"));
        assert_eq!(tv.number_of_seasons, Some(8));
        let seasons = tv.seasons.unwrap();
        assert_eq!(seasons[0].season_number, Some(0));
        assert_eq!(seasons[0].episodes, None);
        assert_eq!(tv.external_ids.unwrap().tvdb_id, Some(121_361));
    }

    #[test]
    fn test_parse_season_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_1399_season_1.json");

        // Act
        let season: Season = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(season.season_number, Some(1));
        let episodes = season.episodes.unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].show_id, Some(1399));
        assert_eq!(
            episodes[1].guest_stars.as_ref().unwrap()[0].character.as_deref(),
            Some("Doreah")
        );
    }

    #[test]
    fn test_parse_person_fixture_null_fields_are_none() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/person_287.json");

        // Act
        let person: Person = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(person.name.as_deref(), Some("Brad Pitt"));
        assert_eq!(person.deathday, None);
        assert_eq!(person.homepage, None);
        assert_eq!(person.tv_credits, None);
        assert_eq!(person.birthday.as_deref(), Some("1963-12-18"));
    }

    #[test]
    fn test_empty_object_decodes_to_all_none() {
        // Arrange & Act
        let movie: Movie = serde_json::from_str("{}").unwrap();

        // Assert
        assert_eq!(movie.id, None);
        assert_eq!(movie.genres, None);
        assert_eq!(movie.credits, None);
    }

    #[test]
    fn test_image_url() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/configuration.json");
        let config: Configuration = serde_json::from_str(json).unwrap();

        // Act
        let url = config.image_url("w500", "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg");

        // Assert
        assert_eq!(
            url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg")
        );
        let empty = Configuration {
            images: None,
            change_keys: None,
        };
        assert_eq!(empty.image_url("w500", "/x.jpg"), None);
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange
        let json = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let error: TmdbErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 7);
        assert!(!error.success);
        assert!(error.status_message.contains("Invalid API key"));
    }

    #[test]
    fn test_page_try_map() {
        // Arrange
        let page = Page {
            page: 1,
            results: vec![Value::Bool(true), Value::Number(1.0)],
            total_pages: 1,
            total_results: 2,
        };

        // Act
        let kinds = page.clone().try_map(|v| Ok(v.kind())).unwrap();
        let err = page
            .try_map(|v| match v {
                Value::Object(o) => Ok(o),
                other => Err(DecodeError::NotAnObject {
                    actual: other.kind(),
                }),
            })
            .unwrap_err();

        // Assert
        assert_eq!(kinds.results, vec![Kind::Bool, Kind::Number]);
        assert_eq!(kinds.total_results, 2);
        assert!(matches!(err, DecodeError::NotAnObject { actual: Kind::Bool }));
    }

    #[test]
    fn test_page_drops_null_results() {
        // Arrange
        let json = r#"{"page":1,"results":[{"id":1,"media_type":"movie"},null,{"id":2}],"total_pages":1,"total_results":3}"#;

        // Act
        let raw: Page<Value> = serde_json::from_str(json).unwrap();
        let movies: Page<Movie> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(raw.results.len(), 2);
        assert!(raw.results.iter().all(|v| v.kind() == Kind::Object));
        let ids: Vec<_> = movies.results.iter().filter_map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
