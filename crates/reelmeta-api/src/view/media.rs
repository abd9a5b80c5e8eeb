//! Views over movie, show, season and episode objects.
//!
//! Every accessor fails with the [`AccessError`] of its chain: a missing
//! member, a tag mismatch, or a number out of range.
#![allow(clippy::missing_errors_doc)]

use chrono::NaiveDate;

use super::common::{CompanyView, CountryView, ExternalIdsView, GenreView, LanguageView, NetworkView};
use super::people::{CastView, CreditsView, CrewView};
use super::{View, define_view};
use crate::value::AccessError;

define_view! {
    /// Lazy view over a movie (`movie/{id}` or a search result).
    MovieView
}

impl<'a> MovieView<'a> {
    /// TMDB movie ID.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Localized title.
    pub fn title(&self) -> Result<&'a str, AccessError> {
        self.field("title").str().force()
    }

    /// Original title.
    pub fn original_title(&self) -> Result<&'a str, AccessError> {
        self.field("original_title").str().force()
    }

    /// Original language (ISO 639-1).
    pub fn original_language(&self) -> Result<&'a str, AccessError> {
        self.field("original_language").str().force()
    }

    /// Overview text.
    pub fn overview(&self) -> Result<&'a str, AccessError> {
        self.field("overview").str().force()
    }

    /// Tagline.
    pub fn tagline(&self) -> Result<&'a str, AccessError> {
        self.field("tagline").str().force()
    }

    /// Release status (e.g. "Released").
    pub fn status(&self) -> Result<&'a str, AccessError> {
        self.field("status").str().force()
    }

    /// Homepage URL.
    pub fn homepage(&self) -> Result<&'a str, AccessError> {
        self.field("homepage").str().force()
    }

    /// IMDb ID.
    pub fn imdb_id(&self) -> Result<&'a str, AccessError> {
        self.field("imdb_id").str().force()
    }

    /// Poster image path.
    pub fn poster_path(&self) -> Result<&'a str, AccessError> {
        self.field("poster_path").str().force()
    }

    /// Backdrop image path.
    pub fn backdrop_path(&self) -> Result<&'a str, AccessError> {
        self.field("backdrop_path").str().force()
    }

    /// Primary release date.
    pub fn release_date(&self) -> Result<NaiveDate, AccessError> {
        self.field("release_date").date().force()
    }

    /// Runtime in minutes.
    pub fn runtime(&self) -> Result<u32, AccessError> {
        self.field("runtime").uint32().force()
    }

    /// Budget in USD.
    pub fn budget(&self) -> Result<u64, AccessError> {
        self.field("budget").uint64().force()
    }

    /// Revenue in USD.
    pub fn revenue(&self) -> Result<u64, AccessError> {
        self.field("revenue").uint64().force()
    }

    /// Popularity score.
    pub fn popularity(&self) -> Result<f64, AccessError> {
        self.field("popularity").number().force()
    }

    /// Vote average.
    pub fn vote_average(&self) -> Result<f64, AccessError> {
        self.field("vote_average").number().force()
    }

    /// Vote count.
    pub fn vote_count(&self) -> Result<u32, AccessError> {
        self.field("vote_count").uint32().force()
    }

    /// Adult flag.
    pub fn adult(&self) -> Result<bool, AccessError> {
        self.field("adult").bool().force()
    }

    /// Video flag.
    pub fn video(&self) -> Result<bool, AccessError> {
        self.field("video").bool().force()
    }

    /// Genre IDs (search results only).
    pub fn genre_ids(&self) -> Result<Vec<u32>, AccessError> {
        self.field("genre_ids").list().force()
    }

    /// Genres (details only).
    pub fn genres(&self) -> Result<Vec<GenreView<'a>>, AccessError> {
        self.field("genres").views().force()
    }

    /// Production companies.
    pub fn production_companies(&self) -> Result<Vec<CompanyView<'a>>, AccessError> {
        self.field("production_companies").views().force()
    }

    /// Production countries.
    pub fn production_countries(&self) -> Result<Vec<CountryView<'a>>, AccessError> {
        self.field("production_countries").views().force()
    }

    /// Spoken languages.
    pub fn spoken_languages(&self) -> Result<Vec<LanguageView<'a>>, AccessError> {
        self.field("spoken_languages").views().force()
    }

    /// Appended `credits`.
    pub fn credits(&self) -> Result<CreditsView<'a>, AccessError> {
        self.field("credits").view().force()
    }

    /// Appended `external_ids`.
    pub fn external_ids(&self) -> Result<ExternalIdsView<'a>, AccessError> {
        self.field("external_ids").view().force()
    }
}

define_view! {
    /// Lazy view over a TV show (`tv/{id}` or a search result).
    ShowView
}

impl<'a> ShowView<'a> {
    /// TMDB series ID.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Localized name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }

    /// Original name.
    pub fn original_name(&self) -> Result<&'a str, AccessError> {
        self.field("original_name").str().force()
    }

    /// Original language (ISO 639-1).
    pub fn original_language(&self) -> Result<&'a str, AccessError> {
        self.field("original_language").str().force()
    }

    /// Overview text.
    pub fn overview(&self) -> Result<&'a str, AccessError> {
        self.field("overview").str().force()
    }

    /// Tagline.
    pub fn tagline(&self) -> Result<&'a str, AccessError> {
        self.field("tagline").str().force()
    }

    /// Status (e.g. "Returning Series", "Ended").
    pub fn status(&self) -> Result<&'a str, AccessError> {
        self.field("status").str().force()
    }

    /// Show type (e.g. "Scripted"), the wire field `type`.
    pub fn show_type(&self) -> Result<&'a str, AccessError> {
        self.field("type").str().force()
    }

    /// Homepage URL.
    pub fn homepage(&self) -> Result<&'a str, AccessError> {
        self.field("homepage").str().force()
    }

    /// Poster image path.
    pub fn poster_path(&self) -> Result<&'a str, AccessError> {
        self.field("poster_path").str().force()
    }

    /// Backdrop image path.
    pub fn backdrop_path(&self) -> Result<&'a str, AccessError> {
        self.field("backdrop_path").str().force()
    }

    /// First air date.
    pub fn first_air_date(&self) -> Result<NaiveDate, AccessError> {
        self.field("first_air_date").date().force()
    }

    /// Last air date.
    pub fn last_air_date(&self) -> Result<NaiveDate, AccessError> {
        self.field("last_air_date").date().force()
    }

    /// Number of seasons.
    pub fn number_of_seasons(&self) -> Result<u32, AccessError> {
        self.field("number_of_seasons").uint32().force()
    }

    /// Number of episodes.
    pub fn number_of_episodes(&self) -> Result<u32, AccessError> {
        self.field("number_of_episodes").uint32().force()
    }

    /// Whether the show is still in production.
    pub fn in_production(&self) -> Result<bool, AccessError> {
        self.field("in_production").bool().force()
    }

    /// Typical episode runtimes in minutes.
    pub fn episode_run_time(&self) -> Result<Vec<u32>, AccessError> {
        self.field("episode_run_time").list().force()
    }

    /// Origin countries (ISO 3166-1).
    pub fn origin_country(&self) -> Result<Vec<&'a str>, AccessError> {
        self.field("origin_country").list().force()
    }

    /// Spoken languages (ISO 639-1).
    pub fn languages(&self) -> Result<Vec<&'a str>, AccessError> {
        self.field("languages").list().force()
    }

    /// Popularity score.
    pub fn popularity(&self) -> Result<f64, AccessError> {
        self.field("popularity").number().force()
    }

    /// Vote average.
    pub fn vote_average(&self) -> Result<f64, AccessError> {
        self.field("vote_average").number().force()
    }

    /// Vote count.
    pub fn vote_count(&self) -> Result<u32, AccessError> {
        self.field("vote_count").uint32().force()
    }

    /// Genre IDs (search results only).
    pub fn genre_ids(&self) -> Result<Vec<u32>, AccessError> {
        self.field("genre_ids").list().force()
    }

    /// Genres (details only).
    pub fn genres(&self) -> Result<Vec<GenreView<'a>>, AccessError> {
        self.field("genres").views().force()
    }

    /// Broadcasting networks.
    pub fn networks(&self) -> Result<Vec<NetworkView<'a>>, AccessError> {
        self.field("networks").views().force()
    }

    /// Production companies.
    pub fn production_companies(&self) -> Result<Vec<CompanyView<'a>>, AccessError> {
        self.field("production_companies").views().force()
    }

    /// Creators. Entries carry `credit_id` and `name` but no `job`.
    pub fn created_by(&self) -> Result<Vec<CrewView<'a>>, AccessError> {
        self.field("created_by").views().force()
    }

    /// Season summaries.
    pub fn seasons(&self) -> Result<Vec<SeasonView<'a>>, AccessError> {
        self.field("seasons").views().force()
    }

    /// Most recently aired episode.
    pub fn last_episode_to_air(&self) -> Result<EpisodeView<'a>, AccessError> {
        self.field("last_episode_to_air").view().force()
    }

    /// Next scheduled episode.
    pub fn next_episode_to_air(&self) -> Result<EpisodeView<'a>, AccessError> {
        self.field("next_episode_to_air").view().force()
    }

    /// Appended `credits`.
    pub fn credits(&self) -> Result<CreditsView<'a>, AccessError> {
        self.field("credits").view().force()
    }

    /// Appended `external_ids`.
    pub fn external_ids(&self) -> Result<ExternalIdsView<'a>, AccessError> {
        self.field("external_ids").view().force()
    }
}

define_view! {
    /// Lazy view over a season (`tv/{id}/season/{n}` or a season summary).
    SeasonView
}

impl<'a> SeasonView<'a> {
    /// TMDB season ID.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Season name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }

    /// Overview text.
    pub fn overview(&self) -> Result<&'a str, AccessError> {
        self.field("overview").str().force()
    }

    /// Air date.
    pub fn air_date(&self) -> Result<NaiveDate, AccessError> {
        self.field("air_date").date().force()
    }

    /// Season number (0 = specials).
    pub fn season_number(&self) -> Result<u32, AccessError> {
        self.field("season_number").uint32().force()
    }

    /// Episode count (season summaries only).
    pub fn episode_count(&self) -> Result<u32, AccessError> {
        self.field("episode_count").uint32().force()
    }

    /// Poster image path.
    pub fn poster_path(&self) -> Result<&'a str, AccessError> {
        self.field("poster_path").str().force()
    }

    /// Vote average.
    pub fn vote_average(&self) -> Result<f64, AccessError> {
        self.field("vote_average").number().force()
    }

    /// Episodes (season details only).
    pub fn episodes(&self) -> Result<Vec<EpisodeView<'a>>, AccessError> {
        self.field("episodes").views().force()
    }

    /// Appended `credits`.
    pub fn credits(&self) -> Result<CreditsView<'a>, AccessError> {
        self.field("credits").view().force()
    }
}

define_view! {
    /// Lazy view over an episode.
    EpisodeView
}

impl<'a> EpisodeView<'a> {
    /// TMDB episode ID.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Episode name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }

    /// Overview text.
    pub fn overview(&self) -> Result<&'a str, AccessError> {
        self.field("overview").str().force()
    }

    /// Air date.
    pub fn air_date(&self) -> Result<NaiveDate, AccessError> {
        self.field("air_date").date().force()
    }

    /// Episode number within the season.
    pub fn episode_number(&self) -> Result<u32, AccessError> {
        self.field("episode_number").uint32().force()
    }

    /// Season number.
    pub fn season_number(&self) -> Result<u32, AccessError> {
        self.field("season_number").uint32().force()
    }

    /// Parent show ID.
    pub fn show_id(&self) -> Result<u64, AccessError> {
        self.field("show_id").uint64().force()
    }

    /// Runtime in minutes.
    pub fn runtime(&self) -> Result<u32, AccessError> {
        self.field("runtime").uint32().force()
    }

    /// Vote average.
    pub fn vote_average(&self) -> Result<f64, AccessError> {
        self.field("vote_average").number().force()
    }

    /// Vote count.
    pub fn vote_count(&self) -> Result<u32, AccessError> {
        self.field("vote_count").uint32().force()
    }

    /// Still image path.
    pub fn still_path(&self) -> Result<&'a str, AccessError> {
        self.field("still_path").str().force()
    }

    /// Production code.
    pub fn production_code(&self) -> Result<&'a str, AccessError> {
        self.field("production_code").str().force()
    }

    /// Episode type (e.g. "standard", "finale").
    pub fn episode_type(&self) -> Result<&'a str, AccessError> {
        self.field("episode_type").str().force()
    }

    /// Episode crew.
    pub fn crew(&self) -> Result<Vec<CrewView<'a>>, AccessError> {
        self.field("crew").views().force()
    }

    /// Guest stars.
    pub fn guest_stars(&self) -> Result<Vec<CastView<'a>>, AccessError> {
        self.field("guest_stars").views().force()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::value::Kind;
    use crate::view::Document;

    #[test]
    fn test_movie_fixture_accessors() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_550.json");
        let doc = Document::from_slice(json.as_bytes()).unwrap();

        // Act
        let movie: MovieView<'_> = doc.view();

        // Assert
        assert_eq!(movie.id().unwrap(), 550);
        assert_eq!(movie.title().unwrap(), "Fight Club");
        assert_eq!(
            movie.release_date().unwrap(),
            NaiveDate::from_ymd_opt(1999, 10, 15).unwrap()
        );
        assert_eq!(movie.runtime().unwrap(), 139);
        assert_eq!(movie.budget().unwrap(), 63_000_000);
        assert!(!movie.adult().unwrap());
        let genres = movie.genres().unwrap();
        assert_eq!(genres[0].name().unwrap(), "Drama");
        let cast = movie.credits().unwrap().cast().unwrap();
        assert_eq!(cast[0].name().unwrap(), "Edward Norton");
        assert_eq!(cast[0].character().unwrap(), "Narrator");
        assert_eq!(movie.external_ids().unwrap().imdb_id().unwrap(), "tt0137523");
    }

    #[test]
    fn test_movie_fields_fail_independently() {
        // Arrange
        let doc = Document::from_slice(
            br#"{"id": 550, "title": 12, "runtime": 139.5, "genres": [{"id": 18}]}"#,
        )
        .unwrap();
        let movie: MovieView<'_> = doc.view();

        // Act & Assert
        assert_eq!(movie.id().unwrap(), 550);
        assert!(matches!(
            movie.title(),
            Err(AccessError::TypeMismatch {
                expected: Kind::String,
                actual: Kind::Number,
                ..
            })
        ));
        assert!(matches!(movie.runtime(), Err(AccessError::RangeError { .. })));
        assert_eq!(
            movie.tagline().unwrap_err(),
            AccessError::FieldNotFound {
                key: String::from("tagline")
            }
        );
        let genres = movie.genres().unwrap();
        assert_eq!(genres[0].id().unwrap(), 18);
        assert!(genres[0].name().is_err());
    }

    #[test]
    fn test_show_fixture_accessors() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_1399.json");
        let doc = Document::from_slice(json.as_bytes()).unwrap();

        // Act
        let show: ShowView<'_> = doc.view();

        // Assert
        assert_eq!(show.id().unwrap(), 1399);
        assert_eq!(show.name().unwrap(), "Game of Thrones");
        assert_eq!(show.show_type().unwrap(), "Scripted");
        assert_eq!(show.origin_country().unwrap(), vec!["US"]);
        assert_eq!(show.number_of_seasons().unwrap(), 8);
        assert_eq!(show.networks().unwrap()[0].name().unwrap(), "HBO");
        let seasons = show.seasons().unwrap();
        assert_eq!(seasons[1].season_number().unwrap(), 1);
        assert_eq!(seasons[1].episode_count().unwrap(), 10);
        assert!(show.next_episode_to_air().is_err());
        assert_eq!(
            show.last_episode_to_air().unwrap().name().unwrap(),
            "The Iron Throne"
        );
    }

    #[test]
    fn test_season_fixture_episodes() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_1399_season_1.json");
        let doc = Document::from_slice(json.as_bytes()).unwrap();

        // Act
        let season: SeasonView<'_> = doc.view();
        let episodes = season.episodes().unwrap();

        // Assert
        assert_eq!(season.season_number().unwrap(), 1);
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].episode_number().unwrap(), 1);
        assert_eq!(episodes[0].name().unwrap(), "Winter Is Coming");
        assert_eq!(episodes[0].crew().unwrap()[0].job().unwrap(), "Director");
        assert_eq!(
            episodes[1].guest_stars().unwrap()[0].name().unwrap(),
            "Roxanne McKee"
        );
    }
}
