//! Deduplicating collection of fetched entities.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use super::keys::{
    CompanyKey, CountryKey, CreditKey, EpisodeKey, GenreKey, Keyed, LanguageKey, MovieKey,
    NetworkKey, PersonKey, SeasonKey, ShowKey,
};
use super::types::{
    Company, Country, Credit, Credits, Episode, Genre, Language, Movie, Network, Person, Season,
    Tv,
};

/// Entities keyed by identity.
///
/// The first insertion of a key wins, with one exception: people derived
/// from credits and season summaries taken from a show are placeholders.
/// The record added directly through [`Graph::add_person`] or
/// [`Graph::add_season`] replaces a placeholder once.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    movies: BTreeMap<MovieKey, Movie>,
    shows: BTreeMap<ShowKey, Tv>,
    seasons: Placeheld<Season>,
    episodes: BTreeMap<EpisodeKey, Episode>,
    people: Placeheld<Person>,
    credits: BTreeMap<CreditKey, Credit>,
    genres: BTreeMap<GenreKey, Genre>,
    companies: BTreeMap<CompanyKey, Company>,
    networks: BTreeMap<NetworkKey, Network>,
    countries: BTreeMap<CountryKey, Country>,
    languages: BTreeMap<LanguageKey, Language>,
}

/// Inserts `entity` under its key unless the key is taken or absent.
/// Returns `true` when inserted.
fn insert<E: Keyed + Clone>(map: &mut BTreeMap<E::Key, E>, entity: &E) -> bool {
    let Some(key) = entity.key() else {
        return false;
    };
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(entity.clone());
            true
        }
        Entry::Occupied(_) => false,
    }
}

/// Inserts every entity of an optional list.
fn insert_all<E: Keyed + Clone>(map: &mut BTreeMap<E::Key, E>, entities: Option<&[E]>) {
    for entity in entities.into_iter().flatten() {
        insert(map, entity);
    }
}

/// A keyed map whose entries may be placeholders awaiting the full record.
#[derive(Debug, Clone)]
struct Placeheld<E: Keyed> {
    entries: BTreeMap<E::Key, E>,
    placeholders: BTreeSet<E::Key>,
}

impl<E: Keyed> Default for Placeheld<E> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            placeholders: BTreeSet::new(),
        }
    }
}

impl<E: Keyed + Clone> Placeheld<E> {
    /// Stores a full record. It fills a vacant key or replaces a
    /// placeholder; an existing full record is kept.
    fn insert(&mut self, entity: &E) -> bool {
        let Some(key) = entity.key() else {
            return false;
        };
        if self.placeholders.remove(&key) {
            self.entries.insert(key, entity.clone());
            return true;
        }
        insert(&mut self.entries, entity)
    }

    /// Stores a partial record under a vacant key only.
    fn insert_placeholder(&mut self, entity: &E) {
        let Some(key) = entity.key() else {
            return;
        };
        if let Entry::Vacant(slot) = self.entries.entry(key.clone()) {
            slot.insert(entity.clone());
            self.placeholders.insert(key);
        }
    }

    fn get(&self, key: &E::Key) -> Option<&E> {
        self.entries.get(key)
    }

    fn is_placeholder(&self, key: &E::Key) -> bool {
        self.placeholders.contains(key)
    }

    fn values(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }
}

impl Graph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a movie with its genres, companies, countries, languages,
    /// credits and credited people. Returns `true` if the movie was new.
    pub fn add_movie(&mut self, movie: &Movie) -> bool {
        let added = insert(&mut self.movies, movie);
        insert_all(&mut self.genres, movie.genres.as_deref());
        insert_all(&mut self.companies, movie.production_companies.as_deref());
        insert_all(&mut self.countries, movie.production_countries.as_deref());
        insert_all(&mut self.languages, movie.spoken_languages.as_deref());
        if let Some(credits) = &movie.credits {
            self.add_credits(credits);
        }
        added
    }

    /// Adds a show with its genres, networks, companies, season summaries
    /// and credits. Returns `true` if the show was new.
    pub fn add_show(&mut self, show: &Tv) -> bool {
        let added = insert(&mut self.shows, show);
        insert_all(&mut self.genres, show.genres.as_deref());
        insert_all(&mut self.networks, show.networks.as_deref());
        insert_all(&mut self.companies, show.production_companies.as_deref());
        for summary in show.seasons.iter().flatten() {
            self.seasons.insert_placeholder(summary);
        }
        if let Some(credits) = &show.credits {
            self.add_credits(credits);
        }
        added
    }

    /// Adds a season with its episodes. Returns `true` if the season was
    /// new or replaced a summary.
    pub fn add_season(&mut self, season: &Season) -> bool {
        let added = self.seasons.insert(season);
        insert_all(&mut self.episodes, season.episodes.as_deref());
        if let Some(credits) = &season.credits {
            self.add_credits(credits);
        }
        added
    }

    /// Adds a person. Returns `true` if the person was new or replaced one
    /// known only from credits.
    pub fn add_person(&mut self, person: &Person) -> bool {
        self.people.insert(person)
    }

    /// Adds cast and crew entries and the people they name.
    pub fn add_credits(&mut self, credits: &Credits) {
        let entries = credits.cast.iter().chain(credits.crew.iter()).flatten();
        for credit in entries {
            insert(&mut self.credits, credit);
            self.people.insert_placeholder(&Person::from_credit(credit));
        }
    }

    /// Movie by key.
    #[must_use]
    pub fn movie(&self, key: &MovieKey) -> Option<&Movie> {
        self.movies.get(key)
    }

    /// Show by key.
    #[must_use]
    pub fn show(&self, key: &ShowKey) -> Option<&Tv> {
        self.shows.get(key)
    }

    /// Season by key.
    #[must_use]
    pub fn season(&self, key: &SeasonKey) -> Option<&Season> {
        self.seasons.get(key)
    }

    /// Person by key.
    #[must_use]
    pub fn person(&self, key: &PersonKey) -> Option<&Person> {
        self.people.get(key)
    }

    /// Whether the stored person came only from a credit entry.
    #[must_use]
    pub fn is_partial_person(&self, key: &PersonKey) -> bool {
        self.people.is_placeholder(key)
    }

    /// All movies in key order.
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    /// All shows in key order.
    pub fn shows(&self) -> impl Iterator<Item = &Tv> {
        self.shows.values()
    }

    /// All seasons in key order.
    pub fn seasons(&self) -> impl Iterator<Item = &Season> {
        self.seasons.values()
    }

    /// All episodes in key order.
    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.episodes.values()
    }

    /// All people in key order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// All credits in key order.
    pub fn credits(&self) -> impl Iterator<Item = &Credit> {
        self.credits.values()
    }

    /// All genres in key order.
    pub fn genres(&self) -> impl Iterator<Item = &Genre> {
        self.genres.values()
    }

    /// All companies in key order.
    pub fn companies(&self) -> impl Iterator<Item = &Company> {
        self.companies.values()
    }

    /// All networks in key order.
    pub fn networks(&self) -> impl Iterator<Item = &Network> {
        self.networks.values()
    }

    /// All countries in key order.
    pub fn countries(&self) -> impl Iterator<Item = &Country> {
        self.countries.values()
    }

    /// All languages in key order.
    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.languages.values()
    }
}
