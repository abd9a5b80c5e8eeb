//! Identity keys for deduplicating entities.

use super::types::{
    Company, Country, Credit, Episode, Genre, Language, Movie, Network, Person, Season, Tv,
};

/// Declares a newtype key.
macro_rules! key_type {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub $inner);
    };
}

key_type! {
    /// Movie identity (TMDB ID).
    MovieKey(u64)
}
key_type! {
    /// TV show identity (TMDB ID).
    ShowKey(u64)
}
key_type! {
    /// Person identity (TMDB ID).
    PersonKey(u64)
}
key_type! {
    /// Company identity (TMDB ID).
    CompanyKey(u64)
}
key_type! {
    /// Network identity (TMDB ID).
    NetworkKey(u64)
}
key_type! {
    /// Genre identity (TMDB ID).
    GenreKey(u32)
}
key_type! {
    /// Credit identity (`credit_id`).
    CreditKey(String)
}
key_type! {
    /// Season identity (TMDB season ID).
    SeasonKey(u64)
}
key_type! {
    /// Episode identity (TMDB episode ID).
    EpisodeKey(u64)
}
key_type! {
    /// Country identity (ISO 3166-1).
    CountryKey(String)
}
key_type! {
    /// Language identity (ISO 639-1).
    LanguageKey(String)
}

/// Entities with a structural identity.
pub trait Keyed {
    /// Key type.
    type Key: Ord + Clone + std::fmt::Debug;

    /// The identity, or `None` when the identifying field is absent.
    fn key(&self) -> Option<Self::Key>;
}

/// Implements [`Keyed`] from one identifying field.
macro_rules! keyed {
    ($($entity:ty => $key:ident, $field:ident;)*) => {$(
        impl Keyed for $entity {
            type Key = $key;

            fn key(&self) -> Option<$key> {
                self.$field.map($key)
            }
        }
    )*};
    ($($entity:ty => $key:ident, &$field:ident;)*) => {$(
        impl Keyed for $entity {
            type Key = $key;

            fn key(&self) -> Option<$key> {
                self.$field.as_ref().map(|v| $key(v.clone()))
            }
        }
    )*};
}

keyed! {
    Movie => MovieKey, id;
    Tv => ShowKey, id;
    Person => PersonKey, id;
    Company => CompanyKey, id;
    Network => NetworkKey, id;
    Genre => GenreKey, id;
    Season => SeasonKey, id;
    Episode => EpisodeKey, id;
}

keyed! {
    Credit => CreditKey, &credit_id;
    Country => CountryKey, &iso_3166_1;
    Language => LanguageKey, &iso_639_1;
}
