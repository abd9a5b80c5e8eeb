//! Typed views: named, borrowed wrappers over decoded objects.
//!
//! A view never copies or caches. Every accessor re-walks the underlying
//! object through a [`Data`] chain, so a missing or mistyped field fails on
//! its own without affecting other accessors.

use std::fmt;

use crate::value::{AccessError, Data, DecodeError, Object, Value};

/// A typed view over a borrowed object.
pub trait View<'a>: Copy {
    /// Relabels `object` as this view.
    fn from_object(object: &'a Object) -> Self;

    /// The underlying object.
    fn object(&self) -> &'a Object;

    /// Root accessor over the underlying object.
    fn data(&self) -> Data<'a, &'a Object> {
        Data::root(self.object())
    }

    /// Accessor for member `key`.
    fn field(&self, key: &str) -> Data<'a, &'a Value> {
        self.data().field(key)
    }
}

/// Declares a view struct and its [`View`] impl.
macro_rules! define_view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            object: &'a $crate::value::Object,
        }

        impl<'a> $crate::view::View<'a> for $name<'a> {
            fn from_object(object: &'a $crate::value::Object) -> Self {
                Self { object }
            }

            fn object(&self) -> &'a $crate::value::Object {
                self.object
            }
        }
    };
}
pub(crate) use define_view;

mod common;
mod media;
mod people;

pub use common::{CompanyView, CountryView, ExternalIdsView, GenreView, LanguageView, NetworkView};
pub use media::{EpisodeView, MovieView, SeasonView, ShowView};
pub use people::{CastView, CreditsView, CrewView, PersonView};

/// An owned, decoded response body whose top level is an object.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Top-level members.
    root: Object,
}

impl Document {
    /// Decodes a response body.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the bytes are not JSON or the top level
    /// is not an object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        match Value::from_slice(bytes)? {
            Value::Object(root) => Ok(Self { root }),
            other => Err(DecodeError::NotAnObject {
                actual: other.kind(),
            }),
        }
    }

    /// Wraps an already decoded object.
    #[must_use]
    pub const fn from_object(root: Object) -> Self {
        Self { root }
    }

    /// Top-level members.
    #[must_use]
    pub const fn object(&self) -> &Object {
        &self.root
    }

    /// Root accessor.
    #[must_use]
    pub fn root(&self) -> Data<'_, &Object> {
        Data::root(&self.root)
    }

    /// Borrows the document as view `V`.
    #[must_use]
    pub fn view<'a, V: View<'a>>(&'a self) -> V {
        V::from_object(&self.root)
    }

    /// Releases the decoded object.
    #[must_use]
    pub fn into_object(self) -> Object {
        self.root
    }
}

/// `media_type` discriminator of multi-search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// A movie.
    Movie,
    /// A TV show.
    Tv,
    /// A person.
    Person,
}

impl MediaType {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Person => "person",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A multi-search result dispatched on its `media_type`.
#[derive(Debug, Clone, Copy)]
pub enum SearchResultView<'a> {
    /// Movie result.
    Movie(MovieView<'a>),
    /// TV show result.
    Tv(ShowView<'a>),
    /// Person result.
    Person(PersonView<'a>),
}

impl<'a> SearchResultView<'a> {
    /// Reads `media_type` and wraps `object` in the matching view.
    ///
    /// # Errors
    ///
    /// Fails if `media_type` is missing, not a string, or unknown.
    pub fn from_object(object: &'a Object) -> Result<Self, AccessError> {
        let media_type = Data::root(object).field("media_type").str().force()?;
        match media_type {
            "movie" => Ok(Self::Movie(MovieView::from_object(object))),
            "tv" => Ok(Self::Tv(ShowView::from_object(object))),
            "person" => Ok(Self::Person(PersonView::from_object(object))),
            other => Err(AccessError::Malformed {
                key: String::from("media_type"),
                reason: format!("unknown media type {other:?}"),
            }),
        }
    }

    /// Discriminator of this result.
    #[must_use]
    pub const fn media_type(&self) -> MediaType {
        match self {
            Self::Movie(_) => MediaType::Movie,
            Self::Tv(_) => MediaType::Tv,
            Self::Person(_) => MediaType::Person,
        }
    }

    /// TMDB ID of the result.
    ///
    /// # Errors
    ///
    /// Fails if `id` is missing or not an unsigned integer.
    pub fn id(&self) -> Result<u64, AccessError> {
        match self {
            Self::Movie(v) => v.id(),
            Self::Tv(v) => v.id(),
            Self::Person(v) => v.id(),
        }
    }

    /// Display name: `title` for movies, `name` otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the name field is missing or not a string.
    pub fn display_name(&self) -> Result<&'a str, AccessError> {
        match self {
            Self::Movie(v) => v.title(),
            Self::Tv(v) => v.name(),
            Self::Person(v) => v.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::value::Kind;

    #[test]
    fn test_document_requires_object() {
        // Arrange & Act
        let err = Document::from_slice(b"[1, 2, 3]").unwrap_err();

        // Assert
        assert!(matches!(
            err,
            DecodeError::NotAnObject {
                actual: Kind::Array
            }
        ));
    }

    #[test]
    fn test_document_view_borrows_root() {
        // Arrange
        let doc = Document::from_slice(br#"{"id": 550, "title": "Fight Club"}"#).unwrap();

        // Act
        let movie: MovieView<'_> = doc.view();

        // Assert
        assert!(std::ptr::eq(movie.object(), doc.object()));
        assert_eq!(movie.title().unwrap(), "Fight Club");
    }

    #[test]
    fn test_search_result_dispatch() {
        // Arrange
        let doc = Document::from_slice(
            br#"{"results": [
                {"media_type": "movie", "id": 550, "title": "Fight Club"},
                {"media_type": "tv", "id": 1399, "name": "Game of Thrones"},
                {"media_type": "person", "id": 287, "name": "Brad Pitt"},
                {"media_type": "collection", "id": 1}
            ]}"#,
        )
        .unwrap();
        let items = doc.root().field("results").list::<&Object>().force().unwrap();

        // Act
        let results: Vec<_> = items.into_iter().map(SearchResultView::from_object).collect();

        // Assert
        let kinds: Vec<_> = results
            .iter()
            .map(|r| r.as_ref().ok().map(SearchResultView::media_type))
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(MediaType::Movie),
                Some(MediaType::Tv),
                Some(MediaType::Person),
                None
            ]
        );
        let names: Vec<_> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|r| r.display_name().unwrap())
            .collect();
        assert_eq!(names, vec!["Fight Club", "Game of Thrones", "Brad Pitt"]);
    }
}
