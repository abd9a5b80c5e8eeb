//! Views over people and credits.
#![allow(clippy::missing_errors_doc)]

use chrono::NaiveDate;

use super::common::ExternalIdsView;
use super::{SearchResultView, View, define_view};
use crate::value::{AccessError, Object};

define_view! {
    /// Lazy view over a person (`person/{id}` or a search result).
    PersonView
}

impl<'a> PersonView<'a> {
    /// TMDB person ID.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }

    /// Biography.
    pub fn biography(&self) -> Result<&'a str, AccessError> {
        self.field("biography").str().force()
    }

    /// Date of birth.
    pub fn birthday(&self) -> Result<NaiveDate, AccessError> {
        self.field("birthday").date().force()
    }

    /// Date of death.
    pub fn deathday(&self) -> Result<NaiveDate, AccessError> {
        self.field("deathday").date().force()
    }

    /// Place of birth.
    pub fn place_of_birth(&self) -> Result<&'a str, AccessError> {
        self.field("place_of_birth").str().force()
    }

    /// Gender code (0 unknown, 1 female, 2 male, 3 non-binary).
    pub fn gender(&self) -> Result<i32, AccessError> {
        self.field("gender").int32().force()
    }

    /// Department the person is best known for.
    pub fn known_for_department(&self) -> Result<&'a str, AccessError> {
        self.field("known_for_department").str().force()
    }

    /// Popularity score.
    pub fn popularity(&self) -> Result<f64, AccessError> {
        self.field("popularity").number().force()
    }

    /// Profile image path.
    pub fn profile_path(&self) -> Result<&'a str, AccessError> {
        self.field("profile_path").str().force()
    }

    /// IMDb ID.
    pub fn imdb_id(&self) -> Result<&'a str, AccessError> {
        self.field("imdb_id").str().force()
    }

    /// Homepage URL.
    pub fn homepage(&self) -> Result<&'a str, AccessError> {
        self.field("homepage").str().force()
    }

    /// Adult flag.
    pub fn adult(&self) -> Result<bool, AccessError> {
        self.field("adult").bool().force()
    }

    /// Alternative names.
    pub fn also_known_as(&self) -> Result<Vec<&'a str>, AccessError> {
        self.field("also_known_as").list().force()
    }

    /// Notable works (search results only), dispatched on `media_type`.
    pub fn known_for(&self) -> Result<Vec<SearchResultView<'a>>, AccessError> {
        self.field("known_for")
            .list::<&'a Object>()
            .map(|items| items.into_iter().map(SearchResultView::from_object).collect())
            .force()
    }

    /// Appended `movie_credits`.
    pub fn movie_credits(&self) -> Result<CreditsView<'a>, AccessError> {
        self.field("movie_credits").view().force()
    }

    /// Appended `tv_credits`.
    pub fn tv_credits(&self) -> Result<CreditsView<'a>, AccessError> {
        self.field("tv_credits").view().force()
    }

    /// Appended `external_ids`.
    pub fn external_ids(&self) -> Result<ExternalIdsView<'a>, AccessError> {
        self.field("external_ids").view().force()
    }
}

define_view! {
    /// Lazy view over a credits object (`cast` and `crew`).
    CreditsView
}

impl<'a> CreditsView<'a> {
    /// ID of the credited movie, show or person.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Cast entries.
    pub fn cast(&self) -> Result<Vec<CastView<'a>>, AccessError> {
        self.field("cast").views().force()
    }

    /// Crew entries.
    pub fn crew(&self) -> Result<Vec<CrewView<'a>>, AccessError> {
        self.field("crew").views().force()
    }
}

define_view! {
    /// Lazy view over a cast credit.
    CastView
}

impl<'a> CastView<'a> {
    /// Person ID.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Credit ID.
    pub fn credit_id(&self) -> Result<&'a str, AccessError> {
        self.field("credit_id").str().force()
    }

    /// Name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }

    /// Original name.
    pub fn original_name(&self) -> Result<&'a str, AccessError> {
        self.field("original_name").str().force()
    }

    /// Character played.
    pub fn character(&self) -> Result<&'a str, AccessError> {
        self.field("character").str().force()
    }

    /// Billing order.
    pub fn order(&self) -> Result<u32, AccessError> {
        self.field("order").uint32().force()
    }

    /// Gender code.
    pub fn gender(&self) -> Result<i32, AccessError> {
        self.field("gender").int32().force()
    }

    /// Department the person is best known for.
    pub fn known_for_department(&self) -> Result<&'a str, AccessError> {
        self.field("known_for_department").str().force()
    }

    /// Profile image path.
    pub fn profile_path(&self) -> Result<&'a str, AccessError> {
        self.field("profile_path").str().force()
    }

    /// Popularity score.
    pub fn popularity(&self) -> Result<f64, AccessError> {
        self.field("popularity").number().force()
    }
}

define_view! {
    /// Lazy view over a crew credit.
    CrewView
}

impl<'a> CrewView<'a> {
    /// Person ID.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Credit ID.
    pub fn credit_id(&self) -> Result<&'a str, AccessError> {
        self.field("credit_id").str().force()
    }

    /// Name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }

    /// Original name.
    pub fn original_name(&self) -> Result<&'a str, AccessError> {
        self.field("original_name").str().force()
    }

    /// Job (e.g. "Director").
    pub fn job(&self) -> Result<&'a str, AccessError> {
        self.field("job").str().force()
    }

    /// Department (e.g. "Directing").
    pub fn department(&self) -> Result<&'a str, AccessError> {
        self.field("department").str().force()
    }

    /// Gender code.
    pub fn gender(&self) -> Result<i32, AccessError> {
        self.field("gender").int32().force()
    }

    /// Profile image path.
    pub fn profile_path(&self) -> Result<&'a str, AccessError> {
        self.field("profile_path").str().force()
    }
}
