//! Views over small shared records: genres, companies, networks, countries,
//! languages and external IDs.
#![allow(clippy::missing_errors_doc)]

use super::{View, define_view};
use crate::value::AccessError;

define_view! {
    /// Genre entry.
    GenreView
}

impl<'a> GenreView<'a> {
    /// Genre ID.
    pub fn id(&self) -> Result<u32, AccessError> {
        self.field("id").uint32().force()
    }

    /// Genre name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }
}

define_view! {
    /// Production company.
    CompanyView
}

impl<'a> CompanyView<'a> {
    /// Company ID.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Company name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }

    /// Logo image path.
    pub fn logo_path(&self) -> Result<&'a str, AccessError> {
        self.field("logo_path").str().force()
    }

    /// Origin country (ISO 3166-1).
    pub fn origin_country(&self) -> Result<&'a str, AccessError> {
        self.field("origin_country").str().force()
    }

    /// Headquarters (`company/{id}` only).
    pub fn headquarters(&self) -> Result<&'a str, AccessError> {
        self.field("headquarters").str().force()
    }

    /// Homepage URL (`company/{id}` only).
    pub fn homepage(&self) -> Result<&'a str, AccessError> {
        self.field("homepage").str().force()
    }
}

define_view! {
    /// Broadcasting network.
    NetworkView
}

impl<'a> NetworkView<'a> {
    /// Network ID.
    pub fn id(&self) -> Result<u64, AccessError> {
        self.field("id").uint64().force()
    }

    /// Network name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }

    /// Logo image path.
    pub fn logo_path(&self) -> Result<&'a str, AccessError> {
        self.field("logo_path").str().force()
    }

    /// Origin country (ISO 3166-1).
    pub fn origin_country(&self) -> Result<&'a str, AccessError> {
        self.field("origin_country").str().force()
    }
}

define_view! {
    /// Production country.
    CountryView
}

impl<'a> CountryView<'a> {
    /// ISO 3166-1 code.
    pub fn iso_3166_1(&self) -> Result<&'a str, AccessError> {
        self.field("iso_3166_1").str().force()
    }

    /// Country name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }
}

define_view! {
    /// Spoken language.
    LanguageView
}

impl<'a> LanguageView<'a> {
    /// ISO 639-1 code.
    pub fn iso_639_1(&self) -> Result<&'a str, AccessError> {
        self.field("iso_639_1").str().force()
    }

    /// Native name.
    pub fn name(&self) -> Result<&'a str, AccessError> {
        self.field("name").str().force()
    }

    /// English name.
    pub fn english_name(&self) -> Result<&'a str, AccessError> {
        self.field("english_name").str().force()
    }
}

define_view! {
    /// External identifiers (`external_ids`).
    ExternalIdsView
}

impl<'a> ExternalIdsView<'a> {
    /// IMDb ID.
    pub fn imdb_id(&self) -> Result<&'a str, AccessError> {
        self.field("imdb_id").str().force()
    }

    /// TheTVDB ID.
    pub fn tvdb_id(&self) -> Result<u64, AccessError> {
        self.field("tvdb_id").uint64().force()
    }

    /// Wikidata ID.
    pub fn wikidata_id(&self) -> Result<&'a str, AccessError> {
        self.field("wikidata_id").str().force()
    }

    /// Facebook handle.
    pub fn facebook_id(&self) -> Result<&'a str, AccessError> {
        self.field("facebook_id").str().force()
    }

    /// Instagram handle.
    pub fn instagram_id(&self) -> Result<&'a str, AccessError> {
        self.field("instagram_id").str().force()
    }

    /// Twitter handle.
    pub fn twitter_id(&self) -> Result<&'a str, AccessError> {
        self.field("twitter_id").str().force()
    }
}
