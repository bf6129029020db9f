//! Movie catalog records (read-only on the client)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A movie from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "Title", alias = "title")]
    pub title: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
    #[serde(rename = "Genre", alias = "genre", default)]
    pub genre: Option<Genre>,
    #[serde(rename = "Director", alias = "director", default)]
    pub director: Option<Director>,
    #[serde(rename = "ImagePath", alias = "imageUrl", alias = "ImageURL", default)]
    pub image_url: Option<String>,
    #[serde(rename = "Featured", alias = "featured", default)]
    pub featured: bool,
    /// Anything else the server sends, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            genre: None,
            director: None,
            image_url: None,
            featured: false,
            extra: BTreeMap::new(),
        }
    }

    pub fn genre_name(&self) -> Option<&str> {
        self.genre.as_ref().map(|g| g.name.as_str())
    }

    pub fn director_name(&self) -> Option<&str> {
        self.director.as_ref().map(|d| d.name.as_str())
    }
}

/// A movie genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
}

/// A director as returned by `GET /director/{name}` or embedded in a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Bio", alias = "bio", default)]
    pub bio: String,
    /// Birth year or date, as the server formats it
    #[serde(
        rename = "Birth",
        alias = "birth",
        alias = "Birthyear",
        default,
        deserialize_with = "deserialize_optional_year"
    )]
    pub birth: Option<String>,
    #[serde(
        rename = "Death",
        alias = "death",
        alias = "Deathyear",
        default,
        deserialize_with = "deserialize_optional_year"
    )]
    pub death: Option<String>,
}

/// Deserialize a year that can be number, string or null
fn deserialize_optional_year<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected number or string for year")),
    }
}
