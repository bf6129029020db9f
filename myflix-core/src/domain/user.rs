//! User domain model and the request bodies that create or change users

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A registered user as returned by the API
///
/// Field names follow the server (`_id`, `Username`, `FavoriteMovies`, ...);
/// camelCase aliases are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "Username", alias = "username", default)]
    pub username: String,
    #[serde(rename = "Email", alias = "email", default)]
    pub email: String,
    #[serde(
        rename = "Birthday",
        alias = "birthday",
        default,
        deserialize_with = "deserialize_birthday",
        serialize_with = "serialize_birthday",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<NaiveDate>,
    /// Movie ids marked as favorite (order irrelevant)
    #[serde(
        rename = "FavoriteMovies",
        alias = "favoriteMovieIds",
        alias = "favoriteMovies",
        default,
        deserialize_with = "deserialize_favorites"
    )]
    pub favorite_movie_ids: BTreeSet<String>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: String::new(),
            birthday: None,
            favorite_movie_ids: BTreeSet::new(),
        }
    }

    pub fn has_favorite(&self, movie_id: &str) -> bool {
        self.favorite_movie_ids.contains(movie_id)
    }
}

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registration request body
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(
        rename = "Birthday",
        serialize_with = "serialize_birthday",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<NaiveDate>,
}

/// Profile edit request body; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(rename = "Username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "Password", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        rename = "Birthday",
        serialize_with = "serialize_birthday",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthday: Option<NaiveDate>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.birthday.is_none()
    }
}

/// Body of a successful `POST /login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Parse a birthday given as `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_birthday(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn deserialize_birthday<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(JsonValue::String(s)) => parse_birthday(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid birthday: {}", s))),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected string for birthday")),
    }
}

fn serialize_birthday<S>(value: &Option<NaiveDate>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
        None => serializer.serialize_none(),
    }
}

/// Favorites may arrive as plain ids or as embedded movie objects
fn deserialize_favorites<'de, D>(deserializer: D) -> std::result::Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<Vec<JsonValue>> = Option::deserialize(deserializer)?;
    let mut ids = BTreeSet::new();
    for item in value.unwrap_or_default() {
        match item {
            JsonValue::String(s) => {
                ids.insert(s);
            }
            JsonValue::Number(n) => {
                ids.insert(n.to_string());
            }
            JsonValue::Object(map) => {
                let id = map
                    .get("_id")
                    .or_else(|| map.get("id"))
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| D::Error::custom("favorite movie object without id"))?;
                ids.insert(id.to_string());
            }
            _ => return Err(D::Error::custom("expected string id in favorites")),
        }
    }
    Ok(ids)
}
