//! Records delivered by the streaming filter endpoint.
//!
//! Only the fields `tgrep` prints or filters on are modelled. Every field
//! falls back to its default when it is missing or `null`, so control
//! messages (`{"limit": ..}`, `{"delete": ..}`) decode as empty tweets and
//! can be told apart with [`Tweet::is_status`].

use serde::{Deserialize, Deserializer, Serialize};

/// A status as delivered by the streaming API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contributors: Vec<Contributor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: Coordinates,
    /// Creation time as rendered by the API, e.g. `Wed Aug 27 13:08:45 +0000 2008`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    /// Machine-detected BCP-47 language of `text`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub lang: String,
}

impl Tweet {
    /// `true` for status records, `false` for stream control messages.
    pub fn is_status(&self) -> bool {
        !self.created_at.is_empty() && !self.user.screen_name.is_empty()
    }

    /// Compare the tweet language with the primary subtag of `tag`.
    ///
    /// `th-th`, `th` and `TH` all select Thai tweets. An empty tag matches
    /// every tweet.
    pub fn matches_language(&self, tag: &str) -> bool {
        let wanted = primary_subtag(tag);
        wanted.is_empty() || primary_subtag(&self.lang).eq_ignore_ascii_case(wanted)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id_str: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screen_name: String,
}

/// GeoJSON point, `[longitude, latitude]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: Vec<f64>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contributors_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_profile: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_profile_image: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub favourites_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub followers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub friends_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub geo_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screen_name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn primary_subtag(tag: &str) -> &str {
    tag.split(|c: char| c == '-' || c == '_').next().unwrap_or_default()
}
