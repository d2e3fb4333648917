//! Scraped post records and the lenient coercion applied to their fields.
//!
//! Scraper exports are loosely typed: counts show up as numbers, numeric
//! strings, `null`, or not at all. Every count is coerced to a non-negative
//! integer at the deserialization boundary so nothing downstream sees a
//! missing or negative value.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ConfigError;

/// Media kind of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Image,
    Video,
    Carousel,
}

impl PostType {
    /// Map a scraper type string to a `PostType`, case-insensitively.
    ///
    /// Accepts both the current (`Image`, `Video`, `Sidecar`) and legacy
    /// (`GraphImage`, `GraphVideo`, `GraphSidecar`) spellings.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "image" | "graphimage" => Some(PostType::Image),
            "video" | "graphvideo" => Some(PostType::Video),
            "sidecar" | "graphsidecar" | "carousel" => Some(PostType::Carousel),
            _ => None,
        }
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostType::Image => write!(f, "image"),
            PostType::Video => write!(f, "video"),
            PostType::Carousel => write!(f, "carousel"),
        }
    }
}

/// One observed post as exported by the scraper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_post_type")]
    pub post_type: Option<PostType>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub owner_username: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub owner_followers_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub owner_following_count: u64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub owner_is_verified: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub owner_is_business_account: bool,

    #[serde(default, deserialize_with = "lenient_count")]
    pub likes_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub comments_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub video_view_count: u64,

    #[serde(default, deserialize_with = "lenient_text")]
    pub caption: String,
}

/// Coerce an arbitrary JSON value into a non-negative count.
///
/// Numbers truncate toward zero; strings use integer-prefix parsing
/// (`"12.9"` → 12, `"abc"` → 0). Negative, non-finite and non-numeric
/// values become 0.
#[must_use]
pub fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else if n.as_i64().is_some() {
                0
            } else {
                n.as_f64().map_or(0, float_to_count)
            }
        }
        Value::String(s) => parse_count_prefix(s),
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_count(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 {
        f.trunc() as u64
    } else {
        0
    }
}

fn parse_count_prefix(s: &str) -> u64 {
    let trimmed = s.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u64>().unwrap_or(0)
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, coerce_count))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(coerce_flag))
}

/// Coerce a loosely typed flag: `true`, any nonzero number, and the strings
/// `"true"`, `"yes"` and `"1"` (case-insensitive) are set; everything else,
/// including `"false"`, is not.
#[must_use]
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            ["true", "yes", "1"].iter().any(|t| s.eq_ignore_ascii_case(t))
        }
        _ => false,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_post_type<'de, D>(deserializer: D) -> Result<Option<PostType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.as_deref().and_then(PostType::parse))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = lenient_string(deserializer)? else {
        return Ok(None);
    };
    let ts = parse_timestamp(&raw);
    if ts.is_none() {
        tracing::warn!(timestamp = %raw, "dropping unparseable post timestamp");
    }
    Ok(ts)
}

/// Parse an RFC 3339 timestamp, or a zoneless `YYYY-MM-DD[T ]HH:MM:SS[.f]`
/// one read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PostsFile {
    Bare(Vec<PostRecord>),
    Wrapped { data: Vec<PostRecord> },
}

/// Load post records from a JSON export.
///
/// Accepts either a bare array of posts or an object with a `data` array.
///
/// # Errors
///
/// Returns `ConfigError::FileIo` if the file cannot be read and
/// `ConfigError::PostsParse` if it is not a recognised posts document.
pub fn load_posts(path: &Path) -> Result<Vec<PostRecord>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: PostsFile =
        serde_json::from_str(&content).map_err(|e| ConfigError::PostsParse {
            path: path.display().to_string(),
            source: e,
        })?;

    let posts = match file {
        PostsFile::Bare(posts) | PostsFile::Wrapped { data: posts } => posts,
    };
    tracing::debug!(path = %path.display(), count = posts.len(), "loaded posts");
    Ok(posts)
}

#[cfg(test)]
#[path = "posts_test.rs"]
mod tests;
