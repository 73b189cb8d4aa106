use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// One search hit as returned by `/search_by_date`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default, rename = "objectID", deserialize_with = "null_as_default")]
    pub object_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub num_comments: Option<i64>,
    #[serde(default)]
    pub created_at_i: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A page of search results. `hits` is required; a body without it is malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    #[serde(default, rename = "nbPages")]
    pub nb_pages: Option<u32>,
}

impl SearchPage {
    /// Total page count, treating a missing or zero value as a single page.
    pub fn total_pages(&self) -> u32 {
        match self.nb_pages {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub author: String,
    pub created_at: i64,
    pub points: i64,
    pub comments_count: i64,
    pub url: Option<String>,
    pub score: f64,
    pub saved: bool,
}

impl From<SearchHit> for Story {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.object_id,
            title: hit.title.unwrap_or_default(),
            author: hit.author.unwrap_or_default(),
            created_at: hit.created_at_i.unwrap_or(0),
            points: hit.points.unwrap_or(0),
            comments_count: hit.num_comments.unwrap_or(0),
            url: hit.url.filter(|u| !u.is_empty()),
            score: 0.0,
            saved: false,
        }
    }
}

/// A node of the `/items/{id}` tree. The root is the story itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemNode {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<ItemNode>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlatComment {
    pub author: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Everything the item page renders.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub points: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub latest_comments: Vec<FlatComment>,
    pub total_comments: usize,
}

impl ItemView {
    pub fn discussion_url(&self) -> String {
        format!("https://news.ycombinator.com/item?id={}", self.id)
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Short relative age, e.g. `5m ago`, `3h ago`, `2d ago`.
pub fn time_ago(created_at: i64, now: i64) -> String {
    let seconds = now.saturating_sub(created_at).max(0);
    if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86400)
    }
}
