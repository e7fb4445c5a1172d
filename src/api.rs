use crate::browser;
use crate::config;
use crate::game::{Category, CategoryId, Clue, ClueId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;

/// Entry of `GET categories?count=N`.
#[derive(Debug, Deserialize, Clone)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub title: String,
    pub clues_count: usize,
}

/// Body of `GET category?id=N`.
#[derive(Debug, Deserialize, Clone)]
pub struct RawCategory {
    pub id: CategoryId,
    pub title: String,
    pub clues: Vec<RawClue>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawClue {
    pub id: ClueId,
    // missing on some clues
    #[serde(default)]
    pub value: Option<u32>,
    pub question: String,
    pub answer: String,
}

/// The two trivia API endpoints the game reads from.
#[async_trait(?Send)]
pub trait TriviaApi {
    async fn categories(&self) -> Result<Vec<CategorySummary>>;
    async fn category(&self, id: CategoryId) -> Result<RawCategory>;
}

/// `TriviaApi` over `window.fetch`.
pub struct HttpApi;

#[async_trait(?Send)]
impl TriviaApi for HttpApi {
    async fn categories(&self) -> Result<Vec<CategorySummary>> {
        let url = config::categories_url();
        browser::fetch_json(&url)
            .await
            .with_context(|| format!("Failed to load categories from : {}", url))
    }

    async fn category(&self, id: CategoryId) -> Result<RawCategory> {
        let url = config::category_url(id);
        browser::fetch_json(&url)
            .await
            .with_context(|| format!("Failed to load category from : {}", url))
    }
}

/// Picks up to `CATEGORY_COUNT` distinct categories that have enough clues
/// to fill a column. Repeated ids in the listing count once.
pub async fn select_category_ids<R>(api: &dyn TriviaApi, rng: &mut R) -> Result<Vec<CategoryId>>
where
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let candidates = api
        .categories()
        .await?
        .into_iter()
        .filter(|summary| summary.clues_count >= config::CLUES_PER_CATEGORY)
        .map(|summary| summary.id)
        .filter(|id| seen.insert(*id))
        .collect();
    Ok(sample(candidates, config::CATEGORY_COUNT, rng))
}

/// Draws `count` items without replacement by repeatedly removing a random
/// index from the pool. Returns the whole pool, shuffled, if it is smaller.
pub fn sample<T, R>(mut pool: Vec<T>, count: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let mut picked = Vec::with_capacity(count.min(pool.len()));
    while picked.len() < count && !pool.is_empty() {
        let index = rng.gen_range(0..pool.len());
        picked.push(pool.remove(index));
    }
    picked
}

pub async fn fetch_category(api: &dyn TriviaApi, id: CategoryId) -> Result<Category> {
    let raw = api.category(id).await?;
    Ok(normalize(raw))
}

/// Keeps the first `CLUES_PER_CATEGORY` clues and fills in missing values
/// from the clue's position: 100, 200, ...
pub fn normalize(raw: RawCategory) -> Category {
    let clues = raw
        .clues
        .into_iter()
        .take(config::CLUES_PER_CATEGORY)
        .enumerate()
        .map(|(index, clue)| Clue {
            id: clue.id,
            value: clue
                .value
                .filter(|&value| value > 0)
                .unwrap_or((index as u32 + 1) * 100),
            question: clue.question,
            answer: clue.answer,
        })
        .collect();
    Category {
        id: raw.id,
        title: raw.title,
        clues,
    }
}

/// Selects categories and loads each one, one request at a time, in the order
/// they were picked.
pub async fn load_board<R>(api: &dyn TriviaApi, rng: &mut R) -> Result<Vec<Category>>
where
    R: Rng + ?Sized,
{
    let ids = select_category_ids(api, rng).await?;
    let mut categories = Vec::with_capacity(ids.len());
    for id in ids {
        categories.push(fetch_category(api, id).await?);
    }
    Ok(categories)
}
