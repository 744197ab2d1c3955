//! The Pokedex REST API as consumed by this client.
//!
//! [`PokedexApi`] is the seam every flow is written against; [`HttpPokedexClient`]
//! is the reqwest implementation used by the binary, and tests substitute an
//! in-memory fake.

use crate::config::ClientConfig;
use crate::errors::{PokedexError, PokedexResult};
use reqwest::{StatusCode, Url};
use schema::{NewPokemon, PokemonPage, PokemonRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

#[allow(async_fn_in_trait)]
pub trait PokedexApi {
    /// `GET /api/pokemons?page=N`, pages start at 1.
    async fn list_page(&self, page: u32) -> PokedexResult<PokemonPage>;
    /// `GET /api/pokemons/search/:query`. A failed search yields no results.
    async fn search(&self, query: &str) -> PokedexResult<Vec<PokemonRecord>>;
    async fn get(&self, id: u32) -> PokedexResult<PokemonRecord>;
    async fn create(&self, new: &NewPokemon) -> PokedexResult<PokemonRecord>;
    async fn update(&self, record: &PokemonRecord) -> PokedexResult<PokemonRecord>;
    async fn delete(&self, id: u32) -> PokedexResult<()>;
}

/// Fetch every page, one request at a time, until the server reports no more.
///
/// A page answered with a non-success status ends the loop and keeps what was
/// already fetched. A transport or decode failure aborts the whole load so the
/// caller can keep its previous state.
pub async fn load_all_pages<A: PokedexApi>(api: &A) -> PokedexResult<Vec<PokemonRecord>> {
    let mut records = Vec::new();
    let mut page = 1;

    loop {
        match api.list_page(page).await {
            Ok(envelope) => {
                debug!(page, total_pages = envelope.total_pages, count = envelope.data.len(), "page loaded");
                records.extend(envelope.data);
                if page >= envelope.total_pages {
                    break;
                }
                page += 1;
            }
            Err(PokedexError::Status { status, message }) => {
                warn!(page, status, %message, "page request refused, keeping pages loaded so far");
                break;
            }
            Err(err) => return Err(err),
        }
    }

    info!(count = records.len(), pages = page, "full dataset loaded");
    Ok(records)
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn status_error(status: StatusCode, body: &str) -> PokedexError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| format!("request failed with status {}", status));
    PokedexError::Status {
        status: status.as_u16(),
        message,
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> PokedexResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|e| PokedexError::Decode(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct HttpPokedexClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPokedexClient {
    pub fn new(config: &ClientConfig) -> PokedexResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/pokemons", self.base_url)
    }

    fn record_url(&self, id: u32) -> String {
        format!("{}/api/pokemons/{}", self.base_url, id)
    }

    fn search_url(&self, query: &str) -> PokedexResult<Url> {
        let mut url = Url::parse(&format!("{}/search", self.collection_url()))
            .map_err(|e| PokedexError::Config(format!("invalid api base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| PokedexError::Config("api base url cannot carry a path".to_string()))?
            .push(query);
        Ok(url)
    }
}

impl PokedexApi for HttpPokedexClient {
    async fn list_page(&self, page: u32) -> PokedexResult<PokemonPage> {
        let response = self
            .client
            .get(self.collection_url())
            .query(&[("page", page)])
            .send()
            .await?;
        read_json(response).await
    }

    async fn search(&self, query: &str) -> PokedexResult<Vec<PokemonRecord>> {
        let response = self.client.get(self.search_url(query)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%status, query, "search refused, treating as no results");
            return Ok(Vec::new());
        }
        // Anything other than an array counts as "no results".
        let body: serde_json::Value = read_json(response).await?;
        match body {
            serde_json::Value::Array(_) => Ok(serde_json::from_value(body)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn get(&self, id: u32) -> PokedexResult<PokemonRecord> {
        let response = self.client.get(self.record_url(id)).send().await?;
        read_json(response).await
    }

    async fn create(&self, new: &NewPokemon) -> PokedexResult<PokemonRecord> {
        let response = self
            .client
            .post(self.collection_url())
            .json(new)
            .send()
            .await?;
        read_json(response).await
    }

    async fn update(&self, record: &PokemonRecord) -> PokedexResult<PokemonRecord> {
        let response = self
            .client
            .put(self.record_url(record.id))
            .json(record)
            .send()
            .await?;
        read_json(response).await
    }

    async fn delete(&self, id: u32) -> PokedexResult<()> {
        let response = self.client.delete(self.record_url(id)).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(status_error(status, &body))
        }
    }
}
