use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{PokemonId, Tipo},
    protocol::PokemonViewModel,
};
use tracing::debug;
use url::Url;

pub mod deserialize;
pub mod error;

pub use error::ClientError;
pub use reqwest::StatusCode;

/// Status and raw body of a backend answer; callers decide how to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[async_trait]
pub trait PokemonApi: Send + Sync {
    async fn list_pokemons(&self) -> Result<ApiResponse, ClientError>;
    async fn get_pokemon(&self, id: PokemonId) -> Result<ApiResponse, ClientError>;
    async fn create_pokemon(
        &self,
        view_model: &PokemonViewModel,
    ) -> Result<ApiResponse, ClientError>;
    async fn edit_pokemon(
        &self,
        id: PokemonId,
        view_model: &PokemonViewModel,
    ) -> Result<ApiResponse, ClientError>;
    async fn delete_pokemon(&self, id: PokemonId) -> Result<ApiResponse, ClientError>;
}

#[async_trait]
pub trait TiposApi: Send + Sync {
    async fn list_tipos(&self) -> Result<Vec<Tipo>, ClientError>;
}

/// Shared pooled client; the timeout bounds each backend call end to end.
pub fn build_http_client(timeout: Duration) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ClientError::from)
}

/// Parses a backend base url, making sure relative joins stay below its path.
pub fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|_| ClientError::InvalidBaseUrl(raw.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

fn endpoint(base_url: &Url, path: &str) -> Result<Url, ClientError> {
    base_url
        .join(path)
        .map_err(|_| ClientError::InvalidBaseUrl(format!("{base_url}{path}")))
}

async fn into_api_response(response: reqwest::Response) -> Result<ApiResponse, ClientError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| ClientError::Transport(err.to_string()))?;
    Ok(ApiResponse::new(status, body.to_vec()))
}

#[derive(Clone)]
pub struct HttpPokemonApi {
    http: Client,
    base_url: Url,
}

impl HttpPokemonApi {
    pub fn new(http: Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn collection(&self) -> Result<Url, ClientError> {
        endpoint(&self.base_url, "pokemons")
    }

    fn item(&self, id: PokemonId) -> Result<Url, ClientError> {
        endpoint(&self.base_url, &format!("pokemons/{}", id.0))
    }
}

#[async_trait]
impl PokemonApi for HttpPokemonApi {
    async fn list_pokemons(&self) -> Result<ApiResponse, ClientError> {
        let url = self.collection()?;
        debug!(%url, "listing pokemons");
        into_api_response(self.http.get(url).send().await?).await
    }

    async fn get_pokemon(&self, id: PokemonId) -> Result<ApiResponse, ClientError> {
        let url = self.item(id)?;
        debug!(%url, "fetching pokemon");
        into_api_response(self.http.get(url).send().await?).await
    }

    async fn create_pokemon(
        &self,
        view_model: &PokemonViewModel,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.collection()?;
        debug!(%url, numero = view_model.numero, "creating pokemon");
        into_api_response(self.http.post(url).json(view_model).send().await?).await
    }

    async fn edit_pokemon(
        &self,
        id: PokemonId,
        view_model: &PokemonViewModel,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.item(id)?;
        debug!(%url, "editing pokemon");
        into_api_response(self.http.put(url).json(view_model).send().await?).await
    }

    async fn delete_pokemon(&self, id: PokemonId) -> Result<ApiResponse, ClientError> {
        let url = self.item(id)?;
        debug!(%url, "deleting pokemon");
        into_api_response(self.http.delete(url).send().await?).await
    }
}

#[derive(Clone)]
pub struct HttpTiposApi {
    http: Client,
    base_url: Url,
}

impl HttpTiposApi {
    pub fn new(http: Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl TiposApi for HttpTiposApi {
    async fn list_tipos(&self) -> Result<Vec<Tipo>, ClientError> {
        let url = endpoint(&self.base_url, "tipos")?;
        debug!(%url, "listing tipos");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus(status));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
