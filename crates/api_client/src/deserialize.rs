use serde::de::DeserializeOwned;
use shared::{domain::Pokemon, error::ErrorApiResponses};

use crate::{error::ClientError, ApiResponse};

pub fn pokemon(response: &ApiResponse) -> Result<Pokemon, ClientError> {
    json(response)
}

pub fn pokemons(response: &ApiResponse) -> Result<Vec<Pokemon>, ClientError> {
    json(response)
}

pub fn error_response(response: &ApiResponse) -> Result<ErrorApiResponses, ClientError> {
    json(response)
}

fn json<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ClientError> {
    Ok(serde_json::from_slice(&response.body)?)
}
