//! In-memory backend clients for exercising the controller without a network.

use std::{collections::VecDeque, sync::Mutex};

use api_client::{ApiResponse, ClientError, PokemonApi, StatusCode, TiposApi};
use async_trait::async_trait;
use shared::{
    domain::{PokemonId, Tipo, TipoId},
    protocol::PokemonViewModel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List,
    Get(PokemonId),
    Create(PokemonViewModel),
    Edit(PokemonId, PokemonViewModel),
    Delete(PokemonId),
    ListTipos,
}

/// Answers calls from a queue of scripted replies and records every call.
#[derive(Default)]
pub struct FakePokemonApi {
    replies: Mutex<VecDeque<Result<ApiResponse, ClientError>>>,
    calls: Mutex<Vec<BackendCall>>,
}

impl FakePokemonApi {
    pub fn replying(replies: impl IntoIterator<Item = Result<ApiResponse, ClientError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn answer(&self, call: BackendCall) -> Result<ApiResponse, ClientError> {
        self.calls.lock().expect("calls lock").push(call.clone());
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for {call:?}"))
    }
}

#[async_trait]
impl PokemonApi for FakePokemonApi {
    async fn list_pokemons(&self) -> Result<ApiResponse, ClientError> {
        self.answer(BackendCall::List)
    }

    async fn get_pokemon(&self, id: PokemonId) -> Result<ApiResponse, ClientError> {
        self.answer(BackendCall::Get(id))
    }

    async fn create_pokemon(
        &self,
        view_model: &PokemonViewModel,
    ) -> Result<ApiResponse, ClientError> {
        self.answer(BackendCall::Create(view_model.clone()))
    }

    async fn edit_pokemon(
        &self,
        id: PokemonId,
        view_model: &PokemonViewModel,
    ) -> Result<ApiResponse, ClientError> {
        self.answer(BackendCall::Edit(id, view_model.clone()))
    }

    async fn delete_pokemon(&self, id: PokemonId) -> Result<ApiResponse, ClientError> {
        self.answer(BackendCall::Delete(id))
    }
}

pub struct FakeTiposApi {
    tipos: Result<Vec<Tipo>, String>,
    calls: Mutex<usize>,
}

impl FakeTiposApi {
    pub fn with(tipos: Vec<Tipo>) -> Self {
        Self {
            tipos: Ok(tipos),
            calls: Mutex::new(0),
        }
    }

    /// Every call fails as if the tipos service were down.
    pub fn unreachable() -> Self {
        Self {
            tipos: Err("connection refused".into()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

#[async_trait]
impl TiposApi for FakeTiposApi {
    async fn list_tipos(&self) -> Result<Vec<Tipo>, ClientError> {
        *self.calls.lock().expect("calls lock") += 1;
        self.tipos.clone().map_err(ClientError::Transport)
    }
}

pub fn standard_tipos() -> Vec<Tipo> {
    [(1, "Normal"), (3, "Flying"), (4, "Electric"), (10, "Fire")]
        .into_iter()
        .map(|(id, nombre)| Tipo {
            id: TipoId(id),
            nombre: nombre.to_string(),
        })
        .collect()
}

pub fn json_reply(status: StatusCode, body: serde_json::Value) -> Result<ApiResponse, ClientError> {
    Ok(ApiResponse::new(status, body.to_string().into_bytes()))
}

pub fn empty_reply(status: StatusCode) -> Result<ApiResponse, ClientError> {
    Ok(ApiResponse::new(status, Vec::new()))
}

pub fn connection_refused() -> Result<ApiResponse, ClientError> {
    Err(ClientError::Transport("connection refused".into()))
}
