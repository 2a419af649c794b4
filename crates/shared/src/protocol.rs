use serde::{Deserialize, Serialize};

use crate::domain::{Pokemon, PokemonId, TipoId};

/// Flattened create/edit payload sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonViewModel {
    pub id_pokemon: PokemonId,
    pub numero: i32,
    pub name: String,
    pub description: String,
    pub primer_tipo: TipoId,
    #[serde(default)]
    pub segundo_tipo: TipoId,
}

impl PokemonViewModel {
    pub fn secondary_tipo(&self) -> Option<TipoId> {
        (!self.segundo_tipo.is_none()).then_some(self.segundo_tipo)
    }
}

impl From<&Pokemon> for PokemonViewModel {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            id_pokemon: pokemon.id_pokemon,
            numero: pokemon.numero,
            name: pokemon.name.clone(),
            description: pokemon.description.clone(),
            primer_tipo: pokemon.tipos.primary_id(),
            segundo_tipo: pokemon.tipos.secondary_id().unwrap_or(TipoId::NONE),
        }
    }
}
