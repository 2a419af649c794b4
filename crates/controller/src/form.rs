use serde::{Deserialize, Serialize};
use shared::{
    domain::{PokemonId, TipoId},
    protocol::PokemonViewModel,
};

/// Raw create/edit form fields exactly as the browser posted them.
///
/// Everything stays a string so an invalid submission can be shown back to
/// the user untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokemonForm {
    pub id_pokemon: String,
    pub numero: String,
    pub name: String,
    pub description: String,
    pub primer_tipo: String,
    pub segundo_tipo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl PokemonForm {
    pub fn from_view_model(view_model: &PokemonViewModel) -> Self {
        Self {
            id_pokemon: view_model.id_pokemon.0.to_string(),
            numero: view_model.numero.to_string(),
            name: view_model.name.clone(),
            description: view_model.description.clone(),
            primer_tipo: view_model.primer_tipo.0.to_string(),
            segundo_tipo: view_model.segundo_tipo.0.to_string(),
        }
    }

    /// Whether the identifier embedded in the form is `id`.
    pub fn targets(&self, id: PokemonId) -> bool {
        self.id_pokemon.trim().parse::<i64>().ok() == Some(id.0)
    }

    pub fn validate(&self) -> Result<PokemonViewModel, FieldErrors> {
        let mut errors = FieldErrors::default();

        let id_pokemon = match self.id_pokemon.trim() {
            "" => PokemonId::default(),
            raw => match raw.parse::<i64>() {
                Ok(id) if id >= 0 => PokemonId(id),
                _ => {
                    errors.push("id_pokemon", "The identifier is not valid.");
                    PokemonId::default()
                }
            },
        };

        let numero = match self.numero.trim() {
            "" => {
                errors.push("numero", "The number field is required.");
                0
            }
            raw => match raw.parse::<i32>() {
                Ok(numero) if numero > 0 => numero,
                _ => {
                    errors.push("numero", "The number must be a positive whole number.");
                    0
                }
            },
        };

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "The name field is required.");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push("description", "The description field is required.");
        }

        let primer_tipo = match parse_tipo(&self.primer_tipo) {
            Some(tipo) if !tipo.is_none() => tipo,
            Some(_) => {
                errors.push("primer_tipo", "The primary type field is required.");
                TipoId::NONE
            }
            None => {
                errors.push("primer_tipo", "The primary type is not valid.");
                TipoId::NONE
            }
        };

        let segundo_tipo = parse_tipo(&self.segundo_tipo).unwrap_or_else(|| {
            errors.push("segundo_tipo", "The secondary type is not valid.");
            TipoId::NONE
        });

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PokemonViewModel {
            id_pokemon,
            numero,
            name: name.to_string(),
            description: description.to_string(),
            primer_tipo,
            segundo_tipo,
        })
    }
}

/// Empty means "no type"; anything else must be a non-negative integer.
fn parse_tipo(raw: &str) -> Option<TipoId> {
    match raw.trim() {
        "" => Some(TipoId::NONE),
        raw => raw.parse::<i64>().ok().filter(|id| *id >= 0).map(TipoId),
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
