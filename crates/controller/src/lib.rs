use std::sync::Arc;

use api_client::{deserialize, ClientError, PokemonApi, StatusCode, TiposApi};
use shared::{
    domain::{Pokemon, PokemonId, Tipo},
    protocol::PokemonViewModel,
};
use tracing::{error, info, warn};

pub mod alerts;
pub mod form;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use alerts::Alert;
pub use form::{FieldErrors, PokemonForm};

/// Create/edit form contents plus the type list for its selectors.
///
/// `tipos` is `None` when the page is re-displayed after a submission; no
/// extra backend call is made for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPage {
    pub form: PokemonForm,
    pub tipos: Option<Vec<Tipo>>,
    pub errors: FieldErrors,
}

/// What a handler decided; the web layer turns it into a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    PokemonList(Vec<Pokemon>),
    Details(Pokemon),
    CreateForm(FormPage),
    EditForm { id: PokemonId, page: FormPage },
    DeleteConfirm(Pokemon),
    Alert(Alert),
    RedirectToIndex,
    NotFound,
    LostConnection,
    BadBackendResponse,
}

#[derive(Clone)]
pub struct PokedexController {
    pokemons: Arc<dyn PokemonApi>,
    tipos: Arc<dyn TiposApi>,
}

impl PokedexController {
    pub fn new(pokemons: Arc<dyn PokemonApi>, tipos: Arc<dyn TiposApi>) -> Self {
        Self { pokemons, tipos }
    }

    pub async fn index(&self) -> Outcome {
        settle("index", self.try_index().await)
    }

    pub async fn details(&self, id: PokemonId) -> Outcome {
        settle(
            "details",
            self.fetch_pokemon(id)
                .await
                .map(|found| found.map_or(Outcome::NotFound, Outcome::Details)),
        )
    }

    pub async fn create_form(&self) -> Outcome {
        settle("create_form", self.try_create_form().await)
    }

    pub async fn create(&self, form: PokemonForm) -> Outcome {
        settle("create", self.submit(None, form).await)
    }

    pub async fn edit_form(&self, id: PokemonId) -> Outcome {
        settle("edit_form", self.try_edit_form(id).await)
    }

    pub async fn edit(&self, id: PokemonId, form: PokemonForm) -> Outcome {
        if !form.targets(id) {
            warn!(%id, submitted = %form.id_pokemon, "edit path id does not match form id");
            return Outcome::NotFound;
        }
        settle("edit", self.submit(Some(id), form).await)
    }

    pub async fn delete_form(&self, id: PokemonId) -> Outcome {
        settle(
            "delete_form",
            self.fetch_pokemon(id)
                .await
                .map(|found| found.map_or(Outcome::NotFound, Outcome::DeleteConfirm)),
        )
    }

    /// Redirects whatever status the backend answers with.
    pub async fn delete_confirmed(&self, id: PokemonId) -> Outcome {
        settle("delete_confirmed", self.try_delete(id).await)
    }

    async fn try_index(&self) -> Result<Outcome, ClientError> {
        let response = self.pokemons.list_pokemons().await?;
        if !response.is_success() {
            info!(status = %response.status, "backend refused pokemon list");
            return Ok(Outcome::NotFound);
        }
        Ok(Outcome::PokemonList(deserialize::pokemons(&response)?))
    }

    async fn try_create_form(&self) -> Result<Outcome, ClientError> {
        let tipos = self.tipos.list_tipos().await?;
        Ok(Outcome::CreateForm(FormPage {
            form: PokemonForm::default(),
            tipos: Some(tipos),
            errors: FieldErrors::default(),
        }))
    }

    async fn try_edit_form(&self, id: PokemonId) -> Result<Outcome, ClientError> {
        let Some(pokemon) = self.fetch_pokemon(id).await? else {
            return Ok(Outcome::NotFound);
        };
        let view_model = PokemonViewModel::from(&pokemon);
        let tipos = self.tipos.list_tipos().await?;
        Ok(Outcome::EditForm {
            id,
            page: FormPage {
                form: PokemonForm::from_view_model(&view_model),
                tipos: Some(tipos),
                errors: FieldErrors::default(),
            },
        })
    }

    async fn try_delete(&self, id: PokemonId) -> Result<Outcome, ClientError> {
        let response = self.pokemons.delete_pokemon(id).await?;
        if !response.is_success() {
            warn!(%id, status = %response.status, "backend refused delete; redirecting anyway");
        }
        Ok(Outcome::RedirectToIndex)
    }

    async fn fetch_pokemon(&self, id: PokemonId) -> Result<Option<Pokemon>, ClientError> {
        let response = self.pokemons.get_pokemon(id).await?;
        if !response.is_success() {
            info!(%id, status = %response.status, "pokemon not available");
            return Ok(None);
        }
        deserialize::pokemon(&response).map(Some)
    }

    /// Shared create/edit submission; `target` is the pokemon being edited.
    async fn submit(
        &self,
        target: Option<PokemonId>,
        form: PokemonForm,
    ) -> Result<Outcome, ClientError> {
        let view_model = match form.validate() {
            Ok(view_model) => view_model,
            Err(errors) => return Ok(redisplay(target, form, errors)),
        };

        let response = match target {
            Some(id) => self.pokemons.edit_pokemon(id, &view_model).await?,
            None => self.pokemons.create_pokemon(&view_model).await?,
        };
        if response.is_success() {
            return Ok(Outcome::RedirectToIndex);
        }

        let body = deserialize::error_response(&response).unwrap_or_default();
        if response.status == StatusCode::CONFLICT {
            if let Some(code) = body.conflict_code() {
                info!(code = code.as_str(), numero = view_model.numero, "backend reported duplicate");
                return Ok(Outcome::Alert(alerts::for_conflict(code, &view_model)));
            }
        }

        warn!(
            status = %response.status,
            backend_status = %body.status,
            message = %body.message,
            "backend rejected pokemon; showing form again"
        );
        Ok(redisplay(target, form, FieldErrors::default()))
    }
}

fn redisplay(target: Option<PokemonId>, form: PokemonForm, errors: FieldErrors) -> Outcome {
    let page = FormPage {
        form,
        tipos: None,
        errors,
    };
    match target {
        Some(id) => Outcome::EditForm { id, page },
        None => Outcome::CreateForm(page),
    }
}

fn settle(handler: &'static str, result: Result<Outcome, ClientError>) -> Outcome {
    match result {
        Ok(outcome) => outcome,
        Err(err) if err.is_transport() => {
            warn!(handler, error = %err, "lost connection to backend");
            Outcome::LostConnection
        }
        Err(err) => {
            error!(handler, error = %err, "unusable backend response");
            Outcome::BadBackendResponse
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
