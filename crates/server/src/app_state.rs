use controller::PokedexController;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) controller: PokedexController,
    pub(crate) max_form_bytes: usize,
}
