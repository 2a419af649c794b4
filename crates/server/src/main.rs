use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use api_client::{build_http_client, HttpPokemonApi, HttpTiposApi};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{Redirect, Response},
    routing::get,
    Form, Router,
};
use controller::{Outcome, PokedexController, PokemonForm};
use serde::Deserialize;
use shared::domain::PokemonId;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};

mod app_state;
mod config;
mod csrf;
mod views;

use app_state::AppState;
use config::{load_settings, prepare_base_url};
use csrf::CsrfToken;

#[derive(Debug, Deserialize)]
struct PokemonSubmission {
    #[serde(default)]
    csrf_token: String,
    #[serde(flatten)]
    form: PokemonForm,
}

#[derive(Debug, Deserialize)]
struct DeleteSubmission {
    #[serde(default)]
    csrf_token: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let pokemon_api_url = prepare_base_url(&settings.pokemon_api_url)?;
    let tipos_api_url = prepare_base_url(&settings.tipos_api_url)?;

    let http = build_http_client(settings.request_timeout()).context("failed to build http client")?;
    let pokemons = HttpPokemonApi::new(http.clone(), &pokemon_api_url)?;
    let tipos = HttpTiposApi::new(http, &tipos_api_url)?;
    info!(%pokemon_api_url, %tipos_api_url, "backend clients ready");

    let state = AppState {
        controller: PokedexController::new(Arc::new(pokemons), Arc::new(tipos)),
        max_form_bytes: settings.max_form_bytes,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "pokedex listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let max_form_bytes = state.max_form_bytes;
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/pokedex", get(index))
        .route("/pokedex/details/:id", get(details))
        .route("/pokedex/create", get(create_form).post(create))
        .route("/pokedex/edit/:id", get(edit_form).post(edit))
        .route("/pokedex/delete/:id", get(delete_form).post(delete_confirmed))
        .layer(RequestBodyLimitLayer::new(max_form_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Renders the outcome and hands out the anti-forgery cookie when it is new.
fn respond(outcome: Outcome, token: &CsrfToken) -> Response {
    let mut response = views::render(outcome, token.value());
    if token.is_fresh() {
        response
            .headers_mut()
            .append(header::SET_COOKIE, token.set_cookie());
    }
    response
}

fn verified(headers: &HeaderMap, submitted: &str) -> Result<CsrfToken, Response> {
    CsrfToken::verify(headers, submitted).ok_or_else(|| {
        warn!("rejected form post with missing or mismatched anti-forgery token");
        views::forgery_rejected()
    })
}

async fn root() -> Redirect {
    Redirect::to(views::INDEX_PATH)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    respond(state.controller.index().await, &CsrfToken::issue(&headers))
}

async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    respond(
        state.controller.details(PokemonId(id)).await,
        &CsrfToken::issue(&headers),
    )
}

async fn create_form(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    respond(
        state.controller.create_form().await,
        &CsrfToken::issue(&headers),
    )
}

async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(submission): Form<PokemonSubmission>,
) -> Response {
    let token = match verified(&headers, &submission.csrf_token) {
        Ok(token) => token,
        Err(rejection) => return rejection,
    };
    respond(state.controller.create(submission.form).await, &token)
}

async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    respond(
        state.controller.edit_form(PokemonId(id)).await,
        &CsrfToken::issue(&headers),
    )
}

async fn edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Form(submission): Form<PokemonSubmission>,
) -> Response {
    let token = match verified(&headers, &submission.csrf_token) {
        Ok(token) => token,
        Err(rejection) => return rejection,
    };
    respond(
        state.controller.edit(PokemonId(id), submission.form).await,
        &token,
    )
}

async fn delete_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    respond(
        state.controller.delete_form(PokemonId(id)).await,
        &CsrfToken::issue(&headers),
    )
}

async fn delete_confirmed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Form(submission): Form<DeleteSubmission>,
) -> Response {
    let token = match verified(&headers, &submission.csrf_token) {
        Ok(token) => token,
        Err(rejection) => return rejection,
    };
    respond(
        state.controller.delete_confirmed(PokemonId(id)).await,
        &token,
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
