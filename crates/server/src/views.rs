use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use controller::{Alert, FormPage, Outcome, PokemonForm};
use shared::domain::{Pokemon, Tipo};

use crate::csrf::FIELD_NAME;

pub const INDEX_PATH: &str = "/pokedex";

pub fn render(outcome: Outcome, csrf_token: &str) -> Response {
    match outcome {
        Outcome::PokemonList(pokemons) => page(StatusCode::OK, "Pokédex", &list(&pokemons)),
        Outcome::Details(pokemon) => page(StatusCode::OK, &pokemon.name, &details(&pokemon)),
        Outcome::CreateForm(form_page) => page(
            StatusCode::OK,
            "New Pokémon",
            &pokemon_form(&form_page, "New Pokémon", "/pokedex/create", csrf_token),
        ),
        Outcome::EditForm { id, page: form_page } => page(
            StatusCode::OK,
            "Edit Pokémon",
            &pokemon_form(
                &form_page,
                "Edit Pokémon",
                &format!("/pokedex/edit/{}", id.0),
                csrf_token,
            ),
        ),
        Outcome::DeleteConfirm(pokemon) => page(
            StatusCode::OK,
            "Delete Pokémon",
            &delete_confirm(&pokemon, csrf_token),
        ),
        Outcome::Alert(alert) => page(StatusCode::CONFLICT, "Duplicate Pokémon", &alert_box(&alert)),
        Outcome::RedirectToIndex => Redirect::to(INDEX_PATH).into_response(),
        Outcome::NotFound => not_found(),
        Outcome::LostConnection => page(
            StatusCode::SERVICE_UNAVAILABLE,
            "Connection lost",
            "<h1>Connection lost</h1>\
             <p>The Pokédex service cannot be reached right now. Please try again later.</p>\
             <p><a href=\"/pokedex\">Back to list</a></p>",
        ),
        Outcome::BadBackendResponse => page(
            StatusCode::BAD_GATEWAY,
            "Unexpected response",
            "<h1>Unexpected response</h1>\
             <p>The Pokédex service answered with data this page cannot show.</p>\
             <p><a href=\"/pokedex\">Back to list</a></p>",
        ),
    }
}

pub fn not_found() -> Response {
    page(
        StatusCode::NOT_FOUND,
        "Not found",
        "<h1>Not found</h1><p><a href=\"/pokedex\">Back to list</a></p>",
    )
}

pub fn forgery_rejected() -> Response {
    page(
        StatusCode::BAD_REQUEST,
        "Bad request",
        "<h1>Bad request</h1><p>The form expired or was not sent from this site. \
         Reload the page and try again.</p>",
    )
}

fn page(status: StatusCode, title: &str, body: &str) -> Response {
    let html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
         <title>{} - Pokédex</title></head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    );
    (status, Html(html)).into_response()
}

fn list(pokemons: &[Pokemon]) -> String {
    let mut html = String::from(
        "<h1>Pokédex</h1>\n<p><a href=\"/pokedex/create\">Create new</a></p>\n\
         <table>\n<tr><th>Number</th><th>Name</th><th>Types</th><th></th></tr>\n",
    );
    for pokemon in pokemons {
        let id = pokemon.id_pokemon.0;
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>\
             <a href=\"/pokedex/details/{id}\">Details</a> | \
             <a href=\"/pokedex/edit/{id}\">Edit</a> | \
             <a href=\"/pokedex/delete/{id}\">Delete</a></td></tr>\n",
            pokemon.numero,
            escape(&pokemon.name),
            type_names(pokemon),
        ));
    }
    html.push_str("</table>");
    html
}

fn type_names(pokemon: &Pokemon) -> String {
    pokemon
        .tipos
        .iter()
        .map(|(_, name)| escape(name))
        .collect::<Vec<_>>()
        .join(" / ")
}

fn pokemon_facts(pokemon: &Pokemon) -> String {
    let mut html = format!(
        "<dl>\n<dt>Number</dt><dd>{}</dd>\n<dt>Name</dt><dd>{}</dd>\n\
         <dt>Description</dt><dd>{}</dd>\n",
        pokemon.numero,
        escape(&pokemon.name),
        escape(&pokemon.description),
    );
    let mut tipos = pokemon.tipos.iter();
    if let Some((_, primary)) = tipos.next() {
        html.push_str(&format!("<dt>Primary type</dt><dd>{}</dd>\n", escape(primary)));
    }
    if let Some((_, secondary)) = tipos.next() {
        html.push_str(&format!("<dt>Secondary type</dt><dd>{}</dd>\n", escape(secondary)));
    }
    html.push_str("</dl>");
    html
}

fn details(pokemon: &Pokemon) -> String {
    format!(
        "<h1>{}</h1>\n{}\n<p><a href=\"/pokedex/edit/{}\">Edit</a> | \
         <a href=\"/pokedex\">Back to list</a></p>",
        escape(&pokemon.name),
        pokemon_facts(pokemon),
        pokemon.id_pokemon.0,
    )
}

fn delete_confirm(pokemon: &Pokemon, csrf_token: &str) -> String {
    format!(
        "<h1>Delete {}?</h1>\n{}\n<form method=\"post\" action=\"/pokedex/delete/{}\">\n\
         {}<button type=\"submit\">Delete</button> | <a href=\"/pokedex\">Back to list</a>\n\
         </form>",
        escape(&pokemon.name),
        pokemon_facts(pokemon),
        pokemon.id_pokemon.0,
        hidden(FIELD_NAME, csrf_token),
    )
}

fn alert_box(alert: &Alert) -> String {
    format!(
        "<div class=\"alert\" role=\"alert\" data-code=\"{}\">{}</div>\n\
         <p><a href=\"/pokedex\">Back to list</a></p>",
        alert.code.as_str(),
        escape(&alert.message),
    )
}

fn pokemon_form(form_page: &FormPage, heading: &str, action: &str, csrf_token: &str) -> String {
    let FormPage {
        form,
        tipos,
        errors,
    } = form_page;
    let PokemonForm {
        id_pokemon,
        numero,
        name,
        description,
        primer_tipo,
        segundo_tipo,
    } = form;
    let field_error = |field: &str| {
        errors
            .get(field)
            .map(|message| format!(" <span class=\"field-error\">{}</span>", escape(message)))
            .unwrap_or_default()
    };

    format!(
        "<h1>{}</h1>\n<form method=\"post\" action=\"{}\">\n{}{}\
         <p><label>Number <input type=\"number\" name=\"numero\" value=\"{}\"></label>{}</p>\n\
         <p><label>Name <input type=\"text\" name=\"name\" value=\"{}\"></label>{}</p>\n\
         <p><label>Description <textarea name=\"description\">{}</textarea></label>{}</p>\n\
         <p><label>Primary type {}</label>{}</p>\n\
         <p><label>Secondary type {}</label>{}</p>\n\
         <p><button type=\"submit\">Save</button> | <a href=\"/pokedex\">Back to list</a></p>\n</form>",
        escape(heading),
        escape(action),
        hidden(FIELD_NAME, csrf_token),
        hidden("id_pokemon", id_pokemon),
        escape(numero),
        field_error("numero"),
        escape(name),
        field_error("name"),
        escape(description),
        field_error("description"),
        tipo_selector("primer_tipo", primer_tipo, tipos.as_deref(), false),
        field_error("primer_tipo"),
        tipo_selector("segundo_tipo", segundo_tipo, tipos.as_deref(), true),
        field_error("segundo_tipo"),
    )
}

/// A `<select>` over the type list, or a plain number input when none was fetched.
fn tipo_selector(name: &str, current: &str, tipos: Option<&[Tipo]>, optional: bool) -> String {
    let Some(tipos) = tipos else {
        return format!(
            "<input type=\"number\" name=\"{name}\" value=\"{}\">",
            escape(current)
        );
    };

    let current = current.trim();
    let mut html = format!("<select name=\"{name}\">");
    if optional {
        let selected = if current.is_empty() || current == "0" {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!("<option value=\"0\"{selected}>None</option>"));
    } else {
        html.push_str("<option value=\"\">Choose a type</option>");
    }
    for tipo in tipos {
        let value = tipo.id.0.to_string();
        let selected = if value == current { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{value}\"{selected}>{}</option>",
            escape(&tipo.nombre)
        ));
    }
    html.push_str("</select>");
    html
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{name}\" value=\"{}\">\n",
        escape(value)
    )
}

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
