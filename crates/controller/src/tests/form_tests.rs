use super::*;

fn filled() -> PokemonForm {
    PokemonForm {
        id_pokemon: "25".into(),
        numero: "25".into(),
        name: "  Pikachu ".into(),
        description: "Electric mouse".into(),
        primer_tipo: "4".into(),
        segundo_tipo: "".into(),
    }
}

#[test]
fn valid_form_becomes_view_model() {
    let view_model = filled().validate().expect("valid");
    assert_eq!(view_model.id_pokemon, PokemonId(25));
    assert_eq!(view_model.numero, 25);
    assert_eq!(view_model.name, "Pikachu");
    assert_eq!(view_model.primer_tipo, TipoId(4));
    assert_eq!(view_model.segundo_tipo, TipoId::NONE);
}

#[test]
fn create_form_without_identifier_defaults_to_zero() {
    let form = PokemonForm {
        id_pokemon: String::new(),
        ..filled()
    };
    assert_eq!(form.validate().expect("valid").id_pokemon, PokemonId(0));
}

#[test]
fn missing_required_fields_are_all_reported() {
    let errors = PokemonForm::default().validate().expect_err("invalid");
    assert!(errors.get("numero").is_some());
    assert!(errors.get("name").is_some());
    assert!(errors.get("description").is_some());
    assert!(errors.get("primer_tipo").is_some());
    assert!(errors.get("segundo_tipo").is_none());
    assert_eq!(errors.iter().count(), 4);
}

#[test]
fn malformed_numbers_are_rejected() {
    let form = PokemonForm {
        numero: "twenty".into(),
        primer_tipo: "-4".into(),
        segundo_tipo: "x".into(),
        ..filled()
    };
    let errors = form.validate().expect_err("invalid");
    assert!(errors.get("numero").is_some());
    assert!(errors.get("primer_tipo").is_some());
    assert!(errors.get("segundo_tipo").is_some());
}

#[test]
fn primary_type_cannot_be_the_absent_sentinel() {
    let form = PokemonForm {
        primer_tipo: "0".into(),
        ..filled()
    };
    let errors = form.validate().expect_err("invalid");
    assert_eq!(
        errors.get("primer_tipo"),
        Some("The primary type field is required.")
    );
}

#[test]
fn targets_compares_embedded_identifier() {
    let form = filled();
    assert!(form.targets(PokemonId(25)));
    assert!(!form.targets(PokemonId(26)));
    assert!(!PokemonForm::default().targets(PokemonId(0)));
}

#[test]
fn view_model_round_trips_into_form_fields() {
    let view_model = PokemonViewModel {
        id_pokemon: PokemonId(16),
        numero: 16,
        name: "Pidgey".into(),
        description: "Bird".into(),
        primer_tipo: TipoId(1),
        segundo_tipo: TipoId(3),
    };
    let form = PokemonForm::from_view_model(&view_model);
    assert_eq!(form.primer_tipo, "1");
    assert_eq!(form.segundo_tipo, "3");
    assert_eq!(form.validate().expect("valid"), view_model);
}
