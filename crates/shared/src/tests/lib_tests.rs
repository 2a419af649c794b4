use crate::{
    domain::{Pokemon, PokemonId, Tipo, TipoId, TipoSet},
    error::{ConflictCode, ErrorApiResponses},
    protocol::PokemonViewModel,
};

#[test]
fn pokemon_without_description_decodes_single_type() {
    let pokemon: Pokemon = serde_json::from_str(
        r#"{"idPokemon":25,"numero":25,"name":"Pikachu","tipos":{"4":"Electric"}}"#,
    )
    .expect("pokemon");

    assert_eq!(pokemon.id_pokemon, PokemonId(25));
    assert_eq!(pokemon.description, "");
    assert_eq!(pokemon.tipos.len(), 1);
    assert_eq!(pokemon.tipos.primary_id(), TipoId(4));
    assert_eq!(pokemon.tipos.secondary_id(), None);
    assert_eq!(
        pokemon.tipos.iter().collect::<Vec<_>>(),
        vec![(TipoId(4), "Electric")]
    );
}

#[test]
fn tipos_keep_backend_order() {
    let tipos: TipoSet = serde_json::from_str(r#"{"9":"Steel","1":"Normal"}"#).expect("tipos");
    assert_eq!(tipos.primary_id(), TipoId(9));
    assert_eq!(tipos.secondary_id(), Some(TipoId(1)));

    let encoded = serde_json::to_string(&tipos).expect("encode");
    assert_eq!(encoded, r#"{"9":"Steel","1":"Normal"}"#);
}

#[test]
fn tipos_reject_empty_and_oversized_maps() {
    assert!(serde_json::from_str::<TipoSet>("{}").is_err());
    assert!(
        serde_json::from_str::<TipoSet>(r#"{"1":"Normal","2":"Fire","3":"Flying"}"#).is_err()
    );
}

#[test]
fn tipos_reject_sentinel_and_non_numeric_ids() {
    assert!(serde_json::from_str::<TipoSet>(r#"{"0":"Nothing"}"#).is_err());
    assert!(serde_json::from_str::<TipoSet>(r#"{"fire":"Fire"}"#).is_err());
}

#[test]
fn view_model_takes_first_two_type_ids() {
    let pokemon = Pokemon {
        id_pokemon: PokemonId(16),
        numero: 16,
        name: "Pidgey".into(),
        description: "Tiny bird".into(),
        tipos: TipoSet::dual(TipoId(1), "Normal", TipoId(3), "Flying"),
    };

    let view_model = PokemonViewModel::from(&pokemon);
    assert_eq!(view_model.primer_tipo, TipoId(1));
    assert_eq!(view_model.segundo_tipo, TipoId(3));
    assert_eq!(view_model.secondary_tipo(), Some(TipoId(3)));
    assert_eq!(view_model.description, "Tiny bird");
}

#[test]
fn view_model_defaults_missing_secondary_to_sentinel() {
    let pokemon = Pokemon {
        id_pokemon: PokemonId(25),
        numero: 25,
        name: "Pikachu".into(),
        description: String::new(),
        tipos: TipoSet::single(TipoId(4), "Electric"),
    };

    let view_model = PokemonViewModel::from(&pokemon);
    assert_eq!(view_model.segundo_tipo, TipoId::NONE);
    assert_eq!(view_model.secondary_tipo(), None);
}

#[test]
fn view_model_uses_backend_field_names() {
    let view_model = PokemonViewModel {
        id_pokemon: PokemonId(7),
        numero: 7,
        name: "Squirtle".into(),
        description: "Turtle".into(),
        primer_tipo: TipoId(11),
        segundo_tipo: TipoId::NONE,
    };
    let value = serde_json::to_value(&view_model).expect("encode");
    assert_eq!(value["idPokemon"], 7);
    assert_eq!(value["primerTipo"], 11);
    assert_eq!(value["segundoTipo"], 0);
}

#[test]
fn tipo_decodes_id_and_nombre() {
    let tipos: Vec<Tipo> =
        serde_json::from_str(r#"[{"id":4,"nombre":"Electric"},{"id":1,"nombre":"Normal"}]"#)
            .expect("tipos");
    assert_eq!(tipos[0].id, TipoId(4));
    assert_eq!(tipos[1].nombre, "Normal");
}

#[test]
fn conflict_codes_map_known_statuses_only() {
    assert_eq!(ConflictCode::parse("409x2"), Some(ConflictCode::DuplicateNumber));
    assert_eq!(ConflictCode::parse("409x3"), Some(ConflictCode::DuplicateName));
    assert_eq!(ConflictCode::parse("409x1"), None);
    assert_eq!(ConflictCode::DuplicateName.as_str(), "409x3");

    let body: ErrorApiResponses =
        serde_json::from_str(r#"{"status":"409x2","message":"duplicate"}"#).expect("body");
    assert_eq!(body.conflict_code(), Some(ConflictCode::DuplicateNumber));

    let partial: ErrorApiResponses = serde_json::from_str(r#"{"message":"boom"}"#).expect("body");
    assert_eq!(partial.conflict_code(), None);
}

#[test]
fn null_description_decodes_as_empty() {
    let pokemon: Pokemon = serde_json::from_str(
        r#"{"idPokemon":25,"numero":25,"name":"Pikachu","description":null,"tipos":{"4":"Electric"}}"#,
    )
    .expect("pokemon");
    assert_eq!(pokemon.description, "");
    assert_eq!(pokemon.name, "Pikachu");
}

#[test]
fn error_body_tolerates_null_fields() {
    let body: ErrorApiResponses =
        serde_json::from_str(r#"{"status":"409x2","message":null}"#).expect("body");
    assert_eq!(body.message, "");
    assert_eq!(body.conflict_code(), Some(ConflictCode::DuplicateNumber));

    let blank: ErrorApiResponses =
        serde_json::from_str(r#"{"status":null,"message":"boom"}"#).expect("body");
    assert_eq!(blank.conflict_code(), None);
}

#[test]
fn tipo_rejects_sentinel_and_negative_ids() {
    assert!(serde_json::from_str::<Tipo>(r#"{"id":0,"nombre":"Ghost"}"#).is_err());
    assert!(serde_json::from_str::<Tipo>(r#"{"id":-3,"nombre":"Ghost"}"#).is_err());
    assert!(serde_json::from_str::<Vec<Tipo>>(
        r#"[{"id":8,"nombre":"Ghost"},{"id":0,"nombre":"None"}]"#
    )
    .is_err());
}
