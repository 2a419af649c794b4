use shared::{error::ConflictCode, protocol::PokemonViewModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub code: ConflictCode,
    pub message: String,
}

pub fn duplicate_number(numero: i32) -> Alert {
    Alert {
        code: ConflictCode::DuplicateNumber,
        message: format!("A Pokémon with number {numero} already exists in the Pokédex."),
    }
}

pub fn duplicate_name(name: &str) -> Alert {
    Alert {
        code: ConflictCode::DuplicateName,
        message: format!("A Pokémon named \"{name}\" already exists in the Pokédex."),
    }
}

pub fn for_conflict(code: ConflictCode, submitted: &PokemonViewModel) -> Alert {
    match code {
        ConflictCode::DuplicateNumber => duplicate_number(submitted.numero),
        ConflictCode::DuplicateName => duplicate_name(&submitted.name),
    }
}
