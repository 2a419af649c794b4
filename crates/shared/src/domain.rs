use std::fmt;

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(PokemonId);
id_newtype!(TipoId);

impl TipoId {
    /// Sentinel used by form payloads for "no secondary type".
    pub const NONE: TipoId = TipoId(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tipo {
    #[serde(deserialize_with = "real_tipo_id")]
    pub id: TipoId,
    pub nombre: String,
}

fn real_tipo_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TipoId, D::Error> {
    let id = i64::deserialize(deserializer)?;
    if id <= 0 {
        return Err(de::Error::custom(format!("type id {id} is not a real type")));
    }
    Ok(TipoId(id))
}

/// Reads an absent or `null` string as empty.
pub(crate) fn string_or_null<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One or two type associations, kept in the order the backend sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipoSet {
    primary: (TipoId, String),
    secondary: Option<(TipoId, String)>,
}

impl TipoSet {
    pub fn single(id: TipoId, name: impl Into<String>) -> Self {
        Self {
            primary: (id, name.into()),
            secondary: None,
        }
    }

    pub fn dual(
        first: TipoId,
        first_name: impl Into<String>,
        second: TipoId,
        second_name: impl Into<String>,
    ) -> Self {
        Self {
            primary: (first, first_name.into()),
            secondary: Some((second, second_name.into())),
        }
    }

    pub fn primary_id(&self) -> TipoId {
        self.primary.0
    }

    pub fn secondary_id(&self) -> Option<TipoId> {
        self.secondary.as_ref().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TipoId, &str)> {
        std::iter::once(&self.primary)
            .chain(self.secondary.as_ref())
            .map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        1 + usize::from(self.secondary.is_some())
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for TipoSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, name) in self.iter() {
            map.serialize_entry(&id.0.to_string(), name)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TipoSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TipoSetVisitor)
    }
}

struct TipoSetVisitor;

impl<'de> Visitor<'de> for TipoSetVisitor {
    type Value = TipoSet;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping one or two type ids to type names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TipoSet, A::Error> {
        let mut entries: Vec<(TipoId, String)> = Vec::with_capacity(2);
        while let Some((key, name)) = access.next_entry::<String, String>()? {
            let id = key
                .trim()
                .parse::<i64>()
                .map_err(|_| {
                    <A::Error as de::Error>::custom(format!("type id '{key}' is not an integer"))
                })?;
            if id <= 0 {
                return Err(de::Error::custom(format!("type id {id} is not a real type")));
            }
            if entries.len() == 2 {
                return Err(de::Error::invalid_length(3, &self));
            }
            entries.push((TipoId(id), name));
        }

        let mut entries = entries.into_iter();
        let primary = entries
            .next()
            .ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;
        Ok(TipoSet {
            primary,
            secondary: entries.next(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub id_pokemon: PokemonId,
    pub numero: i32,
    pub name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub description: String,
    pub tipos: TipoSet,
}
