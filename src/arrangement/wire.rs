//! Serde adapters for the seat sentinel: an empty seat travels as `""`,
//! a bonus seat that does not exist travels as `null`.

use super::Seat;

fn to_seat(raw: Option<String>) -> Seat {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub mod row {
    use super::{to_seat, Seat};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(row: &[Seat], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(row.iter().map(|s| s.as_deref().unwrap_or("")))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Seat>, D::Error> {
        let raw: Vec<Option<String>> = Vec::deserialize(deserializer)?;
        Ok(raw.into_iter().map(to_seat).collect())
    }
}

pub mod bonus {
    use super::{to_seat, Seat};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(seat: &Option<Seat>, serializer: S) -> Result<S::Ok, S::Error> {
        match seat {
            None => serializer.serialize_none(),
            Some(s) => serializer.serialize_str(s.as_deref().unwrap_or("")),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Seat>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.map(|s| to_seat(Some(s))))
    }
}
