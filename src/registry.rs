pub mod loader;

use crate::consts::DEFAULT_WEIGHT;
use crate::error::{SeatError, SfResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

pub type PersonId = String;

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// Wire form of a registry entry. The person id is the map key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonEntry {
    #[serde(default, alias = "wishes")]
    pub preferences: Vec<PersonId>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct Person {
    pub id: PersonId,
    pub preferences: Vec<PersonId>,
    pub weight: f64,
    wanted: HashSet<PersonId>,
}

impl Person {
    pub fn new(id: impl Into<PersonId>, preferences: Vec<PersonId>, weight: f64) -> Self {
        let wanted = preferences.iter().cloned().collect();
        Self {
            id: id.into(),
            preferences,
            weight,
            wanted,
        }
    }

    #[inline(always)]
    pub fn wants(&self, other: &str) -> bool {
        self.wanted.contains(other)
    }

    pub fn has_preferences(&self) -> bool {
        !self.preferences.is_empty()
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.preferences == other.preferences && self.weight == other.weight
    }
}

/// Read-only lookup from person id to preferences and weight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<PersonId, PersonEntry>",
    into = "BTreeMap<PersonId, PersonEntry>"
)]
pub struct PreferenceRegistry {
    people: HashMap<PersonId, Person>,
}

impl PreferenceRegistry {
    pub fn new(people: Vec<Person>) -> SfResult<Self> {
        let mut map = HashMap::with_capacity(people.len());
        for person in people {
            if person.id.trim().is_empty() {
                return Err(SeatError::Validation(
                    "Person id must not be empty".to_string(),
                ));
            }
            if !person.weight.is_finite() || person.weight <= 0.0 {
                return Err(SeatError::Validation(format!(
                    "Person '{}' has invalid weight {}",
                    person.id, person.weight
                )));
            }
            if map.contains_key(&person.id) {
                return Err(SeatError::Validation(format!(
                    "Duplicate person id '{}'",
                    person.id
                )));
            }
            map.insert(person.id.clone(), person);
        }
        Ok(Self { people: map })
    }

    #[inline(always)]
    pub fn get(&self, id: &str) -> Option<&Person> {
        self.people.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.people.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Ids in sorted order, so seeded shuffles are reproducible.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.people.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// Preferences naming ids that are not in the registry.
    pub fn dangling_preferences(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = self
            .people
            .values()
            .flat_map(|p| {
                p.preferences
                    .iter()
                    .filter(|pref| !self.people.contains_key(pref.as_str()))
                    .map(move |pref| (p.id.as_str(), pref.as_str()))
            })
            .collect();
        out.sort_unstable();
        out
    }
}

impl TryFrom<HashMap<PersonId, PersonEntry>> for PreferenceRegistry {
    type Error = SeatError;

    fn try_from(entries: HashMap<PersonId, PersonEntry>) -> SfResult<Self> {
        let people = entries
            .into_iter()
            .map(|(id, e)| Person::new(id, e.preferences, e.weight))
            .collect();
        Self::new(people)
    }
}

impl From<PreferenceRegistry> for BTreeMap<PersonId, PersonEntry> {
    fn from(registry: PreferenceRegistry) -> Self {
        registry
            .people
            .into_values()
            .map(|p| {
                (
                    p.id,
                    PersonEntry {
                        preferences: p.preferences,
                        weight: p.weight,
                    },
                )
            })
            .collect()
    }
}
