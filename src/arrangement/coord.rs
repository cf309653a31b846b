use super::{Arrangement, BonusConfig};
use crate::error::{SeatError, SfResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum_macros::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Section {
    Top,
    Bottom,
    BonusLeft,
    BonusRight,
}

impl Section {
    pub fn is_row(self) -> bool {
        matches!(self, Section::Top | Section::Bottom)
    }
}

/// Address of one seat. `index` is only meaningful for the two rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatCoord {
    pub table: usize,
    pub section: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl SeatCoord {
    pub fn top(table: usize, index: usize) -> Self {
        Self {
            table,
            section: Section::Top,
            index: Some(index),
        }
    }

    pub fn bottom(table: usize, index: usize) -> Self {
        Self {
            table,
            section: Section::Bottom,
            index: Some(index),
        }
    }

    pub fn bonus_left(table: usize) -> Self {
        Self {
            table,
            section: Section::BonusLeft,
            index: None,
        }
    }

    pub fn bonus_right(table: usize) -> Self {
        Self {
            table,
            section: Section::BonusRight,
            index: None,
        }
    }

    /// Drops a stray index on bonus coordinates so equality ignores it.
    pub fn normalized(self) -> Self {
        if self.section.is_row() {
            self
        } else {
            Self { index: None, ..self }
        }
    }
}

impl std::fmt::Display for SeatCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(i) if self.section.is_row() => {
                write!(f, "table {} {} #{}", self.table, self.section, i)
            }
            _ => write!(f, "table {} {}", self.table, self.section),
        }
    }
}

/// Coordinates whose occupant must not change during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SeatCoord>", into = "Vec<SeatCoord>")]
pub struct FixedSet {
    coords: HashSet<SeatCoord>,
}

impl FixedSet {
    pub fn new<I: IntoIterator<Item = SeatCoord>>(coords: I) -> Self {
        Self {
            coords: coords.into_iter().map(SeatCoord::normalized).collect(),
        }
    }

    /// Pins every seat that is already occupied, e.g. the manual assignments
    /// captured before the free seats are filled.
    pub fn from_occupied(arrangement: &Arrangement, bonus: BonusConfig) -> Self {
        Self::new(
            arrangement
                .occupied(bonus)
                .map(|(coord, _)| coord),
        )
    }

    #[inline(always)]
    pub fn contains(&self, coord: &SeatCoord) -> bool {
        self.coords.contains(coord)
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeatCoord> {
        self.coords.iter()
    }

    /// Every pinned coordinate must address a seat that exists under `bonus`.
    pub fn validate_against(&self, arrangement: &Arrangement, bonus: BonusConfig) -> SfResult<()> {
        let mut sorted: Vec<&SeatCoord> = self.coords.iter().collect();
        sorted.sort();
        for coord in sorted {
            if !arrangement.addresses(coord, bonus) {
                return Err(SeatError::Config(format!(
                    "Fixed seat '{}' does not exist in this arrangement",
                    coord
                )));
            }
        }
        Ok(())
    }
}

impl From<Vec<SeatCoord>> for FixedSet {
    fn from(coords: Vec<SeatCoord>) -> Self {
        Self::new(coords)
    }
}

impl From<FixedSet> for Vec<SeatCoord> {
    fn from(set: FixedSet) -> Self {
        let mut coords: Vec<SeatCoord> = set.coords.into_iter().collect();
        coords.sort();
        coords
    }
}
