pub mod coord;
pub mod fill;
pub mod neighbors;
mod wire;

pub use self::coord::{FixedSet, SeatCoord, Section};

use crate::error::{SeatError, SfResult};
use crate::registry::PersonId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum_macros::{Display, EnumString};

/// Occupant of one seat. `None` is the "unassigned" sentinel, `""` on the wire.
pub type Seat = Option<PersonId>;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BonusConfig {
    #[default]
    None,
    Left,
    Right,
    Both,
}

impl BonusConfig {
    pub fn seat_count(self) -> usize {
        match self {
            BonusConfig::None => 0,
            BonusConfig::Left | BonusConfig::Right => 1,
            BonusConfig::Both => 2,
        }
    }

    #[inline(always)]
    pub fn has_left(self) -> bool {
        matches!(self, BonusConfig::Left | BonusConfig::Both)
    }

    #[inline(always)]
    pub fn has_right(self) -> bool {
        matches!(self, BonusConfig::Right | BonusConfig::Both)
    }
}

/// Shape shared by every table of one arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub row_len: usize,
    pub bonus: BonusConfig,
}

impl TableLayout {
    /// Splits `seats_per_table` into two rows plus the bonus seats.
    pub fn from_seats(seats_per_table: usize, bonus: BonusConfig) -> SfResult<Self> {
        let bonus_count = bonus.seat_count();
        if seats_per_table < bonus_count {
            return Err(SeatError::Config(format!(
                "{} seats per table cannot hold {} bonus seats",
                seats_per_table, bonus_count
            )));
        }
        let row_seats = seats_per_table - bonus_count;
        if row_seats % 2 != 0 {
            return Err(SeatError::Config(format!(
                "(seats per table - bonus seats) must be even for bonus config '{}', got {} - {} = {}",
                bonus, seats_per_table, bonus_count, row_seats
            )));
        }
        Ok(Self {
            row_len: row_seats / 2,
            bonus,
        })
    }

    pub fn seats_per_table(&self) -> usize {
        self.row_len * 2 + self.bonus.seat_count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(with = "wire::row")]
    pub top: Vec<Seat>,
    #[serde(with = "wire::row")]
    pub bottom: Vec<Seat>,
    #[serde(default, with = "wire::bonus")]
    pub bonus_left: Option<Seat>,
    #[serde(default, with = "wire::bonus")]
    pub bonus_right: Option<Seat>,
}

impl Table {
    pub fn empty(layout: TableLayout) -> Self {
        Self {
            top: vec![None; layout.row_len],
            bottom: vec![None; layout.row_len],
            bonus_left: layout.bonus.has_left().then_some(None),
            bonus_right: layout.bonus.has_right().then_some(None),
        }
    }

    pub fn row(&self, section: Section) -> Option<&[Seat]> {
        match section {
            Section::Top => Some(&self.top),
            Section::Bottom => Some(&self.bottom),
            _ => None,
        }
    }

    /// Every seat scored under `bonus`, in canonical order: top, bottom, left, right.
    pub fn seats(
        &self,
        bonus: BonusConfig,
    ) -> impl Iterator<Item = (Section, Option<usize>, &Seat)> + '_ {
        let top = self
            .top
            .iter()
            .enumerate()
            .map(|(i, s)| (Section::Top, Some(i), s));
        let bottom = self
            .bottom
            .iter()
            .enumerate()
            .map(|(i, s)| (Section::Bottom, Some(i), s));
        let left = self
            .bonus_left
            .as_ref()
            .filter(|_| bonus.has_left())
            .map(|s| (Section::BonusLeft, None, s));
        let right = self
            .bonus_right
            .as_ref()
            .filter(|_| bonus.has_right())
            .map(|s| (Section::BonusRight, None, s));
        top.chain(bottom).chain(left).chain(right)
    }

    pub fn occupied(
        &self,
        bonus: BonusConfig,
    ) -> impl Iterator<Item = (Section, Option<usize>, &str)> + '_ {
        self.seats(bonus)
            .filter_map(|(section, index, seat)| seat.as_deref().map(|id| (section, index, id)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    pub tables: Vec<Table>,
}

impl Arrangement {
    pub fn empty(num_tables: usize, layout: TableLayout) -> Self {
        Self {
            tables: (0..num_tables).map(|_| Table::empty(layout)).collect(),
        }
    }

    pub fn row_len(&self) -> usize {
        self.tables.first().map_or(0, |t| t.top.len())
    }

    pub fn seat(&self, coord: &SeatCoord) -> Option<&Seat> {
        let table = self.tables.get(coord.table)?;
        match coord.section {
            Section::Top => table.top.get(coord.index?),
            Section::Bottom => table.bottom.get(coord.index?),
            Section::BonusLeft => table.bonus_left.as_ref(),
            Section::BonusRight => table.bonus_right.as_ref(),
        }
    }

    pub fn seat_mut(&mut self, coord: &SeatCoord) -> Option<&mut Seat> {
        let table = self.tables.get_mut(coord.table)?;
        match coord.section {
            Section::Top => table.top.get_mut(coord.index?),
            Section::Bottom => table.bottom.get_mut(coord.index?),
            Section::BonusLeft => table.bonus_left.as_mut(),
            Section::BonusRight => table.bonus_right.as_mut(),
        }
    }

    /// The occupant at `coord`, or `None` when empty or out of range.
    pub fn get(&self, coord: &SeatCoord) -> Option<&str> {
        self.seat(coord).and_then(|s| s.as_deref())
    }

    /// Writes `value` into `coord` and returns the previous occupant.
    pub fn set(&mut self, coord: &SeatCoord, value: Seat) -> SfResult<Seat> {
        let slot = self.seat_mut(coord).ok_or_else(|| {
            SeatError::Validation(format!("Seat '{}' does not exist", coord))
        })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Exchanges the occupants of two seats. Returns false (and changes
    /// nothing) if either coordinate does not address a seat.
    pub fn swap(&mut self, a: &SeatCoord, b: &SeatCoord) -> bool {
        if self.seat(a).is_none() || self.seat(b).is_none() {
            return false;
        }
        if a == b {
            return true;
        }
        let first = self.seat_mut(a).and_then(Option::take);
        let second = match self.seat_mut(b) {
            Some(slot) => std::mem::replace(slot, first),
            None => return false,
        };
        if let Some(slot) = self.seat_mut(a) {
            *slot = second;
        }
        true
    }

    /// True if `coord` addresses a seat that exists under `bonus`.
    pub fn addresses(&self, coord: &SeatCoord, bonus: BonusConfig) -> bool {
        let enabled = match coord.section {
            Section::Top | Section::Bottom => coord.index.is_some(),
            Section::BonusLeft => bonus.has_left(),
            Section::BonusRight => bonus.has_right(),
        };
        enabled && self.seat(coord).is_some()
    }

    /// All seats scored under `bonus`, table by table in canonical order.
    pub fn coords(&self, bonus: BonusConfig) -> impl Iterator<Item = SeatCoord> + '_ {
        self.tables.iter().enumerate().flat_map(move |(t, table)| {
            table.seats(bonus).map(move |(section, index, _)| SeatCoord {
                table: t,
                section,
                index,
            })
        })
    }

    pub fn occupied(&self, bonus: BonusConfig) -> impl Iterator<Item = (SeatCoord, &str)> + '_ {
        self.tables.iter().enumerate().flat_map(move |(t, table)| {
            table.occupied(bonus).map(move |(section, index, id)| {
                (
                    SeatCoord {
                        table: t,
                        section,
                        index,
                    },
                    id,
                )
            })
        })
    }

    /// Checks the structural invariants: equal row lengths across all tables,
    /// bonus seats present exactly when `bonus` enables them, and no person
    /// seated twice.
    pub fn validate(&self, bonus: BonusConfig) -> SfResult<()> {
        let row_len = self.row_len();
        for (t, table) in self.tables.iter().enumerate() {
            if table.top.len() != row_len || table.bottom.len() != row_len {
                return Err(SeatError::Config(format!(
                    "Table {} has rows of {} / {} seats, expected {}",
                    t,
                    table.top.len(),
                    table.bottom.len(),
                    row_len
                )));
            }
            if table.bonus_left.is_some() != bonus.has_left()
                || table.bonus_right.is_some() != bonus.has_right()
            {
                return Err(SeatError::Config(format!(
                    "Table {} bonus seats do not match bonus config '{}'",
                    t, bonus
                )));
            }
        }

        let mut seen = HashSet::new();
        for (coord, id) in self.occupied(bonus) {
            if !seen.insert(id) {
                return Err(SeatError::Validation(format!(
                    "'{}' is seated more than once (again at {})",
                    id, coord
                )));
            }
        }
        Ok(())
    }

    pub fn layout(&self, bonus: BonusConfig) -> TableLayout {
        TableLayout {
            row_len: self.row_len(),
            bonus,
        }
    }
}
