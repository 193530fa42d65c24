use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapGenError;

/// One cell of the square layout space, addressed as `(row, col)`.
///
/// Serialized as a two-element array so the front end can read it as `[row, col]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct GridCoordinate {
    pub row: i32,
    pub col: i32,
}

impl GridCoordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Moves `steps` cells along a unit `(row, col)` direction, clamping at
    /// the `i32` range so an oversized step lands outside every grid.
    pub fn shifted(self, direction: (i32, i32), steps: i32) -> Self {
        Self {
            row: self.row.saturating_add(direction.0.saturating_mul(steps)),
            col: self.col.saturating_add(direction.1.saturating_mul(steps)),
        }
    }
}

impl From<(i32, i32)> for GridCoordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl From<GridCoordinate> for (i32, i32) {
    fn from(coordinate: GridCoordinate) -> Self {
        (coordinate.row, coordinate.col)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Side length `N` of the `N x N` coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridSize(i32);

impl GridSize {
    pub fn new(size: i64) -> Result<Self, MapGenError> {
        match i32::try_from(size) {
            Ok(value) if value >= 1 => Ok(Self(value)),
            _ => Err(MapGenError::InvalidGridSize {
                size,
                reason: "must be a positive 32-bit value",
            }),
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn last_index(self) -> i32 {
        self.0 - 1
    }

    pub fn midpoint(self) -> i32 {
        self.0 / 2
    }

    pub fn contains(self, coordinate: GridCoordinate) -> bool {
        (0..self.0).contains(&coordinate.row) && (0..self.0).contains(&coordinate.col)
    }

    /// Every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = GridCoordinate> {
        let size = self.0;
        (0..size).flat_map(move |row| (0..size).map(move |col| GridCoordinate { row, col }))
    }

    pub fn corners(self) -> [GridCoordinate; 4] {
        let last = self.last_index();
        [
            GridCoordinate::new(0, 0),
            GridCoordinate::new(0, last),
            GridCoordinate::new(last, 0),
            GridCoordinate::new(last, last),
        ]
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// Agent or goal slot a coordinate is assigned to inside a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    InitPlayer,
    InitAi,
    Target1,
    Target2,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::InitPlayer, Role::InitAi, Role::Target1, Role::Target2];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitPlayer => "initPlayer",
            Self::InitAi => "initAI",
            Self::Target1 => "target1",
            Self::Target2 => "target2",
        }
    }

    pub fn is_agent(self) -> bool {
        matches!(self, Self::InitPlayer | Self::InitAi)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition tag understood by the symmetric generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapType {
    OnePlayerOneGoal,
    OnePlayerTwoGoals,
    TwoPlayersTwoGoals,
}

impl MapType {
    pub const ALL: [MapType; 3] =
        [MapType::OnePlayerOneGoal, MapType::OnePlayerTwoGoals, MapType::TwoPlayersTwoGoals];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnePlayerOneGoal => "1P1G",
            Self::OnePlayerTwoGoals => "1P2G",
            Self::TwoPlayersTwoGoals => "2P2G",
        }
    }

    /// Roles populated for this condition.
    ///
    /// The single-agent, two-goal condition places its one agent at the far
    /// end of the axis (`initAI`), not at the anchor.
    pub fn roles(self) -> &'static [Role] {
        match self {
            Self::OnePlayerOneGoal => &[Role::InitPlayer, Role::Target1],
            Self::OnePlayerTwoGoals => &[Role::InitAi, Role::Target1, Role::Target2],
            Self::TwoPlayersTwoGoals => &Role::ALL,
        }
    }
}

impl FromStr for MapType {
    type Err = MapGenError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|map_type| map_type.as_str() == tag)
            .ok_or_else(|| MapGenError::InvalidCondition { tag: tag.to_string() })
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_RANDOM_CONDITION_NAME: &str = "randomMap";
pub const DEFAULT_MIN_DISTANCE_BETWEEN_TARGETS: u32 = 4;

/// Named constraint set for the constrained random generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomCondition {
    pub name: String,
    pub min_distance_between_targets: u32,
}

impl RandomCondition {
    pub fn new(name: impl Into<String>, min_distance_between_targets: u32) -> Self {
        Self { name: name.into(), min_distance_between_targets }
    }
}

impl Default for RandomCondition {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOM_CONDITION_NAME, DEFAULT_MIN_DISTANCE_BETWEEN_TARGETS)
    }
}
