//! Bilaterally symmetric layouts derived analytically from a random cardinal axis.
//!
//! The anchor agent sits on the grid midline. Both targets lie `height` cells
//! further along the axis, mirrored `spread / 2` cells to either side, and the
//! second agent sits `2 * height` cells along the axis from the anchor.

use rand_chacha::rand_core::Rng;

use crate::error::MapGenError;
use crate::types::{GridCoordinate, GridSize, MapType, Role};

use super::model::Layout;
use super::seed::{choose, random_inclusive};

pub const DEFAULT_SPREADS: [i32; 2] = [8, 10];
pub const DEFAULT_HEIGHTS: [i32; 3] = [5, 6, 7];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    pub const ALL: [Orientation; 4] =
        [Orientation::Deg0, Orientation::Deg90, Orientation::Deg180, Orientation::Deg270];

    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Unit `(row, col)` step pointing from the anchor toward the targets.
    pub fn along(self) -> (i32, i32) {
        match self {
            Self::Deg0 => (0, -1),
            Self::Deg90 => (1, 0),
            Self::Deg180 => (0, 1),
            Self::Deg270 => (-1, 0),
        }
    }

    /// Unit step on the other axis, always toward increasing indices.
    pub fn across(self) -> (i32, i32) {
        let (row, col) = self.along();
        (col.abs(), row.abs())
    }

    fn along_is_row_axis(self) -> bool {
        self.along().0 != 0
    }

    fn along_sign(self) -> i32 {
        let (row, col) = self.along();
        row + col
    }
}

/// Geometric draw for one symmetric layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymmetricParams {
    pub orientation: Orientation,
    pub spread: i32,
    pub height: i32,
}

impl SymmetricParams {
    /// Inclusive range of anchor positions on the along axis that leave room
    /// for the second agent `2 * height` cells away.
    pub fn anchor_range(self, grid_size: GridSize) -> (i32, i32) {
        let reach = self.height.saturating_mul(2);
        if self.orientation.along_sign() < 0 {
            (reach, grid_size.last_index())
        } else {
            (0, grid_size.last_index().saturating_sub(reach))
        }
    }
}

/// Every position the symmetric construction can produce for one draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymmetricGeometry {
    pub init_player: GridCoordinate,
    pub init_ai: GridCoordinate,
    pub target1: GridCoordinate,
    pub target2: GridCoordinate,
}

impl SymmetricGeometry {
    pub fn derive(params: SymmetricParams, grid_size: GridSize, anchor_offset: i32) -> Self {
        let along = params.orientation.along();
        let across = params.orientation.across();
        let midline = grid_size.midpoint();
        let init_player = if params.orientation.along_is_row_axis() {
            GridCoordinate::new(anchor_offset, midline)
        } else {
            GridCoordinate::new(midline, anchor_offset)
        };

        let half_spread = params.spread.div_euclid(2);
        let apex = init_player.shifted(along, params.height);
        Self {
            init_player,
            init_ai: init_player.shifted(along, params.height.saturating_mul(2)),
            target1: apex.shifted(across, -half_spread),
            target2: apex.shifted(across, half_spread),
        }
    }

    fn all(self) -> [GridCoordinate; 4] {
        [self.init_player, self.init_ai, self.target1, self.target2]
    }

    fn ensure_within(self, grid_size: GridSize) -> Result<Self, MapGenError> {
        match self.all().into_iter().find(|&coordinate| !grid_size.contains(coordinate)) {
            Some(coordinate) => {
                Err(MapGenError::OutOfBounds { coordinate, grid_size: grid_size.get() })
            }
            None => Ok(self),
        }
    }

    fn position(self, role: Role) -> GridCoordinate {
        match role {
            Role::InitPlayer => self.init_player,
            Role::InitAi => self.init_ai,
            Role::Target1 => self.target1,
            Role::Target2 => self.target2,
        }
    }

    pub fn into_layout(self, map_type: MapType) -> Layout {
        Layout::new(
            map_type.as_str(),
            map_type.roles().iter().map(|&role| (role, self.position(role))),
        )
    }
}

pub struct SymmetricLayoutGenerator {
    grid_size: GridSize,
    orientations: Vec<Orientation>,
    spreads: Vec<i32>,
    heights: Vec<i32>,
}

impl SymmetricLayoutGenerator {
    pub fn new(grid_size: GridSize) -> Result<Self, MapGenError> {
        Self::with_pools(grid_size, &Orientation::ALL, &DEFAULT_SPREADS, &DEFAULT_HEIGHTS)
    }

    /// Builds a generator with custom parameter pools, rejecting any pool
    /// combination that could place a role outside the grid.
    pub fn with_pools(
        grid_size: GridSize,
        orientations: &[Orientation],
        spreads: &[i32],
        heights: &[i32],
    ) -> Result<Self, MapGenError> {
        if orientations.is_empty() || spreads.is_empty() || heights.is_empty() {
            return Err(MapGenError::InvalidParameters {
                reason: "orientation, spread and height pools must be non-empty".to_string(),
            });
        }
        if let Some(spread) = spreads.iter().find(|&&spread| spread < 2) {
            return Err(MapGenError::InvalidParameters {
                reason: format!("spread {spread} would place both targets on the axis"),
            });
        }
        if let Some(height) = heights.iter().find(|&&height| height < 1) {
            return Err(MapGenError::InvalidParameters {
                reason: format!("height {height} would stack targets on the anchor"),
            });
        }

        let generator = Self {
            grid_size,
            orientations: orientations.to_vec(),
            spreads: spreads.to_vec(),
            heights: heights.to_vec(),
        };
        for params in generator.parameter_space() {
            let (min_offset, max_offset) = params.anchor_range(grid_size);
            SymmetricGeometry::derive(params, grid_size, min_offset).ensure_within(grid_size)?;
            SymmetricGeometry::derive(params, grid_size, max_offset).ensure_within(grid_size)?;
        }
        Ok(generator)
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn spreads(&self) -> &[i32] {
        &self.spreads
    }

    pub fn heights(&self) -> &[i32] {
        &self.heights
    }

    fn parameter_space(&self) -> impl Iterator<Item = SymmetricParams> + '_ {
        self.orientations.iter().flat_map(move |&orientation| {
            self.spreads.iter().flat_map(move |&spread| {
                self.heights.iter().map(move |&height| SymmetricParams {
                    orientation,
                    spread,
                    height,
                })
            })
        })
    }

    pub fn draw_params<R: Rng + ?Sized>(&self, rng: &mut R) -> SymmetricParams {
        // Pools are validated non-empty at construction.
        let orientation = choose(rng, &self.orientations).copied().unwrap_or(Orientation::Deg0);
        let spread = choose(rng, &self.spreads).copied().unwrap_or(DEFAULT_SPREADS[0]);
        let height = choose(rng, &self.heights).copied().unwrap_or(DEFAULT_HEIGHTS[0]);
        SymmetricParams { orientation, spread, height }
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        map_type: MapType,
        rng: &mut R,
    ) -> Result<Layout, MapGenError> {
        let params = self.draw_params(rng);
        let (min_offset, max_offset) = params.anchor_range(self.grid_size);
        if min_offset > max_offset {
            let coordinate = SymmetricGeometry::derive(params, self.grid_size, min_offset).init_ai;
            return Err(MapGenError::OutOfBounds { coordinate, grid_size: self.grid_size.get() });
        }
        let anchor_offset = random_inclusive(rng, min_offset, max_offset);
        let geometry = SymmetricGeometry::derive(params, self.grid_size, anchor_offset)
            .ensure_within(self.grid_size)?;
        Ok(geometry.into_layout(map_type))
    }

    /// Like [`Self::generate`], taking the condition as its raw tag.
    pub fn generate_tagged<R: Rng + ?Sized>(
        &self,
        tag: &str,
        rng: &mut R,
    ) -> Result<Layout, MapGenError> {
        let map_type: MapType = tag.parse()?;
        self.generate(map_type, rng)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::mapgen::grid::manhattan;

    fn grid(size: i64) -> GridSize {
        GridSize::new(size).expect("valid grid size")
    }

    #[test]
    fn zero_degree_geometry_matches_hand_computed_cells() {
        let params = SymmetricParams { orientation: Orientation::Deg0, spread: 8, height: 5 };
        let geometry = SymmetricGeometry::derive(params, grid(15), 12);
        assert_eq!(geometry.init_player, GridCoordinate::new(7, 12));
        assert_eq!(geometry.init_ai, GridCoordinate::new(7, 2));
        assert_eq!(geometry.target1, GridCoordinate::new(3, 7));
        assert_eq!(geometry.target2, GridCoordinate::new(11, 7));
    }

    #[test]
    fn anchor_ranges_reserve_room_behind_each_orientation() {
        let size = grid(15);
        let range = |orientation| {
            SymmetricParams { orientation, spread: 10, height: 7 }.anchor_range(size)
        };
        assert_eq!(range(Orientation::Deg0), (14, 14));
        assert_eq!(range(Orientation::Deg180), (0, 0));
        assert_eq!(range(Orientation::Deg90), (0, 0));
        assert_eq!(range(Orientation::Deg270), (14, 14));

        let params = SymmetricParams { orientation: Orientation::Deg90, spread: 8, height: 5 };
        assert_eq!(params.anchor_range(size), (0, 4));
    }

    #[test]
    fn ninety_and_two_seventy_degrees_move_along_rows() {
        let params = SymmetricParams { orientation: Orientation::Deg90, spread: 10, height: 6 };
        let geometry = SymmetricGeometry::derive(params, grid(15), 1);
        assert_eq!(geometry.init_player, GridCoordinate::new(1, 7));
        assert_eq!(geometry.init_ai, GridCoordinate::new(13, 7));
        assert_eq!(geometry.target1, GridCoordinate::new(7, 2));
        assert_eq!(geometry.target2, GridCoordinate::new(7, 12));

        let params = SymmetricParams { orientation: Orientation::Deg270, spread: 8, height: 5 };
        let geometry = SymmetricGeometry::derive(params, grid(15), 12);
        assert_eq!(geometry.init_ai, GridCoordinate::new(2, 7));
        assert_eq!(geometry.target1, GridCoordinate::new(7, 3));
        assert_eq!(geometry.target2, GridCoordinate::new(7, 11));
    }

    #[test]
    fn condition_selects_expected_roles() {
        let generator = SymmetricLayoutGenerator::new(grid(15)).expect("default pools fit");
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let single = generator.generate(MapType::OnePlayerOneGoal, &mut rng).expect("1P1G");
        assert_eq!(single.roles().map(|(role, _)| role).collect::<Vec<_>>(), vec![
            Role::InitPlayer,
            Role::Target1
        ]);

        let one_two = generator.generate(MapType::OnePlayerTwoGoals, &mut rng).expect("1P2G");
        assert!(one_two.get(Role::InitPlayer).is_none());
        assert!(one_two.get(Role::InitAi).is_some());
        assert_eq!(one_two.map_type(), "1P2G");

        let full = generator.generate(MapType::TwoPlayersTwoGoals, &mut rng).expect("2P2G");
        assert_eq!(full.positions().len(), 4);
    }

    #[test]
    fn unknown_tag_fails_before_generation() {
        let generator = SymmetricLayoutGenerator::new(grid(15)).expect("default pools fit");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let error = generator.generate_tagged("3P3G", &mut rng).expect_err("tag is unknown");
        assert_eq!(error, MapGenError::InvalidCondition { tag: "3P3G".to_string() });
    }

    #[test]
    fn default_pools_are_rejected_on_small_grids() {
        let error = SymmetricLayoutGenerator::new(grid(14)).err().expect("14 is too small");
        assert!(matches!(error, MapGenError::OutOfBounds { grid_size: 14, .. }), "{error:?}");
        assert!(SymmetricLayoutGenerator::new(grid(9)).is_err());
    }

    #[test]
    fn oversized_pools_are_rejected_without_overflowing() {
        let size = grid(15);
        for heights in [[i32::MAX / 2 + 1], [i32::MAX]] {
            let result =
                SymmetricLayoutGenerator::with_pools(size, &Orientation::ALL, &[8], &heights);
            assert!(matches!(result, Err(MapGenError::OutOfBounds { grid_size: 15, .. })));
        }
        let result =
            SymmetricLayoutGenerator::with_pools(size, &Orientation::ALL, &[i32::MAX], &[i32::MAX]);
        assert!(matches!(result, Err(MapGenError::OutOfBounds { .. })));

        let params =
            SymmetricParams { orientation: Orientation::Deg90, spread: 8, height: i32::MAX };
        let (min_offset, max_offset) = params.anchor_range(size);
        assert!(min_offset > max_offset);
    }

    #[test]
    fn degenerate_pools_are_rejected() {
        let size = grid(30);
        assert!(SymmetricLayoutGenerator::with_pools(size, &[], &[8], &[5]).is_err());
        assert!(SymmetricLayoutGenerator::with_pools(size, &Orientation::ALL, &[1], &[5]).is_err());
        assert!(SymmetricLayoutGenerator::with_pools(size, &Orientation::ALL, &[8], &[0]).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]
        #[test]
        fn layouts_stay_in_bounds_and_mirror_targets(
            seed in any::<u64>(),
            size in 30_i64..=60,
        ) {
            let grid_size = grid(size);
            let generator = SymmetricLayoutGenerator::new(grid_size).expect("pools fit");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let layout = generator.generate(MapType::TwoPlayersTwoGoals, &mut rng).expect("2P2G");

            for coordinate in layout.positions() {
                prop_assert!(grid_size.contains(coordinate), "{coordinate} outside {grid_size}");
            }
            prop_assert!(layout.has_distinct_positions());

            let anchor = layout.get(Role::InitPlayer).expect("anchor");
            let second = layout.get(Role::InitAi).expect("second agent");
            let target1 = layout.get(Role::Target1).expect("target1");
            let target2 = layout.get(Role::Target2).expect("target2");
            prop_assert_eq!(manhattan(anchor, target1), manhattan(anchor, target2));

            if anchor.row == second.row {
                prop_assert_eq!(target1.col, target2.col);
                prop_assert_eq!(target1.row - anchor.row, anchor.row - target2.row);
            } else {
                prop_assert_eq!(anchor.col, second.col);
                prop_assert_eq!(target1.row, target2.row);
                prop_assert_eq!(target1.col - anchor.col, anchor.col - target2.col);
            }
            let target_reach = manhattan(anchor, target1) - manhattan(target1, target2) / 2;
            prop_assert_eq!(manhattan(anchor, second), 2 * target_reach);
        }
    }
}
