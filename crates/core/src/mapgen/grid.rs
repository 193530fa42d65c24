//! Distance primitive shared by both generators.

use crate::types::GridCoordinate;

/// Manhattan (L1) distance between two cells.
pub fn manhattan(a: GridCoordinate, b: GridCoordinate) -> u32 {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Whether `cell` is about as far from `first` as from `second`.
pub(super) fn roughly_equidistant(
    cell: GridCoordinate,
    first: GridCoordinate,
    second: GridCoordinate,
    max_gap: u32,
) -> bool {
    manhattan(cell, first).abs_diff(manhattan(cell, second)) <= max_gap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_sums_per_axis_differences() {
        let a = GridCoordinate::new(2, 9);
        let b = GridCoordinate::new(7, 3);
        assert_eq!(manhattan(a, b), 11);
        assert_eq!(manhattan(b, a), 11);
        assert_eq!(manhattan(a, a), 0);
    }

    #[test]
    fn corners_of_fifteen_grid_are_twenty_eight_apart() {
        assert_eq!(manhattan(GridCoordinate::new(0, 0), GridCoordinate::new(14, 14)), 28);
    }

    #[test]
    fn equidistance_tolerates_the_configured_gap() {
        let first = GridCoordinate::new(0, 0);
        let second = GridCoordinate::new(0, 14);
        assert!(roughly_equidistant(GridCoordinate::new(5, 7), first, second, 0));
        assert!(roughly_equidistant(GridCoordinate::new(5, 6), first, second, 2));
        assert!(!roughly_equidistant(GridCoordinate::new(5, 5), first, second, 2));
    }
}
