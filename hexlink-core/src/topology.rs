//! Hex adjacency on a square matrix
//!
//! Rows are drawn with every odd row shifted half a cell to the right, so the
//! six neighbours of a cell depend on the parity of its row.

/// Neighbour offsets (dr, dc) for cells on even rows
pub const EVEN_ROW_OFFSETS: [(isize, isize); 6] = [
    (-1, -1), // up-left
    (-1, 0),  // up-right
    (0, -1),  // left
    (0, 1),   // right
    (1, -1),  // down-left
    (1, 0),   // down-right
];

/// Neighbour offsets (dr, dc) for cells on odd rows
pub const ODD_ROW_OFFSETS: [(isize, isize); 6] = [
    (-1, 0),  // up-left
    (-1, 1),  // up-right
    (0, -1),  // left
    (0, 1),   // right
    (1, 0),   // down-left
    (1, 1),   // down-right
];

/// Offsets for a given row
#[inline]
pub fn offsets_for_row(row: usize) -> &'static [(isize, isize); 6] {
    if row % 2 == 0 {
        &EVEN_ROW_OFFSETS
    } else {
        &ODD_ROW_OFFSETS
    }
}

/// In-range neighbours of (row, col) on a `size` x `size` board.
///
/// Yields at most six cells, never anything outside `[0, size)`.
pub fn neighbors(row: usize, col: usize, size: usize) -> impl Iterator<Item = (usize, usize)> {
    offsets_for_row(row).iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < size && c < size).then_some((r, c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(row: usize, col: usize, size: usize) -> Vec<(usize, usize)> {
        let mut v: Vec<_> = neighbors(row, col, size).collect();
        v.sort();
        v
    }

    #[test]
    fn test_interior_cell_has_six_neighbors() {
        assert_eq!(collect(2, 2, 5).len(), 6);
        assert_eq!(collect(1, 2, 5).len(), 6);
    }

    #[test]
    fn test_parity_offsets() {
        assert_eq!(
            collect(2, 2, 5),
            vec![(1, 1), (1, 2), (2, 1), (2, 3), (3, 1), (3, 2)]
        );
        assert_eq!(
            collect(1, 2, 5),
            vec![(0, 2), (0, 3), (1, 1), (1, 3), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn test_corners_stay_in_range() {
        assert_eq!(collect(0, 0, 3), vec![(0, 1), (1, 0)]);
        assert_eq!(collect(2, 2, 3), vec![(1, 1), (1, 2), (2, 1)]);
        for r in 0..4 {
            for c in 0..4 {
                assert!(neighbors(r, c, 4).all(|(nr, nc)| nr < 4 && nc < 4));
            }
        }
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let size = 6;
        for r in 0..size {
            for c in 0..size {
                for (nr, nc) in neighbors(r, c, size) {
                    assert!(
                        neighbors(nr, nc, size).any(|n| n == (r, c)),
                        "({}, {}) -> ({}, {}) has no way back",
                        r, c, nr, nc
                    );
                }
            }
        }
    }
}
