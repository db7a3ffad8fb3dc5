//! Adjacent mine counting over a padded mine mask.
//!
//! The mask is copied into a grid with a one-cell border of `false` sentinels, so every real
//! cell probes its eight neighbor offsets unconditionally. Corners, edges and interior cells all
//! go through the same loop.

use ndarray::{Array2, s};

use crate::types::DISPLACEMENTS;

/// Copies `mine_mask` into a `(rows + 2) x (cols + 2)` grid surrounded by empty sentinels.
fn padded(mine_mask: &Array2<bool>) -> Array2<bool> {
    let (rows, cols) = mine_mask.dim();
    let mut padded = Array2::from_elem((rows + 2, cols + 2), false);
    padded
        .slice_mut(s![1..=rows, 1..=cols])
        .assign(mine_mask);
    padded
}

/// Number of mines among the (up to eight) neighbors of every cell, excluding the cell itself.
pub fn adjacent_mine_counts(mine_mask: &Array2<bool>) -> Array2<u8> {
    let padded = padded(mine_mask);

    Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
        // (row + 1, col + 1) is the cell itself inside the padded grid
        DISPLACEMENTS
            .iter()
            .filter(|&&(d_row, d_col)| {
                let probe_row = (row + 1).wrapping_add_signed(d_row);
                let probe_col = (col + 1).wrapping_add_signed(d_col);
                padded[(probe_row, probe_col)]
            })
            .count() as u8
    })
}
