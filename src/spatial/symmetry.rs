//! Mirror and rotation orbits of grid coordinates

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use crate::io::configuration::SYMMETRY_ROUNDING_TOLERANCE;
use crate::math::rotation::rotate_about;
use crate::rules::record::SymmetryConstraints;
use crate::spatial::bounds::{Coordinate, GridSize};

/// All cells a symmetric module is copied to when it collapses at `origin`
///
/// Every combination of mirrors across the grid center along the flagged
/// axes is taken first; each mirrored point is then rotated around the grid
/// center in `count` equal steps. Rotated points that miss the lattice by
/// more than the rounding tolerance, or land outside the grid, are dropped.
/// The result is sorted and never contains `origin` itself.
pub fn orbit(origin: Coordinate, size: &GridSize, symmetry: &SymmetryConstraints) -> Vec<Coordinate> {
    let dims = size.dims();
    let mut mirrored: BTreeSet<Coordinate> = BTreeSet::from([origin]);
    for ((&flag, &dimension), axis) in symmetry.mirror_axes.iter().zip(&dims).zip(0..) {
        if !flag {
            continue;
        }
        let reflected: Vec<Coordinate> = mirrored
            .iter()
            .filter_map(|&cell| {
                let mut copy = cell;
                let component = copy.get_mut(axis)?;
                *component = dimension.checked_sub(1)?.checked_sub(*component)?;
                Some(copy)
            })
            .collect();
        mirrored.extend(reflected);
    }

    let mut cells = mirrored.clone();
    if let Some(rotation) = &symmetry.rotation {
        let center = dims.map(|dimension| (dimension as f64 - 1.0) / 2.0);
        for &cell in &mirrored {
            let point = cell.map(|value| value as f64);
            for step in 1..rotation.count {
                let angle = TAU * f64::from(step) / f64::from(rotation.count);
                let rotated = rotate_about(point, center, rotation.axis, angle);
                if let Some(snapped) = snap_to_grid(rotated, size) {
                    cells.insert(snapped);
                }
            }
        }
    }

    cells.remove(&origin);
    cells.into_iter().collect()
}

fn snap_to_grid(point: [f64; 3], size: &GridSize) -> Option<Coordinate> {
    let rounded = point.map(f64::round);
    let error = point
        .iter()
        .zip(&rounded)
        .map(|(value, nearest)| (value - nearest).abs())
        .fold(0.0, f64::max);
    if error > SYMMETRY_ROUNDING_TOLERANCE {
        return None;
    }
    let position = rounded.map(|value| value as i64);
    if !size.contains(position) {
        return None;
    }
    Some(position.map(|value| value as usize))
}
