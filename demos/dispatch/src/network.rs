//! Synthetic city grid, emitted as the node/edge CSV pair the loader reads.
//!
//! Nodes sit on a regular lat/lon lattice around a city centre with a little
//! seeded jitter.  Every lattice neighbour pair gets a two-way road whose
//! length is the straight-line distance times a detour factor ≥ 1, so the
//! A* heuristic stays admissible.  A few random links are left out to make
//! the routing less trivial.

use std::fmt::Write;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use hers_core::GeoPoint;

/// Grid centre (lat, lon).
pub const CENTRE: GeoPoint = GeoPoint { lat: 24.8607, lon: 67.0011 };

/// Lattice spacing in degrees (≈ 550 m).
const SPACING_DEG: f64 = 0.005;

/// Share of lattice links dropped.
const DROP_RATE: f64 = 0.08;

/// External id of the node at `(row, col)`.
pub fn node_id(cols: usize, row: usize, col: usize) -> u64 {
    1_000 + (row * cols + col) as u64
}

/// Lattice position of `(row, col)` without jitter.
pub fn lattice_pos(rows: usize, cols: usize, row: usize, col: usize) -> GeoPoint {
    GeoPoint::new(
        CENTRE.lat + (row as f64 - rows as f64 / 2.0) * SPACING_DEG,
        CENTRE.lon + (col as f64 - cols as f64 / 2.0) * SPACING_DEG,
    )
}

/// Returns `(nodes_csv, edges_csv)` for a `rows × cols` grid.
pub fn grid_csv(rows: usize, cols: usize, seed: u64) -> (String, String) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut positions = Vec::with_capacity(rows * cols);

    let mut nodes = String::from("id,lat,lon\n");
    for row in 0..rows {
        for col in 0..cols {
            let base = lattice_pos(rows, cols, row, col);
            let pos = GeoPoint::new(
                base.lat + rng.gen_range(-0.0005..0.0005),
                base.lon + rng.gen_range(-0.0005..0.0005),
            );
            // Writing to a String cannot fail.
            let _ = writeln!(nodes, "{},{:.6},{:.6}", node_id(cols, row, col), pos.lat, pos.lon);
            positions.push(pos);
        }
    }

    let mut edges = String::from("source,destination,distance_m\n");
    let mut link = |rng: &mut SmallRng, a: (usize, usize), b: (usize, usize)| {
        if rng.gen_bool(DROP_RATE) {
            return;
        }
        let (ia, ib) = (a.0 * cols + a.1, b.0 * cols + b.1);
        // Round up so the written length never undercuts the straight line.
        let length = (positions[ia].distance_m(positions[ib]) * rng.gen_range(1.05..1.45)).ceil();
        let (ida, idb) = (node_id(cols, a.0, a.1), node_id(cols, b.0, b.1));
        let _ = writeln!(edges, "{ida},{idb},{length}");
        let _ = writeln!(edges, "{idb},{ida},{length}");
    };

    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                link(&mut rng, (row, col), (row, col + 1));
            }
            if row + 1 < rows {
                link(&mut rng, (row, col), (row + 1, col));
            }
        }
    }

    (nodes, edges)
}
