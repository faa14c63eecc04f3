//! Board topology.
//!
//! The board is a cycle of 40 tiles laid out on the perimeter of an 11x11
//! grid. The engine itself only works with integer indices mod 40; the
//! coordinate mapping exists for presentation layers that draw the board.

/// Number of tiles on the board cycle.
pub const BOARD_SIZE: usize = 40;

/// Index of the START tile.
pub const START_INDEX: usize = 0;

/// Index of the jail tile.
pub const JAIL_INDEX: usize = 10;

/// Index of the free parking corner.
pub const FREE_PARKING_INDEX: usize = 20;

/// Index of the "go to jail" corner.
pub const GO_TO_JAIL_INDEX: usize = 30;

/// Side length of the whole board in scene units.
pub const BOARD_EXTENT: f64 = 600.0;

/// Side length of a single tile (11 tiles per side, corners included).
pub const TILE_SIZE: f64 = BOARD_EXTENT / 11.0;

/// Distance from the board centre to the centre of an edge tile.
pub const OFFSET: f64 = BOARD_EXTENT / 2.0 - TILE_SIZE / 2.0;

/// Wraps any index onto the board cycle.
pub const fn wrap_index(index: usize) -> usize {
    index % BOARD_SIZE
}

/// Returns the position reached by walking `steps` tiles backwards from `position`.
///
/// Tokens walk toward decreasing indices. The result is always in `0..BOARD_SIZE`.
pub fn step_back(position: usize, steps: u32) -> usize {
    (position as i64 - steps as i64).rem_euclid(BOARD_SIZE as i64) as usize
}

/// Maps a tile index to the (x, z) centre of that tile on the board plane.
///
/// Index 0 sits in the (+x, +z) corner and indices increase clockwise when
/// viewed from above: along the +z edge, then -x, then -z, then +x.
pub fn position_to_coordinates(index: usize) -> (f64, f64) {
    let i = wrap_index(index);
    let along = |start: usize| (i - start) as f64 * TILE_SIZE;
    match i {
        0..=9 => (OFFSET - along(0), OFFSET),
        10..=19 => (-OFFSET, OFFSET - along(10)),
        20..=29 => (-OFFSET + along(20), -OFFSET),
        _ => (OFFSET, -OFFSET + along(30)),
    }
}

/// Maps a tile index and seat number to a token position inside that tile.
///
/// Up to four tokens share a tile in a 2x2 spread so they never overlap.
pub fn token_coordinates(index: usize, seat: usize) -> (f64, f64) {
    let (x, z) = position_to_coordinates(index);
    let spread = TILE_SIZE / 3.0;
    let fx = x - spread / 2.0 + (seat % 2) as f64 * spread;
    let fz = z - spread / 2.0 + ((seat / 2) % 2) as f64 * spread;
    (fx, fz)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn corners_map_to_board_corners() {
        assert!(approx(position_to_coordinates(0), (OFFSET, OFFSET)));
        assert!(approx(position_to_coordinates(10), (-OFFSET, OFFSET)));
        assert!(approx(position_to_coordinates(20), (-OFFSET, -OFFSET)));
        assert!(approx(position_to_coordinates(30), (OFFSET, -OFFSET)));
    }

    #[test]
    fn coordinates_wrap_every_forty() {
        for i in 0..BOARD_SIZE {
            assert!(approx(position_to_coordinates(i), position_to_coordinates(i + 80)));
        }
    }

    #[test]
    fn neighbouring_tiles_are_one_tile_apart() {
        for i in 0..BOARD_SIZE {
            let (x0, z0) = position_to_coordinates(i);
            let (x1, z1) = position_to_coordinates(i + 1);
            let d = ((x1 - x0).powi(2) + (z1 - z0).powi(2)).sqrt();
            assert!((d - TILE_SIZE).abs() < 1e-9, "tiles {} and {} are {} apart", i, i + 1, d);
        }
    }

    #[test]
    fn step_back_wraps_below_zero() {
        assert_eq!(step_back(0, 1), 39);
        assert_eq!(step_back(3, 3), 0);
        assert_eq!(step_back(5, 6), 39);
        assert_eq!(step_back(12, 6), 6);
        assert_eq!(step_back(2, 45), 37);
    }

    #[test]
    fn step_back_matches_biased_modulo() {
        for pos in 0..BOARD_SIZE {
            for steps in 1..=6u32 {
                let biased = (pos + BOARD_SIZE - steps as usize) % BOARD_SIZE;
                assert_eq!(step_back(pos, steps), biased);
            }
        }
    }

    #[test]
    fn tokens_spread_inside_tile() {
        let centre = position_to_coordinates(7);
        for seat in 0..4 {
            let (x, z) = token_coordinates(7, seat);
            assert!((x - centre.0).abs() < TILE_SIZE / 2.0);
            assert!((z - centre.1).abs() < TILE_SIZE / 2.0);
        }
        assert_ne!(token_coordinates(7, 0), token_coordinates(7, 3));
    }
}
