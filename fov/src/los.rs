use crate::Field;

/// Whether there is an unobstructed line of sight between two cells.
///
/// The endpoints themselves are never checked, so a wall can be seen but
/// not seen through. Adjacent cells always see each other. The line is
/// traced with fixed-point slope stepping; when it passes exactly through a
/// cell corner it goes diagonally without checking either side cell.
///
/// Knight's move offsets are visible whenever the orthogonally adjacent cell
/// on the long leg is open, which makes them a little more permissive than
/// the traced line.
pub fn los(field: &impl Field, a: [i32; 2], b: [i32; 2]) -> bool {
    let open = |x: i32, y: i32| !field.blocks_sight([x, y]);

    let [x1, y1] = a;
    let [x2, y2] = b;

    let (dx, dy) = (x2 - x1, y2 - y1);
    let (ax, ay) = (dx.abs(), dy.abs());

    if ax < 2 && ay < 2 {
        return true;
    }

    let (sx, sy) = (dx.signum(), dy.signum());

    if dx == 0 {
        return (1..ay).all(|i| open(x1, y1 + i * sy));
    }

    if dy == 0 {
        return (1..ax).all(|i| open(x1 + i * sx, y1));
    }

    if ax == 1 && ay == 2 && open(x1, y1 + sy) {
        return true;
    }

    if ay == 1 && ax == 2 && open(x1 + sx, y1) {
        return true;
    }

    // Fraction accumulators are scaled so that the line hits a cell corner
    // when the fraction equals `half`.
    let half = ax * ay;
    let full = half * 2;

    if ax >= ay {
        let mut q = ay * ay;
        let m = q * 2;

        let mut tx = x1 + sx;
        let mut ty = y1;
        if q == half {
            ty += sy;
            q -= full;
        }

        while tx != x2 {
            if !open(tx, ty) {
                return false;
            }

            q += m;

            if q > half {
                ty += sy;
                if !open(tx, ty) {
                    return false;
                }
                q -= full;
            } else if q == half {
                ty += sy;
                q -= full;
            }
            tx += sx;
        }
    } else {
        let mut q = ax * ax;
        let m = q * 2;

        let mut tx = x1;
        let mut ty = y1 + sy;
        if q == half {
            tx += sx;
            q -= full;
        }

        while ty != y2 {
            if !open(tx, ty) {
                return false;
            }

            q += m;

            if q > half {
                tx += sx;
                if !open(tx, ty) {
                    return false;
                }
                q -= full;
            } else if q == half {
                tx += sx;
                q -= full;
            }
            ty += sy;
        }
    }

    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_map::Map;

    fn map() -> Map {
        Map::new(
            "
            ..........
            ..#.......
            ..........
            .....#....
            ..........",
        )
    }

    #[test]
    fn adjacent_always_visible() {
        let map = map();
        // Even into and out of walls.
        assert!(los(&map, [2, 1], [3, 2]));
        assert!(los(&map, [1, 1], [2, 1]));
        assert!(los(&map, [4, 4], [4, 4]));
    }

    #[test]
    fn straight_lines() {
        let map = map();
        assert!(los(&map, [0, 0], [9, 0]));
        assert!(!los(&map, [0, 1], [9, 1]));
        assert!(!los(&map, [2, 0], [2, 4]));
        assert!(los(&map, [3, 0], [3, 4]));
        // The endpoint can be a wall.
        assert!(los(&map, [0, 1], [2, 1]));
    }

    #[test]
    fn knights_moves() {
        let map = map();
        assert!(los(&map, [1, 0], [2, 2]));
        // Long leg blocked, traced line goes through the wall too.
        assert!(!los(&map, [2, 0], [3, 2]));
        assert!(!los(&map, [1, 1], [3, 2]));
    }

    #[test]
    fn slopes() {
        let map = map();
        assert!(los(&map, [0, 0], [4, 4]));
        assert!(los(&map, [3, 0], [9, 2]));
        assert!(los(&map, [0, 2], [4, 3]));
        // Blocked by the pillar at (5, 3).
        assert!(!los(&map, [0, 4], [9, 2]));
        assert!(!los(&map, [3, 2], [7, 4]));
        assert!(!los(&map, [7, 4], [3, 2]));
        assert!(!los(&map, [5, 0], [5, 4]));
    }

    #[test]
    fn outside_the_map_blocks() {
        let map = map();
        assert!(!los(&map, [-3, 0], [1, 0]));
    }
}
