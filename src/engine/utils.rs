use crate::constants::TILE_SIZE;
use crate::maze::Maze;
use crate::types::{Direction, Position, Vec2};

pub(crate) fn offset(tile: Vec2, dir: Direction, distance: i32) -> Vec2 {
    let (dx, dy) = dir.delta();
    Vec2 {
        x: tile.x + dx * distance,
        y: tile.y + dy * distance,
    }
}

/// Neighbouring tile in `dir`, normalised through the tunnel.
pub(crate) fn step_tile(maze: &Maze, tile: Vec2, dir: Direction) -> Vec2 {
    maze.wrap(offset(tile, dir, 1))
}

pub(crate) fn euclidean(a: Vec2, b: Vec2) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

pub(crate) fn tile_origin(tile: Vec2) -> Position {
    Position {
        x: tile.x as f32 * TILE_SIZE,
        y: tile.y as f32 * TILE_SIZE,
    }
}

pub(crate) fn interpolate(tile: Vec2, facing: Direction, progress: f32) -> Position {
    let origin = tile_origin(tile);
    let (dx, dy) = facing.delta();
    Position {
        x: origin.x + dx as f32 * progress,
        y: origin.y + dy as f32 * progress,
    }
}

pub(crate) fn manhattan(a: Vec2, b: Vec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_scales_by_distance() {
        let tile = Vec2::new(5, 5);
        assert_eq!(offset(tile, Direction::Up, 4), Vec2::new(5, 1));
        assert_eq!(offset(tile, Direction::Left, 2), Vec2::new(3, 5));
        assert_eq!(offset(tile, Direction::None, 9), tile);
    }

    #[test]
    fn step_tile_wraps_through_tunnel() {
        let maze = Maze::classic();
        let row = maze.tunnel_row();
        assert_eq!(
            step_tile(&maze, Vec2::new(0, row), Direction::Left),
            Vec2::new(maze.width() - 1, row)
        );
        assert_eq!(
            step_tile(&maze, Vec2::new(maze.width() - 1, row), Direction::Right),
            Vec2::new(0, row)
        );
        assert_eq!(
            step_tile(&maze, Vec2::new(0, 1), Direction::Left),
            Vec2::new(-1, 1)
        );
    }

    #[test]
    fn interpolate_moves_along_facing() {
        let pos = interpolate(Vec2::new(2, 3), Direction::Down, 7.0);
        assert_eq!(pos, Position { x: 40.0, y: 67.0 });
        let pos = interpolate(Vec2::new(0, 14), Direction::Left, 4.0);
        assert_eq!(pos, Position { x: -4.0, y: 280.0 });
    }

    #[test]
    fn distances() {
        assert_eq!(euclidean(Vec2::new(0, 0), Vec2::new(3, 4)), 5.0);
        assert_eq!(manhattan(Vec2::new(0, 0), Vec2::new(3, -4)), 7);
    }
}
