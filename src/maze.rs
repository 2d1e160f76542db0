use thiserror::Error;

use crate::constants::{CLASSIC_MAZE, TUNNEL_ROW};
use crate::types::{TileKind, Vec2};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze template has no rows")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile character {found:?} at ({x},{y})")]
    UnknownTile { found: char, x: usize, y: usize },
    #[error("tunnel row {row} is outside a maze of height {height}")]
    TunnelRowOutOfBounds { row: i32, height: i32 },
}

/// Fixed grid of tile kinds with one horizontally wrapping row.
///
/// Cells are mutated only by pickup consumption; `reset_to_template` restores
/// the layout the maze was built from.
#[derive(Clone, Debug)]
pub struct Maze {
    width: i32,
    height: i32,
    tunnel_row: i32,
    tiles: Vec<TileKind>,
    template: Vec<TileKind>,
    remaining: u32,
    total: u32,
}

impl Maze {
    pub fn classic() -> Self {
        let template: Vec<TileKind> = CLASSIC_MAZE
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| TileKind::parse(c).unwrap_or(TileKind::Wall))
            .collect();
        let width = CLASSIC_MAZE.first().map(|row| row.len()).unwrap_or(0) as i32;
        Self::from_template(width, CLASSIC_MAZE.len() as i32, TUNNEL_ROW, template)
    }

    pub fn parse<S: AsRef<str>>(rows: &[S], tunnel_row: i32) -> Result<Self, MazeError> {
        let Some(first) = rows.first() else {
            return Err(MazeError::Empty);
        };
        let expected = first.as_ref().chars().count();
        if expected == 0 {
            return Err(MazeError::Empty);
        }

        let mut template = Vec::with_capacity(expected * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != expected {
                return Err(MazeError::RaggedRow {
                    row: y,
                    expected,
                    found,
                });
            }
            for (x, c) in row.chars().enumerate() {
                let kind = TileKind::parse(c).ok_or(MazeError::UnknownTile { found: c, x, y })?;
                template.push(kind);
            }
        }

        let height = rows.len() as i32;
        if tunnel_row < 0 || tunnel_row >= height {
            return Err(MazeError::TunnelRowOutOfBounds {
                row: tunnel_row,
                height,
            });
        }
        Ok(Self::from_template(
            expected as i32,
            height,
            tunnel_row,
            template,
        ))
    }

    fn from_template(width: i32, height: i32, tunnel_row: i32, template: Vec<TileKind>) -> Self {
        let total = count_pickups(&template);
        Self {
            width,
            height,
            tunnel_row,
            tiles: template.clone(),
            template,
            remaining: total,
            total,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tunnel_row(&self) -> i32 {
        self.tunnel_row
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn off_grid_on_tunnel(&self, x: i32, y: i32) -> bool {
        y == self.tunnel_row && (x < 0 || x >= self.width)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn tile_kind(&self, x: i32, y: i32) -> TileKind {
        self.index(x, y)
            .and_then(|idx| self.tiles.get(idx).copied())
            .unwrap_or(TileKind::Empty)
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        if self.off_grid_on_tunnel(x, y) {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => self.tiles.get(idx) == Some(&TileKind::Wall),
            None => true,
        }
    }

    /// Movement legality, ignoring the pursuer-only gate restriction.
    pub fn can_enter(&self, x: i32, y: i32) -> bool {
        if self.off_grid_on_tunnel(x, y) {
            return true;
        }
        !self.is_wall(x, y)
    }

    /// Normalises a tile on the tunnel row back onto the grid; other rows pass through.
    pub fn wrap(&self, tile: Vec2) -> Vec2 {
        if tile.y != self.tunnel_row || self.width <= 0 {
            return tile;
        }
        Vec2 {
            x: tile.x.rem_euclid(self.width),
            y: tile.y,
        }
    }

    /// Clears a pickup and returns what was there; any other tile is left alone.
    pub fn consume_pickup(&mut self, x: i32, y: i32) -> Option<TileKind> {
        let idx = self.index(x, y)?;
        let kind = self.tiles.get(idx).copied()?;
        if !kind.is_pickup() {
            return None;
        }
        self.tiles[idx] = TileKind::ConsumedEmpty;
        self.remaining = self.remaining.saturating_sub(1);
        Some(kind)
    }

    pub fn remaining_pickups(&self) -> u32 {
        self.remaining
    }

    pub fn total_pickups(&self) -> u32 {
        self.total
    }

    pub fn reset_to_template(&mut self) {
        self.tiles.clone_from(&self.template);
        self.remaining = count_pickups(&self.tiles);
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(|kind| tile_char(*kind)).collect())
            .collect()
    }
}

fn count_pickups(tiles: &[TileKind]) -> u32 {
    tiles.iter().filter(|kind| kind.is_pickup()).count() as u32
}

#[cfg(test)]
fn tile_char(kind: TileKind) -> char {
    match kind {
        TileKind::Wall => '#',
        TileKind::Empty => '_',
        TileKind::Pickup => '.',
        TileKind::PowerPickup => 'o',
        TileKind::Gate => '=',
        TileKind::ConsumedEmpty => ' ',
    }
}
