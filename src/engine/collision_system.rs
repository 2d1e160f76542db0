use super::*;

use crate::constants::{ghost_combo_points, COLLISION_WINDOW};
use crate::types::{GhostMode, GhostType, Position, Vec2};

impl GameEngine {
    /// Checks every active ghost against the player. Each ghost yields at most
    /// one outcome, and a player death does not stop the remaining checks.
    pub(super) fn resolve_collisions(&mut self) {
        let player_tile = self.player.tile();
        let player_position = self.player.position();

        for ghost_idx in 0..self.ghosts.len() {
            let ghost = &self.ghosts[ghost_idx];
            let (mode, ghost_type) = (ghost.mode(), ghost.ghost_type());
            if mode == GhostMode::Housed
                || !touches(player_tile, player_position, ghost.tile(), ghost.position())
            {
                continue;
            }

            match mode {
                GhostMode::Frightened => self.eat_ghost(ghost_idx),
                GhostMode::Normal => self.kill_player(ghost_type),
                GhostMode::Eaten | GhostMode::Housed => {}
            }
        }
    }

    fn eat_ghost(&mut self, ghost_idx: usize) {
        let Some(ghost) = self.ghosts.get_mut(ghost_idx) else {
            return;
        };
        if !ghost.mark_eaten() {
            return;
        }
        let ghost_type = ghost.ghost_type();
        let points = ghost_combo_points(self.combo);
        self.combo += 1;
        self.stats.ghosts_eaten += 1;
        self.add_score(points);
        self.events.push(RuntimeEvent::GhostEaten {
            ghost_type,
            points,
            combo: self.combo,
        });
    }

    fn kill_player(&mut self, ghost_type: GhostType) {
        if !self.player.die() {
            return;
        }
        self.stats.deaths += 1;
        self.events.push(RuntimeEvent::PlayerDied { ghost_type });
    }
}

/// Same tile, or continuous positions closer than the window on both axes.
pub(super) fn touches(
    player_tile: Vec2,
    player_position: Position,
    ghost_tile: Vec2,
    ghost_position: Position,
) -> bool {
    if player_tile == ghost_tile {
        return true;
    }
    (player_position.x - ghost_position.x).abs() < COLLISION_WINDOW
        && (player_position.y - ghost_position.y).abs() < COLLISION_WINDOW
}

#[cfg(test)]
mod tests {
    use super::touches;
    use crate::types::{Position, Vec2};

    #[test]
    fn proximity_window_is_strict_on_both_axes() {
        let tile_a = Vec2::new(5, 5);
        let tile_b = Vec2::new(6, 5);
        let at = |x: f32, y: f32| Position { x, y };

        assert!(touches(tile_a, at(100.0, 100.0), tile_a, at(300.0, 300.0)));
        assert!(touches(tile_a, at(110.0, 100.0), tile_b, at(120.0, 100.0)));
        assert!(!touches(tile_a, at(100.0, 100.0), tile_b, at(114.0, 100.0)));
        assert!(!touches(tile_a, at(100.0, 100.0), tile_b, at(110.0, 114.0)));
        assert!(touches(tile_a, at(100.0, 100.0), tile_b, at(113.5, 113.5)));
    }
}
