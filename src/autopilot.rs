use std::collections::VecDeque;

use crate::engine::ghost::Ghost;
use crate::engine::player::Player;
use crate::engine::utils::{manhattan, step_tile};
use crate::engine::GameEngine;
use crate::maze::Maze;
use crate::rng::Rng;
use crate::types::{Direction, GhostMode, Vec2};

const DANGER_RADIUS: i32 = 4;
const CHASE_RADIUS: i32 = 6;

/// Scripted input policy for headless runs.
///
/// Decides only when the player sits on a tile boundary; between boundaries it
/// returns `Direction::None` so the buffered turn is kept.
#[derive(Clone, Debug)]
pub struct Autopilot {
    rng: Rng,
}

impl Autopilot {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Rng::new(seed),
        }
    }

    pub fn choose(&mut self, engine: &GameEngine) -> Direction {
        self.decide(engine.maze(), engine.player(), engine.ghosts())
    }

    fn decide(&mut self, maze: &Maze, player: &Player, ghosts: &[Ghost]) -> Direction {
        if player.is_dying() || !player.at_tile_boundary() {
            return Direction::None;
        }
        let here = player.tile();

        let threats: Vec<Vec2> = ghosts
            .iter()
            .filter(|ghost| ghost.mode() == GhostMode::Normal)
            .map(Ghost::tile)
            .filter(|tile| manhattan(*tile, here) <= DANGER_RADIUS)
            .collect();
        if !threats.is_empty() {
            return self.escape_direction(maze, here, &threats);
        }

        let prey = ghosts
            .iter()
            .filter(|ghost| ghost.mode() == GhostMode::Frightened)
            .map(Ghost::tile)
            .filter(|tile| manhattan(*tile, here) <= CHASE_RADIUS)
            .min_by_key(|tile| manhattan(*tile, here));
        if let Some(target) = prey {
            if let Some(dir) = first_step(maze, here, |tile| tile == target) {
                return dir;
            }
        }

        first_step(maze, here, |tile| maze.tile_kind(tile.x, tile.y).is_pickup())
            .unwrap_or_else(|| self.random_direction(maze, here))
    }

    fn escape_direction(&mut self, maze: &Maze, here: Vec2, threats: &[Vec2]) -> Direction {
        let mut best = Direction::None;
        let mut best_dist = i32::MIN;
        for dir in Direction::CARDINALS {
            let next = step_tile(maze, here, dir);
            if !maze.can_enter(next.x, next.y) {
                continue;
            }
            let dist = threats
                .iter()
                .map(|threat| manhattan(*threat, next))
                .min()
                .unwrap_or(i32::MAX);
            if dist > best_dist {
                best_dist = dist;
                best = dir;
            }
        }
        if best == Direction::None {
            self.random_direction(maze, here)
        } else {
            best
        }
    }

    fn random_direction(&mut self, maze: &Maze, here: Vec2) -> Direction {
        let open: Vec<Direction> = Direction::CARDINALS
            .into_iter()
            .filter(|dir| {
                let next = step_tile(maze, here, *dir);
                maze.can_enter(next.x, next.y)
            })
            .collect();
        self.rng.pick(&open).unwrap_or(Direction::None)
    }
}

/// Breadth-first search from `start`; returns the first move on a shortest
/// path to the nearest tile satisfying `is_goal`.
fn first_step<F>(maze: &Maze, start: Vec2, is_goal: F) -> Option<Direction>
where
    F: Fn(Vec2) -> bool,
{
    let width = maze.width();
    let index = |tile: Vec2| (tile.y * width + tile.x) as usize;
    let cells = (maze.width() * maze.height()).max(0) as usize;
    let mut visited = vec![false; cells];
    let mut first = vec![Direction::None; cells];
    let mut queue = VecDeque::new();

    if maze.in_bounds(start.x, start.y) {
        visited[index(start)] = true;
    }
    for dir in Direction::CARDINALS {
        let next = step_tile(maze, start, dir);
        if !maze.in_bounds(next.x, next.y) || !maze.can_enter(next.x, next.y) {
            continue;
        }
        if !visited[index(next)] {
            visited[index(next)] = true;
            first[index(next)] = dir;
            queue.push_back(next);
        }
    }

    while let Some(tile) = queue.pop_front() {
        if is_goal(tile) {
            return Some(first[index(tile)]);
        }
        for dir in Direction::CARDINALS {
            let next = step_tile(maze, tile, dir);
            if !maze.in_bounds(next.x, next.y) || !maze.can_enter(next.x, next.y) {
                continue;
            }
            if !visited[index(next)] {
                visited[index(next)] = true;
                first[index(next)] = first[index(tile)];
                queue.push_back(next);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameEngineOptions;
    use crate::types::{GhostType, SessionState};

    fn loop_maze(pickups: &[(usize, usize)]) -> Maze {
        let mut rows: Vec<Vec<char>> = [
            "#########", //
            "#       #", //
            "# ##### #", //
            "#       #", //
            "#########",
        ]
        .iter()
        .map(|row| row.chars().collect())
        .collect();
        for (x, y) in pickups {
            rows[*y][*x] = '.';
        }
        let rows: Vec<String> = rows.into_iter().map(|row| row.into_iter().collect()).collect();
        Maze::parse(&rows, 0).expect("valid template")
    }

    fn ghost_at(ghost_type: GhostType, tile: Vec2, mode: GhostMode) -> Ghost {
        let mut ghost = Ghost::new(ghost_type);
        ghost.place(tile, Direction::Left, mode);
        ghost
    }

    #[test]
    fn heads_for_the_nearest_pickup() {
        let mut pilot = Autopilot::new(1);
        let player = Player::new(Vec2::new(1, 3));

        let maze = loop_maze(&[(3, 3)]);
        assert_eq!(pilot.decide(&maze, &player, &[]), Direction::Right);

        let maze = loop_maze(&[(1, 1), (7, 3)]);
        assert_eq!(pilot.decide(&maze, &player, &[]), Direction::Up);
    }

    #[test]
    fn flees_from_a_nearby_threat() {
        let mut pilot = Autopilot::new(1);
        let maze = loop_maze(&[(7, 3)]);
        let player = Player::new(Vec2::new(4, 3));
        let ghosts = [ghost_at(GhostType::Chaser, Vec2::new(6, 3), GhostMode::Normal)];
        assert_eq!(pilot.decide(&maze, &player, &ghosts), Direction::Left);
    }

    #[test]
    fn chases_frightened_ghosts_in_range() {
        let mut pilot = Autopilot::new(1);
        let maze = loop_maze(&[(1, 3)]);
        let player = Player::new(Vec2::new(4, 3));
        let ghosts = [
            ghost_at(GhostType::Ambusher, Vec2::new(6, 3), GhostMode::Frightened),
            ghost_at(GhostType::Flanker, Vec2::new(2, 3), GhostMode::Eaten),
        ];
        assert_eq!(pilot.decide(&maze, &player, &ghosts), Direction::Right);
    }

    #[test]
    fn keeps_the_buffered_turn_between_tiles() {
        let mut pilot = Autopilot::new(1);
        let maze = loop_maze(&[(7, 3)]);
        let mut player = Player::new(Vec2::new(1, 3));
        player.request_direction(Direction::Right);
        player.update(&maze);
        assert!(!player.at_tile_boundary());
        assert_eq!(pilot.decide(&maze, &player, &[]), Direction::None);

        player.die();
        assert_eq!(pilot.decide(&maze, &player, &[]), Direction::None);
    }

    #[test]
    fn falls_back_to_an_open_direction_when_the_board_is_empty() {
        let mut pilot = Autopilot::new(9);
        let maze = loop_maze(&[]);
        let player = Player::new(Vec2::new(1, 1));
        let dir = pilot.decide(&maze, &player, &[]);
        assert!(matches!(dir, Direction::Down | Direction::Right));
    }

    #[test]
    fn autopilot_soak_keeps_engine_consistent() {
        for seed in 0..4u32 {
            let options = GameEngineOptions {
                auto_acknowledge_levels: true,
                ..GameEngineOptions::default()
            };
            let mut engine = GameEngine::new(Maze::classic(), seed, options);
            let mut pilot = Autopilot::new(seed);
            let mut last_score = 0;
            for _ in 0..20_000 {
                let request = pilot.choose(&engine);
                engine.step(request);
                assert!(engine.score() >= last_score);
                last_score = engine.score();
                assert!(engine.maze().remaining_pickups() <= engine.maze().total_pickups());
                let tile = engine.player().tile();
                assert!(engine.maze().can_enter(tile.x, tile.y));
                if engine.state() == SessionState::GameOver {
                    break;
                }
            }
            assert!(engine.build_summary().pickups_eaten >= 20);
        }
    }
}
