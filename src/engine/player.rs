use crate::constants::{
    DEATH_ANIMATION_TICKS, MOUTH_ANGLE_MAX, MOUTH_ANGLE_MIN, MOUTH_ANGLE_STEP, PLAYER_SPEED,
    TILE_SIZE,
};
use crate::maze::Maze;
use crate::types::{Direction, PlayerState, PlayerView, Position, Vec2};

use super::utils::{interpolate, step_tile, tile_origin};

/// What a single `Player::update` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStep {
    Idle,
    Blocked,
    Moving,
    Arrived,
    Dying,
    DeathAnimationComplete,
}

/// The player-controlled agent.
///
/// `position` always equals `tile * TILE_SIZE + facing * progress`, with
/// `progress` in `[0, TILE_SIZE)`. Turns are only taken at a tile boundary.
#[derive(Clone, Debug)]
pub struct Player {
    spawn: Vec2,
    tile: Vec2,
    position: Position,
    facing: Direction,
    requested: Direction,
    progress: f32,
    speed: f32,
    state: PlayerState,
    death_frame: u32,
    mouth_angle: f32,
    mouth_step: f32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            spawn,
            tile: spawn,
            position: tile_origin(spawn),
            facing: Direction::None,
            requested: Direction::None,
            progress: 0.0,
            speed: PLAYER_SPEED,
            state: PlayerState::Alive,
            death_frame: 0,
            mouth_angle: MOUTH_ANGLE_MAX,
            mouth_step: MOUTH_ANGLE_STEP,
        }
    }

    pub fn reset(&mut self) {
        *self = Self {
            speed: self.speed,
            ..Self::new(self.spawn)
        };
    }

    /// Buffers a turn; it is taken at the next tile boundary where it is legal.
    pub fn request_direction(&mut self, dir: Direction) {
        self.requested = dir;
    }

    pub fn update(&mut self, maze: &Maze) -> PlayerStep {
        if self.state == PlayerState::Dying {
            self.death_frame = self.death_frame.saturating_add(1);
            if self.is_death_animation_complete() {
                return PlayerStep::DeathAnimationComplete;
            }
            return PlayerStep::Dying;
        }

        if self.at_tile_boundary()
            && self.requested != Direction::None
            && self.requested != self.facing
        {
            let turn = step_tile(maze, self.tile, self.requested);
            if maze.can_enter(turn.x, turn.y) {
                self.facing = self.requested;
            }
        }

        if self.facing == Direction::None {
            return PlayerStep::Idle;
        }

        let next = step_tile(maze, self.tile, self.facing);
        if !maze.can_enter(next.x, next.y) {
            return PlayerStep::Blocked;
        }

        self.progress += self.speed;
        let step = if self.progress >= TILE_SIZE {
            self.tile = next;
            self.progress = 0.0;
            PlayerStep::Arrived
        } else {
            PlayerStep::Moving
        };
        self.position = interpolate(self.tile, self.facing, self.progress);
        self.animate_mouth();
        step
    }

    fn animate_mouth(&mut self) {
        self.mouth_angle =
            (self.mouth_angle + self.mouth_step).clamp(MOUTH_ANGLE_MIN, MOUTH_ANGLE_MAX);
        if self.mouth_angle >= MOUTH_ANGLE_MAX || self.mouth_angle <= MOUTH_ANGLE_MIN {
            self.mouth_step = -self.mouth_step;
        }
    }

    pub fn die(&mut self) -> bool {
        if self.state == PlayerState::Dying {
            return false;
        }
        self.state = PlayerState::Dying;
        self.death_frame = 0;
        true
    }

    pub fn is_dying(&self) -> bool {
        self.state == PlayerState::Dying
    }

    pub fn is_death_animation_complete(&self) -> bool {
        self.death_frame > DEATH_ANIMATION_TICKS
    }

    pub fn at_tile_boundary(&self) -> bool {
        self.progress == 0.0
    }

    pub fn tile(&self) -> Vec2 {
        self.tile
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            tile: self.tile,
            position: self.position,
            facing: self.facing,
            requested: self.requested,
            state: self.state,
            progress: self.progress,
            mouth_angle: self.mouth_angle,
            death_frame: self.death_frame,
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, tile: Vec2, facing: Direction) {
        self.tile = tile;
        self.facing = facing;
        self.progress = 0.0;
        self.position = tile_origin(tile);
    }
}
