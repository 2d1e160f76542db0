use crate::constants::{
    EXTRA_LIFE_SCORE, PICKUP_POINTS, PLAYER_SPAWN, POWER_PICKUP_POINTS, STARTING_LIVES,
    TIMELINE_SNAPSHOT_LEN,
};
use crate::maze::Maze;
use crate::rng::Rng;
use crate::types::{
    Direction, GameSummary, GhostType, RuntimeEvent, SessionState, Snapshot, TileKind,
    TimelineEvent,
};

mod collision_system;
pub mod ghost;
pub mod player;
mod spawn_system;
pub(crate) mod utils;

use self::ghost::{Ghost, GhostTransition, PursuitContext};
use self::player::{Player, PlayerStep};

#[derive(Clone, Debug)]
pub struct GameEngineOptions {
    pub starting_lives: u32,
    /// Score that grants one extra life per game; `None` disables the bonus.
    pub extra_life_score: Option<u32>,
    /// Resume play on the tick after a level is cleared instead of waiting
    /// for `acknowledge_level_transition`.
    pub auto_acknowledge_levels: bool,
}

impl Default for GameEngineOptions {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            extra_life_score: Some(EXTRA_LIFE_SCORE),
            auto_acknowledge_levels: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct SessionStats {
    pickups_eaten: u32,
    ghosts_eaten: u32,
    deaths: u32,
}

#[derive(Clone, Debug)]
pub struct GameEngine {
    options: GameEngineOptions,
    seed: u32,
    rng: Rng,
    maze: Maze,
    player: Player,
    ghosts: Vec<Ghost>,

    state: SessionState,
    score: u32,
    lives: u32,
    level: u32,
    combo: u32,
    extra_life_awarded: bool,

    events: Vec<RuntimeEvent>,
    timeline: Vec<TimelineEvent>,
    stats: SessionStats,
    tick_counter: u64,
}

impl GameEngine {
    pub fn new(maze: Maze, seed: u32, options: GameEngineOptions) -> Self {
        let mut engine = Self {
            seed,
            rng: Rng::new(seed),
            maze,
            player: Player::new(PLAYER_SPAWN),
            ghosts: GhostType::ALL.map(Ghost::new).to_vec(),
            state: SessionState::Playing,
            score: 0,
            lives: options.starting_lives,
            level: 1,
            combo: 0,
            extra_life_awarded: false,
            events: Vec::new(),
            timeline: Vec::new(),
            stats: SessionStats::default(),
            tick_counter: 0,
            options,
        };
        engine.events.push(RuntimeEvent::GameStarted);
        engine.push_timeline("game started".to_string());
        engine
    }

    pub fn classic(seed: u32) -> Self {
        Self::new(Maze::classic(), seed, GameEngineOptions::default())
    }

    /// Buffers a turn for the player without advancing the simulation.
    pub fn request_direction(&mut self, dir: Direction) {
        if dir != Direction::None {
            self.player.request_direction(dir);
        }
    }

    /// Advances the simulation by exactly one fixed tick of `TICK_MS`; hosts
    /// running on a variable clock call this once per elapsed tick.
    /// `request` of `Direction::None` keeps the currently buffered turn.
    pub fn step(&mut self, request: Direction) {
        match self.state {
            SessionState::GameOver => return,
            SessionState::LevelTransition => {
                if !self.options.auto_acknowledge_levels {
                    return;
                }
                self.acknowledge_level_transition();
            }
            SessionState::Playing => {}
        }

        self.tick_counter += 1;
        self.request_direction(request);

        if self.player.is_dying() {
            if self.player.update(&self.maze) == PlayerStep::DeathAnimationComplete {
                self.lose_life();
            }
            return;
        }

        self.player.update(&self.maze);
        self.apply_pickups();

        if self.maze.remaining_pickups() == 0 {
            self.complete_level();
            return;
        }

        self.update_ghosts();
        self.resolve_collisions();
    }

    fn apply_pickups(&mut self) {
        let tile = self.player.tile();
        match self.maze.consume_pickup(tile.x, tile.y) {
            Some(TileKind::Pickup) => {
                self.stats.pickups_eaten += 1;
                self.add_score(PICKUP_POINTS);
                self.events.push(RuntimeEvent::PickupEaten {
                    x: tile.x,
                    y: tile.y,
                });
            }
            Some(TileKind::PowerPickup) => {
                self.stats.pickups_eaten += 1;
                self.add_score(POWER_PICKUP_POINTS);
                self.events.push(RuntimeEvent::PowerPickupEaten {
                    x: tile.x,
                    y: tile.y,
                });
                self.combo = 0;
                let mut frightened = false;
                for ghost in &mut self.ghosts {
                    frightened |= ghost.frighten(&self.maze);
                }
                if frightened {
                    self.events.push(RuntimeEvent::GhostsFrightened);
                }
            }
            _ => {}
        }
    }

    fn update_ghosts(&mut self) {
        let ctx = PursuitContext::new(&self.maze, self.player.tile(), self.player.facing());
        for ghost in &mut self.ghosts {
            let ghost_type = ghost.ghost_type();
            match ghost.update(&self.maze, &ctx, &mut self.rng) {
                Some(GhostTransition::Released) => {
                    self.events.push(RuntimeEvent::GhostReleased { ghost_type });
                }
                Some(GhostTransition::FrightenedEnded) => {
                    self.events.push(RuntimeEvent::FrightenedEnded { ghost_type });
                }
                Some(GhostTransition::Housed) => {
                    self.events.push(RuntimeEvent::GhostHoused { ghost_type });
                }
                None => {}
            }
        }
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        let Some(threshold) = self.options.extra_life_score else {
            return;
        };
        if !self.extra_life_awarded && self.score >= threshold {
            self.extra_life_awarded = true;
            self.lives += 1;
            self.events.push(RuntimeEvent::ExtraLife { lives: self.lives });
            self.push_timeline(format!("extra life at {}", self.score));
        }
    }

    fn push_timeline(&mut self, label: String) {
        self.timeline.push(TimelineEvent {
            tick: self.tick_counter,
            label,
        });
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        let events = if include_events {
            self.drain_events()
        } else {
            Vec::new()
        };
        let skip = self.timeline.len().saturating_sub(TIMELINE_SNAPSHOT_LEN);
        Snapshot {
            tick: self.tick_counter,
            state: self.state,
            score: self.score,
            lives: self.lives,
            level: self.level,
            combo: self.combo,
            remaining_pickups: self.maze.remaining_pickups(),
            total_pickups: self.maze.total_pickups(),
            player: self.player.view(),
            ghosts: self.ghosts.iter().map(Ghost::view).collect(),
            events,
            timeline: self.timeline[skip..].to_vec(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<RuntimeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn build_summary(&self) -> GameSummary {
        GameSummary {
            state: self.state,
            score: self.score,
            level: self.level,
            lives: self.lives,
            ticks: self.tick_counter,
            pickups_eaten: self.stats.pickups_eaten,
            ghosts_eaten: self.stats.ghosts_eaten,
            deaths: self.stats.deaths,
            timeline: self.timeline.clone(),
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn tick(&self) -> u64 {
        self.tick_counter
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }
}
