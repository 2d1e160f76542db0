use crate::constants::{
    AMBUSH_LOOKAHEAD, BLINK_PERIOD_TICKS, BLINK_THRESHOLD_TICKS, FLANK_ANCHOR, FLANK_LOOKAHEAD,
    FRIGHTENED_TICKS, GHOST_EATEN_SPEED, GHOST_FRIGHTENED_SPEED, GHOST_SPEED, HOUSE_EXIT,
    HOUSE_MAX, HOUSE_MIN, HOUSE_TARGET, OPPORTUNIST_CHASE_DISTANCE, REHOUSE_DELAY_TICKS,
    TILE_SIZE,
};
use crate::maze::Maze;
use crate::rng::Rng;
use crate::types::{Direction, GhostMode, GhostType, GhostView, Position, TileKind, Vec2};

use super::utils::{euclidean, interpolate, offset, step_tile, tile_origin};

/// What a pursuer needs to know about the world when it picks a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PursuitContext {
    pub player_tile: Vec2,
    pub player_facing: Direction,
    pub scatter_corner: Vec2,
}

impl PursuitContext {
    pub fn new(maze: &Maze, player_tile: Vec2, player_facing: Direction) -> Self {
        Self {
            player_tile,
            player_facing,
            scatter_corner: Vec2::new(0, maze.height() - 1),
        }
    }
}

/// Mode changes a pursuer reports back to the orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostTransition {
    Released,
    FrightenedEnded,
    Housed,
}

impl GhostType {
    pub fn spawn_tile(self) -> Vec2 {
        match self {
            Self::Chaser => Vec2::new(13, 11),
            Self::Ambusher => Vec2::new(14, 14),
            Self::Flanker => Vec2::new(12, 14),
            Self::Opportunist => Vec2::new(15, 14),
        }
    }

    /// Ticks spent in the house at level or life start.
    pub fn release_delay(self) -> u32 {
        match self {
            Self::Chaser => 0,
            Self::Ambusher => 100,
            Self::Flanker => 200,
            Self::Opportunist => 300,
        }
    }

    pub fn target(self, ghost_tile: Vec2, ctx: &PursuitContext) -> Vec2 {
        match self {
            Self::Chaser => ctx.player_tile,
            Self::Ambusher => offset(ctx.player_tile, ctx.player_facing, AMBUSH_LOOKAHEAD),
            Self::Flanker => {
                let ahead = offset(ctx.player_tile, ctx.player_facing, FLANK_LOOKAHEAD);
                Vec2::new(ahead.x * 2 - FLANK_ANCHOR.x, ahead.y * 2 - FLANK_ANCHOR.y)
            }
            Self::Opportunist => {
                if euclidean(ghost_tile, ctx.player_tile) > OPPORTUNIST_CHASE_DISTANCE {
                    ctx.player_tile
                } else {
                    ctx.scatter_corner
                }
            }
        }
    }
}

pub fn in_house(tile: Vec2) -> bool {
    (HOUSE_MIN.x..=HOUSE_MAX.x).contains(&tile.x) && (HOUSE_MIN.y..=HOUSE_MAX.y).contains(&tile.y)
}

#[derive(Clone, Debug)]
pub struct Ghost {
    ghost_type: GhostType,
    tile: Vec2,
    position: Position,
    facing: Direction,
    progress: f32,
    mode: GhostMode,
    base_speed: f32,
    speed: f32,
    house_timer: u32,
    frightened_timer: u32,
    animation_frame: u32,
}

impl Ghost {
    pub fn new(ghost_type: GhostType) -> Self {
        let spawn = ghost_type.spawn_tile();
        Self {
            ghost_type,
            tile: spawn,
            position: tile_origin(spawn),
            facing: Direction::Up,
            progress: 0.0,
            mode: GhostMode::Housed,
            base_speed: GHOST_SPEED,
            speed: GHOST_SPEED,
            house_timer: ghost_type.release_delay(),
            frightened_timer: 0,
            animation_frame: 0,
        }
    }

    pub fn reset(&mut self) {
        self.rehouse(self.ghost_type.release_delay());
        self.animation_frame = 0;
    }

    fn rehouse(&mut self, delay: u32) {
        self.tile = self.ghost_type.spawn_tile();
        self.position = tile_origin(self.tile);
        self.facing = Direction::Up;
        self.progress = 0.0;
        self.mode = GhostMode::Housed;
        self.speed = self.base_speed;
        self.house_timer = delay;
        self.frightened_timer = 0;
    }

    pub fn update(
        &mut self,
        maze: &Maze,
        ctx: &PursuitContext,
        rng: &mut Rng,
    ) -> Option<GhostTransition> {
        self.animation_frame = self.animation_frame.wrapping_add(1);

        let mut transition = None;
        match self.mode {
            GhostMode::Housed => {
                self.house_timer = self.house_timer.saturating_sub(1);
                if self.house_timer == 0 {
                    self.release();
                    return Some(GhostTransition::Released);
                }
                return None;
            }
            GhostMode::Frightened => {
                self.frightened_timer = self.frightened_timer.saturating_sub(1);
                if self.frightened_timer == 0 {
                    self.mode = GhostMode::Normal;
                    self.speed = self.base_speed;
                    transition = Some(GhostTransition::FrightenedEnded);
                }
            }
            GhostMode::Eaten => {
                if in_house(self.tile) {
                    self.rehouse(REHOUSE_DELAY_TICKS);
                    return Some(GhostTransition::Housed);
                }
            }
            GhostMode::Normal => {}
        }

        self.advance(maze, ctx, rng);
        transition
    }

    fn release(&mut self) {
        self.tile = HOUSE_EXIT;
        self.position = tile_origin(HOUSE_EXIT);
        self.facing = Direction::Left;
        self.progress = 0.0;
        if self.frightened_timer > 0 {
            self.mode = GhostMode::Frightened;
            self.speed = GHOST_FRIGHTENED_SPEED;
        } else {
            self.mode = GhostMode::Normal;
            self.speed = self.base_speed;
        }
    }

    fn advance(&mut self, maze: &Maze, ctx: &PursuitContext, rng: &mut Rng) {
        if self.progress == 0.0 {
            let ahead = step_tile(maze, self.tile, self.facing);
            if self.facing == Direction::None || !self.may_enter(maze, ahead) {
                self.choose_direction(maze, ctx, rng);
            }
        }

        self.progress += self.speed;
        if self.progress >= TILE_SIZE {
            self.tile = step_tile(maze, self.tile, self.facing);
            self.progress = 0.0;
            self.position = tile_origin(self.tile);
            self.choose_direction(maze, ctx, rng);
        } else {
            self.position = interpolate(self.tile, self.facing, self.progress);
        }
    }

    fn may_enter(&self, maze: &Maze, tile: Vec2) -> bool {
        maze.can_enter(tile.x, tile.y)
            && (self.mode == GhostMode::Eaten || maze.tile_kind(tile.x, tile.y) != TileKind::Gate)
    }

    fn candidates(&self, maze: &Maze) -> Vec<(Direction, Vec2)> {
        let reverse = self.facing.opposite();
        Direction::CARDINALS
            .into_iter()
            .filter(|dir| *dir != reverse)
            .map(|dir| (dir, step_tile(maze, self.tile, dir)))
            .filter(|(_, dest)| self.may_enter(maze, *dest))
            .collect()
    }

    /// Tile this pursuer steers toward from its current tile, if it steers at all.
    pub fn target_tile(&self, ctx: &PursuitContext) -> Option<Vec2> {
        match self.mode {
            GhostMode::Normal => Some(self.ghost_type.target(self.tile, ctx)),
            GhostMode::Eaten => Some(HOUSE_TARGET),
            GhostMode::Frightened | GhostMode::Housed => None,
        }
    }

    /// Direction the pursuer would take from its current tile. Only frightened
    /// pursuers with a real choice draw from `rng`.
    pub fn pick_direction(&self, maze: &Maze, ctx: &PursuitContext, rng: &mut Rng) -> Direction {
        let candidates = self.candidates(maze);
        match candidates.as_slice() {
            [] => self.facing.opposite(),
            [(only, _)] => *only,
            _ => match self.target_tile(ctx) {
                Some(target) => closest_to(&candidates, target),
                None => {
                    let dirs: Vec<Direction> = candidates.iter().map(|(dir, _)| *dir).collect();
                    rng.pick(&dirs).unwrap_or(self.facing)
                }
            },
        }
    }

    pub fn choose_direction(&mut self, maze: &Maze, ctx: &PursuitContext, rng: &mut Rng) {
        self.facing = self.pick_direction(maze, ctx, rng);
    }

    /// Enters (or re-arms) frightened mode. Eaten pursuers ignore it; housed
    /// ones hold the timer, frozen, and leave the house frightened.
    pub fn frighten(&mut self, maze: &Maze) -> bool {
        match self.mode {
            GhostMode::Eaten => return false,
            GhostMode::Housed => {
                self.frightened_timer = FRIGHTENED_TICKS;
                return true;
            }
            GhostMode::Normal | GhostMode::Frightened => {}
        }
        self.mode = GhostMode::Frightened;
        self.frightened_timer = FRIGHTENED_TICKS;
        self.speed = GHOST_FRIGHTENED_SPEED;
        self.reverse(maze);
        true
    }

    /// Mid-tile, the pursuer takes over the tile it was approaching, so its
    /// tile can sit up to a tile ahead of its body until it arrives back.
    fn reverse(&mut self, maze: &Maze) {
        if self.progress > 0.0 {
            self.tile = step_tile(maze, self.tile, self.facing);
            self.progress = TILE_SIZE - self.progress;
        }
        self.facing = self.facing.opposite();
        self.position = interpolate(self.tile, self.facing, self.progress);
    }

    pub fn mark_eaten(&mut self) -> bool {
        if self.mode == GhostMode::Eaten {
            return false;
        }
        self.mode = GhostMode::Eaten;
        self.frightened_timer = 0;
        self.speed = GHOST_EATEN_SPEED;
        true
    }

    pub fn ghost_type(&self) -> GhostType {
        self.ghost_type
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
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

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_housed(&self) -> bool {
        self.mode == GhostMode::Housed
    }

    pub fn is_blinking(&self) -> bool {
        self.mode == GhostMode::Frightened
            && self.frightened_timer < BLINK_THRESHOLD_TICKS
            && (self.frightened_timer / BLINK_PERIOD_TICKS) % 2 == 0
    }

    pub fn view(&self) -> GhostView {
        let (dx, dy) = self.facing.delta();
        GhostView {
            ghost_type: self.ghost_type,
            tile: self.tile,
            position: self.position,
            facing: self.facing,
            mode: self.mode,
            speed: self.speed,
            frightened_ticks: self.frightened_timer,
            blinking: self.is_blinking(),
            eye_offset: (dx * 2, dy * 2),
            wave_phase: (self.animation_frame / 5) % 2,
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, tile: Vec2, facing: Direction, mode: GhostMode) {
        self.tile = tile;
        self.facing = facing;
        self.progress = 0.0;
        self.position = tile_origin(tile);
        self.mode = mode;
        self.speed = match mode {
            GhostMode::Frightened => GHOST_FRIGHTENED_SPEED,
            GhostMode::Eaten => GHOST_EATEN_SPEED,
            GhostMode::Normal | GhostMode::Housed => self.base_speed,
        };
        self.frightened_timer = if mode == GhostMode::Frightened {
            FRIGHTENED_TICKS
        } else {
            0
        };
    }
}

/// Smallest straight-line distance wins; ties keep the earliest candidate.
fn closest_to(candidates: &[(Direction, Vec2)], target: Vec2) -> Direction {
    let mut best = Direction::None;
    let mut best_distance = f32::MAX;
    for (dir, dest) in candidates {
        let distance = euclidean(*dest, target);
        if distance < best_distance {
            best_distance = distance;
            best = *dir;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(player_tile: Vec2, player_facing: Direction) -> PursuitContext {
        PursuitContext::new(&Maze::classic(), player_tile, player_facing)
    }

    fn placed(ghost_type: GhostType, tile: Vec2, facing: Direction, mode: GhostMode) -> Ghost {
        let mut ghost = Ghost::new(ghost_type);
        ghost.place(tile, facing, mode);
        ghost
    }

    #[test]
    fn archetype_targets() {
        let c = ctx(Vec2::new(14, 23), Direction::Left);
        let far = Vec2::new(1, 1);
        assert_eq!(GhostType::Chaser.target(far, &c), Vec2::new(14, 23));
        assert_eq!(GhostType::Ambusher.target(far, &c), Vec2::new(10, 23));
        assert_eq!(GhostType::Flanker.target(far, &c), Vec2::new(11, 35));
        assert_eq!(GhostType::Opportunist.target(far, &c), Vec2::new(14, 23));
        assert_eq!(
            GhostType::Opportunist.target(Vec2::new(14, 20), &c),
            Vec2::new(0, 30)
        );
    }

    #[test]
    fn ambusher_with_idle_player_targets_player_tile() {
        let c = ctx(Vec2::new(6, 5), Direction::None);
        assert_eq!(GhostType::Ambusher.target(Vec2::new(1, 1), &c), Vec2::new(6, 5));
    }

    #[test]
    fn ties_break_in_canonical_order() {
        let ghost = placed(GhostType::Chaser, Vec2::new(6, 5), Direction::Right, GhostMode::Normal);
        let c = ctx(Vec2::new(6, 5), Direction::None);
        let mut rng = Rng::new(1);
        assert_eq!(ghost.pick_direction(&Maze::classic(), &c, &mut rng), Direction::Up);
    }

    #[test]
    fn never_reverses_by_choice() {
        let maze = Maze::classic();
        let ghost = placed(GhostType::Chaser, Vec2::new(6, 5), Direction::Right, GhostMode::Normal);
        // Target lies straight behind the pursuer.
        let c = ctx(Vec2::new(1, 5), Direction::None);
        let mut rng = Rng::new(1);
        let dir = ghost.pick_direction(&maze, &c, &mut rng);
        assert_ne!(dir, Direction::Left);
    }

    #[test]
    fn non_random_choice_is_deterministic() {
        let maze = Maze::classic();
        for ghost_type in GhostType::ALL {
            let ghost = placed(ghost_type, Vec2::new(6, 5), Direction::Right, GhostMode::Normal);
            let c = ctx(Vec2::new(20, 26), Direction::Up);
            let mut rng_a = Rng::new(1);
            let mut rng_b = Rng::new(999);
            let first = ghost.pick_direction(&maze, &c, &mut rng_a);
            for _ in 0..10 {
                assert_eq!(ghost.pick_direction(&maze, &c, &mut rng_b), first);
            }
        }
    }

    #[test]
    fn frightened_choice_follows_the_seed() {
        let maze = Maze::classic();
        let ghost = placed(
            GhostType::Chaser,
            Vec2::new(6, 5),
            Direction::Right,
            GhostMode::Frightened,
        );
        let c = ctx(Vec2::new(14, 23), Direction::None);
        let mut seen = Vec::new();
        for seed in 0..64u32 {
            let mut a = Rng::new(seed);
            let mut b = Rng::new(seed);
            let sequence_a: Vec<_> = (0..8).map(|_| ghost.pick_direction(&maze, &c, &mut a)).collect();
            let sequence_b: Vec<_> = (0..8).map(|_| ghost.pick_direction(&maze, &c, &mut b)).collect();
            assert_eq!(sequence_a, sequence_b);
            for dir in sequence_a {
                assert_ne!(dir, Direction::Left);
                if !seen.contains(&dir) {
                    seen.push(dir);
                }
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn dead_end_forces_reversal_and_single_exit_is_taken() {
        let maze = Maze::parse(&["#####", "#...#", "###.#", "#####"], 0).expect("valid template");
        let c = PursuitContext::new(&maze, Vec2::new(1, 1), Direction::None);
        let mut rng = Rng::new(3);

        let stuck = placed(GhostType::Chaser, Vec2::new(1, 1), Direction::Left, GhostMode::Normal);
        assert_eq!(stuck.pick_direction(&maze, &c, &mut rng), Direction::Right);

        let corner = placed(GhostType::Chaser, Vec2::new(3, 1), Direction::Right, GhostMode::Normal);
        assert_eq!(corner.pick_direction(&maze, &c, &mut rng), Direction::Down);
    }

    #[test]
    fn gate_is_open_only_to_eaten_pursuers() {
        let maze = Maze::classic();
        let c = ctx(Vec2::new(13, 20), Direction::None);
        let mut rng = Rng::new(5);

        let normal = placed(GhostType::Chaser, Vec2::new(13, 11), Direction::Right, GhostMode::Normal);
        assert_eq!(normal.pick_direction(&maze, &c, &mut rng), Direction::Right);

        let eaten = placed(GhostType::Chaser, Vec2::new(13, 11), Direction::Right, GhostMode::Eaten);
        assert_eq!(eaten.pick_direction(&maze, &c, &mut rng), Direction::Down);
    }

    #[test]
    fn release_after_archetype_delay() {
        let maze = Maze::classic();
        let c = ctx(Vec2::new(14, 23), Direction::None);
        let mut rng = Rng::new(1);

        let mut chaser = Ghost::new(GhostType::Chaser);
        assert_eq!(chaser.update(&maze, &c, &mut rng), Some(GhostTransition::Released));

        let mut ambusher = Ghost::new(GhostType::Ambusher);
        for _ in 0..99 {
            assert_eq!(ambusher.update(&maze, &c, &mut rng), None);
            assert!(ambusher.is_housed());
            assert_eq!(ambusher.tile(), Vec2::new(14, 14));
        }
        assert_eq!(ambusher.update(&maze, &c, &mut rng), Some(GhostTransition::Released));
        assert_eq!(ambusher.tile(), HOUSE_EXIT);
        assert_eq!(ambusher.facing(), Direction::Left);
        assert_eq!(ambusher.mode(), GhostMode::Normal);
    }

    #[test]
    fn eaten_pursuer_is_rehoused_with_base_speed() {
        let maze = Maze::classic();
        let c = ctx(Vec2::new(14, 23), Direction::None);
        let mut rng = Rng::new(1);
        let mut ghost = placed(
            GhostType::Flanker,
            HOUSE_EXIT,
            Direction::Down,
            GhostMode::Frightened,
        );
        assert!(ghost.mark_eaten());
        assert_eq!(ghost.speed(), GHOST_EATEN_SPEED);

        let mut housed = false;
        for _ in 0..40 {
            if ghost.update(&maze, &c, &mut rng) == Some(GhostTransition::Housed) {
                housed = true;
                break;
            }
            assert_eq!(ghost.mode(), GhostMode::Eaten);
        }
        assert!(housed, "eaten pursuer never passed the gate");
        assert_eq!(ghost.mode(), GhostMode::Housed);
        assert_eq!(ghost.speed(), GHOST_SPEED);
        assert_eq!(ghost.tile(), GhostType::Flanker.spawn_tile());
        assert_eq!(ghost.view().frightened_ticks, 0);
    }

    #[test]
    fn frightened_countdown_returns_to_normal() {
        let maze = Maze::classic();
        let c = ctx(Vec2::new(14, 23), Direction::None);
        let mut rng = Rng::new(11);
        let mut ghost = placed(GhostType::Chaser, Vec2::new(6, 5), Direction::Right, GhostMode::Normal);
        assert!(ghost.frighten(&maze));
        assert_eq!(ghost.speed(), GHOST_FRIGHTENED_SPEED);
        for _ in 0..FRIGHTENED_TICKS - 1 {
            assert_eq!(ghost.update(&maze, &c, &mut rng), None);
            assert_eq!(ghost.mode(), GhostMode::Frightened);
        }
        assert_eq!(
            ghost.update(&maze, &c, &mut rng),
            Some(GhostTransition::FrightenedEnded)
        );
        assert_eq!(ghost.mode(), GhostMode::Normal);
        assert_eq!(ghost.speed(), GHOST_SPEED);
    }

    #[test]
    fn frighten_reverses_without_moving_the_body() {
        let maze = Maze::classic();
        let c = ctx(Vec2::new(14, 23), Direction::None);
        let mut rng = Rng::new(2);
        let mut ghost = placed(GhostType::Chaser, Vec2::new(6, 5), Direction::Right, GhostMode::Normal);
        // Facing right along row 5 is legal, so no direction choice happens here.
        for _ in 0..3 {
            ghost.update(&maze, &c, &mut rng);
        }
        let before = ghost.position();
        assert!(ghost.frighten(&maze));
        assert_eq!(ghost.facing(), Direction::Left);
        assert_eq!(ghost.tile(), Vec2::new(7, 5));
        assert_eq!(ghost.position(), before);
        let expected = interpolate(ghost.tile(), ghost.facing(), ghost.progress());
        assert_eq!(ghost.position(), expected);
    }

    #[test]
    fn housed_pursuer_leaves_the_house_frightened() {
        let maze = Maze::classic();
        let c = ctx(Vec2::new(14, 23), Direction::None);
        let mut rng = Rng::new(6);
        let mut ambusher = Ghost::new(GhostType::Ambusher);
        assert!(ambusher.frighten(&maze));
        assert_eq!(ambusher.mode(), GhostMode::Housed);
        assert_eq!(ambusher.tile(), GhostType::Ambusher.spawn_tile());

        for _ in 0..99 {
            assert_eq!(ambusher.update(&maze, &c, &mut rng), None);
        }
        assert_eq!(ambusher.view().frightened_ticks, FRIGHTENED_TICKS);
        assert_eq!(ambusher.update(&maze, &c, &mut rng), Some(GhostTransition::Released));
        assert_eq!(ambusher.mode(), GhostMode::Frightened);
        assert_eq!(ambusher.speed(), GHOST_FRIGHTENED_SPEED);
    }

    #[test]
    fn eaten_pursuers_ignore_fright() {
        let maze = Maze::classic();
        let mut eaten = placed(GhostType::Chaser, Vec2::new(6, 5), Direction::Right, GhostMode::Eaten);
        assert!(!eaten.frighten(&maze));
        assert_eq!(eaten.mode(), GhostMode::Eaten);
        assert!(!eaten.mark_eaten());
    }

    #[test]
    fn pursuer_wraps_through_the_tunnel() {
        let maze = Maze::classic();
        let row = maze.tunnel_row();
        let c = ctx(Vec2::new(14, 23), Direction::None);
        let mut rng = Rng::new(8);
        let mut ghost = placed(GhostType::Chaser, Vec2::new(1, row), Direction::Left, GhostMode::Normal);

        let mut visited = Vec::new();
        for _ in 0..40 {
            ghost.update(&maze, &c, &mut rng);
            let tile = ghost.tile();
            assert!(maze.in_bounds(tile.x, tile.y));
            assert_eq!(
                ghost.position(),
                interpolate(tile, ghost.facing(), ghost.progress())
            );
            if visited.last() != Some(&tile) {
                visited.push(tile);
            }
        }
        assert_eq!(
            visited,
            vec![
                Vec2::new(1, row),
                Vec2::new(0, row),
                Vec2::new(maze.width() - 1, row)
            ]
        );
        assert_eq!(ghost.facing(), Direction::Left);
    }

    #[test]
    fn candidate_distance_uses_the_wrapped_destination() {
        let maze = Maze::parse(&["######", "      ", "      ", "######"], 1).expect("valid template");
        let c = PursuitContext::new(&maze, Vec2::new(5, 2), Direction::None);
        let mut rng = Rng::new(1);
        let ghost = placed(GhostType::Chaser, Vec2::new(0, 1), Direction::Down, GhostMode::Normal);
        // Left lands on (5,1), next to the target; unwrapped it would be the farthest.
        assert_eq!(ghost.pick_direction(&maze, &c, &mut rng), Direction::Left);
    }

    #[test]
    fn blinking_hint_only_near_the_end_of_fright() {
        let maze = Maze::classic();
        let c = ctx(Vec2::new(14, 23), Direction::None);
        let mut rng = Rng::new(4);
        let mut ghost = placed(GhostType::Chaser, Vec2::new(6, 5), Direction::Right, GhostMode::Normal);
        ghost.frighten(&maze);
        let mut blinked_early = false;
        let mut blinked_late = false;
        for tick in 0..FRIGHTENED_TICKS - 1 {
            ghost.update(&maze, &c, &mut rng);
            let left = FRIGHTENED_TICKS - 1 - tick;
            if ghost.is_blinking() {
                if left >= BLINK_THRESHOLD_TICKS {
                    blinked_early = true;
                } else {
                    blinked_late = true;
                }
            }
        }
        assert!(!blinked_early);
        assert!(blinked_late);
    }
}
