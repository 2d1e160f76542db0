use crate::types::Vec2;

pub const TICK_RATE: u32 = 60;
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

pub const TILE_SIZE: f32 = 20.0;
pub const BOARD_WIDTH: i32 = 28;
pub const BOARD_HEIGHT: i32 = 31;
pub const TUNNEL_ROW: i32 = 14;

pub const PLAYER_SPEED: f32 = 2.0;
pub const GHOST_SPEED: f32 = 1.5;
pub const GHOST_FRIGHTENED_SPEED: f32 = 1.0;
pub const GHOST_EATEN_SPEED: f32 = 4.0;

pub const FRIGHTENED_TICKS: u32 = 600;
pub const BLINK_THRESHOLD_TICKS: u32 = 120;
pub const BLINK_PERIOD_TICKS: u32 = 15;
pub const DEATH_ANIMATION_TICKS: u32 = 60;
pub const REHOUSE_DELAY_TICKS: u32 = 60;

pub const MOUTH_ANGLE_MIN: f32 = 5.0;
pub const MOUTH_ANGLE_MAX: f32 = 45.0;
pub const MOUTH_ANGLE_STEP: f32 = 5.0;

pub const PICKUP_POINTS: u32 = 10;
pub const POWER_PICKUP_POINTS: u32 = 50;
pub const GHOST_COMBO_POINTS: [u32; 4] = [200, 400, 800, 1600];

pub const STARTING_LIVES: u32 = 3;
pub const EXTRA_LIFE_SCORE: u32 = 10_000;
pub const COLLISION_WINDOW: f32 = TILE_SIZE * 0.7;

pub const PLAYER_SPAWN: Vec2 = Vec2 { x: 14, y: 23 };
pub const HOUSE_EXIT: Vec2 = Vec2 { x: 13, y: 11 };
pub const HOUSE_TARGET: Vec2 = Vec2 { x: 13, y: 14 };
pub const HOUSE_MIN: Vec2 = Vec2 { x: 12, y: 13 };
pub const HOUSE_MAX: Vec2 = Vec2 { x: 15, y: 15 };

pub const AMBUSH_LOOKAHEAD: i32 = 4;
pub const FLANK_LOOKAHEAD: i32 = 2;
pub const FLANK_ANCHOR: Vec2 = Vec2 { x: 13, y: 11 };
pub const OPPORTUNIST_CHASE_DISTANCE: f32 = 8.0;

pub const TIMELINE_SNAPSHOT_LEN: usize = 24;

pub const CLASSIC_MAZE: [&str; BOARD_HEIGHT as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #      # ##.######",
    "      .   #      #   .      ",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......  .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

pub fn ghost_combo_points(combo: u32) -> u32 {
    GHOST_COMBO_POINTS[(combo as usize).min(GHOST_COMBO_POINTS.len() - 1)]
}
