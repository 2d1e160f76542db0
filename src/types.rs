use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    /// Canonical enumeration order, also the tie-break order for direction choice.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Wall,
    /// Neutral kind, also reported for every off-grid coordinate.
    Empty,
    Pickup,
    PowerPickup,
    Gate,
    /// Open path with nothing on it: either consumed or never seeded.
    ConsumedEmpty,
}

impl TileKind {
    pub fn parse(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Wall),
            '_' => Some(Self::Empty),
            '.' => Some(Self::Pickup),
            'o' => Some(Self::PowerPickup),
            '=' => Some(Self::Gate),
            ' ' => Some(Self::ConsumedEmpty),
            _ => None,
        }
    }

    pub fn is_pickup(self) -> bool {
        matches!(self, Self::Pickup | Self::PowerPickup)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Continuous position in distance units (`tile * TILE_SIZE` at a tile origin).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    Alive,
    Dying,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostMode {
    Housed,
    Normal,
    Frightened,
    Eaten,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostType {
    Chaser,
    Ambusher,
    Flanker,
    Opportunist,
}

impl GhostType {
    pub const ALL: [GhostType; 4] = [
        GhostType::Chaser,
        GhostType::Ambusher,
        GhostType::Flanker,
        GhostType::Opportunist,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Playing,
    LevelTransition,
    GameOver,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub tile: Vec2,
    pub position: Position,
    pub facing: Direction,
    pub requested: Direction,
    pub state: PlayerState,
    pub progress: f32,
    #[serde(rename = "mouthAngle")]
    pub mouth_angle: f32,
    #[serde(rename = "deathFrame")]
    pub death_frame: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    #[serde(rename = "type")]
    pub ghost_type: GhostType,
    pub tile: Vec2,
    pub position: Position,
    pub facing: Direction,
    pub mode: GhostMode,
    pub speed: f32,
    #[serde(rename = "frightenedTicks")]
    pub frightened_ticks: u32,
    pub blinking: bool,
    #[serde(rename = "eyeOffset")]
    pub eye_offset: (i32, i32),
    #[serde(rename = "wavePhase")]
    pub wave_phase: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct TimelineEvent {
    pub tick: u64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    GameStarted,
    PickupEaten {
        x: i32,
        y: i32,
    },
    PowerPickupEaten {
        x: i32,
        y: i32,
    },
    GhostsFrightened,
    FrightenedEnded {
        #[serde(rename = "ghostType")]
        ghost_type: GhostType,
    },
    GhostReleased {
        #[serde(rename = "ghostType")]
        ghost_type: GhostType,
    },
    GhostEaten {
        #[serde(rename = "ghostType")]
        ghost_type: GhostType,
        points: u32,
        combo: u32,
    },
    GhostHoused {
        #[serde(rename = "ghostType")]
        ghost_type: GhostType,
    },
    PlayerDied {
        #[serde(rename = "ghostType")]
        ghost_type: GhostType,
    },
    LifeLost {
        #[serde(rename = "livesLeft")]
        lives_left: u32,
    },
    ExtraLife {
        lives: u32,
    },
    LevelComplete {
        level: u32,
    },
    GameOver {
        score: u32,
        level: u32,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub state: SessionState,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub combo: u32,
    #[serde(rename = "remainingPickups")]
    pub remaining_pickups: u32,
    #[serde(rename = "totalPickups")]
    pub total_pickups: u32,
    pub player: PlayerView,
    pub ghosts: Vec<GhostView>,
    pub events: Vec<RuntimeEvent>,
    pub timeline: Vec<TimelineEvent>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub state: SessionState,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub ticks: u64,
    #[serde(rename = "pickupsEaten")]
    pub pickups_eaten: u32,
    #[serde(rename = "ghostsEaten")]
    pub ghosts_eaten: u32,
    pub deaths: u32,
    pub timeline: Vec<TimelineEvent>,
}
