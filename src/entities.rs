//! All game entity types: pure data, no logic.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum VerticalState {
    /// Resting at the base altitude (`original_y`), freefall sprite.
    Bottom,
    /// Rising under the parachute toward the top margin.
    Ascending,
    /// Holding at the top margin until the dwell timer runs out.
    Top,
    /// Falling back toward `original_y`, freefall sprite.
    Descending,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObstacleKind {
    /// Crosses the screen right-to-left. Lethal.
    Plane,
    /// Drifts up from below the bottom edge. Lethal.
    Balloon,
    /// Stationary gust with a fixed lifetime. Sends the player spinning.
    Wind,
    /// Collectible parachute drifting up. Adds one to the player's stock.
    Chute,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Variant {
    Glide,
    Traffic,
    Tempest,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held-key snapshot taken once per tick by the input layer.
#[derive(Clone, Debug, Default)]
pub struct InputSnapshot {
    /// Ascend request (space held).
    pub ascend: bool,
    pub left: bool,
    pub right: bool,
}

// ── Player & obstacles ────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    /// Center position in game-space pixels.
    pub x: i32,
    pub y: i32,
    pub state: VerticalState,
    pub spin_active: bool,
    /// Current spin rotation in degrees, always in `0..360`.
    /// Zero whenever `spin_active` is false.
    pub spin_angle: i32,
    /// Parachutes in stock. Spent on ascent where the variant gates it,
    /// gained from `Chute` pickups.
    pub chutes: u32,
    /// Rest altitude (center y at construction); descent clamps to it.
    pub original_y: i32,
    /// Set on entering `Top`, cleared on leaving it.
    pub top_arrival: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Center position in game-space pixels.
    pub x: i32,
    pub y: i32,
    /// Tick time the spawner emitted this obstacle. Drives the wind
    /// lifetime check.
    pub spawned_at: Duration,
}

// ── Spawn scheduler ───────────────────────────────────────────────────────────

/// One last-spawn timestamp per obstacle kind. Spawns are edge-triggered:
/// a kind fires only when `now - last_spawn` exceeds its configured
/// interval, and the timestamp is rearmed to `now` on every emission.
#[derive(Clone, Debug)]
pub struct SpawnScheduler {
    pub plane: Duration,
    pub balloon: Duration,
    pub wind: Duration,
    pub chute: Duration,
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Everything the three game variants disagree on, as one record.
/// A spawn interval of `None` means the kind never appears in that
/// variant.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Game-space playfield size in pixels (portrait).
    pub width: i32,
    pub height: i32,
    /// Pixels per tick for ascent, descent and the background scroll.
    pub scroll_speed: i32,
    /// Ascent stops once the player's center y reaches this row.
    pub top_margin: i32,
    /// Hold time at the top before descent begins.
    pub top_dwell: Duration,
    pub plane_interval: Option<Duration>,
    pub balloon_interval: Option<Duration>,
    pub wind_interval: Option<Duration>,
    pub chute_interval: Option<Duration>,
    /// How long a wind gust stays alive after spawning.
    pub wind_lifetime: Duration,
    /// Ascent from `Bottom` costs one parachute when set.
    pub ascent_needs_chute: bool,
    /// Wind contact triggers the spin sub-state when set.
    pub wind_spins: bool,
    pub starting_chutes: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can return
/// a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Live obstacles of every kind, unordered.
    pub obstacles: Vec<Obstacle>,
    pub spawner: SpawnScheduler,
    pub status: GameStatus,
    /// Tick time of the most recent update (duration since round start).
    pub now: Duration,
    /// Background scroll offset in `0..height`, advanced each tick.
    pub scroll: i32,
    /// Longest flight this session, shown in the menu and the overlay.
    pub best_time: Duration,
    pub variant: Variant,
    pub config: GameConfig,
}
