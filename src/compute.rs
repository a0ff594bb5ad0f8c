//! Pure game-logic functions.
//!
//! Every public function takes an immutable view of the current state
//! (and, where needed, the asset table plus an RNG handle) and returns a
//! brand-new value. Side effects are limited to the injected RNG, so a
//! seeded generator makes every run deterministic.

use std::time::Duration;

use rand::Rng;

use crate::entities::{
    GameConfig, GameState, GameStatus, InputSnapshot, Obstacle, ObstacleKind, Player,
    SpawnScheduler, Variant, VerticalState,
};
use crate::sprite::{masks_collide, Assets, Mask, Sprite};

// ── Variant & kind tables ─────────────────────────────────────────────────────

/// The full configuration record for each selectable variant.
pub fn config_for(variant: &Variant) -> GameConfig {
    match variant {
        Variant::Glide => GameConfig {
            width: 500,
            height: 800,
            scroll_speed: 2,
            top_margin: 50,
            top_dwell: Duration::from_secs(3),
            plane_interval: None,
            balloon_interval: None,
            wind_interval: None,
            chute_interval: None,
            wind_lifetime: Duration::from_secs(3),
            ascent_needs_chute: false,
            wind_spins: false,
            starting_chutes: 0,
        },
        Variant::Traffic => GameConfig {
            width: 540,
            height: 800,
            scroll_speed: 2,
            top_margin: 50,
            top_dwell: Duration::from_secs(3),
            plane_interval: Some(Duration::from_secs(6)),
            balloon_interval: Some(Duration::from_secs(4)),
            wind_interval: None,
            chute_interval: None,
            wind_lifetime: Duration::from_secs(3),
            ascent_needs_chute: false,
            wind_spins: false,
            starting_chutes: 0,
        },
        Variant::Tempest => GameConfig {
            width: 560,
            height: 840,
            scroll_speed: 3,
            top_margin: 50,
            top_dwell: Duration::from_secs(3),
            plane_interval: Some(Duration::from_secs(6)),
            balloon_interval: Some(Duration::from_secs(5)),
            wind_interval: Some(Duration::from_secs(3)),
            chute_interval: Some(Duration::from_secs(3)),
            wind_lifetime: Duration::from_secs(3),
            ascent_needs_chute: true,
            wind_spins: true,
            starting_chutes: 3,
        },
    }
}

const KINDS: [ObstacleKind; 4] = [
    ObstacleKind::Plane,
    ObstacleKind::Balloon,
    ObstacleKind::Wind,
    ObstacleKind::Chute,
];

/// Game-space pixels added to an obstacle's center each tick.
fn velocity_for(kind: &ObstacleKind) -> (i32, i32) {
    match kind {
        ObstacleKind::Plane => (-3, 0),
        ObstacleKind::Balloon => (0, -1),
        ObstacleKind::Wind => (0, 0),
        ObstacleKind::Chute => (0, -2),
    }
}

fn spawn_interval(kind: &ObstacleKind, cfg: &GameConfig) -> Option<Duration> {
    match kind {
        ObstacleKind::Plane => cfg.plane_interval,
        ObstacleKind::Balloon => cfg.balloon_interval,
        ObstacleKind::Wind => cfg.wind_interval,
        ObstacleKind::Chute => cfg.chute_interval,
    }
}

fn obstacle_mask<'a>(kind: &ObstacleKind, assets: &'a Assets) -> &'a Mask {
    match kind {
        ObstacleKind::Plane => &assets.plane.mask,
        ObstacleKind::Balloon => &assets.balloon.mask,
        ObstacleKind::Wind => &assets.wind.mask,
        ObstacleKind::Chute => &assets.chute.mask,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a chosen variant. `best_time` is the
/// session's longest flight so far, carried along for the HUD.
pub fn init_state(variant: Variant, best_time: Duration) -> GameState {
    let config = config_for(&variant);
    let start_y = config.height - 300;
    GameState {
        player: Player {
            x: config.width / 2,
            y: start_y,
            state: VerticalState::Bottom,
            spin_active: false,
            spin_angle: 0,
            chutes: config.starting_chutes,
            original_y: start_y,
            top_arrival: None,
        },
        obstacles: Vec::new(),
        spawner: SpawnScheduler {
            plane: Duration::ZERO,
            balloon: Duration::ZERO,
            wind: Duration::ZERO,
            chute: Duration::ZERO,
        },
        status: GameStatus::Playing,
        now: Duration::ZERO,
        scroll: 0,
        best_time,
        variant,
        config,
    }
}

// ── Player (pure) ────────────────────────────────────────────────────────────

/// Advance the player one tick: the vertical state machine, then the
/// held-key drift (applies in every vertical state), then the spin step.
pub fn player_step(
    player: &Player,
    input: &InputSnapshot,
    now: Duration,
    cfg: &GameConfig,
) -> Player {
    let mut p = player.clone();

    match p.state {
        VerticalState::Bottom => {
            if input.ascend && (!cfg.ascent_needs_chute || p.chutes > 0) {
                if cfg.ascent_needs_chute {
                    p.chutes -= 1;
                }
                p.state = VerticalState::Ascending;
            }
        }
        VerticalState::Ascending => {
            if p.y > cfg.top_margin {
                p.y -= cfg.scroll_speed;
            } else {
                p.state = VerticalState::Top;
                p.top_arrival = Some(now);
            }
        }
        VerticalState::Top => {
            let dwell_over = p
                .top_arrival
                .map(|t| now.saturating_sub(t) > cfg.top_dwell)
                .unwrap_or(true);
            if dwell_over {
                p.state = VerticalState::Descending;
                p.top_arrival = None;
            }
        }
        VerticalState::Descending => {
            p.y += cfg.scroll_speed;
            if p.y >= p.original_y {
                p.y = p.original_y;
                p.state = VerticalState::Bottom;
            }
        }
    }

    if input.left {
        p.x -= 2;
    }
    if input.right {
        p.x += 2;
    }

    // Spin: 5° per tick, wrapping into 0..360, with an up-left drift on
    // every tick except the one that lands the angle back on exactly 0.
    if p.spin_active {
        p.spin_angle = (p.spin_angle - 5).rem_euclid(360);
        if p.spin_angle == 0 {
            p.spin_active = false;
        } else {
            p.x -= 4;
            p.y -= 1;
        }
    }

    p
}

/// The sprite (image + mask) the player currently presents: parachute
/// while ascending or holding at the top, freefall otherwise, and the
/// freefall image rotated by the spin angle while spinning.
pub fn player_sprite(player: &Player, assets: &Assets) -> Sprite {
    if player.spin_active && player.spin_angle != 0 {
        return Sprite::new(assets.freefall.image.rotated(player.spin_angle));
    }
    match player.state {
        VerticalState::Ascending | VerticalState::Top => assets.parachute.clone(),
        VerticalState::Bottom | VerticalState::Descending => assets.freefall.clone(),
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Emit a new obstacle of `kind` if its interval has elapsed since
/// `last_spawn`. Kinds the variant disables (interval `None`) never
/// spawn. The caller re-arms the scheduler with the spawn time.
pub fn maybe_spawn(
    kind: &ObstacleKind,
    last_spawn: Duration,
    now: Duration,
    cfg: &GameConfig,
    assets: &Assets,
    rng: &mut impl Rng,
) -> Option<Obstacle> {
    let interval = spawn_interval(kind, cfg)?;
    if now.saturating_sub(last_spawn) <= interval {
        return None;
    }
    Some(spawn_obstacle(kind, now, cfg, assets, rng))
}

fn spawn_obstacle(
    kind: &ObstacleKind,
    now: Duration,
    cfg: &GameConfig,
    assets: &Assets,
    rng: &mut impl Rng,
) -> Obstacle {
    let (x, y) = match kind {
        // Fully off the right edge, somewhere in the upper half of the sky.
        ObstacleKind::Plane => (
            cfg.width + assets.plane.image.w / 2,
            rng.gen_range(80..cfg.height / 2),
        ),
        // Fully below the bottom edge.
        ObstacleKind::Balloon => (
            rng.gen_range(60..cfg.width - 60),
            cfg.height + assets.balloon.image.h / 2,
        ),
        // On-screen, inset from every edge.
        ObstacleKind::Wind => (
            rng.gen_range(60..cfg.width - 60),
            rng.gen_range(150..cfg.height - 200),
        ),
        ObstacleKind::Chute => (
            rng.gen_range(40..cfg.width - 40),
            cfg.height + assets.chute.image.h / 2,
        ),
    };
    Obstacle {
        kind: kind.clone(),
        x,
        y,
        spawned_at: now,
    }
}

fn last_spawn_of(sched: &SpawnScheduler, kind: &ObstacleKind) -> Duration {
    match kind {
        ObstacleKind::Plane => sched.plane,
        ObstacleKind::Balloon => sched.balloon,
        ObstacleKind::Wind => sched.wind,
        ObstacleKind::Chute => sched.chute,
    }
}

fn arm(sched: &mut SpawnScheduler, kind: &ObstacleKind, now: Duration) {
    match kind {
        ObstacleKind::Plane => sched.plane = now,
        ObstacleKind::Balloon => sched.balloon = now,
        ObstacleKind::Wind => sched.wind = now,
        ObstacleKind::Chute => sched.chute = now,
    }
}

// ── Obstacle lifecycle ───────────────────────────────────────────────────────

fn expired(ob: &Obstacle, now: Duration, cfg: &GameConfig, assets: &Assets) -> bool {
    match ob.kind {
        // Stationary; dies by age alone.
        ObstacleKind::Wind => now.saturating_sub(ob.spawned_at) > cfg.wind_lifetime,
        // Fully past the left edge.
        ObstacleKind::Plane => ob.x + assets.plane.image.w / 2 < 0,
        // Fully past the top edge.
        ObstacleKind::Balloon => ob.y + assets.balloon.image.h / 2 < 0,
        ObstacleKind::Chute => ob.y + assets.chute.image.h / 2 < 0,
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ────────────────────────────

/// Advance the simulation by one frame. `now` is the monotonic time since
/// round start, sampled once by the caller so every timer comparison in
/// the tick sees the same instant.
///
/// Phase order is fixed: spawn, then motion, then collision, then expiry,
/// then the player step and background scroll. An obstacle that spawns or
/// slides off-screen this tick is still collidable this tick; a lethal
/// hit ends the round at the collision phase and the later phases do not
/// run.
pub fn tick(
    state: &GameState,
    input: &InputSnapshot,
    now: Duration,
    assets: &Assets,
    rng: &mut impl Rng,
) -> GameState {
    // A finished round never advances.
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    let cfg = &state.config;

    // ── 1. Spawn ─────────────────────────────────────────────────────────────
    let mut spawner = state.spawner.clone();
    let mut obstacles = state.obstacles.clone();
    for kind in KINDS {
        let last = last_spawn_of(&spawner, &kind);
        if let Some(ob) = maybe_spawn(&kind, last, now, cfg, assets, rng) {
            obstacles.push(ob);
            arm(&mut spawner, &kind, now);
        }
    }

    // ── 2. Move ──────────────────────────────────────────────────────────────
    let obstacles: Vec<Obstacle> = obstacles
        .iter()
        .map(|o| {
            let (vx, vy) = velocity_for(&o.kind);
            Obstacle {
                x: o.x + vx,
                y: o.y + vy,
                ..o.clone()
            }
        })
        .collect();

    // ── 3. Collide ───────────────────────────────────────────────────────────
    let psprite = player_sprite(&state.player, assets);
    let mut lethal = false;
    let mut hit_wind = false;
    let mut chutes_gained: u32 = 0;
    let mut consumed: Vec<usize> = Vec::new();

    for (i, ob) in obstacles.iter().enumerate() {
        let mask = obstacle_mask(&ob.kind, assets);
        if !masks_collide(&psprite.mask, state.player.x, state.player.y, mask, ob.x, ob.y) {
            continue;
        }
        match ob.kind {
            ObstacleKind::Plane | ObstacleKind::Balloon => {
                lethal = true;
                break;
            }
            ObstacleKind::Wind => {
                consumed.push(i);
                hit_wind = true;
            }
            ObstacleKind::Chute => {
                consumed.push(i);
                chutes_gained += 1;
            }
        }
    }

    // A lethal hit ends the round at once. The remaining phases are
    // skipped and same-tick pickups are forfeit.
    if lethal {
        return GameState {
            obstacles,
            spawner,
            status: GameStatus::GameOver,
            now,
            ..state.clone()
        };
    }

    let obstacles: Vec<Obstacle> = obstacles
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed.contains(i))
        .map(|(_, o)| o.clone())
        .collect();

    // ── 4. Expire ────────────────────────────────────────────────────────────
    let obstacles: Vec<Obstacle> = obstacles
        .into_iter()
        .filter(|o| !expired(o, now, cfg, assets))
        .collect();

    // ── 5. Player step ───────────────────────────────────────────────────────
    // Collision outcomes land on the player before the step, so a pickup
    // collected at the bottom is spendable on this very tick's ascent and
    // a wind hit starts spinning this tick.
    let mut pre = state.player.clone();
    if hit_wind && cfg.wind_spins {
        pre.spin_active = true; // no effect while already spinning
    }
    pre.chutes += chutes_gained;
    let player = player_step(&pre, input, now, cfg);

    // ── 6. Background scroll ─────────────────────────────────────────────────
    let scroll = (state.scroll + cfg.scroll_speed).rem_euclid(cfg.height);

    GameState {
        player,
        obstacles,
        spawner,
        now,
        scroll,
        ..state.clone()
    }
}
