//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands. The fixed game space is scaled to
//! whatever terminal is available: every cell between the HUD row and the
//! hint row holds two stacked pixels (the `▀` half block), and the game
//! space is fit into that canvas, letterboxed on black.

use std::io::Write;
use std::time::Duration;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use updraft::compute::player_sprite;
use updraft::entities::{GameState, GameStatus, ObstacleKind, Variant};
use updraft::sprite::{Assets, Image, Rgb};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_TIME: Color = Color::Yellow;
const C_HUD_CHUTES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const BLACK: Rgb = Rgb(0, 0, 0);
const SKY_TOP: Rgb = Rgb(90, 160, 235);
const SKY_BOTTOM: Rgb = Rgb(190, 225, 250);
const FRAME_GREY: Rgb = Rgb(70, 75, 85);

/// Cloud anchor centers within one screen-tall background tile.
const CLOUD_SPOTS: &[(i32, i32)] = &[(90, 120), (360, 300), (180, 520), (420, 700)];

// ── Pixel canvas ──────────────────────────────────────────────────────────────

/// Row-major pixel grid, two pixels per terminal cell.
struct PixelBuf {
    w: i32,
    h: i32,
    px: Vec<Rgb>,
}

impl PixelBuf {
    fn new(w: i32, h: i32) -> PixelBuf {
        let w = w.max(0);
        let h = h.max(0);
        PixelBuf {
            w,
            h,
            px: vec![BLACK; (w * h) as usize],
        }
    }

    fn get(&self, x: i32, y: i32) -> Rgb {
        if x < 0 || y < 0 || x >= self.w || y >= self.h {
            return BLACK;
        }
        self.px[(y * self.w + x) as usize]
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && x < self.w && y < self.h {
            self.px[(y * self.w + x) as usize] = c;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.set(xx, yy, c);
            }
        }
    }

    /// Write the canvas as `▀` cells starting at terminal row `top_row`,
    /// changing colors only when a cell differs from its predecessor.
    fn flush_to<W: Write>(&self, out: &mut W, top_row: u16) -> std::io::Result<()> {
        for row in 0..self.h / 2 {
            out.queue(cursor::MoveTo(0, top_row + row as u16))?;
            let mut prev_fg: Option<Rgb> = None;
            let mut prev_bg: Option<Rgb> = None;
            for x in 0..self.w {
                let fg = self.get(x, row * 2);
                let bg = self.get(x, row * 2 + 1);
                if prev_fg != Some(fg) {
                    out.queue(style::SetForegroundColor(to_color(fg)))?;
                    prev_fg = Some(fg);
                }
                if prev_bg != Some(bg) {
                    out.queue(style::SetBackgroundColor(to_color(bg)))?;
                    prev_bg = Some(bg);
                }
                out.queue(Print('▀'))?;
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Mapping from game space to the pixel canvas: uniform scale, centered,
/// plus the canvas-space clip rectangle of the playfield.
struct Viewport {
    scale: f32,
    ox: i32,
    oy: i32,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Viewport {
    fn fit(buf_w: i32, buf_h: i32, game_w: i32, game_h: i32) -> Viewport {
        let scale = (buf_w as f32 / game_w as f32).min(buf_h as f32 / game_h as f32);
        let fw = (game_w as f32 * scale) as i32;
        let fh = (game_h as f32 * scale) as i32;
        let ox = (buf_w - fw) / 2;
        let oy = (buf_h - fh) / 2;
        Viewport {
            scale,
            ox,
            oy,
            x0: ox.max(0),
            y0: oy.max(0),
            x1: (ox + fw).min(buf_w),
            y1: (oy + fh).min(buf_h),
        }
    }
}

/// Blit `img` centered on game-space `(cx, cy)`, sampling nearest-neighbor
/// and clipping to the playfield rectangle.
fn draw_image(buf: &mut PixelBuf, vp: &Viewport, img: &Image, cx: i32, cy: i32) {
    let left = cx - img.w / 2;
    let top = cy - img.h / 2;
    let bx0 = vp.ox + (left as f32 * vp.scale).floor() as i32;
    let by0 = vp.oy + (top as f32 * vp.scale).floor() as i32;
    let bx1 = vp.ox + ((left + img.w) as f32 * vp.scale).ceil() as i32;
    let by1 = vp.oy + ((top + img.h) as f32 * vp.scale).ceil() as i32;
    for by in by0.max(vp.y0)..by1.min(vp.y1) {
        for bx in bx0.max(vp.x0)..bx1.min(vp.x1) {
            let gx = ((bx - vp.ox) as f32 + 0.5) / vp.scale;
            let gy = ((by - vp.oy) as f32 + 0.5) / vp.scale;
            let sx = (gx - left as f32).floor() as i32;
            let sy = (gy - top as f32).floor() as i32;
            if let Some(c) = img.get(sx, sy) {
                buf.set(bx, by, c);
            }
        }
    }
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_sky(buf: &mut PixelBuf, vp: &Viewport) {
    let span = (vp.y1 - vp.y0).max(1);
    for by in vp.y0..vp.y1 {
        let t = (by - vp.y0) as f32 / span as f32;
        let c = SKY_TOP.lerp(SKY_BOTTOM, t);
        for bx in vp.x0..vp.x1 {
            buf.set(bx, by, c);
        }
    }
}

/// Thin frame one pixel outside the playfield.
fn draw_border(buf: &mut PixelBuf, vp: &Viewport) {
    let w = vp.x1 - vp.x0 + 2;
    let h = vp.y1 - vp.y0 + 2;
    buf.fill_rect(vp.x0 - 1, vp.y0 - 1, w, 1, FRAME_GREY);
    buf.fill_rect(vp.x0 - 1, vp.y1, w, 1, FRAME_GREY);
    buf.fill_rect(vp.x0 - 1, vp.y0 - 1, 1, h, FRAME_GREY);
    buf.fill_rect(vp.x1, vp.y0 - 1, 1, h, FRAME_GREY);
}

/// Clouds scroll upward with modulo tiling over one screen height; each
/// anchor is drawn at its wrapped offset and both tile partners so a
/// stamp straddling the wrap seam shows on both edges.
fn draw_clouds(buf: &mut PixelBuf, vp: &Viewport, cloud: &Image, scroll: i32, game_h: i32) {
    for &(cx, cy) in CLOUD_SPOTS {
        let gy = (cy - scroll).rem_euclid(game_h);
        draw_image(buf, vp, cloud, cx, gy - game_h);
        draw_image(buf, vp, cloud, cx, gy);
        draw_image(buf, vp, cloud, cx, gy + game_h);
    }
}

fn obstacle_image<'a>(kind: &ObstacleKind, assets: &'a Assets) -> &'a Image {
    match kind {
        ObstacleKind::Plane => &assets.plane.image,
        ObstacleKind::Balloon => &assets.balloon.image,
        ObstacleKind::Wind => &assets.wind.image,
        ObstacleKind::Chute => &assets.chute.image,
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn fmt_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

    // Flight time on the left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(format!("Time {}", fmt_time(state.now))))?;

    // Variant tag in the centre
    let tag = match state.variant {
        Variant::Glide => "[ GLIDE ]",
        Variant::Traffic => "[ TRAFFIC ]",
        Variant::Tempest => "[ TEMPEST ]",
    };
    let tag_color = match state.variant {
        Variant::Glide => Color::Green,
        Variant::Traffic => Color::Yellow,
        Variant::Tempest => Color::Red,
    };
    let tx = (cols / 2).saturating_sub(tag.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(tag_color))?;
    out.queue(Print(tag))?;

    // Parachute stock on the right, only where ascent spends it
    if state.config.ascent_needs_chute {
        let text = format!("Chutes x{}", state.player.chutes);
        let rx = cols.saturating_sub(text.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_CHUTES))?;
        out.queue(Print(&text))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Drift   SPACE : Rise   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let time_line = format!("Flight time: {}", fmt_time(state.now));
    let best_line = format!("Session best: {}", fmt_time(state.best_time.max(state.now)));
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&time_line, Color::Yellow),
        (&best_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, assets: &Assets) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let field_rows = rows.saturating_sub(2).max(1);
    let mut buf = PixelBuf::new(cols as i32, field_rows as i32 * 2);
    let vp = Viewport::fit(buf.w, buf.h, state.config.width, state.config.height);

    draw_sky(&mut buf, &vp);
    draw_clouds(&mut buf, &vp, &assets.cloud, state.scroll, state.config.height);
    draw_border(&mut buf, &vp);

    for ob in &state.obstacles {
        draw_image(&mut buf, &vp, obstacle_image(&ob.kind, assets), ob.x, ob.y);
    }
    let psprite = player_sprite(&state.player, assets);
    draw_image(&mut buf, &vp, &psprite.image, state.player.x, state.player.y);

    buf.flush_to(out, 1)?;
    draw_hud(out, state, cols)?;
    draw_controls_hint(out, rows)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
