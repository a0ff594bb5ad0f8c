//! Sprite geometry: images, occupancy masks, and the built-in pixel art.
//!
//! Images are small char-grid constants parsed at startup, scaled up
//! nearest-neighbor, and turned into per-pixel masks. Collision is mask
//! against mask: an axis-aligned bounding pre-filter followed by a scan of
//! the overlap window, so two shapes collide only if a solid pixel of one
//! lands on a solid pixel of the other.

/// Integer upscale applied to every art grid at load time.
pub const IMAGE_SCALE: i32 = 4;

// ── Color ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Linear blend toward `other`; `t` in `0.0..=1.0`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Rgb(ch(self.0, other.0), ch(self.1, other.1), ch(self.2, other.2))
    }
}

// ── Image ─────────────────────────────────────────────────────────────────────

/// A rectangular pixel grid; `None` pixels are transparent.
#[derive(Clone, Debug)]
pub struct Image {
    pub w: i32,
    pub h: i32,
    px: Vec<Option<Rgb>>,
}

impl Image {
    pub fn new(w: i32, h: i32) -> Image {
        let w = w.max(0);
        let h = h.max(0);
        Image {
            w,
            h,
            px: vec![None; (w * h) as usize],
        }
    }

    /// Parse a char-grid art constant. Rows shorter than the widest row
    /// pad with transparency, so the parser is total.
    pub fn from_art(rows: &[&str]) -> Image {
        let w = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut img = Image::new(w, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                img.set(x as i32, y as i32, art_color(c));
            }
        }
        img
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= self.w || y >= self.h {
            return None;
        }
        self.px[(y * self.w + x) as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, c: Option<Rgb>) {
        if x >= 0 && y >= 0 && x < self.w && y < self.h {
            self.px[(y * self.w + x) as usize] = c;
        }
    }

    /// Nearest-neighbor integer upscale.
    pub fn scaled(&self, factor: i32) -> Image {
        let mut out = Image::new(self.w * factor, self.h * factor);
        for y in 0..out.h {
            for x in 0..out.w {
                out.set(x, y, self.get(x / factor, y / factor));
            }
        }
        out
    }

    /// Rotate counter-clockwise by whole degrees onto an enlarged canvas
    /// (`w' = ⌈|w·cosθ| + |h·sinθ|⌉`, likewise `h'`), sampling
    /// nearest-neighbor through the inverse rotation about the center.
    /// Pixels that fall outside the source are transparent.
    pub fn rotated(&self, degrees: i32) -> Image {
        let rad = (degrees as f32).to_radians();
        let (sin, cos) = rad.sin_cos();
        let (w, h) = (self.w as f32, self.h as f32);
        let nw = (w * cos.abs() + h * sin.abs()).ceil() as i32;
        let nh = (w * sin.abs() + h * cos.abs()).ceil() as i32;
        let (cx, cy) = (w / 2.0, h / 2.0);
        let (ncx, ncy) = (nw as f32 / 2.0, nh as f32 / 2.0);

        let mut out = Image::new(nw, nh);
        for y in 0..nh {
            for x in 0..nw {
                let dx = x as f32 + 0.5 - ncx;
                let dy = y as f32 + 0.5 - ncy;
                let sx = (cx + dx * cos - dy * sin).floor() as i32;
                let sy = (cy + dx * sin + dy * cos).floor() as i32;
                out.set(x, y, self.get(sx, sy));
            }
        }
        out
    }
}

// ── Mask ──────────────────────────────────────────────────────────────────────

/// Per-pixel occupancy derived from an image: solid wherever the image
/// has a color. The authoritative collision shape.
#[derive(Clone, Debug)]
pub struct Mask {
    pub w: i32,
    pub h: i32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_image(img: &Image) -> Mask {
        let mut bits = Vec::with_capacity((img.w * img.h) as usize);
        for y in 0..img.h {
            for x in 0..img.w {
                bits.push(img.get(x, y).is_some());
            }
        }
        Mask {
            w: img.w,
            h: img.h,
            bits,
        }
    }

    pub fn solid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.w && y < self.h && self.bits[(y * self.w + x) as usize]
    }

    /// True if any solid pixel of `other`, placed with its top-left at
    /// `(dx, dy)` relative to ours, lands on a solid pixel of ours. The
    /// bounding-window intersection is computed first; only that window
    /// is scanned.
    pub fn overlap(&self, other: &Mask, dx: i32, dy: i32) -> bool {
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.w).min(self.w);
        let y1 = (dy + other.h).min(self.h);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                if self.solid(x, y) && other.solid(x - dx, y - dy) {
                    return true;
                }
            }
        }
        false
    }
}

/// Mask collision between two entities given their center positions.
pub fn masks_collide(a: &Mask, ax: i32, ay: i32, b: &Mask, bx: i32, by: i32) -> bool {
    let dx = (bx - b.w / 2) - (ax - a.w / 2);
    let dy = (by - b.h / 2) - (ay - a.h / 2);
    a.overlap(b, dx, dy)
}

// ── Sprite & assets ───────────────────────────────────────────────────────────

/// An image paired with its derived mask.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub image: Image,
    pub mask: Mask,
}

impl Sprite {
    pub fn new(image: Image) -> Sprite {
        let mask = Mask::from_image(&image);
        Sprite { image, mask }
    }
}

/// Every sprite the game draws, built once at startup from the art
/// constants below and immutable afterwards.
pub struct Assets {
    pub freefall: Sprite,
    pub parachute: Sprite,
    pub plane: Sprite,
    pub balloon: Sprite,
    pub wind: Sprite,
    pub chute: Sprite,
    /// Background stamp only; never collides, so no mask.
    pub cloud: Image,
}

impl Assets {
    pub fn load() -> Assets {
        let sprite = |art: &[&str]| Sprite::new(Image::from_art(art).scaled(IMAGE_SCALE));
        Assets {
            freefall: sprite(FREEFALL),
            parachute: sprite(PARACHUTE),
            plane: sprite(PLANE),
            balloon: sprite(BALLOON),
            wind: sprite(WIND),
            chute: sprite(CHUTE),
            cloud: Image::from_art(CLOUD).scaled(IMAGE_SCALE),
        }
    }
}

// ── Art ───────────────────────────────────────────────────────────────────────

fn art_color(c: char) -> Option<Rgb> {
    match c {
        'k' => Some(Rgb(45, 45, 55)),    // dark trim
        'o' => Some(Rgb(235, 120, 40)),  // jumpsuit
        's' => Some(Rgb(240, 200, 160)), // skin
        'w' => Some(Rgb(250, 250, 250)), // white
        'r' => Some(Rgb(205, 60, 50)),   // red
        'y' => Some(Rgb(240, 205, 70)),  // yellow
        'b' => Some(Rgb(110, 180, 230)), // canopy glass
        'g' => Some(Rgb(160, 165, 175)), // hull
        'G' => Some(Rgb(95, 100, 110)),  // hull shadow
        'n' => Some(Rgb(150, 105, 60)),  // wicker
        'c' => Some(Rgb(215, 240, 250)), // gust
        _ => None,
    }
}

/// Skydiver, arms and legs spread.
const FREEFALL: &[&str] = &[
    "....sss....",
    "....sss....",
    "kk...o...kk",
    ".kk.ooo.kk.",
    "..ooooooo..",
    "...ooooo...",
    "...oo.oo...",
    "..oo...oo..",
    ".kk.....kk.",
];

/// Skydiver under a striped canopy.
const PARACHUTE: &[&str] = &[
    "....rrwrr....",
    "..rrwwrwwrr..",
    ".rrwwwrwwwrr.",
    "rrwwwwrwwwwrr",
    "k...k...k...k",
    ".k..k...k..k.",
    "..k.k...k.k..",
    "...kk...kk...",
    "....ksssk....",
    "....ooooo....",
    "....oo.oo....",
    "....k...k....",
];

/// Prop plane, nose left (it flies right-to-left).
const PLANE: &[&str] = &[
    ".............gg..",
    ".............gg..",
    "...bb........ggg.",
    "wggggggggggggggg.",
    "wggggggggggggggg.",
    "...GGGG..........",
    ".....GG..........",
];

/// Hot-air balloon with a wicker basket.
const BALLOON: &[&str] = &[
    "..rryrr..",
    ".rryyyrr.",
    "rryyyyyrr",
    "rryyyyyrr",
    "rryyyyyrr",
    ".rryyyrr.",
    "..rryrr..",
    "...rrr...",
    "....r....",
    "...k.k...",
    "...k.k...",
    "...nnn...",
    "...nnn...",
];

/// Wind gust: three broken streaks.
const WIND: &[&str] = &[
    "cccccccc.....",
    "...ccccccccc.",
    ".cccccccc..cc",
    "....cccccc...",
];

/// Packed parachute pickup.
const CHUTE: &[&str] = &[
    ".rwwwr.",
    "rwwwwwr",
    "rrwwwrr",
    ".kkkkk.",
    "..kkk..",
    "..ooo..",
    "..ooo..",
    "...o...",
];

/// Background cloud stamp.
const CLOUD: &[&str] = &[
    "....wwwwww......",
    "..wwwwwwwwww....",
    ".wwwwwwwwwwwww..",
    "wwwwwwwwwwwwwwww",
    ".wwwwwwwwwwwww..",
    "...wwwwwww......",
];
