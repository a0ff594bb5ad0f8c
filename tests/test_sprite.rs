use updraft::sprite::*;

// ── Image parsing ─────────────────────────────────────────────────────────────

#[test]
fn from_art_reads_colors_and_gaps() {
    let img = Image::from_art(&["ko", ".s"]);
    assert_eq!(img.w, 2);
    assert_eq!(img.h, 2);
    assert!(img.get(0, 0).is_some());
    assert!(img.get(1, 0).is_some());
    assert!(img.get(0, 1).is_none()); // '.' is transparent
    assert!(img.get(1, 1).is_some());
    assert_ne!(img.get(0, 0), img.get(1, 1)); // different letters, different colors
}

#[test]
fn from_art_pads_short_rows() {
    let img = Image::from_art(&["ooo", "o"]);
    assert_eq!(img.w, 3); // widest row wins
    assert_eq!(img.h, 2);
    assert!(img.get(0, 1).is_some());
    assert!(img.get(1, 1).is_none()); // padded with transparency
    assert!(img.get(2, 1).is_none());
}

#[test]
fn image_get_out_of_bounds_is_none() {
    let img = Image::from_art(&["oo", "oo"]);
    assert!(img.get(-1, 0).is_none());
    assert!(img.get(0, -1).is_none());
    assert!(img.get(2, 0).is_none());
    assert!(img.get(0, 2).is_none());
}

// ── Scaling ───────────────────────────────────────────────────────────────────

#[test]
fn scaled_expands_in_blocks() {
    let img = Image::from_art(&["o."]).scaled(4);
    assert_eq!(img.w, 8);
    assert_eq!(img.h, 4);
    assert!(img.get(0, 0).is_some());
    assert!(img.get(3, 3).is_some()); // still inside the 'o' block
    assert!(img.get(4, 0).is_none()); // first column of the '.' block
    assert!(img.get(7, 3).is_none());
}

// ── Rotation ──────────────────────────────────────────────────────────────────

#[test]
fn rotated_zero_is_identity() {
    let img = Image::from_art(&["ko.", ".s."]);
    let r = img.rotated(0);
    assert_eq!(r.w, img.w);
    assert_eq!(r.h, img.h);
    for y in 0..img.h {
        for x in 0..img.w {
            assert_eq!(r.get(x, y), img.get(x, y));
        }
    }
}

#[test]
fn rotated_quarter_turn_is_counter_clockwise() {
    // A lone marker on the right edge must end up in the top half
    let img = Image::from_art(&["...", "..o", "..."]);
    let r = img.rotated(90);

    let mut found = Vec::new();
    for y in 0..r.h {
        for x in 0..r.w {
            if r.get(x, y).is_some() {
                found.push((x, y));
            }
        }
    }
    assert_eq!(found.len(), 1); // rotation preserves the single pixel
    let (_, y) = found[0];
    assert!(y < r.h / 2, "marker at y {} of {} is not in the top half", y, r.h);
}

#[test]
fn rotated_diagonal_enlarges_canvas() {
    let rows = [
        "oooooooooo",
        "oooooooooo",
        "oooooooooo",
        "oooooooooo",
        "oooooooooo",
        "oooooooooo",
        "oooooooooo",
        "oooooooooo",
        "oooooooooo",
        "oooooooooo",
    ];
    let img = Image::from_art(&rows);
    let r = img.rotated(45);
    assert_eq!(r.w, 15); // ceil(10 * sqrt(2))
    assert_eq!(r.h, 15);
    assert!(r.get(0, 0).is_none()); // corners fall outside the diamond
    assert!(r.get(14, 14).is_none());
    assert!(r.get(7, 7).is_some()); // center survives
}

#[test]
fn every_spin_angle_renders() {
    // The spin cycles through every multiple of 5°; each one must keep
    // at least one solid pixel or the player would vanish mid-spin.
    let freefall = Assets::load().freefall.image;
    for deg in (5..360).step_by(5) {
        let r = freefall.rotated(deg);
        let m = Mask::from_image(&r);
        let any = (0..m.h).any(|y| (0..m.w).any(|x| m.solid(x, y)));
        assert!(any, "angle {} rendered an empty image", deg);
    }
}

// ── Masks & overlap ───────────────────────────────────────────────────────────

#[test]
fn mask_tracks_opacity() {
    let m = Mask::from_image(&Image::from_art(&["o.", ".o"]));
    assert!(m.solid(0, 0));
    assert!(!m.solid(1, 0));
    assert!(!m.solid(0, 1));
    assert!(m.solid(1, 1));
    assert!(!m.solid(-1, 0)); // out of bounds is never solid
    assert!(!m.solid(2, 0));
}

#[test]
fn overlap_requires_shared_solid_pixel() {
    let a = Mask::from_image(&Image::from_art(&["o.", ".."]));
    let b = Mask::from_image(&Image::from_art(&[".o", ".."]));
    // Boxes coincide but the solids sit on different columns
    assert!(!a.overlap(&b, 0, 0));
    // Shift b one left and its solid lands on ours
    assert!(a.overlap(&b, -1, 0));
}

#[test]
fn overlap_window_boundaries() {
    let rows = ["oooo", "oooo", "oooo", "oooo"];
    let a = Mask::from_image(&Image::from_art(&rows));
    let b = Mask::from_image(&Image::from_art(&rows));
    assert!(a.overlap(&b, 3, 0)); // one-column window
    assert!(!a.overlap(&b, 4, 0)); // empty window
    assert!(a.overlap(&b, -3, 0));
    assert!(!a.overlap(&b, -4, 0));
    assert!(a.overlap(&b, 0, 3));
    assert!(!a.overlap(&b, 0, 4));
}

#[test]
fn masks_collide_uses_centers() {
    let rows = ["oooo", "oooo", "oooo", "oooo"];
    let a = Mask::from_image(&Image::from_art(&rows));
    let b = Mask::from_image(&Image::from_art(&rows));
    assert!(masks_collide(&a, 10, 10, &b, 13, 10)); // 3 apart: touching
    assert!(!masks_collide(&a, 10, 10, &b, 14, 10)); // 4 apart: clear
}

#[test]
fn masks_collide_misses_through_gap() {
    // Bounding boxes fully overlap, but the solid pixels never meet
    let a = Mask::from_image(&Image::from_art(&["o.", ".."]));
    let b = Mask::from_image(&Image::from_art(&["..", ".o"]));
    assert!(!masks_collide(&a, 5, 5, &b, 5, 5));
}

// ── Built-in assets ───────────────────────────────────────────────────────────

#[test]
fn assets_scale_matches_art_grids() {
    let a = Assets::load();
    assert_eq!((a.freefall.image.w, a.freefall.image.h), (11 * IMAGE_SCALE, 9 * IMAGE_SCALE));
    assert_eq!((a.parachute.image.w, a.parachute.image.h), (13 * IMAGE_SCALE, 12 * IMAGE_SCALE));
    assert_eq!((a.plane.image.w, a.plane.image.h), (17 * IMAGE_SCALE, 7 * IMAGE_SCALE));
    assert_eq!((a.balloon.image.w, a.balloon.image.h), (9 * IMAGE_SCALE, 13 * IMAGE_SCALE));
    assert_eq!((a.wind.image.w, a.wind.image.h), (13 * IMAGE_SCALE, 4 * IMAGE_SCALE));
    assert_eq!((a.chute.image.w, a.chute.image.h), (7 * IMAGE_SCALE, 8 * IMAGE_SCALE));
    assert_eq!((a.cloud.w, a.cloud.h), (16 * IMAGE_SCALE, 6 * IMAGE_SCALE));
}

#[test]
fn assets_center_pixels_are_solid() {
    // Dead-center contact must always register, whatever the art edges do
    let a = Assets::load();
    for (name, m) in [
        ("freefall", &a.freefall.mask),
        ("plane", &a.plane.mask),
        ("balloon", &a.balloon.mask),
        ("wind", &a.wind.mask),
        ("chute", &a.chute.mask),
    ] {
        assert!(m.solid(m.w / 2, m.h / 2), "{} center is transparent", name);
    }
    // The canopy has gaps at its center; just confirm it is not empty
    let p = &a.parachute.mask;
    assert!((0..p.h).any(|y| (0..p.w).any(|x| p.solid(x, y))));
}

// ── Color ─────────────────────────────────────────────────────────────────────

#[test]
fn rgb_lerp_blends() {
    let from = Rgb(0, 0, 0);
    let to = Rgb(100, 200, 50);
    assert_eq!(from.lerp(to, 0.0), Rgb(0, 0, 0));
    assert_eq!(from.lerp(to, 1.0), Rgb(100, 200, 50));
    assert_eq!(from.lerp(to, 0.5), Rgb(50, 100, 25));
}
