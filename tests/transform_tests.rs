// tests/transform_tests.rs

use dungeon_mapper::spatial::{continuous_to_cell, Projection};
use dungeon_mapper::{Camera, CellCoord, EditorConfig};
use macroquad::prelude::{vec2, Vec2};

const CAMERAS: [(f32, f32); 6] = [
    (-7.5, -7.5),
    (0.0, 0.0),
    (1.25, -3.75),
    (-123.456, 78.9),
    (0.999, -0.001),
    (-1000.3, -999.7),
];

fn zooms() -> impl Iterator<Item = f32> {
    (0..=27).map(|i| 0.15 + i as f32 * 0.05)
}

#[test]
fn continuous_to_cell_floors_on_both_sides_of_zero() {
    let mut v = -5.0f32;
    while v < 5.0 {
        let cell = continuous_to_cell(vec2(v, -v));
        assert_eq!(cell, CellCoord::new(v.floor() as i32, (-v).floor() as i32), "at {v}");
        v += 0.125;
    }
    assert_eq!(continuous_to_cell(vec2(-0.5, -0.5)), CellCoord::new(-1, -1));
}

#[test]
fn screen_round_trip_stays_within_one_pixel() {
    for (cx, cy) in CAMERAS {
        for zoom in zooms() {
            let proj = Projection {
                camera: vec2(cx, cy),
                zoom,
                base_cell_px: 40.0,
            };
            for px in (0..600).step_by(37) {
                for py in (0..600).step_by(41) {
                    let p = vec2(px as f32, py as f32);
                    let back = proj.continuous_to_screen(proj.screen_to_continuous(p));
                    let err = (back - p).abs();
                    assert!(
                        err.x <= 1.0 && err.y <= 1.0,
                        "{p:?} -> {back:?} at camera ({cx}, {cy}) zoom {zoom}"
                    );
                }
            }
        }
    }
}

#[test]
fn visible_range_covers_every_intersecting_cell() {
    let viewport = vec2(600.0, 600.0);
    for (cx, cy) in CAMERAS {
        for zoom in zooms() {
            let mut cam = Camera::new(&EditorConfig::default());
            assert!(cam.set_position(vec2(cx, cy)));
            assert!(cam.set_zoom(zoom));
            let proj = cam.projection();
            let range = cam.visible_cell_range(viewport);

            let span = (viewport / proj.scale()).ceil();
            let x0 = cx.floor() as i32 - 4;
            let y0 = cy.floor() as i32 - 4;
            for x in x0..=x0 + span.x as i32 + 8 {
                for y in y0..=y0 + span.y as i32 + 8 {
                    let cell = CellCoord::new(x, y);
                    let r = proj.cell_rect(cell);
                    let hits = r.x < viewport.x && r.x + r.w > 0.0 && r.y < viewport.y && r.y + r.h > 0.0;
                    if hits {
                        assert!(
                            range.contains(cell),
                            "{cell} visible but outside {range:?} at camera ({cx}, {cy}) zoom {zoom}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn cell_rect_starts_at_floored_screen_position() {
    let proj = Projection {
        camera: Vec2::new(-0.25, 0.5),
        zoom: 0.75,
        base_cell_px: 40.0,
    };
    let r = proj.cell_rect(CellCoord::new(-1, 2));
    // (-1 + 0.25) * 30 = -22.5, (2 - 0.5) * 30 = 45
    assert_eq!((r.x, r.y), (-23.0, 45.0));
    assert_eq!((r.w, r.h), (31.0, 31.0));
}

#[test]
fn visible_range_covers_sub_pixel_cells() {
    // two-pixel cells at minimum zoom are 0.3px wide but drawn 2px wide
    let cfg = EditorConfig::from_json(r#"{ "base_cell_px": 2.0 }"#).expect("valid config");
    let viewport = vec2(30.0, 30.0);
    for (cx, cy) in [(0.0, 0.0), (-0.5, 0.25), (13.7, -42.1)] {
        let mut cam = Camera::new(&cfg);
        assert!(cam.set_position(vec2(cx, cy)));
        assert!(cam.set_zoom(0.15));
        let proj = cam.projection();
        let range = cam.visible_cell_range(viewport);

        let x0 = cx.floor() as i32 - 20;
        let y0 = cy.floor() as i32 - 20;
        for x in x0..=x0 + 140 {
            for y in y0..=y0 + 140 {
                let cell = CellCoord::new(x, y);
                let r = proj.cell_rect(cell);
                let hits = r.x < viewport.x && r.x + r.w > 0.0 && r.y < viewport.y && r.y + r.h > 0.0;
                if hits {
                    assert!(range.contains(cell), "{cell} drawn at {r:?} but outside {range:?}");
                }
            }
        }
    }
}
