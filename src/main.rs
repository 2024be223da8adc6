use anyhow::Context;
use dungeon_mapper::editor::{Key, Modifiers, PointerButton};
use dungeon_mapper::{Editor, EditorCommand, EditorConfig, FilePicker, TileKind};
use macroquad::prelude::*;

const CONFIG_FILE: &str = "dungeon_mapper.json";
const PALETTE_ROW_H: f32 = 44.0;
const PALETTE_TOP: f32 = 10.0;
const SWATCH: f32 = 28.0;
const BUTTON_H: f32 = 30.0;
const BUTTON_MARGIN: f32 = 10.0;

fn load_config() -> anyhow::Result<EditorConfig> {
    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_FILE.to_owned());
    EditorConfig::load(&path).with_context(|| format!("Loading editor config {path}"))
}

fn window_conf() -> Conf {
    let cfg = load_config().unwrap_or_default();
    let (w, h) = cfg.canvas_px();
    Conf {
        window_title: "Dungeon Mapper".into(),
        window_width: w as i32 + cfg.palette_width as i32,
        window_height: h as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn make_picker(cfg: &EditorConfig) -> Box<dyn FilePicker> {
    #[cfg(feature = "native-dialogs")]
    {
        Box::new(dungeon_mapper::editor::NativePicker::new(cfg.map_extension.clone()))
    }
    #[cfg(not(feature = "native-dialogs"))]
    {
        Box::new(dungeon_mapper::FixedPathPicker::new(&cfg.default_map_path))
    }
}

/// Save and Load buttons at the foot of the palette column.
fn button_rects(cfg: &EditorConfig) -> [Rect; 2] {
    let (cw, ch) = cfg.canvas_px();
    let w = cfg.palette_width as f32 - 2.0 * BUTTON_MARGIN;
    let x = cw + BUTTON_MARGIN;
    [
        Rect::new(x, ch - 2.0 * (BUTTON_H + BUTTON_MARGIN), w, BUTTON_H),
        Rect::new(x, ch - (BUTTON_H + BUTTON_MARGIN), w, BUTTON_H),
    ]
}

fn palette_hit(cfg: &EditorConfig, mouse: Vec2) -> Option<TileKind> {
    let (cw, _) = cfg.canvas_px();
    if mouse.x < cw || mouse.y < PALETTE_TOP {
        return None;
    }
    let row = ((mouse.y - PALETTE_TOP) / PALETTE_ROW_H) as usize;
    TileKind::palette().get(row).copied()
}

fn modifiers() -> Modifiers {
    Modifiers {
        ctrl: is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper),
        shift: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
    }
}

fn handle_pointer(editor: &mut Editor, mouse: Vec2, last_mouse: Vec2) {
    let (cw, ch) = editor.config().canvas_px();
    let [save, load] = button_rects(editor.config());
    let palette_kind = palette_hit(editor.config(), mouse);
    let over_canvas = mouse.x >= 0.0 && mouse.y >= 0.0 && mouse.x < cw && mouse.y < ch;

    let buttons = [
        (MouseButton::Left, PointerButton::Primary),
        (MouseButton::Right, PointerButton::Secondary),
        (MouseButton::Middle, PointerButton::Middle),
    ];
    for (mq, button) in buttons {
        if is_mouse_button_pressed(mq) {
            if over_canvas {
                editor.on_pointer_down(mouse, button);
            } else if button == PointerButton::Primary {
                if save.contains(mouse) {
                    editor.dispatch(EditorCommand::Save);
                } else if load.contains(mouse) {
                    editor.dispatch(EditorCommand::Load);
                } else if let Some(kind) = palette_kind {
                    editor.dispatch(EditorCommand::SelectTile(kind));
                }
            }
        }
        if is_mouse_button_released(mq) {
            editor.on_pointer_up(mouse, button);
        }
    }

    if mouse != last_mouse && (over_canvas || editor.is_dragging()) {
        editor.on_pointer_drag(mouse);
    }

    let (_, wheel) = mouse_wheel();
    if wheel != 0.0 && over_canvas {
        editor.on_scroll(mouse, wheel.signum());
    }
}

fn handle_keys(editor: &mut Editor) {
    let mods = modifiers();

    if editor.note_editor().is_some() {
        while let Some(c) = get_char_pressed() {
            if !c.is_control() {
                editor.on_key(Key::Char(c), mods);
            }
        }
        for (code, key) in [
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Escape, Key::Escape),
        ] {
            if is_key_pressed(code) {
                editor.on_key(key, mods);
            }
        }
        return;
    }

    if mods.ctrl {
        for (code, c) in [(KeyCode::S, 's'), (KeyCode::L, 'l')] {
            if is_key_pressed(code) {
                editor.on_key(Key::Char(c), mods);
            }
        }
        while get_char_pressed().is_some() {}
        return;
    }

    // held keys pan every frame
    for (code, key) in [
        (KeyCode::Left, Key::Left),
        (KeyCode::A, Key::Left),
        (KeyCode::Right, Key::Right),
        (KeyCode::D, Key::Right),
        (KeyCode::Up, Key::Up),
        (KeyCode::W, Key::Up),
        (KeyCode::Down, Key::Down),
        (KeyCode::S, Key::Down),
    ] {
        if is_key_down(code) {
            editor.on_key(key, mods);
        }
    }
    if is_key_pressed(KeyCode::Space) {
        editor.on_key(Key::Space, mods);
    }
    while let Some(c) = get_char_pressed() {
        match c {
            '+' | '=' => editor.on_key(Key::ZoomIn, mods),
            '-' => editor.on_key(Key::ZoomOut, mods),
            c if c.is_ascii_digit() => editor.on_key(Key::Char(c), mods),
            _ => {}
        }
    }
}

fn draw_canvas(editor: &Editor, mouse: Vec2) {
    let cfg = editor.config();
    let (cw, ch) = cfg.canvas_px();
    let viewport = vec2(cw, ch);

    draw_rectangle(0.0, 0.0, cw, ch, BLACK);

    for tile in editor.render_frame(viewport) {
        let r = tile.rect;
        draw_rectangle(r.x, r.y, r.w, r.h, tile.kind.color());
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, GRAY);
    }

    let marker = TileKind::NoteMarker.color();
    for (_, r) in editor.render_notes(viewport) {
        let s = (r.w / 4.0).max(3.0);
        draw_triangle(
            vec2(r.x + r.w - 1.0 - s, r.y),
            vec2(r.x + r.w - 1.0, r.y),
            vec2(r.x + r.w - 1.0, r.y + s),
            marker,
        );
    }

    let origin = editor.camera().projection().continuous_to_screen(Vec2::ZERO);
    draw_line(origin.x, 0.0, origin.x, ch, 2.0, WHITE);
    draw_line(0.0, origin.y, cw, origin.y, 2.0, WHITE);

    if mouse.x < cw && mouse.y < ch {
        let cell = editor.hovered_cell(mouse);
        let label = format!("{cell}");
        let dims = measure_text(&label, None, 24, 1.0);
        draw_rectangle(10.0, 10.0, dims.width + 10.0, dims.height + 8.0, BLACK);
        draw_text(&label, 15.0, 12.0 + dims.height, 24.0, WHITE);

        if editor.note_editor().is_none() {
            if let Some(text) = editor.notes().get_note(cell) {
                let dims = measure_text(text, None, 20, 1.0);
                draw_rectangle(mouse.x + 12.0, mouse.y, dims.width + 10.0, dims.height + 8.0, DARKGRAY);
                draw_text(text, mouse.x + 17.0, mouse.y + 4.0 + dims.height, 20.0, WHITE);
            }
        }
    }

    if let Some(note) = editor.note_editor() {
        let w = cw * 0.8;
        let x = (cw - w) / 2.0;
        let y = ch / 2.0 - 40.0;
        draw_rectangle(x, y, w, 80.0, Color::from_rgba(20, 20, 20, 230));
        draw_rectangle_lines(x, y, w, 80.0, 2.0, marker);
        draw_text(&format!("Note at {}", note.cell), x + 10.0, y + 22.0, 20.0, marker);
        draw_text(&format!("{}_", note.buffer), x + 10.0, y + 50.0, 22.0, WHITE);
        draw_text("Enter: save   Esc: cancel", x + 10.0, y + 72.0, 16.0, GRAY);
    }

    if let Some(status) = editor.status() {
        let dims = measure_text(status, None, 22, 1.0);
        draw_rectangle(10.0, ch - dims.height - 22.0, dims.width + 10.0, dims.height + 10.0, BLACK);
        draw_text(status, 15.0, ch - 17.0, 22.0, YELLOW);
    }
}

fn draw_palette(editor: &Editor, mouse: Vec2) {
    let cfg = editor.config();
    let (cw, ch) = cfg.canvas_px();
    draw_rectangle(cw, 0.0, cfg.palette_width as f32, ch, DARKGRAY);

    for (i, kind) in TileKind::palette().iter().enumerate() {
        let y = PALETTE_TOP + i as f32 * PALETTE_ROW_H;
        let x = cw + 8.0;
        draw_rectangle(x, y, SWATCH, SWATCH, kind.color());
        if *kind == editor.selected() {
            draw_rectangle_lines(x - 3.0, y - 3.0, SWATCH + 6.0, SWATCH + 6.0, 3.0, WHITE);
        }
        draw_text(kind.name(), x + SWATCH + 6.0, y + 14.0, 18.0, WHITE);
        if let Some(key) = kind.hotkey() {
            draw_text(&format!("Key: {key}"), x + SWATCH + 6.0, y + 28.0, 16.0, LIGHTGRAY);
        }
    }

    for (rect, label) in button_rects(cfg).into_iter().zip(["Save", "Load"]) {
        let fill = if rect.contains(mouse) { GRAY } else { BLACK };
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, fill);
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, WHITE);
        draw_text(label, rect.x + 10.0, rect.y + 21.0, 22.0, WHITE);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("{e:#}");
            return;
        }
    };
    let picker = make_picker(&config);
    let mut editor = Editor::new(config, picker);

    let mut last_mouse = Vec2::from(mouse_position());
    loop {
        let mouse = Vec2::from(mouse_position());

        handle_pointer(&mut editor, mouse, last_mouse);
        handle_keys(&mut editor);
        editor.tick();

        clear_background(BLACK);
        draw_canvas(&editor, mouse);
        draw_palette(&editor, mouse);

        last_mouse = mouse;
        next_frame().await;
    }
}
