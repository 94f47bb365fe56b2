//! Software-rendered window using `minifb`.
//!
//! The camera panel draws bone lines in blue and joint dots in red over
//! a black video area.  Around it sit the translation panel, the
//! history list, a model-loading progress bar, a status line, and the
//! key legend.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use time::format_description::FormatItem;
use time::macros::format_description;

use hand_stream::skeleton::HAND_BONES;
use hand_stream::LandmarkSet;
use sign_session::{CurrentLabel, DetectionState, FrameUpdate, RenderSink};

use crate::sim::SimPose;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 1000;
pub const WIN_H: usize = 600;

const CAM_X: usize = 10;
const CAM_Y: usize = 40;
const CAM_W: usize = 640;
const CAM_H: usize = 480;

const SIDE_X: usize = 660;
const SIDE_W: usize = WIN_W - SIDE_X - 10;
const LABEL_Y: usize = 40;
const LABEL_H: usize = 150;
const HIST_Y: usize = 200;
const HIST_H: usize = 320;

const STATUS_Y: usize = 532;
const LEGEND_Y: usize = WIN_H - 18;

// Tailwind-flavored palette.
const BG: u32 = 0xFFF3F4F6;
const PANEL: u32 = 0xFFFFFFFF;
const PANEL_EDGE: u32 = 0xFFE5E7EB;
const CAM_BG: u32 = 0xFF000000;
const CAM_OFF_BG: u32 = 0xFF111827;
const BONE_COLOR: u32 = 0xFF3B82F6;
const JOINT_COLOR: u32 = 0xFFEF4444;
const TEXT: u32 = 0xFF1F2937;
const TEXT_DIM: u32 = 0xFF6B7280;
const TEXT_LIGHT: u32 = 0xFFD1D5DB;
const ACCENT: u32 = 0xFF2563EB;
const LETTER_BG: u32 = 0xFFEFF6FF;
const LETTER_FG: u32 = 0xFF1E40AF;
const OK_DOT: u32 = 0xFF22C55E;
const OFF_DOT: u32 = 0xFFEF4444;

const TIME_FMT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

// ════════════════════════════════════════════════════════════════════════════
// UiEvent
// ════════════════════════════════════════════════════════════════════════════

/// One translated keyboard action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    ToggleCamera,
    ToggleDetection,
    Restart,
    Speak,
    ClearLabel,
    ClearHistory,
    SetPose(SimPose),
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    /// Caption describing the simulated hand, shown in the status bar.
    pose_caption: String,
}

impl Visualizer {
    pub fn new() -> Result<Self, String> {
        let mut window = Window::new(
            "Sign Language Translator",
            WIN_W,
            WIN_H,
            WindowOptions { resize: false, ..WindowOptions::default() },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG; WIN_W * WIN_H],
            pose_caption: String::new(),
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn set_pose_caption(&mut self, caption: &str) {
        self.pose_caption = caption.to_string();
    }

    /// Poll keyboard input and translate to [`UiEvent`]s.
    pub fn poll_input(&mut self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if pressed(Key::Q) {
            events.push(UiEvent::Quit);
        }
        if pressed(Key::C) {
            events.push(UiEvent::ToggleCamera);
        }
        if pressed(Key::P) {
            events.push(UiEvent::ToggleDetection);
        }
        if pressed(Key::R) {
            events.push(UiEvent::Restart);
        }
        if pressed(Key::S) {
            events.push(UiEvent::Speak);
        }
        if pressed(Key::X) {
            events.push(UiEvent::ClearLabel);
        }
        if pressed(Key::H) {
            events.push(UiEvent::ClearHistory);
        }

        let poses = [
            (Key::Key1, SimPose::LetterA),
            (Key::Key2, SimPose::LetterB),
            (Key::Key3, SimPose::LetterC),
            (Key::Key4, SimPose::LetterL),
            (Key::Key5, SimPose::LetterO),
            (Key::Key9, SimPose::OpenSpread),
            (Key::Key0, SimPose::Absent),
        ];
        for (key, sim_pose) in poses {
            if pressed(key) {
                events.push(UiEvent::SetPose(sim_pose));
            }
        }

        events
    }

    /// Render one frame from a scheduler snapshot.
    pub fn render(&mut self, update: &FrameUpdate) {
        self.buf.fill(BG);

        self.draw_header();
        self.draw_camera_panel(update);
        self.draw_label_panel(&update.label);
        self.draw_history_panel(update);
        self.draw_status_bar(update);
        self.draw_label_text(
            "1-5=pose A/B/C/L/O  9=open hand  0=no hand  C=camera  P=pause  R=restart  S=speak  X=clear  H=clear history  Q=quit",
            CAM_X,
            LEGEND_Y,
            1,
            TEXT_DIM,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── panels ────────────────────────────────────────────────────────────

    fn draw_header(&mut self) {
        self.draw_label_text("SIGN LANGUAGE TRANSLATOR", CAM_X, 12, 2, ACCENT);
    }

    fn draw_camera_panel(&mut self, update: &FrameUpdate) {
        let sampling = update.state.is_sampling();
        self.fill_rect(CAM_X, CAM_Y, CAM_W, CAM_H, if sampling { CAM_BG } else { CAM_OFF_BG });
        self.draw_border(CAM_X, CAM_Y, CAM_W, CAM_H, PANEL_EDGE);

        if sampling {
            if let Some(set) = &update.landmarks {
                self.draw_skeleton(set);
            }
        } else {
            self.draw_label_text("CAMERA OFF", CAM_X + CAM_W / 2 - 60, CAM_Y + CAM_H / 2 - 10, 3, TEXT_LIGHT);
            self.draw_label_text(
                "press C to turn the camera on",
                CAM_X + CAM_W / 2 - 120,
                CAM_Y + CAM_H / 2 + 24,
                2,
                TEXT_DIM,
            );
        }

        if let DetectionState::ModelLoading { percent } = update.state {
            self.draw_progress_bar(percent);
        }
    }

    /// Bones first, then joint dots on top.
    fn draw_skeleton(&mut self, set: &LandmarkSet) {
        for (from, to) in HAND_BONES {
            let a = set.point(from);
            let b = set.point(to);
            self.draw_line(
                CAM_X as f32 + a.x,
                CAM_Y as f32 + a.y,
                CAM_X as f32 + b.x,
                CAM_Y as f32 + b.y,
                BONE_COLOR,
            );
        }
        for point in set.iter() {
            self.draw_dot(
                (CAM_X as f32 + point.x) as isize,
                (CAM_Y as f32 + point.y) as isize,
                4,
                JOINT_COLOR,
            );
        }
    }

    fn draw_progress_bar(&mut self, percent: u8) {
        let bar_y = CAM_Y + CAM_H - 24;
        let bar_w = CAM_W - 20;
        self.fill_rect(CAM_X + 10, bar_y, bar_w, 14, PANEL);
        let fill = bar_w * percent.min(100) as usize / 100;
        self.fill_rect(CAM_X + 10, bar_y, fill, 14, ACCENT);
        self.draw_border(CAM_X + 10, bar_y, bar_w, 14, PANEL_EDGE);
    }

    fn draw_label_panel(&mut self, label: &CurrentLabel) {
        self.fill_rect(SIDE_X, LABEL_Y, SIDE_W, LABEL_H, LETTER_BG);
        self.draw_border(SIDE_X, LABEL_Y, SIDE_W, LABEL_H, PANEL_EDGE);
        self.draw_label_text("TRANSLATION", SIDE_X + 10, LABEL_Y + 8, 1, TEXT_DIM);

        match label {
            CurrentLabel::Sign(sign) => {
                // One big letter, roughly centred.
                self.draw_label_text(sign.as_str(), SIDE_X + SIDE_W / 2 - 12, LABEL_Y + 50, 8, LETTER_FG);
            }
            CurrentLabel::Blank => {
                self.draw_label_text(
                    "make a sign at the camera",
                    SIDE_X + 10,
                    LABEL_Y + LABEL_H / 2,
                    1,
                    TEXT_DIM,
                );
            }
            sentinel => {
                self.draw_label_text(
                    sentinel.display_text(),
                    SIDE_X + 10,
                    LABEL_Y + LABEL_H / 2,
                    1,
                    TEXT,
                );
            }
        }
    }

    fn draw_history_panel(&mut self, update: &FrameUpdate) {
        self.fill_rect(SIDE_X, HIST_Y, SIDE_W, HIST_H, PANEL);
        self.draw_border(SIDE_X, HIST_Y, SIDE_W, HIST_H, PANEL_EDGE);
        self.draw_label_text("HISTORY", SIDE_X + 10, HIST_Y + 8, 1, TEXT_DIM);

        if update.history.is_empty() {
            self.draw_label_text("no recent translations", SIDE_X + 10, HIST_Y + 30, 1, TEXT_DIM);
            return;
        }

        let mut row_y = HIST_Y + 28;
        for entry in &update.history {
            if row_y + 24 > HIST_Y + HIST_H {
                break;
            }
            self.draw_label_text(entry.label.as_str(), SIDE_X + 12, row_y, 2, TEXT);
            let stamp = entry.timestamp.format(&TIME_FMT).unwrap_or_default();
            self.draw_label_text(&stamp, SIDE_X + SIDE_W - 110, row_y + 2, 1, TEXT_DIM);
            row_y += 28;
        }
    }

    fn draw_status_bar(&mut self, update: &FrameUpdate) {
        self.fill_rect(0, STATUS_Y, WIN_W, 26, PANEL);
        self.draw_border(0, STATUS_Y, WIN_W, 26, PANEL_EDGE);

        let dot = if update.state.is_sampling() { OK_DOT } else { OFF_DOT };
        self.draw_dot(CAM_X as isize + 6, STATUS_Y as isize + 13, 5, dot);
        self.draw_label_text(&update.status, CAM_X + 20, STATUS_Y + 8, 2, TEXT);

        if !self.pose_caption.is_empty() {
            let caption = format!("sim: {}", self.pose_caption);
            let x = WIN_W - 10 - caption.len() * 4;
            let pos_y = STATUS_Y + 10;
            self.draw_label_text(&caption, x, pos_y, 1, TEXT_DIM);
        }
    }

    // ── primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for col in x..(x + w).min(WIN_W) {
            if y < WIN_H {
                self.buf[y * WIN_W + col] = color;
            }
            if y + h - 1 < WIN_H {
                self.buf[(y + h - 1) * WIN_W + col] = color;
            }
        }
        for row in y..(y + h).min(WIN_H) {
            if x < WIN_W {
                self.buf[row * WIN_W + x] = color;
            }
            if x + w - 1 < WIN_W {
                self.buf[row * WIN_W + x + w - 1] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    /// 2px-wide line, stepped along the longer axis.
    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        for i in 0..=steps as usize {
            let t = i as f32 / steps;
            let x = (x0 + dx * t) as isize;
            let y = (y0 + dy * t) as isize;
            self.set_pixel(x, y, color);
            self.set_pixel(x + 1, y, color);
            self.set_pixel(x, y + 1, color);
        }
    }

    /// Filled circle.
    fn draw_dot(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bitmap-font text at an integer scale (1 = 3×5 glyphs).
    fn draw_label_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > WIN_W {
                break;
            }
        }
    }
}

impl RenderSink for Visualizer {
    fn frame(&mut self, update: &FrameUpdate) {
        self.render(update);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
