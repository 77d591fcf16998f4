//! Terminal renderer: draws a `FaceFrame` as text
//!
//! Purely presentational. Nothing here feeds back into the engine.

use colored::Colorize;
use crate::types::{Expression, FaceFrame, IdleMode};

/// 8×8 pixel art for the bored screen
const BORED_IMAGES: [[&str; 8]; 3] = [
    // Zzz
    ["00001000", "00010100", "00100010", "00000000", "00001000", "00010100", "00100010", "00000000"],
    // Sad face
    ["01111110", "10000001", "10100101", "10000001", "10000001", "10111101", "10000001", "01111110"],
    // Hourglass
    ["01111110", "00111100", "00011000", "00100100", "00100100", "00011000", "00111100", "01111110"],
];

const CODE_SNIPPETS: [&str; 3] = [
    "fn gomoji() -> Face {\n    let mood = Mood::Happy;\n    Face::new(mood)\n}",
    "let eye = Eye {\n    color: CYAN,\n    radius: 50,\n};",
    "match tap_count {\n    3 => smile(),\n    _ => squint(),\n}",
];

/// Milliseconds per typed character on the coding screen
pub const TYPING_MS_PER_CHAR: u64 = 50;

#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    color: bool,
}

impl TerminalRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, frame: &FaceFrame) -> String {
        match frame.idle_mode {
            IdleMode::None => self.render_face(frame),
            IdleMode::Thinking => self.paint("Thinking....", "white"),
            IdleMode::Bored => render_bored(frame.idle_variant.unwrap_or(0)),
            IdleMode::Coding => {
                let typed = frame.idle_elapsed_ms.unwrap_or(0) / TYPING_MS_PER_CHAR;
                let text = typed_snippet(frame.idle_variant.unwrap_or(0), typed as usize);
                self.paint(&format!("{}_", text), "green")
            }
        }
    }

    fn render_face(&self, frame: &FaceFrame) -> String {
        let (eye, mouth) = glyphs(frame.expression);
        // Pupil offset shifts the whole face, 5px per column and 10px per row
        let cols = ((frame.pupil.x + 30.0) / 5.0).round().max(0.0) as usize;
        let rows = ((frame.pupil.y + 25.0) / 10.0).round().max(0.0) as usize;
        let pad = " ".repeat(cols);

        let mut out = "\n".repeat(rows);
        out.push_str(&format!("{pad}{eye}     {eye}\n"));
        out.push_str(&format!("{pad}   {mouth}\n"));

        let color = if frame.is_angry { "red" } else { "cyan" };
        self.paint(&out, color)
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Eye and mouth for an expression
fn glyphs(expression: Expression) -> (&'static str, &'static str) {
    match expression {
        Expression::Blink => ("---", " ‿ "),
        Expression::Squint | Expression::Shake => (">_<", " ‿ "),
        Expression::Happy => ("^ ^", "\\_/"),
        Expression::GrowingSmile => ("[■]", "\\___/"),
        Expression::Scared => ("(O)", "/‾\\"),
        Expression::Angry => ("\\■/", "/‾\\"),
        Expression::Dizzy => ("@ @", "   "),
        Expression::Nodding => ("[■]", "   "),
        Expression::Neutral
        | Expression::LookLeft
        | Expression::LookRight
        | Expression::LookUp
        | Expression::LookDown => ("[■]", " ‿ "),
    }
}

fn render_bored(variant: usize) -> String {
    let image = &BORED_IMAGES[variant % BORED_IMAGES.len()];
    image
        .iter()
        .map(|row| row.chars().map(|c| if c == '1' { "██" } else { "░░" }).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// First `chars` characters of a snippet
pub fn typed_snippet(variant: usize, chars: usize) -> String {
    CODE_SNIPPETS[variant % CODE_SNIPPETS.len()].chars().take(chars).collect()
}
