//! Startup banner: figlet title shaded from ink blue down to amber, then a tagline.

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};
use tracing::debug;

const INK: [u8; 3] = [0x1f, 0x3a, 0x93];
const AMBER: [u8; 3] = [0xf5, 0xb0, 0x41];

/// `steps` colours evenly spaced from `from` to `to`, both ends included.
fn gradient(from: [u8; 3], to: [u8; 3], steps: usize) -> Vec<Color> {
    let span = steps.saturating_sub(1).max(1) as f64;
    (0..steps)
        .map(|i| {
            let t = i as f64 / span;
            let mix = |k: usize| {
                let (a, b) = (f64::from(from[k]), f64::from(to[k]));
                (a + (b - a) * t).round() as u8
            };
            Color::Rgb {
                r: mix(0),
                g: mix(1),
                b: mix(2),
            }
        })
        .collect()
}

/// Figlet rendering of `text`; plain text when the bundled font is unavailable.
fn banner_art(text: &str) -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(text).map(|figure| figure.to_string()))
        .unwrap_or_else(|| text.to_string())
}

/// Queues the shaded title and the tagline, then flushes once.
fn write_banner<W: Write>(out: &mut W, title: &str, tagline: &str) -> io::Result<()> {
    let art = banner_art(title);
    let rows: Vec<&str> = art.lines().filter(|l| !l.trim().is_empty()).collect();
    for (row, color) in rows.iter().zip(gradient(INK, AMBER, rows.len())) {
        queue!(out, SetForegroundColor(color), Print(row), Print("\r\n"))?;
    }
    let [r, g, b] = AMBER;
    queue!(
        out,
        SetForegroundColor(Color::Rgb { r, g, b }),
        Print(tagline),
        Print("\r\n"),
        ResetColor
    )?;
    out.flush()
}

pub fn print_welcome() {
    let tagline = format!("blog reader v{}", env!("CARGO_PKG_VERSION"));
    if let Err(e) = write_banner(&mut stdout(), "BLOGICUM", &tagline) {
        debug!(error = %e, "banner not printed");
    }
}
