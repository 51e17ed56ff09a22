//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable [`Snapshot`].
//! No game logic is performed; this module only scales pixel-space sprites
//! onto terminal cells and prints them.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_shooter::entities::{GameState, Tint};
use space_shooter::geometry::Rect;
use space_shooter::snapshot::{Hud, Snapshot, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_WAVE: Color = Color::Yellow;
const C_HUD_AMMO: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_FIGHTER: Color = Color::Blue;
const C_SCOUT: Color = Color::Green;
const C_BOSS: Color = Color::Magenta;
const C_SHOT_PLAYER: Color = Color::Yellow;
const C_SHOT_ENEMY: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Rows above the play area (HUD + top border).
const TOP_ROWS: u16 = 2;
/// Rows below the play area (bottom border + hint).
const BOTTOM_ROWS: u16 = 2;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match snap.state {
        GameState::MainMenu => draw_menu(out, width, height)?,
        GameState::Playing => {
            draw_border(out, width, height)?;
            draw_hud(out, &snap.hud, width)?;
            let view = Viewport::new(snap.screen, width, height);
            for sprite in &snap.sprites {
                draw_sprite(out, &view, sprite)?;
            }
            if snap.hud.out_of_ammo {
                draw_centered(out, width, height / 2 + 3, "NO AMMO! Press 'R'", Color::White)?;
            }
            draw_controls_hint(out, height)?;
        }
        GameState::GameOver => draw_banner(
            out,
            width,
            height,
            &[
                ("╔════════════════════╗", Color::Red),
                ("║    GAME  OVER      ║", Color::Red),
                ("╚════════════════════╝", Color::Red),
                ("Press ENTER to Restart", Color::White),
            ],
        )?,
        GameState::Victory => draw_banner(
            out,
            width,
            height,
            &[
                ("MISSION ACCOMPLISHED!", Color::Yellow),
                ("YOU WIN!", Color::White),
                ("Press ENTER to Return", Color::White),
            ],
        )?,
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Pixel → cell mapping ──────────────────────────────────────────────────────

/// Scales the simulation's pixel screen onto the bordered play area.
struct Viewport {
    sx: f32,
    sy: f32,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(screen: Rect, width: u16, height: u16) -> Self {
        let cols = width.saturating_sub(2);
        let rows = height.saturating_sub(TOP_ROWS + BOTTOM_ROWS);
        Self {
            sx: cols as f32 / screen.w.max(1.0),
            sy: rows as f32 / screen.h.max(1.0),
            cols,
            rows,
        }
    }

    /// Terminal cell of a pixel position, or `None` outside the play area.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let cx = (x * self.sx).floor();
        let cy = (y * self.sy).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.cols as f32 || cy >= self.rows as f32 {
            return None;
        }
        Some((cx as u16 + 1, cy as u16 + TOP_ROWS))
    }

    /// Width of a pixel span in cells, at least one.
    fn span(&self, w: f32) -> usize {
        ((w * self.sx).round() as usize).max(1)
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in TOP_ROWS..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!("HP:{:>4}", hud.health)))?;
    if hud.shield {
        out.queue(style::SetForegroundColor(Color::Blue))?;
        out.queue(Print(" [SHIELD]"))?;
    }

    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(format!("  Level:{}", hud.wave)))?;
    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(format!("  Ammo:{}/{}", hud.ammo, hud.max_ammo)))?;
    if hud.weapon_level > 1 {
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(format!("  Gun:x{}", hud.weapon_level)))?;
    }

    // Boss health bar, right-aligned
    if let Some(boss) = hud.boss {
        const BAR: usize = 20;
        let filled = if boss.max_health > 0 {
            (BAR as i32 * boss.health / boss.max_health).clamp(0, BAR as i32) as usize
        } else {
            0
        };
        let bar = format!("BOSS [{}{}]", "█".repeat(filled), "░".repeat(BAR - filled));
        let bx = width.saturating_sub(bar.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(bx, 0))?;
        out.queue(style::SetForegroundColor(C_BOSS))?;
        out.queue(Print(bar))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn tint_color(tint: Tint, base: Color) -> Color {
    match tint {
        Tint::Normal => base,
        Tint::Damaged => Color::Red,
        Tint::Shielded => Color::Blue,
        Tint::Health => Color::Green,
        Tint::Weapon => Color::Yellow,
        Tint::Shield => Color::Cyan,
    }
}

fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let r = sprite.rect;
    let (glyphs, base): (&[&str], Color) = match sprite.kind {
        SpriteKind::Player => (&["▲", "/█\\"], C_PLAYER),
        SpriteKind::Fighter => (&["«▼»", "╚═╝"], C_FIGHTER),
        SpriteKind::Scout => (&["(◎)", "╰─╯"], C_SCOUT),
        SpriteKind::Boss => (&["╔═◣◉◢═╗", "╚╦════╦╝", " ▼    ▼ "], C_BOSS),
        SpriteKind::PlayerShot => (&["║"], C_SHOT_PLAYER),
        SpriteKind::EnemyShot => (&["•"], C_SHOT_ENEMY),
        SpriteKind::PowerUp => (&["◆"], C_PLAYER),
    };
    out.queue(style::SetForegroundColor(tint_color(sprite.tint, base)))?;

    // Glyph rows are centred on the sprite's horizontal midpoint and laid
    // out downwards from its top edge, one terminal row per glyph line.
    let mid_x = r.x + r.w / 2.0;
    let cells_wide = view.span(r.w);
    for (i, line) in glyphs.iter().enumerate() {
        let row_y = r.y + i as f32 / view.sy.max(f32::EPSILON);
        if row_y >= r.bottom() && i > 0 {
            break;
        }
        let Some((cx, cy)) = view.cell(mid_x, row_y) else {
            continue;
        };
        let len = line.chars().count().min(cells_wide.max(1)).max(1);
        let start = cx.saturating_sub(len as u16 / 2).max(1);
        let text: String = line.chars().take(len).collect();
        out.queue(cursor::MoveTo(start, cy))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Text screens ──────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_centered(out, width, start_row + i as u16, text, *color)?;
    }
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    draw_centered(out, width, cy.saturating_sub(4), "★  SPACE  SHOOTER  ★", Color::Cyan)?;
    draw_centered(out, width, cy.saturating_sub(2), "Press ENTER to Start", Color::White)?;

    let legend: &[(&str, Color)] = &[
        ("◆ green : repair hull", Color::Green),
        ("◆ cyan  : shield (absorbs one hit)", Color::Cyan),
        ("◆ yellow: weapon upgrade", Color::Yellow),
    ];
    for (i, (text, color)) in legend.iter().enumerate() {
        draw_centered(out, width, cy + 1 + i as u16, text, *color)?;
    }
    draw_centered(
        out,
        width,
        cy + 5,
        "← → / A D : Move   SPACE : Shoot   R : Reload   Q : Quit",
        C_HINT,
    )?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   R : Reload   Q : Quit"))?;
    Ok(())
}
