//! Writing frames, the menu bar and the status line to a terminal.
//!
//! Everything here is generic over `Write` so it can target stdout or a
//! buffer.

use std::io::Write;

use anyhow::Result;
use crossterm::{cursor, queue, style, terminal};

use crate::types::{Cell, Color, Frame, NamedColor, Style};

/// Print a menu item, bolding any text inside `[...]` and dimming the rest.
pub fn print_menu_item<W: Write>(out: &mut W, item: &str) -> Result<()> {
    let mut rest = item;
    while let Some(open) = rest.find('[') {
        print_dim(out, &rest[..open])?;
        rest = &rest[open..];
        let Some(close) = rest.find(']') else {
            break;
        };
        queue!(
            out,
            style::SetAttribute(style::Attribute::Bold),
            style::Print(&rest[..=close]),
            style::SetAttribute(style::Attribute::Reset),
        )?;
        rest = &rest[close + 1..];
    }
    print_dim(out, rest)
}

fn print_dim<W: Write>(out: &mut W, text: &str) -> Result<()> {
    if !text.is_empty() {
        queue!(
            out,
            style::SetAttribute(style::Attribute::Dim),
            style::Print(text),
            style::SetAttribute(style::Attribute::Reset),
        )?;
    }
    Ok(())
}

pub fn render_menubar<W: Write>(out: &mut W, items: &[&str]) -> Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(" "),
    )?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            queue!(out, style::Print("  "))?;
        }
        print_menu_item(out, item)?;
    }
    Ok(())
}

fn print_cell<W: Write>(out: &mut W, cell: &Cell) -> Result<()> {
    let cs = to_content_style(&cell.style);
    queue!(out, style::PrintStyledContent(style::StyledContent::new(cs, cell.ch)))?;
    Ok(())
}

/// Write a frame with its top row at terminal row `top`.
pub fn render_frame<W: Write>(out: &mut W, frame: &Frame, top: u16) -> Result<()> {
    match frame {
        Frame::Full { cells } => {
            for (y, row) in cells.iter().enumerate() {
                queue!(out, cursor::MoveTo(0, y as u16 + top))?;
                for cell in row {
                    print_cell(out, cell)?;
                }
            }
        }
        Frame::Diff { changes } => {
            for change in changes {
                queue!(out, cursor::MoveTo(change.x, change.y + top))?;
                print_cell(out, &change.cell)?;
            }
        }
    }
    Ok(())
}

pub fn render_status<W: Write>(out: &mut W, row: u16, status: &str) -> Result<()> {
    let mut cs = style::ContentStyle::default();
    cs.attributes.set(style::Attribute::Dim);
    queue!(
        out,
        cursor::MoveTo(0, row),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::PrintStyledContent(style::StyledContent::new(cs, status)),
    )?;
    Ok(())
}

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    cs.foreground_color = s.fg.map(to_ct_color);
    cs.background_color = s.bg.map(to_ct_color);
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb { r, g, b },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellChange;

    #[test]
    fn style_conversion() {
        let s = Style {
            fg: Some(Color::Named(NamedColor::Yellow)),
            bg: Some(Color::BLACK),
            bold: true,
            dim: false,
        };
        let cs = to_content_style(&s);
        assert_eq!(cs.foreground_color, Some(style::Color::Yellow));
        assert_eq!(cs.background_color, Some(style::Color::Rgb { r: 0, g: 0, b: 0 }));
        assert!(cs.attributes.has(style::Attribute::Bold));
        assert!(!cs.attributes.has(style::Attribute::Dim));
    }

    #[test]
    fn menu_item_keeps_all_text() {
        let mut buf = Vec::new();
        print_menu_item(&mut buf, "[q][Esc] quit").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("[q]"));
        assert!(text.contains("[Esc]"));
        assert!(text.contains(" quit"));
    }

    #[test]
    fn diff_frame_writes_only_changes() {
        let frame = Frame::Diff {
            changes: vec![CellChange {
                x: 3,
                y: 0,
                cell: Cell {
                    ch: '★',
                    style: Style::default(),
                },
            }],
        };
        let mut buf = Vec::new();
        render_frame(&mut buf, &frame, 1).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches('★').count(), 1);
        // Row 0 of the canvas is terminal row 2 (1-based) with one menu row.
        assert!(text.contains("\x1b[2;4H"));
    }
}
