//! Terminal renderer for the conversation view.

use std::io::Write;

use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use khliff_conversation::{Alignment, RenderedTurn, ViewModel};
use khliff_core::Speaker;

use crate::input::ChatCommand;

const FALLBACK_WIDTH: u16 = 80;

pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Clear the screen and draw the whole view.
    pub fn draw(&mut self, view: &ViewModel) -> std::io::Result<()> {
        let width = crossterm::terminal::size().map_or(FALLBACK_WIDTH, |(w, _)| w);

        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;

        let rule = "─".repeat(usize::from(width.min(FALLBACK_WIDTH)));
        writeln!(self.out, "{}", rule.bright_purple())?;
        writeln!(self.out, "  {}", view.title.bold().bright_purple())?;
        writeln!(self.out, "{}", rule.bright_purple())?;

        if let Some(warning) = &view.warning {
            writeln!(self.out, "{} {}", "Error:".red().bold(), warning.red())?;
        }
        writeln!(self.out)?;

        for turn in &view.turns {
            self.draw_turn(turn, width)?;
        }

        writeln!(self.out, "{}", view.tip.dimmed())?;
        self.out.flush()
    }

    fn draw_turn(&mut self, turn: &RenderedTurn, width: u16) -> std::io::Result<()> {
        // User turns sit in the right part of the screen, replies on the left.
        let indent = match turn.alignment {
            Alignment::Right => " ".repeat(usize::from(width / 5)),
            Alignment::Left => String::new(),
        };

        let label = format!("{}:", turn.label);
        let label = match turn.speaker {
            Speaker::User => label.bright_blue().bold(),
            Speaker::Assistant => label.green().bold(),
        };
        writeln!(self.out, "{indent}{label}")?;

        for line in turn.body.lines() {
            writeln!(self.out, "{indent}{line}")?;
        }
        writeln!(self.out, "{indent}{}", turn.time.dimmed())?;
        writeln!(self.out)
    }

    pub fn prompt(&mut self) -> std::io::Result<()> {
        write!(self.out, "{} ", "Type your message:".bold())?;
        self.out.flush()
    }

    pub fn thinking(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{}", "Thinking...".dimmed())?;
        self.out.flush()
    }

    pub fn help(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{}", ChatCommand::help_text())?;
        self.out.flush()
    }
}
