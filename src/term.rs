use crate::TermInt;
use crate::render::{format_score, Color, RenderSurface, ScoreDisplay};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use tracing::{debug, error};

type Cell = (Option<Color>, Option<Color>);

const HALF_BLOCK: char = '▀';

/// Square raster where each terminal cell holds two stacked pixels, so one
/// pixel is roughly as wide as it is tall.
pub struct PixelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Option<Color>>,
}

impl PixelCanvas {
    pub fn new(side: usize) -> Self {
        // Keep an even height so pixels pair up into whole cells
        let side = side + side % 2;
        PixelCanvas { width: side, height: side, pixels: vec![None; side * side] }
    }

    pub fn cols(&self) -> TermInt {
        self.width as TermInt
    }

    pub fn rows(&self) -> TermInt {
        (self.height / 2) as TermInt
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels[y * self.width + x]
    }

    fn cell(&self, col: usize, row: usize) -> Cell {
        (self.pixel(col, row * 2), self.pixel(col, row * 2 + 1))
    }

    /// Sets every pixel whose center satisfies `inside`.
    fn fill_where<F: Fn(f64, f64) -> bool>(&mut self, color: Option<Color>, inside: F) {
        for y in 0..self.height {
            for x in 0..self.width {
                if inside(x as f64 + 0.5, y as f64 + 0.5) {
                    self.pixels[y * self.width + x] = color;
                }
            }
        }
    }
}

fn in_rect(px: f64, py: f64, x: f64, y: f64, w: f64, h: f64) -> bool {
    px >= x && px < x + w && py >= y && py < y + h
}

impl RenderSurface for PixelCanvas {
    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.fill_where(None, |px, py| in_rect(px, py, x, y, w, h));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.fill_where(Some(color), |px, py| in_rect(px, py, x, y, w, h));
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let r2 = radius * radius;
        self.fill_where(Some(color), |px, py| (px - cx).powi(2) + (py - cy).powi(2) <= r2);
    }
}

/// Score text waiting to be written into the board frame.
#[derive(Debug, Default)]
pub struct Scoreboard {
    label: String,
    dirty: bool,
}

impl ScoreDisplay for Scoreboard {
    fn set_score(&mut self, score: u32) {
        self.label = format!(" Score: {} ", format_score(score));
        self.dirty = true;
    }
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    board_cols: TermInt,
    board_rows: TermInt,
    origin: (TermInt, TermInt),
    screen: Vec<Cell>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: (TermInt, TermInt),
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    /// Sizes a manager for `canvas`, centering the board and its frame in the
    /// terminal.
    pub fn new(canvas: &PixelCanvas) -> Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;
        let (board_cols, board_rows) = (canvas.cols(), canvas.rows());

        if width < board_cols + 2 || height < board_rows + 2 {
            bail!(
                "terminal is {}x{}, the board needs at least {}x{}",
                width, height, board_cols + 2, board_rows + 2
            );
        }

        // Placed once; terminal resizes during a game are not tracked
        let origin = ((width - board_cols) / 2, (height - board_rows) / 2);
        debug!(width, height, board_cols, board_rows, "terminal geometry");

        let screen = vec![(None, None); board_cols as usize * board_rows as usize];
        Ok(TermManager {
            width, height, stdout: stdout(), board_cols, board_rows, origin, screen, current_msg: None,
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("entering alt screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("hiding cursor")?;
        Ok(())
    }

    /// Undoes [`setup`](Self::setup). Every step is attempted even if an
    /// earlier one fails.
    pub fn restore(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            error!(?err, "failed to disable raw mode");
        }
        if let Err(err) = execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking) {
            error!(?err, "failed to restore cursor");
        }
        if let Err(err) = execute!(self.stdout, LeaveAlternateScreen) {
            error!(?err, "failed to leave alt screen");
        }
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All)).context("clearing")?;
        self.screen = vec![(None, None); self.screen.len()];
        self.current_msg = None;
        Ok(())
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let (left, top) = (self.origin.0 - 1, self.origin.1 - 1);
        let (right, bottom) = (self.origin.0 + self.board_cols, self.origin.1 + self.board_rows);

        queue!(self.stdout, style::ResetColor)?;
        for x in left..=right {
            let ch = if x == left || x == right {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, bottom), ch)?;
        }

        for y in top + 1..bottom {
            self.print_at((left, y), '|')?;
            self.print_at((right, y), '|')?;
        }

        self.flush()
    }

    /// Writes the canvas cells that changed since the last call, plus the
    /// score if it changed.
    pub fn present(&mut self, canvas: &PixelCanvas, scoreboard: &mut Scoreboard) -> Result<()> {
        for row in 0..self.board_rows as usize {
            for col in 0..self.board_cols as usize {
                let cell = canvas.cell(col, row);
                let idx = row * self.board_cols as usize + col;
                if self.screen[idx] == cell {
                    continue;
                }

                self.screen[idx] = cell;
                let pos = (self.origin.0 + col as TermInt, self.origin.1 + row as TermInt);
                queue!(
                    self.stdout,
                    cursor::MoveTo(pos.0, pos.1),
                    style::SetForegroundColor(term_color(cell.0)),
                    style::SetBackgroundColor(term_color(cell.1)),
                    style::Print(HALF_BLOCK)
                )?;
            }
        }

        if scoreboard.dirty {
            scoreboard.dirty = false;
            let x = self.origin.0 + 1;
            let y = self.origin.1 - 1;
            queue!(self.stdout, style::ResetColor, cursor::MoveTo(x, y), style::Print(&scoreboard.label))?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        queue!(self.stdout, style::ResetColor)?;

        // Blank lines above and below the text
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Put back whatever the board had underneath
        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            for x in msg.top_left.0..msg.top_left.0 + msg.width {
                match self.board_cell_at((x, y)) {
                    Some(cell) => queue!(
                        self.stdout,
                        cursor::MoveTo(x, y),
                        style::SetForegroundColor(term_color(cell.0)),
                        style::SetBackgroundColor(term_color(cell.1)),
                        style::Print(HALF_BLOCK)
                    )?,
                    None => queue!(self.stdout, style::ResetColor, cursor::MoveTo(x, y), style::Print(' '))?,
                }
            }
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("flushing stdout")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn board_cell_at(&self, pos: (TermInt, TermInt)) -> Option<Cell> {
        let col = pos.0.checked_sub(self.origin.0)?;
        let row = pos.1.checked_sub(self.origin.1)?;
        if col >= self.board_cols || row >= self.board_rows {
            return None;
        }
        let cell = self.screen[row as usize * self.board_cols as usize + col as usize];
        // Never-drawn cells are left blank
        if cell == (None, None) { None } else { Some(cell) }
    }

    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }
}

fn term_color(color: Option<Color>) -> style::Color {
    use style::Color::Rgb;

    match color {
        None => style::Color::Reset,
        Some(Color::LightGreen) => Rgb { r: 144, g: 238, b: 144 },
        Some(Color::Green) => Rgb { r: 0, g: 128, b: 0 },
        Some(Color::Red) => Rgb { r: 255, g: 0, b: 0 },
        Some(Color::Pink) => Rgb { r: 255, g: 192, b: 203 },
        Some(Color::Magenta) => Rgb { r: 255, g: 0, b: 255 },
    }
}
