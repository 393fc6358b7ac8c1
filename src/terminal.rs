//! Crossterm-backed display surface and the interactive key loop.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor::{MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use linepad_buffer::{CellSize, Point};
use linepad_editor::{
    DisplaySurface, EditingSession, Mode, Outcome, SessionContext, SessionSettings, SystemClock,
};
use linepad_keyboard::from_crossterm;
use linepad_theme::CursorStyle;

use crate::Workspace;

/// Surface that mirrors the painted markup and draws it to a terminal.
///
/// Pixel geometry from the session is mapped back to terminal cells
/// through the configured cell size.
#[derive(Debug)]
pub struct TerminalSurface {
    lines: Vec<String>,
    scroll_top: f64,
    cell: CellSize,
    cursor: Point,
    status: String,
    error: Option<String>,
}

impl TerminalSurface {
    pub fn new(cell: CellSize) -> Self {
        Self {
            lines: Vec::new(),
            scroll_top: 0.0,
            cell,
            cursor: Point::default(),
            status: Mode::Normal.label().to_string(),
            error: None,
        }
    }

    fn first_visible_row(&self) -> usize {
        (self.scroll_top / self.cell.height).round().max(0.0) as usize
    }

    /// Draw the text area and the status row.
    pub fn draw(&self, out: &mut impl Write, rows: u16) -> io::Result<()> {
        let text_rows = rows.saturating_sub(1);
        let first = self.first_visible_row();

        for screen_row in 0..text_rows {
            queue!(out, MoveTo(0, screen_row), Clear(ClearType::CurrentLine))?;
            let Some(markup) = self.lines.get(first + screen_row as usize) else {
                continue;
            };
            for (color, text) in decode_markup(markup) {
                let color = color.as_deref().map(parse_color).unwrap_or(Color::Reset);
                queue!(out, SetForegroundColor(color), Print(text))?;
            }
            queue!(out, ResetColor)?;
        }

        queue!(out, MoveTo(0, text_rows), Clear(ClearType::CurrentLine))?;
        match &self.error {
            Some(message) => queue!(
                out,
                SetForegroundColor(Color::Red),
                Print(message),
                ResetColor
            )?,
            None => queue!(out, Print(&self.status))?,
        }

        let column = (self.cursor.x / self.cell.width).round().max(0.0) as u16;
        let row = (self.cursor.y / self.cell.height).round().max(0.0) as u16;
        queue!(out, MoveTo(column, row.min(text_rows.saturating_sub(1))), Show)?;
        out.flush()
    }
}

impl DisplaySurface for TerminalSurface {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn paint_line(&mut self, row: usize, markup: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            *line = markup.to_string();
        }
    }

    fn insert_line(&mut self, row: usize, markup: &str) {
        let row = row.min(self.lines.len());
        self.lines.insert(row, markup.to_string());
    }

    fn remove_line(&mut self, row: usize) {
        if row < self.lines.len() {
            self.lines.remove(row);
        }
    }

    // No line-number column in the terminal view.
    fn paint_gutter(&mut self, _markup: &str) {}

    fn move_cursor(&mut self, position: Point, cell: CellSize, _style: &CursorStyle) {
        self.cursor = position;
        self.cell = cell;
    }

    fn scroll_to(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top;
    }

    fn show_mode(&mut self, mode: Mode, command_line: &str) {
        self.error = None;
        self.status = match mode {
            Mode::Command | Mode::CommandError => format!("{} :{}", mode, command_line),
            _ => mode.label().to_string(),
        };
    }

    fn report_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

/// Split span markup into `(color, text)` runs. Empty-line placeholders
/// produce nothing.
pub fn decode_markup(markup: &str) -> Vec<(Option<String>, String)> {
    let mut runs = Vec::new();
    let mut rest = markup;

    while let Some(start) = rest.find("<span") {
        let Some(tag_len) = rest[start..].find('>') else {
            break;
        };
        let tag = &rest[start..start + tag_len];
        let body_start = start + tag_len + 1;
        let Some(body_len) = rest[body_start..].find("</span>") else {
            break;
        };
        let body = &rest[body_start..body_start + body_len];

        if !tag.contains("empty-line") {
            let color = tag
                .split("color: ")
                .nth(1)
                .map(|c| c.trim_end_matches('"').to_string());
            runs.push((color, unescape(body)));
        }
        rest = &rest[body_start + body_len + "</span>".len()..];
    }
    runs
}

fn unescape(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Map a theme color (`#rrggbb` or a CSS name) to a terminal color.
pub fn parse_color(name: &str) -> Color {
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            if let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) {
                return Color::Rgb { r, g, b };
            }
        }
        return Color::Reset;
    }
    match name.to_lowercase().as_str() {
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        _ => Color::Reset,
    }
}

/// Run the session interactively until the file is closed.
pub fn run(workspace: &mut Workspace) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = event_loop(workspace, &mut stdout);

    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;
    result
}

fn event_loop(workspace: &mut Workspace, stdout: &mut io::Stdout) -> Result<()> {
    let (_, mut rows) = terminal::size()?;
    let settings = SessionSettings::from_config(
        &workspace.config,
        rows as f64 * workspace.config.editor.cell_height,
    );
    let mut surface = TerminalSurface::new(settings.cell);
    let mut session = EditingSession::open(
        &workspace.path,
        settings,
        &mut workspace.files,
        &workspace.theme,
        &mut surface,
    )?;
    let clock = SystemClock;

    loop {
        surface.draw(stdout, rows)?;

        match event::read()? {
            Event::Key(key) => {
                let Some(input) = from_crossterm(key) else {
                    continue;
                };
                let mut ctx = SessionContext {
                    files: &mut workspace.files,
                    tree: &mut workspace.tree,
                    theme: &workspace.theme,
                    surface: &mut surface,
                    clock: &clock,
                };
                match session.handle_key(input, &mut ctx) {
                    Ok(Outcome::Closed) => break,
                    Ok(Outcome::Continue) => {}
                    Err(err) => surface.report_error(&err.to_string()),
                }
                session.settle_scroll(&mut surface);
            }
            Event::Resize(_, new_rows) => {
                rows = new_rows;
                let height = rows as f64 * workspace.config.editor.cell_height;
                session.resize(height, &mut surface);
                session.settle_scroll(&mut surface);
            }
            _ => {}
        }
    }

    Ok(())
}
