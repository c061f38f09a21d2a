use crate::options::Palette;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{SetBackgroundColor, SetForegroundColor},
    terminal,
};
use lifeterm::{CellSet, Pos2, Region};
use std::io;
use std::time::Duration;

/// Discrete command produced by the input layer, consumed once per tick.
pub enum Command {
    TogglePause,
    StepForward,
    StepBackward,
    Randomize,
    Fill,
    Clear,
    Invert,
    RaiseRate,
    LowerRate,
    Activate(Pos2),
    Toggle(Pos2),
    Quit,
}

pub struct Screen {
    grid: Region,
    cell_cols: u16,
    cell_rows: u16,
    palette: Palette,
    drag: Option<Pos2>,
}
impl Screen {
    pub fn new(grid: Region, cell_size: u16, palette: Palette) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            terminal::DisableLineWrap,
            event::EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self {
            grid,
            // terminal cells are roughly twice as tall as wide, so a
            // grid cell spans two columns per row
            cell_cols: 2 * cell_size,
            cell_rows: cell_size,
            palette,
            drag: None,
        })
    }

    pub fn render(&self, cells: &CellSet, status: &str) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let mut stdout = io::stdout();
        queue!(
            stdout,
            terminal::BeginSynchronizedUpdate,
            SetBackgroundColor(self.palette.background),
            SetForegroundColor(self.palette.line),
            terminal::Clear(terminal::ClearType::All)
        )?;

        let grid_rows = (self.grid.height() as u32 * u32::from(self.cell_rows))
            .min(u32::from(rows.saturating_sub(1))) as u16;
        for row in 0..grid_rows {
            queue!(stdout, cursor::MoveTo(0, row))?;
            io::Write::write_all(&mut stdout, self.row_text(cells, row, cols).as_bytes())?;
        }

        // status footer on the last line
        if rows > 0 {
            let footer = status.chars().take(cols as usize).collect::<String>();
            queue!(stdout, cursor::MoveTo(0, rows - 1))?;
            io::Write::write_all(&mut stdout, footer.as_bytes())?;
        }

        queue!(stdout, terminal::EndSynchronizedUpdate)?;
        io::Write::flush(&mut stdout)
    }

    fn row_text(&self, cells: &CellSet, row: u16, cols: u16) -> String {
        let tl = self.grid.top_left();
        let y = tl.y + i32::from(row / self.cell_rows);
        let sub_row = row % self.cell_rows;

        let mut text = String::with_capacity(cols as usize);
        for col in 0..cols {
            let pos = Pos2 {
                x: tl.x + i32::from(col / self.cell_cols),
                y,
            };
            if !self.grid.contains(pos) {
                break;
            }
            text.push(if cells.contains(pos) {
                '█'
            } else if sub_row == 0 && col % self.cell_cols == 0 {
                // gridline lattice dot at each cell origin
                '·'
            } else {
                ' '
            });
        }
        text
    }

    /// Drains queued terminal events until one maps to a command.
    pub fn poll_command(&mut self) -> io::Result<Option<Command>> {
        while event::poll(Duration::ZERO)? {
            if let Some(command) = self.translate(event::read()?) {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }

    fn translate(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            _ => None,
        }
    }

    fn translate_key(key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }
        match key.code {
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'q' => Some(Command::Quit),
                ' ' => Some(Command::TogglePause),
                'r' => Some(Command::Randomize),
                'e' => Some(Command::Fill),
                'k' => Some(Command::Clear),
                't' => Some(Command::Invert),
                'n' => Some(Command::StepForward),
                'p' => Some(Command::StepBackward),
                '+' | '=' => Some(Command::RaiseRate),
                '-' => Some(Command::LowerRate),
                _ => None,
            },
            _ => None,
        }
    }

    fn translate_mouse(&mut self, mouse: MouseEvent) -> Option<Command> {
        match mouse.kind {
            MouseEventKind::Down(button) | MouseEventKind::Drag(button) => {
                let pos = self.cell_at(mouse.column, mouse.row)?;
                let command = match button {
                    MouseButton::Left => Command::Activate(pos),
                    MouseButton::Right => Command::Toggle(pos),
                    MouseButton::Middle => return None,
                };
                // drag events repeat per character cell; apply once per
                // grid cell entered
                if self.drag == Some(pos) {
                    return None;
                }
                self.drag = Some(pos);
                Some(command)
            }
            MouseEventKind::Up(_) => {
                self.drag = None;
                None
            }
            _ => None,
        }
    }

    fn cell_at(&self, column: u16, row: u16) -> Option<Pos2> {
        let tl = self.grid.top_left();
        let pos = Pos2 {
            x: tl.x + i32::from(column / self.cell_cols),
            y: tl.y + i32::from(row / self.cell_rows),
        };
        self.grid.contains(pos).then_some(pos)
    }
}
impl Drop for Screen {
    fn drop(&mut self) {
        // failures while restoring the terminal have nowhere to go
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            event::DisableMouseCapture,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
