use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue, terminal,
};
use lifegrid::{Automaton, Pos2, engine::Window};
use std::io::{self, Write};
use std::time::Duration;

pub enum ConsoleCommand {
    Exit,
    Pause,
    Poke { pos: Pos2, alive: bool },
    Handled,
}

/// Terminal renderer holding raw mode for as long as it lives
///
/// Raw mode, the hidden cursor and mouse capture are restored on drop, so
/// every exit path out of the run loop hands back a usable terminal.
pub struct ConsoleRender {
    tl: Pos2,
    report: String,
}
impl ConsoleRender {
    pub fn new(top_left: Pos2) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide, EnableMouseCapture)?;
        Ok(Self {
            tl: top_left,
            report: String::new(),
        })
    }

    pub fn render(&self, game: &dyn Automaton) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // the last row holds the report
        let view_rows = rows.saturating_sub(1);
        let br = self.tl + Pos2::new(cols as i32, view_rows as i32);

        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in Window::new(game, self.tl, br).iter() {
            let cell = cell - self.tl;
            queue!(stdout, cursor::MoveTo(cell.x as u16, cell.y as u16))?;
            stdout.write_all("█".as_bytes())?;
        }

        queue!(stdout, cursor::MoveTo(0, view_rows))?;
        stdout.write_all(self.report.as_bytes())?;
        stdout.flush()
    }

    pub fn poll_events(&mut self) -> io::Result<Option<ConsoleCommand>> {
        if !event::poll(Duration::from_secs(0))? {
            return Ok(None);
        }

        let command = match event::read()? {
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
            | event::Event::Key(KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            }) => ConsoleCommand::Exit,
            event::Event::Key(KeyEvent {
                code: KeyCode::Char(' ') | KeyCode::Enter,
                ..
            }) => ConsoleCommand::Pause,
            event::Event::Key(KeyEvent { code, .. }) => {
                match code {
                    KeyCode::Up => self.tl.y -= 1,
                    KeyCode::Down => self.tl.y += 1,
                    KeyCode::Left => self.tl.x -= 1,
                    KeyCode::Right => self.tl.x += 1,
                    _ => {}
                }
                ConsoleCommand::Handled
            }
            // left click draws, right click erases
            event::Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(button) | MouseEventKind::Drag(button),
                column,
                row,
                ..
            }) if button != MouseButton::Middle => ConsoleCommand::Poke {
                pos: self.tl + Pos2::new(column as i32, row as i32),
                alive: button == MouseButton::Left,
            },
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(command))
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // nothing sensible is left to do if the terminal refuses to restore
        let _ = execute!(io::stdout(), DisableMouseCapture, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}
