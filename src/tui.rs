use std::io;
use std::io::{stdout, Stdout};

use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Padding;
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    crossterm::{
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::{Alignment, Rect},
    style::Stylize,
    symbols::border,
    text::Line,
    widgets::{block::Title, Block, Paragraph, Widget},
    Frame, Terminal,
};

use crate::c4r::{Board, Column, Player};
use crate::game::GameSession;

/// A type alias for the terminal type used in this application
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal
pub fn init() -> io::Result<Tui> {
    execute!(stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

/// Restore the terminal to its original state
pub fn restore() -> io::Result<()> {
    execute!(stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Display colour of each player's pieces.
pub fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Blue,
    }
}

fn player_name(player: Player) -> &'static str {
    match player {
        Player::One => "Red",
        Player::Two => "Blue",
    }
}

/// Terminal front-end for a [GameSession]. Only reads state from the session and forwards
/// drops to it; once the game is over no further drops are forwarded.
#[derive(Debug)]
pub struct App {
    session: GameSession,
    cursor: Column,
    exit: bool,
}

impl App {
    pub fn new(session: GameSession) -> App {
        let cursor = session.width() / 2;
        App {
            session,
            cursor,
            exit: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The column currently hovered by the cursor.
    pub fn cursor(&self) -> Column {
        self.cursor
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut Tui) -> io::Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.render_frame(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn render_frame(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.size());
    }

    /// updates the application's state based on user input
    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            // it's important to check that the event is a key press event as
            // crossterm also emits key release and repeat events on Windows.
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.exit(),
            KeyCode::Char('r') => self.reset_board(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.session.width().saturating_sub(1))
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.make_move(self.cursor),
            KeyCode::Char(c @ '1'..='9') => {
                let col = c as usize - '1' as usize;
                if col < self.session.width() {
                    self.cursor = col;
                    self.make_move(col);
                }
            }
            _ => {}
        }
    }

    fn exit(&mut self) {
        self.exit = true;
    }

    fn reset_board(&mut self) {
        let board = Board::new(self.session.width(), self.session.height());
        self.session = GameSession::from_board(board, Player::One);
        log::info!("started a new game");
    }

    fn make_move(&mut self, col: Column) {
        if self.session.is_over() {
            return;
        }
        match self.session.play_move(col) {
            Ok(outcome) => {
                if let Some(msg) = outcome.message() {
                    log::info!("{}", msg);
                }
            }
            Err(e) => log::warn!("move in column {} rejected: {}", col, e),
        }
    }

    /// The row above the board showing the active player's piece over the hovered column.
    fn hover_line(&self) -> Line<'static> {
        if self.session.is_over() {
            return Line::from("");
        }
        let player = self.session.active_player();
        let spans: Vec<Span> = (0..self.session.width())
            .map(|col| {
                if col == self.cursor {
                    Span::styled(
                        player.glyph().to_string(),
                        Style::default().bg(player_color(player)),
                    )
                } else {
                    Span::raw("  ")
                }
            })
            .collect();
        Line::from(spans)
    }

    fn status_line(&self) -> Line<'static> {
        match self.session.outcome().and_then(|o| o.message()) {
            Some(msg) => Line::from(vec![
                " ".into(),
                Span::from(msg).bold(),
                " <R> to play again".into(),
            ]),
            None => {
                let player = self.session.active_player();
                Line::from(vec![
                    " ".into(),
                    player_name(player).fg(player_color(player)).bold(),
                    " to play".into(),
                ])
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Title::from(" Connect Four ".bold());
        let outer_block = Block::bordered()
            .title(title.alignment(Alignment::Center))
            .padding(Padding::horizontal(1))
            .border_set(border::THICK);
        let inner_area = outer_block.inner(area);
        outer_block.render(area, buf);

        let board_rows = u16::try_from(self.session.height()).unwrap_or(u16::MAX);
        let layout = Layout::vertical([
            Constraint::Length(board_rows.saturating_add(6)), // Game
            Constraint::Fill(1),                              // Spacer
            Constraint::Length(8),                            // Instructions
        ])
        .spacing(1)
        .split(inner_area);

        // Game
        let mut lines = vec![self.hover_line()];
        lines.extend(
            self.session
                .board()
                .to_string()
                .lines()
                .map(|l| Line::from(l.to_string())),
        );
        // Only columns reachable with a digit key are labelled; each label spans one glyph.
        let labels: String = (1..=self.session.width())
            .map(|col| if col <= 9 { format!("{:<2}", col) } else { "  ".to_string() })
            .collect();
        lines.push(Line::styled(labels, Style::default().add_modifier(Modifier::DIM)));

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" Board")
                    .title_bottom(self.status_line())
                    .padding(Padding::uniform(1)),
            )
            .render(layout[0], buf);

        // Instructions
        let instruction_text = vec![
            Line::from(vec!["<1-9>".blue().bold(), " Drop in column".into()]),
            Line::from(vec!["<←/→>".blue().bold(), " Move cursor".into()]),
            Line::from(vec!["<Enter>".blue().bold(), " Drop at cursor".into()]),
            Line::from(vec!["<R>".blue().bold(), " Restart".into()]),
            Line::from(vec!["<Q>".blue().bold(), " Quit".into()]),
        ];
        Paragraph::new(instruction_text)
            .block(
                Block::bordered()
                    .title(" Instructions")
                    .padding(Padding::horizontal(1)),
            )
            .render(layout[2], buf);
    }
}
