use crate::palette::Palette;
use crate::quote::Quote;
use crate::selection::Selection;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rand::rngs::StdRng;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

type Terminal = ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>;
type Frame<'a> = ratatui::Frame<'a>;

pub const BUTTON_LABEL: &str = "Another thought";

const CARD_MAX_WIDTH: u16 = 64;
const OUTER_MARGIN: u16 = 2;
const PADDING_X: u16 = 3;
const PADDING_Y: u16 = 1;
const BUTTON_HEIGHT: u16 = 3;
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

pub struct App {
    terminal: Terminal,
    ui: UiState,
}

impl App {
    pub fn new(palette: Palette, selection: Selection<StdRng>) -> anyhow::Result<Self> {
        let terminal = Self::setup_terminal()?;
        log::debug!("setup terminal");
        Ok(Self {
            terminal,
            ui: UiState::new(palette, selection),
        })
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        self.ui.mount();
        self.render_ui()?;
        loop {
            if !crossterm::event::poll(POLL_TIMEOUT)? {
                continue;
            }
            match self.ui.handle_event(crossterm::event::read()?) {
                Action::Quit => break,
                Action::Redraw => self.render_ui()?,
                Action::None => {}
            }
        }
        Ok(())
    }

    fn render_ui(&mut self) -> anyhow::Result<()> {
        self.terminal.draw(|f| self.ui.render(f))?;
        Ok(())
    }

    fn setup_terminal() -> anyhow::Result<Terminal> {
        crossterm::terminal::enable_raw_mode()?;
        undo_on_error(Self::enter_screen(), Self::restore_terminal)
    }

    fn enter_screen() -> anyhow::Result<Terminal> {
        let mut stdout = std::io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture
        )?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let terminal = ratatui::Terminal::new(backend)?;
        Ok(terminal)
    }

    // Used when setup fails half way, before there is an `App` to drop.
    fn restore_terminal() {
        if let Err(e) = crossterm::terminal::disable_raw_mode() {
            log::warn!("failed to disable raw mode: {e}");
        }
        if let Err(e) = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        ) {
            log::warn!("failed to leave alternate screen: {e}");
        }
    }

    fn teardown_terminal(&mut self) -> anyhow::Result<()> {
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = self.teardown_terminal() {
            log::warn!("failed to tear down terminal: {e}");
        } else {
            log::debug!("tear down terminal");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Redraw,
    Quit,
}

/// Everything the screen shows, independent of the real terminal.
#[derive(Debug)]
pub struct UiState {
    palette: Palette,
    selection: Selection<StdRng>,
    button_area: Option<Rect>,
}

impl UiState {
    pub fn new(palette: Palette, selection: Selection<StdRng>) -> Self {
        Self {
            palette,
            selection,
            button_area: None,
        }
    }

    pub fn mount(&mut self) -> &'static Quote {
        self.selection.mount()
    }

    pub fn current(&self) -> &'static Quote {
        self.selection.current()
    }

    /// Where the button was drawn by the last [`UiState::render`] call.
    pub fn button_area(&self) -> Option<Rect> {
        self.button_area
    }

    pub fn handle_event(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Resize(_, _) => Action::Redraw,
            _ => Action::None,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => self.another(),
            _ => Action::None,
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Action {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Action::None;
        }
        match self.button_area {
            Some(area) if contains(area, mouse.column, mouse.row) => self.another(),
            _ => Action::None,
        }
    }

    fn another(&mut self) -> Action {
        let quote = self.selection.advance();
        log::info!("showing a quote by {}", quote.author);
        Action::Redraw
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.size();
        f.render_widget(
            Block::default().style(Style::default().bg(self.palette.background.color())),
            area,
        );

        let quote = self.current();
        let card_width = area
            .width
            .saturating_sub(OUTER_MARGIN * 2)
            .min(CARD_MAX_WIDTH);
        let text_width = card_width.saturating_sub(2 + PADDING_X * 2).max(1);
        let quote_lines = wrap(&format!("“{}”", quote.text), text_width as usize);
        let author_lines = wrap(&format!("— {}", quote.author), text_width as usize);

        // quote, gap, divider, gap, author, gap, button
        let content_height =
            quote_lines.len() as u16 + 3 + author_lines.len() as u16 + 1 + BUTTON_HEIGHT;
        let card_height =
            (content_height + 2 + PADDING_Y * 2).min(area.height.saturating_sub(1));
        let card = centered_rect(card_width, card_height, area);
        if card.width < 3 || card.height < 3 {
            self.button_area = None;
            self.render_help(f, area);
            return;
        }

        self.render_shadow(f, card, area);
        self.render_card(f, card, quote_lines, author_lines, text_width);
        self.render_help(f, area);
    }

    fn render_shadow(&self, f: &mut Frame, card: Rect, area: Rect) {
        let shadow = Rect {
            x: card.x + 1,
            y: card.y + 1,
            width: card.width.min(area.right().saturating_sub(card.x + 1)),
            height: card.height.min(area.bottom().saturating_sub(card.y + 1)),
        };
        f.render_widget(
            Block::default().style(Style::default().bg(self.palette.line.color())),
            shadow,
        );
    }

    fn render_card(
        &mut self,
        f: &mut Frame,
        card: Rect,
        quote_lines: Vec<String>,
        author_lines: Vec<String>,
        text_width: u16,
    ) {
        let p = self.palette;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(p.line.color()).bg(p.paper.color()))
            .style(Style::default().bg(p.paper.color()));
        let inner = block.inner(card);
        f.render_widget(Clear, card);
        f.render_widget(block, card);

        let inner = Rect {
            x: inner.x + PADDING_X.min(inner.width / 2),
            y: inner.y + PADDING_Y.min(inner.height / 2),
            width: text_width.min(inner.width),
            height: inner.height.saturating_sub(PADDING_Y * 2),
        };

        let ink = Style::default().fg(p.ink.color()).bg(p.paper.color());
        let mut lines: Vec<Line> = quote_lines
            .into_iter()
            .map(|l| Line::from(Span::styled(l, ink)))
            .collect();
        lines.push(Line::from(""));
        let divider_width = (text_width as usize * 2 / 5).max(1);
        lines.push(Line::from(Span::styled(
            "─".repeat(divider_width),
            Style::default().fg(p.line.color()).bg(p.paper.color()),
        )));
        lines.push(Line::from(""));
        let muted = Style::default().fg(p.muted.color()).bg(p.paper.color());
        lines.extend(
            author_lines
                .into_iter()
                .map(|l| Line::from(Span::styled(l, muted))),
        );

        let text_height =
            (lines.len() as u16).min(inner.height.saturating_sub(BUTTON_HEIGHT + 1));
        let text_area = Rect {
            height: text_height,
            ..inner
        };
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), text_area);

        let button_width = (UnicodeWidthStr::width(BUTTON_LABEL) as u16 + 6).min(inner.width);
        let button_y = text_area.bottom() + 1;
        if button_y + BUTTON_HEIGHT > inner.bottom() + PADDING_Y {
            self.button_area = None;
            return;
        }
        let button = Rect {
            x: inner.x + inner.width.saturating_sub(button_width) / 2,
            y: button_y,
            width: button_width,
            height: BUTTON_HEIGHT,
        };
        self.render_button(f, button);
        self.button_area = Some(button);
    }

    fn render_button(&self, f: &mut Frame, area: Rect) {
        let p = self.palette;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(
                Style::default()
                    .fg(p.accent_line.color())
                    .bg(p.accent_bg.color()),
            )
            .style(Style::default().bg(p.accent_bg.color()));
        let paragraph = Paragraph::new(Line::from(Span::styled(
            BUTTON_LABEL,
            Style::default().fg(p.ink.color()).bg(p.accent_bg.color()),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let help = Rect {
            y: area.bottom() - 1,
            height: 1,
            ..area
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "enter/space/click: another  ·  q: quit",
            Style::default()
                .fg(self.palette.muted.color())
                .bg(self.palette.background.color())
                .add_modifier(Modifier::DIM),
        )))
        .alignment(Alignment::Center);
        f.render_widget(paragraph, help);
    }
}

fn undo_on_error<T>(result: anyhow::Result<T>, undo: impl FnOnce()) -> anyhow::Result<T> {
    if let Err(e) = &result {
        log::debug!("undoing terminal setup: {e}");
        undo();
    }
    result
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Centered rectangle of the given size, clamped to `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Greedy word wrap by display width; words wider than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;
    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        if !line.is_empty() && line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
            continue;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        for c in word.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if line_width > 0 && line_width + w > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(c);
            line_width += w;
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::QuoteStore;
    use ratatui::backend::TestBackend;
    use rand::SeedableRng;

    static SHORT: [Quote; 3] = [
        Quote::new("Be here now.", "Ram Dass"),
        Quote::new("Keep going.", "Someone"),
        Quote::new("Slow down.", "Nobody"),
    ];

    fn state(quotes: &'static [Quote]) -> UiState {
        let selection = Selection::new(
            QuoteStore::new(quotes).unwrap(),
            StdRng::seed_from_u64(11),
        );
        UiState::new(Palette::MORNING, selection)
    }

    fn draw(ui: &mut UiState, width: u16, height: u16) -> String {
        let mut terminal = ratatui::Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn renders_quote_author_and_button() {
        let mut ui = state(&SHORT);
        let q = *ui.current();
        let screen = draw(&mut ui, 80, 24);
        assert!(screen.contains(&format!("“{}”", q.text)), "{screen}");
        assert!(screen.contains(&format!("— {}", q.author)), "{screen}");
        assert!(screen.contains(BUTTON_LABEL), "{screen}");
        assert!(ui.button_area().is_some());
    }

    #[test]
    fn renders_builtin_quotes_without_panicking() {
        let mut ui = UiState::new(
            Palette::EVENING,
            Selection::new(QuoteStore::builtin(), StdRng::seed_from_u64(1)),
        );
        ui.mount();
        for (w, h) in [(80, 24), (40, 30), (20, 10), (3, 3)] {
            draw(&mut ui, w, h);
        }
    }

    #[test]
    fn background_uses_palette() {
        let mut ui = state(&SHORT);
        let mut terminal = ratatui::Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui.render(f)).unwrap();
        let cell = terminal.backend().buffer().get(0, 0).clone();
        assert_eq!(cell.bg, Palette::MORNING.background.color());
    }

    #[test]
    fn click_on_button_advances() {
        let mut ui = state(&SHORT);
        draw(&mut ui, 80, 24);
        let before = *ui.current();
        let button = ui.button_area().unwrap();
        assert_eq!(ui.handle_event(click(button.x + 1, button.y + 1)), Action::Redraw);
        assert_ne!(*ui.current(), before);
    }

    #[test]
    fn click_outside_button_is_ignored() {
        let mut ui = state(&SHORT);
        draw(&mut ui, 80, 24);
        let before = *ui.current();
        assert_eq!(ui.handle_event(click(0, 0)), Action::None);
        assert_eq!(*ui.current(), before);
    }

    #[test]
    fn keys_advance_and_quit() {
        let mut ui = state(&SHORT);
        for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Char('n')] {
            let before = *ui.current();
            assert_eq!(ui.handle_event(key(code)), Action::Redraw);
            assert_ne!(*ui.current(), before);
        }
        assert_eq!(ui.handle_event(key(KeyCode::Char('x'))), Action::None);
        assert_eq!(ui.handle_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(ui.handle_event(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            ui.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Action::Quit
        );
        assert_eq!(ui.handle_event(Event::Resize(10, 10)), Action::Redraw);
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 5), vec![""]);
    }

    #[test]
    fn wrap_measures_wide_characters() {
        let lines = wrap("平和は内から来る 外に求めるな", 6);
        assert_eq!(lines, vec!["平和は", "内から", "来る", "外に求", "めるな"]);
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 6, "{line:?}");
        }
        assert_eq!(wrap("a 平和", 4), vec!["a", "平和"]);
    }

    #[test]
    fn wide_quote_stays_inside_card() {
        static WIDE: [Quote; 2] = [
            Quote::new(
                "平和は内から来る。外に求めるな。心が静かなとき、明晰さが現れる。",
                "ブッダ",
            ),
            Quote::new("Keep going.", "Someone"),
        ];
        let mut ui = state(&WIDE);
        let screen = draw(&mut ui, 40, 24);
        let text: String = screen
            .chars()
            .filter(|c| !matches!(c, ' ' | '\n' | '│' | '╭' | '╮' | '╰' | '╯'))
            .collect();
        assert!(text.contains(WIDE[0].text), "{screen}");

        // card spans columns 2..38 at 40 wide
        let button = ui.button_area().unwrap();
        let mut terminal = ratatui::Terminal::new(TestBackend::new(40, 24)).unwrap();
        terminal.draw(|f| ui.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        for y in (button.y - 6)..button.y {
            assert_eq!(buffer.get(37, y).symbol(), "│", "row {y}");
        }
    }

    #[test]
    fn failed_setup_is_undone() {
        let mut undone = false;
        let result: anyhow::Result<()> =
            undo_on_error(Err(anyhow::anyhow!("no tty")), || undone = true);
        assert!(result.is_err());
        assert!(undone);

        let mut undone = false;
        let result = undo_on_error(Ok(1), || undone = true);
        assert_eq!(result.unwrap(), 1);
        assert!(!undone);
    }

    #[test]
    fn centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 10, 3);
        let r = centered_rect(20, 5, area);
        assert_eq!(r, area);
        let r = centered_rect(4, 1, Rect::new(0, 0, 10, 3));
        assert_eq!(r, Rect::new(3, 1, 4, 1));
    }
}
