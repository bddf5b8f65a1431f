use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    clock::Clock,
    game::{DisplayState, GameState},
    pursuit::{
        CAPTURE_MARGIN, EXPECTED_CHARS_PER_SECOND, LAG_THRESHOLD, PURSUED_START, PURSUER_STEP, TRACK_LENGTH,
    },
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const FISH: &str = "><>";
const SHARK: &str = "=^=>";

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = self.game.display_state();
        match display.game_state {
            GameState::Start => render_start(area, buf),
            GameState::Rules => render_rules(area, buf),
            GameState::Playing => render_playing(&display, &self.input_buffer, area, buf),
            GameState::Won | GameState::Lost => render_end(&display, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

fn centered(lines: Vec<Line<'static>>, area: Rect, buf: &mut Buffer) {
    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

fn render_start(area: Rect, buf: &mut Buffer) {
    centered(
        vec![
            Line::styled(
                format!("{FISH}  Shark Typing Game  {SHARK}"),
                bold().fg(Color::Blue),
            ),
            Line::styled(
                "Help the fish escape from the shark by typing fast!",
                Style::default().fg(Color::Cyan),
            ),
            Line::raw(""),
            Line::styled("(p)lay / (r)ules / (esc)ape", italic()),
        ],
        area,
        buf,
    );
}

fn render_rules(area: Rect, buf: &mut Buffer) {
    let bullet = |text: String, color: Color| {
        Line::from(vec![
            Span::styled("• ", Style::default().fg(color)),
            Span::raw(text),
        ])
    };

    centered(
        vec![
            Line::styled("How to Play", bold().fg(Color::Blue)),
            Line::raw(""),
            bullet(
                "Type the text as quickly and accurately as possible to help the fish escape!"
                    .into(),
                Color::Blue,
            ),
            bullet(
                "The fish moves forward based on your typing progress.".into(),
                Color::Blue,
            ),
            bullet(
                format!(
                    "Keep up {EXPECTED_CHARS_PER_SECOND} characters per second. Fall behind by \
                     {LAG_THRESHOLD}+ and the shark moves {PURSUER_STEP} closer!"
                ),
                Color::Red,
            ),
            bullet(
                "Complete the text correctly to win and save the fish.".into(),
                Color::Green,
            ),
            bullet(
                format!("If the shark gets within {CAPTURE_MARGIN} of the fish, you lose!"),
                Color::Red,
            ),
            Line::raw(""),
            Line::styled("Scoring: words per minute, accuracy, time to complete", italic()),
            Line::raw(""),
            Line::styled("(p)lay / (b)ack", italic()),
        ],
        area,
        buf,
    );
}

/// Maps a track coordinate onto a column that keeps `glyph` inside `width`.
fn track_column(position: f64, glyph: &str, width: u16) -> u16 {
    let usable = width.saturating_sub(glyph.width() as u16) as f64;
    let end = PURSUED_START + TRACK_LENGTH;
    ((position / end).clamp(0.0, 1.0) * usable).round() as u16
}

fn render_ocean(display: &DisplayState, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Ocean")
        .style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height < 2 || inner.width == 0 {
        return;
    }

    let fish_x = track_column(display.pursued_position, FISH, inner.width);
    let shark_x = track_column(display.pursuer_position, SHARK, inner.width);
    let fish_y = inner.y + inner.height / 2 - 1;

    buf.set_string(
        inner.x + fish_x,
        fish_y,
        FISH,
        bold().fg(Color::Rgb(255, 165, 0)),
    );
    buf.set_string(
        inner.x + shark_x,
        fish_y + 1,
        SHARK,
        bold().fg(Color::Gray),
    );
}

fn prompt_spans(display: &DisplayState) -> Vec<Span<'static>> {
    let green_bold = bold().fg(Color::Green);
    let red_bold = bold().fg(Color::Red);
    let dim_bold = bold().add_modifier(Modifier::DIM);
    let cursor = dim_bold.add_modifier(Modifier::UNDERLINED);

    let typed: Vec<char> = display.typed_input.chars().collect();

    display
        .target_text
        .chars()
        .enumerate()
        .map(|(idx, expected)| match typed.get(idx) {
            Some(&c) if c == expected => Span::styled(expected.to_string(), green_bold),
            Some(&c) => Span::styled(
                match c {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold,
            ),
            None if idx == typed.len() => Span::styled(expected.to_string(), cursor),
            None => Span::styled(expected.to_string(), dim_bold),
        })
        .collect()
}

fn status_message(display: &DisplayState) -> &'static str {
    if display.typed_input.is_empty() {
        "Start typing to help the fish escape!"
    } else if !display.is_correct_prefix() {
        "Check your typing - the shark is getting closer!"
    } else {
        "Great! Keep going!"
    }
}

fn render_playing(display: &DisplayState, input: &str, area: Rect, buf: &mut Buffer) {
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_lines =
        ((display.target_text.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN.min(area.height / 8))
        .constraints([
            Constraint::Length(6),            // ocean
            Constraint::Length(1),            // stats
            Constraint::Length(1),            // progress bar
            Constraint::Length(1),            // padding
            Constraint::Length(prompt_lines), // prompt
            Constraint::Length(1),            // padding
            Constraint::Length(3),            // input field
            Constraint::Length(1),            // status
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    render_ocean(display, chunks[0], buf);

    let stats = &display.statistics;
    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {}s   {}%",
            stats.wpm,
            stats.accuracy,
            stats.elapsed_secs.round(),
            stats.progress.round()
        ),
        bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio((stats.progress / 100.0).clamp(0.0, 1.0))
        .label("")
        .render(chunks[2], buf);

    Paragraph::new(Line::from(prompt_spans(display)))
        .alignment(if prompt_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: false })
        .render(chunks[4], buf);

    let border = if display.is_correct_prefix() {
        Color::Green
    } else {
        Color::Red
    };
    Paragraph::new(input.to_string())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .render(chunks[6], buf);

    Paragraph::new(Span::styled(status_message(display), italic()))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

    Paragraph::new(Span::styled("(esc) menu", italic())).render(chunks[9], buf);
}

fn render_end(display: &DisplayState, area: Rect, buf: &mut Buffer) {
    let won = display.game_state == GameState::Won;
    let (title, message, color) = if won {
        (
            "Fish Escaped!",
            "Congratulations! You saved the fish!",
            Color::Green,
        )
    } else {
        (
            "Shark Attack!",
            "The shark caught the fish. Try again!",
            Color::Red,
        )
    };
    let stats = &display.statistics;

    centered(
        vec![
            Line::styled(title, bold().fg(color)),
            Line::styled(message, Style::default().fg(color)),
            Line::raw(""),
            Line::styled(format!("{} wpm", stats.wpm), bold().fg(Color::Blue)),
            Line::styled(format!("{}% accuracy", stats.accuracy), bold().fg(Color::Green)),
            Line::styled(
                format!("{}s", stats.elapsed_secs.round()),
                bold().fg(Color::Magenta),
            ),
            Line::styled(
                format!("{} characters", stats.characters_typed),
                bold().fg(Color::Yellow),
            ),
            Line::raw(""),
            Line::styled("(p)lay again / (m)enu / (esc)ape", italic()),
        ],
        area,
        buf,
    );
}
