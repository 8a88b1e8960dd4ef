pub mod charting;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::{
    app::App,
    input::Outcome,
    session::{SessionState, TestDuration},
    view::{ProjectedChar, RenderModel},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const EXTRA_SPACE_MARKER: char = '_';

/// One terminal cell of the typing line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledCell {
    pub symbol: char,
    pub style: Style,
}

impl StyledCell {
    fn new(symbol: char, style: Style) -> Self {
        Self { symbol, style }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.state).render(self, area, buf);
    }
}

/// Char to draw for a classified position: the typed char when it was wrong.
fn shown(c: &ProjectedChar) -> char {
    match (c.outcome, c.typed) {
        (Outcome::Correct, _) | (Outcome::Incorrect, None) => c.expected,
        (Outcome::Incorrect, Some(t)) if t.is_whitespace() => EXTRA_SPACE_MARKER,
        (Outcome::Incorrect, Some(t)) => t,
    }
}

fn classified(c: &ProjectedChar) -> StyledCell {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let style = match c.outcome {
        Outcome::Correct => bold.fg(Color::Green),
        Outcome::Incorrect => bold.fg(Color::Red),
    };
    StyledCell::new(shown(c), style)
}

/// Cells of the whole typing line and the index of the cursor cell.
pub fn typing_cells(model: &RenderModel) -> (Vec<StyledCell>, usize) {
    let marker_style = Style::default().fg(Color::Red).add_modifier(Modifier::DIM);
    let overflow_style = Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD | Modifier::CROSSED_OUT);
    let current_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let remaining_style = Style::default().fg(Color::DarkGray);

    let mut cells = Vec::new();
    for word in &model.completed {
        cells.extend(word.chars.iter().map(classified));
        if let Some(sep) = &word.separator {
            cells.push(classified(sep));
        }
        cells.extend((0..word.extra_spaces).map(|_| StyledCell::new(EXTRA_SPACE_MARKER, marker_style)));
    }
    cells.extend(model.current_typed.iter().map(classified));
    cells.extend(model.overflow.chars().map(|c| StyledCell::new(c, overflow_style)));

    let cursor = model.cursor_column();
    cells.extend(model.current_untyped.chars().enumerate().map(|(i, c)| {
        let style = if i == 0 {
            current_style.add_modifier(Modifier::UNDERLINED)
        } else {
            current_style
        };
        StyledCell::new(c, style)
    }));
    if !model.remaining.is_empty() {
        cells.push(StyledCell::new(' ', remaining_style));
        cells.extend(model.remaining.chars().map(|c| StyledCell::new(c, remaining_style)));
    }

    (cells, cursor)
}

/// Window of `cells` that keeps the cursor in the middle of `width` columns.
pub fn scrolled_line(cells: &[StyledCell], cursor: usize, width: u16) -> Line<'static> {
    let width = usize::from(width);
    let half = width / 2;
    let widths: Vec<usize> = cells.iter().map(|c| c.symbol.width().unwrap_or(0)).collect();
    let cursor_col: usize = widths.iter().take(cursor).sum();

    let mut spans = Vec::new();
    let mut used = 0;
    let skip_cols = if cursor_col < half {
        let pad = half - cursor_col;
        spans.push(Span::raw(" ".repeat(pad)));
        used = pad;
        0
    } else {
        cursor_col - half
    };

    let mut col = 0;
    for (cell, w) in cells.iter().zip(widths) {
        if col < skip_cols {
            col += w;
            continue;
        }
        if used + w > width {
            break;
        }
        spans.push(Span::styled(cell.symbol.to_string(), cell.style));
        used += w;
        col += w;
    }

    Line::from(spans)
}

fn title_line() -> Line<'static> {
    Line::from(vec![
        Span::styled("TypeTastic", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            "  test your typing speed and accuracy",
            Style::default().fg(Color::Gray),
        ),
    ])
}

fn settings_line(app: &App) -> Line<'static> {
    let selected = Style::default()
        .fg(Color::Black)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD);
    let unselected = Style::default().fg(Color::Gray);
    let toggle = |on: bool| if on { selected } else { unselected };

    let mut spans: Vec<Span<'static>> = TestDuration::ALL
        .iter()
        .flat_map(|d| {
            [
                Span::styled(format!(" {d} "), toggle(*d == app.settings.duration)),
                Span::raw(" "),
            ]
        })
        .collect();
    spans.push(Span::styled("│ ", unselected));
    spans.push(Span::styled(" numbers ", toggle(app.settings.include_numbers)));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        " punctuation ",
        toggle(app.settings.include_punctuation),
    ));
    Line::from(spans)
}

fn stat_card(title: &'static str, value: String) -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        value,
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title).alignment(Alignment::Center)),
    )
}

pub(crate) fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let snap = &app.snapshot;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // settings
            Constraint::Length(1), // padding
            Constraint::Length(3), // stat cards
            Constraint::Length(1), // padding
            Constraint::Length(3), // typing line
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(title_line()).render(chunks[0], buf);
    Paragraph::new(settings_line(app))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[3]);
    stat_card("Time", format!("{}s", snap.clock.remaining_secs)).render(cards[0], buf);
    stat_card("WPM", snap.score.wpm.to_string()).render(cards[1], buf);
    stat_card("Accuracy", format!("{}%", snap.score.accuracy)).render(cards[2], buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(chunks[5]);
    block.render(chunks[5], buf);
    let (cells, cursor) = typing_cells(&snap.view);
    Paragraph::new(scrolled_line(&cells, cursor, inner.width)).render(inner, buf);

    let legend = if snap.session_state == SessionState::Idle {
        "start typing to begin / (tab) new / (↑↓) duration / (^n) numbers / (^p) punctuation / (esc)ape"
    } else {
        "(tab) new / (↑↓) duration / (^n) numbers / (^p) punctuation / (esc)ape"
    };
    Paragraph::new(Span::styled(
        legend,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[7], buf);
}

pub(crate) fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let snap = &app.snapshot;
    let history = app.test.history();
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // settings
            Constraint::Min(1),    // chart
            Constraint::Length(1), // stats
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(title_line()).render(chunks[0], buf);
    Paragraph::new(settings_line(app))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(history, app.test.session().duration_secs());
    let tuples: Vec<(f64, f64)> = history.points().iter().map(|p| (*p).into()).collect();
    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&tuples)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(charting::format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        )
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {:.2} sd",
            snap.score.wpm,
            snap.score.accuracy,
            history.consistency()
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "(r) try again / (tab) new / (↑↓) duration / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);
}
