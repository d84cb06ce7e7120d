use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use keydrill::util::format_secs;

use crate::{App, AppState, Verdict};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Playing => render_playing(self, area, buf),
            AppState::Results => render_results(self, area, buf),
        }
    }
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // round counter
            Constraint::Min(1),    // padding
            Constraint::Length(2), // description
            Constraint::Length(2), // typed steps
            Constraint::Length(2), // verdict
            Constraint::Min(1),    // padding
            Constraint::Length(1), // timer + legend
        ])
        .split(area);

    if let Some(round) = &app.round {
        let mut counter = format!("{}/{}", round.index, round.count);
        if round.attempt > 1 {
            counter.push_str(&format!("   attempt {}", round.attempt));
        }
        Paragraph::new(Line::from(vec![
            Span::styled(counter, dim_style),
            Span::raw("   "),
            Span::styled(round.category.clone(), Style::default().fg(Color::Cyan)),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(round.description.clone(), bold_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);
    }

    if let Some(notice) = &app.notice {
        Paragraph::new(Span::styled(notice.clone(), Style::default().fg(Color::Yellow)))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }

    let typed = if app.input_steps.is_empty() {
        Span::styled("press the shortcut", dim_style.add_modifier(Modifier::ITALIC))
    } else {
        Span::styled(app.input_steps.clone(), Style::default().fg(Color::Magenta))
    };
    Paragraph::new(typed)
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    let verdict = match &app.verdict {
        Some(Verdict::Correct { steps }) => vec![Line::from(Span::styled(
            format!("correct: {steps}"),
            green_bold_style,
        ))],
        Some(Verdict::Failed { solution, steps }) => vec![
            Line::from(Span::styled(format!("wrong: {steps}"), red_bold_style)),
            Line::from(Span::styled(format!("solution: {solution}"), bold_style)),
        ],
        None => Vec::new(),
    };
    Paragraph::new(verdict)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    let mut footer = vec![Span::styled(format_secs(app.elapsed_secs), dim_style)];
    if app.paused {
        footer.push(Span::styled(" (paused)", dim_style));
    }
    footer.push(Span::styled(
        format!("   ({}) quit", app.quit_key.to_lowercase()),
        dim_style.add_modifier(Modifier::ITALIC),
    ));
    Paragraph::new(Line::from(footer))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // summary
            Constraint::Min(1),    // table
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let Some(report) = &app.report else {
        return;
    };

    let mut summary = format!(
        "{} shortcuts in {}   {} on the first try",
        report.round_count(),
        format_secs(report.total_secs),
        report.first_try_count()
    );
    if let Some(avg) = report.average_secs() {
        summary.push_str(&format!("   {avg:.1}s avg"));
    }
    Paragraph::new(Span::styled(summary, bold_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let description_width = report
        .rounds
        .iter()
        .map(|r| r.description.width())
        .max()
        .unwrap_or(0)
        .max("Shortcut".len()) as u16;

    let header = Row::new(vec![
        Cell::from("Shortcut"),
        Cell::from("Category"),
        Cell::from("Misses"),
        Cell::from("Time"),
    ])
    .style(bold_style.fg(Color::Yellow));

    let rows = report.rounds.iter().map(|r| {
        let style = if r.misses > 0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Row::new(vec![
            Cell::from(r.description.clone()),
            Cell::from(r.category.clone()),
            Cell::from(r.misses.to_string()),
            Cell::from(format_secs(r.seconds)),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Max(description_width),
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .column_spacing(2);
    Widget::render(table, chunks[1], buf);

    let legend = Paragraph::new(Span::styled(
        format!(
            "(r)etry / (n)ew shuffled / ({}) quit",
            app.quit_key.to_lowercase()
        ),
        italic_style,
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[3], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use keydrill::{config::Config, round::Round};

    fn create_test_app() -> App {
        let rounds = vec![
            Round::parse("Browser", "Open a new tab", "ControlKey+T").unwrap(),
            Round::parse("Browser", "Reload the page", "F5||ControlKey+R").unwrap(),
        ];
        App::new(rounds, &Config::default()).unwrap()
    }

    fn rendered(app: &App, area: Rect) -> String {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_playing_shows_round() {
        let app = create_test_app();
        let text = rendered(&app, Rect::new(0, 0, 80, 24));

        assert!(text.contains("Open a new tab"));
        assert!(text.contains("1/2"));
        assert!(text.contains("press the shortcut"));
    }

    #[test]
    fn test_notice_is_shown() {
        let mut app = create_test_app();
        app.notice = Some("3 shortcuts left out".to_string());
        let text = rendered(&app, Rect::new(0, 0, 80, 24));

        assert!(text.contains("3 shortcuts left out"));
    }

    #[test]
    fn test_failed_verdict_shows_solution() {
        let mut app = create_test_app();
        app.on_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL))
            .unwrap();
        let text = rendered(&app, Rect::new(0, 0, 80, 24));

        assert!(text.contains("wrong: Ctrl+W"));
        assert!(text.contains("solution: Ctrl+T"));
    }

    #[test]
    fn test_results_table() {
        let mut app = create_test_app();
        app.on_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL))
            .unwrap();
        app.on_tick().unwrap();
        app.on_tick().unwrap();
        app.on_key(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE))
            .unwrap();
        app.on_tick().unwrap();
        app.on_tick().unwrap();
        assert_eq!(app.state, AppState::Results);

        let text = rendered(&app, Rect::new(0, 0, 100, 24));
        assert!(text.contains("2 shortcuts"));
        assert!(text.contains("Reload the page"));
        assert!(text.contains("(r)etry"));
    }

    #[test]
    fn test_small_area() {
        let app = create_test_app();
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);

        (&app).render(area, &mut buffer);

        assert!(*buffer.area() == area);
    }

    #[test]
    fn test_ui_constants() {
        assert_eq!(HORIZONTAL_MARGIN, 5);
        assert_eq!(VERTICAL_MARGIN, 2);
    }
}
