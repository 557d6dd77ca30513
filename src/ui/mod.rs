use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::users::ADULT_AGE;

/// Screen regions, top to bottom
pub struct Areas {
    pub heading: Rect,
    pub users: Rect,
    pub button: Rect,
    pub footer: Rect,
}

pub fn layout(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1),   // Heading
            Constraint::Min(3),      // Users box
            Constraint::Length(3),   // Counter button
            Constraint::Length(1),   // Footer
        ])
        .split(area);

    Areas {
        heading: chunks[0],
        users: chunks[1],
        button: chunks[2],
        footer: chunks[3],
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout(f.area());

    draw_heading(f, app, areas.heading);
    draw_users_box(f, app, areas.users);
    draw_button(f, app, areas.button);
    draw_footer(f, app, areas.footer);

    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, app),
    }
}

fn draw_heading(f: &mut Frame, app: &App, area: Rect) {
    let heading = Paragraph::new(Span::styled(
        app.config.heading.as_str(),
        Style::default().fg(app.theme.header).add_modifier(Modifier::BOLD),
    ));

    f.render_widget(heading, area);
}

fn draw_users_box(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let names = app.names();

    let title = format!(" Users {}/{} ", names.len(), app.total_users());
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(theme.accent)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    if names.is_empty() {
        let empty = Paragraph::new(Span::styled(
            format!("No users aged {} or over", ADULT_AGE),
            Style::default().fg(theme.text_dim),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .adults()
        .map(|user| {
            let mut spans = vec![Span::styled(user.name.as_str(), Style::default().fg(theme.text))];
            if app.config.show_ages {
                spans.push(Span::styled(
                    format!(" ({})", user.age),
                    Style::default().fg(theme.text_dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn draw_button(f: &mut Frame, app: &App, area: Rect) {
    let accent = app.theme.accent;

    let button = Paragraph::new(Span::styled(
        format!("count {}", app.counter.value()),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent)),
    );

    f.render_widget(button, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let line = if let Some(ref msg) = app.status_message {
        Line::from(Span::styled(msg.as_str(), Style::default().fg(theme.header)))
    } else {
        Line::from(vec![
            Span::styled("Space", Style::default().fg(theme.accent)),
            Span::styled(" count  ", Style::default().fg(theme.text_dim)),
            Span::styled("?", Style::default().fg(theme.accent)),
            Span::styled(" help  ", Style::default().fg(theme.text_dim)),
            Span::styled("q", Style::default().fg(theme.accent)),
            Span::styled(" quit", Style::default().fg(theme.text_dim)),
        ])
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect(60, 60, f.area());

    f.render_widget(Clear, popup_area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(theme.accent)),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        Line::from(""),
        key("  Space/Enter  ", "Click the counter button"),
        key("  +/c          ", "Click the counter button"),
        key("  Mouse click  ", "Click the counter button"),
        key("  ?/h          ", "Toggle this help"),
        key("  q/Ctrl-C     ", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Listing users aged {} or over, youngest first", ADULT_AGE),
            Style::default().fg(theme.text_dim),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" roster Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::users::{self, User};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let symbols: Vec<&str> = buffer.content().iter().map(|c| c.symbol()).collect();
        symbols.chunks(width).map(|row| row.concat()).collect()
    }

    fn row_of(rows: &[String], needle: &str) -> Option<usize> {
        rows.iter().position(|r| r.contains(needle))
    }

    #[test]
    fn test_renders_heading_names_and_counter() {
        let mut app = App::new(AppConfig::default(), users::builtin());
        app.increment();
        app.increment();

        let rows = render(&app);

        assert_eq!(row_of(&rows, "Hello, World!"), Some(0));
        assert!(row_of(&rows, "Bob").is_none());
        let alice = row_of(&rows, "Alice").unwrap();
        let charlie = row_of(&rows, "Charlie").unwrap();
        assert!(alice < charlie);
        assert!(row_of(&rows, "count 2").is_some());
    }

    #[test]
    fn test_renders_ages_when_enabled() {
        let config = AppConfig { show_ages: true, ..AppConfig::default() };
        let app = App::new(config, users::builtin());

        let rows = render(&app);
        assert!(row_of(&rows, "Alice (22)").is_some());
    }

    #[test]
    fn test_renders_empty_message() {
        let app = App::new(AppConfig::default(), vec![User::new(1, "Kid", 9)]);

        let rows = render(&app);
        assert!(row_of(&rows, "No users aged 18 or over").is_some());
        assert!(row_of(&rows, "count 0").is_some());
    }

    #[test]
    fn test_button_area_is_above_footer() {
        let areas = layout(Rect::new(0, 0, 40, 12));
        assert_eq!(areas.button.height, 3);
        assert_eq!(areas.footer.y, 11);
        assert_eq!(areas.button.y + areas.button.height, areas.footer.y);
    }
}
