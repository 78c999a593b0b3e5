use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::model::MealDetail;
use crate::render::{instruction_lines, NO_MEALS_MESSAGE};
use crate::state::View;

const CELL_HEIGHT: u16 = 4;

/// Grid columns for a given width, roughly one per 40 cells up to three
pub fn grid_columns(width: u16) -> usize {
    match width {
        0..=59 => 1,
        60..=99 => 2,
        _ => 3,
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [header_area, input_area, status_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);
    render_input(app, frame, input_area);
    render_status(app, frame, status_area);

    match app.state.view() {
        View::Detail => {
            if let Some(meal) = &app.state.selected {
                render_detail(meal, app.detail_scroll, frame, body_area);
            }
        }
        View::Results => render_grid(app, frame, body_area),
        View::Empty => {
            let empty = Paragraph::new(NO_MEALS_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, body_area);
        }
        View::Pending => {}
    }

    render_footer(app, frame, footer_area);

    if let Some(message) = &app.state.alert {
        render_alert(message, frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Recipe Search ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(title).style(Style::default().bg(Color::Black)),
        area,
    );
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.focus == Focus::Input;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = if app.state.query.is_empty() && !editing {
        Span::styled(
            "Search recipe by ingredient",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(app.state.query.as_str())
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Ingredient "),
    );
    frame.render_widget(input, area);

    if editing && app.state.alert.is_none() {
        let x = area.x + 1 + app.cursor as u16;
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    if !app.state.loading() {
        return;
    }
    let dots = ".".repeat(app.animation_frame as usize + 1);
    let status = Paragraph::new(format!("Loading{}", dots))
        .style(Style::default().fg(Color::Blue))
        .centered();
    frame.render_widget(status, area);
}

fn render_grid(app: &mut App, frame: &mut Frame, area: Rect) {
    let columns = grid_columns(area.width);
    app.grid_columns = columns;

    let meals = &app.state.results;
    let visible_rows = (area.height / CELL_HEIGHT).max(1) as usize;
    let highlighted_row = app.grid_index / columns;
    let first_row = highlighted_row.saturating_sub(visible_rows - 1);

    let row_areas = Layout::vertical(vec![Constraint::Length(CELL_HEIGHT); visible_rows]).split(area);
    for (offset, row_area) in row_areas.iter().enumerate() {
        let row = first_row + offset;
        let cell_areas =
            Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(*row_area);

        for (col, cell_area) in cell_areas.iter().enumerate() {
            let index = row * columns + col;
            let Some(meal) = meals.get(index) else {
                return;
            };

            let highlighted = index == app.grid_index && app.focus == Focus::Results;
            let border_style = if highlighted {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let cell = Paragraph::new(vec![
                Line::from(Span::styled(
                    meal.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    meal.thumbnail.as_str(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
            frame.render_widget(cell, *cell_area);
        }
    }
}

/// Lines of the detail pane, before wrapping
pub fn detail_lines(meal: &MealDetail) -> Vec<Line<'_>> {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled(
            meal.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(meal.thumbnail.as_str(), muted)),
    ];

    let meta: Vec<&str> = [meal.category.as_deref(), meal.area.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(meta.join(" · "), muted)));
    }
    if !meal.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Tags: {}", meal.tags.join(", ")),
            muted,
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Ingredients:", heading)));
    for ingredient in meal.ingredient_lines() {
        lines.push(Line::from(format!("  • {}", ingredient)));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Instructions:", heading)));
    for line in instruction_lines(&meal.instructions) {
        lines.push(Line::from(line));
    }

    if let Some(youtube) = &meal.youtube {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(format!("Video: {}", youtube), muted)));
    }
    if let Some(source) = &meal.source {
        lines.push(Line::from(Span::styled(format!("Source: {}", source), muted)));
    }

    lines
}

fn render_detail(meal: &MealDetail, scroll: u16, frame: &mut Frame, area: Rect) {
    let detail = Paragraph::new(detail_lines(meal))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ← Back to Recipes (Esc) "),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(detail, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints: &[(&str, &str)] = match (app.state.view(), app.focus) {
        (View::Detail, Focus::Results) => &[
            ("Esc", "back"),
            ("j/k", "scroll"),
            ("/", "search"),
            ("q", "quit"),
        ],
        (_, Focus::Input) => &[("Enter", "search"), ("Tab", "results"), ("Ctrl-C", "quit")],
        (_, Focus::Results) => &[
            ("←↑↓→", "move"),
            ("Enter", "open"),
            ("/", "search"),
            ("q", "quit"),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" {} ", key), key_style),
                Span::styled(format!(" {} ", label), label_style),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_alert(message: &str, frame: &mut Frame, area: Rect) {
    let width = (message.chars().count() as u16 + 6).max(30).min(area.width);
    let height = 5.min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    let alert = Paragraph::new(vec![
        Line::from(message).centered(),
        Line::default(),
        Line::from(Span::styled("Enter to dismiss", Style::default().fg(Color::DarkGray)))
            .centered(),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(alert, popup);
}
