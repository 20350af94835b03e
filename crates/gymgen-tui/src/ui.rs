use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use crate::app::{App, Field, Screen};
use gymgen_core::{ExperienceLevel, Goal, SessionState, WorkoutPlanResponse};

pub fn render(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    match app.screen() {
        Screen::Input => render_input_screen(app, frame, main_area),
        Screen::Loading => render_loading_screen(app, frame, main_area),
        Screen::Plan => render_plan_screen(app, frame, main_area),
        Screen::Error => render_error_screen(app, frame, main_area),
    }

    render_status_bar(app, frame, status_area);
}

fn border_color(focused: bool) -> Color {
    if focused { Color::Cyan } else { Color::DarkGray }
}

fn option_item(label: &str, chosen: bool) -> ListItem<'_> {
    let marker = if chosen { "(x) " } else { "( ) " };
    let style = if chosen {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(vec![Span::raw(marker), Span::styled(label, style)]))
}

fn render_input_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [title_area, goal_area, experience_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(Goal::all().len() as u16 + 2),
        Constraint::Length(ExperienceLevel::all().len() as u16 + 2),
        Constraint::Min(0),
    ])
    .areas(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "GymGen",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, title_area);

    let goal_items: Vec<ListItem> = Goal::all()
        .into_iter()
        .map(|goal| option_item(goal.display_name(), app.selected_goal == Some(goal)))
        .collect();
    let goal_list = List::new(goal_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color(app.focus == Field::Goal)))
                .title(" Goal "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(goal_list, goal_area, &mut app.goal_state);

    let experience_items: Vec<ListItem> = ExperienceLevel::all()
        .into_iter()
        .map(|level| option_item(level.display_name(), app.selected_experience == Some(level)))
        .collect();
    let experience_list = List::new(experience_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color(app.focus == Field::Experience)))
                .title(" Experience Level "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(experience_list, experience_area, &mut app.experience_state);

    let mut lines = vec![Line::from(Span::styled(
        "Generate My Workout  [Enter]",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))];
    if app.show_selection_hint {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Please select both fields to continue",
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
        hint_area,
    );
}

fn render_loading_screen(app: &App, frame: &mut Frame, area: Rect) {
    let [_, content_area, _] = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    // Animated ellipsis: cycles through ".", "..", "..."
    let dots = ".".repeat((app.animation_frame as usize) + 1);
    let text = Text::from(vec![
        Line::from(Span::styled(
            format!("Generating your workout plan{}", dots),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Please wait a moment",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ]);

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), content_area);
}

/// Lines for a whole plan, one block per training day
pub fn plan_lines(plan: &WorkoutPlanResponse) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Your personalized workout plan is ready!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    for day in &plan.weekly_plan {
        lines.push(Line::from(Span::styled(
            day.day_label.as_str(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));

        for exercise in &day.exercises {
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(exercise.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "    {} sets × {} reps, rest {}",
                    exercise.sets, exercise.reps, exercise.rest
                ),
                Style::default().fg(Color::Gray),
            )));
            for tip in &exercise.safety_tips {
                lines.push(Line::from(Span::styled(
                    format!("    ⚠ {}", tip),
                    Style::default().fg(Color::Magenta),
                )));
            }
        }
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled(
        "Remember to warm up before and stretch after your workouts.",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));
    lines
}

pub fn plan_title(plan: &WorkoutPlanResponse) -> String {
    format!(
        " Your Weekly Plan ({} days, {} exercises) ",
        plan.weekly_plan.len(),
        plan.total_exercises()
    )
}

fn render_plan_screen(app: &App, frame: &mut Frame, area: Rect) {
    let SessionState::Succeeded(plan) = &app.state else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(plan_title(plan));

    let plan_view = Paragraph::new(Text::from(plan_lines(plan)))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.plan_scroll, 0));

    frame.render_widget(plan_view, area);
}

fn render_error_screen(app: &App, frame: &mut Frame, area: Rect) {
    let SessionState::Failed { message, .. } = &app.state else {
        return;
    };

    let [_, content_area, _] = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Min(7),
        Constraint::Percentage(30),
    ])
    .areas(area);

    let text = Text::from(vec![
        Line::from(Span::styled(
            "Oops! Something went wrong",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(message.as_str()),
        Line::default(),
        Line::from(Span::styled(
            "Try again  [Enter]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    ]);

    let error_view = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(error_view, content_area);
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let keys = match app.screen() {
        Screen::Input => "j/k: move  Space: choose  Tab: switch field  Enter: generate  q: quit",
        Screen::Loading => "q: quit",
        Screen::Plan => "j/k: scroll  PgUp/PgDn: page  b: back  q: quit",
        Screen::Error => "Enter: try again  q: quit",
    };

    let status = Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(app.server_url.as_str(), Style::default().fg(Color::Blue)),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
