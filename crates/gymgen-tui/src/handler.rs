use crate::app::{App, Screen};
use crate::tui::AppEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::State(state) => app.apply_state(state),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work on every screen
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.screen() {
        Screen::Input => handle_input_screen(app, key),
        Screen::Loading => {
            if key.code == KeyCode::Char('q') {
                app.should_quit = true;
            }
        }
        Screen::Plan => handle_plan_screen(app, key),
        Screen::Error => handle_error_screen(app, key),
    }
}

fn handle_input_screen(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.option_down(),
        KeyCode::Char('k') | KeyCode::Up => app.option_up(),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Char(' ') => app.choose_option(),
        KeyCode::Enter | KeyCode::Char('g') => app.generate(),
        _ => {}
    }
}

fn handle_plan_screen(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.scroll_plan_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_plan_up(),
        KeyCode::PageDown => {
            for _ in 0..10 {
                app.scroll_plan_down();
            }
        }
        KeyCode::PageUp => {
            for _ in 0..10 {
                app.scroll_plan_up();
            }
        }
        KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace => app.reset(),
        _ => {}
    }
}

fn handle_error_screen(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Esc => app.reset(),
        _ => {}
    }
}
