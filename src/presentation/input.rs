use crate::application::{App, AppMode, Field, Focus};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Alert => Self::handle_alert_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    /// Whether the key should end the program in the current state.
    pub fn is_quit(app: &App, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return true;
        }
        app.mode == AppMode::Normal && app.focus == Focus::List && key == KeyCode::Char('q')
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if key == KeyCode::Char('e') {
                let _ = app.export();
            }
            return;
        }

        match key {
            KeyCode::Tab => {
                app.cycle_focus(true);
                return;
            }
            KeyCode::BackTab => {
                app.cycle_focus(false);
                return;
            }
            _ => {}
        }

        match app.focus {
            Focus::Input(field) => Self::handle_form_input(app, field, key),
            Focus::List => Self::handle_list(app, key),
        }
    }

    fn handle_form_input(app: &mut App, field: Field, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let _ = app.submit();
            }
            KeyCode::Esc => {
                if app.is_editing() {
                    app.cancel_edit();
                } else {
                    app.focus = Focus::List;
                }
            }
            KeyCode::Up => app.cycle_focus(false),
            KeyCode::Down => app.cycle_focus(true),
            KeyCode::Backspace => app.form.backspace(field),
            KeyCode::Delete => app.form.delete(field),
            KeyCode::Left => app.form.move_left(),
            KeyCode::Right => app.form.move_right(field),
            KeyCode::Home => app.form.move_home(),
            KeyCode::End => app.form.move_end(field),
            KeyCode::Char(c) => {
                app.status_message = None;
                app.form.insert_char(field, c);
            }
            _ => {}
        }
    }

    fn handle_list(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Enter | KeyCode::Char('e') => {
                app.edit_selected();
            }
            KeyCode::Delete | KeyCode::Char('d') => app.delete_selected(),
            KeyCode::Char('a') => app.focus_input(Field::Name),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Esc => {
                app.status_message = None;
            }
            _ => {}
        }
    }

    fn handle_alert_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_alert();
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
