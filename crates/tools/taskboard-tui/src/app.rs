use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_sync::{TaskId, TaskListState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Typing the title of a new task
    #[default]
    Editing,
    /// Moving through the list
    Browsing,
}

/// What the event loop should do in response to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Input(char),
    Backspace,
    Submit,
    Toggle { id: TaskId, completed: bool },
    Delete(TaskId),
    Reload,
}

/// View-only state; the task data itself lives in the controller.
#[derive(Debug, Default)]
pub struct App {
    pub mode: InputMode,
    pub selected: usize,
}

impl App {
    /// Keep the selection inside a list of `len` tasks.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent, view: &TaskListState) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        if matches!(key.code, KeyCode::Esc | KeyCode::Tab) {
            self.mode = match self.mode {
                InputMode::Editing => InputMode::Browsing,
                InputMode::Browsing => InputMode::Editing,
            };
            return Action::None;
        }

        match self.mode {
            InputMode::Editing => match key.code {
                KeyCode::Enter => Action::Submit,
                KeyCode::Backspace => Action::Backspace,
                KeyCode::Char(c) => Action::Input(c),
                _ => Action::None,
            },
            InputMode::Browsing => self.handle_browsing_key(key.code, view),
        }
    }

    fn handle_browsing_key(&mut self, code: KeyCode, view: &TaskListState) -> Action {
        let len = view.tasks.len();
        match code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Char('i') => {
                self.mode = InputMode::Editing;
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Char(' ') | KeyCode::Enter => match view.tasks.as_slice().get(self.selected) {
                Some(task) => Action::Toggle {
                    id: task.id.clone(),
                    completed: task.completed,
                },
                None => Action::None,
            },
            KeyCode::Delete | KeyCode::Char('d') => match view.tasks.as_slice().get(self.selected) {
                Some(task) => Action::Delete(task.id.clone()),
                None => Action::None,
            },
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_sync::{Task, TaskCollection};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view() -> TaskListState {
        TaskListState {
            tasks: TaskCollection::from(vec![
                Task {
                    id: TaskId::from("2"),
                    title: "Call mom".to_string(),
                    completed: false,
                },
                Task {
                    id: TaskId::from("1"),
                    title: "Buy milk".to_string(),
                    completed: true,
                },
            ]),
            loading: false,
            input: String::new(),
        }
    }

    #[test]
    fn test_editing_keys() {
        let mut app = App::default();
        let view = view();
        assert_eq!(app.handle_key(key(KeyCode::Char('q')), &view), Action::Input('q'));
        assert_eq!(app.handle_key(key(KeyCode::Backspace), &view), Action::Backspace);
        assert_eq!(app.handle_key(key(KeyCode::Enter), &view), Action::Submit);
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let mut app = App::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c, &view()), Action::Quit);

        app.mode = InputMode::Browsing;
        assert_eq!(app.handle_key(ctrl_c, &view()), Action::Quit);
    }

    #[test]
    fn test_browsing_selects_and_toggles() {
        let mut app = App::default();
        let view = view();

        assert_eq!(app.handle_key(key(KeyCode::Esc), &view), Action::None);
        assert_eq!(app.mode, InputMode::Browsing);

        app.handle_key(key(KeyCode::Down), &view);
        app.handle_key(key(KeyCode::Down), &view);
        assert_eq!(app.selected, 1);

        assert_eq!(
            app.handle_key(key(KeyCode::Char(' ')), &view),
            Action::Toggle {
                id: TaskId::from("1"),
                completed: true
            }
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Delete), &view),
            Action::Delete(TaskId::from("1"))
        );
        assert_eq!(app.handle_key(key(KeyCode::Char('r')), &view), Action::Reload);
        assert_eq!(app.handle_key(key(KeyCode::Char('q')), &view), Action::Quit);
    }

    #[test]
    fn test_empty_list_has_nothing_to_toggle() {
        let mut app = App {
            mode: InputMode::Browsing,
            selected: 0,
        };
        let empty = TaskListState::default();
        assert_eq!(app.handle_key(key(KeyCode::Enter), &empty), Action::None);
        assert_eq!(app.handle_key(key(KeyCode::Char('d')), &empty), Action::None);
    }

    #[test]
    fn test_clamp_selection_after_delete() {
        let mut app = App {
            mode: InputMode::Browsing,
            selected: 4,
        };
        app.clamp_selection(2);
        assert_eq!(app.selected, 1);
        app.clamp_selection(0);
        assert_eq!(app.selected, 0);
    }
}
