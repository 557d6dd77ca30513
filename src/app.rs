use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::counter::Counter;
use crate::theme::Theme;
use crate::users::{self, User};

/// How long a status message stays in the footer
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub popup: Popup,
    pub config: AppConfig,
    pub theme: Theme,

    // Source records, never mutated after construction
    users: Vec<User>,
    // Derived view, computed once from `users`
    adults: Vec<usize>,

    pub counter: Counter,

    // Status message (shown in footer, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig, users: Vec<User>) -> Self {
        let adults = users::adult_indices_by_age(&users);
        let theme = Theme::from_config(&config.theme);

        tracing::info!("Presenting {} of {} users", adults.len(), users.len());

        Self {
            popup: Popup::None,
            config,
            theme,
            users,
            adults,
            counter: Counter::default(),
            status_message: None,
            status_message_time: None,
        }
    }

    /// Set a status message (auto-clears after STATUS_TIMEOUT)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Periodic housekeeping, called once per event loop iteration
    pub fn tick(&mut self) {
        self.expire_status(Instant::now());
    }

    fn expire_status(&mut self, now: Instant) {
        if let Some(time) = self.status_message_time {
            if now.saturating_duration_since(time) >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Adults ordered by age, as shown in the list
    pub fn adults(&self) -> impl Iterator<Item = &User> {
        self.adults.iter().map(|&i| &self.users[i])
    }

    /// Names of the derived view
    pub fn names(&self) -> Vec<&str> {
        self.adults().map(|u| u.name.as_str()).collect()
    }

    pub fn total_users(&self) -> usize {
        self.users.len()
    }

    /// Button click
    pub fn increment(&mut self) {
        self.counter.increment();
        tracing::debug!("Counter incremented to {}", self.counter.value());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return;
        }

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('+') | KeyCode::Char('c') => {
                self.increment();
            }
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        if let Popup::Help = self.popup {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')
            ) {
                self.popup = Popup::None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(AppConfig::default(), users::builtin())
    }

    #[test]
    fn test_names_match_derivation() {
        let app = app();
        assert_eq!(app.names(), vec!["Alice", "Charlie"]);
        assert_eq!(app.total_users(), 3);
    }

    #[test]
    fn test_duplicate_records_keep_their_own_rows() {
        let users = vec![
            User::new(1, "Same", 30),
            User::new(2, "Same", 30),
            User::new(3, "Kid", 5),
        ];
        let app = App::new(AppConfig::default(), users);
        let ids: Vec<u32> = app.adults().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_click_keys_increment_counter() {
        let mut app = app();
        for code in [KeyCode::Char(' '), KeyCode::Enter, KeyCode::Char('+'), KeyCode::Char('c')] {
            app.handle_key(key(code));
        }
        assert_eq!(app.counter.value(), 4);
    }

    #[test]
    fn test_counter_independent_of_list() {
        let mut app = app();
        let before = app.names().into_iter().map(String::from).collect::<Vec<_>>();
        for _ in 0..10 {
            app.increment();
        }
        assert_eq!(app.counter.value(), 10);
        assert_eq!(app.names(), before);
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.popup, Popup::Help);

        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.counter.value(), 0);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_status_message_expires() {
        let mut app = app();
        app.set_status("Error: bad users file");
        let set_at = app.status_message_time.unwrap();

        app.expire_status(set_at + Duration::from_secs(1));
        assert_eq!(app.status_message.as_deref(), Some("Error: bad users file"));

        app.expire_status(set_at + STATUS_TIMEOUT);
        assert!(app.status_message.is_none());
        assert!(app.status_message_time.is_none());
    }
}
