use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::browser::{fetch_detail_outcome, fetch_search_outcome};
use crate::client::RecipeSource;
use crate::query::SearchQuery;
use crate::state::{self, RequestIds, UiState, View};
use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

pub struct App {
    pub should_quit: bool,
    pub state: UiState,
    pub focus: Focus,
    /// Cursor position in the query, counted in chars
    pub cursor: usize,
    /// Highlighted cell of the result grid
    pub grid_index: usize,
    /// Columns of the grid as last drawn
    pub grid_columns: usize,
    pub detail_scroll: u16,
    pub animation_frame: u8,
    /// Query text as it was when the last search was submitted
    submitted_query: Option<String>,

    source: Arc<dyn RecipeSource>,
    requests: RequestIds,
    tx: UnboundedSender<AppEvent>,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl App {
    pub fn new(source: Arc<dyn RecipeSource>, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            should_quit: false,
            state: UiState::new(),
            focus: Focus::Input,
            cursor: 0,
            grid_index: 0,
            grid_columns: 1,
            detail_scroll: 0,
            animation_frame: 0,
            submitted_query: None,
            source,
            requests: RequestIds::default(),
            tx,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => {
                if self.state.loading() {
                    self.animation_frame = (self.animation_frame + 1) % 3;
                }
            }
            AppEvent::Browser(event) => self.handle_browser_event(event),
        }
    }

    fn handle_browser_event(&mut self, event: state::Event) {
        let search_found = matches!(
            &event,
            state::Event::SearchFinished {
                outcome: state::SearchOutcome::Found(_),
                ..
            }
        );
        let detail_loaded = matches!(
            &event,
            state::Event::DetailFinished {
                outcome: state::DetailOutcome::Loaded(_),
                ..
            }
        );

        self.state.apply(event);

        if search_found {
            self.grid_index = 0;
            // Only jump to the grid if the user has not started editing again
            let unchanged = self.submitted_query.as_deref() == Some(self.state.query.as_str());
            if self.focus == Focus::Input && unchanged {
                self.focus = Focus::Results;
            }
        }
        if detail_loaded {
            self.detail_scroll = 0;
        }
        self.grid_index = self.grid_index.min(self.state.results.len().saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // The alert blocks everything until dismissed
        if self.state.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.apply(state::Event::AlertDismissed);
            }
            return;
        }

        match (self.state.view(), self.focus) {
            (_, Focus::Input) => self.handle_input_key(key),
            (View::Detail, Focus::Results) => self.handle_detail_key(key),
            (_, Focus::Results) => self.handle_results_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_search(),
            KeyCode::Char(c) => {
                let mut query = self.state.query.clone();
                query.insert(char_to_byte_index(&query, self.cursor), c);
                self.cursor += 1;
                self.state.apply(state::Event::QueryChanged(query));
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let mut query = self.state.query.clone();
                    query.remove(char_to_byte_index(&query, self.cursor - 1));
                    self.cursor -= 1;
                    self.state.apply(state::Event::QueryChanged(query));
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.state.query.chars().count() {
                    let mut query = self.state.query.clone();
                    query.remove(char_to_byte_index(&query, self.cursor));
                    self.state.apply(state::Event::QueryChanged(query));
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.state.query.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.state.query.chars().count(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Esc => {
                if !self.state.results.is_empty() {
                    self.focus = Focus::Results;
                }
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        let len = self.state.results.len();
        let columns = self.grid_columns.max(1);

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Tab => self.focus = Focus::Input,
            KeyCode::Enter => self.open_highlighted(),
            KeyCode::Char('l') | KeyCode::Right => {
                if self.grid_index + 1 < len {
                    self.grid_index += 1;
                }
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.grid_index = self.grid_index.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.grid_index + columns < len {
                    self.grid_index += columns;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.grid_index >= columns {
                    self.grid_index -= columns;
                } else {
                    self.focus = Focus::Input;
                }
            }
            KeyCode::Char('g') | KeyCode::Home => self.grid_index = 0,
            KeyCode::Char('G') | KeyCode::End => self.grid_index = len.saturating_sub(1),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Tab => self.focus = Focus::Input,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Left => {
                self.go_back()
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.detail_scroll = self.detail_scroll.saturating_add(1)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1)
            }
            KeyCode::PageDown => self.detail_scroll = self.detail_scroll.saturating_add(10),
            KeyCode::PageUp => self.detail_scroll = self.detail_scroll.saturating_sub(10),
            _ => {}
        }
    }

    /// Validate the query and start a filter request in the background
    pub fn submit_search(&mut self) {
        let query = match SearchQuery::parse(&self.state.query) {
            Ok(query) => query,
            Err(e) => {
                self.state.apply(state::Event::Alert(e.to_string()));
                return;
            }
        };

        self.submitted_query = Some(self.state.query.clone());
        let request = self.requests.next();
        self.state.apply(state::Event::SearchStarted {
            request,
            query: query.clone(),
        });

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = fetch_search_outcome(source.as_ref(), &query).await;
            let event = state::Event::SearchFinished { request, outcome };
            if tx.send(AppEvent::Browser(event)).is_err() {
                debug!("search {:?} finished after the UI closed", request);
            }
        });
    }

    /// Start a lookup for the highlighted meal
    pub fn open_highlighted(&mut self) {
        let Some(meal) = self.state.results.get(self.grid_index) else {
            return;
        };
        let id = meal.id.clone();

        let request = self.requests.next();
        self.state.apply(state::Event::DetailRequested {
            request,
            id: id.clone(),
        });

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = fetch_detail_outcome(source.as_ref(), &id).await;
            let event = state::Event::DetailFinished { request, outcome };
            if tx.send(AppEvent::Browser(event)).is_err() {
                debug!("lookup {:?} finished after the UI closed", request);
            }
        });
    }

    pub fn go_back(&mut self) {
        self.state.apply(state::Event::BackPressed);
        self.detail_scroll = 0;
    }
}
