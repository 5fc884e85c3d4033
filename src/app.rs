//! Application state management for Photogrid
//!
//! This module contains the main application state: the search controller,
//! the text being typed into the search and page-jump fields, the selected
//! card, and keyboard handling for each input mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::{FetchOutcome, SearchController};
use crate::data::ImageResult;

/// Which widget receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate the grid and pages
    Browse,
    /// Keys edit the search field
    Search,
    /// Keys edit the page-jump field
    PageJump,
}

/// Main application struct managing state and data
pub struct App {
    /// Search and pagination state machine
    pub controller: SearchController,
    /// Current input mode
    pub mode: InputMode,
    /// Text in the search field, not yet submitted
    pub search_input: String,
    /// Text in the page-jump field
    pub page_input: String,
    /// Index of the selected card on the current page
    pub selected_index: usize,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// URL the user asked to open in the browser, consumed by the event loop
    pub open_requested: Option<String>,
    /// Transient note shown in the footer (e.g. browser failed to open)
    pub status_message: Option<String>,
}

impl App {
    /// Creates a new App around a controller
    pub fn new(controller: SearchController) -> Self {
        Self {
            controller,
            mode: InputMode::Browse,
            search_input: String::new(),
            page_input: String::new(),
            selected_index: 0,
            should_quit: false,
            show_help: false,
            open_requested: None,
            status_message: None,
        }
    }

    /// Results on the current page
    pub fn results(&self) -> &[ImageResult] {
        &self.controller.state().results
    }

    /// Returns the currently selected card, if any
    pub fn selected_result(&self) -> Option<&ImageResult> {
        self.results().get(self.selected_index)
    }

    /// Applies a finished fetch and keeps the selection on the page
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        let page_before = self.page_identity();
        self.controller.apply_outcome(outcome);
        if self.page_identity() != page_before {
            self.selected_index = 0;
        }
        self.clamp_selection();
    }

    /// Takes the pending open-in-browser request, if any
    pub fn take_open_request(&mut self) -> Option<String> {
        self.open_requested.take()
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings (browse mode)
    /// - `q` or `Esc`: Quit the application
    /// - `/` or `s`: Edit the search field
    /// - `n`/`l`/`Right`: Next page
    /// - `p`/`h`/`Left`: Previous page
    /// - `g`: Jump to a page number
    /// - `j`/`Down`/`Tab`, `k`/`Up`/`BackTab`: Move the card selection
    /// - `o`/`Enter`: Open the selected image in the browser
    /// - `?`: Toggle help
    ///
    /// In the search and page-jump fields, `Enter` submits and `Esc` cancels.
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.mode {
            InputMode::Browse => self.handle_browse_key(key_event),
            InputMode::Search => self.handle_search_key(key_event),
            InputMode::PageJump => self.handle_page_jump_key(key_event),
        }
    }

    fn handle_browse_key(&mut self, key_event: KeyEvent) {
        self.status_message = None;
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.mode = InputMode::Search;
            }
            KeyCode::Char('g') => {
                self.page_input.clear();
                self.mode = InputMode::PageJump;
            }
            KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right => {
                if self.controller.go_to_next_page() {
                    self.selected_index = 0;
                }
            }
            KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left => {
                if self.controller.go_to_previous_page() {
                    self.selected_index = 0;
                }
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.move_selection_down();
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.move_selection_up();
            }
            KeyCode::Enter | KeyCode::Char('o') => {
                self.open_requested = self.selected_result().map(|img| img.open_url().to_string());
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => {
                if self.controller.submit_search(&self.search_input) {
                    self.selected_index = 0;
                }
                self.mode = InputMode::Browse;
            }
            KeyCode::Esc => {
                self.mode = InputMode::Browse;
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_page_jump_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => {
                let page_before = self.controller.state().current_page;
                // Rejected input is reported through the controller's error message
                let _ = self.controller.jump_to_page(&self.page_input);
                if self.controller.state().current_page != page_before {
                    self.selected_index = 0;
                }
                self.mode = InputMode::Browse;
            }
            KeyCode::Esc => {
                self.mode = InputMode::Browse;
            }
            KeyCode::Backspace => {
                self.page_input.pop();
            }
            KeyCode::Char(c) => {
                self.page_input.push(c);
            }
            _ => {}
        }
    }

    /// Moves the selection down, wrapping to the first card
    fn move_selection_down(&mut self) {
        let count = self.results().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the selection up, wrapping to the last card
    fn move_selection_up(&mut self) {
        let count = self.results().len();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.results().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    fn page_identity(&self) -> (String, u32, Option<String>) {
        let state = self.controller.state();
        (
            state.query.clone(),
            state.current_page,
            state.results.first().map(|r| r.id.clone()),
        )
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(SearchController::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{FetchOutcome, FETCH_ERROR_MESSAGE};
    use crate::data::{ResultPage, SearchError};

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
    }

    fn page(query: &str, page: u32, count: usize, total_pages: u32) -> ResultPage {
        ResultPage {
            results: (0..count)
                .map(|i| ImageResult {
                    id: format!("{}-{}-{}", query, page, i),
                    thumbnail_url: format!("https://images.example/{}", i),
                    alt_description: None,
                    author_name: format!("Author {}", i),
                    description: None,
                    page_url: Some(format!("https://unsplash.com/photos/{}-{}", page, i)),
                })
                .collect(),
            total_pages,
        }
    }

    /// Resolves every queued request with a canned page
    fn resolve_pending(app: &mut App, count: usize, total_pages: u32) {
        for req in app.controller.take_requests() {
            let result = Ok(page(&req.query, req.page, count, total_pages));
            app.apply_outcome(FetchOutcome {
                seq: req.seq,
                query: req.query,
                page: req.page,
                result,
            });
        }
    }

    fn loaded_app(total_pages: u32) -> App {
        let mut app = App::default();
        app.controller.initialize();
        resolve_pending(&mut app, 12, total_pages);
        app
    }

    #[test]
    fn test_initial_mode_is_browse() {
        let app = App::default();
        assert_eq!(app.mode, InputMode::Browse);
        assert!(app.search_input.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_q_quits_in_browse_mode() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let mut app = loaded_app(5);
        app.mode = InputMode::Search;
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_is_typed_in_search_mode() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('/')));
        type_text(&mut app, "quokka");

        assert!(!app.should_quit);
        assert_eq!(app.search_input, "quokka");
    }

    #[test]
    fn test_search_submit_queues_fetch_and_returns_to_browse() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('s')));
        type_text(&mut app, "cats");
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.mode, InputMode::Browse);
        assert_eq!(app.controller.state().query, "cats");
        let requests = app.controller.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "cats");
        assert_eq!(requests[0].page, 1);
    }

    #[test]
    fn test_blank_search_submit_does_nothing() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('/')));
        type_text(&mut app, "   ");
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.controller.state().query, "santa");
        assert!(!app.controller.has_pending_requests());
    }

    #[test]
    fn test_backspace_edits_search_input() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('/')));
        type_text(&mut app, "catz");
        app.handle_key(key_event(KeyCode::Backspace));
        type_text(&mut app, "s");

        assert_eq!(app.search_input, "cats");
    }

    #[test]
    fn test_esc_cancels_search_without_submitting() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('/')));
        type_text(&mut app, "cats");
        app.handle_key(key_event(KeyCode::Esc));

        assert_eq!(app.mode, InputMode::Browse);
        assert!(!app.should_quit);
        assert_eq!(app.controller.state().query, "santa");
        assert_eq!(app.search_input, "cats", "Typed text is kept");
    }

    #[test]
    fn test_next_and_previous_keys_change_page() {
        let mut app = loaded_app(5);

        app.handle_key(key_event(KeyCode::Char('n')));
        resolve_pending(&mut app, 12, 5);
        assert_eq!(app.controller.state().current_page, 2);

        app.handle_key(key_event(KeyCode::Right));
        resolve_pending(&mut app, 12, 5);
        assert_eq!(app.controller.state().current_page, 3);

        app.handle_key(key_event(KeyCode::Char('p')));
        assert_eq!(app.controller.state().current_page, 2);

        app.handle_key(key_event(KeyCode::Left));
        assert_eq!(app.controller.state().current_page, 1);
    }

    #[test]
    fn test_page_change_resets_selection() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Down));
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_index, 2);

        app.handle_key(key_event(KeyCode::Char('n')));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_page_jump_valid_input() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('g')));
        assert_eq!(app.mode, InputMode::PageJump);
        type_text(&mut app, "4");
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.mode, InputMode::Browse);
        assert_eq!(app.controller.state().current_page, 4);
        assert!(app.controller.state().error_message.is_none());
    }

    #[test]
    fn test_page_jump_invalid_input_sets_error() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('g')));
        type_text(&mut app, "9");
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.controller.state().current_page, 1);
        assert_eq!(
            app.controller.state().error_message.as_deref(),
            Some("Please enter a valid page number between 1 and 5.")
        );
    }

    #[test]
    fn test_page_jump_clears_previous_input() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('g')));
        type_text(&mut app, "3");
        app.handle_key(key_event(KeyCode::Esc));
        app.handle_key(key_event(KeyCode::Char('g')));

        assert!(app.page_input.is_empty());
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Up));
        assert_eq!(app.selected_index, 11);

        app.handle_key(key_event(KeyCode::Tab));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_selection_noop_without_results() {
        let mut app = App::default();
        app.handle_key(key_event(KeyCode::Down));
        assert_eq!(app.selected_index, 0);
        assert!(app.selected_result().is_none());
    }

    #[test]
    fn test_open_requests_selected_image_url() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('j')));
        app.handle_key(key_event(KeyCode::Char('o')));

        assert_eq!(
            app.take_open_request().as_deref(),
            Some("https://unsplash.com/photos/1-1")
        );
        assert!(app.take_open_request().is_none());
    }

    #[test]
    fn test_selection_clamped_when_page_shrinks() {
        let mut app = loaded_app(5);
        app.selected_index = 11;

        app.handle_key(key_event(KeyCode::Char('/')));
        type_text(&mut app, "rare");
        app.handle_key(key_event(KeyCode::Enter));
        resolve_pending(&mut app, 3, 1);

        assert_eq!(app.selected_index, 0);
        assert_eq!(app.results().len(), 3);
    }

    #[test]
    fn test_failed_fetch_shows_generic_error() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('n')));
        for req in app.controller.take_requests() {
            app.apply_outcome(FetchOutcome {
                seq: req.seq,
                query: req.query,
                page: req.page,
                result: Err(SearchError::Api {
                    status: 500,
                    message: "down".to_string(),
                }),
            });
        }

        assert_eq!(
            app.controller.state().error_message.as_deref(),
            Some(FETCH_ERROR_MESSAGE)
        );
        assert_eq!(app.results().len(), 12);
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = loaded_app(5);
        app.handle_key(key_event(KeyCode::Char('?')));
        assert!(app.show_help);

        app.handle_key(key_event(KeyCode::Char('n')));
        assert_eq!(app.controller.state().current_page, 1);

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }
}
