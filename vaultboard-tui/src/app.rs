//! Application state — single-owner, main-thread only.
//!
//! Holds the slide deck for the current role, one period selection per
//! widget, the focused widget on the active slide, and the status line.

use std::collections::HashMap;

use tracing::{debug, info};

use vaultboard_core::{sample, DashboardConfig, PeriodSelection, Result, Role, SlideDeck, Widget};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub role: Role,
    pub config: DashboardConfig,
    pub deck: SlideDeck<Widget>,
    /// Current period per widget id. Kept across role switches.
    pub selections: HashMap<String, PeriodSelection>,
    /// Index of the focused widget on the active slide.
    pub focused: usize,
    pub status_message: Option<(String, StatusLevel)>,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let role = config.role;
        let deck = SlideDeck::new(sample::dashboard(role, &config)?);
        let mut app = Self {
            running: true,
            role,
            config,
            deck,
            selections: HashMap::new(),
            focused: 0,
            status_message: None,
            overlay: Overlay::None,
        };
        app.seed_selections();
        Ok(app)
    }

    /// Give every widget in the deck a selection if it has none yet.
    fn seed_selections(&mut self) {
        let preferred = self.config.default_period.as_str();
        for slide in self.deck.slides() {
            for widget in &slide.widgets {
                if self.selections.contains_key(&widget.id) {
                    continue;
                }
                if let Some(selection) = widget.default_selection(preferred) {
                    self.selections.insert(widget.id.clone(), selection);
                }
            }
        }
    }

    /// Rebuild the deck for `role`, starting at its first slide.
    pub fn set_role(&mut self, role: Role) -> Result<()> {
        self.deck = SlideDeck::new(sample::dashboard(role, &self.config)?);
        self.role = role;
        self.focused = 0;
        self.seed_selections();
        info!(role = %role, slides = self.deck.len(), "role switched");
        Ok(())
    }

    pub fn switch_role(&mut self) {
        let role = self.role.toggle();
        match self.set_role(role) {
            Ok(()) => self.set_status(format!("{role} dashboard")),
            Err(e) => self.set_error(format!("Cannot load {role} dashboard: {e}")),
        }
    }

    pub fn next_slide(&mut self) {
        self.deck.next();
        self.focused = 0;
    }

    pub fn previous_slide(&mut self) {
        self.deck.previous();
        self.focused = 0;
    }

    /// Jump to a zero-based slide index; failures land in the status bar.
    pub fn go_to_slide(&mut self, index: usize) {
        match self.deck.go_to(index) {
            Ok(()) => self.focused = 0,
            Err(e) => self.set_warning(e.to_string()),
        }
    }

    /// Widgets on the active slide; empty when the deck has no slides.
    pub fn active_widgets(&self) -> &[Widget] {
        self.deck
            .active()
            .map(|slide| slide.widgets.as_slice())
            .unwrap_or(&[])
    }

    pub fn focused_widget(&self) -> Option<&Widget> {
        self.active_widgets().get(self.focused)
    }

    pub fn focus_next(&mut self) {
        let count = self.active_widgets().len();
        if count > 0 {
            self.focused = (self.focused + 1) % count;
        }
    }

    pub fn focus_previous(&mut self) {
        let count = self.active_widgets().len();
        if count > 0 {
            self.focused = (self.focused + count - 1) % count;
        }
    }

    pub fn selection(&self, widget_id: &str) -> Option<&PeriodSelection> {
        self.selections.get(widget_id)
    }

    /// Advance the focused widget to its next period.
    pub fn cycle_period(&mut self) {
        let Some(widget) = self.focused_widget() else {
            return;
        };
        let next = self
            .selections
            .get(&widget.id)
            .and_then(|current| widget.cycle_period(current));
        match next {
            Some(selection) => {
                let id = widget.id.clone();
                let title = widget.title.clone();
                debug!(widget = %id, period = %selection.period(), "period cycled");
                self.set_status(format!("{title}: {}", selection.period()));
                self.selections.insert(id, selection);
            }
            None => {
                let title = widget.title.clone();
                self.set_warning(format!("{title} has no periods to switch"));
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Overlay::Help => Overlay::None,
            Overlay::None => Overlay::Help,
        };
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}
