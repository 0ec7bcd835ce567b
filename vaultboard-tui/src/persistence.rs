//! App state persistence — JSON save/load across restarts.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vaultboard_core::{sample, PeriodSelection, Role};

use crate::app::AppState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// `None` defers to the configured role.
    pub role: Option<Role>,
    pub slide_index: usize,
    /// Widget id → period label.
    pub periods: BTreeMap<String, String>,
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "corrupt state file, using defaults");
            PersistedState::default()
        }),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        role: Some(app.role),
        slide_index: app.deck.index(),
        periods: app
            .selections
            .iter()
            .map(|(id, sel)| (id.clone(), sel.period().to_string()))
            .collect(),
    }
}

/// Apply persisted state to AppState.
///
/// Entries that no longer fit the dashboard are skipped: a slide past the
/// end, an unknown widget, or a period the widget does not offer. Periods
/// are checked for both roles.
pub fn apply(app: &mut AppState, state: PersistedState) {
    if let Some(role) = state.role.filter(|r| *r != app.role) {
        if let Err(e) = app.set_role(role) {
            warn!(role = %role, error = %e, "saved role unavailable");
        }
    }

    // Periods of the hidden role are checked against its catalogue too, so
    // a later role switch never meets a period its widget lacks.
    let hidden = match sample::catalog(app.role.toggle(), &app.config) {
        Ok(widgets) => widgets,
        Err(e) => {
            warn!(role = %app.role.toggle(), error = %e, "cannot check saved periods");
            Vec::new()
        }
    };
    for (id, period) in state.periods {
        let offered = app
            .deck
            .slides()
            .iter()
            .flat_map(|s| &s.widgets)
            .chain(&hidden)
            .find(|w| w.id == id)
            .map(|w| w.periods().contains(&period));
        match offered {
            Some(true) => {
                app.selections.insert(id, PeriodSelection::new(period));
            }
            Some(false) => debug!(widget = %id, %period, "saved period no longer offered"),
            None => debug!(widget = %id, "saved widget no longer exists"),
        }
    }

    if state.slide_index != 0 {
        if let Err(e) = app.deck.go_to(state.slide_index) {
            warn!(slide = state.slide_index, error = %e, "ignoring stale slide index");
            app.set_warning(format!("Saved slide {} no longer exists", state.slide_index + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultboard_core::DashboardConfig;

    fn app() -> AppState {
        AppState::new(DashboardConfig::default()).unwrap()
    }

    #[test]
    fn roundtrip() {
        let dir = std::env::temp_dir().join("vaultboard_persist_test");
        let path = dir.join("state.json");

        let mut state = PersistedState::default();
        state.role = Some(Role::Operator);
        state.slide_index = 1;
        state.periods.insert("operator_fees".into(), "7D".into());

        save(&path, &state).unwrap();
        let loaded = load(&path);
        assert_eq!(loaded, state);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded, PersistedState::default());
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = std::env::temp_dir().join("vaultboard_persist_corrupt");
        let path = dir.join("state.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert_eq!(loaded, PersistedState::default());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn extract_then_apply_restores_view() {
        let mut original = app();
        original.cycle_period();
        original.next_slide();
        original.next_slide();
        let state = extract(&original);
        assert_eq!(state.slide_index, 2);

        let mut restored = app();
        apply(&mut restored, state);
        assert_eq!(restored.deck.index(), 2);
        assert_eq!(restored.selections, original.selections);
    }

    #[test]
    fn stale_slide_index_is_ignored() {
        let mut app = app();
        let state = PersistedState {
            role: Some(Role::Curator),
            slide_index: 12,
            periods: BTreeMap::new(),
        };
        apply(&mut app, state);
        assert_eq!(app.deck.index(), 0);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn unknown_saved_period_is_skipped() {
        let mut app = app();
        let mut periods = BTreeMap::new();
        periods.insert("fee_revenue".to_string(), "5D".to_string());
        apply(
            &mut app,
            PersistedState {
                role: None,
                slide_index: 0,
                periods,
            },
        );
        assert_eq!(app.selection("fee_revenue").unwrap().period().as_str(), "30D");
    }

    fn periods(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(id, p)| (id.to_string(), p.to_string()))
            .collect()
    }

    #[test]
    fn hidden_role_unknown_period_falls_back_to_default() {
        let mut app = app();
        assert_eq!(app.role, Role::Curator);
        apply(
            &mut app,
            PersistedState {
                role: None,
                slide_index: 0,
                periods: periods(&[("operator_fees", "5D")]),
            },
        );
        assert!(app.selection("operator_fees").is_none());

        app.switch_role();
        assert_eq!(app.role, Role::Operator);
        assert_eq!(app.selection("operator_fees").unwrap().period().as_str(), "30D");
        let widget = app
            .deck
            .slides()
            .iter()
            .flat_map(|s| &s.widgets)
            .find(|w| w.id == "operator_fees")
            .unwrap();
        assert!(widget.summarize(app.selection("operator_fees")).is_ok());
    }

    #[test]
    fn hidden_role_valid_period_survives_switch() {
        let mut app = app();
        apply(
            &mut app,
            PersistedState {
                role: None,
                slide_index: 0,
                periods: periods(&[("operator_fees", "7D"), ("retired_widget", "7D")]),
            },
        );
        assert!(app.selection("retired_widget").is_none());

        app.switch_role();
        assert_eq!(app.selection("operator_fees").unwrap().period().as_str(), "7D");
    }

    #[test]
    fn saved_role_rebuilds_deck() {
        let mut app = app();
        apply(
            &mut app,
            PersistedState {
                role: Some(Role::Operator),
                ..PersistedState::default()
            },
        );
        assert_eq!(app.role, Role::Operator);
        assert_eq!(app.deck.len(), 2);
    }
}
