//! Slide navigator — circular pagination over a fixed list of slides.
//!
//! `NavigatorState` is a small `Copy` value and every operation is a pure
//! transition: old state in, new state out. `SlideDeck` bundles the state
//! with the slides it indexes for hosts that own exactly one dashboard.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DashboardError, Result};

/// A named group of widgets shown together in one pagination step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide<W> {
    pub title: String,
    pub widgets: Vec<W>,
}

impl<W> Slide<W> {
    pub fn new(title: impl Into<String>, widgets: Vec<W>) -> Self {
        Self {
            title: title.into(),
            widgets,
        }
    }
}

/// Current slide index plus total slide count.
///
/// Invariant: `current_index < slide_count` whenever `slide_count > 0`.
/// With `slide_count == 0` there is no valid index and navigation is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorState {
    current_index: usize,
    slide_count: usize,
}

impl NavigatorState {
    /// Start on the first slide.
    pub fn new(slide_count: usize) -> Self {
        Self {
            current_index: 0,
            slide_count,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }
}

/// Advance one slide, wrapping to the first after the last.
pub fn next(state: NavigatorState) -> NavigatorState {
    if state.slide_count <= 1 {
        return state;
    }
    NavigatorState {
        current_index: (state.current_index + 1) % state.slide_count,
        ..state
    }
}

/// Step back one slide, wrapping to the last before the first.
pub fn previous(state: NavigatorState) -> NavigatorState {
    if state.slide_count <= 1 {
        return state;
    }
    NavigatorState {
        current_index: (state.current_index + state.slide_count - 1) % state.slide_count,
        ..state
    }
}

/// Jump to a zero-based slide index.
pub fn go_to(state: NavigatorState, index: usize) -> Result<NavigatorState> {
    if index >= state.slide_count {
        return Err(DashboardError::OutOfRange {
            index,
            slide_count: state.slide_count,
        });
    }
    Ok(NavigatorState {
        current_index: index,
        ..state
    })
}

/// The slide at the state's current index.
pub fn active_slide<W>(state: NavigatorState, slides: &[Slide<W>]) -> Result<&Slide<W>> {
    if slides.is_empty() {
        return Err(DashboardError::EmptyCollection);
    }
    slides
        .get(state.current_index)
        .ok_or(DashboardError::OutOfRange {
            index: state.current_index,
            slide_count: slides.len(),
        })
}

/// Group an ordered widget list into slides of at most `per_slide` widgets.
pub fn paginate<W>(widgets: Vec<W>, per_slide: usize) -> Result<Vec<Slide<W>>> {
    if per_slide == 0 {
        return Err(DashboardError::InvalidPageSize);
    }
    let mut slides = Vec::new();
    let mut page = Vec::with_capacity(per_slide);
    for widget in widgets {
        page.push(widget);
        if page.len() == per_slide {
            let title = format!("Page {}", slides.len() + 1);
            slides.push(Slide::new(title, std::mem::take(&mut page)));
        }
    }
    if !page.is_empty() {
        let title = format!("Page {}", slides.len() + 1);
        slides.push(Slide::new(title, page));
    }
    Ok(slides)
}

/// Slides plus the navigator state that indexes them.
#[derive(Debug, Clone)]
pub struct SlideDeck<W> {
    slides: Vec<Slide<W>>,
    state: NavigatorState,
}

impl<W> SlideDeck<W> {
    pub fn new(slides: Vec<Slide<W>>) -> Self {
        let state = NavigatorState::new(slides.len());
        Self { slides, state }
    }

    pub fn next(&mut self) {
        self.state = next(self.state);
        debug!(index = self.state.current_index, "slide next");
    }

    pub fn previous(&mut self) {
        self.state = previous(self.state);
        debug!(index = self.state.current_index, "slide previous");
    }

    /// Jump to `index`. On failure the deck stays where it was.
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        self.state = go_to(self.state, index)?;
        debug!(index, "slide go_to");
        Ok(())
    }

    pub fn active(&self) -> Result<&Slide<W>> {
        active_slide(self.state, &self.slides)
    }

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.state.current_index
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide<W>] {
        &self.slides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(n: usize) -> Vec<Slide<u32>> {
        (0..n)
            .map(|i| Slide::new(format!("s{i}"), vec![i as u32]))
            .collect()
    }

    #[test]
    fn next_wraps_to_first() {
        let state = go_to(NavigatorState::new(3), 2).unwrap();
        assert_eq!(next(state).current_index(), 0);
    }

    #[test]
    fn previous_wraps_to_last() {
        let state = NavigatorState::new(3);
        assert_eq!(previous(state).current_index(), 2);
    }

    #[test]
    fn single_and_empty_decks_do_not_move() {
        for count in [0, 1] {
            let state = NavigatorState::new(count);
            assert_eq!(next(state), state);
            assert_eq!(previous(state), state);
        }
    }

    #[test]
    fn go_to_out_of_range() {
        let state = NavigatorState::new(4);
        assert_eq!(
            go_to(state, 4).unwrap_err(),
            DashboardError::OutOfRange {
                index: 4,
                slide_count: 4
            }
        );
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn go_to_on_empty_deck_fails() {
        assert!(go_to(NavigatorState::new(0), 0).is_err());
    }

    #[test]
    fn active_slide_empty() {
        let empty: Vec<Slide<u32>> = Vec::new();
        assert_eq!(
            active_slide(NavigatorState::new(0), &empty).unwrap_err(),
            DashboardError::EmptyCollection
        );
    }

    #[test]
    fn active_slide_follows_state() {
        let deck = slides(3);
        let state = next(NavigatorState::new(deck.len()));
        assert_eq!(active_slide(state, &deck).unwrap().title, "s1");
    }

    #[test]
    fn active_slide_rejects_foreign_state() {
        let state = go_to(NavigatorState::new(5), 4).unwrap();
        assert!(matches!(
            active_slide(state, &slides(2)),
            Err(DashboardError::OutOfRange { index: 4, slide_count: 2 })
        ));
    }

    #[test]
    fn paginate_groups_in_order() {
        let pages = paginate(vec!['a', 'b', 'c', 'd', 'e'], 2).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].widgets, vec!['a', 'b']);
        assert_eq!(pages[2].widgets, vec!['e']);
        assert_eq!(pages[2].title, "Page 3");
    }

    #[test]
    fn paginate_zero_page_size() {
        assert_eq!(
            paginate(vec![1, 2], 0).unwrap_err(),
            DashboardError::InvalidPageSize
        );
    }

    #[test]
    fn paginate_nothing() {
        let pages: Vec<Slide<u8>> = paginate(Vec::new(), 3).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn deck_failed_go_to_keeps_position() {
        let mut deck = SlideDeck::new(slides(3));
        deck.next();
        assert!(deck.go_to(9).is_err());
        assert_eq!(deck.index(), 1);
        assert_eq!(deck.active().unwrap().title, "s1");
    }
}
