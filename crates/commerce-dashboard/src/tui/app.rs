//! Interactive dashboard state and key handling.
//!
//! The app holds one computed [`SectionView`] per question. A key press that
//! changes a control recomputes only the section that owns it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tracing::debug;

use crate::config::HOURS_PER_DAY;
use crate::dashboard::{Controls, SectionView, compute_all, compute_section};
use crate::loader::Dataset;
use crate::queries::HourSelection;
use crate::types::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

pub struct App {
    data: Arc<Dataset>,
    pub controls: Controls,
    pub sections: Vec<SectionView>,
    pub selected: Question,
    /// Highlighted hour in the hour multiselect.
    pub hour_cursor: u8,
    pub show_insight: bool,
    /// Number of section recomputations since start-up, per question.
    recomputations: [usize; Question::ALL.len()],
}

impl App {
    pub fn new(data: Arc<Dataset>, controls: Controls) -> Self {
        let sections = compute_all(&data, &controls);
        Self {
            data,
            controls,
            sections,
            selected: Question::CustomerCities,
            hour_cursor: 0,
            show_insight: true,
            recomputations: [0; Question::ALL.len()],
        }
    }

    pub fn section(&self, question: Question) -> &SectionView {
        &self.sections[question.index()]
    }

    pub fn current(&self) -> &SectionView {
        self.section(self.selected)
    }

    pub fn recomputations(&self, question: Question) -> usize {
        self.recomputations[question.index()]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Tab => self.select_offset(1),
            KeyCode::BackTab => self.select_offset(Question::ALL.len() - 1),
            KeyCode::Char(c @ '1'..='5') => {
                let position = c as usize - '1' as usize;
                self.selected = Question::ALL[position];
            }
            KeyCode::Char('i') => self.show_insight = !self.show_insight,
            code if self.selected == Question::HourlyTrend => self.handle_hour_key(code),
            code => self.handle_slider_key(code),
        }

        AppAction::Continue
    }

    fn select_offset(&mut self, offset: usize) {
        let count = Question::ALL.len();
        self.selected = Question::ALL[(self.selected.index() + offset) % count];
    }

    fn handle_slider_key(&mut self, code: KeyCode) {
        let Some(slider) = self.controls.top_n_mut(self.selected) else {
            return;
        };

        let updated = match code {
            KeyCode::Right | KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
                slider.increment()
            }
            KeyCode::Left | KeyCode::Down | KeyCode::Char('-') => slider.decrement(),
            _ => return,
        };

        if updated != *slider {
            *slider = updated;
            self.recompute(self.selected);
        }
    }

    fn handle_hour_key(&mut self, code: KeyCode) {
        let before = self.controls.hours;

        match code {
            KeyCode::Left => self.hour_cursor = self.hour_cursor.saturating_sub(1),
            KeyCode::Right => self.hour_cursor = (self.hour_cursor + 1).min(HOURS_PER_DAY - 1),
            KeyCode::Home => self.hour_cursor = 0,
            KeyCode::End => self.hour_cursor = HOURS_PER_DAY - 1,
            KeyCode::Char(' ') | KeyCode::Enter => self.controls.hours.toggle(self.hour_cursor),
            KeyCode::Char('a') => self.controls.hours = HourSelection::all(),
            KeyCode::Char('n') => self.controls.hours = HourSelection::none(),
            _ => {}
        }

        if self.controls.hours != before {
            self.recompute(Question::HourlyTrend);
        }
    }

    fn recompute(&mut self, question: Question) {
        debug!("Recomputing section {:?}", question);
        self.sections[question.index()] = compute_section(&self.data, question, &self.controls);
        self.recomputations[question.index()] += 1;
    }
}
