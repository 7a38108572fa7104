//! Keyboard bindings.

use crossterm::event::{KeyCode, KeyModifiers};

use super::{Action, App};
use crate::models::GamePhase;

impl App {
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        // The withdraw confirmation is modal.
        if self.confirm_withdraw {
            match code {
                KeyCode::Char('y') | KeyCode::Enter => self.perform(Action::ConfirmWithdraw),
                KeyCode::Char('n') | KeyCode::Esc => self.perform(Action::CancelWithdraw),
                _ => {}
            }
            return;
        }

        // A focused score input takes digits and backspace before bindings.
        if let Some(theater) = self.score_focus {
            match code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    self.scores.push_char(theater, c);
                    self.mark_dirty();
                    return;
                }
                KeyCode::Backspace => {
                    self.scores.backspace(theater);
                    self.mark_dirty();
                    return;
                }
                KeyCode::Enter => {
                    self.perform(Action::SubmitScores);
                    return;
                }
                _ => {}
            }
        }

        match code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => self.escape(),
            KeyCode::Tab => self.cycle_score_focus(),
            KeyCode::Char(c) => {
                if let Some(action) = action_for(c) {
                    if self.available_actions().contains(&action) {
                        self.perform(action);
                    }
                }
            }
            _ => {}
        }
    }

    fn escape(&mut self) {
        if self.close_preview() {
            return;
        }
        if self.sync.error().is_some() {
            self.perform(Action::DismissError);
            return;
        }
        if self.score_focus.take().is_some() {
            self.mark_dirty();
        }
    }

    fn cycle_score_focus(&mut self) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };
        if snapshot.phase != GamePhase::Scoring || snapshot.is_withdrawal_scoring() {
            return;
        }
        let order = snapshot.theater_order();
        let next = match self.score_focus {
            Some(current) => order
                .iter()
                .position(|t| *t == current)
                .map(|i| order[(i + 1) % order.len()]),
            None => order.first().copied(),
        };
        self.score_focus = next.or_else(|| order.first().copied());
        self.mark_dirty();
    }
}

fn action_for(c: char) -> Option<Action> {
    match c {
        'd' => Some(Action::DrawCard),
        'e' => Some(Action::EndTurn),
        'w' => Some(Action::Withdraw),
        's' => Some(Action::SubmitScores),
        'n' => Some(Action::NextBattle),
        'g' => Some(Action::NextGame),
        _ => None,
    }
}
