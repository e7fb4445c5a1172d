use anyhow::{anyhow, Context, Error, Result};
use std::fmt;
use std::str::FromStr;

pub type CategoryId = u32;
pub type ClueId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub id: ClueId,
    pub value: u32,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub clues: Vec<Clue>,
}

/// Address of one grid cell. Rendered as the cell's DOM id,
/// `"{category}-{clue}"`, and parsed back when the cell is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    pub category: CategoryId,
    pub clue: ClueId,
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.clue)
    }
}

impl FromStr for CellId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (category, clue) = s
            .split_once('-')
            .ok_or_else(|| anyhow!("cell id '{}' has no separator", s))?;
        Ok(CellId {
            category: category
                .parse()
                .with_context(|| format!("bad category in cell id '{}'", s))?,
            clue: clue
                .parse()
                .with_context(|| format!("bad clue in cell id '{}'", s))?,
        })
    }
}

/// A clue taken off the board, together with the cell it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveClue {
    pub cell: CellId,
    pub clue: Clue,
}

/// What the active-clue panel is doing. The active clue only exists while
/// something is shown, so `Hidden` carries nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Reveal {
    #[default]
    Hidden,
    Question(ActiveClue),
    Answer(ActiveClue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    Hidden,
    ShowingQuestion,
    ShowingAnswer,
}

pub enum Event {
    /// a grid cell was clicked
    SelectCell(CellId),
    /// the active-clue panel was clicked
    ClickPanel,
}

/// The visible change a transition asks the renderer to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    ShowQuestion { cell: CellId, question: String },
    ShowAnswer { cell: CellId, answer: String },
    ClearPanel,
}

#[derive(Debug, Default)]
pub struct GameState {
    categories: Vec<Category>,
    reveal: Reveal,
}

impl GameState {
    pub fn new() -> Self {
        GameState::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        GameState {
            categories,
            reveal: Reveal::Hidden,
        }
    }

    /// Back to an empty board: no categories, nothing active.
    pub fn reset(&mut self) {
        *self = GameState::default();
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn mode(&self) -> RevealMode {
        match self.reveal {
            Reveal::Hidden => RevealMode::Hidden,
            Reveal::Question(_) => RevealMode::ShowingQuestion,
            Reveal::Answer(_) => RevealMode::ShowingAnswer,
        }
    }

    pub fn active_clue(&self) -> Option<&ActiveClue> {
        match &self.reveal {
            Reveal::Hidden => None,
            Reveal::Question(active) | Reveal::Answer(active) => Some(active),
        }
    }

    /// Text the active-clue panel should show, `None` when it is empty.
    pub fn panel_text(&self) -> Option<&str> {
        match &self.reveal {
            Reveal::Hidden => None,
            Reveal::Question(active) => Some(&active.clue.question),
            Reveal::Answer(active) => Some(&active.clue.answer),
        }
    }

    #[cfg(test)]
    fn find_clue(&self, cell: CellId) -> Option<&Clue> {
        self.categories
            .iter()
            .find(|category| category.id == cell.category)?
            .clues
            .iter()
            .find(|clue| clue.id == cell.clue)
    }

    /// Removes the clue at `cell` from its category and drops the category
    /// once it runs out of clues.
    fn take_clue(&mut self, cell: CellId) -> Option<Clue> {
        let category_index = self
            .categories
            .iter()
            .position(|category| category.id == cell.category)?;
        let category = &mut self.categories[category_index];
        let clue_index = category.clues.iter().position(|clue| clue.id == cell.clue)?;
        let clue = category.clues.remove(clue_index);
        if category.clues.is_empty() {
            self.categories.remove(category_index);
        }
        Some(clue)
    }

    /// Drives the reveal cycle `Hidden -> Question -> Answer -> Hidden`.
    /// Anything that does not match the current mode is ignored.
    pub fn handle(&mut self, event: Event) -> Effect {
        let reveal = std::mem::take(&mut self.reveal);
        let (reveal, effect) = match (reveal, event) {
            (Reveal::Hidden, Event::SelectCell(cell)) => match self.take_clue(cell) {
                Some(clue) => {
                    let effect = Effect::ShowQuestion {
                        cell,
                        question: clue.question.clone(),
                    };
                    (Reveal::Question(ActiveClue { cell, clue }), effect)
                }
                None => (Reveal::Hidden, Effect::Nothing),
            },
            (Reveal::Question(active), Event::ClickPanel) => {
                let effect = Effect::ShowAnswer {
                    cell: active.cell,
                    answer: active.clue.answer.clone(),
                };
                (Reveal::Answer(active), effect)
            }
            (Reveal::Answer(_), Event::ClickPanel) => (Reveal::Hidden, Effect::ClearPanel),
            (reveal, _) => (reveal, Effect::Nothing),
        };
        self.reveal = reveal;
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: CategoryId, clue_ids: &[ClueId]) -> Category {
        Category {
            id,
            title: format!("category {}", id),
            clues: clue_ids
                .iter()
                .enumerate()
                .map(|(index, &clue_id)| Clue {
                    id: clue_id,
                    value: (index as u32 + 1) * 100,
                    question: format!("question {}", clue_id),
                    answer: format!("answer {}", clue_id),
                })
                .collect(),
        }
    }

    fn board() -> GameState {
        GameState::with_categories(vec![
            category(1, &[10, 11, 12, 13, 14]),
            category(2, &[20, 21, 22, 23, 24]),
        ])
    }

    fn cell(category: CategoryId, clue: ClueId) -> CellId {
        CellId { category, clue }
    }

    #[test]
    fn cell_id_round_trips_through_its_dom_id() {
        let id = cell(17, 4021);
        assert_eq!(id.to_string(), "17-4021");
        assert_eq!("17-4021".parse::<CellId>().unwrap(), id);
    }

    #[test]
    fn malformed_cell_ids_are_rejected() {
        assert!("17".parse::<CellId>().is_err());
        assert!("a-1".parse::<CellId>().is_err());
        assert!("1-".parse::<CellId>().is_err());
        assert!("".parse::<CellId>().is_err());
    }

    #[test]
    fn new_game_starts_hidden_and_empty() {
        let state = GameState::new();
        assert!(state.categories().is_empty());
        assert_eq!(state.mode(), RevealMode::Hidden);
        assert!(state.active_clue().is_none());
        assert!(state.panel_text().is_none());
    }

    #[test]
    fn full_reveal_cycle() {
        let mut state = board();

        let effect = state.handle(Event::SelectCell(cell(1, 13)));
        assert_eq!(
            effect,
            Effect::ShowQuestion {
                cell: cell(1, 13),
                question: "question 13".to_string()
            }
        );
        assert_eq!(state.mode(), RevealMode::ShowingQuestion);
        assert_eq!(state.active_clue().unwrap().clue.value, 400);
        assert_eq!(state.panel_text(), Some("question 13"));

        let effect = state.handle(Event::ClickPanel);
        assert_eq!(
            effect,
            Effect::ShowAnswer {
                cell: cell(1, 13),
                answer: "answer 13".to_string()
            }
        );
        assert_eq!(state.mode(), RevealMode::ShowingAnswer);
        assert_eq!(state.panel_text(), Some("answer 13"));

        assert_eq!(state.handle(Event::ClickPanel), Effect::ClearPanel);
        assert_eq!(state.mode(), RevealMode::Hidden);
        assert!(state.active_clue().is_none());
    }

    #[test]
    fn selecting_removes_only_that_clue() {
        let mut state = board();
        state.handle(Event::SelectCell(cell(2, 22)));

        assert!(state.find_clue(cell(2, 22)).is_none());
        let remaining: Vec<ClueId> = state.categories()[1].clues.iter().map(|c| c.id).collect();
        assert_eq!(remaining, vec![20, 21, 23, 24]);
        assert_eq!(state.categories()[0].clues.len(), 5);
    }

    #[test]
    fn selecting_a_used_cell_does_nothing() {
        let mut state = board();
        state.handle(Event::SelectCell(cell(1, 10)));
        state.handle(Event::ClickPanel);
        state.handle(Event::ClickPanel);

        assert_eq!(state.handle(Event::SelectCell(cell(1, 10))), Effect::Nothing);
        assert_eq!(state.mode(), RevealMode::Hidden);
    }

    #[test]
    fn unknown_cells_do_nothing() {
        let mut state = board();
        assert_eq!(state.handle(Event::SelectCell(cell(9, 10))), Effect::Nothing);
        assert_eq!(state.handle(Event::SelectCell(cell(1, 99))), Effect::Nothing);
        assert_eq!(state.mode(), RevealMode::Hidden);
        assert_eq!(state.categories().len(), 2);
    }

    #[test]
    fn panel_click_while_hidden_does_nothing() {
        let mut state = board();
        assert_eq!(state.handle(Event::ClickPanel), Effect::Nothing);
        assert_eq!(state.mode(), RevealMode::Hidden);
    }

    #[test]
    fn cell_clicks_are_ignored_while_a_clue_is_active() {
        let mut state = board();
        state.handle(Event::SelectCell(cell(1, 10)));
        assert_eq!(state.handle(Event::SelectCell(cell(2, 20))), Effect::Nothing);
        assert_eq!(state.active_clue().unwrap().cell, cell(1, 10));
        assert!(state.find_clue(cell(2, 20)).is_some());

        state.handle(Event::ClickPanel);
        assert_eq!(state.handle(Event::SelectCell(cell(2, 20))), Effect::Nothing);
        assert_eq!(state.mode(), RevealMode::ShowingAnswer);
    }

    #[test]
    fn exhausted_category_is_dropped() {
        let mut state = GameState::with_categories(vec![category(1, &[10]), category(2, &[20])]);
        state.handle(Event::SelectCell(cell(1, 10)));

        assert_eq!(state.categories().len(), 1);
        assert_eq!(state.categories()[0].id, 2);
        // the active clue outlives its category
        assert_eq!(
            state.handle(Event::ClickPanel),
            Effect::ShowAnswer {
                cell: cell(1, 10),
                answer: "answer 10".to_string()
            }
        );
        state.handle(Event::ClickPanel);
        assert_eq!(state.handle(Event::SelectCell(cell(1, 10))), Effect::Nothing);
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = board();
        state.handle(Event::SelectCell(cell(1, 10)));
        state.reset();

        assert!(state.categories().is_empty());
        assert_eq!(state.mode(), RevealMode::Hidden);
        assert!(state.active_clue().is_none());
    }
}
