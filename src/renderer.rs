use crate::browser;
use crate::game::{Category, CellId, Effect, GameState};
use anyhow::{anyhow, Result};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

// ==================== Constants ====================
// ids and classes expected in static/index.html
pub mod html {
    pub const PLAY_ID: &str = "play";
    pub const SPINNER_ID: &str = "spinner";
    pub const CATEGORIES_ID: &str = "categories";
    pub const CLUES_ID: &str = "clues";
    pub const ACTIVE_CLUE_ID: &str = "active-clue";
    pub const CLUE_CLASS: &str = "clue";
    pub const VIEWED_CLASS: &str = "viewed";
}

pub mod label {
    pub const START: &str = "Start the Game!";
    pub const RESTART: &str = "Restart the Game!";
    pub const RETRY: &str = "Something went wrong. Try again!";
}

const USED_STYLE: &[(&str, &str)] = &[("background-color", "#bbb")];

const COMPLETED_STYLE: &[(&str, &str)] = &[
    ("text-decoration", "line-through"),
    ("background-color", "#ccc"),
    ("color", "#999"),
    ("cursor", "not-allowed"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub id: CellId,
    pub value: u32,
}

/// Table layout of a board: one column per category, one row per clue
/// position. A category that is short a clue leaves `None` in that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<GridCell>>>,
}

impl Grid {
    pub fn layout(categories: &[Category]) -> Self {
        let depth = categories
            .iter()
            .map(|category| category.clues.len())
            .max()
            .unwrap_or(0);
        let rows = (0..depth)
            .map(|position| {
                categories
                    .iter()
                    .map(|category| {
                        category.clues.get(position).map(|clue| GridCell {
                            id: CellId {
                                category: category.id,
                                clue: clue.id,
                            },
                            value: clue.value,
                        })
                    })
                    .collect()
            })
            .collect();
        Grid {
            headers: categories.iter().map(|c| c.title.clone()).collect(),
            rows,
        }
    }
}

/// Handles to the page elements the game draws into.
pub struct Board {
    play: HtmlElement,
    spinner: HtmlElement,
    categories: HtmlElement,
    clues: HtmlElement,
    active_clue: HtmlElement,
}

impl Board {
    pub fn from_document() -> Result<Self> {
        Ok(Board {
            play: browser::html_element_by_id(html::PLAY_ID)?,
            spinner: browser::html_element_by_id(html::SPINNER_ID)?,
            categories: browser::html_element_by_id(html::CATEGORIES_ID)?,
            clues: browser::html_element_by_id(html::CLUES_ID)?,
            active_clue: browser::html_element_by_id(html::ACTIVE_CLUE_ID)?,
        })
    }

    pub fn play(&self) -> &HtmlElement {
        &self.play
    }

    pub fn clues(&self) -> &HtmlElement {
        &self.clues
    }

    pub fn active_clue(&self) -> &HtmlElement {
        &self.active_clue
    }

    pub fn set_play_label(&self, text: &str) {
        self.play.set_text_content(Some(text));
    }

    pub fn show_loading(&self, loading: bool) -> Result<()> {
        let display = if loading { "block" } else { "none" };
        set_style(&self.spinner, &[("display", display)])
    }

    /// Empties the header row, the grid and the panel.
    pub fn clear(&self) {
        self.categories.set_inner_html("");
        self.clues.set_inner_html("");
        self.set_panel(None);
    }

    /// Draws the header row and the grid for the current categories.
    pub fn draw(&self, state: &GameState) -> Result<()> {
        let grid = Grid::layout(state.categories());

        for title in &grid.headers {
            let header = browser::create_element("th")?;
            header.set_text_content(Some(title.as_str()));
            append(&self.categories, &header)?;
        }

        for row in &grid.rows {
            let tr = browser::create_element("tr")?;
            for cell in row {
                let td = browser::create_element("td")?;
                if let Some(cell) = cell {
                    td.set_id(&cell.id.to_string());
                    td.set_class_name(html::CLUE_CLASS);
                    td.set_text_content(Some(format!("${}", cell.value).as_str()));
                }
                append(&tr, &td)?;
            }
            append(&self.clues, &tr)?;
        }

        self.set_panel(state.panel_text());
        Ok(())
    }

    /// Shows the visible side of a state transition.
    pub fn apply(&self, effect: &Effect) -> Result<()> {
        match effect {
            Effect::Nothing => {}
            Effect::ShowQuestion { cell, question } => {
                if let Some(element) = self.cell(*cell) {
                    element
                        .class_list()
                        .add_1(html::VIEWED_CLASS)
                        .map_err(|err| anyhow!("Could not mark cell {} viewed : {:#?}", cell, err))?;
                    set_style(&element, USED_STYLE)?;
                }
                self.set_panel(Some(question.as_str()));
            }
            Effect::ShowAnswer { cell, answer } => {
                if let Some(element) = self.cell(*cell) {
                    set_style(&element, COMPLETED_STYLE)?;
                }
                self.set_panel(Some(answer.as_str()));
            }
            Effect::ClearPanel => self.set_panel(None),
        }
        Ok(())
    }

    pub fn cell(&self, id: CellId) -> Option<HtmlElement> {
        browser::document()
            .ok()?
            .get_element_by_id(&id.to_string())?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    // text only, clue text is never parsed as markup
    fn set_panel(&self, text: Option<&str>) {
        self.active_clue.set_text_content(text);
    }
}

fn append(parent: &web_sys::Node, child: &web_sys::Node) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|err| anyhow!("Could not append element : {:#?}", err))
}

fn set_style(element: &HtmlElement, properties: &[(&str, &str)]) -> Result<()> {
    let style = element.style();
    for (property, value) in properties {
        style
            .set_property(property, value)
            .map_err(|err| anyhow!("Could not set {} : {:#?}", property, err))?;
    }
    Ok(())
}
