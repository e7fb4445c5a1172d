use crate::api::{self, TriviaApi};
use crate::browser;
use crate::game::{CellId, Event, GameState};
use crate::renderer::{label, Board};
use anyhow::Result;
// ELI5: web assembly is a single threaded environment, so Rc Cell RefCell > Mutex
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

/// Marks a setup as running for as long as it is alive. Dropping it, on any
/// path out of the setup, lets the next start request through.
struct SetupGuard<'a> {
    running: &'a Cell<bool>,
}

impl<'a> SetupGuard<'a> {
    fn acquire(running: &'a Cell<bool>) -> Option<Self> {
        if running.replace(true) {
            None
        } else {
            Some(SetupGuard { running })
        }
    }
}

impl Drop for SetupGuard<'_> {
    fn drop(&mut self) {
        self.running.set(false);
    }
}

/// Owns the game state and wires page clicks to it.
pub struct App {
    state: RefCell<GameState>,
    board: Board,
    api: Box<dyn TriviaApi>,
    setup_running: Cell<bool>,
}

impl App {
    pub fn new(board: Board, api: Box<dyn TriviaApi>) -> Rc<Self> {
        Rc::new(App {
            state: RefCell::new(GameState::new()),
            board,
            api,
            setup_running: Cell::new(false),
        })
    }

    pub fn state(&self) -> Ref<'_, GameState> {
        self.state.borrow()
    }

    pub fn is_setting_up(&self) -> bool {
        self.setup_running.get()
    }

    /// Hooks the play button, the grid and the panel up to `app`.
    pub fn install(app: &Rc<Self>) -> Result<()> {
        let play = app.clone();
        browser::on_click(app.board.play(), move |_| App::start(play.clone()))?;

        // one listener for the whole grid, cells are found by their id
        let cells = app.clone();
        browser::on_click(app.board.clues(), move |event| {
            if let Some(id) = browser::event_target_id(&event) {
                if let Err(err) = cells.select_cell(&id) {
                    error!("Could not select cell {} : {:?}", id, err);
                }
            }
        })?;

        let panel = app.clone();
        browser::on_click(app.board.active_clue(), move |_| {
            if let Err(err) = panel.click_panel() {
                error!("Could not reveal clue : {:?}", err);
            }
        })?;
        Ok(())
    }

    /// Starts a new game in the background.
    pub fn start(app: Rc<Self>) {
        browser::spawn_local(async move { app.setup().await });
    }

    /// Runs one full setup. Ignored if another setup has not finished yet.
    pub async fn setup(&self) {
        let _guard = match SetupGuard::acquire(&self.setup_running) {
            Some(guard) => guard,
            None => {
                log!("Game setup already in progress, ignoring restart");
                return;
            }
        };

        match self.load_game().await {
            Ok(()) => log!(
                "Game ready with {} categories",
                self.state.borrow().categories().len()
            ),
            Err(err) => {
                error!("Could not set up the game : {:?}", err);
                // a board drawn halfway is not playable
                self.state.borrow_mut().reset();
                self.board.clear();
                self.board.set_play_label(label::RETRY);
            }
        }
        if let Err(err) = self.board.show_loading(false) {
            error!("Could not hide loading indicator : {:?}", err);
        }
    }

    async fn load_game(&self) -> Result<()> {
        self.board.show_loading(true)?;
        self.board.clear();
        self.state.borrow_mut().reset();
        self.board.set_play_label(label::RESTART);

        let categories = api::load_board(&*self.api, &mut rand::thread_rng()).await?;

        let mut state = self.state.borrow_mut();
        *state = GameState::with_categories(categories);
        self.board.draw(&state)
    }

    /// Click on the grid element with DOM id `dom_id`. Ids that are not cell
    /// ids, and cells whose clue is gone, do nothing.
    pub fn select_cell(&self, dom_id: &str) -> Result<()> {
        let cell = match dom_id.parse::<CellId>() {
            Ok(cell) => cell,
            Err(_) => return Ok(()),
        };
        let effect = self.state.borrow_mut().handle(Event::SelectCell(cell));
        self.board.apply(&effect)
    }

    pub fn click_panel(&self) -> Result<()> {
        let effect = self.state.borrow_mut().handle(Event::ClickPanel);
        self.board.apply(&effect)
    }
}
