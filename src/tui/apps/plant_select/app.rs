use crossterm::event::KeyCode;
use log::{debug, error, info, warn};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use std::time::Duration;

use super::state::{GRID_COLUMNS, State};
use super::view;
use crate::api::constants::FIRST_PAGE;
use crate::api::{Environment, Plant};
use crate::plants::{self, ALL_ENVIRONMENTS};
use crate::tui::{App, AppContext, AppId, Command, Event, Resource, Subscription, Theme};

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

pub struct PlantSelectApp;

#[derive(Clone, Debug)]
pub enum Msg {
    EnvironmentsLoaded(Result<Vec<Environment>, String>),
    PageLoaded {
        page: u32,
        generation: u64,
        result: Result<Option<Vec<Plant>>, String>,
    },
    SelectEnvironment(String),
    NextEnvironment,
    PreviousEnvironment,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    Home,
    /// The user pulled `distance_from_end` rows past the end of the grid
    EndReached { distance_from_end: f32 },
    SelectPlant,
    Retry,
    Tick,
    Quit,
}

fn fetch_environments(state: &State) -> Command<Msg> {
    let api = state.api.clone();
    Command::request(async move { api.fetch_environments().await }, Msg::EnvironmentsLoaded)
}

fn fetch_page(state: &State, page: u32) -> Command<Msg> {
    let api = state.api.clone();
    let generation = state.generation;
    debug!("Requesting plants page {} (generation {})", page, generation);
    Command::request(async move { api.fetch_plants(page).await }, move |result| Msg::PageLoaded {
        page,
        generation,
        result,
    })
}

fn request_more(state: &mut State, distance_from_end: f32) -> Command<Msg> {
    match state.pagination.request_more(distance_from_end) {
        Some(page) => {
            info!("Loading more plants: page {}", page);
            state.last_error = None;
            fetch_page(state, page)
        }
        None => Command::None,
    }
}

fn select_environment(state: &mut State, key: &str) {
    info!("Environment filter set to '{}'", key);
    state.catalog.select_environment(key);
    state.cursor = 0;
    state.scroll_row = 0;
}

fn cycle_environment(state: &mut State, forward: bool) {
    let Some(count) = state.environments.to_option().map(Vec::len) else {
        return;
    };
    if count == 0 {
        return;
    }

    let current = state.selected_environment_index().unwrap_or(0);
    let next = if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    };

    let key = state
        .environments
        .to_option()
        .and_then(|envs| envs.get(next))
        .map(|e| e.key.clone())
        .unwrap_or_else(|| ALL_ENVIRONMENTS.to_string());
    select_environment(state, &key);
}

fn apply_page(state: &mut State, page: u32, result: Result<Option<Vec<Plant>>, String>) {
    match result {
        Ok(Some(items)) => {
            let received = items.len();
            info!("Received page {} with {} plants", page, received);
            state.catalog.apply_page(page, items);
            state.pagination.complete(received);
            state.loading = false;
            state.load_error = None;
            state.last_error = None;
            state.clamp_cursor();
        }
        Ok(None) => {
            // Observed behaviour: no data puts the screen back into loading
            warn!("Page {} returned no data, back to loading state", page);
            state.loading = true;
        }
        Err(e) => {
            error!("Failed to load plants page {}: {}", page, e);
            if state.pagination.is_loading_more() {
                state.pagination.fail();
                state.last_error = Some(e);
            } else {
                state.load_error = Some(e);
            }
        }
    }
}

fn retry(state: &mut State) -> Command<Msg> {
    let mut commands = Vec::new();

    if state.loading {
        info!("Reloading plants from the first page");
        state.generation += 1;
        state.pagination.reset();
        state.load_error = None;
        state.cursor = 0;
        state.scroll_row = 0;
        commands.push(fetch_page(state, FIRST_PAGE));
    } else if state.last_error.is_some() {
        commands.push(request_more(state, plants::END_REACHED_MIN_DISTANCE));
    }

    if !state.environments.is_success() && !state.environments.is_loading() {
        state.environments = Resource::Loading;
        commands.push(fetch_environments(state));
    }

    Command::batch(commands)
}

fn move_down(state: &mut State, rows: usize) -> Command<Msg> {
    let len = state.catalog.filtered().len();
    let row = state.cursor / GRID_COLUMNS;
    let last_row = state.row_count().saturating_sub(1);

    if len > 0 && row < last_row {
        state.cursor = (state.cursor + rows * GRID_COLUMNS).min(len - 1);
        state.ensure_cursor_visible();
        Command::None
    } else {
        // Already on the last row: the key pulls past the end of the list
        request_more(state, rows as f32)
    }
}

fn move_up(state: &mut State, rows: usize) {
    let column = state.cursor % GRID_COLUMNS;
    let row = (state.cursor / GRID_COLUMNS).saturating_sub(rows);
    state.cursor = row * GRID_COLUMNS + column;
    state.clamp_cursor();
    state.ensure_cursor_visible();
}

impl App for PlantSelectApp {
    type State = State;
    type Msg = Msg;

    fn init(ctx: &AppContext) -> (State, Command<Msg>) {
        let state = State::new(ctx.api.clone());
        let command = Command::batch(vec![
            fetch_environments(&state),
            fetch_page(&state, FIRST_PAGE),
        ]);
        (state, command)
    }

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::EnvironmentsLoaded(result) => {
                match &result {
                    Ok(envs) => info!("Loaded {} environments", envs.len()),
                    Err(e) => error!("Failed to load environments: {}", e),
                }
                state.environments = Resource::from_result(result.map(plants::with_all_sentinel));
                Command::None
            }
            Msg::PageLoaded {
                page,
                generation,
                result,
            } => {
                if generation != state.generation {
                    debug!(
                        "Discarding stale page {} (generation {}, current {})",
                        page, generation, state.generation
                    );
                    return Command::None;
                }
                apply_page(state, page, result);
                Command::None
            }
            Msg::SelectEnvironment(key) => {
                select_environment(state, &key);
                Command::None
            }
            Msg::NextEnvironment => {
                cycle_environment(state, true);
                Command::None
            }
            Msg::PreviousEnvironment => {
                cycle_environment(state, false);
                Command::None
            }
            Msg::MoveDown => move_down(state, 1),
            Msg::PageDown => {
                let rows = state.visible_rows.max(1);
                move_down(state, rows)
            }
            Msg::MoveUp => {
                move_up(state, 1);
                Command::None
            }
            Msg::PageUp => {
                let rows = state.visible_rows.max(1);
                move_up(state, rows);
                Command::None
            }
            Msg::Home => {
                state.cursor = 0;
                state.scroll_row = 0;
                Command::None
            }
            Msg::MoveLeft => {
                if state.cursor % GRID_COLUMNS > 0 {
                    state.cursor -= 1;
                }
                Command::None
            }
            Msg::MoveRight => {
                if state.cursor % GRID_COLUMNS < GRID_COLUMNS - 1
                    && state.cursor + 1 < state.catalog.filtered().len()
                {
                    state.cursor += 1;
                }
                Command::None
            }
            Msg::EndReached { distance_from_end } => request_more(state, distance_from_end),
            Msg::SelectPlant => match state.highlighted_plant() {
                Some(plant) => {
                    info!("Selected plant '{}' ({})", plant.name, plant.id);
                    Command::batch(vec![
                        Command::Emit(Event::PlantSelected(plant.clone())),
                        Command::Show(AppId::PlantSave),
                    ])
                }
                None => Command::None,
            },
            Msg::Retry => retry(state),
            Msg::Tick => {
                state.spinner_frame = (state.spinner_frame + 1) % SPINNER_FRAMES.len();
                Command::None
            }
            Msg::Quit => Command::Quit,
        }
    }

    fn view(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
        view::render(state, frame, area, theme);
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        let mut subs = vec![Subscription::key(KeyCode::Char('q'), "Quit", Msg::Quit)];

        if state.loading || state.is_loading_more() || state.environments.is_loading() {
            subs.push(Subscription::tick(SPINNER_INTERVAL, Msg::Tick));
        }

        if state.loading {
            subs.push(Subscription::key(KeyCode::Char('r'), "Reload from the first page", Msg::Retry));
            return subs;
        }

        subs.extend([
            Subscription::key(KeyCode::Up, "Move up", Msg::MoveUp),
            Subscription::key(KeyCode::Down, "Move down / load more at the end", Msg::MoveDown),
            Subscription::key(KeyCode::Left, "Move left", Msg::MoveLeft),
            Subscription::key(KeyCode::Right, "Move right", Msg::MoveRight),
            Subscription::key(KeyCode::PageUp, "Page up", Msg::PageUp),
            Subscription::key(KeyCode::PageDown, "Page down / load more at the end", Msg::PageDown),
            Subscription::key(KeyCode::Home, "Back to the first plant", Msg::Home),
            Subscription::key(KeyCode::Tab, "Next environment", Msg::NextEnvironment),
            Subscription::key(KeyCode::BackTab, "Previous environment", Msg::PreviousEnvironment),
            Subscription::key(KeyCode::Enter, "Choose plant", Msg::SelectPlant),
        ]);

        if state.last_error.is_some() || state.environments.is_failure() {
            subs.push(Subscription::key(KeyCode::Char('r'), "Retry failed request", Msg::Retry));
        }

        subs
    }

    fn title() -> &'static str {
        "Plant Select"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        if state.loading {
            return None;
        }

        let filter = state.environment_title(state.catalog.selected_environment()).to_string();
        Some(Line::from(vec![
            Span::styled(
                format!("página {}", state.pagination.page()),
                Style::default().fg(theme.overlay1),
            ),
            Span::raw(" · "),
            Span::styled(
                format!(
                    "{} de {} plantas",
                    state.catalog.filtered().len(),
                    state.catalog.plants().len()
                ),
                Style::default().fg(theme.teal),
            ),
            Span::raw(" · "),
            Span::styled(filter, Style::default().fg(theme.green)),
        ]))
    }
}
