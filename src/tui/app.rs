use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use std::sync::Arc;

use crate::api::PlantsApi;
use crate::tui::{Command, Subscription, Theme};

/// Shared services handed to every app when its runtime starts
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn PlantsApi>,
    pub theme: Theme,
}

impl AppContext {
    pub fn new(api: Arc<dyn PlantsApi>, theme: Theme) -> Self {
        Self { api, theme }
    }
}

/// The main trait that all TUI apps must implement.
///
/// This follows the Elm architecture:
/// - State: the app's data, only changed inside update
/// - Msg: events/actions that can happen
/// - update: handles messages and returns commands (side effects)
/// - view: renders the current state
/// - subscriptions: declares what inputs the app wants to receive
pub trait App: Sized + Send + 'static {
    type State: Send;

    type Msg: Clone + Send + 'static;

    /// Build the initial state and the commands to run on first activation
    fn init(ctx: &AppContext) -> (Self::State, Command<Self::Msg>);

    fn update(state: &mut Self::State, msg: Self::Msg) -> Command<Self::Msg>;

    /// Draw the state into `area`.
    /// Takes &mut so views can remember layout facts (e.g. scroll offsets).
    fn view(state: &mut Self::State, frame: &mut Frame, area: Rect, theme: &Theme);

    fn subscriptions(state: &Self::State) -> Vec<Subscription<Self::Msg>>;

    /// Title shown in the global header
    fn title() -> &'static str;

    /// Optional dynamic status shown next to the title
    fn status(_state: &Self::State, _theme: &Theme) -> Option<Line<'static>> {
        None
    }
}
