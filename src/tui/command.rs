use std::future::Future;
use std::pin::Pin;

use crate::api::Plant;

/// The two screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppId {
    PlantSelect,
    PlantSave,
}

/// Notification passed between screens by the multi-app runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user chose a plant; carries the full record
    PlantSelected(Plant),
}

/// An in-flight request whose outcome is delivered back as a message
pub type Task<Msg> = Pin<Box<dyn Future<Output = Msg> + Send>>;

/// Side effects returned from `App::update`, executed by the runtime
pub enum Command<Msg> {
    None,
    Batch(Vec<Command<Msg>>),

    /// Run a request off the UI loop
    Request(Task<Msg>),

    /// Broadcast an event to the other screens
    Emit(Event),

    /// Switch the visible screen
    Show(AppId),

    Quit,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// Run a fallible API call and turn its outcome into a message.
    ///
    /// Errors reach the screen as their full context chain, ready to display.
    pub fn request<F, T>(call: F, to_msg: impl FnOnce(Result<T, String>) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Command::Request(Box::pin(async move {
            let outcome = call.await.map_err(|e| format!("{:#}", e));
            to_msg(outcome)
        }))
    }
}

impl<Msg> Command<Msg> {
    /// Collapse a list of commands, dropping the no-ops
    pub fn batch(commands: Vec<Command<Msg>>) -> Self {
        let mut commands: Vec<_> = commands.into_iter().filter(|c| !c.is_none()).collect();
        match commands.len() {
            0 => Command::None,
            1 => commands.remove(0),
            _ => Command::Batch(commands),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }
}
