use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{debug, warn};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::tui::{App, AppContext, AppId, Command, Event, Subscription, Theme};

/// The runtime manages one app's lifecycle, event routing, and command execution.
///
/// Async commands run as tokio tasks owned by the runtime. Their results come
/// back over a channel and are applied on the UI loop. Dropping the runtime
/// aborts whatever is still running, so a torn-down screen never sees late
/// responses.
pub struct Runtime<A: App> {
    state: A::State,
    theme: Theme,

    /// Keyboard subscriptions
    key_subscriptions: HashMap<KeyCode, A::Msg>,

    /// Key bindings in declaration order, for the help overlay
    key_bindings: Vec<(KeyCode, &'static str)>,

    event_handlers: Vec<fn(&Event) -> Option<A::Msg>>,

    /// Timer subscriptions: (interval, last_tick, msg)
    timers: Vec<(Duration, Instant, A::Msg)>,

    /// Pending screen switch
    navigation_target: Option<AppId>,

    /// Events emitted by this screen, not yet forwarded to the others
    pending_events: Vec<Event>,

    msg_tx: mpsc::UnboundedSender<A::Msg>,
    msg_rx: mpsc::UnboundedReceiver<A::Msg>,

    /// Spawned async commands, aborted on drop
    tasks: Vec<JoinHandle<()>>,

    /// Async commands whose message has not been applied yet
    in_flight: usize,
}

impl<A: App> Runtime<A> {
    /// Create the runtime and run the app's init command.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(ctx: &AppContext) -> Self {
        let (state, init_command) = A::init(ctx);
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();

        let mut runtime = Self {
            state,
            theme: ctx.theme.clone(),
            key_subscriptions: HashMap::new(),
            key_bindings: Vec::new(),
            event_handlers: Vec::new(),
            timers: Vec::new(),
            navigation_target: None,
            pending_events: Vec::new(),
            msg_tx,
            msg_rx,
            tasks: Vec::new(),
            in_flight: 0,
        };

        runtime.update_subscriptions();

        if let Err(e) = runtime.execute_command(init_command) {
            warn!("Init command for '{}' failed: {}", A::title(), e);
        }

        runtime
    }

    pub fn get_state(&self) -> &A::State {
        &self.state
    }

    pub fn get_title(&self) -> &'static str {
        A::title()
    }

    pub fn get_status(&self) -> Option<Line<'static>> {
        A::status(&self.state, &self.theme)
    }

    pub fn get_key_bindings(&self) -> Vec<(KeyCode, &'static str)> {
        self.key_bindings.clone()
    }

    /// Take the pending navigation target (if any)
    pub fn take_navigation(&mut self) -> Option<AppId> {
        self.navigation_target.take()
    }

    /// Take the events emitted since the last call
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether every async command has reported back
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    /// Feed a message through update and execute the resulting command
    pub fn dispatch(&mut self, msg: A::Msg) -> Result<bool> {
        let command = A::update(&mut self.state, msg);
        let keep_running = self.execute_command(command)?;
        self.update_subscriptions();
        Ok(keep_running)
    }

    /// Handle a keyboard event
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(true);
        }

        match self.key_subscriptions.get(&key_event.code).cloned() {
            Some(msg) => self.dispatch(msg),
            None => Ok(true),
        }
    }

    /// Deliver an event emitted by another screen
    pub fn handle_event(&mut self, event: &Event) -> Result<()> {
        let messages: Vec<A::Msg> = self.event_handlers.iter().filter_map(|h| h(event)).collect();

        for msg in messages {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    /// Fire timers whose interval elapsed
    pub fn poll_timers(&mut self) -> Result<()> {
        let now = Instant::now();
        let mut messages = Vec::new();

        for (interval, last_tick, msg) in &mut self.timers {
            if now.duration_since(*last_tick) >= *interval {
                messages.push(msg.clone());
                *last_tick = now;
            }
        }

        for msg in messages {
            self.dispatch(msg)?;
        }

        Ok(())
    }

    /// Apply results of finished async commands without blocking
    pub fn poll_async(&mut self) -> Result<()> {
        self.tasks.retain(|handle| !handle.is_finished());

        while let Ok(msg) = self.msg_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(msg)?;
        }

        Ok(())
    }

    /// Wait until every async command (including ones spawned by their
    /// results) has reported back. Used by tests and one-shot drivers.
    pub async fn run_until_idle(&mut self) -> Result<()> {
        self.poll_async()?;

        while self.in_flight > 0 {
            match self.msg_rx.recv().await {
                Some(msg) => {
                    self.in_flight -= 1;
                    self.dispatch(msg)?;
                }
                None => break,
            }
        }

        self.tasks.retain(|handle| !handle.is_finished());
        Ok(())
    }

    /// Rebuild subscriptions from current state, keeping timer phases
    fn update_subscriptions(&mut self) {
        let previous_ticks: HashMap<Duration, Instant> = self
            .timers
            .iter()
            .map(|(interval, last_tick, _)| (*interval, *last_tick))
            .collect();

        self.key_subscriptions.clear();
        self.key_bindings.clear();
        self.event_handlers.clear();
        self.timers.clear();

        for sub in A::subscriptions(&self.state) {
            match sub {
                Subscription::Key { key, description, msg } => {
                    self.key_subscriptions.insert(key, msg);
                    self.key_bindings.push((key, description));
                }
                Subscription::Event(handler) => self.event_handlers.push(handler),
                Subscription::Tick { every: interval, msg } => {
                    let last_tick = previous_ticks.get(&interval).copied().unwrap_or_else(Instant::now);
                    self.timers.push((interval, last_tick, msg));
                }
            }
        }
    }

    fn execute_command(&mut self, command: Command<A::Msg>) -> Result<bool> {
        match command {
            Command::None => Ok(true),

            Command::Batch(commands) => {
                for cmd in commands {
                    if !self.execute_command(cmd)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Command::Quit => Ok(false),

            Command::Show(app_id) => {
                // Picked up by the multi-app runtime
                self.navigation_target = Some(app_id);
                Ok(true)
            }

            Command::Emit(event) => {
                debug!("'{}' emitted {:?}", A::title(), event);
                self.pending_events.push(event);
                Ok(true)
            }

            Command::Request(future) => {
                let tx = self.msg_tx.clone();
                self.in_flight += 1;
                self.tasks.push(tokio::spawn(async move {
                    let msg = future.await;
                    // Receiver gone means the screen was torn down
                    let _ = tx.send(msg);
                }));
                Ok(true)
            }
        }
    }

    /// Render the app to a specific area
    pub fn render_to_area(&mut self, frame: &mut Frame, area: Rect) {
        A::view(&mut self.state, frame, area, &self.theme);
    }
}

impl<A: App> Drop for Runtime<A> {
    fn drop(&mut self) {
        let running = self.tasks.iter().filter(|h| !h.is_finished()).count();
        if running > 0 {
            debug!("Aborting {} pending task(s) of '{}'", running, A::title());
        }
        for handle in &self.tasks {
            handle.abort();
        }
    }
}
