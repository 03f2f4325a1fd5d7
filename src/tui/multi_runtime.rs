use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::info;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::apps::{PlantSaveApp, PlantSelectApp};
use crate::tui::{AppContext, AppId, Runtime, Theme};

/// Owns both screen runtimes and handles navigation between them.
///
/// The selection screen keeps its state while the details screen is shown,
/// so going back resumes where the user left off.
pub struct MultiAppRuntime {
    plant_select: Runtime<PlantSelectApp>,
    plant_save: Runtime<PlantSaveApp>,
    active_app: AppId,
    theme: Theme,

    help_menu_open: bool,
    help_scroll_offset: usize,
}

fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        other => format!("{:?}", other),
    }
}

impl MultiAppRuntime {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            plant_select: Runtime::new(&ctx),
            plant_save: Runtime::new(&ctx),
            active_app: AppId::PlantSelect,
            theme: ctx.theme,
            help_menu_open: false,
            help_scroll_offset: 0,
        }
    }

    pub fn active_app(&self) -> AppId {
        self.active_app
    }

    pub fn plant_select(&self) -> &Runtime<PlantSelectApp> {
        &self.plant_select
    }

    pub fn plant_save(&self) -> &Runtime<PlantSaveApp> {
        &self.plant_save
    }

    /// Returns false when the application should quit
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(true);
        }

        if key_event.code == KeyCode::F(1) {
            self.help_menu_open = !self.help_menu_open;
            self.help_scroll_offset = 0;
            return Ok(true);
        }

        // Help overlay swallows keys while open
        if self.help_menu_open {
            match key_event.code {
                KeyCode::Esc => self.help_menu_open = false,
                KeyCode::Up => self.help_scroll_offset = self.help_scroll_offset.saturating_sub(1),
                KeyCode::Down => self.help_scroll_offset = self.help_scroll_offset.saturating_add(1),
                _ => {}
            }
            return Ok(true);
        }

        let keep_running = match self.active_app {
            AppId::PlantSelect => self.plant_select.handle_key(key_event)?,
            AppId::PlantSave => self.plant_save.handle_key(key_event)?,
        };
        self.route()?;
        Ok(keep_running)
    }

    /// Fire timers and apply finished async work for every screen
    pub fn poll(&mut self) -> Result<()> {
        self.plant_select.poll_timers()?;
        self.plant_select.poll_async()?;
        self.plant_save.poll_timers()?;
        self.plant_save.poll_async()?;
        self.route()
    }

    /// Wait for every screen's outstanding requests, then route their effects
    pub async fn run_until_idle(&mut self) -> Result<()> {
        self.plant_select.run_until_idle().await?;
        self.plant_save.run_until_idle().await?;
        self.route()
    }

    /// Forward emitted events to the other screen, then follow screen switches
    fn route(&mut self) -> Result<()> {
        for event in self.plant_select.take_events() {
            self.plant_save.handle_event(&event)?;
        }
        for event in self.plant_save.take_events() {
            self.plant_select.handle_event(&event)?;
        }

        let targets = [
            self.plant_select.take_navigation(),
            self.plant_save.take_navigation(),
        ];
        for target in targets.into_iter().flatten() {
            if target != self.active_app {
                info!("Navigating from {:?} to {:?}", self.active_app, target);
                self.active_app = target;
            }
        }

        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let full_area = frame.area();
        let [header_area, app_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .areas(full_area);

        let (title, status) = match self.active_app {
            AppId::PlantSelect => (self.plant_select.get_title(), self.plant_select.get_status()),
            AppId::PlantSave => (self.plant_save.get_title(), self.plant_save.get_status()),
        };
        self.render_header(frame, header_area, title, status);

        match self.active_app {
            AppId::PlantSelect => self.plant_select.render_to_area(frame, app_area),
            AppId::PlantSave => self.plant_save.render_to_area(frame, app_area),
        }

        if self.help_menu_open {
            self.render_help_menu(frame, full_area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, title: &str, status: Option<Line<'static>>) {
        let theme = &self.theme;
        let mut spans = vec![Span::styled(
            title.to_string(),
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )];
        if let Some(status_line) = status {
            spans.push(Span::raw("  "));
            spans.extend(status_line.spans);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(false));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(12)])
            .areas(inner);
        frame.render_widget(Paragraph::new(Line::from(spans)), left);
        frame.render_widget(
            Paragraph::new(Span::styled("[F1] Help", theme.muted_style())),
            right,
        );
    }

    fn render_help_menu(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let global_bindings = vec![
            (KeyCode::F(1), "Toggle help menu"),
            (KeyCode::Char('q'), "Quit (Ctrl+Q anywhere)"),
        ];
        let (app_name, app_bindings) = match self.active_app {
            AppId::PlantSelect => (self.plant_select.get_title(), self.plant_select.get_key_bindings()),
            AppId::PlantSave => (self.plant_save.get_title(), self.plant_save.get_key_bindings()),
        };

        let mut lines = Vec::new();
        let sections = [
            ("Global", global_bindings, theme.peach),
            (app_name, app_bindings, theme.blue),
        ];
        for (name, bindings, color) in sections {
            lines.push(Line::from(Span::styled(
                format!("▼ {}", name),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            for (key, description) in bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:12}", key_label(key)), Style::default().fg(theme.lavender)),
                    Span::styled(description, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled("[Esc to close | ↑↓ to scroll]", theme.muted_style())));

        let width = area.width.min(60);
        let height = area.height.min(20);
        let modal_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        let scroll = self.help_scroll_offset.min(lines.len().saturating_sub(1)) as u16;
        frame.render_widget(Clear, modal_area);
        frame.render_widget(
            Paragraph::new(lines).scroll((scroll, 0)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(true))
                    .title(" Help "),
            ),
            modal_area,
        );
    }
}
