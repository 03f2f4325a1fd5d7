use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use super::app::SPINNER_FRAMES;
use super::state::{GRID_COLUMNS, State};
use crate::api::Plant;
use crate::tui::{Resource, Theme};

/// Lines taken by one plant card, borders included
const CARD_HEIGHT: u16 = 4;

pub fn render(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
    if state.loading {
        render_loading(state, frame, area, theme);
        return;
    }

    let [heading_area, chips_area, grid_area, footer_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(CARD_HEIGHT + 2),
            Constraint::Length(1),
        ])
        .areas(area);

    render_heading(frame, heading_area, theme);
    render_environments(state, frame, chips_area, theme);
    render_grid(state, frame, grid_area, theme);
    render_footer(state, frame, footer_area, theme);
}

fn spinner(state: &State) -> &'static str {
    SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()]
}

fn render_loading(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = match &state.load_error {
        Some(error) => vec![
            Line::from(Span::styled("Não foi possível carregar as plantas", theme.error_style())),
            Line::from(""),
            Line::from(Span::styled(error.clone(), Style::default().fg(theme.subtext0))),
            Line::from(""),
            Line::from(Span::styled("[r] tentar novamente", theme.muted_style())),
        ],
        None => vec![
            Line::from(Span::styled(
                format!("{} Carregando...", spinner(state)),
                Style::default().fg(theme.green),
            )),
            Line::from(""),
            Line::from(Span::styled("[r] recarregar", theme.muted_style())),
        ],
    };

    let height = (lines.len() as u16).min(area.height);
    let centered = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: area.width,
        height,
    };

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered,
    );
}

fn render_heading(frame: &mut Frame, area: Rect, theme: &Theme) {
    let heading = vec![
        Line::from(Span::styled(
            "Em qual ambiente",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "você quer colocar sua planta?",
            Style::default().fg(theme.subtext0),
        )),
    ];
    frame.render_widget(Paragraph::new(heading), area);
}

fn render_environments(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style(false));

    match &state.environments {
        Resource::Success(environments) => {
            let titles: Vec<Line> = environments
                .iter()
                .map(|e| Line::from(format!(" {} ", e.title)))
                .collect();
            let tabs = Tabs::new(titles)
                .block(block)
                .style(Style::default().fg(theme.subtext0))
                .highlight_style(theme.active_style())
                .select(state.selected_environment_index().unwrap_or(0))
                .divider(" ");
            frame.render_widget(tabs, area);
        }
        Resource::Failure(error) => {
            let line = Line::from(vec![
                Span::styled("Ambientes indisponíveis: ", theme.error_style()),
                Span::styled(error.clone(), Style::default().fg(theme.subtext0)),
                Span::styled("  [r] tentar novamente", theme.muted_style()),
            ]);
            frame.render_widget(Paragraph::new(line).block(block), area);
        }
        Resource::Loading => {
            let line = Line::from(Span::styled(
                format!("{} carregando ambientes", spinner(state)),
                theme.muted_style(),
            ));
            frame.render_widget(Paragraph::new(line).block(block), area);
        }
    }
}

fn render_grid(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(true))
        .title(" Plantas ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    state.visible_rows = ((inner.height / CARD_HEIGHT) as usize).max(1);
    state.ensure_cursor_visible();

    if state.catalog.filtered().is_empty() {
        let message = if state.catalog.plants().is_empty() {
            "Nenhuma planta encontrada"
        } else {
            "Nenhuma planta neste ambiente ainda. Desça para carregar mais."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, theme.muted_style()))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let first = state.scroll_row * GRID_COLUMNS;
    let last = (first + state.visible_rows * GRID_COLUMNS).min(state.catalog.filtered().len());

    for (offset, index) in (first..last).enumerate() {
        let row = (offset / GRID_COLUMNS) as u16;
        let column = (offset % GRID_COLUMNS) as u16;
        let width = inner.width / GRID_COLUMNS as u16;

        let card_area = Rect {
            x: inner.x + column * width,
            y: inner.y + row * CARD_HEIGHT,
            width,
            height: CARD_HEIGHT,
        }
        .intersection(inner);

        let plant = &state.catalog.filtered()[index];
        render_card(state, plant, index == state.cursor, frame, card_area, theme);
    }
}

fn render_card(
    state: &State,
    plant: &Plant,
    highlighted: bool,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let name_style = if highlighted {
        Style::default().fg(theme.green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let environments: Vec<&str> = plant
        .environments
        .iter()
        .map(|key| state.environment_title(key))
        .collect();

    let lines = vec![
        Line::from(Span::styled(plant.name.clone(), name_style)),
        Line::from(Span::styled(environments.join(", "), theme.muted_style())),
    ];

    let card = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(highlighted)),
    );
    frame.render_widget(card, area);
}

fn render_footer(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let line = if state.is_loading_more() {
        Line::from(Span::styled(
            format!("{} carregando mais plantas", spinner(state)),
            Style::default().fg(theme.green),
        ))
    } else if let Some(error) = &state.last_error {
        Line::from(vec![
            Span::styled(format!("Erro: {}", error), theme.error_style()),
            Span::styled("  [r] tentar novamente", theme.muted_style()),
        ])
    } else {
        Line::from(Span::styled(
            "[Tab] ambiente  [↑↓←→] navegar  [Enter] escolher",
            theme.muted_style(),
        ))
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
