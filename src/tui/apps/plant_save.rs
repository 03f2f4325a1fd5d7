use crossterm::event::KeyCode;
use log::info;
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::api::Plant;
use crate::tui::{App, AppContext, AppId, Command, Event, Subscription, Theme};

/// Detail screen for the plant chosen on the selection screen
pub struct PlantSaveApp;

#[derive(Clone, Debug)]
pub enum Msg {
    Show(Plant),
    Back,
    Quit,
}

#[derive(Debug, Default)]
pub struct State {
    plant: Option<Plant>,
}

impl State {
    pub fn plant(&self) -> Option<&Plant> {
        self.plant.as_ref()
    }
}

fn frequency_label(plant: &Plant) -> String {
    let times = plant.frequency.times;
    let unit = if times == 1 { "vez" } else { "vezes" };
    if plant.frequency.repeat_every.is_empty() {
        format!("{} {}", times, unit)
    } else {
        format!("{} {} por {}", times, unit, plant.frequency.repeat_every)
    }
}

impl App for PlantSaveApp {
    type State = State;
    type Msg = Msg;

    fn init(_ctx: &AppContext) -> (State, Command<Msg>) {
        (State::default(), Command::None)
    }

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Show(plant) => {
                info!("Showing plant '{}' ({})", plant.name, plant.id);
                state.plant = Some(plant);
                Command::None
            }
            Msg::Back => Command::Show(AppId::PlantSelect),
            Msg::Quit => Command::Quit,
        }
    }

    fn view(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(plant) = &state.plant else {
            let message = Span::styled("Nenhuma planta selecionada", theme.muted_style());
            frame.render_widget(Paragraph::new(message), area);
            return;
        };

        let heading = Style::default().fg(theme.green).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled(plant.about.clone(), Style::default().fg(theme.text))),
            Line::from(""),
            Line::from(Span::styled("Regue sua planta", heading)),
            Line::from(Span::styled(plant.water_tips.clone(), Style::default().fg(theme.text))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Frequência: ", heading),
                Span::styled(frequency_label(plant), Style::default().fg(theme.peach)),
            ]),
            Line::from(vec![
                Span::styled("Ambientes: ", heading),
                Span::styled(plant.environments.join(", "), Style::default().fg(theme.teal)),
            ]),
        ];

        if !plant.photo.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(plant.photo.clone(), theme.muted_style())));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .title(format!(" {} ", plant.name));

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            area.inner(Margin::new(1, 0)),
        );
    }

    fn subscriptions(_state: &State) -> Vec<Subscription<Msg>> {
        vec![
            Subscription::on_event(|event| match event {
                Event::PlantSelected(plant) => Some(Msg::Show(plant.clone())),
            }),
            Subscription::key(KeyCode::Esc, "Back to the plant list", Msg::Back),
            Subscription::key(KeyCode::Backspace, "Back to the plant list", Msg::Back),
            Subscription::key(KeyCode::Char('q'), "Quit", Msg::Quit),
        ]
    }

    fn title() -> &'static str {
        "Plant Details"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        state.plant.as_ref().map(|plant| {
            Line::from(Span::styled(plant.name.clone(), Style::default().fg(theme.green)))
        })
    }
}
