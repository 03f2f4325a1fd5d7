//! In-memory plants API shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use plant_select::api::{Environment, Frequency, Plant, PlantId, PlantsApi};
use plant_select::tui::{AppContext, Theme, ThemeVariant};

/// What the fake server answers for one page
#[derive(Clone)]
pub enum PageReply {
    Plants(Vec<Plant>),
    Null,
    Error(String),
}

#[derive(Default)]
pub struct FakePlantsApi {
    environments: Vec<Environment>,
    pages: Mutex<HashMap<u32, Vec<PageReply>>>,
    requested: Mutex<Vec<u32>>,
    gates: Mutex<HashMap<u32, Arc<Notify>>>,
}

impl FakePlantsApi {
    pub fn new(environments: Vec<Environment>) -> Self {
        Self {
            environments,
            ..Default::default()
        }
    }

    /// Queue a reply for `page`. Replies are consumed in order; the last one
    /// keeps being served once the queue runs dry.
    pub fn reply(self, page: u32, reply: PageReply) -> Self {
        self.pages.lock().unwrap().entry(page).or_default().push(reply);
        self
    }

    pub fn page(self, page: u32, plants: Vec<Plant>) -> Self {
        self.reply(page, PageReply::Plants(plants))
    }

    /// Hold the next request for `page` until the returned handle is notified
    pub fn gate(&self, page: u32) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(page, notify.clone());
        notify
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlantsApi for FakePlantsApi {
    async fn fetch_environments(&self) -> anyhow::Result<Vec<Environment>> {
        Ok(self.environments.clone())
    }

    async fn fetch_plants(&self, page: u32) -> anyhow::Result<Option<Vec<Plant>>> {
        self.requested.lock().unwrap().push(page);

        let reply = {
            let mut pages = self.pages.lock().unwrap();
            match pages.get_mut(&page) {
                Some(queue) if queue.len() > 1 => queue.remove(0),
                Some(queue) if !queue.is_empty() => queue[0].clone(),
                _ => PageReply::Plants(Vec::new()),
            }
        };

        let gate = self.gates.lock().unwrap().remove(&page);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match reply {
            PageReply::Plants(plants) => Ok(Some(plants)),
            PageReply::Null => Ok(None),
            PageReply::Error(message) => Err(anyhow::anyhow!(message)),
        }
    }
}

pub fn plant(id: u64, name: &str, environments: &[&str]) -> Plant {
    Plant {
        id: PlantId::Number(id),
        name: name.to_string(),
        about: format!("About {}", name),
        water_tips: "Keep the soil moist".to_string(),
        photo: String::new(),
        environments: environments.iter().map(|e| e.to_string()).collect(),
        frequency: Frequency {
            times: 2,
            repeat_every: "week".to_string(),
        },
    }
}

pub fn environments() -> Vec<Environment> {
    vec![
        Environment::new("kitchen", "Cozinha"),
        Environment::new("bedroom", "Quarto"),
        Environment::new("living_room", "Sala"),
    ]
}

/// Eight plants A..H; C and F are the only ones in the living room
pub fn first_page() -> Vec<Plant> {
    vec![
        plant(1, "A", &["kitchen"]),
        plant(2, "B", &["bedroom"]),
        plant(3, "C", &["living_room"]),
        plant(4, "D", &["kitchen", "bedroom"]),
        plant(5, "E", &["bathroom"]),
        plant(6, "F", &["living_room", "kitchen"]),
        plant(7, "G", &["bedroom"]),
        plant(8, "H", &["kitchen"]),
    ]
}

/// Eight plants I..P; K is in the living room
pub fn second_page() -> Vec<Plant> {
    vec![
        plant(9, "I", &["kitchen"]),
        plant(10, "J", &["bedroom"]),
        plant(11, "K", &["living_room"]),
        plant(12, "L", &["kitchen"]),
        plant(13, "M", &["bedroom"]),
        plant(14, "N", &["kitchen"]),
        plant(15, "O", &["bedroom"]),
        plant(16, "P", &["kitchen"]),
    ]
}

pub fn context(api: Arc<FakePlantsApi>) -> AppContext {
    AppContext::new(api, Theme::new(ThemeVariant::Mocha))
}

pub fn names(plants: &[Plant]) -> Vec<&str> {
    plants.iter().map(|p| p.name.as_str()).collect()
}
