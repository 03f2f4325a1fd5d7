//! Selection screen behaviour driven through the runtime with a fake API

mod common;

use common::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

use plant_select::plants::{ALL_ENVIRONMENTS, ALL_ENVIRONMENTS_TITLE};
use plant_select::tui::apps::PlantSelectApp;
use plant_select::tui::apps::plant_select::Msg;
use plant_select::tui::{AppId, MultiAppRuntime, Runtime};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn loaded(api: Arc<FakePlantsApi>) -> Runtime<PlantSelectApp> {
    let mut runtime = Runtime::<PlantSelectApp>::new(&context(api));
    runtime.run_until_idle().await.unwrap();
    runtime
}

#[tokio::test]
async fn test_initial_load_prepends_sentinel_and_shows_first_page() {
    let api = Arc::new(FakePlantsApi::new(environments()).page(1, first_page()));
    let runtime = loaded(api.clone()).await;
    let state = runtime.get_state();

    let envs = state.environments().to_option().unwrap();
    assert_eq!(envs.len(), 4);
    assert_eq!(envs[0].key, ALL_ENVIRONMENTS);
    assert_eq!(envs[0].title, ALL_ENVIRONMENTS_TITLE);
    assert_eq!(envs[1].key, "kitchen");

    assert!(!state.is_loading());
    assert_eq!(state.catalog().plants().len(), 8);
    assert_eq!(state.catalog().filtered(), state.catalog().plants());
    assert_eq!(state.pagination().page(), 1);
    assert_eq!(api.requested_pages(), vec![1]);
}

#[tokio::test]
async fn test_filter_by_environment_and_back_to_all() {
    let api = Arc::new(FakePlantsApi::new(environments()).page(1, first_page()));
    let mut runtime = loaded(api).await;

    runtime.dispatch(Msg::SelectEnvironment("living_room".to_string())).unwrap();
    assert_eq!(names(runtime.get_state().catalog().filtered()), vec!["C", "F"]);

    runtime.dispatch(Msg::SelectEnvironment("garage".to_string())).unwrap();
    assert!(runtime.get_state().catalog().filtered().is_empty());

    runtime.dispatch(Msg::SelectEnvironment(ALL_ENVIRONMENTS.to_string())).unwrap();
    let state = runtime.get_state();
    assert_eq!(state.catalog().filtered(), state.catalog().plants());
}

#[tokio::test]
async fn test_tab_cycles_environment_chips() {
    let api = Arc::new(FakePlantsApi::new(environments()).page(1, first_page()));
    let mut runtime = loaded(api).await;

    runtime.handle_key(key(KeyCode::Tab)).unwrap();
    assert_eq!(runtime.get_state().catalog().selected_environment(), "kitchen");

    runtime.handle_key(key(KeyCode::BackTab)).unwrap();
    runtime.handle_key(key(KeyCode::BackTab)).unwrap();
    assert_eq!(runtime.get_state().catalog().selected_environment(), "living_room");
    assert_eq!(names(runtime.get_state().catalog().filtered()), vec!["C", "F"]);
}

#[tokio::test]
async fn test_end_reached_below_threshold_does_nothing() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .page(1, first_page())
            .page(2, second_page()),
    );
    let mut runtime = loaded(api.clone()).await;

    runtime.dispatch(Msg::EndReached { distance_from_end: 0.5 }).unwrap();
    runtime.run_until_idle().await.unwrap();

    assert_eq!(api.requested_pages(), vec![1]);
    assert_eq!(runtime.get_state().pagination().page(), 1);
    assert_eq!(runtime.get_state().catalog().plants().len(), 8);
}

#[tokio::test]
async fn test_end_reached_appends_next_page() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .page(1, first_page())
            .page(2, second_page()),
    );
    let mut runtime = loaded(api.clone()).await;

    runtime.dispatch(Msg::EndReached { distance_from_end: 2.0 }).unwrap();
    assert!(runtime.get_state().is_loading_more());
    runtime.run_until_idle().await.unwrap();

    let state = runtime.get_state();
    assert_eq!(api.requested_pages(), vec![1, 2]);
    assert_eq!(state.pagination().page(), 2);
    assert!(!state.is_loading_more());
    assert_eq!(state.catalog().plants().len(), 16);
    assert_eq!(names(&state.catalog().plants()[..8]), names(&first_page()));
    assert_eq!(state.catalog().plants()[8].name, "I");
}

#[tokio::test]
async fn test_only_one_incremental_fetch_at_a_time() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .page(1, first_page())
            .page(2, second_page()),
    );
    let mut runtime = loaded(api.clone()).await;

    runtime.dispatch(Msg::EndReached { distance_from_end: 1.0 }).unwrap();
    runtime.dispatch(Msg::EndReached { distance_from_end: 3.0 }).unwrap();
    runtime.run_until_idle().await.unwrap();

    assert_eq!(api.requested_pages(), vec![1, 2]);
    assert_eq!(runtime.get_state().catalog().plants().len(), 16);
}

#[tokio::test]
async fn test_page_arriving_under_filter_is_appended_as_received() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .page(1, first_page())
            .page(2, second_page()),
    );
    let mut runtime = loaded(api).await;

    runtime.dispatch(Msg::SelectEnvironment("living_room".to_string())).unwrap();
    runtime.dispatch(Msg::EndReached { distance_from_end: 1.0 }).unwrap();
    runtime.run_until_idle().await.unwrap();

    let state = runtime.get_state();
    let mut expected = vec!["C", "F"];
    let second = second_page();
    expected.extend(names(&second));
    assert_eq!(names(state.catalog().filtered()), expected);
    assert_eq!(state.catalog().plants().len(), 16);

    // Picking the chip again narrows over every page fetched so far
    runtime.dispatch(Msg::SelectEnvironment("living_room".to_string())).unwrap();
    assert_eq!(names(runtime.get_state().catalog().filtered()), vec!["C", "F", "K"]);
}

#[tokio::test]
async fn test_moving_down_past_last_row_loads_more() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .page(1, first_page())
            .page(2, second_page()),
    );
    let mut runtime = loaded(api.clone()).await;

    // Four rows of two cards: three moves reach the last row
    for _ in 0..3 {
        runtime.handle_key(key(KeyCode::Down)).unwrap();
    }
    assert_eq!(runtime.get_state().cursor(), 6);
    assert_eq!(api.requested_pages(), vec![1]);

    runtime.handle_key(key(KeyCode::Down)).unwrap();
    runtime.run_until_idle().await.unwrap();

    assert_eq!(api.requested_pages(), vec![1, 2]);
    assert_eq!(runtime.get_state().catalog().plants().len(), 16);
}

#[tokio::test]
async fn test_empty_page_does_not_stop_paging() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .page(1, first_page())
            .page(2, Vec::new())
            .page(3, second_page()),
    );
    let mut runtime = loaded(api.clone()).await;

    runtime.dispatch(Msg::EndReached { distance_from_end: 1.0 }).unwrap();
    runtime.run_until_idle().await.unwrap();
    assert_eq!(runtime.get_state().catalog().plants().len(), 8);

    runtime.dispatch(Msg::EndReached { distance_from_end: 5.0 }).unwrap();
    runtime.run_until_idle().await.unwrap();

    assert_eq!(api.requested_pages(), vec![1, 2, 3]);
    assert_eq!(runtime.get_state().pagination().page(), 3);
    assert_eq!(runtime.get_state().catalog().plants().len(), 16);
}

#[tokio::test]
async fn test_null_first_page_keeps_loading_until_reload() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .reply(1, PageReply::Null)
            .page(1, first_page()),
    );
    let mut runtime = loaded(api.clone()).await;

    assert!(runtime.get_state().is_loading());
    assert!(runtime.get_state().catalog().plants().is_empty());

    runtime.handle_key(key(KeyCode::Char('r'))).unwrap();
    runtime.run_until_idle().await.unwrap();

    assert!(!runtime.get_state().is_loading());
    assert_eq!(runtime.get_state().catalog().plants().len(), 8);
    assert_eq!(api.requested_pages(), vec![1, 1]);
}

#[tokio::test]
async fn test_null_incremental_page_returns_to_loading_until_reload() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .page(1, first_page())
            .reply(2, PageReply::Null),
    );
    let mut runtime = loaded(api.clone()).await;

    runtime.dispatch(Msg::EndReached { distance_from_end: 1.0 }).unwrap();
    runtime.run_until_idle().await.unwrap();

    let state = runtime.get_state();
    assert!(state.is_loading());
    assert_eq!(state.pagination().page(), 2);

    runtime.handle_key(key(KeyCode::Char('r'))).unwrap();
    runtime.run_until_idle().await.unwrap();

    let state = runtime.get_state();
    assert_eq!(api.requested_pages(), vec![1, 2, 1]);
    assert!(!state.is_loading());
    assert!(!state.is_loading_more());
    assert_eq!(state.pagination().page(), 1);
    assert_eq!(state.cursor(), 0);
    assert_eq!(names(state.catalog().plants()), names(&first_page()));
}

#[tokio::test]
async fn test_initial_failure_shows_error_and_retries() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .reply(1, PageReply::Error("connection refused".to_string()))
            .page(1, first_page()),
    );
    let mut runtime = loaded(api).await;

    assert!(runtime.get_state().is_loading());
    assert!(runtime.get_state().load_error().unwrap().contains("connection refused"));

    runtime.dispatch(Msg::Retry).unwrap();
    runtime.run_until_idle().await.unwrap();

    assert!(!runtime.get_state().is_loading());
    assert!(runtime.get_state().load_error().is_none());
    assert_eq!(runtime.get_state().catalog().plants().len(), 8);
}

#[tokio::test]
async fn test_incremental_failure_rolls_back_page() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .page(1, first_page())
            .reply(2, PageReply::Error("timeout".to_string()))
            .page(2, second_page()),
    );
    let mut runtime = loaded(api.clone()).await;

    runtime.dispatch(Msg::EndReached { distance_from_end: 1.0 }).unwrap();
    runtime.run_until_idle().await.unwrap();

    let state = runtime.get_state();
    assert_eq!(state.pagination().page(), 1);
    assert!(state.last_error().is_some());
    assert_eq!(state.catalog().plants().len(), 8);

    runtime.handle_key(key(KeyCode::Char('r'))).unwrap();
    runtime.run_until_idle().await.unwrap();

    let state = runtime.get_state();
    assert_eq!(api.requested_pages(), vec![1, 2, 2]);
    assert_eq!(state.pagination().page(), 2);
    assert!(state.last_error().is_none());
    assert_eq!(state.catalog().plants().len(), 16);
}

#[tokio::test]
async fn test_stale_first_page_is_discarded_after_reload() {
    let api = Arc::new(
        FakePlantsApi::new(environments())
            .page(1, vec![plant(99, "Stale", &["kitchen"])])
            .page(1, first_page()),
    );
    let gate = api.gate(1);

    let mut runtime = Runtime::<PlantSelectApp>::new(&context(api.clone()));
    // Let the first request start and park on the gate
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }
    assert_eq!(api.requested_pages(), vec![1]);

    runtime.dispatch(Msg::Retry).unwrap();
    gate.notify_one();
    runtime.run_until_idle().await.unwrap();

    let state = runtime.get_state();
    assert_eq!(api.requested_pages(), vec![1, 1]);
    assert_eq!(names(state.catalog().plants()), names(&first_page()));
}

#[tokio::test]
async fn test_select_plant_hands_record_to_details_screen() {
    let api = Arc::new(FakePlantsApi::new(environments()).page(1, first_page()));
    let mut runtime = MultiAppRuntime::new(context(api));
    runtime.run_until_idle().await.unwrap();
    assert_eq!(runtime.active_app(), AppId::PlantSelect);

    runtime.handle_key(key(KeyCode::Right)).unwrap();
    runtime.handle_key(key(KeyCode::Down)).unwrap();
    runtime.handle_key(key(KeyCode::Enter)).unwrap();

    assert_eq!(runtime.active_app(), AppId::PlantSave);
    let chosen = runtime.plant_save().get_state().plant().unwrap();
    assert_eq!(chosen, &first_page()[3]);

    runtime.handle_key(key(KeyCode::Esc)).unwrap();
    assert_eq!(runtime.active_app(), AppId::PlantSelect);
    assert_eq!(runtime.plant_select().get_state().cursor(), 3);
}

#[tokio::test]
async fn test_enter_on_empty_filter_stays_put() {
    let api = Arc::new(FakePlantsApi::new(environments()).page(1, first_page()));
    let mut runtime = loaded(api).await;

    runtime.dispatch(Msg::SelectEnvironment("garage".to_string())).unwrap();
    runtime.handle_key(key(KeyCode::Enter)).unwrap();

    assert!(runtime.take_navigation().is_none());
    assert!(runtime.take_events().is_empty());
}

#[tokio::test]
async fn test_help_overlay_swallows_keys() {
    let api = Arc::new(FakePlantsApi::new(environments()).page(1, first_page()));
    let mut runtime = MultiAppRuntime::new(context(api));
    runtime.run_until_idle().await.unwrap();

    runtime.handle_key(key(KeyCode::F(1))).unwrap();
    runtime.handle_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(runtime.active_app(), AppId::PlantSelect);

    runtime.handle_key(key(KeyCode::Esc)).unwrap();
    runtime.handle_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(runtime.active_app(), AppId::PlantSave);
}

#[tokio::test]
async fn test_quit_key_stops_runtime() {
    let api = Arc::new(FakePlantsApi::new(environments()).page(1, first_page()));
    let mut runtime = loaded(api).await;
    assert!(!runtime.handle_key(key(KeyCode::Char('q'))).unwrap());
}
