use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use pickup_schedule::config::{Config, get_config};
use pickup_schedule::form::apply_form;
use pickup_schedule::render;
use pickup_schedule::schedule::ScheduleStore;

struct AppState {
    config: &'static Config,
    store: Mutex<ScheduleStore>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let config = get_config();
    let store = ScheduleStore::load(&config.data_file, config.slots)?;
    info!("loaded {} weeks from {}", store.weeks().len(), config.data_file);

    let state = Arc::new(AppState {
        config,
        store: Mutex::new(store),
    });

    let app = Router::new()
        .route("/", get(index).post(update))
        .route("/add_week", post(add_week))
        .route("/remove_week/{index}", post(remove_week))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("listening on {}", config.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    let registry = state.config.schema.registry();
    let store = state.store.lock().unwrap();

    let mut page = String::new();
    match render::render_form_page(&store, registry, &mut page) {
        Ok(()) => Html(page).into_response(),
        Err(err) => {
            error!("failed to render schedule page: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn update(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let mut store = state.store.lock().unwrap();
    let updated = apply_form(&mut store, state.config.slots, &fields);
    info!("form update wrote {updated} cells");
    save_and_redirect(&store)
}

async fn add_week(State(state): State<Arc<AppState>>) -> Response {
    let mut store = state.store.lock().unwrap();
    let registry = state.config.schema.registry();
    let start = store.add_week(
        state.config.slots,
        registry.default_code(),
        state.config.start_date,
    );
    info!("added week starting {start}");
    save_and_redirect(&store)
}

async fn remove_week(State(state): State<Arc<AppState>>, Path(index): Path<usize>) -> Response {
    let mut store = state.store.lock().unwrap();
    if !store.remove_week(index) {
        info!("ignoring removal of out-of-range week {index}");
        return Redirect::to("/").into_response();
    }
    info!("removed week {index}");
    save_and_redirect(&store)
}

fn save_and_redirect(store: &ScheduleStore) -> Response {
    match store.save() {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => {
            error!("failed to save schedule: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
