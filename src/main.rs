use better_rest::estimation::linear::LinearSleepModel;
use better_rest::estimation::model::SleepModel;
use better_rest::{api, config, estimation, state};
use std::net::SocketAddr;
use std::sync::Arc;

fn init_tracing(level: tracing::Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn load_model(config: &config::Config) -> Box<dyn SleepModel> {
    match config.calibration_path() {
        Some(path) => match estimation::load_calibration_from_path(path) {
            Ok(model) => {
                tracing::info!(path = %path.display(), model = model.name(), "Sleep model loaded");
                model
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load calibration, using default");
                Box::new(LinearSleepModel::with_defaults())
            }
        },
        None => {
            tracing::info!("No calibration path configured, using default model");
            Box::new(LinearSleepModel::with_defaults())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_default()?;
    init_tracing(config.log_level());
    tracing::info!(
        config_path = config::DEFAULT_CONFIG_PATH,
        app = %config.app.name,
        "better-rest starting"
    );

    let model: Arc<dyn SleepModel> = Arc::from(load_model(&config));
    let clock = config.clock_style();
    let state = Arc::new(state::AppState::new(model, clock));

    let app = api::router(state);
    let port = config.server_port();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, clock = ?clock, "API server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
