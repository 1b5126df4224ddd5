//! heart-risk: desktop form for the heart disease classifier

use std::process::ExitCode;

use heart_risk::app::InferenceAdapter;
use heart_risk::config::AppConfig;
use heart_risk::domain::Schema;
use heart_risk::model::{Classifier, LoadedModel, ModelError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[cfg(windows)]
    #[error("Form window failed: {0}")]
    Window(#[from] heart_risk::ui::FormWindowError),
    #[cfg_attr(windows, allow(dead_code))]
    #[error("The prediction form needs a Windows desktop")]
    UnsupportedPlatform,
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let default_level = "info";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env();
    let schema = Schema::heart();

    // A missing or incompatible artifact is fatal
    let model = LoadedModel::load(&config.model_path, schema)?;
    let adapter: InferenceAdapter<Box<dyn Classifier>> = InferenceAdapter::new(Box::new(model));

    show_form(&config, schema, adapter)
}

#[cfg(windows)]
fn show_form(
    config: &AppConfig,
    schema: Schema,
    adapter: InferenceAdapter<Box<dyn Classifier>>,
) -> Result<(), AppError> {
    heart_risk::platform::enable_dpi_awareness();
    heart_risk::ui::FormWindow::run(&config.window, schema, adapter)?;
    Ok(())
}

#[cfg(not(windows))]
fn show_form(
    _config: &AppConfig,
    _schema: Schema,
    _adapter: InferenceAdapter<Box<dyn Classifier>>,
) -> Result<(), AppError> {
    Err(AppError::UnsupportedPlatform)
}
