//! Main app runner for one-shot analysis

use std::env;
use std::path::Path;
use std::process::ExitCode;

use tokio::io::AsyncReadExt;
use tracing::warn;

use crate::application::ports::ConfigStore;
use crate::application::{AnalysisCallbacks, AnalysisError, AnalyzeCaseUseCase};
use crate::domain::analysis::{human_readable_size, AnalysisRequest, Attachment, ModelSelector};
use crate::domain::config::AppConfig;
use crate::domain::report::Report;
use crate::infrastructure::{FsAttachmentReader, GeminiDispatcher, TracingTelemetrySink, XdgConfigStore};

use super::args::{AnalyzeOptions, Cli};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

const EMPTY_REQUEST_MESSAGE: &str =
    "Nothing to analyze. Provide --history, --examination, --attach or --audio.";

/// Run one analysis and print the result
pub async fn run_analysis(options: AnalyzeOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    let request = match build_request(&options) {
        Ok(request) => request,
        Err(message) => {
            presenter.error(&message);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let dispatcher = GeminiDispatcher::with_timeout(options.timeout)
        .with_custom_endpoint(options.custom_endpoint.clone());
    let use_case =
        AnalyzeCaseUseCase::new(dispatcher, FsAttachmentReader::new(), TracingTelemetrySink::new());

    presenter.start_spinner("Preparing request...");
    let callbacks = spinner_callbacks(&presenter, request.model.clone());

    match use_case.execute(request, callbacks).await {
        Ok(output) => {
            presenter.spinner_success(&format!(
                "Analysis complete ({} parts sent)",
                output.part_count
            ));

            if options.raw {
                presenter.output(output.result.text());
            } else {
                presenter.report(&Report::parse(output.result.text()));
            }

            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail("Analysis failed");
            presenter.error(&e.to_string());

            match e {
                AnalysisError::InvalidInput(_) => ExitCode::from(EXIT_USAGE_ERROR),
                AnalysisError::Configuration(_) => {
                    presenter.info(&format!(
                        "Settings file: {}",
                        XdgConfigStore::new().path().display()
                    ));
                    ExitCode::from(EXIT_ERROR)
                }
                _ => ExitCode::from(EXIT_ERROR),
            }
        }
    }
}

/// Progress callbacks that drive the presenter's spinner
fn spinner_callbacks(presenter: &Presenter, model: ModelSelector) -> AnalysisCallbacks {
    let Some(spinner) = presenter.spinner_handle() else {
        return AnalysisCallbacks::default();
    };

    let on_start = spinner.clone();
    let on_encoded = spinner.clone();
    let on_dispatch = spinner;

    AnalysisCallbacks {
        on_encoding_start: Some(Box::new(move |count: usize| {
            on_start.set_message(format!("Encoding {} file(s)...", count));
        })),
        on_encoded: Some(Box::new(move |name: &str, size: usize| {
            on_encoded.set_message(format!("Encoded {} ({})", name, human_readable_size(size)));
        })),
        on_dispatch_start: Some(Box::new(move || {
            on_dispatch.set_message(format!("Analyzing with {}...", model));
        })),
        on_dispatch_end: None,
    }
}

/// Turn options into a request. Errors are usage errors.
fn build_request(options: &AnalyzeOptions) -> Result<AnalysisRequest, String> {
    let attachments = options
        .attachments
        .iter()
        .map(|path| attachment_from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let audio = options
        .audio
        .as_deref()
        .map(attachment_from_path)
        .transpose()?;

    let request = AnalysisRequest {
        history: options.history.clone(),
        examination: options.examination.clone(),
        attachments,
        audio,
        credential: options.api_key.clone(),
        model: options.model.clone(),
        telemetry_opt_in: options.telemetry,
    };

    if request.is_empty() {
        return Err(EMPTY_REQUEST_MESSAGE.to_string());
    }

    Ok(request)
}

fn attachment_from_path(path: &Path) -> Result<Attachment, String> {
    Attachment::from_path(path).map_err(|e| format!("\"{}\": {}", path.display(), e))
}

/// Resolve parsed arguments and merged settings into analysis options
pub async fn resolve_options(cli: Cli, config: &AppConfig) -> Result<AnalyzeOptions, String> {
    let model = config.model_or_default().map_err(|e| e.to_string())?;
    let timeout = config
        .request_timeout_or_default()
        .map_err(|e| e.to_string())?;

    let history = read_text_input(cli.history, cli.history_file.as_deref())
        .await
        .map_err(|e| format!("Could not read patient history: {}", e))?;
    let examination = read_text_input(cli.examination, cli.examination_file.as_deref())
        .await
        .map_err(|e| format!("Could not read examination findings: {}", e))?;

    Ok(AnalyzeOptions {
        history,
        examination,
        attachments: cli.attachments,
        audio: cli.audio,
        api_key: config.api_key().map(str::to_string),
        model,
        custom_endpoint: config.custom_endpoint().map(str::to_string),
        timeout,
        telemetry: config.telemetry_or_default(),
        raw: cli.raw,
    })
}

/// Inline text wins; otherwise read the file, with `-` meaning stdin
async fn read_text_input(text: Option<String>, file: Option<&Path>) -> std::io::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    match file {
        Some(path) if path == Path::new("-") => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            Ok(buffer)
        }
        Some(path) => tokio::fs::read_to_string(path).await,
        None => Ok(String::new()),
    }
}

/// Build the config layer contributed by command-line flags
pub fn cli_config(cli: &Cli) -> AppConfig {
    AppConfig {
        api_key: None, // API key comes from env/file only
        model: cli.model.clone(),
        custom_endpoint: cli.endpoint.clone(),
        telemetry: if cli.telemetry { Some(true) } else { None },
        request_timeout: cli.timeout.clone(),
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|e| {
        warn!(path = %store.path().display(), error = %e, "ignoring unreadable settings file");
        AppConfig::empty()
    });

    // Build env config
    let env_config = AppConfig {
        api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.trim().is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
