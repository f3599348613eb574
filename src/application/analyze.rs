//! Analyze clinical case use case

use tracing::debug;

use crate::domain::analysis::{AnalysisRequest, AnalysisResult, InferencePayload};

use super::assemble::{assemble, AnalysisError};
use super::ports::{AttachmentReader, Dispatcher, TelemetryRecord, TelemetrySink};

/// Output from the analyze use case
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// The upstream analysis text
    pub result: AnalysisResult,
    /// Number of parts sent upstream
    pub part_count: usize,
    /// Approximate size of the text payload sent upstream
    pub payload_bytes: usize,
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct AnalysisCallbacks {
    /// Called before the first binary is read
    pub on_encoding_start: Option<Box<dyn Fn(usize) + Send + Sync>>,
    /// Called after each binary is encoded with (name, size in bytes)
    pub on_encoded: Option<Box<dyn Fn(&str, usize) + Send + Sync>>,
    /// Called right before the request is sent
    pub on_dispatch_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when the upstream call returns successfully
    pub on_dispatch_end: Option<Box<dyn Fn() + Send + Sync>>,
}

/// One-shot clinical analysis use case
pub struct AnalyzeCaseUseCase<D, R, T>
where
    D: Dispatcher,
    R: AttachmentReader,
    T: TelemetrySink,
{
    dispatcher: D,
    reader: R,
    telemetry: T,
}

impl<D, R, T> AnalyzeCaseUseCase<D, R, T>
where
    D: Dispatcher,
    R: AttachmentReader,
    T: TelemetrySink,
{
    /// Create a new use case instance
    pub fn new(dispatcher: D, reader: R, telemetry: T) -> Self {
        Self {
            dispatcher,
            reader,
            telemetry,
        }
    }

    /// Execute the analysis workflow: encode, build, report, dispatch
    pub async fn execute(
        &self,
        request: AnalysisRequest,
        callbacks: AnalysisCallbacks,
    ) -> Result<AnalysisOutput, AnalysisError> {
        let binaries = request.attachments.len() + usize::from(request.audio.is_some());
        if binaries > 0 && request.has_required_credential() {
            if let Some(ref cb) = callbacks.on_encoding_start {
                cb(binaries);
            }
        }

        let on_encoded = |name: &str, size: usize| {
            if let Some(ref cb) = callbacks.on_encoded {
                cb(name, size);
            }
        };
        let payload = assemble(&self.reader, &request, &on_encoded).await?;

        if request.telemetry_opt_in {
            self.emit_telemetry(&request, &payload);
        }

        if let Some(ref cb) = callbacks.on_dispatch_start {
            cb();
        }

        let result = self
            .dispatcher
            .dispatch(&payload, request.credential(), &request.model)
            .await?;

        if let Some(ref cb) = callbacks.on_dispatch_end {
            cb();
        }

        Ok(AnalysisOutput {
            result,
            part_count: payload.len(),
            payload_bytes: payload.text_bytes(),
        })
    }

    /// Fire-and-forget; a failing sink never affects the request
    fn emit_telemetry(&self, request: &AnalysisRequest, payload: &InferencePayload) {
        let record = telemetry_record(request, payload);
        if let Err(e) = self.telemetry.record(&record) {
            debug!(error = %e, "telemetry record dropped");
        }
    }
}

/// Build the counts-only record for a request and its payload
pub fn telemetry_record(request: &AnalysisRequest, payload: &InferencePayload) -> TelemetryRecord {
    let sizes: Vec<usize> = payload.inline_parts().map(|p| p.raw_len()).collect();
    let attachment_count = request.attachments.len();
    let attachment_bytes = sizes.iter().take(attachment_count).sum();
    let audio_bytes = sizes.iter().skip(attachment_count).sum();

    TelemetryRecord {
        model: request.model.to_string(),
        history_chars: request.history.trim().chars().count(),
        examination_chars: request.examination.trim().chars().count(),
        attachment_count,
        attachment_bytes,
        has_audio: request.audio.is_some(),
        audio_bytes,
        part_count: payload.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DispatchError, TelemetryError};
    use crate::domain::analysis::{
        Attachment, BinarySource, MediaType, ModelSelector, PayloadPart,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    // Mock implementations for testing

    #[derive(Clone)]
    struct MockDispatcher {
        calls: Arc<AtomicUsize>,
        seen_parts: Arc<Mutex<usize>>,
        outcome: Result<String, DispatchError>,
    }

    impl MockDispatcher {
        fn returning(outcome: Result<&str, DispatchError>) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                seen_parts: Arc::new(Mutex::new(0)),
                outcome: outcome.map(str::to_string),
            }
        }
    }

    #[async_trait]
    impl Dispatcher for MockDispatcher {
        async fn dispatch(
            &self,
            payload: &InferencePayload,
            _credential: Option<&str>,
            _model: &ModelSelector,
        ) -> Result<AnalysisResult, DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_parts.lock().unwrap() = payload.len();
            assert!(matches!(payload.parts()[0], PayloadPart::Text(_)));
            let text = self.outcome.clone()?;
            AnalysisResult::new(text).ok_or(DispatchError::EmptyResult)
        }
    }

    struct MockReader;

    #[async_trait]
    impl AttachmentReader for MockReader {
        async fn read(&self, attachment: &Attachment) -> std::io::Result<Vec<u8>> {
            match attachment.source() {
                BinarySource::Bytes(bytes) => Ok(bytes.clone()),
                BinarySource::File(_) => Err(std::io::ErrorKind::PermissionDenied.into()),
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        records: Arc<Mutex<Vec<TelemetryRecord>>>,
    }

    impl TelemetrySink for RecordingSink {
        fn record(&self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingSink;

    impl TelemetrySink for FailingSink {
        fn record(&self, _record: &TelemetryRecord) -> Result<(), TelemetryError> {
            Err(TelemetryError::Unavailable("sink closed".to_string()))
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            history: "Fever for 3 days".to_string(),
            examination: "Temp 39.1".to_string(),
            attachments: vec![Attachment::from_bytes(
                "rash.jpg",
                MediaType::Jpeg,
                vec![0u8; 100],
            )],
            audio: Some(Attachment::from_bytes("memo.webm", MediaType::Webm, vec![0u8; 40])),
            credential: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn execute_returns_analysis() {
        let dispatcher = MockDispatcher::returning(Ok("## Integrated Analysis\nViral exanthem"));
        let use_case = AnalyzeCaseUseCase::new(dispatcher.clone(), MockReader, RecordingSink::default());

        let output = use_case
            .execute(request(), AnalysisCallbacks::default())
            .await
            .unwrap();

        assert_eq!(output.result.text(), "## Integrated Analysis\nViral exanthem");
        assert_eq!(output.part_count, 3);
        assert_eq!(*dispatcher.seen_parts.lock().unwrap(), 3);
        assert!(output.payload_bytes > 0);
    }

    #[tokio::test]
    async fn missing_credential_never_dispatches() {
        let dispatcher = MockDispatcher::returning(Ok("unused"));
        let use_case = AnalyzeCaseUseCase::new(dispatcher.clone(), MockReader, RecordingSink::default());
        let mut input = request();
        input.credential = None;

        let err = use_case
            .execute(input, AnalysisCallbacks::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Configuration(_)));
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upstream_error_message_passes_through() {
        let dispatcher =
            MockDispatcher::returning(Err(DispatchError::Upstream("quota exceeded".to_string())));
        let use_case = AnalyzeCaseUseCase::new(dispatcher, MockReader, RecordingSink::default());

        let err = use_case
            .execute(request(), AnalysisCallbacks::default())
            .await
            .unwrap_err();

        assert_eq!(err, AnalysisError::Upstream("quota exceeded".to_string()));
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn io_error_aborts_before_dispatch() {
        let dispatcher = MockDispatcher::returning(Ok("unused"));
        let use_case = AnalyzeCaseUseCase::new(dispatcher.clone(), MockReader, RecordingSink::default());
        let mut input = request();
        input
            .attachments
            .push(Attachment::from_path_with_type("/secure/scan.pdf", MediaType::Pdf));

        let err = use_case
            .execute(input, AnalysisCallbacks::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Io { ref name, .. } if name == "scan.pdf"));
        assert_eq!(dispatcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn telemetry_records_counts_only_when_opted_in() {
        let sink = RecordingSink::default();
        let use_case = AnalyzeCaseUseCase::new(
            MockDispatcher::returning(Ok("ok")),
            MockReader,
            sink.clone(),
        );

        use_case
            .execute(request(), AnalysisCallbacks::default())
            .await
            .unwrap();
        assert!(sink.records.lock().unwrap().is_empty());

        let mut input = request();
        input.telemetry_opt_in = true;
        use_case
            .execute(input, AnalysisCallbacks::default())
            .await
            .unwrap();

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            TelemetryRecord {
                model: "gemini-2.5-flash".to_string(),
                history_chars: 16,
                examination_chars: 9,
                attachment_count: 1,
                attachment_bytes: 100,
                has_audio: true,
                audio_bytes: 40,
                part_count: 3,
            }
        );
    }

    #[tokio::test]
    async fn failing_telemetry_does_not_affect_request() {
        let use_case = AnalyzeCaseUseCase::new(
            MockDispatcher::returning(Ok("## Integrated Analysis")),
            MockReader,
            FailingSink,
        );
        let mut input = request();
        input.telemetry_opt_in = true;

        let output = use_case
            .execute(input, AnalysisCallbacks::default())
            .await
            .unwrap();

        assert_eq!(output.result.text(), "## Integrated Analysis");
    }

    #[tokio::test]
    async fn callbacks_fire_in_order() {
        let events = Arc::new(Mutex::new(Vec::<String>::new()));
        let log = |prefix: &'static str| {
            let events = Arc::clone(&events);
            move |detail: String| events.lock().unwrap().push(format!("{prefix}{detail}"))
        };
        let (start, encoded, dispatch, done) = (log("start:"), log("encoded:"), log("dispatch"), log("done"));

        let callbacks = AnalysisCallbacks {
            on_encoding_start: Some(Box::new(move |n: usize| start(n.to_string()))),
            on_encoded: Some(Box::new(move |name: &str, _: usize| encoded(name.to_string()))),
            on_dispatch_start: Some(Box::new(move || dispatch(String::new()))),
            on_dispatch_end: Some(Box::new(move || done(String::new()))),
        };
        let use_case = AnalyzeCaseUseCase::new(
            MockDispatcher::returning(Ok("ok")),
            MockReader,
            RecordingSink::default(),
        );

        use_case.execute(request(), callbacks).await.unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["start:2", "encoded:rash.jpg", "encoded:memo.webm", "dispatch", "done"]
        );
    }
}
