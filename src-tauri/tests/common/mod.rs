//! Fakes shared by the integration tests: a recording window surface,
//! scripted capturer and model client, and a notifier that keeps failures.

#![allow(dead_code)]

use screen_lens_lib::capture::{CaptureError, CapturedImage, Capturer};
use screen_lens_lib::llm::{AnalysisClient, AnalysisError, AnalysisReply, AnalysisRequest};
use screen_lens_lib::overlay::{
    self, InstanceId, OverlayController, OverlaySurface, RenderCommand, SharedOverlay, StyleState,
    SurfaceError,
};
use screen_lens_lib::pipeline::{CapturePipeline, FailureNotifier, PipelineError};
use screen_lens_lib::settings::{MemoryStore, Settings, SettingsStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ── Surface ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Open(InstanceId),
    Reveal(InstanceId),
    Render(InstanceId, RenderCommand),
    Destroy(InstanceId),
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl RecordingSurface {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<SurfaceCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn opened(&self) -> Vec<InstanceId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::Open(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// `active` flags of every Loading command, in order.
    pub fn loading_flags(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::Render(_, RenderCommand::Loading { active }) => Some(active),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl OverlaySurface for RecordingSurface {
    fn open(&mut self, id: InstanceId, _style: &StyleState) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::Open(id));
        Ok(())
    }

    fn reveal(&mut self, id: InstanceId) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::Reveal(id));
        Ok(())
    }

    fn render(&mut self, id: InstanceId, command: &RenderCommand) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::Render(id, command.clone()));
        Ok(())
    }

    fn destroy(&mut self, id: InstanceId) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::Destroy(id));
        Ok(())
    }
}

// ── Capturer ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct FakeCapturer {
    calls: Arc<AtomicUsize>,
    fail: bool,
    gate: Option<Arc<Notify>>,
}

impl FakeCapturer {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Capture waits until `gate` is notified.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Capturer for FakeCapturer {
    async fn capture(&self) -> Result<CapturedImage, CaptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(CaptureError::NoMonitor);
        }
        Ok(CapturedImage::jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9]))
    }
}

// ── Model client ────────────────────────────────────────────────────

#[derive(Clone)]
enum Script {
    Text(String),
    Body(String),
    Empty,
    Fail(u16),
}

#[derive(Clone)]
pub struct FakeClient {
    script: Script,
    calls: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl FakeClient {
    fn scripted(script: Script) -> Self {
        Self {
            script,
            calls: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::scripted(Script::Text(text.to_string()))
    }

    /// 2xx response whose raw body is read the way the Gemini client reads it.
    pub fn raw_body(body: &str) -> Self {
        Self::scripted(Script::Body(body.to_string()))
    }

    /// 2xx response with no usable text part.
    pub fn empty() -> Self {
        Self::scripted(Script::Empty)
    }

    pub fn failing(status: u16) -> Self {
        Self::scripted(Script::Fail(status))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl AnalysisClient for FakeClient {
    async fn analyze(&self, request: AnalysisRequest<'_>) -> Result<AnalysisReply, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.prompt.to_string());
        match &self.script {
            Script::Text(text) => Ok(AnalysisReply::from_text(text.clone())),
            Script::Body(body) => Ok(AnalysisReply::from_body(body)),
            Script::Empty => Ok(AnalysisReply::default()),
            Script::Fail(status) => Err(AnalysisError::Status {
                status: *status,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

// ── Notifier ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    shown: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    /// `(title, message)` of every dialog, in order.
    pub fn shown(&self) -> Vec<(String, String)> {
        self.shown.lock().unwrap().clone()
    }
}

impl FailureNotifier for RecordingNotifier {
    fn notify(&self, failure: &PipelineError) {
        self.shown
            .lock()
            .unwrap()
            .push((failure.title().to_string(), failure.to_string()));
    }
}

// ── Harness ─────────────────────────────────────────────────────────

pub fn configured_settings() -> Settings {
    Settings {
        api_key: Some("test-key".to_string()),
        model: Some("gemini-test".to_string()),
        prompt: None,
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub surface: RecordingSurface,
    pub overlay: SharedOverlay,
    pub notifier: RecordingNotifier,
    pub pipeline: Arc<CapturePipeline<FakeCapturer, FakeClient>>,
}

impl Harness {
    pub fn new(settings: Settings, capturer: FakeCapturer, client: FakeClient) -> Self {
        let store = Arc::new(MemoryStore::with_settings(settings));
        let surface = RecordingSurface::default();
        let overlay = overlay::shared(OverlayController::new(
            Box::new(surface.clone()),
            store.clone() as Arc<dyn SettingsStore>,
        ));
        let notifier = RecordingNotifier::default();
        let pipeline = Arc::new(CapturePipeline::new(
            store.clone(),
            capturer,
            client,
            overlay.clone(),
            Arc::new(notifier.clone()),
        ));
        Self {
            store,
            surface,
            overlay,
            notifier,
            pipeline,
        }
    }

    /// Opens the overlay with one message and marks its page ready.
    pub fn open_ready_window(&self, text: &str) -> InstanceId {
        let mut controller = overlay::lock(&self.overlay);
        let id = controller.present(text).unwrap();
        controller.surface_ready(id).unwrap();
        id
    }
}
