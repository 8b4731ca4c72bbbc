//! Recognition orchestration: gate → mask → recognize → select → listener.
//! One cycle per accepted frame; frames arriving while a cycle is in flight
//! are dropped by the gate. Completion runs on the Tokio blocking pool and
//! must never block the caller's context.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel as cb;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::PipelineConfig;
use crate::frame::Nv21Frame;
use crate::gate::RecognitionGate;
use crate::geometry::Rect;
use crate::mask;
use crate::metrics::{stage_names, PipelineMetrics};
use crate::overlay::CursorOverlay;
use crate::recognizer::{ImageFormat, ImageMetadata, RecognizedElement, TextRecognizer};
use crate::select::select_element;

/// Receives the word under the cursor. Invoked at most once per completed
/// frame, only when an element is selected, from a context the recognizer
/// chooses — implementations must not block.
pub trait RecognitionListener: Send + Sync {
    fn on_recognition_result(&self, text: &str, bounding_box: Rect);
}

/// Outcome of one selection pass: zero or one element under the cursor.
#[derive(Debug, Clone)]
pub struct RecognitionResult {
    pub element: Option<RecognizedElement>,
}

impl RecognitionResult {
    /// Drives the cursor highlight state.
    pub fn is_selected(&self) -> bool {
        self.element.is_some()
    }
}

/// The single-flight recognition pipeline.
pub struct RecognitionPipeline {
    gate: RecognitionGate,
    recognizer: Arc<dyn TextRecognizer>,
    overlay: Arc<dyn CursorOverlay>,
    listener: RwLock<Option<Arc<dyn RecognitionListener>>>,
    config: PipelineConfig,
    metrics: Arc<PipelineMetrics>,
    cancel: CancellationToken,
    stopped: AtomicBool,
}

impl RecognitionPipeline {
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        overlay: Arc<dyn CursorOverlay>,
        config: PipelineConfig,
    ) -> Arc<Self> {
        let metrics = Arc::new(PipelineMetrics::new(config.metrics_ring_capacity));
        Arc::new(Self {
            gate: RecognitionGate::new(),
            recognizer,
            overlay,
            listener: RwLock::new(None),
            config,
            metrics,
            cancel: CancellationToken::new(),
            stopped: AtomicBool::new(false),
        })
    }

    pub fn set_listener(&self, listener: Arc<dyn RecognitionListener>) {
        *self.listener.write() = Some(listener);
    }

    pub fn metrics(&self) -> &Arc<PipelineMetrics> {
        &self.metrics
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Whether a recognition cycle is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Offer a camera frame. Returns true if the frame was accepted; false
    /// means it was dropped (cycle in flight, or the pipeline is stopped).
    /// Must be called from within a Tokio runtime.
    pub fn submit(self: &Arc<Self>, frame: Nv21Frame) -> bool {
        self.metrics.frame_offered();

        if self.gate.is_closed() {
            debug!("frame rejected: pipeline stopped");
            self.metrics.frame_dropped();
            return false;
        }
        if !self.gate.try_acquire() {
            debug!("frame dropped: recognition in flight");
            self.metrics.frame_dropped();
            return false;
        }

        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            pipeline.run_cycle(frame).await;
        });
        true
    }

    async fn run_cycle(self: Arc<Self>, mut frame: Nv21Frame) {
        let request_id = uuid::Uuid::new_v4().to_string();
        let cycle_start = Instant::now();

        let roi = self.overlay.recognition_rect();
        let mask_start = Instant::now();
        mask::apply_mask(&mut frame, roi.as_ref());
        self.metrics
            .record_latency(stage_names::MASK, mask_start.elapsed().as_micros() as f64);

        let metadata = ImageMetadata {
            format: ImageFormat::Nv21,
            width: frame.width(),
            height: frame.height(),
            rotation: self.config.rotation,
        };

        let recognizer = Arc::clone(&self.recognizer);
        let recognize_start = Instant::now();
        let task =
            tokio::task::spawn_blocking(move || recognizer.recognize(&frame, &metadata));
        let outcome = tokio::time::timeout(self.config.recognition_timeout(), task).await;

        if self.cancel.is_cancelled() {
            // Stopped while in flight: discard whatever came back.
            debug!(request_id = %request_id, "completion discarded after stop");
            self.gate.release();
            return;
        }

        match outcome {
            Err(_) => {
                warn!(
                    request_id = %request_id,
                    timeout_ms = self.config.recognition_timeout_ms,
                    "recognition timed out"
                );
                self.metrics.recognition_timed_out();
                self.overlay.set_highlight(false);
            }
            Ok(Err(e)) => {
                error!(request_id = %request_id, error = %e, "recognition task panicked");
                self.metrics.recognition_failed();
                self.overlay.set_highlight(false);
            }
            Ok(Ok(Err(e))) => {
                warn!(request_id = %request_id, error = %e, "recognition failed");
                self.metrics.recognition_failed();
                self.overlay.set_highlight(false);
            }
            Ok(Ok(Ok(text))) => {
                self.metrics.record_latency(
                    stage_names::RECOGNIZE,
                    recognize_start.elapsed().as_micros() as f64,
                );
                self.deliver(&request_id, text.flatten());
                self.metrics.recognition_completed();
            }
        }

        self.metrics
            .record_latency(stage_names::CYCLE, cycle_start.elapsed().as_micros() as f64);
        self.gate.release();
    }

    /// Run selection over the flattened hierarchy and fan the outcome out
    /// to the overlay highlight and the listener.
    fn deliver<'a>(&self, request_id: &str, elements: impl Iterator<Item = &'a RecognizedElement>) {
        let selected = match self.overlay.cursor_rect() {
            Some(cursor) => select_element(&cursor, elements),
            None => None,
        };
        let result = RecognitionResult {
            element: selected.cloned(),
        };

        self.overlay.set_highlight(result.is_selected());

        if let Some(element) = result.element {
            debug!(request_id = %request_id, text = %element.text, "element under cursor");
            let listener = self.listener.read().clone();
            if let Some(listener) = listener {
                listener.on_recognition_result(&element.text, element.bounding_box);
            }
        }
    }

    /// Stop the pipeline: close the gate, discard any in-flight completion,
    /// and release the recognizer exactly once. Idempotent; errors from the
    /// recognizer's close are logged and swallowed so teardown cannot crash
    /// the host.
    pub fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        self.cancel.cancel();
        self.gate.close();
        if let Err(e) = self.recognizer.close() {
            warn!(error = %e, "recognizer close failed");
        }
        info!("recognition pipeline stopped");
    }
}

/// Camera-frame feed: the producer side pushes frames into an unbounded
/// channel from the capture callback; a dedicated thread drains it into the
/// pipeline. Pausing drops frames before the gate (counters still tick),
/// mirroring a host pausing its camera preview.
pub struct FrameFeed {
    tx: cb::Sender<Nv21Frame>,
    paused: Arc<AtomicBool>,
}

impl FrameFeed {
    /// Spawn the feed thread. `runtime` is the handle the drained frames
    /// are submitted under.
    pub fn start(pipeline: Arc<RecognitionPipeline>, runtime: tokio::runtime::Handle) -> Self {
        let (tx, rx) = cb::unbounded::<Nv21Frame>();
        let paused = Arc::new(AtomicBool::new(false));
        let paused_flag = Arc::clone(&paused);

        std::thread::Builder::new()
            .name("frame-feed".into())
            .spawn(move || {
                let _guard = runtime.enter();
                loop {
                    match rx.recv() {
                        Ok(frame) => {
                            if paused_flag.load(Ordering::Acquire) {
                                pipeline.metrics().frame_offered();
                                pipeline.metrics().frame_dropped();
                                continue;
                            }
                            pipeline.submit(frame);
                        }
                        Err(cb::RecvError) => {
                            info!("frame feed channel closed, exiting");
                            break;
                        }
                    }
                }
            })
            .expect("failed to spawn frame feed thread");

        Self { tx, paused }
    }

    /// Sender for the camera capture callback side.
    pub fn sender(&self) -> cb::Sender<Nv21Frame> {
        self.tx.clone()
    }

    /// Push one frame into the feed. Never blocks.
    pub fn offer(&self, frame: Nv21Frame) -> bool {
        self.tx.send(frame).is_ok()
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
        info!("frame feed paused");
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        info!("frame feed resumed");
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }
}
