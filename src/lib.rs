//! wordlens-core: cursor-targeted on-device text recognition.
//! A fixed cursor hovers over a live camera feed; each accepted frame is
//! masked down to the recognition area, handed to an OCR backend, and the
//! word under the cursor is reported to a listener for downstream lookup.

pub mod config;
pub mod frame;
pub mod gate;
pub mod geometry;
pub mod mask;
pub mod metrics;
pub mod overlay;
pub mod pipeline;
pub mod recognizer;
pub mod select;

pub use config::{ConfigError, PipelineConfig};
pub use frame::{nv21_buffer_len, FrameError, Nv21Frame};
pub use gate::RecognitionGate;
pub use geometry::{Point, Rect};
pub use mask::apply_mask;
pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use overlay::{CursorOverlay, FixedCursorOverlay};
pub use pipeline::{FrameFeed, RecognitionListener, RecognitionPipeline, RecognitionResult};
pub use recognizer::{
    ImageFormat, ImageMetadata, RecognizedElement, RecognizedText, RecognizerError, Rotation,
    TextRecognizer,
};
pub use select::select_element;

/// Initialize tracing for binaries embedding the pipeline.
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordlens_core=debug".parse().unwrap()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();
}
