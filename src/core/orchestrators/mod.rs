mod ocr_search_orchestrator;

pub use ocr_search_orchestrator::{OcrSearchOrchestrator, ProcessOutcome};
