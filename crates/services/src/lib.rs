#![forbid(unsafe_code)]

pub mod accordion;
pub mod assessment;
pub mod checklist;
pub mod error;
pub mod export;
pub mod module_services;
pub mod progress;
pub mod quiz;
pub mod reflection;
pub mod session_loader;
pub mod tasks;

pub use lesson_core::Clock;

pub use assessment::AssessmentService;
pub use checklist::ChecklistService;
pub use error::{ExportError, ModuleServicesError, SessionLoadError};
pub use export::{ExportBundle, ExportService, ResetConfirmation, ResetOutcome};
pub use module_services::ModuleServices;
pub use progress::{ProgressService, ProgressSnapshot};
pub use quiz::QuizService;
pub use reflection::ReflectionService;
pub use session_loader::SessionLoader;
pub use tasks::TaskService;
