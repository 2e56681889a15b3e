use std::sync::Arc;

use url::Url;

use lesson_core::Clock;
use lesson_core::model::ModuleConfig;
use lesson_core::namespace::Namespace;
use storage::repository::Storage;

use crate::assessment::AssessmentService;
use crate::checklist::ChecklistService;
use crate::error::ModuleServicesError;
use crate::export::ExportService;
use crate::progress::ProgressService;
use crate::quiz::QuizService;
use crate::reflection::ReflectionService;
use crate::session_loader::SessionLoader;
use crate::tasks::TaskService;

/// Assembles the full interactive layer for one page.
///
/// The host builds this once at startup, runs the loader, then routes user
/// events to the widget services.
#[derive(Clone)]
pub struct ModuleServices {
    namespace: Namespace,
    clock: Clock,
    progress: Arc<ProgressService>,
    quizzes: Arc<QuizService>,
    reflections: Arc<ReflectionService>,
    checklists: Arc<ChecklistService>,
    tasks: Arc<TaskService>,
    assessments: Arc<AssessmentService>,
    loader: Arc<SessionLoader>,
    export: Arc<ExportService>,
}

impl ModuleServices {
    /// Build services for the given page location, deriving the week
    /// namespace from its path.
    #[must_use]
    pub fn new(storage: Storage, config: &ModuleConfig, location: &Url, clock: Clock) -> Self {
        let namespace = Namespace::from_location(config.storage_prefix(), location);
        Self::with_namespace(storage, config, namespace, clock)
    }

    /// Build services against an explicit namespace.
    #[must_use]
    pub fn with_namespace(
        storage: Storage,
        config: &ModuleConfig,
        namespace: Namespace,
        clock: Clock,
    ) -> Self {
        let progress = Arc::new(ProgressService::new(
            storage.clone(),
            namespace.clone(),
            clock,
            config,
        ));
        let quizzes = Arc::new(QuizService::new(
            storage.clone(),
            namespace.clone(),
            clock,
            Arc::clone(&progress),
        ));
        let reflections = Arc::new(ReflectionService::new(
            storage.clone(),
            namespace.clone(),
            config,
            Arc::clone(&progress),
        ));
        let checklists = Arc::new(ChecklistService::new(
            storage.clone(),
            namespace.clone(),
            clock,
            Arc::clone(&progress),
        ));
        let tasks = Arc::new(TaskService::new(
            storage.clone(),
            namespace.clone(),
            clock,
            Arc::clone(&progress),
        ));
        let assessments = Arc::new(AssessmentService::new(
            storage.clone(),
            namespace.clone(),
            clock,
            Arc::clone(&progress),
        ));
        let loader = Arc::new(SessionLoader::new(
            storage.clone(),
            namespace.clone(),
            Arc::clone(&progress),
        ));
        let export = Arc::new(ExportService::new(storage, namespace.clone()));

        Self {
            namespace,
            clock,
            progress,
            quizzes,
            reflections,
            checklists,
            tasks,
            assessments,
            loader,
            export,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `ModuleServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        config: &ModuleConfig,
        location: &Url,
        clock: Clock,
    ) -> Result<Self, ModuleServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(storage, config, location, clock))
    }

    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn reflections(&self) -> Arc<ReflectionService> {
        Arc::clone(&self.reflections)
    }

    #[must_use]
    pub fn checklists(&self) -> Arc<ChecklistService> {
        Arc::clone(&self.checklists)
    }

    #[must_use]
    pub fn tasks(&self) -> Arc<TaskService> {
        Arc::clone(&self.tasks)
    }

    #[must_use]
    pub fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessments)
    }

    #[must_use]
    pub fn loader(&self) -> Arc<SessionLoader> {
        Arc::clone(&self.loader)
    }

    #[must_use]
    pub fn export(&self) -> Arc<ExportService> {
        Arc::clone(&self.export)
    }
}
