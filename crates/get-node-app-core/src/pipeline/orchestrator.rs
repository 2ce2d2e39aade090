//! The scaffolding pipeline
//!
//! `Init → Probing → Listing → Selecting → Downloading → CreatingDir →
//! Copying → SettingUp → Finalizing → Done`, with any failure ending the run
//! in `Halted`. Each stage produces exactly one session log event.

use super::report::ErrorReport;
use super::stage::Stage;
use super::Feedback;
use crate::env::EnvironmentProbe;
use crate::error::ScaffoldError;
use crate::logging::SessionLog;
use crate::project;
use crate::select::Selector;
use crate::session::{AppDirs, Session};
use crate::setup::SetupRunner;
use crate::templates::TemplateCatalog;
use std::path::PathBuf;
use tracing::{error, info};

/// External capabilities the pipeline drives
pub struct Collaborators<'a> {
    pub probe: &'a dyn EnvironmentProbe,
    pub catalog: &'a dyn TemplateCatalog,
    pub selector: &'a mut dyn Selector,
    pub setup: &'a dyn SetupRunner,
    pub feedback: &'a mut dyn Feedback,
}

/// Per-run settings
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub debug: bool,
    /// Root holding `logs/` and `templates/`
    pub data_root: PathBuf,
    /// Directory the project is created in
    pub project_root: PathBuf,
    /// Shown after listing so users can browse the catalog
    pub catalog_link: Option<String>,
}

/// Successful run summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub project_dir: PathBuf,
    /// Present only in debug mode
    pub log_path: Option<PathBuf>,
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done(Completion),
    Halted {
        stage: Stage,
        error: ScaffoldError,
        /// Retained session log, if one was opened
        log_path: Option<PathBuf>,
    },
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Done(_) => 0,
            Outcome::Halted { .. } => 1,
        }
    }
}

/// Sequential stage runner
pub struct Pipeline<'a> {
    collaborators: Collaborators<'a>,
    options: PipelineOptions,
    stage: Stage,
}

impl<'a> Pipeline<'a> {
    pub fn new(collaborators: Collaborators<'a>, options: PipelineOptions) -> Self {
        Self {
            collaborators,
            options,
            stage: Stage::Init,
        }
    }

    /// Run every stage until `Done` or the first failure
    pub async fn run(mut self) -> Outcome {
        let dirs = match AppDirs::create(&self.options.data_root).await {
            Ok(dirs) => dirs,
            Err(e) => return self.halt_without_log(e),
        };
        let log = match SessionLog::create(&dirs.logs_dir) {
            Ok(log) => log,
            Err(e) => return self.halt_without_log(e),
        };

        let mut session = Session::new(self.options.debug, dirs);
        info!(stage = %self.stage, "platform: {}", std::env::consts::OS);

        match self.run_stages(&mut session).await {
            Ok(project_dir) => self.finalize(&session, log, project_dir),
            Err(e) => self.halt(e, log),
        }
    }

    async fn run_stages(&mut self, session: &mut Session) -> Result<PathBuf, ScaffoldError> {
        // Probing
        self.enter(Stage::Probing);
        let probed = self.collaborators.probe.probe();
        let (package_manager, _) = self.finish(probed, |(pm, info)| {
            format!(
                "Checks complete ({} {})",
                pm,
                info.version.as_deref().unwrap_or("unknown")
            )
        })?;
        session.package_manager = Some(package_manager);

        // Listing
        self.enter(Stage::Listing);
        let listed = match self.collaborators.catalog.list_templates().await {
            Ok(list) if list.is_empty() => {
                Err(ScaffoldError::network("No templates found in the catalog"))
            }
            other => other,
        };
        let catalog = self.finish(listed, |list| format!("Fetched {} templates", list.len()))?;
        if let Some(link) = &self.options.catalog_link {
            self.collaborators.feedback.note(&format!(
                "know more about each template or create your own: {}",
                link
            ));
        }

        // Selecting
        self.enter(Stage::Selecting);
        let answered = self
            .collaborators
            .selector
            .prompt(&catalog)
            .and_then(|answers| {
                match catalog.iter().find(|t| t.name == answers.template_name) {
                    Some(template) => Ok((answers, template.clone())),
                    None => Err(ScaffoldError::aborted(format!(
                        "Template '{}' is not in the catalog",
                        answers.template_name
                    ))),
                }
            });
        let (answers, template) = self.finish(answered, |(a, _)| {
            format!(
                "Selected template {} for project {}",
                a.template_name, a.project_name
            )
        })?;
        session.template_name = Some(answers.template_name.clone());
        session.project_name = Some(answers.project_name.clone());
        let project_name = answers.project_name;

        // Downloading
        self.enter(Stage::Downloading);
        let downloaded = self
            .collaborators
            .catalog
            .download(&session.templates_dir, &template)
            .await;
        self.finish(downloaded, |_| format!("Template downloaded: {}", template.name))?;

        // CreatingDir
        self.enter(Stage::CreatingDir);
        let created =
            project::create_project_dir(&self.options.project_root, project_name.as_str()).await;
        let project_dir =
            self.finish(created, |_| format!("Project created: {}", project_name))?;

        // Copying
        self.enter(Stage::Copying);
        let copied =
            project::copy_template(&session.templates_dir, &template.name, &project_dir).await;
        self.finish(copied, |count| {
            format!(
                "Copied {} files from {} to {}",
                count,
                session.templates_dir.join(&template.name).display(),
                project_name
            )
        })?;

        // SettingUp
        self.enter(Stage::SettingUp);
        let installed = match session.package_manager {
            Some(pm) => self
                .collaborators
                .setup
                .setup(pm, &project_dir)
                .await
                .map(|()| pm),
            None => Err(ScaffoldError::environment("No package manager was detected")),
        };
        self.finish(installed, |pm| {
            format!("Project setup complete ({})", pm.install_command())
        })?;

        Ok(project_dir)
    }

    fn enter(&mut self, stage: Stage) {
        debug_assert_eq!(self.stage.next(), Some(stage), "stages only move forward");
        self.stage = stage;
        if let Some(label) = stage.progress_label() {
            self.collaborators.feedback.start(label);
        }
    }

    /// Report a stage result to the user and the session log
    fn finish<T>(
        &mut self,
        result: Result<T, ScaffoldError>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T, ScaffoldError> {
        match result {
            Ok(value) => {
                let message = describe(&value);
                self.collaborators.feedback.succeed(&message);
                info!(stage = %self.stage, "{}", message);
                Ok(value)
            }
            Err(e) => {
                let label = self.stage.failure_label();
                self.collaborators.feedback.fail(label);
                error!(stage = %self.stage, kind = %e.kind(), "{}: {}", label, e);
                Err(e)
            }
        }
    }

    fn finalize(mut self, session: &Session, log: SessionLog, project_dir: PathBuf) -> Outcome {
        self.enter(Stage::Finalizing);

        let log_path = if session.debug_enabled {
            info!(stage = %self.stage, "Run complete, log retained");
            let path = log.retain();
            self.collaborators
                .feedback
                .note(&format!("log file can be found at {}", path.display()));
            Some(path)
        } else {
            info!(stage = %self.stage, "Run complete, removing log");
            if let Err(e) = log.delete() {
                self.collaborators.feedback.fail(self.stage.failure_label());
                let report = ErrorReport::new(self.stage, &e);
                self.collaborators.feedback.report(&report);
                return Outcome::Halted {
                    stage: self.stage,
                    error: e,
                    log_path: None,
                };
            }
            None
        };

        self.stage = Stage::Done;
        Outcome::Done(Completion {
            project_dir,
            log_path,
        })
    }

    fn halt(mut self, error: ScaffoldError, log: SessionLog) -> Outcome {
        let report = ErrorReport::new(self.stage, &error);
        self.collaborators.feedback.report(&report);

        let path = log.retain();
        self.collaborators
            .feedback
            .note(&format!("log file can be found at {}", path.display()));

        Outcome::Halted {
            stage: self.stage,
            error,
            log_path: Some(path),
        }
    }

    fn halt_without_log(mut self, error: ScaffoldError) -> Outcome {
        self.collaborators.feedback.fail(self.stage.failure_label());
        let report = ErrorReport::new(self.stage, &error);
        self.collaborators.feedback.report(&report);
        Outcome::Halted {
            stage: self.stage,
            error,
            log_path: None,
        }
    }
}
