//! Fake collaborators for driving the pipeline in tests

#![allow(dead_code)]

use async_trait::async_trait;
use get_node_app_core::env::{EnvironmentProbe, ToolInfo};
use get_node_app_core::error::ScaffoldError;
use get_node_app_core::pipeline::{ErrorReport, Feedback};
use get_node_app_core::select::validate_project_name;
use get_node_app_core::setup::SetupRunner;
use get_node_app_core::{
    Answers, PackageManager, PipelineOptions, ProjectName, Selector, TemplateCatalog,
    TemplateDescriptor,
};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

/// Temporary data root and working directory for one run
pub struct Workspace {
    pub data: TempDir,
    pub cwd: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            data: tempfile::tempdir().unwrap(),
            cwd: tempfile::tempdir().unwrap(),
        }
    }

    pub fn options(&self, debug: bool) -> PipelineOptions {
        PipelineOptions {
            debug,
            data_root: self.data.path().to_path_buf(),
            project_root: self.cwd.path().to_path_buf(),
            catalog_link: Some("https://example.com/templates".to_string()),
        }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data.path().join("logs")
    }

    pub fn log_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.logs_dir())
            .map(|entries| entries.map(|e| e.unwrap().path()).collect())
            .unwrap_or_default()
    }

    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.cwd.path().join(name)
    }
}

pub struct FakeProbe {
    pub result: Result<(PackageManager, ToolInfo), ScaffoldError>,
}

impl FakeProbe {
    pub fn found(pm: PackageManager) -> Self {
        Self {
            result: Ok((
                pm,
                ToolInfo {
                    name: pm.program(),
                    version: Some("10.2.4".to_string()),
                    available: true,
                },
            )),
        }
    }

    pub fn nothing() -> Self {
        Self {
            result: Err(ScaffoldError::environment(
                "No supported package manager found (looked for yarn, pnpm, npm)",
            )),
        }
    }
}

impl EnvironmentProbe for FakeProbe {
    fn probe(&self) -> Result<(PackageManager, ToolInfo), ScaffoldError> {
        self.result.clone()
    }
}

/// In-memory catalog whose templates are maps of relative path to bytes
pub struct FakeCatalog {
    pub templates: Vec<(&'static str, Vec<(&'static str, &'static [u8])>)>,
    pub list_error: Option<ScaffoldError>,
    pub download_error: Option<ScaffoldError>,
    pub list_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn standard() -> Self {
        Self {
            templates: vec![
                (
                    "react-ts",
                    vec![("package.json", b"{\"name\":\"react-ts\"}".as_slice())],
                ),
                (
                    "node-express",
                    vec![
                        ("package.json", b"{\"name\":\"node-express\"}".as_slice()),
                        ("src/index.js", b"const express = require('express');\n".as_slice()),
                        ("public/favicon.ico", b"\x00\x01\x02\xfe\xff".as_slice()),
                    ],
                ),
            ],
            list_error: None,
            download_error: None,
            list_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TemplateCatalog for FakeCatalog {
    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, ScaffoldError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.list_error {
            return Err(err.clone());
        }
        Ok(self
            .templates
            .iter()
            .map(|(name, _)| TemplateDescriptor::new(*name))
            .collect())
    }

    async fn download(
        &self,
        dest_dir: &Path,
        template: &TemplateDescriptor,
    ) -> Result<(), ScaffoldError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.download_error {
            return Err(err.clone());
        }
        let (_, files) = self
            .templates
            .iter()
            .find(|(name, _)| *name == template.name)
            .ok_or_else(|| ScaffoldError::network("unknown template"))?;
        let root = dest_dir.join(&template.name);
        for (path, content) in files {
            let target = root.join(path);
            std::fs::create_dir_all(target.parent().unwrap()).unwrap();
            std::fs::write(target, content).unwrap();
        }
        Ok(())
    }
}

/// Selector fed with scripted keyboard input
///
/// Project names go through the same validator as the terminal prompt and are
/// re-asked until one passes.
pub struct ScriptedSelector {
    pub template: Option<&'static str>,
    pub names: VecDeque<&'static str>,
    pub name_attempts: usize,
    pub rejections: Vec<&'static str>,
}

impl ScriptedSelector {
    pub fn new(template: &'static str, names: &[&'static str]) -> Self {
        Self {
            template: Some(template),
            names: names.iter().copied().collect(),
            name_attempts: 0,
            rejections: Vec::new(),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            template: None,
            names: VecDeque::new(),
            name_attempts: 0,
            rejections: Vec::new(),
        }
    }
}

impl Selector for ScriptedSelector {
    fn prompt(&mut self, catalog: &[TemplateDescriptor]) -> Result<Answers, ScaffoldError> {
        assert!(!catalog.is_empty());
        let template = self
            .template
            .ok_or_else(|| ScaffoldError::aborted("Prompt cancelled"))?;

        loop {
            let input = self
                .names
                .pop_front()
                .ok_or_else(|| ScaffoldError::aborted("Prompt cancelled"))?;
            self.name_attempts += 1;
            match validate_project_name(input) {
                Ok(()) => {
                    return Ok(Answers {
                        template_name: template.to_string(),
                        project_name: ProjectName::parse(input).unwrap(),
                    })
                }
                Err(message) => self.rejections.push(message),
            }
        }
    }
}

pub struct FakeSetup {
    pub result: Result<(), ScaffoldError>,
    pub calls: Mutex<Vec<(PackageManager, PathBuf)>>,
}

impl FakeSetup {
    pub fn ok() -> Self {
        Self {
            result: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn exits_with(code: i32) -> Self {
        Self {
            result: Err(ScaffoldError::Setup {
                exit_code: code,
                short_message: format!("Command failed with exit code {}: npm install", code),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(PackageManager, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SetupRunner for FakeSetup {
    async fn setup(
        &self,
        package_manager: PackageManager,
        project_dir: &Path,
    ) -> Result<(), ScaffoldError> {
        self.calls
            .lock()
            .unwrap()
            .push((package_manager, project_dir.to_path_buf()));
        self.result.clone()
    }
}

/// Everything the pipeline showed the user, in order
#[derive(Default)]
pub struct RecordingFeedback {
    pub events: Vec<String>,
    pub reports: Vec<ErrorReport>,
}

impl RecordingFeedback {
    pub fn failures(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| e.strip_prefix("fail: "))
            .collect()
    }
}

impl Feedback for RecordingFeedback {
    fn start(&mut self, label: &str) {
        self.events.push(format!("start: {}", label));
    }

    fn succeed(&mut self, message: &str) {
        self.events.push(format!("ok: {}", message));
    }

    fn fail(&mut self, message: &str) {
        self.events.push(format!("fail: {}", message));
    }

    fn report(&mut self, report: &ErrorReport) {
        self.reports.push(report.clone());
    }

    fn note(&mut self, message: &str) {
        self.events.push(format!("note: {}", message));
    }
}
