//! Generation orchestration.
//!
//! Drives the emission stage: orders the resolved descriptors, renders
//! every artefact to memory, pushes each through the diff gate, and
//! accounts for the per-file outcomes in a report the caller can use for
//! dry-run exit semantics.

use crate::cpp::{render_header, render_implementation, render_manifest};
use crate::error::CodegenError;
use crate::order::topological_order;
use crate::output::{diff_and_replace, FileReport, FileStatus};
use crate::runtime::{XML_OBJECT_CPP, XML_OBJECT_H};
use std::fs;
use std::path::PathBuf;
use xsdgen_schema::GenerationContext;

/// Options controlling one generation run.
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Name of the generated C++ namespace and output sub-directory.
    pub namespace: String,
    /// Root output directory.
    pub output_dir: PathBuf,
    /// Compute the change set without writing anything.
    pub dry_run: bool,
}

/// Accumulated per-file outcomes of a run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// One entry per emitted path, in emission order.
    pub files: Vec<FileReport>,
}

impl GenerateReport {
    /// Returns true if any file was (or would be) created or rewritten.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.files
            .iter()
            .any(|f| f.status != FileStatus::Unchanged)
    }

    /// Returns the statuses of the files matching `name`.
    #[must_use]
    pub fn statuses_of(&self, name: &str) -> Vec<FileStatus> {
        let name = std::ffi::OsStr::new(name);
        self.files
            .iter()
            .filter(|f| f.path.file_name().map_or(false, |n| n == name))
            .map(|f| f.status)
            .collect()
    }
}

/// Emits all artefacts for a resolved generation context.
pub struct Generator<'a> {
    ctx: &'a GenerationContext,
    options: &'a CodegenOptions,
}

impl<'a> Generator<'a> {
    /// Creates a generator over a resolved context.
    #[must_use]
    pub fn new(ctx: &'a GenerationContext, options: &'a CodegenOptions) -> Self {
        Self { ctx, options }
    }

    /// Runs the emission stage.
    ///
    /// # Errors
    /// Returns `CodegenError` on inheritance cycles or file-system
    /// failures.
    pub fn run(&self) -> Result<GenerateReport, CodegenError> {
        let order = topological_order(self.ctx)?;

        let namespace = &self.options.namespace;
        let class_dir = self.options.output_dir.join(namespace);

        if !self.options.dry_run {
            fs::create_dir_all(&class_dir)?;
        }

        tracing::debug!(
            "writing/updating headers and implementations under {}",
            class_dir.display()
        );

        let mut report = GenerateReport::default();
        let dry_run = self.options.dry_run;

        for &id in &order {
            let desc = self.ctx.classes.get(id);
            if desc.is_builtin() {
                continue;
            }

            if !desc.is_simple() {
                let implementation = render_implementation(self.ctx, desc, namespace);
                let path = class_dir.join(format!("{}.cpp", desc.name.local));
                report
                    .files
                    .push(diff_and_replace(&path, &implementation, dry_run)?);
            }

            let header = render_header(self.ctx, desc, namespace);
            let path = class_dir.join(format!("{}.h", desc.name.local));
            report
                .files
                .push(diff_and_replace(&path, &header, dry_run)?);
        }

        let manifest = render_manifest(self.ctx, &order, namespace);
        report.files.push(diff_and_replace(
            &class_dir.join("CMakeLists.txt"),
            &manifest,
            dry_run,
        )?);

        report.files.push(diff_and_replace(
            &self.options.output_dir.join("XMLObject.h"),
            XML_OBJECT_H,
            dry_run,
        )?);
        report.files.push(diff_and_replace(
            &self.options.output_dir.join("XMLObject.cpp"),
            XML_OBJECT_CPP,
            dry_run,
        )?);

        Ok(report)
    }
}

/// Convenience wrapper over [`Generator`].
///
/// # Errors
/// Returns `CodegenError` on inheritance cycles or file-system failures.
pub fn generate(
    ctx: &GenerationContext,
    options: &CodegenOptions,
) -> Result<GenerateReport, CodegenError> {
    Generator::new(ctx, options).run()
}
