use crate::core::period::DateResolver;
use crate::core::render::DocumentFormatter;
use crate::core::sheet::read_workbook;
use crate::core::{
    ConfigProvider, ExtractResult, FileFailure, Pipeline, RenderedDocument, RunSummary,
    SourceReport, Storage, TransformResult,
};
use crate::utils::error::{ConvertError, Result};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    input: S,
    output: S,
    config: C,
    resolver: DateResolver,
    formatter: DocumentFormatter,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(input: S, output: S, config: C) -> Self {
        let resolver = DateResolver::new(config.default_year());
        let formatter = DocumentFormatter::new(config.report_title())
            .with_fallbacks(config.trainee_name(), config.program_name());
        Self {
            input,
            output,
            config,
            resolver,
            formatter,
        }
    }

    async fn extract_one(&self, file_name: &str) -> Result<SourceReport> {
        // cheap filename check before the workbook is opened
        let dates = DateResolver::parse_filename(file_name)?;
        let bytes = self.input.read_file(file_name).await?;
        let sheet = read_workbook(file_name, bytes, self.config.layout())?;

        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name)
            .to_string();

        Ok(SourceReport {
            file_name: file_name.to_string(),
            stem,
            dates,
            sheet,
        })
    }
}

/// Hidden files and Office lock files (`~$name.xlsx`).
fn is_ignored(file_name: &str) -> bool {
    file_name.starts_with('.') || file_name.starts_with("~$")
}

fn has_extension(file_name: &str, extensions: &[String]) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}

fn record_failure(failures: &mut Vec<FileFailure>, file: &str, error: ConvertError) {
    tracing::error!("❌ {}: {}", file, error);
    tracing::debug!("💡 {}", error.recovery_suggestion());
    failures.push(FileFailure {
        file: file.to_string(),
        error,
    });
}

fn build_archive(documents: &[&RenderedDocument]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for document in documents {
        // fixed timestamp so identical inputs give an identical archive
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        zip.start_file(document.output_name.as_str(), options)?;
        zip.write_all(document.content.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<ExtractResult> {
        let input_path = self.config.input_path();
        tracing::debug!("Scanning input directory: {}", input_path);

        let names = self.input.list_files().await.map_err(|e| match e {
            ConvertError::IoError(source) => ConvertError::InputDirectoryError {
                path: input_path.to_string(),
                source,
            },
            other => other,
        })?;

        let mut result = ExtractResult::default();
        for name in names {
            if is_ignored(&name) || !has_extension(&name, self.config.file_extensions()) {
                tracing::debug!("Ignoring {}", name);
                continue;
            }

            match self.extract_one(&name).await {
                Ok(report) => {
                    tracing::debug!(
                        "{}: {} day entries, metadata year {:?}",
                        name,
                        report.sheet.entries.len(),
                        report.sheet.metadata_year
                    );
                    result.reports.push(report);
                }
                Err(e) => record_failure(&mut result.failures, &name, e),
            }
        }

        if result.reports.is_empty() && result.failures.is_empty() {
            tracing::warn!("No spreadsheets found in '{}'", input_path);
        }

        Ok(result)
    }

    async fn transform(&self, data: ExtractResult) -> Result<TransformResult> {
        let mut result = TransformResult {
            documents: Vec::with_capacity(data.reports.len()),
            failures: data.failures,
        };

        for report in data.reports {
            let period = match self.resolver.resolve_dates(
                &report.file_name,
                &report.dates,
                report.sheet.metadata_year,
            ) {
                Ok(period) => period,
                Err(e) => {
                    record_failure(&mut result.failures, &report.file_name, e);
                    continue;
                }
            };

            let assembled = self.formatter.assemble(&report.file_name, period, report.sheet);
            if let Some(missing) = assembled.missing {
                tracing::warn!("⚠️ {}: {}", report.file_name, missing);
                result.failures.push(FileFailure {
                    file: report.file_name.clone(),
                    error: missing,
                });
            }

            result.documents.push(RenderedDocument {
                output_name: period.output_file_name(&report.stem),
                content: self.formatter.render(&assembled.document),
                source_name: report.file_name,
            });
        }

        Ok(result)
    }

    async fn load(&self, result: TransformResult) -> Result<RunSummary> {
        let mut summary = RunSummary {
            failures: result.failures,
            ..RunSummary::default()
        };
        let mut archived = Vec::with_capacity(result.documents.len());
        let mut taken = HashSet::new();

        for document in &result.documents {
            // same stem with another extension maps to the same document name
            if !taken.insert(document.output_name.as_str()) {
                let error = ConvertError::DuplicateOutput {
                    file: document.source_name.clone(),
                    output: document.output_name.clone(),
                };
                record_failure(&mut summary.failures, &document.source_name, error);
                continue;
            }

            match self
                .output
                .write_file(&document.output_name, document.content.as_bytes())
                .await
            {
                Ok(()) => {
                    tracing::info!("✅ {} -> {}", document.source_name, document.output_name);
                    summary.written.push(document.output_name.clone());
                    archived.push(document);
                }
                Err(e) => record_failure(&mut summary.failures, &document.source_name, e),
            }
        }

        if archived.is_empty() {
            tracing::warn!("No documents written, skipping archive");
            return Ok(summary);
        }

        let archive_name = self.config.archive_name();
        tracing::debug!("Creating ZIP file with {} documents", archived.len());

        let written = match build_archive(&archived) {
            Ok(zip_data) => self.output.write_file(archive_name, &zip_data).await,
            Err(e) => Err(e),
        };
        match written {
            Ok(()) => {
                let archive_path = format!("{}/{}", self.config.output_path(), archive_name);
                tracing::info!("📦 Created archive: {}", archive_path);
                summary.archive_path = Some(archive_path);
            }
            Err(e) => record_failure(&mut summary.failures, archive_name, e),
        }

        Ok(summary)
    }
}
