use crate::core::releases::ReleasePoller;
use crate::core::report::{assemble_report, build_date};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    ClassifiedModule, CounterexampleGenerator, CounterexampleIntegration, Dataset, Itp,
    LibraryEntry, Report,
};
use crate::domain::taxonomy::{Commentary, SubjectNames};
use crate::utils::error::{ReportError, Result};
use serde::de::DeserializeOwned;
use std::io::{Cursor, Read, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::ZipArchive;

const CLASSIFICATION_CSV: &str = "classification.csv";
const LIBRARIES_CSV: &str = "libraries.csv";
const ITPS_CSV: &str = "itps.csv";
const GENERATORS_CSV: &str = "counterExampleGenerators.csv";
const INTEGRATIONS_CSV: &str = "counterExampleIntegrations.csv";
const OUTPUT_BUNDLE: &str = "report_data.zip";

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn parse_csv<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> Result<Vec<T>> {
        let mut reader = csv::Reader::from_reader(bytes);
        reader
            .deserialize()
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(|e| ReportError::DatasetError {
                message: format!("{}: {}", name, e),
            })
    }

    fn member_bytes(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Result<Vec<u8>> {
        let mut member = archive
            .by_name(name)
            .map_err(|_| ReportError::DatasetError {
                message: format!("Dataset archive has no '{}' member", name),
            })?;
        let mut bytes = Vec::new();
        member.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    fn warn_on_malformed_codes(modules: &[ClassifiedModule]) {
        for module in modules {
            let code = &module.subject_code;
            if !code.is_concrete() && !code.is_exclusion_marker() && !code.is_unclassified() {
                tracing::warn!(
                    "Module '{}' ({}) has a malformed subject code '{}'",
                    module.package,
                    module.itp,
                    code
                );
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        tracing::debug!("Reading dataset archive: {}", self.config.dataset_path());
        let archive_bytes = self.storage.read_file(self.config.dataset_path()).await?;
        let mut archive = ZipArchive::new(Cursor::new(archive_bytes))?;

        let modules: Vec<ClassifiedModule> = Self::parse_csv(
            CLASSIFICATION_CSV,
            &Self::member_bytes(&mut archive, CLASSIFICATION_CSV)?,
        )?;
        let libraries: Vec<LibraryEntry> =
            Self::parse_csv(LIBRARIES_CSV, &Self::member_bytes(&mut archive, LIBRARIES_CSV)?)?;
        let itps: Vec<Itp> = Self::parse_csv(ITPS_CSV, &Self::member_bytes(&mut archive, ITPS_CSV)?)?;
        let generators: Vec<CounterexampleGenerator> = Self::parse_csv(
            GENERATORS_CSV,
            &Self::member_bytes(&mut archive, GENERATORS_CSV)?,
        )?;
        let integrations: Vec<CounterexampleIntegration> = Self::parse_csv(
            INTEGRATIONS_CSV,
            &Self::member_bytes(&mut archive, INTEGRATIONS_CSV)?,
        )?;

        Self::warn_on_malformed_codes(&modules);
        tracing::debug!(
            "Loaded {} modules, {} library sections, {} ITPs, {} generators",
            modules.len(),
            libraries.len(),
            itps.len(),
            generators.len()
        );

        tracing::debug!("Reading taxonomy: {}", self.config.taxonomy_path());
        let taxonomy_bytes = self.storage.read_file(self.config.taxonomy_path()).await?;
        let subject_names = SubjectNames::from_json(&taxonomy_bytes)?;

        let releases = if self.config.release_repos().is_empty() {
            Vec::new()
        } else {
            let poller = ReleasePoller::new(self.config.releases_endpoint());
            poller.poll(self.config.release_repos()).await
        };

        Ok(Dataset {
            modules,
            itps,
            libraries,
            generators,
            integrations,
            releases,
            subject_names,
        })
    }

    async fn transform(&self, data: Dataset) -> Result<Report> {
        assemble_report(
            &data,
            &data.subject_names,
            &Commentary::builtin(),
            self.config.group_limits(),
            &build_date(),
        )
    }

    async fn load(&self, report: Report) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output_path(), OUTPUT_BUNDLE);

        let bundle = {
            let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("report.json", FileOptions::default())?;
            zip.write_all(serde_json::to_string_pretty(&report)?.as_bytes())?;

            zip.start_file::<_, ()>("library_summaries.csv", FileOptions::default())?;
            zip.write_all(&library_summaries_csv(&report)?)?;

            zip.start_file::<_, ()>("subject_areas.csv", FileOptions::default())?;
            zip.write_all(&subject_areas_csv(&report)?)?;

            zip.finish()?.into_inner()
        };

        tracing::debug!("Writing report bundle ({} bytes)", bundle.len());
        self.storage.write_file(OUTPUT_BUNDLE, &bundle).await?;

        Ok(output_path)
    }
}

fn library_summaries_csv(report: &Report) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "itp",
        "library",
        "total",
        "unclassified",
        "verified",
        "unverified",
        "excluded",
        "excluded_doc",
        "excluded_util",
        "excluded_no_doc",
        "excluded_deprecated",
        "sure",
        "unsure",
        "incomplete",
        "needs_review",
    ])?;
    for summary in &report.libraries {
        let c = &summary.counts;
        writer.write_record([
            summary.itp.clone(),
            summary.library.clone(),
            c.total.to_string(),
            c.unclassified.to_string(),
            c.verified.to_string(),
            c.unverified.to_string(),
            c.excluded.to_string(),
            c.excluded_doc.to_string(),
            c.excluded_util.to_string(),
            c.excluded_no_doc.to_string(),
            c.excluded_deprecated.to_string(),
            c.sure.to_string(),
            c.unsure.to_string(),
            c.incomplete.to_string(),
            c.needs_review.to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::DatasetError {
            message: format!("library_summaries.csv: {}", e),
        })
}

fn subject_areas_csv(report: &Report) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["code", "name", "total", "mid_breakdown", "fine_breakdown", "top_itps"])?;
    for area in &report.subject_areas {
        writer.write_record([
            area.code.clone(),
            area.name.clone(),
            area.total.to_string(),
            area.mid_breakdown.clone(),
            area.fine_breakdown.clone(),
            area.top_itps.clone(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::DatasetError {
            message: format!("subject_areas.csv: {}", e),
        })
}
