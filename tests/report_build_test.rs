use clap::Parser;
use httpmock::prelude::*;
use itp_report::config::ResolvedConfig;
use itp_report::{CliConfig, LocalStorage, ReportEngine, ReportPipeline};
use std::io::{Cursor, Read, Write};
use tempfile::TempDir;
use zip::write::{FileOptions, ZipWriter};
use zip::ZipArchive;

fn write_dataset(dir: &TempDir, classification: &str) {
    let libraries = "itp,section,url\n\
                     Lean,mathlib,https://example.org/mathlib\n\
                     Coq,stdlib,https://example.org/stdlib\n\
                     Mizar,mml,https://example.org/mml\n";
    let itps = "name,counterexamples,utf8_library,math_notation\n\
                Lean,Yes,Yes,Unicode notation throughout\n\
                Coq,Yes,Yes,Notations via UTF-8 strings\n\
                Mizar,No,No,\n";
    let generators = "name,description\n\
                      nitpick,Model finder\n\
                      quickchick,Property-based tester\n";
    let integrations = "name,prover\n\
                        quickchick,Coq\n\
                        nitpick,Lean\n";

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file::<_, ()>("classification.csv", FileOptions::default())
        .unwrap();
    zip.write_all(classification.as_bytes()).unwrap();
    zip.start_file::<_, ()>("libraries.csv", FileOptions::default())
        .unwrap();
    zip.write_all(libraries.as_bytes()).unwrap();
    zip.start_file::<_, ()>("itps.csv", FileOptions::default())
        .unwrap();
    zip.write_all(itps.as_bytes()).unwrap();
    zip.start_file::<_, ()>("counterExampleGenerators.csv", FileOptions::default())
        .unwrap();
    zip.write_all(generators.as_bytes()).unwrap();
    zip.start_file::<_, ()>("counterExampleIntegrations.csv", FileOptions::default())
        .unwrap();
    zip.write_all(integrations.as_bytes()).unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    std::fs::write(dir.path().join("all_data.zip"), bytes).unwrap();

    let taxonomy = serde_json::json!([
        {
            "short_name": "Computer science",
            "code": "68",
            "subclassifications": [
                {"name": "Software", "code": "68N",
                 "classifications": [{"name": "Programming languages", "code": "68N15"}]},
                {"name": "Data", "code": "68P",
                 "classifications": [{"name": "Data structures", "code": "68P05"}]}
            ],
            "classifications": []
        },
        {
            "short_name": "Mathematical logic",
            "code": "03",
            "subclassifications": [
                {"name": "General logic", "code": "03B", "classifications": []}
            ],
            "classifications": []
        }
    ]);
    std::fs::write(
        dir.path().join("msc.json"),
        serde_json::to_vec(&taxonomy).unwrap(),
    )
    .unwrap();
}

fn config_for(dir: &TempDir, extra: &[&str]) -> ResolvedConfig {
    let mut args = vec![
        "itp-report".to_string(),
        "--data-dir".to_string(),
        dir.path().to_str().unwrap().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    ResolvedConfig::resolve(CliConfig::parse_from(args)).unwrap()
}

fn standard_classification() -> &'static str {
    "itp,library,package,msc,verified\n\
     Lean,mathlib,mathlib.lang,68N15,Yes\n\
     Lean,mathlib,mathlib.data,68P05,Yes\n\
     Lean,mathlib,mathlib.meta,Exclude-Util,Yes\n\
     Lean,mathlib,mathlib.new,,No\n\
     Coq,stdlib,stdlib.logic,03B35,Yes\n\
     Coq,stdlib,stdlib.lang,68N15,Yes\n\
     Mizar,mml,mml.depr,Exclude-Depr,Yes\n"
}

#[tokio::test]
async fn test_end_to_end_report_build() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, standard_classification());

    let config = config_for(&dir, &[]);
    let storage = LocalStorage::new(dir.path());
    let engine = ReportEngine::new(ReportPipeline::new(storage, config));

    let output_path = engine.run().await.unwrap();
    assert!(output_path.ends_with("report_data.zip"));

    let bundle = std::fs::read(dir.path().join("report_data.zip")).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bundle)).unwrap();
    assert_eq!(archive.len(), 3);

    let mut json = String::new();
    archive
        .by_name("report.json")
        .unwrap()
        .read_to_string(&mut json)
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(report["itp_count"], 3);
    assert_eq!(report["itp_names"], "Coq, Lean, and Mizar");
    assert_eq!(report["no_counterexample_itps"], "Mizar");
    assert_eq!(report["counterexample_generator_count"], 2);
    assert_eq!(report["counterexample_generators"][0]["name"], "nitpick");
    assert_eq!(report["counterexample_generators"][0]["support"], "Lean");
    assert_eq!(report["counterexample_generators"][1]["support"], "Coq");
    assert_eq!(report["no_generator_itps"], "Mizar");
    assert_eq!(report["total_package_count"], 7);
    assert_eq!(report["verified_package_count"], 6);

    // Computer science outranks logic: four in-scope modules total, three
    // of them under 68.
    assert_eq!(report["subject_areas"][0]["code"], "68");
    assert_eq!(report["subject_areas"][0]["total"], 3);
    assert_eq!(report["subject_areas"][1]["code"], "03");

    // Lean's library picked up the unclassified straggler.
    let libraries = report["libraries"].as_array().unwrap();
    let lean = libraries
        .iter()
        .find(|l| l["itp"] == "Lean")
        .unwrap();
    assert_eq!(lean["total"], 4);
    assert_eq!(lean["unclassified"], 1);
    assert_eq!(
        lean["incompleteness_note"],
        "The classification was not complete, as there was 1 unclassified modules. "
    );
    assert!(lean["exclusion_note"]
        .as_str()
        .unwrap()
        .contains("one module was excluded for utility or tooling modules (EC1)"));
}

#[tokio::test]
async fn test_build_aborts_on_unauthored_subject_area() {
    let dir = TempDir::new().unwrap();
    // 97 (mathematics education) has no authored commentary.
    write_dataset(
        &dir,
        "itp,library,package,msc,verified\n\
         Lean,mathlib,mathlib.teach,97A30,Yes\n",
    );

    let config = config_for(&dir, &[]);
    let storage = LocalStorage::new(dir.path());
    let engine = ReportEngine::new(ReportPipeline::new(storage, config));

    let err = engine.run().await.unwrap_err();
    assert!(err.to_string().contains("97-XX"), "{}", err);
    assert!(!dir.path().join("report_data.zip").exists());
}

#[tokio::test]
async fn test_release_polling_feeds_the_report() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, standard_classification());

    let server = MockServer::start();
    let lean_mock = server.mock(|when, then| {
        when.method(GET).path("/repos/leanprover/lean4/releases/latest");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "name": "Lean 4.9.0",
                "tag_name": "v4.9.0",
                "published_at": "2026-06-01T12:00:00Z",
                "html_url": "https://github.com/leanprover/lean4/releases/tag/v4.9.0"
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/repos/coq/coq/releases/latest");
        then.status(404);
    });

    let config = config_for(
        &dir,
        &[
            "--releases-endpoint",
            &server.base_url(),
            "--release-repos",
            "Lean=leanprover/lean4,Coq=coq/coq",
        ],
    );
    let storage = LocalStorage::new(dir.path());
    let engine = ReportEngine::new(ReportPipeline::new(storage, config));

    engine.run().await.unwrap();
    lean_mock.assert();

    let bundle = std::fs::read(dir.path().join("report_data.zip")).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bundle)).unwrap();
    let mut json = String::new();
    archive
        .by_name("report.json")
        .unwrap()
        .read_to_string(&mut json)
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();

    // The Coq poll failed; the build carries on with Lean alone.
    let releases = report["releases"].as_array().unwrap();
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0]["itp"], "Lean");
    assert_eq!(releases[0]["tag"], "v4.9.0");
}

#[tokio::test]
async fn test_toml_limits_cap_subject_areas() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir, standard_classification());
    std::fs::write(
        dir.path().join("report.toml"),
        "[limits]\ntop_areas = 1\n",
    )
    .unwrap();

    let config_path = dir.path().join("report.toml");
    let config = config_for(&dir, &["--config", config_path.to_str().unwrap()]);
    let storage = LocalStorage::new(dir.path());
    let engine = ReportEngine::new(ReportPipeline::new(storage, config));

    engine.run().await.unwrap();

    let bundle = std::fs::read(dir.path().join("report_data.zip")).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bundle)).unwrap();
    let mut csv_text = String::new();
    archive
        .by_name("subject_areas.csv")
        .unwrap()
        .read_to_string(&mut csv_text)
        .unwrap();

    let rows: Vec<&str> = csv_text.trim().lines().collect();
    assert_eq!(rows.len(), 2); // header + one area
    assert!(rows[1].starts_with("68,Computer science,3"));
}
