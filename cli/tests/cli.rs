use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

const CLAIM: &str = "Studies show a 20% improvement.";

fn scholar(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("scholar").unwrap();
    cmd.arg("--home")
        .arg(home)
        .env_remove("SCHOLAR_STORAGE_BACKEND")
        .env_remove("SCHOLAR_STORAGE_JSON")
        .env_remove("SCHOLAR_STORAGE_DB");
    cmd
}

#[test]
fn analyze_reads_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    scholar(home.path())
        .args(["analyze", "--cursor", "0"])
        .write_stdin(CLAIM)
        .assert()
        .success()
        .stdout(contains("Section: Introduction"))
        .stdout(contains("1. [high] citation (missing-citation) at 0"))
        .stdout(contains("2. [high] citation (statistical-claim) at 15"));
    Ok(())
}

#[test]
fn analyze_json_report() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    let essay = home.path().join("essay.txt");
    fs::write(&essay, CLAIM)?;
    let out = scholar(home.path())
        .args(["analyze", "--json"])
        .arg(&essay)
        .output()?;
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(report["word_count"], 5);
    let suggestions = report["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[1]["anchor"], 15);
    assert_eq!(suggestions[1]["priority"], "high");
    Ok(())
}

#[test]
fn usage_gate_and_upgrade() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    scholar(home.path())
        .args(["usage", "status"])
        .assert()
        .success()
        .stdout(contains("Interactions left: 5 of 5"));
    for _ in 0..5 {
        scholar(home.path())
            .args(["usage", "consume"])
            .assert()
            .success();
    }
    scholar(home.path())
        .args(["usage", "consume"])
        .assert()
        .failure()
        .stderr(contains("free AI interactions used up"));
    scholar(home.path())
        .args(["usage", "upgrade"])
        .assert()
        .success()
        .stdout(contains("Plan: premium"));
    scholar(home.path())
        .args(["usage", "consume"])
        .assert()
        .success()
        .stdout(contains("Total interactions: 5"));
    scholar(home.path())
        .args(["usage", "reset"])
        .assert()
        .success()
        .stdout(contains("Total interactions: 0"))
        .stdout(contains("Plan: premium"));
    Ok(())
}

#[test]
fn ingest_records_uploads() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    let rubric = home.path().join("rubric.md");
    fs::write(&rubric, "# Rubric\n\nUse APA.")?;
    scholar(home.path())
        .arg("ingest")
        .arg(&rubric)
        .assert()
        .success()
        .stdout(contains("Ingested rubric.md (Markdown File"))
        .stdout(contains("Context from 1 uploaded document(s):"))
        .stdout(contains("- Assessment criteria and grading rubric considerations"));
    scholar(home.path())
        .args(["usage", "status"])
        .assert()
        .success()
        .stdout(contains("Documents uploaded: 1"));

    let image = home.path().join("photo.png");
    fs::write(&image, [0x89, b'P', b'N', b'G'])?;
    scholar(home.path())
        .arg("ingest")
        .arg(&image)
        .assert()
        .failure()
        .stderr(contains("unsupported file type"));
    Ok(())
}

#[test]
fn cite_finds_catalog_source() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    scholar(home.path())
        .args(["cite", "strength training reduces sports injuries", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("(Lauersen et al., 2014)"));
    scholar(home.path())
        .args(["cite", "quantum chromodynamics"])
        .assert()
        .success()
        .stdout(contains("No matching sources."));
    Ok(())
}

#[test]
fn grade_and_review() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    scholar(home.path())
        .args(["grade", "--instructor", "Jane Li"])
        .write_stdin(CLAIM)
        .assert()
        .success()
        .stdout(contains("Predicted score: "))
        .stdout(contains("Instructor: Jane Li (JL)"))
        .stdout(contains("[x] Clarity & structure 4/5"));
    scholar(home.path())
        .arg("review")
        .assert()
        .success()
        .stdout(contains("[SM] Stuart McGill"))
        .stdout(contains("- Compare with other training methods"));
    Ok(())
}
