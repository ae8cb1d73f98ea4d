use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const EN: &str = r#"{
  "auth": { "login": "Log in" },
  "error": { "generic": "Something went wrong" },
  "home": { "title": "Home" }
}"#;

const AR_PARTIAL: &str = r#"{
  "auth": { "login": "تسجيل الدخول" },
  "home": { "title": "الرئيسية" }
}"#;

const AR_COMPLETE: &str = r#"{
  "auth": { "login": "تسجيل الدخول" },
  "error": { "generic": "حدث خطأ ما" },
  "home": { "title": "الرئيسية" }
}"#;

const APP: &str = r#"export function App() {
  return [t('auth.login'), t('error.generic'), t('home.title')];
}
"#;

fn project(ar: &str) -> Result<CliTest> {
    let test = CliTest::with_file("src/App.tsx", APP)?;
    test.write_file("public/api/translations/en.json", EN)?;
    test.write_file("public/api/translations/ar.json", ar)?;
    Ok(test)
}

#[test]
fn test_verify_prints_summary() -> Result<()> {
    let test = project(AR_PARTIAL)?;

    let output = test.verify_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Translation Summary"));
    assert!(out.contains("Total keys:      3 (2 critical)"));
    assert!(out.contains("! ar    66.7%  1 missing, 1 critical"));
    assert!(out.contains("[critical] 1 critical keys are missing translations"));
    assert!(stderr(&output).contains("Translation verification completed"));

    Ok(())
}

#[test]
fn test_verify_strict_fails_on_missing_critical_keys() -> Result<()> {
    let test = project(AR_PARTIAL)?;

    let output = test.verify_command().arg("--strict").output()?;
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Strict mode: 1 critical keys are missing"));
    assert!(err.contains("Strict mode: completeness 66.7% is below threshold 80%"));

    let output = test
        .verify_command()
        .args(["--strict", "--threshold", "50"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Strict mode: 1 critical keys are missing"));
    assert!(!err.contains("below threshold"));

    Ok(())
}

#[test]
fn test_verify_strict_passes_when_complete() -> Result<()> {
    let test = project(AR_COMPLETE)?;

    let output = test.verify_command().arg("--strict").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✓ ar   100.0%"));

    Ok(())
}

#[test]
fn test_verify_strict_threshold() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "t('home.title'); t('home.subtitle');")?;
    test.write_file(
        "public/api/translations/en.json",
        r#"{ "home": { "title": "Home", "subtitle": "Welcome" } }"#,
    )?;
    test.write_file(
        "public/api/translations/ar.json",
        r#"{ "home": { "title": "الرئيسية" } }"#,
    )?;

    let output = test.verify_command().arg("--strict").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Strict mode: completeness 50.0% is below threshold 80%"));

    let output = test
        .verify_command()
        .args(["--strict", "--threshold", "50"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}

#[test]
fn test_verify_missing_source_locale_fails() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;

    let output = test
        .verify_command()
        .args(["-r", "report.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Analysis failed"));
    assert!(!test.root().join("report.json").exists());

    Ok(())
}

#[test]
fn test_verify_writes_json_report() -> Result<()> {
    let test = project(AR_PARTIAL)?;

    let output = test
        .verify_command()
        .args(["-r", "reports/i18n/report.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("Report written to"));

    let report: Value = serde_json::from_str(&test.read_file("reports/i18n/report.json")?)?;
    assert_eq!(report["sourceLocale"], "en");
    assert_eq!(report["targetLocales"], serde_json::json!(["ar"]));
    assert_eq!(report["summary"]["totalKeys"], 3);
    assert_eq!(report["summary"]["criticalKeys"], 2);
    assert_eq!(report["details"]["ar"]["status"], "incomplete");
    assert_eq!(report["details"]["ar"]["completeness"], 66.67);
    assert_eq!(
        report["details"]["ar"]["critical_missing"],
        serde_json::json!(["error.generic"])
    );
    assert_eq!(report["quality_metrics"]["critical_score"], 50.0);
    assert!(report["generated_at"].is_string());
    assert!(report["generator"].as_str().unwrap().starts_with("lexi "));

    Ok(())
}

#[test]
fn test_verify_reports_unused_and_missing_keys() -> Result<()> {
    let test = project(AR_COMPLETE)?;
    test.write_file("src/App.tsx", "t('auth.login'); t('home.title'); t('home.subtitle');")?;

    let output = test.verify_command().args(["-r", "report.json"]).output()?;
    assert_eq!(output.status.code(), Some(0));

    let report: Value = serde_json::from_str(&test.read_file("report.json")?)?;
    assert_eq!(
        report["summary"]["issues"],
        serde_json::json!([
            { "type": "unused_keys", "count": 1, "keys": ["error.generic"] },
            { "type": "missing_in_translations", "count": 1, "keys": ["home.subtitle"] }
        ])
    );

    Ok(())
}

#[test]
fn test_verify_invalid_target_locale_continues() -> Result<()> {
    let test = project(AR_COMPLETE)?;
    test.write_file("public/api/translations/fr.json", r#"{ "auth": "#)?;

    let output = test
        .verify_command()
        .args(["--locales", "ar,fr", "-r", "report.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let report: Value = serde_json::from_str(&test.read_file("report.json")?)?;
    assert_eq!(report["details"]["ar"]["status"], "ok");
    assert_eq!(report["details"]["fr"]["status"], "error");
    assert_eq!(report["details"]["fr"]["completeness"], 0.0);
    assert_eq!(
        report["details"]["fr"]["missing"].as_array().unwrap().len(),
        3
    );
    assert!(stdout(&output).contains("✘ fr  Translation file not found or invalid"));

    Ok(())
}

#[test]
fn test_verify_markdown_report() -> Result<()> {
    let test = project(AR_PARTIAL)?;

    test.verify_command()
        .args(["--format", "markdown", "-r", "report.md"])
        .output()?;

    let md = test.read_file("report.md")?;
    assert!(md.starts_with("# Translation Report\n"));
    assert!(md.contains("| ar | incomplete | 66.7% | 1 | 1 |"));
    assert!(md.contains("- **CRITICAL:** 1 critical keys are missing translations"));

    Ok(())
}

#[test]
fn test_verify_html_report() -> Result<()> {
    let test = project(AR_PARTIAL)?;

    test.verify_command()
        .args(["--format", "html", "-r", "report.html"])
        .output()?;

    let html = test.read_file("report.html")?;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<td>ar</td>"));
    assert!(html.contains("Critical Keys: 2"));

    Ok(())
}

#[test]
fn test_verify_csv_report() -> Result<()> {
    let test = project(AR_PARTIAL)?;

    test.verify_command()
        .args(["--format", "csv", "-r", "report.csv"])
        .output()?;

    assert_eq!(
        test.read_file("report.csv")?,
        "Locale,Status,Completeness,Missing Keys,Critical Missing,Total Keys\n\
         ar,incomplete,66.67,1,1,2\n"
    );

    Ok(())
}

#[test]
fn test_verify_verbose_prints_report() -> Result<()> {
    let test = project(AR_COMPLETE)?;

    let output = test.verify_command().arg("-v").output()?;
    assert_eq!(output.status.code(), Some(0));

    let report: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(report["details"]["ar"]["status"], "ok");
    assert!(stderr(&output).contains("DEBUG"));

    Ok(())
}

#[test]
fn test_verify_command_line_overrides() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "t('nav.home')")?;
    test.write_file("locales/fr.json", r#"{ "nav": { "home": "Accueil" } }"#)?;
    test.write_file("locales/de.json", r#"{ "nav": { "home": "Startseite" } }"#)?;

    let output = test
        .verify_command()
        .args([
            "--translations-root",
            "locales",
            "--source-locale",
            "fr",
            "--locales",
            "de",
            "--strict",
        ])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("✓ de   100.0%"));

    Ok(())
}

#[test]
fn test_verify_uses_config_file() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "t('nav.home')")?;
    test.write_file(
        ".lexirc.json",
        r#"{
          "translationsRoot": "i18n",
          "targetLocales": ["ar"],
          "localeFiles": { "ar": "arabic.json" }
        }"#,
    )?;
    test.write_file("i18n/en.json", r#"{ "nav": { "home": "Home" } }"#)?;
    test.write_file("i18n/arabic.json", r#"{ "nav": { "home": "الرئيسية" } }"#)?;

    let output = test.verify_command().arg("--strict").output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_verify_critical_only() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;
    test.write_file("public/api/translations/en.json", EN)?;
    test.write_file(
        "public/api/translations/ar.json",
        r#"{ "auth": { "login": "تسجيل الدخول" }, "error": { "generic": "حدث خطأ ما" } }"#,
    )?;

    let output = test
        .verify_command()
        .args(["--critical-only", "--strict", "--threshold", "100"])
        .output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    Ok(())
}
