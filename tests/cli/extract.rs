use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const APP: &str = r#"import { useTranslation } from 'react-i18next';

export function LoginForm() {
  const { t } = useTranslation();
  return (
    <form>
      <h1>{t('auth.login.title')}</h1>
      <Trans i18nKey="auth.login.help" />
      <button>{t('auth.login.title')}</button>
    </form>
  );
}
"#;

fn parse_keys(output: &str) -> Result<Value> {
    Ok(serde_json::from_str(output)?)
}

#[test]
fn test_extract_json_to_stdout() -> Result<()> {
    let test = CliTest::with_file("src/components/LoginForm.tsx", APP)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let keys = parse_keys(&stdout(&output))?;
    let names: Vec<&String> = keys.as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["auth.login.title", "auth.login.help"]);

    let title = &keys["auth.login.title"];
    assert_eq!(title["occurrences"], 2);
    assert_eq!(title["defaultValue"], "auth.login.title");
    assert_eq!(title["pattern"], "t_function");
    assert_eq!(title["files"][0]["file"], "src/components/LoginForm.tsx");
    assert_eq!(title["files"][0]["line"], 7);
    assert_eq!(title["files"][1]["line"], 9);
    assert_eq!(keys["auth.login.help"]["pattern"], "trans_component");

    Ok(())
}

#[test]
fn test_extract_logs_go_to_stderr() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "t('home.title')")?;

    let output = test.extract_command().output()?;
    let err = stderr(&output);
    assert!(err.contains("Found 1 unique translation keys"));
    assert!(err.contains("Total occurrences: 1"));
    assert!(!stdout(&output).contains("INFO"));

    Ok(())
}

#[test]
fn test_extract_stats_can_be_disabled() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "t('home.title')")?;

    let output = test.extract_command().args(["--stats", "false"]).output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(!stderr(&output).contains("Extraction Statistics"));

    Ok(())
}

#[test]
fn test_extract_no_keys_fails() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "export const App = () => null;")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).trim(), "{}");

    Ok(())
}

#[test]
fn test_extract_csv_to_file() -> Result<()> {
    let test = CliTest::with_file("src/components/LoginForm.tsx", APP)?;

    let output = test
        .extract_command()
        .args(["--format", "csv", "-o", "out/keys.csv"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Keys written to"));

    assert_snapshot!(test.read_file("out/keys.csv")?, @r#"
    Key,Default Value,Occurrences,Files,Pattern
    "auth.login.title","auth.login.title",2,"src/components/LoginForm.tsx:7;src/components/LoginForm.tsx:9","t_function"
    "auth.login.help","auth.login.help",1,"src/components/LoginForm.tsx:8","trans_component"
    "#);

    Ok(())
}

#[test]
fn test_extract_yaml() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "t('zeta.title');\nt('alpha.title');")?;

    let output = test.extract_command().args(["--format", "yaml"]).output()?;
    assert_eq!(output.status.code(), Some(0));

    insta::with_settings!({filters => vec![
        (r"# Generated: \S+", "# Generated: [TIMESTAMP]"),
    ]}, {
        assert_snapshot!(stdout(&output), @r"
        # Translation Keys
        # Generated: [TIMESTAMP]

        alpha.title:
          default: alpha.title
          occurrences: 1
          pattern: t_function
          files:
          - file: src/App.tsx
            line: 2
        zeta.title:
          default: zeta.title
          occurrences: 1
          pattern: t_function
          files:
          - file: src/App.tsx
            line: 1
        ");
    });

    Ok(())
}

#[test]
fn test_extract_explicit_files_and_directories() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lib/a.ts", "t('lib.a')")?;
    test.write_file("lib/nested/b.jsx", "t('lib.b')")?;
    test.write_file("lib/notes.md", "t('lib.notes')")?;
    test.write_file("other/c.tsx", "t('other.c')")?;

    let output = test
        .extract_command()
        .args(["-f", "lib", "other/c.tsx"])
        .output()?;
    let keys = parse_keys(&stdout(&output))?;
    let names: Vec<&String> = keys.as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["lib.a", "lib.b", "other.c"]);

    Ok(())
}

#[test]
fn test_extract_file_list() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/a.tsx", "t('list.a')")?;
    test.write_file("src/b.tsx", "t('list.b')")?;
    test.write_file("files.txt", "src/b.tsx\n\nsrc/a.tsx\n")?;

    let output = test.extract_command().args(["-f", "files.txt"]).output()?;
    let keys = parse_keys(&stdout(&output))?;
    let names: Vec<&String> = keys.as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["list.b", "list.a"]);

    Ok(())
}

#[test]
fn test_extract_default_excludes_and_negations() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/App.tsx", "t('app.title')")?;
    test.write_file("src/App.test.tsx", "t('test.only')")?;
    test.write_file("src/types.d.ts", "t('types.only')")?;
    test.write_file("src/legacy/Old.tsx", "t('legacy.only')")?;

    let output = test
        .extract_command()
        .args(["--exclude-patterns", "src/legacy/**"])
        .output()?;
    let keys = parse_keys(&stdout(&output))?;
    let names: Vec<&String> = keys.as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["app.title"]);

    Ok(())
}

#[test]
fn test_extract_drops_sensitive_keys() -> Result<()> {
    let test = CliTest::with_file(
        "src/App.tsx",
        "t('user@example.com');\nt('settings.password');\nt('settings.title');",
    )?;

    let output = test.extract_command().output()?;
    let keys = parse_keys(&stdout(&output))?;
    let names: Vec<&String> = keys.as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["settings.title"]);
    assert!(stderr(&output).contains("Skipping potentially sensitive key: user@example.com"));

    Ok(())
}

#[test]
fn test_extract_include_context() -> Result<()> {
    let test = CliTest::with_file("src/components/LoginForm.tsx", APP)?;

    let output = test.extract_command().arg("--include-context").output()?;
    let keys = parse_keys(&stdout(&output))?;

    let context = &keys["auth.login.title"]["files"][0]["context"];
    assert_eq!(context["lineNumber"], 7);
    assert_eq!(context["component"], "LoginForm");
    assert_eq!(context["surrounding"].as_array().unwrap().len(), 7);

    Ok(())
}

#[test]
fn test_extract_uses_config_source_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".lexirc.json",
        r#"{ "sourceRoot": "web", "includes": ["app/**/*.tsx"] }"#,
    )?;
    test.write_file("web/app/Page.tsx", "t('page.title')")?;
    test.write_file("src/Ignored.tsx", "t('ignored')")?;

    let output = test.extract_command().output()?;
    let keys = parse_keys(&stdout(&output))?;
    assert_eq!(keys["page.title"]["files"][0]["file"], "app/Page.tsx");
    assert!(keys.get("ignored").is_none());

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".lexirc.json", r#"{ "excludes": ["[invalid"] }"#)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid glob pattern in 'excludes'"));

    Ok(())
}
