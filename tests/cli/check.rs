use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

const DEFAULT_LOCALE: &str = r#"{
  "hello": {
    "world": "Hello, world!",
    "friend": "Hello, friend!"
  }
}"#;

#[test]
fn test_clean_theme() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.json", r#"{"hello": {"world": "Bonjour", "friend": "Salut"}}"#)?;
    test.write_file("layout/theme.liquid", "<html></html>")?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Checked 3 files, 2 locale files - no offenses found\n");

    Ok(())
}

#[test]
fn test_missing_translation() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.json", "{\n  \"hello\": {\n    \"world\": \"Bonjour\"\n  }\n}")?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("error: The translation for 'hello.friend' is missing"));
    assert!(stdout.contains("--> /locales/fr.json"));
    assert!(stdout.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_extra_translation() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file(
        "locales/fr.json",
        r#"{"hello": {"world": "Bonjour", "friend": "Salut", "monde": "Monde"}}"#,
    )?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("A default translation for 'hello.monde' does not exist"));

    Ok(())
}

#[test]
fn test_shopify_namespace_is_exempt() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file(
        "locales/fr.json",
        r#"{"hello": {"world": "Bonjour", "friend": "Salut"}, "shopify": {"checkout": "Paiement"}}"#,
    )?;

    let (code, _, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);

    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.json", r#"{"hello": {"world": "Bonjour"}}"#)?;

    let (code, stdout, _) = run(test.check_command().args(["--format", "json"]))?;
    let report: Value = serde_json::from_str(&stdout)?;

    assert_eq!(code, 1);
    let offenses = report["offenses"].as_array().cloned().unwrap_or_default();
    assert_eq!(offenses.len(), 1);
    assert_eq!(offenses[0]["check"], "MatchingTranslations");
    assert_eq!(offenses[0]["absolutePath"], "/locales/fr.json");
    assert_eq!(offenses[0]["severity"], "error");
    assert_eq!(offenses[0]["key"], "hello.friend");

    Ok(())
}

#[test]
fn test_path_argument_inside_theme() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.json", r#"{"hello": {"world": "Bonjour"}}"#)?;
    test.write_file("sections/header.liquid", "")?;

    let (code, stdout, _) = run(test.check_command().arg("sections/header.liquid"))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("hello.friend"));

    Ok(())
}

#[test]
fn test_check_disabled_by_config() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file(".theme-check.yml", "MatchingTranslations:\n  enabled: false\n")?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.json", r#"{"hello": {}}"#)?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("no offenses found"));

    Ok(())
}

#[test]
fn test_severity_override() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file(".theme-check.yml", "MatchingTranslations:\n  severity: warning\n")?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.json", r#"{"hello": {"world": "Bonjour"}}"#)?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("warning: The translation for 'hello.friend' is missing"));
    assert!(stdout.contains("1 problem (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_ignored_locale_file() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file(".theme-check.yml", "ignore:\n  - locales/fr.json\n")?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.json", r#"{"hello": {}}"#)?;

    let (code, _, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);

    Ok(())
}

#[test]
fn test_ignored_default_locale_file() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file(".theme-check.yml", "ignore:\n  - locales/en.default.json\n")?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.json", r#"{"bonjour": "Bonjour"}"#)?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("no offenses found"));

    Ok(())
}

#[test]
fn test_missing_root_override() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file(".theme-check.yml", "root: ./dist\n")?;

    let (code, _, stderr) = run(&mut test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("'root' does not name a directory"));

    Ok(())
}

#[test]
fn test_malformed_locale_file() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.json", r#"{"hello": "#)?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("Could not parse 'locales/fr.json'"));
    assert!(stdout.contains("--> /locales/fr.json"));

    Ok(())
}

#[test]
fn test_multiple_default_locales() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file("locales/en.default.json", DEFAULT_LOCALE)?;
    test.write_file("locales/fr.default.json", DEFAULT_LOCALE)?;

    let (code, stdout, _) = run(&mut test.check_command())?;

    assert_eq!(code, 2);
    assert!(stdout.contains("check 'MatchingTranslations' failed"));

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::theme()?;
    test.write_file(".theme-check.yml", "ignore: [\n")?;

    let (code, _, stderr) = run(&mut test.check_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains(".theme-check.yml"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.check_command().arg("--help"))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--verbose"));

    Ok(())
}
