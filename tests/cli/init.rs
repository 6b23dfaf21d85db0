use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(test.command().arg("init"))?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "✓ Created .theme-check.yml\n");

    let content = test.read_file(".theme-check.yml")?;
    let parsed: serde_yaml::Value = serde_yaml::from_str(&content)?;
    assert!(parsed.get("ignore").is_some());
    assert!(parsed.get("MatchingTranslations").is_some());

    Ok(())
}

#[test]
fn test_init_config_is_loadable() -> Result<()> {
    let test = CliTest::new()?;
    run(test.command().arg("init"))?;
    test.write_file("locales/en.default.json", r#"{"a": "A"}"#)?;

    let (code, _, _) = run(&mut test.check_command())?;

    assert_eq!(code, 0);
    assert!(test.root().join(".theme-check.yml").is_file());

    Ok(())
}

#[test]
fn test_init_already_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".theme-check.yml", "ignore: []\n")?;

    let (code, _, stderr) = run(test.command().arg("init"))?;

    assert_eq!(code, 2);
    assert!(stderr.contains(".theme-check.yml already exists"));
    assert_eq!(test.read_file(".theme-check.yml")?, "ignore: []\n");

    Ok(())
}
