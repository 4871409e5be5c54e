use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["sections", "output", "templateExtensions", "calls", "purge"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["output"], "locales/app-strings.yml");
    assert_eq!(parsed["calls"]["singular"], "_");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .gleanerrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".gleanerrc.json").exists());
    let content = test.read_file(".gleanerrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".gleanerrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .gleanerrc.json already exists
    ");

    assert_eq!(test.read_file(".gleanerrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("src/app.js", r#"alert(_("Hello"));"#)?;

    let (code, _, stderr) = run(test.harvest_command())?;
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(test.read_catalog()?.contains(r#"source: "Hello""#));

    Ok(())
}
