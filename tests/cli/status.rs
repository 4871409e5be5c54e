use anyhow::Result;

use crate::{CATALOG_PATH, CliTest, run};

const CATALOG: &str = r#"# Generated on: 2023/11/14 22:13
# Revision: 5

entry_000001:
  id: 1
  ignore: false
  plural: false
  references:
    - "src/app.js:1"
  source: "Hello"
  translation: "Bonjour"

entry_000002:
  id: 2
  ignore: false
  plural: false
  references:
    - "src/app.js:2"
  source: "Save"
  translation:

entry_000003:
  id: 3
  ignore: true
  plural: false
  references: []
  source: "Debug only"
  translation:
"#;

#[test]
fn test_status_lists_untranslated() -> Result<()> {
    let test = CliTest::with_file(CATALOG_PATH, CATALOG)?;

    let (code, stdout, stderr) = run(test.status_command())?;
    assert_eq!(code, 1, "stderr: {}", stderr);
    assert!(stdout.contains("warning: Save  untranslated"), "{stdout}");
    assert!(
        stdout.contains("--> locales/app-strings.yml (entry_000002)"),
        "{stdout}"
    );
    assert!(stdout.contains("note: used at src/app.js:2"), "{stdout}");
    assert!(!stdout.contains("Debug only"), "{stdout}");
    assert!(
        stdout.contains("3 entries, 1 translated, 1 ignored, 1 untranslated"),
        "{stdout}"
    );

    Ok(())
}

#[test]
fn test_status_all_translated() -> Result<()> {
    let test = CliTest::with_file(
        CATALOG_PATH,
        &CATALOG.replace(
            "source: \"Save\"\n  translation:",
            "source: \"Save\"\n  translation: \"Enregistrer\"",
        ),
    )?;

    let (code, stdout, _) = run(test.status_command())?;
    assert_eq!(code, 0);
    assert!(
        stdout.contains("3 entries, 2 translated, 1 ignored, 0 untranslated"),
        "{stdout}"
    );

    Ok(())
}

#[test]
fn test_status_without_catalog() -> Result<()> {
    let test = CliTest::new()?;

    let (code, _, stderr) = run(test.status_command())?;
    assert_eq!(code, 2);
    assert!(stderr.contains("catalog not found"), "stderr: {stderr}");

    Ok(())
}
