use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CATALOG_PATH, CliTest, catalog, run};

const APP_JS: &str = r#"const greeting = _("Hello");
const count = n_(["No items", "One item", "{{count}} items"], items.length);

function farewell() {
  return _("Hello");
}
"#;

#[test]
fn test_harvest_writes_catalog() -> Result<()> {
    let test = CliTest::with_file("src/app.js", APP_JS)?;

    let (code, stdout, stderr) = run(test.harvest_command())?;
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Harvesting localizable strings from sources:"));
    assert!(stdout.contains("Writing new translation file..."));
    assert!(stdout.contains("Harvested 2 strings from 1 file"));

    assert_eq!(
        test.read_catalog()?,
        catalog(
            1,
            2,
            &[
                r#"entry_000001:
  id: 1
  ignore: false
  plural: false
  references:
    - "src/app.js:1"
    - "src/app.js:5"
  source: "Hello"
  translation:
"#,
                r#"entry_000002:
  id: 2
  ignore: false
  plural: true
  references:
    - "src/app.js:2"
  source:
    - "No items"
    - "One item"
    - "{{count}} items"
  translation:
"#,
            ]
        )
    );

    Ok(())
}

#[test]
fn test_harvest_silent() -> Result<()> {
    let test = CliTest::with_file("src/app.js", APP_JS)?;

    let (code, stdout, _) = run({
        let mut cmd = test.harvest_command();
        cmd.arg("--silent");
        cmd
    })?;
    assert_eq!(code, 0);
    assert!(!stdout.contains("Harvesting localizable strings"));
    assert!(!stdout.contains("Done!"));
    assert!(stdout.contains("Harvested 2 strings"));

    Ok(())
}

#[test]
fn test_harvest_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("src/app.js", APP_JS)?;

    let mut first = test.harvest_command();
    first.args(["--purge", "--silent"]);
    run(first)?;
    let first = test.read_catalog()?;

    let mut second = test.harvest_command();
    second.args(["--purge", "--silent"]);
    let (code, _, _) = run(second)?;
    assert_eq!(code, 0);
    let second = test.read_catalog()?;

    assert!(second.contains("# Revision: 2"));
    assert_eq!(
        first.replace("# Revision: 1", "# Revision: 2"),
        second,
        "only the revision may change"
    );

    Ok(())
}

#[test]
fn test_tree_harvest_skips_file_with_dynamic_text() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"alert(_("Hello"));"#)?;
    test.write_file(
        "src/dynamic.js",
        "const label = getLabel();\nalert(_(label));\nalert(_(\"Never harvested\"));\n",
    )?;

    let (code, stdout, stderr) = run(test.harvest_command())?;
    assert_eq!(code, 1);
    assert!(stdout.contains("--> src/dynamic.js:2:7"), "{stdout}");
    assert!(stdout.contains("argument-shape"), "{stdout}");
    assert!(
        stderr.contains("warning: 1 file(s) skipped"),
        "stderr: {stderr}"
    );

    let catalog = test.read_catalog()?;
    assert!(catalog.contains(r#"source: "Hello""#));
    assert!(!catalog.contains("Never harvested"));

    Ok(())
}

#[test]
fn test_purge_removes_entries_and_stale_references() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        "alert(_(\"Hello\"));\nalert(_(\"Bye\"));\n",
    )?;
    test.write_file("views/index.ejs", "<p><%= _(\"Hello\") %></p>\n")?;
    run(test.harvest_command())?;

    let translated = test
        .read_catalog()?
        .replace("source: \"Bye\"\n  translation:", "source: \"Bye\"\n  translation: \"Au revoir\"");
    test.write_file(CATALOG_PATH, &translated)?;

    test.write_file("src/app.js", "alert(_(\"Hello\"));\n")?;
    test.remove_file("views/index.ejs")?;

    let mut cmd = test.harvest_command();
    cmd.arg("--purge");
    let (code, _, stderr) = run(cmd)?;
    assert_eq!(code, 0, "stderr: {}", stderr);

    assert_eq!(
        test.read_catalog()?,
        catalog(
            2,
            2,
            &[r#"entry_000001:
  id: 1
  ignore: false
  plural: false
  references:
    - "src/app.js:1"
  source: "Hello"
  translation:
"#]
        )
    );

    Ok(())
}

#[test]
fn test_purge_keeps_entries_when_a_file_is_skipped() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "alert(_(\"Hello\"));\n")?;
    test.write_file("src/other.js", "alert(_(\"Bye\"));\n")?;
    run(test.harvest_command())?;

    test.write_file("src/other.js", "alert(_(\"Bye\")\n")?;
    let mut cmd = test.harvest_command();
    cmd.arg("--purge");
    let (code, stdout, stderr) = run(cmd)?;
    assert_eq!(code, 1);
    assert!(stdout.contains("0 purged"), "{stdout}");
    assert!(
        stderr.contains("warning: purge not applied, entries of skipped files were kept"),
        "stderr: {stderr}"
    );
    assert!(test.read_catalog()?.contains(r#"source: "Bye""#));

    Ok(())
}

#[test]
fn test_without_purge_translation_survives() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.js",
        "alert(_(\"Hello\"));\nalert(_(\"Bye\"));\nalert(_(\"Gone\"));\n",
    )?;
    test.write_file("views/index.ejs", "<p><%= _(\"Bye\") %></p>\n")?;
    run(test.harvest_command())?;

    let translated = test
        .read_catalog()?
        .replace("source: \"Bye\"\n  translation:", "source: \"Bye\"\n  translation: \"Au revoir\"");
    test.write_file(CATALOG_PATH, &translated)?;

    test.write_file("src/app.js", "alert(_(\"Hello\"));\n")?;
    let (code, _, _) = run(test.harvest_command())?;
    assert_eq!(code, 0);

    assert_eq!(
        test.read_catalog()?,
        catalog(
            2,
            3,
            &[
                r#"entry_000001:
  id: 1
  ignore: false
  plural: false
  references:
    - "src/app.js:1"
  source: "Hello"
  translation:
"#,
                r#"entry_000002:
  id: 2
  ignore: false
  plural: false
  references:
    - "views/index.ejs:1"
  source: "Bye"
  translation: "Au revoir"
"#,
                r#"entry_000003:
  id: 3
  ignore: false
  plural: false
  references:
    - "src/app.js:3"
  source: "Gone"
  translation:
"#,
            ]
        )
    );

    Ok(())
}

#[test]
fn test_malformed_catalog_aborts() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"alert(_("Hello"));"#)?;
    let broken = "# Revision: 3\n\nentry_000001:\n  id: 1\n  translation: \"Bonjour\"\n";
    test.write_file(CATALOG_PATH, broken)?;

    let (code, _, stderr) = run(test.harvest_command())?;
    assert_eq!(code, 2);
    assert!(
        stderr.contains("could not load the existing catalog"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("missing source"), "stderr: {stderr}");
    assert_eq!(test.read_catalog()?, broken);

    Ok(())
}

#[test]
fn test_overwrite_existing_discards_catalog() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"alert(_("Hello"));"#)?;
    test.write_file(CATALOG_PATH, "not: [a, valid catalog\n")?;

    let mut cmd = test.harvest_command();
    cmd.arg("--overwrite-existing");
    let (code, _, stderr) = run(cmd)?;
    assert_eq!(code, 0, "stderr: {}", stderr);

    let catalog = test.read_catalog()?;
    assert!(catalog.contains("# Revision: 1"));
    assert!(catalog.contains(r#"source: "Hello""#));

    Ok(())
}

#[test]
fn test_output_and_add_paths() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"alert(_("Hello"));"#)?;
    test.write_file("plugins/chart.js", r#"I18n.translate("Chart");"#)?;

    let mut cmd = test.harvest_command();
    cmd.args(["--output", "i18n/strings.yml", "--add-paths", "plugins/**/*.js"]);
    let (code, stdout, stderr) = run(cmd)?;
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Harvesting localizable strings from additional paths:"));

    let catalog = test.read_file("i18n/strings.yml")?;
    assert!(catalog.contains(r#"- "plugins/chart.js:1""#));
    assert!(catalog.contains(r#"source: "Chart""#));
    assert!(!test.root().join(CATALOG_PATH).exists());

    Ok(())
}

#[test]
fn test_invalid_add_paths_pattern() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.harvest_command();
    cmd.args(["--add-paths", "src/*["]);
    let (code, _, stderr) = run(cmd)?;
    assert_eq!(code, 2);
    assert!(stderr.contains("--add-paths"), "stderr: {stderr}");

    Ok(())
}

#[test]
fn test_config_file_sections() -> Result<()> {
    let test = CliTest::with_file(
        ".gleanerrc.json",
        r#"{ "sections": [{ "name": "app", "patterns": ["app"] }], "calls": { "singular": "t" } }"#,
    )?;
    test.write_file("app/nested/page.js", r#"t("From config"); _("Not a call");"#)?;
    test.write_file("src/app.js", r#"t("Outside sections");"#)?;

    let (code, stdout, stderr) = run(test.harvest_command())?;
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Harvesting localizable strings from app:"));

    let catalog = test.read_catalog()?;
    assert!(catalog.contains(r#"source: "From config""#));
    assert!(!catalog.contains("Not a call"));
    assert!(!catalog.contains("Outside sections"));

    Ok(())
}
