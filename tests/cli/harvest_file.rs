use anyhow::Result;

use crate::{CATALOG_PATH, CliTest, run};

#[test]
fn test_harvest_single_file() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"alert(_("Hello"));"#)?;
    test.write_file("views/index.ejs", "<h1><%= _(\"Welcome\") %></h1>\n")?;

    let (code, stdout, stderr) = run(test.harvest_file_command("views/index.ejs"))?;
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Harvesting localizable strings from views/index.ejs"));

    let catalog = test.read_catalog()?;
    assert!(catalog.contains(r#"- "views/index.ejs:1""#));
    assert!(catalog.contains(r#"source: "Welcome""#));
    assert!(!catalog.contains("Hello"), "only the given file is harvested");

    Ok(())
}

#[test]
fn test_single_file_never_purges() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"alert(_("Hello"));"#)?;
    test.write_file("src/other.js", r#"alert(_("Other"));"#)?;
    run(test.harvest_command())?;

    let (code, _, _) = run(test.harvest_file_command("src/other.js"))?;
    assert_eq!(code, 0);

    let catalog = test.read_catalog()?;
    assert!(catalog.contains(r#"source: "Hello""#));
    assert!(catalog.contains(r#"source: "Other""#));

    Ok(())
}

#[test]
fn test_dynamic_text_rejects_file() -> Result<()> {
    let test = CliTest::with_file("src/app.js", r#"alert(_("Hello"));"#)?;
    run(test.harvest_command())?;
    let before = test.read_catalog()?;

    test.write_file(
        "src/form.js",
        "const user_input = read();\n_(\"Name\");\n_(user_input);\n",
    )?;

    let (code, stdout, stderr) = run(test.harvest_file_command("src/form.js"))?;
    assert_eq!(code, 2);
    assert!(stdout.contains("--> src/form.js:3:1"), "{stdout}");
    assert!(
        stdout.contains("expected a string literal, found an identifier"),
        "{stdout}"
    );
    assert!(
        stderr.contains("src/form.js: 1 problem(s) found, catalog not written"),
        "stderr: {stderr}"
    );
    assert_eq!(test.read_catalog()?, before);

    Ok(())
}

#[test]
fn test_syntax_error_rejects_file() -> Result<()> {
    let test = CliTest::with_file("src/broken.js", "_(\"Hello\";\n")?;

    let (code, _, stderr) = run(test.harvest_file_command("src/broken.js"))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("catalog not written"), "stderr: {stderr}");
    assert!(!test.root().join(CATALOG_PATH).exists());

    Ok(())
}

#[test]
fn test_shape_conflict_rejects_file() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "_(\"File\");\nn_([\"File\"], 1);\n")?;

    let (code, stdout, _) = run(test.harvest_file_command("src/app.js"))?;
    assert_eq!(code, 2);
    assert!(stdout.contains("shape-conflict"), "{stdout}");
    assert!(!test.root().join(CATALOG_PATH).exists());

    Ok(())
}

#[test]
fn test_unsupported_file() -> Result<()> {
    let test = CliTest::with_file("README.md", "# readme\n")?;

    let (code, _, stderr) = run(test.harvest_file_command("README.md"))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("unsupported file type"), "stderr: {stderr}");

    Ok(())
}

#[test]
fn test_file_outside_root() -> Result<()> {
    let test = CliTest::new()?;
    let outside = CliTest::with_file("src/app.js", r#"alert(_("Hello"));"#)?;
    let file = outside.root().join("src/app.js");

    let (code, _, stderr) = run(test.harvest_file_command(&file.to_string_lossy()))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("outside the project root"), "stderr: {stderr}");

    Ok(())
}
