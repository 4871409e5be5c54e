//! Common utility functions shared across the codebase.

use std::path::{Component, Path};

/// Path of `file` relative to `root`, with `/` separators.
///
/// Falls back to the path as given when `file` is not under `root`.
/// Leading `./` components are dropped so references read `src/app.js:5`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use gleaner::utils::relative_path;
///
/// assert_eq!(relative_path(Path::new("/p"), Path::new("/p/src/app.js")), "src/app.js");
/// assert_eq!(relative_path(Path::new("."), Path::new("./views/a.ejs")), "views/a.ejs");
/// assert_eq!(relative_path(Path::new("/p"), Path::new("/elsewhere/x.js")), "/elsewhere/x.js");
/// ```
pub fn relative_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let mut parts: Vec<String> = Vec::new();
    let mut absolute = false;
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::RootDir => absolute = true,
            Component::Prefix(prefix) => parts.push(prefix.as_os_str().to_string_lossy().into()),
            Component::ParentDir => parts.push("..".to_string()),
            Component::Normal(part) => parts.push(part.to_string_lossy().into()),
        }
    }
    let joined = parts.join("/");
    if absolute { format!("/{}", joined) } else { joined }
}

/// Whether a path pattern contains glob wildcards.
/// Patterns without wildcards are treated as literal paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}
