//! Unit name normalization.
//!
//! Maps the name recorded in the profile to the key a summary is grouped
//! under: the file itself, or its package directory in package mode.

/// Compute the canonical report key for a unit
///
/// **Public** - never fails; a `root` that is not a prefix of the name is ignored
///
/// # Arguments
/// * `raw_name` - unit name from the profile
/// * `root` - prefix to strip, empty to keep names as they are
/// * `package_mode` - group by containing directory instead of by file
///
/// # Example
/// ```
/// use covreport::aggregator::normalize_name;
///
/// assert_eq!(normalize_name("example.com/p/main.go", "example.com/p", false), "/main.go");
/// assert_eq!(normalize_name("example.com/p/report/report.go", "example.com/p", true), "./report");
/// assert_eq!(normalize_name("example.com/p/report/report.go", "", true), "example.com/p/report");
/// ```
pub fn normalize_name(raw_name: &str, root: &str, package_mode: bool) -> String {
    let name = if package_mode {
        parent_dir(raw_name)
    } else {
        raw_name
    };

    if root.is_empty() {
        return name.to_string();
    }

    let stripped = name.strip_prefix(root).unwrap_or(name);
    if package_mode {
        format!(".{}", stripped)
    } else {
        stripped.to_string()
    }
}

/// Directory portion of a slash-separated name
///
/// **Private** - `"."` when there is no directory, `"/"` for top-level absolute names
fn parent_dir(name: &str) -> &str {
    match name.rfind('/') {
        Some(0) => "/",
        Some(idx) => &name[..idx],
        None => ".",
    }
}
