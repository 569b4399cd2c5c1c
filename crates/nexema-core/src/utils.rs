/// Normalize a package path to its canonical form.
///
/// Backslashes become `/`, `.` segments and empty segments are dropped,
/// so `./common/`, `common` and `common//.` are all `common`. The root
/// package is the empty string.
///
/// # Examples
/// ```
/// use nexema_core::utils::normalize_package_path;
/// assert_eq!(normalize_package_path("./common/"), "common");
/// assert_eq!(normalize_package_path("a\\b"), "a/b");
/// assert_eq!(normalize_package_path("."), "");
/// ```
pub fn normalize_package_path(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Parent of a normalized package path. The root has no parent.
///
/// # Examples
/// ```
/// use nexema_core::utils::parent_package_path;
/// assert_eq!(parent_package_path("a/b"), Some("a"));
/// assert_eq!(parent_package_path("a"), Some(""));
/// assert_eq!(parent_package_path(""), None);
/// ```
pub fn parent_package_path(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    Some(path.rsplit_once('/').map_or("", |(parent, _)| parent))
}

/// Package name: the last segment of a normalized package path.
///
/// The root package's name is the empty string.
pub fn package_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
