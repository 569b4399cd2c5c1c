use crate::utils::{normalize_package_path, package_name, parent_package_path};

#[test]
fn normalize_strips_dots_and_separators() {
    assert_eq!(normalize_package_path("common"), "common");
    assert_eq!(normalize_package_path("./common/"), "common");
    assert_eq!(normalize_package_path("common//./entity"), "common/entity");
    assert_eq!(normalize_package_path("a\\b\\c"), "a/b/c");
}

#[test]
fn normalize_root() {
    assert_eq!(normalize_package_path(""), "");
    assert_eq!(normalize_package_path("."), "");
    assert_eq!(normalize_package_path("./"), "");
}

#[test]
fn parent_paths() {
    assert_eq!(parent_package_path("a/b/c"), Some("a/b"));
    assert_eq!(parent_package_path("a"), Some(""));
    assert_eq!(parent_package_path(""), None);
}

#[test]
fn package_names() {
    assert_eq!(package_name("identity"), "identity");
    assert_eq!(package_name("foo/bar/baz"), "baz");
    assert_eq!(package_name(""), "");
}
