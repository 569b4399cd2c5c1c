use crate::Error;
use crate::diagnostics::DiagnosticKind;
use crate::link::link;
use crate::test_utils::{
    AstBuilder, base_type, link_asts, struct_type, summary, summary_with_positions,
};

#[test]
fn resolves_unaliased_import() {
    let (tree, diagnostics) = link_asts(vec![
        AstBuilder::new("common/entity.nex")
            .ty(base_type("Entity").field("id", "string"))
            .build(),
        AstBuilder::new("identity/user.nex")
            .uses("common")
            .ty(struct_type("User").extends("Entity").field("name", "string"))
            .build(),
    ]);

    assert!(diagnostics.is_empty(), "{}", summary(&diagnostics));
    let common = tree.package_by_path("common").unwrap();
    let user_file = tree.package(tree.package_by_path("identity").unwrap()).locals[0];
    let import = tree.local(user_file).import_of(common).unwrap();
    assert_eq!(import.path, "common");
    assert_eq!(import.alias_key(), ".");
}

#[test]
fn import_paths_are_normalized() {
    let (tree, diagnostics) = link_asts(vec![
        AstBuilder::new("common/entity.nex")
            .ty(base_type("Entity"))
            .build(),
        AstBuilder::new("identity/user.nex").uses("./common/").build(),
    ]);

    assert!(diagnostics.is_empty(), "{}", summary(&diagnostics));
    let user_file = tree.package(tree.package_by_path("identity").unwrap()).locals[0];
    assert_eq!(tree.local(user_file).imports().len(), 1);
}

#[test]
fn self_import() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("common/entity.nex").uses("common").build(),
    ]);

    insta::assert_snapshot!(summary(&diagnostics), @"SelfImport: package `common` cannot import itself");
}

#[test]
fn package_not_found_with_suggestion() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("common/entity.nex").build(),
        AstBuilder::new("identity/user.nex").uses("comon").build(),
    ]);

    insta::assert_snapshot!(summary(&diagnostics), @"PackageNotFound: package `comon` not found");
    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.hints(), ["did you mean `common`?"]);
}

#[test]
fn alias_already_defined() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex").build(),
        AstBuilder::new("b/b.nex").build(),
        AstBuilder::new("c/c.nex")
            .uses_as("a", "x")
            .uses_as("b", "x")
            .build(),
    ]);

    insta::assert_snapshot!(summary(&diagnostics), @"AliasAlreadyDefined: alias `x` is already in use");
}

#[test]
fn duplicate_import() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex").build(),
        AstBuilder::new("c/c.nex").uses("a").uses_as("a", "other").build(),
    ]);

    insta::assert_snapshot!(summary(&diagnostics), @"DuplicateImport: package `a` is imported more than once");
}

#[test]
fn duplicate_type_in_one_file() {
    let (tree, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex")
            .ty(struct_type("T").field("x", "string"))
            .ty(struct_type("T").field("y", "string"))
            .build(),
    ]);

    insta::assert_snapshot!(summary_with_positions(&diagnostics), @"a/a.nex:3 AlreadyDefined: `T` is already defined");
    assert_eq!(tree.all_objects().len(), 1);
}

#[test]
fn duplicate_type_across_files_of_one_package() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/one.nex").ty(struct_type("T")).build(),
        AstBuilder::new("a/two.nex").ty(struct_type("T")).build(),
    ]);

    insta::assert_snapshot!(summary_with_positions(&diagnostics), @"a/two.nex:1 AlreadyDefined: `T` is already defined");
}

#[test]
fn circular_dependency_reported_once() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex")
            .uses("b")
            .ty(struct_type("A1"))
            .ty(struct_type("A2"))
            .build(),
        AstBuilder::new("b/b.nex")
            .uses("a")
            .ty(struct_type("B1"))
            .ty(struct_type("B2"))
            .ty(struct_type("B3"))
            .build(),
    ]);

    assert_eq!(diagnostics.count_of(DiagnosticKind::CircularDependency), 1);
    insta::assert_snapshot!(summary(&diagnostics), @"CircularDependency: circular dependency between `b/b.nex` and `a/a.nex`");
}

#[test]
fn circular_dependency_through_three_packages() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex").uses("b").build(),
        AstBuilder::new("b/b.nex").uses("c").build(),
        AstBuilder::new("c/c.nex").uses("a").build(),
    ]);

    insta::assert_snapshot!(summary(&diagnostics), @"CircularDependency: circular dependency between `c/c.nex` and `a/a.nex`");
}

#[test]
fn diamond_is_not_a_cycle() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex").uses("b").uses("c").build(),
        AstBuilder::new("b/b.nex").uses("d").build(),
        AstBuilder::new("c/c.nex").uses("d").build(),
        AstBuilder::new("d/d.nex").build(),
    ]);

    assert!(diagnostics.is_empty(), "{}", summary(&diagnostics));
}

#[test]
fn unaliased_imports_with_same_name_collide() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex").ty(struct_type("T")).build(),
        AstBuilder::new("b/b.nex").ty(struct_type("T")).build(),
        AstBuilder::new("c/c.nex").uses("a").uses("b").build(),
    ]);

    insta::assert_snapshot!(summary_with_positions(&diagnostics), @"c/c.nex:2 AlreadyDefined: `T` is already defined");
}

#[test]
fn aliased_import_does_not_collide() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex").ty(struct_type("T")).build(),
        AstBuilder::new("b/b.nex").ty(struct_type("T")).build(),
        AstBuilder::new("c/c.nex")
            .uses("a")
            .uses_as("b", "b")
            .build(),
    ]);

    assert!(diagnostics.is_empty(), "{}", summary(&diagnostics));
}

#[test]
fn local_name_collides_with_unaliased_import() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex").ty(struct_type("T")).build(),
        AstBuilder::new("c/c.nex").uses("a").ty(struct_type("T")).build(),
    ]);

    insta::assert_snapshot!(summary_with_positions(&diagnostics), @"c/c.nex:2 AlreadyDefined: `T` is already defined");
}

#[test]
fn local_name_may_shadow_aliased_import() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex").ty(struct_type("T")).build(),
        AstBuilder::new("c/c.nex")
            .uses_as("a", "a")
            .ty(struct_type("T"))
            .build(),
    ]);

    assert!(diagnostics.is_empty(), "{}", summary(&diagnostics));
}

#[test]
fn all_errors_reported_in_one_run() {
    let (_, diagnostics) = link_asts(vec![
        AstBuilder::new("a/a.nex")
            .uses("a")
            .uses("missing")
            .ty(struct_type("T"))
            .ty(struct_type("T"))
            .build(),
    ]);

    insta::assert_snapshot!(summary(&diagnostics), @r"
    SelfImport: package `a` cannot import itself
    PackageNotFound: package `missing` not found
    AlreadyDefined: `T` is already defined
    ");
}

#[test]
fn no_sources_is_a_hard_error() {
    assert!(matches!(link(Vec::new()), Err(Error::NoSources)));
}

#[test]
fn duplicate_file_is_a_hard_error() {
    let result = link(vec![
        AstBuilder::new("a/a.nex").build(),
        AstBuilder::new("./a/a.nex").build(),
    ]);
    assert!(matches!(result, Err(Error::DuplicateFile(path)) if path == "a/a.nex"));
}
