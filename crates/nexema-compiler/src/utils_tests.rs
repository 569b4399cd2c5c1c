use crate::utils::{did_you_mean, edit_distance, find_similar};

#[test]
fn distances() {
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("Entity", "Entity"), 0);
    assert_eq!(edit_distance("Entiy", "Entity"), 1);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
}

#[test]
fn closest_candidate_wins() {
    let candidates = ["User", "Users", "Account"];
    assert_eq!(find_similar("Usr", &candidates, 2), Some("User"));
    assert_eq!(find_similar("Xyzzy", &candidates, 2), None);
}

#[test]
fn hint_text() {
    assert_eq!(
        did_you_mean("comon", &["common", "identity"]).as_deref(),
        Some("did you mean `common`?")
    );
    assert_eq!(did_you_mean("zzz", &["common"]), None);
}
