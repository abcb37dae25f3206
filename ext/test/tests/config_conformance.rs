//! End-to-end tests: serialized specs built into matchers and evaluated
//! against the fixed-shape domain credentials.

use credql::prelude::*;
use credql::MatcherSpec;
use credql_test::{ApiToken, Scope, TestCredential, UsernamePassword};

#[test]
fn filter_users_and_tokens_with_one_spec() {
    let spec = MatcherSpec::from_json(
        r#"{
            "type": "any_of",
            "matchers": [
                { "type": "username", "username": "alice" },
                { "type": "all_of", "matchers": [
                    { "type": "property", "name": "active", "value": { "bool": true } },
                    { "type": "property", "name": "scope",
                      "value": { "enum": { "type_name": "credql_test::Scope", "label": "Global" } } }
                ]}
            ]
        }"#,
    )
    .unwrap();
    let matcher = spec.build().unwrap();

    assert!(matcher.matches(&UsernamePassword::new("alice", "hunter2")));
    assert!(!matcher.matches(&UsernamePassword::new("bob", "hunter2")));

    assert!(matcher.matches(&ApiToken::new("t1", true, Scope::Global)));
    assert!(!matcher.matches(&ApiToken::new("t2", false, Scope::Global)));
    assert!(!matcher.matches(&ApiToken::new("t3", true, Scope::System)));
}

#[test]
fn built_matcher_renders_the_whole_tree() {
    let spec = MatcherSpec::from_json(
        r#"{
            "type": "all_of",
            "matchers": [
                { "type": "username", "username": "alice" },
                { "type": "property", "name": "active", "value": { "bool": true } }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(
        spec.build().unwrap().describe().as_deref(),
        Some("((username == \"alice\") && true)")
    );
}

#[test]
fn spec_built_matcher_equals_direct_construction() {
    let spec = MatcherSpec::from_json(
        r#"{ "type": "not", "matcher": { "type": "username", "username": "alice" } }"#,
    )
    .unwrap();
    let built = spec.build().unwrap();

    let direct: Box<dyn CredentialMatcher> = Box::new(not(with_username("alice")));
    assert_eq!(&built, &direct);
}

#[test]
fn write_only_password_never_matches() {
    let matcher = with_property("password", "hunter2");
    assert!(!matcher.matches(&UsernamePassword::new("alice", "hunter2")));
}

#[test]
fn opaque_expected_value_poisons_description_but_still_matches() {
    use std::any::Any;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Fingerprint(&'static str);

    impl OpaqueValue for Fingerprint {
        fn opaque_type_name(&self) -> &'static str {
            "fingerprint"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    let shared: Arc<dyn OpaqueValue> = Arc::new(Fingerprint("ab:cd"));
    let expected = PropertyValue::Opaque(Arc::clone(&shared));

    let credential = TestCredential::new()
        .with_username("alice")
        .with("fingerprint", PropertyValue::Opaque(shared));

    let filter = all_of(vec![
        Box::new(with_username("alice")),
        Box::new(with_property("fingerprint", expected)),
    ]);

    // Same allocation: matches by identity.
    assert!(filter.matches(&credential));
    // But the tree can no longer be rendered as CQL.
    assert_eq!(filter.describe(), None);
}

#[test]
fn traced_evaluation_reports_every_leaf() {
    let sink = CollectingSink::new();
    let filter = all_of(vec![
        Box::new(with_username("alice")),
        Box::new(with_property("active", true)),
    ]);
    let credential = TestCredential::new().with_username("alice").with("active", true);

    assert!(filter.matches_traced(&credential, &sink));

    let records = sink.records();
    assert!(records.iter().any(|r| r.matcher.contains("UsernameMatcher")));
    assert!(records.iter().any(|r| r.matcher.contains("PropertyMatcher")));
    assert!(records
        .iter()
        .any(|r| r.level == TraceLevel::Summary && r.matcher.contains("AllOfMatcher")));
}
