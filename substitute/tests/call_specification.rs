// vim: tw=80
//! Building specifications from calls, and matching calls against them.

use substitute::*;

fn add(a: i32, b: i32) -> Call {
    Call::new(MemberId::method("add"), ReturnType::of::<i32>())
        .arg(a)
        .arg(b)
}

fn subtract(a: i32, b: i32) -> Call {
    Call::new(MemberId::method("subtract"), ReturnType::of::<i32>())
        .arg(a)
        .arg(b)
}

#[test]
fn any_matches_all_arguments() {
    let factory = CallSpecificationFactory::new();
    let spec = factory.create_from(&add(1, 2), MatchArgs::Any);
    assert_eq!(spec.match_args(), MatchArgs::Any);
    assert!(spec.matchers().is_empty());
    for (a, b) in [(1, 2), (0, 0), (-5, i32::MAX)] {
        assert!(spec.matches(&add(a, b)));
    }
}

#[test]
fn any_requires_same_member() {
    let factory = CallSpecificationFactory::new();
    let spec = factory.create_from(&add(1, 2), MatchArgs::Any);
    assert!(!spec.matches(&subtract(1, 2)));
}

#[test]
fn as_specified_is_reflexive() {
    let factory = CallSpecificationFactory::new();
    let calls = [
        add(1, 2),
        add(0, -1),
        Call::new(MemberId::method("greet"), ReturnType::unit())
            .arg(String::from("hello"))
            .arg(Some(3u8)),
        Call::new(MemberId::getter("name"), ReturnType::of::<String>()),
    ];
    for c in calls.iter() {
        let spec = factory.create_from(c, MatchArgs::AsSpecifiedInCall);
        assert!(spec.matches(c), "{} should match itself", c);
    }
}

#[test]
fn as_specified_rejects_other_arguments() {
    let factory = CallSpecificationFactory::new();
    let spec = factory.create_from(&add(1, 2), MatchArgs::AsSpecifiedInCall);
    assert!(!spec.matches(&add(1, 3)));
    assert!(!spec.matches(&add(2, 1)));
    assert!(!spec.matches(&subtract(1, 2)));
}

#[test]
fn as_specified_uses_registered_matchers() {
    let factory = CallSpecificationFactory::new();
    let call = Call::new(MemberId::method("add"), ReturnType::of::<i32>())
        .arg_matching(ArgMatcher::any::<i32>())
        .arg(2i32);
    let spec = factory.create_from(&call, MatchArgs::AsSpecifiedInCall);
    assert!(spec.matches(&add(1, 2)));
    assert!(spec.matches(&add(100, 2)));
    assert!(!spec.matches(&add(1, 3)));
}

#[test]
fn predicate_matcher() {
    let factory = CallSpecificationFactory::new();
    let call = Call::new(MemberId::method("add"), ReturnType::of::<i32>())
        .arg_matching(ArgMatcher::with::<i32, _>(predicate::in_iter([1, 2, 3])))
        .arg_matching(ArgMatcher::func(|x: &i32| *x < 0));
    let spec = factory.create_from(&call, MatchArgs::AsSpecifiedInCall);
    assert!(spec.matches(&add(2, -7)));
    assert!(!spec.matches(&add(4, -7)));
    assert!(!spec.matches(&add(2, 7)));
}

#[test]
fn matcher_of_wrong_type_rejects() {
    let factory = CallSpecificationFactory::new();
    let call = Call::new(MemberId::method("add"), ReturnType::of::<i32>())
        .arg_matching(ArgMatcher::any::<u32>())
        .arg(2i32);
    let spec = factory.create_from(&call, MatchArgs::AsSpecifiedInCall);
    assert!(!spec.matches(&add(1, 2)));
}

#[test]
fn member_kind_is_part_of_identity() {
    let factory = CallSpecificationFactory::new();
    let getter = Call::new(MemberId::getter("name"), ReturnType::of::<String>());
    let setter = Call::new(MemberId::setter("name"), ReturnType::unit())
        .arg(String::from("x"));
    let spec = factory.create_from(&getter, MatchArgs::Any);
    assert!(spec.matches(&getter));
    assert!(!spec.matches(&setter));
}

#[test]
#[should_panic(expected = "Call to add has 3 arguments but its specification has 2")]
fn arity_mismatch() {
    let factory = CallSpecificationFactory::new();
    let spec = factory.create_from(&add(1, 2), MatchArgs::AsSpecifiedInCall);
    spec.matches(&add(1, 2).arg(3i32));
}

#[test]
fn display() {
    let factory = CallSpecificationFactory::new();
    let call = Call::new(MemberId::method("add"), ReturnType::of::<i32>())
        .arg_matching(ArgMatcher::any::<i32>())
        .arg(2i32);
    let spec = factory.create_from(&call, MatchArgs::AsSpecifiedInCall);
    assert_eq!(spec.to_string(), "add(any i32, 2)");
    let spec = factory.create_from(&call, MatchArgs::Any);
    assert_eq!(spec.to_string(), "add(..)");
}

#[test]
fn describe_non_matching() {
    let factory = CallSpecificationFactory::new();
    let spec = factory.create_from(&add(1, 2), MatchArgs::AsSpecifiedInCall);
    assert_eq!(spec.describe_non_matching(&add(1, 3)), "add(1, *3*)");
    assert_eq!(spec.describe_non_matching(&add(5, 3)), "add(*5*, *3*)");
}
