// vim: tw=80
//! Configured results are looked up newest first.

use std::{
    cell::RefCell,
    rc::{Rc, Weak}
};
use substitute::*;

fn add(a: i32, b: i32) -> Call {
    Call::new(MemberId::method("add"), ReturnType::of::<i32>())
        .arg(a)
        .arg(b)
}

fn spec(call: &Call, match_args: MatchArgs) -> CallSpecification {
    CallSpecificationFactory::new().create_from(call, match_args)
}

fn produce_i32(results: &CallResults, call: &Call) -> Option<i32> {
    results.try_get_result(call)
        .map(|r| *r.produce(call).unwrap().downcast_ref::<i32>().unwrap())
}

#[test]
fn no_result() {
    let results = CallResults::new();
    assert!(results.try_get_result(&add(1, 2)).is_none());
}

#[test]
fn no_matching_result() {
    let mut results = CallResults::new();
    results.set_result(spec(&add(1, 2), MatchArgs::AsSpecifiedInCall),
                       ReturnValue::value(3i32));
    assert!(results.try_get_result(&add(1, 3)).is_none());
}

#[test]
fn last_write_wins() {
    let mut results = CallResults::new();
    let s = spec(&add(1, 2), MatchArgs::AsSpecifiedInCall);
    results.set_result(s.clone(), ReturnValue::value(1i32));
    results.set_result(s, ReturnValue::value(2i32));
    assert_eq!(produce_i32(&results, &add(1, 2)), Some(2));
    // The earlier result is shadowed, not removed
    assert_eq!(results.len(), 2);
}

/// Specificity doesn't matter; only insertion order does.
#[test]
fn newer_any_shadows_older_specific() {
    let mut results = CallResults::new();
    results.set_result(spec(&add(1, 2), MatchArgs::AsSpecifiedInCall),
                       ReturnValue::value(3i32));
    results.set_result(spec(&add(0, 0), MatchArgs::Any),
                       ReturnValue::value(42i32));
    assert_eq!(produce_i32(&results, &add(1, 2)), Some(42));
}

#[test]
fn newer_specific_shadows_older_any() {
    let mut results = CallResults::new();
    results.set_result(spec(&add(0, 0), MatchArgs::Any),
                       ReturnValue::value(42i32));
    results.set_result(spec(&add(1, 2), MatchArgs::AsSpecifiedInCall),
                       ReturnValue::value(3i32));
    assert_eq!(produce_i32(&results, &add(1, 2)), Some(3));
    assert_eq!(produce_i32(&results, &add(5, 5)), Some(42));
}

#[test]
fn lookup_is_idempotent() {
    let mut results = CallResults::new();
    results.set_result(spec(&add(1, 2), MatchArgs::AsSpecifiedInCall),
                       ReturnValue::in_turn([1i32, 2]));
    let call = add(1, 2);
    let first = results.try_get_result(&call).unwrap();
    for _ in 0..3 {
        let again = results.try_get_result(&call).unwrap();
        assert!(Rc::ptr_eq(&first, &again));
    }
    assert_eq!(results.len(), 1);
}

#[test]
fn in_turn_repeats_last() {
    let r = ReturnValue::in_turn(["a", "b"]);
    let call = add(0, 0);
    let got = (0..4)
        .map(|_| *r.produce(&call).unwrap().downcast_ref::<&str>().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(got, ["a", "b", "b", "b"]);
}

#[test]
#[should_panic(expected = "Must supply at least one return value")]
fn in_turn_empty() {
    ReturnValue::in_turn(Vec::<i32>::new());
}

#[test]
fn func_sees_arguments() {
    let r = ReturnValue::func(|c: &Call| {
        c.arg_as::<i32>(0).unwrap() + c.arg_as::<i32>(1).unwrap()
    });
    let v = r.produce(&add(3, 4)).unwrap();
    assert_eq!(*v.downcast_ref::<i32>().unwrap(), 7);
    assert!(r.fixed_values().is_empty());
}

#[test]
fn func_mut() {
    let mut count = 0;
    let r = ReturnValue::func(move |_: &Call| {
        count += 1;
        count
    });
    let call = add(0, 0);
    assert_eq!(*r.produce(&call).unwrap().downcast_ref::<i32>().unwrap(), 1);
    assert_eq!(*r.produce(&call).unwrap().downcast_ref::<i32>().unwrap(), 2);
}

#[test]
fn peek_stays_in_turn() {
    let r = ReturnValue::in_turn([1i32, 2]);
    let call = add(0, 0);
    let peek = || *r.peek(&call).unwrap().downcast_ref::<i32>().unwrap();
    let produce = || *r.produce(&call).unwrap().downcast_ref::<i32>().unwrap();
    assert_eq!(peek(), 1);
    assert_eq!(peek(), 1);
    assert_eq!(produce(), 1);
    assert_eq!(peek(), 2);
    assert_eq!(produce(), 2);
    assert_eq!(produce(), 2);
}

#[test]
fn func_reentered() {
    // The function asks its own result for a value
    let cell: Rc<RefCell<Weak<ReturnValue>>> = Rc::default();
    let c2 = cell.clone();
    let r = Rc::new(ReturnValue::func(move |call: &Call| {
        let inner = c2.borrow().upgrade().unwrap().produce(call);
        matches!(inner, Err(Error::ReentrantReturnFunction{..}))
    }));
    *cell.borrow_mut() = Rc::downgrade(&r);
    let v = r.produce(&add(0, 0)).unwrap();
    assert!(*v.downcast_ref::<bool>().unwrap());
}
