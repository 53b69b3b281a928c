// vim: tw=80
//! End-to-end use of a substitute through a hand-written proxy.

use std::time::{Duration, SystemTime};
use substitute::*;

trait Calculator {
    fn switch_on(&self);
    fn add(&self, a: i32, b: i32) -> i32;
    fn subtract(&self, a: i32, b: i32) -> i32;
    fn name(&self) -> String;
    fn set_name(&self, name: String);
    fn now(&self) -> SystemTime;
    fn set_firmware(&self, firmware: String);
}

/// What a generated proxy would look like.  Failures panic here, at the
/// outermost layer.
struct CalculatorProxy {
    sub: Substitute,
}

impl CalculatorProxy {
    fn new() -> Self {
        CalculatorProxy{sub: Substitute::new()}
    }

    fn call<T: Value + Clone>(&self, call: Call) -> T {
        match self.sub.invoke(call) {
            Ok(outcome) => outcome.into_value().unwrap(),
            Err(e) => panic!("{}", e)
        }
    }

    /// For members whose return type has no default value.  `placeholder` is
    /// returned when verifying or declaring a stub.
    fn call_or<T: Value + Clone>(&self, call: Call, placeholder: T) -> T {
        match self.sub.invoke(call) {
            Ok(outcome) => outcome.into_value_or(placeholder).unwrap(),
            Err(e) => panic!("{}", e)
        }
    }
}

impl Calculator for CalculatorProxy {
    fn switch_on(&self) {
        self.call(Call::new(MemberId::method("switch_on"), ReturnType::unit()))
    }

    fn add(&self, a: i32, b: i32) -> i32 {
        self.call(Call::new(MemberId::method("add"), ReturnType::of::<i32>())
            .arg(a)
            .arg(b))
    }

    fn subtract(&self, a: i32, b: i32) -> i32 {
        self.call(Call::new(MemberId::method("subtract"),
                            ReturnType::of::<i32>())
            .arg(a)
            .arg(b))
    }

    fn name(&self) -> String {
        self.call(Call::new(MemberId::getter("name"),
                            ReturnType::of::<String>()))
    }

    fn set_name(&self, name: String) {
        self.call(Call::new(MemberId::setter("name"), ReturnType::unit())
            .arg(name))
    }

    fn now(&self) -> SystemTime {
        self.call_or(Call::new(MemberId::getter("now"),
                               ReturnType::without_default::<SystemTime>()),
                     SystemTime::UNIX_EPOCH)
    }

    fn set_firmware(&self, firmware: String) {
        self.call(Call::new(MemberId::setter("firmware"), ReturnType::unit())
            .arg(firmware))
    }
}

#[test]
fn return_value_for_specific_args() {
    let calc = CalculatorProxy::new();
    calc.add(1, 2);
    calc.sub.returns_value(100i32).unwrap();
    assert_eq!(calc.add(1, 2), 100);
    assert_eq!(calc.add(1, 3), 0);
    assert_eq!(calc.subtract(1, 2), 0);
}

#[test]
fn return_value_for_any_args() {
    let calc = CalculatorProxy::new();
    calc.add(0, 0);
    calc.sub.returns_value_for_any_args(7i32).unwrap();
    assert_eq!(calc.add(1, 2), 7);
    assert_eq!(calc.add(-4, 9), 7);
    assert_eq!(calc.subtract(1, 2), 0);
}

#[test]
fn restub() {
    let calc = CalculatorProxy::new();
    calc.add(1, 2);
    calc.sub.returns_value(3i32).unwrap();
    assert_eq!(calc.add(1, 2), 3);
    calc.add(1, 2);
    calc.sub.returns_value(4i32).unwrap();
    assert_eq!(calc.add(1, 2), 4);
}

#[test]
fn configure_does_not_use_existing_result() {
    let calc = CalculatorProxy::new();
    calc.add(1, 2);
    calc.sub.returns_value(3i32).unwrap();
    // Declaring the stub doesn't trigger the existing one
    calc.sub.configure();
    assert_eq!(calc.add(1, 2), 0);
    calc.sub.returns_value(4i32).unwrap();
    assert_eq!(calc.add(1, 2), 4);
    // The declaring call was never received
    assert_eq!(calc.sub.received_calls().len(), 2);
}

#[test]
fn returns_from_function() {
    let calc = CalculatorProxy::new();
    calc.add(0, 0);
    calc.sub.returns(ReturnValue::func(|c: &Call| {
        c.arg_as::<i32>(0).unwrap() + c.arg_as::<i32>(1).unwrap()
    }), MatchArgs::Any).unwrap();
    assert_eq!(calc.add(2, 3), 5);
    assert_eq!(calc.add(40, 2), 42);
}

#[test]
fn arg_matchers() {
    let calc = CalculatorProxy::new();
    calc.sub.invoke(Call::new(MemberId::method("add"), ReturnType::of::<i32>())
        .arg_matching(ArgMatcher::any::<i32>())
        .arg(5i32)).unwrap();
    calc.sub.returns_value(10i32).unwrap();
    assert_eq!(calc.add(1, 5), 10);
    assert_eq!(calc.add(-1, 5), 10);
    assert_eq!(calc.add(1, 6), 0);
}

#[test]
fn received() {
    let calc = CalculatorProxy::new();
    calc.switch_on();
    calc.add(1, 2);
    calc.sub.received(MatchArgs::AsSpecifiedInCall);
    calc.switch_on();
    calc.sub.received(MatchArgs::AsSpecifiedInCall);
    calc.add(1, 2);
    calc.sub.did_not_receive(MatchArgs::Any);
    calc.subtract(0, 0);
}

#[test]
#[should_panic(expected = "Expected to receive a call matching:
    add(1, 3)
Actually received no matching calls.
Received 1 non-matching call (non-matching arguments indicated with '*' characters):
    add(1, *2*)")]
fn received_fail() {
    let calc = CalculatorProxy::new();
    calc.add(1, 2);
    calc.sub.received(MatchArgs::AsSpecifiedInCall);
    calc.add(1, 3);
}

#[test]
#[should_panic(expected = "Expected to receive no calls matching:
    add(..)
Actually received 1 matching call:
    add(1, 2)")]
fn did_not_receive_fail() {
    let calc = CalculatorProxy::new();
    calc.add(1, 2);
    calc.sub.did_not_receive(MatchArgs::Any);
    calc.add(0, 0);
}

#[test]
fn property_auto_values() {
    let calc = CalculatorProxy::new();
    assert_eq!(calc.name(), "");
    calc.set_name("Casio".to_owned());
    assert_eq!(calc.name(), "Casio");
    calc.set_name("HP".to_owned());
    assert_eq!(calc.name(), "HP");
}

#[test]
fn property_auto_values_disabled() {
    let calc = CalculatorProxy {
        sub: Substitute::with_config(Config::new().auto_property_values(false))
    };
    calc.set_name("Casio".to_owned());
    assert_eq!(calc.name(), "");
}

#[test]
fn property_getter_stub() {
    let calc = CalculatorProxy::new();
    calc.name();
    calc.sub.returns_value(String::from("TI")).unwrap();
    assert_eq!(calc.name(), "TI");
    // Assigning afterwards takes precedence
    calc.set_name("Casio".to_owned());
    assert_eq!(calc.name(), "Casio");
}

#[test]
fn write_only_property() {
    let calc = CalculatorProxy::new();
    calc.set_firmware("1.0".to_owned());
    calc.sub.received(MatchArgs::AsSpecifiedInCall);
    calc.set_firmware("1.0".to_owned());
    calc.sub.did_not_receive(MatchArgs::AsSpecifiedInCall);
    calc.set_firmware("2.0".to_owned());
}

#[test]
fn type_without_default() {
    let calc = CalculatorProxy::new();
    let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    calc.sub.configure();
    calc.now();
    calc.sub.returns_value(when).unwrap();
    assert_eq!(calc.now(), when);
    assert_eq!(calc.sub.received_calls().len(), 1);
}

#[test]
fn received_type_without_default() {
    let calc = CalculatorProxy::new();
    let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    calc.sub.configure();
    calc.now();
    calc.sub.returns_value(when).unwrap();
    calc.now();
    calc.sub.received(MatchArgs::AsSpecifiedInCall);
    calc.now();
    calc.sub.received_times(Quantity::exactly(1), MatchArgs::Any);
    calc.now();
}

#[test]
#[should_panic(expected = "Expected to receive a call matching:
    now
Actually received no matching calls.")]
fn received_type_without_default_fail() {
    let calc = CalculatorProxy::new();
    calc.sub.received(MatchArgs::AsSpecifiedInCall);
    calc.now();
}

#[test]
#[should_panic(expected = "now has no configured result and std::time::SystemTime has no default value")]
fn type_without_default_unconfigured() {
    let calc = CalculatorProxy::new();
    calc.now();
}

#[test]
fn query_does_not_record() {
    let calc = CalculatorProxy::new();
    calc.add(1, 2);
    calc.sub.returns_value(3i32).unwrap();
    let call = Call::new(MemberId::method("add"), ReturnType::of::<i32>())
        .arg(1i32)
        .arg(2i32);
    let v: i32 = calc.sub.query(call).unwrap().into_value().unwrap();
    assert_eq!(v, 3);
    assert!(calc.sub.state().call_stack().borrow().is_empty());
    assert!(calc.sub.received(MatchArgs::Any).invoke(
        Call::new(MemberId::method("add"), ReturnType::of::<i32>())
            .arg(0i32)
            .arg(0i32)).is_err());
}

#[test]
fn returns_without_call() {
    let calc = CalculatorProxy::new();
    assert!(matches!(calc.sub.returns_value(4i32), Err(Error::NoLastCall)));
}
