// vim: tw=80
//! Call routing, stubbing and verification for test doubles.
//!
//! This crate is the engine behind a substitute object.  Something else (a
//! hand-written proxy, a macro, a code generator) implements the substituted
//! trait and turns every invocation into a [`Call`].  The [`Substitute`]
//! decides what happens to that call: it remembers it, answers it with a
//! configured result or a default value, or uses it to verify earlier calls.
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Return values`](#return-values)
//! * [`Matching arguments`](#matching-arguments)
//! * [`Verifying calls`](#verifying-calls)
//! * [`Properties`](#properties)
//! * [`Events`](#events)
//! * [`Calling the real implementation`](#calling-the-real-implementation)
//! * [`Routes and handlers`](#routes-and-handlers)
//! * [`Crate features`](#crate-features)
//!
//! ## Getting Started
//!
//! A proxy forwards each method to [`Substitute::invoke`] and converts the
//! [`Outcome`] back to the method's return type.  Failures are turned into
//! panics there, at the outermost layer.
//!
//! ```
//! use substitute::*;
//!
//! trait Calculator {
//!     fn add(&self, a: i32, b: i32) -> i32;
//! }
//!
//! struct CalculatorProxy(Substitute);
//!
//! impl Calculator for CalculatorProxy {
//!     fn add(&self, a: i32, b: i32) -> i32 {
//!         let call = Call::new(MemberId::method("add"), ReturnType::of::<i32>())
//!             .arg(a)
//!             .arg(b);
//!         self.0.invoke(call).unwrap().into_value().unwrap()
//!     }
//! }
//!
//! let calc = CalculatorProxy(Substitute::new());
//! calc.add(1, 2);
//! calc.0.returns_value(3i32).unwrap();
//! assert_eq!(3, calc.add(1, 2));
//! assert_eq!(0, calc.add(2, 2));
//! ```
//!
//! ## Return values
//!
//! [`Substitute::returns`] configures the result of *the last call made*.
//! Results are looked up newest first, so configuring the same call again
//! replaces its result.  Unconfigured calls return the default value of their
//! [`ReturnType`].
//!
//! A [`ReturnValue`] can be a constant, a list of values returned in turn, or
//! a closure that computes the value from the call.
//!
//! ```
//! # use substitute::*;
//! let sub = Substitute::new();
//! let next = || Call::new(MemberId::method("next"), ReturnType::of::<u8>());
//!
//! sub.invoke(next()).unwrap();
//! sub.returns(ReturnValue::in_turn([1u8, 2, 3]), MatchArgs::Any).unwrap();
//! let got = (0..4)
//!     .map(|_| sub.invoke(next()).unwrap().into_value::<u8>().unwrap())
//!     .collect::<Vec<_>>();
//! assert_eq!(got, [1, 2, 3, 3]);
//! ```
//!
//! ## Matching arguments
//!
//! By default a configured result only applies to calls whose arguments equal
//! those of the configuring call.  [`MatchArgs::Any`] ignores arguments
//! altogether.  In between, individual argument positions can be given an
//! [`ArgMatcher`]: any value of a type, or any [`Predicate`].
//!
//! ```
//! # use substitute::*;
//! let sub = Substitute::new();
//! let double = |x: ArgMatcher| Call::new(MemberId::method("double"),
//!                                        ReturnType::of::<u32>())
//!     .arg_matching(x);
//!
//! sub.invoke(double(ArgMatcher::with::<u32, _>(predicate::gt(10)))).unwrap();
//! sub.returns(ReturnValue::func(|c: &Call| c.arg_as::<u32>(0).unwrap() * 2),
//!             MatchArgs::AsSpecifiedInCall).unwrap();
//!
//! let call = |x: u32| Call::new(MemberId::method("double"),
//!                               ReturnType::of::<u32>()).arg(x);
//! assert_eq!(40, sub.invoke(call(20)).unwrap().into_value::<u32>().unwrap());
//! assert_eq!(0, sub.invoke(call(5)).unwrap().into_value::<u32>().unwrap());
//! ```
//!
//! When overlapping specifications match the same call, the most recently
//! configured one wins, whatever its specificity.
//!
//! ## Verifying calls
//!
//! [`Substitute::received`] makes the next call a verification instead of a
//! call.  If no matching call was received, the verification fails with
//! [`Error::CallNotReceived`], which describes every call that was received
//! for the same member.
//!
//! ```
//! # use substitute::*;
//! let sub = Substitute::new();
//! let add = |a: i32, b: i32| Call::new(MemberId::method("add"),
//!                                      ReturnType::of::<i32>())
//!     .arg(a)
//!     .arg(b);
//!
//! sub.invoke(add(1, 2)).unwrap();
//! sub.invoke(add(3, 4)).unwrap();
//!
//! assert!(sub.received(MatchArgs::AsSpecifiedInCall).invoke(add(1, 2)).is_ok());
//! let e = sub.received(MatchArgs::AsSpecifiedInCall)
//!     .invoke(add(9, 9))
//!     .unwrap_err();
//! assert!(e.to_string().contains("add(*3*, *4*)"));
//! ```
//!
//! [`Substitute::received_times`] and [`Substitute::did_not_receive`] verify
//! an exact [`Quantity`].  [`Substitute::check_received`] verifies without
//! going through a proxy, and returns the matching calls.
//!
//! ## Properties
//!
//! Property accessors are members of kind [`MemberKind::Getter`] and
//! [`MemberKind::Setter`].  Assigning through the setter configures the getter
//! to return the assigned value.  This can be turned off with
//! [`Config::auto_property_values`].
//!
//! ```
//! # use substitute::*;
//! let sub = Substitute::new();
//! let set = Call::new(MemberId::setter("name"), ReturnType::unit())
//!     .arg(String::from("calc"));
//! sub.invoke(set).unwrap();
//!
//! let get = Call::new(MemberId::getter("name"), ReturnType::of::<String>());
//! let name: String = sub.invoke(get).unwrap().into_value().unwrap();
//! assert_eq!(name, "calc");
//! ```
//!
//! ## Events
//!
//! An [`EventHandler`] passed to a [`MemberKind::Subscribe`] member is invoked
//! by [`Substitute::raise`], until it's passed to the matching
//! [`MemberKind::Unsubscribe`] member.
//!
//! ```
//! # use substitute::*;
//! # use std::{cell::Cell, rc::Rc};
//! let sub = Substitute::new();
//! let count = Rc::new(Cell::new(0));
//! let c2 = count.clone();
//! let handler = EventHandler::new(0, move |_| c2.set(c2.get() + 1));
//!
//! sub.invoke(Call::new(MemberId::subscribe("tick"), ReturnType::unit())
//!     .arg(handler))
//!     .unwrap();
//! sub.raise("tick", vec![]).unwrap();
//! sub.raise("tick", vec![]).unwrap();
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Calling the real implementation
//!
//! With [`Config::call_base`], calls that have no configured result produce
//! [`Outcome::CallBase`] instead of a default value.  The proxy is expected
//! to run the real implementation in that case.
//!
//! ## Routes and handlers
//!
//! Internally each call runs through a [`Route`]: an ordered chain of
//! [`CallHandler`]s chosen for the [`RouteKind`].  A normal invocation is
//! recorded, then answered by the configured results, then by the default
//! value.  A verification runs [`CheckReceivedHandler`] instead of the
//! lookup.  The stores that handlers share live in a [`SubstituteState`].
//!
//! Verifications and stub declarations don't need a default value.  If the
//! return type has none, they finish with [`Outcome::Handled`] and the proxy
//! returns a placeholder, for example with [`Outcome::into_value_or`].
//!
//! ## Crate features
//!
//! * **nightly** - With this feature, [`ReturnType::inferred`] can tell
//!   whether a type implements `Default`, so proxies don't need to.  It
//!   requires the nightly compiler.
//!
//! ## Thread safety
//!
//! A `Substitute` is neither `Send` nor `Sync`.  Tests that need to share one
//! across threads must synchronize access themselves.
#![cfg_attr(feature = "nightly", feature(specialization))]
#![cfg_attr(feature = "nightly", allow(incomplete_features))]

mod call;
mod call_results;
mod call_stack;
mod config;
mod diagnostics;
mod error;
mod events;
mod matcher;
mod received_calls;
mod result_setter;
pub mod route;
mod specification;
mod state;
mod substitute;
mod value;

pub use predicates::prelude::{Predicate, predicate};

pub use crate::{
    call::{Call, MemberId, MemberKind},
    call_results::{CallResults, ReturnValue},
    call_stack::CallStack,
    config::Config,
    diagnostics::{DescribingThrower, ReceivedCallNotFoundThrower},
    error::{Error, NotReceived, Result},
    events::{EventHandler, EventHandlers},
    matcher::ArgMatcher,
    received_calls::{Quantity, ReceivedCalls},
    result_setter::ResultSetter,
    route::{
        CallHandler,
        CheckReceivedHandler,
        Outcome,
        Route,
        RouteAction,
        RouteKind,
        Router
    },
    specification::{CallSpecification, CallSpecificationFactory, MatchArgs},
    state::SubstituteState,
    substitute::Substitute,
    value::{ReturnType, Value}
};
