// vim: tw=80
//! Reporting of failed verifications.

use std::{
    fmt::Write,
    rc::Rc
};

use crate::{
    Call,
    CallSpecification,
    Error,
    NotReceived,
    Quantity
};

/// Turns a failed verification into an [`Error`].
///
/// `related` holds every call the substitute received for the verified
/// member, regardless of arguments, in the order they were received.
pub trait ReceivedCallNotFoundThrower {
    fn throw(&self,
             spec: &CallSpecification,
             quantity: &Quantity,
             related: &[Rc<Call>]) -> Error;
}

/// The default [`ReceivedCallNotFoundThrower`].  It explains which calls were
/// expected, which were received, and which arguments didn't match.
///
/// ```text
/// Expected to receive a call matching:
///     add(1, 2)
/// Actually received no matching calls.
/// Received 2 non-matching calls (non-matching arguments indicated with '*'
/// characters):
///     add(*3*, *4*)
///     add(1, *3*)
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DescribingThrower;

impl DescribingThrower {
    pub fn describe(spec: &CallSpecification,
                    quantity: &Quantity,
                    related: &[Rc<Call>]) -> String
    {
        let (matching, non_matching): (Vec<_>, Vec<_>) = related.iter()
            .partition(|c| spec.matches(c));
        let mut s = String::new();
        writeln!(s, "Expected to receive {} matching:", quantity).unwrap();
        writeln!(s, "    {}", spec).unwrap();
        if matching.is_empty() {
            s.push_str("Actually received no matching calls.");
        } else {
            write!(s, "Actually received {} matching {}:", matching.len(),
                   calls(matching.len())).unwrap();
            for c in matching.iter() {
                write!(s, "\n    {}", c).unwrap();
            }
        }
        if !non_matching.is_empty() {
            write!(s, "\nReceived {} non-matching {} (non-matching arguments \
                      indicated with '*' characters):",
                   non_matching.len(), calls(non_matching.len())).unwrap();
            for c in non_matching.iter() {
                write!(s, "\n    {}", spec.describe_non_matching(c)).unwrap();
                for e in spec.explain_non_matching(c) {
                    for line in e.lines() {
                        write!(s, "\n        {}", line).unwrap();
                    }
                }
            }
        }
        s
    }
}

fn calls(n: usize) -> &'static str {
    if n == 1 { "call" } else { "calls" }
}

impl ReceivedCallNotFoundThrower for DescribingThrower {
    fn throw(&self,
             spec: &CallSpecification,
             quantity: &Quantity,
             related: &[Rc<Call>]) -> Error
    {
        let message = Self::describe(spec, quantity, related);
        Error::CallNotReceived(Box::new(NotReceived::new(
            spec.clone(), quantity.clone(), related.to_vec(), message)))
    }
}
