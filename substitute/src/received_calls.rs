// vim: tw=80
//! The history of calls a substitute has received.

use std::{
    fmt,
    ops::Range,
    rc::Rc
};

use crate::{Call, CallSpecification};

/// How many matching calls a verification expects.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Quantity {
    range: Range<usize>
}

impl Quantity {
    /// One or more calls.
    pub fn at_least_once() -> Self {
        Self::at_least(1)
    }

    pub fn at_least(n: usize) -> Self {
        Quantity{range: n..usize::MAX}
    }

    /// Exactly `n` calls.  `usize::MAX` calls can't be counted, so
    /// `exactly(usize::MAX)` matches nothing.
    pub fn exactly(n: usize) -> Self {
        Quantity{range: n..n.saturating_add(1)}
    }

    pub fn none() -> Self {
        Self::exactly(0)
    }

    /// Any number of calls within `range`.
    pub fn range(range: Range<usize>) -> Self {
        Quantity{range}
    }

    /// Is `count` matching calls acceptable?
    pub fn matches(&self, count: usize) -> bool {
        self.range.contains(&count)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::at_least_once()
    }
}

fn calls(n: usize) -> &'static str {
    if n == 1 { "call" } else { "calls" }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Range{start, end} = self.range;
        if end == usize::MAX {
            if start == 1 {
                f.write_str("a call")
            } else {
                write!(f, "at least {} {}", start, calls(start))
            }
        } else if end == start + 1 {
            if start == 0 {
                f.write_str("no calls")
            } else {
                write!(f, "exactly {} {}", start, calls(start))
            }
        } else {
            write!(f, "between {} and {} calls", start, end.saturating_sub(1))
        }
    }
}

#[derive(Debug)]
struct Received {
    call: Rc<Call>,
    /// Was this call used to declare a stub, rather than made by the code
    /// under test?
    specifying: bool
}

/// Append-only log of every call routed through a substitute.
///
/// Calls that were subsequently used to configure a result stay in the log,
/// but are no longer considered by [`find_matching`](#method.find_matching).
#[derive(Debug, Default)]
pub struct ReceivedCalls(Vec<Received>);

impl ReceivedCalls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, call: Rc<Call>) {
        self.0.push(Received{call, specifying: false});
    }

    /// Exclude `call` from verification because it declared a stub.  Returns
    /// false if it was never recorded.
    pub fn mark_as_specifying(&mut self, call: &Rc<Call>) -> bool {
        match self.0.iter_mut().rev().find(|r| Rc::ptr_eq(&r.call, call)) {
            Some(r) => {
                r.specifying = true;
                true
            },
            None => false
        }
    }

    /// All received calls matching `spec`, oldest first.
    pub fn find_matching(&self, spec: &CallSpecification) -> Vec<Rc<Call>> {
        self.0.iter()
            .filter(|r| !r.specifying && spec.matches(&r.call))
            .map(|r| r.call.clone())
            .collect()
    }

    /// Every recorded call, including those that declared stubs.
    pub fn all(&self) -> Vec<Rc<Call>> {
        self.0.iter().map(|r| r.call.clone()).collect()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
