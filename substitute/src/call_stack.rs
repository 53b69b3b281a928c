// vim: tw=80
//! Calls waiting to be turned into stubbing targets.

use std::rc::Rc;

use crate::{Call, Error, Result};

/// LIFO of intercepted calls.
///
/// Every call is pushed as it enters the substitute.  When test code then
/// configures a result, the stubbing pathway pops "the last call made" to find
/// out what it is configuring.
#[derive(Debug, Default)]
pub struct CallStack(Vec<Rc<Call>>);

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call: Rc<Call>) {
        self.0.push(call);
    }

    /// Remove and return the most recently pushed call.
    pub fn pop(&mut self) -> Result<Rc<Call>> {
        self.0.pop().ok_or(Error::NoLastCall)
    }

    /// The most recently pushed call, left in place.
    pub fn last(&self) -> Result<Rc<Call>> {
        self.0.last().cloned().ok_or(Error::NoLastCall)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
