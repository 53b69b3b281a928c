// vim: tw=80
use std::{
    fmt,
    rc::Rc
};

use crate::{Call, CallSpecification, MemberId, Quantity};

/// Everything known about a failed verification.
#[derive(Debug)]
pub struct NotReceived {
    /// The pattern that was verified
    pub specification: CallSpecification,
    /// How many matching calls were expected
    pub quantity: Quantity,
    /// Every received call to the same member, regardless of arguments
    pub related: Vec<Rc<Call>>,
    pub(crate) message: String
}

impl NotReceived {
    pub fn new(specification: CallSpecification,
               quantity: Quantity,
               related: Vec<Rc<Call>>,
               message: String) -> Self
    {
        NotReceived{specification, quantity, related, message}
    }

    /// Received calls that match the verified pattern.
    pub fn matching(&self) -> Vec<Rc<Call>> {
        self.related.iter()
            .filter(|c| self.specification.matches(c))
            .cloned()
            .collect()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for NotReceived {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors reported by a [`Substitute`](crate::Substitute).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not find a call to return from.  Make sure a call was made \
             to the substitute before configuring its result")]
    NoLastCall,
    #[error("{0}")]
    CallNotReceived(Box<NotReceived>),
    #[error("{member} has no configured result and {type_name} has no \
             default value")]
    NoDefaultValue {
        member: MemberId,
        type_name: &'static str
    },
    #[error("Can not return a value of type {actual} from {member}, which \
             returns {expected}")]
    ReturnTypeMismatch {
        member: MemberId,
        expected: &'static str,
        actual: &'static str
    },
    #[error("Expected a value of type {expected} but the substitute returned \
             {actual}")]
    OutcomeTypeMismatch {
        expected: &'static str,
        actual: &'static str
    },
    #[error("The call must be forwarded to the real implementation")]
    CalledBase,
    #[error("Can not raise {event}: a handler takes {expected} arguments but \
             {actual} were supplied")]
    CannotCreateEventArgs {
        event: String,
        expected: usize,
        actual: usize
    },
    #[error("The return function of {member} was called again while it was \
             still running")]
    ReentrantReturnFunction {
        member: MemberId
    },
    #[error("The call was handled, but produced no value to return")]
    NoValue,
    #[error("No handler decided the outcome of {member}")]
    UnhandledCall {
        member: MemberId
    },
}

pub type Result<T> = std::result::Result<T, Error>;
