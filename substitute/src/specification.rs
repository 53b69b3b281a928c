// vim: tw=80
//! Patterns describing which calls are considered to match.

use std::{
    fmt,
    rc::Rc
};

use crate::{
    ArgMatcher,
    Call,
    MemberId,
    MemberKind,
    call::fmt_invocation
};

/// Whether a [`CallSpecification`] cares about arguments.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MatchArgs {
    /// Every argument must satisfy the matcher derived from the call
    #[default]
    AsSpecifiedInCall,
    /// Any arguments match, as long as the member is the same
    Any,
}

/// A pattern of calls: a member plus, optionally, one matcher per argument.
#[derive(Clone, Debug)]
pub struct CallSpecification {
    member: MemberId,
    match_args: MatchArgs,
    matchers: Vec<Rc<ArgMatcher>>
}

impl CallSpecification {
    /// A specification matching every call to `member`.
    pub fn any_args(member: MemberId) -> Self {
        CallSpecification {
            member,
            match_args: MatchArgs::Any,
            matchers: Vec::new()
        }
    }

    /// A specification matching calls to `member` whose arguments satisfy
    /// `matchers`, position by position.
    pub fn with_matchers(member: MemberId, matchers: Vec<Rc<ArgMatcher>>)
        -> Self
    {
        CallSpecification {
            member,
            match_args: MatchArgs::AsSpecifiedInCall,
            matchers
        }
    }

    pub fn member(&self) -> &MemberId {
        &self.member
    }

    pub fn match_args(&self) -> MatchArgs {
        self.match_args
    }

    pub fn matchers(&self) -> &[Rc<ArgMatcher>] {
        &self.matchers
    }

    /// Does `call` fit this pattern?
    ///
    /// # Panics
    ///
    /// If the call has a different number of arguments than this
    /// specification has matchers.  Calls to one member always have the same
    /// arity, so this indicates a broken interception boundary.
    pub fn matches(&self, call: &Call) -> bool {
        if *call.member() != self.member {
            return false;
        }
        match self.match_args {
            MatchArgs::Any => true,
            MatchArgs::AsSpecifiedInCall => {
                assert_eq!(self.matchers.len(), call.arity(),
                    "Call to {} has {} arguments but its specification has {}",
                    self.member, call.arity(), self.matchers.len());
                self.matchers.iter()
                    .zip(call.args())
                    .all(|(m, a)| m.matches(a.as_ref()))
            }
        }
    }

    /// Render `call`, marking each argument this specification rejects with
    /// `*`.  Only meaningful for calls to the same member.
    pub fn describe_non_matching(&self, call: &Call) -> String {
        fmt_invocation(call.member(), call.arity(), |i| {
            let s = call.fmt_arg(i);
            match self.matchers.get(i) {
                Some(m) if !m.matches(call.args()[i].as_ref()) =>
                    format!("*{}*", s),
                _ => s
            }
        })
    }

    /// Explanations from matchers that reject arguments of `call`, one per
    /// rejected position that has something to say.
    pub fn explain_non_matching(&self, call: &Call) -> Vec<String> {
        self.matchers.iter()
            .zip(call.args())
            .enumerate()
            .filter_map(|(i, (m, a))| {
                m.explain_mismatch(a.as_ref())
                    .map(|e| format!("argument {}: {}", i, e))
            }).collect()
    }
}

impl fmt::Display for CallSpecification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self.match_args {
            MatchArgs::Any => {
                let n = match self.member.kind() {
                    MemberKind::Getter => 0,
                    _ => 1
                };
                fmt_invocation(&self.member, n, |_| "..".into())
            },
            MatchArgs::AsSpecifiedInCall =>
                fmt_invocation(&self.member, self.matchers.len(),
                               |i| self.matchers[i].to_string())
        };
        f.write_str(&s)
    }
}

/// Builds [`CallSpecification`]s out of concrete calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallSpecificationFactory;

impl CallSpecificationFactory {
    pub fn new() -> Self {
        Self
    }

    /// Derive a specification from `call`.
    ///
    /// With [`MatchArgs::AsSpecifiedInCall`], positions that were given an
    /// explicit matcher keep it; every other position must equal the literal
    /// argument.
    pub fn create_from(&self, call: &Call, match_args: MatchArgs)
        -> CallSpecification
    {
        let member = call.member().clone();
        match match_args {
            MatchArgs::Any => CallSpecification::any_args(member),
            MatchArgs::AsSpecifiedInCall => {
                let matchers = call.args().iter()
                    .enumerate()
                    .map(|(i, a)| match call.arg_matcher(i) {
                        Some(m) => m.clone(),
                        None => Rc::new(ArgMatcher::eq_value(a.as_ref()))
                    }).collect();
                CallSpecification::with_matchers(member, matchers)
            }
        }
    }
}
