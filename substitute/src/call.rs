// vim: tw=80
//! Intercepted invocations and the identity of the members they target.

use std::{
    borrow::Cow,
    fmt,
    rc::Rc
};

use crate::{ArgMatcher, ReturnType, Value};

/// What kind of member a [`MemberId`] refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MemberKind {
    Method,
    /// Read accessor of a property or indexer
    Getter,
    /// Write accessor of a property or indexer.  The assigned value is the
    /// last argument.
    Setter,
    /// Adds an [`EventHandler`](crate::EventHandler) to an event
    Subscribe,
    /// Removes an [`EventHandler`](crate::EventHandler) from an event
    Unsubscribe,
    /// The event itself, used when raising it
    Event,
}

/// Stable identity of a substituted member.
///
/// The core never inspects it beyond equality, so the interception boundary
/// is free to put a full signature in `name` to tell overloads apart.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MemberId {
    name: Cow<'static, str>,
    kind: MemberKind
}

impl MemberId {
    pub fn new<S>(name: S, kind: MemberKind) -> Self
        where S: Into<Cow<'static, str>>
    {
        MemberId{name: name.into(), kind}
    }

    pub fn method<S: Into<Cow<'static, str>>>(name: S) -> Self {
        Self::new(name, MemberKind::Method)
    }

    pub fn getter<S: Into<Cow<'static, str>>>(name: S) -> Self {
        Self::new(name, MemberKind::Getter)
    }

    pub fn setter<S: Into<Cow<'static, str>>>(name: S) -> Self {
        Self::new(name, MemberKind::Setter)
    }

    pub fn subscribe<S: Into<Cow<'static, str>>>(event: S) -> Self {
        Self::new(event, MemberKind::Subscribe)
    }

    pub fn unsubscribe<S: Into<Cow<'static, str>>>(event: S) -> Self {
        Self::new(event, MemberKind::Unsubscribe)
    }

    pub fn event<S: Into<Cow<'static, str>>>(event: S) -> Self {
        Self::new(event, MemberKind::Event)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// The getter that reads what this setter writes.
    pub fn matching_getter(&self) -> Option<MemberId> {
        match self.kind {
            MemberKind::Setter => Some(MemberId{
                name: self.name.clone(),
                kind: MemberKind::Getter
            }),
            _ => None
        }
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Stand-in argument for positions that carry an explicit matcher.
#[derive(Clone, Debug, PartialEq)]
struct ArgPlaceholder;

/// One intercepted invocation.
///
/// A `Call` is assembled by the interception boundary and is immutable once
/// it has been handed to a [`Substitute`](crate::Substitute).
///
/// # Examples
/// ```
/// # use substitute::*;
/// let call = Call::new(MemberId::method("add"), ReturnType::of::<i32>())
///     .arg(1i32)
///     .arg(2i32);
/// assert_eq!(call.to_string(), "add(1, 2)");
/// ```
#[derive(Debug)]
pub struct Call {
    member: MemberId,
    args: Vec<Box<dyn Value>>,
    matchers: Vec<Option<Rc<ArgMatcher>>>,
    return_type: ReturnType
}

impl Call {
    pub fn new(member: MemberId, return_type: ReturnType) -> Self {
        Call {
            member,
            args: Vec::new(),
            matchers: Vec::new(),
            return_type
        }
    }

    /// Append a literal argument.
    pub fn arg<T: Value>(self, v: T) -> Self {
        self.boxed_arg(Box::new(v))
    }

    /// Append an already boxed literal argument.
    pub fn boxed_arg(mut self, v: Box<dyn Value>) -> Self {
        self.args.push(v);
        self.matchers.push(None);
        self
    }

    /// Append an argument position that was given an explicit matcher instead
    /// of a literal value, like `calc.add(Arg::any::<i32>(), 2)`.
    pub fn arg_matching(mut self, m: ArgMatcher) -> Self {
        self.args.push(Box::new(ArgPlaceholder));
        self.matchers.push(Some(Rc::new(m)));
        self
    }

    pub fn member(&self) -> &MemberId {
        &self.member
    }

    pub fn args(&self) -> &[Box<dyn Value>] {
        &self.args
    }

    /// Downcast the argument at position `i`.
    pub fn arg_as<T: Value>(&self, i: usize) -> Option<&T> {
        self.args.get(i).and_then(|a| a.downcast_ref::<T>().ok())
    }

    /// The matcher registered for position `i`, if any.
    pub fn arg_matcher(&self, i: usize) -> Option<&Rc<ArgMatcher>> {
        self.matchers.get(i).and_then(Option::as_ref)
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn return_type(&self) -> &ReturnType {
        &self.return_type
    }

    /// Format the argument at `i`, preferring its matcher's description.
    pub(crate) fn fmt_arg(&self, i: usize) -> String {
        match self.arg_matcher(i) {
            Some(m) => m.to_string(),
            None => format!("{:?}", self.args[i])
        }
    }
}

/// Render a member invocation, decorating each argument with `deco`.
pub(crate) fn fmt_invocation<F>(member: &MemberId, nargs: usize, mut deco: F)
    -> String
    where F: FnMut(usize) -> String
{
    let args = (0..nargs).map(&mut deco).collect::<Vec<_>>();
    match member.kind() {
        MemberKind::Method | MemberKind::Event =>
            format!("{}({})", member, args.join(", ")),
        MemberKind::Getter if args.is_empty() => format!("{}", member),
        MemberKind::Getter => format!("{}[{}]", member, args.join(", ")),
        MemberKind::Setter => {
            let (value, index) = args.split_last()
                .map(|(v, i)| (v.clone(), i))
                .unwrap_or_default();
            if index.is_empty() {
                format!("{} = {}", member, value)
            } else {
                format!("{}[{}] = {}", member, index.join(", "), value)
            }
        },
        MemberKind::Subscribe => format!("{} += {}", member, args.join(", ")),
        MemberKind::Unsubscribe =>
            format!("{} -= {}", member, args.join(", ")),
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = fmt_invocation(&self.member, self.arity(), |i| self.fmt_arg(i));
        f.write_str(&s)
    }
}
