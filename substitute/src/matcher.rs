// vim: tw=80
//! Per-argument matchers.

use predicates::reflection::{Case, PredicateReflection};
use predicates_tree::CaseTreeExt;
use std::{
    any::TypeId,
    fmt::{self, Display},
    marker::PhantomData
};

use crate::{Predicate, Value, predicate};

/// Adapts a `Predicate<T>` to evaluate type-erased arguments.  Arguments of
/// any other type are rejected.
struct TypedPredicate<P, T> {
    inner: P,
    _t: PhantomData<fn(&T)>
}

impl<P, T> Display for TypedPredicate<P, T>
    where P: Predicate<T>, T: Value
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<P, T> PredicateReflection for TypedPredicate<P, T>
    where P: Predicate<T>, T: Value
{}

impl<P, T> Predicate<dyn Value> for TypedPredicate<P, T>
    where P: Predicate<T>, T: Value
{
    fn eval(&self, variable: &dyn Value) -> bool {
        match variable.downcast_ref::<T>() {
            Ok(v) => self.inner.eval(v),
            Err(_) => false
        }
    }

    fn find_case<'a>(&'a self, expected: bool, variable: &dyn Value)
        -> Option<Case<'a>>
    {
        match variable.downcast_ref::<T>() {
            Ok(v) => self.inner.find_case(expected, v),
            Err(_) if !expected => Some(Case::new(Some(self), false)),
            Err(_) => None
        }
    }
}

/// Decides whether a single argument is acceptable.
///
/// Matchers are either synthesized from the literal arguments of a call, or
/// registered explicitly for an argument position with
/// [`Call::arg_matching`](crate::Call::arg_matching).
pub enum ArgMatcher {
    /// Equal to a specific value
    Eq(Box<dyn Value>),
    /// Any value of a specific type
    Any {
        type_id: TypeId,
        type_name: &'static str
    },
    /// Any value of the predicate's type that satisfies the predicate
    Pred(Box<dyn Predicate<dyn Value>>),
}

impl ArgMatcher {
    /// Match arguments equal to `v`.
    pub fn eq<T: Value>(v: T) -> Self {
        ArgMatcher::Eq(Box::new(v))
    }

    pub(crate) fn eq_value(v: &dyn Value) -> Self {
        ArgMatcher::Eq(v.clone_value())
    }

    /// Match any argument of type `T`.
    pub fn any<T: Value>() -> Self {
        ArgMatcher::Any {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>()
        }
    }

    /// Match arguments of type `T` that satisfy `p`.
    ///
    /// # Examples
    /// ```
    /// # use substitute::*;
    /// let m = ArgMatcher::with::<u32, _>(predicate::gt(5));
    /// assert!(m.matches(&6u32));
    /// assert!(!m.matches(&5u32));
    /// ```
    pub fn with<T, P>(p: P) -> Self
        where T: Value, P: Predicate<T> + 'static
    {
        ArgMatcher::Pred(Box::new(TypedPredicate{inner: p, _t: PhantomData}))
    }

    /// Match arguments of type `T` for which `f` returns true.
    ///
    /// This is equivalent to calling [`with`](#method.with) with a function
    /// argument, like `with(predicate::function(f))`.
    pub fn func<T, F>(f: F) -> Self
        where T: Value, F: Fn(&T) -> bool + 'static
    {
        Self::with::<T, _>(predicate::function(f))
    }

    pub fn matches(&self, arg: &dyn Value) -> bool {
        match self {
            ArgMatcher::Eq(v) => v.eq_value(arg),
            ArgMatcher::Any{type_id, ..} => arg.value_type_id() == *type_id,
            ArgMatcher::Pred(p) => p.eval(arg)
        }
    }

    /// Explain why `arg` was rejected, when there is more to say than the
    /// matcher's own description.
    pub fn explain_mismatch(&self, arg: &dyn Value) -> Option<String> {
        match self {
            ArgMatcher::Pred(p) => p.find_case(false, arg)
                .map(|case| case.tree().to_string()),
            ArgMatcher::Any{type_name, ..} if !self.matches(arg) =>
                Some(format!("expected {}, got {}", type_name,
                             arg.value_type_name())),
            _ => None
        }
    }
}

impl Display for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgMatcher::Eq(v) => write!(f, "{:?}", v),
            ArgMatcher::Any{type_name, ..} => write!(f, "any {}", type_name),
            ArgMatcher::Pred(p) => write!(f, "{}", p)
        }
    }
}

impl fmt::Debug for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgMatcher::Eq(v) => f.debug_tuple("Eq").field(v).finish(),
            ArgMatcher::Any{type_name, ..} =>
                f.debug_struct("Any").field("type_name", type_name).finish(),
            ArgMatcher::Pred(p) =>
                f.debug_tuple("Pred").field(&p.to_string()).finish()
        }
    }
}
