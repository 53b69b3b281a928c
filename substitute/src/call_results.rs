// vim: tw=80
//! Configured results, and where they are stored.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt,
    rc::Rc
};

use crate::{Call, CallSpecification, Error, Result, Value};

/// What a stubbed call should return.
pub enum ReturnValue {
    /// The same value every time.  It is cloned for each call.
    Const(Box<dyn Value>),
    /// Each call returns the next value.  Once exhausted, the last value
    /// repeats.
    InTurn {
        values: Vec<Box<dyn Value>>,
        next: Cell<usize>
    },
    /// Compute the value from the call.
    Func(RefCell<Box<dyn FnMut(&Call) -> Box<dyn Value>>>),
}

impl ReturnValue {
    pub fn value<T: Value>(v: T) -> Self {
        ReturnValue::Const(Box::new(v))
    }

    /// # Panics
    ///
    /// If `values` is empty.
    pub fn in_turn<T, I>(values: I) -> Self
        where T: Value, I: IntoIterator<Item=T>
    {
        let values = values.into_iter()
            .map(|v| Box::new(v) as Box<dyn Value>)
            .collect::<Vec<_>>();
        assert!(!values.is_empty(), "Must supply at least one return value");
        ReturnValue::InTurn{values, next: Cell::new(0)}
    }

    /// Supply a closure that computes the return value from the call.
    pub fn func<T, F>(mut f: F) -> Self
        where T: Value, F: FnMut(&Call) -> T + 'static
    {
        let f: Box<dyn FnMut(&Call) -> Box<dyn Value>> =
            Box::new(move |call: &Call| Box::new(f(call)) as Box<dyn Value>);
        ReturnValue::Func(RefCell::new(f))
    }

    /// Produce the value to hand back for `call`, advancing to the next value
    /// of an [`InTurn`](#variant.InTurn) result.
    ///
    /// Fails with [`Error::ReentrantReturnFunction`] if a
    /// [`Func`](#variant.Func) result is asked for a value while it is already
    /// computing one.
    pub fn produce(&self, call: &Call) -> Result<Box<dyn Value>> {
        self.value_for(call, true)
    }

    /// Like [`produce`](#method.produce), but an `InTurn` result stays where
    /// it is.  A `Func` result still runs.
    pub fn peek(&self, call: &Call) -> Result<Box<dyn Value>> {
        self.value_for(call, false)
    }

    fn value_for(&self, call: &Call, advance: bool) -> Result<Box<dyn Value>> {
        match self {
            ReturnValue::Const(v) => Ok(v.clone_value()),
            ReturnValue::InTurn{values, next} => {
                let i = next.get();
                if advance && i + 1 < values.len() {
                    next.set(i + 1);
                }
                Ok(values[i].clone_value())
            },
            ReturnValue::Func(f) => {
                let mut guard = f.try_borrow_mut()
                    .map_err(|_| Error::ReentrantReturnFunction {
                        member: call.member().clone()
                    })?;
                Ok((*guard)(call))
            }
        }
    }

    /// Values known before any call is made.
    pub fn fixed_values(&self) -> Vec<&dyn Value> {
        match self {
            ReturnValue::Const(v) => vec![v.as_ref()],
            ReturnValue::InTurn{values, ..} =>
                values.iter().map(|v| &**v).collect(),
            ReturnValue::Func(_) => Vec::new()
        }
    }
}

impl fmt::Debug for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReturnValue::Const(v) => f.debug_tuple("Const").field(v).finish(),
            ReturnValue::InTurn{values, next} => f.debug_struct("InTurn")
                .field("values", values)
                .field("next", &next.get())
                .finish(),
            ReturnValue::Func(_) => f.write_str("Func")
        }
    }
}

/// Configured results, newest first.
///
/// Configuring a call that already has a result doesn't remove the old one;
/// the old one just becomes unreachable.
#[derive(Debug, Default)]
pub struct CallResults(VecDeque<(CallSpecification, Rc<ReturnValue>)>);

impl CallResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` ahead of every existing result.
    pub fn set_result(&mut self, spec: CallSpecification, result: ReturnValue) {
        self.0.push_front((spec, Rc::new(result)));
    }

    /// Find the most recently configured result whose specification matches
    /// `call`.
    pub fn try_get_result(&self, call: &Call) -> Option<Rc<ReturnValue>> {
        self.0.iter()
            .find(|(spec, _)| spec.matches(call))
            .map(|(_, result)| result.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
