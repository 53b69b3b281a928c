// vim: tw=80
//! Event subscriptions.

use std::{
    collections::HashMap,
    fmt,
    rc::Rc
};

use crate::{Error, Result, Value};

/// A callback subscribed to an event of a substitute.
///
/// It is passed as the sole argument of a call to a
/// [`Subscribe`](crate::MemberKind::Subscribe) or
/// [`Unsubscribe`](crate::MemberKind::Unsubscribe) member.  Two handlers are
/// equal only if they are clones of each other.
#[derive(Clone)]
pub struct EventHandler {
    arity: usize,
    f: Rc<dyn Fn(&[Box<dyn Value>])>
}

impl EventHandler {
    /// A handler that expects `arity` event arguments.
    pub fn new<F>(arity: usize, f: F) -> Self
        where F: Fn(&[Box<dyn Value>]) + 'static
    {
        EventHandler{arity, f: Rc::new(f)}
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    fn invoke(&self, args: &[Box<dyn Value>]) {
        (self.f)(args)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.f) as *const ())
    }
}

/// Current subscribers of each event, in subscription order.
#[derive(Debug, Default)]
pub struct EventHandlers(HashMap<String, Vec<EventHandler>>);

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, event: &str, handler: EventHandler) {
        self.0.entry(event.to_owned()).or_default().push(handler);
    }

    /// Remove the most recent subscription of `handler`.
    pub fn remove(&mut self, event: &str, handler: &EventHandler) {
        if let Some(v) = self.0.get_mut(event) {
            if let Some(i) = v.iter().rposition(|h| h == handler) {
                v.remove(i);
            }
        }
    }

    pub fn handlers(&self, event: &str) -> Vec<EventHandler> {
        self.0.get(event).cloned().unwrap_or_default()
    }
}

/// Invoke every handler in `handlers` with `args`.
///
/// Arity is checked for all handlers before any of them runs.
pub(crate) fn raise(event: &str,
                    handlers: &[EventHandler],
                    args: &[Box<dyn Value>]) -> Result<()>
{
    if let Some(h) = handlers.iter().find(|h| h.arity() != args.len()) {
        return Err(Error::CannotCreateEventArgs {
            event: event.to_owned(),
            expected: h.arity(),
            actual: args.len()
        });
    }
    for h in handlers {
        h.invoke(args);
    }
    Ok(())
}
