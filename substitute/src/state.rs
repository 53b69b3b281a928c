// vim: tw=80
use std::cell::RefCell;

use crate::{
    CallResults,
    CallSpecificationFactory,
    CallStack,
    Config,
    DescribingThrower,
    EventHandlers,
    ReceivedCallNotFoundThrower,
    ReceivedCalls
};

/// Everything a substitute remembers, shared by all of its handlers.
///
/// Each substitute owns exactly one `SubstituteState`.  The stores use
/// `RefCell`, so a state must not be shared between threads.
pub struct SubstituteState {
    call_stack: RefCell<CallStack>,
    call_results: RefCell<CallResults>,
    received_calls: RefCell<ReceivedCalls>,
    event_handlers: RefCell<EventHandlers>,
    spec_factory: CallSpecificationFactory,
    thrower: Box<dyn ReceivedCallNotFoundThrower>,
    config: Config
}

impl SubstituteState {
    pub fn new(config: Config) -> Self {
        SubstituteState {
            call_stack: RefCell::default(),
            call_results: RefCell::default(),
            received_calls: RefCell::default(),
            event_handlers: RefCell::default(),
            spec_factory: CallSpecificationFactory::new(),
            thrower: Box::new(DescribingThrower),
            config
        }
    }

    pub(crate) fn set_thrower(&mut self,
                              thrower: Box<dyn ReceivedCallNotFoundThrower>)
    {
        self.thrower = thrower;
    }

    pub fn call_stack(&self) -> &RefCell<CallStack> {
        &self.call_stack
    }

    pub fn call_results(&self) -> &RefCell<CallResults> {
        &self.call_results
    }

    pub fn received_calls(&self) -> &RefCell<ReceivedCalls> {
        &self.received_calls
    }

    pub fn event_handlers(&self) -> &RefCell<EventHandlers> {
        &self.event_handlers
    }

    pub fn spec_factory(&self) -> &CallSpecificationFactory {
        &self.spec_factory
    }

    pub fn thrower(&self) -> &dyn ReceivedCallNotFoundThrower {
        self.thrower.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for SubstituteState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
