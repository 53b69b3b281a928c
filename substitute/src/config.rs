// vim: tw=80
use std::borrow::Cow;

/// Behaviour switches for a [`Substitute`](crate::Substitute).
#[derive(Clone, Debug)]
pub struct Config {
    /// Identifies the substitute in log output
    pub name: Cow<'static, str>,
    /// Forward calls with no configured result to the real implementation
    /// instead of returning a default value.
    pub call_base: bool,
    /// Assigning a property makes its getter return the assigned value.
    pub auto_property_values: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name<S: Into<Cow<'static, str>>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn call_base(mut self, call_base: bool) -> Self {
        self.call_base = call_base;
        self
    }

    pub fn auto_property_values(mut self, auto: bool) -> Self {
        self.auto_property_values = auto;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            name: Cow::Borrowed("substitute"),
            call_base: false,
            auto_property_values: true
        }
    }
}
