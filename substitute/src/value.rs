// vim: tw=80
//! Dynamically typed argument and return values.
//!
//! The routing core never knows the concrete types flowing through a
//! substitute.  Arguments and return values travel as `Box<dyn Value>` and are
//! downcast back to their concrete types at the interception boundary.

use cfg_if::cfg_if;
use downcast::*;
use std::{
    any::TypeId,
    fmt,
    marker::PhantomData
};

/// A value that can be passed to, or returned from, a substituted member.
///
/// Implemented automatically for every `'static` type that is `Clone`,
/// `PartialEq` and `Debug`.
pub trait Value: Any + fmt::Debug {
    /// Clone this value into a new box.
    fn clone_value(&self) -> Box<dyn Value>;

    /// Compare with a value of possibly different type.  Values of different
    /// types are never equal.
    fn eq_value(&self, other: &dyn Value) -> bool;

    fn value_type_id(&self) -> TypeId;

    fn value_type_name(&self) -> &'static str;
}
downcast!(dyn Value);

impl<T> Value for T
    where T: Clone + PartialEq + fmt::Debug + 'static
{
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn eq_value(&self, other: &dyn Value) -> bool {
        match other.downcast_ref::<T>() {
            Ok(o) => self == o,
            Err(_) => false
        }
    }

    fn value_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn value_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

fn boxed_default<T: Value + Default>() -> Box<dyn Value> {
    Box::new(T::default())
}

#[doc(hidden)]
pub trait ReturnDefault {
    fn default_fn() -> Option<fn() -> Box<dyn Value>>;
}

#[derive(Default)]
#[doc(hidden)]
pub struct DefaultReturner<O: 'static>(PhantomData<O>);

cfg_if! {
    if #[cfg(feature = "nightly")] {
        impl<O: Value> ReturnDefault for DefaultReturner<O> {
            default fn default_fn() -> Option<fn() -> Box<dyn Value>> {
                None
            }
        }

        impl<O: Value + Default> ReturnDefault for DefaultReturner<O> {
            fn default_fn() -> Option<fn() -> Box<dyn Value>> {
                Some(boxed_default::<O>)
            }
        }
    } else {
        impl<O: Value> ReturnDefault for DefaultReturner<O> {
            fn default_fn() -> Option<fn() -> Box<dyn Value>> {
                // Detecting `Default` requires specialization
                None
            }
        }
    }
}

/// The declared return type of a substituted member.
///
/// Besides identifying the type, it knows how to build the type's default
/// value, which is what a substitute returns when nothing else was configured.
#[derive(Clone, Copy, Debug)]
pub struct ReturnType {
    type_id: TypeId,
    type_name: &'static str,
    default: Option<fn() -> Box<dyn Value>>
}

impl ReturnType {
    /// A return type whose default value is `T::default()`.
    pub fn of<T: Value + Default>() -> Self {
        ReturnType {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            default: Some(boxed_default::<T>)
        }
    }

    /// A return type with no default value.  Calls that reach the end of the
    /// pipeline without a configured result will fail.
    pub fn without_default<T: Value>() -> Self {
        ReturnType {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            default: None
        }
    }

    /// Like [`of`](#method.of) when `T: Default`, and like
    /// [`without_default`](#method.without_default) otherwise.
    ///
    /// Telling the two apart requires the **nightly** feature.  Without it,
    /// the returned type never has a default.
    pub fn inferred<T: Value>() -> Self {
        ReturnType {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            default: DefaultReturner::<T>::default_fn()
        }
    }

    /// Return type of members that return nothing.
    pub fn unit() -> Self {
        Self::of::<()>()
    }

    /// The return type of an existing value, with no known default.
    pub(crate) fn of_value(v: &dyn Value) -> Self {
        ReturnType {
            type_id: v.value_type_id(),
            type_name: v.value_type_name(),
            default: None
        }
    }

    /// Build the default value, if this type has one.
    pub fn default_value(&self) -> Option<Box<dyn Value>> {
        self.default.map(|f| f())
    }

    /// Can a value of this type be returned from a member declared to return
    /// `self`?
    pub fn accepts(&self, v: &dyn Value) -> bool {
        self.type_id == v.value_type_id()
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for ReturnType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ReturnType {}
