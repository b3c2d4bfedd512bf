//! Invocation argument slots and value routing.
//!
//! Decoded part values land in an argument array owned by the dispatcher.
//! Each cell is a [`Slot`]: either a plain input value or a caller-supplied
//! [`Holder`] for an output or in/out parameter. A [`ValueSetter`] is the
//! build-time-resolved strategy that knows which slot a part feeds and
//! whether it writes the slot directly or through the holder's payload.

use std::any::Any;

use crate::binding::{Direction, Parameter};

/// An opaque decoded value produced by the schema binder or an attachment
/// conversion.
pub type Value = Box<dyn Any + Send>;

/// Caller-supplied container for an output or in/out argument.
///
/// The holder's identity is preserved across decoding; only its payload is
/// assigned. An empty payload means the argument has not been produced yet.
#[derive(Default, Debug)]
pub struct Holder {
    /// The holder's payload. `None` until a value is routed into it.
    pub value: Option<Value>,
}

impl Holder {
    /// Create an empty holder, ready to receive an output value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// One cell of the invocation argument array.
#[derive(Debug)]
pub enum Slot {
    /// A plain argument value, absent until decoded.
    Value(Option<Value>),
    /// A holder for an output or in/out argument.
    Holder(Holder),
}

impl Slot {
    /// An empty plain slot.
    #[must_use]
    pub fn empty() -> Self {
        Slot::Value(None)
    }

    /// A slot carrying an empty holder.
    #[must_use]
    pub fn holder() -> Self {
        Slot::Holder(Holder::new())
    }

    /// The value currently visible in this slot: the plain value, or the
    /// holder's payload.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Slot::Value(v) => v.as_ref(),
            Slot::Holder(h) => h.value.as_ref(),
        }
    }

    /// Downcast the slot's visible value to a concrete type.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value().and_then(|v| v.downcast_ref::<T>())
    }
}

/// Build-time-resolved strategy for writing one decoded value into the
/// argument array.
///
/// Setters are immutable and stateless; the argument array handed to
/// [`ValueSetter::put`] is the only data they touch. Slot-kind validity
/// (a holder setter pointing at a holder slot) is established when the
/// decoder tree is built, not re-checked per request.
#[derive(Clone, Debug)]
pub enum ValueSetter {
    /// Replace the value at the slot directly.
    Plain {
        /// Position in the argument array.
        index: usize,
    },
    /// Write into the payload of the holder already present at the slot.
    HolderPayload {
        /// Position in the argument array.
        index: usize,
    },
}

impl ValueSetter {
    /// Setter that assigns the slot directly.
    #[must_use]
    pub fn plain(index: usize) -> Self {
        ValueSetter::Plain { index }
    }

    /// Setter that writes through the holder at the slot.
    #[must_use]
    pub fn holder(index: usize) -> Self {
        ValueSetter::HolderPayload { index }
    }

    /// Resolve the setter for a parameter from its direction: inputs are
    /// assigned directly, output and in/out parameters write through their
    /// holder.
    #[must_use]
    pub fn for_parameter(param: &Parameter) -> Self {
        match param.direction {
            Direction::In => Self::plain(param.index),
            Direction::Out | Direction::InOut => Self::holder(param.index),
        }
    }

    /// Write `value` into the bound slot. `None` clears it.
    pub fn put(&self, value: impl Into<Option<Value>>, args: &mut [Slot]) {
        let value = value.into();
        match self {
            ValueSetter::Plain { index } => args[*index] = Slot::Value(value),
            ValueSetter::HolderPayload { index } => match &mut args[*index] {
                Slot::Holder(holder) => holder.value = value,
                slot @ Slot::Value(_) => {
                    debug_assert!(false, "holder setter bound to a plain slot");
                    *slot = Slot::Value(value);
                }
            },
        }
    }
}

/// Declared shape of an argument for pre-seeding purposes.
///
/// Output-only arguments must hold a type-correct neutral value before the
/// endpoint method runs; this enumerates the shapes that matter for picking
/// one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeutralKind {
    /// `bool`, seeded as `false`.
    Bool,
    /// `char`, seeded as `'\0'`.
    Char,
    /// `i8`, seeded as `0`.
    I8,
    /// `i16`, seeded as `0`.
    I16,
    /// `i32`, seeded as `0`.
    I32,
    /// `i64`, seeded as `0`.
    I64,
    /// `f32`, seeded as `0.0`.
    F32,
    /// `f64`, seeded as `0.0`.
    F64,
    /// Any reference-equivalent type, seeded as absent.
    Reference,
}

/// The neutral value for an argument of the given shape: zero for
/// primitive-equivalent types, absent for reference-equivalent types.
#[must_use]
pub fn neutral_value(kind: NeutralKind) -> Option<Value> {
    match kind {
        NeutralKind::Bool => Some(Box::new(false)),
        NeutralKind::Char => Some(Box::new('\0')),
        NeutralKind::I8 => Some(Box::new(0i8)),
        NeutralKind::I16 => Some(Box::new(0i16)),
        NeutralKind::I32 => Some(Box::new(0i32)),
        NeutralKind::I64 => Some(Box::new(0i64)),
        NeutralKind::F32 => Some(Box::new(0f32)),
        NeutralKind::F64 => Some(Box::new(0f64)),
        NeutralKind::Reference => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{NeutralKind, Slot, Value, ValueSetter, neutral_value};

    #[test]
    fn plain_setter_replaces_slot_value() {
        let mut args = vec![Slot::empty(), Slot::empty()];
        ValueSetter::plain(1).put(Box::new(7i32) as Value, &mut args);
        assert_eq!(args[1].downcast_ref::<i32>(), Some(&7));
        assert!(args[0].value().is_none());
    }

    #[test]
    fn holder_setter_keeps_holder_identity() {
        let mut args = vec![Slot::holder()];
        ValueSetter::holder(0).put(Box::new("out".to_string()) as Value, &mut args);
        let Slot::Holder(holder) = &args[0] else {
            panic!("holder slot was replaced");
        };
        let value = holder.value.as_ref().expect("holder payload not written");
        assert_eq!(
            value.downcast_ref::<String>().map(String::as_str),
            Some("out")
        );
    }

    #[test]
    fn neutral_values_are_zero_for_primitives() {
        let v = neutral_value(NeutralKind::I32).expect("i32 must have a neutral value");
        assert_eq!(v.downcast_ref::<i32>(), Some(&0));
        let v = neutral_value(NeutralKind::Bool).expect("bool must have a neutral value");
        assert_eq!(v.downcast_ref::<bool>(), Some(&false));
    }

    #[test]
    fn neutral_value_is_absent_for_references() {
        assert!(neutral_value(NeutralKind::Reference).is_none());
    }
}
