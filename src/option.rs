//! Typed option descriptors.
//!
//! An option binds a command-line flag to storage owned by the caller. The
//! storage is a [`Slot`], a shared cell the caller keeps a clone of so the
//! command handler can read the parsed value after dispatch.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The seven supported option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
    Int64,
    Uint,
    Uint64,
    Float64,
    Bool,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::String,
        Kind::Int,
        Kind::Int64,
        Kind::Uint,
        Kind::Uint64,
        Kind::Float64,
        Kind::Bool,
    ];

    /// Canonical (lower-case) tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint64 => "uint64",
            Kind::Float64 => "float64",
            Kind::Bool => "bool",
        }
    }

    /// Resolve an already normalized tag. Returns `None` for anything that is
    /// not one of the canonical tags.
    pub fn from_tag(tag: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete option value, used for defaults and for values read back from
/// the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(isize),
    Int64(i64),
    Uint(usize),
    Uint64(u64),
    Float64(f64),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Int64(_) => Kind::Int64,
            Value::Uint(_) => Kind::Uint,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float64(_) => Kind::Float64,
            Value::Bool(_) => Kind::Bool,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// Shared, caller-owned storage for one option.
///
/// Cloning a slot yields another handle to the same cell.
#[derive(Debug, Default)]
pub struct Slot<T>(Rc<RefCell<T>>);

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Slot(Rc::clone(&self.0))
    }
}

impl<T> Slot<T> {
    pub fn new(value: T) -> Self {
        Slot(Rc::new(RefCell::new(value)))
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    /// Run `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

/// Storage reference of an option, tagged by the kind of its referent.
#[derive(Debug, Clone)]
pub enum Storage {
    String(Slot<String>),
    Int(Slot<isize>),
    Int64(Slot<i64>),
    Uint(Slot<usize>),
    Uint64(Slot<u64>),
    Float64(Slot<f64>),
    Bool(Slot<bool>),
}

impl Storage {
    pub fn kind(&self) -> Kind {
        match self {
            Storage::String(_) => Kind::String,
            Storage::Int(_) => Kind::Int,
            Storage::Int64(_) => Kind::Int64,
            Storage::Uint(_) => Kind::Uint,
            Storage::Uint64(_) => Kind::Uint64,
            Storage::Float64(_) => Kind::Float64,
            Storage::Bool(_) => Kind::Bool,
        }
    }

    /// Write `value` into the referenced cell. Returns `false` and leaves the
    /// cell untouched when the value kind does not match the storage kind.
    pub fn store(&self, value: Value) -> bool {
        match (self, value) {
            (Storage::String(s), Value::String(v)) => s.set(v),
            (Storage::Int(s), Value::Int(v)) => s.set(v),
            (Storage::Int64(s), Value::Int64(v)) => s.set(v),
            (Storage::Uint(s), Value::Uint(v)) => s.set(v),
            (Storage::Uint64(s), Value::Uint64(v)) => s.set(v),
            (Storage::Float64(s), Value::Float64(v)) => s.set(v),
            (Storage::Bool(s), Value::Bool(v)) => s.set(v),
            _ => return false,
        }
        true
    }
}

/// Rust types that can back an option.
pub trait FlagValue: Clone + 'static {
    const KIND: Kind;

    fn into_value(self) -> Value;

    fn storage(slot: Slot<Self>) -> Storage;
}

macro_rules! flag_value {
    ($ty:ty, $variant:ident) => {
        impl FlagValue for $ty {
            const KIND: Kind = Kind::$variant;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn storage(slot: Slot<Self>) -> Storage {
                Storage::$variant(slot)
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }

        impl From<Slot<$ty>> for Storage {
            fn from(slot: Slot<$ty>) -> Self {
                Storage::$variant(slot)
            }
        }
    };
}

flag_value!(String, String);
flag_value!(isize, Int);
flag_value!(i64, Int64);
flag_value!(usize, Uint);
flag_value!(u64, Uint64);
flag_value!(f64, Float64);
flag_value!(bool, Bool);

/// One typed flag binding request.
///
/// `type_tag` is kept as written until the option is registered (where it is
/// lower-cased) and is only checked against `storage` and `default` when the
/// option is bound for an actual run.
#[derive(Debug, Clone)]
pub struct OptionDescriptor {
    pub type_tag: String,
    pub flag: String,
    pub storage: Storage,
    pub default: Value,
    pub usage: String,
}

impl OptionDescriptor {
    pub fn new(
        type_tag: impl Into<String>,
        flag: impl Into<String>,
        storage: impl Into<Storage>,
        default: impl Into<Value>,
        usage: impl Into<String>,
    ) -> Self {
        OptionDescriptor {
            type_tag: type_tag.into(),
            flag: flag.into(),
            storage: storage.into(),
            default: default.into(),
            usage: usage.into(),
        }
    }

    /// Build a descriptor whose tag is derived from the slot's type.
    pub fn typed<T: FlagValue>(
        flag: impl Into<String>,
        slot: &Slot<T>,
        default: T,
        usage: impl Into<String>,
    ) -> Self {
        OptionDescriptor {
            type_tag: T::KIND.as_str().to_string(),
            flag: flag.into(),
            storage: T::storage(slot.clone()),
            default: default.into_value(),
            usage: usage.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_tag() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(Kind::from_tag("STRING"), None);
        assert_eq!(Kind::from_tag("float32"), None);
    }

    #[test]
    fn slot_clones_share_the_cell() {
        let slot = Slot::new(String::from("a"));
        let other = slot.clone();
        other.set("b".to_string());
        assert_eq!(slot.get(), "b");
        assert_eq!(slot.with(|s| s.len()), 1);
    }

    #[test]
    fn store_rejects_mismatched_value() {
        let slot = Slot::new(7i64);
        let storage = Storage::from(slot.clone());
        assert!(!storage.store(Value::from("nope")));
        assert_eq!(slot.get(), 7);
        assert!(storage.store(Value::Int64(-3)));
        assert_eq!(slot.get(), -3);
    }

    #[test]
    fn typed_descriptor_derives_tag() {
        let slot = Slot::new(0u64);
        let opt = OptionDescriptor::typed("size", &slot, 42u64, "Size in bytes");
        assert_eq!(opt.type_tag, "uint64");
        assert_eq!(opt.storage.kind(), Kind::Uint64);
        assert_eq!(opt.default, Value::Uint64(42));
    }

    #[test]
    fn untyped_descriptor_keeps_tag_verbatim() {
        let opt = OptionDescriptor::new("STRING", "m", Slot::new(1.5f64), "x", "msg");
        assert_eq!(opt.type_tag, "STRING");
        assert_eq!(opt.storage.kind(), Kind::Float64);
        assert_eq!(opt.default.kind(), Kind::String);
    }
}
