//! Identity of "real" references.
//!
//! A [`SubstitutionKey`] pairs the `TypeId` of a real with an address and the
//! size of what lives there. Types keyed by the type alone (fn items and
//! closures) use address zero.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ptr;
use std::rc::Rc;
use std::sync::Arc;

/// Identity of a real reference inside a substitution registry.
#[derive(Clone)]
pub struct SubstitutionKey {
    type_id: TypeId,
    address: usize,
    size: usize,
    type_name: &'static str,
    // Zero-sized pointees may share an address; the full pointer tells them apart.
    pointee: Option<Rc<dyn Pointee>>,
}

impl SubstitutionKey {
    /// Key identifying a type as a whole.
    ///
    /// Every fn item and closure has its own type, which makes this the
    /// identity used for most factories.
    pub fn of_type<T: ?Sized + 'static>() -> Self {
        Self::at::<T>(0)
    }

    /// Key identifying a value of type `H` living at `address`.
    pub fn at<H: ?Sized + 'static>(address: usize) -> Self {
        Self {
            type_id: TypeId::of::<H>(),
            address,
            size: 0,
            type_name: type_name::<H>(),
            pointee: None,
        }
    }

    /// Key for a handle `H` owning the allocation that holds `value`.
    ///
    /// Live allocations never overlap, so address and size identify the value.
    pub fn of_allocation<H: ?Sized + 'static, T: ?Sized>(value: &T) -> Self {
        Self {
            size: mem::size_of_val(value),
            ..Self::at::<H>(address_of(value))
        }
    }

    /// Key for a handle `H` borrowing `value` from anywhere, statics included.
    ///
    /// Distinct zero-sized values can sit at the same address, so their keys
    /// also compare the pointer metadata (the vtable of a trait object).
    pub fn of_pointee<H: ?Sized + 'static, T: ?Sized + 'static>(value: &T) -> Self {
        let mut key = Self::of_allocation::<H, T>(value);
        if key.size == 0 {
            key.pointee = Some(Rc::new(Pointer(value as *const T)));
        }
        key
    }

    /// Name of the keyed type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Address part of the key (zero for type-level keys)
    pub fn address(&self) -> usize {
        self.address
    }
}

impl PartialEq for SubstitutionKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
            && self.address == other.address
            && self.size == other.size
            && match (&self.pointee, &other.pointee) {
                (Some(left), Some(right)) => left.same_pointer(right.as_ref()),
                (None, None) => true,
                _ => false,
            }
    }
}

impl Eq for SubstitutionKey {}

impl Hash for SubstitutionKey {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.type_id.hash(state);
        self.address.hash(state);
        self.size.hash(state);
    }
}

impl fmt::Debug for SubstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstitutionKey")
            .field("type_name", &self.type_name)
            .field("address", &format_args!("{:#x}", self.address))
            .field("size", &self.size)
            .finish()
    }
}

impl fmt::Display for SubstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.address == 0 {
            write!(f, "{}", self.type_name)
        } else {
            write!(f, "{}@{:#x}", self.type_name, self.address)
        }
    }
}

trait Pointee {
    fn as_any(&self) -> &dyn Any;

    fn same_pointer(&self, other: &dyn Pointee) -> bool;
}

struct Pointer<T: ?Sized>(*const T);

impl<T: ?Sized + 'static> Pointee for Pointer<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_pointer(&self, other: &dyn Pointee) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| ptr::eq(self.0, other.0))
    }
}

fn address_of<T: ?Sized>(value: &T) -> usize {
    (value as *const T).cast::<()>() as usize
}

/// A reference that can be swapped for a fixture object.
///
/// Shared pointers are identified by the allocation they point to, so every
/// clone of an `Arc` maps to the same substitution.
pub trait Real: 'static {
    fn substitution_key(&self) -> SubstitutionKey;
}

impl<T: ?Sized + 'static> Real for Arc<T> {
    fn substitution_key(&self) -> SubstitutionKey {
        SubstitutionKey::of_allocation::<Self, T>(&**self)
    }
}

impl<T: ?Sized + 'static> Real for Rc<T> {
    fn substitution_key(&self) -> SubstitutionKey {
        SubstitutionKey::of_allocation::<Self, T>(&**self)
    }
}

impl<T: ?Sized + 'static> Real for &'static T {
    fn substitution_key(&self) -> SubstitutionKey {
        SubstitutionKey::of_pointee::<Self, T>(*self)
    }
}
