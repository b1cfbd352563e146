//! Uniform invocation of factories of any arity.
//!
//! Arguments are passed as a tuple, so `construct(Widget::new, ("a", 2))`
//! calls `Widget::new("a", 2)`.

use crate::core::key::SubstitutionKey;
use std::any::Any;

/// A callable that builds a value from an argument tuple.
pub trait Constructor<Args>: 'static {
    type Output;

    fn invoke(&self, args: Args) -> Self::Output;

    /// Identity of this callable when it is the real being substituted.
    ///
    /// Fn items and closures are keyed by their type. Fn pointers, boxed
    /// `dyn Fn` values and `&'static dyn Fn` references are keyed by what they
    /// point to, since many distinct callables share each of those types.
    fn factory_key(&self) -> SubstitutionKey;
}

macro_rules! impl_constructor {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg,)*> Constructor<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out + 'static,
            Out: 'static,
            $($arg: 'static,)*
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> Out {
                (self)($($arg),*)
            }

            fn factory_key(&self) -> SubstitutionKey {
                let callable: &dyn Any = self;
                if let Some(pointer) = callable.downcast_ref::<fn($($arg),*) -> Out>() {
                    return SubstitutionKey::at::<Func>(*pointer as usize);
                }
                if let Some(boxed) = callable.downcast_ref::<Box<dyn Fn($($arg),*) -> Out>>() {
                    return SubstitutionKey::of_pointee::<Func, _>(&**boxed);
                }
                if let Some(borrowed) =
                    callable.downcast_ref::<&'static dyn Fn($($arg),*) -> Out>()
                {
                    return SubstitutionKey::of_pointee::<Func, _>(*borrowed);
                }
                SubstitutionKey::of_type::<Func>()
            }
        }
    };
}

impl_constructor!();
impl_constructor!(A1);
impl_constructor!(A1, A2);
impl_constructor!(A1, A2, A3);
impl_constructor!(A1, A2, A3, A4);
impl_constructor!(A1, A2, A3, A4, A5);
impl_constructor!(A1, A2, A3, A4, A5, A6);
