//! [`StructHash`] for standard library types.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::node::Node;
use crate::traits::StructHash;

macro_rules! signed {
    ($($t:ty),*) => {
        $(
            impl StructHash for $t {
                fn node(&self) -> Node<'_> {
                    Node::Int(*self as i64)
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

macro_rules! unsigned {
    ($($t:ty),*) => {
        $(
            impl StructHash for $t {
                fn node(&self) -> Node<'_> {
                    Node::Uint(*self as u64)
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

signed!(i8, i16, i32, i64, isize);
unsigned!(u8, u16, u32, u64, usize);

impl StructHash for f32 {
    fn node(&self) -> Node<'_> {
        Node::Float(f64::from(*self))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl StructHash for f64 {
    fn node(&self) -> Node<'_> {
        Node::Float(*self)
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

impl StructHash for bool {
    fn node(&self) -> Node<'_> {
        Node::Bool(*self)
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl StructHash for char {
    fn node(&self) -> Node<'_> {
        Node::Uint(u64::from(u32::from(*self)))
    }

    fn is_zero(&self) -> bool {
        *self == '\0'
    }
}

impl StructHash for () {
    fn node(&self) -> Node<'_> {
        Node::Unsupported("unit")
    }
}

impl StructHash for str {
    fn node(&self) -> Node<'_> {
        Node::Text(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn render_text(&self) -> Option<String> {
        Some(self.to_owned())
    }
}

impl StructHash for String {
    fn node(&self) -> Node<'_> {
        Node::Text(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn render_text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl StructHash for Cow<'_, str> {
    fn node(&self) -> Node<'_> {
        Node::Text(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn render_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

fn elements<'a, T: StructHash + 'a>(
    iter: impl Iterator<Item = &'a T> + 'a,
) -> crate::node::Elements<'a> {
    Box::new(iter.map(|e| e as &dyn StructHash))
}

fn entries<'a, K: StructHash + 'a, V: StructHash + 'a>(
    iter: impl Iterator<Item = (&'a K, &'a V)> + 'a,
) -> crate::node::Entries<'a> {
    Box::new(iter.map(|(k, v)| (k as &dyn StructHash, v as &dyn StructHash)))
}

impl<T: StructHash> StructHash for [T] {
    fn node(&self) -> Node<'_> {
        Node::Seq(elements(self.iter()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: StructHash> StructHash for Vec<T> {
    fn node(&self) -> Node<'_> {
        Node::Seq(elements(self.iter()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: StructHash> StructHash for VecDeque<T> {
    fn node(&self) -> Node<'_> {
        Node::Seq(elements(self.iter()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: StructHash, const N: usize> StructHash for [T; N] {
    fn node(&self) -> Node<'_> {
        Node::Array(elements(self.iter()))
    }

    fn is_zero(&self) -> bool {
        self.iter().all(StructHash::is_zero)
    }
}

macro_rules! tuple {
    ($($name:ident)+) => {
        impl<$($name: StructHash),+> StructHash for ($($name,)+) {
            #[allow(non_snake_case)]
            fn node(&self) -> Node<'_> {
                let ($($name,)+) = self;
                Node::Array(Box::new([$($name as &dyn StructHash),+].into_iter()))
            }

            #[allow(non_snake_case)]
            fn is_zero(&self) -> bool {
                let ($($name,)+) = self;
                true $(&& $name.is_zero())+
            }
        }
    };
}

tuple!(A);
tuple!(A B);
tuple!(A B C);
tuple!(A B C D);
tuple!(A B C D E);
tuple!(A B C D E F);

impl<K: StructHash, V: StructHash, S> StructHash for HashMap<K, V, S> {
    fn node(&self) -> Node<'_> {
        Node::Map(entries(self.iter()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K: StructHash, V: StructHash> StructHash for BTreeMap<K, V> {
    fn node(&self) -> Node<'_> {
        Node::Map(entries(self.iter()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: StructHash, S> StructHash for HashSet<T, S> {
    fn node(&self) -> Node<'_> {
        Node::Set(elements(self.iter()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: StructHash> StructHash for BTreeSet<T> {
    fn node(&self) -> Node<'_> {
        Node::Set(elements(self.iter()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

/// `None` is an absent reference: with zero-nil it hashes like `T::default()`.
impl<T: StructHash + Default> StructHash for Option<T> {
    fn node(&self) -> Node<'_> {
        match self {
            Some(v) => v.node(),
            None => Node::nil::<T>(),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn is_zero_or_nil(&self) -> bool {
        self.as_ref().map_or(true, StructHash::is_zero_or_nil)
    }

    fn render_text(&self) -> Option<String> {
        self.as_ref().and_then(StructHash::render_text)
    }
}

macro_rules! transparent {
    ($($ptr:ty),*) => {
        $(
            impl<T: StructHash + ?Sized> StructHash for $ptr {
                fn node(&self) -> Node<'_> {
                    (**self).node()
                }

                fn is_zero(&self) -> bool {
                    (**self).is_zero()
                }

                fn is_zero_or_nil(&self) -> bool {
                    (**self).is_zero_or_nil()
                }

                fn render_text(&self) -> Option<String> {
                    (**self).render_text()
                }
            }
        )*
    };
}

transparent!(Box<T>, Rc<T>, Arc<T>, &T, &mut T);
