//! Cache key generation
//!
//! A call's arguments are a single value: a tuple for several positional
//! arguments, a bare scalar for one, or [`Kwargs`] when named arguments are
//! involved. Key functions take that value by reference.

use std::collections::BTreeMap;
use std::fmt::Debug;

/// Function-pointer form of a key function
pub type KeyFn<A, K = String> = fn(&A) -> K;

/// Canonical string rendering of call arguments
pub trait CallArgs {
    /// One rendered string per positional argument, in call order
    fn positional(&self) -> Vec<String>;

    /// Rendered `(name, value)` pairs, sorted by name
    fn keywords(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Call arguments with at least one positional argument
pub trait FirstArg {
    /// Rendering of the first positional argument
    fn first(&self) -> String;
}

/// Default key function: every positional and keyword argument
///
/// Renders as `(p1, p2, ...):{name: value, ...}`.
pub fn generic_key<A: CallArgs + ?Sized>(args: &A) -> String {
    let keywords: Vec<String> = args
        .keywords()
        .into_iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();

    format!("({}):{{{}}}", args.positional().join(", "), keywords.join(", "))
}

/// Key function that only looks at the first positional argument
///
/// Useful when trailing arguments (a logger, a context handle) do not
/// affect the result.
pub fn single_arg_key<A: FirstArg + ?Sized>(args: &A) -> String {
    args.first()
}

/// Positional arguments plus named keyword arguments
///
/// Keyword values share one type `V`; use an enum when they differ.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Kwargs<A, V = String> {
    /// Positional part of the call
    pub args: A,
    kwargs: BTreeMap<String, V>,
}

impl<A, V> Kwargs<A, V> {
    /// Wrap positional arguments with no keywords yet
    pub fn new(args: A) -> Self {
        Self {
            args,
            kwargs: BTreeMap::new(),
        }
    }

    /// Add a keyword argument, replacing an earlier one of the same name
    pub fn with(mut self, name: impl Into<String>, value: V) -> Self {
        self.kwargs.insert(name.into(), value);
        self
    }

    /// Look up a keyword argument
    pub fn get(&self, name: &str) -> Option<&V> {
        self.kwargs.get(name)
    }
}

impl<A: CallArgs, V: Debug> CallArgs for Kwargs<A, V> {
    fn positional(&self) -> Vec<String> {
        self.args.positional()
    }

    fn keywords(&self) -> Vec<(String, String)> {
        self.kwargs
            .iter()
            .map(|(name, value)| (name.clone(), format!("{:?}", value)))
            .collect()
    }
}

impl<A: FirstArg, V> FirstArg for Kwargs<A, V> {
    fn first(&self) -> String {
        self.args.first()
    }
}

impl CallArgs for () {
    fn positional(&self) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! tuple_args {
    ($($T:ident $v:ident),+) => {
        impl<$($T: Debug),+> CallArgs for ($($T,)+) {
            fn positional(&self) -> Vec<String> {
                let ($($v,)+) = self;
                vec![$(format!("{:?}", $v)),+]
            }
        }

        impl<$($T: Debug),+> FirstArg for ($($T,)+) {
            fn first(&self) -> String {
                format!("{:?}", self.0)
            }
        }
    };
}

tuple_args!(A a);
tuple_args!(A a, B b);
tuple_args!(A a, B b, C c);
tuple_args!(A a, B b, C c, D d);
tuple_args!(A a, B b, C c, D d, E e);
tuple_args!(A a, B b, C c, D d, E e, F f);
tuple_args!(A a, B b, C c, D d, E e, F f, G g);
tuple_args!(A a, B b, C c, D d, E e, F f, G g, H h);

macro_rules! scalar_args {
    ($($t:ty),+ $(,)?) => {
        $(
            impl CallArgs for $t {
                fn positional(&self) -> Vec<String> {
                    vec![format!("{:?}", self)]
                }
            }

            impl FirstArg for $t {
                fn first(&self) -> String {
                    format!("{:?}", self)
                }
            }
        )+
    };
}

scalar_args!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

impl CallArgs for &str {
    fn positional(&self) -> Vec<String> {
        vec![format!("{:?}", self)]
    }
}

impl FirstArg for &str {
    fn first(&self) -> String {
        format!("{:?}", self)
    }
}

impl<T: Debug> CallArgs for Vec<T> {
    fn positional(&self) -> Vec<String> {
        vec![format!("{:?}", self)]
    }
}

impl<T: Debug> FirstArg for Vec<T> {
    fn first(&self) -> String {
        format!("{:?}", self)
    }
}
