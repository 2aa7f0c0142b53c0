pub use enclose::*;

/// Builds an [`Observer`](crate::Observer), optionally cloning captures
/// into the closure the way `enclose!` does.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use observe_subject::{observer, Observer};
///
/// let hits = Rc::new(Cell::new(0));
///
/// let state: Observer<u32> = observer!((hits) new, _previous => {
///     if new == Some(&1) {
///         hits.set(hits.get() + 1);
///     }
/// });
/// let event: Observer<()> = observer!((hits) => hits.set(hits.get() + 1));
///
/// state(Some(&1), None);
/// event(None, None);
/// assert_eq!(hits.get(), 2);
/// ```
#[macro_export]
macro_rules! observer {
    (( $($d_tt:tt)* ) => $($b:tt)*) => {
        $crate::observer($crate::macros::enclose!(($( $d_tt )*) move |_: Option<&()>, _: Option<&()>| { $($b)* }))
    };
    (=> $($b:tt)*) => {
        $crate::observer(move |_: Option<&()>, _: Option<&()>| { $($b)* })
    };
    (( $($d_tt:tt)* ) $new:pat, $prev:pat => $($b:tt)*) => {
        $crate::observer($crate::macros::enclose!(($( $d_tt )*) move |$new, $prev| { $($b)* }))
    };
    ($new:pat, $prev:pat => $($b:tt)*) => {
        $crate::observer(move |$new, $prev| { $($b)* })
    };
}
