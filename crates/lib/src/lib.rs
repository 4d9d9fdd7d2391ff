pub mod cli;
pub mod env;
pub mod grid;
pub mod input;

#[doc(hidden)]
pub mod macro_support {
    pub use anyhow::Error;
}

pub mod prelude {
    //! Helper prelude with useful imports.
    pub use crate::grid::{Grid, GridExt};
    pub use crate::input::IStr;
    pub use anyhow::{anyhow, bail, ensure, Context, Error, Result};
    pub use bstr::{BStr, ByteSlice};
    pub use macros::entry;
}

/// Helper macro to implement [FromInput][crate::input::FromInput] by
/// converting from another parsed value.
///
/// If the conversion fails, the input is rewound and the error is reported
/// with the span of the consumed input.
///
/// # Examples
///
/// ```
/// use lib::prelude::*;
/// use lib::env::Size;
///
/// struct Pair(u32, u32);
///
/// lib::from_input! {
///     |line: &str| -> Pair {
///         let (a, b) = line.split_once(',').context("missing comma")?;
///         Ok(Pair(a.parse()?, b.parse()?))
///     }
/// }
///
/// let mut input = IStr::new(b"1,2\n3-4\n", Size::ZERO);
/// let Pair(a, b) = input.line::<Pair>().unwrap();
/// assert_eq!((a, b), (1, 2));
/// assert!(input.line::<Pair>().is_err());
/// ```
#[macro_export]
macro_rules! from_input {
    (|$value:ident: $ty:ty| -> $out:ident $block:block) => {
        impl $crate::input::FromInput for $out {
            #[inline]
            fn try_from_input(
                p: &mut $crate::input::IStr,
            ) -> core::result::Result<Option<Self>, $crate::input::IStrError> {
                let original = *p;

                let Some(value) = <$ty as $crate::input::FromInput>::try_from_input(p)? else {
                    return Ok(None);
                };

                match (|$value: $ty| -> core::result::Result<$out, $crate::macro_support::Error> {
                    $block
                })(value)
                {
                    Ok(value) => Ok(Some(value)),
                    Err(e) => {
                        let span = original.index()..p.index();
                        *p = original;
                        Err($crate::input::IStrError::new(
                            span,
                            $crate::input::ErrorKind::Boxed(e),
                        ))
                    }
                }
            }
        }
    };
}
