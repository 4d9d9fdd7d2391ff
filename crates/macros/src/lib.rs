//! Procedural macros for solution entrypoints.

use proc_macro::TokenStream;

mod entry;
mod error;

/// Turn a solution function into the `main` function of a binary.
///
/// ```text
/// #[entry(input = "d03.txt", expect = 4361)]
/// fn main(input: IStr) -> Result<u64> {
///     /* .. */
/// }
/// ```
///
/// * `input` names a file in the `inputs` directory of the package.
/// * `expect` is the optional known answer which the output is checked
///   against.
#[proc_macro_attribute]
pub fn entry(args: TokenStream, item_stream: TokenStream) -> TokenStream {
    crate::entry::build(args, item_stream)
}
