mod output;
mod parser;

use proc_macro::{Span, TokenStream};

use crate::error::Error;

/// Configurable macro code to build entry.
pub(crate) fn build(args: TokenStream, item_stream: TokenStream) -> TokenStream {
    let mut errors = Vec::new();

    let config = parser::ConfigParser::new(args, &mut errors).parse();
    config.validate(&mut errors);

    let fn_name = parser::find_fn_name(item_stream.clone());

    if fn_name.is_none() {
        errors.push(Error::new(
            Span::call_site(),
            "#[entry] must be used on a function",
        ));
    }

    let mut stream = TokenStream::new();

    match (fn_name, errors.is_empty()) {
        (Some(fn_name), true) => match config.expand(&fn_name, item_stream) {
            Ok(expanded) => stream.extend(expanded),
            Err(error) => stream.extend(error.into_tokens()),
        },
        _ => {
            stream.extend(item_stream);

            for error in errors {
                stream.extend(error.into_tokens());
            }
        }
    }

    stream
}
