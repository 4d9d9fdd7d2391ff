use proc_macro::{Delimiter, Group, Ident, Literal, Span, TokenStream, TokenTree};

use crate::error::Error;

#[derive(Default)]
pub(crate) struct Config {
    pub(crate) input_file: Option<Literal>,
    pub(crate) expect: Option<TokenStream>,
}

impl Config {
    /// Validate the parsed configuration.
    pub(crate) fn validate(&self, errors: &mut Vec<Error>) {
        if self.input_file.is_none() {
            errors.push(Error::new(Span::call_site(), "missing `input` argument"));
        }
    }

    /// Expand the annotated function into a `main` function which parses
    /// options, loads the input and runs or benches the solution.
    ///
    /// The annotated function is kept as an item inside of the generated
    /// `main`, so it may itself be called `main`.
    pub(crate) fn expand(&self, fn_name: &Ident, item_stream: TokenStream) -> Result<TokenStream, Error> {
        let input = match &self.input_file {
            Some(input) => input.to_string(),
            None => return Err(Error::new(Span::call_site(), "missing `input` argument")),
        };

        let (check, bench_check) = match &self.expect {
            Some(expect) => (
                format!("::lib::cli::check(&value, &({expect}))?;"),
                format!("|value| ::lib::cli::check(value, &({expect}))"),
            ),
            None => (String::new(), String::from("|_| Ok(())")),
        };

        let body = format!(
            r#"
            let opts = ::lib::cli::Opts::parse()?;
            let (input, path) = ::lib::input!({input});

            match opts.mode {{
                ::lib::cli::Mode::Default => {{
                    let value = match {fn_name}(input) {{
                        Ok(value) => value,
                        Err(error) => return Err(::lib::cli::error_context(path, input, error)),
                    }};

                    {check}
                    ::lib::cli::answer(&opts, &value)?;
                }}
                ::lib::cli::Mode::Bench => {{
                    let mut b = ::lib::cli::Bencher::new();
                    b.iter(&opts, || {fn_name}(input), {bench_check})?;
                }}
            }}

            Ok(())
            "#
        );

        let mut block = item_stream;
        block.extend(parse(&body)?);

        let mut stream = parse("fn main() -> ::lib::prelude::Result<()>")?;
        stream.extend([TokenTree::Group(Group::new(Delimiter::Brace, block))]);
        Ok(stream)
    }
}

fn parse(source: &str) -> Result<TokenStream, Error> {
    source
        .parse()
        .map_err(|error| Error::new(Span::call_site(), format!("bad expansion: {error}")))
}
