use proc_macro::{token_stream, Ident, TokenStream, TokenTree};

use crate::entry::output::Config;
use crate::error::Error;

/// A parser for the arguments provided to an entry macro.
pub(crate) struct ConfigParser<'a> {
    it: token_stream::IntoIter,
    errors: &'a mut Vec<Error>,
}

impl<'a> ConfigParser<'a> {
    /// Construct a new parser around the given token stream.
    pub(crate) fn new(stream: TokenStream, errors: &'a mut Vec<Error>) -> Self {
        Self {
            it: stream.into_iter(),
            errors,
        }
    }

    /// Parse `name = value` options separated by commas.
    pub(crate) fn parse(mut self) -> Config {
        let mut config = Config::default();

        while let Some(tt) = self.it.next() {
            let ident = match tt {
                TokenTree::Ident(ident) => ident,
                tt => {
                    self.errors.push(Error::new(tt.span(), "expected identifier"));
                    self.recover();
                    continue;
                }
            };

            if !self.parse_eq(&ident) {
                self.recover();
                continue;
            }

            let value = self.parse_value();

            if value.is_empty() {
                self.errors.push(Error::new(
                    ident.span(),
                    format!("missing value for `{ident}`"),
                ));
                continue;
            }

            self.parse_option(&mut config, &ident, value);
        }

        config
    }

    /// Assign a single option.
    fn parse_option(&mut self, config: &mut Config, ident: &Ident, value: Vec<TokenTree>) {
        let name = ident.to_string();

        let duplicate = match name.as_str() {
            "input" => match &value[..] {
                [TokenTree::Literal(literal)] => config.input_file.replace(literal.clone()).is_some(),
                _ => {
                    self.errors
                        .push(Error::new(value[0].span(), "expected string literal"));
                    return;
                }
            },
            "expect" => config
                .expect
                .replace(TokenStream::from_iter(value))
                .is_some(),
            _ => {
                self.errors.push(Error::new(
                    ident.span(),
                    format!("unknown option `{name}`"),
                ));
                return;
            }
        };

        if duplicate {
            self.errors.push(Error::new(
                ident.span(),
                format!("duplicate option `{name}`"),
            ));
        }
    }

    /// Parse the `=` following an option name.
    fn parse_eq(&mut self, ident: &Ident) -> bool {
        match self.it.next() {
            Some(TokenTree::Punct(p)) if p.as_char() == '=' => true,
            tt => {
                let span = tt.map(|tt| tt.span()).unwrap_or_else(|| ident.span());
                self.errors
                    .push(Error::new(span, "expected assignment `=`"));
                false
            }
        }
    }

    /// Collect tokens up until the next top-level comma, consuming it.
    fn parse_value(&mut self) -> Vec<TokenTree> {
        let mut value = Vec::new();

        for tt in self.it.by_ref() {
            if matches!(&tt, TokenTree::Punct(p) if p.as_char() == ',') {
                break;
            }

            value.push(tt);
        }

        value
    }

    /// Recover by skipping to the next comma `,`, or end of input.
    fn recover(&mut self) {
        self.parse_value();
    }
}

/// Find the name of the function annotated with an entry macro.
pub(crate) fn find_fn_name(stream: TokenStream) -> Option<Ident> {
    let mut it = stream.into_iter();

    while let Some(tt) = it.next() {
        if let TokenTree::Ident(ident) = &tt {
            if ident.to_string() == "fn" {
                return match it.next()? {
                    TokenTree::Ident(name) => Some(name),
                    _ => None,
                };
            }
        }
    }

    None
}
