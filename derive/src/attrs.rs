use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Ident, LitStr, Token};

use crate::FORM_ATTRIBUTE_NAME;

/// Everything `#[form(...)]` can say about one field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub tag: Option<LitStr>,
    pub flatten: bool,
}

enum FormArg {
    Tag(LitStr),
    Flatten,
}

impl Parse for FormArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(FormArg::Tag(input.parse()?));
        }
        let ident: Ident = input.parse()?;
        if ident == "flatten" {
            Ok(FormArg::Flatten)
        } else {
            Err(syn::Error::new(
                ident.span(),
                "unknown `form` argument, expected a tag string or `flatten`",
            ))
        }
    }
}

impl FieldAttributes {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = FieldAttributes::default();

        for attr in attrs {
            if !attr.path().is_ident(FORM_ATTRIBUTE_NAME) {
                continue;
            }
            let args =
                attr.parse_args_with(Punctuated::<FormArg, Token![,]>::parse_terminated)?;
            for arg in args {
                match arg {
                    FormArg::Tag(lit) => {
                        if parsed.tag.is_some() {
                            return Err(syn::Error::new(lit.span(), "duplicate `form` tag"));
                        }
                        parsed.tag = Some(lit);
                    }
                    FormArg::Flatten => parsed.flatten = true,
                }
            }
        }

        Ok(parsed)
    }

    /// Whether the tag's name portion is the `-` marker.
    ///
    /// Excluded fields get no accessor, so their type is free to not
    /// implement `Reflect`.
    pub(crate) fn excluded(&self) -> bool {
        self.tag
            .as_ref()
            .is_some_and(|lit| lit.value().split(',').next() == Some("-"))
    }
}
