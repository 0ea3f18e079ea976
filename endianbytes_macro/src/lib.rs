use proc_macro::TokenStream;
use syn::parse_macro_input;

mod parse;

/// Backend of `endianbytes::endian_bytes!`.
///
/// Not meant to be called directly: the runtime crate's wrapper prepends its
/// own path and the target descriptor chosen by its build script.
#[doc(hidden)]
#[proc_macro]
pub fn endian_bytes_impl(input: TokenStream) -> TokenStream {
    let invocation = parse_macro_input!(input as parse::Invocation); //parse
    let expanded = invocation.expand(); //generate
    match expanded {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
