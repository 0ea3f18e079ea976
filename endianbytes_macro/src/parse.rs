//! The `endian_bytes!` declaration language.
//!
//! Input arrives from the runtime crate's `macro_rules!` wrapper as
//! `<crate path>; <order>, <width>; <statements>`, where order and width
//! describe the target the code is compiled for.

use endianbytes_layout::{
    Alias, AliasRegistry, Arch, ByteOrder, Declaration, Direction, Flavor, LayoutGenerator,
    PointerWidth,
};
use proc_macro2::{TokenStream, TokenTree};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Attribute, Ident, LitInt, Token, Type, Visibility, braced};

pub struct Invocation {
    krate: TokenStream,
    native: Arch,
    statements: Vec<Statement>,
}

enum Statement {
    Reset,
    Set { position: LitInt, aliases: Vec<Alias> },
    Clear { position: LitInt },
    Emit { decl: Declaration, flavor: Flavor },
}

struct AliasField {
    name: Ident,
    ty: Type,
}

impl Parse for AliasField {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty = input.parse()?;
        Ok(AliasField { name, ty })
    }
}

impl Parse for Invocation {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut krate = TokenStream::new();
        while !input.peek(Token![;]) {
            let tt: TokenTree = input.parse()?;
            krate.extend([tt]);
        }
        input.parse::<Token![;]>()?;

        let order: Ident = input.parse()?;
        input.parse::<Token![,]>()?;
        let width: LitInt = input.parse()?;
        input.parse::<Token![;]>()?;
        let native = Arch::new(
            order
                .to_string()
                .parse()
                .map_err(|err| syn::Error::new(order.span(), err))?,
            parse_width(&width)?,
        );

        let mut statements = Vec::new();
        while !input.is_empty() {
            statements.push(parse_statement(input, native)?);
        }

        Ok(Invocation {
            krate,
            native,
            statements,
        })
    }
}

fn parse_width(lit: &LitInt) -> syn::Result<PointerWidth> {
    PointerWidth::try_from(lit.base10_parse::<usize>()?).map_err(|err| syn::Error::new(lit.span(), err))
}

fn parse_statement(input: ParseStream, native: Arch) -> syn::Result<Statement> {
    let mut attrs = input.call(Attribute::parse_outer)?;
    let vis: Visibility = input.parse()?;

    if input.peek(Token![struct]) || input.peek(Token![union]) {
        let flavor = if input.peek(Token![struct]) {
            input.parse::<Token![struct]>()?;
            Flavor::Plain
        } else {
            input.parse::<Token![union]>()?;
            Flavor::Pointer
        };
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let direction: Ident = input.parse()?;
        let direction: Direction = direction
            .to_string()
            .parse()
            .map_err(|err| syn::Error::new(direction.span(), err))?;
        input.parse::<Token![;]>()?;

        let arch = take_arch(&mut attrs, native)?;
        return Ok(Statement::Emit {
            decl: Declaration {
                attrs,
                vis,
                name,
                arch,
                direction,
            },
            flavor,
        });
    }

    let keyword: Ident = input.parse()?;
    if let Some(attr) = attrs.first() {
        return Err(syn::Error::new_spanned(attr, "attributes are only allowed on `struct` and `union` declarations"));
    }
    if !matches!(vis, Visibility::Inherited) {
        return Err(syn::Error::new_spanned(vis, "visibility is only allowed on `struct` and `union` declarations"));
    }

    match keyword.to_string().as_str() {
        "reset" => {
            input.parse::<Token![;]>()?;
            Ok(Statement::Reset)
        }
        "set" => {
            let position: LitInt = input.parse()?;
            let content;
            braced!(content in input);
            let fields = Punctuated::<AliasField, Token![,]>::parse_terminated(&content)?;
            if input.peek(Token![;]) {
                input.parse::<Token![;]>()?;
            }
            Ok(Statement::Set {
                position,
                aliases: fields
                    .into_iter()
                    .map(|field| Alias::new(field.name, field.ty))
                    .collect(),
            })
        }
        "clear" => {
            let position: LitInt = input.parse()?;
            input.parse::<Token![;]>()?;
            Ok(Statement::Clear { position })
        }
        _ => Err(syn::Error::new(
            keyword.span(),
            "expected `reset`, `set`, `clear`, `struct` or `union`",
        )),
    }
}

/// Removes `#[arch(order = .., width = ..)]` from `attrs`. Omitted keys keep
/// the native value.
fn take_arch(attrs: &mut Vec<Attribute>, native: Arch) -> syn::Result<Arch> {
    let mut arch = native;
    let mut seen = false;
    let mut result = Ok(());
    attrs.retain(|attr| {
        if !attr.path().is_ident("arch") {
            return true;
        }
        if seen {
            result = Err(syn::Error::new_spanned(attr, "there can only be 1 `arch` attribute"));
            return false;
        }
        seen = true;
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("order") {
                let order: Ident = meta.value()?.parse()?;
                arch.order = order
                    .to_string()
                    .parse::<ByteOrder>()
                    .map_err(|err| syn::Error::new(order.span(), err))?;
                Ok(())
            } else if meta.path.is_ident("width") {
                let width: LitInt = meta.value()?.parse()?;
                arch.width = parse_width(&width)?;
                Ok(())
            } else {
                Err(meta.error("expected `order` or `width`"))
            }
        });
        if let Err(err) = parsed {
            result = Err(err);
        }
        false
    });
    result.map(|()| arch)
}

impl Invocation {
    /// Runs the statements in order against a fresh registry.
    pub fn expand(self) -> syn::Result<TokenStream> {
        let generator = LayoutGenerator::new(self.krate, self.native);
        let mut registry = AliasRegistry::new();
        let mut output = TokenStream::new();
        let mut errors: Option<syn::Error> = None;

        for statement in self.statements {
            let emitted = match statement {
                Statement::Reset => {
                    registry.reset();
                    Ok(TokenStream::new())
                }
                Statement::Set { position, aliases } => position
                    .base10_parse()
                    .and_then(|p| {
                        registry
                            .set_aliases(p, aliases)
                            .map_err(|err| syn::Error::new(position.span(), err))
                    })
                    .map(|()| TokenStream::new()),
                Statement::Clear { position } => position
                    .base10_parse()
                    .and_then(|p| {
                        registry
                            .clear_aliases(p)
                            .map_err(|err| syn::Error::new(position.span(), err))
                    })
                    .map(|()| TokenStream::new()),
                Statement::Emit { decl, flavor } => registry
                    .snapshot(decl.arch.bytes())
                    .map_err(|err| syn::Error::new(decl.name.span(), err))
                    .and_then(|snapshot| match flavor {
                        Flavor::Plain => generator.emit_layout(&decl, &snapshot),
                        Flavor::Pointer => generator.emit_union_layout(&decl, &snapshot),
                    }),
            };
            match emitted {
                Ok(tokens) => output.extend(tokens),
                Err(err) => match &mut errors {
                    Some(first) => first.combine(err),
                    None => errors = Some(err),
                },
            }
        }

        match errors {
            Some(err) => Err(err),
            None => Ok(output),
        }
    }
}
