//! Turns an architecture descriptor and an alias snapshot into type
//! definitions.
//!
//! Generation happens in two steps. [`LayoutPlan::new`] decides which logical
//! position lives in which physical cell and validates every alias; the
//! [`LayoutGenerator`] then renders the plan as tokens.

use std::collections::HashSet;

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{Attribute, Expr, ExprLit, Ident, Lit, LitStr, Type, Visibility};

use crate::error::LayoutError;
use crate::order::{Arch, ByteOrder, Direction, PointerWidth};
use crate::registry::{Alias, Snapshot};

/// Which aggregate to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// A struct of byte cells.
    Plain,
    /// A union of the byte cells and a `*mut ()` word.
    Pointer,
}

/// Inherent and trait methods every emitted type carries.
const RESERVED: &[&str] = &[
    "byte",
    "new",
    "from_bytes",
    "to_bytes",
    "set_byte",
    "physical_offset",
    "significant_bytes",
    "hex",
];

/// Extra names taken by the pointer overlay.
const RESERVED_POINTER: &[&str] = &["bytes", "bytes_mut", "word", "set_word", "from_word"];

/// One byte cell of a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPlan {
    pub offset: usize,
    pub position: usize,
    pub aliases: Vec<Alias>,
}

/// Byte cells in physical storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub arch: Arch,
    pub direction: Direction,
    pub flavor: Flavor,
    pub cells: Vec<CellPlan>,
}

impl LayoutPlan {
    /// Lays out `snapshot` for `arch`, rejecting aliases that are not one
    /// byte wide or whose names clash with generated ones.
    ///
    /// `native` is the architecture the emitted code is compiled for; it
    /// decides the size of `usize` and `isize` aliases.
    pub fn new(
        arch: Arch,
        direction: Direction,
        flavor: Flavor,
        snapshot: &Snapshot,
        native: Arch,
    ) -> syn::Result<Self> {
        let width = arch.bytes();
        if snapshot.width() != width {
            return Err(syn::Error::new(
                proc_macro2::Span::call_site(),
                LayoutError::PositionOutOfRange {
                    position: snapshot.width().max(width) - 1,
                    width,
                },
            ));
        }

        let mut taken: HashSet<String> = RESERVED.iter().map(|name| name.to_string()).collect();
        if flavor == Flavor::Pointer {
            taken.extend(RESERVED_POINTER.iter().map(|name| name.to_string()));
        }
        for position in 0..width {
            taken.insert(format!("u8_{position}"));
            taken.insert(format!("set_u8_{position}"));
        }

        for (_, alias) in snapshot.iter() {
            if let Some(size) = known_size(&alias.ty, native) {
                if size != 1 {
                    let ty = &alias.ty;
                    return Err(syn::Error::new_spanned(
                        ty,
                        LayoutError::AliasSize {
                            name: alias.name.to_string(),
                            ty: quote!(#ty).to_string(),
                            size,
                        },
                    ));
                }
            }
            let name = unraw(&alias.name);
            for generated in [name.clone(), format!("set_{name}")] {
                if !taken.insert(generated.clone()) {
                    return Err(syn::Error::new(
                        alias.span(),
                        LayoutError::NameConflict { name: generated },
                    ));
                }
            }
        }

        let cells = (0..width)
            .map(|offset| {
                let position = arch.logical_at(direction, offset);
                CellPlan {
                    offset,
                    position,
                    aliases: snapshot.aliases(position).to_vec(),
                }
            })
            .collect();

        Ok(LayoutPlan {
            arch,
            direction,
            flavor,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Cells sorted by logical position.
    pub fn by_position(&self) -> Vec<&CellPlan> {
        let mut cells: Vec<_> = self.cells.iter().collect();
        cells.sort_by_key(|cell| cell.position);
        cells
    }
}

/// Everything about the emitted type that the caller names.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub name: Ident,
    pub arch: Arch,
    pub direction: Direction,
}

/// Renders layouts. `krate` is the path of the runtime crate as seen from
/// the expansion site.
pub struct LayoutGenerator {
    krate: TokenStream,
    native: Arch,
}

impl LayoutGenerator {
    pub fn new(krate: TokenStream, native: Arch) -> Self {
        LayoutGenerator { krate, native }
    }

    pub fn plan(
        &self,
        decl: &Declaration,
        flavor: Flavor,
        snapshot: &Snapshot,
    ) -> syn::Result<LayoutPlan> {
        // The overlaid word is stored by the target, so its bytes only line
        // up with the cells under the target's own descriptor.
        if flavor == Flavor::Pointer && decl.arch != self.native {
            return Err(syn::Error::new(
                decl.name.span(),
                LayoutError::WordArchMismatch {
                    native: self.native,
                    layout: decl.arch,
                },
            ));
        }
        LayoutPlan::new(decl.arch, decl.direction, flavor, snapshot, self.native)
    }

    /// Emits a struct of byte cells named `decl.name`.
    pub fn emit_layout(&self, decl: &Declaration, snapshot: &Snapshot) -> syn::Result<TokenStream> {
        let plan = self.plan(decl, Flavor::Plain, snapshot)?;
        let cells = self.cells(decl, &plan);
        let aggregate = self.byte_struct(&decl.name, &decl.attrs, &decl.vis, &decl.name, &plan);
        Ok(quote! {
            #cells
            #aggregate
        })
    }

    /// Emits a union of a byte-cell struct (`<name>Bytes`) and a `*mut ()`
    /// word, named `decl.name`.
    pub fn emit_union_layout(
        &self,
        decl: &Declaration,
        snapshot: &Snapshot,
    ) -> syn::Result<TokenStream> {
        let plan = self.plan(decl, Flavor::Pointer, snapshot)?;
        let cells = self.cells(decl, &plan);

        let name = &decl.name;
        let vis = &decl.vis;
        let attrs = &decl.attrs;
        let bytes_ty = format_ident!("{}Bytes", name);
        let bytes_doc = LitStr::new(&format!(" Byte cells of [`{name}`]."), name.span());
        let bytes_attrs: Vec<Attribute> = vec![syn::parse_quote!(#[doc = #bytes_doc])];
        let bytes_struct = self.byte_struct(&bytes_ty, &bytes_attrs, vis, name, &plan);

        let width = Literal::usize_unsuffixed(plan.width());
        let size_msg = lit(&format!(
            "endian_bytes: `{name}` must be exactly as large as a pointer"
        ));
        let name_str = lit(&name.to_string());

        let accessors = plan.by_position().into_iter().map(|cell| {
            let field = format_ident!("u8_{}", cell.position);
            let setter = format_ident!("set_u8_{}", cell.position);
            let aliases = cell
                .aliases
                .iter()
                .map(|alias| alias_accessors(vis, alias, AliasAccess::Forward));
            quote! {
                #[inline]
                #vis const fn #field(&self) -> u8 {
                    self.bytes().#field()
                }

                #[inline]
                #vis fn #setter(&mut self, value: u8) {
                    self.bytes_mut().#setter(value);
                }

                #(#aliases)*
            }
        });

        let common = self.common_impls(name, &plan);

        Ok(quote! {
            #cells
            #bytes_struct

            #(#attrs)*
            #[repr(C)]
            #[derive(Clone, Copy)]
            #vis union #name {
                #vis bytes: #bytes_ty,
                #vis word: *mut (),
            }

            const _: () = {
                assert!(
                    ::core::mem::size_of::<#name>() == ::core::mem::size_of::<*mut ()>(),
                    #size_msg
                );
            };

            impl #name {
                #vis const fn new() -> Self {
                    Self { bytes: #bytes_ty::new() }
                }

                /// Builds the value from bytes in physical memory order.
                #vis const fn from_bytes(bytes: [u8; #width]) -> Self {
                    Self { bytes: #bytes_ty::from_bytes(bytes) }
                }

                #vis const fn from_word(word: *mut ()) -> Self {
                    Self { word }
                }

                /// Returns the bytes in physical memory order.
                #vis const fn to_bytes(self) -> [u8; #width] {
                    self.bytes().to_bytes()
                }

                /// Reads the whole aggregate as a pointer. A word assembled
                /// from bytes carries no provenance.
                #[inline]
                #vis fn word(self) -> *mut () {
                    unsafe { self.word }
                }

                #[inline]
                #vis fn set_word(&mut self, word: *mut ()) {
                    self.word = word;
                }

                #[inline]
                #vis const fn bytes(&self) -> &#bytes_ty {
                    unsafe { &self.bytes }
                }

                #[inline]
                #vis fn bytes_mut(&mut self) -> &mut #bytes_ty {
                    unsafe { &mut self.bytes }
                }

                #(#accessors)*
            }

            impl ::core::fmt::Debug for #name {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    f.debug_struct(#name_str)
                        .field("bytes", self.bytes())
                        .field("word", &self.word())
                        .finish()
                }
            }

            #common
        })
    }

    /// One `#[repr(C)]` union per logical position.
    fn cells(&self, decl: &Declaration, plan: &LayoutPlan) -> TokenStream {
        let vis = &decl.vis;
        let cells = plan.cells.iter().map(|cell| {
            let cell_ty = cell_ident(&decl.name, cell.position);
            let doc = lit(&format!(
                " Byte `u8_{}` of [`{}`], stored at physical offset {}.",
                cell.position, decl.name, cell.offset
            ));
            let fields = cell.aliases.iter().map(|alias| {
                let alias_name = &alias.name;
                let ty = &alias.ty;
                quote! { #vis #alias_name: #ty, }
            });
            let checks = cell.aliases.iter().map(|alias| {
                let ty = &alias.ty;
                let msg = lit(&format!(
                    "endian_bytes: alias `{}` must be exactly one byte",
                    unraw(&alias.name)
                ));
                quote! { assert!(::core::mem::size_of::<#ty>() == 1, #msg); }
            });
            quote! {
                #[doc = #doc]
                #[repr(C)]
                #[derive(Clone, Copy)]
                #vis union #cell_ty {
                    #vis byte: u8,
                    #(#fields)*
                }

                const _: () = {
                    #(#checks)*
                };
            }
        });
        quote! { #(#cells)* }
    }

    /// The struct of cells: the aggregate itself for [`Flavor::Plain`], the
    /// `bytes` half of the overlay for [`Flavor::Pointer`].
    fn byte_struct(
        &self,
        name: &Ident,
        attrs: &[Attribute],
        vis: &Visibility,
        cell_owner: &Ident,
        plan: &LayoutPlan,
    ) -> TokenStream {
        let width = Literal::usize_unsuffixed(plan.width());
        let size_msg = lit(&format!("endian_bytes: `{name}` must not contain padding"));
        let name_str = lit(&name.to_string());

        let fields = plan.cells.iter().map(|cell| {
            let field = format_ident!("u8_{}", cell.position);
            let cell_ty = cell_ident(cell_owner, cell.position);
            quote! { #vis #field: #cell_ty, }
        });
        let from_bytes = plan.cells.iter().map(|cell| {
            let field = format_ident!("u8_{}", cell.position);
            let cell_ty = cell_ident(cell_owner, cell.position);
            let offset = Literal::usize_unsuffixed(cell.offset);
            quote! { #field: #cell_ty { byte: bytes[#offset] }, }
        });
        let to_bytes = plan.cells.iter().map(|cell| {
            let field = format_ident!("u8_{}", cell.position);
            quote! { self.#field.byte }
        });

        let by_position = plan.by_position();
        let accessors = by_position.iter().map(|cell| {
            let field = format_ident!("u8_{}", cell.position);
            let setter = format_ident!("set_u8_{}", cell.position);
            let aliases = cell
                .aliases
                .iter()
                .map(|alias| alias_accessors(vis, alias, AliasAccess::Cell(&field)));
            quote! {
                #[inline]
                #vis const fn #field(&self) -> u8 {
                    unsafe { self.#field.byte }
                }

                #[inline]
                #vis fn #setter(&mut self, value: u8) {
                    self.#field.byte = value;
                }

                #(#aliases)*
            }
        });
        let debug_fields = by_position.iter().map(|cell| {
            let field = format_ident!("u8_{}", cell.position);
            let field_str = lit(&field.to_string());
            quote! { .field(#field_str, &self.#field()) }
        });

        let common = self.common_impls(name, plan);

        quote! {
            #(#attrs)*
            #[repr(C)]
            #[derive(Clone, Copy)]
            #vis struct #name {
                #(#fields)*
            }

            const _: () = {
                assert!(::core::mem::size_of::<#name>() == #width, #size_msg);
            };

            impl #name {
                #vis const fn new() -> Self {
                    Self::from_bytes([0; #width])
                }

                /// Builds the value from bytes in physical memory order.
                #vis const fn from_bytes(bytes: [u8; #width]) -> Self {
                    Self {
                        #(#from_bytes)*
                    }
                }

                /// Returns the bytes in physical memory order.
                #vis const fn to_bytes(self) -> [u8; #width] {
                    unsafe { [#(#to_bytes),*] }
                }

                #(#accessors)*
            }

            impl ::core::fmt::Debug for #name {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    f.debug_struct(#name_str)
                        #(#debug_fields)*
                        .finish()
                }
            }

            #common
        }
    }

    /// `Default`, equality, hashing and `EndianBytes`, all in terms of the
    /// inherent API both flavors share.
    fn common_impls(&self, name: &Ident, plan: &LayoutPlan) -> TokenStream {
        let krate = &self.krate;
        let width = Literal::usize_unsuffixed(plan.width());
        let order = match plan.arch.order {
            ByteOrder::Little => quote!(Little),
            ByteOrder::Big => quote!(Big),
            ByteOrder::Middle => quote!(Middle),
        };
        let pointer_width = match plan.arch.width {
            PointerWidth::Four => quote!(Four),
            PointerWidth::Eight => quote!(Eight),
        };
        let direction = match plan.direction {
            Direction::Ascending => quote!(Ascending),
            Direction::Descending => quote!(Descending),
        };
        let by_position = plan.by_position();
        let getters = by_position.iter().map(|cell| {
            let position = Literal::usize_unsuffixed(cell.position);
            let field = format_ident!("u8_{}", cell.position);
            quote! { #position => self.#field(), }
        });
        let setters = by_position.iter().map(|cell| {
            let position = Literal::usize_unsuffixed(cell.position);
            let setter = format_ident!("set_u8_{}", cell.position);
            quote! { #position => self.#setter(value), }
        });

        quote! {
            impl ::core::default::Default for #name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl ::core::cmp::PartialEq for #name {
                fn eq(&self, other: &Self) -> bool {
                    self.to_bytes() == other.to_bytes()
                }
            }

            impl ::core::cmp::Eq for #name {}

            impl ::core::hash::Hash for #name {
                fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                    ::core::hash::Hash::hash(&self.to_bytes(), state);
                }
            }

            impl #krate::EndianBytes for #name {
                const ARCH: #krate::Arch =
                    #krate::Arch::new(#krate::ByteOrder::#order, #krate::PointerWidth::#pointer_width);
                const DIRECTION: #krate::Direction = #krate::Direction::#direction;

                fn byte(&self, position: usize) -> u8 {
                    match position {
                        #(#getters)*
                        _ => #krate::__private::position_out_of_range(position, #width),
                    }
                }

                fn set_byte(&mut self, position: usize, value: u8) {
                    match position {
                        #(#setters)*
                        _ => #krate::__private::position_out_of_range(position, #width),
                    }
                }
            }
        }
    }
}

/// Where an alias accessor finds its byte.
enum AliasAccess<'a> {
    /// In the named cell field of the struct itself.
    Cell(&'a Ident),
    /// Through the union's `bytes` view.
    Forward,
}

/// Unsafe getter and safe setter for one alias.
fn alias_accessors(vis: &Visibility, alias: &Alias, access: AliasAccess<'_>) -> TokenStream {
    let name = &alias.name;
    let setter = format_ident!("set_{}", unraw(name));
    let ty = &alias.ty;
    let (read, write) = match access {
        AliasAccess::Cell(field) => (
            quote! { self.#field.#name },
            quote! { self.#field.#name = value },
        ),
        AliasAccess::Forward => (
            quote! { self.bytes().#name() },
            quote! { self.bytes_mut().#setter(value) },
        ),
    };
    quote! {
        /// Reads the byte through this alias.
        ///
        /// # Safety
        /// The stored byte must be a valid value of the alias type.
        #[inline]
        #vis unsafe fn #name(&self) -> #ty {
            unsafe { #read }
        }

        #[inline]
        #vis fn #setter(&mut self, value: #ty) {
            #write;
        }
    }
}

fn cell_ident(owner: &Ident, position: usize) -> Ident {
    format_ident!("{}Byte{}", owner, position)
}

fn lit(value: &str) -> LitStr {
    LitStr::new(value, proc_macro2::Span::call_site())
}

fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
}

/// Size of `ty` when it can be read off the syntax alone.
fn known_size(ty: &Type, native: Arch) -> Option<usize> {
    match ty {
        Type::Paren(inner) => known_size(&inner.elem, native),
        Type::Group(inner) => known_size(&inner.elem, native),
        Type::Tuple(tuple) if tuple.elems.is_empty() => Some(0),
        Type::Array(array) => {
            let Expr::Lit(ExprLit {
                lit: Lit::Int(len), ..
            }) = &array.len
            else {
                return None;
            };
            let len: usize = len.base10_parse().ok()?;
            Some(known_size(&array.elem, native)? * len)
        }
        Type::Path(path) if path.qself.is_none() => {
            let ident = path.path.get_ident()?;
            match ident.to_string().as_str() {
                "u8" | "i8" | "bool" => Some(1),
                "u16" | "i16" => Some(2),
                "u32" | "i32" | "f32" | "char" => Some(4),
                "u64" | "i64" | "f64" => Some(8),
                "u128" | "i128" => Some(16),
                "usize" | "isize" => Some(native.bytes()),
                _ => None,
            }
        }
        _ => None,
    }
}
