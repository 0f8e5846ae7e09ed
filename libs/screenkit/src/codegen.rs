//! Renders filled symbols as Rust source against `screenkit_runtime`.
//!
//! Container members become associated items of an inherent `impl`; owner members take the
//! controller instance explicitly. Argument and binding types are carried as their qualified
//! names and checked at runtime by the bundle and binder registry.

use std::collections::HashMap;

use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;

use crate::error::ScreenError;
use crate::model::QualifiedName;
use crate::session::{CompilationSession, Phase};
use crate::symbols::{Body, SynthesizedSymbol, TypeRef, Visibility};

/// Renders one `impl` block per matched owner that received any symbol.
///
/// # Errors
/// `PhaseOrder` before phase 2, `InvalidIdentifier` when an owner or member name is not a
/// Rust identifier, `RenderCollision` when two rendered owners share a simple name.
pub fn render_unit(session: &CompilationSession) -> Result<String, ScreenError> {
    session.require_at_least("render", Phase::BodiesSynthesized)?;
    let mut rendered: HashMap<&str, &QualifiedName> = HashMap::new();
    let mut out = String::new();
    for candidate in session.candidates().iter() {
        let Some(tokens) = render_owner(session, &candidate.owner)? else {
            continue;
        };
        let name = candidate.owner.short_name();
        if let Some(first) = rendered.insert(name, &candidate.owner) {
            return Err(ScreenError::RenderCollision {
                name: name.to_owned(),
                first: first.clone(),
                second: candidate.owner.clone(),
            });
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("// ");
        out.push_str(candidate.owner.as_str());
        out.push('\n');
        out.push_str(&tokens.to_string());
        out.push('\n');
    }
    Ok(out)
}

/// `None` when the owner has no filled symbols (unmatched, or suppressed by a diagnostic).
///
/// # Errors
/// `InvalidIdentifier` when an owner or member name is not a Rust identifier.
pub fn render_owner(
    session: &CompilationSession,
    owner: &QualifiedName,
) -> Result<Option<TokenStream>, ScreenError> {
    let Some(decl) = session.unit().lookup(owner) else {
        return Ok(None);
    };
    let mut items = Vec::new();
    for symbol in session.symbols().for_owner(decl) {
        if let Some(item) = render_symbol(symbol)? {
            items.push(item);
        }
    }
    if items.is_empty() {
        return Ok(None);
    }
    let ty = ident(owner.short_name())?;
    Ok(Some(quote! {
        impl #ty {
            #(#items)*
        }
    }))
}

fn render_symbol(symbol: &SynthesizedSymbol) -> Result<Option<TokenStream>, ScreenError> {
    let Some(body) = symbol.filled_body() else {
        return Ok(None);
    };
    let vis = match symbol.visibility {
        Visibility::Public => quote!(pub),
        Visibility::Private => quote!(),
    };
    let tokens = match body {
        Body::Empty => return Ok(None),
        Body::StringLiteral { value } => {
            let name = ident(&symbol.name)?;
            quote! {
                #vis const #name: &str = #value;
            }
        }
        Body::ReadArgument { key, ty, nullable } => {
            let name = ident(&symbol.name.to_snake_case())?;
            let ty = ty.as_str();
            if *nullable {
                quote! {
                    #vis fn #name(
                        controller: &::screenkit_runtime::Controller,
                    ) -> ::core::result::Result<
                        ::core::option::Option<::screenkit_runtime::Parcel>,
                        ::screenkit_runtime::RuntimeError,
                    > {
                        ::core::result::Result::Ok(controller.arguments().get_typed(#key, #ty).cloned())
                    }
                }
            } else {
                quote! {
                    #vis fn #name(
                        controller: &::screenkit_runtime::Controller,
                    ) -> ::core::result::Result<::screenkit_runtime::Parcel, ::screenkit_runtime::RuntimeError> {
                        controller.arguments().require(#key, #ty).cloned()
                    }
                }
            }
        }
        Body::CreateScreen {
            key,
            owner,
            parameter,
        } => {
            let name = ident(&symbol.name.to_snake_case())?;
            render_factory(&vis, &name, key, owner, parameter.as_ref())
        }
        Body::LazyBind { binding } => {
            let name = ident(&symbol.name.to_snake_case())?;
            let binding = binding.as_str();
            quote! {
                #vis fn #name(
                    controller: &::screenkit_runtime::Controller,
                    binders: &::screenkit_runtime::BinderRegistry,
                ) -> ::core::result::Result<
                    ::std::sync::Arc<::screenkit_runtime::BoundView>,
                    ::screenkit_runtime::RuntimeError,
                > {
                    let binder = binders.get(#binding)?;
                    controller.binding_or_init(binder.as_ref())
                }
            }
        }
    };
    Ok(Some(tokens))
}

fn render_factory(
    vis: &TokenStream,
    name: &syn::Ident,
    key: &str,
    owner: &QualifiedName,
    parameter: Option<&TypeRef>,
) -> TokenStream {
    let owner = owner.as_str();
    let (params, store) = match parameter {
        None => (quote!(), quote!()),
        Some(ty) if ty.nullable => (
            quote!(arg: ::core::option::Option<::screenkit_runtime::Parcel>),
            quote! {
                if let ::core::option::Option::Some(arg) = arg {
                    arguments.put(#key, arg);
                }
            },
        ),
        Some(_) => (
            quote!(arg: ::screenkit_runtime::Parcel),
            quote! {
                arguments.put(#key, arg);
            },
        ),
    };
    quote! {
        #[must_use]
        #vis fn #name(#params) -> ::screenkit_runtime::NavigationDescriptor {
            #[allow(unused_mut)]
            let mut arguments = ::screenkit_runtime::Bundle::new();
            #store
            ::screenkit_runtime::NavigationDescriptor::new(#key, move || {
                ::screenkit_runtime::Controller::new(#owner).with_arguments(arguments.clone())
            })
        }
    }
}

fn ident(name: &str) -> Result<syn::Ident, ScreenError> {
    syn::parse_str::<syn::Ident>(name).map_err(|_| ScreenError::InvalidIdentifier {
        name: name.to_owned(),
    })
}
