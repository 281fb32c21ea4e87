use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitInt, Type, Variant};

const DEFAULT_STATUS: u16 = 500;

struct VariantMeta {
    ident: Ident,
    source_ty: Option<Type>,
    source_field: Option<Ident>,
    has_context: bool,
    status: Option<u16>,
    cfg_attrs: Vec<Attribute>,
}

pub fn expand_derive(mut input: DeriveInput) -> TokenStream {
    let name = input.ident.clone();
    let trait_name = format_ident!("{}Ext", name);

    let Data::Enum(data) = &mut input.data else {
        return quote! { compile_error!("qrgen_error can only be applied to enums"); };
    };

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &mut data.variants {
        match parse_variant(variant) {
            Ok(meta) => variants.push(meta),
            Err(err) => return err,
        }
    }
    if let Some(err) = variants_error(&variants) {
        return err;
    }

    let derived = derived_trait_names(&input.attrs);
    let mut derive_tokens = Vec::new();
    if !derived.contains("Debug") {
        derive_tokens.push(quote! { Debug });
    }
    if !derived.contains("Error") {
        derive_tokens.push(quote! { ::thiserror::Error });
    }
    let extra_derives = if derive_tokens.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#derive_tokens),*)] }
    };

    let context_impl = generate_context_trait(&name, &trait_name, &variants);
    let status_impl = generate_status_impl(&name, &variants);
    let from_impls = variants.iter().filter_map(|v| generate_from_impl(&name, &trait_name, v));
    let internal_impls = generate_internal_impls(&name, &variants);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #extra_derives
        #input

        #context_impl
        #status_impl
        #(#from_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

/// Collects variant metadata and strips the `#[status(..)]` helper so `thiserror` never sees it.
fn parse_variant(v: &mut Variant) -> Result<VariantMeta, TokenStream> {
    let status = take_status(&mut v.attrs)?;

    let Fields::Named(fields) = &v.fields else {
        return Err(syn::Error::new_spanned(
            &*v,
            "qrgen_error requires named fields for source/context handling",
        )
        .to_compile_error());
    };

    let has_context = has_context_field(fields)?;
    let source = fields.named.iter().find(|field| {
        field.ident.as_ref().is_some_and(|ident| ident == "source")
            || field_has_attr(field, "source")
            || field_has_attr(field, "from")
    });

    Ok(VariantMeta {
        ident: v.ident.clone(),
        source_ty: source.map(|field| field.ty.clone()),
        source_field: source.and_then(|field| field.ident.clone()),
        has_context,
        status,
        cfg_attrs: v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect(),
    })
}

fn take_status(attrs: &mut Vec<Attribute>) -> Result<Option<u16>, TokenStream> {
    let mut status = None;
    let mut kept = Vec::with_capacity(attrs.len());

    for attr in attrs.drain(..) {
        if !attr.path().is_ident("status") {
            kept.push(attr);
            continue;
        }
        if status.is_some() {
            return Err(syn::Error::new_spanned(attr, "Duplicate #[status(..)] attribute")
                .to_compile_error());
        }
        let code: LitInt = attr.parse_args().map_err(|err| err.to_compile_error())?;
        let code = code.base10_parse::<u16>().map_err(|err| err.to_compile_error())?;
        if !(100..=599).contains(&code) {
            return Err(syn::Error::new_spanned(attr, "status must be within 100..=599")
                .to_compile_error());
        }
        status = Some(code);
    }

    *attrs = kept;
    Ok(status)
}

fn has_context_field(fields: &syn::FieldsNamed) -> Result<bool, TokenStream> {
    let Some(field) =
        fields.named.iter().find(|field| field.ident.as_ref().is_some_and(|i| i == "context"))
    else {
        return Ok(false);
    };
    if !is_context_type(&field.ty) {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "context field must be Option<Cow<'static, str>>",
        )
        .to_compile_error());
    }
    Ok(true)
}

fn generate_context_trait(name: &Ident, trait_name: &Ident, variants: &[VariantMeta]) -> TokenStream {
    let context_arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = &v.ident;
        quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });

    quote! {
        pub trait #trait_name<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #trait_name<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    match &mut e {
                        #( #context_arms )*
                        _ => {}
                    }
                    e
                })
            }
        }
    }
}

fn generate_status_impl(name: &Ident, variants: &[VariantMeta]) -> TokenStream {
    let arms = variants.iter().filter_map(|v| {
        let code = v.status?;
        let cfg_attrs = &v.cfg_attrs;
        let ident = &v.ident;
        Some(quote! { #(#cfg_attrs)* Self::#ident { .. } => #code, })
    });

    quote! {
        #[automatically_derived]
        impl #name {
            /// HTTP status code associated with this error.
            #[must_use]
            #[allow(clippy::match_same_arms, unreachable_patterns)]
            pub const fn status_code(&self) -> u16 {
                match self {
                    #( #arms )*
                    _ => #DEFAULT_STATUS,
                }
            }
        }
    }
}

fn generate_from_impl(name: &Ident, trait_name: &Ident, v: &VariantMeta) -> Option<TokenStream> {
    if v.ident == "Internal" {
        return None;
    }
    let source_ty = v.source_ty.as_ref()?;
    let source_field = v.source_field.as_ref()?;
    let v_ident = &v.ident;
    let cfg_attrs = &v.cfg_attrs;

    Some(quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#source_ty> for #name {
            #[inline]
            fn from(#source_field: #source_ty) -> Self { Self::#v_ident { #source_field, context: None } }
        }

        #(#cfg_attrs)*
        impl<T> #trait_name<T> for std::result::Result<T, #source_ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> std::result::Result<T, #name> {
                self.map_err(|#source_field| #name::#v_ident { #source_field, context: Some(context.into()) })
            }
        }
    })
}

fn generate_internal_impls(name: &Ident, variants: &[VariantMeta]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == "Internal") else {
        return quote!();
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
        }
    }
}

fn field_has_attr(field: &syn::Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn derived_trait_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(seg) = meta.path.segments.last() {
                traits.insert(seg.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}

fn variants_error(variants: &[VariantMeta]) -> Option<TokenStream> {
    variants.iter().find(|v| v.source_ty.is_some() && !v.has_context).map(|v| {
        syn::Error::new_spanned(
            &v.ident,
            "qrgen_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        )
        .to_compile_error()
    })
}

/// Matches `Option<Cow<'static, str>>` by its last path segments.
fn is_context_type(ty: &Type) -> bool {
    let Some(option) = last_segment(ty).filter(|seg| seg.ident == "Option") else {
        return false;
    };
    let syn::PathArguments::AngleBracketed(args) = &option.arguments else {
        return false;
    };
    let Some(syn::GenericArgument::Type(cow_ty)) = args.args.first() else {
        return false;
    };
    let Some(cow) = last_segment(cow_ty).filter(|seg| seg.ident == "Cow") else {
        return false;
    };
    let syn::PathArguments::AngleBracketed(cow_args) = &cow.arguments else {
        return false;
    };

    let mut iter = cow_args.args.iter();
    let lifetime_ok =
        matches!(iter.next(), Some(syn::GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_ok = matches!(
        iter.next(),
        Some(syn::GenericArgument::Type(str_ty)) if last_segment(str_ty).is_some_and(|seg| seg.ident == "str")
    );
    lifetime_ok && str_ok
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(path) = ty else {
        return None;
    };
    path.path.segments.last()
}
