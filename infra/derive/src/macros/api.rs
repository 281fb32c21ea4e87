use fxhash::FxHashSet;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ItemFn, ItemStruct, Lit, LitStr, Meta, MetaNameValue, Token};

const DEFAULT_RENAME: &str = "camelCase";

#[derive(Default)]
struct ApiModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

/// Serde settings already present on the struct.
#[derive(Default)]
struct SerdeAttrs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

/// Expands `#[api_model]`: common derives, optional `ToSchema`, and the serde policy.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match api_model_tokens(args, &input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn api_model_tokens(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let args = parse_api_model_args(args)?;
    let derives = derived_trait_names(&input.attrs);
    let serde = serde_attrs(&input.attrs)?;

    let mut missing = Vec::new();
    for (name, path) in [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ] {
        if !derives.contains(name) {
            missing.push(path);
        }
    }
    let derive_attr = if missing.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#missing),*)] }
    };

    let schema_attr = if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    let rename = args.rename_all.unwrap_or_else(|| LitStr::new(DEFAULT_RENAME, Span::call_site()));
    let rename_attr = match &serde.rename_all {
        Some(existing) if existing.value() != rename.value() => {
            return Err(syn::Error::new_spanned(
                existing,
                "Conflicting serde rename_all; remove it or set api_model(rename_all = \"...\") to match",
            ));
        },
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #rename)] },
    };

    let deny = args.deny_unknown_fields.unwrap_or(true);
    let deny_attr = match (serde.deny_unknown_fields, deny) {
        (true, false) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set via serde; remove it before disabling",
            ));
        },
        (false, true) => quote! { #[serde(deny_unknown_fields)] },
        _ => quote! {},
    };

    Ok(quote! {
        #derive_attr
        #schema_attr
        #rename_attr
        #deny_attr
        #input
    })
}

/// Expands `#[api_handler]`, forwarding the arguments to `utoipa::path`.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig #block
    }
}

fn parse_api_model_args(args: TokenStream) -> syn::Result<ApiModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = ApiModelArgs::default();

    for meta in metas {
        let nv = match meta {
            Meta::NameValue(nv) => nv,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Expected name-value arguments like `rename_all = \"...\"`",
                ));
            },
        };

        if nv.path.is_ident("rename_all") {
            let Lit::Str(lit) = literal(&nv, "rename_all")? else {
                return Err(syn::Error::new_spanned(&nv.value, "rename_all must be a string literal"));
            };
            reject_duplicate(parsed.rename_all.is_some(), &nv)?;
            parsed.rename_all = Some(lit);
        } else if nv.path.is_ident("deny_unknown_fields") {
            let Lit::Bool(lit) = literal(&nv, "deny_unknown_fields")? else {
                return Err(syn::Error::new_spanned(
                    &nv.value,
                    "deny_unknown_fields must be a boolean literal",
                ));
            };
            reject_duplicate(parsed.deny_unknown_fields.is_some(), &nv)?;
            parsed.deny_unknown_fields = Some(lit.value);
        } else {
            return Err(syn::Error::new_spanned(
                nv.path,
                "Unsupported argument; expected rename_all or deny_unknown_fields",
            ));
        }
    }

    Ok(parsed)
}

fn literal(nv: &MetaNameValue, label: &str) -> syn::Result<Lit> {
    match &nv.value {
        Expr::Lit(expr) => Ok(expr.lit.clone()),
        other => Err(syn::Error::new_spanned(other, format!("{label} must be a literal"))),
    }
}

fn reject_duplicate(already_set: bool, nv: &MetaNameValue) -> syn::Result<()> {
    if already_set {
        return Err(syn::Error::new_spanned(nv, "Duplicate argument"));
    }
    Ok(())
}

fn serde_attrs(attrs: &[Attribute]) -> syn::Result<SerdeAttrs> {
    let mut found = SerdeAttrs::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                found.rename_all = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                found.deny_unknown_fields = true;
            } else if meta.input.peek(Token![=]) {
                // Other serde options are left untouched.
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }

    Ok(found)
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
