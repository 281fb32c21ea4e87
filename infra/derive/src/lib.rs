#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the service crates: error enums, API models and handlers,
//! feature slices and the runtime bootstrap.
//!
//! Examples below are `ignore`d because a proc-macro crate cannot use its own macros in doctests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the Tokio runtime from a `qrgen_runtime` profile.
///
/// Turns an `async fn main() -> Result<..>` into a plain `fn main` that builds the runtime and
/// blocks on the body.
///
/// # Arguments
///
/// * `high_performance` - Server profile (larger stacks, longer keep-alive).
/// * `memory_efficient` - Small footprint profile.
/// * `default` - Worker threads auto-detected, default stack.
///
/// # Examples
///
/// ```rust,ignore
/// #[qrgen_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Defines a request/response DTO.
///
/// * Adds `Debug`, `Serialize` and `Deserialize` derives when missing.
/// * Adds `utoipa::ToSchema` when the consuming crate enables its `server` feature.
/// * Applies `rename_all = "camelCase"` and `deny_unknown_fields` unless told otherwise.
///
/// # Example
///
/// ```rust,ignore
/// #[api_model(deny_unknown_fields = false)]
/// pub struct PreviewResponse {
///     pub image: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an Axum handler with the `OpenAPI` document.
///
/// Accepts the usual `utoipa::path` arguments. The `utoipa::path` attribute is only emitted
/// when the consuming crate enables its `server` feature.
///
/// # Example
///
/// ```rust,ignore
/// #[api_handler(
///     post,
///     path = "/generate-preview",
///     responses((status = OK, body = PreviewResponse)),
///     tag = GENERATOR_TAG,
/// )]
/// pub async fn preview_handler(body: Bytes) -> Result<Json<PreviewResponse>, GeneratorError> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Defines a domain error enum.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a source field.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * **HTTP Status**: Variants may carry `#[status(400)]`; a `status_code()` method returns the
///   annotated code, or `500` for unannotated variants.
///
/// # Requirements
///
/// 1. Enums only, with named-field variants (tuple variants are rejected).
/// 2. Variants with a source must also have `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// #[qrgen_error]
/// pub enum GeneratorError {
///     #[status(400)]
///     #[error("Please provide a link or text")]
///     EmptyLink { context: Option<Cow<'static, str>> },
///
///     #[error("Image encoding error{}: {source}", format_context(.context))]
///     Image { source: image::ImageError, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn qrgen_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Defines a feature slice handle.
///
/// Generates `<Name>Inner` with the declared fields, an `Arc` wrapper named `<Name>` with
/// `Deref` to the inner state, and a `FeatureSlice` impl for registration in the kernel.
///
/// # Example
/// ```rust,ignore
/// #[qrgen_derive::qrgen_slice]
/// pub struct Generator {
///     pub archive: ArchiveConfig,
/// }
///
/// let slice = Generator::new(GeneratorInner { archive });
/// ```
#[proc_macro_attribute]
pub fn qrgen_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
