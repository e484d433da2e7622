use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, Ident, Result, Type, parse_macro_input};

/// Derive macro for configuration sections with inline default values and
/// optional positivity checks.
///
/// Every field needs a `#[default(...)]` attribute holding any Rust
/// expression. String fields accept string literals directly; everything
/// else relies on type inference.
///
/// Fields additionally marked `#[positive]` take part in a generated
/// `first_non_positive()` method, which returns the name and value of the
/// first such field that is not a finite, strictly positive number. The
/// field type must convert losslessly into `f64`.
///
/// # Example
/// ```
/// use pendulum_macros::ConfigDefaults;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(ConfigDefaults, Serialize, Deserialize)]
/// #[serde(default)]
/// pub struct PhysicsConfig {
///     #[default(9.81)]
///     #[positive]
///     pub gravity: f64,
///
///     #[default(1.0)]
///     #[positive]
///     pub arm_length: f64,
///
///     #[default("earth")]
///     pub label: String,
/// }
///
/// let mut config = PhysicsConfig::default();
/// assert_eq!(config.gravity, 9.81);
/// assert_eq!(config.label, "earth");
/// assert_eq!(config.first_non_positive(), None);
///
/// config.arm_length = 0.0;
/// assert_eq!(config.first_non_positive(), Some(("arm_length", 0.0)));
/// ```
///
/// # Errors
///
/// Compilation fails if:
/// - the macro is applied to anything other than a struct with named fields
/// - a field is missing its `#[default(...)]` attribute, or it is empty
/// - `#[positive]` is given arguments
#[proc_macro_derive(ConfigDefaults, attributes(default, positive))]
pub fn config_defaults(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// What the derive needs to know about one field.
struct FieldSpec<'a> {
    ident: &'a Ident,
    default: proc_macro2::TokenStream,
    is_string: bool,
    positive: bool,
}

impl<'a> FieldSpec<'a> {
    fn parse(field: &'a Field) -> Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "ConfigDefaults requires named fields"))?;

        Ok(Self {
            ident,
            default: default_value(field, ident)?,
            is_string: is_string_type(&field.ty),
            positive: is_marked_positive(field)?,
        })
    }

    fn initializer(&self) -> proc_macro2::TokenStream {
        let ident = self.ident;
        let value = &self.default;

        if self.is_string {
            quote! { #ident: ::std::convert::Into::into(#value) }
        } else {
            quote! { #ident: #value }
        }
    }

    fn positivity_check(&self) -> proc_macro2::TokenStream {
        let ident = self.ident;
        let name = ident.to_string();

        quote! {
            let value = ::std::convert::Into::<f64>::into(self.#ident);
            if !(value.is_finite() && value > 0.0) {
                return ::std::option::Option::Some((#name, value));
            }
        }
    }
}

fn expand(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(_) => {
                return Err(Error::new_spanned(
                    &input,
                    "ConfigDefaults only supports structs with named fields",
                ));
            }
            Fields::Unit => {
                return Err(Error::new_spanned(
                    &input,
                    "ConfigDefaults cannot be derived for unit structs",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new_spanned(
                &input,
                "ConfigDefaults can only be derived for structs",
            ));
        }
    };

    let specs = fields
        .iter()
        .map(FieldSpec::parse)
        .collect::<Result<Vec<_>>>()?;

    let initializers = specs.iter().map(FieldSpec::initializer);

    let default_impl = quote! {
        #[automatically_derived]
        impl #impl_generics ::std::default::Default for #name #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#initializers),*
                }
            }
        }
    };

    let checks: Vec<_> = specs
        .iter()
        .filter(|spec| spec.positive)
        .map(FieldSpec::positivity_check)
        .collect();

    if checks.is_empty() {
        return Ok(default_impl);
    }

    Ok(quote! {
        #default_impl

        #[automatically_derived]
        impl #impl_generics #name #ty_generics #where_clause {
            /// Name and value of the first `#[positive]` field that is not a
            /// finite, strictly positive number.
            pub fn first_non_positive(&self) -> ::std::option::Option<(&'static str, f64)> {
                #(#checks)*
                ::std::option::Option::None
            }
        }
    })
}

fn is_string_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "String";
        }
    }
    false
}

fn is_marked_positive(field: &Field) -> Result<bool> {
    for attr in &field.attrs {
        if attr.path().is_ident("positive") {
            attr.meta.require_path_only().map_err(|_| {
                Error::new_spanned(attr, "#[positive] does not take any arguments")
            })?;
            return Ok(true);
        }
    }
    Ok(false)
}

/// Tokens inside the field's `#[default(...)]` attribute.
fn default_value(field: &Field, ident: &Ident) -> Result<proc_macro2::TokenStream> {
    let attr = field
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("default"))
        .ok_or_else(|| {
            Error::new_spanned(
                field,
                format!("Field '{ident}' must have a #[default(...)] attribute specifying its default value"),
            )
        })?;

    let tokens: proc_macro2::TokenStream = attr.parse_args().map_err(|e| {
        Error::new_spanned(
            attr,
            format!("Failed to parse default attribute for field '{ident}': {e}"),
        )
    })?;

    if tokens.is_empty() {
        return Err(Error::new_spanned(
            attr,
            format!("Field '{ident}' has an empty #[default()] attribute"),
        ));
    }

    Ok(tokens)
}
