//! Mappable derive macro implementation

use proc_macro::TokenStream;
use proc_macro2::{Group, TokenStream as TokenStream2, TokenTree};
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Type, parse_macro_input};

use crate::attributes::{FieldRole, Target, parse_field_role};

/// A field that takes part in reflection
struct ReflectedField {
    ident:    Ident,
    ty:       Type,
    private:  bool,
    readonly: bool,
    target:   Option<Box<Target>>,
}

/// The `#[mapping(base)]` field
struct BaseField {
    ident: Ident,
    ty:    Type,
}

/// Implementation of the Mappable derive macro
pub fn derive_mappable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            struct_name,
            "Mappable can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data_struct.fields else {
        return Err(syn::Error::new_spanned(
            struct_name,
            "Mappable can only be derived for structs with named fields",
        ));
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Mappable cannot be derived for generic structs",
        ));
    }

    let mut reflected = Vec::new();
    let mut base: Option<BaseField> = None;

    for field in &named.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        match parse_field_role(&field.attrs)? {
            FieldRole::Skip => {}
            FieldRole::Base => {
                if base.is_some() {
                    return Err(syn::Error::new_spanned(
                        field,
                        "only one field can be marked `#[mapping(base)]`",
                    ));
                }
                base = Some(BaseField {
                    ident,
                    ty: field.ty.clone(),
                });
            }
            FieldRole::Field { target, readonly } => reflected.push(ReflectedField {
                ident,
                ty: field.ty.clone(),
                private: matches!(field.vis, syn::Visibility::Inherited),
                readonly,
                target,
            }),
        }
    }

    let typed_impl = generate_typed_impl(struct_name, &reflected, base.as_ref());
    let reflect_impl = generate_reflect_impl(struct_name, &reflected, base.as_ref());

    Ok(quote! {
        #typed_impl
        #reflect_impl
    })
}

/// `Typed` impl holding the static field and type tables
fn generate_typed_impl(
    struct_name: &Ident,
    reflected: &[ReflectedField],
    base: Option<&BaseField>,
) -> TokenStream2 {
    let field_count = reflected.len();
    let field_infos = reflected
        .iter()
        .map(|field| generate_field_info(struct_name, field));
    let with_base = base.map(|base| {
        let ty = replace_self(&base.ty, struct_name);
        quote! { .with_base(<#ty as ::fieldmap::Typed>::info) }
    });

    quote! {
        #[automatically_derived]
        impl ::fieldmap::Typed for #struct_name {
            fn info() -> &'static ::fieldmap::TypeInfo {
                static FIELDS: [::fieldmap::FieldInfo; #field_count] = [
                    #(#field_infos,)*
                ];
                static INFO: ::fieldmap::TypeInfo = ::fieldmap::TypeInfo::new(
                    ::std::any::type_name::<#struct_name>,
                    ::std::any::TypeId::of::<#struct_name>,
                    &FIELDS,
                ) #with_base;
                &INFO
            }
        }
    }
}

/// `Reflect` impl with the by-name accessors and the base sub-object
fn generate_reflect_impl(
    struct_name: &Ident,
    reflected: &[ReflectedField],
    base: Option<&BaseField>,
) -> TokenStream2 {
    let read_arms = reflected.iter().map(generate_read_arm);
    let assign_arms = reflected
        .iter()
        .filter(|field| !field.readonly)
        .map(generate_assign_arm);
    let (base_ref, base_mut) = base.map_or_else(
        || (quote! { None }, quote! { None }),
        |base| {
            let ident = &base.ident;
            (quote! { Some(&self.#ident) }, quote! { Some(&mut self.#ident) })
        },
    );

    quote! {
        #[automatically_derived]
        impl ::fieldmap::Reflect for #struct_name {
            fn type_info(&self) -> &'static ::fieldmap::TypeInfo {
                <Self as ::fieldmap::Typed>::info()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn base(&self) -> ::std::option::Option<&dyn ::fieldmap::Reflect> {
                #base_ref
            }

            fn base_mut(&mut self) -> ::std::option::Option<&mut dyn ::fieldmap::Reflect> {
                #base_mut
            }

            fn declared_field(&self, name: &str) -> ::std::option::Option<&dyn ::std::any::Any> {
                match name {
                    #(#read_arms,)*
                    _ => None,
                }
            }

            fn assign_declared_field(&mut self, name: &str, value: &dyn ::std::any::Any) -> bool {
                match name {
                    #(#assign_arms,)*
                    _ => {
                        let _ = value;
                        false
                    }
                }
            }
        }
    }
}

/// Statics cannot name `Self`, so every `Self` in `ty` becomes the struct's own name
fn replace_self(ty: &Type, struct_name: &Ident) -> TokenStream2 {
    replace_self_tokens(ty.to_token_stream(), struct_name)
}

fn replace_self_tokens(tokens: TokenStream2, struct_name: &Ident) -> TokenStream2 {
    tokens
        .into_iter()
        .map(|token| match token {
            TokenTree::Ident(ident) if ident == "Self" => {
                TokenTree::Ident(Ident::new(&struct_name.to_string(), ident.span()))
            }
            TokenTree::Group(group) => {
                let mut replaced = Group::new(
                    group.delimiter(),
                    replace_self_tokens(group.stream(), struct_name),
                );
                replaced.set_span(group.span());
                TokenTree::Group(replaced)
            }
            other => other,
        })
        .collect()
}

/// `FieldInfo::new(..)` plus the builder calls for visibility, mutability and mapping
fn generate_field_info(struct_name: &Ident, field: &ReflectedField) -> TokenStream2 {
    let name = field_name(&field.ident);
    let ty = replace_self(&field.ty, struct_name);

    let private = field.private.then(|| quote! { .private() });
    let immutable = field.readonly.then(|| quote! { .immutable() });
    let mapped = field.target.as_ref().map(|target| {
        let target_ty = replace_self(&target.ty, struct_name);
        let target_field = target
            .field
            .clone()
            .unwrap_or_else(|| LitStr::new(&name, field.ident.span()));
        quote! {
            .mapped(::fieldmap::MappingDescriptor::new(
                ::std::any::type_name::<#target_ty>,
                ::std::any::TypeId::of::<#target_ty>,
                #target_field,
            ))
        }
    });

    quote! {
        ::fieldmap::FieldInfo::new(
            #name,
            ::std::any::type_name::<#ty>,
            ::std::any::TypeId::of::<#ty>,
        )
        #private
        #immutable
        #mapped
    }
}

/// Name used for by-name lookup, without any `r#` prefix
fn field_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

fn generate_read_arm(field: &ReflectedField) -> TokenStream2 {
    let ident = &field.ident;
    let name = field_name(ident);
    quote! { #name => Some(&self.#ident) }
}

fn generate_assign_arm(field: &ReflectedField) -> TokenStream2 {
    let ident = &field.ident;
    let ty = &field.ty;
    let name = field_name(ident);
    quote! {
        #name => match value.downcast_ref::<#ty>() {
            Some(value) => {
                self.#ident = ::std::clone::Clone::clone(value);
                true
            }
            None => false,
        }
    }
}
