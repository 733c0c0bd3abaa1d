use proc_macro2::{Ident, TokenStream, TokenTree};
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{Data, DataStruct, DeriveInput, Fields, Type, Visibility};

use crate::attrs::FieldAttributes;

/// Generate the `Reflect` and `Struct` impls for a struct with named fields.
pub(crate) fn expand_form(input: &DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => named.named.iter().collect::<Vec<_>>(),
        Data::Struct(DataStruct {
            fields: Fields::Unit,
            ..
        }) => Vec::new(),
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "`Form` can only be derived for structs with named fields",
            ));
        }
    };

    let mut infos = Vec::with_capacity(fields.len());
    let mut indices = Vec::with_capacity(fields.len());
    let mut members = Vec::with_capacity(fields.len());
    let mut bounded = Vec::new();

    let type_params: Vec<&Ident> = input.generics.type_params().map(|p| &p.ident).collect();

    for (index, field) in fields.iter().enumerate() {
        let attrs = FieldAttributes::parse(&field.attrs)?;
        let Some(member) = field.ident.as_ref() else {
            continue;
        };
        let name = member.unraw().to_string();
        let tag = match &attrs.tag {
            Some(lit) => quote!(::core::option::Option::Some(#lit)),
            None => quote!(::core::option::Option::None),
        };
        let public = !matches!(field.vis, Visibility::Inherited);
        let embedded = attrs.flatten;

        infos.push(quote! {
            ::urlform::reflect::FieldInfo {
                ident: #name,
                tag: #tag,
                public: #public,
                embedded: #embedded,
            }
        });

        if !attrs.excluded() {
            indices.push(index);
            members.push(member.clone());
            if mentions_type_param(&field.ty, &type_params) {
                bounded.push(&field.ty);
            }
        }
    }

    let struct_name = ident.unraw().to_string();
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();

    // the user's predicates, plus `Reflect` for every field type that names
    // a type parameter
    let mut predicates: Vec<TokenStream> = input
        .generics
        .where_clause
        .iter()
        .flat_map(|clause| clause.predicates.iter())
        .map(ToTokens::to_token_stream)
        .collect();
    predicates.extend(
        bounded
            .iter()
            .map(|ty| quote!(#ty: ::urlform::reflect::Reflect)),
    );
    let where_clause = if predicates.is_empty() {
        TokenStream::new()
    } else {
        quote!(where #(#predicates),*)
    };

    Ok(quote! {
        impl #impl_generics ::urlform::reflect::Reflect for #ident #ty_generics #where_clause {
            fn reflect_ref(&self) -> ::urlform::reflect::ReflectRef<'_> {
                ::urlform::reflect::ReflectRef::Struct(self)
            }

            fn reflect_mut(&mut self) -> ::urlform::reflect::ReflectMut<'_> {
                ::urlform::reflect::ReflectMut::Struct(self)
            }
        }

        impl #impl_generics ::urlform::reflect::Struct for #ident #ty_generics #where_clause {
            fn struct_name(&self) -> &'static str {
                #struct_name
            }

            fn descriptors(&self) -> &'static [::urlform::tags::FieldDescriptor] {
                static DESCRIPTORS: ::std::sync::OnceLock<
                    ::std::vec::Vec<::urlform::tags::FieldDescriptor>,
                > = ::std::sync::OnceLock::new();
                DESCRIPTORS.get_or_init(|| ::urlform::tags::describe(&[#(#infos),*]))
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::urlform::reflect::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#members),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::urlform::reflect::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#members),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// Whether `ty` names one of the struct's type parameters anywhere inside it.
fn mentions_type_param(ty: &Type, params: &[&Ident]) -> bool {
    fn walk(tokens: TokenStream, params: &[&Ident]) -> bool {
        tokens.into_iter().any(|tree| match tree {
            TokenTree::Ident(ident) => params.iter().any(|param| **param == ident),
            TokenTree::Group(group) => walk(group.stream(), params),
            _ => false,
        })
    }

    !params.is_empty() && walk(ty.to_token_stream(), params)
}
