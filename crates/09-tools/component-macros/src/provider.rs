//! 提供者声明宏实现

use crate::utils::declaration_fn_ident;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    Ident, ItemStruct, Result, Token, Type,
};

/// 提供者声明参数
pub struct ProviderArgs {
    /// 满足的角色类型
    pub role: Type,
    /// 零参数构造函数
    pub constructor: Ident,
    /// 构造函数是否返回 Result
    pub fallible: bool,
}

impl Parse for ProviderArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut role = None;
        let mut constructor = None;
        let mut fallible = false;

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            if key == "role" {
                input.parse::<Token![=]>()?;
                role = Some(input.parse::<Type>()?);
            } else if key == "constructor" {
                input.parse::<Token![=]>()?;
                constructor = Some(input.parse::<Ident>()?);
            } else if key == "fallible" {
                fallible = true;
            } else {
                return Err(syn::Error::new(
                    key.span(),
                    format!("未知的 provider 参数: {key}"),
                ));
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        let role = role.ok_or_else(|| input.error("provider 需要 `role = <角色类型>` 参数"))?;
        Ok(Self {
            role,
            constructor: constructor.unwrap_or_else(|| Ident::new("new", proc_macro2::Span::call_site())),
            fallible,
        })
    }
}

/// 实现 #[provider] 宏
pub fn provider_impl(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let args: ProviderArgs = syn::parse2(args)?;
    let input_struct: ItemStruct = syn::parse2(input)?;

    if !input_struct.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input_struct.generics,
            "provider 不支持泛型结构体",
        ));
    }

    let struct_name = &input_struct.ident;
    let role = &args.role;
    let constructor = &args.constructor;
    let declaration_fn = declaration_fn_ident("provider", &[&struct_name.to_string()]);

    let factory = if args.fallible {
        quote! {
            || {
                #struct_name::#constructor()
                    .map(|provider| ::std::boxed::Box::new(provider) as ::std::boxed::Box<#role>)
                    .map_err(::std::convert::Into::<::di_abstractions::BoxError>::into)
            }
        }
    } else {
        quote! {
            || {
                ::std::result::Result::Ok(
                    ::std::boxed::Box::new(#struct_name::#constructor()) as ::std::boxed::Box<#role>
                )
            }
        }
    };

    Ok(quote! {
        #input_struct

        // 程序启动时登记到全局声明表
        #[ctor::ctor]
        fn #declaration_fn() {
            ::di_abstractions::declare_provider(
                ::di_abstractions::ProviderDescriptor::with_cast::<#role, #struct_name, _, _>(
                    #factory,
                    |provider: #struct_name| ::std::boxed::Box::new(provider) as ::std::boxed::Box<#role>,
                ),
            );
        }
    })
}
