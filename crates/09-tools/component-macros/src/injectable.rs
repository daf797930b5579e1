//! 注入点声明宏实现

use crate::utils::{declaration_fn_ident, extract_boxed_type, has_attribute, is_result_type, type_ident};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, Result, ReturnType, Type};

/// 标记注入构造函数的属性名
const INJECT_ATTRIBUTE: &str = "inject";

/// 被标记为注入点的构造函数
pub struct InjectConstructor {
    /// 构造函数名称
    pub name: Ident,
    /// 按参数顺序排列的角色类型
    pub roles: Vec<Type>,
    /// 是否返回 Result
    pub fallible: bool,
}

/// 分析构造函数签名
fn analyze_constructor(method: &ImplItemFn) -> Result<InjectConstructor> {
    let signature = &method.sig;
    if !signature.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &signature.generics,
            "注入构造函数不能带泛型参数",
        ));
    }
    if signature.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            signature.asyncness,
            "注入构造函数不能是 async 函数",
        ));
    }

    let mut roles = Vec::with_capacity(signature.inputs.len());
    for input in &signature.inputs {
        match input {
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "注入构造函数必须是关联函数，不能带 self 参数",
                ));
            }
            FnArg::Typed(pat_type) => match extract_boxed_type(&pat_type.ty) {
                Some(role) => roles.push(role.clone()),
                None => {
                    return Err(syn::Error::new_spanned(
                        &pat_type.ty,
                        "注入参数必须是 Box<角色类型>",
                    ));
                }
            },
        }
    }

    let fallible = match &signature.output {
        ReturnType::Default => {
            return Err(syn::Error::new_spanned(
                signature,
                "注入构造函数必须返回 Self 或 Result<Self, E>",
            ));
        }
        ReturnType::Type(_, ty) => is_result_type(ty),
    };

    Ok(InjectConstructor {
        name: signature.ident.clone(),
        roles,
        fallible,
    })
}

/// 收集并移除 impl 块中的 #[inject] 标记
pub fn collect_inject_constructors(item_impl: &mut ItemImpl) -> Result<Vec<InjectConstructor>> {
    let mut constructors = Vec::new();
    for item in &mut item_impl.items {
        if let ImplItem::Fn(method) = item {
            if has_attribute(&method.attrs, INJECT_ATTRIBUTE) {
                method.attrs.retain(|attr| !attr.path().is_ident(INJECT_ATTRIBUTE));
                constructors.push(analyze_constructor(method)?);
            }
        }
    }
    Ok(constructors)
}

/// 生成单个注入点的登记代码
fn generate_declaration(receiver: &Type, receiver_name: &str, constructor: &InjectConstructor) -> TokenStream {
    let declaration_fn =
        declaration_fn_ident("injection_point", &[receiver_name, &constructor.name.to_string()]);
    let name = &constructor.name;
    let roles = &constructor.roles;
    let positions = 0..roles.len();

    let call = quote! {
        <#receiver>::#name(#(arguments.take::<#roles>(#positions)?),*)
    };
    let body = if constructor.fallible {
        quote! { #call.map_err(::std::convert::Into::into) }
    } else {
        quote! { ::std::result::Result::Ok(#call) }
    };

    quote! {
        #[ctor::ctor]
        #[allow(unused_mut, unused_variables)]
        fn #declaration_fn() {
            ::di_abstractions::declare_injection_point(
                ::di_abstractions::InjectionPoint::new::<#receiver, _>(
                    ::std::vec![#(::di_abstractions::RoleId::of::<#roles>()),*],
                    |mut arguments: ::di_abstractions::Arguments|
                        -> ::std::result::Result<#receiver, ::di_abstractions::BoxError> {
                        #body
                    },
                ),
            );
        }
    }
}

/// 实现 #[injectable] 宏
pub fn injectable_impl(input: TokenStream) -> Result<TokenStream> {
    let mut item_impl: ItemImpl = syn::parse2(input)?;

    if !item_impl.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_impl.generics,
            "injectable 不支持泛型 impl 块",
        ));
    }
    if let Some((_, path, _)) = &item_impl.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "injectable 只能用于固有 impl 块",
        ));
    }

    let receiver = (*item_impl.self_ty).clone();
    let receiver_name = match type_ident(&receiver) {
        Some(ident) => ident.to_string(),
        None => {
            return Err(syn::Error::new_spanned(
                &receiver,
                "injectable 只支持具名类型",
            ));
        }
    };

    let constructors = collect_inject_constructors(&mut item_impl)?;
    if constructors.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_impl.self_ty,
            "injectable impl 块中没有 #[inject] 构造函数",
        ));
    }

    let declarations = constructors
        .iter()
        .map(|constructor| generate_declaration(&receiver, &receiver_name, constructor));

    Ok(quote! {
        #item_impl

        #(#declarations)*
    })
}
