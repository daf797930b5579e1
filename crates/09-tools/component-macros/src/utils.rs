//! 宏工具函数

use proc_macro2::Span;
use syn::{Attribute, GenericArgument, Ident, PathArguments, Type};

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if let PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(GenericArgument::Type(inner_type)) = args.args.first() {
                    return Some(inner_type);
                }
            }
        }
    }
    None
}

/// 检查类型的最后一段路径是否为指定名称
fn last_segment_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == name)
            .unwrap_or(false),
        _ => false,
    }
}

/// 检查类型是否为 Result<T, E>
pub fn is_result_type(ty: &Type) -> bool {
    last_segment_is(ty, "Result")
}

/// 提取 Box<R> 中的 R
pub fn extract_boxed_type(ty: &Type) -> Option<&Type> {
    if last_segment_is(ty, "Box") {
        extract_generic_type(ty)
    } else {
        None
    }
}

/// 提取类型路径最后一段的名称
pub fn type_ident(ty: &Type) -> Option<&Ident> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            type_path.path.segments.last().map(|segment| &segment.ident)
        }
        _ => None,
    }
}

/// 检查属性列表中是否有指定名称的属性
pub fn has_attribute(attrs: &[Attribute], attr_name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(attr_name))
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}

/// 生成声明函数名，如 `__declare_provider_brazilian_tax`
pub fn declaration_fn_ident(kind: &str, parts: &[&str]) -> Ident {
    let suffix = parts
        .iter()
        .map(|part| to_snake_case(part))
        .collect::<Vec<_>>()
        .join("_");
    Ident::new(&format!("__declare_{kind}_{suffix}"), Span::call_site())
}
