use rtg_core::ir::{FieldDescriptor, TypeExpr};

const INDENT: &str = "  ";

/// Map a `TypeExpr` to its TypeScript type string for a field at indent level 1.
pub fn type_expr_to_ts(ty: &TypeExpr) -> String {
    type_expr_to_ts_at(ty, 1)
}

/// Map a `TypeExpr` to TypeScript, where `indent` is the level of the line holding the type.
///
/// Inline records render on multiple lines with their members one level deeper.
pub fn type_expr_to_ts_at(ty: &TypeExpr, indent: usize) -> String {
    match ty {
        TypeExpr::Primitive(p) => p.as_str().to_string(),
        TypeExpr::Ref(name) => name.clone(),
        TypeExpr::Map(value) => format!("Record<string, {}>", type_expr_to_ts_at(value, indent)),
        TypeExpr::Array(inner) => {
            let inner_ts = type_expr_to_ts_at(inner, indent);
            match inner.as_ref() {
                TypeExpr::Union(_) | TypeExpr::Inline(_) => format!("({inner_ts})[]"),
                _ => format!("{inner_ts}[]"),
            }
        }
        TypeExpr::Union(variants) => variants
            .iter()
            .map(|v| type_expr_to_ts_at(v, indent))
            .collect::<Vec<_>>()
            .join(" | "),
        TypeExpr::Inline(members) => inline_to_ts(members, indent),
    }
}

fn inline_to_ts(members: &[FieldDescriptor], indent: usize) -> String {
    if members.is_empty() {
        return "Record<string, unknown>".to_string();
    }
    let pad = INDENT.repeat(indent + 1);
    let mut out = String::from("{\n");
    for member in members {
        let optional = if member.optional { "?" } else { "" };
        let ts_type = type_expr_to_ts_at(&member.field_type, indent + 1);
        out.push_str(&format!("{pad}{}{optional}: {ts_type};", member.name));
        if !member.description.is_empty() {
            out.push_str(&format!(" // {}", member.description));
        }
        out.push('\n');
    }
    out.push_str(&INDENT.repeat(indent));
    out.push('}');
    out
}
