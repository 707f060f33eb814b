use std::fmt;

use super::interfaces::FieldDescriptor;

/// Leaf types the inferrer can assign to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
    /// An absent value, e.g. a key missing from a record.
    Undefined,
    Unknown,
    /// Element type of an empty array; nothing was observed to narrow it.
    Any,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
            Primitive::Undefined => "undefined",
            Primitive::Unknown => "unknown",
            Primitive::Any => "any",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structural type expression.
///
/// Equality is structural, which is what the inferrer relies on when it
/// collects the distinct element types of an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Primitive(Primitive),
    Array(Box<TypeExpr>),
    /// Ordered, duplicate-free alternatives (first-seen order).
    Union(Vec<TypeExpr>),
    /// Anonymous object shape, members in key order.
    Inline(Vec<FieldDescriptor>),
    /// `Record<string, T>`
    Map(Box<TypeExpr>),
    /// Reference to a named interface.
    Ref(String),
}

impl TypeExpr {
    pub fn primitive(p: Primitive) -> Self {
        TypeExpr::Primitive(p)
    }

    pub fn array_of(inner: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(inner))
    }

    pub fn map_of(value: TypeExpr) -> Self {
        TypeExpr::Map(Box::new(value))
    }

    /// `any[]`, the type of an empty array.
    pub fn any_array() -> Self {
        TypeExpr::array_of(TypeExpr::Primitive(Primitive::Any))
    }

    /// `Record<string, unknown>`, used for objects past the depth bound.
    pub fn unknown_map() -> Self {
        TypeExpr::map_of(TypeExpr::Primitive(Primitive::Unknown))
    }

    /// `Record<string, any>`, the type of an empty object.
    pub fn any_map() -> Self {
        TypeExpr::map_of(TypeExpr::Primitive(Primitive::Any))
    }

    /// Build a union from candidate types, dropping duplicates.
    ///
    /// Collapses to the single member when only one distinct type remains and
    /// to `unknown` when nothing was supplied.
    pub fn union_of<I>(types: I) -> Self
    where
        I: IntoIterator<Item = TypeExpr>,
    {
        let mut distinct: Vec<TypeExpr> = Vec::new();
        for ty in types {
            if !distinct.contains(&ty) {
                distinct.push(ty);
            }
        }
        match distinct.len() {
            0 => TypeExpr::Primitive(Primitive::Unknown),
            1 => distinct.remove(0),
            _ => TypeExpr::Union(distinct),
        }
    }

    pub fn is_primitive(&self, p: Primitive) -> bool {
        matches!(self, TypeExpr::Primitive(q) if *q == p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_of_dedupes_in_first_seen_order() {
        let ty = TypeExpr::union_of([
            TypeExpr::Primitive(Primitive::Number),
            TypeExpr::Primitive(Primitive::String),
            TypeExpr::Primitive(Primitive::Number),
        ]);
        assert_eq!(
            ty,
            TypeExpr::Union(vec![
                TypeExpr::Primitive(Primitive::Number),
                TypeExpr::Primitive(Primitive::String),
            ])
        );
    }

    #[test]
    fn union_of_single_and_empty() {
        assert_eq!(
            TypeExpr::union_of([TypeExpr::Ref("Book".into()), TypeExpr::Ref("Book".into())]),
            TypeExpr::Ref("Book".into())
        );
        assert!(TypeExpr::union_of(Vec::new()).is_primitive(Primitive::Unknown));
    }
}
