use super::types::TypeExpr;

/// One member of an interface or inline record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: TypeExpr,
    pub optional: bool,
    /// Advisory text derived from the field name and sample value.
    pub description: String,
}

/// A named interface together with the interfaces hoisted out of its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDefinition {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    pub nested_interfaces: Vec<InterfaceDefinition>,
}

impl InterfaceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            nested_interfaces: Vec::new(),
        }
    }

    /// Look up a direct field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Find an interface by name anywhere in this tree (pre-order, first match).
    pub fn find(&self, name: &str) -> Option<&InterfaceDefinition> {
        if self.name == name {
            return Some(self);
        }
        self.nested_interfaces.iter().find_map(|n| n.find(name))
    }

    /// Number of interface levels in the tree, counting this one.
    pub fn depth(&self) -> usize {
        1 + self
            .nested_interfaces
            .iter()
            .map(InterfaceDefinition::depth)
            .max()
            .unwrap_or(0)
    }

    /// Interface names in render order: nested interfaces first, deepest first, root last.
    pub fn names_in_render_order(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        for nested in &self.nested_interfaces {
            nested.collect_names(out);
        }
        out.push(&self.name);
    }
}
