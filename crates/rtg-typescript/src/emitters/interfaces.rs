use minijinja::{Environment, context};
use rtg_core::ir::{FieldDescriptor, InterfaceDefinition};

use crate::error::GeneratorError;
use crate::type_mapper::type_expr_to_ts;

const INTERFACE_TEMPLATE: &str = "interface.ts.j2";

/// Render an interface tree as TypeScript.
///
/// Nested interfaces come first, deepest first, and the root interface
/// last. Blocks are separated by a blank line.
pub fn emit_interfaces(root: &InterfaceDefinition) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_template(
        INTERFACE_TEMPLATE,
        include_str!("../../templates/interface.ts.j2"),
    )?;
    let tmpl = env.get_template(INTERFACE_TEMPLATE)?;

    let mut blocks = Vec::new();
    collect_blocks(root, &tmpl, &mut blocks)?;
    Ok(blocks.join("\n\n"))
}

fn collect_blocks(
    def: &InterfaceDefinition,
    tmpl: &minijinja::Template<'_, '_>,
    out: &mut Vec<String>,
) -> Result<(), GeneratorError> {
    for nested in &def.nested_interfaces {
        collect_blocks(nested, tmpl, out)?;
    }
    let fields: Vec<minijinja::Value> = def.fields.iter().map(field_to_ctx).collect();
    out.push(tmpl.render(context! {
        name => def.name.clone(),
        fields => fields,
    })?);
    Ok(())
}

fn field_to_ctx(field: &FieldDescriptor) -> minijinja::Value {
    context! {
        name => field.name.clone(),
        optional => field.optional,
        ts_type => type_expr_to_ts(&field.field_type),
        description => field.description.clone(),
    }
}
