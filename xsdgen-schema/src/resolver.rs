//! Reference resolution, the second pass over the descriptor tables.
//!
//! Binds every member's type reference and every declared base to a
//! descriptor, splices referenced attribute groups into their using types,
//! and computes the friend sets the emitter needs for construction access.
//!
//! Unresolved bases and groups are fatal. Unresolved member types are not:
//! required ones are reported and generation continues, optional and
//! repeated ones degrade to comment stubs in the generated code.

use crate::context::GenerationContext;
use crate::descriptor::{DescriptorId, Member, SymbolTable};
use crate::error::SchemaError;

/// Runs the whole resolution pass over the context.
///
/// # Errors
/// Returns `SchemaError` for undefined base types, undefined attribute
/// groups, or a document entry point without a declared type.
pub fn resolve(ctx: &mut GenerationContext) -> Result<(), SchemaError> {
    tracing::debug!("second pass: binding member and base references");

    let bindings = collect_member_bindings(&ctx.classes, &ctx.classes);
    apply_member_bindings(&mut ctx.classes, bindings);
    let bindings = collect_member_bindings(&ctx.groups, &ctx.classes);
    apply_member_bindings(&mut ctx.groups, bindings);

    resolve_bases(ctx)?;
    splice_groups(ctx)?;
    compute_friends(ctx);

    Ok(())
}

type MemberBinding = (DescriptorId, usize, Option<DescriptorId>);

/// First half of member binding: look up every member's type reference,
/// reporting the ones that stay unresolved.
fn collect_member_bindings(table: &SymbolTable, classes: &SymbolTable) -> Vec<MemberBinding> {
    let mut bindings = Vec::new();

    for (id, desc) in table.iter_with_ids() {
        for (index, member) in desc.members.iter().enumerate() {
            let found = classes.find(&member.type_ref);

            if found.is_none() {
                if member.min_occurs > 0 {
                    tracing::error!(
                        "undefined type '{}' in required member '{}' of '{}'",
                        member.type_ref,
                        member.name,
                        desc.name
                    );
                } else {
                    tracing::debug!(
                        "optional/vector member '{}' of '{}' is of unknown type '{}' - ignoring",
                        member.name,
                        desc.name,
                        member.type_ref
                    );
                }
            }

            bindings.push((id, index, found));
        }
    }

    bindings
}

/// Second half of member binding: store the looked-up ids.
fn apply_member_bindings(table: &mut SymbolTable, bindings: Vec<MemberBinding>) {
    for (id, index, found) in bindings {
        table.get_mut(id).members[index].type_id = found;
    }
}

/// Resolves every declared base reference, exactly first and by local name
/// as a fallback. A document without a base type is malformed.
fn resolve_bases(ctx: &mut GenerationContext) -> Result<(), SchemaError> {
    let mut updates = Vec::new();

    for (id, desc) in ctx.classes.iter_with_ids() {
        if let Some(base_ref) = &desc.base_ref {
            let base = ctx
                .classes
                .find(base_ref)
                .ok_or_else(|| SchemaError::UndefinedBase {
                    base: base_ref.clone(),
                    owner: desc.name.clone(),
                })?;
            updates.push((id, base));
        } else if desc.is_document {
            return Err(SchemaError::DocumentWithoutBase {
                name: desc.name.clone(),
            });
        }
    }

    for (id, base) in updates {
        ctx.classes.get_mut(id).base = Some(base);
    }

    Ok(())
}

/// Copies the members of every referenced attribute group to the end of
/// the referencing type's member list, then discards the references.
/// Group lookup is namespace-exact.
fn splice_groups(ctx: &mut GenerationContext) -> Result<(), SchemaError> {
    let mut splices: Vec<(DescriptorId, Vec<Member>)> = Vec::new();

    for (id, desc) in ctx.classes.iter_with_ids() {
        if desc.attribute_group_refs.is_empty() {
            continue;
        }

        let mut members = Vec::new();
        for group_ref in &desc.attribute_group_refs {
            let group = ctx
                .groups
                .get_id(group_ref)
                .ok_or_else(|| SchemaError::UndefinedGroup {
                    group: group_ref.clone(),
                    owner: desc.name.clone(),
                })?;
            members.extend(ctx.groups.get(group).members.iter().cloned());
        }
        splices.push((id, members));
    }

    for (id, members) in splices {
        let desc = ctx.classes.get_mut(id);
        desc.members.extend(members);
        desc.attribute_group_refs.clear();
    }

    Ok(())
}

/// Records, on every member's type, the sanitised name of the type using
/// it. Generated code grants these types construction access.
fn compute_friends(ctx: &mut GenerationContext) {
    let mut pairs: Vec<(DescriptorId, String)> = Vec::new();

    for (id, desc) in ctx.classes.iter_with_ids() {
        for member in &desc.members {
            if let Some(type_id) = member.type_id {
                if type_id != id {
                    pairs.push((type_id, desc.sanitized_name.clone()));
                }
            }
        }
    }

    for (type_id, friend) in pairs {
        ctx.classes.get_mut(type_id).friends.insert(friend);
    }
}
