//! Public-API filter pass — runs first in the pipeline so
//! every downstream pass sees a smaller tree.

use super::{walk, Pass, PassContext};
use crate::classify::{ClassifiedNode, Role, Visibility};
use crate::elision::{DeclNoun, ElisionKind, ElisionRecord};

pub(crate) struct PublicApiPass;

impl Pass for PublicApiPass {
    fn name(&self) -> &'static str {
        "public_api"
    }

    fn run(&self, root: &ClassifiedNode, ctx: &PassContext, _already_elided: &[ElisionRecord]) -> Vec<ElisionRecord> {
        if !ctx.policy.public_api_only {
            return Vec::new();
        }

        let mut records = Vec::new();
        let mut group: Vec<&ClassifiedNode> = Vec::new();

        let mut flush = |group: &mut Vec<&ClassifiedNode>, records: &mut Vec<ElisionRecord>| {
            if group.is_empty() {
                return;
            }
            records.push(group_record(group));
            group.clear();
        };

        // Top-level declarations: collapse adjacent private items of the same
        // kind into one group record.
        for child in &root.children {
            if is_private_declaration(child) {
                if let Some(last) = group.last() {
                    if decl_noun(last) != decl_noun(child) {
                        flush(&mut group, &mut records);
                    }
                }
                group.push(child);
            } else {
                flush(&mut group, &mut records);
            }
        }
        flush(&mut group, &mut records);

        // Members inside retained public classes/structs.
        walk(root, &mut |node| {
            if node.has_role(Role::ClassDefinition) && node.visibility == Visibility::Public {
                collect_member_groups(node, &mut records);
            }
        });

        records
    }
}

fn is_private_declaration(node: &ClassifiedNode) -> bool {
    node.visibility == Visibility::Private
        && (node.has_role(Role::FunctionDefinition)
            || node.has_role(Role::ClassDefinition)
            || node.has_role(Role::TypeDeclaration)
            || node.has_role(Role::VariableDeclaration))
}

fn decl_noun(node: &ClassifiedNode) -> DeclNoun {
    if node.has_role(Role::FunctionDefinition) {
        DeclNoun::Function
    } else if node.has_role(Role::ClassDefinition) {
        DeclNoun::Class
    } else if node.has_role(Role::TypeDeclaration) {
        DeclNoun::Typedef
    } else {
        DeclNoun::Variable
    }
}

fn group_record(group: &[&ClassifiedNode]) -> ElisionRecord {
    let start = group.first().expect("group is non-empty").start_byte();
    let end = group.last().expect("group is non-empty").end_byte();
    let lines: u32 = group.iter().map(|n| n.line_span()).sum();
    let noun = decl_noun(group[0]);
    let text = if group.len() == 1 {
        format!("// … {} omitted ({} lines)", noun.singular(), lines)
    } else {
        format!("// … {} {} omitted ({} lines)", group.len(), noun.plural(), lines)
    };
    ElisionRecord::new(ElisionKind::ToplevelDecl, (start, end), text)
        .with_lines(lines)
        .with_summary_count(group.len() as u32)
        .with_decl_noun(noun)
}

/// Collapse adjacent private/protected members inside a public class body,
/// grouped by method vs. field.
fn collect_member_groups(class_node: &ClassifiedNode, records: &mut Vec<ElisionRecord>) {
    for child in &class_node.children {
        // class body is itself a child; members are its children.
        let mut method_group: Vec<&ClassifiedNode> = Vec::new();
        let mut field_group: Vec<&ClassifiedNode> = Vec::new();

        let flush_methods = |g: &mut Vec<&ClassifiedNode>, records: &mut Vec<ElisionRecord>| {
            if !g.is_empty() {
                records.push(member_group_record(g, DeclNoun::Method));
                g.clear();
            }
        };
        let flush_fields = |g: &mut Vec<&ClassifiedNode>, records: &mut Vec<ElisionRecord>| {
            if !g.is_empty() {
                records.push(member_group_record(g, DeclNoun::Field));
                g.clear();
            }
        };

        for member in &child.children {
            let is_private_member = member.visibility == Visibility::Private;
            if is_private_member && member.has_role(Role::MethodDefinition) {
                flush_fields(&mut field_group, records);
                method_group.push(member);
            } else if is_private_member && member.has_role(Role::VariableDeclaration) {
                flush_methods(&mut method_group, records);
                field_group.push(member);
            } else {
                flush_methods(&mut method_group, records);
                flush_fields(&mut field_group, records);
            }
        }
        flush_methods(&mut method_group, records);
        flush_fields(&mut field_group, records);
    }
}

fn member_group_record(group: &[&ClassifiedNode], noun: DeclNoun) -> ElisionRecord {
    let start = group.first().expect("group is non-empty").start_byte();
    let end = group.last().expect("group is non-empty").end_byte();
    let lines: u32 = group.iter().map(|n| n.line_span()).sum();
    let text = format!("// … {} {} omitted", group.len(), noun.plural());
    ElisionRecord::new(ElisionKind::Member, (start, end), text)
        .with_lines(lines)
        .with_summary_count(group.len() as u32)
        .with_decl_noun(noun)
}
