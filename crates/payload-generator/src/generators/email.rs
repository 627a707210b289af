//! Email-looking strings for email-named fields.

use crate::context::GenerationContext;
use contract_core::{PrimitiveKind, SchemaNode};

const LOCAL_PART_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const PROVIDERS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "icloud.com",
    "proton.me",
    "hotmail.com",
];

/// Whether a field name looks like it holds an email address.
pub fn is_email_field(field_name: &str) -> bool {
    let name = field_name.to_lowercase();
    name == "email" || name.ends_with("_email") || name.ends_with("email")
}

/// Whether `node` accepts a string, directly or through a union branch.
pub fn accepts_string(node: &SchemaNode) -> bool {
    match node {
        SchemaNode::Union(branches) => branches.iter().any(is_string),
        other => is_string(other),
    }
}

fn is_string(node: &SchemaNode) -> bool {
    node.primitive_kind() == Some(PrimitiveKind::String)
}

/// Random address such as `k3x9a@proton.me`.
pub fn generate_email(ctx: &mut GenerationContext) -> String {
    let len = ctx.len_in(3, 12);
    let local = ctx.string_from(LOCAL_PART_CHARSET, len);
    let provider = ctx.choose(PROVIDERS).copied().unwrap_or("example.com");
    format!("{local}@{provider}")
}
