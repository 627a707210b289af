//! Leaf generators used by the recursive payload walk.
//!
//! Each module covers one concern: primitive values, logical type encoding,
//! union branch selection and the email heuristic. Composite nodes (records,
//! arrays, maps) are handled by [`crate::generator::PayloadGenerator`].

pub mod email;
pub mod logical;
pub mod primitive;
pub mod union;

use crate::context::GenerationContext;
use contract_core::{LogicalType, Payload, PrimitiveKind};

/// Generate a value for a logical primitive.
///
/// Falls back to the base primitive when the tag has no encoder.
pub fn generate_logical(
    base: PrimitiveKind,
    logical: &LogicalType,
    ctx: &mut GenerationContext,
) -> Payload {
    match logical::encode_logical(logical, ctx) {
        Some(encoded) => Payload::Int(encoded),
        None => primitive::generate_primitive(base, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_date_is_int() {
        let mut ctx = GenerationContext::new(42);
        let value = generate_logical(PrimitiveKind::Int, &LogicalType::Date, &mut ctx);
        assert!(matches!(value, Payload::Int(_)));
    }

    #[test]
    fn test_unknown_logical_falls_back_to_base() {
        let mut ctx = GenerationContext::new(42);
        let value = generate_logical(
            PrimitiveKind::String,
            &LogicalType::Other("uuid".to_string()),
            &mut ctx,
        );
        if let Payload::String(s) = value {
            assert!((5..=20).contains(&s.len()));
        } else {
            panic!("Expected String value");
        }
    }
}
