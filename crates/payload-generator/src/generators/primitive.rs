//! Primitive value generators.
//!
//! Ranges are fixed policy rather than schema-derived: small values keep
//! payloads cheap to transmit.

use crate::context::GenerationContext;
use contract_core::{Payload, PrimitiveKind};

/// Inclusive range for `int` values.
pub const INT_RANGE: (i64, i64) = (-1000, 5000);

/// Inclusive range for `long` values.
pub const LONG_RANGE: (i64, i64) = (-10_000, 200_000);

/// Inclusive range for `float` and `double` values.
pub const FLOAT_RANGE: (f64, f64) = (-1000.0, 5000.0);

/// Inclusive length range for generic strings.
pub const STRING_LEN: (usize, usize) = (5, 20);

/// Inclusive length range for `bytes` values.
pub const BYTES_LEN: (usize, usize) = (0, 16);

/// Generate a random value for a primitive kind.
pub fn generate_primitive(kind: PrimitiveKind, ctx: &mut GenerationContext) -> Payload {
    match kind {
        PrimitiveKind::Null => Payload::Null,
        PrimitiveKind::Boolean => Payload::Bool(ctx.chance(0.5)),
        PrimitiveKind::Int => Payload::Int(ctx.int_in(INT_RANGE.0, INT_RANGE.1)),
        PrimitiveKind::Long => Payload::Int(ctx.int_in(LONG_RANGE.0, LONG_RANGE.1)),
        PrimitiveKind::Float | PrimitiveKind::Double => {
            Payload::Float(ctx.float_in(FLOAT_RANGE.0, FLOAT_RANGE.1))
        }
        PrimitiveKind::String => Payload::String(generate_string(ctx, STRING_LEN.0, STRING_LEN.1)),
        PrimitiveKind::Bytes => Payload::Bytes(generate_bytes(ctx, BYTES_LEN.0, BYTES_LEN.1)),
    }
}

/// Random alphanumeric string with length in `[min_len, max_len]`.
pub fn generate_string(ctx: &mut GenerationContext, min_len: usize, max_len: usize) -> String {
    ctx.alphanumeric(min_len, max_len)
}

/// Random byte buffer with length in `[min_len, max_len]`.
pub fn generate_bytes(ctx: &mut GenerationContext, min_len: usize, max_len: usize) -> Vec<u8> {
    let len = ctx.len_in(min_len, max_len);
    ctx.bytes(len)
}

/// Random byte buffer of exactly `size` bytes.
pub fn generate_fixed_bytes(ctx: &mut GenerationContext, size: usize) -> Vec<u8> {
    ctx.bytes(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ranges() {
        let mut ctx = GenerationContext::new(42);

        for _ in 0..500 {
            match generate_primitive(PrimitiveKind::Int, &mut ctx) {
                Payload::Int(v) => assert!((-1000..=5000).contains(&v)),
                other => panic!("Expected Int, got {other:?}"),
            }
            match generate_primitive(PrimitiveKind::Long, &mut ctx) {
                Payload::Int(v) => assert!((-10_000..=200_000).contains(&v)),
                other => panic!("Expected Int, got {other:?}"),
            }
            match generate_primitive(PrimitiveKind::Double, &mut ctx) {
                Payload::Float(v) => assert!((-1000.0..=5000.0).contains(&v)),
                other => panic!("Expected Float, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_string_and_bytes_lengths() {
        let mut ctx = GenerationContext::new(42);

        for _ in 0..200 {
            if let Payload::String(s) = generate_primitive(PrimitiveKind::String, &mut ctx) {
                assert!((5..=20).contains(&s.len()));
            } else {
                panic!("Expected String value");
            }
            if let Payload::Bytes(b) = generate_primitive(PrimitiveKind::Bytes, &mut ctx) {
                assert!(b.len() <= 16);
            } else {
                panic!("Expected Bytes value");
            }
        }
        assert_eq!(generate_fixed_bytes(&mut ctx, 12).len(), 12);
        assert!(generate_fixed_bytes(&mut ctx, 0).is_empty());
    }

    #[test]
    fn test_null_and_boolean() {
        let mut ctx = GenerationContext::new(42);
        assert_eq!(generate_primitive(PrimitiveKind::Null, &mut ctx), Payload::Null);
        assert!(matches!(
            generate_primitive(PrimitiveKind::Boolean, &mut ctx),
            Payload::Bool(_)
        ));
    }

    #[test]
    fn test_deterministic_generation() {
        let mut ctx1 = GenerationContext::new(42);
        let mut ctx2 = GenerationContext::new(42);

        for kind in [PrimitiveKind::Int, PrimitiveKind::String, PrimitiveKind::Bytes] {
            assert_eq!(
                generate_primitive(kind, &mut ctx1),
                generate_primitive(kind, &mut ctx2)
            );
        }
    }
}
