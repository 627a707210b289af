//! Union branch selection.

use crate::context::GenerationContext;
use contract_core::SchemaNode;

/// Probability of picking the null branch when a union has one.
pub const NULL_BRANCH_PROBABILITY: f64 = 0.25;

/// Pick one branch of a union.
///
/// Null branches are taken with probability [`NULL_BRANCH_PROBABILITY`] so
/// that both presence and absence get exercised while most generated records
/// stay populated. Otherwise a non-null branch is picked uniformly, or any
/// branch when all of them are null.
///
/// With `prefer_null` set (recursion guard) the first null branch is taken
/// whenever one exists.
pub fn select_branch<'a>(
    branches: &'a [SchemaNode],
    ctx: &mut GenerationContext,
    prefer_null: bool,
) -> Option<&'a SchemaNode> {
    let first_null = branches.iter().find(|b| b.is_null());

    if let Some(null_branch) = first_null {
        if prefer_null || ctx.chance(NULL_BRANCH_PROBABILITY) {
            return Some(null_branch);
        }
    }

    let non_null: Vec<&SchemaNode> = branches.iter().filter(|b| !b.is_null()).collect();
    if non_null.is_empty() {
        ctx.choose(branches)
    } else {
        ctx.choose(&non_null).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_core::PrimitiveKind;

    fn prim(kind: PrimitiveKind) -> SchemaNode {
        SchemaNode::Primitive(kind)
    }

    #[test]
    fn test_null_branch_frequency() {
        let branches = vec![prim(PrimitiveKind::Null), prim(PrimitiveKind::String)];
        let mut ctx = GenerationContext::new(42);

        let samples = 20_000;
        let nulls = (0..samples)
            .filter(|_| select_branch(&branches, &mut ctx, false).unwrap().is_null())
            .count();
        let frequency = nulls as f64 / samples as f64;
        assert!(
            (0.23..=0.27).contains(&frequency),
            "null frequency {frequency} outside tolerance"
        );
    }

    #[test]
    fn test_non_null_branches_uniform() {
        let branches = vec![
            prim(PrimitiveKind::Int),
            prim(PrimitiveKind::String),
            prim(PrimitiveKind::Boolean),
        ];
        let mut ctx = GenerationContext::new(7);

        let mut counts = [0usize; 3];
        for _ in 0..9_000 {
            let chosen = select_branch(&branches, &mut ctx, false).unwrap();
            let idx = branches.iter().position(|b| b == chosen).unwrap();
            counts[idx] += 1;
        }
        for count in counts {
            assert!((2_700..=3_300).contains(&count), "counts {counts:?}");
        }
    }

    #[test]
    fn test_only_null_branch() {
        let branches = vec![prim(PrimitiveKind::Null)];
        let mut ctx = GenerationContext::new(1);
        for _ in 0..20 {
            assert!(select_branch(&branches, &mut ctx, false).unwrap().is_null());
        }
    }

    #[test]
    fn test_prefer_null() {
        let branches = vec![prim(PrimitiveKind::Long), prim(PrimitiveKind::Null)];
        let mut ctx = GenerationContext::new(1);
        for _ in 0..20 {
            assert!(select_branch(&branches, &mut ctx, true).unwrap().is_null());
        }
    }

    #[test]
    fn test_empty_union() {
        let mut ctx = GenerationContext::new(1);
        assert_eq!(select_branch(&[], &mut ctx, false), None);
    }
}
