//! Stock helpers.

use crate::catalog::Variant;

/// Total units across all variants of a product.
///
/// Negative stock rows (data entry errors) count as zero.
pub fn calc_total_stock(variants: &[Variant]) -> i64 {
    variants.iter().map(|v| v.stock.max(0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VariantId;

    fn variant(id: i64, size: &str, stock: i64) -> Variant {
        Variant {
            id: VariantId::new(id),
            size: size.to_string(),
            stock,
        }
    }

    #[test]
    fn test_total_stock_empty() {
        assert_eq!(calc_total_stock(&[]), 0);
    }

    #[test]
    fn test_total_stock_sums_variants() {
        let variants = [variant(1, "S", 3), variant(2, "M", 5), variant(3, "L", 0)];
        assert_eq!(calc_total_stock(&variants), 8);
    }

    #[test]
    fn test_total_stock_ignores_negative_rows() {
        let variants = [variant(1, "S", -2), variant(2, "M", 4)];
        assert_eq!(calc_total_stock(&variants), 4);
    }
}
