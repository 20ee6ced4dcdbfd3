use tidepath_core::BlockPos;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: BlockPos, b: BlockPos) -> i64 {
    let dx = i64::from(a.x) - i64::from(b.x);
    let dy = i64::from(a.y) - i64::from(b.y);
    let dz = i64::from(a.z) - i64::from(b.z);
    dx.abs() + dy.abs() + dz.abs()
}

/// Squared euclidean distance between two cells.
#[inline]
pub fn dist_sqr(a: BlockPos, b: BlockPos) -> i64 {
    let dx = i64::from(a.x) - i64::from(b.x);
    let dy = i64::from(a.y) - i64::from(b.y);
    let dz = i64::from(a.z) - i64::from(b.z);
    dx * dx + dy * dy + dz * dz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = BlockPos::new(0, 64, 0);
        let b = BlockPos::new(3, 60, -2);
        assert_eq!(manhattan(a, b), 9);
        assert_eq!(manhattan(b, a), 9);
        assert_eq!(dist_sqr(a, b), 9 + 16 + 4);
        assert_eq!(dist_sqr(a, a), 0);
    }

    #[test]
    fn distances_across_the_whole_coordinate_range() {
        let lo = BlockPos::new(i32::MIN, 0, i32::MIN);
        let hi = BlockPos::new(i32::MAX, 0, i32::MAX);
        let span = i64::from(i32::MAX) - i64::from(i32::MIN);
        assert_eq!(manhattan(lo, hi), 2 * span);
        assert_eq!(manhattan(hi, lo), 2 * span);
        let far = BlockPos::new(i32::MIN, 0, 0);
        assert_eq!(dist_sqr(far, BlockPos::ZERO), 1_i64 << 62);
    }
}
