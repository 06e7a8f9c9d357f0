use rand::Rng;

/// Rearranges `elements` in place with one pairwise swap per element.
///
/// Each pass draws two independent positions in `[0, n)` and swaps them,
/// skipping passes whose draws collide. The resulting distribution is close
/// to, but not exactly, uniform. Slices shorter than two elements are left
/// untouched and consume no randomness.
pub(crate) fn permute<T, R: Rng>(rng: &mut R, elements: &mut [T]) {
    let n = elements.len();
    if n < 2 {
        return;
    }
    for _ in 0..n {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if a != b {
            elements.swap(a, b);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn same_seed_same_order() {
        let mut first: Vec<u32> = (0..64).collect();
        let mut second: Vec<u32> = (0..64).collect();
        permute(&mut ChaCha8Rng::seed_from_u64(7), &mut first);
        permute(&mut ChaCha8Rng::seed_from_u64(7), &mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut first: Vec<u32> = (0..64).collect();
        let mut second: Vec<u32> = (0..64).collect();
        permute(&mut ChaCha8Rng::seed_from_u64(0), &mut first);
        permute(&mut ChaCha8Rng::seed_from_u64(1), &mut second);
        assert_ne!(first, second);
    }

    #[test]
    fn keeps_every_element() {
        let mut values: Vec<u32> = (0..128).collect();
        permute(&mut ChaCha8Rng::seed_from_u64(3), &mut values);
        values.sort_unstable();
        assert_eq!((0..128).collect::<Vec<_>>(), values);
    }

    #[test]
    fn short_slices_are_untouched() {
        let mut empty: [u8; 0] = [];
        permute(&mut ChaCha8Rng::seed_from_u64(0), &mut empty);

        let mut single = [9];
        permute(&mut ChaCha8Rng::seed_from_u64(0), &mut single);
        assert_eq!([9], single);
    }
}
