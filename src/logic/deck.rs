// src/logic/deck.rs

use rand::Rng;

use crate::error::{GameError, Result};

/// 盤面用のシャッフル済みデッキを作る関数だよ！🃏
///
/// プールの先頭から `size² / 2` 個のシンボルを取って、それぞれ2枚ずつにして、
/// Fisher–Yates でシャッフルして返す。プールの並び順が「使う優先順位」になるよ。
///
/// # エラー
/// * `InvalidSize` - `size` が 0 か奇数の時。
/// * `InsufficientSymbols` - ペア数がプールのシンボル数より多い時。
pub fn build_deck<T, R>(size: usize, symbol_pool: &[T], rng: &mut R) -> Result<Vec<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if size == 0 || size % 2 != 0 {
        return Err(GameError::InvalidSize(size));
    }
    let pair_count = size
        .checked_mul(size)
        .map(|total| total / 2)
        .ok_or(GameError::InvalidSize(size))?;
    if pair_count > symbol_pool.len() {
        return Err(GameError::InsufficientSymbols {
            requested: pair_count,
            available: symbol_pool.len(),
        });
    }

    let chosen = &symbol_pool[..pair_count];
    let mut deck = Vec::with_capacity(pair_count * 2);
    deck.extend_from_slice(chosen);
    deck.extend_from_slice(chosen);
    shuffle(&mut deck, rng);
    Ok(deck)
}

/// Fisher–Yates (Knuth) シャッフル。
///
/// 後ろから i = n-1 .. 1 の順に、[0, i] の一様乱数 j を引いて i と j を入れ替える。
/// 乱数源が一様なら、どの並びも同じ確率で出るよ。
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{}", i)).collect()
    }

    #[test]
    fn every_symbol_appears_exactly_twice() {
        let pool = pool(40);
        let mut rng = StdRng::seed_from_u64(7);
        for size in [2, 4, 6, 8] {
            let deck = build_deck(size, &pool, &mut rng).unwrap();
            assert_eq!(deck.len(), size * size);
            let counts = deck.iter().counts();
            assert_eq!(counts.len(), size * size / 2);
            assert!(counts.values().all(|&c| c == 2), "size {}: {:?}", size, counts);
        }
    }

    #[test]
    fn uses_pool_prefix_in_order() {
        let pool = pool(40);
        let mut rng = StdRng::seed_from_u64(1);
        let deck = build_deck(4, &pool, &mut rng).unwrap();
        let used: HashSet<&String> = deck.iter().collect();
        let expected: HashSet<&String> = pool[..8].iter().collect();
        assert_eq!(used, expected);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let original: Vec<u32> = (0..64).map(|i| i / 2).collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut shuffled = original.clone();
            shuffle(&mut shuffled, &mut rng);
            let mut sorted = shuffled.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, original, "seed {} lost or duplicated an item", seed);
        }
    }

    #[test]
    fn shuffle_handles_tiny_slices() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
        let mut one = vec![42];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn same_seed_same_deck() {
        let pool = pool(40);
        let a = build_deck(6, &pool, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = build_deck(6, &pool, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_odd_and_zero_sizes() {
        let pool = pool(40);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(build_deck(3, &pool, &mut rng), Err(GameError::InvalidSize(3)));
        assert_eq!(build_deck(0, &pool, &mut rng), Err(GameError::InvalidSize(0)));
    }

    #[test]
    fn rejects_pool_that_is_too_small() {
        let pool = pool(40);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            build_deck(100, &pool, &mut rng),
            Err(GameError::InsufficientSymbols { requested: 5000, available: 40 })
        );
        // 10x10 = 50 ペアは 40 個じゃ足りない
        assert!(matches!(build_deck(10, &pool, &mut rng), Err(GameError::InsufficientSymbols { .. })));
    }
}
