//! Memoized recursive counting.
//!
//! Both searches here count outcomes without enumerating them: the memo
//! table collapses an exponential recursion tree to (distinct value) ×
//! (remaining parameter) entries, which is what makes 75-round or
//! long-string instances tractable. Combining counts is overflow-checked;
//! a wrapped count would be silently wrong, so it surfaces as an error.

use std::collections::HashMap;

use crate::error::Error;

/// Multiplier applied to stones that neither are zero nor split
pub const DEFAULT_BLINK_FACTOR: u64 = 2024;

/// Counts how many stones a single stone becomes after a number of blink
/// rounds. Rules per round: `0` becomes `1`; a stone with an even number of
/// digits splits into its two halves; anything else is multiplied by the
/// factor.
///
/// The memo table is keyed by (stone, remaining rounds) and is deliberately
/// kept across top-level calls: a batch of seed stones shares most of its
/// intermediate values.
#[derive(Debug, Clone)]
pub struct StoneCounter {
    factor: u64,
    memo: HashMap<(u64, u32), u64>,
}

impl Default for StoneCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl StoneCounter {
    pub fn new() -> Self {
        Self::with_factor(DEFAULT_BLINK_FACTOR)
    }

    pub fn with_factor(factor: u64) -> Self {
        Self {
            factor,
            memo: HashMap::new(),
        }
    }

    /// Number of stones `stone` becomes after `rounds` rounds
    pub fn count(&mut self, stone: u64, rounds: u32) -> Result<u64, Error> {
        if rounds == 0 {
            return Ok(1);
        }

        if let Some(&cached) = self.memo.get(&(stone, rounds)) {
            return Ok(cached);
        }

        let total = if stone == 0 {
            self.count(1, rounds - 1)?
        } else if let Some((left, right)) = split_even_digits(stone) {
            let left_count = self.count(left, rounds - 1)?;
            let right_count = self.count(right, rounds - 1)?;
            left_count.checked_add(right_count).ok_or(Error::Overflow)?
        } else {
            let grown = stone.checked_mul(self.factor).ok_or(Error::Overflow)?;
            self.count(grown, rounds - 1)?
        };

        self.memo.insert((stone, rounds), total);
        Ok(total)
    }

    /// Total stones a whole seed line becomes, sharing one memo table
    pub fn count_all(&mut self, stones: &[u64], rounds: u32) -> Result<u64, Error> {
        let mut total: u64 = 0;
        for &stone in stones {
            let count = self.count(stone, rounds)?;
            total = total.checked_add(count).ok_or(Error::Overflow)?;
        }
        Ok(total)
    }
}

/// Split a stone with an even number of decimal digits into its halves
fn split_even_digits(stone: u64) -> Option<(u64, u64)> {
    if stone == 0 {
        return None;
    }
    let digits = stone.ilog10() + 1;
    if digits % 2 != 0 {
        return None;
    }
    let half = 10u64.pow(digits / 2);
    Some((stone / half, stone % half))
}

/// Number of distinct ways to tile `design` left to right with pieces from
/// `palette` (pieces may repeat). An empty remainder counts as one way.
///
/// The memo is keyed by the suffix start index, the canonical scalar
/// encoding of the remaining suffix.
pub fn tiling_count(palette: &[&str], design: &str) -> Result<u64, Error> {
    let mut memo: Vec<Option<u64>> = vec![None; design.len() + 1];
    tile_suffix(palette, design, 0, &mut memo)
}

fn tile_suffix(
    palette: &[&str],
    design: &str,
    from: usize,
    memo: &mut Vec<Option<u64>>,
) -> Result<u64, Error> {
    if from == design.len() {
        return Ok(1);
    }

    if let Some(cached) = memo[from] {
        return Ok(cached);
    }

    let mut ways: u64 = 0;
    for piece in palette {
        if design[from..].starts_with(piece) {
            let sub = tile_suffix(palette, design, from + piece.len(), memo)?;
            ways = ways.checked_add(sub).ok_or(Error::Overflow)?;
        }
    }

    memo[from] = Some(ways);
    Ok(ways)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_even_digits() {
        assert_eq!(split_even_digits(0), None);
        assert_eq!(split_even_digits(7), None);
        assert_eq!(split_even_digits(25), Some((2, 5)));
        assert_eq!(split_even_digits(1000), Some((10, 0)));
        assert_eq!(split_even_digits(253000), Some((253, 0)));
    }

    #[test]
    fn test_zero_stone_three_rounds() {
        // 0 -> 1 -> 2024 -> [20, 24]
        let mut counter = StoneCounter::new();
        assert_eq!(counter.count(0, 3), Ok(2));
    }

    #[test]
    fn test_sample_line() {
        let mut counter = StoneCounter::new();
        assert_eq!(counter.count_all(&[125, 17], 6), Ok(22));
        assert_eq!(counter.count_all(&[125, 17], 25), Ok(55312));
    }

    #[test]
    fn test_memo_matches_brute_force() {
        // Memoization is an optimization, not a semantic change
        fn blink_once(stones: &[u64]) -> Vec<u64> {
            let mut next = Vec::with_capacity(stones.len() * 2);
            for &stone in stones {
                if stone == 0 {
                    next.push(1);
                } else if let Some((left, right)) = split_even_digits(stone) {
                    next.push(left);
                    next.push(right);
                } else {
                    next.push(stone * DEFAULT_BLINK_FACTOR);
                }
            }
            next
        }

        let mut counter = StoneCounter::new();
        let mut stones: Vec<u64> = vec![125, 17];
        for rounds in 0..=8 {
            assert_eq!(
                counter.count_all(&[125, 17], rounds),
                Ok(stones.len() as u64),
                "round {rounds}"
            );
            stones = blink_once(&stones);
        }
    }

    #[test]
    fn test_multiplication_overflow_is_an_error() {
        let mut counter = StoneCounter::with_factor(u64::MAX);
        assert_eq!(counter.count(3, 1), Err(Error::Overflow));
    }

    #[test]
    fn test_tiling_sample() {
        let palette = ["r", "wr", "b", "g", "bwu", "rb", "gb", "br"];
        let designs = [
            ("brwrr", 2),
            ("bggr", 1),
            ("gbbr", 4),
            ("rrbgbr", 6),
            ("ubwu", 0),
            ("bwurrg", 1),
            ("brgr", 2),
            ("bbrgwb", 0),
        ];

        let mut total = 0;
        let mut possible = 0;
        for (design, expected) in designs {
            let ways = tiling_count(&palette, design).unwrap();
            assert_eq!(ways, expected, "{design}");
            total += ways;
            if ways > 0 {
                possible += 1;
            }
        }
        assert_eq!(total, 16);
        assert_eq!(possible, 6);
    }

    #[test]
    fn test_tiling_empty_design() {
        assert_eq!(tiling_count(&["a"], ""), Ok(1));
    }

    #[test]
    fn test_tiling_without_matching_piece() {
        assert_eq!(tiling_count(&["ab"], "ba"), Ok(0));
    }
}
