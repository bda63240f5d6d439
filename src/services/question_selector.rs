//! 문항 선택 - 업무 능력 계층
//!
//! 섞인 풀에서 두 번에 나눠 고른다.
//! 1. 상한 적용: 단어마다 `per_word_cap`개까지만
//! 2. 상한 해제: 아직 모자라면 남은 항목을 순서대로 채움

use crate::services::pool_assembler::PoolItem;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

/// 기본 단어당 상한
pub const DEFAULT_PER_WORD_CAP: usize = 2;

/// 다양성을 고려한 문항 선택기
#[derive(Debug, Clone, Copy)]
pub struct QuestionSelector {
    per_word_cap: usize,
}

impl Default for QuestionSelector {
    fn default() -> Self {
        Self::new(DEFAULT_PER_WORD_CAP)
    }
}

impl QuestionSelector {
    pub fn new(per_word_cap: usize) -> Self {
        Self {
            per_word_cap: per_word_cap.max(1),
        }
    }

    pub fn per_word_cap(&self) -> usize {
        self.per_word_cap
    }

    /// 풀에서 최대 `count`개 선택
    ///
    /// # 반환
    /// 선택 순서대로의 풀 인덱스
    pub fn select<R: Rng + ?Sized>(&self, pool: &[PoolItem<'_>], count: usize, rng: &mut R) -> Vec<usize> {
        let mut order: Vec<usize> = (0..pool.len()).collect();
        order.shuffle(rng);

        let mut selected = capped_pass(pool, &order, count, self.per_word_cap);
        let capped = selected.len();
        relief_pass(&order, &mut selected, count);

        debug!(
            "문항 선택: 풀 {} 개 → {} 개 (상한 통과 {}, 보충 {})",
            pool.len(),
            selected.len(),
            capped,
            selected.len() - capped
        );
        selected
    }
}

/// 1차 선택: 단어별 상한을 지키며 순서대로 채운다
pub fn capped_pass(pool: &[PoolItem<'_>], order: &[usize], count: usize, cap: usize) -> Vec<usize> {
    let mut per_word: HashMap<String, usize> = HashMap::new();
    let mut selected = Vec::new();

    for &idx in order {
        if selected.len() >= count {
            break;
        }
        let used = per_word.entry(pool[idx].word.to_lowercase()).or_insert(0);
        if *used < cap {
            *used += 1;
            selected.push(idx);
        }
    }
    selected
}

/// 2차 선택: 상한 없이 아직 고르지 않은 항목으로 채운다
pub fn relief_pass(order: &[usize], selected: &mut Vec<usize>, count: usize) {
    if selected.len() >= count {
        return;
    }
    let mut taken = vec![false; order.iter().max().map_or(0, |&max| max + 1)];
    for &idx in selected.iter() {
        taken[idx] = true;
    }

    for &idx in order {
        if selected.len() >= count {
            break;
        }
        if !taken[idx] {
            taken[idx] = true;
            selected.push(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(word: &'static str) -> PoolItem<'static> {
        PoolItem {
            word,
            meaning: "",
            question_type: "유의어찾기",
            raw: "Q\nAnswer: A",
        }
    }

    fn words_of(pool: &[PoolItem<'_>], picked: &[usize]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for &idx in picked {
            *counts.entry(pool[idx].word.to_string()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_capped_pass_respects_cap() {
        let pool = vec![item("a"), item("a"), item("a"), item("b"), item("a")];
        let order: Vec<usize> = (0..pool.len()).collect();
        let picked = capped_pass(&pool, &order, 10, 2);
        assert_eq!(picked, vec![0, 1, 3]);
    }

    #[test]
    fn test_capped_pass_is_case_insensitive() {
        let pool = vec![item("Calm"), item("calm"), item("CALM")];
        let order: Vec<usize> = (0..pool.len()).collect();
        assert_eq!(capped_pass(&pool, &order, 10, 2), vec![0, 1]);
    }

    #[test]
    fn test_relief_pass_fills_in_order() {
        let order = vec![4, 2, 0, 1, 3];
        let mut selected = vec![2, 1];
        relief_pass(&order, &mut selected, 4);
        assert_eq!(selected, vec![2, 1, 4, 0]);

        let mut full = vec![0, 1];
        relief_pass(&order, &mut full, 2);
        assert_eq!(full, vec![0, 1]);
    }

    #[test]
    fn test_select_exact_count_with_cap() {
        let pool: Vec<PoolItem> = ["a", "b", "c", "d"]
            .iter()
            .flat_map(|&w| [item(w), item(w), item(w)])
            .collect();
        let selector = QuestionSelector::default();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = selector.select(&pool, 4, &mut rng);
            assert_eq!(picked.len(), 4);
            assert!(words_of(&pool, &picked).values().all(|&n| n <= 2));
        }
    }

    #[test]
    fn test_select_relief_when_pool_is_narrow() {
        let pool = vec![item("only"), item("only"), item("only"), item("other")];
        let mut rng = StdRng::seed_from_u64(7);
        let picked = QuestionSelector::default().select(&pool, 4, &mut rng);

        assert_eq!(picked.len(), 4);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_select_caps_at_pool_size() {
        let pool = vec![item("a"), item("b")];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(QuestionSelector::default().select(&pool, 10, &mut rng).len(), 2);
        assert!(QuestionSelector::default().select(&[], 3, &mut rng).is_empty());
    }
}
