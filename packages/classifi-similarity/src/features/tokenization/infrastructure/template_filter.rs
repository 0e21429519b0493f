//! Template code stripping
//!
//! Removes every run of submission tokens that exactly matches a contiguous
//! run of template tokens, so starter code handed out by the instructor never
//! contributes to similarity.
//!
//! A run is stripped when it is at least `min_match` tokens long, or when it
//! reproduces the entire template (templates shorter than `min_match`).

use crate::features::tokenization::domain::{Token, TokenKind};
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};

/// Index over a tokenized template
pub struct TemplateFilter {
    template: Vec<Token>,

    /// Seed length of the index (min of `min_match` and template length)
    seed_len: usize,

    /// Hash of each seed-length run → template start positions
    seeds: FxHashMap<u64, Vec<usize>>,
}

impl TemplateFilter {
    pub fn new(template: Vec<Token>, min_match: usize) -> Self {
        let seed_len = min_match.max(1).min(template.len());
        let mut seeds: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
        if seed_len > 0 {
            for start in 0..=template.len() - seed_len {
                seeds
                    .entry(run_hash(&template[start..start + seed_len]))
                    .or_default()
                    .push(start);
            }
        }
        Self {
            template,
            seed_len,
            seeds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    /// Mark every submission token covered by a template match
    ///
    /// Starts are visited in ascending order, and the end of the last run
    /// found on each diagonal (`start - t_start`) is remembered. A seed on
    /// that diagonal before the remembered end continues the same run, whose
    /// tokens are already marked, so each run is extended once.
    pub fn excluded_mask(&self, tokens: &[Token]) -> Vec<bool> {
        let mut excluded = vec![false; tokens.len()];
        if self.seed_len == 0 || tokens.len() < self.seed_len {
            return excluded;
        }

        let mut run_end: FxHashMap<isize, usize> = FxHashMap::default();
        for start in 0..=tokens.len() - self.seed_len {
            let window = &tokens[start..start + self.seed_len];
            let Some(candidates) = self.seeds.get(&run_hash(window)) else {
                continue;
            };

            let mut longest = 0;
            for &t_start in candidates {
                let diagonal = start as isize - t_start as isize;
                if run_end.get(&diagonal).is_some_and(|&end| start < end) {
                    continue;
                }

                // Hash equality is only a hint; confirm token by token
                let mut len = 0;
                while start + len < tokens.len()
                    && t_start + len < self.template.len()
                    && tokens[start + len].same_lexeme(&self.template[t_start + len])
                {
                    len += 1;
                }
                if len >= self.seed_len {
                    run_end.insert(diagonal, start + len);
                    longest = longest.max(len);
                }
            }

            for flag in excluded.iter_mut().skip(start).take(longest) {
                *flag = true;
            }
        }

        excluded
    }

    /// Drop template-matching tokens, returning the kept tokens and the count removed
    pub fn strip(&self, tokens: Vec<Token>) -> (Vec<Token>, usize) {
        let mask = self.excluded_mask(&tokens);
        let removed = mask.iter().filter(|&&m| m).count();
        if removed == 0 {
            return (tokens, 0);
        }
        let kept = tokens
            .into_iter()
            .zip(mask)
            .filter_map(|(token, excluded)| (!excluded).then_some(token))
            .collect();
        (kept, removed)
    }
}

fn run_hash(run: &[Token]) -> u64 {
    let mut hasher = FxHasher::default();
    for token in run {
        lexeme_key(token).hash(&mut hasher);
    }
    hasher.finish()
}

fn lexeme_key(token: &Token) -> (TokenKind, &str) {
    (token.kind, token.text.as_str())
}
