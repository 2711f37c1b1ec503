//! Merging constraints and narrowing them to a fixed point

use super::Constraint;
use crate::core::CharSet;
use crate::error::{Error, Result};

impl Constraint {
    /// Combine constraints from several guesses
    ///
    /// Allowed sets intersect per position. Minimum counts take the maximum per
    /// character: two guesses reporting one `e` each still only prove one `e`.
    ///
    /// A position where the inputs share no character keeps the union of all
    /// inputs there instead, so the result stays satisfiable. Each position is
    /// decided over every input at once, which keeps the result independent of
    /// input order.
    ///
    /// The result is raw; call `resolve` to apply closure and narrowing.
    ///
    /// # Errors
    /// Returns `Error::EmptyMerge` for an empty slice and
    /// `Error::ConstraintLengthMismatch` if the word lengths differ.
    pub fn merge(constraints: &[Self]) -> Result<Self> {
        let (first, rest) = constraints.split_first().ok_or(Error::EmptyMerge)?;
        if let Some(odd) = rest.iter().find(|c| c.word_length() != first.word_length()) {
            return Err(Error::ConstraintLengthMismatch {
                left: first.word_length(),
                right: odd.word_length(),
            });
        }

        let allowed = (0..first.word_length())
            .map(|position| {
                let sets = constraints.iter().map(|c| c.allowed[position]);
                let all = sets.clone().fold(first.allowed[position], CharSet::intersection);
                if all.is_empty() {
                    let any = sets.fold(CharSet::EMPTY, CharSet::union);
                    log::warn!("contradictory constraints at position {position}: keeping {any:?}");
                    any
                } else {
                    all
                }
            })
            .collect();

        let mut min_counts = first.min_counts.clone();
        for constraint in rest {
            for (&ch, &count) in &constraint.min_counts {
                let entry = min_counts.entry(ch).or_insert(0);
                *entry = (*entry).max(count);
            }
        }

        Ok(Self {
            allowed,
            min_counts,
        })
    }

    /// Merge two constraints
    ///
    /// # Errors
    /// Returns `Error::ConstraintLengthMismatch` if the word lengths differ.
    pub fn merged_with(&self, other: &Self) -> Result<Self> {
        Self::merge(&[self.clone(), other.clone()])
    }

    /// Rule out unlisted characters once the whole multiset is known
    ///
    /// When the minimum counts add up to the word length, every occurrence is
    /// accounted for and characters without a minimum cannot appear anywhere.
    /// A position whose allowed set would become empty is left untouched.
    pub fn close_exhaustive(&mut self) {
        let known: usize = self.min_counts.values().sum();
        if known != self.word_length() {
            return;
        }
        let listed: CharSet = self.min_counts.keys().copied().collect();
        for set in &mut self.allowed {
            let closed = set.intersection(listed);
            if !closed.is_empty() {
                *set = closed;
            }
        }
    }

    /// Narrow positions until nothing changes
    ///
    /// A character required `k` times that is allowed in exactly `k` positions
    /// must occupy all of them. Placing it can leave another character with
    /// exactly as many positions as it needs, so passes repeat until a full
    /// pass changes nothing.
    pub fn narrow(&mut self) {
        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = false;
            for (&ch, &count) in &self.min_counts {
                let positions: Vec<usize> = self
                    .allowed
                    .iter()
                    .enumerate()
                    .filter(|(_, set)| set.contains(ch))
                    .map(|(i, _)| i)
                    .collect();
                if positions.len() != count {
                    continue;
                }
                for i in positions {
                    if self.allowed[i] != CharSet::single(ch) {
                        self.allowed[i] = CharSet::single(ch);
                        changed = true;
                    }
                }
            }
            if !changed {
                log::trace!("narrowing reached a fixed point after {passes} passes");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::constraint::{Constraint, ConstraintBuilder};
    use crate::core::{Alphabet, CharSet};
    use crate::error::Error;

    fn single(guess: &str) -> Constraint {
        ConstraintBuilder::new(Alphabet::latin(), 5)
            .build_annotated(guess)
            .unwrap()
    }

    fn eliminated(constraint: &Constraint, position: usize) -> CharSet {
        Alphabet::latin()
            .chars()
            .difference(constraint.allowed(position))
    }

    fn set(chars: &str) -> CharSet {
        CharSet::from_bytes(chars.as_bytes())
    }

    #[test]
    fn merge_two_guesses() {
        let merged = Constraint::merge(&[single("S(ES)an"), single("S(LO)wS")]).unwrap();
        assert_eq!(merged.min_count(b's'), 2);
        assert_eq!(merged.min_count(b'l'), 1);
        assert_eq!(merged.min_count(b'e'), 1);
        assert_eq!(merged.min_count(b'o'), 1);
        assert_eq!(merged.min_counts().len(), 4);
        assert_eq!(merged.allowed(0), set("s"));
        assert_eq!(merged.allowed(4), set("s"));
        assert_eq!(eliminated(&merged, 1), set("elwan"));
        assert_eq!(eliminated(&merged, 2), set("sanow"));
        assert_eq!(eliminated(&merged, 3), set("anw"));
    }

    #[test]
    fn merge_three_guesses() {
        let merged = Constraint::merge(&[
            single("S(ES)an"),
            single("S(LO)wS"),
            single("S(S)bsd"),
        ])
        .unwrap();
        assert_eq!(merged.min_count(b's'), 2);
        assert_eq!(merged.min_counts().len(), 4);
        assert_eq!(merged.allowed(0), set("s"));
        assert_eq!(eliminated(&merged, 1), set("elwanbsd"));
        assert_eq!(eliminated(&merged, 2), set("sanowbd"));
        assert_eq!(eliminated(&merged, 3), set("anwbsd"));
        assert_eq!(merged.allowed(4), set("s"));
    }

    #[test]
    fn merge_takes_max_not_sum() {
        let merged = Constraint::merge(&[single("(E)xxxx"), single("x(E)xxx")]).unwrap();
        assert_eq!(merged.min_count(b'e'), 1);
    }

    #[test]
    fn merge_with_itself_is_identity() {
        for guess in ["S(ES)an", "S(LO)wS", "(B)Btbb", "crane"] {
            let c = single(guess);
            assert_eq!(Constraint::merge(&[c.clone(), c.clone()]).unwrap(), c);
        }
    }

    #[test]
    fn merge_is_order_independent() {
        let a = single("S(ES)an");
        let b = single("(B)Btbb");
        let ab = Constraint::merge(&[a.clone(), b.clone()]).unwrap();
        let ba = Constraint::merge(&[b, a]).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.clone().resolve(), ba.resolve());
    }

    #[test]
    fn contradictory_greens_stay_satisfiable() {
        let ab = Constraint::merge(&[single("Axxxx"), single("Bxxxx")]).unwrap();
        let ba = Constraint::merge(&[single("Bxxxx"), single("Axxxx")]).unwrap();
        assert_eq!(ab.allowed(0), set("ab"));
        assert_eq!(ab, ba);
        assert!(ab.compile().is_ok());
    }

    #[test]
    fn contradictions_resolve_the_same_in_every_order() {
        let inputs = [single("Axxxx"), single("Bxxxx"), single("Ayyyy")];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        let expected = Constraint::merge(&inputs).unwrap();
        assert_eq!(expected.allowed(0), set("ab"));
        for order in orders {
            let shuffled: Vec<Constraint> = order.iter().map(|&i| inputs[i].clone()).collect();
            assert_eq!(Constraint::merge(&shuffled).unwrap(), expected, "{order:?}");
        }
    }

    #[test]
    fn merge_zero_constraints_fails() {
        assert!(matches!(Constraint::merge(&[]), Err(Error::EmptyMerge)));
    }

    #[test]
    fn merge_different_lengths_fails() {
        let short = ConstraintBuilder::new(Alphabet::latin(), 4)
            .build_annotated("lame")
            .unwrap();
        assert!(matches!(
            Constraint::merge(&[single("crane"), short]),
            Err(Error::ConstraintLengthMismatch { left: 5, right: 4 })
        ));
    }

    #[test]
    fn exhaustive_closure_needs_full_count() {
        let mut partial = single("S(ES)an");
        let before = partial.clone();
        partial.close_exhaustive();
        assert_eq!(partial, before);

        let mut full = Constraint::merge(&[single("S(ES)an"), single("S(LO)wS")]).unwrap();
        full.close_exhaustive();
        assert_eq!(full.allowed(3), set("eols"));
    }

    #[test]
    fn narrowing_is_a_fixed_point() {
        let resolved = Constraint::merge(&[single("s(LA)t(E)"), single("p(A)vED")])
            .unwrap()
            .resolve();
        let mut again = resolved.clone();
        again.narrow();
        assert_eq!(again, resolved);
        assert_eq!(resolved.clone().resolve(), resolved);
    }

    #[test]
    fn narrowing_cascades_across_characters() {
        let mut c = Constraint::merge(&[single("s(LA)t(E)"), single("p(A)vED")]).unwrap();
        // a is only possible at 0; once placed, l is only possible at 2
        c.narrow();
        assert_eq!(c.allowed(0), set("a"));
        assert_eq!(c.allowed(2), set("l"));
    }
}
