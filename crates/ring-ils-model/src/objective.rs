// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::doublecomp;
use crate::solution::Solution;

/// Optimization sense shared read-only by every component.
///
/// All "is this solution better" decisions in the framework go through this
/// single total ordering; no component compares raw scores directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FMode {
    Minimize,
    Maximize,
}

impl FMode {
    /// True if score `a` is strictly better than score `b` under this mode.
    #[inline]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            FMode::Minimize => doublecomp::is_less(a, b),
            FMode::Maximize => doublecomp::is_greater(a, b),
        }
    }

    #[inline]
    pub fn is_better_or_equal(self, a: f64, b: f64) -> bool {
        match self {
            FMode::Minimize => doublecomp::is_less_or_equal(a, b),
            FMode::Maximize => doublecomp::is_greater_or_equal(a, b),
        }
    }

    /// True if a move delta of `delta` improves the objective.
    #[inline]
    pub fn improves(self, delta: f64) -> bool {
        match self {
            FMode::Minimize => doublecomp::is_less(delta, 0.0),
            FMode::Maximize => doublecomp::is_greater(delta, 0.0),
        }
    }

    /// Worst representable score, useful as an initial incumbent value.
    #[inline]
    pub fn bad_value(self) -> f64 {
        match self {
            FMode::Minimize => f64::INFINITY,
            FMode::Maximize => f64::NEG_INFINITY,
        }
    }
}

impl std::fmt::Display for FMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FMode::Minimize => write!(f, "minimize"),
            FMode::Maximize => write!(f, "maximize"),
        }
    }
}

/// A named objective function wrapping an [`FMode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Objective {
    name: String,
    fmode: FMode,
}

impl Objective {
    #[inline]
    pub fn new(name: impl Into<String>, fmode: FMode) -> Self {
        Self {
            name: name.into(),
            fmode,
        }
    }

    #[inline]
    pub fn of_minimizing(name: impl Into<String>) -> Self {
        Self::new(name, FMode::Minimize)
    }

    #[inline]
    pub fn of_maximizing(name: impl Into<String>) -> Self {
        Self::new(name, FMode::Maximize)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn fmode(&self) -> FMode {
        self.fmode
    }

    #[inline]
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        self.fmode.is_better(a, b)
    }

    #[inline]
    pub fn is_better_or_equal(&self, a: f64, b: f64) -> bool {
        self.fmode.is_better_or_equal(a, b)
    }

    /// Consumes a set of candidate solutions and returns the best one.
    /// Ties keep the earliest candidate.
    pub fn best<S>(&self, solutions: Vec<S>) -> Option<S>
    where
        S: Solution,
    {
        let mut iter = solutions.into_iter();
        let mut best = iter.next()?;
        for candidate in iter {
            if self.fmode.is_better(candidate.score(), best.score()) {
                best = candidate;
            }
        }
        Some(best)
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.fmode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[derive(Debug, Clone)]
    struct Scored {
        score: f64,
        tag: usize,
        stamp: Instant,
    }

    impl Scored {
        fn new(score: f64, tag: usize) -> Self {
            Self {
                score,
                tag,
                stamp: Instant::now(),
            }
        }
    }

    impl Solution for Scored {
        fn score(&self) -> f64 {
            self.score
        }

        fn last_modified(&self) -> Instant {
            self.stamp
        }
    }

    #[test]
    fn test_minimize_prefers_smaller_scores() {
        let fmode = FMode::Minimize;
        assert!(fmode.is_better(1.0, 2.0));
        assert!(!fmode.is_better(2.0, 1.0));
        assert!(!fmode.is_better(1.0, 1.0));
        assert!(fmode.is_better_or_equal(1.0, 1.0));
    }

    #[test]
    fn test_maximize_prefers_larger_scores() {
        let fmode = FMode::Maximize;
        assert!(fmode.is_better(2.0, 1.0));
        assert!(!fmode.is_better(1.0, 2.0));
        assert!(fmode.is_better_or_equal(2.0, 2.0));
    }

    #[test]
    fn test_improves_checks_delta_sign() {
        assert!(FMode::Minimize.improves(-0.5));
        assert!(!FMode::Minimize.improves(0.5));
        assert!(FMode::Maximize.improves(0.5));
        assert!(!FMode::Maximize.improves(-0.5));
    }

    #[test]
    fn test_bad_value_is_never_better() {
        for fmode in [FMode::Minimize, FMode::Maximize] {
            assert!(!fmode.is_better(fmode.bad_value(), 0.0));
            assert!(fmode.is_better(0.0, fmode.bad_value()));
        }
    }

    #[test]
    fn test_best_selects_by_mode() {
        let objective = Objective::of_minimizing("cost");
        let best = objective
            .best(vec![
                Scored::new(5.0, 0),
                Scored::new(2.0, 1),
                Scored::new(9.0, 2),
            ])
            .unwrap();
        assert_eq!(best.tag, 1);

        let objective = Objective::of_maximizing("profit");
        let best = objective
            .best(vec![
                Scored::new(5.0, 0),
                Scored::new(2.0, 1),
                Scored::new(9.0, 2),
            ])
            .unwrap();
        assert_eq!(best.tag, 2);
    }

    #[test]
    fn test_best_keeps_first_on_ties() {
        let objective = Objective::of_minimizing("cost");
        let best = objective
            .best(vec![Scored::new(3.0, 0), Scored::new(3.0, 1)])
            .unwrap();
        assert_eq!(best.tag, 0);
    }

    #[test]
    fn test_best_of_empty_is_none() {
        let objective = Objective::of_minimizing("cost");
        assert!(objective.best(Vec::<Scored>::new()).is_none());
    }
}
