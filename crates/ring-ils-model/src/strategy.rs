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

//! Pluggable strategy contracts.
//!
//! Every search behavior the core does not own arrives through one of these
//! traits. All of them are `Send + Sync`: the scheduler runs repetitions of
//! the same algorithm instance concurrently, so a stateful implementation
//! must use interior mutability and remain thread safe. The RNG is a trait
//! type parameter so engines can pin a concrete deterministic generator
//! while implementations stay generic.

use crate::err::DynError;
use crate::instance::Instance;
use crate::solution::Solution;

/// Builds an initial solution for an instance from scratch.
pub trait Constructor<I, S, R>: Send + Sync
where
    I: Instance,
    S: Solution,
    R: rand::Rng,
{
    fn construct(&self, instance: &I, rng: &mut R) -> Result<S, DynError>;
}

/// Destructive perturbation applied in place at a given strength.
pub trait Shake<S, R>: Send + Sync
where
    S: Solution,
    R: rand::Rng,
{
    fn shake(&self, solution: &mut S, strength: u32, rng: &mut R) -> Result<(), DynError>;
}

/// Local-search improvement applied in place.
pub trait Improver<S, R>: Send + Sync
where
    S: Solution,
    R: rand::Rng,
{
    fn improve(&self, solution: &mut S, rng: &mut R) -> Result<(), DynError>;
}

/// A complete algorithm as scheduled by the work-unit executor: one call
/// solves one instance once. The generator passed in is owned by the task
/// and deterministically seeded from the repetition index.
pub trait Algorithm<I, S, R>: Send + Sync
where
    I: Instance,
    S: Solution,
    R: rand::Rng,
{
    fn name(&self) -> &str;

    fn run(&self, instance: &I, rng: &mut R) -> Result<S, DynError>;
}

impl<'a, I, S, R> std::fmt::Debug for dyn Algorithm<I, S, R> + 'a
where
    I: Instance,
    S: Solution,
    R: rand::Rng,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Algorithm({})", self.name())
    }
}

/// Full context of a failed work unit, handed to the exception handler.
pub struct FailureContext<'a, I, S>
where
    I: Instance,
    S: Solution,
{
    pub experiment: &'a str,
    pub instance: &'a I,
    pub algorithm: &'a str,
    pub repetition: usize,
    pub error: &'a DynError,
    /// Present when a solution existed before the failure, e.g. when the
    /// post-condition validator rejected it.
    pub partial: Option<&'a S>,
}

/// Receives isolated task-level failures from the scheduler. Handling a
/// failure must not panic; the scheduler continues with sibling units.
pub trait ExceptionHandler<I, S>: Send + Sync
where
    I: Instance,
    S: Solution,
{
    fn handle(&self, context: &FailureContext<'_, I, S>);
}
