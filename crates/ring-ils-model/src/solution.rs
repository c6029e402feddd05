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

use std::time::Instant;

/// Mutable candidate answer tied to one instance.
///
/// `Clone` must produce an independent, unaliased deep copy: after cloning,
/// mutating either solution must not be observable through the other. Each
/// worker owns its solution exclusively except for the instant it is handed
/// off through a ring channel, where ownership moves with the hand-off.
pub trait Solution: Clone + Send + 'static {
    /// Numeric objective value of this candidate.
    fn score(&self) -> f64;

    /// Timestamp of the last improving mutation. Used by the scheduler to
    /// derive the time-to-target of a run.
    fn last_modified(&self) -> Instant;
}
