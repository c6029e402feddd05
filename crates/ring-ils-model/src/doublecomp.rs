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

//! Tolerant floating point comparison.
//!
//! Objective scores are `f64`; two scores closer than [`EPSILON`] are
//! considered equal so that accumulated rounding noise never flips an
//! accept/reject decision.

/// Default comparison tolerance.
pub const EPSILON: f64 = 1e-6;

#[inline]
pub fn equals(a: f64, b: f64) -> bool {
    equals_eps(a, b, EPSILON)
}

#[inline]
pub fn equals_eps(a: f64, b: f64, epsilon: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a == b {
        // Covers infinities of the same sign.
        return true;
    }
    (a - b).abs() < epsilon
}

#[inline]
pub fn is_less(a: f64, b: f64) -> bool {
    !equals(a, b) && a < b
}

#[inline]
pub fn is_less_or_equal(a: f64, b: f64) -> bool {
    equals(a, b) || a < b
}

#[inline]
pub fn is_greater(a: f64, b: f64) -> bool {
    !equals(a, b) && a > b
}

#[inline]
pub fn is_greater_or_equal(a: f64, b: f64) -> bool {
    equals(a, b) || a > b
}
