// Copyright 2026 the Plotstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cooperative per-item drawing.

use futures_lite::future::yield_now;

/// The step for item `index` failed with `error`.
#[derive(Clone, Debug, PartialEq)]
pub struct StepFailure<E> {
    /// Position of the failing item in the sequence.
    pub index: usize,
    /// What the step returned.
    pub error: E,
}

/// Run `step` once per item, yielding to the executor before each one.
///
/// Resolves with the number of completed steps once every step has run, or
/// with the first failure. No step runs after a failure.
///
/// ```
/// use futures_lite::future::block_on;
/// use plotstory_plugins::draw_yielding;
///
/// let mut drawn = Vec::new();
/// let done = block_on(draw_yielding([3, 1, 2], |_, item| {
///     drawn.push(item);
///     Ok::<_, ()>(())
/// }));
/// assert_eq!(done, Ok(3));
/// assert_eq!(drawn, [3, 1, 2]);
/// ```
pub async fn draw_yielding<I, E>(
    items: I,
    mut step: impl FnMut(usize, I::Item) -> Result<(), E>,
) -> Result<usize, StepFailure<E>>
where
    I: IntoIterator,
{
    let mut done = 0;
    for (index, item) in items.into_iter().enumerate() {
        yield_now().await;
        step(index, item).map_err(|error| StepFailure { index, error })?;
        done += 1;
    }
    Ok(done)
}
