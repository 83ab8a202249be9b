use crate::explicit::{Continuation, DirectionalRun};

/// An iterator over the positions of an isolated run sequence (BD13).
///
/// Walks a run and then follows its continuation links, skipping the runs
/// of nested isolates in between. Cloning the iterator is cheap and gives a
/// mark that can be used to revisit a part of the sequence.
#[derive(Clone, Debug)]
pub(crate) struct IsolatedRunSequence<'a> {
    runs: &'a [DirectionalRun],
    run: usize,
    pos: Option<usize>,
}

impl<'a> IsolatedRunSequence<'a> {
    /// Creates a sequence starting at the run with index `first`.
    pub fn new(runs: &'a [DirectionalRun], first: usize) -> Self {
        IsolatedRunSequence {
            runs,
            run: first,
            pos: Some(runs[first].start),
        }
    }

    /// Returns the position the next call to `next` will yield.
    #[inline]
    pub fn peek(&self) -> Option<usize> {
        self.pos
    }
}

impl Iterator for IsolatedRunSequence<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let pos = self.pos?;

        let run = &self.runs[self.run];
        self.pos = if pos < run.end {
            Some(pos + 1)
        } else if let Continuation::Run(next) = run.continuation {
            self.run = next;
            Some(self.runs[next].start)
        } else {
            None
        };

        Some(pos)
    }
}
