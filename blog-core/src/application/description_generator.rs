use std::collections::VecDeque;

use tracing::debug;

pub const CANNED_DESCRIPTIONS: [&str; 10] = [
    "An interesting post about the latest technology trends.",
    "Thoughts on modern web development and its best practices.",
    "Notes from building elegant user interfaces.",
    "A new tool that makes frontend work simpler.",
    "Pros and cons of different design approaches.",
    "Practical tips for getting more done as a developer.",
    "A tour of recent language features worth knowing.",
    "A quick guide to smooth, fast CSS animations.",
    "Why web accessibility matters and how to get it right.",
    "Building a modern web application without a framework.",
];

/// Supplies indices in `0..upper`. `upper` is never zero.
pub trait RandomIndex {
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Uniform choice backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomIndex for ThreadRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        rand::random_range(0..upper)
    }
}

/// Replays a fixed sequence of indices, then keeps returning the last one
/// (or zero if the sequence was empty).
#[derive(Debug, Clone, Default)]
pub struct ScriptedIndex {
    queue: VecDeque<usize>,
    last: usize,
}

impl ScriptedIndex {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: indices.into_iter().collect(),
            last: 0,
        }
    }
}

impl RandomIndex for ScriptedIndex {
    fn next_index(&mut self, _upper: usize) -> usize {
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        self.last
    }
}

pub struct DescriptionGenerator {
    source: Box<dyn RandomIndex>,
}

impl DescriptionGenerator {
    pub fn new(source: impl RandomIndex + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    pub fn generate(&mut self) -> &'static str {
        let index = self.source.next_index(CANNED_DESCRIPTIONS.len()) % CANNED_DESCRIPTIONS.len();
        debug!(index, "description generated");
        CANNED_DESCRIPTIONS[index]
    }
}

impl Default for DescriptionGenerator {
    fn default() -> Self {
        Self::new(ThreadRandom)
    }
}

impl std::fmt::Debug for DescriptionGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptionGenerator").finish_non_exhaustive()
    }
}
