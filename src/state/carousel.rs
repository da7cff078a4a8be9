/// Ordered slide sequence and the currently displayed index
///
/// The carousel is the only owner of slide activation. Navigation wraps in
/// both directions, and a rebuild always replaces the whole sequence.

use super::data::Slide;
use super::settings::EmptyListPolicy;

/// What a rebuild did to the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// New sequence of this many slides, slide 0 active
    Replaced(usize),
    /// Empty reference list, previous slides kept
    Retained,
    /// Empty reference list, slides dropped
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct Carousel {
    slides: Vec<Slide>,
    /// Meaningless while `slides` is empty
    current: usize,
    empty_policy: EmptyListPolicy,
}

impl Carousel {
    pub fn new(empty_policy: EmptyListPolicy) -> Self {
        Self {
            slides: Vec::new(),
            current: 0,
            empty_policy,
        }
    }

    /// Replace every slide with one per reference, in order.
    pub fn rebuild(&mut self, references: Vec<String>) -> RebuildOutcome {
        if references.is_empty() {
            return match self.empty_policy {
                EmptyListPolicy::Retain => RebuildOutcome::Retained,
                EmptyListPolicy::Clear => {
                    self.slides.clear();
                    self.current = 0;
                    RebuildOutcome::Cleared
                }
            };
        }

        self.slides = references
            .into_iter()
            .enumerate()
            .map(|(position, reference)| Slide::new(reference, position))
            .collect();
        self.slides[0].set_active(true);
        self.current = 0;

        RebuildOutcome::Replaced(self.slides.len())
    }

    /// Show slide `n`, wrapping out-of-range values in either direction.
    /// Returns the new index, or `None` when there is nothing to show.
    pub fn go_to(&mut self, n: i64) -> Option<usize> {
        if self.slides.is_empty() {
            return None;
        }

        let target = n.rem_euclid(self.slides.len() as i64) as usize;
        self.slides[self.current].set_active(false);
        self.slides[target].set_active(true);
        self.current = target;

        Some(target)
    }

    pub fn next(&mut self) -> Option<usize> {
        self.go_to(self.current as i64 + 1)
    }

    pub fn previous(&mut self) -> Option<usize> {
        self.go_to(self.current as i64 - 1)
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.slides.is_empty()).then_some(self.current)
    }

    /// The one active slide
    pub fn current(&self) -> Option<&Slide> {
        self.slides.iter().find(|slide| slide.is_active())
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
