//! Header typing effect as a timer-free state machine.
//!
//! Each [`Typewriter::tick`] returns the text to display and how long to wait
//! before the next tick. The host owns the timer.

use std::time::Duration;

/// Delays between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    /// Pause once a word is fully typed, before deleting starts.
    pub hold_delay: Duration,
    /// Pause once a word is fully deleted, before the next word starts.
    pub next_word_delay: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(120),
            delete_delay: Duration::from_millis(60),
            hold_delay: Duration::from_millis(2000),
            next_word_delay: Duration::from_millis(500),
        }
    }
}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterFrame {
    pub text: String,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    words: Vec<Vec<char>>,
    timing: TypewriterTiming,
    word: usize,
    shown: usize,
    deleting: bool,
}

impl Typewriter {
    /// Returns `None` when no non-empty word is given; the effect does not run.
    pub fn new<I, S>(words: I, timing: TypewriterTiming) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<Vec<char>> = words
            .into_iter()
            .map(|w| w.as_ref().chars().collect::<Vec<char>>())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return None;
        }
        Some(Self {
            words,
            timing,
            word: 0,
            shown: 0,
            deleting: false,
        })
    }

    /// Index of the word currently being typed or deleted.
    pub fn word_index(&self) -> usize {
        self.word
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Types or deletes one character and reports the delay to the next tick.
    pub fn tick(&mut self) -> TypewriterFrame {
        let current = &self.words[self.word];
        let mut delay;

        if self.deleting {
            self.shown -= 1;
            delay = self.timing.delete_delay;
        } else {
            self.shown += 1;
            delay = self.timing.type_delay;
        }
        let text: String = current[..self.shown].iter().collect();

        if !self.deleting && self.shown == current.len() {
            self.deleting = true;
            delay = self.timing.hold_delay;
        } else if self.deleting && self.shown == 0 {
            self.deleting = false;
            self.word = (self.word + 1) % self.words.len();
            delay = self.timing.next_word_delay;
        }

        TypewriterFrame { text, delay }
    }
}
