//! Incremental extraction of space-separated IRC parameters.

use std::iter::FusedIterator;

/// Reads `<middle>` and `<trailing>` tokens from one IRC message.
///
/// The tokenizer holds a view over the part of the message that has not been
/// consumed yet. Every token borrows from the original message. Once the view
/// is empty the tokenizer is exhausted and stays that way.
///
/// Iterating yields successive [`middle`](Self::middle) tokens.
#[derive(Debug, Clone)]
pub struct MessageTokenizer<'a> {
    remaining: &'a str,
}

impl<'a> MessageTokenizer<'a> {
    /// Creates a tokenizer over `message`.
    pub fn new(message: &'a str) -> Self {
        Self { remaining: message }
    }

    /// Retrieve the next `<middle>` token.
    ///
    /// A token runs up to the next space. Consecutive spaces after it are
    /// skipped. Returns `None` once the message is exhausted.
    pub fn middle(&mut self) -> Option<&'a str> {
        if self.remaining.is_empty() {
            return None;
        }

        let Some(separator) = self.remaining.find(' ') else {
            // No separator: this is the last token.
            return Some(std::mem::take(&mut self.remaining));
        };

        let token = &self.remaining[..separator];
        self.remaining = self.remaining[separator..].trim_start_matches(' ');
        Some(token)
    }

    /// Retrieve the next `<trailing>` token.
    ///
    /// If the next token starts with `:` the rest of the message, spaces
    /// included, is returned without the colon and the tokenizer is
    /// exhausted. Otherwise this behaves like [`middle`](Self::middle).
    pub fn trailing(&mut self) -> Option<&'a str> {
        match self.remaining.strip_prefix(':') {
            Some(rest) => {
                self.remaining = "";
                Some(rest)
            }
            None => self.middle(),
        }
    }

    /// The unconsumed part of the message.
    pub fn remaining(&self) -> &'a str {
        self.remaining
    }

    /// Whether no tokens remain.
    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl<'a> Iterator for MessageTokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.middle()
    }
}

impl FusedIterator for MessageTokenizer<'_> {}
