//! Property-based tests for the command tokenizer
//!
//! Uses proptest to generate arbitrary lines and verify the shape of every
//! argument vector the tokenizer can produce.

use fileman::{Lexer, MAX_ARGS};
use proptest::prelude::*;

mod strategies {
    use proptest::prelude::*;

    /// Arbitrary printable input, quotes and spaces included
    pub fn arbitrary_line() -> impl Strategy<Value = String> {
        prop::string::string_regex("[ -~\t\n]{0,120}").unwrap()
    }

    /// Plain words with no quotes or spaces
    pub fn word() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9_./-]{1,20}").unwrap()
    }

    /// Words that may contain spaces, to be wrapped in quotes
    pub fn phrase() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9 ._-]{0,20}[a-zA-Z0-9._-]").unwrap()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Tokens are bounded in number, non-empty and free of quotes and newlines.
    #[test]
    fn tokens_are_well_formed(line in strategies::arbitrary_line()) {
        let args = Lexer::tokenize(&line);
        prop_assert!(args.len() <= MAX_ARGS);
        for token in args.as_slice() {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.contains('"'));
            prop_assert!(!token.contains('\n'));
        }
    }

    /// Nothing after the first newline influences the result.
    #[test]
    fn newline_ends_input(
        head in prop::string::string_regex("[a-z \"]{0,40}").unwrap(),
        tail in strategies::arbitrary_line(),
    ) {
        let line = format!("{}\n{}", head, tail);
        prop_assert_eq!(Lexer::tokenize(&line), Lexer::tokenize(&head));
    }

    /// Space-separated words come back as-is, cut to the first four.
    #[test]
    fn plain_words_split_on_spaces(words in prop::collection::vec(strategies::word(), 0..8)) {
        let args = Lexer::tokenize(&words.join("  "));
        let expected: Vec<String> = words.iter().take(MAX_ARGS).cloned().collect();
        prop_assert_eq!(args.as_slice(), expected.as_slice());
        prop_assert_eq!(args.is_truncated(), words.len() > MAX_ARGS);
    }

    /// A quoted phrase survives as one token with its spaces intact.
    #[test]
    fn quoted_phrase_is_one_token(cmd in strategies::word(), phrase in strategies::phrase()) {
        let args = Lexer::tokenize(&format!("{} \"{}\"", cmd, phrase));
        prop_assert_eq!(args.len(), 2);
        prop_assert_eq!(&args.as_slice()[1], &phrase);
    }
}
