use std::fmt;

use fancy_regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAnalysis {
    pub original: String,
    pub word_count: usize,
    pub character_count: usize,
    pub character_count_no_spaces: usize,
    pub reversed: String,
    pub uppercase: String,
    pub lowercase: String,
}

impl fmt::Display for TextAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "original: {}", self.original)?;
        writeln!(f, "wordCount: {}", self.word_count)?;
        writeln!(f, "characterCount: {}", self.character_count)?;
        writeln!(
            f,
            "characterCountNoSpaces: {}",
            self.character_count_no_spaces
        )?;
        writeln!(f, "reversed: {}", self.reversed)?;
        writeln!(f, "uppercase: {}", self.uppercase)?;
        write!(f, "lowercase: {}", self.lowercase)
    }
}

/// Word and character statistics of `text`.
///
/// Characters are counted on the NFC form so a precomposed and a decomposed
/// accent count the same. Blank input has zero words.
pub fn analyze_text(text: &str) -> TextAnalysis {
    let normalized = text.nfc().collect::<String>();
    TextAnalysis {
        original: text.to_string(),
        word_count: normalized.split_whitespace().count(),
        character_count: normalized.chars().count(),
        character_count_no_spaces: normalized.chars().filter(|ch| !ch.is_whitespace()).count(),
        reversed: normalized.chars().rev().collect(),
        uppercase: text.to_uppercase(),
        lowercase: text.to_lowercase(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTransform {
    Capitalize,
    Title,
    Alternate,
    Reverse,
}

impl TextTransform {
    pub const ALL: [Self; 4] = [Self::Capitalize, Self::Title, Self::Alternate, Self::Reverse];

    pub fn name(self) -> &'static str {
        match self {
            Self::Capitalize => "capitalize",
            Self::Title => "title",
            Self::Alternate => "alternate",
            Self::Reverse => "reverse",
        }
    }

    /// Unknown names yield `None`; callers leave the text unchanged.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|transform| transform.name() == name)
    }
}

pub fn transform_text(text: &str, transform: TextTransform) -> Result<String> {
    let out = match transform {
        TextTransform::Capitalize => capitalize_word(text),
        TextTransform::Title => {
            let words = Regex::new(r"\w\S*").map_err(|err| Error::InvalidInput(err.to_string()))?;
            let mut out = String::with_capacity(text.len());
            let mut last = 0usize;
            for matched in words.find_iter(text) {
                let matched = matched.map_err(|err| Error::InvalidInput(err.to_string()))?;
                out.push_str(&text[last..matched.start()]);
                out.push_str(&capitalize_word(matched.as_str()));
                last = matched.end();
            }
            out.push_str(&text[last..]);
            out
        }
        TextTransform::Alternate => text
            .chars()
            .enumerate()
            .flat_map(|(index, ch)| {
                if index % 2 == 0 {
                    ch.to_uppercase().collect::<Vec<_>>()
                } else {
                    ch.to_lowercase().collect::<Vec<_>>()
                }
            })
            .collect(),
        TextTransform::Reverse => text.chars().rev().collect(),
    };
    Ok(out)
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
