use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // identifiers like sort_list stay whole; inner apostrophes keep "don't" one token
    // combining marks belong to the word (Devanagari vowel signs, Arabic harakat)
    static ref WORD: Regex =
        Regex::new(r"(?u)[\p{L}\p{M}\p{N}_]+(?:'[\p{L}\p{M}\p{N}_]+)*").expect("valid regex");
    static ref WORD_OR_PUNCT: Regex =
        Regex::new(r"(?u)[\p{L}\p{M}\p{N}_]+(?:'[\p{L}\p{M}\p{N}_]+)*|[^\s\p{L}\p{M}\p{N}_]").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","ain","all","am","an","and","any","are","aren","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","couldn","couldn't",
            "d","did","didn","didn't","do","does","doesn","doesn't","doing","don","don't","down","during",
            "each","few","for","from","further",
            "had","hadn","hadn't","has","hasn","hasn't","have","haven","haven't","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","isn","isn't","it","it's","its","itself",
            "just","ll","m","ma","me","mightn","mightn't","more","most","mustn","mustn't","my","myself",
            "needn","needn't","no","nor","not","now",
            "o","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "re","s","same","shan","shan't","she","she's","should","should've","shouldn","shouldn't","so","some","such",
            "t","than","that","that'll","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","ve","very",
            "was","wasn","wasn't","we","were","weren","weren't","what","when","where","which","while","who","whom","why","will","with","won","won't","wouldn","wouldn't",
            "y","you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// How raw text is turned into terms. Documents and the query must go
/// through the same options or their vectors are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub lowercase: bool,
    /// Drop punctuation; when false every punctuation character is its own token.
    pub strip_punctuation: bool,
    pub remove_stopwords: bool,
    /// English Snowball stemming of word tokens.
    pub stem: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { lowercase: true, strip_punctuation: true, remove_stopwords: true, stem: false }
    }
}

impl NormalizeOptions {
    /// Plain word-boundary split: case and punctuation are kept.
    pub fn tokenize_only() -> Self {
        Self { lowercase: false, strip_punctuation: false, remove_stopwords: false, stem: false }
    }

    /// Lowercase and strip punctuation, keep stop words.
    pub fn clean() -> Self {
        Self { lowercase: true, strip_punctuation: true, remove_stopwords: false, stem: false }
    }
}

pub fn is_stopword(token: &str) -> bool {
    if token.chars().any(char::is_uppercase) {
        STOPWORDS.contains(token.to_lowercase().as_str())
    } else {
        STOPWORDS.contains(token)
    }
}

fn is_word(token: &str) -> bool {
    WORD.find(token).map_or(false, |m| m.start() == 0 && m.end() == token.len())
}

/// Tokenize text after NFKC normalization according to `opts`.
pub fn normalize(text: &str, opts: &NormalizeOptions) -> Vec<String> {
    let mut normalized = text.nfkc().collect::<String>();
    if opts.lowercase {
        normalized = normalized.to_lowercase();
    }
    let re: &Regex = if opts.strip_punctuation { &WORD } else { &WORD_OR_PUNCT };
    let mut tokens = Vec::new();
    for mat in re.find_iter(&normalized) {
        let token = mat.as_str();
        let word = is_word(token);
        if word && opts.remove_stopwords && is_stopword(token) {
            continue;
        }
        let term: Cow<'_, str> = if word && opts.stem { STEMMER.stem(token) } else { Cow::Borrowed(token) };
        tokens.push(term.into_owned());
    }
    tokens
}

/// Tokens joined by single spaces.
pub fn normalize_to_string(text: &str, opts: &NormalizeOptions) -> String {
    normalize(text, opts).join(" ")
}
