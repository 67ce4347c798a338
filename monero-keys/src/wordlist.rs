//! Mnemonic dictionaries.
//!
//! A dictionary is an ordered list of exactly [`WORDLIST_SIZE`] unique words.
//! Lists come from a [`WordListProvider`]; one of them can be installed as
//! the process-wide dictionary used by the convenience functions.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::info;
use once_cell::sync::OnceCell;

use crate::MnemonicError;

/// Number of words in a mnemonic dictionary.
pub const WORDLIST_SIZE: usize = 1626;

static WORDLIST: OnceCell<WordList> = OnceCell::new();

/// An ordered mnemonic dictionary with a reverse index.
#[derive(Debug, Clone)]
pub struct WordList {
    pub(crate) words: Vec<String>,
    index: HashMap<String, usize>,
}

impl WordList {
    /// Build a dictionary from words in index order.
    pub fn from_words<I, S>(words: I) -> Result<Self, MnemonicError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() != WORDLIST_SIZE {
            return Err(MnemonicError::DictionarySize {
                expected: WORDLIST_SIZE,
                actual: words.len(),
            });
        }

        let mut index = HashMap::with_capacity(WORDLIST_SIZE);
        for (i, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(MnemonicError::InvalidEncoding(format!("empty word at {}", i)));
            }
            if index.insert(word.clone(), i).is_some() {
                return Err(MnemonicError::InvalidEncoding(format!(
                    "duplicate word '{}'",
                    word
                )));
            }
        }

        Ok(Self { words, index })
    }

    /// Read a dictionary with one word per line. Blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, MnemonicError> {
        let mut words = Vec::with_capacity(WORDLIST_SIZE);
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
        Self::from_words(words)
    }

    /// Read a dictionary file with one word per line.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MnemonicError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// The word at `index`.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// The index of `word`.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A source of mnemonic dictionaries.
pub trait WordListProvider {
    fn load(&self) -> Result<WordList, MnemonicError>;
}

/// Loads a dictionary from a file with one word per line.
#[derive(Debug, Clone)]
pub struct FileWordList {
    path: PathBuf,
}

impl FileWordList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordListProvider for FileWordList {
    fn load(&self) -> Result<WordList, MnemonicError> {
        WordList::from_path(&self.path)
    }
}

/// Provides a dictionary already held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryWordList {
    words: Vec<String>,
}

impl InMemoryWordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl WordListProvider for InMemoryWordList {
    fn load(&self) -> Result<WordList, MnemonicError> {
        WordList::from_words(self.words.iter().cloned())
    }
}

/// Install the process-wide dictionary.
///
/// The first successful install wins; later calls return the installed list
/// without consulting `provider`.
pub fn install_wordlist(provider: &dyn WordListProvider) -> Result<&'static WordList, MnemonicError> {
    WORDLIST.get_or_try_init(|| {
        let list = provider.load()?;
        info!("installed mnemonic dictionary ({} words)", list.len());
        Ok(list)
    })
}

/// The process-wide dictionary.
pub fn wordlist() -> Result<&'static WordList, MnemonicError> {
    WORDLIST.get().ok_or(MnemonicError::DictionaryNotLoaded)
}

/// A synthetic dictionary of three-letter words.
#[cfg(test)]
pub(crate) fn test_words() -> Vec<String> {
    (0..WORDLIST_SIZE)
        .map(|i| {
            let letter = |n: usize| char::from(b'a' + (n % 26) as u8);
            format!("{}{}{}", letter(i / 676), letter(i / 26), letter(i))
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn test_wordlist() -> WordList {
    WordList::from_words(test_words()).unwrap()
}

#[cfg(test)]
pub(crate) fn install_test_wordlist() -> &'static WordList {
    install_wordlist(&InMemoryWordList::new(test_words())).unwrap()
}
