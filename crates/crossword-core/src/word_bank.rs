//! Candidate words and their clues.
//!
//! Words are stored in grid form: lowercase ASCII letters with accents
//! folded away. Display casing is left to the front-end.

use crate::error::{CrosswordError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Fewest usable words a bank must offer before generation is attempted
pub const MIN_USABLE_WORDS: usize = 2;

/// A candidate word with its clue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub clue: String,
}

impl WordEntry {
    /// Build an entry, normalizing the word. Returns `None` when the word
    /// contains anything other than letters.
    pub fn new(word: &str, clue: &str) -> Option<Self> {
        Some(Self {
            word: normalize_word(word)?,
            clue: clue.trim().to_string(),
        })
    }

    /// Length in grid cells
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Curated (word, clue) pairs compiled into the binary
const EMBEDDED: &[(&str, &str)] = &[
    ("gato", "Felino doméstico"),
    ("casa", "Lugar onde se mora"),
    ("livro", "Conjunto de páginas encadernadas"),
    ("janela", "Abertura na parede para entrar luz"),
    ("escola", "Lugar onde se aprende"),
    ("amigo", "Pessoa com quem se tem afeto"),
    ("sol", "Estrela do nosso sistema"),
    ("lua", "Satélite natural da Terra"),
    ("mar", "Grande extensão de água salgada"),
    ("praia", "Faixa de areia à beira-mar"),
    ("cidade", "Aglomeração urbana"),
    ("floresta", "Área coberta de árvores"),
    ("montanha", "Grande elevação de terra"),
    ("rio", "Curso de água doce"),
    ("chuva", "Água que cai das nuvens"),
    ("vento", "Ar em movimento"),
    ("musica", "Arte dos sons"),
    ("danca", "Movimento ritmado do corpo"),
    ("cafe", "Bebida escura e estimulante"),
    ("pao", "Alimento feito de farinha e fermento"),
    ("queijo", "Derivado do leite"),
    ("laranja", "Fruta cítrica"),
    ("banana", "Fruta amarela e alongada"),
    ("cavalo", "Animal usado para montaria"),
    ("cachorro", "Melhor amigo do homem"),
    ("passaro", "Animal com penas que voa"),
    ("peixe", "Animal que nada e respira por guelras"),
    ("tempo", "Sucessão de momentos"),
    ("relogio", "Instrumento que marca as horas"),
    ("estrela", "Astro com luz própria"),
    ("caneta", "Instrumento para escrever com tinta"),
    ("papel", "Folha para escrever"),
    ("mesa", "Móvel com tampo e pernas"),
    ("cadeira", "Assento com encosto"),
    ("porta", "Abertura para entrar e sair"),
    ("jardim", "Espaço com flores e plantas"),
    ("flor", "Parte colorida da planta"),
    ("arvore", "Planta de tronco lenhoso"),
    ("coracao", "Órgão que bombeia o sangue"),
    ("viagem", "Deslocamento para outro lugar"),
    ("trem", "Veículo que anda sobre trilhos"),
    ("aviao", "Veículo que voa"),
    ("barco", "Embarcação pequena"),
    ("estrada", "Caminho para veículos"),
    ("ponte", "Construção que atravessa um rio"),
    ("noite", "Período sem sol"),
    ("manha", "Início do dia"),
    ("verao", "Estação mais quente do ano"),
    ("inverno", "Estação mais fria do ano"),
    ("neve", "Chuva congelada em flocos"),
    ("fogo", "Combustão com chamas"),
    ("terra", "Planeta onde vivemos"),
    ("ouro", "Metal precioso amarelo"),
    ("prata", "Metal precioso branco"),
    ("toco", "Resto do tronco de uma árvore cortada"),
    ("ovo", "Posto pela galinha"),
    ("uva", "Fruta do vinho"),
    ("mel", "Produzido pelas abelhas"),
    ("leite", "Bebida branca da vaca"),
    ("sapato", "Calçado"),
];

/// Pool of candidate words
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    entries: Vec<WordEntry>,
}

impl WordBank {
    /// The curated list shipped with the crate
    pub fn embedded() -> Self {
        Self::from_pairs(EMBEDDED)
    }

    /// Build from raw (word, clue) pairs. Unusable words are dropped.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::from_entries(
            pairs
                .iter()
                .filter_map(|&(word, clue)| WordEntry::new(word, clue)),
        )
    }

    /// Build from entries, keeping the first occurrence of each word
    pub fn from_entries(entries: impl IntoIterator<Item = WordEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| !e.is_empty() && seen.insert(e.word.clone()))
            .collect();
        Self { entries }
    }

    /// Load a bank from a text file with one `word|clue` pair per line.
    ///
    /// Blank lines and lines starting with `#` are ignored. Malformed
    /// lines are skipped.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse the `word|clue` text format
    pub fn parse(content: &str) -> Self {
        let entries = content.lines().enumerate().filter_map(|(idx, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let entry = trimmed
                .split_once('|')
                .filter(|(_, clue)| !clue.trim().is_empty())
                .and_then(|(word, clue)| WordEntry::new(word, clue));
            if entry.is_none() {
                warn!(line = idx + 1, "Skipping malformed word list entry");
            }
            entry
        });
        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Pick up to `pool_size` words with lengths in `min_length..=max_length`,
    /// in an order randomized by `rng`.
    pub fn select_words<R: Rng + ?Sized>(
        &self,
        pool_size: usize,
        min_length: usize,
        max_length: usize,
        rng: &mut R,
    ) -> Result<Vec<WordEntry>> {
        let mut usable: Vec<WordEntry> = self
            .entries
            .iter()
            .filter(|e| (min_length..=max_length).contains(&e.len()))
            .cloned()
            .collect();

        let required = self.required_words();
        if usable.len() < required || usable.is_empty() {
            return Err(CrosswordError::InsufficientWords {
                available: usable.len(),
                required: required.max(1),
            });
        }

        usable.shuffle(rng);
        usable.truncate(pool_size.max(required));
        debug!(selected = usable.len(), "Selected candidate words");
        Ok(usable)
    }

    /// Minimum usable words this bank must supply. A single-word bank can
    /// still yield a single-word puzzle.
    pub fn required_words(&self) -> usize {
        MIN_USABLE_WORDS.min(self.entries.len())
    }
}

/// Lowercase a word and fold accented letters to plain ASCII.
///
/// Returns `None` if anything but a letter remains after folding.
pub fn normalize_word(word: &str) -> Option<String> {
    let folded: Option<String> = word.trim().chars().map(fold_letter).collect();
    folded.filter(|w| !w.is_empty())
}

/// Fold a single character to its lowercase ASCII grid letter
pub fn fold_letter(c: char) -> Option<char> {
    let lower = c.to_lowercase().next()?;
    let folded = match lower {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'ê' | 'è' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    };
    folded.is_ascii_lowercase().then_some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_normalize_folds_accents() {
        assert_eq!(normalize_word("Coração").as_deref(), Some("coracao"));
        assert_eq!(normalize_word("  MANHÃ ").as_deref(), Some("manha"));
        assert_eq!(normalize_word("Ñandú").as_deref(), Some("nandu"));
    }

    #[test]
    fn test_normalize_rejects_non_letters() {
        assert_eq!(normalize_word("guarda-chuva"), None);
        assert_eq!(normalize_word("dois rios"), None);
        assert_eq!(normalize_word("abc1"), None);
        assert_eq!(normalize_word(""), None);
    }

    #[test]
    fn test_embedded_bank_is_clean() {
        let bank = WordBank::embedded();
        assert_eq!(bank.len(), EMBEDDED.len());

        let mut seen = HashSet::new();
        for entry in bank.entries() {
            assert!(entry.word.chars().all(|c| c.is_ascii_lowercase()));
            assert!(!entry.clue.is_empty());
            assert!(seen.insert(entry.word.clone()), "duplicate {}", entry.word);
        }
    }

    #[test]
    fn test_duplicates_keep_first() {
        let bank = WordBank::from_pairs(&[("Pão", "primeiro"), ("pao", "segundo"), ("sal", "tempero")]);
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.entries()[0].clue, "primeiro");
    }

    #[test]
    fn test_parse_skips_comments_and_malformed() {
        let text = "# header\n\ngato|Felino\nsem clue|\nsó palavra\ntoco | Resto de tronco\n";
        let bank = WordBank::parse(text);
        let words: Vec<_> = bank.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["gato", "toco"]);
        assert_eq!(bank.entries()[1].clue, "Resto de tronco");
    }

    #[test]
    fn test_select_filters_by_length() {
        let bank = WordBank::embedded();
        let mut rng = StdRng::seed_from_u64(7);
        let words = bank.select_words(100, 5, 6, &mut rng).unwrap();

        assert!(!words.is_empty());
        assert!(words.iter().all(|e| (5..=6).contains(&e.len())));
    }

    #[test]
    fn test_select_truncates_to_pool_size() {
        let bank = WordBank::embedded();
        let mut rng = StdRng::seed_from_u64(7);
        let words = bank.select_words(8, 3, 13, &mut rng).unwrap();
        assert_eq!(words.len(), 8);
    }

    #[test]
    fn test_select_is_deterministic_per_seed() {
        let bank = WordBank::embedded();
        let a = bank
            .select_words(10, 3, 13, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = bank
            .select_words(10, 3, 13, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_select_insufficient_words() {
        let bank = WordBank::from_pairs(&[("ab", "curta"), ("gato", "Felino"), ("xi", "outra")]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = bank.select_words(10, 3, 13, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            CrosswordError::InsufficientWords {
                available: 1,
                required: 2
            }
        ));
    }

    #[test]
    fn test_single_word_bank_is_usable() {
        let bank = WordBank::from_pairs(&[("casa", "Lugar onde se mora")]);
        let mut rng = StdRng::seed_from_u64(1);
        let words = bank.select_words(10, 3, 7, &mut rng).unwrap();
        assert_eq!(words.len(), 1);
    }

    #[test]
    fn test_empty_bank_fails() {
        let bank = WordBank::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(bank.select_words(10, 3, 7, &mut rng).is_err());
    }
}
