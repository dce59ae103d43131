// src/tokenize/alphabet.rs
//! The symbol alphabet and the immutable tokenizer configuration.
//!
//! Every semantic category the tokenizer recognises is written to the symbol
//! stream as exactly one character. The mapping is data, not a global, so a
//! C-family and a Python tokenizer (or two alphabets) can live side by side.

use crate::error::{Result, SleuthError};
use crate::lang::Dialect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Semantic categories emitted by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Int,
    Double,
    Char,
    Pointer,
    Call,
    Assign,
    Function,
    Cast,
    Math,
    Return,
    Conditional,
    Loop,
    Compare,
    Logic,
    Shift,
    Control,
    Struct,
    OpenBrace,
    CloseBrace,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Self::Int,
        Self::Double,
        Self::Char,
        Self::Pointer,
        Self::Call,
        Self::Assign,
        Self::Function,
        Self::Cast,
        Self::Math,
        Self::Return,
        Self::Conditional,
        Self::Loop,
        Self::Compare,
        Self::Logic,
        Self::Shift,
        Self::Control,
        Self::Struct,
        Self::OpenBrace,
        Self::CloseBrace,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Double => "double",
            Self::Char => "char",
            Self::Pointer => "pointer",
            Self::Call => "call",
            Self::Assign => "assign",
            Self::Function => "function",
            Self::Cast => "cast",
            Self::Math => "math",
            Self::Return => "return",
            Self::Conditional => "conditional",
            Self::Loop => "loop",
            Self::Compare => "compare",
            Self::Logic => "logic",
            Self::Shift => "shift",
            Self::Control => "control",
            Self::Struct => "struct",
            Self::OpenBrace => "open_brace",
            Self::CloseBrace => "close_brace",
        }
    }
}

/// Category → output character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolAlphabet {
    pub int: char,
    pub double: char,
    pub char: char,
    pub pointer: char,
    pub call: char,
    pub assign: char,
    pub function: char,
    pub cast: char,
    pub math: char,
    #[serde(rename = "return")]
    pub ret: char,
    pub conditional: char,
    #[serde(rename = "loop")]
    pub repeat: char,
    pub compare: char,
    pub logic: char,
    pub shift: char,
    pub control: char,
    #[serde(rename = "struct")]
    pub structure: char,
    pub open_brace: char,
    pub close_brace: char,
}

impl Default for SymbolAlphabet {
    fn default() -> Self {
        Self {
            int: 'N',
            double: 'D',
            char: 'B',
            pointer: 'P',
            call: 'C',
            assign: 'A',
            function: 'F',
            cast: 'T',
            math: 'M',
            ret: 'R',
            conditional: 'I',
            repeat: 'S',
            compare: 'E',
            logic: 'L',
            shift: 'U',
            control: 'G',
            structure: 'V',
            open_brace: '{',
            close_brace: '}',
        }
    }
}

impl SymbolAlphabet {
    #[must_use]
    pub fn symbol(&self, category: Category) -> char {
        match category {
            Category::Int => self.int,
            Category::Double => self.double,
            Category::Char => self.char,
            Category::Pointer => self.pointer,
            Category::Call => self.call,
            Category::Assign => self.assign,
            Category::Function => self.function,
            Category::Cast => self.cast,
            Category::Math => self.math,
            Category::Return => self.ret,
            Category::Conditional => self.conditional,
            Category::Loop => self.repeat,
            Category::Compare => self.compare,
            Category::Logic => self.logic,
            Category::Shift => self.shift,
            Category::Control => self.control,
            Category::Struct => self.structure,
            Category::OpenBrace => self.open_brace,
            Category::CloseBrace => self.close_brace,
        }
    }

    /// Reverse lookup, used when rendering symbol streams for humans.
    #[must_use]
    pub fn category(&self, symbol: char) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.symbol(*c) == symbol)
    }

    /// Checks that no two categories share an output character.
    ///
    /// # Errors
    /// Returns `Alphabet` naming the first clash.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashMap<char, Category> = HashMap::new();
        for category in Category::ALL {
            let symbol = self.symbol(category);
            if symbol.is_whitespace() || symbol.is_control() {
                return Err(SleuthError::Alphabet(format!(
                    "{} maps to a non-printing character",
                    category.label()
                )));
            }
            if let Some(prev) = seen.insert(symbol, category) {
                return Err(SleuthError::Alphabet(format!(
                    "'{symbol}' is used by both {} and {}",
                    prev.label(),
                    category.label()
                )));
            }
        }
        Ok(())
    }
}

/// Everything a tokenizer needs, passed by value into `Tokenizer::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    pub dialect: Dialect,
    pub alphabet: SymbolAlphabet,
    pub int_types: Vec<String>,
    pub char_types: Vec<String>,
    pub float_types: Vec<String>,
}

impl TokenizerConfig {
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::CFamily => Self::c_family(),
            Dialect::Python => Self::python(),
        }
    }

    #[must_use]
    pub fn c_family() -> Self {
        Self {
            dialect: Dialect::CFamily,
            alphabet: SymbolAlphabet::default(),
            int_types: to_owned(C_INT_TYPES),
            char_types: to_owned(C_CHAR_TYPES),
            float_types: to_owned(C_FLOAT_TYPES),
        }
    }

    /// Python has no typed declarations, so the keyword lists are empty.
    #[must_use]
    pub fn python() -> Self {
        Self {
            dialect: Dialect::Python,
            alphabet: SymbolAlphabet::default(),
            int_types: Vec::new(),
            char_types: Vec::new(),
            float_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_alphabet(mut self, alphabet: SymbolAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// # Errors
    /// Returns `Alphabet` if the alphabet is ambiguous or a type keyword is blank.
    pub fn validate(&self) -> Result<()> {
        self.alphabet.validate()?;
        let all = self
            .int_types
            .iter()
            .chain(&self.char_types)
            .chain(&self.float_types);
        for keyword in all {
            if keyword.trim().is_empty() {
                return Err(SleuthError::Alphabet("empty type keyword".into()));
            }
        }
        Ok(())
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self::c_family()
    }
}

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

pub const C_INT_TYPES: &[&str] = &[
    "unsigned long long int",
    "unsigned long long",
    "unsigned long int",
    "unsigned long",
    "unsigned int",
    "unsigned short int",
    "unsigned short",
    "unsigned",
    "signed long long int",
    "signed long long",
    "signed long int",
    "signed long",
    "signed short int",
    "signed short",
    "signed int",
    "signed",
    "long long int",
    "long long",
    "long int",
    "long",
    "short int",
    "short",
    "int",
];

pub const C_CHAR_TYPES: &[&str] = &["signed char", "unsigned char", "char"];

pub const C_FLOAT_TYPES: &[&str] = &["long double", "double", "float"];
