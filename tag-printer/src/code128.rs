//! Code 128 symbol encoder
//!
//! Encodes ASCII text into Code 128 symbol values with automatic code-set
//! selection, then expands the symbols into alternating bar/space module
//! runs for the renderers.

use crate::error::{PrintError, PrintResult};

const START_A: u8 = 103;
const START_B: u8 = 104;
const START_C: u8 = 105;

const CODE_A: u8 = 101;
const CODE_B: u8 = 100;
const CODE_C: u8 = 99;

/// Modules per symbol (stop pattern excluded)
const SYMBOL_MODULES: u32 = 11;

/// Stop pattern, including the trailing 2-module termination bar
const STOP_PATTERN: [u8; 7] = [2, 3, 3, 1, 1, 1, 2];

/// Bar/space widths for symbol values 0..=105
static PATTERNS: [[u8; 6]; 106] = [
    [2, 1, 2, 2, 2, 2], [2, 2, 2, 1, 2, 2], [2, 2, 2, 2, 2, 1], [1, 2, 1, 2, 2, 3],
    [1, 2, 1, 3, 2, 2], [1, 3, 1, 2, 2, 2], [1, 2, 2, 2, 1, 3], [1, 2, 2, 3, 1, 2],
    [1, 3, 2, 2, 1, 2], [2, 2, 1, 2, 1, 3], [2, 2, 1, 3, 1, 2], [2, 3, 1, 2, 1, 2],
    [1, 1, 2, 2, 3, 2], [1, 2, 2, 1, 3, 2], [1, 2, 2, 2, 3, 1], [1, 1, 3, 2, 2, 2],
    [1, 2, 3, 1, 2, 2], [1, 2, 3, 2, 2, 1], [2, 2, 3, 2, 1, 1], [2, 2, 1, 1, 3, 2],
    [2, 2, 1, 2, 3, 1], [2, 1, 3, 2, 1, 2], [2, 2, 3, 1, 1, 2], [3, 1, 2, 1, 3, 1],
    [3, 1, 1, 2, 2, 2], [3, 2, 1, 1, 2, 2], [3, 2, 1, 2, 2, 1], [3, 1, 2, 2, 1, 2],
    [3, 2, 2, 1, 1, 2], [3, 2, 2, 2, 1, 1], [2, 1, 2, 1, 2, 3], [2, 1, 2, 3, 2, 1],
    [2, 3, 2, 1, 2, 1], [1, 1, 1, 3, 2, 3], [1, 3, 1, 1, 2, 3], [1, 3, 1, 3, 2, 1],
    [1, 1, 2, 3, 1, 3], [1, 3, 2, 1, 1, 3], [1, 3, 2, 3, 1, 1], [2, 1, 1, 3, 1, 3],
    [2, 3, 1, 1, 1, 3], [2, 3, 1, 3, 1, 1], [1, 1, 2, 1, 3, 3], [1, 1, 2, 3, 3, 1],
    [1, 3, 2, 1, 3, 1], [1, 1, 3, 1, 2, 3], [1, 1, 3, 3, 2, 1], [1, 3, 3, 1, 2, 1],
    [3, 1, 3, 1, 2, 1], [2, 1, 1, 3, 3, 1], [2, 3, 1, 1, 3, 1], [2, 1, 3, 1, 1, 3],
    [2, 1, 3, 3, 1, 1], [2, 1, 3, 1, 3, 1], [3, 1, 1, 1, 2, 3], [3, 1, 1, 3, 2, 1],
    [3, 3, 1, 1, 2, 1], [3, 1, 2, 1, 1, 3], [3, 1, 2, 3, 1, 1], [3, 3, 2, 1, 1, 1],
    [3, 1, 4, 1, 1, 1], [2, 2, 1, 4, 1, 1], [4, 3, 1, 1, 1, 1], [1, 1, 1, 2, 2, 4],
    [1, 1, 1, 4, 2, 2], [1, 2, 1, 1, 2, 4], [1, 2, 1, 4, 2, 1], [1, 4, 1, 1, 2, 2],
    [1, 4, 1, 2, 2, 1], [1, 1, 2, 2, 1, 4], [1, 1, 2, 4, 1, 2], [1, 2, 2, 1, 1, 4],
    [1, 2, 2, 4, 1, 1], [1, 4, 2, 1, 1, 2], [1, 4, 2, 2, 1, 1], [2, 4, 1, 2, 1, 1],
    [2, 2, 1, 1, 1, 4], [4, 1, 3, 1, 1, 1], [2, 4, 1, 1, 1, 2], [1, 3, 4, 1, 1, 1],
    [1, 1, 1, 2, 4, 2], [1, 2, 1, 1, 4, 2], [1, 2, 1, 2, 4, 1], [1, 1, 4, 2, 1, 2],
    [1, 2, 4, 1, 1, 2], [1, 2, 4, 2, 1, 1], [4, 1, 1, 2, 1, 2], [4, 2, 1, 1, 1, 2],
    [4, 2, 1, 2, 1, 1], [2, 1, 2, 1, 4, 1], [2, 1, 4, 1, 2, 1], [4, 1, 2, 1, 2, 1],
    [1, 1, 1, 1, 4, 3], [1, 1, 1, 3, 4, 1], [1, 3, 1, 1, 4, 1], [1, 1, 4, 1, 1, 3],
    [1, 1, 4, 3, 1, 1], [4, 1, 1, 1, 1, 3], [4, 1, 1, 3, 1, 1], [1, 1, 3, 1, 4, 1],
    [1, 1, 4, 1, 3, 1], [3, 1, 1, 1, 4, 1], [4, 1, 1, 1, 3, 1], [2, 1, 1, 4, 1, 2],
    [2, 1, 1, 2, 1, 4], [2, 1, 1, 2, 3, 2],
];

/// Code 128 character set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    /// Upper case, digits, punctuation and control characters
    A,
    /// Full printable ASCII
    B,
    /// Digit pairs
    C,
}

/// An encoded Code 128 symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code128 {
    text: String,
    /// Start symbol, data symbols and checksum (stop excluded)
    symbols: Vec<u8>,
}

impl Code128 {
    /// Encode ASCII text
    ///
    /// Starts in set C for leading digit runs, otherwise in B (or A when
    /// the first character is a control character). Switches to C for
    /// digit runs of at least 6, or 4 when the run ends the text.
    pub fn encode(text: &str) -> PrintResult<Self> {
        if text.is_empty() {
            return Err(PrintError::EmptyPayload);
        }

        let bytes = text
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                if ch.is_ascii() {
                    Ok(ch as u8)
                } else {
                    Err(PrintError::Unencodable { ch, position })
                }
            })
            .collect::<PrintResult<Vec<u8>>>()?;

        let mut set = initial_set(&bytes);
        let mut symbols = Vec::with_capacity(bytes.len() + 4);
        symbols.push(match set {
            CodeSet::A => START_A,
            CodeSet::B => START_B,
            CodeSet::C => START_C,
        });

        let mut i = 0;
        while i < bytes.len() {
            if set == CodeSet::C {
                if digit_run(&bytes[i..]) >= 2 {
                    symbols.push((bytes[i] - b'0') * 10 + (bytes[i + 1] - b'0'));
                    i += 2;
                } else if bytes[i] < 32 {
                    symbols.push(CODE_A);
                    set = CodeSet::A;
                } else {
                    symbols.push(CODE_B);
                    set = CodeSet::B;
                }
                continue;
            }

            let run = digit_run(&bytes[i..]);
            if run >= 6 || (run >= 4 && i + run == bytes.len()) {
                if run % 2 == 1 {
                    symbols.push(value_in(set, bytes[i]));
                    i += 1;
                }
                symbols.push(CODE_C);
                set = CodeSet::C;
                continue;
            }

            let b = bytes[i];
            if set == CodeSet::B && b < 32 {
                symbols.push(CODE_A);
                set = CodeSet::A;
            } else if set == CodeSet::A && b >= 96 {
                symbols.push(CODE_B);
                set = CodeSet::B;
            }
            symbols.push(value_in(set, b));
            i += 1;
        }

        symbols.push(checksum(&symbols));

        Ok(Self {
            text: text.to_string(),
            symbols,
        })
    }

    /// The encoded text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start symbol, data symbols and checksum
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Modulo-103 check symbol
    pub fn checksum(&self) -> u8 {
        self.symbols[self.symbols.len() - 1]
    }

    /// Total width in modules, stop pattern included
    pub fn module_count(&self) -> u32 {
        let stop: u32 = STOP_PATTERN.iter().map(|&w| w as u32).sum();
        self.symbols.len() as u32 * SYMBOL_MODULES + stop
    }

    /// Alternating bar/space widths in modules, starting with a bar
    pub fn runs(&self) -> Vec<u8> {
        let mut runs = Vec::with_capacity(self.symbols.len() * 6 + STOP_PATTERN.len());
        for &s in &self.symbols {
            runs.extend_from_slice(&PATTERNS[s as usize]);
        }
        runs.extend_from_slice(&STOP_PATTERN);
        runs
    }

    /// Bars as `(offset, width)` pairs in modules
    pub fn bars(&self) -> Vec<(u32, u32)> {
        let mut bars = Vec::new();
        let mut offset = 0u32;
        for (idx, width) in self.runs().into_iter().enumerate() {
            let width = width as u32;
            if idx % 2 == 0 {
                bars.push((offset, width));
            }
            offset += width;
        }
        bars
    }
}

fn initial_set(bytes: &[u8]) -> CodeSet {
    let run = digit_run(bytes);
    if run >= 4 || (run == bytes.len() && run >= 2 && run % 2 == 0) {
        CodeSet::C
    } else if bytes[0] < 32 {
        CodeSet::A
    } else {
        CodeSet::B
    }
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn value_in(set: CodeSet, b: u8) -> u8 {
    match set {
        CodeSet::A if b < 32 => b + 64,
        _ => b - 32,
    }
}

fn checksum(symbols: &[u8]) -> u8 {
    let sum = symbols
        .iter()
        .enumerate()
        .map(|(i, &s)| s as u32 * (i as u32).max(1))
        .sum::<u32>();
    (sum % 103) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_eleven_modules() {
        for (value, pattern) in PATTERNS.iter().enumerate() {
            let total: u32 = pattern.iter().map(|&w| w as u32).sum();
            assert_eq!(total, 11, "symbol {}", value);
        }
    }

    #[test]
    fn test_code_b_checksum() {
        let code = Code128::encode("Wikipedia").unwrap();
        assert_eq!(code.symbols()[0], START_B);
        assert_eq!(code.checksum(), 88);
        // start + 9 data + checksum, plus 13-module stop
        assert_eq!(code.module_count(), 11 * 11 + 13);
    }

    #[test]
    fn test_tag_payload() {
        let code = Code128::encode("CB|RM|Kingston").unwrap();
        assert_eq!(code.symbols()[0], START_B);
        assert_eq!(code.symbols()[3], b'|' - 32);
        assert_eq!(code.checksum(), 72);
    }

    #[test]
    fn test_all_digits_uses_code_c() {
        let code = Code128::encode("123456").unwrap();
        assert_eq!(code.symbols(), &[START_C, 12, 34, 56, 44]);
    }

    #[test]
    fn test_trailing_digits_switch_to_c() {
        let code = Code128::encode("AB12345678").unwrap();
        assert_eq!(
            &code.symbols()[..8],
            &[START_B, 33, 34, CODE_C, 12, 34, 56, 78]
        );
    }

    #[test]
    fn test_odd_digit_run_keeps_first_digit() {
        let code = Code128::encode("X12345").unwrap();
        // '1' stays in set B, then 23 45 in set C
        assert_eq!(
            &code.symbols()[..6],
            &[START_B, 56, 17, CODE_C, 23, 45]
        );
    }

    #[test]
    fn test_control_character_switches_to_a() {
        let code = Code128::encode("A\tB").unwrap();
        assert_eq!(&code.symbols()[..5], &[START_B, 33, CODE_A, 73, 34]);
    }

    #[test]
    fn test_rejects_non_ascii() {
        match Code128::encode("Muñoz") {
            Err(PrintError::Unencodable { ch, position }) => {
                assert_eq!(ch, 'ñ');
                assert_eq!(position, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(Code128::encode(""), Err(PrintError::EmptyPayload)));
    }

    #[test]
    fn test_bars_cover_module_width() {
        let code = Code128::encode("Ram").unwrap();
        let bars = code.bars();
        assert_eq!(bars[0], (0, 2));
        let (last_offset, last_width) = bars[bars.len() - 1];
        assert_eq!(last_offset + last_width, code.module_count());
    }
}
