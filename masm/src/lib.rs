//! Assembler for the [mcpu](../mcpu/index.html) educational processor.
//!
//! The main entry point is [`assemble`](fn.assemble.html), which takes a
//! program source and produces the encoded code image, the read-only data
//! image, and the resolved label map. The `asm` binary wraps it with file
//! handling and the dump switches.
//!
//! # Source format
//!
//! Sources are line based. A `;` starts a comment that runs to the end of
//! the line. Labels are identifiers followed by `:` and name the current
//! address of their section. A section directive must appear before any
//! other content; `.code` is an alias for `.text`.
//!
//! ```text
//! .data
//! vec:    .word 1, 2, 3, 4
//! msg:    .asciiz "done"
//! .text
//! start:  ld   r1, vec(r0)
//!         daddi r2, r0, 5
//! loop:   daddi r2, r2, -1
//!         bnez r2, loop
//!         halt
//! ```
//!
//! # Directives
//!
//!  Directive | Effect
//! -----------|-------------------------------------------------------------
//! `.data`    | switch to the data section
//! `.text`    | switch to the text section (`.code` is accepted too)
//! `.org n`   | set the current section's cursor to the absolute address `n`
//! `.align n` | round the data cursor up to the next multiple of `n`
//! `.space n` | advance the data cursor by `n` bytes, leaving them untouched
//! `.ascii`   | copy the bytes of a string literal
//! `.asciiz`  | as `.ascii`, plus a terminating zero byte
//! `.byte`    | comma-separated literals, one byte each
//! `.word16`  | comma-separated literals, two bytes each
//! `.word32`  | comma-separated literals, four bytes each
//! `.word`    | comma-separated literals, eight bytes each
//! `.double`  | comma-separated reals, eight IEEE-754 bytes each
//!
//! After every literal list the data cursor is aligned up to the next
//! 8-byte boundary; `.space`, `.ascii` and `.asciiz` round the same way.
//!
//! # Registers and immediates
//!
//! The integer bank is `r0..r31`, the floating point bank `f0..f31`; each
//! mnemonic's slots accept exactly one bank. Immediates are decimal or
//! `0x`-prefixed hexadecimal integers, reals, or label names; label
//! references may point forward, they are resolved in a second pass over
//! the parsed program.
//!
//! The mnemonic catalog itself lives in the [mcpu ISA
//! table](../mcpu/isa/static.INSTRUCTION_INFOS.html), which the parser, the
//! encoder and the simulator's decoder all share.

mod encoder;
mod error;
mod int_util;
mod lexer;
mod parser;


pub use crate::encoder::encode_program;
pub use crate::error::{ErrorKind, SourceError};
pub use crate::lexer::{Lexer, Token, TokenKind};
pub use crate::parser::{
    align_address, Argument, DataImage, Immediate, InstructionData, Label, Parser, Section,
};

use mcpu::Word;

/// The products of an error-free assembly run.
pub struct Assembly {
    pub instructions: Vec<InstructionData>,
    pub labels: Vec<Label>,
    pub data: DataImage,
    pub code: Vec<Word>,
}

/// Assembles a source text. `file` is only used in diagnostics.
///
/// Tokenization errors suppress parsing, parse errors suppress encoding;
/// either case returns every accumulated diagnostic.
pub fn assemble(input: &str, file: &str) -> Result<Assembly, Vec<SourceError>> {
    let mut lexer = Lexer::new(input, file);
    lexer.tokenize();
    if !lexer.is_ok() {
        return Err(lexer.errors().to_vec());
    }

    let mut parser = Parser::new(&lexer);
    parser.parse();
    let (instructions, labels, data, errors) = parser.into_parts();
    if !errors.is_empty() {
        return Err(errors);
    }

    let code = encode_program(&instructions[..]);
    Ok(Assembly {
        instructions,
        labels,
        data,
        code,
    })
}
