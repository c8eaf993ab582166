//! Simulator core for a MIPS64-like educational ISA.
//!
//! The crate owns the ISA table shared by the assembler
//! ([masm](../masm/index.html)) and the simulator: the mnemonic catalog, the
//! per-shape bitfield packing and extraction helpers, and the decoder
//! dispatch enums whose discriminants are the architectural opcode values.
//! On top of that sit the byte-addressable [`Memory`](memory/trait.Storage.html),
//! the architectural [`Cpu`](processor/struct.Cpu.html) state and the
//! instruction executor, and a small disassembler used for tracing.

pub mod constants;
pub mod disasm;
pub mod isa;
pub mod memory;
pub mod processor;

pub use crate::disasm::disassemble;
pub use crate::isa::*;
pub use crate::memory::{Memory, Storage};
pub use crate::processor::{Cpu, Error, ExitCode};

/// Byte order shared by the memory images and every file artifact.
pub type Endian = byteorder::LittleEndian;

/// A single encoded instruction.
pub type Word = u32;
