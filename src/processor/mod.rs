mod exec;

use std::error::Error as StdError;
use std::fmt;

use crate::memory::{Memory, Storage};
use crate::{constants, Word};

/// Reason the executor stopped.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ExitCode {
    Halted,          // HALT instruction was executed (normal shutdown)
    BadMemoryAccess, // Attempted to access data memory at an invalid address
    BadJump,         // Program counter left the loaded code image
    InvalidOpcode,   // Opcode, funct or COP1 sub-code was not recognized
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    DataTooLarge(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::DataTooLarge(size) => write!(
                f,
                "Data image of {} bytes does not fit the {} byte memory.",
                size,
                constants::MEMORY_SIZE
            ),
        }
    }
}

impl StdError for Error {}

/// The complete architectural state: program counter, both register files,
/// the FP condition flag, the halt flag, a clock counter and the data memory.
///
/// All state starts zeroed. `r0` is not special-cased on writes; well-formed
/// programs simply never store to it.
pub struct Cpu {
    pc: u64,
    regs: [u64; constants::REGISTER_COUNT],
    fregs: [f64; constants::FREGISTER_COUNT],
    fp_flag: bool,
    halted: bool,
    clock: u64,
    memory: Memory,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu {
            pc: 0,
            regs: [0; constants::REGISTER_COUNT],
            fregs: [0.0; constants::FREGISTER_COUNT],
            fp_flag: false,
            halted: false,
            clock: 0,
            memory: Memory::new(constants::MEMORY_SIZE as u32),
        }
    }

    /// Copies a data image into the bottom of the memory.
    pub fn load_data(&mut self, data: &[u8]) -> Result<(), Error> {
        if data.len() > constants::MEMORY_SIZE {
            return Err(Error::DataTooLarge(data.len()));
        }
        self.memory
            .borrow_slice_mut(0, data.len() as u32)
            .expect("memory shorter than MEMORY_SIZE")
            .copy_from_slice(data);
        Ok(())
    }

    pub fn reg(&self, id: u32) -> u64 {
        self.regs[id as usize]
    }

    pub fn set_reg(&mut self, id: u32, value: u64) {
        self.regs[id as usize] = value;
    }

    pub fn freg(&self, id: u32) -> f64 {
        self.fregs[id as usize]
    }

    pub fn set_freg(&mut self, id: u32, value: f64) {
        self.fregs[id as usize] = value;
    }

    pub fn registers(&self) -> &[u64] {
        &self.regs[..]
    }

    pub fn fregisters(&self) -> &[f64] {
        &self.fregs[..]
    }

    pub fn pc(&self) -> u64 {
        self.pc
    }

    pub fn set_pc(&mut self, new_pc: u64) {
        self.pc = new_pc;
    }

    /// Adds a signed byte offset to the program counter.
    pub fn move_pc(&mut self, offset: i64) {
        self.pc = (self.pc as i64).wrapping_add(offset) as u64;
    }

    pub fn fp_flag(&self) -> bool {
        self.fp_flag
    }

    pub fn set_fp_flag(&mut self, value: bool) {
        self.fp_flag = value;
    }

    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    fn fetch(&self, code: &[Word]) -> Result<Word, ExitCode> {
        let index = (self.pc / u64::from(constants::WORD_BYTES)) as usize;
        code.get(index).copied().ok_or(ExitCode::BadJump)
    }

    /// Runs until the program halts or faults.
    ///
    /// The program counter is incremented unconditionally after every
    /// dispatch; jump and branch actions compensate by storing word-scaled
    /// displacements or subtracting 4 from absolute targets.
    pub fn run(&mut self, code: &[Word]) -> ExitCode {
        while !self.halted {
            let word = match self.fetch(code) {
                Ok(word) => word,
                Err(code) => return code,
            };
            if let Err(code) = exec::execute(self, word) {
                return code;
            }
            self.pc = self.pc.wrapping_add(u64::from(constants::WORD_BYTES));
            self.clock += 1;
        }
        ExitCode::Halted
    }

    /// As [`run`](#method.run), invoking `trace` after each executed
    /// instruction, before the program counter and clock advance. The
    /// simulator CLI hangs its per-step log and `--insn` printing here.
    pub fn run_traced<E, F>(&mut self, code: &[Word], mut trace: F) -> Result<ExitCode, E>
    where
        F: FnMut(&Cpu, Word) -> Result<(), E>,
    {
        while !self.halted {
            let word = match self.fetch(code) {
                Ok(word) => word,
                Err(code) => return Ok(code),
            };
            if let Err(code) = exec::execute(self, word) {
                return Ok(code);
            }
            trace(&*self, word)?;
            self.pc = self.pc.wrapping_add(u64::from(constants::WORD_BYTES));
            self.clock += 1;
        }
        Ok(ExitCode::Halted)
    }

    /// Executes a single instruction, advancing the program counter and
    /// clock. Used by the per-instruction tests.
    pub fn step(&mut self, code: &[Word]) -> Result<(), ExitCode> {
        let word = self.fetch(code)?;
        exec::execute(self, word)?;
        self.pc = self.pc.wrapping_add(u64::from(constants::WORD_BYTES));
        self.clock += 1;
        Ok(())
    }
}

impl Default for Cpu {
    fn default() -> Cpu {
        Cpu::new()
    }
}
