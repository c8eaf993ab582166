//! Runner glue for the [mcpu](../mcpu/index.html) simulator: loads the
//! `.cod` and `.dat` artifacts, drives the executor, and maintains the two
//! log artifacts: `dump.txt` with one register block per clock tick and
//! `memdump.dat` with the final memory contents.

use std::io::{self, Write};

use mcpu::{disassemble, Cpu, ExitCode, Word};

/// Writes one per-step register block: the clock and pc line followed by
/// the integer and FP register files, pairwise.
pub fn write_state<W: Write>(writer: &mut W, cpu: &Cpu) -> io::Result<()> {
    writeln!(
        writer,
        "At clock count = {}, pc = {}",
        cpu.clock(),
        cpu.pc()
    )?;
    for i in 0..cpu.registers().len() {
        writeln!(
            writer,
            "\tr{:<2} = {:016X}    f{:<2} = {:016.8}",
            i,
            cpu.reg(i as u32),
            i,
            cpu.freg(i as u32)
        )?;
    }
    Ok(())
}

/// Runs `code` to completion, writing a state block to `log` after every
/// executed instruction. With `print_instructions` set each instruction is
/// also disassembled to stdout, mirroring the `--insn` switch.
pub fn run_logged<W: Write>(
    cpu: &mut Cpu,
    code: &[Word],
    log: &mut W,
    print_instructions: bool,
) -> io::Result<ExitCode> {
    cpu.run_traced(code, |cpu, word| {
        if print_instructions {
            println!("{}", disassemble(word));
        }
        write_state(log, cpu)
    })
}
