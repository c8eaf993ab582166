use num_traits::FromPrimitive;

use super::{Cpu, ExitCode};
use crate::isa::{self, FpOp, ImmOp, RegOp};
use crate::memory::Storage;
use crate::{constants, Word};

const RA_REGISTER: u32 = 31;
const SIGN_BIT: u64 = 1 << 63;

pub(super) fn execute(cpu: &mut Cpu, word: Word) -> Result<(), ExitCode> {
    let primary = isa::primary(word);
    let sub = isa::sub(word);

    if primary == constants::OP_SPECIAL {
        match RegOp::from_u32(isa::function(word)) {
            Some(op) => execute_register(cpu, word, op),
            None => Err(ExitCode::InvalidOpcode),
        }
    } else if primary == constants::OP_COP1 && sub == constants::SUB_DOUBLE {
        match FpOp::from_u32(isa::function(word)) {
            Some(op) => {
                execute_fp(cpu, word, op);
                Ok(())
            }
            None => Err(ExitCode::InvalidOpcode),
        }
    } else if primary == constants::OP_COP1 && sub == constants::SUB_MTC1 {
        let (rt, rd) = isa::fields_m(word);
        cpu.set_freg(rd, cpu.reg(rt) as f64);
        Ok(())
    } else if primary == constants::OP_COP1 && sub == constants::SUB_BC {
        let offset = i64::from(isa::displacement_b(word)) * i64::from(constants::WORD_BYTES);
        let want_set = (word & constants::BC_TRUE_MASK) != 0;
        if cpu.fp_flag() == want_set {
            cpu.move_pc(offset);
        }
        Ok(())
    } else if primary == constants::OP_COP1 {
        let (rt, rd) = isa::fields_m(word);
        cpu.set_reg(rt, cpu.freg(rd) as u64);
        Ok(())
    } else {
        match ImmOp::from_u32(primary) {
            Some(op) => execute_immediate(cpu, word, op),
            None => Err(ExitCode::InvalidOpcode),
        }
    }
}

/// Byte offset of a J-form word relative to the already-incremented pc.
fn jump_offset(word: Word) -> i64 {
    i64::from(isa::target_j(word)) * i64::from(constants::WORD_BYTES)
}

fn effective_address(cpu: &Cpu, rs: u32, w: i16) -> Result<u32, ExitCode> {
    let address = cpu.reg(rs).wrapping_add(w as i64 as u64);
    if address > u64::from(u32::max_value()) {
        Err(ExitCode::BadMemoryAccess)
    } else {
        Ok(address as u32)
    }
}

fn sign_extend(value: u64, size: u32) -> u64 {
    match size {
        1 => value as u8 as i8 as i64 as u64,
        2 => value as u16 as i16 as i64 as u64,
        4 => value as u32 as i32 as i64 as u64,
        _ => value,
    }
}

fn load(cpu: &mut Cpu, word: Word, size: u32, signed: bool) -> Result<(), ExitCode> {
    let (rs, rt, w) = isa::fields_i(word);
    let address = effective_address(cpu, rs, w)?;
    let raw = cpu
        .memory()
        .read(address, size)
        .map_err(|_| ExitCode::BadMemoryAccess)?;
    let value = if signed { sign_extend(raw, size) } else { raw };
    cpu.set_reg(rt, value);
    Ok(())
}

fn store(cpu: &mut Cpu, word: Word, size: u32) -> Result<(), ExitCode> {
    let (rs, rt, w) = isa::fields_i(word);
    let address = effective_address(cpu, rs, w)?;
    let value = cpu.reg(rt);
    cpu.memory_mut()
        .write(address, size, value)
        .map_err(|_| ExitCode::BadMemoryAccess)
}

fn execute_immediate(cpu: &mut Cpu, word: Word, op: ImmOp) -> Result<(), ExitCode> {
    match op {
        ImmOp::HALT => {
            cpu.halt();
        }

        ImmOp::J => {
            cpu.move_pc(jump_offset(word));
        }

        ImmOp::JAL => {
            let link = cpu.pc().wrapping_add(u64::from(constants::WORD_BYTES));
            cpu.set_reg(RA_REGISTER, link);
            cpu.move_pc(jump_offset(word));
        }

        // BEQ/BNE displacements apply unscaled while BEQZ/BNEZ are
        // word-scaled; the asymmetry is load-bearing for existing artifacts.
        ImmOp::BEQ => {
            let (rs, rt, w) = isa::fields_i(word);
            if cpu.reg(rs) == cpu.reg(rt) {
                cpu.move_pc(i64::from(w));
            }
        }

        ImmOp::BNE => {
            let (rs, rt, w) = isa::fields_i(word);
            if cpu.reg(rs) != cpu.reg(rt) {
                cpu.move_pc(i64::from(w));
            }
        }

        ImmOp::BEQZ => {
            let (_, rt, w) = isa::fields_i(word);
            if cpu.reg(rt) == 0 {
                cpu.move_pc(i64::from(w) * i64::from(constants::WORD_BYTES));
            }
        }

        ImmOp::BNEZ => {
            let (_, rt, w) = isa::fields_i(word);
            if cpu.reg(rt) != 0 {
                cpu.move_pc(i64::from(w) * i64::from(constants::WORD_BYTES));
            }
        }

        ImmOp::DADDI | ImmOp::DADDIU => {
            let (rs, rt, w) = isa::fields_i(word);
            cpu.set_reg(rt, cpu.reg(rs).wrapping_add(w as i64 as u64));
        }

        ImmOp::ANDI => {
            let (rs, rt, w) = isa::fields_i(word);
            cpu.set_reg(rt, cpu.reg(rs) & u64::from(w as u16));
        }

        ImmOp::ORI => {
            let (rs, rt, w) = isa::fields_i(word);
            cpu.set_reg(rt, cpu.reg(rs) | u64::from(w as u16));
        }

        ImmOp::XORI => {
            let (rs, rt, w) = isa::fields_i(word);
            cpu.set_reg(rt, cpu.reg(rs) ^ u64::from(w as u16));
        }

        ImmOp::LUI => {
            let (_, rt, w) = isa::fields_i(word);
            cpu.set_reg(rt, cpu.reg(rt) | ((w as i64 as u64) << 32));
        }

        ImmOp::SLTI => {
            let (rs, rt, w) = isa::fields_i(word);
            cpu.set_reg(rt, ((cpu.reg(rs) as i64) < i64::from(w)) as u64);
        }

        ImmOp::SLTIU => {
            let (rs, rt, w) = isa::fields_i(word);
            cpu.set_reg(rt, (cpu.reg(rs) < (w as i64 as u64)) as u64);
        }

        ImmOp::LB => load(cpu, word, constants::BYTE_BYTES, true)?,
        ImmOp::LH => load(cpu, word, constants::HALF_BYTES, true)?,
        ImmOp::LW => load(cpu, word, constants::WORD_BYTES, true)?,
        ImmOp::LD => load(cpu, word, constants::DWORD_BYTES, true)?,
        ImmOp::LBU => load(cpu, word, constants::BYTE_BYTES, false)?,
        ImmOp::LHU => load(cpu, word, constants::HALF_BYTES, false)?,
        ImmOp::LWU => load(cpu, word, constants::WORD_BYTES, false)?,

        ImmOp::SB => store(cpu, word, constants::BYTE_BYTES)?,
        ImmOp::SH => store(cpu, word, constants::HALF_BYTES)?,
        ImmOp::SW => store(cpu, word, constants::WORD_BYTES)?,
        ImmOp::SD => store(cpu, word, constants::DWORD_BYTES)?,

        ImmOp::L_D => {
            let (rs, rt, w) = isa::fields_i(word);
            let address = effective_address(cpu, rs, w)?;
            let value = cpu
                .memory()
                .read_double(address)
                .map_err(|_| ExitCode::BadMemoryAccess)?;
            cpu.set_freg(rt, value);
        }

        ImmOp::S_D => {
            let (rs, rt, w) = isa::fields_i(word);
            let address = effective_address(cpu, rs, w)?;
            let value = cpu.freg(rt);
            cpu.memory_mut()
                .write_double(address, value)
                .map_err(|_| ExitCode::BadMemoryAccess)?;
        }
    }

    Ok(())
}

fn execute_register(cpu: &mut Cpu, word: Word, op: RegOp) -> Result<(), ExitCode> {
    let (rs, rt, rd) = isa::fields_r(word);

    match op {
        RegOp::NOP => {}

        RegOp::JR => {
            cpu.set_pc(cpu.reg(rt).wrapping_sub(u64::from(constants::WORD_BYTES)));
        }

        RegOp::JALR => {
            let link = cpu.pc().wrapping_add(u64::from(constants::WORD_BYTES));
            cpu.set_reg(RA_REGISTER, link);
            cpu.set_pc(cpu.reg(rt).wrapping_sub(u64::from(constants::WORD_BYTES)));
        }

        RegOp::MOVZ => {
            if cpu.reg(rt) == 0 {
                cpu.set_reg(rd, cpu.reg(rs));
            }
        }

        RegOp::MOVN => {
            if cpu.reg(rt) != 0 {
                cpu.set_reg(rd, cpu.reg(rs));
            }
        }

        RegOp::DSLLV => {
            let shamt = cpu.reg(rt) as u32;
            cpu.set_reg(rd, cpu.reg(rs).wrapping_shl(shamt));
        }

        RegOp::DSRLV => {
            let shamt = cpu.reg(rt) as u32;
            cpu.set_reg(rd, cpu.reg(rs).wrapping_shr(shamt));
        }

        // The arithmetic right shifts OR the incoming bit 63 back in rather
        // than replicating it across the vacated positions.
        RegOp::DSRAV => {
            let shamt = cpu.reg(rt) as u32;
            let value = cpu.reg(rs);
            cpu.set_reg(rd, value.wrapping_shr(shamt) | (value & SIGN_BIT));
        }

        RegOp::DSLL => {
            cpu.set_reg(rd, cpu.reg(rs) << isa::shift_amount(word));
        }

        RegOp::DSRL => {
            cpu.set_reg(rd, cpu.reg(rs) >> isa::shift_amount(word));
        }

        RegOp::DSRA => {
            let value = cpu.reg(rs);
            cpu.set_reg(rd, (value >> isa::shift_amount(word)) | (value & SIGN_BIT));
        }

        RegOp::DMUL => {
            let product = (cpu.reg(rs) as i64).wrapping_mul(cpu.reg(rt) as i64);
            cpu.set_reg(rd, product as u64);
        }

        RegOp::DMULU => {
            cpu.set_reg(rd, cpu.reg(rs).wrapping_mul(cpu.reg(rt)));
        }

        RegOp::DDIV => {
            // Division by zero yields zero, no trap.
            let value = if cpu.reg(rt) == 0 {
                0
            } else {
                (cpu.reg(rs) as i64).wrapping_div(cpu.reg(rt) as i64) as u64
            };
            cpu.set_reg(rd, value);
        }

        RegOp::DDIVU => {
            let value = if cpu.reg(rt) == 0 {
                0
            } else {
                cpu.reg(rs) / cpu.reg(rt)
            };
            cpu.set_reg(rd, value);
        }

        RegOp::AND => {
            cpu.set_reg(rd, cpu.reg(rs) & cpu.reg(rt));
        }

        RegOp::OR => {
            cpu.set_reg(rd, cpu.reg(rs) | cpu.reg(rt));
        }

        RegOp::XOR => {
            cpu.set_reg(rd, cpu.reg(rs) ^ cpu.reg(rt));
        }

        RegOp::SLT => {
            cpu.set_reg(rd, ((cpu.reg(rs) as i64) < (cpu.reg(rt) as i64)) as u64);
        }

        RegOp::SLTU => {
            cpu.set_reg(rd, (cpu.reg(rs) < cpu.reg(rt)) as u64);
        }

        RegOp::DADD => {
            cpu.set_reg(
                rd,
                (cpu.reg(rs) as i64).wrapping_add(cpu.reg(rt) as i64) as u64,
            );
        }

        RegOp::DADDU => {
            cpu.set_reg(rd, cpu.reg(rs).wrapping_add(cpu.reg(rt)));
        }

        RegOp::DSUB => {
            cpu.set_reg(
                rd,
                (cpu.reg(rs) as i64).wrapping_sub(cpu.reg(rt) as i64) as u64,
            );
        }

        RegOp::DSUBU => {
            cpu.set_reg(rd, cpu.reg(rs).wrapping_sub(cpu.reg(rt)));
        }
    }

    Ok(())
}

fn execute_fp(cpu: &mut Cpu, word: Word, op: FpOp) {
    let (rs, rt, rd) = isa::fields_f(word);

    match op {
        FpOp::ADD_D => {
            cpu.set_freg(rd, cpu.freg(rs) + cpu.freg(rt));
        }

        FpOp::SUB_D => {
            cpu.set_freg(rd, cpu.freg(rs) - cpu.freg(rt));
        }

        FpOp::MUL_D => {
            cpu.set_freg(rd, cpu.freg(rs) * cpu.freg(rt));
        }

        FpOp::DIV_D => {
            cpu.set_freg(rd, cpu.freg(rs) / cpu.freg(rt));
        }

        FpOp::MOV_D => {
            cpu.set_freg(rd, cpu.freg(rs));
        }

        // Both conversions reinterpret the register's bit pattern rather
        // than performing the standard MIPS numeric conversion.
        FpOp::CVT_D_L => {
            cpu.set_freg(rd, cpu.freg(rs).to_bits() as f64);
        }

        FpOp::CVT_L_D => {
            cpu.set_freg(rd, f64::from_bits(cpu.freg(rs) as u64));
        }

        FpOp::C_LT_D => {
            cpu.set_fp_flag(cpu.freg(rs) < cpu.freg(rt));
        }

        FpOp::C_LE_D => {
            cpu.set_fp_flag(cpu.freg(rs) <= cpu.freg(rt));
        }

        FpOp::C_EQ_D => {
            cpu.set_fp_flag(cpu.freg(rs) == cpu.freg(rt));
        }
    }
}
