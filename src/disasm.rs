//! Textual rendering of encoded words, used by the simulator's `--insn`
//! output and by the round-trip tests. The routing mirrors the executor.

use num_traits::FromPrimitive;

use crate::isa::{self, FpOp, ImmOp, RegOp};
use crate::{constants, Word};

pub fn disassemble(word: Word) -> String {
    let primary = isa::primary(word);
    let sub = isa::sub(word);

    if primary == constants::OP_SPECIAL {
        match RegOp::from_u32(isa::function(word)) {
            Some(op) => disassemble_register(word, op),
            None => invalid(word),
        }
    } else if primary == constants::OP_COP1 && sub == constants::SUB_DOUBLE {
        match FpOp::from_u32(isa::function(word)) {
            Some(op) => disassemble_fp(word, op),
            None => invalid(word),
        }
    } else if primary == constants::OP_COP1 && sub == constants::SUB_MTC1 {
        let (rt, rd) = isa::fields_m(word);
        format!("mtc1 r{}, f{}", rt, rd)
    } else if primary == constants::OP_COP1 && sub == constants::SUB_BC {
        let offset = i32::from(isa::displacement_b(word)) * constants::WORD_BYTES as i32;
        if (word & constants::BC_TRUE_MASK) != 0 {
            format!("bc1t {}", offset)
        } else {
            format!("bc1f {}", offset)
        }
    } else if primary == constants::OP_COP1 {
        let (rt, rd) = isa::fields_m(word);
        format!("mfc1 r{}, f{}", rt, rd)
    } else {
        match ImmOp::from_u32(primary) {
            Some(op) => disassemble_immediate(word, op),
            None => invalid(word),
        }
    }
}

fn invalid(word: Word) -> String {
    format!("invalid 0x{:08x}", word)
}

fn memory_op(name: &str, bank: char, word: Word) -> String {
    let (rs, rt, w) = isa::fields_i(word);
    format!("{} {}{}, {}(r{})", name, bank, rt, w, rs)
}

fn disassemble_immediate(word: Word, op: ImmOp) -> String {
    let (rs, rt, w) = isa::fields_i(word);
    match op {
        ImmOp::HALT => "halt".to_owned(),
        ImmOp::J => format!("j {}", i64::from(isa::target_j(word)) * 4),
        ImmOp::JAL => format!("jal {}", i64::from(isa::target_j(word)) * 4),
        ImmOp::BEQ => format!("beq r{}, r{}, {}", rt, rs, w),
        ImmOp::BNE => format!("bne r{}, r{}, {}", rt, rs, w),
        ImmOp::BEQZ => format!("beqz r{}, {}", rt, i32::from(w) * 4),
        ImmOp::BNEZ => format!("bnez r{}, {}", rt, i32::from(w) * 4),
        ImmOp::DADDI => format!("daddi r{}, r{}, {}", rt, rs, w),
        ImmOp::DADDIU => format!("daddiu r{}, r{}, {}", rt, rs, w),
        ImmOp::ANDI => format!("andi r{}, r{}, {}", rt, rs, w),
        ImmOp::ORI => format!("ori r{}, r{}, {}", rt, rs, w),
        ImmOp::XORI => format!("xori r{}, r{}, {}", rt, rs, w),
        ImmOp::LUI => format!("lui r{}, {}", rt, w),
        ImmOp::SLTI => format!("slti r{}, r{}, {}", rt, rs, w),
        ImmOp::SLTIU => format!("sltiu r{}, r{}, {}", rt, rs, w),
        ImmOp::LB => memory_op("lb", 'r', word),
        ImmOp::LH => memory_op("lh", 'r', word),
        ImmOp::LW => memory_op("lw", 'r', word),
        ImmOp::LD => memory_op("ld", 'r', word),
        ImmOp::LBU => memory_op("lbu", 'r', word),
        ImmOp::LHU => memory_op("lhu", 'r', word),
        ImmOp::LWU => memory_op("lwu", 'r', word),
        ImmOp::SB => memory_op("sb", 'r', word),
        ImmOp::SH => memory_op("sh", 'r', word),
        ImmOp::SW => memory_op("sw", 'r', word),
        ImmOp::SD => memory_op("sd", 'r', word),
        ImmOp::L_D => memory_op("l.d", 'f', word),
        ImmOp::S_D => memory_op("s.d", 'f', word),
    }
}

fn disassemble_register(word: Word, op: RegOp) -> String {
    let (rs, rt, rd) = isa::fields_r(word);
    let shamt = isa::shift_amount(word);
    match op {
        RegOp::NOP => "nop".to_owned(),
        RegOp::JR => format!("jr r{}", rt),
        RegOp::JALR => format!("jalr r{}", rt),
        RegOp::MOVZ => format!("movz r{}, r{}, r{}", rd, rs, rt),
        RegOp::MOVN => format!("movn r{}, r{}, r{}", rd, rs, rt),
        RegOp::DSLL => format!("dsll r{}, r{}, {}", rd, rs, shamt),
        RegOp::DSRL => format!("dsrl r{}, r{}, {}", rd, rs, shamt),
        RegOp::DSRA => format!("dsra r{}, r{}, {}", rd, rs, shamt),
        RegOp::DSLLV => format!("dsllv r{}, r{}, r{}", rd, rs, rt),
        RegOp::DSRLV => format!("dsrlv r{}, r{}, r{}", rd, rs, rt),
        RegOp::DSRAV => format!("dsrav r{}, r{}, r{}", rd, rs, rt),
        RegOp::AND => format!("and r{}, r{}, r{}", rd, rs, rt),
        RegOp::OR => format!("or r{}, r{}, r{}", rd, rs, rt),
        RegOp::XOR => format!("xor r{}, r{}, r{}", rd, rs, rt),
        RegOp::SLT => format!("slt r{}, r{}, r{}", rd, rs, rt),
        RegOp::SLTU => format!("sltu r{}, r{}, r{}", rd, rs, rt),
        RegOp::DADD => format!("dadd r{}, r{}, r{}", rd, rs, rt),
        RegOp::DADDU => format!("daddu r{}, r{}, r{}", rd, rs, rt),
        RegOp::DSUB => format!("dsub r{}, r{}, r{}", rd, rs, rt),
        RegOp::DSUBU => format!("dsubu r{}, r{}, r{}", rd, rs, rt),
        RegOp::DMUL => format!("dmul r{}, r{}, r{}", rd, rs, rt),
        RegOp::DMULU => format!("dmulu r{}, r{}, r{}", rd, rs, rt),
        RegOp::DDIV => format!("ddiv r{}, r{}, r{}", rd, rs, rt),
        RegOp::DDIVU => format!("ddivu r{}, r{}, r{}", rd, rs, rt),
    }
}

fn disassemble_fp(word: Word, op: FpOp) -> String {
    let (rs, rt, rd) = isa::fields_f(word);
    match op {
        FpOp::ADD_D => format!("add.d f{}, f{}, f{}", rd, rs, rt),
        FpOp::SUB_D => format!("sub.d f{}, f{}, f{}", rd, rs, rt),
        FpOp::MUL_D => format!("mul.d f{}, f{}, f{}", rd, rs, rt),
        FpOp::DIV_D => format!("div.d f{}, f{}, f{}", rd, rs, rt),
        FpOp::MOV_D => format!("mov.d f{}, f{}", rd, rs),
        FpOp::CVT_D_L => format!("cvt.d.l f{}, f{}", rd, rs),
        FpOp::CVT_L_D => format!("cvt.l.d f{}, f{}", rd, rs),
        FpOp::C_LT_D => format!("c.lt.d f{}, f{}", rs, rt),
        FpOp::C_LE_D => format!("c.le.d f{}, f{}", rs, rt),
        FpOp::C_EQ_D => format!("c.eq.d f{}, f{}", rs, rt),
    }
}
