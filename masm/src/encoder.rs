use crate::parser::{Argument, Immediate, InstructionData};
use mcpu::isa::{self, Shape, SubType};
use mcpu::{constants, Word};

fn int_value(immediate: &Immediate) -> i32 {
    match immediate {
        Immediate::Int(value) => *value,
        Immediate::Float(_) => unreachable!("floating point immediate reached the encoder"),
        Immediate::Symbol(_) => unreachable!("unresolved label reached the encoder"),
    }
}

impl InstructionData {
    /// Absolute target address to word-scaled displacement, relative to the
    /// executor's already-incremented pc.
    fn relative_words(&self, target: i32) -> i32 {
        (target - (self.pc_address as i32 + constants::WORD_BYTES as i32))
            / constants::WORD_BYTES as i32
    }

    /// Encodes the instruction into its 32-bit word. The arguments have been
    /// shape-checked by the parser and narrowed by the resolution pass; a
    /// mismatch here is a bug, not an input error.
    pub fn encode(&self) -> Word {
        let opcode = isa::opcode_info(self.info.insn);

        let mut rs = 0u32;
        let mut rt = 0u32;
        let mut rd = 0u32;
        let mut flags = 0u32;
        let mut w = 0i32;

        match opcode.subtype {
            SubType::Nop | SubType::Halt => {}

            SubType::Load | SubType::Store | SubType::FLoad | SubType::FStore => {
                rt = self.args[0].register().encoding();
                match &self.args[1] {
                    Argument::ImmediateWithRegister(displacement, base) => {
                        w = int_value(displacement);
                        rs = base.encoding();
                    }
                    // Bare register: zero displacement.
                    Argument::Register(base) => {
                        rs = base.encoding();
                    }
                    Argument::Immediate(_) => {
                        unreachable!("load/store without a base register")
                    }
                }
            }

            SubType::Reg2I => {
                rt = self.args[0].register().encoding();
                rs = self.args[1].register().encoding();
                w = int_value(self.args[2].immediate());
            }

            SubType::Reg1I => {
                rt = self.args[0].register().encoding();
                w = int_value(self.args[1].immediate());
            }

            SubType::Branch => {
                rt = self.args[0].register().encoding();
                rs = self.args[1].register().encoding();
                w = self.relative_words(int_value(self.args[2].immediate()));
            }

            SubType::Jregn => {
                rt = self.args[0].register().encoding();
                w = self.relative_words(int_value(self.args[1].immediate()));
            }

            SubType::Jump | SubType::Bc => {
                w = self.relative_words(int_value(self.args[0].immediate()));
            }

            SubType::Jreg => {
                rt = self.args[0].register().encoding();
            }

            SubType::Reg2S => {
                rd = self.args[0].register().encoding();
                rs = self.args[1].register().encoding();
                flags = int_value(self.args[2].immediate()) as u32;
            }

            SubType::Reg3 | SubType::Reg3F => {
                rd = self.args[0].register().encoding();
                rs = self.args[1].register().encoding();
                rt = self.args[2].register().encoding();
            }

            SubType::Reg2F => {
                rd = self.args[0].register().encoding();
                rs = self.args[1].register().encoding();
            }

            SubType::Reg2C => {
                rs = self.args[0].register().encoding();
                rt = self.args[1].register().encoding();
            }

            SubType::RegId | SubType::RegDi => {
                rt = self.args[0].register().encoding();
                rd = self.args[1].register().encoding();
            }
        }

        match opcode.shape {
            Shape::I => isa::pack_i(opcode.base, rs, rt, w as u32),
            Shape::R => isa::pack_r(opcode.base, rs, rt, rd, flags),
            Shape::J => isa::pack_j(opcode.base, w as u32),
            Shape::F => isa::pack_f(opcode.base, rs, rt, rd),
            Shape::M => isa::pack_m(opcode.base, rt, rd),
            Shape::B => isa::pack_b(opcode.base, w as u32),
        }
    }
}

/// Encodes a full program into the code image, honoring each instruction's
/// address. Gaps left by `.org` decode as `nop`.
pub fn encode_program(instructions: &[InstructionData]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    for data in instructions {
        let index = (data.pc_address / constants::WORD_BYTES) as usize;
        if index >= words.len() {
            words.resize(index + 1, 0);
        }
        words[index] = data.encode();
    }
    words
}
