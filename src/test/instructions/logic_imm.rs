use super::*;

// The immediates of the logical instructions are zero-extended, unlike the
// arithmetic ones.

#[test]
fn andi_zero_extends() {
    instruction_runs! {
        word_i(Instruction::ANDI, 1, 2, -1),
        [1 => 0x1234_5678_9ABC_DEF0u64] => [2 => 0xDEF0]
    };
}

#[test]
fn ori_zero_extends() {
    instruction_runs! {
        word_i(Instruction::ORI, 1, 2, -1),
        [1 => 0x8000_0000_0000_0000u64] => [2 => 0x8000_0000_0000_FFFFu64]
    };
}

#[test]
fn xori_zero_extends() {
    instruction_runs! {
        word_i(Instruction::XORI, 1, 2, -1),
        [1 => 0xFFFF] => [2 => 0]
    };
}
