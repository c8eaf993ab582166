use super::*;

#[test]
fn shifts_into_upper_word() {
    instruction_runs! {
        word_i(Instruction::LUI, 0, 1, 0x1234),
        [] => [1 => 0x1234u64 << 32]
    };
}

#[test]
fn ors_into_existing_value() {
    instruction_runs! {
        word_i(Instruction::LUI, 0, 1, 0x1234),
        [1 => 5] => [1 => (0x1234u64 << 32) | 5]
    };
}

#[test]
fn negative_immediate_fills_high_bits() {
    instruction_runs! {
        word_i(Instruction::LUI, 0, 1, -1),
        [] => [1 => 0xFFFF_FFFF_0000_0000u64]
    };
}
