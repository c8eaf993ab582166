use super::*;

#[test]
fn dsll_by_literal() {
    instruction_runs! {
        word_r(Instruction::DSLL, 1, 0, 2, 4),
        [1 => 3] => [2 => 48]
    };
}

#[test]
fn dsrl_inserts_zeros() {
    instruction_runs! {
        word_r(Instruction::DSRL, 1, 0, 2, 31),
        [1 => u64::max_value()] => [2 => 0x1_FFFF_FFFFu64]
    };
}

#[test]
fn dsra_keeps_bit_63_in_place() {
    // The incoming sign bit is ORed back in, not replicated across the
    // vacated positions.
    instruction_runs! {
        word_r(Instruction::DSRA, 1, 0, 2, 4),
        [1 => 0x8000_0000_0000_0010u64] => [2 => 0x8800_0000_0000_0001u64]
    };
}

#[test]
fn dsra_positive_value_is_a_plain_shift() {
    instruction_runs! {
        word_r(Instruction::DSRA, 1, 0, 2, 1),
        [1 => 32] => [2 => 16]
    };
}

#[test]
fn dsllv_shifts_by_register() {
    instruction_runs! {
        word_r(Instruction::DSLLV, 1, 3, 2, 0),
        [1 => 1, 3 => 8] => [2 => 256]
    };
}

#[test]
fn dsrlv_shifts_by_register() {
    instruction_runs! {
        word_r(Instruction::DSRLV, 1, 3, 2, 0),
        [1 => 256, 3 => 8] => [2 => 1]
    };
}

#[test]
fn dsrav_keeps_bit_63_in_place() {
    instruction_runs! {
        word_r(Instruction::DSRAV, 1, 3, 2, 0),
        [1 => 0x8000_0000_0000_0000u64, 3 => 63] => [2 => 0x8000_0000_0000_0001u64]
    };
}
