use super::*;

#[test]
fn slti_is_signed() {
    instruction_runs! {
        word_i(Instruction::SLTI, 1, 2, 3),
        [1 => -1i64] => [2 => 1]
    };
}

#[test]
fn slti_false() {
    instruction_runs! {
        word_i(Instruction::SLTI, 1, 2, -3),
        [1 => 0] => [2 => 0]
    };
}

#[test]
fn sltiu_is_unsigned() {
    // The immediate still sign-extends before the unsigned compare.
    instruction_runs! {
        word_i(Instruction::SLTIU, 1, 2, -1),
        [1 => 1] => [2 => 1]
    };
}

#[test]
fn sltiu_equal_is_false() {
    instruction_runs! {
        word_i(Instruction::SLTIU, 1, 2, -1),
        [1 => u64::max_value()] => [2 => 0]
    };
}
