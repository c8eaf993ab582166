use super::*;

#[test]
fn movz_moves_when_zero() {
    instruction_runs! {
        word_r(Instruction::MOVZ, 1, 3, 2, 0),
        [1 => 99, 3 => 0] => [2 => 99]
    };
}

#[test]
fn movz_keeps_destination_otherwise() {
    instruction_runs! {
        word_r(Instruction::MOVZ, 1, 3, 2, 0),
        [1 => 99, 2 => 7, 3 => 1] => [2 => 7]
    };
}

#[test]
fn movn_moves_when_not_zero() {
    instruction_runs! {
        word_r(Instruction::MOVN, 1, 3, 2, 0),
        [1 => 99, 3 => 1] => [2 => 99]
    };
}

#[test]
fn movn_keeps_destination_otherwise() {
    instruction_runs! {
        word_r(Instruction::MOVN, 1, 3, 2, 0),
        [1 => 99, 2 => 7, 3 => 0] => [2 => 7]
    };
}
