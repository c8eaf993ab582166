use super::*;

#[test]
fn j_forward() {
    instructions_execute! {
        [word_j(Instruction::J, 2), nop(), nop(), nop()],
        [] => [],
        1,
        12
    };
}

#[test]
fn j_backward_sign_extends_the_target() {
    instructions_execute! {
        [nop(), nop(), word_j(Instruction::J, -2), nop()],
        [] => [],
        3,
        4
    };
}

#[test]
fn jal_links_r31() {
    instructions_execute! {
        [word_j(Instruction::JAL, 2), nop(), nop(), nop()],
        [] => [31 => 4],
        1,
        12
    };
}

#[test]
fn jr_compensates_the_post_increment() {
    instructions_execute! {
        [word_r(Instruction::JR, 0, 5, 0, 0), nop(), nop(), nop()],
        [5 => 12] => [],
        1,
        12
    };
}

#[test]
fn jalr_links_and_jumps() {
    instructions_execute! {
        [word_r(Instruction::JALR, 0, 5, 0, 0), nop(), nop(), nop()],
        [5 => 8] => [31 => 4],
        1,
        8
    };
}
