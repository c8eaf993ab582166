use super::*;

fn run_fp(word: Word, fregs: &[(u32, f64)]) -> Cpu {
    let code = vec![word, nop()];
    let mut cpu = Cpu::new();
    for &(id, value) in fregs {
        cpu.set_freg(id, value);
    }
    cpu.step(&code).unwrap();
    cpu
}

#[test]
fn add_d() {
    let cpu = run_fp(
        word_f(Instruction::ADD_D, 2, 3, 1),
        &[(2, 1.5), (3, 2.25)],
    );
    assert_eq!(cpu.freg(1), 3.75);
}

#[test]
fn sub_d() {
    let cpu = run_fp(
        word_f(Instruction::SUB_D, 2, 3, 1),
        &[(2, 1.5), (3, 2.25)],
    );
    assert_eq!(cpu.freg(1), -0.75);
}

#[test]
fn mul_d() {
    let cpu = run_fp(
        word_f(Instruction::MUL_D, 2, 3, 1),
        &[(2, 1.5), (3, -4.0)],
    );
    assert_eq!(cpu.freg(1), -6.0);
}

#[test]
fn div_d() {
    let cpu = run_fp(word_f(Instruction::DIV_D, 2, 3, 1), &[(2, 1.0), (3, 8.0)]);
    assert_eq!(cpu.freg(1), 0.125);
}

#[test]
fn div_d_by_zero_follows_ieee() {
    let cpu = run_fp(word_f(Instruction::DIV_D, 2, 3, 1), &[(2, 1.0), (3, 0.0)]);
    assert_eq!(cpu.freg(1), std::f64::INFINITY);
}

#[test]
fn mov_d() {
    let cpu = run_fp(word_f(Instruction::MOV_D, 7, 0, 1), &[(7, 6.25)]);
    assert_eq!(cpu.freg(1), 6.25);
}
