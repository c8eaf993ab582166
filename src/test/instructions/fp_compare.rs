use super::*;

fn flag_after(word: Word, a: f64, b: f64) -> bool {
    let code = vec![word];
    let mut cpu = Cpu::new();
    cpu.set_freg(1, a);
    cpu.set_freg(2, b);
    cpu.step(&code).unwrap();
    cpu.fp_flag()
}

#[test]
fn c_lt_d() {
    let word = word_f(Instruction::C_LT_D, 1, 2, 0);
    assert!(flag_after(word, 1.0, 2.0));
    assert!(!flag_after(word, 2.0, 2.0));
}

#[test]
fn c_le_d() {
    let word = word_f(Instruction::C_LE_D, 1, 2, 0);
    assert!(flag_after(word, 2.0, 2.0));
    assert!(!flag_after(word, 3.0, 2.0));
}

#[test]
fn c_eq_d() {
    let word = word_f(Instruction::C_EQ_D, 1, 2, 0);
    assert!(flag_after(word, 2.0, 2.0));
    assert!(!flag_after(word, 1.0, 2.0));
}

#[test]
fn bc1t_taken_when_flag_set() {
    let code = vec![word_b(Instruction::BC1T, 2), nop(), nop(), nop()];
    let mut cpu = Cpu::new();
    cpu.set_fp_flag(true);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.pc(), 12);
}

#[test]
fn bc1t_not_taken_when_flag_clear() {
    let code = vec![word_b(Instruction::BC1T, 2), nop(), nop(), nop()];
    let mut cpu = Cpu::new();
    cpu.step(&code).unwrap();
    assert_eq!(cpu.pc(), 4);
}

#[test]
fn bc1f_taken_when_flag_clear() {
    let code = vec![word_b(Instruction::BC1F, 2), nop(), nop(), nop()];
    let mut cpu = Cpu::new();
    cpu.step(&code).unwrap();
    assert_eq!(cpu.pc(), 12);
}

#[test]
fn compare_then_branch_skips_a_halt() {
    // c.lt.d f1, f2; bc1t over the first halt into the second.
    let code = vec![
        word_f(Instruction::C_LT_D, 1, 2, 0),
        word_b(Instruction::BC1T, 1),
        word_i(Instruction::HALT, 0, 0, 0),
        word_i(Instruction::HALT, 0, 0, 0),
    ];
    let mut cpu = Cpu::new();
    cpu.set_freg(1, 1.0);
    cpu.set_freg(2, 2.0);
    cpu.step(&code).unwrap();
    assert!(cpu.fp_flag());
    cpu.step(&code).unwrap();
    assert_eq!(cpu.pc(), 12);
    assert_eq!(cpu.run(&code), ExitCode::Halted);
    assert_eq!(cpu.pc(), 16);
}
