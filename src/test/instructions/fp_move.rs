use super::*;

#[test]
fn mtc1_converts_to_double() {
    let code = vec![word_m(Instruction::MTC1, 3, 2)];
    let mut cpu = Cpu::new();
    cpu.set_reg(3, 42);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.freg(2), 42.0);
}

#[test]
fn mfc1_truncates_to_integer() {
    let code = vec![word_m(Instruction::MFC1, 3, 2)];
    let mut cpu = Cpu::new();
    cpu.set_freg(2, 42.9);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(3), 42);
}

#[test]
fn mfc1_saturates_negative_values_to_zero() {
    let code = vec![word_m(Instruction::MFC1, 3, 2)];
    let mut cpu = Cpu::new();
    cpu.set_freg(2, -1.5);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(3), 0);
}
