use super::*;

#[test]
fn l_d_loads_the_bit_pattern() {
    let code = vec![word_i(Instruction::L_D, 0, 1, 0)];
    let mut cpu = Cpu::new();
    cpu.memory_mut().write(0, 8, 3.5f64.to_bits()).unwrap();
    cpu.step(&code).unwrap();
    assert_eq!(cpu.freg(1), 3.5);
}

#[test]
fn s_d_stores_the_bit_pattern() {
    let code = vec![word_i(Instruction::S_D, 0, 2, 16)];
    let mut cpu = Cpu::new();
    cpu.set_freg(2, -0.25);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.memory().read(16, 8), Ok((-0.25f64).to_bits()));
}

#[test]
fn displacement_uses_the_base_register() {
    let code = vec![
        word_i(Instruction::S_D, 3, 2, -8),
        word_i(Instruction::L_D, 3, 4, -8),
    ];
    let mut cpu = Cpu::new();
    cpu.set_reg(3, 32);
    cpu.set_freg(2, 1e300);
    cpu.step(&code).unwrap();
    cpu.step(&code).unwrap();
    assert_eq!(cpu.freg(4), 1e300);
}

#[test]
fn out_of_range_faults() {
    instruction_faults! {
        word_i(Instruction::L_D, 0, 1, -8),
        [],
        BadMemoryAccess
    };
}
