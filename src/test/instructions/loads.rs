use super::*;

fn cpu_with_memory(bytes: &[u8]) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.memory_mut()
        .borrow_slice_mut(0, bytes.len() as u32)
        .unwrap()
        .copy_from_slice(bytes);
    cpu
}

#[test]
fn lb_sign_extends() {
    let code = vec![word_i(Instruction::LB, 0, 1, 0)];
    let mut cpu = cpu_with_memory(&[0x80]);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(1), 0xFFFF_FFFF_FFFF_FF80);
}

#[test]
fn lbu_zero_extends() {
    let code = vec![word_i(Instruction::LBU, 0, 1, 0)];
    let mut cpu = cpu_with_memory(&[0x80]);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(1), 0x80);
}

#[test]
fn lh_sign_extends() {
    let code = vec![word_i(Instruction::LH, 0, 1, 0)];
    let mut cpu = cpu_with_memory(&[0x00, 0x80]);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(1), 0xFFFF_FFFF_FFFF_8000);
}

#[test]
fn lw_is_little_endian() {
    let code = vec![word_i(Instruction::LW, 0, 1, 0)];
    let mut cpu = cpu_with_memory(&[0x78, 0x56, 0x34, 0x12]);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(1), 0x1234_5678);
}

#[test]
fn lwu_ignores_the_sign_bit() {
    let code = vec![word_i(Instruction::LWU, 0, 1, 0)];
    let mut cpu = cpu_with_memory(&[0, 0, 0, 0x80]);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(1), 0x8000_0000);
}

#[test]
fn ld_reads_a_doubleword() {
    let code = vec![word_i(Instruction::LD, 0, 2, 0)];
    let mut cpu = cpu_with_memory(&[0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(2), 0x1122_3344_5566_7788);
}

#[test]
fn negative_displacement() {
    let code = vec![word_i(Instruction::LB, 3, 1, -8)];
    let mut cpu = cpu_with_memory(&[0, 0, 0, 0, 0, 0, 0, 0, 42]);
    cpu.set_reg(3, 16);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(1), 42);
}

#[test]
fn out_of_range_faults() {
    instruction_faults! {
        word_i(Instruction::LW, 0, 1, -2),
        [],
        BadMemoryAccess
    };
}
