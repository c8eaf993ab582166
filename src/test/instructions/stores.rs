use super::*;

#[test]
fn sb_truncates_to_one_byte() {
    let code = vec![word_i(Instruction::SB, 0, 1, 0)];
    let mut cpu = Cpu::new();
    cpu.set_reg(1, 0x1FF);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.memory().borrow_slice(0, 2), Ok(&[0xFF, 0][..]));
}

#[test]
fn sh_writes_little_endian() {
    let code = vec![word_i(Instruction::SH, 0, 1, 2)];
    let mut cpu = Cpu::new();
    cpu.set_reg(1, 0xBEEF);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.memory().borrow_slice(0, 4), Ok(&[0, 0, 0xEF, 0xBE][..]));
}

#[test]
fn sw_writes_the_low_word() {
    let code = vec![word_i(Instruction::SW, 0, 1, 0)];
    let mut cpu = Cpu::new();
    cpu.set_reg(1, 0xAABB_CCDD_1122_3344);
    cpu.step(&code).unwrap();
    assert_eq!(
        cpu.memory().borrow_slice(0, 8),
        Ok(&[0x44, 0x33, 0x22, 0x11, 0, 0, 0, 0][..])
    );
}

#[test]
fn sd_round_trips_through_ld() {
    let code = vec![
        word_i(Instruction::SD, 0, 1, 8),
        word_i(Instruction::LD, 0, 2, 8),
    ];
    let mut cpu = Cpu::new();
    cpu.set_reg(1, 0x0102_0304_0506_0708);
    cpu.step(&code).unwrap();
    cpu.step(&code).unwrap();
    assert_eq!(cpu.reg(2), 0x0102_0304_0506_0708);
}

#[test]
fn negative_displacement() {
    let code = vec![word_i(Instruction::SW, 3, 1, -4)];
    let mut cpu = Cpu::new();
    cpu.set_reg(1, 23);
    cpu.set_reg(3, 16);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.memory().read(12, 4), Ok(23));
}

#[test]
fn out_of_range_faults() {
    instruction_faults! {
        word_i(Instruction::SD, 1, 2, 0),
        [1 => crate::constants::MEMORY_SIZE as u64 - 4],
        BadMemoryAccess
    };
}
