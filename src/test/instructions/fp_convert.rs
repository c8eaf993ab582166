use super::*;

// The conversions reinterpret bit patterns instead of performing the usual
// MIPS numeric conversions; both directions are pinned here.

#[test]
fn cvt_d_l_converts_the_bit_pattern() {
    let code = vec![word_f(Instruction::CVT_D_L, 1, 0, 2)];
    let mut cpu = Cpu::new();
    cpu.set_freg(1, f64::from_bits(42));
    cpu.step(&code).unwrap();
    assert_eq!(cpu.freg(2), 42.0);
}

#[test]
fn cvt_l_d_stores_the_integer_bits() {
    let code = vec![word_f(Instruction::CVT_L_D, 1, 0, 2)];
    let mut cpu = Cpu::new();
    cpu.set_freg(1, 5.9);
    cpu.step(&code).unwrap();
    assert_eq!(cpu.freg(2).to_bits(), 5);
}

#[test]
fn cvt_round_trip_for_small_integers() {
    let code = vec![
        word_f(Instruction::CVT_L_D, 1, 0, 2),
        word_f(Instruction::CVT_D_L, 2, 0, 3),
    ];
    let mut cpu = Cpu::new();
    cpu.set_freg(1, 1234.0);
    cpu.step(&code).unwrap();
    cpu.step(&code).unwrap();
    assert_eq!(cpu.freg(3), 1234.0);
}
