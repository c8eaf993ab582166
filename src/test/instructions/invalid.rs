use super::*;

#[test]
fn unknown_primary_opcode() {
    instruction_faults! {
        0x3E << 26,
        [],
        InvalidOpcode
    };
}

#[test]
fn unknown_special_function() {
    instruction_faults! {
        0x01, // SPECIAL with funct 0x01
        [],
        InvalidOpcode
    };
}

#[test]
fn unknown_cop1_function() {
    instruction_faults! {
        (0x11 << 26) | (0x11 << 21) | 0x3F,
        [],
        InvalidOpcode
    };
}
