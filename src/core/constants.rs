//! Fixed sizes and defaults of the 4-bit adder.

/// Constants shared by the adder, the simulator front-end and the CLI.
pub mod adder_constants {
    /// Width of each operand register in bits.
    pub const OPERAND_BITS: usize = 4;
    /// Width of the carry register: one slot per bit plus the overflow.
    pub const CARRY_BITS: usize = OPERAND_BITS + 1;
    /// Largest operand value.
    pub const MAX_OPERAND: u8 = (1 << OPERAND_BITS) - 1;
    /// Initial value of operand A in the front-end.
    pub const DEFAULT_A: u8 = 3;
    /// Initial value of operand B in the front-end.
    pub const DEFAULT_B: u8 = 5;
    /// Measurement label of the overflow qubit.
    pub const CARRY_KEY: &str = "Carry";
}
