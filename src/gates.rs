//! Binary gate input combination
//!
//! Every two-input gate is an affine map on the LWE layer followed by the
//! shared bootstrap. Fresh Boolean inputs sit on phases {0, q/4}; combining
//! them and adding the gate constant places exactly the live input patterns
//! inside the (0, q/2) half-plane where the step function answers TRUE.
//!
//! XOR and XNOR scale the sum by two, which doubles the input noise but
//! also doubles the distance to the decision boundaries, so the failure
//! probability stays on par with the other gates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lwe::LweCiphertext;

/// Two-input Boolean gates evaluated through bootstrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinGate {
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Xnor,
}

impl fmt::Display for BinGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinGate::And => "AND",
            BinGate::Or => "OR",
            BinGate::Nand => "NAND",
            BinGate::Nor => "NOR",
            BinGate::Xor => "XOR",
            BinGate::Xnor => "XNOR",
        };
        write!(f, "{name}")
    }
}

/// Affine input combination feeding the bootstrap
///
/// | gate | combination      | constant |
/// |------|------------------|----------|
/// | AND  | ct1 + ct2        | +5q/8    |
/// | OR   | ct1 + ct2        | +7q/8    |
/// | NAND | −(ct1 + ct2)     | +3q/8    |
/// | NOR  | −(ct1 + ct2)     | +q/8     |
/// | XOR  | 2·(ct1 + ct2)    | +3q/4    |
/// | XNOR | −2·(ct1 + ct2)   | +q/4     |
pub fn combine(gate: BinGate, ct1: &LweCiphertext, ct2: &LweCiphertext) -> LweCiphertext {
    let q = ct1.modulus();
    let sum = ct1.add(ct2);
    match gate {
        BinGate::And => sum.add_scalar(5 * q / 8),
        BinGate::Or => sum.add_scalar(7 * q / 8),
        BinGate::Nand => sum.negate().add_scalar(3 * q / 8),
        BinGate::Nor => sum.negate().add_scalar(q / 8),
        BinGate::Xor => sum.scalar_mul(2).add_scalar(3 * q / 4),
        BinGate::Xnor => sum.scalar_mul(2).negate().add_scalar(q / 4),
    }
}
