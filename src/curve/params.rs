//! BabyJubJub curve constants
//!
//! Twisted Edwards form `a*x^2 + y^2 = 1 + d*x^2*y^2` over the BN254 scalar
//! field. These are the parameters of circomlib's `babyJub` and of the Noir
//! `ec` library, and must stay bit-for-bit identical to the circuit that
//! verifies ciphertexts produced by this crate. They are fixed at compile
//! time and never configurable.
//!
//! The limb constants are what arithmetic uses; the decimal strings are the
//! published form, and the context's self-check parses them and compares.

/// Curve coefficient `a`.
pub const A: u64 = 168_700;

/// Curve coefficient `d`.
pub const D: u64 = 168_696;

pub const FIELD_MODULUS_DECIMAL: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Order `l` of the prime subgroup generated by the base point.
pub const SUBGROUP_ORDER_DECIMAL: &str =
    "2736030358979909402780800718157159386076813972158567259200215660948447373041";

/// Base point ("Base8"), generator of the prime-order subgroup.
pub const BASE_POINT_X_DECIMAL: &str =
    "5299619240641551281634865583518297030282874472190772894086521144482721001553";
pub const BASE_POINT_Y_DECIMAL: &str =
    "16950150798460657717958625567821834550301663161624707787222815936182638968203";

pub const BASE_POINT_X_LIMBS: [u64; 4] = [
    0x2893F3F6BB957051,
    0x2AB8D8010534E0B6,
    0x4EACB2E09D6277C1,
    0x0BB77A6AD63E739B,
];

pub const BASE_POINT_Y_LIMBS: [u64; 4] = [
    0x4B3C257A872D7D8B,
    0xFCE0051FB9E13377,
    0x25572E1CD16BF9ED,
    0x25797203F7A0B249,
];

/// Cofactor of the full curve group (`#E = 8 * l`).
pub const COFACTOR: u64 = 8;
