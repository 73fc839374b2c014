//! Composed circuit tests
//!
//! Multi-gate circuits over refreshed ciphertexts: every gate output is
//! bootstrapped, so depth is limited only by runtime. Results are checked
//! against the clear evaluation.

use binfhe::{
    BinFheContext, BinGate, BootstrapMethod, GaussianSampler, LweCiphertext, LweSecretKey,
    OutputMode, ParamSet,
};

fn setup(seed: u64) -> (BinFheContext, LweSecretKey, GaussianSampler) {
    let mut ctx = BinFheContext::with_param_set(ParamSet::Toy, BootstrapMethod::Ginx).unwrap();
    let mut sampler = GaussianSampler::with_seed(ctx.params().sigma, seed);
    let sk = ctx.key_gen(&mut sampler);
    ctx.bt_key_gen(&sk, &mut sampler);
    (ctx, sk, sampler)
}

fn encrypt_bits(
    ctx: &BinFheContext,
    sk: &LweSecretKey,
    value: u64,
    width: usize,
    sampler: &mut GaussianSampler,
) -> Vec<LweCiphertext> {
    (0..width)
        .map(|i| {
            ctx.encrypt(sk, (value >> i) & 1 == 1, OutputMode::Fresh, sampler)
                .unwrap()
        })
        .collect()
}

fn decrypt_bits(ctx: &BinFheContext, sk: &LweSecretKey, bits: &[LweCiphertext]) -> u64 {
    bits.iter()
        .enumerate()
        .fold(0u64, |acc, (i, ct)| acc | (ctx.decrypt(sk, ct) as u64) << i)
}

/// One-bit full adder: (sum, carry_out), 5 gates
fn full_adder(
    ctx: &BinFheContext,
    a: &LweCiphertext,
    b: &LweCiphertext,
    carry_in: &LweCiphertext,
) -> (LweCiphertext, LweCiphertext) {
    let a_xor_b = ctx.eval_bin_gate(BinGate::Xor, a, b).unwrap();
    let sum = ctx.eval_bin_gate(BinGate::Xor, &a_xor_b, carry_in).unwrap();
    let a_and_b = ctx.eval_bin_gate(BinGate::And, a, b).unwrap();
    let propagate = ctx.eval_bin_gate(BinGate::And, &a_xor_b, carry_in).unwrap();
    let carry_out = ctx.eval_bin_gate(BinGate::Or, &a_and_b, &propagate).unwrap();
    (sum, carry_out)
}

/// Ripple-carry addition; returns width + 1 output bits
fn ripple_add(
    ctx: &BinFheContext,
    a: &[LweCiphertext],
    b: &[LweCiphertext],
) -> Vec<LweCiphertext> {
    let mut carry = ctx.eval_constant(false);
    let mut out = Vec::with_capacity(a.len() + 1);
    for (a_bit, b_bit) in a.iter().zip(b.iter()) {
        let (sum, carry_out) = full_adder(ctx, a_bit, b_bit, &carry);
        out.push(sum);
        carry = carry_out;
    }
    out.push(carry);
    out
}

#[test]
fn test_two_bit_adder_exhaustive() {
    let (ctx, sk, mut sampler) = setup(211);

    for a in 0u64..4 {
        for b in 0u64..4 {
            let a_bits = encrypt_bits(&ctx, &sk, a, 2, &mut sampler);
            let b_bits = encrypt_bits(&ctx, &sk, b, 2, &mut sampler);
            let sum = ripple_add(&ctx, &a_bits, &b_bits);
            assert_eq!(decrypt_bits(&ctx, &sk, &sum), a + b, "adder({}, {})", a, b);
        }
    }
}

#[test]
fn test_thirteen_bit_adder() {
    let (ctx, sk, mut sampler) = setup(212);

    // 65 chained gates per addition; the second case carries through
    // every bit position.
    for (a, b) in [(0b1_0101_0101_0101u64, 0b0_1010_1010_1010), (8191, 1)] {
        let a_bits = encrypt_bits(&ctx, &sk, a, 13, &mut sampler);
        let b_bits = encrypt_bits(&ctx, &sk, b, 13, &mut sampler);
        let sum = ripple_add(&ctx, &a_bits, &b_bits);
        assert_eq!(decrypt_bits(&ctx, &sk, &sum), a + b, "adder({}, {})", a, b);
    }
}

#[test]
fn test_xor_parity_chain() {
    let (ctx, sk, mut sampler) = setup(213);

    // 64 XOR gates folded into a parity accumulator
    for bits in [0x6BDF_A310_9C55_E2F4u64, u64::MAX] {
        let cts = encrypt_bits(&ctx, &sk, bits, 64, &mut sampler);
        let mut acc = ctx.eval_constant(false);
        for ct in &cts {
            acc = ctx.eval_bin_gate(BinGate::Xor, &acc, ct).unwrap();
        }

        let parity = bits.count_ones() % 2 == 1;
        assert_eq!(ctx.decrypt(&sk, &acc), parity, "parity of {:#018x}", bits);
    }
}

#[test]
fn test_majority_of_three() {
    let (ctx, sk, mut sampler) = setup(214);

    for input in 0u8..8 {
        let bit = |i: u8| (input >> i) & 1 == 1;
        let a = ctx.encrypt(&sk, bit(0), OutputMode::Fresh, &mut sampler).unwrap();
        let b = ctx.encrypt(&sk, bit(1), OutputMode::Fresh, &mut sampler).unwrap();
        let c = ctx.encrypt(&sk, bit(2), OutputMode::Fresh, &mut sampler).unwrap();

        // MAJ(a, b, c) = (a AND b) OR (c AND (a OR b))
        let a_and_b = ctx.eval_bin_gate(BinGate::And, &a, &b).unwrap();
        let a_or_b = ctx.eval_bin_gate(BinGate::Or, &a, &b).unwrap();
        let c_and = ctx.eval_bin_gate(BinGate::And, &c, &a_or_b).unwrap();
        let maj = ctx.eval_bin_gate(BinGate::Or, &a_and_b, &c_and).unwrap();

        let want = bit(0) as u8 + bit(1) as u8 + bit(2) as u8 >= 2;
        assert_eq!(ctx.decrypt(&sk, &maj), want, "majority of {:#05b}", input);
    }
}

#[test]
fn test_repeated_refresh_is_stable() {
    let (ctx, sk, mut sampler) = setup(215);

    for bit in [false, true] {
        let mut ct = ctx.encrypt(&sk, bit, OutputMode::Fresh, &mut sampler).unwrap();
        for round in 0..10 {
            ct = ctx.bootstrap(&ct).unwrap();
            assert_eq!(ctx.decrypt(&sk, &ct), bit, "round {}", round);
        }
    }
}
