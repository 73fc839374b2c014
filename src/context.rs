//! Boolean FHE context
//!
//! [`BinFheContext`] ties the layers together: it owns the parameter set
//! and NTT tables, tracks the evaluation key, and exposes the user-facing
//! operations (key generation, encryption, gate evaluation, refreshing,
//! sign extraction).
//!
//! The context moves through three states. Construction validates the
//! parameters; `bt_key_gen` or `bt_key_load` installs the evaluation key;
//! `clear_bt_keys` drops back to the key-less state. Operations that need
//! the evaluation key return [`FheError::MissingEvalKey`] until one is
//! installed. Secret keys are handed to the caller and never stored here.
//!
//! # Example
//!
//! ```no_run
//! use binfhe::{BinFheContext, BinGate, BootstrapMethod, GaussianSampler, OutputMode, ParamSet};
//!
//! let mut ctx = BinFheContext::with_param_set(ParamSet::Std128, BootstrapMethod::Ginx)?;
//! let mut sampler = GaussianSampler::new(ctx.params().sigma);
//!
//! let sk = ctx.key_gen(&mut sampler);
//! ctx.bt_key_gen(&sk, &mut sampler);
//!
//! let ct1 = ctx.encrypt(&sk, true, OutputMode::Bootstrapped, &mut sampler)?;
//! let ct2 = ctx.encrypt(&sk, false, OutputMode::Bootstrapped, &mut sampler)?;
//! let ct_and = ctx.eval_bin_gate(BinGate::And, &ct1, &ct2)?;
//! assert!(!ctx.decrypt(&sk, &ct_and));
//! # Ok::<(), binfhe::FheError>(())
//! ```

use std::sync::Arc;

use crate::bootstrap::{bootstrap_core, BlindRotationKey, EvalKey, TestVector};
use crate::error::{invalid_params, FheError, Result};
use crate::gates::{combine, BinGate};
use crate::ks::{generate_switching_key, LweSwitchingKey};
use crate::lwe::{LweCiphertext, LweSecretKey};
use crate::math::{GaussianSampler, NttContext};
use crate::params::{BinFheParams, BootstrapMethod, ParamSet};
use crate::rlwe::RlweSecretKey;

use serde::{Deserialize, Serialize};

/// Freshness of ciphertexts produced by `encrypt`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    /// Return the raw encryption
    Fresh,
    /// Refresh once before returning, so the noise level matches gate
    /// outputs regardless of what the caller composes next
    #[default]
    Bootstrapped,
}

/// Boolean FHE orchestrator
///
/// Cheap to clone; parameter and NTT tables are shared, the evaluation
/// key is duplicated.
#[derive(Clone)]
pub struct BinFheContext {
    params: Arc<BinFheParams>,
    ntt: Arc<NttContext>,
    eval_key: Option<EvalKey>,
}

impl BinFheContext {
    /// Build a context from explicit parameters
    pub fn new(params: BinFheParams) -> Result<Self> {
        params.validate()?;
        let ntt = NttContext::new(params.ring_dim, params.big_q);
        Ok(Self {
            params: Arc::new(params),
            ntt: Arc::new(ntt),
            eval_key: None,
        })
    }

    /// Build a context from a named parameter set
    pub fn with_param_set(set: ParamSet, method: BootstrapMethod) -> Result<Self> {
        Self::new(BinFheParams::new(set, method)?)
    }

    /// Parameter set this context was built with
    pub fn params(&self) -> &BinFheParams {
        &self.params
    }

    /// Generate the LWE secret key (dimension n)
    pub fn key_gen(&self, sampler: &mut GaussianSampler) -> LweSecretKey {
        LweSecretKey::generate(self.params.n, self.params.key_dist, sampler)
    }

    /// Generate a ring secret key (dimension N)
    ///
    /// `bt_key_gen` creates its own ring key internally; this entry point
    /// exists for callers that want to inspect accumulator-level
    /// ciphertexts or drive `key_switch_gen` themselves.
    pub fn key_gen_ring(&self, sampler: &mut GaussianSampler) -> RlweSecretKey {
        RlweSecretKey::generate(self.params.ring_dim, self.params.key_dist, sampler)
    }

    /// Generate and install the evaluation key for `sk`
    ///
    /// A throwaway ring key is generated internally; it gets encrypted
    /// into the blind-rotation and switching keys and is dropped before
    /// returning. The installed key is also handed back for persistence.
    pub fn bt_key_gen(
        &mut self,
        sk: &LweSecretKey,
        sampler: &mut GaussianSampler,
    ) -> &EvalKey {
        let sk_ring = self.key_gen_ring(sampler);
        let ek = EvalKey::generate(&self.params, sk, &sk_ring, sampler, &self.ntt);
        self.eval_key.insert(ek)
    }

    /// Install a previously generated evaluation key
    ///
    /// The key must match this context's method and dimensions.
    pub fn bt_key_load(&mut self, key: EvalKey) -> Result<()> {
        if key.bs_key.method() != self.params.method {
            return Err(FheError::KeyMismatch(format!(
                "evaluation key was generated for {:?}, context uses {:?}",
                key.bs_key.method(),
                self.params.method
            )));
        }
        if key.bs_key.dimension() != self.params.n
            || key.bs_key.ring_dim() != self.params.ring_dim
        {
            return Err(FheError::KeyMismatch(format!(
                "blind-rotation key covers n = {}, N = {}; context needs n = {}, N = {}",
                key.bs_key.dimension(),
                key.bs_key.ring_dim(),
                self.params.n,
                self.params.ring_dim
            )));
        }
        if key.ks_key.dimension_in() != self.params.ring_dim
            || key.ks_key.dimension_out() != self.params.n
            || key.ks_key.modulus() != self.params.q_ks
        {
            return Err(FheError::KeyMismatch(format!(
                "switching key maps {} -> {} at modulus {}; context needs {} -> {} at {}",
                key.ks_key.dimension_in(),
                key.ks_key.dimension_out(),
                key.ks_key.modulus(),
                self.params.ring_dim,
                self.params.n,
                self.params.q_ks
            )));
        }
        self.eval_key = Some(key);
        Ok(())
    }

    /// Drop the installed evaluation key
    pub fn clear_bt_keys(&mut self) {
        self.eval_key = None;
    }

    /// Installed evaluation key, if any
    pub fn eval_key(&self) -> Option<&EvalKey> {
        self.eval_key.as_ref()
    }

    /// Blind-rotation half of the evaluation key
    pub fn refresh_key(&self) -> Option<&BlindRotationKey> {
        self.eval_key.as_ref().map(|ek| &ek.bs_key)
    }

    /// Key-switching half of the evaluation key
    pub fn switch_key(&self) -> Option<&LweSwitchingKey> {
        self.eval_key.as_ref().map(|ek| &ek.ks_key)
    }

    /// Generate a standalone switching key from `sk_ring` down to `sk`
    pub fn key_switch_gen(
        &self,
        sk: &LweSecretKey,
        sk_ring: &RlweSecretKey,
        sampler: &mut GaussianSampler,
    ) -> LweSwitchingKey {
        generate_switching_key(&sk_ring.to_lwe_key(), sk, &self.params, sampler)
    }

    /// Encrypt one bit
    ///
    /// `OutputMode::Bootstrapped` refreshes the fresh encryption once and
    /// therefore needs the evaluation key.
    pub fn encrypt(
        &self,
        sk: &LweSecretKey,
        bit: bool,
        mode: OutputMode,
        sampler: &mut GaussianSampler,
    ) -> Result<LweCiphertext> {
        let ct = LweCiphertext::encrypt_bool(sk, bit, self.params.q, sampler);
        match mode {
            OutputMode::Fresh => Ok(ct),
            OutputMode::Bootstrapped => self.bootstrap(&ct),
        }
    }

    /// Encrypt a value from Z_p (p ≥ 2, at most q/8 so slots keep a
    /// usable noise margin)
    pub fn encrypt_mod(
        &self,
        sk: &LweSecretKey,
        message: u64,
        p: u64,
        sampler: &mut GaussianSampler,
    ) -> Result<LweCiphertext> {
        self.check_plaintext_modulus(p)?;
        if message >= p {
            return Err(invalid_params!(
                "message {} out of range for plaintext modulus {}",
                message,
                p
            ));
        }
        Ok(LweCiphertext::encrypt(sk, message, p, self.params.q, sampler))
    }

    /// Decrypt one bit
    pub fn decrypt(&self, sk: &LweSecretKey, ct: &LweCiphertext) -> bool {
        ct.decrypt_bool(sk)
    }

    /// Decrypt a value from Z_p
    pub fn decrypt_mod(&self, sk: &LweSecretKey, ct: &LweCiphertext, p: u64) -> u64 {
        ct.decrypt(sk, p)
    }

    /// Noiseless encryption of a value from Z_p; decrypts under any key
    pub fn trivial_encrypt(&self, message: u64, p: u64) -> Result<LweCiphertext> {
        self.check_plaintext_modulus(p)?;
        Ok(LweCiphertext::trivial_encrypt(
            self.params.n,
            message,
            p,
            self.params.q,
        ))
    }

    /// Boolean constant as a noiseless ciphertext
    pub fn eval_constant(&self, bit: bool) -> LweCiphertext {
        LweCiphertext::trivial_encrypt(self.params.n, bit as u64, 4, self.params.q)
    }

    /// Evaluate a two-input Boolean gate with one bootstrap
    ///
    /// The inputs must be independent ciphertexts; feeding the same
    /// ciphertext twice makes the noise terms cancel instead of average
    /// and silently corrupts the phase analysis, so it is rejected.
    /// Use `bootstrap` plus `eval_not` to square a bit if needed.
    pub fn eval_bin_gate(
        &self,
        gate: BinGate,
        ct1: &LweCiphertext,
        ct2: &LweCiphertext,
    ) -> Result<LweCiphertext> {
        let ek = self.eval_key.as_ref().ok_or(FheError::MissingEvalKey)?;
        if ct1 == ct2 {
            return Err(FheError::AliasedGateInputs);
        }
        let combined = combine(gate, ct1, ct2);
        let tv = TestVector::boolean(&self.params);
        Ok(bootstrap_core(ek, &tv, &combined, &self.params, &self.ntt))
    }

    /// Refresh a Boolean ciphertext without changing its plaintext
    ///
    /// Shifts the phase by -q/8 so both bit values sit centered inside
    /// the step function's half-planes, then runs the standard pipeline.
    pub fn bootstrap(&self, ct: &LweCiphertext) -> Result<LweCiphertext> {
        let ek = self.eval_key.as_ref().ok_or(FheError::MissingEvalKey)?;
        let q = self.params.q;
        let shifted = ct.add_scalar(q - q / 8);
        let tv = TestVector::boolean(&self.params);
        Ok(bootstrap_core(ek, &tv, &shifted, &self.params, &self.ntt))
    }

    /// Boolean NOT; key-free and noise-free
    pub fn eval_not(&self, ct: &LweCiphertext) -> LweCiphertext {
        ct.eval_not()
    }

    /// Most significant bit of a Z_p plaintext, as a Boolean ciphertext
    ///
    /// Returns an encryption of `m >= p/2`. A half-slot shift moves every
    /// slot center off the half-plane boundaries before the rotation, so
    /// each slot keeps a symmetric q/(2p) noise margin.
    pub fn eval_sign(&self, ct: &LweCiphertext, p: u64) -> Result<LweCiphertext> {
        let ek = self.eval_key.as_ref().ok_or(FheError::MissingEvalKey)?;
        self.check_plaintext_modulus(p)?;
        let shifted = ct.add_scalar(self.params.delta(p) / 2);
        let tv = TestVector::sign(&self.params);
        Ok(bootstrap_core(ek, &tv, &shifted, &self.params, &self.ntt))
    }

    fn check_plaintext_modulus(&self, p: u64) -> Result<()> {
        if p < 2 || p > self.params.q / 8 {
            return Err(invalid_params!(
                "plaintext modulus {} outside [2, q/8 = {}]",
                p,
                self.params.q / 8
            ));
        }
        Ok(())
    }
}
