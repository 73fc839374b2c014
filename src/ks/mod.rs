//! LWE-to-LWE key switching
//!
//! Sample extraction leaves the refreshed ciphertext under the ring secret
//! key viewed as an LWE key of dimension N. Key switching brings it back to
//! the lattice dimension n of the original key, working at the dedicated
//! switching modulus q_ks.
//!
//! # Switching key
//!
//! The switching key holds, for every source coefficient z_i, encryptions of
//! all scaled digit values under the target key:
//! ```text
//! K[i][k][v-1] = LWE_s(v · B^k · z_i)   for v in 1..B, k in 0..d
//! ```
//! where B is the decomposition base and d = ⌈log_B q_ks⌉.
//!
//! # Algorithm
//!
//! To switch (a, b) of dimension N down to dimension n:
//! 1. Start from the trivial ciphertext (0, b) of dimension n
//! 2. Decompose each mask coefficient: aᵢ = Σₖ vₖ · B^k
//! 3. Subtract K[i][k][vₖ-1] for every nonzero digit vₖ
//!
//! The subtractions cancel ⟨a, z⟩ from the body, so the result carries the
//! same phase under the target key (plus the accumulated row noise).
//!
//! # Example
//!
//! ```ignore
//! use binfhe::ks::{generate_switching_key, key_switch};
//!
//! let ksk = generate_switching_key(&ring_key.to_lwe_key(), &lwe_key, &params, &mut sampler);
//! let switched = key_switch(&ksk, &ct_at_qks);
//! ```

mod setup;
mod switch;

pub use setup::{generate_switching_key, LweSwitchingKey};
pub use switch::key_switch;
