//! Commit-reveal coin flip between two peers.
//!
//! The challenger publishes `commit(A)`, the acceptor answers with its own
//! secret `B`, then the challenger reveals `A`. Both sides evaluate
//! [`coin_flip`] over the same pair. The commitment is modular squaring and
//! is not cryptographically binding; it only catches a peer that changes its
//! secret mid-handshake.

/// Private value chosen by one peer.
pub type Secret = u16;

/// Value published ahead of a secret.
pub type Commitment = u16;

/// Public modulus shared by every node.
pub const PUBLIC_KEY: u16 = 0xBEEF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CoinOutcome {
    Heads,
    Tails,
}

/// Commitment for `secret`: its square modulo [`PUBLIC_KEY`].
pub const fn commit(secret: Secret) -> Commitment {
    let wide = secret as u32;
    ((wide * wide) % PUBLIC_KEY as u32) as Commitment
}

pub const fn verify(secret: Secret, commitment: Commitment) -> bool {
    commit(secret) == commitment
}

/// Heads when `a ^ b` has an odd number of set bits.
pub const fn coin_flip(a: Secret, b: Secret) -> CoinOutcome {
    if (a ^ b).count_ones() % 2 == 1 {
        CoinOutcome::Heads
    } else {
        CoinOutcome::Tails
    }
}

/// Acceptor-side cheat: recover the smallest secret matching `commitment` by
/// exhaustive search and answer with a `B` that makes that secret flip heads.
///
/// Returns `None` when no 16-bit secret squares to `commitment`.
pub fn generate_b_given_hash(commitment: Commitment) -> Option<Secret> {
    (0..=Secret::MAX)
        .find(|&candidate| commit(candidate) == commitment)
        .map(|a| a ^ 1)
}

/// Challenger-side cheat: given the acceptor's `B`, a secret that flips heads.
pub const fn generate_a_given_b(b: Secret) -> Secret {
    b ^ 1
}
