//! Fuzz target for challenge countersigning.
//!
//! A countersigner fed arbitrary text must never produce a signed
//! envelope unless the expected server really signed the input.
//!
//! ## Running
//!
//! ```bash
//! cd crates/mobius-auth
//! cargo +nightly fuzz run fuzz_countersign
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use mobius_auth::{codec, verifier, ChallengeCountersigner, KeyPair, Network};

/// Fuzz input structure for countersigning.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    /// Seed of the server the client expects
    server_seed: [u8; 32],
    /// Seed of the countersigning user
    user_seed: [u8; 32],
    /// Candidate challenge text
    challenge: String,
}

fuzz_target!(|input: FuzzInput| {
    let server = KeyPair::from_seed(input.server_seed);
    let user = KeyPair::from_seed(input.user_seed);
    let network = Network::testnet();
    let countersigner = ChallengeCountersigner::new(network.clone());

    if let Ok(signed) = countersigner.countersign(&user, &input.challenge, &server.public_key()) {
        let envelope = codec::decode(&signed).expect("countersigned output must decode");
        assert!(verifier::verify(&envelope, &server.public_key(), &network));
        assert!(verifier::verify(&envelope, &user.public_key(), &network));
    }
});
