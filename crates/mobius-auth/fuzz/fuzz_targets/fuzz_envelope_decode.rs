//! Fuzz target for envelope decoding.
//!
//! Decoding must never panic, and any accepted text must re-encode to
//! exactly the same text.
//!
//! ## Running
//!
//! ```bash
//! cd crates/mobius-auth
//! cargo +nightly fuzz run fuzz_envelope_decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use mobius_auth::codec;

fuzz_target!(|text: &str| {
    if let Ok(envelope) = codec::decode(text) {
        let encoded = codec::encode(&envelope).expect("decoded envelope must re-encode");
        assert_eq!(encoded, text);

        // Hashing a decoded envelope should never fail
        let network = mobius_auth::Network::testnet();
        assert!(codec::hash(&envelope, &network).is_ok());
    }
});
