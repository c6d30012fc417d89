//! # Mobius-Auth Benchmarks
//!
//! Cost of each protocol leg and of the codec underneath them:
//!
//! | Operation | Work |
//! |-----------|------|
//! | issue | ephemeral keygen, 1 sign, encode |
//! | countersign | decode, 1 verify, 1 sign, encode |
//! | validate | decode, 2 verifies |
//! | decode | base64, checksum, bincode |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use mobius_auth::{
    codec, AuthConfig, ChallengeCountersigner, ChallengeIssuer, TokenValidator,
};
use shared_crypto::KeyPair;

// ============================================================================
// Protocol Legs
// ============================================================================

fn bench_protocol_legs(c: &mut Criterion) {
    let mut group = c.benchmark_group("mobius-auth-legs");
    group.measurement_time(Duration::from_secs(5));

    let config = AuthConfig::default();
    let server = KeyPair::generate();
    let user = KeyPair::generate();
    let issuer = ChallengeIssuer::new(&config);
    let countersigner = ChallengeCountersigner::new(config.network.clone());

    let challenge = issuer.issue(&server).expect("issue");
    let signed = countersigner
        .countersign(&user, &challenge, &server.public_key())
        .expect("countersign");

    group.bench_function("issue", |b| {
        b.iter(|| black_box(issuer.issue(&server).expect("issue")))
    });

    group.bench_function("countersign", |b| {
        b.iter(|| {
            black_box(
                countersigner
                    .countersign(&user, black_box(&challenge), &server.public_key())
                    .expect("countersign"),
            )
        })
    });

    group.bench_function("validate_strict", |b| {
        b.iter(|| {
            let validator =
                TokenValidator::new(&server, black_box(&signed), user.public_key(), &config)
                    .expect("decode");
            black_box(validator.validate(true).is_ok())
        })
    });

    group.finish();
}

// ============================================================================
// Codec
// ============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("mobius-auth-codec");

    let config = AuthConfig::default();
    let server = KeyPair::generate();
    let issuer = ChallengeIssuer::new(&config);
    let challenge = issuer.issue(&server).expect("issue");
    let envelope = codec::decode(&challenge).expect("decode");

    group.throughput(Throughput::Bytes(challenge.len() as u64));
    group.bench_function("decode", |b| {
        b.iter(|| black_box(codec::decode(black_box(&challenge)).expect("decode")))
    });
    group.bench_function("encode", |b| {
        b.iter(|| black_box(codec::encode(black_box(&envelope)).expect("encode")))
    });

    group.bench_function("hash", |b| {
        b.iter(|| black_box(codec::hash(black_box(&envelope), &config.network).expect("hash")))
    });

    // Decode cost as signatures accumulate
    for signers in [1usize, 2, 8, 20] {
        let mut envelope = envelope.clone();
        for _ in 1..signers {
            codec::sign(&mut envelope, &KeyPair::generate(), &config.network).expect("sign");
        }
        let text = codec::encode(&envelope).expect("encode");

        group.bench_with_input(BenchmarkId::new("decode_signers", signers), &text, |b, text| {
            b.iter(|| black_box(codec::decode(text).expect("decode")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_protocol_legs, bench_codec);
criterion_main!(benches);
