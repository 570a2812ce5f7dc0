//! Full pipeline at the default 512/160 sizes

use dsa_core::arith::fast_mod_exp;
use dsa_core::hash::Sha1;
use dsa_core::{
    generate_domain_parameters, generate_key_pair, sign, verify, verify_with_digest, DsaConfig,
    Signature, Verification, DEFAULT_MESSAGE,
};
use num_traits::One;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_sign_and_verify_default_message() {
    init_tracing();
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    let config = DsaConfig::default();

    let params = generate_domain_parameters(&config, &mut rng).unwrap();
    assert_eq!(params.l_bits(), 512);
    assert_eq!(params.n_bits(), 160);
    assert!(!params.g.is_one());
    assert!(fast_mod_exp(&params.g, &params.q, &params.p).is_one());
    params.validate(20, &mut rng).unwrap();

    let keys = generate_key_pair(&params, &mut rng).unwrap();
    let message = DEFAULT_MESSAGE.as_bytes();
    let signature = sign(message, &params, &keys.private, &mut rng).unwrap();
    assert!(verify(message, &signature, &params, &keys.public));

    let tampered = Signature::new(signature.r.clone(), &signature.s + 1u32);
    assert!(!verify(message, &tampered, &params, &keys.public));
    assert_ne!(
        verify_with_digest::<Sha1>(message, &tampered, &params, &keys.public),
        Verification::Valid
    );
}

#[test]
fn test_seeded_pipeline_is_reproducible() {
    init_tracing();
    let config = DsaConfig::new(256, 64).unwrap();

    let run = |seed: u64| {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let params = generate_domain_parameters(&config, &mut rng).unwrap();
        let keys = generate_key_pair(&params, &mut rng).unwrap();
        let signature = sign(b"reproducible", &params, &keys.private, &mut rng).unwrap();
        (params, keys.public, signature)
    };

    assert_eq!(run(7), run(7));
    assert_ne!(run(7).0, run(8).0);
}

#[test]
fn test_parameters_survive_json() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let config = DsaConfig::new(256, 64).unwrap();
    let params = generate_domain_parameters(&config, &mut rng).unwrap();
    let keys = generate_key_pair(&params, &mut rng).unwrap();
    let signature = sign(b"json", &params, &keys.private, &mut rng).unwrap();

    let params_back = serde_json::from_str(&serde_json::to_string(&params).unwrap()).unwrap();
    let public_back = serde_json::from_str(&serde_json::to_string(&keys.public).unwrap()).unwrap();
    let signature_back: Signature =
        serde_json::from_str(&serde_json::to_string(&signature).unwrap()).unwrap();

    assert!(verify(b"json", &signature_back, &params_back, &public_back));
}
