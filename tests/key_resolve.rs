//! Tests for resolving `did:key` DIDs into DID documents.

use base64ct::{Base64UrlUnpadded, Encoding};
use credibil_didkey::codec::{self, ED25519_CODEC, X25519_CODEC};
use credibil_didkey::{
    AlgName, ContentType, Curve, DID_CONTEXT, JWS_2020_CONTEXT, KeyType, MethodType, Options,
    PublicKeyFormat, Resolved, Resolver, X25519_2019_CONTEXT, driver,
};
use insta::assert_json_snapshot as assert_snapshot;

const ED25519_DID: &str = "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";
const X25519_MULTIBASE: &str = "z6LSj72tK8brWgZja8NLRwPigth2T9QRiG1uH9oKZuKjdh9p";
const SECP256K1_DID: &str = "did:key:zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme";
const P256_DID: &str = "did:key:zDnaerDaTF5BXEavCrfRZEk316dpbLsfPDZ3WJ5hRTPFU2169";

fn resolve(did: &str) -> Resolved {
    let resolver = Resolver::new(driver(AlgName::EdDsa).resolver_registry());
    resolver.resolve(did, &Options::default())
}

// Test the happy path of resolving an Ed25519 DID.
#[test]
fn ed25519() {
    let resolved = resolve(ED25519_DID);
    assert_eq!(resolved.did_resolution_metadata.content_type, Some(ContentType::DidLdJson));
    assert_eq!(resolved.did_resolution_metadata.error, None);

    let document = resolved.did_document.expect("should resolve");
    assert_eq!(document.id, ED25519_DID);
    assert_eq!(document.context, [DID_CONTEXT, JWS_2020_CONTEXT, X25519_2019_CONTEXT]);

    // single verification method referenced by every relationship
    let kid = format!("{ED25519_DID}#{}", &ED25519_DID[8..]);
    assert_eq!(document.verification_method.len(), 1);
    let vm = &document.verification_method[0];
    assert_eq!(vm.id, kid);
    assert_eq!(vm.type_, MethodType::JsonWebKey2020);
    assert_eq!(vm.controller, ED25519_DID);

    let PublicKeyFormat::PublicKeyJwk { public_key_jwk } = &vm.key else {
        panic!("should be a JWK");
    };
    let public_key = codec::decode(&ED25519_CODEC, &ED25519_DID[8..]).expect("should decode");
    assert_eq!(public_key_jwk.kty, KeyType::Okp);
    assert_eq!(public_key_jwk.crv, Curve::Ed25519);
    assert_eq!(public_key_jwk.x, Base64UrlUnpadded::encode_string(&public_key));
    assert_eq!(public_key_jwk.y, None);

    for relationship in [
        &document.authentication,
        &document.assertion_method,
        &document.capability_delegation,
        &document.capability_invocation,
    ] {
        assert_eq!(relationship, &vec![kid.clone()]);
    }

    // derived X25519 key agreement key
    let key_agreement = document.key_agreement.expect("should have key agreement");
    assert_eq!(key_agreement.len(), 1);
    assert_eq!(key_agreement[0].id, format!("{ED25519_DID}#{X25519_MULTIBASE}"));
    assert_eq!(key_agreement[0].type_, MethodType::X25519KeyAgreementKey2019);
    assert_eq!(key_agreement[0].controller, ED25519_DID);

    let x25519 = codec::decode(&X25519_CODEC, X25519_MULTIBASE).expect("should decode");
    assert_eq!(
        key_agreement[0].key,
        PublicKeyFormat::PublicKeyBase58 {
            public_key_base58: codec::base58(&x25519)
        }
    );
}

#[test]
fn secp256k1() {
    let document = resolve(SECP256K1_DID).did_document.expect("should resolve");
    assert_eq!(document.context, [DID_CONTEXT, JWS_2020_CONTEXT]);
    assert!(document.key_agreement.is_none());

    let PublicKeyFormat::PublicKeyJwk { public_key_jwk } = &document.verification_method[0].key
    else {
        panic!("should be a JWK");
    };
    assert_eq!(public_key_jwk.kty, KeyType::Ec);
    assert_eq!(public_key_jwk.crv, Curve::Secp256k1);
    assert!(public_key_jwk.y.is_some());
}

#[test]
fn p256() {
    let document = resolve(P256_DID).did_document.expect("should resolve");
    assert_eq!(document.context, [DID_CONTEXT, JWS_2020_CONTEXT]);
    assert!(document.key_agreement.is_none());

    let PublicKeyFormat::PublicKeyJwk { public_key_jwk } = &document.verification_method[0].key
    else {
        panic!("should be a JWK");
    };
    assert_eq!(public_key_jwk.kty, KeyType::Ec);
    assert_eq!(public_key_jwk.crv, Curve::P256);

    let value = serde_json::to_value(public_key_jwk).expect("should serialize");
    assert_eq!(value["crv"], "P-256");
}

// Document members are written in a fixed order.
#[test]
fn member_order() {
    let resolved = resolve(ED25519_DID);
    let json = serde_json::to_string(&resolved.did_document).expect("should serialize");

    let members = [
        "\"@context\"",
        "\"id\"",
        "\"verificationMethod\"",
        "\"authentication\"",
        "\"assertionMethod\"",
        "\"capabilityDelegation\"",
        "\"capabilityInvocation\"",
        "\"keyAgreement\"",
    ];
    let positions: Vec<usize> =
        members.iter().map(|m| json.find(m).expect("should have member")).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
}

#[test]
fn method_not_supported() {
    assert_snapshot!(resolve_key("did:hoge:1234"), @r#"
    {
      "didResolutionMetadata": {
        "error": "methodNotSupported",
        "message": "The method must be \"key\", but \"hoge\""
      },
      "didDocumentMetadata": {},
      "didDocument": null
    }
    "#);
}

#[test]
fn unsupported_key_type() {
    let resolved = resolve("did:key:invalidtoken");
    assert_eq!(
        resolved.did_resolution_metadata.error.as_deref(),
        Some("unsupportedPublicKeyType")
    );
    assert!(resolved.did_resolution_metadata.message.is_some());
    assert!(resolved.did_document.is_none());
}

#[test]
fn wrong_length_key() {
    // The textual prefix depends on the key length, so a short key no longer
    // starts with `z6Mk` and is rejected before its length is checked.
    for len in [16, 31, 33] {
        let multibase = codec::encode(&ED25519_CODEC, &vec![1; len]);
        assert!(!multibase.starts_with("z6Mk"), "{multibase}");

        let resolved = resolve(&format!("did:key:{multibase}"));
        assert_eq!(
            resolved.did_resolution_metadata.error.as_deref(),
            Some("unsupportedPublicKeyType"),
            "{len}"
        );
    }
}

#[test]
fn not_base58() {
    let resolved = resolve("did:key:z6Mk0OIl");
    assert_eq!(resolved.did_resolution_metadata.error.as_deref(), Some("internalError"));
    assert!(resolved.did_document.is_none());
}

// Resolution is stateless: repeated calls give the same result.
#[test]
fn idempotent() {
    for did in [ED25519_DID, SECP256K1_DID, P256_DID, "did:key:invalidtoken"] {
        assert_eq!(resolve(did), resolve(did));
    }
}

// Round-trip through resolution for freshly generated keys of each scheme.
#[test]
fn generated() {
    for alg in [AlgName::EdDsa, AlgName::Es256K, AlgName::Es256] {
        let driver = driver(alg);
        let key_pair = driver.generate_key_pair();
        let did = driver.did_from_public_key(&key_pair.public_key);

        let document = resolve(&did).did_document.expect("should resolve");
        assert_eq!(document.id, did);
        assert_eq!(document.key_agreement.is_some(), alg == AlgName::EdDsa);
    }
}

// The `did:key` resolver is used directly, without a `Resolver`.
fn resolve_key(did: &str) -> Resolved {
    use std::str::FromStr;

    let parsed = credibil_didkey::ParsedDid::from_str(did).expect("should parse");
    credibil_didkey::key::resolve(did, &parsed, &Resolver::default(), &Options::default())
}
