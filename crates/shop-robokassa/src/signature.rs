//! # Robokassa Signatures
//!
//! Signature = hex digest of the parameter values, ordered by parameter
//! name, joined with `:`, followed by `:<secret>`.
//!
//! MD5 is what the gateway's legacy protocol expects. SHA-256 is available
//! for merchant accounts configured for it. The digest is a compatibility
//! setting, not a security boundary.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Digest used for gateway signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl SignatureAlgorithm {
    fn digest_hex(self, input: &[u8]) -> String {
        match self {
            SignatureAlgorithm::Md5 => hex::encode(Md5::digest(input)),
            SignatureAlgorithm::Sha256 => hex::encode(Sha256::digest(input)),
        }
    }
}

impl std::str::FromStr for SignatureAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(SignatureAlgorithm::Md5),
            "sha256" => Ok(SignatureAlgorithm::Sha256),
            other => Err(format!("unsupported signature algorithm: {other}")),
        }
    }
}

/// Canonical string that gets digested: sorted values, then the secret
fn signing_input<'a, I>(params: I, secret: &str) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let sorted: BTreeMap<&str, &str> = params.into_iter().collect();
    let mut parts: Vec<&str> = sorted.into_values().collect();
    parts.push(secret);
    parts.join(":")
}

/// Compute the lowercase hex signature over `params` with `secret`
pub fn sign<'a, I>(params: I, secret: &str, algorithm: SignatureAlgorithm) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    algorithm.digest_hex(signing_input(params, secret).as_bytes())
}

/// Check a provided signature (case-insensitive hex)
pub fn verify<'a, I>(
    params: I,
    secret: &str,
    algorithm: SignatureAlgorithm,
    provided: &str,
) -> bool
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let expected = sign(params, secret, algorithm);
    constant_time_compare(&expected, &provided.to_ascii_lowercase())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_signing_input_sorted() {
        let input = signing_input([("OutSum", "100"), ("InvId", "ORD-1-abc")], "secret");
        assert_eq!(input, "ORD-1-abc:100:secret");
    }

    #[test]
    fn test_known_md5() {
        // md5("ORD-1-abc:100:secret")
        let expected = hex::encode(Md5::digest(b"ORD-1-abc:100:secret"));
        let sig = sign(
            [("OutSum", "100"), ("InvId", "ORD-1-abc")],
            "secret",
            SignatureAlgorithm::Md5,
        );
        assert_eq!(sig, expected);
        assert_eq!(sig.len(), 32);
    }

    #[test]
    fn test_deterministic_regardless_of_order() {
        let mut a = HashMap::new();
        a.insert("OutSum", "100");
        a.insert("InvId", "ORD-1-abc");

        let mut b = HashMap::new();
        b.insert("InvId", "ORD-1-abc");
        b.insert("OutSum", "100");

        let sig_a = sign(a.iter().map(|(k, v)| (*k, *v)), "secret", SignatureAlgorithm::Md5);
        let sig_b = sign(b.iter().map(|(k, v)| (*k, *v)), "secret", SignatureAlgorithm::Md5);
        let sig_c = sign(
            [("InvId", "ORD-1-abc"), ("OutSum", "100")],
            "secret",
            SignatureAlgorithm::Md5,
        );
        assert_eq!(sig_a, sig_b);
        assert_eq!(sig_a, sig_c);
    }

    #[test]
    fn test_verify_case_insensitive() {
        let params = [("OutSum", "1998"), ("InvId", "ORD-1-0a1b2c3d")];
        let sig = sign(params, "pass2", SignatureAlgorithm::Md5);

        assert!(verify(params, "pass2", SignatureAlgorithm::Md5, &sig));
        assert!(verify(params, "pass2", SignatureAlgorithm::Md5, &sig.to_uppercase()));
        assert!(!verify(params, "pass1", SignatureAlgorithm::Md5, &sig));
        assert!(!verify(params, "pass2", SignatureAlgorithm::Md5, ""));
    }

    #[test]
    fn test_sha256() {
        let sig = sign([("InvId", "1")], "s", SignatureAlgorithm::Sha256);
        assert_eq!(sig.len(), 64);
        assert_ne!(sig, sign([("InvId", "1")], "s", SignatureAlgorithm::Md5));
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("MD5".parse::<SignatureAlgorithm>().unwrap(), SignatureAlgorithm::Md5);
        assert_eq!("sha256".parse::<SignatureAlgorithm>().unwrap(), SignatureAlgorithm::Sha256);
        assert!("sha1".parse::<SignatureAlgorithm>().is_err());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
