//! Deterministic graph identifiers.
//!
//! Node ids have the form `{namespace}:{tag}:{discriminator}`. The
//! discriminator is either a sanitized natural key (a vehicle or package id
//! the upstream already assigned) or, for nodes without one, a digest of the
//! node's source artifact. Either way the id is a pure function of the
//! inputs: rebuilding from unchanged files yields the same ids, which keeps
//! graphs diffable across builds.
//!
//! The digest is **FNV-1a 64-bit** over the UTF-8 bytes of the input:
//!
//! - deterministic and cheap,
//! - 16 lowercase hex digits,
//! - **not** a security primitive. It is a stability/identity tool only.

use crate::NodeType;

/// Compute an FNV-1a 64-bit digest over arbitrary text.
pub fn fnv1a64(text: &str) -> String {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x00000100000001b3;

    let mut hash = FNV_OFFSET_BASIS;
    for b in text.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }

    format!("{hash:016x}")
}

/// Node id from a natural key (e.g. a vehicle's own inventory id).
///
/// The key is sanitized so ids stay shell- and URL-friendly regardless of
/// what the upstream put in the field.
pub fn node_id(namespace: &str, node_type: NodeType, natural_key: &str) -> String {
    format!(
        "{}:{}:{}",
        namespace,
        node_type.tag(),
        sanitize_key(natural_key)
    )
}

/// Node id for nodes without a natural key (fleet root, persona, UI set):
/// the discriminator is the digest of the source artifact identifier.
pub fn node_id_from_source(namespace: &str, node_type: NodeType, source: &str) -> String {
    format!("{}:{}:{}", namespace, node_type.tag(), fnv1a64(source))
}

/// Edge id, deterministic from its endpoints.
pub fn edge_id(from: &str, to: &str) -> String {
    format!("{from}->{to}")
}

/// Lowercase a key and collapse anything outside `[a-z0-9._-]` to `-`.
pub fn sanitize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
