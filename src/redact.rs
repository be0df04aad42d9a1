use sha2::{Digest, Sha256};

// Short stable fingerprint so emails and client addresses can be correlated
// in logs without being written out.
pub fn fingerprint(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = fingerprint("a@b.com");
        assert_eq!(a.len(), 12);
        assert_eq!(a, fingerprint("a@b.com"));
        assert_ne!(a, fingerprint("c@d.com"));
        assert!(!a.contains('@'));
    }
}
