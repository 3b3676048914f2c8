use rand::Rng;

use crate::types::RecordKind;

/// URL-safe alphabet; 64 symbols so each character carries 6 bits.
const ALPHABET: &[u8; 64] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// 22 symbols × 6 bits = 132 bits of entropy.
pub const ID_BODY_LEN: usize = 22;

/// Generate a fresh opaque id for `kind`, e.g. `t_V1StGXR8_Z5jdHi6B-myTq`.
pub fn generate_id(kind: RecordKind) -> String {
    let prefix = kind.id_prefix();
    let mut rng = rand::rng();
    let mut id = String::with_capacity(prefix.len() + ID_BODY_LEN);
    id.push_str(prefix);
    for _ in 0..ID_BODY_LEN {
        let idx = rng.random_range(0..ALPHABET.len());
        id.push(char::from(ALPHABET[idx]));
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_carry_kind_prefix_and_fixed_length() {
        let id = generate_id(RecordKind::Task);
        assert!(id.starts_with("t_"));
        assert_eq!(id.len(), 2 + ID_BODY_LEN);
        assert!(id[2..].bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000)
            .map(|_| generate_id(RecordKind::Contact))
            .collect();
        assert_eq!(ids.len(), 1000);
    }
}
