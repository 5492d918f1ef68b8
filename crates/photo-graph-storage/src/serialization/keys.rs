//! Compound key formatting.

use super::error::SerializationError;

const SEPARATOR: u8 = 0x00;

fn pair_key(first: &str, second: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(first.len() + second.len() + 1);
    key.extend_from_slice(first.as_bytes());
    key.push(SEPARATOR);
    key.extend_from_slice(second.as_bytes());
    key
}

/// Key of a canonical edge: `source \0 target`.
///
/// Byte order of these keys equals `(source, target)` string order.
pub fn edge_key(source: &str, target: &str) -> Vec<u8> {
    pair_key(source, target)
}

/// Key of one adjacency entry: `identity \0 neighbour`.
pub fn adjacency_key(identity: &str, neighbor: &str) -> Vec<u8> {
    pair_key(identity, neighbor)
}

/// Every adjacency key of `identity` starts with this prefix.
pub fn adjacency_prefix(identity: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(identity.len() + 1);
    prefix.extend_from_slice(identity.as_bytes());
    prefix.push(SEPARATOR);
    prefix
}

/// Splits an edge or adjacency key into its two identities.
pub fn split_pair_key(key: &[u8]) -> Result<(String, String), SerializationError> {
    let pos = key
        .iter()
        .position(|b| *b == SEPARATOR)
        .ok_or_else(|| SerializationError::MalformedKey(format!("no separator in {:?}", key)))?;

    let decode = |bytes: &[u8]| {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| SerializationError::MalformedKey(e.to_string()))
    };
    Ok((decode(&key[..pos])?, decode(&key[pos + 1..])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pair_key() {
        let key = edge_key("img1.jpg", "img2.jpg");
        assert_eq!(
            split_pair_key(&key).unwrap(),
            ("img1.jpg".to_string(), "img2.jpg".to_string())
        );
    }

    #[test]
    fn test_key_order_matches_tuple_order() {
        // "a" < "ab", so every pair starting at "a" sorts first
        let mut keys = vec![edge_key("ab", "c"), edge_key("a", "z"), edge_key("a", "b")];
        keys.sort();
        assert_eq!(keys[0], edge_key("a", "b"));
        assert_eq!(keys[1], edge_key("a", "z"));
        assert_eq!(keys[2], edge_key("ab", "c"));
    }

    #[test]
    fn test_prefix_does_not_match_longer_identity() {
        let prefix = adjacency_prefix("a");
        assert!(adjacency_key("a", "b").starts_with(&prefix));
        assert!(!adjacency_key("ab", "c").starts_with(&prefix));
    }

    #[test]
    fn test_malformed_key() {
        assert!(matches!(
            split_pair_key(b"noseparator"),
            Err(SerializationError::MalformedKey(_))
        ));
    }
}
