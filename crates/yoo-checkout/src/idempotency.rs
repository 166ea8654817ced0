use std::fmt;

/// Opaque key sent as `Idempotence-Key` on create, capture and cancel calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotenceKey(String);

impl IdempotenceKey {
    /// Fresh random key (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Use the caller's key when given, otherwise generate one.
    pub fn resolve(supplied: Option<&str>) -> Self {
        match supplied {
            Some(key) => Self(key.to_string()),
            None => Self::generate(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for IdempotenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_keys_are_unique() {
        let keys: HashSet<IdempotenceKey> = (0..1000).map(|_| IdempotenceKey::generate()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_generated_key_is_uuid_v4() {
        let key = IdempotenceKey::generate();
        let parsed = uuid::Uuid::parse_str(key.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_supplied_key_wins() {
        let key = IdempotenceKey::resolve(Some("6daac9fa-342d-4264-91c5-b5eafd1a0010"));
        assert_eq!(key.as_str(), "6daac9fa-342d-4264-91c5-b5eafd1a0010");
    }

    #[test]
    fn test_resolve_without_key_generates() {
        let a = IdempotenceKey::resolve(None);
        let b = IdempotenceKey::resolve(None);
        assert_ne!(a, b);
    }
}
