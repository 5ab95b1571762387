//! Element id generation.
//!
//! Ids are `{seed}-{n}`: a CRC32 of the newsletter identifier plus a
//! sequential counter. Deterministic and injectable, so tests can
//! assert uniqueness without depending on clocks or randomness.

use crc32fast::Hasher;

/// Derive the document id seed from a newsletter identifier.
pub fn get_document_id(identifier: &str) -> String {
    let mut buff = String::from(identifier);
    if !identifier.starts_with("newsletter://") {
        buff = format!("newsletter://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for elements within one document.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(identifier: &str) -> Self {
        Self {
            seed: get_document_id(identifier),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Move the counter past ids already present in a loaded document,
    /// so a resumed session never re-issues an existing id.
    pub fn resume_past(&mut self, existing_ids: impl IntoIterator<Item = impl AsRef<str>>) {
        let prefix = format!("{}-", self.seed);
        for id in existing_ids {
            if let Some(rest) = id.as_ref().strip_prefix(&prefix) {
                if let Ok(n) = rest.parse::<u32>() {
                    self.count = self.count.max(n);
                }
            }
        }
    }

    /// Generate the next sequential id.
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_is_stable() {
        let id1 = get_document_id("weekly-42");
        let id2 = get_document_id("weekly-42");
        assert_eq!(id1, id2);

        let id3 = get_document_id("weekly-43");
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_resume_past_loaded_ids() {
        let mut first = IdGenerator::new("weekly-42");
        let a = first.new_id();
        let b = first.new_id();

        let mut resumed = IdGenerator::new("weekly-42");
        resumed.resume_past([&a, &b]);

        let c = resumed.new_id();
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert!(c.ends_with("-3"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdGenerator::new("weekly-42");

        let a = ids.new_id();
        let b = ids.new_id();
        let c = ids.new_id();

        assert!(a.ends_with("-1"));
        assert!(b.ends_with("-2"));
        assert!(c.ends_with("-3"));

        let seed = ids.seed();
        assert!(a.starts_with(seed));
        assert!(b.starts_with(seed));
        assert!(c.starts_with(seed));
    }
}
