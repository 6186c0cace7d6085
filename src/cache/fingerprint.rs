use sha2::{Digest, Sha256};

pub const KEY_PREFIX: &str = "word_freq:";

/// Derives the cache key for a request.
///
/// Each field is length-prefixed before hashing so that, for example, text `"ab"` with
/// top 12 and text `"ab1"` with top 2 never share a key. The exclude list is hashed in
/// the order given: the same words in a different order produce a different key.
pub fn fingerprint(text: &str, top: usize, exclude: &[String]) -> String {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, text.as_bytes());
    update_field(&mut hasher, top.to_string().as_bytes());
    hasher.update((exclude.len() as u64).to_le_bytes());
    for word in exclude {
        update_field(&mut hasher, word.as_bytes());
    }

    format!("{}{}", KEY_PREFIX, hex::encode(hasher.finalize()))
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
