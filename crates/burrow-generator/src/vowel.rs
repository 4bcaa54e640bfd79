use crate::Generator;
use burrow_core::ShortCode;

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'A', 'E', 'I', 'O', 'U'];

/// A generator that strips vowels from everything before the last dot.
///
/// `"example.com"` becomes `"xmpl.com"`. The output is deterministic but not
/// collision free: two URLs that differ only in their vowels share a code.
#[derive(Debug, Clone, Copy, Default)]
pub struct VowelStripGenerator;

/// Splits `addr` at its last `.`; the suffix keeps the dot.
fn split_tld(addr: &str) -> (&str, &str) {
    match addr.rfind('.') {
        Some(index) => addr.split_at(index),
        None => (addr, ""),
    }
}

impl Generator for VowelStripGenerator {
    fn generate(&self, long_url: &str) -> ShortCode {
        let (prefix, suffix) = split_tld(long_url);

        let mut code: String = prefix.chars().filter(|c| !VOWELS.contains(c)).collect();
        code.push_str(suffix);

        ShortCode::new(code)
    }
}
