use blake3::Hasher;
use std::cmp::Ordering;
use unicode_normalization::char::{decompose_canonical, is_combining_mark};

pub fn blake3_hex(data: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(data);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}

// Folded letters, then accents, then case (lower first), then code points.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.chars().map(is_marked).cmp(b.chars().map(is_marked)))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.chars() {
        decompose_canonical(c, |d| {
            if is_combining_mark(d) {
                return;
            }
            match letter_expansion(d) {
                Some(base) => key.push_str(base),
                None => key.extend(d.to_lowercase()),
            }
        });
    }
    key
}

fn is_marked(c: char) -> bool {
    let mut marked = letter_expansion(c).is_some();
    decompose_canonical(c, |d| marked |= is_combining_mark(d));
    marked
}

// Latin letters with no canonical decomposition.
fn letter_expansion(c: char) -> Option<&'static str> {
    let base = match c {
        'ß' | 'ẞ' => "ss",
        'Æ' | 'æ' => "ae",
        'Œ' | 'œ' => "oe",
        'Ø' | 'ø' => "o",
        'Ł' | 'ł' => "l",
        'Đ' | 'đ' | 'Ð' | 'ð' => "d",
        'Ħ' | 'ħ' => "h",
        'Þ' | 'þ' => "th",
        'ı' => "i",
        _ => return None,
    };
    Some(base)
}
