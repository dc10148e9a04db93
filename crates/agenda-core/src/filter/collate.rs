//! pt-BR title collation used to break date ties.
//!
//! Comparison is done in three levels, as the display locale orders words:
//! base letters first (ignoring accents and case), then accents ranked by
//! mark (acute, grave, breve, circumflex, caron, ring, diaeresis, double
//! acute, tilde, cedilla), then case with lowercase before uppercase. Raw
//! code-point order is the last resort so the ordering is total.

use std::cmp::Ordering;

use voca_rs::manipulate::latinise;

/// Compares two titles the way a pt-BR reader expects them sorted.
pub fn compare_pt_br(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> String {
    latinise(s).to_lowercase()
}

/// Per-letter accent ranks; unaccented letters rank lowest.
fn accent_key(s: &str) -> Vec<u8> {
    s.to_lowercase().chars().map(accent_rank).collect()
}

fn accent_rank(c: char) -> u8 {
    match c {
        'á' | 'é' | 'í' | 'ó' | 'ú' | 'ý' | 'ć' | 'ń' | 'ś' | 'ź' | 'ĺ' | 'ŕ' => 1,
        'à' | 'è' | 'ì' | 'ò' | 'ù' | 'ǹ' => 2,
        'ă' | 'ĕ' | 'ĭ' | 'ŏ' | 'ŭ' | 'ğ' => 3,
        'â' | 'ê' | 'î' | 'ô' | 'û' | 'ŷ' | 'ĉ' | 'ĝ' | 'ĥ' | 'ĵ' | 'ŝ' | 'ŵ' => 4,
        'ǎ' | 'ě' | 'ǐ' | 'ǒ' | 'ǔ' | 'č' | 'ď' | 'ň' | 'ř' | 'š' | 'ť' | 'ž' => 5,
        'å' | 'ů' => 6,
        'ä' | 'ë' | 'ï' | 'ö' | 'ü' | 'ÿ' => 7,
        'ő' | 'ű' => 8,
        'ã' | 'õ' | 'ñ' | 'ĩ' | 'ũ' => 9,
        'ç' | 'ş' | 'ţ' => 10,
        c if c.is_ascii() => 0,
        c => {
            let mut buf = [0; 4];
            let letter = c.encode_utf8(&mut buf);
            if latinise(letter) == *letter {
                0
            } else {
                11
            }
        }
    }
}

// Swapping case makes lowercase letters sort ahead of their uppercase forms.
fn case_key(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            if c.is_lowercase() {
                c.to_uppercase().collect::<Vec<_>>()
            } else {
                c.to_lowercase().collect::<Vec<_>>()
            }
        })
        .collect()
}
