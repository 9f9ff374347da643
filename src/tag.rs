// This file is part of passgen.
//
// Copyright (c) 2025  The passgen contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Pepper tags: a short HMAC-SHA256 fingerprint of a passphrase.
//!
//! The tag lets anyone holding the pepper check, offline, that a passphrase
//! came out of this generator. It must stay keyed: a plain hash would let
//! anyone forge or check tags without the secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

pub const TAG_LEN: usize = 4;

pub const FALLBACK_TAG: &str = "AAAA";

pub fn derive_tag(passphrase: &str, pepper: &[u8]) -> String {
    let digest = keyed_digest(passphrase.as_bytes(), pepper);
    tag_from_digest(&digest)
}

/// Returns `false` when there is no trailing tag group to check.
pub fn verify_tag(tagged: &str, pepper: &[u8]) -> bool {
    let Some((passphrase, tag)) = tagged.rsplit_once('-') else {
        return false;
    };

    if tag.len() != TAG_LEN || passphrase.is_empty() {
        return false;
    }

    let expected = derive_tag(passphrase, pepper);

    // Constant-time over the tag bytes.
    expected
        .bytes()
        .zip(tag.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

pub fn tag_from_digest(digest: &[u8]) -> String {
    let encoded = encode_base32(digest);
    if encoded.len() < TAG_LEN {
        return FALLBACK_TAG.to_string();
    }
    encoded[..TAG_LEN].to_string()
}

/// RFC 4648 base-32 (`A-Z2-7`) without padding.
///
/// Trailing bits that do not fill a whole 5-bit group are shifted up and
/// emitted as one last character, zero-filled on the low end.
pub fn encode_base32(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(5));

    let mut buffer: u32 = 0;
    let mut bits_left: u32 = 0;

    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits_left += 8;

        while bits_left >= 5 {
            let index = (buffer >> (bits_left - 5)) & 0x1F;
            bits_left -= 5;
            out.push(ALPHABET[index as usize] as char);
        }

        buffer &= (1 << bits_left) - 1;
    }

    if bits_left > 0 {
        let index = (buffer << (5 - bits_left)) & 0x1F;
        out.push(ALPHABET[index as usize] as char);
    }

    out
}

fn keyed_digest(message: &[u8], key: &[u8]) -> Zeroizing<Vec<u8>> {
    // HMAC takes keys of any length; an empty digest lands on FALLBACK_TAG.
    match HmacSha256::new_from_slice(key) {
        Ok(mut mac) => {
            mac.update(message);
            Zeroizing::new(mac.finalize().into_bytes().to_vec())
        }
        Err(_) => Zeroizing::new(Vec::new()),
    }
}
