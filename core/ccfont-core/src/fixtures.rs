//! Minimal OpenType builder for tests (ccfont-core)
//!
//! Produces a CFF-flavoured sfnt whose only table is `name`. That is all the
//! family-name lookup reads, and it keeps binary fixtures out of the tree.

const CFF_SFNT_VERSION: u32 = 0x4F54_544F; // 'OTTO'
const PLATFORM_WINDOWS: u16 = 3;
const ENCODING_UNICODE_BMP: u16 = 1;
const LANGUAGE_EN_US: u16 = 0x0409;

/// Font whose family (ID 1), subfamily (ID 2) and full name (ID 4) are set.
pub fn build_font(family: &str) -> Vec<u8> {
    let full = format!("{family} Regular");
    build_font_with_names(&[(1, family), (2, "Regular"), (4, &full)])
}

/// Font carrying exactly the given `(name_id, text)` records.
pub fn build_font_with_names(names: &[(u16, &str)]) -> Vec<u8> {
    let mut sorted = names.to_vec();
    sorted.sort_by_key(|(id, _)| *id);

    let name = name_table(&sorted);
    let header_len = 12 + 16;

    let mut font = Vec::with_capacity(header_len + name.len() + 3);
    push_u32(&mut font, CFF_SFNT_VERSION);
    push_u16(&mut font, 1); // numTables
    push_u16(&mut font, 16); // searchRange
    push_u16(&mut font, 0); // entrySelector
    push_u16(&mut font, 0); // rangeShift

    font.extend_from_slice(b"name");
    push_u32(&mut font, checksum(&name));
    push_u32(&mut font, header_len as u32);
    push_u32(&mut font, name.len() as u32);

    font.extend_from_slice(&name);
    while font.len() % 4 != 0 {
        font.push(0);
    }
    font
}

fn name_table(names: &[(u16, &str)]) -> Vec<u8> {
    let mut records = Vec::new();
    let mut storage = Vec::new();

    for (id, text) in names {
        let encoded: Vec<u8> = text.encode_utf16().flat_map(u16::to_be_bytes).collect();
        records.push((*id, encoded.len() as u16, storage.len() as u16));
        storage.extend_from_slice(&encoded);
    }

    let mut table = Vec::new();
    push_u16(&mut table, 0); // format
    push_u16(&mut table, records.len() as u16);
    push_u16(&mut table, (6 + 12 * records.len()) as u16);
    for (id, length, offset) in records {
        push_u16(&mut table, PLATFORM_WINDOWS);
        push_u16(&mut table, ENCODING_UNICODE_BMP);
        push_u16(&mut table, LANGUAGE_EN_US);
        push_u16(&mut table, id);
        push_u16(&mut table, length);
        push_u16(&mut table, offset);
    }
    table.extend_from_slice(&storage);
    table
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn push_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_points_at_name_table() {
        let font = build_font("Alpha");
        assert_eq!(&font[0..4], b"OTTO");
        assert_eq!(&font[12..16], b"name");
        assert_eq!(u32::from_be_bytes([font[20], font[21], font[22], font[23]]), 28);
        assert_eq!(font.len() % 4, 0);
    }
}
