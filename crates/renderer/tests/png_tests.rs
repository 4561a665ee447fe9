//! Tests for PNG encoding.
//!
//! Output is checked at the chunk level: signature, IHDR fields, CRCs and
//! the inflated IDAT length.

use std::io::Read;

use heatmap_common::HeatmapError;
use renderer::png::{encode_auto, encode_indexed, encode_rgba, extract_palette};

// ============================================================================
// Helper functions
// ============================================================================

struct Chunk {
    kind: [u8; 4],
    data: Vec<u8>,
}

/// Split a PNG into chunks, asserting every CRC.
fn read_chunks(png: &[u8]) -> Vec<Chunk> {
    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    let mut chunks = Vec::new();
    let mut pos = 8;
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let kind: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let data = png[pos + 8..pos + 8 + len].to_vec();
        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&kind);
        hasher.update(&data);
        assert_eq!(hasher.finalize(), crc, "bad CRC on {:?}", kind);

        chunks.push(Chunk { kind, data });
        pos += 12 + len;
    }
    chunks
}

fn find<'a>(chunks: &'a [Chunk], kind: &[u8; 4]) -> Option<&'a Chunk> {
    chunks.iter().find(|c| &c.kind == kind)
}

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn two_color_pixels(width: usize, height: usize) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| {
            if i % 2 == 0 {
                [0x31, 0x36, 0x95, 255]
            } else {
                [0xa5, 0x00, 0x26, 255]
            }
        })
        .collect()
}

// ============================================================================
// Palette extraction
// ============================================================================

#[test]
fn test_extract_palette_preserves_order() {
    let pixels = two_color_pixels(3, 1);
    let (palette, indices) = extract_palette(&pixels).unwrap();
    assert_eq!(palette, vec![(0x31, 0x36, 0x95, 255), (0xa5, 0x00, 0x26, 255)]);
    assert_eq!(indices, vec![0, 1, 0]);
}

#[test]
fn test_exactly_256_colors_fit() {
    let pixels: Vec<u8> = (0..256u32).flat_map(|i| [i as u8, 0, 0, 255]).collect();
    let (palette, _) = extract_palette(&pixels).unwrap();
    assert_eq!(palette.len(), 256);
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_auto_uses_indexed_for_few_colors() {
    let png = encode_auto(&two_color_pixels(4, 3), 4, 3).unwrap();
    let chunks = read_chunks(&png);

    let ihdr = find(&chunks, b"IHDR").unwrap();
    assert_eq!(&ihdr.data[0..4], &4u32.to_be_bytes());
    assert_eq!(&ihdr.data[4..8], &3u32.to_be_bytes());
    assert_eq!(ihdr.data[8], 8);
    assert_eq!(ihdr.data[9], 3);

    assert_eq!(find(&chunks, b"PLTE").unwrap().data.len(), 6);
    assert!(find(&chunks, b"tRNS").is_none());
    assert_eq!(inflate(&find(&chunks, b"IDAT").unwrap().data).len(), 3 * (1 + 4));
    assert_eq!(chunks.last().unwrap().kind, *b"IEND");
}

#[test]
fn test_auto_falls_back_to_rgba() {
    let pixels: Vec<u8> = (0..300u32)
        .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0, 255])
        .collect();
    let png = encode_auto(&pixels, 30, 10).unwrap();
    let chunks = read_chunks(&png);

    assert_eq!(find(&chunks, b"IHDR").unwrap().data[9], 6);
    assert!(find(&chunks, b"PLTE").is_none());

    let raw = inflate(&find(&chunks, b"IDAT").unwrap().data);
    assert_eq!(raw.len(), 10 * (1 + 30 * 4));
    assert_eq!(&raw[1..5], &pixels[0..4]);
}

#[test]
fn test_indexed_writes_transparency() {
    let palette = [(255, 255, 255, 0), (0, 0, 0, 255)];
    let png = encode_indexed(2, 1, &palette, &[0, 1]).unwrap();
    let chunks = read_chunks(&png);
    assert_eq!(find(&chunks, b"tRNS").unwrap().data, vec![0, 255]);
}

// ============================================================================
// Error cases
// ============================================================================

#[test]
fn test_buffer_size_mismatch() {
    let err = encode_rgba(&[0u8; 12], 2, 2).unwrap_err();
    assert!(matches!(err, HeatmapError::Render(_)));
}

#[test]
fn test_zero_dimensions_rejected() {
    assert!(encode_auto(&[], 0, 0).is_err());
}

#[test]
fn test_empty_palette_rejected() {
    assert!(encode_indexed(1, 1, &[], &[0]).is_err());
}
