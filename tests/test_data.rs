// IDX dataset parsing and single-image decoding.

use std::fs;

use image::{GrayImage, Luma};
use tempfile::tempdir;

use ferrite_digits::data::{decode_grayscale_28, load_grayscale_28, load_idx_pair, parse_idx_pair};
use ferrite_digits::Error;

fn idx3(n: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
    let mut out = vec![0x00, 0x00, 0x08, 0x03];
    out.extend_from_slice(&n.to_be_bytes());
    out.extend_from_slice(&rows.to_be_bytes());
    out.extend_from_slice(&cols.to_be_bytes());
    out.extend_from_slice(pixels);
    out
}

fn idx1(labels: &[u8]) -> Vec<u8> {
    let mut out = vec![0x00, 0x00, 0x08, 0x01];
    out.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    out.extend_from_slice(labels);
    out
}

fn pgm(width: u32, height: u32, fill: impl Fn(u32, u32) -> u8) -> Vec<u8> {
    let mut out = format!("P5\n{} {}\n255\n", width, height).into_bytes();
    for y in 0..height {
        for x in 0..width {
            out.push(fill(x, y));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// IDX
// ---------------------------------------------------------------------------

#[test]
fn parses_a_well_formed_pair() {
    let pixels: Vec<u8> = (0..12).collect();
    let dataset = parse_idx_pair(&idx3(3, 2, 2, &pixels), &idx1(&[7, 0, 9]), 10).unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.sample_len(), 4);
    assert_eq!(dataset.image(1), Some(&[4u8, 5, 6, 7][..]));
    assert_eq!(dataset.label(2), Some(9));
    assert_eq!(dataset.normalized(2).unwrap()[3], 11.0 / 255.0);
    assert!(dataset.image(3).is_none());
    assert!(dataset.label(3).is_none());
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut images = idx3(1, 1, 2, &[10, 20]);
    images.extend_from_slice(&[99, 99, 99]);
    let mut labels = idx1(&[1]);
    labels.push(4);

    let dataset = parse_idx_pair(&images, &labels, 10).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.image(0), Some(&[10u8, 20][..]));
}

#[test]
fn malformed_headers_are_invalid_datasets() {
    let labels = idx1(&[0]);

    let mut bad_magic = idx3(1, 1, 1, &[0]);
    bad_magic[3] = 0x02;
    assert!(matches!(parse_idx_pair(&bad_magic, &labels, 10), Err(Error::InvalidDataset(_))));

    let mut bad_dtype = idx3(1, 1, 1, &[0]);
    bad_dtype[2] = 0x0D;
    assert!(matches!(parse_idx_pair(&bad_dtype, &labels, 10), Err(Error::InvalidDataset(_))));

    assert!(matches!(
        parse_idx_pair(&[0x00, 0x00, 0x08], &labels, 10),
        Err(Error::InvalidDataset(_))
    ));
    assert!(matches!(
        parse_idx_pair(&idx3(1, 0, 28, &[]), &labels, 10),
        Err(Error::InvalidDataset(_))
    ));
}

#[test]
fn short_or_mismatched_files_are_rejected() {
    // Header claims 2 images of 4 pixels, only 5 bytes follow.
    let short = idx3(2, 2, 2, &[0; 5]);
    assert!(matches!(parse_idx_pair(&short, &idx1(&[0, 1]), 10), Err(Error::InvalidDataset(_))));

    let images = idx3(2, 1, 1, &[0, 0]);
    assert!(matches!(parse_idx_pair(&images, &idx1(&[0]), 10), Err(Error::InvalidDataset(_))));

    let mut short_labels = idx1(&[0, 1]);
    short_labels.pop();
    assert!(matches!(parse_idx_pair(&images, &short_labels, 10), Err(Error::InvalidDataset(_))));
}

#[test]
fn labels_outside_the_class_range_are_rejected() {
    let images = idx3(2, 1, 1, &[0, 0]);
    match parse_idx_pair(&images, &idx1(&[3, 10]), 10) {
        Err(Error::InvalidDataset(msg)) => assert!(msg.contains("index 1")),
        other => panic!("expected InvalidDataset, got {:?}", other),
    }
}

#[test]
fn loads_a_pair_from_disk() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("train-images-idx3-ubyte");
    let label_path = dir.path().join("train-labels-idx1-ubyte");
    fs::write(&image_path, idx3(2, 28, 28, &[128; 2 * 784])).unwrap();
    fs::write(&label_path, idx1(&[5, 6])).unwrap();

    let dataset = load_idx_pair(&image_path, &label_path, 10).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.sample_len(), 784);
    assert_eq!(dataset.labels(), &[5u8, 6][..]);

    let missing = dir.path().join("nope");
    assert!(matches!(load_idx_pair(&missing, &label_path, 10), Err(Error::Io(_))));
}

#[test]
fn disk_loader_requires_28_by_28_images() {
    let dir = tempdir().unwrap();
    let image_path = dir.path().join("flat-images-idx3-ubyte");
    let label_path = dir.path().join("flat-labels-idx1-ubyte");
    // Same 784 bytes per sample, but laid out as a single 1×784 row.
    fs::write(&image_path, idx3(2, 1, 784, &[0; 2 * 784])).unwrap();
    fs::write(&label_path, idx1(&[1, 2])).unwrap();

    match load_idx_pair(&image_path, &label_path, 10) {
        Err(Error::InvalidDataset(msg)) => assert!(msg.contains("1×784")),
        other => panic!("expected InvalidDataset, got {:?}", other),
    }

    // The in-memory parser stays shape-agnostic.
    let bytes = fs::read(&image_path).unwrap();
    let labels = fs::read(&label_path).unwrap();
    assert_eq!(parse_idx_pair(&bytes, &labels, 10).unwrap().sample_len(), 784);
}

// ---------------------------------------------------------------------------
// Single images
// ---------------------------------------------------------------------------

#[test]
fn binary_pgm_decodes_to_784_row_major_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("digit.pgm");
    fs::write(&path, pgm(28, 28, |x, y| if x == 3 && y == 1 { 255 } else { (y * 2) as u8 })).unwrap();

    let pixels = load_grayscale_28(&path).unwrap();
    assert_eq!(pixels.len(), 784);
    assert_eq!(pixels[28 + 3], 255);
    assert_eq!(pixels[28 + 4], 2);
    assert_eq!(pixels[27 * 28], 54);
}

#[test]
fn wrong_dimensions_are_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wide.pgm");
    fs::write(&path, pgm(32, 28, |_, _| 0)).unwrap();

    match load_grayscale_28(&path) {
        Err(Error::ImageDimensions { width, height }) => {
            assert_eq!((width, height), (32, 28));
        }
        other => panic!("expected ImageDimensions, got {:?}", other),
    }
}

#[test]
fn unreadable_images_surface_io_and_decode_errors() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        load_grayscale_28(dir.path().join("missing.pgm")),
        Err(Error::Io(_))
    ));

    let garbage = dir.path().join("garbage.pgm");
    fs::write(&garbage, b"not an image at all").unwrap();
    assert!(matches!(load_grayscale_28(&garbage), Err(Error::Image(_))));
}

#[test]
fn png_bytes_decode_through_the_same_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("digit.png");
    let img = GrayImage::from_fn(28, 28, |x, y| Luma([if x == y { 200 } else { 0 }]));
    img.save(&path).unwrap();

    let pixels = decode_grayscale_28(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(pixels.len(), 784);
    assert_eq!(pixels[0], 200);
    assert_eq!(pixels[29], 200);
    assert_eq!(pixels[1], 0);
}
