#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::new(width, height)
        .save_with_format(&path, ImageFormat::Png)
        .expect("should write png");
    path
}

pub const DATE_TIME: &[u8] = b"2024:05:01 12:00:00\0";

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .expect("should encode jpeg");
    bytes
}

pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, jpeg_bytes(width, height)).expect("should write jpeg");
    path
}

/// A small JPEG carrying `Make = "TestCam"`, tag 0x0132 (`DateTime`) and a
/// GPS IFD at 10°S 20°W.
pub fn write_jpeg_with_exif(dir: &Path, name: &str) -> PathBuf {
    let jpeg = jpeg_bytes(8, 6);
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "jpeg should start with SOI");

    let tiff = gps_tiff(b"TestCam\0", DATE_TIME, (10, 1), (20, 1));
    let mut segment = vec![0xFF, 0xE1];
    let length = u16::try_from(2 + 6 + tiff.len()).expect("segment fits");
    segment.extend_from_slice(&length.to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);

    let mut out = Vec::with_capacity(jpeg.len() + segment.len());
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&segment);
    out.extend_from_slice(&jpeg[2..]);

    let path = dir.join(name);
    fs::write(&path, out).expect("should write jpeg");
    path
}

// ---------------------------------------------------------------------------
// Little-endian TIFF builder
// ---------------------------------------------------------------------------

const ASCII: u16 = 2;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

fn entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value);
}

fn offset(value: usize) -> [u8; 4] {
    u32::try_from(value).expect("offset fits").to_le_bytes()
}

fn rationals(out: &mut Vec<u8>, values: [(u32, u32); 3]) {
    for (num, den) in values {
        out.extend_from_slice(&num.to_le_bytes());
        out.extend_from_slice(&den.to_le_bytes());
    }
}

/// IFD0 { Make, DateTime, GPSInfo } followed by a GPS IFD with south
/// latitude and west longitude, both whole degrees. `make` and `date_time`
/// must be NUL-terminated, longer than four bytes and of even length.
pub fn gps_tiff(
    make: &[u8],
    date_time: &[u8],
    latitude: (u32, u32),
    longitude: (u32, u32),
) -> Vec<u8> {
    let ifd0 = 8;
    let ifd0_len = 2 + 3 * 12 + 4;
    let make_at = ifd0 + ifd0_len;
    let date_time_at = make_at + make.len();
    let gps_ifd = date_time_at + date_time.len();
    let gps_len = 2 + 4 * 12 + 4;
    let latitude_at = gps_ifd + gps_len;
    let longitude_at = latitude_at + 24;

    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&offset(ifd0));

    out.extend_from_slice(&3u16.to_le_bytes());
    entry(&mut out, 0x010F, ASCII, make.len() as u32, offset(make_at));
    entry(&mut out, 0x0132, ASCII, date_time.len() as u32, offset(date_time_at));
    entry(&mut out, 0x8825, LONG, 1, offset(gps_ifd));
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(make);
    out.extend_from_slice(date_time);

    out.extend_from_slice(&4u16.to_le_bytes());
    entry(&mut out, 0x0001, ASCII, 2, *b"S\0\0\0");
    entry(&mut out, 0x0002, RATIONAL, 3, offset(latitude_at));
    entry(&mut out, 0x0003, ASCII, 2, *b"W\0\0\0");
    entry(&mut out, 0x0004, RATIONAL, 3, offset(longitude_at));
    out.extend_from_slice(&0u32.to_le_bytes());

    rationals(&mut out, [latitude, (0, 1), (0, 1)]);
    rationals(&mut out, [longitude, (0, 1), (0, 1)]);

    assert_eq!(out.len(), longitude_at + 24);
    out
}
