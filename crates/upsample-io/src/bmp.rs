//! BMP image format support
//!
//! Reads and writes uncompressed Windows Bitmap files with 8-bit
//! (single component, palette treated as a gray ramp) or 24-bit
//! (three component) samples.

use crate::{IoError, IoResult};
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use upsample_core::Pix;

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// Palette entries written for 8-bit images
const GRAY_PALETTE_ENTRIES: usize = 256;

#[inline]
fn le_u16(buf: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([buf[off], buf[off + 1]])
}

#[inline]
fn le_u32(buf: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

#[inline]
fn le_i32(buf: &[u8], off: usize) -> i32 {
    le_u32(buf, off) as i32
}

/// Bytes per stored row, padded to a 4-byte boundary
#[inline]
fn row_stride(width: u32, bits_per_pixel: u16) -> usize {
    (width as usize * bits_per_pixel as usize).div_ceil(32) * 4
}

fn skip<R: Read>(reader: &mut R, count: usize) -> IoResult<()> {
    let copied = std::io::copy(&mut reader.take(count as u64), &mut std::io::sink())?;
    if copied != count as u64 {
        return Err(IoError::Truncated);
    }
    Ok(())
}

/// Read a BMP image
///
/// 8-bit files become a 1-sample-per-pixel `Pix` holding the raw palette
/// indices; 24-bit files become a 3-sample `Pix` in R, G, B order. Rows
/// are returned top-down whichever order the file stores them in.
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidHeader("not a BMP file".to_string()));
    }

    let pixel_offset = le_u32(&file_header, 10) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidHeader(format!(
            "unsupported info header size: {}",
            header_size
        )));
    }

    let width = le_i32(&info_header, 4);
    let height = le_i32(&info_header, 8);
    if width <= 0 || height == 0 {
        return Err(IoError::InvalidHeader(format!(
            "invalid dimensions: {}x{}",
            width, height
        )));
    }

    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidHeader(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }

    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    if compression != 0 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }

    let spp = match bits_per_pixel {
        8 => 1,
        24 => 3,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "only 8-bit and 24-bit BMP files are supported, got {} bits",
                bits_per_pixel
            )));
        }
    };

    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    // Everything between the info header and the pixel data (extended
    // header fields, palette) is skipped; 8-bit samples are used as-is.
    let consumed = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize;
    if pixel_offset < consumed {
        return Err(IoError::InvalidHeader(format!(
            "pixel data offset {} inside header",
            pixel_offset
        )));
    }
    skip(&mut reader, pixel_offset - consumed)?;

    let mut pix = Pix::new(width, height, spp)?;
    let mut row_buffer = vec![0u8; row_stride(width, bits_per_pixel)];

    for row in 0..height {
        reader.read_exact(&mut row_buffer)?;

        let y = if top_down { row } else { height - 1 - row };
        let dst = pix.row_mut(y);

        match spp {
            1 => dst.copy_from_slice(&row_buffer[..width as usize]),
            _ => {
                for (out, bgr) in dst
                    .chunks_exact_mut(3)
                    .zip(row_buffer.chunks_exact(3))
                {
                    out[0] = bgr[2];
                    out[1] = bgr[1];
                    out[2] = bgr[0];
                }
            }
        }
    }

    debug!(
        "read BMP {}x{} ({} bpp, {})",
        width,
        height,
        bits_per_pixel,
        if top_down { "top-down" } else { "bottom-up" }
    );
    Ok(pix)
}

/// Write a BMP image
///
/// 1-sample images are written as 8-bit with a gray palette; 3-sample
/// images as 24-bit. Rows are written bottom-up.
pub fn write_bmp<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (bits_per_pixel, palette_entries): (u16, usize) = match pix.spp() {
        1 => (8, GRAY_PALETTE_ENTRIES),
        3 => (24, 0),
        spp => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {} samples per pixel as BMP",
                spp
            )));
        }
    };

    let stride = row_stride(width, bits_per_pixel);
    let pixel_data_size = stride * height as usize;
    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize + palette_entries * 4;
    let file_size = pixel_offset + pixel_data_size;
    let file_size = u32::try_from(file_size).map_err(|_| {
        IoError::UnsupportedFormat(format!("image too large for BMP: {} bytes", file_size))
    })?;

    // File header
    writer.write_all(b"BM")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(&[0u8; 4])?; // Reserved
    writer.write_all(&(pixel_offset as u32).to_le_bytes())?;

    // Info header
    writer.write_all(&BMP_INFO_HEADER_SIZE.to_le_bytes())?;
    writer.write_all(&(width as i32).to_le_bytes())?;
    writer.write_all(&(height as i32).to_le_bytes())?; // Bottom-up
    writer.write_all(&1u16.to_le_bytes())?; // Planes
    writer.write_all(&bits_per_pixel.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?; // Compression
    writer.write_all(&(pixel_data_size as u32).to_le_bytes())?;
    writer.write_all(&0i32.to_le_bytes())?; // X pixels per meter
    writer.write_all(&0i32.to_le_bytes())?; // Y pixels per meter
    writer.write_all(&(palette_entries as u32).to_le_bytes())?; // Colors used
    writer.write_all(&0u32.to_le_bytes())?; // Important colors

    for i in 0..palette_entries {
        let val = i as u8;
        writer.write_all(&[val, val, val, 0])?;
    }

    let mut row_buffer = vec![0u8; stride];
    for y in (0..height).rev() {
        let src = pix.row(y);
        match pix.spp() {
            1 => row_buffer[..width as usize].copy_from_slice(src),
            _ => {
                for (bgr, rgb) in row_buffer.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
                    bgr[0] = rgb[2];
                    bgr[1] = rgb[1];
                    bgr[2] = rgb[0];
                }
            }
        }
        writer.write_all(&row_buffer)?;
    }

    debug!("wrote BMP {}x{} ({} bpp)", width, height, bits_per_pixel);
    Ok(())
}

fn open_error(path: &Path, err: std::io::Error) -> IoError {
    match err.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
            IoError::NotFound(path.to_path_buf())
        }
        _ => IoError::from(err),
    }
}

/// Read a BMP image from a file path
pub fn read_bmp_file<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    read_bmp(BufReader::new(file))
}

/// Write a BMP image to a file path
pub fn write_bmp_file<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| open_error(path, e))?;
    let mut writer = BufWriter::new(file);
    write_bmp(pix, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn gray_pix() -> Pix {
        let data: Vec<u8> = (0..5 * 3).map(|i| (i * 17) as u8).collect();
        Pix::from_data(5, 3, 1, data).unwrap()
    }

    #[test]
    fn test_bmp_roundtrip_8bit() {
        let pix = gray_pix();

        let mut buffer = Vec::new();
        write_bmp(&pix, &mut buffer).unwrap();

        // 5 samples padded to 8 bytes per row
        assert_eq!(buffer.len(), 14 + 40 + 256 * 4 + 8 * 3);

        let pix2 = read_bmp(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2, pix);
    }

    #[test]
    fn test_bmp_roundtrip_24bit() {
        let data: Vec<u8> = (0..3 * 2 * 3).map(|i| (i * 11) as u8).collect();
        let pix = Pix::from_data(3, 2, 3, data).unwrap();

        let mut buffer = Vec::new();
        write_bmp(&pix, &mut buffer).unwrap();
        let pix2 = read_bmp(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2, pix);
    }

    #[test]
    fn test_bmp_stored_bottom_up_bgr() {
        let pix = Pix::from_data(1, 2, 3, vec![10, 20, 30, 40, 50, 60]).unwrap();
        let mut buffer = Vec::new();
        write_bmp(&pix, &mut buffer).unwrap();

        let pixels = &buffer[54..];
        // First stored row is the bottom image row, in B, G, R order
        assert_eq!(&pixels[0..3], &[60, 50, 40]);
        assert_eq!(&pixels[4..7], &[30, 20, 10]);
    }

    #[test]
    fn test_bmp_top_down() {
        let pix = gray_pix();
        let mut buffer = Vec::new();
        write_bmp(&pix, &mut buffer).unwrap();

        // Flip the stored row order and negate the height
        let offset = 14 + 40 + 256 * 4;
        let rows: Vec<Vec<u8>> = buffer[offset..].chunks(8).map(|r| r.to_vec()).collect();
        let mut flipped = buffer[..offset].to_vec();
        for r in rows.iter().rev() {
            flipped.extend_from_slice(r);
        }
        flipped[22..26].copy_from_slice(&(-3i32).to_le_bytes());

        let pix2 = read_bmp(Cursor::new(flipped)).unwrap();
        assert_eq!(pix2, pix);
    }

    #[test]
    fn test_bmp_not_a_bmp() {
        let result = read_bmp(Cursor::new(b"PNG not a bitmap at all, padded to length.......".to_vec()));
        assert!(matches!(result, Err(IoError::InvalidHeader(_))));
    }

    #[test]
    fn test_bmp_truncated() {
        let mut buffer = Vec::new();
        write_bmp(&gray_pix(), &mut buffer).unwrap();
        buffer.truncate(buffer.len() - 3);
        assert!(matches!(read_bmp(Cursor::new(buffer)), Err(IoError::Truncated)));

        assert!(matches!(read_bmp(Cursor::new(b"BM".to_vec())), Err(IoError::Truncated)));
    }

    #[test]
    fn test_bmp_unsupported_depth() {
        let mut buffer = Vec::new();
        write_bmp(&gray_pix(), &mut buffer).unwrap();
        buffer[28..30].copy_from_slice(&4u16.to_le_bytes());
        assert!(matches!(
            read_bmp(Cursor::new(buffer)),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_bmp_write_unsupported_spp() {
        let pix = Pix::new(2, 2, 2).unwrap();
        let mut buffer = Vec::new();
        assert!(matches!(
            write_bmp(&pix, &mut buffer),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_bmp_missing_file() {
        let result = read_bmp_file("/nonexistent/dir/input.bmp");
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }
}
