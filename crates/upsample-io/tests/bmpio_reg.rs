//! BMP I/O regression test
//!
//! Writes gray and RGB images, reads them back and checks that the decoded
//! samples match. Also exercises the error paths for damaged input.

use std::io::Cursor;

use upsample_io::{IoError, read_bmp, read_bmp_file, write_bmp, write_bmp_file};
use upsample_test::{RegParams, checker_rgb, gradient_gray, regout_dir, uniform_gray};

#[test]
fn bmpio_reg() {
    let mut rp = RegParams::new("bmpio");
    let outdir = regout_dir();

    // --- Test 1: in-memory round trip, odd widths exercise row padding ---
    let images = [
        uniform_gray(3, 2, 77).unwrap(),
        gradient_gray(13, 5).unwrap(),
        checker_rgb(7, 4, 2, [255, 0, 0], [0, 128, 255]).unwrap(),
        checker_rgb(1, 1, 1, [1, 2, 3], [4, 5, 6]).unwrap(),
    ];
    for pix in &images {
        let mut buf = Vec::new();
        write_bmp(pix, &mut buf).expect("write_bmp");
        let back = read_bmp(Cursor::new(&buf)).expect("read_bmp");
        rp.compare_pix(pix, &back);
        eprintln!(
            "  {}x{} spp {}: {} bytes",
            pix.width(),
            pix.height(),
            pix.spp(),
            buf.len()
        );
    }

    // --- Test 2: file round trip ---
    let path = format!("{}/bmpio_checker.bmp", outdir);
    write_bmp_file(&images[2], &path).expect("write_bmp_file");
    let back = read_bmp_file(&path).expect("read_bmp_file");
    rp.compare_pix(&images[2], &back);

    // --- Test 3: encoding is deterministic ---
    let mut a = Vec::new();
    let mut b = Vec::new();
    write_bmp(&images[1], &mut a).unwrap();
    write_bmp(&images[1], &mut b).unwrap();
    rp.compare_strings(&a, &b);

    // --- Test 4: damaged input ---
    let truncated = &a[..a.len() - 10];
    let err = read_bmp(Cursor::new(truncated)).unwrap_err();
    rp.compare_values(1.0, if matches!(err, IoError::Truncated) { 1.0 } else { 0.0 }, 0.0);

    let mut bad = a.clone();
    bad[0] = b'X';
    let err = read_bmp(Cursor::new(&bad)).unwrap_err();
    rp.compare_values(
        1.0,
        if matches!(err, IoError::InvalidHeader(_)) { 1.0 } else { 0.0 },
        0.0,
    );

    let err = read_bmp_file(format!("{}/does_not_exist.bmp", outdir)).unwrap_err();
    rp.compare_values(1.0, if matches!(err, IoError::NotFound(_)) { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "bmpio regression test failed");
}
