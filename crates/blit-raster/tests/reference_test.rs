//! Randomised blits checked against a pixel-at-a-time reference.

use blit_raster::{fill, rop2, rop2_at, Rgn1, Rop2, Scan};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_scan(rng: &mut StdRng, width: usize, height: usize) -> Scan {
    let stride = Scan::min_stride(width) + rng.random_range(0..3);
    let bytes: Vec<u8> = (0..stride * height).map(|_| rng.random::<u8>()).collect();
    Scan::from_bytes(bytes, width, height, stride).unwrap()
}

fn random_rgn1(rng: &mut StdRng) -> Rgn1 {
    Rgn1::new(
        rng.random_range(-12..40),
        rng.random_range(-30..50),
        rng.random_range(-12..40),
    )
}

/// One pixel per step: a destination pixel changes only when both it and
/// the matching source pixel are inside their buffers.
fn reference(result: &mut Scan, x: Rgn1, y: Rgn1, source: &Scan, rop: Rop2) {
    let (mut x, mut y) = (x, y);
    assert!(x.norm() && y.norm());
    for j in 0..y.extent {
        let (dy, sy) = (y.origin + j, y.origin_source + j);
        if dy < 0 || sy < 0 || dy as usize >= result.height() || sy as usize >= source.height() {
            continue;
        }
        for i in 0..x.extent {
            let (dx, sx) = (x.origin + i, x.origin_source + i);
            if dx < 0 || sx < 0 || dx as usize >= result.width() || sx as usize >= source.width() {
                continue;
            }
            let s = if source.get(sx as usize, sy as usize) { 0xff } else { 0x00 };
            let d = if result.get(dx as usize, dy as usize) { 0xff } else { 0x00 };
            result.set(dx as usize, dy as usize, rop.apply(s, d) & 1 != 0);
        }
    }
}

fn pixels(scan: &Scan) -> Vec<bool> {
    (0..scan.height())
        .flat_map(|y| (0..scan.width()).map(move |x| (x, y)))
        .map(|(x, y)| scan.get(x, y))
        .collect()
}

#[test]
fn test_matches_reference_for_every_rop() {
    let mut rng = StdRng::seed_from_u64(0x5eed_b17);

    for round in 0..400 {
        let rop = Rop2::ALL[round % 16];
        let (width, height) = (rng.random_range(1..48), rng.random_range(1..12));
        let source = random_scan(&mut rng, width, height);
        let (width, height) = (rng.random_range(1..48), rng.random_range(1..12));
        let original = random_scan(&mut rng, width, height);
        let x = random_rgn1(&mut rng);
        let y = random_rgn1(&mut rng);

        let mut expected = original.clone();
        reference(&mut expected, x, y, &source, rop);

        let mut actual = original.clone();
        let (mut x_fit, mut y_fit) = (x, y);
        let touched = rop2(&mut actual, &mut x_fit, &mut y_fit, &source, rop);

        assert_eq!(
            pixels(&actual),
            pixels(&expected),
            "round {round}: {rop} x={x:?} y={y:?}"
        );
        if !touched {
            assert_eq!(actual, original, "round {round}: untouched buffer changed");
        }
    }
}

#[test]
fn test_padding_bits_are_left_alone() {
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..100 {
        let width = rng.random_range(1..30);
        let source = random_scan(&mut rng, width, 4);
        let original = random_scan(&mut rng, width, 4);
        let mut actual = original.clone();
        let mut x = Rgn1::new(0, 64, 0);
        let mut y = Rgn1::same(0, 4);
        assert!(rop2(&mut actual, &mut x, &mut y, &source, Rop2::One));

        for row in 0..4 {
            for bit in width..actual.stride() * 8 {
                let mask = 0x80u8 >> (bit & 7);
                assert_eq!(
                    actual.row(row)[bit >> 3] & mask,
                    original.row(row)[bit >> 3] & mask,
                    "width {width}, row {row}, bit {bit}"
                );
            }
        }
    }
}

#[test]
fn test_extreme_coordinates_clip_to_nothing() {
    let mut rng = StdRng::seed_from_u64(99);
    let source = random_scan(&mut rng, 32, 8);
    let original = random_scan(&mut rng, 32, 8);
    let mut result = original.clone();

    let cases = [
        ((-10, 0), (20, 1), (i32::MAX - 5, 0)),
        ((i32::MIN + 1, 0), (-5, 1), (0, 0)),
        ((0, i32::MIN + 1), (4, -5), (0, 0)),
        ((i32::MAX, i32::MAX), (i32::MAX, i32::MAX), (i32::MIN, i32::MIN)),
        ((i32::MIN, 0), (i32::MIN, 4), (i32::MAX, 0)),
        ((0, -3), (8, 8), (0, i32::MAX - 1)),
    ];
    for (at, size, from) in cases {
        assert!(
            !rop2_at(&mut result, at, size, &source, from, Rop2::COPY),
            "at={at:?} size={size:?} from={from:?}"
        );
        assert_eq!(result, original);
    }

    let mut x = Rgn1::new(i32::MIN + 1, -5, 0);
    let mut y = Rgn1::same(0, 8);
    assert_eq!(fill(&mut result, &mut x, &mut y, Rop2::Dn), Ok(false));
    let mut x = Rgn1::same(i32::MAX, i32::MAX);
    assert_eq!(fill(&mut result, &mut x, &mut y, Rop2::Dn), Ok(false));
    assert_eq!(result, original);
}
