extern crate lux;
extern crate rand;

use std::cmp::Ordering;

use lux::prelude::*;
use rand::{thread_rng, Rng};

fn random_line<R: Rng>(rng: &mut R) -> LineSettings {
    // Few distinct values, so equal settings actually occur. Two of the reds
    // pack into the same byte.
    let reds = [0.0, 0.5, 0.501, 1.0];
    let width = rng.gen_range(0, 4) as f32 * 0.5;
    let color = Color::new(
        reds[rng.gen_range(0, reds.len())],
        rng.gen_range(0, 2) as f32,
        1.0,
        1.0,
    );

    LineSettings::new(width, color)
}

#[test]
fn line_order_is_total() {
    let mut rng = thread_rng();
    let items: Vec<_> = (0..64).map(|_| random_line(&mut rng)).collect();

    for a in &items {
        assert_eq!(LINE_2D.order(a, a), Ordering::Equal);
        for b in &items {
            let ab = LINE_2D.order(a, b);
            assert_eq!(ab, LINE_2D.order(b, a).reverse());
            assert_eq!(ab == Ordering::Equal, a == b);

            for c in &items {
                if ab != Ordering::Greater && LINE_2D.order(b, c) != Ordering::Greater {
                    assert_ne!(LINE_2D.order(a, c), Ordering::Greater);
                }
            }
        }
    }
}

#[test]
fn sorted_batches_group_equal_settings() {
    let mut rng = thread_rng();
    let mut items: Vec<_> = (0..128).map(|_| random_line(&mut rng)).collect();
    items.sort_by(|a, b| LINE_2D.order(a, b));

    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            assert_ne!(LINE_2D.order(a, b), Ordering::Greater);
        }
    }

    for v in items.windows(2) {
        if v[0].width == v[1].width {
            assert_ne!(order_color(v[0].color, v[1].color), Ordering::Greater);
        } else {
            assert!(v[0].width < v[1].width);
        }
    }
}

#[test]
fn floats() {
    let mut rng = thread_rng();
    for _ in 0..256 {
        let a: f32 = rng.gen_range(-1000.0, 1000.0);
        let b: f32 = rng.gen_range(-1000.0, 1000.0);
        assert_eq!(order_f32(a, b), a.partial_cmp(&b).unwrap());
    }
}
