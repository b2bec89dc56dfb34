//! Text and compositing through a real font.

use edition_clip::{BrandLayout, Branding, Compositor, SwashPainter, TextPainter, TextStyle};
use edition_model::DateKey;
use image::{Rgba, RgbaImage};

const FONT: &[u8] = include_bytes!("fixtures/DejaVuSansMono.ttf");

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn painter() -> SwashPainter {
    SwashPainter::new(FONT.to_vec()).unwrap()
}

fn style(size: f32) -> TextStyle {
    TextStyle {
        size,
        weight: 400.0,
        color: INK,
    }
}

fn date() -> DateKey {
    DateKey::parse("08-03-2025").unwrap()
}

#[test]
fn measure_grows_with_text_and_size() {
    let mut painter = painter();
    let two = painter.measure("MM", style(20.0));
    let four = painter.measure("MMMM", style(20.0));
    assert!(two > 0.0);
    // monospaced face
    assert!((four - 2.0 * two).abs() < 0.01);
    assert!(painter.measure("MM", style(40.0)) > two * 1.9);
    assert_eq!(painter.measure("", style(20.0)), 0.0);
}

#[test]
fn draw_inks_pixels_right_of_the_pen_and_above_the_baseline() {
    let mut painter = painter();
    let mut canvas = RgbaImage::from_pixel(200, 60, WHITE);
    painter.draw(&mut canvas, "Tom", 20.0, 40.0, style(32.0));

    let inked: Vec<(u32, u32)> = canvas
        .enumerate_pixels()
        .filter(|(_, _, pixel)| **pixel != WHITE)
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!inked.is_empty());
    assert!(inked.iter().all(|&(x, y)| x >= 18 && y <= 42));
}

#[test]
fn same_crop_and_date_compose_identically() {
    let logo = RgbaImage::from_pixel(300, 100, Rgba([20, 20, 20, 255]));
    let mut compositor = Compositor::new(Branding::new(logo).unwrap(), painter());
    let crop = RgbaImage::from_fn(800, 1000, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255])
    });

    let first = compositor.compose(Some(&crop), date()).unwrap();
    let second = compositor.compose(Some(&crop), date()).unwrap();
    assert_eq!(first.image().as_raw(), second.image().as_raw());
}

#[test]
fn real_text_lands_in_header_and_footer() {
    let logo = RgbaImage::from_pixel(300, 100, Rgba([20, 20, 20, 255]));
    let mut compositor = Compositor::new(Branding::new(logo).unwrap(), painter());
    let crop = RgbaImage::from_pixel(800, 1000, Rgba([90, 90, 90, 255]));
    let branded = compositor.compose(Some(&crop), date()).unwrap();
    let image = branded.image();
    let layout = BrandLayout::for_crop(800, 1000);

    // accent-coloured date left of the logo
    let date_inked = (20..200)
        .flat_map(|x| (60..92).map(move |y| (x, y)))
        .any(|(x, y)| {
            let Rgba([r, g, b, _]) = *image.get_pixel(x, y);
            r > 150 && g < 100 && b < 100
        });
    assert!(date_inked);

    // white footer lines on the dark band
    let footer_inked = (0..layout.final_width)
        .flat_map(|x| (layout.footer_top..layout.final_height).map(move |y| (x, y)))
        .any(|(x, y)| image.get_pixel(x, y)[0] > 200);
    assert!(footer_inked);
}
