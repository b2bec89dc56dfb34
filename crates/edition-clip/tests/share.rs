use std::sync::Mutex;

use edition_clip::{
    BrandedImage, Branding, ClipError, Compositor, Delivery, NoShareSurface, ShareExporter,
    ShareOutcome, SharePayload, ShareResponse, ShareSurface, TextPainter, TextStyle,
};
use edition_model::DateKey;
use image::{Rgba, RgbaImage};

struct Blank;

impl TextPainter for Blank {
    fn measure(&mut self, _: &str, _: TextStyle) -> f32 {
        0.0
    }

    fn draw(&mut self, _: &mut RgbaImage, _: &str, _: f32, _: f32, _: TextStyle) {}
}

fn clip() -> BrandedImage {
    let branding = Branding::new(RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 255]))).unwrap();
    let crop = RgbaImage::from_pixel(600, 100, Rgba([200, 200, 200, 255]));
    Compositor::new(branding, Blank)
        .compose(Some(&crop), DateKey::parse("08-03-2025").unwrap())
        .unwrap()
}

/// Surface that replays a scripted response and remembers what it got.
struct Scripted {
    response: fn() -> edition_clip::Result<ShareResponse>,
    received: Mutex<Vec<SharePayload>>,
}

impl Scripted {
    fn new(response: fn() -> edition_clip::Result<ShareResponse>) -> Self {
        Self {
            response,
            received: Mutex::new(Vec::new()),
        }
    }
}

impl ShareSurface for Scripted {
    fn supports_files(&self) -> bool {
        true
    }

    async fn share(&self, payload: SharePayload) -> edition_clip::Result<ShareResponse> {
        self.received.lock().unwrap().push(payload);
        (self.response)()
    }
}

#[tokio::test]
async fn completed_share_is_shared() {
    let exporter = ShareExporter::new(Scripted::new(|| Ok(ShareResponse::Completed)));
    let outcome = exporter.share(&clip()).await.unwrap();
    assert_eq!(outcome, ShareOutcome::Shared);
}

#[tokio::test]
async fn payload_carries_message_and_png() {
    let surface = Scripted::new(|| Ok(ShareResponse::Completed));
    let exporter = ShareExporter::new(surface).with_message("Tom City", "Look at this");
    exporter.share(&clip()).await.unwrap();

    let received = exporter.surface().received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let payload = &received[0];
    assert_eq!(payload.title, "Tom City");
    assert_eq!(payload.text, "Look at this");
    assert!(payload.file.file_name.starts_with("Clip-"));
    assert_eq!(
        image::load_from_memory(&payload.file.bytes)
            .unwrap()
            .width(),
        600
    );
}

#[tokio::test]
async fn dismissal_is_cancelled_not_error() {
    let exporter = ShareExporter::new(Scripted::new(|| Ok(ShareResponse::Dismissed)));
    assert_eq!(
        exporter.share(&clip()).await.unwrap(),
        ShareOutcome::Cancelled
    );
}

#[tokio::test]
async fn surface_failure_is_cancelled() {
    let exporter = ShareExporter::new(Scripted::new(|| {
        Err(ClipError::Share(std::io::Error::other("share sheet crashed")))
    }));
    assert_eq!(
        exporter.deliver(&clip()).await.unwrap(),
        Delivery::Cancelled
    );
}

#[tokio::test]
async fn unsupported_surface_falls_back_to_download() {
    let exporter = ShareExporter::new(NoShareSurface);
    assert_eq!(
        exporter.share(&clip()).await.unwrap(),
        ShareOutcome::Unsupported
    );

    let Delivery::Downloaded(file) = exporter.deliver(&clip()).await.unwrap() else {
        panic!("expected a download");
    };
    assert!(file.file_name.starts_with("Clip-"));
    assert!(file.file_name.ends_with(".png"));
    assert_eq!(file.mime_type, "image/png");
    assert!(image::load_from_memory(&file.bytes).is_ok());
}

#[test]
fn two_downloads_get_different_names() {
    let exporter = ShareExporter::new(NoShareSurface);
    let image = clip();
    let first = exporter.download(&image).unwrap();
    let second = exporter.download(&image).unwrap();
    assert_ne!(first.file_name, second.file_name);
}
