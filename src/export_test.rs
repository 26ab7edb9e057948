use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Notify, Semaphore};

use super::*;

const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

struct FakeRasterizer {
    fail: Option<String>,
    calls: AtomicUsize,
}

impl FakeRasterizer {
    fn ok() -> Arc<Self> {
        Arc::new(Self { fail: None, calls: AtomicUsize::new(0) })
    }

    fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self { fail: Some(msg.into()), calls: AtomicUsize::new(0) })
    }
}

#[async_trait::async_trait]
impl Rasterizer for FakeRasterizer {
    async fn render_png(&self, _card: &CardState, pixel_ratio: f64) -> Result<Vec<u8>, String> {
        assert!((pixel_ratio - 2.0).abs() < f64::EPSILON);
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail {
            Some(msg) => Err(msg.clone()),
            None => Ok(PNG_MAGIC.to_vec()),
        }
    }
}

/// Blocks inside `render_png` until the test opens the gate.
struct GatedRasterizer {
    started: Notify,
    gate: Semaphore,
}

#[async_trait::async_trait]
impl Rasterizer for GatedRasterizer {
    async fn render_png(&self, _card: &CardState, _pixel_ratio: f64) -> Result<Vec<u8>, String> {
        self.started.notify_one();
        let _permit = self.gate.acquire().await.map_err(|e| e.to_string())?;
        Ok(PNG_MAGIC.to_vec())
    }
}

struct FixedShare(ShareAttempt);

#[async_trait::async_trait]
impl ShareTarget for FixedShare {
    async fn share(&self, image: &ExportedImage) -> ShareAttempt {
        assert_eq!(image.file_name, SHARE_FILE_NAME);
        self.0.clone()
    }
}

#[test]
fn file_name_is_timestamped() {
    assert_eq!(export_file_name(1_700_000_000_123), "mood-card-1700000000123.png");
}

#[tokio::test]
async fn download_renders_png() {
    let raster = FakeRasterizer::ok();
    let exporter = Exporter::new(raster.clone());

    let image = exporter.download(&CardState::default()).await.unwrap();
    assert_eq!(image.png, PNG_MAGIC);
    assert!(image.file_name.starts_with("mood-card-"));
    assert!(image.file_name.ends_with(".png"));
    assert_eq!(raster.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn render_failure_carries_screenshot_hint() {
    let exporter = Exporter::new(FakeRasterizer::failing("tainted canvas"));

    let err = exporter.download(&CardState::default()).await.unwrap_err();
    assert_eq!(err, ExportError::Render("tainted canvas".into()));
    assert!(err.to_string().contains("screenshot"));

    // The slot is released after a failure.
    assert!(matches!(exporter.download(&CardState::default()).await, Err(ExportError::Render(_))));
}

#[tokio::test]
async fn second_download_while_rendering_is_busy() {
    let raster = Arc::new(GatedRasterizer { started: Notify::new(), gate: Semaphore::new(0) });
    let exporter = Arc::new(Exporter::new(raster.clone()));

    let first = {
        let exporter = exporter.clone();
        tokio::spawn(async move { exporter.download(&CardState::default()).await })
    };
    raster.started.notified().await;

    assert_eq!(exporter.download(&CardState::default()).await, Err(ExportError::Busy));

    raster.gate.add_permits(1);
    assert!(first.await.unwrap().is_ok());

    raster.gate.add_permits(1);
    assert!(exporter.download(&CardState::default()).await.is_ok());
}

#[tokio::test]
async fn share_outcomes() {
    let exporter = Exporter::new(FakeRasterizer::ok());
    let card = CardState::default();

    let shared = exporter.share(&card, &FixedShare(ShareAttempt::Shared)).await;
    assert_eq!(shared, Ok(ShareOutcome::Shared));

    let cancelled = exporter.share(&card, &FixedShare(ShareAttempt::Cancelled("AbortError".into()))).await;
    assert_eq!(cancelled, Ok(ShareOutcome::Cancelled));

    let failed = exporter.share(&card, &FixedShare(ShareAttempt::Failed("NotAllowed".into()))).await;
    assert_eq!(failed.unwrap_err().error_code(), "E_EXPORT_SHARE");
}

#[tokio::test]
async fn unavailable_share_falls_back_to_download() {
    let exporter = Exporter::new(FakeRasterizer::ok());
    let outcome = exporter.share(&CardState::default(), &FixedShare(ShareAttempt::Unavailable)).await.unwrap();

    let ShareOutcome::Downloaded(image) = outcome else {
        panic!("expected download fallback, got {outcome:?}");
    };
    assert_eq!(image.file_name, SHARE_FILE_NAME);
    assert_eq!(image.png, PNG_MAGIC);
}
