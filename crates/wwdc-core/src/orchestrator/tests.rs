use super::*;
use crate::download::StreamDownloader;
use crate::policy::Quality;
use std::cell::RefCell;

/// Writes the URL as file content; records every call.
#[derive(Default)]
struct FakeDirect {
    calls: RefCell<Vec<(String, PathBuf)>>,
    fail_with_write_error: bool,
}

impl DirectDownloader for FakeDirect {
    fn download(&self, url: &str, dest: &Path) -> Result<u64, AssetError> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), dest.to_path_buf()));
        if self.fail_with_write_error {
            return Err(AssetError::WriteFailure {
                path: dest.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        std::fs::write(dest, url.as_bytes()).unwrap();
        Ok(url.len() as u64)
    }
}

#[derive(Default)]
struct FakeStream {
    calls: RefCell<Vec<(String, PathBuf, String)>>,
}

impl StreamDownloader for FakeStream {
    fn download_stream(&self, url: &str, dir: &Path, stem: &str) -> Result<PathBuf, AssetError> {
        self.calls
            .borrow_mut()
            .push((url.to_string(), dir.to_path_buf(), stem.to_string()));
        let path = self.output_path(dir, stem);
        std::fs::write(&path, b"stream").unwrap();
        Ok(path)
    }
}

const VIDEO: &str = "http://devstreaming.apple.com/videos/wwdc/2016/104ab/104/104_hd_whats_new.mp4";
const PDF: &str = "http://devstreaming.apple.com/videos/wwdc/2016/104ab/104/104_whats_new.pdf";
const HLS: &str = "https://devstreaming-cdn.apple.com/videos/wwdc/2016/104ab/104/hls_vod_mvp.m3u8";

fn session(video: VideoSource, pdf: Option<&str>, title: Option<&str>) -> ResolvedSession {
    ResolvedSession {
        year: "2016".to_string(),
        session_id: "104".to_string(),
        title: title.map(str::to_string),
        video,
        pdf_url: pdf.map(str::to_string),
    }
}

fn policy(root: &Path) -> DownloadPolicy {
    DownloadPolicy {
        quality: Quality::Hd,
        ..DownloadPolicy::new(root)
    }
}

#[test]
fn pdf_then_direct_video() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);

    let outcomes = orch.process(
        session(VideoSource::DirectFile(VIDEO.to_string()), Some(PDF), Some("Swift")),
        &policy(root.path()),
    );

    let dir = root.path().join("WWDC-2016");
    assert!(dir.is_dir());
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].asset, AssetKind::Pdf);
    assert_eq!(outcomes[1].asset, AssetKind::Video);
    match &outcomes[0].status {
        OutcomeStatus::Downloaded { path, .. } => assert_eq!(path, &dir.join("104-Swift.pdf")),
        other => panic!("expected Downloaded, got {other:?}"),
    }
    match &outcomes[1].status {
        OutcomeStatus::Downloaded { path, bytes } => {
            assert_eq!(path, &dir.join("104-Swift.mp4"));
            assert_eq!(*bytes, VIDEO.len() as u64);
        }
        other => panic!("expected Downloaded, got {other:?}"),
    }
    assert_eq!(direct.calls.borrow().len(), 2);
    assert!(stream.calls.borrow().is_empty());
}

#[test]
fn second_run_is_a_no_op() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);
    let resolved = session(VideoSource::DirectFile(VIDEO.to_string()), Some(PDF), None);

    let first = orch.process(resolved.clone(), &policy(root.path()));
    assert!(first
        .iter()
        .all(|o| matches!(o.status, OutcomeStatus::Downloaded { .. })));

    let second = orch.process(resolved, &policy(root.path()));
    assert_eq!(second.len(), 2);
    assert!(second
        .iter()
        .all(|o| matches!(o.status, OutcomeStatus::AlreadyPresent { .. })));
    assert_eq!(direct.calls.borrow().len(), 2, "no second transfer");
}

#[test]
fn segmented_stream_goes_to_stream_downloader() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);

    let outcomes = orch.process(
        session(VideoSource::SegmentedStream(HLS.to_string()), None, None),
        &DownloadPolicy {
            wants_pdf: false,
            ..policy(root.path())
        },
    );

    assert_eq!(outcomes.len(), 1);
    let dir = root.path().join("WWDC-2016");
    match &outcomes[0].status {
        OutcomeStatus::Streamed { path } => assert_eq!(path, &dir.join("104.mp4")),
        other => panic!("expected Streamed, got {other:?}"),
    }
    assert!(direct.calls.borrow().is_empty());
    let calls = stream.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (HLS.to_string(), dir, "104".to_string()));
}

#[test]
fn stream_already_present_is_not_delegated_again() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);
    let resolved = session(VideoSource::SegmentedStream(HLS.to_string()), None, None);
    let p = DownloadPolicy {
        wants_pdf: false,
        ..policy(root.path())
    };

    orch.process(resolved.clone(), &p);
    let second = orch.process(resolved, &p);
    assert!(matches!(
        second[0].status,
        OutcomeStatus::AlreadyPresent { .. }
    ));
    assert_eq!(stream.calls.borrow().len(), 1);
}

#[test]
fn transport_override_delegates_direct_files() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);

    let outcomes = orch.process(
        session(VideoSource::DirectFile(VIDEO.to_string()), None, None),
        &DownloadPolicy {
            wants_pdf: false,
            transport_override: true,
            ..policy(root.path())
        },
    );

    assert!(matches!(outcomes[0].status, OutcomeStatus::Streamed { .. }));
    assert!(direct.calls.borrow().is_empty());
    assert_eq!(stream.calls.borrow()[0].0, VIDEO);
}

#[test]
fn missing_assets_are_reported_not_found() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);

    let outcomes = orch.process(session(VideoSource::None, None, None), &policy(root.path()));

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o.status, OutcomeStatus::NotFound)));
    assert!(
        !root.path().join("WWDC-2016").exists(),
        "directory only created when something is written"
    );
}

#[test]
fn pdf_skipped_entirely_when_not_wanted() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);

    let outcomes = orch.process(
        session(VideoSource::DirectFile(VIDEO.to_string()), Some(PDF), None),
        &DownloadPolicy {
            wants_pdf: false,
            ..policy(root.path())
        },
    );

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].asset, AssetKind::Video);
}

#[test]
fn pdf_only_skips_video() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);

    let outcomes = orch.process(
        session(VideoSource::DirectFile(VIDEO.to_string()), Some(PDF), None),
        &DownloadPolicy {
            pdf_only: true,
            ..policy(root.path())
        },
    );

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].asset, AssetKind::Pdf);
    assert_eq!(direct.calls.borrow()[0].0, PDF);
}

#[test]
fn write_failure_does_not_stop_video() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect {
        fail_with_write_error: true,
        ..FakeDirect::default()
    };
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);

    let outcomes = orch.process(
        session(VideoSource::DirectFile(VIDEO.to_string()), Some(PDF), None),
        &policy(root.path()),
    );

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.status.is_failure()));
    assert!(matches!(
        outcomes[0].status,
        OutcomeStatus::Failed(AssetError::WriteFailure { .. })
    ));
    assert_eq!(direct.calls.borrow().len(), 2);
}

#[test]
fn unwritable_destination_fails_each_asset() {
    let root = tempfile::tempdir().unwrap();
    let blocker = root.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);

    let outcomes = orch.process(
        session(VideoSource::DirectFile(VIDEO.to_string()), Some(PDF), None),
        &policy(&blocker),
    );

    assert_eq!(outcomes.len(), 2);
    for o in &outcomes {
        assert!(matches!(
            o.status,
            OutcomeStatus::Failed(AssetError::WriteFailure { .. })
        ));
    }
    assert!(direct.calls.borrow().is_empty());
}

#[test]
fn mov_extension_preserved() {
    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let stream = FakeStream::default();
    let orch = DownloadOrchestrator::new(&direct, &stream);
    let mov = "http://devstreaming.apple.com/videos/wwdc/2014/228xx/228/228_hd_a.mov";

    let mut resolved = session(VideoSource::DirectFile(mov.to_string()), None, None);
    resolved.year = "2014".to_string();
    resolved.session_id = "228".to_string();
    let outcomes = orch.process(
        resolved,
        &DownloadPolicy {
            wants_pdf: false,
            ..policy(root.path())
        },
    );

    match &outcomes[0].status {
        OutcomeStatus::Downloaded { path, .. } => {
            assert_eq!(path, &root.path().join("WWDC-2014").join("228.mov"))
        }
        other => panic!("expected Downloaded, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn failed_stream_is_retried_on_next_run() {
    use crate::config::StreamConfig;
    use crate::download::ExternalStreamDownloader;

    let root = tempfile::tempdir().unwrap();
    let direct = FakeDirect::default();
    let resolved = session(VideoSource::SegmentedStream(HLS.to_string()), None, None);
    let p = DownloadPolicy {
        wants_pdf: false,
        ..policy(root.path())
    };
    let sh = |script: &str| {
        ExternalStreamDownloader::new(&StreamConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string(), "{output}".to_string()],
        })
    };

    let broken = sh("printf partial > \"$0\"; exit 1");
    let first = DownloadOrchestrator::new(&direct, &broken).process(resolved.clone(), &p);
    assert!(first[0].status.is_failure());

    let working = sh("printf complete > \"$0\"");
    let second = DownloadOrchestrator::new(&direct, &working).process(resolved, &p);
    match &second[0].status {
        OutcomeStatus::Streamed { path } => {
            assert_eq!(std::fs::read_to_string(path).unwrap(), "complete")
        }
        other => panic!("expected Streamed, got {other:?}"),
    }
}
