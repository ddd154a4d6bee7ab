//! Frame filtering through the built subscriber

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;
use vcr_core::args;
use vcr_logging::{recorder, LogConfig, VcrSubscriberBuilder};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Captured {
    fn events(&self) -> Vec<Value> {
        let bytes = self.0.lock().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn tags(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter_map(|event| event["tag"].as_str().map(str::to_string))
            .collect()
    }
}

fn builder(captured: &Captured) -> VcrSubscriberBuilder {
    VcrSubscriberBuilder::new()
        .with_env_filter(false)
        .with_writer(captured.clone())
}

#[test]
fn test_frame_level_selects_vcr_events() {
    let captured = Captured::default();
    let subscriber = builder(&captured)
        .with_level("error")
        .with_frame_level("warn")
        .build()
        .unwrap();

    let app = recorder("app");
    tracing::subscriber::with_default(subscriber, || {
        app.debug(args!["dropped"]).unwrap();
        app.info(args!["dropped"]).unwrap();
        app.warn(args!["kept", 1]).unwrap();
        app.error(args!["kept", 2]).unwrap();
    });

    assert_eq!(captured.tags(), vec!["app:warn", "app:error"]);

    let events = captured.events();
    assert_eq!(events[0]["target"], "vcr");
    assert_eq!(events[0]["args"], r#"["kept",1]"#);
}

#[test]
fn test_frames_pass_below_default_level() {
    let captured = Captured::default();
    let subscriber = builder(&captured)
        .with_level("error")
        .with_frame_level("debug")
        .build()
        .unwrap();

    let app = recorder("svc");
    tracing::subscriber::with_default(subscriber, || {
        app.extend("db").debug(args!["query"]).unwrap();
        tracing::warn!(target: "other", "outside the frame target");
    });

    // The application's own warning is below `error`; the debug frame is not
    // below the frame level.
    assert_eq!(captured.tags(), vec!["svc:db:debug"]);
    assert_eq!(captured.events().len(), 1);
}

#[test]
fn test_disabled_frames_are_suppressed() {
    let captured = Captured::default();
    let subscriber = builder(&captured)
        .with_level("info")
        .with_frames(false)
        .build()
        .unwrap();

    let app = recorder("quiet");
    tracing::subscriber::with_default(subscriber, || {
        app.error(args!["never seen"]).unwrap();
        tracing::info!(target: "other", marker = "still seen", "plain event");
    });

    let events = captured.events();
    assert!(captured.tags().is_empty());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["target"], "other");
    assert_eq!(events[0]["marker"], "still seen");
}

#[test]
fn test_testing_preset_keeps_warn_frames() {
    let captured = Captured::default();
    let subscriber = builder(&captured)
        .with_config(LogConfig::testing())
        .build()
        .unwrap();

    let app = recorder("suite");
    tracing::subscriber::with_default(subscriber, || {
        app.info(args!["noise"]).unwrap();
        app.warn(args!["signal"]).unwrap();
    });

    assert_eq!(captured.tags(), vec!["suite:warn"]);
}
