//! Stress tests for concurrent dispatch and deep nesting

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use vcr_core::tapes::MemoryTape;
use vcr_core::{args, formatter_fn, Vcr};

/// Many threads logging through one shared logger
#[test]
fn test_concurrent_dispatch_on_shared_logger() {
    const NUM_THREADS: usize = 16;
    const ITERATIONS: usize = 500;

    let capture = MemoryTape::new();
    let mut root = Vcr::new("app");
    root.formatter(formatter_fn(|mut args| {
        args.push(serde_json::json!("formatted"));
        Ok(args)
    }))
    .use_tape(capture.clone());

    let root = Arc::new(root);
    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let start = Instant::now();

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|thread_id| {
            let root = Arc::clone(&root);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..ITERATIONS {
                    root.info(args![thread_id, i]).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let frames = capture.frames();
    assert_eq!(frames.len(), NUM_THREADS * ITERATIONS);
    assert!(frames.iter().all(|f| f.tag == "app:info" && f.args.len() == 3));

    let mut ids: Vec<&str> = frames.iter().map(|f| f.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), NUM_THREADS * ITERATIONS);

    println!(
        "Dispatched {} frames from {} threads in {:?}",
        frames.len(),
        NUM_THREADS,
        start.elapsed()
    );
}

/// Children created and used on separate threads
#[test]
fn test_children_on_separate_threads() {
    const NUM_THREADS: usize = 8;

    let capture = MemoryTape::new();
    let mut root = Vcr::new("app");
    root.use_tape(capture.clone());

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|n| {
            let child = root.extend(&format!("worker{}", n));
            thread::spawn(move || {
                for _ in 0..100 {
                    child.debug(args!["tick"]).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let frames = capture.frames();
    assert_eq!(frames.len(), NUM_THREADS * 100);
    for n in 0..NUM_THREADS {
        let tag = format!("app:worker{}:debug", n);
        assert_eq!(frames.iter().filter(|f| f.tag == tag).count(), 100);
    }
}

/// A long chain of nested loggers
#[test]
fn test_deep_extend_chain() {
    let capture = MemoryTape::new();
    let mut vcr = Vcr::new("root");
    vcr.use_tape(capture.clone());

    for _ in 0..1000 {
        vcr = vcr.extend("n");
    }

    vcr.info(args![]).unwrap();
    let frame = capture.last().unwrap();
    assert_eq!(frame.tag.matches(':').count(), 1001);
    assert!(frame.tag.starts_with("root:n:n"));
    assert!(frame.tag.ends_with(":n:info"));
}
