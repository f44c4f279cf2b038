//! End-to-end runs against `tests/fixtures/fake-tika.sh`, which takes the
//! place of the java runtime. The jar path picks the script's behaviour.
#![cfg(unix)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tikawrap::{CommandLogger, TikaError, TikaWrapper};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn wrapper(mode: &str) -> TikaWrapper {
    let mut tw = TikaWrapper::new();
    tw.set_java_binary(fixture("fake-tika.sh"))
        .set_jar_path(mode)
        .set_timeout(Duration::from_secs(10));
    tw.set_file(fixture("doc.txt")).unwrap();
    tw
}

#[derive(Default)]
struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl CommandLogger for RecordingLogger {
    fn log_command(&self, command_line: &str) {
        self.lines.lock().unwrap().push(command_line.to_string());
    }
}

#[test]
fn extract_returns_trimmed_text() {
    let tw = wrapper("ok");
    assert_eq!(tw.extract().unwrap(), "La marine en ira mal");
}

#[test]
fn extract_passes_arguments_without_shell() {
    let mut tw = wrapper("echo-args");
    tw.set_output_format("text-main").unwrap();
    tw.set_file(fixture("name with 'quote'.txt")).unwrap();

    let output = tw.extract().unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "--text-main");
    assert_eq!(lines[1], "--encoding=UTF8");
    assert!(lines[2].ends_with("name with 'quote'.txt"));
}

#[test]
fn unknown_encoding_is_unsupported_encoding() {
    let mut tw = wrapper("ok");
    tw.set_output_encoding("PLOPO");

    match tw.extract() {
        Err(TikaError::UnsupportedEncoding(failure)) => {
            assert!(failure
                .error_output
                .contains("java.io.UnsupportedEncodingException"));
            assert_eq!(failure.exit_code, Some(1));
            assert!(failure.command.contains("'--encoding=PLOPO'"));
        }
        other => panic!("expected UnsupportedEncoding, got {other:?}"),
    }
}

#[test]
fn encoding_marker_on_stdout_is_matched_case_insensitively() {
    let tw = wrapper("encoding-stdout");
    assert!(matches!(tw.extract(), Err(TikaError::UnsupportedEncoding(_))));
}

#[test]
fn non_zero_exit_is_command_failed() {
    let tw = wrapper("fail");
    match tw.extract() {
        Err(TikaError::CommandFailed(failure)) => {
            assert_eq!(failure.exit_code, Some(3));
            assert!(failure.error_output.contains("TikaException"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn exception_marker_with_zero_exit_is_command_failed() {
    let tw = wrapper("crash-zero");
    match tw.extract() {
        Err(TikaError::CommandFailed(failure)) => {
            assert_eq!(failure.exit_code, Some(0));
            assert!(failure.output.contains("NullPointerException"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn timeout_kills_process_and_fails() {
    let mut tw = wrapper("sleep");
    tw.set_timeout(Duration::from_millis(300));

    let start = Instant::now();
    let result = tw.extract();

    assert!(start.elapsed() < Duration::from_secs(10));
    match result {
        Err(TikaError::CommandFailed(failure)) => {
            assert!(failure.exit_code.is_none());
            assert!(failure.error_output.contains("timeout"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn missing_runtime_is_command_failed() {
    let mut tw = wrapper("ok");
    tw.set_java_binary("/definitely/not/a/java");

    match tw.extract() {
        Err(error @ TikaError::CommandFailed(_)) => {
            assert!(error.to_string().contains("'/definitely/not/a/java'"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[test]
fn logger_receives_rendered_command_once() {
    let logger = Arc::new(RecordingLogger::default());
    let mut tw = wrapper("ok");
    tw.set_logger(logger.clone());

    let expected = tw.build_command().unwrap();
    tw.extract().unwrap();

    let lines = logger.lines.lock().unwrap();
    assert_eq!(*lines, vec![expected]);
}

#[test]
fn extract_is_repeatable() {
    let tw = wrapper("ok");
    assert_eq!(tw.extract().unwrap(), tw.extract().unwrap());
}

#[tokio::test]
async fn extract_async_inside_runtime() {
    let tw = wrapper("ok");
    assert_eq!(tw.extract_async().await.unwrap(), "La marine en ira mal");
}

#[test]
fn zero_timeout_means_no_deadline() {
    let mut tw = wrapper("ok");
    tw.set_timeout(Duration::ZERO);
    assert_eq!(tw.extract().unwrap(), "La marine en ira mal");
}

#[tokio::test(flavor = "multi_thread")]
async fn extract_blocks_inside_multi_thread_runtime() {
    let tw = wrapper("ok");
    assert_eq!(tw.extract().unwrap(), "La marine en ira mal");
}

#[tokio::test]
async fn extract_blocks_inside_current_thread_runtime() {
    let tw = wrapper("fail");
    assert!(matches!(tw.extract(), Err(TikaError::CommandFailed(_))));
    assert_eq!(wrapper("ok").extract().unwrap(), "La marine en ira mal");
}
