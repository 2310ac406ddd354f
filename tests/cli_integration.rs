//! Integration tests that run the CLI binary.

use std::io::Write;
use std::path::Path;
use std::process::{Output, Stdio};

use serde_json::json;

fn bin() -> std::process::Command {
    // CARGO_BIN_EXE_<name> uses the binary target name; hyphens require concat! for env!()
    let bin = env!(concat!("CARGO_BIN_EXE_itinerary", "-", "organizer"));
    let mut cmd = std::process::Command::new(bin);
    for var in [
        "OPENROUTER_API_KEY",
        "GOOGLE_API_KEY",
        "ITINERARY_PROVIDER",
        "OPENROUTER_MODEL",
        "OPENROUTER_BASE_URL",
        "ITINERARY_MODEL_PREFERENCES",
        "ITINERARY_CACHE_DIR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let output = bin()
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--duration"));
    assert!(stdout.contains("EXAMPLES"));
}

#[test]
fn cli_version_succeeds() {
    let output = bin()
        .arg("--version")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("itinerary-organizer"));
}

#[test]
fn cli_without_api_key_exits_with_error() {
    // Run from temp dir so dotenv() won't load .env from project root
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .arg("--sample")
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        !output.status.success(),
        "expected failure when OPENROUTER_API_KEY is not set"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("OPENROUTER_API_KEY"),
        "expected API key error message, got: {}",
        stderr
    );
}

#[test]
fn cli_gemini_without_key_names_google_key() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .args(["--sample", "--provider", "gemini"])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("GOOGLE_API_KEY"));
}

#[test]
fn cli_blank_input_is_rejected_before_config() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let mut child = bin()
        .args(["--input", "-"])
        .current_dir(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary not found - run cargo build first");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"   \n\t\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter some raw itinerary details"));
    assert!(!stderr.contains("OPENROUTER_API_KEY"));
}

#[test]
fn cli_show_prompt_needs_no_key() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = tmp.path().join("trip.txt");
    std::fs::write(&input, "Tours:\n- Night Safari\nTransfers:\n- Airport (Private)\n")
        .expect("write input");

    let output = bin()
        .args(["--show-prompt", "-d", "10N 11D", "-i"])
        .arg(&input)
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("- Night Safari"));
    assert!(stdout.contains("The trip duration is 10N 11D."));
    assert!(stdout.contains("🗓️Day 1 :"));
}

#[test]
fn cli_missing_input_file_fails() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .args(["--show-prompt", "-i", "does-not-exist.txt"])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist.txt"));
}

#[test]
fn cli_durations_lists_presets() {
    let output = bin()
        .arg("durations")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2N 3D"));
    assert!(stdout.contains("3N 4D  (default)"));
    assert!(stdout.contains("7N 8D"));
}

#[test]
fn cli_pipeline_failure_prints_fallback() {
    // Nothing listens on port 9, so the catalog fetch fails with a transport error.
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .arg("--sample")
        .env("OPENROUTER_API_KEY", "sk-test")
        .env("OPENROUTER_BASE_URL", "http://127.0.0.1:9")
        .env("ITINERARY_TIMEOUT_SECS", "5")
        .env("ITINERARY_CACHE_DIR", tmp.path())
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Could not generate itinerary. Please try again."));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not fetch model catalog"), "stderr: {}", stderr);
}

const CATALOG: &str = r#"{"data":[
    {"id":"openai/gpt-3.5-turbo","architecture":{"modality":"text->text"},"context_length":16385},
    {"id":"acme/embedder","architecture":{"modality":"text->embedding"},"context_length":8192}
]}"#;

fn chat_reply(content: &str) -> String {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]}).to_string()
}

/// Run `--sample` against a mock OpenRouter with the selection cache in `cache_dir`.
fn organize_against(server_url: &str, cache_dir: &Path, extra: &[&str]) -> Output {
    bin()
        .arg("--sample")
        .args(extra)
        .env("OPENROUTER_API_KEY", "sk-test")
        .env("OPENROUTER_BASE_URL", server_url)
        .env("ITINERARY_CACHE_DIR", cache_dir)
        .env("ITINERARY_TIMEOUT_SECS", "5")
        .current_dir(cache_dir)
        .output()
        .expect("binary not found - run cargo build first")
}

#[test]
fn cli_prints_normalized_itinerary() {
    let mut server = mockito::Server::new();
    let _catalog = server.mock("GET", "/models").with_body(CATALOG).create();
    let chat = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJson(
            json!({"model": "openai/gpt-3.5-turbo"}),
        ))
        .with_body(chat_reply(
            "Sure! Here is your plan.\n\n🗓️Day 1 : Arrival in Singapore\n→ Private transfer to hotel\n🗓️Day 2 : City Tour",
        ))
        .create();
    let tmp = tempfile::TempDir::new().expect("temp dir");

    let output = organize_against(&server.url(), tmp.path(), &[]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("🗓️Day 1 : Arrival in Singapore"), "stdout: {}", stdout);
    assert!(stdout.contains("🗓️Day 2 : City Tour"));
    assert!(!stdout.contains("Sure!"));
    assert!(!stdout.contains("Could not generate itinerary"));
    chat.assert();
}

#[test]
fn cli_reuses_selected_model_across_runs() {
    let mut server = mockito::Server::new();
    let catalog = server
        .mock("GET", "/models")
        .with_body(CATALOG)
        .expect(1)
        .create();
    let chat = server
        .mock("POST", "/chat/completions")
        .with_body(chat_reply("🗓️Day 1 : Arrival"))
        .expect(2)
        .create();
    let tmp = tempfile::TempDir::new().expect("temp dir");

    for _ in 0..2 {
        let output = organize_against(&server.url(), tmp.path(), &[]);
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    catalog.assert();
    chat.assert();
}

#[test]
fn cli_empty_completion_warns_without_fallback() {
    let mut server = mockito::Server::new();
    let _catalog = server.mock("GET", "/models").with_body(CATALOG).create();
    let _chat = server
        .mock("POST", "/chat/completions")
        .with_body(chat_reply(""))
        .create();
    let tmp = tempfile::TempDir::new().expect("temp dir");

    let output = organize_against(&server.url(), tmp.path(), &[]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Warning:"), "stderr: {}", stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Could not generate itinerary"));
}

#[test]
fn cli_verbose_shows_unauthorized_body() {
    let mut server = mockito::Server::new();
    let _catalog = server
        .mock("GET", "/models")
        .with_status(401)
        .with_body(r#"{"error":{"message":"User not found.","code":401}}"#)
        .create();
    let tmp = tempfile::TempDir::new().expect("temp dir");

    let output = organize_against(&server.url(), tmp.path(), &["-v"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Could not generate itinerary. Please try again."));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OPENROUTER_API_KEY"), "stderr: {}", stderr);
    assert!(stderr.contains("User not found."), "stderr: {}", stderr);
}
