use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const PHYSICS_FORM: &str = r#"{ "sections": [
    { "title": "Physics", "marks": 5, "attempt": "Attempt all questions",
      "questions": "What is mass?\nDefine force." }
] }"#;

const NO_QUESTIONS: &str =
    "Please add at least one question in any section before generating the paper.";
const INCOMPLETE: &str =
    "Please make sure that the title and attempt description for all sections are filled.";

fn qpaper(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qpaper"))
        .args(args)
        .output()
        .expect("Failed to run qpaper")
}

fn qpaper_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_qpaper"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run qpaper");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn init_writes_a_blank_form_that_check_rejects_with_both_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let form = dir.path().join("paper.json");

    let init = qpaper(&["init", "--sections", "3", "-o", path_arg(&form)]);
    assert!(init.status.success());
    let parsed = qpaper::PaperForm::load(&form).unwrap();
    assert_eq!(parsed, qpaper::PaperForm::blank(3));

    let check = qpaper(&["check", path_arg(&form)]);
    assert_eq!(check.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&check.stderr);
    let no_questions = stderr.find(NO_QUESTIONS).expect("missing no-questions warning");
    let incomplete = stderr.find(INCOMPLETE).expect("missing incomplete-sections warning");
    assert!(no_questions < incomplete);
    assert_eq!(stderr.matches("Warning:").count(), 2);
}

#[test]
fn check_reports_only_the_failing_flag() {
    let dir = tempfile::tempdir().unwrap();
    let form = dir.path().join("paper.json");
    std::fs::write(
        &form,
        r#"{ "sections": [
            { "title": "Optics", "attempt": "Attempt any one" },
            { "title": "", "attempt": "Attempt all", "questions": "What is light?" }
        ] }"#,
    )
    .unwrap();

    let check = qpaper(&["check", path_arg(&form)]);
    assert_eq!(check.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&check.stderr);
    assert!(stderr.contains(INCOMPLETE));
    assert!(!stderr.contains(NO_QUESTIONS));
    assert!(stderr.contains("Incomplete section(s): B"));
}

#[test]
fn generate_writes_both_documents() {
    let dir = tempfile::tempdir().unwrap();
    let form = dir.path().join("paper.json");
    let out_dir = dir.path().join("out");
    std::fs::write(&form, PHYSICS_FORM).unwrap();

    let generate = qpaper(&["generate", path_arg(&form), "--out-dir", path_arg(&out_dir)]);
    assert!(generate.status.success(), "{}", String::from_utf8_lossy(&generate.stderr));

    let stdout = String::from_utf8_lossy(&generate.stdout);
    assert!(stdout.contains("question_paper.pdf (application/pdf)"));
    assert!(stdout.contains(
        "question_paper.docx (application/vnd.openxmlformats-officedocument.wordprocessingml.document)"
    ));
    assert!(std::fs::read(out_dir.join("question_paper.pdf")).unwrap().starts_with(b"%PDF"));
    assert!(std::fs::read(out_dir.join("question_paper.docx")).unwrap().starts_with(b"PK"));
}

#[test]
fn generate_refuses_an_incomplete_form() {
    let dir = tempfile::tempdir().unwrap();
    let form = dir.path().join("paper.json");
    std::fs::write(&form, r#"{ "sections": [ { "title": "", "questions": "Q" } ] }"#).unwrap();

    let generate = qpaper(&["generate", path_arg(&form), "--out-dir", path_arg(dir.path())]);
    assert_eq!(generate.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&generate.stderr).contains(INCOMPLETE));
    assert!(!dir.path().join("question_paper.pdf").exists());
    assert!(!dir.path().join("question_paper.docx").exists());
}

#[test]
fn preview_reads_the_form_from_stdin() {
    let preview = qpaper_with_stdin(&["preview", "-"], PHYSICS_FORM);
    assert!(preview.status.success());
    let stdout = String::from_utf8_lossy(&preview.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Section A: Physics - Attempt Attempt all questions each carrying 5 marks",
            "Q.1: What is mass?",
            "Q.2: Define force.",
            "",
        ]
    );
}

#[test]
fn malformed_form_is_an_error() {
    let preview = qpaper_with_stdin(&["preview", "-"], r#"{ "sections": [ { "marks": 0 } ] }"#);
    assert_eq!(preview.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&preview.stderr).contains("Error: invalid paper form"));
}
