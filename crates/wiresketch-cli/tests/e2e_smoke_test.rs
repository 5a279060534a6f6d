use std::{fs, path::PathBuf};

use tempfile::tempdir;

use wiresketch_cli::{Args, run};

/// Collects all .wsk files from a directory
fn collect_wsk_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("wsk")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo descriptions live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &PathBuf, output: PathBuf) -> Args {
    let mut args = Args::new(
        input.to_string_lossy(),
        output.to_string_lossy(),
    );
    args.log_level = "off".to_string();
    args
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_wsk_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!("{}.svg", demo_path.file_stem().unwrap().to_string_lossy());
        let output_path = temp_dir.path().join(output_filename);

        match run(&args(demo_path, output_path.clone())) {
            Ok(()) => {
                let svg = fs::read_to_string(&output_path).expect("output written");
                if !svg.contains(r#"class="wire""#) {
                    failed_demos.push((demo_path.clone(), "no wires rendered".to_string()));
                }
            }
            Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_wsk_files(demos_path().join("errors"));

    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args(demo_path, output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_lenient_mode_renders_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    for demo_path in collect_wsk_files(demos_path().join("errors")) {
        let output_path = temp_dir
            .path()
            .join(format!("{}.svg", demo_path.file_stem().unwrap().to_string_lossy()));
        let mut args = args(&demo_path, output_path.clone());
        args.lenient = true;

        run(&args).unwrap_or_else(|e| panic!("{}: {e}", demo_path.display()));
        assert!(output_path.exists());
    }
}

#[test]
fn e2e_routing_override() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("curved.svg");
    let mut args = args(&demos_path().join("blink.wsk"), output_path.clone());
    args.routing = Some("curved".to_string());

    run(&args).expect("curved render succeeds");
    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains(" C "));

    args.routing = Some("zigzag".to_string());
    assert!(run(&args).is_err());
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("absent.wsk");

    assert!(run(&args(&input, temp_dir.path().join("out.svg"))).is_err());
}
