use std::{fs, path::PathBuf};

use tempfile::tempdir;

use logicmap_cli::{Args, Command, run};

/// Collects all .lmx files from a directory
fn collect_lmx_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("lmx")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

#[test]
fn e2e_smoke_test_render_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_lmx_files(demos_dir());
    assert!(!demos.is_empty(), "No demo maps found in demos/");

    let mut failed = Vec::new();

    for demo_path in &demos {
        let output_filename = format!(
            "{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = Args {
            command: Command::Render {
                input: demo_path.to_string_lossy().to_string(),
                output: output_path.to_string_lossy().to_string(),
            },
            config: None,
            log_level: "off".to_string(),
        };

        if let Err(e) = run(&args) {
            failed.push((demo_path.clone(), e));
            continue;
        }

        let svg = fs::read_to_string(&output_path).expect("output file exists");
        assert!(svg.contains("<svg"), "Output should contain SVG tag");
        assert!(svg.contains("</svg>"), "Output should be complete SVG");
    }

    if !failed.is_empty() {
        eprintln!("\nDemo maps that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo map(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_bibliography_export() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("bib.txt");

    let args = Args {
        command: Command::Bib {
            input: demos_dir().join("thesis.lmx").to_string_lossy().to_string(),
            output: Some(output_path.to_string_lossy().to_string()),
        },
        config: None,
        log_level: "off".to_string(),
    };

    run(&args).expect("bibliography export should succeed");

    let text = fs::read_to_string(&output_path).expect("output file exists");
    assert!(text.contains("[Question] Why does the cache thrash under load?"));
    assert!(text.contains("A Survey of Cache Replacement Policies"));
    // nodes without references are skipped
    assert!(!text.contains("Adopt ARC"));
}

#[test]
fn e2e_smoke_test_validate_rejects_broken_documents() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let broken = temp_dir.path().join("broken.lmx");
    fs::write(
        &broken,
        r#"<LogicMap project="p"><Node type="Question" x="0" y="0"/></LogicMap>"#,
    )
    .expect("write broken file");

    let args = Args {
        command: Command::Validate {
            input: broken.to_string_lossy().to_string(),
        },
        config: None,
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err(), "Broken document should fail validation");
}

#[test]
fn e2e_smoke_test_validate_accepts_demos() {
    for demo_path in collect_lmx_files(demos_dir()) {
        let args = Args {
            command: Command::Validate {
                input: demo_path.to_string_lossy().to_string(),
            },
            config: None,
            log_level: "off".to_string(),
        };
        run(&args).unwrap_or_else(|e| panic!("{} failed: {e}", demo_path.display()));
    }
}
