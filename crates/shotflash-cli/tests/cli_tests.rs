//! CLI command parsing and end-to-end tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from` on mirrored
//! structs) and runs of the built `shotflash` binary against temporary
//! files.

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use std::path::PathBuf;

    use clap::{Args, Parser, Subcommand};

    #[derive(Parser, Debug)]
    #[command(name = "shotflash")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand, Debug)]
    enum TestCommands {
        Animate(TestAnimateArgs),
        Devices,
        Select {
            #[arg(short, long)]
            backend: PathBuf,
            #[arg(short, long, conflicts_with = "counts")]
            qubits: Option<usize>,
            #[arg(short, long)]
            counts: Option<PathBuf>,
        },
        Version,
    }

    #[derive(Args, Debug)]
    struct TestAnimateArgs {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        mode: Option<String>,
        #[arg(short, long)]
        device: Option<String>,
        #[arg(short, long)]
        backend: Option<PathBuf>,
        #[arg(long)]
        fps: Option<i64>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        intensity: Option<f32>,
        #[arg(long)]
        unlabelled: bool,
        #[arg(long)]
        assets: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        sequential: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    }

    #[test]
    fn test_parse_animate_minimal() {
        let cli = TestCli::try_parse_from(["shotflash", "animate", "-i", "counts.json"]).unwrap();
        match cli.command {
            TestCommands::Animate(args) => {
                assert_eq!(args.input, PathBuf::from("counts.json"));
                assert!(args.output.is_none());
                assert!(args.device.is_none());
                assert!(!args.unlabelled);
                assert!(!args.sequential);
            }
            _ => panic!("expected animate"),
        }
    }

    #[test]
    fn test_parse_animate_with_all_args() {
        let cli = TestCli::try_parse_from([
            "shotflash",
            "-vv",
            "animate",
            "-i",
            "counts.json",
            "-o",
            "out.gif",
            "--mode",
            "xray",
            "--device",
            "auto",
            "--backend",
            "backend.json",
            "--fps",
            "4",
            "--color",
            "#ff8800",
            "--intensity",
            "0.9",
            "--unlabelled",
            "--assets",
            "diagrams",
            "--seed",
            "42",
            "--sequential",
            "--config",
            "shotflash.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            TestCommands::Animate(args) => {
                assert_eq!(args.output, Some(PathBuf::from("out.gif")));
                assert_eq!(args.mode.as_deref(), Some("xray"));
                assert_eq!(args.device.as_deref(), Some("auto"));
                assert_eq!(args.fps, Some(4));
                assert_eq!(args.color.as_deref(), Some("#ff8800"));
                assert_eq!(args.intensity, Some(0.9));
                assert!(args.unlabelled);
                assert_eq!(args.seed, Some(42));
                assert!(args.sequential);
                assert_eq!(args.config, Some(PathBuf::from("shotflash.yaml")));
            }
            _ => panic!("expected animate"),
        }
    }

    #[test]
    fn test_parse_animate_missing_input() {
        let result = TestCli::try_parse_from(["shotflash", "animate", "-o", "out.gif"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_select_with_qubits() {
        let cli =
            TestCli::try_parse_from(["shotflash", "select", "-b", "backend.json", "-q", "7"])
                .unwrap();
        match cli.command {
            TestCommands::Select {
                backend,
                qubits,
                counts,
            } => {
                assert_eq!(backend, PathBuf::from("backend.json"));
                assert_eq!(qubits, Some(7));
                assert!(counts.is_none());
            }
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn test_parse_select_qubits_conflicts_with_counts() {
        let result = TestCli::try_parse_from([
            "shotflash",
            "select",
            "-b",
            "backend.json",
            "-q",
            "7",
            "-c",
            "counts.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_devices_and_version() {
        let cli = TestCli::try_parse_from(["shotflash", "devices"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Devices));
        let cli = TestCli::try_parse_from(["shotflash", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_parse_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["shotflash", "plot"]).is_err());
    }
}

// ============================================================================
// Binary runs
// ============================================================================

mod binary {
    use std::fs;
    use std::path::Path;
    use std::process::{Command, Output};

    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;

    fn shotflash(home: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_shotflash"))
            .args(args)
            .env("HOME", home)
            .env_remove("SHOTFLASH_MODE")
            .env_remove("SHOTFLASH_DEVICE")
            .env_remove("SHOTFLASH_FPS")
            .env_remove("SHOTFLASH_COLOR")
            .env_remove("SHOTFLASH_INTENSITY")
            .env_remove("SHOTFLASH_ASSETS")
            .output()
            .unwrap()
    }

    fn frame_count(path: &Path) -> usize {
        let file = std::io::BufReader::new(fs::File::open(path).unwrap());
        GifDecoder::new(file)
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap()
            .len()
    }

    #[test]
    fn test_animate_writes_gif() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counts.json");
        let output = dir.path().join("bell.gif");
        fs::write(&input, r#"{"counts": {"00": 6, "11": 4}, "shots": 10}"#).unwrap();

        let out = shotflash(
            dir.path(),
            &[
                "animate",
                "-i",
                input.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "--device",
                "sparrow",
                "--seed",
                "1",
            ],
        );
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        assert_eq!(frame_count(&output), 10);
    }

    #[test]
    fn test_animate_auto_device_from_counts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counts.json");
        let output = dir.path().join("wide.gif");
        fs::write(&input, r#"{"0000000": 1, "1111111": 1}"#).unwrap();

        let out = shotflash(
            dir.path(),
            &[
                "animate",
                "-i",
                input.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "--device",
                "auto",
            ],
        );
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        assert!(String::from_utf8_lossy(&out.stdout).contains("albatross"));
    }

    #[test]
    fn test_config_file_supplies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counts.json");
        let output = dir.path().join("xray.gif");
        let config = dir.path().join("shotflash.yaml");
        fs::write(&input, r#"{"01": 2, "10": 1}"#).unwrap();
        fs::write(
            &config,
            format!("mode: xray\nfps: 3\ncolor: gold\noutput: {}\n", output.display()),
        )
        .unwrap();

        let out = shotflash(
            dir.path(),
            &[
                "animate",
                "-i",
                input.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
            ],
        );
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        assert_eq!(frame_count(&output), 3);
    }

    #[test]
    fn test_animate_unwritable_output_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counts.json");
        let output = dir.path().join("no-such-dir").join("out.gif");
        fs::write(&input, r#"{"0": 1}"#).unwrap();

        let out = shotflash(
            dir.path(),
            &[
                "animate",
                "-i",
                input.to_str().unwrap(),
                "-o",
                output.to_str().unwrap(),
                "-d",
                "snake",
            ],
        );
        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
        assert!(!output.exists());
    }

    #[test]
    fn test_animate_unknown_device_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("counts.json");
        fs::write(&input, r#"{"0": 1}"#).unwrap();

        let out = shotflash(
            dir.path(),
            &["animate", "-i", input.to_str().unwrap(), "-d", "condor"],
        );
        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("condor"));
    }

    #[test]
    fn test_missing_counts_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = shotflash(dir.path(), &["animate", "-i", "/nonexistent/counts.json"]);
        assert_eq!(out.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&out.stderr).contains("File not found"));
    }

    #[test]
    fn test_select_prefers_declared_hardware() {
        let dir = tempfile::tempdir().unwrap();
        let backend = dir.path().join("backend.json");
        fs::write(&backend, r#"{"simulator": false, "sample_name": "snake"}"#).unwrap();

        let out = shotflash(
            dir.path(),
            &["select", "-b", backend.to_str().unwrap(), "-q", "3"],
        );
        assert!(out.status.success());
        assert!(String::from_utf8_lossy(&out.stdout).contains("snake"));
    }

    #[test]
    fn test_select_simulator_by_size() {
        let dir = tempfile::tempdir().unwrap();
        let backend = dir.path().join("backend.json");
        fs::write(&backend, r#"{"simulator": true}"#).unwrap();

        let out = shotflash(
            dir.path(),
            &["select", "-b", backend.to_str().unwrap(), "-q", "18"],
        );
        assert!(out.status.success());
        assert!(String::from_utf8_lossy(&out.stdout).contains("unknown20a"));

        let out = shotflash(
            dir.path(),
            &["select", "-b", backend.to_str().unwrap(), "-q", "60"],
        );
        assert_eq!(out.status.code(), Some(1));
    }

    #[test]
    fn test_devices_lists_table() {
        let dir = tempfile::tempdir().unwrap();
        let out = shotflash(dir.path(), &["devices"]);
        assert!(out.status.success());
        let stdout = String::from_utf8_lossy(&out.stdout);
        for name in shotflash_core::supported_names() {
            assert!(stdout.contains(name), "missing {name}");
        }
        assert!(stdout.contains("5.0 x 1.0"));
    }

    #[test]
    fn test_version() {
        let dir = tempfile::tempdir().unwrap();
        let out = shotflash(dir.path(), &["version"]);
        assert!(out.status.success());
        assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
    }
}
